mod common;
mod constraints;
mod recommend;
