pub mod config;
pub mod error;
pub mod matchmaking;
pub mod roster;
pub mod telemetry;
