mod cli;
mod demo;
mod infra;
mod render;

use fightmatch::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
