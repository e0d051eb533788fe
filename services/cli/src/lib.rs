mod cli;
mod commands;
mod infra;

use edulead::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
