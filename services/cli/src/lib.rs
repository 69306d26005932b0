mod catalog;
mod cli;
mod demo;
mod infra;
mod search;

use buscapet::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
