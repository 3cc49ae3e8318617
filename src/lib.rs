pub mod ai;
pub mod analysis;
pub mod capture;
pub mod config;

mod cli;
mod output;

use clap::Parser;
use std::process::ExitCode;

pub use analysis::{AnalysisClient, AnalysisError, Assessment, ClientMode};
pub use config::AppConfig;

pub fn run() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = cli::Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(cli.execute()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{:?}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
