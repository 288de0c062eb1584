use std::process::ExitCode;

use clap::Parser;
use volby::{cli::Cli, error_time, process::process_election_data};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = process_election_data(&cli.url, &cli.output).await {
        error_time!("{e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
