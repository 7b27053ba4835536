//! Matcha command line client.

use std::{io, process::ExitCode};

use tracing::error;

use matcha::{cli::Cli, logging};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(error) => {
            _ = error.print();

            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(error) = logging::init(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, so stderr is the only channel left"
        )]
        {
            eprintln!("{error}");
        }

        return ExitCode::FAILURE;
    }

    let stdout = io::stdout();

    match matcha::cli::run(cli, stdout.lock()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "command failed");

            #[expect(
                clippy::print_stderr,
                reason = "the failure must reach the user even when logs are filtered"
            )]
            {
                eprintln!("Error: {error}");
            }

            ExitCode::FAILURE
        }
    }
}
