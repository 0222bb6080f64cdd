use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use connector_integration::types::ConnectorEnum;
use notify_verifier::{app, configs, logger};

/// Verifies payment gateway notifications against the configured merchant secrets
#[derive(Parser, Debug)]
#[command(name = "notify-verifier", version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify one form-urlencoded notification body and print the outcome as JSON
    Verify {
        /// Configured merchant the notification is addressed to
        #[arg(short, long)]
        merchant: Option<String>,

        /// Gateway that sent the notification
        #[arg(long, default_value = "redsys")]
        connector: ConnectorEnum,

        /// File holding the notification body, stdin when omitted
        input: Option<PathBuf>,
    },
}

#[allow(clippy::print_stdout, clippy::print_stderr)]
fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match configs::Config::new_with_config_path(cli.config) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Failed while parsing config: {error}");
            return ExitCode::from(2);
        }
    };

    let _guard = match logger::setup(
        &config.log,
        notify_verifier::service_name!(),
        [notify_verifier::service_name!()],
    ) {
        Ok(guard) => guard,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::from(2);
        }
    };

    match cli.command {
        Commands::Verify {
            merchant,
            connector,
            input,
        } => {
            let request = app::VerifyRequest {
                connector,
                merchant,
                input,
            };
            match app::run_verify(&config, &request) {
                Ok(outcome) => {
                    match serde_json::to_string_pretty(&outcome) {
                        Ok(json) => println!("{json}"),
                        Err(error) => logger::error!(%error, "Failed to serialize outcome"),
                    }
                    if outcome.is_authorized() {
                        ExitCode::SUCCESS
                    } else {
                        ExitCode::FAILURE
                    }
                }
                Err(error) => {
                    logger::error!(%error, "Verification could not run");
                    eprintln!("{error}");
                    ExitCode::from(2)
                }
            }
        }
    }
}
