use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod config;
mod errors;
mod logging;
mod statsd;

use commands::Command;
use config::Config;
use errors::CliError;

/// Management console for the AF, 5G OAM and CUPS APIs
#[derive(Parser, Debug)]
#[command(name = "cnca", version)]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.config.as_deref().map(Config::from_file).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("{}", failure_message(&e));
            return ExitCode::FAILURE;
        }
    };

    let _sentry = logging::init(config.common.logging.as_ref());

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            // Logging may be filtered out entirely; stderr always gets the reason.
            eprintln!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}

fn failure_message(error: &dyn std::fmt::Display) -> String {
    format!("cnca: {error}")
}

fn run(command: Command, config: &Config) -> Result<(), CliError> {
    statsd::init(config.common.metrics.as_ref())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    if let Some(output) = runtime.block_on(commands::run(command, config))? {
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &output)?;
        writeln!(stdout)?;
    }

    Ok(())
}
