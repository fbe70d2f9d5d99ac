use std::process::ExitCode;

use clap::Parser;
use passhash_cli::command::run;
use passhash_cli::Cli;
use passhash_cli::Config;
use passhash_cli::Outcome;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<ExitCode, anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "passhash=info,passhash_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let hasher_config = cli.overrides.apply(config.hasher);

    tracing::debug!(
        variant = %hasher_config.variant,
        memory_kb = hasher_config.memory_kb,
        iterations = hasher_config.iterations,
        parallelism = hasher_config.parallelism,
        "Configuration loaded"
    );

    match run(&cli.command, hasher_config, std::io::stdin().lock()) {
        Ok(Outcome::Encoded(hash)) => {
            println!("{}", hash);
            Ok(ExitCode::SUCCESS)
        }
        Ok(Outcome::Matched) => {
            println!("match");
            Ok(ExitCode::SUCCESS)
        }
        Ok(Outcome::Mismatched) => {
            println!("mismatch");
            Ok(ExitCode::from(1))
        }
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            Ok(ExitCode::from(2))
        }
    }
}
