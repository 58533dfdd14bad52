use clap::Parser;
use tracing_subscriber::EnvFilter;

use xsproof::cli;
use xsproof::errors::XsProofError;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    let result = match cli.command {
        cli::Commands::Validate(args) => cli::validate::handle_validate(args).await,
        cli::Commands::Stored(args) => cli::validate::handle_stored(args).await,
        cli::Commands::Report(args) => cli::report::handle_report(args).await,
    };

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            let exit_code = match &e {
                XsProofError::Config(_) => 2,
                XsProofError::NotReady(_) | XsProofError::Browser(_) => 3,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}
