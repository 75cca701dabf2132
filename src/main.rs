//! github-org-audit - A CLI tool to audit GitHub organizations
//!
//! This is the main entry point for the CLI application.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use github_org_audit::cli::{commands, exit_codes, Cli, Commands};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.log_json);

    let config = cli.config.as_deref();

    // Execute the appropriate command
    let result = match cli.command {
        Commands::Audit(args) => commands::audit::execute(args, config).await,
        Commands::Settings(args) => commands::settings::execute(args, config).await,
        Commands::Teams(args) => commands::teams::execute(args, config).await,
        Commands::Repositories(args) => commands::repositories::execute(args, config).await,
        Commands::Permissions(args) => commands::permissions::execute(args, config).await,
        Commands::Codeowners(args) => commands::codeowners::execute(args, config).await,
        Commands::Security(args) => commands::security::execute(args, config).await,
        Commands::Coverage(args) => commands::coverage::execute(args, config).await,
        Commands::Init(args) => commands::init::execute(args, config).await,
        Commands::GenerateMan(args) => commands::generate_man::execute(args).await,
    };

    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Logs go to stderr; stdout carries only the report
fn setup_logging(verbosity: u8, json: bool) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
