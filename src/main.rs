use clap::Parser;
use std::process;
use workload_audit::{cli::Cli, config, run_command};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> workload_audit::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    // Load configuration
    let config = config::load_config(cli.config.as_deref())?;
    log::debug!("Loaded configuration: {:?}", config);

    run_command(cli.command, &config).await
}
