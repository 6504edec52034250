use anyhow::Result;
use clap::Parser;
use school_forms::{
    cli::{Args, CliApp},
    utils::Config,
};

fn main() -> Result<()> {
    let args = Args::parse();

    // The subscriber depends on the config, so report failures directly.
    let config = Config::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;
    let level = config.effective_log_level(args.verbose);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        "Configuration loaded for {} environment",
        config.environment
    );

    let app = CliApp::new(config);
    let ok = app.run(args.command).map_err(|e| {
        tracing::error!("Command failed: {}", e);
        e
    })?;

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
