use clap::Parser;

mod bootstrap;
mod cli;
mod collaborators;
mod commands;
mod context;
mod error;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("hirearc error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();

    if matches!(cli.command, cli::Commands::Init) {
        let path = bootstrap::write_default_config()?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let ctx = bootstrap::init().await?;
    commands::dispatch(cli.command, &ctx, &flags).await?;
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("HIRE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
