use clap::Parser;
use tracing_subscriber::EnvFilter;

use fold_relay::cli;
use fold_relay::web;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("fold_relay=debug,info")
    } else {
        EnvFilter::new("fold_relay=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Fold(args) => {
            cli::fold::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Plddt(args) => {
            cli::plddt::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Serve(args) => {
            web::server::run(args)?;
        }
    }

    Ok(())
}
