use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod extract;
mod query;
mod validate;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("release_kit=debug,info")
    } else {
        EnvFilter::new("release_kit=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Extract(args) => {
            cli::extract::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Validate(args) => {
            cli::validate::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::InClause(args) => {
            cli::in_clause::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::CleanTsv(args) => {
            cli::clean_tsv::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
