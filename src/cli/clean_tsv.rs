//! Clean-tsv command - normalize and deduplicate a TSV export.

use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::query::clean_tsv_export;

#[derive(Args)]
pub struct CleanTsvArgs {
    /// Input TSV export
    #[arg(required = true)]
    pub input: PathBuf,

    /// Cleaned output path
    #[arg(required = true)]
    pub output: PathBuf,

    /// Keep duplicate rows instead of dropping them
    #[arg(long)]
    pub keep_duplicates: bool,
}

/// Execute the clean-tsv command
///
/// # Errors
///
/// Returns an error if the input cannot be read or the output written.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: CleanTsvArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    if verbose {
        eprintln!(
            "Cleaning {} -> {}",
            args.input.display(),
            args.output.display(),
        );
    }

    let rows = clean_tsv_export(&args.input, &args.output, !args.keep_duplicates)?;

    match format {
        OutputFormat::Text => println!("{rows} rows written"),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({ "output": args.output.display().to_string(), "rows": rows })
            );
        }
    }

    Ok(())
}
