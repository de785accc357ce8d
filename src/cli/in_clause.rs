//! In-clause command - SQL IN clause from an identifier file.

use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::query::{build_in_clause, ids_from_file};

#[derive(Args)]
pub struct InClauseArgs {
    /// Text file with one identifier per line
    #[arg(required = true)]
    pub id_file: PathBuf,

    /// SQL column name
    #[arg(short, long, default_value = "barcode")]
    pub column: String,
}

/// Execute the in-clause command
///
/// # Errors
///
/// Returns an error if the identifier file cannot be read.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: InClauseArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let ids = ids_from_file(&args.id_file)?;
    if verbose {
        eprintln!("{} identifiers loaded from {}", ids.len(), args.id_file.display());
    }

    let clause = build_in_clause(&ids, &args.column);

    match format {
        OutputFormat::Text => println!("{clause}"),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({ "column": args.column, "count": ids.len(), "clause": clause })
            );
        }
    }

    Ok(())
}
