//! Validate command - sample concordance between a request list and a .fam file.

use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::validate::validate_fam;

#[derive(Args)]
pub struct ValidateArgs {
    /// Request list: one expected sample ID per line
    #[arg(required = true)]
    pub request_file: PathBuf,

    /// PLINK .fam file (sample ID in column 2)
    #[arg(required = true)]
    pub fam_file: PathBuf,
}

/// Execute the validate command
///
/// # Errors
///
/// Returns an error if either input cannot be read or the sets are not
/// concordant.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ValidateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    if verbose {
        eprintln!(
            "Validating {} against {}",
            args.fam_file.display(),
            args.request_file.display(),
        );
    }

    let report = validate_fam(&args.request_file, &args.fam_file)?;

    match format {
        OutputFormat::Text => {
            println!(
                "Expected: {}  Actual: {}  Matched: {}  ({:.1}%)",
                report.expected_count,
                report.actual_count,
                report.matched,
                report.concordance_rate() * 100.0,
            );
            if !report.missing.is_empty() {
                println!("Missing ({}):", report.missing.len());
                for id in &report.missing {
                    println!("  {id}");
                }
            }
            if !report.unexpected.is_empty() {
                println!("Unexpected ({}):", report.unexpected.len());
                for id in &report.unexpected {
                    println!("  {id}");
                }
            }
            if report.is_concordant() {
                println!("Concordant");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if !report.is_concordant() {
        anyhow::bail!(
            "not concordant: {} missing, {} unexpected",
            report.missing.len(),
            report.unexpected.len(),
        );
    }

    Ok(())
}
