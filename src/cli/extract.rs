//! Extract command - subset a VCF by sample list via bcftools.

use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::extract::GenotypeExtractor;

#[derive(Args)]
pub struct ExtractArgs {
    /// Input VCF/BCF file
    #[arg(required = true)]
    pub source_vcf: PathBuf,

    /// Text file with one requested sample ID per line
    #[arg(short, long)]
    pub samples: PathBuf,

    /// Output VCF path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Region filter passed to bcftools -r (e.g. "chr6:26000000-34000000")
    #[arg(short, long)]
    pub regions: Option<String>,

    /// Path to the bcftools executable
    #[arg(long, default_value = "bcftools")]
    pub bcftools: String,
}

/// Execute the extract command
///
/// # Errors
///
/// Returns an error if the sample list cannot be read or the extraction did
/// not produce the requested subset.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ExtractArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let extractor = GenotypeExtractor::new(&args.bcftools);

    if verbose {
        eprintln!(
            "Extracting {} -> {} (samples: {})",
            args.source_vcf.display(),
            args.output.display(),
            args.samples.display(),
        );
    }

    let result = extractor.extract(
        &args.source_vcf,
        &args.samples,
        &args.output,
        args.regions.as_deref(),
    )?;

    match format {
        OutputFormat::Text => {
            println!(
                "Requested: {}  Extracted: {}  ({:.1}%)",
                result.requested_samples,
                result.extracted_samples,
                result.concordance_rate() * 100.0,
            );
            if let Some(ref failure) = result.failure {
                println!("Tool failure: {failure}");
            }
            if !result.missing_samples.is_empty() {
                println!("Missing samples:");
                for id in &result.missing_samples {
                    println!("  {id}");
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    if !result.success || !result.missing_samples.is_empty() {
        anyhow::bail!(
            "extraction incomplete: {} of {} requested samples extracted",
            result.extracted_samples,
            result.requested_samples,
        );
    }

    Ok(())
}
