//! Command-line interface for release-kit.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **extract**: Subset a VCF by sample list via bcftools and verify the output
//! - **validate**: Check sample concordance between a request list and a .fam file
//! - **in-clause**: Build a SQL IN clause from an identifier list
//! - **clean-tsv**: Normalize and deduplicate a TSV export
//!
//! ## Usage
//!
//! ```text
//! # Cut a release subset and check it
//! release-kit extract cohort.vcf.gz --samples request.txt --output release.vcf.gz
//!
//! # Restrict to the MHC region
//! release-kit extract cohort.vcf.gz -s request.txt -o mhc.vcf.gz -r chr6:26000000-34000000
//!
//! # Concordance report as JSON for scripting
//! release-kit validate request.txt release.fam --format json
//!
//! # SQL fragment for the biobank metadata query
//! release-kit in-clause barcodes.txt --column barcode
//! ```

use clap::{Parser, Subcommand};

pub mod clean_tsv;
pub mod extract;
pub mod in_clause;
pub mod validate;

#[derive(Parser)]
#[command(name = "release-kit")]
#[command(version)]
#[command(about = "Helper utilities for genomic data release workflows")]
#[command(
    long_about = "release-kit orchestrates the routine chores of a genotype data release:\n- subsetting a cohort VCF to the requested participants (via bcftools)\n- validating that the release contains exactly the requested samples\n- generating SQL fragments and cleaning TSV exports for the driving ID lists"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a sample subset from a VCF using bcftools
    Extract(extract::ExtractArgs),

    /// Validate sample concordance between a request list and a .fam file
    Validate(validate::ValidateArgs),

    /// Build a SQL IN clause from an identifier file
    InClause(in_clause::InClauseArgs),

    /// Clean and deduplicate a TSV export
    CleanTsv(clean_tsv::CleanTsvArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
