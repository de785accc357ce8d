//! # release-kit
//!
//! Helper utilities for a genomic data release workflow.
//!
//! When releasing genotype data to collaborators, the same three chores come
//! up every time: cut a participant subset out of a cohort VCF, prove that
//! the cut actually contains the samples that were requested, and wrangle the
//! identifier lists that drive both steps into SQL queries and clean TSVs.
//!
//! `release-kit` covers exactly those chores. The heavy lifting (VCF parsing,
//! indexing, region filtering) is delegated to an external `bcftools`
//! installation; this crate only orchestrates the invocation and checks the
//! result.
//!
//! ## Features
//!
//! - **Subset extraction**: drive `bcftools view -S` from a sample list, with
//!   an optional region filter
//! - **Concordance checking**: set-difference reports between requested and
//!   observed sample IDs, with loaders for flat lists and PLINK `.fam` files
//! - **List helpers**: SQL `IN`-clause generation and TSV export cleaning
//!
//! ## Example
//!
//! ```rust,no_run
//! use release_kit::extract::GenotypeExtractor;
//! use release_kit::validate;
//!
//! let extractor = GenotypeExtractor::default();
//! let result = extractor.extract(
//!     "cohort.vcf.gz",
//!     "request_ids.txt",
//!     "release.vcf.gz",
//!     Some("chr6:26000000-34000000"),
//! ).unwrap();
//!
//! if !result.success {
//!     eprintln!("missing samples: {:?}", result.missing_samples);
//! }
//!
//! let report = validate::validate_fam("request_ids.txt", "release.fam").unwrap();
//! println!("concordance: {:.1}%", report.concordance_rate() * 100.0);
//! ```
//!
//! ## Modules
//!
//! - [`extract`]: bcftools-backed subset extraction
//! - [`validate`]: sample concordance validation
//! - [`query`]: SQL fragment generation and TSV cleaning
//! - [`cli`]: command-line interface implementation

pub mod cli;
pub mod extract;
pub mod query;
pub mod validate;

// Re-export commonly used types for convenience
pub use extract::{ExtractionResult, GenotypeExtractor, ToolFailure};
pub use validate::{IdentifierSet, ValidationReport};
