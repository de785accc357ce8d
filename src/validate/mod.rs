//! Sample concordance validation.
//!
//! Compares the identifier set that was requested for a release against the
//! set that actually appears in an output artifact (a PLINK `.fam` file or a
//! plain ID list) and reports the differences. Mismatches are report fields,
//! not errors; only unreadable input files error.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Serialize;

/// Unordered collection of unique sample/barcode identifiers.
pub type IdentifierSet = HashSet<String>;

/// Report from sample concordance validation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Number of distinct requested IDs.
    pub expected_count: usize,
    /// Number of distinct observed IDs.
    pub actual_count: usize,
    /// Size of the intersection.
    pub matched: usize,
    /// Expected IDs absent from the observed set, sorted lexicographically.
    pub missing: Vec<String>,
    /// Observed IDs that were never requested, sorted lexicographically.
    pub unexpected: Vec<String>,
}

impl ValidationReport {
    /// True when the counts agree and nothing requested is missing.
    ///
    /// The missing-check is deliberate even though equal counts with
    /// non-empty `missing` implies size-compensating `unexpected` entries.
    #[must_use]
    pub fn is_concordant(&self) -> bool {
        self.expected_count == self.actual_count && self.missing.is_empty()
    }

    /// Fraction of expected IDs that were observed.
    /// Defined as 0.0 when nothing was expected.
    #[must_use]
    pub fn concordance_rate(&self) -> f64 {
        if self.expected_count == 0 {
            return 0.0;
        }
        self.matched as f64 / self.expected_count as f64
    }
}

/// Compare expected and actual sample ID sets.
#[must_use]
pub fn validate(expected: &IdentifierSet, actual: &IdentifierSet) -> ValidationReport {
    let matched = expected.intersection(actual).count();
    let mut missing: Vec<String> = expected.difference(actual).cloned().collect();
    let mut unexpected: Vec<String> = actual.difference(expected).cloned().collect();
    missing.sort();
    unexpected.sort();

    ValidationReport {
        expected_count: expected.len(),
        actual_count: actual.len(),
        matched,
        missing,
        unexpected,
    }
}

/// Extract sample IDs from a PLINK `.fam`-style file.
///
/// Rows are whitespace-delimited; the ID is the second column. Rows with
/// fewer than two columns are ignored.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn ids_from_fam(path: impl AsRef<Path>) -> std::io::Result<IdentifierSet> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            fields.next()?;
            fields.next().map(ToString::to_string)
        })
        .collect())
}

/// Load sample IDs from a plain text file (one per line).
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn ids_from_list(path: impl AsRef<Path>) -> std::io::Result<IdentifierSet> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect())
}

/// Validate a `.fam` file against a request list.
///
/// # Errors
///
/// Returns an error if either file cannot be read.
pub fn validate_fam(
    request_file: impl AsRef<Path>,
    fam_file: impl AsRef<Path>,
) -> std::io::Result<ValidationReport> {
    let expected = ids_from_list(request_file)?;
    let actual = ids_from_fam(fam_file)?;
    Ok(validate(&expected, &actual))
}
