//! Subset extraction via an external `bcftools` installation.
//!
//! [`GenotypeExtractor`] builds a single `bcftools view -S` invocation to cut
//! a participant subset out of a VCF/BCF, then re-reads the output header
//! (`bcftools query -l`) to confirm which of the requested samples actually
//! made it into the release file.
//!
//! Tool failures never surface as errors from [`GenotypeExtractor::extract`]:
//! the call always hands back an [`ExtractionResult`], and a failed
//! invocation is recorded in its [`failure`](ExtractionResult::failure) field
//! so callers can tell a missing executable apart from a rejected input.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::validate::IdentifierSet;

/// Why a bcftools invocation did not produce usable output.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolFailure {
    /// The executable could not be spawned at the configured path.
    #[error("bcftools executable not found: {path}")]
    NotFound { path: String },

    /// The tool ran but exited non-zero; stderr is captured for diagnostics.
    #[error("bcftools exited with status {status}: {stderr}")]
    Failed { status: i32, stderr: String },

    /// The tool was killed before it could report an exit code.
    #[error("bcftools terminated by signal")]
    Terminated,
}

/// Errors from the extraction call itself, as opposed to tool failures.
///
/// Unreadable input files propagate; see [`ToolFailure`] for everything the
/// external tool can do wrong.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of a genotype extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Input VCF/BCF path as given.
    pub source_vcf: String,
    /// Output VCF path as given.
    pub output_vcf: String,
    /// Number of sample IDs read from the request list.
    pub requested_samples: usize,
    /// Number of samples present in the output file header.
    pub extracted_samples: usize,
    /// Requested IDs absent from the output, sorted lexicographically.
    pub missing_samples: Vec<String>,
    /// True when the extracted sample count equals the requested count.
    ///
    /// Count equality is necessary but not sufficient: a request list with
    /// duplicates can match on count while differing in membership, so
    /// callers should also check that [`missing_samples`](Self::missing_samples)
    /// is empty.
    pub success: bool,
    /// Set when the subsetting invocation itself failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<ToolFailure>,
}

impl ExtractionResult {
    /// Fraction of requested samples that made it into the output.
    /// Defined as 0.0 when nothing was requested.
    #[must_use]
    pub fn concordance_rate(&self) -> f64 {
        if self.requested_samples == 0 {
            return 0.0;
        }
        self.extracted_samples as f64 / self.requested_samples as f64
    }
}

/// Extract participant subsets from VCF files using bcftools.
#[derive(Debug, Clone)]
pub struct GenotypeExtractor {
    bcftools_path: String,
}

impl Default for GenotypeExtractor {
    fn default() -> Self {
        Self::new("bcftools")
    }
}

impl GenotypeExtractor {
    /// Create an extractor using the given bcftools executable path.
    pub fn new(bcftools_path: impl Into<String>) -> Self {
        Self {
            bcftools_path: bcftools_path.into(),
        }
    }

    /// Extract a subset of samples from a VCF.
    ///
    /// `sample_file` is a flat text file with one sample ID per line;
    /// `regions` is an optional bcftools region expression such as
    /// `"chr6:26000000-34000000"`.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::Io` if the sample list cannot be read. Failures
    /// of the bcftools invocation itself do NOT error; they come back inside
    /// the result with `success == false` and `failure` populated.
    pub fn extract(
        &self,
        source_vcf: impl AsRef<Path>,
        sample_file: impl AsRef<Path>,
        output_vcf: impl AsRef<Path>,
        regions: Option<&str>,
    ) -> Result<ExtractionResult, ExtractError> {
        let source_vcf = source_vcf.as_ref();
        let sample_file = sample_file.as_ref();
        let output_vcf = output_vcf.as_ref();

        let requested = load_sample_list(sample_file)?;
        let mut result = ExtractionResult {
            source_vcf: source_vcf.display().to_string(),
            output_vcf: output_vcf.display().to_string(),
            requested_samples: requested.len(),
            extracted_samples: 0,
            missing_samples: Vec::new(),
            success: false,
            failure: None,
        };

        let mut cmd = Command::new(&self.bcftools_path);
        cmd.arg("view")
            .arg("-S")
            .arg(sample_file)
            .arg("-o")
            .arg(output_vcf);
        if let Some(regions) = regions {
            cmd.arg("-r").arg(regions);
        }
        cmd.arg(source_vcf);

        debug!(
            "running {} view -S {} -o {} {}",
            self.bcftools_path,
            sample_file.display(),
            output_vcf.display(),
            source_vcf.display(),
        );

        if let Some(failure) = self.run_checked(cmd) {
            warn!("extraction failed: {failure}");
            result.failure = Some(failure);
            return Ok(result);
        }

        // Post-extraction validation against the output header
        let extracted = self.vcf_samples(output_vcf);
        result.extracted_samples = extracted.len();
        let mut missing: Vec<String> = requested
            .iter()
            .filter(|id| !extracted.contains(id.as_str()))
            .cloned()
            .collect();
        missing.sort();
        missing.dedup();
        result.missing_samples = missing;
        result.success = result.extracted_samples == result.requested_samples;

        Ok(result)
    }

    /// List the sample IDs present in a VCF header via `bcftools query -l`.
    ///
    /// Any invocation failure yields an empty set rather than an error; the
    /// cause is logged at warn level.
    #[must_use]
    pub fn vcf_samples(&self, vcf_path: impl AsRef<Path>) -> IdentifierSet {
        let output = Command::new(&self.bcftools_path)
            .arg("query")
            .arg("-l")
            .arg(vcf_path.as_ref())
            .output();

        match output {
            Ok(output) if output.status.success() => String::from_utf8_lossy(&output.stdout)
                .lines()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
                .collect(),
            Ok(output) => {
                warn!(
                    "bcftools query -l failed for {}: {}",
                    vcf_path.as_ref().display(),
                    String::from_utf8_lossy(&output.stderr).trim(),
                );
                IdentifierSet::new()
            }
            Err(e) => {
                warn!("could not run {} query -l: {e}", self.bcftools_path);
                IdentifierSet::new()
            }
        }
    }

    /// Run a prepared command and classify any failure.
    fn run_checked(&self, mut cmd: Command) -> Option<ToolFailure> {
        match cmd.output() {
            Ok(Output { status, stderr, .. }) if !status.success() => match status.code() {
                Some(code) => Some(ToolFailure::Failed {
                    status: code,
                    stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
                }),
                None => Some(ToolFailure::Terminated),
            },
            Ok(_) => None,
            Err(_) => Some(ToolFailure::NotFound {
                path: self.bcftools_path.clone(),
            }),
        }
    }
}

/// Load sample IDs from a flat text file (one per line).
///
/// Lines are trimmed and blanks skipped; order is preserved.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_sample_list(path: impl AsRef<Path>) -> std::io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_sample_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "samples.txt", "S001\n  S002  \n\nS003\n");
        let samples = load_sample_list(&path).unwrap();
        assert_eq!(samples, vec!["S001", "S002", "S003"]);
    }

    #[test]
    fn test_extract_missing_sample_file_is_an_error() {
        let extractor = GenotypeExtractor::default();
        let result = extractor.extract("in.vcf", "/no/such/file.txt", "out.vcf", None);
        assert!(matches!(result, Err(ExtractError::Io(_))));
    }

    #[test]
    fn test_extract_tool_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let samples = write_file(dir.path(), "samples.txt", "S001\nS002\n");
        let extractor = GenotypeExtractor::new("/nonexistent/bcftools");

        let result = extractor
            .extract("in.vcf", &samples, dir.path().join("out.vcf"), None)
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.requested_samples, 2);
        assert_eq!(result.extracted_samples, 0);
        assert!(matches!(result.failure, Some(ToolFailure::NotFound { .. })));
    }

    #[test]
    fn test_vcf_samples_tool_not_found_is_empty() {
        let extractor = GenotypeExtractor::new("/nonexistent/bcftools");
        assert!(extractor.vcf_samples("in.vcf").is_empty());
    }

    #[cfg(unix)]
    fn write_stub_bcftools(dir: &Path, script: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = write_file(dir, "bcftools", script);
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_with_stub_tool() {
        // Stub bcftools: `view` copies the sample list to the output path,
        // `query -l` prints the output file back. That makes the extracted
        // set equal the requested set without a real VCF.
        let script = r#"#!/bin/sh
if [ "$1" = "view" ]; then
    cp "$3" "$5"
elif [ "$1" = "query" ]; then
    cat "$3"
fi
"#;
        let dir = tempfile::tempdir().unwrap();
        let stub = write_stub_bcftools(dir.path(), script);
        let samples = write_file(dir.path(), "samples.txt", "S001\nS002\nS003\n");
        let out = dir.path().join("out.vcf");

        let extractor = GenotypeExtractor::new(stub.to_string_lossy());
        let result = extractor.extract("in.vcf", &samples, &out, None).unwrap();

        assert!(result.success);
        assert!(result.failure.is_none());
        assert_eq!(result.requested_samples, 3);
        assert_eq!(result.extracted_samples, 3);
        assert!(result.missing_samples.is_empty());
        assert!((result.concordance_rate() - 1.0).abs() < f64::EPSILON);
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_tool_rejects_input() {
        let script = "#!/bin/sh\necho 'bad region' >&2\nexit 255\n";
        let dir = tempfile::tempdir().unwrap();
        let stub = write_stub_bcftools(dir.path(), script);
        let samples = write_file(dir.path(), "samples.txt", "S001\n");

        let extractor = GenotypeExtractor::new(stub.to_string_lossy());
        let result = extractor
            .extract("in.vcf", &samples, dir.path().join("out.vcf"), Some("chrQ:1-2"))
            .unwrap();

        assert!(!result.success);
        match result.failure {
            Some(ToolFailure::Failed { status, ref stderr }) => {
                assert_eq!(status, 255);
                assert_eq!(stderr, "bad region");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_partial_output() {
        // `view` drops the last requested sample from the output.
        let script = r#"#!/bin/sh
if [ "$1" = "view" ]; then
    head -n 2 "$3" > "$5"
elif [ "$1" = "query" ]; then
    cat "$3"
fi
"#;
        let dir = tempfile::tempdir().unwrap();
        let stub = write_stub_bcftools(dir.path(), script);
        let samples = write_file(dir.path(), "samples.txt", "S001\nS002\nS003\n");
        let out = dir.path().join("out.vcf");

        let extractor = GenotypeExtractor::new(stub.to_string_lossy());
        let result = extractor.extract("in.vcf", &samples, &out, None).unwrap();

        assert!(!result.success);
        assert!(result.failure.is_none());
        assert_eq!(result.extracted_samples, 2);
        assert_eq!(result.missing_samples, vec!["S003"]);
    }
}
