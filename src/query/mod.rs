//! SQL fragment generation and TSV export cleaning.
//!
//! Pure text transformations for the identifier lists that drive a release:
//! turning flat barcode files into SQL `IN` clauses for biobank metadata
//! queries, and normalizing the TSV exports that come back from database
//! management tools (quote-stripping, whitespace trimming, row dedup).

use std::fs;
use std::path::Path;

use tracing::debug;

/// Build a SQL `IN` clause from a list of identifiers.
///
/// Identifiers are trimmed and blanks dropped; each survivor is wrapped in
/// single quotes with embedded quotes doubled per the SQL standard, so a
/// stray `O'Brien` cannot break the statement.
///
/// ```
/// use release_kit::query::build_in_clause;
///
/// let clause = build_in_clause(&["BC001", "BC002", "BC003"], "barcode");
/// assert_eq!(clause, "barcode IN ('BC001', 'BC002', 'BC003')");
/// ```
#[must_use]
pub fn build_in_clause<S: AsRef<str>>(ids: &[S], column_name: &str) -> String {
    let quoted: Vec<String> = ids
        .iter()
        .map(|id| id.as_ref().trim())
        .filter(|id| !id.is_empty())
        .map(|id| format!("'{}'", id.replace('\'', "''")))
        .collect();
    format!("{} IN ({})", column_name, quoted.join(", "))
}

/// Load identifiers from a flat text file (one per line).
///
/// Lines are trimmed and blanks skipped; order is preserved.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn ids_from_file(path: impl AsRef<Path>) -> std::io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect())
}

/// Clean a TSV export from a database tool.
///
/// Every cell is trimmed and stripped of surrounding double quotes. The first
/// row is kept unconditionally as the header and never takes part in
/// deduplication; when `deduplicate` is true, later rows whose cleaned cell
/// tuple exactly repeats an earlier row are dropped. The surviving rows are
/// written tab-separated to `output_path`.
///
/// Returns the number of body rows written (the header does not count).
/// An empty input produces an empty output file and a count of 0.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the output written.
pub fn clean_tsv_export(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    deduplicate: bool,
) -> std::io::Result<usize> {
    let content = fs::read_to_string(&input_path)?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut seen: std::collections::HashSet<Vec<String>> = std::collections::HashSet::new();

    for (i, line) in content.lines().enumerate() {
        let cleaned: Vec<String> = line
            .split('\t')
            .map(|cell| cell.trim().trim_matches('"').to_string())
            .collect();

        // First row is the header; it never enters the seen-set.
        if i > 0 {
            if deduplicate && seen.contains(&cleaned) {
                continue;
            }
            seen.insert(cleaned.clone());
        }
        rows.push(cleaned);
    }

    let mut out = String::new();
    for row in &rows {
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    fs::write(&output_path, out)?;

    let body_rows = rows.len().saturating_sub(1);
    debug!(
        "cleaned {} -> {}: {} body rows",
        input_path.as_ref().display(),
        output_path.as_ref().display(),
        body_rows,
    );
    Ok(body_rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_in_clause() {
        let clause = build_in_clause(&["BC001", "BC002", "BC003"], "barcode");
        assert_eq!(clause, "barcode IN ('BC001', 'BC002', 'BC003')");
    }

    #[test]
    fn test_build_in_clause_skips_blanks_and_trims() {
        let clause = build_in_clause(&[" BC001 ", "", "   ", "BC002"], "sample_id");
        assert_eq!(clause, "sample_id IN ('BC001', 'BC002')");
    }

    #[test]
    fn test_build_in_clause_escapes_quotes() {
        let clause = build_in_clause(&["O'Brien"], "donor");
        assert_eq!(clause, "donor IN ('O''Brien')");
    }

    #[test]
    fn test_build_in_clause_empty_list() {
        assert_eq!(build_in_clause::<&str>(&[], "barcode"), "barcode IN ()");
    }

    #[test]
    fn test_ids_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.txt");
        fs::write(&path, "BC002\n BC001 \n\nBC002\n").unwrap();
        // order preserved, duplicates kept
        assert_eq!(ids_from_file(&path).unwrap(), vec!["BC002", "BC001", "BC002"]);
    }

    #[test]
    fn test_clean_tsv_export_dedup() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.tsv");
        let output = dir.path().join("clean.tsv");
        fs::write(
            &input,
            "barcode\tstatus\n\"BC001\"\tok\nBC001\tok\n BC002 \tpending\n",
        )
        .unwrap();

        let count = clean_tsv_export(&input, &output, true).unwrap();
        assert_eq!(count, 2);

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written, "barcode\tstatus\nBC001\tok\nBC002\tpending\n");
        assert_eq!(written.lines().count(), 3);
    }

    #[test]
    fn test_clean_tsv_export_keeps_duplicates_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.tsv");
        let output = dir.path().join("clean.tsv");
        fs::write(&input, "barcode\nBC001\nBC001\n").unwrap();

        let count = clean_tsv_export(&input, &output, false).unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_clean_tsv_export_header_never_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.tsv");
        let output = dir.path().join("clean.tsv");
        // A body row identical to the header must survive: the header is not
        // part of the seen-set.
        fs::write(&input, "barcode\nbarcode\nBC001\n").unwrap();

        let count = clean_tsv_export(&input, &output, true).unwrap();
        assert_eq!(count, 2);
        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written, "barcode\nbarcode\nBC001\n");
    }

    #[test]
    fn test_clean_tsv_export_empty_input_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.tsv");
        let output = dir.path().join("clean.tsv");
        fs::write(&input, "").unwrap();

        let count = clean_tsv_export(&input, &output, true).unwrap();
        assert_eq!(count, 0);
        assert_eq!(fs::read_to_string(&output).unwrap(), "");
    }

    #[test]
    fn test_clean_tsv_export_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.tsv");
        let pass1 = dir.path().join("pass1.tsv");
        let pass2 = dir.path().join("pass2.tsv");
        fs::write(&input, "id\tvalue\nA\t1\nA\t1\nB\t2\n").unwrap();

        let count1 = clean_tsv_export(&input, &pass1, true).unwrap();
        let count2 = clean_tsv_export(&pass1, &pass2, true).unwrap();
        assert_eq!(count1, 2);
        assert_eq!(count2, count1);
        assert_eq!(
            fs::read_to_string(&pass1).unwrap(),
            fs::read_to_string(&pass2).unwrap()
        );
    }
}
