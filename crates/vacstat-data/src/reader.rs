//! CSV discovery and loading for the vacancy statistics pipeline.
//!
//! Reads a vacancy export produced by the job board and converts it into
//! [`Vacancy`] records for downstream aggregation.

use std::path::Path;

use tracing::debug;
use vacstat_core::models::Vacancy;
use vacstat_core::{Result, VacstatError};

// ── Public API ────────────────────────────────────────────────────────────────

/// Records loaded from one input file, plus row-level counters for logging.
#[derive(Debug, Clone)]
pub struct LoadedRecords {
    /// Normalized records, in file order.
    pub records: Vec<Vacancy>,
    /// Data rows present in the file (header excluded).
    pub rows_read: usize,
    /// Rows that survived the structural filter.
    pub rows_kept: usize,
}

/// Load a vacancy export from `path`.
///
/// The whole file is read into memory; a UTF-8 byte-order marker is stripped
/// before parsing. The first row is the header defining column names. Rows
/// are kept only when their field count matches the header and no field is
/// empty; surviving rows then go through [`Vacancy::from_row`]. Rows failing
/// either step are dropped with a `debug` log, never surfaced as errors.
///
/// Fatal conditions: the file cannot be read ([`VacstatError::FileRead`]),
/// the file has no rows at all ([`VacstatError::EmptyFile`]), or zero records
/// remain after filtering and normalization ([`VacstatError::EmptyDataset`]).
pub fn load_vacancies(path: &Path) -> Result<LoadedRecords> {
    let raw = std::fs::read_to_string(path).map_err(|source| VacstatError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let content = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

    if content.trim().is_empty() {
        return Err(VacstatError::EmptyFile(path.to_path_buf()));
    }

    // `flexible` keeps short/long rows as records so the structural filter
    // below decides their fate instead of the parser.
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());
    let columns = reader.headers()?.clone();

    let mut records: Vec<Vacancy> = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_kept = 0usize;

    for row_result in reader.records() {
        let row = row_result?;
        rows_read += 1;

        if !is_structurally_complete(&columns, &row) {
            debug!("Dropping incomplete row {}", rows_read);
            continue;
        }
        rows_kept += 1;

        match Vacancy::from_row(&columns, &row) {
            Ok(vacancy) => records.push(vacancy),
            Err(e) => debug!("Dropping row {}: {}", rows_read, e),
        }
    }

    debug!(
        "File {}: {} rows read, {} kept, {} normalized",
        path.display(),
        rows_read,
        rows_kept,
        records.len()
    );

    if records.is_empty() {
        return Err(VacstatError::EmptyDataset);
    }

    Ok(LoadedRecords {
        records,
        rows_read,
        rows_kept,
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// A row passes the structural filter when its field count matches the header
/// and no field is empty.
fn is_structurally_complete(columns: &csv::StringRecord, row: &csv::StringRecord) -> bool {
    row.len() == columns.len() && row.iter().all(|field| !field.is_empty())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const HEADER: &str = "name,salary_from,salary_to,salary_currency,area_name,published_at";

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    fn sample_row(name: &str, area: &str, year: i32) -> String {
        format!(
            "{},100,200,RUR,{},{}-07-05T18:19:30+0300",
            name, area, year
        )
    }

    // ── load_vacancies ────────────────────────────────────────────────────────

    #[test]
    fn test_load_vacancies_basic() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "vacancies.csv",
            &[HEADER, &sample_row("Data Engineer", "Moscow", 2022)],
        );

        let loaded = load_vacancies(&path).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.rows_read, 1);
        assert_eq!(loaded.rows_kept, 1);
        assert_eq!(loaded.records[0].name, "Data Engineer");
        assert_eq!(loaded.records[0].published_year, 2022);
    }

    #[test]
    fn test_load_vacancies_strips_bom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vacancies.csv");
        let body = format!(
            "\u{feff}{}\n{}\n",
            HEADER,
            sample_row("Data Engineer", "Moscow", 2022)
        );
        std::fs::write(&path, body).unwrap();

        let loaded = load_vacancies(&path).unwrap();
        assert_eq!(loaded.records.len(), 1);
    }

    #[test]
    fn test_load_vacancies_missing_file() {
        let err = load_vacancies(Path::new("/tmp/does-not-exist-vacstat/v.csv")).unwrap_err();
        assert!(matches!(err, VacstatError::FileRead { .. }));
    }

    #[test]
    fn test_load_vacancies_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vacancies.csv");
        std::fs::write(&path, "").unwrap();

        let err = load_vacancies(&path).unwrap_err();
        assert!(matches!(err, VacstatError::EmptyFile(_)));
    }

    #[test]
    fn test_load_vacancies_bom_only_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vacancies.csv");
        std::fs::write(&path, "\u{feff}").unwrap();

        let err = load_vacancies(&path).unwrap_err();
        assert!(matches!(err, VacstatError::EmptyFile(_)));
    }

    #[test]
    fn test_load_vacancies_header_only_is_empty_dataset() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "vacancies.csv", &[HEADER]);

        let err = load_vacancies(&path).unwrap_err();
        assert!(matches!(err, VacstatError::EmptyDataset));
    }

    #[test]
    fn test_load_vacancies_drops_rows_with_empty_fields() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "vacancies.csv",
            &[
                HEADER,
                "Data Engineer,,200,RUR,Moscow,2022-07-05T18:19:30+0300",
                &sample_row("Data Analyst", "Moscow", 2022),
            ],
        );

        let loaded = load_vacancies(&path).unwrap();
        assert_eq!(loaded.rows_read, 2);
        assert_eq!(loaded.rows_kept, 1);
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].name, "Data Analyst");
    }

    #[test]
    fn test_load_vacancies_drops_short_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "vacancies.csv",
            &[
                HEADER,
                "Data Engineer,100,200",
                &sample_row("Data Analyst", "Moscow", 2022),
            ],
        );

        let loaded = load_vacancies(&path).unwrap();
        assert_eq!(loaded.rows_kept, 1);
        assert_eq!(loaded.records.len(), 1);
    }

    #[test]
    fn test_load_vacancies_drops_unparseable_rows_silently() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "vacancies.csv",
            &[
                HEADER,
                // Structurally complete but the salary is not a number.
                "Data Engineer,lots,200,RUR,Moscow,2022-07-05T18:19:30+0300",
                &sample_row("Data Analyst", "Moscow", 2022),
            ],
        );

        let loaded = load_vacancies(&path).unwrap();
        assert_eq!(loaded.rows_kept, 2);
        assert_eq!(loaded.records.len(), 1);
    }

    #[test]
    fn test_load_vacancies_all_rows_malformed_is_empty_dataset() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "vacancies.csv",
            &[HEADER, "Data Engineer,100,200", ",,,,,"],
        );

        let err = load_vacancies(&path).unwrap_err();
        assert!(matches!(err, VacstatError::EmptyDataset));
    }

    #[test]
    fn test_load_vacancies_preserves_file_order() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "vacancies.csv",
            &[
                HEADER,
                &sample_row("B", "Kazan", 2021),
                &sample_row("A", "Moscow", 2020),
            ],
        );

        let loaded = load_vacancies(&path).unwrap();
        let names: Vec<&str> = loaded.records.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
