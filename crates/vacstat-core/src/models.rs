use chrono::{DateTime, Datelike};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VacstatError};

/// Column names a vacancy export must provide, in no particular order.
pub const EXPECTED_COLUMNS: [&str; 6] = [
    "name",
    "salary_from",
    "salary_to",
    "salary_currency",
    "area_name",
    "published_at",
];

/// Publish timestamps are ISO-8601 with an explicit UTC offset,
/// e.g. `2022-07-05T18:19:30+0300`.
pub const PUBLISHED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// A single normalized job posting.
///
/// Immutable once built; only [`Vacancy::from_row`] constructs one, so every
/// instance carries validated salary bounds and a publish year extracted from
/// the raw timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vacancy {
    /// Posting title.
    pub name: String,
    /// Lower salary bound, as published.
    pub salary_from: f64,
    /// Upper salary bound, as published.
    pub salary_to: f64,
    /// Currency code the bounds are expressed in.
    pub salary_currency: String,
    /// Region (city) the posting belongs to.
    pub area_name: String,
    /// Four-digit year the posting was published.
    pub published_year: i32,
}

impl Vacancy {
    /// Build a [`Vacancy`] from a header record and a data row.
    ///
    /// Each named field is looked up, validated and converted individually.
    /// Fails with [`VacstatError::MalformedRecord`] when the row has a
    /// different field count than the header, a required column is missing,
    /// any field is empty, a salary bound does not parse as a non-negative
    /// finite number, or the timestamp does not match
    /// [`PUBLISHED_AT_FORMAT`].
    pub fn from_row(columns: &csv::StringRecord, row: &csv::StringRecord) -> Result<Self> {
        if row.len() != columns.len() {
            return Err(VacstatError::MalformedRecord(format!(
                "expected {} fields, got {}",
                columns.len(),
                row.len()
            )));
        }

        let name = field(columns, row, "name")?.to_string();
        let salary_from = parse_salary(field(columns, row, "salary_from")?, "salary_from")?;
        let salary_to = parse_salary(field(columns, row, "salary_to")?, "salary_to")?;
        let salary_currency = field(columns, row, "salary_currency")?.to_string();
        let area_name = field(columns, row, "area_name")?.to_string();
        let published_year = parse_published_year(field(columns, row, "published_at")?)?;

        Ok(Self {
            name,
            salary_from,
            salary_to,
            salary_currency,
            area_name,
            published_year,
        })
    }
}

/// Look up the non-empty value of `column` in `row`.
fn field<'r>(
    columns: &csv::StringRecord,
    row: &'r csv::StringRecord,
    column: &str,
) -> Result<&'r str> {
    let index = columns
        .iter()
        .position(|c| c == column)
        .ok_or_else(|| VacstatError::MalformedRecord(format!("missing column {:?}", column)))?;

    // Index is in range: the field-count check ran before any lookup.
    let value = row.get(index).unwrap_or_default();
    if value.is_empty() {
        return Err(VacstatError::MalformedRecord(format!(
            "empty field {:?}",
            column
        )));
    }
    Ok(value)
}

/// Parse a salary bound as a non-negative finite number.
fn parse_salary(value: &str, column: &str) -> Result<f64> {
    let parsed: f64 = value.parse().map_err(|_| {
        VacstatError::MalformedRecord(format!("{}: {:?} is not a number", column, value))
    })?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(VacstatError::MalformedRecord(format!(
            "{}: {:?} is out of range",
            column, value
        )));
    }
    Ok(parsed)
}

/// Extract the publish year from an ISO-8601 timestamp with offset.
fn parse_published_year(value: &str) -> Result<i32> {
    let timestamp = DateTime::parse_from_str(value, PUBLISHED_AT_FORMAT).map_err(|_| {
        VacstatError::MalformedRecord(format!("published_at: {:?} is not a timestamp", value))
    })?;
    Ok(timestamp.year())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> csv::StringRecord {
        csv::StringRecord::from(EXPECTED_COLUMNS.to_vec())
    }

    fn row(fields: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(fields.to_vec())
    }

    // ── from_row ──────────────────────────────────────────────────────────────

    #[test]
    fn test_from_row_valid() {
        let vacancy = Vacancy::from_row(
            &header(),
            &row(&[
                "Data Engineer",
                "100",
                "200.5",
                "RUR",
                "Moscow",
                "2022-07-05T18:19:30+0300",
            ]),
        )
        .unwrap();

        assert_eq!(vacancy.name, "Data Engineer");
        assert_eq!(vacancy.salary_from, 100.0);
        assert_eq!(vacancy.salary_to, 200.5);
        assert_eq!(vacancy.salary_currency, "RUR");
        assert_eq!(vacancy.area_name, "Moscow");
        assert_eq!(vacancy.published_year, 2022);
    }

    #[test]
    fn test_from_row_columns_in_any_order() {
        let columns = row(&[
            "published_at",
            "area_name",
            "salary_currency",
            "salary_to",
            "salary_from",
            "name",
        ]);
        let vacancy = Vacancy::from_row(
            &columns,
            &row(&[
                "2019-01-01T00:00:00+0000",
                "Kazan",
                "USD",
                "300",
                "150",
                "Analyst",
            ]),
        )
        .unwrap();

        assert_eq!(vacancy.name, "Analyst");
        assert_eq!(vacancy.area_name, "Kazan");
        assert_eq!(vacancy.published_year, 2019);
    }

    #[test]
    fn test_from_row_field_count_mismatch() {
        let err = Vacancy::from_row(&header(), &row(&["Data Engineer", "100", "200"])).unwrap_err();
        assert!(matches!(err, VacstatError::MalformedRecord(_)));
        assert!(err.to_string().contains("expected 6 fields"));
    }

    #[test]
    fn test_from_row_empty_field() {
        let err = Vacancy::from_row(
            &header(),
            &row(&["Data Engineer", "", "200", "RUR", "Moscow", "2022-07-05T18:19:30+0300"]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("empty field"));
    }

    #[test]
    fn test_from_row_salary_not_a_number() {
        let err = Vacancy::from_row(
            &header(),
            &row(&["Data Engineer", "1e", "200", "RUR", "Moscow", "2022-07-05T18:19:30+0300"]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("not a number"));
    }

    #[test]
    fn test_from_row_negative_salary_rejected() {
        let err = Vacancy::from_row(
            &header(),
            &row(&["Data Engineer", "-5", "200", "RUR", "Moscow", "2022-07-05T18:19:30+0300"]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_from_row_bad_timestamp() {
        let err = Vacancy::from_row(
            &header(),
            &row(&["Data Engineer", "100", "200", "RUR", "Moscow", "2022-07-05"]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("not a timestamp"));
    }

    #[test]
    fn test_from_row_missing_column() {
        let columns = row(&["name", "salary_from", "salary_to", "salary_currency", "area_name", "created_at"]);
        let err = Vacancy::from_row(
            &columns,
            &row(&["Data Engineer", "100", "200", "RUR", "Moscow", "2022-07-05T18:19:30+0300"]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing column"));
    }

    // ── parse_published_year ──────────────────────────────────────────────────

    #[test]
    fn test_parse_published_year_colon_offset() {
        // chrono's %z accepts both +0300 and +03:00.
        assert_eq!(parse_published_year("2017-12-31T23:59:59+03:00").unwrap(), 2017);
    }

    #[test]
    fn test_parse_salary_integer_and_float_forms() {
        assert_eq!(parse_salary("100", "salary_from").unwrap(), 100.0);
        assert_eq!(parse_salary("100.0", "salary_from").unwrap(), 100.0);
    }
}
