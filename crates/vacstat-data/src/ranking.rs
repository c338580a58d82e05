//! Top-N region rankings derived from the aggregated groupings.

use crate::aggregator::{CountGroups, SalaryGroups};

/// Region keys that denote the whole country rather than a city. Raw exports
/// carry the Cyrillic spelling; transliterated exports use the Latin one.
/// Neither belongs in a per-city ranking.
pub const COUNTRY_KEYS: [&str; 2] = ["Россия", "Russia"];

/// Maximum number of entries in either ranking.
const TOP_LIMIT: usize = 10;

/// Minimum share of the total record count a region needs to be ranked.
const MIN_SHARE: f64 = 0.01;

/// Top regions by average midpoint salary, descending.
///
/// Regions holding less than 1% of the total record count and country-level
/// keys are excluded before sorting. The stable sort keeps first-seen order
/// for equal means; at most [`TOP_LIMIT`] entries are returned, and an
/// all-excluded input yields an empty list.
pub fn top_salary_by_region(salaries: &SalaryGroups<String>) -> Vec<(String, i64)> {
    let total: usize = salaries.keys().map(|key| salaries.value_count(key)).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<(String, i64)> = salaries
        .mean_by_key()
        .into_iter()
        .filter(|(region, _)| !is_country_key(region))
        .filter(|(region, _)| {
            salaries.value_count(region) as f64 / total as f64 >= MIN_SHARE
        })
        .collect();

    candidates.sort_by(|a, b| b.1.cmp(&a.1));
    candidates.truncate(TOP_LIMIT);
    candidates
}

/// Top regions by share of the total record count, descending.
///
/// Country-level keys are excluded; shares below 0.01 are dropped and the
/// survivors rounded to 4 decimal digits. Stable sort, at most
/// [`TOP_LIMIT`] entries.
pub fn top_share_by_region(counts: &CountGroups<String>) -> Vec<(String, f64)> {
    let total = counts.total();
    if total == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<(String, f64)> = counts
        .iter()
        .filter(|(region, _)| !is_country_key(region))
        .filter_map(|(region, count)| {
            let share = count as f64 / total as f64;
            (share >= MIN_SHARE).then(|| (region.clone(), round4(share)))
        })
        .collect();

    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates.truncate(TOP_LIMIT);
    candidates
}

fn is_country_key(region: &str) -> bool {
    COUNTRY_KEYS.contains(&region)
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

// ── Tests ─────────────────────────────────────────────────────────────────────
