//! Top-level analysis pipeline for vacancy statistics.
//!
//! Orchestrates loading, single-pass aggregation, reconciliation and region
//! ranking, returning a [`VacancyStats`] ready for the report layer.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};
use vacstat_core::currency::CurrencyTable;
use vacstat_core::Result;

use crate::aggregator::StatsCollector;
use crate::ranking::{top_salary_by_region, top_share_by_region};
use crate::reader::load_vacancies;

// ── Public types ──────────────────────────────────────────────────────────────

/// The six aggregates consumed by the report renderer.
///
/// The four year maps expose identical key sets (reconciliation has already
/// run); the region lists are top-10, descending.
#[derive(Debug, Clone, PartialEq)]
pub struct VacancyStats {
    /// Average midpoint salary per year, all records.
    pub salary_by_year: BTreeMap<i32, i64>,
    /// Record count per year, all records.
    pub count_by_year: BTreeMap<i32, u64>,
    /// Average midpoint salary per year for the target profession.
    pub salary_by_year_for_profession: BTreeMap<i32, i64>,
    /// Record count per year for the target profession.
    pub count_by_year_for_profession: BTreeMap<i32, u64>,
    /// Top-10 regions by average salary, descending.
    pub salary_by_region: Vec<(String, i64)>,
    /// Top-10 regions by share of total records, descending.
    pub vacancy_share_by_region: Vec<(String, f64)>,
}

/// Metadata produced alongside the stats.
#[derive(Debug, Clone)]
pub struct AnalysisMetadata {
    /// Data rows present in the input file.
    pub rows_read: usize,
    /// Rows that survived the structural filter.
    pub rows_kept: usize,
    /// Records that normalized cleanly and entered aggregation.
    pub records_normalized: usize,
    /// Wall-clock seconds spent loading the input file.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent aggregating and ranking.
    pub aggregate_time_seconds: f64,
}

/// The complete output of [`analyze_vacancies`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub stats: VacancyStats,
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full analysis pipeline.
///
/// 1. Load and normalize records from `path`.
/// 2. Aggregate all six groupings in one pass and reconcile.
/// 3. Rank regions by average salary and by vacancy share.
/// 4. Return [`VacancyStats`] plus metadata.
///
/// Every failure is fatal for the run; there is no partial-result mode.
pub fn analyze_vacancies(
    path: &Path,
    profession: &str,
    table: &CurrencyTable,
) -> Result<AnalysisResult> {
    // ── Step 1: Load records ──────────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let loaded = load_vacancies(path)?;
    let load_time = load_start.elapsed().as_secs_f64();

    info!(
        "Loaded {} records from {} ({} rows read)",
        loaded.records.len(),
        path.display(),
        loaded.rows_read
    );

    // ── Step 2: Aggregate ─────────────────────────────────────────────────────
    let aggregate_start = std::time::Instant::now();
    let collector = StatsCollector::collect(&loaded.records, profession, table)?;

    // ── Step 3: Rank regions ──────────────────────────────────────────────────
    let salary_by_region = top_salary_by_region(&collector.salary_by_region);
    let vacancy_share_by_region = top_share_by_region(&collector.count_by_region);
    let aggregate_time = aggregate_start.elapsed().as_secs_f64();

    debug!(
        "Aggregated {} years, {} regions ({} ranked by salary, {} by share)",
        collector.salary_by_year.len(),
        collector.salary_by_region.len(),
        salary_by_region.len(),
        vacancy_share_by_region.len()
    );

    // ── Step 4: Build result ──────────────────────────────────────────────────
    let stats = VacancyStats {
        salary_by_year: collector.salary_by_year.mean_by_key().into_iter().collect(),
        count_by_year: collector.count_by_year.iter().map(|(k, c)| (*k, c)).collect(),
        salary_by_year_for_profession: collector
            .salary_by_year_for_profession
            .mean_by_key()
            .into_iter()
            .collect(),
        count_by_year_for_profession: collector
            .count_by_year_for_profession
            .iter()
            .map(|(k, c)| (*k, c))
            .collect(),
        salary_by_region,
        vacancy_share_by_region,
    };

    let metadata = AnalysisMetadata {
        rows_read: loaded.rows_read,
        rows_kept: loaded.rows_kept,
        records_normalized: loaded.records.len(),
        load_time_seconds: load_time,
        aggregate_time_seconds: aggregate_time,
    };

    Ok(AnalysisResult { stats, metadata })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
