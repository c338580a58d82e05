//! Grouped aggregation over normalized vacancy records.
//!
//! All six groupings (salary/count, by year, by year for the target
//! profession, by region) are filled in a single pass over the records and
//! reconciled before anything downstream reads them.

use std::collections::HashMap;
use std::hash::Hash;

use vacstat_core::currency::CurrencyTable;
use vacstat_core::models::Vacancy;
use vacstat_core::Result;

// ── SalaryGroups ──────────────────────────────────────────────────────────────

/// Value-keyed accumulator: group key → observed midpoint salaries.
///
/// Keys keep first-seen order so iteration is deterministic and downstream
/// stable sorts tie-break by appearance order.
#[derive(Debug, Clone)]
pub struct SalaryGroups<K> {
    keys: Vec<K>,
    values: HashMap<K, Vec<f64>>,
}

impl<K: Eq + Hash + Clone> SalaryGroups<K> {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: HashMap::new(),
        }
    }

    /// Append `value` to the list for `key`, creating the list if absent.
    pub fn add(&mut self, key: K, value: f64) {
        self.values
            .entry(key.clone())
            .or_insert_with(|| {
                self.keys.push(key);
                Vec::new()
            })
            .push(value);
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of observations recorded for `key`.
    pub fn value_count(&self, key: &K) -> usize {
        self.values.get(key).map_or(0, Vec::len)
    }

    /// Rounded-to-integer arithmetic mean per key, in first-seen key order.
    ///
    /// Keys with no observations cannot occur: a key exists only once a value
    /// was added for it.
    pub fn mean_by_key(&self) -> Vec<(K, i64)> {
        self.keys
            .iter()
            .map(|key| {
                let values = &self.values[key];
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                (key.clone(), mean.round() as i64)
            })
            .collect()
    }
}

impl<K: Eq + Hash + Clone> Default for SalaryGroups<K> {
    fn default() -> Self {
        Self::new()
    }
}

// ── CountGroups ───────────────────────────────────────────────────────────────

/// Count-keyed accumulator: group key → running count, plus a grand total
/// across all keys for proportion computations.
#[derive(Debug, Clone)]
pub struct CountGroups<K> {
    keys: Vec<K>,
    counts: HashMap<K, u64>,
    total: u64,
}

impl<K: Eq + Hash + Clone> CountGroups<K> {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            counts: HashMap::new(),
            total: 0,
        }
    }

    /// Increment the count for `key` and the grand total.
    pub fn add(&mut self, key: K) {
        *self
            .counts
            .entry(key.clone())
            .or_insert_with(|| {
                self.keys.push(key);
                0
            }) += 1;
        self.total += 1;
    }

    /// Register `key` with a zero count without touching the grand total.
    /// Used by reconciliation backfill.
    pub fn ensure_key(&mut self, key: K) {
        self.counts.entry(key.clone()).or_insert_with(|| {
            self.keys.push(key);
            0
        });
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.counts.contains_key(key)
    }

    /// Count recorded for `key`; zero when the key was never seen.
    pub fn get(&self, key: &K) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Grand total across all keys.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// `(key, count)` pairs in first-seen key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.keys.iter().map(|key| (key, self.counts[key]))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<K: Eq + Hash + Clone> Default for CountGroups<K> {
    fn default() -> Self {
        Self::new()
    }
}

// ── StatsCollector ────────────────────────────────────────────────────────────

/// The six groupings produced by one aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct StatsCollector {
    /// Midpoint salaries grouped by publish year, all records.
    pub salary_by_year: SalaryGroups<i32>,
    /// Record counts grouped by publish year, all records.
    pub count_by_year: CountGroups<i32>,
    /// Midpoint salaries by year, records matching the target profession.
    pub salary_by_year_for_profession: SalaryGroups<i32>,
    /// Record counts by year, records matching the target profession.
    pub count_by_year_for_profession: CountGroups<i32>,
    /// Midpoint salaries grouped by region.
    pub salary_by_region: SalaryGroups<String>,
    /// Record counts grouped by region.
    pub count_by_region: CountGroups<String>,
}

impl StatsCollector {
    /// Aggregate `records` in a single pass, then reconcile the
    /// profession-filtered groupings against the unfiltered ones.
    ///
    /// The profession filter is a case-sensitive substring test against the
    /// posting title. An unknown currency aborts the run
    /// ([`vacstat_core::VacstatError::UnknownCurrency`]).
    pub fn collect(
        records: &[Vacancy],
        profession: &str,
        table: &CurrencyTable,
    ) -> Result<Self> {
        let mut collector = Self::default();

        for vacancy in records {
            let salary = table.midpoint_salary(vacancy)?;
            let year = vacancy.published_year;

            collector.salary_by_year.add(year, salary);
            collector.count_by_year.add(year);
            collector.salary_by_region.add(vacancy.area_name.clone(), salary);
            collector.count_by_region.add(vacancy.area_name.clone());

            if vacancy.name.contains(profession) {
                collector.salary_by_year_for_profession.add(year, salary);
                collector.count_by_year_for_profession.add(year);
            }
        }

        collector.reconcile();
        Ok(collector)
    }

    /// Backfill profession-filtered groupings so they expose the same key set
    /// as the unfiltered ones: a missing year gets a singleton `[0.0]` value
    /// list and a zero count.
    ///
    /// One unconditional union over the year keys; runs after the aggregation
    /// pass and before anything renders.
    fn reconcile(&mut self) {
        let years: Vec<i32> = self.salary_by_year.keys().copied().collect();
        for year in years {
            if !self.salary_by_year_for_profession.contains_key(&year) {
                self.salary_by_year_for_profession.add(year, 0.0);
            }
            self.count_by_year_for_profession.ensure_key(year);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
