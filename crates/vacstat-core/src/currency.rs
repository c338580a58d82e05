use std::collections::HashMap;

use crate::error::{Result, VacstatError};
use crate::models::Vacancy;

/// Read-only table mapping a currency code to its rate against the base
/// currency (RUB): one unit of the code expressed in base-currency units.
///
/// The default table is compiled in; pass a custom map to override or extend
/// it. The table is handed to the aggregation pass explicitly rather than
/// consulted as ambient state.
#[derive(Debug, Clone)]
pub struct CurrencyTable {
    rates: HashMap<String, f64>,
}

/// Build the default code → rate-to-RUB map.
fn default_rate_map() -> HashMap<String, f64> {
    let mut map = HashMap::new();
    map.insert("AZN".to_string(), 35.68);
    map.insert("BYR".to_string(), 23.91);
    map.insert("EUR".to_string(), 59.90);
    map.insert("GEL".to_string(), 21.74);
    map.insert("KGS".to_string(), 0.76);
    map.insert("KZT".to_string(), 0.13);
    map.insert("RUR".to_string(), 1.0);
    map.insert("UAH".to_string(), 1.64);
    map.insert("USD".to_string(), 60.66);
    map.insert("UZS".to_string(), 0.0055);
    map
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self {
            rates: default_rate_map(),
        }
    }
}

impl CurrencyTable {
    /// Create a table from an explicit rate map.
    pub fn new(rates: HashMap<String, f64>) -> Self {
        Self { rates }
    }

    /// Resolve the rate for `code`.
    ///
    /// An unrecognized code is [`VacstatError::UnknownCurrency`], which is
    /// fatal for the whole run: there is no fallback rate, and skipping the
    /// record would silently bias every aggregate.
    pub fn rate(&self, code: &str) -> Result<f64> {
        self.rates
            .get(code)
            .copied()
            .ok_or_else(|| VacstatError::UnknownCurrency(code.to_string()))
    }

    /// Midpoint salary of a vacancy, converted to the base currency:
    /// `(salary_from + salary_to) / 2 * rate`.
    pub fn midpoint_salary(&self, vacancy: &Vacancy) -> Result<f64> {
        let rate = self.rate(&vacancy.salary_currency)?;
        Ok((vacancy.salary_from + vacancy.salary_to) / 2.0 * rate)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
