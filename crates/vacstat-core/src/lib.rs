//! Domain types and pure logic for the vacancy statistics pipeline.
//!
//! Holds the typed [`models::Vacancy`] record and its validating factory,
//! the compiled-in [`currency::CurrencyTable`], the error taxonomy and the
//! CLI [`settings::Settings`].

pub mod currency;
pub mod error;
pub mod models;
pub mod settings;

pub use error::{Result, VacstatError};
