//! Report rendering layer for the vacancy statistics tool.
//!
//! Consumes the final [`vacstat_data::analysis::VacancyStats`] and persists
//! the two artifacts: the xlsx workbook and the four-panel chart image.

pub mod charts;
pub mod workbook;

pub use charts::{render_charts, CHART_FILE};
pub use workbook::{write_workbook, WORKBOOK_FILE};
