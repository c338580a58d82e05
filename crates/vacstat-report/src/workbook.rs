//! Spreadsheet rendering of the aggregated statistics.
//!
//! Produces a two-sheet workbook: yearly dynamics on the first sheet, the
//! region rankings side by side on the second.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::info;
use vacstat_core::{Result, VacstatError};
use vacstat_data::analysis::VacancyStats;

/// Fixed output name for the spreadsheet artifact.
pub const WORKBOOK_FILE: &str = "report.xlsx";

/// Width of the spacer column between the two region tables.
const SPACER_WIDTH: f64 = 2.0;

/// Write `stats` to an xlsx workbook at `path`.
///
/// Sheet "Statistics by year" lists the four reconciled year maps; sheet
/// "Statistics by region" lists the two top-10 rankings side by side, with
/// the share column formatted as a percentage.
pub fn write_workbook(stats: &VacancyStats, profession: &str, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    write_year_sheet(workbook.add_worksheet(), stats, profession)?;
    write_region_sheet(workbook.add_worksheet(), stats)?;

    workbook.save(path).map_err(render_err)?;
    info!("Wrote workbook {}", path.display());
    Ok(())
}

// ── Sheets ────────────────────────────────────────────────────────────────────

fn write_year_sheet(
    sheet: &mut Worksheet,
    stats: &VacancyStats,
    profession: &str,
) -> Result<()> {
    sheet.set_name("Statistics by year").map_err(render_err)?;

    let bold = Format::new().set_bold();
    let headers = [
        "Year".to_string(),
        "Average salary".to_string(),
        format!("Average salary - {}", profession),
        "Vacancy count".to_string(),
        format!("Vacancy count - {}", profession),
    ];

    let mut widths: Vec<usize> = headers.iter().map(String::len).collect();
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_with_format(0, col as u16, header.as_str(), &bold)
            .map_err(render_err)?;
    }

    // The four maps expose identical key sets after reconciliation, so
    // indexing the profession maps by the unfiltered keys cannot miss.
    for (row, (year, salary)) in stats.salary_by_year.iter().enumerate() {
        let row = (row + 1) as u32;
        let cells = [
            *year as f64,
            *salary as f64,
            stats.salary_by_year_for_profession[year] as f64,
            stats.count_by_year[year] as f64,
            stats.count_by_year_for_profession[year] as f64,
        ];
        for (col, value) in cells.iter().enumerate() {
            sheet
                .write_number(row, col as u16, *value)
                .map_err(render_err)?;
            widths[col] = widths[col].max(format!("{}", value).len());
        }
    }

    fit_columns(sheet, &widths)
}

fn write_region_sheet(sheet: &mut Worksheet, stats: &VacancyStats) -> Result<()> {
    sheet.set_name("Statistics by region").map_err(render_err)?;

    let bold = Format::new().set_bold();
    let percent = Format::new().set_num_format("0.00%");
    let headers = ["Region", "Salary level", "", "Region", "Vacancy share"];

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_with_format(0, col as u16, *header, &bold)
            .map_err(render_err)?;
    }

    for (row, (region, salary)) in stats.salary_by_region.iter().enumerate() {
        let row = (row + 1) as u32;
        sheet.write_string(row, 0, region.as_str()).map_err(render_err)?;
        sheet
            .write_number(row, 1, *salary as f64)
            .map_err(render_err)?;
        widths[0] = widths[0].max(region.len());
        widths[1] = widths[1].max(salary.to_string().len());
    }

    for (row, (region, share)) in stats.vacancy_share_by_region.iter().enumerate() {
        let row = (row + 1) as u32;
        sheet.write_string(row, 3, region.as_str()).map_err(render_err)?;
        sheet
            .write_number_with_format(row, 4, *share, &percent)
            .map_err(render_err)?;
        widths[3] = widths[3].max(region.len());
        widths[4] = widths[4].max(format!("{:.2}%", share * 100.0).len());
    }

    fit_columns(sheet, &widths)?;
    sheet.set_column_width(2, SPACER_WIDTH).map_err(render_err)?;
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Size every column to its longest cell, plus a little padding.
fn fit_columns(sheet: &mut Worksheet, widths: &[usize]) -> Result<()> {
    for (col, width) in widths.iter().enumerate() {
        sheet
            .set_column_width(col as u16, (*width + 2) as f64)
            .map_err(render_err)?;
    }
    Ok(())
}

fn render_err(e: rust_xlsxwriter::XlsxError) -> VacstatError {
    VacstatError::Report(e.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
