mod bootstrap;

use std::path::Path;

use anyhow::Result;
use vacstat_core::currency::CurrencyTable;
use vacstat_core::settings::Settings;
use vacstat_data::analysis::{analyze_vacancies, VacancyStats};
use vacstat_report::{render_charts, write_workbook, CHART_FILE, WORKBOOK_FILE};

fn main() -> Result<()> {
    let settings = Settings::load();
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("vacstat v{} starting", env!("CARGO_PKG_VERSION"));
    settings.validate()?;

    tracing::info!(
        "Input: {}, profession: {}",
        settings.file,
        settings.profession
    );

    let table = CurrencyTable::default();
    let result = analyze_vacancies(Path::new(&settings.file), &settings.profession, &table)?;

    tracing::info!(
        "Analyzed {} records ({} rows read) in {:.3}s",
        result.metadata.records_normalized,
        result.metadata.rows_read,
        result.metadata.load_time_seconds + result.metadata.aggregate_time_seconds
    );

    print_summary(&result.stats);

    write_workbook(&result.stats, &settings.profession, Path::new(WORKBOOK_FILE))?;
    render_charts(&result.stats, &settings.profession, Path::new(CHART_FILE))?;

    Ok(())
}

/// Print the six aggregates to stdout, one labelled line each.
fn print_summary(stats: &VacancyStats) {
    println!("Salary dynamics by year: {:?}", stats.salary_by_year);
    println!("Vacancy count dynamics by year: {:?}", stats.count_by_year);
    println!(
        "Salary dynamics by year for the profession: {:?}",
        stats.salary_by_year_for_profession
    );
    println!(
        "Vacancy count dynamics by year for the profession: {:?}",
        stats.count_by_year_for_profession
    );
    println!("Salary level by region (descending): {:?}", stats.salary_by_region);
    println!(
        "Vacancy share by region (descending): {:?}",
        stats.vacancy_share_by_region
    );
}
