//! Chart rendering of the aggregated statistics.
//!
//! Produces a single image with four panels: the two yearly bar charts
//! (all records vs the target profession), the top-10 salary-by-region
//! horizontal bar chart, and the vacancy-share pie with a synthesized
//! "Other" slice.

use std::path::Path;

use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use tracing::info;
use vacstat_core::{Result, VacstatError};
use vacstat_data::analysis::VacancyStats;

/// Fixed output name for the chart artifact.
pub const CHART_FILE: &str = "graph.png";

const CHART_SIZE: (u32, u32) = (1280, 960);

/// Each of the two grouped series occupies this much of a year slot.
const BAR_HALF_WIDTH: f64 = 0.4;

const ALL_SERIES_COLOR: RGBColor = RGBColor(31, 119, 180);
const PROFESSION_SERIES_COLOR: RGBColor = RGBColor(255, 127, 14);

/// Slice colors for the share pie; the first entry colors "Other".
const PIE_COLORS: [RGBColor; 11] = [
    RGBColor(127, 127, 127),
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
    RGBColor(174, 199, 232),
];

/// Render the four-panel chart image for `stats` at `path`.
pub fn render_charts(stats: &VacancyStats, profession: &str, path: &Path) -> Result<()> {
    let years: Vec<i32> = stats.salary_by_year.keys().copied().collect();
    let salary_all: Vec<f64> = years.iter().map(|y| stats.salary_by_year[y] as f64).collect();
    let salary_prof: Vec<f64> = years
        .iter()
        .map(|y| stats.salary_by_year_for_profession[y] as f64)
        .collect();
    let count_all: Vec<f64> = years.iter().map(|y| stats.count_by_year[y] as f64).collect();
    let count_prof: Vec<f64> = years
        .iter()
        .map(|y| stats.count_by_year_for_profession[y] as f64)
        .collect();

    let salary_label = format!("salary {}", profession);
    let count_label = format!("vacancy count {}", profession);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let panels = root.split_evenly((2, 2));

    draw_year_panel(
        &panels[0],
        "Salary level by year",
        ("average salary", &salary_label),
        &years,
        &salary_all,
        &salary_prof,
    )?;
    draw_year_panel(
        &panels[1],
        "Vacancy count by year",
        ("vacancy count", &count_label),
        &years,
        &count_all,
        &count_prof,
    )?;
    draw_region_bars(&panels[2], "Salary level by region", &stats.salary_by_region)?;
    draw_share_pie(
        &panels[3],
        "Vacancy share by region",
        &stats.vacancy_share_by_region,
    )?;

    root.present().map_err(render_err)?;
    info!("Wrote chart image {}", path.display());
    Ok(())
}

// ── Panels ────────────────────────────────────────────────────────────────────

/// Grouped bar chart: one slot per year, the unfiltered series on the left
/// half, the profession series on the right half.
fn draw_year_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    series_labels: (&str, &str),
    years: &[i32],
    all_values: &[f64],
    profession_values: &[f64],
) -> Result<()> {
    let n = years.len();
    let y_max = all_values
        .iter()
        .chain(profession_values)
        .copied()
        .fold(1.0_f64, f64::max)
        * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5_f64..n as f64 - 0.5, 0.0_f64..y_max)
        .map_err(render_err)?;

    let year_labels: Vec<String> = years.iter().map(|y| y.to_string()).collect();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|x: &f64| {
            let slot = x.round();
            if slot < 0.0 {
                return String::new();
            }
            year_labels.get(slot as usize).cloned().unwrap_or_default()
        })
        .label_style(("sans-serif", 12))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(all_values.iter().enumerate().map(|(i, value)| {
            let x = i as f64;
            Rectangle::new(
                [(x - BAR_HALF_WIDTH, 0.0), (x, *value)],
                ALL_SERIES_COLOR.filled(),
            )
        }))
        .map_err(render_err)?
        .label(series_labels.0)
        .legend(|(x, y)| {
            Rectangle::new([(x, y - 4), (x + 10, y + 4)], ALL_SERIES_COLOR.filled())
        });

    chart
        .draw_series(profession_values.iter().enumerate().map(|(i, value)| {
            let x = i as f64;
            Rectangle::new(
                [(x, 0.0), (x + BAR_HALF_WIDTH, *value)],
                PROFESSION_SERIES_COLOR.filled(),
            )
        }))
        .map_err(render_err)?
        .label(series_labels.1)
        .legend(|(x, y)| {
            Rectangle::new(
                [(x, y - 4), (x + 10, y + 4)],
                PROFESSION_SERIES_COLOR.filled(),
            )
        });

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 12))
        .draw()
        .map_err(render_err)?;

    Ok(())
}

/// Horizontal bar chart of the top regions, first-ranked on top.
fn draw_region_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    regions: &[(String, i64)],
) -> Result<()> {
    if regions.is_empty() {
        area.titled(title, ("sans-serif", 18)).map_err(render_err)?;
        return Ok(());
    }

    // Reverse so the highest mean ends up at the top of the axis.
    let rows: Vec<(String, f64)> = regions
        .iter()
        .rev()
        .map(|(region, salary)| (wrap_region_label(region), *salary as f64))
        .collect();
    let n = rows.len();
    let x_max = rows.iter().map(|(_, v)| *v).fold(1.0_f64, f64::max) * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(110)
        .build_cartesian_2d(0.0_f64..x_max, 0.0_f64..n as f64)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n)
        .y_label_formatter(&|y: &f64| {
            if *y < 0.0 {
                return String::new();
            }
            rows.get(y.floor() as usize)
                .map(|(region, _)| region.clone())
                .unwrap_or_default()
        })
        .label_style(("sans-serif", 10))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(rows.iter().enumerate().map(|(i, (_, value))| {
            let y = i as f64;
            Rectangle::new([(0.0, y + 0.15), (*value, y + 0.85)], ALL_SERIES_COLOR.filled())
        }))
        .map_err(render_err)?;

    Ok(())
}

/// Pie chart of the top-10 shares plus the synthesized "Other" slice.
fn draw_share_pie<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    shares: &[(String, f64)],
) -> Result<()> {
    let area = area.titled(title, ("sans-serif", 18)).map_err(render_err)?;

    let mut sizes: Vec<f64> = vec![other_share(shares) * 100.0];
    let mut labels: Vec<String> = vec!["Other".to_string()];
    for (region, share) in shares {
        sizes.push(share * 100.0);
        labels.push(region.clone());
    }
    let colors: Vec<RGBColor> = (0..sizes.len())
        .map(|i| PIE_COLORS[i % PIE_COLORS.len()])
        .collect();

    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.35;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(("sans-serif", 12).into_font());
    area.draw(&pie).map_err(render_err)?;

    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Break long region names at a space or the first hyphen so the axis labels
/// stay inside the panel.
pub fn wrap_region_label(name: &str) -> String {
    if name.contains(' ') {
        name.replace(' ', "\n")
    } else if name.matches('-').count() == 1 {
        name.replace('-', "-\n")
    } else if name.contains('-') {
        name.replacen('-', "-\n", 1)
    } else {
        name.to_string()
    }
}

/// The share of records outside the top-10 regions: 1 minus the sum of the
/// ranked shares, clamped at zero and rounded to 4 decimal digits.
pub fn other_share(shares: &[(String, f64)]) -> f64 {
    let sum: f64 = shares.iter().map(|(_, share)| share).sum();
    ((1.0 - sum).max(0.0) * 10_000.0).round() / 10_000.0
}

fn render_err<E: std::fmt::Display>(e: E) -> VacstatError {
    VacstatError::Report(e.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
