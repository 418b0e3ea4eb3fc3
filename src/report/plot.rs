//! Grouped line charts
//!
//! One PNG with a row per bucket count B. Each row has two panels, memory (MB)
//! vs p and query time (ms) vs p, with one curve per repetition count R. When
//! the table spans several element counts n, each `(R, n)` pair gets its own
//! curve and the legend names both.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::experiment::{Curve, Metric, ResultsTable};
use crate::{Error, Result};

const PANEL_WIDTH: u32 = 750;
const PANEL_HEIGHT: u32 = 500;

/// Render the grouped charts for `table` into the PNG at `path`.
///
/// # Errors
///
/// Returns `Error::Plot` if the bitmap cannot be drawn or written.
pub fn render_charts(table: &ResultsTable, path: &Path) -> Result<()> {
    let buckets = table.bucket_values();
    if buckets.is_empty() {
        return Err(Error::Plot("no reportable results to plot".to_string()));
    }

    #[allow(clippy::cast_possible_truncation)]
    let rows = buckets.len() as u32;
    let root = BitMapBackend::new(path, (PANEL_WIDTH * 2, PANEL_HEIGHT * rows)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let label_n = table.element_values().len() > 1;
    let panels = root.split_evenly((buckets.len(), 2));
    for (row, &b) in buckets.iter().enumerate() {
        draw_panel(
            &panels[row * 2],
            &format!("Memory Usage vs p (B={b})"),
            "Memory (MB)",
            &table.curves(b, Metric::MemoryMb),
            label_n,
        )?;
        draw_panel(
            &panels[row * 2 + 1],
            &format!("Query Time vs p (B={b})"),
            "Query Time (ms)",
            &table.curves(b, Metric::QueryTimeMs),
            label_n,
        )?;
    }

    root.present().map_err(plot_err)?;
    tracing::debug!(path = %path.display(), rows, "charts rendered");
    Ok(())
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    title: &str,
    y_desc: &str,
    curves: &[Curve],
    label_n: bool,
) -> Result<()> {
    let (x_min, x_max) = bounds(curves.iter().flat_map(|c| c.points.iter().map(|&(x, _)| x)));
    let (_, y_max) = bounds(curves.iter().flat_map(|c| c.points.iter().map(|&(_, y)| y)));

    // A single p value still needs a non-empty axis
    let x_range = if x_min < x_max {
        x_min..x_max
    } else {
        (x_min - 0.05).max(0.0)..(x_max + 0.05)
    };
    let y_top = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 20))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, 0.0..y_top)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("False Positive Rate (p)")
        .y_desc(y_desc)
        .draw()
        .map_err(plot_err)?;

    let colors = [&RED, &BLUE, &GREEN, &MAGENTA, &CYAN, &BLACK];
    for (idx, curve) in curves.iter().enumerate() {
        let color = colors[idx % colors.len()];

        chart
            .draw_series(LineSeries::new(curve.points.iter().copied(), color.stroke_width(2)))
            .map_err(plot_err)?
            .label(curve_label(curve, label_n))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

        chart
            .draw_series(
                curve
                    .points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
            )
            .map_err(plot_err)?;
    }

    if !curves.is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .draw()
            .map_err(plot_err)?;
    }

    Ok(())
}

fn curve_label(curve: &Curve, label_n: bool) -> String {
    if label_n {
        format!("R={}, n={}", curve.r, curve.n)
    } else {
        format!("R={}", curve.r)
    }
}

/// Min and max of `values`, `(0, 1)` when empty.
fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .unwrap_or((0.0, 1.0))
}

fn plot_err(e: impl std::fmt::Display) -> Error {
    Error::Plot(e.to_string())
}
