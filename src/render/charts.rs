//! Chart generation for the Analysis and Performance views.
//!
//! Each function renders one PNG into the configured chart directory and
//! returns its path; the views embed the path into the rendered page. Axis
//! ranges are padded so degenerate data still produces a drawable chart.

use crate::artifact::PerformanceRow;
use plotters::prelude::*;
use std::error::Error;
use std::path::{Path, PathBuf};

/// Chart canvas size in pixels.
const CHART_SIZE: (u32, u32) = (800, 600);

/// Relative padding applied to both axis ranges.
const AXIS_PADDING: f64 = 0.05;

const TEAL: RGBColor = RGBColor(0, 128, 128);

/// Series colors cycled by the stacked and grouped bar charts.
const SERIES_COLORS: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

/// Target file for a chart, creating the directory on first use.
fn chart_path(dir: &Path, stem: &str) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let safe: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    Ok(dir.join(format!("{}.png", safe)))
}

/// Padded (lo, hi) range over a value iterator.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    let pad = if hi > lo { (hi - lo) * AXIS_PADDING } else { 1.0 };
    (lo - pad, hi + pad)
}

/// Scatter comparison of two numeric columns.
pub fn scatter(
    dir: &Path,
    x_name: &str,
    y_name: &str,
    points: &[(f64, f64)],
) -> Result<PathBuf, Box<dyn Error>> {
    if points.is_empty() {
        return Err("no complete rows to plot".into());
    }
    let path = chart_path(dir, &format!("scatter_{}_{}", x_name, y_name))?;

    let render_path = path.clone();
    let root = BitMapBackend::new(&render_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_lo, x_hi) = padded_range(points.iter().map(|p| p.0));
    let (y_lo, y_hi) = padded_range(points.iter().map(|p| p.1));

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{} vs {}", x_name, y_name),
            ("sans-serif", 24).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc(x_name)
        .y_desc(y_name)
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 4, TEAL.filled())),
    )?;

    root.present()?;
    Ok(path)
}

/// Stacked count bars for two categorical columns: one bar per level of
/// `x`, one colored segment per level of `y`.
pub fn stacked_bars(
    dir: &Path,
    x_name: &str,
    y_name: &str,
    x_labels: &[String],
    y_labels: &[String],
    counts: &[Vec<f64>],
) -> Result<PathBuf, Box<dyn Error>> {
    if x_labels.is_empty() || y_labels.is_empty() {
        return Err("no categories to plot".into());
    }
    let path = chart_path(dir, &format!("stacked_{}_{}", x_name, y_name))?;

    let render_path = path.clone();
    let root = BitMapBackend::new(&render_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let y_hi = counts
        .iter()
        .map(|row| row.iter().sum::<f64>())
        .fold(1.0_f64, f64::max)
        * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{} by {}", x_name, y_name),
            ("sans-serif", 24).into_font(),
        )
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_labels.len() as f64, 0.0..y_hi)?;

    chart
        .configure_mesh()
        .x_desc(x_name)
        .y_desc("count")
        .x_labels(x_labels.len())
        .x_label_formatter(&|v| {
            let i = v.floor() as usize;
            x_labels.get(i).cloned().unwrap_or_default()
        })
        .draw()?;

    for (j, y_label) in y_labels.iter().enumerate() {
        let color = SERIES_COLORS[j % SERIES_COLORS.len()];
        chart
            .draw_series((0..x_labels.len()).map(|i| {
                let base: f64 = counts[i][..j].iter().sum();
                let top = base + counts[i][j];
                Rectangle::new(
                    [(i as f64 + 0.1, base), (i as f64 + 0.9, top)],
                    color.filled(),
                )
            }))?
            .label(y_label.clone())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 4), (x + 8, y + 4)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(path)
}

/// Distribution-by-group box plot: one box per categorical level over the
/// numeric column's values.
pub fn box_plot(
    dir: &Path,
    group_name: &str,
    value_name: &str,
    groups: &[(String, Vec<f64>)],
) -> Result<PathBuf, Box<dyn Error>> {
    let groups: Vec<&(String, Vec<f64>)> =
        groups.iter().filter(|(_, v)| !v.is_empty()).collect();
    if groups.is_empty() {
        return Err("no complete rows to plot".into());
    }
    let path = chart_path(dir, &format!("box_{}_{}", group_name, value_name))?;

    let render_path = path.clone();
    let root = BitMapBackend::new(&render_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (y_lo, y_hi) = padded_range(groups.iter().flat_map(|(_, v)| v.iter().copied()));

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{} by {}", value_name, group_name),
            ("sans-serif", 24).into_font(),
        )
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..groups.len() as f64, y_lo..y_hi)?;

    let labels: Vec<String> = groups.iter().map(|(name, _)| name.clone()).collect();
    chart
        .configure_mesh()
        .x_desc(group_name)
        .y_desc(value_name)
        .x_labels(labels.len())
        .x_label_formatter(&|v| {
            let i = v.floor() as usize;
            labels.get(i).cloned().unwrap_or_default()
        })
        .draw()?;

    for (i, (_, values)) in groups.iter().enumerate() {
        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let q = |p: f64| {
            let pos = p * (sorted.len() - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
        };
        let (lo, q25, med, q75, hi) = (sorted[0], q(0.25), q(0.5), q(0.75), sorted[sorted.len() - 1]);
        let x = i as f64;

        // IQR box with median line, whiskers out to the observed extremes.
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x + 0.25, q25), (x + 0.75, q75)],
            TEAL.mix(0.4).filled(),
        )))?;
        chart.draw_series(
            [
                vec![(x + 0.25, med), (x + 0.75, med)],
                vec![(x + 0.5, q75), (x + 0.5, hi)],
                vec![(x + 0.5, lo), (x + 0.5, q25)],
                vec![(x + 0.4, hi), (x + 0.6, hi)],
                vec![(x + 0.4, lo), (x + 0.6, lo)],
            ]
            .into_iter()
            .map(|coords| PathElement::new(coords, BLACK)),
        )?;
    }

    root.present()?;
    Ok(path)
}

/// Correlation heatmap over the numeric columns.
pub fn correlation_heatmap(
    dir: &Path,
    names: &[String],
    matrix: &[Vec<f64>],
) -> Result<PathBuf, Box<dyn Error>> {
    if names.len() < 2 {
        return Err("need at least two numeric columns".into());
    }
    let path = chart_path(dir, "correlation_heatmap")?;

    let render_path = path.clone();
    let root = BitMapBackend::new(&render_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let n = names.len() as f64;
    let mut chart = ChartBuilder::on(&root)
        .caption("Correlation matrix", ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..n, 0.0..n)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(names.len())
        .y_labels(names.len())
        .x_label_formatter(&|v| {
            let i = v.floor() as usize;
            names.get(i).cloned().unwrap_or_default()
        })
        .y_label_formatter(&|v| {
            let i = v.floor() as usize;
            names.get(i).cloned().unwrap_or_default()
        })
        .draw()?;

    for (i, row) in matrix.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            let color = correlation_color(value);
            let (x, y) = (j as f64, i as f64);
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x, y), (x + 1.0, y + 1.0)],
                color.filled(),
            )))?;
            let label = if value.is_nan() {
                "-".to_string()
            } else {
                format!("{:.2}", value)
            };
            chart.draw_series(std::iter::once(Text::new(
                label,
                (x + 0.35, y + 0.5),
                ("sans-serif", 14).into_font().color(&BLACK),
            )))?;
        }
    }

    root.present()?;
    Ok(path)
}

/// Map a correlation in [-1, 1] onto a blue-white-red ramp.
fn correlation_color(value: f64) -> RGBColor {
    if value.is_nan() {
        return RGBColor(220, 220, 220);
    }
    let v = value.clamp(-1.0, 1.0);
    if v >= 0.0 {
        // white -> red
        let t = v;
        RGBColor(255, (255.0 * (1.0 - t)) as u8, (255.0 * (1.0 - t)) as u8)
    } else {
        // white -> blue
        let t = -v;
        RGBColor((255.0 * (1.0 - t)) as u8, (255.0 * (1.0 - t)) as u8, 255)
    }
}

/// Train-vs-test grouped bars for one model variant's metric table.
pub fn grouped_bars(
    dir: &Path,
    variant: &str,
    rows: &[PerformanceRow],
) -> Result<PathBuf, Box<dyn Error>> {
    if rows.is_empty() {
        return Err("no metrics to plot".into());
    }
    let path = chart_path(dir, &format!("performance_{}", variant))?;

    let render_path = path.clone();
    let root = BitMapBackend::new(&render_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let y_lo = rows
        .iter()
        .flat_map(|r| [r.train, r.test])
        .fold(0.0_f64, f64::min)
        * 1.1;
    let y_hi = rows
        .iter()
        .flat_map(|r| [r.train, r.test])
        .fold(f64::EPSILON, f64::max)
        * 1.2;

    let labels: Vec<String> = rows.iter().map(|r| r.metric.clone()).collect();
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Performance: {}", variant),
            ("sans-serif", 24).into_font(),
        )
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..rows.len() as f64, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("metric")
        .y_desc("score")
        .x_labels(labels.len())
        .x_label_formatter(&|v| {
            let i = v.floor() as usize;
            labels.get(i).cloned().unwrap_or_default()
        })
        .draw()?;

    let train_color = SERIES_COLORS[0];
    let test_color = SERIES_COLORS[1];

    chart
        .draw_series(rows.iter().enumerate().map(|(i, r)| {
            Rectangle::new(
                [(i as f64 + 0.1, 0.0), (i as f64 + 0.45, r.train)],
                train_color.filled(),
            )
        }))?
        .label("train")
        .legend(move |(x, y)| Rectangle::new([(x, y - 4), (x + 8, y + 4)], train_color.filled()));

    chart
        .draw_series(rows.iter().enumerate().map(|(i, r)| {
            Rectangle::new(
                [(i as f64 + 0.55, 0.0), (i as f64 + 0.9, r.test)],
                test_color.filled(),
            )
        }))?
        .label("test")
        .legend(move |(x, y)| Rectangle::new([(x, y - 4), (x + 8, y + 4)], test_color.filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(path)
}
