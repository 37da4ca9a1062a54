//! Plain-text rendering of a [`ViewModel`] for the command line.

use crate::view::{Dashboard, HistogramChart, LineChart, ViewModel};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::fmt::Write;

const CHART_WIDTH: usize = 64;
const CHART_HEIGHT: usize = 14;
const HISTOGRAM_BAR_WIDTH: usize = 40;

pub fn render_text(view: &ViewModel) -> String {
    match view {
        ViewModel::Prompt { message, examples } => {
            let mut out = format!("{}\n\nValid examples:\n", message);
            for example in examples {
                let _ = writeln!(out, "  - {:<5} {}", example.symbol, example.description);
            }
            out
        }
        ViewModel::Unresolved { message, .. } => format!("{}\n", message),
        ViewModel::Ready(dashboard) => render_dashboard(dashboard),
    }
}

fn render_dashboard(d: &Dashboard) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}\n{}\n", d.title, "=".repeat(d.title.chars().count()));
    let _ = writeln!(out, "Company:  {}", d.metadata.name);
    let _ = writeln!(out, "Sector:   {}", d.metadata.sector);
    let _ = writeln!(out, "Industry: {}", d.metadata.industry);
    let _ = writeln!(out, "\n{}\n", d.metadata.description);

    out.push_str(&line_chart(&d.price_chart));

    let _ = writeln!(out, "\nAnnualized returns (CAGR)\n{}\n", d.cagr_formula);
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Period", "CAGR"]);
    for row in &d.cagr_rows {
        table.add_row(vec![row.period.as_str(), row.formatted.as_str()]);
    }
    let _ = writeln!(out, "{}", table);

    let _ = writeln!(
        out,
        "\nAnnualized volatility: {}\nFormula: {}\n",
        d.volatility.formatted, d.volatility.formula
    );

    out.push_str(&histogram_chart(&d.returns_histogram));

    out.push('\n');
    for explanation in &d.explanations {
        let _ = writeln!(out, "{}: {}", explanation.title, explanation.body);
    }
    out
}

/// Draws closes on a fixed grid, one column per slice of the series.
fn line_chart(chart: &LineChart) -> String {
    let mut out = format!("{}\n", chart.title);
    if chart.points.is_empty() {
        out.push_str("  (no data)\n");
        return out;
    }

    let closes: Vec<f64> = chart.points.iter().map(|p| p.close).collect();
    let width = CHART_WIDTH.min(closes.len());
    let min = closes.iter().copied().fold(f64::INFINITY, f64::min);
    let max = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = if max > min { max - min } else { 1.0 };

    let mut grid = vec![vec![' '; width]; CHART_HEIGHT];
    for col in 0..width {
        let index = col * (closes.len() - 1) / (width - 1).max(1);
        let level = ((closes[index] - min) / span * (CHART_HEIGHT - 1) as f64).round() as usize;
        grid[CHART_HEIGHT - 1 - level.min(CHART_HEIGHT - 1)][col] = '*';
    }

    for (i, row) in grid.iter().enumerate() {
        let label = match i {
            0 => format!("{:>10.2}", max),
            r if r == CHART_HEIGHT - 1 => format!("{:>10.2}", min),
            _ => " ".repeat(10),
        };
        let _ = writeln!(out, "{} |{}", label, row.iter().collect::<String>());
    }

    let (first, last) = (&chart.points[0], &chart.points[chart.points.len() - 1]);
    let _ = writeln!(
        out,
        "{} +{}\n{}  {} .. {}  ({})",
        " ".repeat(10),
        "-".repeat(width),
        " ".repeat(10),
        first.date,
        last.date,
        chart.y_label
    );
    out
}

/// One horizontal bar per bucket; the bucket holding the zero marker is flagged.
fn histogram_chart(chart: &HistogramChart) -> String {
    let mut out = format!("{}\n", chart.title);
    if chart.buckets.is_empty() {
        out.push_str("  (not available)\n");
        return out;
    }

    let max_count = chart.buckets.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    let marker = chart
        .zero_marker
        .and_then(|z| chart.buckets.iter().position(|b| b.contains(z)));

    for (i, bucket) in chart.buckets.iter().enumerate() {
        let bar = "#".repeat(bucket.count * HISTOGRAM_BAR_WIDTH / max_count);
        let flag = if Some(i) == marker { " <- 0" } else { "" };
        let _ = writeln!(
            out,
            "{:>+8.2}% .. {:>+8.2}% |{:<width$} {}{}",
            bucket.start * 100.0,
            bucket.end * 100.0,
            bar,
            bucket.count,
            flag,
            width = HISTOGRAM_BAR_WIDTH
        );
    }
    out
}
