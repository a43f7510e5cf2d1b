//! Plain-text table and bar chart for terminal output.

use client_core::{view::SeverityAggregate, DashboardView, PresentationBucket, RowView};

const HEADERS: [&str; 10] = [
    "ID",
    "Account",
    "Description",
    "Amount",
    "Distance",
    "Rule Flag",
    "Explanation",
    "Anomaly Flag",
    "Anomaly Score",
    "Severity",
];
const CHART_WIDTH: usize = 40;

fn bucket_marker(bucket: PresentationBucket) -> &'static str {
    match bucket {
        PresentationBucket::Alert => "!!",
        PresentationBucket::Caution => "! ",
        PresentationBucket::Notice => "? ",
        PresentationBucket::Clear => "  ",
    }
}

fn cells(row: &RowView) -> [&str; 10] {
    [
        &row.id,
        &row.account_number,
        &row.description,
        &row.amount,
        &row.distance,
        &row.rule_flag,
        &row.explanation,
        &row.anomaly_flag,
        &row.anomaly_score,
        &row.severity,
    ]
}

fn format_line(marker: &str, columns: &[&str; 10], widths: &[usize; 10]) -> String {
    let padded: Vec<String> = columns
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    format!("{marker} {}", padded.join(" | ").trim_end())
}

pub fn render_table(view: &DashboardView) -> String {
    if view.is_empty() {
        return "No transactions matched.".to_string();
    }

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &view.rows {
        for (width, cell) in widths.iter_mut().zip(cells(row)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(view.rows.len() + 2);
    lines.push(format_line("  ", &HEADERS, &widths));
    let rule_len = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);
    lines.push(format!("   {}", "-".repeat(rule_len)));
    for row in &view.rows {
        lines.push(format_line(bucket_marker(row.bucket), &cells(row), &widths));
    }
    lines.join("\n")
}

pub fn render_chart(aggregate: &SeverityAggregate) -> String {
    let series = aggregate.chart_series();
    let label_width = series
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    let max = aggregate.max_count();

    let mut lines: Vec<String> = series
        .iter()
        .map(|(label, count)| {
            let bar_len = if max == 0 { 0 } else { count * CHART_WIDTH / max };
            format!("{label:<label_width$} | {} {count}", "#".repeat(bar_len))
        })
        .collect();
    if aggregate.unrecognized() > 0 {
        lines.push(format!(
            "({} result(s) with an unrecognized severity label are not charted)",
            aggregate.unrecognized()
        ));
    }
    lines.join("\n")
}
