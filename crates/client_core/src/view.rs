//! Pure projections from a result list to what the table and chart render.

use shared::{
    domain::{Severity, SeverityLabel},
    protocol::TransactionRecord,
};
use tracing::warn;

/// Rendered in place of a score the service did not compute.
pub const UNAVAILABLE_MARKER: &str = "n/a";

/// Per-severity counts for one result list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityAggregate {
    counts: [usize; 4],
    unrecognized: usize,
}

impl SeverityAggregate {
    pub fn count(&self, severity: Severity) -> usize {
        self.counts[severity.index()]
    }

    /// Records whose label is outside the fixed set. They are not part of
    /// any chart bar.
    pub fn unrecognized(&self) -> usize {
        self.unrecognized
    }

    /// Sum of the four chart bars.
    pub fn classified_total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn total(&self) -> usize {
        self.classified_total() + self.unrecognized
    }

    /// `(label, count)` pairs in canonical chart order.
    pub fn chart_series(&self) -> [(&'static str, usize); 4] {
        Severity::ALL.map(|severity| (severity.label(), self.count(severity)))
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Row background class. One per severity; unknown labels share `Clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresentationBucket {
    Alert,
    Caution,
    Notice,
    Clear,
}

impl From<Severity> for PresentationBucket {
    fn from(value: Severity) -> Self {
        match value {
            Severity::HighRisk => Self::Alert,
            Severity::MediumRisk => Self::Caution,
            Severity::Suspicious => Self::Notice,
            Severity::LowRisk => Self::Clear,
        }
    }
}

/// Display-ready cells for one table row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: String,
    pub account_number: String,
    pub description: String,
    pub amount: String,
    pub distance: String,
    pub rule_flag: String,
    pub explanation: String,
    pub anomaly_flag: String,
    pub anomaly_score: String,
    pub severity: String,
    pub bucket: PresentationBucket,
}

/// Everything the dashboard draws for one result list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    pub rows: Vec<RowView>,
    pub aggregate: SeverityAggregate,
}

impl DashboardView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn compute_severity_aggregate(records: &[TransactionRecord]) -> SeverityAggregate {
    let mut aggregate = SeverityAggregate::default();
    for record in records {
        match &record.severity {
            SeverityLabel::Known(severity) => aggregate.counts[severity.index()] += 1,
            SeverityLabel::Unrecognized(raw) => {
                warn!(
                    transaction_id = %record.id,
                    severity = %raw,
                    "scoring service returned an unrecognized severity label"
                );
                aggregate.unrecognized += 1;
            }
        }
    }
    aggregate
}

pub fn classify_row_presentation(record: &TransactionRecord) -> PresentationBucket {
    record
        .severity
        .known()
        .map(PresentationBucket::from)
        .unwrap_or(PresentationBucket::Clear)
}

pub fn project_row(record: &TransactionRecord) -> RowView {
    RowView {
        id: record.id.to_string(),
        account_number: record.account_number.clone(),
        description: record.description.clone(),
        amount: format_amount(record.amount),
        distance: format_optional_score(record.distance),
        rule_flag: record.rule_flag.to_string(),
        explanation: record.explanation.clone(),
        anomaly_flag: record.anomaly_flag.to_string(),
        anomaly_score: format_optional_score(record.anomaly_score),
        severity: record.severity.to_string(),
        bucket: classify_row_presentation(record),
    }
}

pub fn project(records: &[TransactionRecord]) -> DashboardView {
    DashboardView {
        rows: records.iter().map(project_row).collect(),
        aggregate: compute_severity_aggregate(records),
    }
}

/// Four decimals, or the unavailable marker for missing and non-finite values.
pub fn format_optional_score(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_finite() => format!("{value:.4}"),
        _ => UNAVAILABLE_MARKER.to_string(),
    }
}

fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return UNAVAILABLE_MARKER.to_string();
    }
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
