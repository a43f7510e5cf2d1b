use std::fmt;

use serde::{Deserialize, Serialize};

/// Transaction identifier as sent by the scoring service. Numeric ids are
/// kept as numbers; anything else is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionId {
    Numeric(i64),
    Text(String),
}

impl From<i64> for TransactionId {
    fn from(value: i64) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Risk label attached to a transaction by the scoring service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "High Risk")]
    HighRisk,
    #[serde(rename = "Medium Risk")]
    MediumRisk,
    #[serde(rename = "Suspicious")]
    Suspicious,
    #[serde(rename = "Low Risk")]
    LowRisk,
}

impl Severity {
    /// Canonical chart order.
    pub const ALL: [Severity; 4] = [
        Severity::HighRisk,
        Severity::MediumRisk,
        Severity::Suspicious,
        Severity::LowRisk,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::HighRisk => "High Risk",
            Self::MediumRisk => "Medium Risk",
            Self::Suspicious => "Suspicious",
            Self::LowRisk => "Low Risk",
        }
    }

    /// Exact, case-sensitive match against the wire labels.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|severity| severity.label() == label)
    }

    /// Position of this severity in [`Severity::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::HighRisk => 0,
            Self::MediumRisk => 1,
            Self::Suspicious => 2,
            Self::LowRisk => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Severity as it arrived on the wire. Labels outside the fixed set are kept
/// verbatim instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeverityLabel {
    Known(Severity),
    Unrecognized(String),
}

impl SeverityLabel {
    pub fn parse(raw: &str) -> Self {
        match Severity::from_label(raw) {
            Some(severity) => Self::Known(severity),
            None => Self::Unrecognized(raw.to_string()),
        }
    }

    pub fn known(&self) -> Option<Severity> {
        match self {
            Self::Known(severity) => Some(*severity),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(severity) => severity.label(),
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<Severity> for SeverityLabel {
    fn from(value: Severity) -> Self {
        Self::Known(value)
    }
}

impl fmt::Display for SeverityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorical detector output. The service currently sends `0`/`1`, but the
/// contract only promises a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Numeric(i64),
    Text(String),
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{}", u8::from(*value)),
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_labels_round_trip_through_lookup() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_label(severity.label()), Some(severity));
            assert_eq!(Severity::ALL[severity.index()], severity);
        }
        assert_eq!(Severity::from_label("high risk"), None);
        assert_eq!(Severity::from_label("Critical"), None);
    }

    #[test]
    fn unknown_severity_label_is_kept_verbatim() {
        let label: SeverityLabel = serde_json::from_str("\"Critical\"").expect("label");
        assert_eq!(label, SeverityLabel::Unrecognized("Critical".to_string()));
        assert_eq!(label.known(), None);
        assert_eq!(label.to_string(), "Critical");

        let label: SeverityLabel = serde_json::from_str("\"Suspicious\"").expect("label");
        assert_eq!(label.known(), Some(Severity::Suspicious));
    }

    #[test]
    fn flag_values_accept_numeric_and_text_labels() {
        let numeric: FlagValue = serde_json::from_str("1").expect("numeric flag");
        let text: FlagValue = serde_json::from_str("\"0\"").expect("text flag");
        assert_eq!(numeric, FlagValue::Numeric(1));
        assert_eq!(text, FlagValue::Text("0".to_string()));
        assert_eq!(numeric.to_string(), "1");
        assert_eq!(FlagValue::Bool(true).to_string(), "1");
    }

    #[test]
    fn transaction_ids_are_kept_as_sent() {
        let numeric: TransactionId = serde_json::from_str("42").expect("numeric id");
        let text: TransactionId = serde_json::from_str("\"txn-7f3a\"").expect("text id");
        assert_eq!(numeric, TransactionId::Numeric(42));
        assert_eq!(text, TransactionId::from("txn-7f3a"));
        assert_eq!(numeric.to_string(), "42");
        assert_eq!(text.to_string(), "txn-7f3a");
        assert_eq!(serde_json::to_string(&text).expect("encode"), "\"txn-7f3a\"");
    }
}
