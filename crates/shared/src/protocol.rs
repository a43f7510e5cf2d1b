use serde::{Deserialize, Serialize};

use crate::domain::{FlagValue, SeverityLabel, TransactionId};

pub const SEARCH_PATH: &str = "/search";
pub const HEALTH_PATH: &str = "/";

/// Threshold sent with every search. Not user-configurable.
pub const DEFAULT_MIN_AMOUNT: u32 = 5000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub text: String,
    pub min_amount: u32,
}

impl SearchRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            min_amount: DEFAULT_MIN_AMOUNT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<TransactionRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub account_number: String,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "dist", default)]
    pub distance: Option<f64>,
    pub rule_flag: FlagValue,
    pub explanation: String,
    pub anomaly_flag: FlagValue,
    #[serde(default)]
    pub anomaly_score: Option<f64>,
    pub severity: SeverityLabel,
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceBanner {
    pub message: String,
}
