use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::{ServiceErrorBody, ServiceException},
    protocol::{
        SearchRequest, SearchResponse, ServiceBanner, TransactionRecord, HEALTH_PATH, SEARCH_PATH,
    },
};
use tracing::warn;

pub mod config;
pub mod controller;
pub mod error;
pub mod view;

pub use config::{load_settings, Settings};
pub use controller::{
    PendingQuery, QueryCompletion, QueryController, QueryFailureNotice, QueryPhase, QueryTicket,
};
pub use error::{QueryError, QueryFailureKind};
pub use view::{DashboardView, PresentationBucket, RowView, SeverityAggregate};

const ERROR_BODY_PREVIEW_CHARS: usize = 200;

/// Remote fraud-scoring service.
#[async_trait]
pub trait ScoringService: Send + Sync {
    async fn search(&self, request: &SearchRequest)
        -> Result<Vec<TransactionRecord>, QueryError>;
    async fn health(&self) -> Result<ServiceBanner, QueryError>;
}

/// Stand-in used when the HTTP client could not be built; every call fails
/// as a transport failure so in-flight tickets still resolve.
pub struct MissingScoringService {
    reason: String,
}

impl MissingScoringService {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ScoringService for MissingScoringService {
    async fn search(
        &self,
        _request: &SearchRequest,
    ) -> Result<Vec<TransactionRecord>, QueryError> {
        Err(QueryError::Transport(format!(
            "scoring service client is unavailable: {}",
            self.reason
        )))
    }

    async fn health(&self) -> Result<ServiceBanner, QueryError> {
        Err(QueryError::Transport(format!(
            "scoring service client is unavailable: {}",
            self.reason
        )))
    }
}

pub struct HttpScoringClient {
    http: Client,
    service_url: String,
    timeout_secs: Option<u64>,
}

impl HttpScoringClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let timeout = settings.request_timeout();
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("failed to build scoring service http client")?;

        Ok(Self {
            http,
            service_url: settings.service_url.trim_end_matches('/').to_string(),
            timeout_secs: timeout.as_ref().map(Duration::as_secs),
        })
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    fn map_send_error(&self, err: reqwest::Error) -> QueryError {
        QueryError::from_reqwest(err, self.timeout_secs)
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, QueryError> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| self.map_send_error(err))?;

        if !status.is_success() {
            return Err(service_failure(status.as_u16(), &body).into());
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl ScoringService for HttpScoringClient {
    async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<TransactionRecord>, QueryError> {
        let response = self
            .http
            .post(format!("{}{SEARCH_PATH}", self.service_url))
            .json(request)
            .send()
            .await
            .map_err(|err| self.map_send_error(err))?;
        let body = self.read_body(response).await?;

        let decoded: SearchResponse = serde_json::from_slice(&body)
            .map_err(|err| QueryError::MalformedResponse(err.to_string()))?;
        Ok(decoded.results)
    }

    async fn health(&self) -> Result<ServiceBanner, QueryError> {
        let response = self
            .http
            .get(format!("{}{HEALTH_PATH}", self.service_url))
            .send()
            .await
            .map_err(|err| self.map_send_error(err))?;
        let body = self.read_body(response).await?;

        serde_json::from_slice(&body).map_err(|err| QueryError::MalformedResponse(err.to_string()))
    }
}

fn service_failure(status: u16, body: &[u8]) -> ServiceException {
    if let Ok(parsed) = serde_json::from_slice::<ServiceErrorBody>(body) {
        return ServiceException::from_body(status, &parsed);
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return ServiceException::new(status, "no response body");
    }
    if text.chars().count() > ERROR_BODY_PREVIEW_CHARS {
        warn!(status, "truncating long scoring service error body");
        let preview: String = text.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
        return ServiceException::new(status, format!("{preview}..."));
    }
    ServiceException::new(status, text)
}

/// Sends `pending` and packages the outcome for [`QueryController::apply`].
pub async fn run_query(service: &dyn ScoringService, pending: PendingQuery) -> QueryCompletion {
    let outcome = service.search(&pending.request).await;
    QueryCompletion {
        ticket: pending.ticket,
        outcome,
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
