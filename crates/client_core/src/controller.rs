//! Query lifecycle: one search in flight at a time, with results and derived
//! views replaced together on success.

use chrono::{DateTime, Utc};
use shared::{
    domain::Severity,
    protocol::{SearchRequest, TransactionRecord},
};
use tracing::{debug, error, info, warn};

use crate::{
    error::{QueryError, QueryFailureKind},
    view::{self, DashboardView, SeverityAggregate},
};

pub const QUERY_FAILED_NOTICE: &str = "Error querying the scoring service";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryPhase {
    #[default]
    Idle,
    Loading,
    Error,
}

/// Pairs a dispatched request with its completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryTicket(u64);

/// A request the caller must send, then report back through
/// [`QueryController::resolve`].
#[derive(Debug, Clone)]
pub struct PendingQuery {
    pub ticket: QueryTicket,
    pub request: SearchRequest,
}

#[derive(Debug)]
pub struct QueryCompletion {
    pub ticket: QueryTicket,
    pub outcome: Result<Vec<TransactionRecord>, QueryError>,
}

/// User-facing notice for the last failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFailureNotice {
    pub kind: QueryFailureKind,
    pub message: String,
    pub detail: String,
}

#[derive(Debug, Clone, Default)]
struct QueryState {
    query_text: String,
    phase: QueryPhase,
    results: Vec<TransactionRecord>,
}

#[derive(Debug, Default)]
pub struct QueryController {
    state: QueryState,
    view: DashboardView,
    in_flight: Option<QueryTicket>,
    next_ticket: u64,
    last_failure: Option<QueryFailureNotice>,
    last_success_at: Option<DateTime<Utc>>,
}

impl QueryController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query_text(&mut self, text: impl Into<String>) {
        self.state.query_text = text.into();
    }

    pub fn query_text(&self) -> &str {
        &self.state.query_text
    }

    /// Starts a search for `text`. Returns `None` and leaves the state untouched
    /// when a search is already in flight.
    pub fn submit_query(&mut self, text: &str) -> Option<PendingQuery> {
        if self.state.phase == QueryPhase::Loading {
            debug!("search ignored while another query is in flight");
            return None;
        }
        self.set_query_text(text);

        let ticket = QueryTicket(self.next_ticket);
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.in_flight = Some(ticket);
        self.state.phase = QueryPhase::Loading;
        self.last_failure = None;

        let request = SearchRequest::new(self.state.query_text.clone());
        info!(
            text_len = request.text.len(),
            min_amount = request.min_amount,
            "dispatching fraud search"
        );
        Some(PendingQuery { ticket, request })
    }

    /// Applies the outcome of the in-flight search. Returns `false` when
    /// `ticket` is not the in-flight request.
    pub fn resolve(
        &mut self,
        ticket: QueryTicket,
        outcome: Result<Vec<TransactionRecord>, QueryError>,
    ) -> bool {
        if self.in_flight != Some(ticket) {
            warn!(?ticket, "ignoring completion for a query that is not in flight");
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(results) => {
                self.replace_results(results);
                self.state.phase = QueryPhase::Idle;
                self.last_success_at = Some(Utc::now());
                let aggregate = self.view.aggregate;
                info!(
                    results = self.state.results.len(),
                    high = aggregate.count(Severity::HighRisk),
                    medium = aggregate.count(Severity::MediumRisk),
                    suspicious = aggregate.count(Severity::Suspicious),
                    low = aggregate.count(Severity::LowRisk),
                    unrecognized = aggregate.unrecognized(),
                    "fraud search completed"
                );
            }
            Err(err) => {
                error!(kind = ?err.kind(), "fraud search failed: {err}");
                self.state.phase = QueryPhase::Error;
                self.last_failure = Some(QueryFailureNotice {
                    kind: err.kind(),
                    message: QUERY_FAILED_NOTICE.to_string(),
                    detail: err.to_string(),
                });
            }
        }
        true
    }

    pub fn apply(&mut self, completion: QueryCompletion) -> bool {
        self.resolve(completion.ticket, completion.outcome)
    }

    fn replace_results(&mut self, results: Vec<TransactionRecord>) {
        self.view = view::project(&results);
        self.state.results = results;
    }

    pub fn phase(&self) -> QueryPhase {
        self.state.phase
    }

    pub fn is_loading(&self) -> bool {
        self.state.phase == QueryPhase::Loading
    }

    pub fn results(&self) -> &[TransactionRecord] {
        &self.state.results
    }

    pub fn aggregate(&self) -> SeverityAggregate {
        self.view.aggregate
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn last_failure(&self) -> Option<&QueryFailureNotice> {
        self.last_failure.as_ref()
    }

    /// Hides the notice; the phase is left as is.
    pub fn dismiss_failure(&mut self) {
        self.last_failure = None;
    }

    pub fn last_success_at(&self) -> Option<DateTime<Utc>> {
        self.last_success_at
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
