use super::*;
use shared::{
    domain::{FlagValue, SeverityLabel, TransactionId},
    error::ServiceException,
};

fn record(id: i64, amount: f64, severity: &str) -> TransactionRecord {
    TransactionRecord {
        id: TransactionId::Numeric(id),
        account_number: format!("ACC{}", 100 + id),
        description: "Wire Transfer".to_string(),
        amount,
        distance: Some(0.21),
        rule_flag: FlagValue::Numeric(1),
        explanation: "Contains 'Wire Transfer'".to_string(),
        anomaly_flag: FlagValue::Numeric(0),
        anomaly_score: Some(0.01),
        severity: SeverityLabel::parse(severity),
    }
}

fn completed_with(results: Vec<TransactionRecord>) -> QueryController {
    let mut controller = QueryController::new();
    let pending = controller.submit_query("seed").expect("first search dispatches");
    assert!(controller.resolve(pending.ticket, Ok(results)));
    controller
}

#[test]
fn starts_idle_with_no_results() {
    let controller = QueryController::new();
    assert_eq!(controller.phase(), QueryPhase::Idle);
    assert!(controller.results().is_empty());
    assert_eq!(controller.aggregate(), SeverityAggregate::default());
    assert!(controller.last_failure().is_none());
}

#[test]
fn submit_enters_loading_and_builds_request_with_fixed_threshold() {
    let mut controller = QueryController::new();
    let pending = controller.submit_query("wire transfer").expect("dispatch");

    assert_eq!(controller.phase(), QueryPhase::Loading);
    assert_eq!(pending.request.text, "wire transfer");
    assert_eq!(pending.request.min_amount, 5000);
    assert_eq!(controller.query_text(), "wire transfer");
}

#[test]
fn empty_query_text_is_not_validated() {
    let mut controller = QueryController::new();
    let pending = controller.submit_query("").expect("dispatch");
    assert_eq!(pending.request.text, "");
}

#[test]
fn second_submit_while_loading_is_a_no_op() {
    let mut controller = QueryController::new();
    let first = controller.submit_query("wire transfer").expect("dispatch");
    assert!(controller.submit_query("bonus payout").is_none());
    assert_eq!(controller.phase(), QueryPhase::Loading);
    assert_eq!(controller.query_text(), "wire transfer");

    assert!(controller.resolve(first.ticket, Ok(Vec::new())));
    assert_eq!(controller.phase(), QueryPhase::Idle);
    assert!(controller.submit_query("bonus payout").is_some());
}

#[test]
fn success_replaces_results_and_recomputes_aggregate() {
    let mut controller = QueryController::new();
    let pending = controller.submit_query("wire transfer").expect("dispatch");
    assert!(controller.resolve(
        pending.ticket,
        Ok(vec![record(1, 7000.0, "High Risk"), record(2, 6000.0, "Low Risk")])
    ));

    assert_eq!(controller.phase(), QueryPhase::Idle);
    assert_eq!(controller.results().len(), 2);
    assert_eq!(
        controller.aggregate().chart_series(),
        [
            ("High Risk", 1),
            ("Medium Risk", 0),
            ("Suspicious", 0),
            ("Low Risk", 1)
        ]
    );
    assert_eq!(controller.view().rows.len(), 2);
    assert!(controller.last_success_at().is_some());

    let next = controller.submit_query("bonus").expect("dispatch");
    assert!(controller.resolve(next.ticket, Ok(vec![record(3, 9000.0, "Suspicious")])));
    assert_eq!(controller.results().len(), 1);
    assert_eq!(controller.results()[0].id, TransactionId::Numeric(3));
    assert_eq!(controller.aggregate().count(Severity::HighRisk), 0);
    assert_eq!(controller.aggregate().count(Severity::Suspicious), 1);
}

#[test]
fn prior_results_stay_visible_while_loading() {
    let mut controller = completed_with(vec![record(1, 7000.0, "High Risk")]);
    controller.submit_query("again").expect("dispatch");

    assert_eq!(controller.phase(), QueryPhase::Loading);
    assert_eq!(controller.results().len(), 1);
    assert_eq!(controller.aggregate().count(Severity::HighRisk), 1);
}

#[test]
fn failure_keeps_prior_results_and_sets_notice() {
    let mut controller = completed_with(vec![record(1, 7000.0, "High Risk")]);
    let pending = controller.submit_query("wire transfer").expect("dispatch");

    assert!(controller.resolve(
        pending.ticket,
        Err(QueryError::Service(ServiceException::new(500, "Internal Server Error")))
    ));

    assert_eq!(controller.phase(), QueryPhase::Error);
    assert_eq!(controller.results().len(), 1);
    assert_eq!(controller.aggregate().count(Severity::HighRisk), 1);

    let notice = controller.last_failure().expect("notice");
    assert_eq!(notice.kind, QueryFailureKind::Service);
    assert_eq!(notice.message, QUERY_FAILED_NOTICE);
    assert!(notice.detail.contains("500"));
}

#[test]
fn error_phase_accepts_a_new_search_and_clears_notice() {
    let mut controller = QueryController::new();
    let pending = controller.submit_query("x").expect("dispatch");
    controller.resolve(
        pending.ticket,
        Err(QueryError::Transport("connection refused".to_string())),
    );
    assert_eq!(controller.phase(), QueryPhase::Error);

    let retry = controller.submit_query("x").expect("dispatch from error");
    assert_eq!(controller.phase(), QueryPhase::Loading);
    assert!(controller.last_failure().is_none());
    assert_ne!(retry.ticket, pending.ticket);
}

#[test]
fn empty_response_returns_to_idle_with_zero_aggregate() {
    let controller = completed_with(Vec::new());
    assert_eq!(controller.phase(), QueryPhase::Idle);
    assert!(controller.view().is_empty());
    assert_eq!(controller.aggregate().total(), 0);
}

#[test]
fn stale_completion_is_ignored() {
    let mut controller = QueryController::new();
    let first = controller.submit_query("a").expect("dispatch");
    controller.resolve(first.ticket, Ok(vec![record(1, 7000.0, "High Risk")]));

    let second = controller.submit_query("b").expect("dispatch");
    assert!(!controller.resolve(first.ticket, Ok(Vec::new())));
    assert_eq!(controller.phase(), QueryPhase::Loading);
    assert_eq!(controller.results().len(), 1);

    assert!(controller.apply(QueryCompletion {
        ticket: second.ticket,
        outcome: Ok(Vec::new()),
    }));
    assert_eq!(controller.phase(), QueryPhase::Idle);
}

#[test]
fn completion_without_dispatch_is_ignored() {
    let mut other = QueryController::new();
    let foreign = other.submit_query("x").expect("dispatch");

    let mut controller = QueryController::new();
    assert!(!controller.resolve(foreign.ticket, Ok(Vec::new())));
    assert_eq!(controller.phase(), QueryPhase::Idle);
}

#[test]
fn dismissing_notice_keeps_error_phase() {
    let mut controller = QueryController::new();
    let pending = controller.submit_query("x").expect("dispatch");
    controller.resolve(
        pending.ticket,
        Err(QueryError::MalformedResponse("missing field `results`".to_string())),
    );
    controller.dismiss_failure();

    assert!(controller.last_failure().is_none());
    assert_eq!(controller.phase(), QueryPhase::Error);
}
