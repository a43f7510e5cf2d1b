use chrono::Local;
use client_core::{QueryController, QueryError, QueryPhase};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::{chart, table, theme};

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub service_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Service => "Service",
        UiErrorCategory::Payload => "Payload",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

fn service_environment_label(service_url: &str) -> &'static str {
    let host = url::Url::parse(service_url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_ascii_lowercase))
        .unwrap_or_default();
    if matches!(host.as_str(), "localhost" | "127.0.0.1" | "[::1]") {
        return "Local";
    }

    let has_label = |wanted: &str| {
        host.split('.')
            .flat_map(|label| label.split('-'))
            .any(|part| part == wanted)
    };
    if has_label("staging") {
        "Staging"
    } else if has_label("dev") {
        "Development"
    } else {
        "Production"
    }
}

pub struct DashboardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    service_url: String,
    query_input: String,
    controller: QueryController,

    status: String,
    status_banner: Option<StatusBanner>,
}

impl DashboardApp {
    pub fn new(
        startup: StartupConfig,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            service_url: startup.service_url,
            query_input: String::new(),
            controller: QueryController::new(),
            status: "Ready".to_string(),
            status_banner: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => self.show_error(&err),
                UiEvent::SearchCompleted(completion) => {
                    if !self.controller.apply(completion) {
                        continue;
                    }
                    self.sync_search_status();
                }
            }
        }
    }

    fn sync_search_status(&mut self) {
        match self.controller.phase() {
            QueryPhase::Idle => {
                self.status_banner = None;
                self.status = format!("{} transaction(s) returned", self.controller.results().len());
            }
            QueryPhase::Error => {
                if let Some(notice) = self.controller.last_failure() {
                    let err = UiError::from_failure(notice);
                    self.show_error(&err);
                }
            }
            QueryPhase::Loading => {}
        }
    }

    fn show_error(&mut self, err: &UiError) {
        // Search failures surface only the generic notice; the cause is logged.
        self.status = match err.context() {
            UiErrorContext::Search => err.message().to_string(),
            UiErrorContext::BackendStartup | UiErrorContext::General => {
                format!("{} error: {}", err_label(err.category()), err.message())
            }
        };
        if err.context() != UiErrorContext::General {
            self.status_banner = Some(StatusBanner {
                severity: StatusBannerSeverity::Error,
                message: self.status.clone(),
            });
        }
    }

    fn try_search(&mut self) {
        let Some(pending) = self.controller.submit_query(&self.query_input) else {
            return;
        };
        let ticket = pending.ticket;
        self.status_banner = None;
        self.status = "Fetching data...".to_string();

        if !dispatch_backend_command(&self.cmd_tx, BackendCommand::Search(pending), &mut self.status)
        {
            let reason = self.status.clone();
            self.controller
                .resolve(ticket, Err(QueryError::Transport(reason)));
            self.sync_search_status();
        }
    }

    fn probe_service(&mut self) {
        self.status = "Checking scoring service...".to_string();
        dispatch_backend_command(&self.cmd_tx, BackendCommand::ProbeService, &mut self.status);
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    theme::ERROR_BANNER_FILL,
                    egui::Stroke::new(1.0, theme::ERROR_BANNER_STROKE),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                                self.controller.dismiss_failure();
                            }
                        });
                    });
                });
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("dashboard_top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Fraud Detection Dashboard");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Check service").clicked() {
                        self.probe_service();
                    }
                    ui.weak(format!(
                        "{} · {}",
                        service_environment_label(&self.service_url),
                        self.service_url
                    ));
                });
            });
            ui.add_space(6.0);
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("dashboard_status_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
                if let Some(at) = self.controller.last_success_at() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.small(format!(
                            "Last updated {}",
                            at.with_timezone(&Local).format("%H:%M:%S")
                        ));
                    });
                }
            });
        });
    }

    fn show_search_row(&mut self, ui: &mut egui::Ui) {
        let loading = self.controller.is_loading();
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.query_input)
                    .id_salt("query_input")
                    .hint_text("Search transaction...")
                    .desired_width(300.0),
            );
            if response.changed() {
                self.controller.set_query_text(self.query_input.clone());
            }
            let enter_pressed =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            let label = if loading { "Fetching data..." } else { "Search" };
            let clicked = ui.add_enabled(!loading, egui::Button::new(label)).clicked();
            if clicked || (enter_pressed && !loading) {
                self.try_search();
            }
        });
    }

    fn show_dashboard(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);
            ui.add_space(8.0);
            self.show_search_row(ui);

            if self.controller.is_loading() {
                ui.add_space(20.0);
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Calculating results, please wait...");
                });
                return;
            }

            let view = self.controller.view();
            if view.is_empty() {
                return;
            }

            egui::ScrollArea::vertical()
                .id_salt("dashboard_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.heading("Transaction Results");
                    ui.add_space(10.0);
                    table::show_results_table(ui, view);

                    ui.add_space(40.0);
                    ui.heading("Fraud Severity Summary");
                    ui.add_space(10.0);
                    chart::show_severity_chart(ui, &view.aggregate);
                });
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_top_bar(ctx);
        self.show_status_bar(ctx);
        self.show_dashboard(ctx);

        if self.controller.is_loading() {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{controller::QUERY_FAILED_NOTICE, QueryCompletion};
    use crossbeam_channel::bounded;
    use shared::{
        domain::{FlagValue, SeverityLabel, TransactionId},
        error::ServiceException,
        protocol::TransactionRecord,
    };

    fn record(id: i64, severity: &str) -> TransactionRecord {
        TransactionRecord {
            id: TransactionId::Numeric(id),
            account_number: "ACC120".to_string(),
            description: "International Transfer".to_string(),
            amount: 7000.0,
            distance: None,
            rule_flag: FlagValue::Numeric(1),
            explanation: "Contains 'International'".to_string(),
            anomaly_flag: FlagValue::Numeric(1),
            anomaly_score: None,
            severity: SeverityLabel::parse(severity),
        }
    }

    fn app() -> (
        DashboardApp,
        Receiver<BackendCommand>,
        Sender<UiEvent>,
    ) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let app = DashboardApp::new(
            StartupConfig {
                service_url: "http://127.0.0.1:8000".to_string(),
            },
            cmd_tx,
            ui_rx,
        );
        (app, cmd_rx, ui_tx)
    }

    fn take_search(cmd_rx: &Receiver<BackendCommand>) -> client_core::PendingQuery {
        match cmd_rx.try_recv().expect("queued command") {
            BackendCommand::Search(pending) => pending,
            BackendCommand::ProbeService => panic!("expected a search command"),
        }
    }

    #[test]
    fn repeated_search_clicks_queue_one_request() {
        let (mut app, cmd_rx, _ui_tx) = app();
        app.query_input = "wire transfer".to_string();

        app.try_search();
        app.try_search();

        let pending = take_search(&cmd_rx);
        assert_eq!(pending.request.text, "wire transfer");
        assert!(cmd_rx.try_recv().is_err());
        assert_eq!(app.controller.phase(), QueryPhase::Loading);
    }

    #[test]
    fn completed_search_clears_banner_and_reports_count() {
        let (mut app, cmd_rx, ui_tx) = app();
        app.try_search();
        let pending = take_search(&cmd_rx);

        ui_tx
            .try_send(UiEvent::SearchCompleted(QueryCompletion {
                ticket: pending.ticket,
                outcome: Ok(vec![record(1, "High Risk"), record(2, "Low Risk")]),
            }))
            .expect("send completion");
        app.process_ui_events();

        assert_eq!(app.controller.phase(), QueryPhase::Idle);
        assert!(app.status_banner.is_none());
        assert_eq!(app.status, "2 transaction(s) returned");
    }

    #[test]
    fn failed_search_shows_banner_and_keeps_results() {
        let (mut app, cmd_rx, ui_tx) = app();
        app.try_search();
        let first = take_search(&cmd_rx);
        ui_tx
            .try_send(UiEvent::SearchCompleted(QueryCompletion {
                ticket: first.ticket,
                outcome: Ok(vec![record(1, "High Risk")]),
            }))
            .expect("send completion");
        app.process_ui_events();

        app.try_search();
        let second = take_search(&cmd_rx);
        ui_tx
            .try_send(UiEvent::SearchCompleted(QueryCompletion {
                ticket: second.ticket,
                outcome: Err(QueryError::Service(ServiceException::new(
                    500,
                    "Internal Server Error",
                ))),
            }))
            .expect("send completion");
        app.process_ui_events();

        assert_eq!(app.controller.phase(), QueryPhase::Error);
        assert_eq!(app.controller.results().len(), 1);
        let banner = app.status_banner.as_ref().expect("banner");
        assert_eq!(banner.message, QUERY_FAILED_NOTICE);
        assert_eq!(app.status, QUERY_FAILED_NOTICE);
        assert!(!app.status.contains("500"));
    }

    #[test]
    fn disconnected_worker_resolves_search_as_error() {
        let (mut app, cmd_rx, _ui_tx) = app();
        drop(cmd_rx);

        app.try_search();

        assert_eq!(app.controller.phase(), QueryPhase::Error);
        let banner = app.status_banner.as_ref().expect("banner");
        assert_eq!(banner.message, QUERY_FAILED_NOTICE);
        assert!(!app.status.contains("disconnected"));
    }

    #[test]
    fn labels_service_environment_from_url() {
        assert_eq!(service_environment_label("http://127.0.0.1:8000"), "Local");
        assert_eq!(
            service_environment_label("https://staging.fraud.example.com"),
            "Staging"
        );
        assert_eq!(service_environment_label("http://localhost:8000/"), "Local");
        assert_eq!(
            service_environment_label("https://fraud.example.com"),
            "Production"
        );
        assert_eq!(
            service_environment_label("https://fraudevaluation.example"),
            "Production"
        );
        assert_eq!(
            service_environment_label("https://scoring-dev.fraud.example.com"),
            "Development"
        );
    }
}
