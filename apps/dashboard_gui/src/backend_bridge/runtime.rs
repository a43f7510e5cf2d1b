//! Backend worker: owns the tokio runtime and the scoring-service client, and
//! turns queued commands into UI events.

use std::thread;

use client_core::{
    run_query, HttpScoringClient, MissingScoringService, ScoringService, Settings,
};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let service: Box<dyn ScoringService> = match HttpScoringClient::from_settings(&settings)
            {
                Ok(client) => {
                    let _ = ui_tx.try_send(UiEvent::Info(format!(
                        "Backend worker ready ({})",
                        client.service_url()
                    )));
                    Box::new(client)
                }
                Err(err) => {
                    let reason = format!("{err:#}");
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: {reason}"),
                    )));
                    tracing::error!("failed to build scoring service client: {reason}");
                    Box::new(MissingScoringService::new(reason))
                }
            };

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Search(pending) => {
                        let completion = run_query(service.as_ref(), pending).await;
                        // The controller stays in Loading until this arrives,
                        // so it must not be dropped on a full queue.
                        if ui_tx.send(UiEvent::SearchCompleted(completion)).is_err() {
                            tracing::warn!("ui event queue closed; stopping backend worker");
                            break;
                        }
                    }
                    BackendCommand::ProbeService => match service.health().await {
                        Ok(banner) => {
                            let _ = ui_tx
                                .try_send(UiEvent::Info(format!("Scoring service: {}", banner.message)));
                        }
                        Err(err) => {
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                UiErrorContext::General,
                                err.to_string(),
                            )));
                        }
                    },
                }
            }
        });
    });
}
