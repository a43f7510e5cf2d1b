//! Backend-to-UI events and error modeling for the dashboard.

use client_core::{QueryCompletion, QueryFailureKind, QueryFailureNotice};

pub enum UiEvent {
    Info(String),
    Error(UiError),
    SearchCompleted(QueryCompletion),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Service,
    Payload,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Search,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("malformed")
            || message_lower.contains("missing field")
            || message_lower.contains("invalid type")
            || message_lower.contains("expected value")
        {
            UiErrorCategory::Payload
        } else if message_lower.contains("scoring service returned") {
            UiErrorCategory::Service
        } else if message_lower.contains("timed out")
            || message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("unreachable")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
            || message_lower.contains("dns")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_failure(notice: &QueryFailureNotice) -> Self {
        let category = match notice.kind {
            QueryFailureKind::Transport => UiErrorCategory::Transport,
            QueryFailureKind::Service => UiErrorCategory::Service,
            QueryFailureKind::MalformedResponse => UiErrorCategory::Payload,
        };
        Self {
            category,
            context: UiErrorContext::Search,
            message: notice.message.clone(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
