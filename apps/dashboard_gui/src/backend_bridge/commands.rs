//! Backend commands queued from UI to backend worker.

use client_core::PendingQuery;

pub enum BackendCommand {
    Search(PendingQuery),
    ProbeService,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Search(_) => "search",
            Self::ProbeService => "probe_service",
        }
    }
}
