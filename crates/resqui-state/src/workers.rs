//! Active workers.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use resqui_api::ApiError;
use resqui_core::{Worker, WorkerState, format_arguments, format_local};

use crate::epoch::Epoch;

/// Ticket for `GET /api/active_workers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkersRequest {
    pub epoch: Epoch,
}

/// Ticket for `DELETE /api/worker/{worker_id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteWorkerRequest {
    pub worker_id: String,
}

#[derive(Debug, Default)]
pub struct WorkerListController {
    epoch: Epoch,
    loading: bool,
    workers: Vec<Worker>,
    deleting: HashSet<String>,
}

impl WorkerListController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self) -> WorkersRequest {
        self.loading = true;
        WorkersRequest {
            epoch: self.epoch.bump(),
        }
    }

    /// Replace the list. A failed load keeps whatever was shown before.
    pub fn apply(&mut self, request: WorkersRequest, result: Result<Vec<Worker>, ApiError>) -> bool {
        if request.epoch != self.epoch {
            tracing::debug!("Discarding stale worker list");
            return false;
        }
        self.loading = false;

        match result {
            Ok(workers) => self.workers = workers,
            Err(e) => tracing::warn!("Failed to load workers: {}", e),
        }
        true
    }

    /// Only stale workers may be deleted, one request at a time each.
    pub fn can_delete(&self, worker: &Worker, now: DateTime<Utc>) -> bool {
        worker.is_stale(now) && !self.deleting.contains(&worker.id)
    }

    pub fn begin_delete(&mut self, worker_id: &str, now: DateTime<Utc>) -> Option<DeleteWorkerRequest> {
        let worker = self.workers.iter().find(|w| w.id == worker_id)?;
        if !self.can_delete(worker, now) {
            return None;
        }
        self.deleting.insert(worker_id.to_string());
        Some(DeleteWorkerRequest {
            worker_id: worker_id.to_string(),
        })
    }

    pub fn finish_delete(&mut self, request: &DeleteWorkerRequest, result: Result<(), ApiError>) -> bool {
        self.deleting.remove(&request.worker_id);
        match result {
            Ok(()) => {
                self.workers.retain(|w| w.id != request.worker_id);
                true
            }
            Err(e) => {
                tracing::warn!("Failed to delete worker {}: {}", request.worker_id, e);
                false
            }
        }
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_deleting(&self, worker_id: &str) -> bool {
        self.deleting.contains(worker_id)
    }

    pub fn working_count(&self) -> usize {
        self.workers.iter().filter(|w| w.is_working()).count()
    }

    pub fn summary(&self) -> String {
        format!("{} of {} working", self.working_count(), self.workers.len())
    }
}

/// Row title: the host, plus the job class while running.
pub fn worker_title(worker: &Worker) -> String {
    match running_class(worker) {
        Some(class) => format!("{} - {}", worker.host(), class),
        None => worker.host().to_string(),
    }
}

/// Second row line: what the worker is doing.
pub fn worker_detail(worker: &Worker) -> String {
    match &worker.state {
        WorkerState::Idle => "waiting...".to_string(),
        WorkerState::Running(running) => {
            let args = running
                .payload
                .job()
                .map(|job| format_arguments(&job.arguments))
                .unwrap_or_else(|| format_arguments(&[]));
            format!("Started: {} | Args: {}", format_local(&running.run_at), args)
        }
        WorkerState::Unreadable => "<unreadable job>".to_string(),
    }
}

fn running_class(worker: &Worker) -> Option<&str> {
    match &worker.state {
        WorkerState::Running(running) => running.payload.job().map(|job| job.job_class.as_str()),
        WorkerState::Idle | WorkerState::Unreadable => None,
    }
}
