//! Failed-job listing and its mutations.

use std::collections::HashSet;

use crate::epoch::Epoch;
use crate::pager::{PageBoundary, Pager};
use resqui_api::ApiError;
use resqui_core::{FailedJob, FailedPage};

/// Ticket for `GET /api/failed?from_job={from_job}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailedRequest {
    pub epoch: Epoch,
    pub from_job: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobAction {
    Delete,
    Retry,
}

impl JobAction {
    pub fn verb(self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Retry => "retry",
        }
    }
}

/// Ticket for a single-job delete or retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobActionRequest {
    pub action: JobAction,
    pub job_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    ClearAll,
    RetryAll,
}

impl BulkAction {
    pub fn verb(self) -> &'static str {
        match self {
            Self::ClearAll => "clear all failed jobs",
            Self::RetryAll => "retry all failed jobs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkRequest {
    pub action: BulkAction,
}

/// State of the failed view.
///
/// A successful delete or retry removes the job from the local page without a
/// re-fetch and decrements the total; the page window stays where it is.
/// Bulk actions reset to the first page and reload.
#[derive(Debug)]
pub struct FailedJobController {
    pager: Pager,
    epoch: Epoch,
    loading: bool,
    total_failed: u64,
    jobs: Vec<FailedJob>,
    deleting: HashSet<String>,
    retrying: HashSet<String>,
    bulk: Option<BulkAction>,
}

impl Default for FailedJobController {
    fn default() -> Self {
        Self {
            pager: Pager::new(PageBoundary::Failed),
            epoch: Epoch::default(),
            loading: false,
            total_failed: 0,
            jobs: Vec::new(),
            deleting: HashSet::new(),
            retrying: HashSet::new(),
            bulk: None,
        }
    }
}

impl FailedJobController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetch(&mut self) -> FailedRequest {
        self.loading = true;
        FailedRequest {
            epoch: self.epoch.bump(),
            from_job: self.pager.offset(),
        }
    }

    /// Back to the first page without fetching.
    pub fn rewind(&mut self) {
        self.pager.reset();
    }

    /// Back to the first page and fetch it.
    pub fn reset(&mut self) -> FailedRequest {
        self.rewind();
        self.fetch()
    }

    /// Paging is disabled while a page fetch is in flight.
    pub fn next_page(&mut self) -> Option<FailedRequest> {
        if self.loading || !self.pager.next(self.total_failed) {
            return None;
        }
        Some(self.fetch())
    }

    pub fn prev_page(&mut self) -> Option<FailedRequest> {
        if self.loading || !self.pager.prev() {
            return None;
        }
        Some(self.fetch())
    }

    pub fn apply_page(&mut self, request: FailedRequest, result: Result<FailedPage, ApiError>) -> bool {
        if request.epoch != self.epoch {
            tracing::debug!("Discarding stale failed page at {}", request.from_job);
            return false;
        }
        self.loading = false;

        match result {
            Ok(page) => {
                self.total_failed = page.total_failed;
                self.jobs = page.jobs;
            }
            Err(e) => tracing::warn!("Failed to load failed jobs: {}", e),
        }
        true
    }

    /// Start deleting or retrying one job. `None` while any action is
    /// already pending for that job.
    pub fn begin_job_action(&mut self, action: JobAction, job_id: &str) -> Option<JobActionRequest> {
        if self.deleting.contains(job_id) || self.retrying.contains(job_id) {
            return None;
        }
        self.latch(action).insert(job_id.to_string());
        Some(JobActionRequest {
            action,
            job_id: job_id.to_string(),
        })
    }

    /// Returns `true` if the job was removed locally.
    pub fn finish_job_action(&mut self, request: &JobActionRequest, result: Result<(), ApiError>) -> bool {
        self.latch(request.action).remove(&request.job_id);

        if let Err(e) = result {
            tracing::warn!(
                "Failed to {} failed job {}: {}",
                request.action.verb(),
                request.job_id,
                e
            );
            return false;
        }

        self.jobs
            .retain(|job| job.job_id() != Some(request.job_id.as_str()));
        self.total_failed = self.total_failed.saturating_sub(1);
        true
    }

    pub fn begin_bulk(&mut self, action: BulkAction) -> Option<BulkRequest> {
        if self.bulk.is_some() {
            return None;
        }
        self.bulk = Some(action);
        Some(BulkRequest { action })
    }

    /// On success returns the first-page fetch that follows a bulk action.
    pub fn finish_bulk(&mut self, request: BulkRequest, result: Result<(), ApiError>) -> Option<FailedRequest> {
        self.bulk = None;
        match result {
            Ok(()) => Some(self.reset()),
            Err(e) => {
                tracing::warn!("Failed to {}: {}", request.action.verb(), e);
                None
            }
        }
    }

    fn latch(&mut self, action: JobAction) -> &mut HashSet<String> {
        match action {
            JobAction::Delete => &mut self.deleting,
            JobAction::Retry => &mut self.retrying,
        }
    }

    pub fn jobs(&self) -> &[FailedJob] {
        &self.jobs
    }

    pub fn total_failed(&self) -> u64 {
        self.total_failed
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_deleting(&self, job_id: &str) -> bool {
        self.deleting.contains(job_id)
    }

    pub fn is_retrying(&self, job_id: &str) -> bool {
        self.retrying.contains(job_id)
    }

    pub fn bulk_in_flight(&self) -> Option<BulkAction> {
        self.bulk
    }

    pub fn show_pager(&self) -> bool {
        self.total_failed > 0
    }

    pub fn header(&self) -> String {
        format!("{} jobs failed", self.total_failed)
    }
}
