//! Pending jobs of one queue.

use crate::epoch::Epoch;
use crate::pager::{PageBoundary, Pager};
use resqui_api::ApiError;
use resqui_core::{QueueEntry, QueuePage};

/// Ticket for `GET /api/queue/{queue}?first_job={first_job}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueRequest {
    pub epoch: Epoch,
    pub queue: String,
    pub first_job: u64,
}

/// Ticket for `DELETE /api/queue/{queue}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearQueueRequest {
    pub queue: String,
}

#[derive(Debug)]
pub struct QueueListController {
    queue: Option<String>,
    pager: Pager,
    epoch: Epoch,
    loading: bool,
    clearing: bool,
    total_jobs: u64,
    jobs: Vec<Option<QueueEntry>>,
}

impl Default for QueueListController {
    fn default() -> Self {
        Self {
            queue: None,
            pager: Pager::new(PageBoundary::Queue),
            epoch: Epoch::default(),
            loading: false,
            clearing: false,
            total_jobs: 0,
            jobs: Vec::new(),
        }
    }
}

impl QueueListController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `queue` and fetch its current page.
    ///
    /// Switching to a different queue drops the old listing and starts again
    /// at the first page.
    pub fn activate(&mut self, queue: &str) -> QueueRequest {
        if self.queue.as_deref() != Some(queue) {
            self.queue = Some(queue.to_string());
            self.pager.reset();
            self.total_jobs = 0;
            self.jobs.clear();
            self.clearing = false;
        }
        self.request_for(queue.to_string())
    }

    /// Re-fetch the current page of the active queue.
    pub fn fetch(&mut self) -> Option<QueueRequest> {
        let queue = self.queue.clone()?;
        Some(self.request_for(queue))
    }

    pub fn next_page(&mut self) -> Option<QueueRequest> {
        if self.queue.is_none() || !self.pager.next(self.total_jobs) {
            return None;
        }
        self.fetch()
    }

    pub fn prev_page(&mut self) -> Option<QueueRequest> {
        if self.queue.is_none() || !self.pager.prev() {
            return None;
        }
        self.fetch()
    }

    /// Back to the first page without fetching.
    pub fn rewind(&mut self) {
        self.pager.reset();
    }

    fn request_for(&mut self, queue: String) -> QueueRequest {
        self.loading = true;
        QueueRequest {
            epoch: self.epoch.bump(),
            queue,
            first_job: self.pager.offset(),
        }
    }

    /// Fold in a page. On failure the previous listing is kept.
    pub fn apply_page(&mut self, request: &QueueRequest, result: Result<QueuePage, ApiError>) -> bool {
        if request.epoch != self.epoch {
            tracing::debug!("Discarding stale page for queue {}", request.queue);
            return false;
        }
        self.loading = false;

        match result {
            Ok(page) => {
                self.total_jobs = page.total_jobs;
                self.jobs = page.jobs;
            }
            Err(e) => tracing::warn!("Failed to load queue {}: {}", request.queue, e),
        }
        true
    }

    /// Start clearing the active queue; `None` if already clearing.
    pub fn begin_clear(&mut self) -> Option<ClearQueueRequest> {
        if self.clearing {
            return None;
        }
        let queue = self.queue.clone()?;
        self.clearing = true;
        Some(ClearQueueRequest { queue })
    }

    /// Returns `true` when the queue was cleared and everything should be
    /// reloaded. A cleared queue is empty, so its listing drops back to the
    /// first page.
    pub fn finish_clear(&mut self, request: &ClearQueueRequest, result: Result<(), ApiError>) -> bool {
        let active = self.queue.as_deref() == Some(request.queue.as_str());
        if active {
            self.clearing = false;
        }
        match result {
            Ok(()) => {
                if active {
                    self.pager.reset();
                    self.total_jobs = 0;
                    self.jobs.clear();
                }
                true
            }
            Err(e) => {
                tracing::warn!("Failed to clear queue {}: {}", request.queue, e);
                false
            }
        }
    }

    pub fn queue(&self) -> Option<&str> {
        self.queue.as_deref()
    }

    pub fn jobs(&self) -> &[Option<QueueEntry>] {
        &self.jobs
    }

    pub fn total_jobs(&self) -> u64 {
        self.total_jobs
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_clearing(&self) -> bool {
        self.clearing
    }

    /// Pager controls are only offered for a non-empty queue.
    pub fn show_pager(&self) -> bool {
        self.total_jobs > 0
    }

    pub fn header(&self) -> Option<String> {
        self.queue
            .as_ref()
            .map(|queue| format!("{}: {} jobs", queue, self.total_jobs))
    }
}
