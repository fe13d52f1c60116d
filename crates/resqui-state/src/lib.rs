//! Client-side view state for resqui.
//!
//! Controllers never perform I/O. Each `begin_*`/`fetch` call hands back a
//! request value for the caller to execute, and the matching `apply_*` or
//! `finish_*` call folds the outcome back in. Listing requests carry an
//! [`Epoch`]; a result whose epoch is no longer current is dropped.

pub mod epoch;
pub mod failed;
pub mod pager;
pub mod queue;
pub mod route;
pub mod stats;
pub mod workers;

pub use epoch::Epoch;
pub use failed::{
    BulkAction, BulkRequest, FailedJobController, FailedRequest, JobAction, JobActionRequest,
};
pub use pager::{PAGE_SIZE, PageBoundary, PageWindow, Pager};
pub use queue::{ClearQueueRequest, QueueListController, QueueRequest};
pub use route::Route;
pub use stats::{LOAD_FAILED_MESSAGE, StatsRequest, StatsState, StatsStore};
pub use workers::{DeleteWorkerRequest, WorkerListController, WorkersRequest, worker_detail, worker_title};
