//! Resque data model and display helpers for resqui.
//!
//! Everything here is pure: no I/O, no clocks. Callers pass `now` explicitly.

pub mod args;
pub mod heartbeat;
pub mod text;
pub mod time;
pub mod types;

pub use args::{NESTED_ITEM_LIMIT, NO_ARGUMENTS, format_arguments};
pub use heartbeat::{STALE_AFTER_MINUTES, is_stale, stale_threshold};
pub use text::{BACKTRACE_DISPLAY_LINES, ERROR_DISPLAY_LIMIT, backtrace_head, space_after_commas, trim_error};
pub use time::{format_local, parse_timestamp};
pub use types::{
    FailedJob, FailedPage, JobArgument, JobPayload, QueueEntry, QueuePage, RunningJob, Stats,
    Worker, WorkerList, WorkerState,
};
