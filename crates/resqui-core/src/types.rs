//! Resque dashboard data model.
//!
//! These types mirror the JSON served by the dashboard backend.

use serde::{Deserialize, Deserializer};

/// Aggregate counters and the set of known queues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Stats {
    /// Jobs processed successfully
    #[serde(default)]
    pub success_count: u64,

    /// Jobs that raised during execution
    #[serde(default)]
    pub failure_count: u64,

    /// Queue names, in backend order
    #[serde(rename = "available_queues", default)]
    pub queues: Vec<String>,
}

/// A single job argument value.
///
/// Arguments are arbitrary JSON in practice; the common shapes get their own
/// variants and everything else lands in `Other`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum JobArgument {
    Null,
    Number(serde_json::Number),
    Text(String),
    List(Vec<JobArgument>),
    Other(serde_json::Value),
}

impl From<&str> for JobArgument {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for JobArgument {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// ActiveJob payload carried inside a Resque queue entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobPayload {
    pub job_class: String,
    pub job_id: String,
    #[serde(default)]
    pub executions: u64,
    #[serde(default)]
    pub arguments: Vec<JobArgument>,
}

/// A Resque queue entry.
///
/// By convention only the first element of `args` is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueueEntry {
    /// Resque wrapper class
    #[serde(default)]
    pub class: Option<String>,

    #[serde(default)]
    pub args: Vec<JobPayload>,
}

impl QueueEntry {
    /// The wrapped job, if the entry carries one.
    pub fn job(&self) -> Option<&JobPayload> {
        self.args.first()
    }
}

/// One page of a queue listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueuePage {
    pub total_jobs: u64,

    /// Entries the backend failed to parse arrive as `null`.
    #[serde(default)]
    pub jobs: Vec<Option<QueueEntry>>,
}

/// A job that raised during execution.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FailedJob {
    #[serde(default)]
    pub queue: String,
    #[serde(default)]
    pub failed_at: String,
    pub error: String,
    #[serde(default)]
    pub exception: String,
    #[serde(default)]
    pub backtrace: Vec<String>,
    #[serde(default)]
    pub payload: QueueEntry,
}

impl FailedJob {
    /// Listing key, taken from the wrapped job.
    pub fn job_id(&self) -> Option<&str> {
        self.payload.job().map(|job| job.job_id.as_str())
    }
}

/// One page of the failed-job listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FailedPage {
    pub total_failed: u64,
    #[serde(default)]
    pub jobs: Vec<FailedJob>,
}

/// The job a worker is currently processing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunningJob {
    pub run_at: String,
    pub queue: String,
    pub payload: QueueEntry,
}

/// What a worker is doing right now.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum WorkerState {
    #[default]
    Idle,
    Running(RunningJob),
    /// A payload is present but could not be decoded.
    Unreadable,
}

/// A registered worker process.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Worker {
    /// `<host>:<pid>[:queues]`
    pub id: String,

    /// Last liveness signal
    #[serde(default)]
    pub heartbeat: Option<String>,

    #[serde(rename = "payload", default, deserialize_with = "deserialize_worker_state")]
    pub state: WorkerState,
}

impl Worker {
    /// Host segment of the worker id.
    pub fn host(&self) -> &str {
        self.id.split_once(':').map_or(self.id.as_str(), |(host, _)| host)
    }

    pub fn is_working(&self) -> bool {
        matches!(self.state, WorkerState::Running(_) | WorkerState::Unreadable)
    }
}

/// Response envelope of the active workers endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WorkerList {
    #[serde(default)]
    pub data: Vec<Worker>,
}

/// The backend stores the running job as a JSON string; accept that as well as
/// an inline object. A payload that does not decode marks only this worker as
/// unreadable instead of failing the whole list.
fn deserialize_worker_state<'de, D>(deserializer: D) -> Result<WorkerState, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let decoded = match raw {
        None | Some(serde_json::Value::Null) => return Ok(WorkerState::Idle),
        Some(serde_json::Value::String(encoded)) => {
            if encoded.trim().is_empty() {
                return Ok(WorkerState::Idle);
            }
            serde_json::from_str::<RunningJob>(&encoded)
        }
        Some(value) => serde_json::from_value::<RunningJob>(value),
    };

    match decoded {
        Ok(job) => Ok(WorkerState::Running(job)),
        Err(e) => {
            tracing::warn!("Unreadable worker payload: {}", e);
            Ok(WorkerState::Unreadable)
        }
    }
}
