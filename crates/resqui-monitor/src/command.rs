//! Requests the app hands to the shell, and the results that come back.

use resqui_api::ApiError;
use resqui_core::{FailedPage, QueuePage, Stats, Worker};
use resqui_state::{
    BulkRequest, ClearQueueRequest, DeleteWorkerRequest, FailedRequest, JobActionRequest,
    QueueRequest, StatsRequest, WorkersRequest,
};

/// One HTTP call the app wants made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadStats(StatsRequest),
    LoadQueue(QueueRequest),
    ClearQueue(ClearQueueRequest),
    LoadFailed(FailedRequest),
    FailedJob(JobActionRequest),
    FailedBulk(BulkRequest),
    LoadWorkers(WorkersRequest),
    DeleteWorker(DeleteWorkerRequest),
}

/// Outcome of a [`Command`], paired with the request that produced it.
#[derive(Debug)]
pub enum Completion {
    Stats(StatsRequest, Result<Stats, ApiError>),
    Queue(QueueRequest, Result<QueuePage, ApiError>),
    QueueCleared(ClearQueueRequest, Result<(), ApiError>),
    Failed(FailedRequest, Result<FailedPage, ApiError>),
    FailedJob(JobActionRequest, Result<(), ApiError>),
    FailedBulk(BulkRequest, Result<(), ApiError>),
    Workers(WorkersRequest, Result<Vec<Worker>, ApiError>),
    WorkerDeleted(DeleteWorkerRequest, Result<(), ApiError>),
}
