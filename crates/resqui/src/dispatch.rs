//! Runs app commands against the backend.

use resqui_api::ResqueClient;
use resqui_monitor::{Command, Completion};
use resqui_state::{BulkAction, JobAction};
use tokio::sync::mpsc;

/// Spawns one task per command and sends its completion back to the UI loop.
pub struct Dispatcher {
    client: ResqueClient,
    tx: mpsc::Sender<Completion>,
}

impl Dispatcher {
    pub fn new(client: ResqueClient, tx: mpsc::Sender<Completion>) -> Self {
        Self { client, tx }
    }

    pub fn dispatch(&self, command: Command) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let completion = execute(&client, command).await;
            if tx.send(completion).await.is_err() {
                tracing::debug!("UI loop gone; dropping completion");
            }
        });
    }
}

/// Perform one command and pair the outcome with its request.
pub async fn execute(client: &ResqueClient, command: Command) -> Completion {
    match command {
        Command::LoadStats(req) => Completion::Stats(req, client.stats().await),
        Command::LoadQueue(req) => {
            let result = client.queue_page(&req.queue, req.first_job).await;
            Completion::Queue(req, result)
        }
        Command::ClearQueue(req) => {
            let result = client.clear_queue(&req.queue).await;
            Completion::QueueCleared(req, result)
        }
        Command::LoadFailed(req) => {
            Completion::Failed(req, client.failed_page(req.from_job).await)
        }
        Command::FailedJob(req) => {
            let result = match req.action {
                JobAction::Delete => client.delete_failed_job(&req.job_id).await,
                JobAction::Retry => client.retry_failed_job(&req.job_id).await,
            };
            Completion::FailedJob(req, result)
        }
        Command::FailedBulk(req) => {
            let result = match req.action {
                BulkAction::ClearAll => client.clear_failed().await,
                BulkAction::RetryAll => client.retry_all().await,
            };
            Completion::FailedBulk(req, result)
        }
        Command::LoadWorkers(req) => Completion::Workers(req, client.active_workers().await),
        Command::DeleteWorker(req) => {
            let result = client.delete_worker(&req.worker_id).await;
            Completion::WorkerDeleted(req, result)
        }
    }
}
