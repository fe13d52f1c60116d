//! Typed client for the dashboard REST endpoints.

use crate::config::ClientConfig;
use crate::error::ApiError;
use reqwest::{Method, RequestBuilder, Response, Url};
use resqui_core::{FailedPage, QueuePage, Stats, Worker, WorkerList};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Request body for single failed-job actions.
#[derive(Debug, Serialize)]
struct JobIdBody<'a> {
    id: &'a str,
}

/// HTTP client for one dashboard backend.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ResqueClient {
    http: reqwest::Client,
    base: Url,
}

impl ResqueClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let base = Url::parse(&config.base_url).map_err(|e| ApiError::Url {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiError::Url {
                url: config.base_url.clone(),
                reason: "not a hierarchical URL".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|source| ApiError::Transport {
                path: String::new(),
                source,
            })?;

        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `GET /api/stats`
    pub async fn stats(&self) -> Result<Stats, ApiError> {
        self.get_json(self.endpoint(&["stats"])).await
    }

    /// `GET /api/queue/{name}?first_job={offset}`
    pub async fn queue_page(&self, queue: &str, first_job: u64) -> Result<QueuePage, ApiError> {
        let mut url = self.endpoint(&["queue", queue]);
        url.query_pairs_mut()
            .append_pair("first_job", &first_job.to_string());
        self.get_json(url).await
    }

    /// `DELETE /api/queue/{name}`
    pub async fn clear_queue(&self, queue: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["queue", queue]);
        self.send(Method::DELETE, url, None).await
    }

    /// `GET /api/failed?from_job={offset}`
    pub async fn failed_page(&self, from_job: u64) -> Result<FailedPage, ApiError> {
        let mut url = self.endpoint(&["failed"]);
        url.query_pairs_mut()
            .append_pair("from_job", &from_job.to_string());
        self.get_json(url).await
    }

    /// `DELETE /api/failed`
    pub async fn clear_failed(&self) -> Result<(), ApiError> {
        self.send(Method::DELETE, self.endpoint(&["failed"]), None)
            .await
    }

    /// `DELETE /api/failed_job` with `{id}`
    pub async fn delete_failed_job(&self, job_id: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, self.endpoint(&["failed_job"]), Some(job_id))
            .await
    }

    /// `POST /api/retry_job` with `{id}`
    pub async fn retry_failed_job(&self, job_id: &str) -> Result<(), ApiError> {
        self.send(Method::POST, self.endpoint(&["retry_job"]), Some(job_id))
            .await
    }

    /// `POST /api/retry_all`
    pub async fn retry_all(&self) -> Result<(), ApiError> {
        self.send(Method::POST, self.endpoint(&["retry_all"]), None)
            .await
    }

    /// `GET /api/active_workers`
    pub async fn active_workers(&self) -> Result<Vec<Worker>, ApiError> {
        let list: WorkerList = self.get_json(self.endpoint(&["active_workers"])).await?;
        Ok(list.data)
    }

    /// `DELETE /api/worker/{id}`, with the id percent-encoded as one segment.
    pub async fn delete_worker(&self, worker_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["worker", worker_id]);
        self.send(Method::DELETE, url, None).await
    }

    /// Resolve `api/<segments...>` under the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Infallible: `new` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let path = url.path().to_string();
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| transport(&path, source))?;
        let body = check_status(response, &path)?
            .text()
            .await
            .map_err(|source| transport(&path, source))?;

        serde_json::from_str(&body).map_err(|source| ApiError::Decode { path, source })
    }

    async fn send(&self, method: Method, url: Url, job_id: Option<&str>) -> Result<(), ApiError> {
        let path = url.path().to_string();
        tracing::debug!("{} {}", method, url);

        let mut request: RequestBuilder = self.http.request(method, url);
        if let Some(id) = job_id {
            request = request.json(&JobIdBody { id });
        }

        let response = request
            .send()
            .await
            .map_err(|source| transport(&path, source))?;
        check_status(response, &path)?;
        Ok(())
    }
}

fn transport(path: &str, source: reqwest::Error) -> ApiError {
    ApiError::Transport {
        path: path.to_string(),
        source,
    }
}

fn check_status(response: Response, path: &str) -> Result<Response, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::status(status.as_u16(), path));
    }
    Ok(response)
}
