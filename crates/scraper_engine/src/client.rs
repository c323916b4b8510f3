use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use scraper_core::{SearchRequest, TaskHandle, TaskObservation, TaskStatus};
use scraper_logging::{scraper_debug, scraper_info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::{ClientError, FailureKind};

pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";

const SUBMIT_PATH: &str = "scrape-google-images";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Base endpoint of the scraping service. A path prefix is preserved.
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ClientSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The three operations of the remote scraping service.
#[async_trait::async_trait]
pub trait TaskClient: Send + Sync {
    /// Submits a search job. Never retried.
    async fn submit(&self, request: &SearchRequest) -> Result<TaskHandle, ClientError>;

    /// Fetches one status snapshot. Idempotent.
    async fn fetch_status(&self, handle: &TaskHandle) -> Result<TaskObservation, ClientError>;

    /// Where the finished archive can be fetched from. No network access.
    fn download_reference(&self, handle: &TaskHandle) -> Url;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitBody<'a> {
    search: &'a str,
    num_of_images: u32,
    color: &'a str,
    size: &'a str,
    #[serde(rename = "type")]
    image_type: &'a str,
    time: &'a str,
    user_rights: &'a str,
}

impl<'a> From<&'a SearchRequest> for SubmitBody<'a> {
    fn from(request: &'a SearchRequest) -> Self {
        let filters = request.filters();
        Self {
            search: request.query(),
            num_of_images: request.image_count(),
            color: &filters.color,
            size: &filters.size,
            image_type: &filters.image_type,
            time: &filters.time,
            user_rights: &filters.user_rights,
        }
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitData {
    task_id: Value,
}

#[derive(Deserialize)]
struct StatusData {
    status: Option<String>,
    msg: Option<Value>,
    progress: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct ReqwestTaskClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ReqwestTaskClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        if settings.base_url.cannot_be_a_base() {
            return Err(ClientError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be used as a base url", settings.base_url),
            ));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            http,
            base_url: settings.base_url,
        })
    }

    /// Opens the archive download stream; the body is read by the caller.
    pub async fn open_download(&self, handle: &TaskHandle) -> Result<reqwest::Response, ClientError> {
        let url = self.download_reference(handle);
        scraper_debug!("GET {}", url);
        let response = self.http.get(url).send().await.map_err(map_reqwest_error)?;
        ensure_success(response)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        // Checked in `new`: the base url always has path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait::async_trait]
impl TaskClient for ReqwestTaskClient {
    async fn submit(&self, request: &SearchRequest) -> Result<TaskHandle, ClientError> {
        let url = self.endpoint(&[SUBMIT_PATH]);
        let body = serde_json::to_vec(&SubmitBody::from(request))
            .map_err(|err| ClientError::new(FailureKind::InvalidRequest, err.to_string()))?;

        scraper_info!(
            "Submitting search query_len={} images={} to {}",
            request.query().len(),
            request.image_count(),
            url
        );
        let response = self
            .http
            .post(url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = ensure_success(response)?;
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        let envelope: Envelope<SubmitData> = serde_json::from_slice(&bytes)
            .map_err(|err| ClientError::new(FailureKind::MalformedResponse, err.to_string()))?;
        let task_id = match envelope.data.task_id {
            Value::String(id) => id,
            Value::Number(id) => id.to_string(),
            other => {
                return Err(ClientError::new(
                    FailureKind::MalformedResponse,
                    format!("taskId is not a string or number: {other}"),
                ))
            }
        };
        if task_id.trim().is_empty() {
            return Err(ClientError::new(FailureKind::EmptyTaskId, "taskId is empty"));
        }

        scraper_info!("Search accepted task_id={}", task_id);
        Ok(TaskHandle::new(task_id))
    }

    async fn fetch_status(&self, handle: &TaskHandle) -> Result<TaskObservation, ClientError> {
        let url = self.endpoint(&handle.status_segments());
        scraper_debug!("GET {}", url);
        let response = self.http.get(url).send().await.map_err(map_reqwest_error)?;
        let response = ensure_success(response)?;
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        let envelope: Envelope<StatusData> = serde_json::from_slice(&bytes)
            .map_err(|err| ClientError::new(FailureKind::MalformedResponse, err.to_string()))?;
        let data = envelope.data;
        let status = TaskStatus::from_wire(data.status.as_deref().unwrap_or_default());
        Ok(TaskObservation::new(
            status,
            text_field(data.msg),
            text_field(data.progress),
        ))
    }

    fn download_reference(&self, handle: &TaskHandle) -> Url {
        self.endpoint(&handle.download_segments())
    }
}

fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ClientError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ))
    }
}

/// `msg` and `progress` are opaque text; numbers are rendered, null is empty.
fn text_field(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return ClientError::new(FailureKind::InvalidUrl, err.to_string());
    }
    ClientError::new(FailureKind::Network, err.to_string())
}
