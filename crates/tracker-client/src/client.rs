//! Typed HTTP client for the tracker backend.

use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::error::{ClientError, Result};
use crate::types::{
    DetailEnvelope, ErrorBody, GenerateRequest, GeneratedPixel, HealthStatus, PurgeSummary,
    TrackingOverview, TrackingRecord,
};

pub const GENERATE_PIXEL_PATH: &str = "/api/pixel/generate";
pub const TRACKING_PATH: &str = "/api/tracking";
pub const TRACKING_ALL_PATH: &str = "/api/tracking/all";

#[derive(Clone)]
pub struct TrackerClient {
    http: reqwest::Client,
    base_url: String,
}

impl TrackerClient {
    /// `base_url` is the backend root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path returned by the backend (`/pixel/<id>.png`).
    pub fn pixel_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self.http.get(self.url("/health")).send().await?;
        decode(response).await
    }

    #[instrument(skip(self))]
    pub async fn generate_pixel(&self, subject: &str, recipient: &str) -> Result<GeneratedPixel> {
        let response = self
            .http
            .post(self.url(GENERATE_PIXEL_PATH))
            .json(&GenerateRequest { subject, recipient })
            .send()
            .await?;
        let pixel: GeneratedPixel = decode(response).await?;
        debug!(tracking_id = %pixel.tracking_id, "Tracking pixel generated");
        Ok(pixel)
    }

    #[instrument(skip(self))]
    pub async fn get_tracking(&self, tracking_id: &str) -> Result<TrackingRecord> {
        let response = self
            .http
            .get(self.url(&format!("{}/{}", TRACKING_PATH, tracking_id)))
            .send()
            .await?;
        let envelope: DetailEnvelope = decode(response).await?;
        Ok(envelope.data)
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<TrackingOverview> {
        let response = self.http.get(self.url(TRACKING_ALL_PATH)).send().await?;
        decode(response).await
    }

    #[instrument(skip(self))]
    pub async fn delete_tracking(&self, tracking_id: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.url(&format!("{}/{}", TRACKING_PATH, tracking_id)))
            .send()
            .await?;
        check_status(response).await.map(|_| ())
    }

    #[instrument(skip(self))]
    pub async fn remove_self_opens(&self, tracking_id: &str) -> Result<PurgeSummary> {
        let response = self
            .http
            .post(self.url(&format!(
                "{}/{}/remove-self-opens",
                TRACKING_PATH, tracking_id
            )))
            .send()
            .await?;
        decode(response).await
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    };
    warn!(status = status.as_u16(), error = %message, "Tracker backend request failed");
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check_status(response).await?;
    Ok(response.json::<T>().await?)
}
