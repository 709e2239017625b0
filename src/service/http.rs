//! reqwest-backed status service.
//!
//! `GET {base_url}/sites/{subject}/{resource}` returns the status payload and
//! `POST {base_url}/sites/{subject}/{resource}/enqueue` starts the job.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::StatusService;
use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::status::{StatusObject, SubjectId};

/// Body returned by the enqueue endpoint.
#[derive(Debug, Deserialize)]
struct TriggerResponse {
    success: bool,
}

/// HTTP client for one subject kind.
pub struct HttpStatusService<S> {
    http: reqwest::Client,
    base_url: String,
    resource: String,
    token: Option<String>,
    _status: PhantomData<fn() -> S>,
}

impl<S> HttpStatusService<S> {
    /// Build a service for `resource` (for example `scan` or `backup/42`).
    pub fn new(config: &ServiceConfig, resource: impl Into<String>) -> Self {
        Self {
            http: build_http_client(Duration::from_secs(config.timeout_secs)),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            resource: resource.into().trim_matches('/').to_string(),
            token: config
                .api_token
                .as_deref()
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string),
            _status: PhantomData,
        }
    }

    fn status_url(&self, subject: &SubjectId) -> String {
        format!("{}/sites/{}/{}", self.base_url, subject, self.resource)
    }

    fn trigger_url(&self, subject: &SubjectId) -> String {
        format!("{}/enqueue", self.status_url(subject))
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.as_deref() {
            Some(token) => req.header("Authorization", format!("Bearer {token}")),
            None => req,
        }
    }
}

/// Build an HTTP client with timeout applied.
fn build_http_client(timeout: Duration) -> reqwest::Client {
    // Fall back to reqwest defaults if builder creation fails for any reason.
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ServiceError> {
    if !response.status().is_success() {
        let code = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(ServiceError::Status { code, body });
    }
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ServiceError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl<S> StatusService<S> for HttpStatusService<S>
where
    S: StatusObject + DeserializeOwned,
{
    async fn fetch(&self, subject: &SubjectId) -> Result<S, ServiceError> {
        let url = self.status_url(subject);
        tracing::debug!(%url, "fetching status");
        let response = self.authorize(self.http.get(&url)).send().await?;
        read_json(response).await
    }

    async fn trigger(&self, subject: &SubjectId) -> Result<bool, ServiceError> {
        let url = self.trigger_url(subject);
        tracing::debug!(%url, "triggering job");
        let response = self.authorize(self.http.post(&url)).send().await?;
        let body: TriggerResponse = read_json(response).await?;
        Ok(body.success)
    }
}
