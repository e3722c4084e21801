// HTTP implementation of the ReportTransport port
//
// Error mapping contract:
// - 401 invalidates the credential store and maps to Unauthorized
// - 403 maps to Forbidden
// - other non-success statuses map to Status with the response body
// - connection/timeout failures map to Network
// - undecodable bodies map to Malformed

use crate::endpoints;
use async_trait::async_trait;
use scholaris_core::domain::{ReportSummary, StatusDto};
use scholaris_core::error::TransportError;
use scholaris_core::port::{CredentialProvider, ReportTransport, SubmitAck, SubmitRequest};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

pub struct HttpReportTransport {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpReportTransport {
    pub fn new(
        config: HttpTransportConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.credentials.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send the request and map the response status to the transport
    /// error taxonomy.
    async fn dispatch(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<reqwest::Response, TransportError> {
        debug!(path = %path, "Dispatching report service request");

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            warn!(path = %path, "Authentication failed, invalidating credentials");
            self.credentials.invalidate();
            return Err(TransportError::Unauthorized);
        }
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(TransportError::Forbidden);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TransportError> {
        response
            .json::<T>()
            .await
            .map_err(|e| TransportError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl ReportTransport for HttpReportTransport {
    async fn submit_report(&self, request: &SubmitRequest) -> Result<SubmitAck, TransportError> {
        let path = endpoints::GENERATE_REPORT;
        let response = self
            .dispatch(self.http.post(self.url(path)).json(request), path)
            .await?;
        Self::decode(response).await
    }

    async fn report_status(&self, job_id: &str) -> Result<StatusDto, TransportError> {
        let path = endpoints::report_status(job_id);
        let response = self.dispatch(self.http.get(self.url(&path)), &path).await?;
        Self::decode(response).await
    }

    async fn list_reports(&self) -> Result<Vec<ReportSummary>, TransportError> {
        let path = endpoints::REPORTS;
        let response = self.dispatch(self.http.get(self.url(path)), path).await?;
        Self::decode(response).await
    }

    async fn fetch_report(&self, job_id: &str) -> Result<serde_json::Value, TransportError> {
        let path = endpoints::download_report(job_id);
        let response = self.dispatch(self.http.get(self.url(&path)), &path).await?;
        Self::decode(response).await
    }
}
