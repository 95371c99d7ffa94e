//! Transport to the external prediction endpoint.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::PredictionError,
    protocol::{PredictionRequest, PredictionResult},
};
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/predict";

#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Issues exactly one request. Implementations must not retry.
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, PredictionError>;

    fn endpoint(&self) -> &Url;
}

pub fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid endpoint url '{raw}'"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(anyhow!(
            "endpoint must start with http:// or https:// (got scheme '{other}')"
        )),
    }
}

pub struct HttpPredictionService {
    http: Client,
    endpoint: Url,
}

impl HttpPredictionService {
    /// `timeout` bounds the whole exchange; `None` leaves reqwest's default
    /// of waiting indefinitely.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = parse_endpoint(endpoint)?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("failed to build prediction http client")?;
        Ok(Self { http, endpoint })
    }
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, PredictionError> {
        debug!(endpoint = %self.endpoint, ?request, "posting prediction request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|err| {
                warn!(endpoint = %self.endpoint, error = %err, "prediction request failed in transport");
                PredictionError::transport(err.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %self.endpoint, status = status.as_u16(), "prediction service returned failure status");
            return Err(PredictionError::Service {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| PredictionError::transport(err.to_string()))?;
        serde_json::from_slice::<PredictionResult>(&body).map_err(|err| {
            warn!(endpoint = %self.endpoint, error = %err, "prediction response body did not parse");
            PredictionError::decode(err.to_string())
        })
    }

    fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
