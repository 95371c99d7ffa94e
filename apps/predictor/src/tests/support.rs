use std::sync::Mutex;

use async_trait::async_trait;
use client_core::PredictionService;
use serde_json::json;
use shared::{
    error::PredictionError,
    protocol::{PredictionRequest, PredictionResult},
};
use url::Url;

/// Answers every request with the same outcome and counts the calls.
pub struct FixedService {
    endpoint: Url,
    outcome: Result<PredictionResult, PredictionError>,
    calls: Mutex<usize>,
}

impl FixedService {
    pub fn ok() -> Self {
        Self::with_outcome(Ok(PredictionResult {
            model_version: "v1".into(),
            predicted_duration_minutes: 14.3,
            pickup_location: json!(230),
            dropoff_location: json!(100),
        }))
    }

    pub fn failing(err: PredictionError) -> Self {
        Self::with_outcome(Err(err))
    }

    fn with_outcome(outcome: Result<PredictionResult, PredictionError>) -> Self {
        Self {
            endpoint: Url::parse("http://localhost:8000/predict").expect("url"),
            outcome,
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().expect("calls lock")
    }
}

#[async_trait]
impl PredictionService for FixedService {
    async fn predict(
        &self,
        _request: &PredictionRequest,
    ) -> Result<PredictionResult, PredictionError> {
        *self.calls.lock().expect("calls lock") += 1;
        self.outcome.clone()
    }

    fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}
