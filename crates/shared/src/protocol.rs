use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ZoneId;

/// Body of `POST /predict`.
///
/// A field that did not parse as an integer is sent as `null`; the service
/// decides what to do with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(rename = "PULocationID")]
    pub pickup_location_id: Option<ZoneId>,
    #[serde(rename = "DOLocationID")]
    pub dropoff_location_id: Option<ZoneId>,
}

impl PredictionRequest {
    pub fn from_raw(pickup_id: &str, dropoff_id: &str) -> Self {
        Self {
            pickup_location_id: ZoneId::parse_lenient(pickup_id),
            dropoff_location_id: ZoneId::parse_lenient(dropoff_id),
        }
    }
}

/// Estimate returned by the prediction service, passed through as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub model_version: String,
    pub predicted_duration_minutes: f64,
    pub pickup_location: Value,
    pub dropoff_location: Value,
}

impl PredictionResult {
    pub fn pickup_label(&self) -> String {
        location_label(&self.pickup_location)
    }

    pub fn dropoff_label(&self) -> String {
        location_label(&self.dropoff_location)
    }
}

fn location_label(value: &Value) -> String {
    match value {
        Value::String(label) => label.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
