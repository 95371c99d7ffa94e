//! Client side of the taxi trip-duration predictor.

pub mod controller;
pub mod service;

pub use controller::{PendingSubmission, PredictionFormController, SubmissionState, SubmitRejected};
pub use service::{parse_endpoint, HttpPredictionService, PredictionService, DEFAULT_ENDPOINT};
