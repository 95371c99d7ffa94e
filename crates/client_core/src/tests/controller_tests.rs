use super::*;
use std::{collections::VecDeque, sync::Arc};

use async_trait::async_trait;
use serde_json::json;
use shared::{domain::ZoneId, error::ErrorKind};
use tokio::sync::Mutex;
use url::Url;

struct ScriptedService {
    endpoint: Url,
    outcomes: Mutex<VecDeque<Result<PredictionResult, PredictionError>>>,
    calls: Arc<Mutex<Vec<PredictionRequest>>>,
}

impl ScriptedService {
    fn with_outcomes(outcomes: Vec<Result<PredictionResult, PredictionError>>) -> Self {
        Self {
            endpoint: Url::parse("http://localhost:8000/predict").expect("url"),
            outcomes: Mutex::new(outcomes.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    async fn calls(&self) -> Vec<PredictionRequest> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl PredictionService for ScriptedService {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, PredictionError> {
        self.calls.lock().await.push(request.clone());
        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(PredictionError::transport("no scripted outcome")))
    }

    fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn sample_result() -> PredictionResult {
    PredictionResult {
        model_version: "v1".into(),
        predicted_duration_minutes: 14.3,
        pickup_location: json!(230),
        dropoff_location: json!(100),
    }
}

fn filled(service: ScriptedService) -> PredictionFormController<ScriptedService> {
    let mut controller = PredictionFormController::new(service);
    controller.set_pickup_id("230");
    controller.set_dropoff_id("100");
    controller
}

#[test]
fn starts_idle_with_empty_fields() {
    let controller = PredictionFormController::new(ScriptedService::with_outcomes(vec![]));
    assert_eq!(controller.pickup_id(), "");
    assert_eq!(controller.dropoff_id(), "");
    assert_eq!(controller.state(), &SubmissionState::Idle);
    assert!(!controller.is_loading());
}

#[test]
fn setters_do_not_touch_submission_state() {
    let mut controller = PredictionFormController::new(ScriptedService::with_outcomes(vec![]));
    controller.set_pickup_id("");
    let _ = controller.begin_submit();
    assert_eq!(
        controller.state(),
        &SubmissionState::Failed(PredictionError::Validation)
    );

    controller.set_pickup_id("12");
    controller.set_dropoff_id("not a zone");
    assert_eq!(controller.pickup_id(), "12");
    assert_eq!(controller.dropoff_id(), "not a zone");
    assert_eq!(
        controller.state(),
        &SubmissionState::Failed(PredictionError::Validation)
    );
}

#[tokio::test]
async fn successful_prediction_is_stored_verbatim() {
    let mut controller = filled(ScriptedService::with_outcomes(vec![Ok(sample_result())]));

    let state = controller.submit().await.clone();

    let SubmissionState::Success(result) = state else {
        panic!("expected success, got {state:?}");
    };
    assert_eq!(result, sample_result());
    assert!((result.predicted_duration_minutes - 14.3).abs() < 1e-9);
    assert!(!controller.is_loading());

    let calls = controller.service().calls().await;
    assert_eq!(
        calls,
        vec![PredictionRequest {
            pickup_location_id: Some(ZoneId(230)),
            dropoff_location_id: Some(ZoneId(100)),
        }]
    );
}

#[tokio::test]
async fn missing_pickup_fails_validation_without_request() {
    let mut controller = PredictionFormController::new(ScriptedService::with_outcomes(vec![Ok(
        sample_result(),
    )]));
    controller.set_dropoff_id("100");

    let state = controller.submit().await.clone();

    assert_eq!(state, SubmissionState::Failed(PredictionError::Validation));
    assert_eq!(
        state.error().map(PredictionError::message).as_deref(),
        Some("Please enter both pickup and dropoff IDs")
    );
    assert!(controller.service().calls().await.is_empty());
}

#[tokio::test]
async fn missing_dropoff_fails_validation_without_request() {
    let mut controller = PredictionFormController::new(ScriptedService::with_outcomes(vec![]));
    controller.set_pickup_id("230");

    let rejected = controller.begin_submit();

    assert_eq!(rejected, Err(SubmitRejected::Invalid(PredictionError::Validation)));
    assert!(controller.service().calls().await.is_empty());
}

#[tokio::test]
async fn connection_error_ends_in_failed_state() {
    let mut controller = filled(ScriptedService::with_outcomes(vec![Err(
        PredictionError::transport("error sending request: connection refused"),
    )]));

    let state = controller.submit().await.clone();

    let err = state.error().expect("failed state");
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.message().contains("Error connecting to backend"));
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn service_failure_ends_with_generic_message() {
    let mut controller = filled(ScriptedService::with_outcomes(vec![Err(
        PredictionError::Service { status: 500 },
    )]));

    let state = controller.submit().await.clone();

    let err = state.error().expect("failed state");
    assert_eq!(err.message(), "Failed to get prediction");
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn new_submission_replaces_previous_outcome() {
    let mut controller = filled(ScriptedService::with_outcomes(vec![
        Err(PredictionError::Service { status: 502 }),
        Ok(sample_result()),
    ]));

    assert!(controller.submit().await.error().is_some());
    let state = controller.submit().await;

    assert!(state.error().is_none());
    assert_eq!(state.result(), Some(&sample_result()));
}

#[tokio::test]
async fn non_numeric_ids_are_still_submitted() {
    let mut controller = PredictionFormController::new(ScriptedService::with_outcomes(vec![Ok(
        sample_result(),
    )]));
    controller.set_pickup_id("downtown");
    controller.set_dropoff_id("100");

    controller.submit().await;

    let calls = controller.service().calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].pickup_location_id, None);
    assert_eq!(calls[0].dropoff_location_id, Some(ZoneId(100)));
}

#[tokio::test]
async fn reset_after_success_returns_to_idle() {
    let mut controller = filled(ScriptedService::with_outcomes(vec![Ok(sample_result())]));
    controller.submit().await;
    assert!(controller.state().result().is_some());

    controller.reset();

    assert_eq!(controller.state(), &SubmissionState::Idle);
    assert_eq!(controller.pickup_id(), "");
    assert_eq!(controller.dropoff_id(), "");
}

#[test]
fn reset_is_idempotent() {
    let mut controller = filled(ScriptedService::with_outcomes(vec![]));
    controller.reset();
    let once = (controller.input().clone(), controller.state().clone());
    controller.reset();
    let twice = (controller.input().clone(), controller.state().clone());

    assert_eq!(once, twice);
    assert_eq!(once.1, SubmissionState::Idle);
}

#[test]
fn begin_submit_enters_loading_and_clears_previous_outcome() {
    let mut controller = filled(ScriptedService::with_outcomes(vec![]));
    let first = controller.begin_submit().expect("pending");
    assert!(controller.complete_submit(first.generation, Ok(sample_result())));

    let second = controller.begin_submit().expect("pending");

    assert!(controller.is_loading());
    assert!(controller.state().result().is_none());
    assert!(controller.state().error().is_none());
    assert!(second.generation > first.generation);
}

#[test]
fn submit_while_loading_is_rejected() {
    let mut controller = filled(ScriptedService::with_outcomes(vec![]));
    let pending = controller.begin_submit().expect("pending");

    assert_eq!(controller.begin_submit(), Err(SubmitRejected::InFlight));
    assert!(controller.is_loading());
    assert_eq!(controller.generation(), pending.generation);
}

#[test]
fn outcome_after_reset_is_discarded() {
    let mut controller = filled(ScriptedService::with_outcomes(vec![]));
    let pending = controller.begin_submit().expect("pending");

    controller.reset();

    assert!(!controller.complete_submit(pending.generation, Ok(sample_result())));
    assert_eq!(controller.state(), &SubmissionState::Idle);
}

#[test]
fn stale_outcome_cannot_overwrite_newer_submission() {
    let mut controller = filled(ScriptedService::with_outcomes(vec![]));
    let stale = controller.begin_submit().expect("pending");
    controller.reset();
    controller.set_pickup_id("1");
    controller.set_dropoff_id("2");
    let fresh = controller.begin_submit().expect("pending");

    assert!(!controller.complete_submit(
        stale.generation,
        Err(PredictionError::Service { status: 500 })
    ));
    assert!(controller.is_loading());

    assert!(controller.complete_submit(fresh.generation, Ok(sample_result())));
    assert_eq!(controller.state().result(), Some(&sample_result()));
}

#[test]
fn completion_while_not_loading_is_ignored() {
    let mut controller = filled(ScriptedService::with_outcomes(vec![]));
    assert!(!controller.complete_submit(controller.generation(), Ok(sample_result())));
    assert_eq!(controller.state(), &SubmissionState::Idle);
}
