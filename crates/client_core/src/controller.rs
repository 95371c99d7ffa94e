//! Form state machine: input, submission, loading, outcome and reset.

use shared::{
    domain::FormInput,
    error::PredictionError,
    protocol::{PredictionRequest, PredictionResult},
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::service::PredictionService;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Loading,
    Success(PredictionResult),
    Failed(PredictionError),
}

impl SubmissionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            Self::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&PredictionError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// A result or an error is on screen, so offering reset makes sense.
    pub fn has_outcome(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitRejected {
    #[error("a prediction request is already in flight")]
    InFlight,
    #[error(transparent)]
    Invalid(PredictionError),
}

/// A submission that has entered `Loading` and is waiting for its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub generation: u64,
    pub request: PredictionRequest,
}

pub struct PredictionFormController<S> {
    service: S,
    input: FormInput,
    state: SubmissionState,
    generation: u64,
}

impl<S> PredictionFormController<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            input: FormInput::default(),
            state: SubmissionState::Idle,
            generation: 0,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    pub fn pickup_id(&self) -> &str {
        &self.input.pickup_id
    }

    pub fn dropoff_id(&self) -> &str {
        &self.input.dropoff_id
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_pickup_id(&mut self, value: impl Into<String>) {
        self.input.pickup_id = value.into();
    }

    pub fn set_dropoff_id(&mut self, value: impl Into<String>) {
        self.input.dropoff_id = value.into();
    }

    /// Validates the form and moves to `Loading`.
    ///
    /// A validation failure is recorded as `Failed` and also returned. While a
    /// submission is already loading the call is rejected and nothing changes.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitRejected> {
        if self.state.is_loading() {
            warn!(
                generation = self.generation,
                "submit ignored while a prediction is in flight"
            );
            return Err(SubmitRejected::InFlight);
        }

        if !self.input.is_complete() {
            debug!(
                pickup_id = %self.input.pickup_id,
                dropoff_id = %self.input.dropoff_id,
                "submit rejected: missing zone id"
            );
            self.state = SubmissionState::Failed(PredictionError::Validation);
            return Err(SubmitRejected::Invalid(PredictionError::Validation));
        }

        self.generation += 1;
        self.state = SubmissionState::Loading;
        let request = PredictionRequest::from_raw(&self.input.pickup_id, &self.input.dropoff_id);
        info!(
            generation = self.generation,
            pickup_id = %self.input.pickup_id,
            dropoff_id = %self.input.dropoff_id,
            "prediction submitted"
        );

        Ok(PendingSubmission {
            generation: self.generation,
            request,
        })
    }

    /// Applies the outcome of the submission tagged `generation`.
    ///
    /// Returns `false` and leaves state untouched when the submission was
    /// superseded by a reset or a newer submit.
    pub fn complete_submit(
        &mut self,
        generation: u64,
        outcome: Result<PredictionResult, PredictionError>,
    ) -> bool {
        if generation != self.generation || !self.state.is_loading() {
            debug!(
                generation,
                current = self.generation,
                "discarding stale prediction outcome"
            );
            return false;
        }

        self.state = match outcome {
            Ok(result) => {
                info!(
                    generation,
                    model_version = %result.model_version,
                    minutes = result.predicted_duration_minutes,
                    "prediction received"
                );
                SubmissionState::Success(result)
            }
            Err(err) => {
                warn!(generation, kind = ?err.kind(), error = %err, "prediction failed");
                SubmissionState::Failed(err)
            }
        };
        true
    }

    /// Clears both fields and returns to `Idle`.
    ///
    /// An in-flight request keeps running but its outcome will be discarded.
    pub fn reset(&mut self) {
        if self.state.is_loading() {
            info!(
                generation = self.generation,
                "reset abandons in-flight prediction"
            );
        }
        self.generation += 1;
        self.input.clear();
        self.state = SubmissionState::Idle;
    }
}

impl<S: PredictionService> PredictionFormController<S> {
    /// Runs one full submission against the owned service.
    pub async fn submit(&mut self) -> &SubmissionState {
        let pending = match self.begin_submit() {
            Ok(pending) => pending,
            Err(_) => return &self.state,
        };

        let outcome = self.service.predict(&pending.request).await;
        self.complete_submit(pending.generation, outcome);
        &self.state
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
