//! Plain-text rendering of the form. Reads controller state, never changes it.

use std::fmt::Write as _;

use client_core::{PredictionFormController, PredictionService, SubmissionState};
use shared::{
    domain::{ZoneId, ZONE_ID_MAX, ZONE_ID_MIN},
    protocol::PredictionResult,
};
use url::Url;

pub fn backend_hint(endpoint: &Url) -> String {
    format!(
        "Make sure your backend is running at {}",
        endpoint.origin().ascii_serialization()
    )
}

pub fn format_duration(minutes: f64) -> String {
    format!("{minutes:.1} min")
}

pub fn render<S: PredictionService>(controller: &PredictionFormController<S>) -> String {
    let mut out = String::new();
    let zone_hint = format!("NYC taxi zone ID ({ZONE_ID_MIN}-{ZONE_ID_MAX})");

    let _ = writeln!(out, "Pickup Location ID:  {}", field(controller.pickup_id()));
    let _ = writeln!(out, "  {}", zone_note(controller.pickup_id(), &zone_hint));
    let _ = writeln!(out, "Dropoff Location ID: {}", field(controller.dropoff_id()));
    let _ = writeln!(out, "  {}", zone_note(controller.dropoff_id(), &zone_hint));

    match controller.state() {
        SubmissionState::Idle => {}
        SubmissionState::Loading => {
            let _ = writeln!(out, "Predicting...");
        }
        SubmissionState::Failed(err) => {
            let _ = writeln!(out, "Error: {}", err.message());
            if err.suggests_backend_check() {
                let _ = writeln!(out, "  {}", backend_hint(controller.service().endpoint()));
            }
        }
        SubmissionState::Success(result) => render_result(&mut out, result),
    }

    let actions = if controller.is_loading() {
        "(waiting for prediction)"
    } else if controller.state().has_outcome() {
        "[submit] [reset]"
    } else {
        "[submit]"
    };
    let _ = writeln!(out, "{actions}");
    out
}

fn render_result(out: &mut String, result: &PredictionResult) {
    let _ = writeln!(out, "Prediction Results ({})", result.model_version);
    let _ = writeln!(
        out,
        "  Estimated Duration: {}",
        format_duration(result.predicted_duration_minutes)
    );
    let _ = writeln!(out, "  Pickup Zone:  {}", result.pickup_label());
    let _ = writeln!(out, "  Dropoff Zone: {}", result.dropoff_label());
}

// Out-of-range input is still submitted; this only warns.
fn zone_note(value: &str, zone_hint: &str) -> String {
    if value.is_empty() {
        return zone_hint.to_string();
    }
    match ZoneId::parse_lenient(value) {
        Some(id) if id.is_known_zone() => zone_hint.to_string(),
        Some(_) => format!("{zone_hint}; outside the known range, sent as-is"),
        None => format!("{zone_hint}; not a number, sent as null"),
    }
}

fn field(value: &str) -> &str {
    if value.is_empty() {
        "<empty>"
    } else {
        value
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
