//! JSON rendering of orchestrator events, one object per stdout line.

use serde_json::{Value, json};
use vocab_atom::{Event, Phase};

pub fn render_event(event: &Event) -> Value {
    match event {
        Event::Preparing => json!({ "event": "preparing" }),
        Event::PrepareSucceeded => json!({ "event": "prepare_succeeded" }),
        Event::PrepareFailed { error_code, error } => json!({
            "event": "prepare_failed",
            "error_code": error_code.as_str(),
            "error": error.to_string(),
        }),
        Event::Fetching => json!({ "event": "fetching" }),
        Event::FetchSucceeded {
            vocabulary_list,
            no_more,
        } => json!({
            "event": "fetch_succeeded",
            "no_more": no_more,
            "vocabulary_list": vocabulary_list,
        }),
        Event::FetchFailed { error_code, error } => json!({
            "event": "fetch_failed",
            "error_code": error_code.as_str(),
            "error": error.to_string(),
        }),
    }
}

pub fn render_phase(phase: Phase) -> Value {
    let name = match phase {
        Phase::Idle => "idle",
        Phase::Preparing => "preparing",
        Phase::Ready => "ready",
        Phase::Fetching => "fetching",
    };
    json!({ "phase": name })
}
