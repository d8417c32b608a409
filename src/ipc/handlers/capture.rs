use crate::ipc::error::{err, ok};
use crate::ipc::types::{Action, AppState, Job, Request};
use crate::parse::{parse_utterance, ParseOutcome};
use crate::session::Transition;
use serde_json::json;

fn transition_result(t: &Transition) -> serde_json::Value {
    json!({
        "status": t.status,
        "controls": { "start": t.start_enabled, "stop": t.stop_enabled },
        "inert": t.inert,
    })
}

/// One-time device report from the shell. An unavailable device is reported
/// here once; start/stop stay inert afterwards.
fn handle_capture_init(state: &mut AppState, req: &Request) -> Action {
    let Some(available) = req.params.get("available").and_then(|v| v.as_bool()) else {
        return Action::Reply(err(&req.id, "bad_params", "missing params.available", None));
    };

    if !available {
        let detail = req.params.get("error").and_then(|v| v.as_str());
        tracing::warn!(detail = detail.unwrap_or("none"), "capture device unavailable");
    }

    let t = state.session.init_capture(available);
    Action::Reply(ok(&req.id, transition_result(&t)))
}

fn handle_start(state: &mut AppState, req: &Request) -> Action {
    let t = state.session.start();
    Action::Reply(ok(&req.id, transition_result(&t)))
}

fn handle_stop(state: &mut AppState, req: &Request) -> Action {
    let t = state.session.stop();
    Action::Reply(ok(&req.id, transition_result(&t)))
}

/// Entry point of the utterance pipeline. Parse failures answer right away;
/// a successful parse becomes a submit job and the response waits for the
/// store. Interim results are acknowledged and dropped.
fn handle_speech_result(state: &mut AppState, req: &Request) -> Action {
    let Some(transcript) = req.params.get("transcript").and_then(|v| v.as_str()) else {
        return Action::Reply(err(&req.id, "bad_params", "missing params.transcript", None));
    };
    let is_final = req
        .params
        .get("isFinal")
        .and_then(|v| v.as_bool())
        .unwrap_or(true);

    if !is_final {
        return Action::Reply(ok(&req.id, json!({ "ignored": true })));
    }
    if !state.session.is_listening() {
        return Action::Reply(err(
            &req.id,
            "not_listening",
            "no capture session is active",
            None,
        ));
    }

    let utterance = transcript.to_lowercase();
    match parse_utterance(&utterance) {
        ParseOutcome::Entry(entry) => {
            let Some(store) = state.store.clone() else {
                return Action::Reply(err(
                    &req.id,
                    "store_not_configured",
                    "call store.select before submitting marks",
                    None,
                ));
            };
            tracing::info!(
                roll = %entry.roll_number,
                question = entry.question,
                marks = entry.marks,
                "parsed utterance"
            );
            Action::Spawn {
                id: req.id.clone(),
                store,
                job: Job::Submit(entry),
            }
        }
        ParseOutcome::InvalidMarks { raw } => {
            tracing::debug!(raw = %raw, "score out of range");
            Action::Reply(ok(
                &req.id,
                json!({
                    "accepted": false,
                    "status": state
                        .session
                        .status("Invalid marks. Marks should be between 0 and 10.", true),
                }),
            ))
        }
        ParseOutcome::Unrecognized => Action::Reply(ok(
            &req.id,
            json!({
                "accepted": false,
                "status": state.session.status(
                    "Could not understand input. Please use format: \"Roll number X question Y Z marks\"",
                    true,
                ),
            }),
        )),
    }
}

/// Runtime device fault. Reported and nothing else; the session phase is
/// left alone since the device may keep delivering results.
fn handle_speech_error(state: &mut AppState, req: &Request) -> Action {
    let detail = req
        .params
        .get("error")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown");
    tracing::warn!(detail = %detail, "capture device error");
    Action::Reply(ok(
        &req.id,
        json!({
            "status": state.session.status(format!("Error: {detail}"), true),
        }),
    ))
}

/// Read-only dataset refresh so the shell can fill the table on load.
fn handle_refresh(state: &mut AppState, req: &Request) -> Action {
    let Some(store) = state.store.clone() else {
        return Action::Reply(err(
            &req.id,
            "store_not_configured",
            "call store.select before fetching marks",
            None,
        ));
    };
    Action::Spawn {
        id: req.id.clone(),
        store,
        job: Job::Refresh,
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Action> {
    match req.method.as_str() {
        "capture.init" => Some(handle_capture_init(state, req)),
        "session.start" => Some(handle_start(state, req)),
        "session.stop" => Some(handle_stop(state, req)),
        "speech.result" => Some(handle_speech_result(state, req)),
        "speech.error" => Some(handle_speech_error(state, req)),
        "marks.refresh" => Some(handle_refresh(state, req)),
        _ => None,
    }
}
