use crate::ipc::error::{err, ok};
use crate::ipc::types::{Action, AppState, Request};
use crate::store::StoreClient;
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> Action {
    Action::Reply(ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "storeUrl": state.store.as_ref().map(|s| s.base_url().to_string())
        }),
    ))
}

/// Point the daemon at the scoring store. Must happen before any method
/// that reaches the network.
fn handle_store_select(state: &mut AppState, req: &Request) -> Action {
    let Some(base_url) = req.params.get("baseUrl").and_then(|v| v.as_str()) else {
        return Action::Reply(err(&req.id, "bad_params", "missing params.baseUrl", None));
    };

    match StoreClient::new(base_url) {
        Ok(client) => {
            tracing::info!(store = %client.base_url(), "scoring store selected");
            let url = client.base_url().to_string();
            state.store = Some(client);
            Action::Reply(ok(&req.id, json!({ "storeUrl": url })))
        }
        Err(e) => Action::Reply(err(
            &req.id,
            "bad_params",
            format!("{e:#}"),
            Some(json!({ "baseUrl": base_url })),
        )),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Action> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "store.select" => Some(handle_store_select(state, req)),
        _ => None,
    }
}
