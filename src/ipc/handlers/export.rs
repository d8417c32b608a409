use crate::ipc::error::{err, ok};
use crate::ipc::types::{Action, AppState, Request};
use serde_json::json;

/// Full-dataset export. State-independent: works whether or not a capture
/// session is running. The daemon never fetches the export itself; it hands
/// the shell the URL to navigate to.
fn handle_download(state: &mut AppState, req: &Request) -> Action {
    let Some(store) = state.store.as_ref() else {
        return Action::Reply(err(
            &req.id,
            "store_not_configured",
            "call store.select before exporting",
            None,
        ));
    };

    let url = store.export_url();
    tracing::info!(url = %url, "export requested");
    Action::Reply(ok(
        &req.id,
        json!({
            "navigate": url,
            "status": state.session.status("Preparing marks export...", false),
        }),
    ))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Action> {
    match req.method.as_str() {
        "export.download" => Some(handle_download(state, req)),
        _ => None,
    }
}
