use super::handlers;
use super::types::{Action, AppState, Request};
use crate::ipc::error::err;

pub fn dispatch(state: &mut AppState, req: Request) -> Action {
    if let Some(action) = handlers::core::try_handle(state, &req) {
        return action;
    }
    if let Some(action) = handlers::capture::try_handle(state, &req) {
        return action;
    }
    if let Some(action) = handlers::export::try_handle(state, &req) {
        return action;
    }

    Action::Reply(err(
        &req.id,
        "not_implemented",
        format!("unknown method: {}", req.method),
        None,
    ))
}
