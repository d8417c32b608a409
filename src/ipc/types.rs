use serde::Deserialize;

use crate::parse::MarkEntry;
use crate::session::Session;
use crate::store::StoreClient;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub session: Session,
    pub store: Option<StoreClient>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: Session::new(),
            store: None,
        }
    }
}

/// A store call that runs off the dispatch loop. The loop spawns a worker
/// per job and keeps serving events while the call is in flight; nothing
/// serializes overlapping jobs.
#[derive(Debug, Clone)]
pub enum Job {
    Submit(MarkEntry),
    Refresh,
}

/// What the router hands back: either a response to write now, or a job to
/// run on a worker thread, answered under the same request id when the
/// store call completes.
pub enum Action {
    Reply(serde_json::Value),
    Spawn {
        id: String,
        store: StoreClient,
        job: Job,
    },
}
