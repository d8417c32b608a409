mod error;
mod handlers;
mod router;
mod types;

pub use error::ok;
pub use router::dispatch;
pub use types::{Action, AppState, Job, Request};
