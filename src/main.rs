mod ipc;
mod parse;
mod session;
mod store;
mod table;

use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use serde_json::json;

use ipc::{Action, AppState, Job};
use store::StoreError;
use table::{render_rows, MarksDataset};

/// Everything the dispatch loop reacts to. Lines come from the stdin reader
/// thread, job completions from pipeline workers; FIFO per source, no
/// ordering across sources.
enum Event {
    Line(String),
    Eof,
    JobDone {
        id: String,
        job: Job,
        result: Result<MarksDataset, StoreError>,
    },
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout is the protocol stream; all diagnostics go to stderr.
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn write_line(out: &mut impl Write, value: &serde_json::Value) {
    let _ = writeln!(
        out,
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{\"ok\":false}".to_string())
    );
    let _ = out.flush();
}

/// Finish a pipeline: render the replacement row set from the store's
/// response, or collapse the failure into one status message. The status
/// state reflects the session phase at completion time, not submission time.
fn complete_job(
    state: &AppState,
    id: &str,
    job: &Job,
    result: Result<MarksDataset, StoreError>,
) -> serde_json::Value {
    match result {
        Ok(dataset) => {
            let rows = render_rows(&dataset);
            let message = match job {
                Job::Submit(entry) => format!(
                    "Recorded: Roll {}, Q{}: {} marks",
                    entry.roll_number, entry.question, entry.marks
                ),
                Job::Refresh => format!("Loaded marks for {} students", rows.len()),
            };
            ipc::ok(
                id,
                json!({
                    "status": state.session.status(message, false),
                    "rows": rows,
                }),
            )
        }
        Err(e) => {
            let verb = match job {
                Job::Submit(_) => "updating",
                Job::Refresh => "fetching",
            };
            tracing::warn!(id = %id, error = %e, "store call failed");
            ipc::ok(
                id,
                json!({
                    "status": state
                        .session
                        .status(format!("Error {verb} marks: {e}"), true),
                }),
            )
        }
    }
}

fn main() {
    init_tracing();

    let (tx, rx) = mpsc::channel::<Event>();

    let stdin_tx = tx.clone();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(v) => v,
                Err(_) => break,
            };
            if stdin_tx.send(Event::Line(line)).is_err() {
                return;
            }
        }
        let _ = stdin_tx.send(Event::Eof);
    });

    let mut state = AppState::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    while let Ok(event) = rx.recv() {
        match event {
            Event::Eof => break,
            Event::Line(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let req: ipc::Request = match serde_json::from_str(&line) {
                    Ok(v) => v,
                    Err(e) => {
                        // Can't correlate without an id; report and move on.
                        let resp = json!({
                            "ok": false,
                            "error": { "code": "bad_json", "message": e.to_string() },
                        });
                        write_line(&mut out, &resp);
                        continue;
                    }
                };

                match ipc::dispatch(&mut state, req) {
                    Action::Reply(resp) => write_line(&mut out, &resp),
                    Action::Spawn { id, store, job } => {
                        // The loop keeps serving events while the store call
                        // runs; overlapping jobs are allowed and whichever
                        // response lands last owns the displayed table.
                        let done_tx = tx.clone();
                        thread::spawn(move || {
                            let result = match &job {
                                Job::Submit(entry) => store.submit(entry),
                                Job::Refresh => store.fetch(),
                            };
                            let _ = done_tx.send(Event::JobDone { id, job, result });
                        });
                    }
                }
            }
            Event::JobDone { id, job, result } => {
                let resp = complete_job(&state, &id, &job, result);
                write_line(&mut out, &resp);
            }
        }
    }
}
