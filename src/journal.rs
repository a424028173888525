//! JSON-line session journal.
//!
//! Every user-visible action (navigation, prediction attempts, exports,
//! degraded loads) is appended as one JSON object per line, so a session
//! can be replayed or summarized after the fact. The journal is strictly
//! best-effort: failing to open or write it never disturbs the session.

use serde_json::{json, Value};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn ts_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Append-only event writer; a `None` writer swallows events.
pub struct Journal {
    writer: Option<BufWriter<std::fs::File>>,
}

impl Journal {
    /// Open the journal for appending, degrading to a no-op on failure.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let writer = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
            .map(BufWriter::new);
        Self { writer }
    }

    /// A journal that records nothing.
    pub fn disabled() -> Self {
        Self { writer: None }
    }

    /// Append one event with its fields.
    pub fn log(&mut self, event: &str, fields: Value) {
        if let Some(writer) = self.writer.as_mut() {
            let line = json!({
                "ts_ms": ts_ms(),
                "event": event,
                "fields": fields,
            });
            // Best effort only; a full disk must not break rendering.
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}
