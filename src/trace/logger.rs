use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

use serde::Serialize;
use tracing::warn;

use crate::error::IndexError;

/// JSON-lines sink for pass events.
///
/// A trace that cannot be opened is disabled with a warning; a line that
/// cannot be written is dropped with a warning. Neither fails the pass.
pub struct TraceLogger {
    path: String,
    sink: Option<Mutex<File>>,
}

impl TraceLogger {
    pub fn new(path: &str) -> Self {
        let sink = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(Mutex::new(file)),
            Err(e) => {
                warn!(path, error = %e, "could not open trace file; pass tracing disabled");
                None
            }
        };
        Self {
            path: path.to_string(),
            sink,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn log<E: Serialize>(&self, event: &E) {
        if let Err(e) = self.append(event) {
            warn!(error = %e, "dropped trace event");
        }
    }

    /// Serialize `event` and append it as one line. No-op when disabled.
    pub fn append<E: Serialize>(&self, event: &E) -> Result<(), IndexError> {
        let Some(sink) = &self.sink else {
            return Ok(());
        };

        let line = serde_json::to_string(event).map_err(|e| IndexError::JsonSerialize {
            context: "trace event".into(),
            source: e,
        })?;

        let mut file = sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(file, "{}", line).map_err(|e| IndexError::io(self.path.as_str(), e))
    }
}
