//! Structured JSON log sink.
//!
//! Every line the runtime emits is wrapped into
//! `{"msg": <line>, "isErr": <bool>, "reqid": <id>}` and appended,
//! newline-terminated, to `<log_dir>/std.log`. Installed as the
//! `tracing-subscriber` writer at startup.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

tokio::task_local! {
    /// Tracking id of the invocation currently running on this task. Set by
    /// the invoker so log records written during handler execution correlate
    /// with the request that produced them.
    pub static CURRENT_REQUEST_ID: String;
}

/// Tracking id for the current task, or `"unknown"` outside a request scope.
pub fn current_request_id() -> String {
    CURRENT_REQUEST_ID
        .try_with(|id| id.clone())
        .unwrap_or_else(|_| "unknown".to_string())
}

#[derive(Serialize)]
struct LogRecord<'a> {
    msg: &'a str,
    #[serde(rename = "isErr")]
    is_err: bool,
    reqid: String,
}

/// Append-only writer that wraps each line into a [`LogRecord`].
#[derive(Clone)]
pub struct LogSink {
    file: Arc<Mutex<File>>,
}

impl LogSink {
    /// Open `<dir>/std.log` for appending. Fails when the directory is
    /// absent, which is fatal at startup.
    pub fn open(dir: &Path) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("std.log"))?;
        Ok(Self {
            file: Arc::new(Mutex::new(file)),
        })
    }

    fn append(&self, msg: &str, is_err: bool) -> io::Result<()> {
        let record = LogRecord {
            msg,
            is_err,
            reqid: current_request_id(),
        };
        let mut line = serde_json::to_vec(&record).map_err(io::Error::other)?;
        line.push(b'\n');
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.write_all(&line)
    }
}

/// Per-event writer handed out by the sink; `is_err` reflects the event's
/// severity.
pub struct RecordWriter {
    sink: LogSink,
    is_err: bool,
}

impl Write for RecordWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        self.sink.append(text.trim_end_matches('\n'), self.is_err)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self
            .sink
            .file
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        file.flush()
    }
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = RecordWriter;

    fn make_writer(&'a self) -> Self::Writer {
        RecordWriter {
            sink: self.clone(),
            is_err: false,
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        RecordWriter {
            sink: self.clone(),
            // Level orders most-severe-first: ERROR < WARN < INFO.
            is_err: *meta.level() <= Level::WARN,
        }
    }
}
