//! Recording doubles for the host's sink and transport

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::Level;

use crate::{ChangeSink, DispatchRequest, QueryTransport};

/// Change sink that keeps every emitted record
pub struct RecordingSink<T> {
    events: Mutex<Vec<T>>,
}

impl<T: Clone> RecordingSink<T> {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<T> {
        self.events.lock().clone()
    }

    pub fn last(&self) -> Option<T> {
        self.events.lock().last().cloned()
    }
}

impl<T: Clone> Default for RecordingSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> ChangeSink<T> for RecordingSink<T> {
    fn emit(&self, next: T) {
        self.events.lock().push(next);
    }
}

/// Transport that keeps every dispatched request
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<DispatchRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<DispatchRequest> {
        self.requests.lock().clone()
    }
}

impl QueryTransport for RecordingTransport {
    fn dispatch(&self, request: DispatchRequest) {
        self.requests.lock().push(request);
    }
}

#[derive(Clone)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Run `f` under a plain-text DEBUG subscriber and return what it logged
pub fn capture_logs<F: FnOnce()>(f: F) -> String {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let writer = LogBuffer(buf.clone());
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_target(false)
        .with_max_level(Level::DEBUG)
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = buf.lock().clone();
    String::from_utf8_lossy(&bytes).to_string()
}
