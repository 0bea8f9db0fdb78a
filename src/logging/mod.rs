//! Logging infrastructure for console output.

mod logger;
mod subscriber;
mod types;

pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::Log;

/// A [`Log`] that keeps every message in memory, tagged with its level.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingLog {
    lines: std::sync::Mutex<Vec<(&'static str, String)>>,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl RecordingLog {
    fn push(&self, level: &'static str, msg: &str) {
        self.lines
            .lock()
            .expect("recording log poisoned")
            .push((level, msg.to_string()));
    }

    /// Messages recorded at `level`, in order.
    pub(crate) fn at(&self, level: &str) -> Vec<String> {
        self.lines
            .lock()
            .expect("recording log poisoned")
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

#[cfg(test)]
impl Log for RecordingLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }

    fn info(&self, msg: &str) {
        self.push("info", msg);
    }

    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }

    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
}
