//! Output time range

use serde::{Deserialize, Serialize};

/// Begin offset plus an optional duration, in seconds.
///
/// `end` is derived: it exists only when a duration is set, and setting it
/// recomputes the duration from the current `begin`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeWindow {
    pub begin: f64,
    pub duration: Option<f64>,
}

impl TimeWindow {
    pub fn new(begin: f64, duration: Option<f64>) -> Self {
        Self { begin, duration }
    }

    pub fn end(&self) -> Option<f64> {
        self.duration.map(|d| self.begin + d)
    }

    pub fn set_end(&mut self, end: Option<f64>) {
        self.duration = end.map(|e| e - self.begin);
    }
}
