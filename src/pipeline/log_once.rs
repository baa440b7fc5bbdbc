use std::collections::HashSet;
use std::sync::Mutex;

/// Remembers which keys have already been logged.
///
/// Lives as long as its owner; dropping the owner resets the history.
#[derive(Debug, Default)]
pub struct LogOnce {
    seen: Mutex<HashSet<String>>,
}

impl LogOnce {
    pub fn new() -> Self {
        Self::default()
    }

    /// True the first time `key` is seen
    pub fn first_time(&self, key: &str) -> bool {
        let mut seen = self.seen.lock().unwrap_or_else(|e| e.into_inner());
        if seen.contains(key) {
            return false;
        }
        seen.insert(key.to_string())
    }
}
