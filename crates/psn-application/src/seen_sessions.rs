//! Session keys that already produced a notification.

use std::collections::HashSet;

/// Set of session keys that have been notified.
///
/// Keys are only ever added. A key that reappears later, even for a session
/// the server restarted, never triggers a second notification. The set lives
/// as long as its owner and is not persisted.
#[derive(Debug, Default, Clone)]
pub struct SeenSessions {
    keys: HashSet<String>,
}

impl SeenSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `key`, returning `true` if it had not been seen before.
    pub fn mark(&mut self, key: &str) -> bool {
        if self.keys.contains(key) {
            return false;
        }
        self.keys.insert(key.to_string())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
