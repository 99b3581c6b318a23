//! Persisted UI preference abstract Trait

use std::collections::HashSet;
use std::sync::RwLock;

/// Key of the "remember me" flag set by a successful login.
pub const REMEMBER_ME_FLAG: &str = "rememberMe";

/// Persisted presence flags (value-less).
///
/// Platform implementation:
/// - Browser shells: local storage
/// - Headless: [`InMemoryPreferenceStore`]
pub trait PreferenceStore: Send + Sync {
    fn set_flag(&self, key: &str);

    fn clear_flag(&self, key: &str);

    fn has_flag(&self, key: &str) -> bool;
}

/// Process-local preference store.
#[derive(Default)]
pub struct InMemoryPreferenceStore {
    flags: RwLock<HashSet<String>>,
}

impl InMemoryPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn set_flag(&self, key: &str) {
        if let Ok(mut flags) = self.flags.write() {
            flags.insert(key.to_string());
        }
    }

    fn clear_flag(&self, key: &str) {
        if let Ok(mut flags) = self.flags.write() {
            flags.remove(key);
        }
    }

    fn has_flag(&self, key: &str) -> bool {
        self.flags.read().is_ok_and(|flags| flags.contains(key))
    }
}
