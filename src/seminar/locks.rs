use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

/// Lock table handing out one mutex per key.
///
/// The conflict checks in session and board assignment are check-then-act:
/// two concurrent callers could both pass the check before either commits.
/// Holding the key's mutex across check and write restores the
/// at-most-one-per-key guarantee without blocking unrelated keys.
pub(crate) struct KeyedLocks<K> {
    table: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K: Eq + Hash + Clone> KeyedLocks<K> {
    pub(crate) fn new() -> Self {
        Self {
            table: Mutex::new(HashMap::new()),
        }
    }

    /// The mutex associated with `key`, created on first use. The caller
    /// locks the returned handle for the duration of its check-then-act.
    pub(crate) fn acquire(&self, key: &K) -> Arc<Mutex<()>> {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(table.entry(key.clone()).or_default())
    }
}
