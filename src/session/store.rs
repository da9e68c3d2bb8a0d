//! Position persistence backends

use rustc_hash::FxHashMap;

/// Abstract key/value store for reading positions.
///
/// Implementations wrap whatever the host offers: browser `localStorage`
/// through the WASM bridge, or a plain map in tests. A missing key and a
/// malformed value are equivalent to the session; both read as "no saved
/// position".
pub trait PositionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store for native use and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PositionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}
