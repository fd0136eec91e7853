use super::Backend;
use crate::error::{CestaError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory backend for testing and development. Does NOT persist data.
///
/// Uses `RefCell` for interior mutability since the store is
/// single-threaded; this keeps [`Backend`] methods at `&self` without lock
/// overhead.
#[derive(Default)]
pub struct MemoryBackend {
    values: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write-error simulation for testing the swallow-on-failure
    /// contract.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Test helper: the raw value under `key`, if any.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    /// Test helper: seed a raw value, bypassing the store.
    pub fn seed(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(CestaError::Store("Simulated write error".to_string()));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
