// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Spectrometer registry.
//!
//! Backends register under their name; one of them is active and supplies
//! the parameter catalog for new and loaded sequences.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::{BackendType, GenericSpectrometer, Spectrometer};
use crate::error::{LookupError, Result};

/// Spectrometer registry.
///
/// The registry is thread-safe and can be shared between threads.
///
/// # Example
///
/// ```ignore
/// use qubit_os_mrseq::backend::SpectrometerRegistry;
///
/// let registry = SpectrometerRegistry::with_generic();
/// let spectrometer = registry.active()?;
/// let sequence = spectrometer.new_sequence("fid");
/// ```
pub struct SpectrometerRegistry {
    /// Registered backends
    backends: RwLock<HashMap<String, Arc<dyn Spectrometer>>>,

    /// Active backend name
    active: RwLock<Option<String>>,
}

impl SpectrometerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            backends: RwLock::new(HashMap::new()),
            active: RwLock::new(None),
        }
    }

    /// Registry holding only the built-in generic backend.
    pub fn with_generic() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(GenericSpectrometer::default()));
        registry
    }

    /// Register a backend.
    ///
    /// If a backend with the same name already exists, it will be replaced.
    pub fn register(&self, backend: Arc<dyn Spectrometer>) {
        let name = backend.name().to_string();
        info!(backend = %name, "Registering spectrometer");

        let mut backends = self.backends.write();
        backends.insert(name.clone(), backend);

        // First backend becomes active
        let mut active = self.active.write();
        if active.is_none() {
            debug!(backend = %name, "Setting as active backend");
            *active = Some(name);
        }
    }

    /// Make a registered backend active.
    pub fn set_active(&self, name: &str) -> Result<()> {
        let backends = self.backends.read();
        if !backends.contains_key(name) {
            return Err(LookupError::Backend(name.to_string()).into());
        }

        let mut active = self.active.write();
        *active = Some(name.to_string());
        info!(backend = %name, "Set as active backend");
        Ok(())
    }

    /// Get a backend by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Spectrometer>> {
        let backends = self.backends.read();
        backends
            .get(name)
            .cloned()
            .ok_or_else(|| LookupError::Backend(name.to_string()).into())
    }

    /// Get the active backend.
    pub fn active(&self) -> Result<Arc<dyn Spectrometer>> {
        let name = self.active.read().clone();
        match name {
            Some(name) => self.get(&name),
            None => Err(LookupError::Backend("<none active>".to_string()).into()),
        }
    }

    /// Get a backend by name, or the active one if name is None.
    pub fn get_or_active(&self, name: Option<&str>) -> Result<Arc<dyn Spectrometer>> {
        match name {
            Some(n) => self.get(n),
            None => self.active(),
        }
    }

    /// Registered backend names, sorted.
    pub fn list(&self) -> Vec<String> {
        let backends = self.backends.read();
        let mut names: Vec<String> = backends.keys().cloned().collect();
        names.sort();
        names
    }

    /// Registered backends with their types, sorted by name.
    pub fn list_with_types(&self) -> Vec<(String, BackendType)> {
        let backends = self.backends.read();
        let mut entries: Vec<(String, BackendType)> = backends
            .iter()
            .map(|(name, backend)| (name.clone(), backend.backend_type()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    pub fn contains(&self, name: &str) -> bool {
        self.backends.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.backends.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unregister a backend.
    pub fn unregister(&self, name: &str) -> Option<Arc<dyn Spectrometer>> {
        let mut backends = self.backends.write();
        let removed = backends.remove(name);

        if removed.is_some() {
            info!(backend = %name, "Unregistered spectrometer");

            let mut active = self.active.write();
            if active.as_deref() == Some(name) {
                warn!(backend = %name, "Unregistered active backend");
                *active = None;
            }
        }

        removed
    }

    /// Active backend name.
    pub fn active_name(&self) -> Option<String> {
        self.active.read().clone()
    }
}

impl Default for SpectrometerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_utils::MockSpectrometer;

    #[test]
    fn test_registry_register_and_get() {
        let registry = SpectrometerRegistry::default();
        registry.register(Arc::new(MockSpectrometer::new("test")));

        assert!(registry.contains("test"));
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 1);

        let retrieved = registry.get("test").unwrap();
        assert_eq!(retrieved.name(), "test");
    }

    #[test]
    fn test_with_generic() {
        let registry = SpectrometerRegistry::with_generic();
        assert_eq!(registry.active_name(), Some("generic".to_string()));
        assert_eq!(registry.active().unwrap().backend_type(), BackendType::Generic);
    }

    #[test]
    fn test_first_registered_is_active() {
        let registry = SpectrometerRegistry::with_generic();
        registry.register(Arc::new(MockSpectrometer::new("mock")));
        assert_eq!(registry.active_name(), Some("generic".to_string()));

        registry.set_active("mock").unwrap();
        assert_eq!(registry.active().unwrap().name(), "mock");
    }

    #[test]
    fn test_get_or_active() {
        let registry = SpectrometerRegistry::with_generic();
        assert!(registry.get_or_active(Some("generic")).is_ok());
        assert!(registry.get_or_active(None).is_ok());
        assert!(registry.get_or_active(Some("nope")).is_err());
    }

    #[test]
    fn test_set_active_unknown() {
        let registry = SpectrometerRegistry::default();
        let err = registry.set_active("nope").unwrap_err();
        assert!(matches!(err, Error::Lookup(LookupError::Backend(_))));
    }

    #[test]
    fn test_active_empty_registry() {
        let registry = SpectrometerRegistry::default();
        assert!(registry.active().is_err());
        assert_eq!(registry.active_name(), None);
    }

    #[test]
    fn test_unregister_active_clears() {
        let registry = SpectrometerRegistry::with_generic();
        registry.register(Arc::new(MockSpectrometer::new("mock")));

        assert!(registry.unregister("mock").is_some());
        assert_eq!(registry.active_name(), Some("generic".to_string()));

        registry.unregister("generic");
        assert_eq!(registry.active_name(), None);
        assert!(registry.is_empty());
        assert!(registry.unregister("generic").is_none());
    }

    #[test]
    fn test_list_sorted_with_types() {
        let registry = SpectrometerRegistry::with_generic();
        registry.register(Arc::new(MockSpectrometer::new("bench")));

        assert_eq!(registry.list(), vec!["bench".to_string(), "generic".to_string()]);
        assert_eq!(
            registry.list_with_types(),
            vec![
                ("bench".to_string(), BackendType::Simulator),
                ("generic".to_string(), BackendType::Generic),
            ]
        );
    }
}
