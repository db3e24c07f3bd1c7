//! Explicit registry of named color functions.
//!
//! The registry is constructed once at process start and passed by
//! reference to the scale builder; there is no ambient global lookup.
//! It is immutable after construction, so a multi-threaded host can share
//! one registry across plots freely.

use std::collections::HashMap;
use std::sync::Arc;

use super::builtin;
use super::function::ColorFunction;
use crate::error::{HadleyError, Result};

/// Registry of named continuous color functions
pub struct ColormapRegistry {
    maps: HashMap<String, Arc<dyn ColorFunction>>,
}

impl ColormapRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self {
            maps: HashMap::new(),
        }
    }

    /// A registry pre-loaded with the builtin color functions
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(builtin::rb_diff()));
        registry.register(Arc::new(builtin::cool()));
        registry.register(Arc::new(builtin::summer()));
        registry.register(Arc::new(builtin::summer_r()));
        registry.register(Arc::new(builtin::viridis()));
        registry.register(Arc::new(builtin::viridis_r()));
        registry.register(Arc::new(builtin::magma()));
        registry.register(Arc::new(builtin::magma_r()));
        registry.register(Arc::new(builtin::plasma()));
        registry.register(Arc::new(builtin::plasma_r()));
        registry.register(Arc::new(builtin::coolwarm()));
        registry.register(Arc::new(builtin::rdbu()));
        registry
    }

    /// Register a color function under its own (lowercased) name
    pub fn register(&mut self, map: Arc<dyn ColorFunction>) {
        self.maps.insert(map.name().to_lowercase(), map);
    }

    /// Look up a color function by name (case-insensitive)
    pub fn get(&self, name: &str) -> Result<Arc<dyn ColorFunction>> {
        self.maps
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| HadleyError::ColormapNotFound {
                name: name.to_string(),
            })
    }

    /// Names of all registered color functions, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.maps.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ColormapRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
