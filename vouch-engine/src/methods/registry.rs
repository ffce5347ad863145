//! Method registry — string-keyed collection of verification methods.

use std::sync::Arc;

use super::VerificationMethod;

/// Registry of verification methods, keyed by method id.
///
/// Registration order is preserved for display; re-registering an id
/// replaces the earlier instance. Enable/disable happens here via
/// configuration, never by mutating methods at runtime.
#[derive(Default, Clone)]
pub struct MethodRegistry {
    methods: Vec<Arc<dyn VerificationMethod>>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method, replacing any earlier method with the same id.
    pub fn register(&mut self, method: Arc<dyn VerificationMethod>) {
        if let Some(existing) = self
            .methods
            .iter_mut()
            .find(|m| m.id() == method.id())
        {
            *existing = method;
        } else {
            self.methods.push(method);
        }
    }

    /// Look up a method by id.
    pub fn get(&self, id: &str) -> Option<&Arc<dyn VerificationMethod>> {
        self.methods.iter().find(|m| m.id() == id)
    }

    /// All registered method ids, in registration order.
    pub fn ids(&self) -> Vec<&str> {
        self.methods.iter().map(|m| m.id()).collect()
    }

    /// Methods selected by an enabled-set and an optional allow-list.
    /// An empty `enabled` slice means "all registered".
    pub fn select(
        &self,
        enabled: &[String],
        allow_list: Option<&[String]>,
    ) -> Vec<Arc<dyn VerificationMethod>> {
        self.methods
            .iter()
            .filter(|m| enabled.is_empty() || enabled.iter().any(|e| e == m.id()))
            .filter(|m| {
                allow_list
                    .map(|list| list.iter().any(|a| a == m.id()))
                    .unwrap_or(true)
            })
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
