//! # Binding Registry
//!
//! Owns the live bindings in registration order.
//!
//! Lookups are linear scans filtered by name or identity. Registration counts
//! are small, and a plain `Vec` keeps same-name bindings in the order they
//! were registered, which is the order they are dispatched in.

use crate::binding::{BindingId, CallbackBinding};
use crate::identity::ObserverId;
use crate::DEFAULT_REGISTRY_CAPACITY;
use std::sync::Arc;

/// Insertion-ordered collection of live bindings.
#[derive(Debug)]
pub struct Registry {
    bindings: Vec<Arc<CallbackBinding>>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_REGISTRY_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bindings: Vec::with_capacity(capacity),
        }
    }

    /// Add a binding after every existing one.
    pub fn append(&mut self, binding: CallbackBinding) {
        self.bindings.push(Arc::new(binding));
    }

    /// Bindings registered for `name`, in registration order.
    ///
    /// The iterator is lazy and can be cloned to restart the scan.
    pub fn bindings_for_name<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a CallbackBinding> + Clone + 'a {
        self.bindings
            .iter()
            .filter(move |binding| binding.name().matches(name))
            .map(|binding| &**binding)
    }

    /// Owned handles to the bindings for `name`, for dispatch outside the
    /// registry lock.
    #[must_use]
    pub fn snapshot_for_name(&self, name: &str) -> Vec<Arc<CallbackBinding>> {
        self.bindings
            .iter()
            .filter(|binding| binding.name().matches(name))
            .cloned()
            .collect()
    }

    /// Remove every binding owned by `observer`. Returns how many went.
    pub fn remove_by_identity(&mut self, observer: ObserverId) -> usize {
        self.remove_where(|binding| binding.observer() == observer)
    }

    /// Remove the bindings owned by `observer` for one name only.
    pub fn remove_by_identity_and_name(&mut self, observer: ObserverId, name: &str) -> usize {
        self.remove_where(|binding| binding.observer() == observer && binding.name().matches(name))
    }

    /// Remove a single binding by id.
    pub fn remove_binding(&mut self, id: BindingId) -> bool {
        self.remove_where(|binding| binding.id() == id) > 0
    }

    /// Remove every binding. Returns how many went.
    pub fn drain(&mut self) -> usize {
        self.remove_where(|_| true)
    }

    fn remove_where(&mut self, mut predicate: impl FnMut(&CallbackBinding) -> bool) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|binding| {
            if predicate(&**binding) {
                binding.retire();
                false
            } else {
                true
            }
        });
        before - self.bindings.len()
    }

    #[must_use]
    pub fn contains_identity(&self, observer: ObserverId) -> bool {
        self.bindings
            .iter()
            .any(|binding| binding.observer() == observer)
    }

    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.bindings_for_name(name).next().is_some()
    }

    #[must_use]
    pub fn get(&self, id: BindingId) -> Option<&CallbackBinding> {
        self.bindings
            .iter()
            .find(|binding| binding.id() == id)
            .map(|binding| &**binding)
    }

    /// Distinct owners, in order of their first registration.
    #[must_use]
    pub fn observers(&self) -> Vec<ObserverId> {
        let mut seen = Vec::new();
        for binding in &self.bindings {
            if !seen.contains(&binding.observer()) {
                seen.push(binding.observer());
            }
        }
        seen
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
