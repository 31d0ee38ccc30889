use std::collections::HashMap;

use super::category::CategoryId;
use super::registry::CategoryRegistry;

/// Per-category switch deciding whether edits fill forward in time.
#[derive(Debug, Clone, Default)]
pub struct PropagationFlags {
    flags: HashMap<CategoryId, bool>,
}

impl PropagationFlags {
    /// Enables propagation for every category in `registry`.
    pub fn for_registry(registry: &CategoryRegistry) -> Self {
        let flags = registry
            .iter()
            .map(|category| (category.id.clone(), true))
            .collect();
        Self { flags }
    }

    /// Registers a newly created category with propagation on.
    pub fn track(&mut self, id: &CategoryId) {
        self.flags.entry(id.clone()).or_insert(true);
    }

    pub fn forget(&mut self, id: &CategoryId) {
        self.flags.remove(id);
    }

    pub fn set(&mut self, id: &CategoryId, enabled: bool) {
        self.flags.insert(id.clone(), enabled);
    }

    /// Ids that were never tracked report `false`.
    pub fn is_enabled(&self, id: &CategoryId) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::category::Bucket;

    #[test]
    fn every_default_category_starts_enabled() {
        let registry = CategoryRegistry::with_defaults();
        let flags = PropagationFlags::for_registry(&registry);
        assert!(registry.iter().all(|category| flags.is_enabled(&category.id)));
    }

    #[test]
    fn toggles_are_independent_per_category() {
        let mut registry = CategoryRegistry::with_defaults();
        let mut flags = PropagationFlags::for_registry(&registry);
        let added = registry.add(Bucket::Present, "Gifts").expect("added");
        flags.track(&added.id);

        flags.set(&CategoryId::from("rent"), false);
        assert!(!flags.is_enabled(&CategoryId::from("rent")));
        assert!(flags.is_enabled(&CategoryId::from("groceries")));
        assert!(flags.is_enabled(&added.id));
    }

    #[test]
    fn track_keeps_existing_choice() {
        let mut flags = PropagationFlags::default();
        let id = CategoryId::from("rent");
        flags.set(&id, false);
        flags.track(&id);
        assert!(!flags.is_enabled(&id));

        flags.forget(&id);
        assert!(!flags.is_enabled(&id));
    }
}
