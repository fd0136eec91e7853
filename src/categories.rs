//! Category registry.
//!
//! Categories group catalog products and gate weight-based pricing. The
//! registry keeps one ordered, duplicate-free list, but two kinds of entries
//! live in it:
//!
//! - **Predefined** names ship with the application and are always present.
//!   They are never written to storage; persisting them would re-seed
//!   duplicates on every reload.
//! - **Custom** names are user-added and are exactly the subset that gets
//!   persisted.

/// The category that activates weight-based pricing.
pub const WEIGHTED_CATEGORY: &str = "Produto com Peso";

/// Names built into the application, in display order.
pub const PREDEFINED_CATEGORIES: &[&str] = &[WEIGHTED_CATEGORY];

/// Ordered, duplicate-free set of category names: predefined entries first,
/// then custom ones in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRegistry {
    names: Vec<String>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self {
            names: PREDEFINED_CATEGORIES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }

    /// Rebuild the registry from the persisted custom subset, union-merged
    /// with the predefined names and deduplicated.
    pub fn from_custom(custom: Vec<String>) -> Self {
        let mut registry = Self::new();
        for name in custom {
            registry.insert(name);
        }
        registry
    }

    /// Idempotent insert. Returns true when the name was actually added.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The user-added names only, i.e. the subset that gets persisted.
    pub fn custom(&self) -> Vec<String> {
        self.names
            .iter()
            .filter(|name| !Self::is_predefined(name))
            .cloned()
            .collect()
    }

    pub fn is_predefined(name: &str) -> bool {
        PREDEFINED_CATEGORIES.contains(&name)
    }
}
