use super::{Backend, CART_KEY, CATALOG_KEY, CUSTOM_CATEGORIES_KEY};
use crate::categories::CategoryRegistry;
use crate::model::{CartUpdate, Product, ProductDraft};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

/// The state container for the shopping list: catalog, cart, category
/// registry, search term and the derived filtered view.
///
/// Generic over [`Backend`] to allow different persistence targets:
/// production uses `ProductStore<FileBackend>`, tests use
/// `ProductStore<MemoryBackend>`.
///
/// In-memory state is the source of truth. Every mutation persists the
/// touched collections best-effort: a failed write is logged and swallowed,
/// so no operation here returns an error. Lookups that miss are silent
/// no-ops, matching how the UI treats stale ids.
pub struct ProductStore<B: Backend> {
    backend: B,
    catalog: Vec<Product>,
    cart: Vec<Product>,
    categories: CategoryRegistry,
    search_term: String,
    filtered: Vec<Product>,
}

impl<B: Backend> ProductStore<B> {
    /// Load persisted state from the backend. Missing or malformed values
    /// fall back to empty collections; predefined categories are merged
    /// with the persisted custom subset.
    pub fn load(backend: B) -> Self {
        let catalog: Vec<Product> = read_collection(&backend, CATALOG_KEY);
        let cart: Vec<Product> = read_collection(&backend, CART_KEY);
        let custom: Vec<String> = read_collection(&backend, CUSTOM_CATEGORIES_KEY);
        debug!(
            products = catalog.len(),
            cart_entries = cart.len(),
            custom_categories = custom.len(),
            "store loaded"
        );

        let mut store = Self {
            backend,
            catalog,
            cart,
            categories: CategoryRegistry::from_custom(custom),
            search_term: String::new(),
            filtered: Vec::new(),
        };
        store.refilter();
        store
    }

    /// Create a product in the catalog. Assigns a fresh id, resolves
    /// weight-based pricing and registers an unseen category.
    pub fn create(&mut self, draft: ProductDraft) -> Product {
        let product = Product::new(draft);
        if let Some(category) = product.category.clone() {
            if self.categories.insert(category) {
                self.persist_categories();
            }
        }
        self.catalog.push(product.clone());
        self.refilter();
        self.persist_catalog();
        product
    }

    /// [`create`](Self::create), plus a value-copy of the new product
    /// appended to the cart.
    pub fn create_and_add_to_cart(&mut self, draft: ProductDraft) -> Product {
        let product = self.create(draft);
        self.cart.push(product.clone());
        self.persist_cart();
        product
    }

    /// Copy the catalog product with `id` into the cart. Unknown ids are a
    /// silent no-op. Repeated calls append repeated snapshots.
    pub fn add_to_cart(&mut self, id: &Uuid) {
        let Some(product) = self.catalog.iter().find(|p| p.id == *id).cloned() else {
            return;
        };
        self.cart.push(product);
        self.persist_cart();
    }

    /// Remove **every** cart entry carrying `id`. A product added twice
    /// leaves the cart entirely in one call.
    pub fn remove_from_cart(&mut self, id: &Uuid) {
        let before = self.cart.len();
        self.cart.retain(|p| p.id != *id);
        if self.cart.len() != before {
            self.persist_cart();
        }
    }

    /// Patch the **first** cart entry with `id`; fields absent from the
    /// update are left untouched. Unknown ids are a silent no-op.
    pub fn update_cart_item(&mut self, id: &Uuid, update: CartUpdate) {
        let Some(entry) = self.cart.iter_mut().find(|p| p.id == *id) else {
            return;
        };
        update.apply(entry);
        self.persist_cart();
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist_cart();
    }

    /// Remove the product from the catalog and every matching cart entry.
    pub fn delete_product(&mut self, id: &Uuid) {
        self.catalog.retain(|p| p.id != *id);
        self.cart.retain(|p| p.id != *id);
        self.refilter();
        self.persist_catalog();
        self.persist_cart();
    }

    /// Update the search term and recompute the filtered view. The empty
    /// term matches everything; whether to show that as "full catalog" or
    /// "no suggestions" is the caller's presentation policy.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.refilter();
    }

    /// Idempotent category insert; persists the custom subset only.
    pub fn add_category(&mut self, name: impl Into<String>) {
        if self.categories.insert(name) {
            self.persist_categories();
        }
    }

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    pub fn cart(&self) -> &[Product] {
        &self.cart
    }

    /// Catalog entries whose name contains the search term,
    /// case-insensitively. Never stale: recomputed on every catalog or term
    /// change.
    pub fn filtered_catalog(&self) -> &[Product] {
        &self.filtered
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// All category names, predefined first, then custom in insertion order.
    pub fn categories(&self) -> &[String] {
        self.categories.names()
    }

    pub fn cart_total(&self) -> f64 {
        self.cart.iter().map(Product::subtotal).sum()
    }

    /// Case-insensitive exact-name lookup in the catalog.
    pub fn find_exact(&self, name: &str) -> Option<&Product> {
        let needle = name.to_lowercase();
        self.catalog
            .iter()
            .find(|p| p.name.to_lowercase() == needle)
    }

    fn refilter(&mut self) {
        let needle = self.search_term.to_lowercase();
        self.filtered = self
            .catalog
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
    }

    fn persist_catalog(&self) {
        self.persist(CATALOG_KEY, &self.catalog);
    }

    fn persist_cart(&self) {
        self.persist(CART_KEY, &self.cart);
    }

    fn persist_categories(&self) {
        self.persist(CUSTOM_CATEGORIES_KEY, &self.categories.custom());
    }

    // Best-effort write: local persistence is a cache of the in-memory
    // state, not the source of truth.
    fn persist<T: Serialize>(&self, key: &str, value: &T) {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(key, %err, "failed to encode collection");
                return;
            }
        };
        if let Err(err) = self.backend.set(key, &encoded) {
            warn!(key, %err, "failed to persist collection");
        }
    }
}

fn read_collection<B: Backend, T: DeserializeOwned>(backend: &B, key: &str) -> Vec<T> {
    let raw = match backend.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(key, %err, "failed to read collection, starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(values) => values,
        Err(err) => {
            warn!(key, %err, "malformed collection, starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::WEIGHTED_CATEGORY;
    use crate::model::WeightUnit;
    use crate::store::memory::MemoryBackend;
    use std::collections::HashSet;

    fn store() -> ProductStore<MemoryBackend> {
        ProductStore::load(MemoryBackend::new())
    }

    #[test]
    fn create_assigns_unique_ids() {
        let mut store = store();
        for i in 0..50 {
            store.create(ProductDraft::new(format!("Item {}", i), 1.0, 1));
        }
        let ids: HashSet<_> = store.catalog().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn create_registers_unseen_category_and_persists_custom_subset() {
        let mut store = store();
        store.create(ProductDraft::new("Picanha", 50.0, 1).with_category("Açougue"));

        assert!(store.categories().contains(&"Açougue".to_string()));
        let raw = store.backend.raw(CUSTOM_CATEGORIES_KEY).unwrap();
        let persisted: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, vec!["Açougue".to_string()]);
        assert!(!persisted.contains(&WEIGHTED_CATEGORY.to_string()));
    }

    #[test]
    fn weighted_product_gets_derived_price() {
        let mut store = store();
        let product = store.create(ProductDraft::new("Picanha", 0.0, 1).weighted(
            500.0,
            WeightUnit::Grams,
            10.0,
        ));
        assert_eq!(product.price, 5.0);
    }

    #[test]
    fn search_filters_catalog_case_insensitively() {
        let mut store = store();
        store.create(ProductDraft::new("Milk", 4.5, 1));
        assert_eq!(store.catalog().len(), 1);

        store.set_search_term("mil");
        assert_eq!(store.filtered_catalog().len(), 1);

        store.set_search_term("xyz");
        assert_eq!(store.filtered_catalog().len(), 0);
    }

    #[test]
    fn empty_term_matches_the_whole_catalog() {
        let mut store = store();
        store.create(ProductDraft::new("Milk", 4.5, 1));
        store.create(ProductDraft::new("Bread", 8.0, 1));

        store.set_search_term("");
        assert_eq!(store.filtered_catalog().len(), 2);
    }

    #[test]
    fn filtered_view_tracks_catalog_mutations() {
        let mut store = store();
        store.set_search_term("mil");
        assert_eq!(store.filtered_catalog().len(), 0);

        let milk = store.create(ProductDraft::new("Milk", 4.5, 1));
        assert_eq!(store.filtered_catalog().len(), 1);

        store.delete_product(&milk.id);
        assert_eq!(store.filtered_catalog().len(), 0);
    }

    #[test]
    fn add_to_cart_copies_by_value() {
        let mut store = store();
        let milk = store.create(ProductDraft::new("Milk", 4.5, 1));
        store.add_to_cart(&milk.id);

        store.update_cart_item(&milk.id, CartUpdate::price(9.99));
        assert_eq!(store.cart()[0].price, 9.99);
        assert_eq!(store.catalog()[0].price, 4.5);
    }

    #[test]
    fn add_to_cart_with_unknown_id_is_a_noop() {
        let mut store = store();
        store.add_to_cart(&Uuid::new_v4());
        assert!(store.cart().is_empty());
    }

    #[test]
    fn remove_from_cart_drops_every_matching_entry() {
        let mut store = store();
        let milk = store.create(ProductDraft::new("Milk", 4.5, 1));
        let bread = store.create(ProductDraft::new("Bread", 8.0, 1));
        store.add_to_cart(&milk.id);
        store.add_to_cart(&milk.id);
        store.add_to_cart(&bread.id);

        store.remove_from_cart(&milk.id);
        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart()[0].id, bread.id);
    }

    #[test]
    fn update_cart_item_patches_first_match_only() {
        let mut store = store();
        let milk = store.create(ProductDraft::new("Milk", 4.5, 1));
        store.add_to_cart(&milk.id);
        store.add_to_cart(&milk.id);

        store.update_cart_item(&milk.id, CartUpdate::quantity(3));
        assert_eq!(store.cart()[0].quantity, 3);
        assert_eq!(store.cart()[0].price, 4.5);
        assert_eq!(store.cart()[0].name, "Milk");
        assert_eq!(store.cart()[1].quantity, 1);
    }

    #[test]
    fn update_cart_item_with_unknown_id_is_a_noop() {
        let mut store = store();
        let milk = store.create(ProductDraft::new("Milk", 4.5, 1));
        store.add_to_cart(&milk.id);

        store.update_cart_item(&Uuid::new_v4(), CartUpdate::quantity(7));
        assert_eq!(store.cart()[0].quantity, 1);
    }

    #[test]
    fn clear_cart_leaves_catalog_alone() {
        let mut store = store();
        let milk = store.create(ProductDraft::new("Milk", 4.5, 1));
        store.add_to_cart(&milk.id);

        store.clear_cart();
        assert!(store.cart().is_empty());
        assert_eq!(store.catalog().len(), 1);
    }

    #[test]
    fn delete_product_removes_from_catalog_and_cart() {
        let mut store = store();
        let milk = store.create(ProductDraft::new("Milk", 4.5, 1));
        store.add_to_cart(&milk.id);
        store.add_to_cart(&milk.id);

        store.delete_product(&milk.id);
        assert!(store.catalog().is_empty());
        assert!(store.cart().is_empty());

        // The id is gone, so re-adding it does nothing.
        store.add_to_cart(&milk.id);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn create_and_add_to_cart_appends_to_both_collections() {
        let mut store = store();
        let product = store.create_and_add_to_cart(ProductDraft::new("Milk", 4.5, 2));
        assert_eq!(store.catalog().len(), 1);
        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart()[0].id, product.id);
    }

    #[test]
    fn add_category_twice_registers_once() {
        let mut store = store();
        store.add_category("Açougue");
        store.add_category("Açougue");
        assert_eq!(
            store
                .categories()
                .iter()
                .filter(|n| *n == "Açougue")
                .count(),
            1
        );
    }

    #[test]
    fn cart_total_sums_price_times_quantity() {
        let mut store = store();
        store.create_and_add_to_cart(ProductDraft::new("Milk", 4.5, 2));
        store.create_and_add_to_cart(ProductDraft::new("Bread", 8.0, 1));
        assert_eq!(store.cart_total(), 17.0);
    }

    #[test]
    fn find_exact_ignores_case() {
        let mut store = store();
        let milk = store.create(ProductDraft::new("Milk", 4.5, 1));
        assert_eq!(store.find_exact("milk").map(|p| p.id), Some(milk.id));
        assert_eq!(store.find_exact("mil"), None);
    }

    #[test]
    fn loads_persisted_state_from_backend() {
        let mut store = ProductStore::load(MemoryBackend::new());
        let milk = store.create(ProductDraft::new("Milk", 4.5, 1));
        store.add_to_cart(&milk.id);
        store.add_category("Açougue");

        let reloaded_backend = MemoryBackend::new();
        for key in [CATALOG_KEY, CART_KEY, CUSTOM_CATEGORIES_KEY] {
            reloaded_backend.seed(key, &store.backend.raw(key).unwrap());
        }

        let reloaded = ProductStore::load(reloaded_backend);
        assert_eq!(reloaded.catalog(), store.catalog());
        assert_eq!(reloaded.cart(), store.cart());
        assert_eq!(reloaded.categories(), store.categories());
    }

    #[test]
    fn malformed_persisted_value_falls_back_to_empty() {
        let backend = MemoryBackend::new();
        backend.seed(CATALOG_KEY, "not json at all");
        backend.seed(CART_KEY, "[]");

        let store = ProductStore::load(backend);
        assert!(store.catalog().is_empty());
        assert!(store.cart().is_empty());
    }

    #[test]
    fn write_failures_are_swallowed_and_state_still_mutates() {
        let backend = MemoryBackend::new();
        backend.set_simulate_write_error(true);

        let mut store = ProductStore::load(backend);
        let milk = store.create(ProductDraft::new("Milk", 4.5, 1));
        store.add_to_cart(&milk.id);

        assert_eq!(store.catalog().len(), 1);
        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.backend.raw(CATALOG_KEY), None);
        assert_eq!(store.backend.raw(CART_KEY), None);
    }
}
