use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::categories::WEIGHTED_CATEGORY;

/// Unit for the weight of a weight-priced product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightUnit {
    #[serde(rename = "g")]
    Grams,
    #[serde(rename = "kg")]
    Kilograms,
}

impl WeightUnit {
    pub fn to_kilos(self, amount: f64) -> f64 {
        match self {
            WeightUnit::Grams => amount / 1000.0,
            WeightUnit::Kilograms => amount,
        }
    }
}

/// A catalog entry. Also used for cart entries, which are full value
/// snapshots of the product at the time it was added; later catalog changes
/// never reach entries already in the cart.
///
/// Field names are serialized in camelCase so persisted JSON stays
/// compatible with data written by earlier versions of the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub price: f64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_unit: Option<WeightUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_kilo: Option<f64>,
    // Data persisted before this field existed loads with "now".
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Materialize a draft: assigns a fresh id, stamps the creation time and
    /// resolves weight-based pricing.
    pub fn new(draft: ProductDraft) -> Self {
        let price = draft.resolved_price();
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            category: draft.category,
            price,
            quantity: draft.quantity,
            weight: draft.weight,
            weight_unit: draft.weight_unit,
            price_per_kilo: draft.price_per_kilo,
            created_at: Utc::now(),
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// A product as entered by the user, before the store assigns identity.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    pub category: Option<String>,
    pub price: f64,
    pub quantity: u32,
    pub weight: Option<f64>,
    pub weight_unit: Option<WeightUnit>,
    pub price_per_kilo: Option<f64>,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: f64, quantity: u32) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Price the product by weight. Sets the predefined weight category,
    /// which is what activates the computation in [`Product::new`].
    pub fn weighted(mut self, weight: f64, unit: WeightUnit, price_per_kilo: f64) -> Self {
        self.category = Some(WEIGHTED_CATEGORY.to_string());
        self.weight = Some(weight);
        self.weight_unit = Some(unit);
        self.price_per_kilo = Some(price_per_kilo);
        self
    }

    /// The price the materialized product will carry: weight-priced drafts
    /// derive it from `price_per_kilo × weight-in-kg`, everything else keeps
    /// the entered price.
    fn resolved_price(&self) -> f64 {
        if self.category.as_deref() == Some(WEIGHTED_CATEGORY) {
            if let (Some(weight), Some(per_kilo)) = (self.weight, self.price_per_kilo) {
                let unit = self.weight_unit.unwrap_or(WeightUnit::Kilograms);
                return per_kilo * unit.to_kilos(weight);
            }
        }
        self.price
    }
}

/// Partial update for a single cart entry. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct CartUpdate {
    pub price: Option<f64>,
    pub quantity: Option<u32>,
}

impl CartUpdate {
    pub fn price(value: f64) -> Self {
        Self {
            price: Some(value),
            quantity: None,
        }
    }

    pub fn quantity(value: u32) -> Self {
        Self {
            quantity: Some(value),
            price: None,
        }
    }

    pub fn apply(&self, product: &mut Product) {
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
    }
}
