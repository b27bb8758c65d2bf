//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Default image used when a new item is created without one
pub const DEFAULT_IMAGE: &str = "/images/pizzas/default.jpeg";

/// Default size set for new items
pub fn default_sizes() -> Vec<String> {
    vec!["small".into(), "medium".into(), "large".into()]
}

/// Menu catalog entry
///
/// `id` is a stable numeric string assigned by the catalog on insert and
/// never changed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Price in currency units, always > 0
    pub price: f64,
    /// Open category set: vegetarian, meat, seafood, ...
    pub category: String,
    pub image: String,
    pub ingredients: Vec<String>,
    pub sizes: Vec<String>,
    pub available: bool,
}

/// Create menu item payload
///
/// `name`, `description`, `price` and `category` are required; everything
/// else falls back to catalog defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    pub available: Option<bool>,
}

/// Partial update payload (shallow merge; the id cannot be patched)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    pub available: Option<bool>,
}
