//! Database Seeding
//!
//! Installs the canonical pizza menu and empty ledgers on first boot, guarded
//! by a persisted seed flag so restarts never wipe live data. Admin endpoints
//! reuse the same service for force-reseed and clear.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::store::{RecordStore, collections};
use crate::utils::AppResult;
use shared::models::{MenuItem, Order, RewardsProfile};

const SEED_VERSION: &str = "1.0.0";

/// Persisted marker written after a successful seed
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedFlag {
    pub seeded_at: DateTime<Utc>,
    pub version: String,
}

/// Counts reported after seeding
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedStats {
    pub menu_items: usize,
    pub orders: usize,
    pub users: usize,
}

/// Result of a seed attempt
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedOutcome {
    pub seeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SeedStats>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OrderCounterDoc {
    counter: u64,
}

/// Seeding service
#[derive(Clone)]
pub struct Seeder {
    store: RecordStore,
}

impl Seeder {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    fn is_seeded(&self) -> AppResult<bool> {
        let flag: Option<SeedFlag> = self.store.read(collections::SEED_FLAG, || None)?;
        Ok(flag.is_some())
    }

    /// Seed the database with the canonical menu and empty ledgers.
    ///
    /// Skips when the seed flag is present unless `force` is set.
    pub fn seed(&self, force: bool) -> AppResult<SeedOutcome> {
        if !force && self.is_seeded()? {
            info!("Database already seeded, skipping");
            return Ok(SeedOutcome {
                seeded: false,
                reason: Some("Already seeded".to_string()),
                stats: None,
            });
        }

        let menu = initial_menu();

        self.store.write(collections::ORDERS, &Vec::<Order>::new())?;
        self.store
            .write(collections::ORDER_COUNTER, &OrderCounterDoc { counter: 1 })?;
        self.store.write(
            collections::REWARDS,
            &std::collections::BTreeMap::<String, RewardsProfile>::new(),
        )?;
        self.store.write(collections::MENU, &menu)?;
        self.store.write(
            collections::SEED_FLAG,
            &SeedFlag {
                seeded_at: Utc::now(),
                version: SEED_VERSION.to_string(),
            },
        )?;

        info!(menu_items = menu.len(), "Database seeded");

        Ok(SeedOutcome {
            seeded: true,
            reason: None,
            stats: Some(SeedStats {
                menu_items: menu.len(),
                orders: 0,
                users: 0,
            }),
        })
    }

    /// Reset every collection to empty and drop the seed flag
    pub fn clear(&self) -> AppResult<()> {
        self.store.write(collections::ORDERS, &Vec::<Order>::new())?;
        self.store
            .write(collections::ORDER_COUNTER, &OrderCounterDoc { counter: 1 })?;
        self.store.write(
            collections::REWARDS,
            &std::collections::BTreeMap::<String, RewardsProfile>::new(),
        )?;
        self.store.write(collections::MENU, &Vec::<MenuItem>::new())?;
        self.store.delete(collections::SEED_FLAG)?;

        info!("Database cleared");
        Ok(())
    }

    /// Clear and reseed in one step
    pub fn reseed(&self) -> AppResult<SeedOutcome> {
        self.clear()?;
        self.seed(true)
    }
}

fn pizza(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    category: &str,
    image: &str,
    ingredients: &[&str],
) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: category.to_string(),
        image: image.to_string(),
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        sizes: vec![
            "small".to_string(),
            "medium".to_string(),
            "large".to_string(),
        ],
        available: true,
    }
}

/// Canonical launch menu
pub fn initial_menu() -> Vec<MenuItem> {
    vec![
        pizza(
            "1",
            "Margherita Classic",
            "Classic pizza with tomato sauce, mozzarella, and fresh basil",
            12.99,
            "vegetarian",
            "/images/pizzas/margherita_classic.jpeg",
            &["Tomato Sauce", "Mozzarella", "Basil", "Olive Oil"],
        ),
        pizza(
            "2",
            "Tandoori Chicken",
            "Tender tandoori chicken, crisp bell peppers, onions, spiced tomato sauce",
            14.99,
            "meat",
            "/images/pizzas/tandoori_chicken.jpeg",
            &["Tandoori Sauce", "Chicken", "Bell Peppers", "Onions", "Mozzarella"],
        ),
        pizza(
            "3",
            "Spicy Jaffna Crab",
            "Rich Jaffna-style crab curry, mozzarella, onions, fiery spice. An exotic coastal delight!",
            16.5,
            "seafood",
            "/images/pizzas/spicy_jaffna_crab.jpeg",
            &["Jaffna Curry", "Crab", "Onions", "Mozzarella", "Chili"],
        ),
        pizza(
            "4",
            "Four Cheese Fusion",
            "Four cheese blend with mozzarella, cheddar, parmesan, and cream cheese",
            15.99,
            "vegetarian",
            "/images/pizzas/four_cheese_fusion.jpeg",
            &["Mozzarella", "Cheddar", "Parmesan", "Cream Cheese"],
        ),
        pizza(
            "5",
            "Curry Chicken & Cashew",
            "Savory curry chicken with roasted cashews, onions, and aromatic spices",
            15.99,
            "meat",
            "/images/pizzas/curry_chicken_cashew.jpeg",
            &["Curry Sauce", "Chicken", "Cashews", "Onions", "Mozzarella"],
        ),
        pizza(
            "6",
            "Hot Butter Prawn",
            "Succulent prawns in spicy butter sauce with onions and peppers",
            17.99,
            "seafood",
            "/images/pizzas/hot_butter_prawn.jpeg",
            &["Butter Sauce", "Prawns", "Onions", "Peppers", "Mozzarella", "Chili"],
        ),
        pizza(
            "7",
            "Spicy Paneer Veggie",
            "Spiced paneer cheese with mixed vegetables and tangy sauce",
            14.99,
            "vegetarian",
            "/images/pizzas/spicy_paneer_veggie.jpeg",
            &["Paneer", "Bell Peppers", "Onions", "Tomato Sauce", "Mozzarella", "Spices"],
        ),
        pizza(
            "8",
            "Masala Potato & Pea",
            "Savory masala spiced potatoes and green peas with aromatic herbs",
            13.99,
            "vegetarian",
            "/images/pizzas/masala_potato_pea.jpeg",
            &["Potato", "Green Peas", "Masala Spices", "Onions", "Mozzarella"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MenuCatalog;
    use shared::models::MenuItemUpdate;

    fn seeder() -> (Seeder, RecordStore) {
        let store = RecordStore::open_in_memory().unwrap();
        (Seeder::new(store.clone()), store)
    }

    #[test]
    fn test_seed_installs_canonical_menu() {
        let (seeder, store) = seeder();

        let outcome = seeder.seed(false).unwrap();
        assert!(outcome.seeded);
        assert_eq!(outcome.stats.unwrap().menu_items, 8);

        let menu: Vec<MenuItem> = store.read(collections::MENU, Vec::new).unwrap();
        assert_eq!(menu.len(), 8);
        assert_eq!(menu[0].name, "Margherita Classic");
        assert_eq!(menu[7].id, "8");
        assert!(menu.iter().all(|p| p.available));
    }

    #[test]
    fn test_seed_is_idempotent_without_force() {
        let (seeder, store) = seeder();
        seeder.seed(false).unwrap();

        // Mutate the menu, then seed again: live data must survive
        let catalog = MenuCatalog::new(store);
        catalog
            .update(
                "1",
                MenuItemUpdate {
                    price: Some(13.49),
                    ..Default::default()
                },
            )
            .unwrap();

        let outcome = seeder.seed(false).unwrap();
        assert!(!outcome.seeded);
        assert_eq!(outcome.reason.as_deref(), Some("Already seeded"));
        assert_eq!(catalog.get("1").unwrap().price, 13.49);
    }

    #[test]
    fn test_force_seed_overwrites() {
        let (seeder, store) = seeder();
        seeder.seed(false).unwrap();

        let catalog = MenuCatalog::new(store);
        catalog.delete("1").unwrap();

        let outcome = seeder.seed(true).unwrap();
        assert!(outcome.seeded);
        assert_eq!(catalog.list(None, None).unwrap().len(), 8);
    }

    #[test]
    fn test_clear_then_seed_restores() {
        let (seeder, store) = seeder();
        seeder.seed(false).unwrap();

        seeder.clear().unwrap();
        let menu: Vec<MenuItem> = store.read(collections::MENU, Vec::new).unwrap();
        assert!(menu.is_empty());
        let flag: Option<SeedFlag> = store.read(collections::SEED_FLAG, || None).unwrap();
        assert!(flag.is_none());

        // Cleared flag means a plain seed runs again
        let outcome = seeder.seed(false).unwrap();
        assert!(outcome.seeded);
    }

    #[test]
    fn test_reseed_resets_order_counter() {
        let (seeder, store) = seeder();
        seeder.seed(false).unwrap();
        store
            .write(collections::ORDER_COUNTER, &OrderCounterDoc { counter: 42 })
            .unwrap();

        seeder.reseed().unwrap();
        let counter: OrderCounterDoc = store
            .read(collections::ORDER_COUNTER, || OrderCounterDoc { counter: 0 })
            .unwrap();
        assert_eq!(counter.counter, 1);
    }
}
