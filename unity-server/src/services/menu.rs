//! Menu Catalog
//!
//! CRUD over menu items on top of the record store. The catalog owns id
//! assignment: new items get `max(existing numeric ids) + 1` as a string,
//! starting at 1 on an empty menu. Catalogs are small (hundreds of items at
//! most), so filtering happens in memory after a full read.

use crate::store::{RecordStore, collections};
use crate::utils::{AppError, AppResult};
use shared::models::menu_item::{DEFAULT_IMAGE, default_sizes};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

/// Menu catalog service
#[derive(Clone)]
pub struct MenuCatalog {
    store: RecordStore,
}

impl MenuCatalog {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// List menu items, optionally filtered by category (case-insensitive
    /// exact match) and availability
    pub fn list(&self, category: Option<&str>, available: Option<bool>) -> AppResult<Vec<MenuItem>> {
        let menu: Vec<MenuItem> = self.store.read(collections::MENU, Vec::new)?;

        Ok(menu
            .into_iter()
            .filter(|item| {
                category.is_none_or(|c| item.category.eq_ignore_ascii_case(c))
                    && available.is_none_or(|a| item.available == a)
            })
            .collect())
    }

    /// Get a single menu item by id
    pub fn get(&self, id: &str) -> AppResult<MenuItem> {
        let menu: Vec<MenuItem> = self.store.read(collections::MENU, Vec::new)?;
        menu.into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| AppError::not_found(format!("Pizza with id {} not found", id)))
    }

    /// Create a menu item, assigning the next numeric id
    pub fn create(&self, payload: MenuItemCreate) -> AppResult<MenuItem> {
        let (name, description, price, category) = match (
            payload.name,
            payload.description,
            payload.price,
            payload.category,
        ) {
            (Some(n), Some(d), Some(p), Some(c)) => (n, d, p, c),
            _ => {
                return Err(AppError::validation(
                    "name, description, price, and category are required",
                ));
            }
        };

        if !(price > 0.0) {
            return Err(AppError::validation("price must be a positive number"));
        }

        self.store
            .update(collections::MENU, Vec::<MenuItem>::new, |menu| {
                let max_id = menu
                    .iter()
                    .filter_map(|item| item.id.parse::<i64>().ok())
                    .max()
                    .unwrap_or(0);

                let item = MenuItem {
                    id: (max_id + 1).to_string(),
                    name,
                    description,
                    price,
                    category,
                    image: payload.image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
                    ingredients: payload.ingredients.unwrap_or_default(),
                    sizes: payload.sizes.unwrap_or_else(default_sizes),
                    available: payload.available.unwrap_or(true),
                };

                menu.push(item.clone());
                Ok::<_, AppError>(item)
            })
    }

    /// Shallow-merge a patch into an existing item; the id is immutable
    pub fn update(&self, id: &str, patch: MenuItemUpdate) -> AppResult<MenuItem> {
        if let Some(price) = patch.price
            && !(price > 0.0)
        {
            return Err(AppError::validation("price must be a positive number"));
        }

        self.store
            .update(collections::MENU, Vec::<MenuItem>::new, |menu| {
                let item = menu
                    .iter_mut()
                    .find(|item| item.id == id)
                    .ok_or_else(|| AppError::not_found(format!("Pizza with id {} not found", id)))?;

                if let Some(name) = patch.name {
                    item.name = name;
                }
                if let Some(description) = patch.description {
                    item.description = description;
                }
                if let Some(price) = patch.price {
                    item.price = price;
                }
                if let Some(category) = patch.category {
                    item.category = category;
                }
                if let Some(image) = patch.image {
                    item.image = image;
                }
                if let Some(ingredients) = patch.ingredients {
                    item.ingredients = ingredients;
                }
                if let Some(sizes) = patch.sizes {
                    item.sizes = sizes;
                }
                if let Some(available) = patch.available {
                    item.available = available;
                }

                Ok(item.clone())
            })
    }

    /// Delete an item by id. Returns whether it existed.
    pub fn delete(&self, id: &str) -> AppResult<bool> {
        self.store
            .update(collections::MENU, Vec::<MenuItem>::new, |menu| {
                let before = menu.len();
                menu.retain(|item| item.id != id);
                Ok::<_, AppError>(menu.len() < before)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> MenuCatalog {
        MenuCatalog::new(RecordStore::open_in_memory().unwrap())
    }

    fn create_payload(name: &str, price: f64, category: &str) -> MenuItemCreate {
        MenuItemCreate {
            name: Some(name.to_string()),
            description: Some(format!("{} description", name)),
            price: Some(price),
            category: Some(category.to_string()),
            image: None,
            ingredients: None,
            sizes: None,
            available: None,
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let catalog = catalog();

        let first = catalog
            .create(create_payload("Margherita", 12.99, "vegetarian"))
            .unwrap();
        let second = catalog
            .create(create_payload("Tandoori", 14.99, "meat"))
            .unwrap();

        assert_eq!(first.id, "1");
        assert_eq!(second.id, "2");
        assert_eq!(first.image, DEFAULT_IMAGE);
        assert_eq!(first.sizes, vec!["small", "medium", "large"]);
        assert!(first.available);
    }

    #[test]
    fn test_id_assignment_uses_max_not_count() {
        let catalog = catalog();
        catalog
            .create(create_payload("One", 10.0, "vegetarian"))
            .unwrap();
        catalog.create(create_payload("Two", 11.0, "meat")).unwrap();
        let third = catalog
            .create(create_payload("Three", 12.0, "seafood"))
            .unwrap();
        assert_eq!(third.id, "3");

        // Delete the highest id; the next assignment still derives from the
        // remaining max, not from the item count
        assert!(catalog.delete("3").unwrap());
        let next = catalog
            .create(create_payload("Four", 13.0, "meat"))
            .unwrap();
        assert_eq!(next.id, "3");

        // Delete a middle id: its slot is never reused
        assert!(catalog.delete("2").unwrap());
        let after_gap = catalog
            .create(create_payload("Five", 14.0, "seafood"))
            .unwrap();
        assert_eq!(after_gap.id, "4");
    }

    #[test]
    fn test_create_requires_fields_and_positive_price() {
        let catalog = catalog();

        let mut missing = create_payload("Nameless", 9.99, "meat");
        missing.name = None;
        assert!(matches!(
            catalog.create(missing).unwrap_err(),
            AppError::Validation(_)
        ));

        assert!(matches!(
            catalog
                .create(create_payload("Free", 0.0, "meat"))
                .unwrap_err(),
            AppError::Validation(_)
        ));
        assert!(matches!(
            catalog
                .create(create_payload("Refund", -5.0, "meat"))
                .unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[test]
    fn test_update_merges_and_keeps_id() {
        let catalog = catalog();
        catalog
            .create(create_payload("Margherita", 12.99, "vegetarian"))
            .unwrap();

        let updated = catalog
            .update(
                "1",
                MenuItemUpdate {
                    price: Some(13.49),
                    available: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, "1");
        assert_eq!(updated.price, 13.49);
        assert!(!updated.available);
        // untouched fields survive the merge
        assert_eq!(updated.name, "Margherita");
        assert_eq!(updated.category, "vegetarian");
    }

    #[test]
    fn test_update_rejects_non_positive_price() {
        let catalog = catalog();
        catalog
            .create(create_payload("Margherita", 12.99, "vegetarian"))
            .unwrap();

        let err = catalog
            .update(
                "1",
                MenuItemUpdate {
                    price: Some(0.0),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_update_unknown_id() {
        let err = catalog()
            .update("99", MenuItemUpdate::default())
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_list_filters() {
        let catalog = catalog();
        catalog
            .create(create_payload("Margherita", 12.99, "vegetarian"))
            .unwrap();
        catalog
            .create(create_payload("Tandoori", 14.99, "meat"))
            .unwrap();
        catalog
            .update(
                "2",
                MenuItemUpdate {
                    available: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(catalog.list(None, None).unwrap().len(), 2);
        // category match is case-insensitive
        assert_eq!(catalog.list(Some("VEGETARIAN"), None).unwrap().len(), 1);
        assert_eq!(catalog.list(None, Some(true)).unwrap().len(), 1);
        assert_eq!(catalog.list(Some("meat"), Some(true)).unwrap().len(), 0);
    }

    #[test]
    fn test_delete() {
        let catalog = catalog();
        catalog
            .create(create_payload("Margherita", 12.99, "vegetarian"))
            .unwrap();

        assert!(catalog.delete("1").unwrap());
        assert!(!catalog.delete("1").unwrap());
        assert!(matches!(
            catalog.get("1").unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
