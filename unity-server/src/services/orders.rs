//! Order Counter & Order Catalog
//!
//! Owns order-id issuance (`ORD-NNNNNN`, zero-padded, strictly increasing,
//! durable across restarts) and order persistence. Order creation validates
//! line items against the live menu, prices them from the catalog (never
//! from the client), persists the order, then synchronously awards Unity
//! points for the total and embeds the award snapshot.
//!
//! Order-write and ledger-award are two separate atomic steps, not one
//! transaction: when the award fails the order stays persisted without its
//! `unityRewards` snapshot. The award is idempotent per order id, so the
//! caller may retry it later without double-crediting.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::services::{MenuCatalog, RewardsLedger};
use crate::store::{RecordStore, collections};
use crate::utils::{AppError, AppResult, round2};
use shared::models::{
    MenuItem, Order, OrderCreate, OrderLine, OrderStatus, UnityRewardsSnapshot,
};

/// Persisted order-id counter document
#[derive(Debug, Serialize, Deserialize)]
struct OrderCounter {
    counter: u64,
}

impl Default for OrderCounter {
    fn default() -> Self {
        Self { counter: 1 }
    }
}

/// A page of orders plus the total number of matches before pagination
#[derive(Debug)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub total: usize,
}

/// Order service
#[derive(Clone)]
pub struct OrderService {
    store: RecordStore,
    menu: MenuCatalog,
    rewards: RewardsLedger,
}

impl OrderService {
    pub fn new(store: RecordStore, menu: MenuCatalog, rewards: RewardsLedger) -> Self {
        Self {
            store,
            menu,
            rewards,
        }
    }

    /// Issue the next order id.
    ///
    /// Reads the counter, formats the id, and persists the incremented
    /// counter before the id is considered issued — all inside one store
    /// transaction, so concurrent issuances can never share an id.
    fn issue_order_id(&self) -> AppResult<String> {
        self.store
            .update(collections::ORDER_COUNTER, OrderCounter::default, |c| {
                let order_id = format!("ORD-{:06}", c.counter);
                c.counter += 1;
                Ok::<_, AppError>(order_id)
            })
    }

    /// Create an order from a client submission.
    ///
    /// Every line's `pizzaId` must exist in the menu; an unknown id rejects
    /// the whole order (no partial orders). Subtotals and the total come
    /// from catalog prices.
    pub fn create(&self, payload: OrderCreate) -> AppResult<Order> {
        if payload.items.is_empty() {
            return Err(AppError::validation("Order must contain at least one item"));
        }

        let menu: Vec<MenuItem> = self.menu.list(None, None)?;

        let mut items = Vec::with_capacity(payload.items.len());
        for line in &payload.items {
            let pizza = menu
                .iter()
                .find(|p| p.id == line.pizza_id)
                .ok_or_else(|| {
                    AppError::not_found(format!("Pizza with id {} not found", line.pizza_id))
                })?;

            let quantity = line.quantity.unwrap_or(1);
            if quantity < 1 {
                return Err(AppError::validation("quantity must be at least 1"));
            }

            items.push(OrderLine {
                pizza_id: pizza.id.clone(),
                name: pizza.name.clone(),
                quantity,
                size: line.size.clone().unwrap_or_else(|| "medium".to_string()),
                price: pizza.price,
                subtotal: round2(pizza.price * f64::from(quantity)),
            });
        }

        let total = round2(items.iter().map(|i| i.subtotal).sum());
        let order_id = self.issue_order_id()?;
        let now = Utc::now();

        let mut order = Order {
            order_id: order_id.clone(),
            items,
            customer_info: payload.customer_info,
            delivery_address: payload.delivery_address,
            total,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
            unity_rewards: None,
        };

        self.store
            .update(collections::ORDERS, Vec::<Order>::new, |orders| {
                orders.push(order.clone());
                Ok::<_, AppError>(())
            })?;

        // Award Unity points for the purchase. Guests without any identity
        // field earn under the order id itself.
        let calculation = self.rewards.calculate_points(total);
        let user_id = order
            .customer_info
            .user_key()
            .unwrap_or_else(|| order_id.clone());

        match self
            .rewards
            .award(&user_id, calculation.total_points, &order_id)
        {
            Ok(award) => {
                let snapshot = UnityRewardsSnapshot {
                    user_id: award.user_id,
                    points_earned: award.points_earned,
                    total_points: award.total_points,
                    lifetime_points: award.lifetime_points,
                    tier: award.tier,
                    welcome_bonus: award.welcome_bonus,
                    calculation,
                };
                order.unity_rewards = Some(snapshot.clone());
                self.attach_rewards_snapshot(&order_id, snapshot)?;
            }
            Err(e) => {
                // The order is already persisted; leave it without a rewards
                // snapshot rather than rolling back (documented gap).
                warn!(
                    order_id = %order_id,
                    error = %e,
                    "Rewards award failed after order persistence"
                );
            }
        }

        Ok(order)
    }

    /// Write the award snapshot into the stored order, once.
    /// An already-set snapshot is never recomputed or replaced.
    fn attach_rewards_snapshot(
        &self,
        order_id: &str,
        snapshot: UnityRewardsSnapshot,
    ) -> AppResult<()> {
        self.store
            .update(collections::ORDERS, Vec::<Order>::new, |orders| {
                if let Some(order) = orders.iter_mut().find(|o| o.order_id == order_id)
                    && order.unity_rewards.is_none()
                {
                    order.unity_rewards = Some(snapshot);
                }
                Ok::<_, AppError>(())
            })
    }

    /// List orders, newest first, optionally filtered by status, with
    /// offset/limit pagination
    pub fn list(
        &self,
        status: Option<OrderStatus>,
        limit: usize,
        offset: usize,
    ) -> AppResult<OrderPage> {
        let mut orders: Vec<Order> = self.store.read(collections::ORDERS, Vec::new)?;

        if let Some(status) = status {
            orders.retain(|o| o.status == status);
        }

        orders.sort_by_key(|o| std::cmp::Reverse(o.created_at));

        let total = orders.len();
        let orders = orders.into_iter().skip(offset).take(limit).collect();

        Ok(OrderPage { orders, total })
    }

    /// Get an order by id
    pub fn get(&self, order_id: &str) -> AppResult<Order> {
        let orders: Vec<Order> = self.store.read(collections::ORDERS, Vec::new)?;
        orders
            .into_iter()
            .find(|o| o.order_id == order_id)
            .ok_or_else(|| AppError::not_found(format!("Order with id {} not found", order_id)))
    }

    /// Transition an order to a new status.
    ///
    /// `delivered` and `cancelled` are terminal: no transition leaves them.
    /// Every accepted transition bumps `updatedAt`.
    pub fn update_status(&self, order_id: &str, status: OrderStatus) -> AppResult<Order> {
        self.store
            .update(collections::ORDERS, Vec::<Order>::new, |orders| {
                let order = orders
                    .iter_mut()
                    .find(|o| o.order_id == order_id)
                    .ok_or_else(|| {
                        AppError::not_found(format!("Order with id {} not found", order_id))
                    })?;

                if order.status.is_terminal() {
                    return Err(AppError::validation(format!(
                        "Cannot change status of a {} order",
                        order.status.as_str()
                    )));
                }

                order.status = status;
                order.updated_at = Utc::now();
                Ok(order.clone())
            })
    }

    /// Delete an order by id. Returns whether it existed.
    pub fn delete(&self, order_id: &str) -> AppResult<bool> {
        self.store
            .update(collections::ORDERS, Vec::<Order>::new, |orders| {
                let before = orders.len();
                orders.retain(|o| o.order_id != order_id);
                Ok::<_, AppError>(orders.len() < before)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::UnityConfig;
    use shared::models::{CustomerInfo, MenuItemCreate, OrderLineRequest};

    fn service() -> OrderService {
        let store = RecordStore::open_in_memory().unwrap();
        let menu = MenuCatalog::new(store.clone());
        let rewards = RewardsLedger::new(store.clone(), UnityConfig::default());

        menu.create(MenuItemCreate {
            name: Some("Margherita Classic".to_string()),
            description: Some("Classic pizza".to_string()),
            price: Some(12.99),
            category: Some("vegetarian".to_string()),
            image: None,
            ingredients: None,
            sizes: None,
            available: None,
        })
        .unwrap();
        menu.create(MenuItemCreate {
            name: Some("Hot Butter Prawn".to_string()),
            description: Some("Prawns in spicy butter sauce".to_string()),
            price: Some(17.99),
            category: Some("seafood".to_string()),
            image: None,
            ingredients: None,
            sizes: None,
            available: None,
        })
        .unwrap();

        OrderService::new(store, menu, rewards)
    }

    fn line(pizza_id: &str, quantity: u32) -> OrderLineRequest {
        OrderLineRequest {
            pizza_id: pizza_id.to_string(),
            quantity: Some(quantity),
            size: None,
        }
    }

    fn submission(lines: Vec<OrderLineRequest>) -> OrderCreate {
        OrderCreate {
            items: lines,
            customer_info: CustomerInfo {
                email: Some("alice@example.com".to_string()),
                ..Default::default()
            },
            delivery_address: serde_json::json!({"street": "1 Main St"}),
        }
    }

    #[test]
    fn test_order_ids_are_sequential_from_fresh_counter() {
        let service = service();

        let ids: Vec<String> = (0..3)
            .map(|_| service.create(submission(vec![line("1", 1)])).unwrap().order_id)
            .collect();

        assert_eq!(ids, vec!["ORD-000001", "ORD-000002", "ORD-000003"]);
    }

    #[test]
    fn test_create_prices_from_catalog() {
        let service = service();

        let order = service
            .create(submission(vec![line("1", 2), line("2", 1)]))
            .unwrap();

        assert_eq!(order.items[0].subtotal, 25.98);
        assert_eq!(order.items[1].subtotal, 17.99);
        assert_eq!(order.total, 43.97);
        assert_eq!(order.status, OrderStatus::Pending);
        // defaults applied
        assert_eq!(order.items[0].size, "medium");
    }

    #[test]
    fn test_create_embeds_rewards_snapshot() {
        let service = service();

        let order = service.create(submission(vec![line("1", 2)])).unwrap();

        let rewards = order.unity_rewards.expect("award embedded");
        assert_eq!(rewards.user_id, "alice@example.com");
        // 25.98 → 259 base points, below the first bonus tier
        assert_eq!(rewards.calculation.base_points, 259);
        assert_eq!(rewards.calculation.bonus_points, 0);
        assert_eq!(rewards.welcome_bonus, Some(100));
        assert_eq!(rewards.total_points, 359);

        // The persisted copy carries the same immutable snapshot
        let stored = service.get(&order.order_id).unwrap();
        assert_eq!(
            stored.unity_rewards.unwrap().total_points,
            rewards.total_points
        );
    }

    #[test]
    fn test_guest_order_earns_under_order_id() {
        let service = service();

        let order = service
            .create(OrderCreate {
                items: vec![line("1", 1)],
                customer_info: CustomerInfo::default(),
                delivery_address: serde_json::Value::Null,
            })
            .unwrap();

        let rewards = order.unity_rewards.unwrap();
        assert_eq!(rewards.user_id, order.order_id);
    }

    #[test]
    fn test_create_rejects_unknown_pizza() {
        let service = service();

        let err = service
            .create(submission(vec![line("1", 1), line("999", 1)]))
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        // No partial order was persisted, no order id burned into the list
        let page = service.list(None, 50, 0).unwrap();
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_create_rejects_empty_order() {
        let err = service().create(submission(vec![])).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_list_filters_sorts_and_paginates() {
        let service = service();
        for _ in 0..5 {
            service.create(submission(vec![line("1", 1)])).unwrap();
        }
        service
            .update_status("ORD-000002", OrderStatus::Cancelled)
            .unwrap();

        let page = service.list(None, 2, 0).unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.orders.len(), 2);
        // newest first
        assert_eq!(page.orders[0].order_id, "ORD-000005");

        let page = service.list(None, 2, 4).unwrap();
        assert_eq!(page.orders.len(), 1);
        assert_eq!(page.orders[0].order_id, "ORD-000001");

        let cancelled = service.list(Some(OrderStatus::Cancelled), 50, 0).unwrap();
        assert_eq!(cancelled.total, 1);
        assert_eq!(cancelled.orders[0].order_id, "ORD-000002");
    }

    #[test]
    fn test_status_transitions() {
        let service = service();
        service.create(submission(vec![line("1", 1)])).unwrap();

        // pending → preparing → ready → out-for-delivery → delivered
        for status in [
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
        ] {
            let order = service.update_status("ORD-000001", status).unwrap();
            assert_eq!(order.status, status);
        }

        // delivered is terminal
        let err = service
            .update_status("ORD-000001", OrderStatus::Preparing)
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_cancel_reachable_from_any_non_terminal_state() {
        let service = service();

        for target in [OrderStatus::Pending, OrderStatus::Preparing, OrderStatus::Ready] {
            let order = service.create(submission(vec![line("1", 1)])).unwrap();
            if target != OrderStatus::Pending {
                service.update_status(&order.order_id, target).unwrap();
            }
            let cancelled = service
                .update_status(&order.order_id, OrderStatus::Cancelled)
                .unwrap();
            assert_eq!(cancelled.status, OrderStatus::Cancelled);

            // cancelled is terminal
            let err = service
                .update_status(&order.order_id, OrderStatus::Pending)
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[test]
    fn test_status_update_bumps_updated_at() {
        let service = service();
        let order = service.create(submission(vec![line("1", 1)])).unwrap();

        let updated = service
            .update_status(&order.order_id, OrderStatus::Preparing)
            .unwrap();
        assert!(updated.updated_at >= order.updated_at);
        assert_eq!(updated.created_at, order.created_at);
    }

    #[test]
    fn test_delete_order() {
        let service = service();
        service.create(submission(vec![line("1", 1)])).unwrap();

        assert!(service.delete("ORD-000001").unwrap());
        assert!(!service.delete("ORD-000001").unwrap());
        assert!(matches!(
            service.get("ORD-000001").unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn test_counter_survives_order_deletion() {
        let service = service();
        service.create(submission(vec![line("1", 1)])).unwrap();
        service.delete("ORD-000001").unwrap();

        // Deleting orders never rewinds the counter; ids are never reused
        let order = service.create(submission(vec![line("1", 1)])).unwrap();
        assert_eq!(order.order_id, "ORD-000002");
    }
}
