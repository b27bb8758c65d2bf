//! Order Model
//!
//! Orders snapshot menu names and prices at creation time; later menu edits
//! never rewrite an existing order. The status field is a small state
//! machine driven externally (kitchen/delivery front ends).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::rewards::{MembershipTier, PointsCalculation};

/// Order lifecycle states
///
/// `delivered` and `cancelled` are terminal; `cancelled` is reachable from
/// any non-terminal state. Unknown statuses are rejected at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// A single order line with name and unit price snapshotted from the menu
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub pizza_id: String,
    pub name: String,
    pub quantity: u32,
    pub size: String,
    /// Unit price snapshot (catalog price at order time)
    pub price: f64,
    /// price × quantity, rounded to 2 decimals
    pub subtotal: f64,
}

/// Customer identity blob
///
/// Opaque to the engine apart from the identity fields used to derive the
/// rewards user key. Extra fields round-trip untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CustomerInfo {
    /// Rewards user key: id, username, email or phone — first one present.
    /// Guest orders (none present) return None and fall back to the order id.
    pub fn user_key(&self) -> Option<String> {
        self.id
            .clone()
            .or_else(|| self.username.clone())
            .or_else(|| self.email.clone())
            .or_else(|| self.phone.clone())
    }
}

/// Award snapshot embedded into the order at creation time.
/// Immutable once written — never recomputed for that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnityRewardsSnapshot {
    pub user_id: String,
    pub points_earned: i64,
    pub total_points: i64,
    pub lifetime_points: i64,
    pub tier: MembershipTier,
    /// Welcome bonus amount if this award created the profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub welcome_bonus: Option<i64>,
    pub calculation: PointsCalculation,
}

/// Persisted order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub items: Vec<OrderLine>,
    pub customer_info: CustomerInfo,
    /// Opaque delivery address blob
    pub delivery_address: serde_json::Value,
    /// Sum of line subtotals, rounded to 2 decimals
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unity_rewards: Option<UnityRewardsSnapshot>,
}

/// Order line as submitted by a client (prices come from the catalog,
/// never from the request)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub pizza_id: String,
    /// Defaults to 1
    pub quantity: Option<u32>,
    /// Defaults to "medium"
    pub size: Option<String>,
}

/// Order submission payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub items: Vec<OrderLineRequest>,
    #[serde(default)]
    pub customer_info: CustomerInfo,
    #[serde(default)]
    pub delivery_address: serde_json::Value,
}
