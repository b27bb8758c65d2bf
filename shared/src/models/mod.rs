//! Data models
//!
//! # Modules
//!
//! - [`menu_item`] - menu catalog entities
//! - [`order`] - orders, order lines, status machine
//! - [`rewards`] - Unity Rewards profiles, transactions, tiers

pub mod menu_item;
pub mod order;
pub mod rewards;

pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::{
    CustomerInfo, Order, OrderCreate, OrderLine, OrderLineRequest, OrderStatus,
    UnityRewardsSnapshot,
};
pub use rewards::{
    AppliedTier, AwardResult, BonusTier, MemberSummary, MembershipTier, PointsCalculation,
    ProfileView, RedemptionResult, RewardsProfile, RewardsTransaction, TransactionKind,
};
