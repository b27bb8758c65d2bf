//! Business services
//!
//! Each service owns one collection family on the record store:
//!
//! - [`MenuCatalog`] - menu CRUD and id assignment
//! - [`OrderService`] - order-id issuance, order lifecycle, award embedding
//! - [`RewardsLedger`] - Unity Rewards points ledger
//! - [`Seeder`] - first-boot and admin seeding

pub mod menu;
pub mod orders;
pub mod rewards;
pub mod seed;

pub use menu::MenuCatalog;
pub use orders::{OrderPage, OrderService};
pub use rewards::{RewardsLedger, UnityConfig};
pub use seed::{SeedOutcome, Seeder};
