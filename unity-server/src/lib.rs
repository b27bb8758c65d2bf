//! Unity Order Server - rewards ledger and order persistence engine
//!
//! # Architecture overview
//!
//! REST backend for the pizza ordering platform:
//!
//! - **Record store** (`store`): redb-backed named JSON collections
//! - **Services** (`services`): menu catalog, order lifecycle, Unity Rewards
//!   ledger, seeding
//! - **HTTP API** (`api`): versioned REST endpoints under `/api/v1`
//! - **Scope enforcement** (`auth`): gateway-stamped scope header checks
//!
//! # Module structure
//!
//! ```text
//! unity-server/src/
//! ├── core/       # configuration, state, server
//! ├── auth/       # scope middleware
//! ├── services/   # menu, orders, rewards, seed
//! ├── api/        # HTTP routes and handlers
//! ├── store/      # redb record store
//! └── utils/      # errors, logging, money rounding
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod services;
pub mod store;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use services::{MenuCatalog, OrderService, RewardsLedger, Seeder, UnityConfig};
pub use store::{RecordStore, StoreError};
pub use utils::{AppError, AppResult};

// Re-export logger setup
pub use utils::logger::init_logger;
