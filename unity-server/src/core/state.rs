use anyhow::Context;

use crate::core::Config;
use crate::services::{MenuCatalog, OrderService, RewardsLedger, Seeder, UnityConfig};
use crate::store::RecordStore;

/// Server state - shared handles to every service
///
/// Cheap to clone: the services share one [`RecordStore`] behind an `Arc`.
///
/// | Field | Owns |
/// |-------|------|
/// | config | immutable configuration |
/// | store | redb record store |
/// | menu | menu catalog |
/// | orders | order lifecycle + award embedding |
/// | rewards | Unity Rewards ledger |
/// | seeder | seeding / clearing |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: RecordStore,
    pub menu: MenuCatalog,
    pub orders: OrderService,
    pub rewards: RewardsLedger,
    pub seeder: Seeder,
}

impl ServerState {
    /// Initialize the server state.
    ///
    /// Creates the working directory, opens the database, wires the
    /// services, and runs the first-boot seed (a no-op when the seed flag
    /// is already present).
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.work_dir)
            .with_context(|| format!("Failed to create work directory {}", config.work_dir))?;

        let store = RecordStore::open(config.db_path())
            .with_context(|| format!("Failed to open database at {:?}", config.db_path()))?;

        let unity_config = UnityConfig {
            points_per_dollar: config.points_per_dollar,
            welcome_bonus: config.welcome_bonus,
            ..UnityConfig::default()
        };

        let menu = MenuCatalog::new(store.clone());
        let rewards = RewardsLedger::new(store.clone(), unity_config);
        let orders = OrderService::new(store.clone(), menu.clone(), rewards.clone());
        let seeder = Seeder::new(store.clone());

        seeder.seed(false).context("First-boot seeding failed")?;

        Ok(Self {
            config: config.clone(),
            store,
            menu,
            orders,
            rewards,
            seeder,
        })
    }
}
