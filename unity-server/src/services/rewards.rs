//! Unity Rewards Ledger
//!
//! Cross-application loyalty points program. Points are earned on purchase
//! amounts (with tiered bonuses), accumulate into a lifetime total that
//! drives membership tiers, and can be redeemed against the spendable
//! balance.
//!
//! Ledger invariant: `total_points == lifetime_points + Σ redemption deltas`.
//! Redemptions only ever reduce the spendable balance; lifetime points never
//! decrease, and the tier is recomputed from them on every mutation.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::store::{RecordStore, collections};
use crate::utils::{AppError, AppResult};
use shared::models::{
    AwardResult, BonusTier, MemberSummary, MembershipTier, PointsCalculation, ProfileView,
    RedemptionResult, RewardsProfile, RewardsTransaction, TransactionKind,
};

/// Rewards program configuration
#[derive(Debug, Clone)]
pub struct UnityConfig {
    /// Points earned per currency unit spent
    pub points_per_dollar: u32,
    /// Bonus tiers; the highest qualifying threshold applies
    pub bonus_tiers: Vec<BonusTier>,
    /// One-time grant on profile creation
    pub welcome_bonus: i64,
}

impl Default for UnityConfig {
    fn default() -> Self {
        Self {
            points_per_dollar: 10,
            bonus_tiers: vec![
                // 10% bonus points for orders $50+
                BonusTier {
                    min_amount: 50.0,
                    bonus_percentage: 10,
                },
                // 25% bonus points for orders $100+
                BonusTier {
                    min_amount: 100.0,
                    bonus_percentage: 25,
                },
            ],
            welcome_bonus: 100,
        }
    }
}

type Ledger = BTreeMap<String, RewardsProfile>;

/// Per-user points ledger service
#[derive(Clone)]
pub struct RewardsLedger {
    store: RecordStore,
    config: UnityConfig,
}

impl RewardsLedger {
    pub fn new(store: RecordStore, config: UnityConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &UnityConfig {
        &self.config
    }

    /// Calculate loyalty points for a purchase amount.
    ///
    /// Base points are `floor(total × points_per_dollar)`. The bonus comes
    /// from the highest-threshold tier whose `min_amount <= total`, selected
    /// by an explicit sort-descending/find-first pass — tiers never stack and
    /// the configured list is never reordered in place.
    pub fn calculate_points(&self, order_total: f64) -> PointsCalculation {
        let base_points = (order_total * f64::from(self.config.points_per_dollar)).floor() as i64;

        let mut tiers = self.config.bonus_tiers.clone();
        tiers.sort_by(|a, b| {
            b.min_amount
                .partial_cmp(&a.min_amount)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let applied_tier = tiers.into_iter().find(|t| order_total >= t.min_amount);
        let bonus_points = applied_tier
            .map(|t| base_points * i64::from(t.bonus_percentage) / 100)
            .unwrap_or(0);

        PointsCalculation {
            base_points,
            bonus_points,
            total_points: base_points + bonus_points,
            applied_tier,
        }
    }

    /// Award points to a user for an order.
    ///
    /// Lazily creates the profile (welcome bonus + `welcome_bonus`
    /// transaction) on first award. Idempotent per order: a profile that
    /// already holds a `purchase` transaction for `order_id` is returned
    /// unchanged, so a retried award cannot double-credit.
    pub fn award(&self, user_id: &str, points: i64, order_id: &str) -> AppResult<AwardResult> {
        let welcome_bonus = self.config.welcome_bonus;

        self.store
            .update(collections::REWARDS, Ledger::new, |ledger| {
                let now = Utc::now();

                let (profile, is_new) = match ledger.get_mut(user_id) {
                    Some(profile) => (profile, false),
                    None => {
                        let mut profile = RewardsProfile {
                            user_id: user_id.to_string(),
                            total_points: welcome_bonus,
                            lifetime_points: welcome_bonus,
                            tier: MembershipTier::Bronze,
                            transactions: Vec::new(),
                            joined_at: now,
                            is_new_member: true,
                        };
                        profile.transactions.push(RewardsTransaction {
                            kind: TransactionKind::WelcomeBonus,
                            points: welcome_bonus,
                            timestamp: now,
                            description: "Welcome to Unity Rewards!".to_string(),
                            order_id: None,
                        });
                        ledger.insert(user_id.to_string(), profile);
                        (ledger.get_mut(user_id).expect("just inserted"), true)
                    }
                };

                // Already credited for this order: return the current
                // snapshot without touching the ledger.
                if let Some(existing) = profile.transactions.iter().find(|t| {
                    t.kind == TransactionKind::Purchase && t.order_id.as_deref() == Some(order_id)
                }) {
                    return Ok(AwardResult {
                        user_id: profile.user_id.clone(),
                        points_earned: existing.points,
                        total_points: profile.total_points,
                        lifetime_points: profile.lifetime_points,
                        tier: profile.tier,
                        welcome_bonus: None,
                    });
                }

                profile.total_points += points;
                profile.lifetime_points += points;
                profile.transactions.push(RewardsTransaction {
                    kind: TransactionKind::Purchase,
                    points,
                    timestamp: now,
                    description: format!("Order {}", order_id),
                    order_id: Some(order_id.to_string()),
                });
                profile.tier = MembershipTier::for_lifetime_points(profile.lifetime_points);

                Ok::<_, AppError>(AwardResult {
                    user_id: profile.user_id.clone(),
                    points_earned: points,
                    total_points: profile.total_points,
                    lifetime_points: profile.lifetime_points,
                    tier: profile.tier,
                    welcome_bonus: is_new.then_some(welcome_bonus),
                })
            })
    }

    /// Get a user's rewards profile with the 10 most recent transactions,
    /// newest first.
    ///
    /// The first retrieval after profile creation clears the new-member
    /// flag; reading again does not re-trigger anything.
    pub fn profile(&self, user_id: &str) -> AppResult<ProfileView> {
        self.store
            .update(collections::REWARDS, Ledger::new, |ledger| {
                let profile = ledger
                    .get_mut(user_id)
                    .ok_or_else(|| AppError::not_found("User not found in Unity Rewards program"))?;

                if profile.is_new_member {
                    profile.is_new_member = false;
                }

                let recent_transactions = profile
                    .transactions
                    .iter()
                    .rev()
                    .take(10)
                    .cloned()
                    .collect();

                Ok(ProfileView {
                    user_id: profile.user_id.clone(),
                    total_points: profile.total_points,
                    lifetime_points: profile.lifetime_points,
                    tier: profile.tier,
                    joined_at: profile.joined_at,
                    recent_transactions,
                })
            })
    }

    /// Redeem points against a user's spendable balance.
    ///
    /// Lifetime points are untouched; the transaction log records a negative
    /// delta with the caller-supplied reason.
    pub fn redeem(&self, user_id: &str, points: i64, reason: &str) -> AppResult<RedemptionResult> {
        if points <= 0 {
            return Err(AppError::validation("Points must be greater than 0"));
        }

        self.store
            .update(collections::REWARDS, Ledger::new, |ledger| {
                let profile = ledger
                    .get_mut(user_id)
                    .ok_or_else(|| AppError::not_found("User not found in Unity Rewards program"))?;

                if profile.total_points < points {
                    return Err(AppError::InsufficientPoints(
                        "Insufficient points for redemption".to_string(),
                    ));
                }

                profile.total_points -= points;
                profile.transactions.push(RewardsTransaction {
                    kind: TransactionKind::Redemption,
                    points: -points,
                    timestamp: Utc::now(),
                    description: reason.to_string(),
                    order_id: None,
                });

                Ok(RedemptionResult {
                    user_id: profile.user_id.clone(),
                    points_redeemed: points,
                    remaining_points: profile.total_points,
                    lifetime_points: profile.lifetime_points,
                    tier: profile.tier,
                })
            })
    }

    /// All members reduced to summary fields (admin view, no mutation)
    pub fn members(&self) -> AppResult<Vec<MemberSummary>> {
        let ledger: Ledger = self.store.read(collections::REWARDS, Ledger::new)?;

        Ok(ledger
            .values()
            .map(|profile| MemberSummary {
                user_id: profile.user_id.clone(),
                total_points: profile.total_points,
                lifetime_points: profile.lifetime_points,
                tier: profile.tier,
                joined_at: profile.joined_at,
                transaction_count: profile.transactions.len(),
            })
            .collect())
    }
}
