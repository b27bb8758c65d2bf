//! Unity Rewards Model
//!
//! Per-user points ledger: spendable balance, lifetime points, derived
//! membership tier and an append-only transaction log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Membership tier, derived purely from lifetime points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl MembershipTier {
    /// Tier thresholds on lifetime points. Total order, recomputed on every
    /// ledger mutation — never cached independently.
    pub fn for_lifetime_points(lifetime_points: i64) -> Self {
        if lifetime_points >= 5000 {
            MembershipTier::Platinum
        } else if lifetime_points >= 2500 {
            MembershipTier::Gold
        } else if lifetime_points >= 1000 {
            MembershipTier::Silver
        } else {
            MembershipTier::Bronze
        }
    }
}

/// Ledger transaction kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    WelcomeBonus,
    Purchase,
    Redemption,
}

/// One entry in the append-only transaction log
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardsTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Signed point delta (negative for redemptions)
    pub points: i64,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

/// Persisted per-user rewards profile, keyed by user id
/// (customer id/username/email/phone)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardsProfile {
    pub user_id: String,
    /// Current spendable balance, never negative
    pub total_points: i64,
    /// Monotonically non-decreasing; redemptions never reduce it
    pub lifetime_points: i64,
    pub tier: MembershipTier,
    pub transactions: Vec<RewardsTransaction>,
    pub joined_at: DateTime<Utc>,
    /// Cleared on first profile retrieval
    pub is_new_member: bool,
}

/// Bonus tier rule: orders of at least `min_amount` earn
/// `bonus_percentage`% extra base points
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusTier {
    pub min_amount: f64,
    pub bonus_percentage: u32,
}

/// The tier applied to a calculation (wire-level subset of [`BonusTier`])
pub type AppliedTier = BonusTier;

/// Breakdown of a points calculation for one purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsCalculation {
    pub base_points: i64,
    pub bonus_points: i64,
    pub total_points: i64,
    /// None when no bonus tier qualified
    pub applied_tier: Option<AppliedTier>,
}

/// Result of awarding points to a user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardResult {
    pub user_id: String,
    pub points_earned: i64,
    pub total_points: i64,
    pub lifetime_points: i64,
    pub tier: MembershipTier,
    /// Set when this award created the profile (welcome bonus granted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub welcome_bonus: Option<i64>,
}

/// Result of a redemption
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionResult {
    pub user_id: String,
    pub points_redeemed: i64,
    pub remaining_points: i64,
    pub lifetime_points: i64,
    pub tier: MembershipTier,
}

/// Profile view returned by the profile endpoint
/// (10 most recent transactions, newest first)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub user_id: String,
    pub total_points: i64,
    pub lifetime_points: i64,
    pub tier: MembershipTier,
    pub joined_at: DateTime<Utc>,
    pub recent_transactions: Vec<RewardsTransaction>,
}

/// Administrative member summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub user_id: String,
    pub total_points: i64,
    pub lifetime_points: i64,
    pub tier: MembershipTier,
    pub joined_at: DateTime<Utc>,
    pub transaction_count: usize,
}
