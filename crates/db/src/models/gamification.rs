//! Experience levels, XP actions, badges and point-shop rewards.
//!
//! Every row carries an optional `tenant_id`; `None` is the platform-wide
//! default set that tenants without their own configuration fall back to.

use serde_json::Value;
use tixello_core::types::DbId;

/// DTO for upserting the single `experience_configs` row of a scope.
#[derive(Debug, Clone)]
pub struct NewExperienceConfig<'a> {
    pub tenant_id: Option<DbId>,
    pub xp_name: Value,
    pub level_name: Value,
    pub icon: &'a str,
    pub level_formula: &'a str,
    pub base_xp_per_level: i32,
    pub level_multiplier: f64,
    pub max_level: i32,
    pub level_groups: &'a Value,
    pub level_rewards: &'a Value,
}

/// DTO for upserting an `experience_actions` row, keyed by
/// `(tenant_id, action_type)`.
#[derive(Debug, Clone)]
pub struct NewExperienceAction<'a> {
    pub tenant_id: Option<DbId>,
    pub action_type: &'a str,
    pub name: Value,
    pub description: Value,
    pub xp_type: &'a str,
    pub xp_amount: i32,
    pub xp_per_currency_unit: Option<f64>,
    pub max_xp_per_action: Option<i32>,
    pub max_times_per_day: Option<i32>,
    pub cooldown_hours: Option<i32>,
}

/// DTO for upserting a `badges` row, keyed by `(tenant_id, slug)`.
#[derive(Debug, Clone)]
pub struct NewBadge<'a> {
    pub tenant_id: Option<DbId>,
    pub slug: &'a str,
    pub name: Value,
    pub description: Value,
    pub icon_emoji: &'a str,
    pub color: &'a str,
    pub category: &'a str,
    pub xp_reward: i32,
    pub bonus_points: i32,
    pub conditions: &'a Value,
    pub is_secret: bool,
    pub is_featured: bool,
    pub rarity_level: i16,
    pub sort_order: i32,
}

/// DTO for upserting a `rewards` row, keyed by `(tenant_id, slug)`.
#[derive(Debug, Clone)]
pub struct NewReward<'a> {
    pub tenant_id: Option<DbId>,
    pub slug: &'a str,
    pub name: Value,
    pub description: Value,
    pub reward_type: &'a str,
    pub points_cost: i32,
    /// Discount amount or percentage; `None` for vouchers and free items.
    pub value: Option<f64>,
    pub currency: Option<&'a str>,
    pub voucher_prefix: Option<&'a str>,
    pub min_order_value: Option<f64>,
    pub max_redemptions_total: Option<i32>,
    pub max_redemptions_per_customer: Option<i32>,
    pub min_level_required: i32,
    pub is_featured: bool,
    pub sort_order: i32,
}
