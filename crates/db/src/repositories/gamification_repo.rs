//! Repository for the gamification tables.
//!
//! Natural keys include a nullable `tenant_id`. The unique indexes fold it
//! with `COALESCE(tenant_id, 0)`, and every conflict target and lookup here
//! does the same so global rows deduplicate like tenant rows.

use sqlx::PgConnection;

use super::upsert_sql;
use crate::models::gamification::{
    NewBadge, NewExperienceAction, NewExperienceConfig, NewReward,
};
use crate::models::UpsertOutcome;

pub struct GamificationRepo;

impl GamificationRepo {
    /// Upsert the experience configuration of a scope. There is at most one
    /// per tenant and one global.
    pub async fn upsert_config(
        conn: &mut PgConnection,
        input: &NewExperienceConfig<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            "experience_configs",
            "(tenant_id, xp_name, level_name, icon, level_formula, base_xp_per_level, \
              level_multiplier, max_level, level_groups, level_rewards, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, true) \
             ON CONFLICT ((COALESCE(tenant_id, 0)))",
            &[
                "xp_name",
                "level_name",
                "icon",
                "level_formula",
                "base_xp_per_level",
                "level_multiplier",
                "max_level",
                "level_groups",
                "level_rewards",
                "is_active",
            ],
            "COALESCE(tenant_id, 0) = COALESCE($1, 0)",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.tenant_id)
            .bind(&input.xp_name)
            .bind(&input.level_name)
            .bind(input.icon)
            .bind(input.level_formula)
            .bind(input.base_xp_per_level)
            .bind(input.level_multiplier)
            .bind(input.max_level)
            .bind(input.level_groups)
            .bind(input.level_rewards)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn upsert_action(
        conn: &mut PgConnection,
        input: &NewExperienceAction<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            "experience_actions",
            "(tenant_id, action_type, name, description, xp_type, xp_amount, \
              xp_per_currency_unit, max_xp_per_action, max_times_per_day, cooldown_hours, \
              is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, true) \
             ON CONFLICT (COALESCE(tenant_id, 0), action_type)",
            &[
                "name",
                "description",
                "xp_type",
                "xp_amount",
                "xp_per_currency_unit",
                "max_xp_per_action",
                "max_times_per_day",
                "cooldown_hours",
                "is_active",
            ],
            "COALESCE(tenant_id, 0) = COALESCE($1, 0) AND action_type = $2",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.tenant_id)
            .bind(input.action_type)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.xp_type)
            .bind(input.xp_amount)
            .bind(input.xp_per_currency_unit)
            .bind(input.max_xp_per_action)
            .bind(input.max_times_per_day)
            .bind(input.cooldown_hours)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn upsert_badge(
        conn: &mut PgConnection,
        input: &NewBadge<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            "badges",
            "(tenant_id, slug, name, description, icon_emoji, color, category, xp_reward, \
              bonus_points, conditions, is_secret, is_featured, is_active, rarity_level, \
              sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, true, $13, $14) \
             ON CONFLICT (COALESCE(tenant_id, 0), slug)",
            &[
                "name",
                "description",
                "icon_emoji",
                "color",
                "category",
                "xp_reward",
                "bonus_points",
                "conditions",
                "is_secret",
                "is_featured",
                "is_active",
                "rarity_level",
                "sort_order",
            ],
            "COALESCE(tenant_id, 0) = COALESCE($1, 0) AND slug = $2",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.tenant_id)
            .bind(input.slug)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.icon_emoji)
            .bind(input.color)
            .bind(input.category)
            .bind(input.xp_reward)
            .bind(input.bonus_points)
            .bind(input.conditions)
            .bind(input.is_secret)
            .bind(input.is_featured)
            .bind(input.rarity_level)
            .bind(input.sort_order)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn upsert_reward(
        conn: &mut PgConnection,
        input: &NewReward<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            "rewards",
            "(tenant_id, slug, name, description, reward_type, points_cost, value, currency, \
              voucher_prefix, min_order_value, max_redemptions_total, \
              max_redemptions_per_customer, min_level_required, is_active, is_featured, \
              sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, true, $14, $15) \
             ON CONFLICT (COALESCE(tenant_id, 0), slug)",
            &[
                "name",
                "description",
                "reward_type",
                "points_cost",
                "value",
                "currency",
                "voucher_prefix",
                "min_order_value",
                "max_redemptions_total",
                "max_redemptions_per_customer",
                "min_level_required",
                "is_active",
                "is_featured",
                "sort_order",
            ],
            "COALESCE(tenant_id, 0) = COALESCE($1, 0) AND slug = $2",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.tenant_id)
            .bind(input.slug)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.reward_type)
            .bind(input.points_cost)
            .bind(input.value)
            .bind(input.currency)
            .bind(input.voucher_prefix)
            .bind(input.min_order_value)
            .bind(input.max_redemptions_total)
            .bind(input.max_redemptions_per_customer)
            .bind(input.min_level_required)
            .bind(input.is_featured)
            .bind(input.sort_order)
            .fetch_one(&mut *conn)
            .await
    }
}
