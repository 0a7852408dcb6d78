//! Experience configuration, XP actions, badges and rewards.

use sqlx::PgConnection;
use tixello_core::types::DbId;
use tixello_db::models::gamification::{
    NewBadge, NewExperienceAction, NewExperienceConfig, NewReward,
};
use tixello_db::repositories::{GamificationRepo, TenantRepo};

use crate::error::SeedError;
use crate::fixtures::gamification::Gamification;
use crate::report::SeedReport;

pub const NAME: &str = "gamification";

/// Write the gamification catalog for `tenant_slug`, or the platform-wide
/// defaults when it is `None`.
///
/// A named tenant that does not exist skips the seeder with a warning
/// rather than falling back to the global scope.
pub async fn seed(
    conn: &mut PgConnection,
    tenant_slug: Option<&str>,
) -> Result<SeedReport, SeedError> {
    let fixture = Gamification::load()?;
    fixture.validate().map_err(SeedError::invalid(Gamification::NAME))?;

    let mut report = SeedReport::new(NAME);
    let tenant_id = match tenant_slug {
        None => None,
        Some(slug) => match TenantRepo::find_by_slug(conn, slug).await? {
            Some(tenant) => Some(tenant.id),
            None => {
                tracing::warn!(tenant = slug, "Tenant not found, skipping gamification");
                report.skip();
                return Ok(report);
            }
        },
    };

    seed_fixture(conn, &fixture, tenant_id, &mut report).await?;
    tracing::debug!(
        tenant = tenant_slug.unwrap_or("global"),
        actions = fixture.actions.len(),
        badges = fixture.badges.len(),
        rewards = fixture.rewards.len(),
        "Gamification written"
    );
    Ok(report)
}

async fn seed_fixture(
    conn: &mut PgConnection,
    fixture: &Gamification,
    tenant_id: Option<DbId>,
    report: &mut SeedReport,
) -> Result<(), SeedError> {
    let experience = &fixture.experience;
    let encode = |source| SeedError::Fixture {
        fixture: Gamification::NAME,
        source,
    };
    let level_groups = serde_json::to_value(&experience.level_groups).map_err(encode)?;
    let level_rewards = serde_json::to_value(&experience.level_rewards).map_err(encode)?;

    let outcome = GamificationRepo::upsert_config(
        conn,
        &NewExperienceConfig {
            tenant_id,
            xp_name: experience.xp_name.to_json(),
            level_name: experience.level_name.to_json(),
            icon: &experience.icon,
            level_formula: experience.level_formula.as_str(),
            base_xp_per_level: experience.base_xp_per_level,
            level_multiplier: experience.level_multiplier,
            max_level: experience.max_level,
            level_groups: &level_groups,
            level_rewards: &level_rewards,
        },
    )
    .await?;
    report.record(outcome);

    for action in &fixture.actions {
        let outcome = GamificationRepo::upsert_action(
            conn,
            &NewExperienceAction {
                tenant_id,
                action_type: &action.action_type,
                name: action.name.to_json(),
                description: action.description.to_json(),
                xp_type: action.xp_type.as_str(),
                xp_amount: action.xp_amount,
                xp_per_currency_unit: action.xp_per_currency_unit,
                max_xp_per_action: action.max_xp_per_action,
                max_times_per_day: action.max_times_per_day,
                cooldown_hours: action.cooldown_hours,
            },
        )
        .await?;
        report.record(outcome);
    }

    for badge in &fixture.badges {
        let outcome = GamificationRepo::upsert_badge(
            conn,
            &NewBadge {
                tenant_id,
                slug: &badge.slug,
                name: badge.name.to_json(),
                description: badge.description.to_json(),
                icon_emoji: &badge.emoji,
                color: &badge.color,
                category: badge.category.as_str(),
                xp_reward: badge.xp_reward,
                bonus_points: badge.bonus_points,
                conditions: &badge.conditions,
                is_secret: badge.secret,
                is_featured: badge.featured,
                rarity_level: badge.rarity,
                sort_order: badge.sort_order,
            },
        )
        .await?;
        report.record(outcome);
    }

    for reward in &fixture.rewards {
        let outcome = GamificationRepo::upsert_reward(
            conn,
            &NewReward {
                tenant_id,
                slug: &reward.slug,
                name: reward.name.to_json(),
                description: reward.description.to_json(),
                reward_type: reward.reward_type.as_str(),
                points_cost: reward.points_cost,
                value: reward.value,
                currency: reward.currency.as_deref(),
                voucher_prefix: reward.voucher_prefix.as_deref(),
                min_order_value: reward.min_order_value,
                max_redemptions_total: reward.max_redemptions_total,
                max_redemptions_per_customer: reward.max_redemptions_per_customer,
                min_level_required: reward.min_level,
                is_featured: reward.featured,
                sort_order: reward.sort_order,
            },
        )
        .await?;
        report.record(outcome);
    }
    Ok(())
}
