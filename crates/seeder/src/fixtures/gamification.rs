//! Experience levels, XP actions, badges and the points shop.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tixello_core::error::CoreError;
use tixello_core::i18n::Localized;
use tixello_core::natural_key::ensure_unique;
use validator::Validate;

use super::{parse, validate_all};
use crate::error::SeedError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelFormula {
    Linear,
    Exponential,
}

impl LevelFormula {
    pub fn as_str(self) -> &'static str {
        match self {
            LevelFormula::Linear => "linear",
            LevelFormula::Exponential => "exponential",
        }
    }
}

/// A named band of levels shown as a rank ("Music Lover", "Legend").
/// Stored verbatim in `experience_configs.level_groups`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelGroup {
    pub name: String,
    pub name_ro: String,
    pub min_level: i32,
    pub max_level: i32,
    pub color: String,
    pub emoji: String,
    pub description_en: String,
    pub description_ro: String,
    pub xp_range: String,
}

/// Bonus points granted on reaching a level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelReward {
    pub level: i32,
    pub bonus_points: i32,
    pub reward_name_en: String,
    pub reward_name_ro: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExperienceFixture {
    pub xp_name: Localized<String>,
    pub level_name: Localized<String>,
    pub icon: String,
    pub level_formula: LevelFormula,
    #[validate(range(min = 1))]
    pub base_xp_per_level: i32,
    #[validate(range(min = 1.0))]
    pub level_multiplier: f64,
    #[validate(range(min = 1))]
    pub max_level: i32,
    pub level_groups: Vec<LevelGroup>,
    #[serde(default)]
    pub level_rewards: Vec<LevelReward>,
}

impl ExperienceFixture {
    /// Level groups must tile `1..=max_level` without gaps or overlaps, and
    /// level rewards must sit inside that range.
    fn validate_levels(&self) -> Result<(), CoreError> {
        let mut next = 1;
        for group in &self.level_groups {
            if group.min_level != next || group.max_level < group.min_level {
                return Err(CoreError::Validation(format!(
                    "level group '{}' covers {}..={} but level {next} comes next",
                    group.name, group.min_level, group.max_level
                )));
            }
            next = group.max_level + 1;
        }
        if next != self.max_level + 1 {
            return Err(CoreError::Validation(format!(
                "level groups end at {} but max_level is {}",
                next - 1,
                self.max_level
            )));
        }
        ensure_unique("level reward", self.level_rewards.iter().map(|r| r.level))?;
        if let Some(reward) = self
            .level_rewards
            .iter()
            .find(|r| r.level < 1 || r.level > self.max_level)
        {
            return Err(CoreError::Validation(format!(
                "level reward at level {} is outside 1..={}",
                reward.level, self.max_level
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XpType {
    /// A flat `xp_amount` per occurrence.
    Fixed,
    /// `xp_per_currency_unit` XP for every unit spent.
    PerCurrency,
    /// Multiplies the XP of the purchase it accompanies.
    Multiplier,
}

impl XpType {
    pub fn as_str(self) -> &'static str {
        match self {
            XpType::Fixed => "fixed",
            XpType::PerCurrency => "per_currency",
            XpType::Multiplier => "multiplier",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExperienceActionFixture {
    #[validate(length(min = 1))]
    pub action_type: String,
    pub name: Localized<String>,
    pub description: Localized<String>,
    pub xp_type: XpType,
    #[validate(range(min = 0))]
    pub xp_amount: i32,
    pub xp_per_currency_unit: Option<f64>,
    pub max_xp_per_action: Option<i32>,
    pub max_times_per_day: Option<i32>,
    pub cooldown_hours: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeCategory {
    Milestone,
    Activity,
    Event,
    Loyalty,
    Social,
    Special,
}

impl BadgeCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeCategory::Milestone => "milestone",
            BadgeCategory::Activity => "activity",
            BadgeCategory::Event => "event",
            BadgeCategory::Loyalty => "loyalty",
            BadgeCategory::Social => "social",
            BadgeCategory::Special => "special",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BadgeFixture {
    #[validate(length(min = 1))]
    pub slug: String,
    pub name: Localized<String>,
    pub description: Localized<String>,
    pub emoji: String,
    #[validate(length(equal = 7))]
    pub color: String,
    pub category: BadgeCategory,
    #[validate(range(min = 0))]
    pub xp_reward: i32,
    #[validate(range(min = 0))]
    pub bonus_points: i32,
    /// Unlock rule evaluated by the loyalty service; only its `type` is
    /// checked here.
    pub conditions: Value,
    #[serde(default)]
    pub secret: bool,
    #[serde(default)]
    pub featured: bool,
    #[validate(range(min = 1, max = 5))]
    pub rarity: i16,
    pub sort_order: i32,
}

const CONDITION_TYPES: [&str; 3] = ["simple", "compound", "manual"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardType {
    FixedDiscount,
    PercentageDiscount,
    VoucherCode,
    FreeItem,
}

impl RewardType {
    pub fn as_str(self) -> &'static str {
        match self {
            RewardType::FixedDiscount => "fixed_discount",
            RewardType::PercentageDiscount => "percentage_discount",
            RewardType::VoucherCode => "voucher_code",
            RewardType::FreeItem => "free_item",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RewardFixture {
    #[validate(length(min = 1))]
    pub slug: String,
    pub name: Localized<String>,
    pub description: Localized<String>,
    #[serde(rename = "type")]
    pub reward_type: RewardType,
    #[validate(range(min = 0))]
    pub points_cost: i32,
    pub value: Option<f64>,
    #[validate(length(equal = 3))]
    pub currency: Option<String>,
    pub voucher_prefix: Option<String>,
    pub min_order_value: Option<f64>,
    pub max_redemptions_total: Option<i32>,
    pub max_redemptions_per_customer: Option<i32>,
    #[validate(range(min = 1))]
    pub min_level: i32,
    #[serde(default)]
    pub featured: bool,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Gamification {
    pub experience: ExperienceFixture,
    pub actions: Vec<ExperienceActionFixture>,
    pub badges: Vec<BadgeFixture>,
    pub rewards: Vec<RewardFixture>,
}

impl Gamification {
    pub const NAME: &'static str = "gamification.json";

    pub fn load() -> Result<Self, SeedError> {
        parse(Self::NAME, include_str!("../../fixtures/gamification.json"))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        self.experience.validate()?;
        self.experience.xp_name.ensure_present("experience config", "xp_name")?;
        self.experience.level_name.ensure_present("experience config", "level_name")?;
        self.experience.validate_levels()?;

        validate_all(&self.actions)?;
        ensure_unique("experience action", self.actions.iter().map(|a| a.action_type.as_str()))?;
        for action in &self.actions {
            action.name.ensure_present("experience action", &action.action_type)?;
            let needs_rate = action.xp_type != XpType::Fixed;
            if needs_rate && !action.xp_per_currency_unit.is_some_and(|rate| rate > 0.0) {
                return Err(CoreError::Validation(format!(
                    "experience action '{}' is {} but has no positive xp_per_currency_unit",
                    action.action_type,
                    action.xp_type.as_str()
                )));
            }
        }

        validate_all(&self.badges)?;
        ensure_unique("badge", self.badges.iter().map(|b| b.slug.as_str()))?;
        for badge in &self.badges {
            badge.name.ensure_present("badge", &badge.slug)?;
            badge.description.ensure_present("badge", &badge.slug)?;
            let kind = badge.conditions.get("type").and_then(Value::as_str);
            if !kind.is_some_and(|k| CONDITION_TYPES.contains(&k)) {
                return Err(CoreError::Validation(format!(
                    "badge '{}' has conditions without a known type",
                    badge.slug
                )));
            }
        }

        validate_all(&self.rewards)?;
        ensure_unique("reward", self.rewards.iter().map(|r| r.slug.as_str()))?;
        for reward in &self.rewards {
            reward.name.ensure_present("reward", &reward.slug)?;
            reward.validate_value()?;
        }
        Ok(())
    }
}

impl RewardFixture {
    /// Discounts need a positive value; a percentage cannot exceed 100.
    fn validate_value(&self) -> Result<(), CoreError> {
        let value = self.value.unwrap_or(0.0);
        let ok = match self.reward_type {
            RewardType::FixedDiscount => value > 0.0 && self.currency.is_some(),
            RewardType::PercentageDiscount => value > 0.0 && value <= 100.0,
            RewardType::VoucherCode | RewardType::FreeItem => true,
        };
        if ok {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "reward '{}' has an invalid value for {}",
                self.slug,
                self.reward_type.as_str()
            )))
        }
    }
}
