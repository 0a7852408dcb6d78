//! Platform-level catalogs: feature flags, marketplace microservices with
//! their hub connectors, and email and contract templates.

use std::collections::{BTreeSet, HashSet};

use serde::Deserialize;
use serde_json::Value;
use tixello_core::error::CoreError;
use tixello_core::i18n::Localized;
use tixello_core::natural_key::ensure_unique;
use validator::Validate;

use super::{default_true, parse, validate_all};
use crate::error::SeedError;

// ---------------------------------------------------------------------------
// Feature flags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FeatureFlagFixture {
    #[validate(length(min = 1, max = 100))]
    pub key: String,
    #[serde(default)]
    pub description: String,
    pub is_enabled: bool,
    #[validate(range(min = 0, max = 100))]
    pub rollout_percentage: i16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct FeatureFlags {
    pub flags: Vec<FeatureFlagFixture>,
}

impl FeatureFlags {
    pub const NAME: &'static str = "feature_flags.json";

    pub fn load() -> Result<Self, SeedError> {
        parse(Self::NAME, include_str!("../../fixtures/feature_flags.json"))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        validate_all(&self.flags)?;
        ensure_unique("feature flag", self.flags.iter().map(|f| f.key.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Microservices and hub connectors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MicroserviceFixture {
    #[validate(length(min = 1))]
    pub slug: String,
    pub name: Localized<String>,
    pub description: Localized<String>,
    pub short_description: Localized<String>,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(length(equal = 3))]
    pub currency: String,
    pub billing_cycle: String,
    pub pricing_model: String,
    pub features: Localized<Vec<String>>,
    pub category: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub config_schema: Option<Value>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

fn default_status() -> String {
    "active".into()
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ConnectorFixture {
    #[validate(length(min = 1))]
    pub slug: String,
    pub name: Localized<String>,
    pub description: Localized<String>,
    pub icon: String,
    pub auth_type: String,
    pub auth_config: Value,
    pub supported_actions: Value,
    pub supported_events: Value,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Microservices {
    pub microservices: Vec<MicroserviceFixture>,
    pub connectors: Vec<ConnectorFixture>,
}

impl Microservices {
    pub const NAME: &'static str = "microservices.json";

    pub fn load() -> Result<Self, SeedError> {
        parse(Self::NAME, include_str!("../../fixtures/microservices.json"))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        validate_all(&self.microservices)?;
        validate_all(&self.connectors)?;
        ensure_unique("microservice", self.microservices.iter().map(|m| m.slug.as_str()))?;
        ensure_unique("hub connector", self.connectors.iter().map(|c| c.slug.as_str()))?;

        for ms in &self.microservices {
            ms.name.ensure_present("microservice", &ms.slug)?;
            ms.short_description.ensure_present("microservice", &ms.slug)?;
            ms.features.ensure_aligned("microservice", &ms.slug)?;
            if let Some(schema) = &ms.config_schema {
                if !schema.is_object() {
                    return Err(CoreError::Validation(format!(
                        "microservice '{}' config_schema must be a JSON object",
                        ms.slug
                    )));
                }
            }
        }
        for connector in &self.connectors {
            connector.name.ensure_present("hub connector", &connector.slug)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Email templates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmailTemplateFixture {
    #[validate(length(min = 1))]
    pub slug: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub category: String,
    pub subject: Localized<String>,
    pub body_html: Localized<String>,
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct EmailTemplates {
    pub templates: Vec<EmailTemplateFixture>,
}

impl EmailTemplates {
    pub const NAME: &'static str = "email_templates.json";

    pub fn load() -> Result<Self, SeedError> {
        parse(Self::NAME, include_str!("../../fixtures/email_templates.json"))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        validate_all(&self.templates)?;
        ensure_unique("email template", self.templates.iter().map(|t| t.slug.as_str()))?;
        for template in &self.templates {
            template.subject.ensure_present("email template", &template.slug)?;
            template.body_html.ensure_present("email template", &template.slug)?;
            let texts = [
                &template.subject.en,
                &template.subject.ro,
                &template.body_html.en,
                &template.body_html.ro,
            ];
            ensure_declared("email template", &template.slug, &template.variables, texts)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Contract templates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContractTemplateFixture {
    #[validate(length(min = 1))]
    pub slug: String,
    pub name: Localized<String>,
    pub contract_type: String,
    pub content: Localized<String>,
    #[serde(default)]
    pub variables: Vec<String>,
    #[validate(range(min = 1))]
    pub version: i32,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ContractTemplates {
    pub templates: Vec<ContractTemplateFixture>,
}

impl ContractTemplates {
    pub const NAME: &'static str = "contract_templates.json";

    pub fn load() -> Result<Self, SeedError> {
        parse(Self::NAME, include_str!("../../fixtures/contract_templates.json"))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        validate_all(&self.templates)?;
        ensure_unique("contract template", self.templates.iter().map(|t| t.slug.as_str()))?;

        let mut defaults = HashSet::new();
        for template in &self.templates {
            template.name.ensure_present("contract template", &template.slug)?;
            template.content.ensure_present("contract template", &template.slug)?;
            ensure_declared(
                "contract template",
                &template.slug,
                &template.variables,
                [&template.content.en, &template.content.ro],
            )?;
            if template.is_default && !defaults.insert(template.contract_type.as_str()) {
                return Err(CoreError::Validation(format!(
                    "more than one default contract template for type '{}'",
                    template.contract_type
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Placeholders
// ---------------------------------------------------------------------------

/// Names used as `{{name}}` placeholders in `text`.
pub fn placeholders(text: &str) -> BTreeSet<&str> {
    let mut found = BTreeSet::new();
    let mut rest = text;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };
        let name = after[..end].trim();
        if !name.is_empty() {
            found.insert(name);
        }
        rest = &after[end + 2..];
    }
    found
}

/// Every placeholder used in `texts` must be listed in `variables`.
fn ensure_declared<'a, I>(
    entity: &str,
    slug: &str,
    variables: &[String],
    texts: I,
) -> Result<(), CoreError>
where
    I: IntoIterator<Item = &'a String>,
{
    let declared: HashSet<&str> = variables.iter().map(String::as_str).collect();
    for text in texts {
        if let Some(missing) = placeholders(text).into_iter().find(|p| !declared.contains(p)) {
            return Err(CoreError::Validation(format!(
                "{entity} '{slug}' uses undeclared placeholder '{missing}'"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn embedded_catalogs_are_valid() {
        FeatureFlags::load().unwrap().validate().unwrap();
        Microservices::load().unwrap().validate().unwrap();
        EmailTemplates::load().unwrap().validate().unwrap();
        ContractTemplates::load().unwrap().validate().unwrap();
    }

    #[test]
    fn hub_integration_ships_nine_connectors() {
        let catalog = Microservices::load().unwrap();
        assert!(catalog.microservices.iter().any(|m| m.slug == "hub-integration"));
        assert_eq!(catalog.connectors.len(), 9);
    }

    #[test]
    fn placeholder_scan() {
        let names = placeholders("Hi {{ customer_name }}, order {{order_number}} {{}} {{open");
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["customer_name", "order_number"]);
    }

    #[test]
    fn undeclared_placeholder_is_rejected() {
        let err = ensure_declared(
            "email template",
            "x",
            &["a".to_string()],
            [&"{{a}} {{b}}".to_string()],
        );
        assert_matches!(err, Err(CoreError::Validation(msg)) if msg.contains("'b'"));
    }

    #[test]
    fn rollout_out_of_range_is_rejected() {
        let flags: FeatureFlags = serde_json::from_str(
            r#"[{"key": "x", "is_enabled": true, "rollout_percentage": 150}]"#,
        )
        .unwrap();
        assert_matches!(flags.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn duplicate_flag_key_is_rejected() {
        let flags: FeatureFlags = serde_json::from_str(
            r#"[{"key": "x", "is_enabled": true, "rollout_percentage": 1},
                {"key": "x", "is_enabled": false, "rollout_percentage": 0}]"#,
        )
        .unwrap();
        assert_matches!(flags.validate(), Err(CoreError::DuplicateKey { .. }));
    }

    #[test]
    fn two_defaults_for_one_contract_type_are_rejected() {
        let templates: ContractTemplates = serde_json::from_str(
            r#"[
                {"slug": "a", "name": {"en": "A", "ro": "A"}, "contract_type": "organizer",
                 "content": {"en": "x", "ro": "x"}, "version": 1, "is_default": true},
                {"slug": "b", "name": {"en": "B", "ro": "B"}, "contract_type": "organizer",
                 "content": {"en": "y", "ro": "y"}, "version": 1, "is_default": true}
            ]"#,
        )
        .unwrap();
        assert_matches!(templates.validate(), Err(CoreError::Validation(msg)) if msg.contains("organizer"));
    }
}
