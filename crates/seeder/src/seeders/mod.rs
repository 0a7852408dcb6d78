//! One seeder per catalog.
//!
//! [`Seeder::ALL`] lists them in dependency order: a seeder may look up rows
//! written by the ones before it, never the ones after.

pub mod demo;
pub mod feature_flags;
pub mod gamification;
pub mod general_taxes;
pub mod knowledge_base;
pub mod locations;
pub mod microservices;
pub mod taxonomy;
pub mod templates;
pub mod venue_catalog;

use sqlx::PgConnection;

use crate::error::SeedError;
use crate::fixtures::catalog::{ContractTemplates, EmailTemplates, FeatureFlags, Microservices};
use crate::fixtures::demo::DemoFixture;
use crate::fixtures::gamification::Gamification;
use crate::fixtures::knowledge_base::KnowledgeBase;
use crate::fixtures::location::Locations;
use crate::fixtures::tax::GeneralTaxes;
use crate::fixtures::venue::VenueCatalog;
use crate::report::SeedReport;
use taxonomy::Taxonomy;

/// Settings a seeder may need beyond its fixture.
#[derive(Debug, Clone)]
pub struct SeedContext {
    /// Tenant the location seeder writes for.
    pub locations_tenant: String,
    /// Tenant the knowledge base is written for.
    pub knowledge_base_tenant: String,
    /// Tenant owning the gamification catalog; `None` writes the
    /// platform-wide defaults.
    pub gamification_tenant: Option<String>,
}

impl SeedContext {
    /// Tenant-scoped seeders write for `tenant`; gamification stays global.
    pub fn new(tenant: impl Into<String>) -> Self {
        let tenant = tenant.into();
        Self {
            locations_tenant: tenant.clone(),
            knowledge_base_tenant: tenant,
            gamification_tenant: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seeder {
    FeatureFlags,
    Microservices,
    EmailTemplates,
    ContractTemplates,
    EventTaxonomy,
    ArtistTaxonomy,
    VenueCatalog,
    GeneralTaxes,
    Gamification,
    Demo,
    Locations,
    KnowledgeBase,
}

impl Seeder {
    pub const ALL: [Seeder; 12] = [
        Seeder::FeatureFlags,
        Seeder::Microservices,
        Seeder::EmailTemplates,
        Seeder::ContractTemplates,
        Seeder::EventTaxonomy,
        Seeder::ArtistTaxonomy,
        Seeder::VenueCatalog,
        Seeder::GeneralTaxes,
        Seeder::Gamification,
        Seeder::Demo,
        Seeder::Locations,
        Seeder::KnowledgeBase,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Seeder::FeatureFlags => feature_flags::NAME,
            Seeder::Microservices => microservices::NAME,
            Seeder::EmailTemplates => templates::EMAIL_NAME,
            Seeder::ContractTemplates => templates::CONTRACT_NAME,
            Seeder::EventTaxonomy => Taxonomy::Event.seeder_name(),
            Seeder::ArtistTaxonomy => Taxonomy::Artist.seeder_name(),
            Seeder::VenueCatalog => venue_catalog::NAME,
            Seeder::GeneralTaxes => general_taxes::NAME,
            Seeder::Gamification => gamification::NAME,
            Seeder::Demo => demo::NAME,
            Seeder::Locations => locations::NAME,
            Seeder::KnowledgeBase => knowledge_base::NAME,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Seeder::FeatureFlags => "Platform feature flags",
            Seeder::Microservices => "Marketplace microservices and hub connectors",
            Seeder::EmailTemplates => "Transactional email templates",
            Seeder::ContractTemplates => "Organizer, venue and artist contract templates",
            Seeder::EventTaxonomy => "Event types, genres and allowed combinations",
            Seeder::ArtistTaxonomy => "Artist types, genres and allowed combinations",
            Seeder::VenueCatalog => "Venue categories and types",
            Seeder::GeneralTaxes => "Romanian VAT, stamp and copyright taxes",
            Seeder::Gamification => "Experience levels, XP actions, badges and rewards",
            Seeder::Demo => "Demo tenant with venues and events",
            Seeder::Locations => "Regions, counties and cities for one tenant",
            Seeder::KnowledgeBase => "Help-center categories and articles for one tenant",
        }
    }

    /// Opt-in seeders write tenant data and only run when asked for.
    pub fn is_opt_in(self) -> bool {
        matches!(self, Seeder::Demo | Seeder::Locations | Seeder::KnowledgeBase)
    }

    pub fn from_name(name: &str) -> Option<Seeder> {
        Seeder::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Parse and validate this seeder's fixture without a database.
    pub fn check(self) -> Result<(), SeedError> {
        match self {
            Seeder::FeatureFlags => FeatureFlags::load()?
                .validate()
                .map_err(SeedError::invalid(FeatureFlags::NAME)),
            Seeder::Microservices => Microservices::load()?
                .validate()
                .map_err(SeedError::invalid(Microservices::NAME)),
            Seeder::EmailTemplates => EmailTemplates::load()?
                .validate()
                .map_err(SeedError::invalid(EmailTemplates::NAME)),
            Seeder::ContractTemplates => ContractTemplates::load()?
                .validate()
                .map_err(SeedError::invalid(ContractTemplates::NAME)),
            Seeder::EventTaxonomy => check_taxonomy(Taxonomy::Event),
            Seeder::ArtistTaxonomy => check_taxonomy(Taxonomy::Artist),
            Seeder::VenueCatalog => VenueCatalog::load()?
                .validate()
                .map_err(SeedError::invalid(VenueCatalog::NAME)),
            Seeder::GeneralTaxes => GeneralTaxes::load()?
                .validate()
                .map_err(SeedError::invalid(GeneralTaxes::NAME)),
            Seeder::Gamification => Gamification::load()?
                .validate()
                .map_err(SeedError::invalid(Gamification::NAME)),
            Seeder::Demo => DemoFixture::load()?
                .validate()
                .map_err(SeedError::invalid(DemoFixture::NAME)),
            Seeder::Locations => Locations::load()?
                .validate()
                .map_err(SeedError::invalid(Locations::NAME)),
            Seeder::KnowledgeBase => KnowledgeBase::load()?
                .validate()
                .map_err(SeedError::invalid(KnowledgeBase::NAME)),
        }
    }

    /// Write this seeder's fixture through `conn`.
    pub async fn run(
        self,
        conn: &mut PgConnection,
        ctx: &SeedContext,
    ) -> Result<SeedReport, SeedError> {
        match self {
            Seeder::FeatureFlags => feature_flags::seed(conn).await,
            Seeder::Microservices => microservices::seed(conn).await,
            Seeder::EmailTemplates => templates::seed_email(conn).await,
            Seeder::ContractTemplates => templates::seed_contract(conn).await,
            Seeder::EventTaxonomy => taxonomy::seed(conn, Taxonomy::Event).await,
            Seeder::ArtistTaxonomy => taxonomy::seed(conn, Taxonomy::Artist).await,
            Seeder::VenueCatalog => venue_catalog::seed(conn).await,
            Seeder::GeneralTaxes => general_taxes::seed(conn).await,
            Seeder::Gamification => {
                gamification::seed(conn, ctx.gamification_tenant.as_deref()).await
            }
            Seeder::Demo => demo::seed(conn).await,
            Seeder::Locations => locations::seed(conn, &ctx.locations_tenant).await,
            Seeder::KnowledgeBase => {
                knowledge_base::seed(conn, &ctx.knowledge_base_tenant).await
            }
        }
    }
}

/// Unresolved allowed-map references are not fatal; they are logged here so
/// `check` surfaces them before a run does.
fn check_taxonomy(taxonomy: Taxonomy) -> Result<(), SeedError> {
    let fixture = taxonomy.load()?;
    fixture
        .validate(taxonomy.type_entity())
        .map_err(SeedError::invalid(taxonomy.fixture_name()))?;
    for unresolved in fixture.unresolved_refs() {
        tracing::warn!(seeder = taxonomy.seeder_name(), reference = ?unresolved, "Unresolved allowed-map reference");
    }
    Ok(())
}
