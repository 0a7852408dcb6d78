//! General taxes and the event types they are scoped to.
//!
//! Event types listed in the tax fixture are created only when missing, so
//! names curated by the event taxonomy are never overwritten. A tax whose
//! event type cannot be resolved is written with `event_type_id = NULL`.

use sqlx::PgConnection;
use tixello_core::hierarchy::parents_first;
use tixello_core::i18n::Localized;
use tixello_core::tax::tax_priority;
use tixello_db::models::tax::NewGeneralTax;
use tixello_db::models::taxonomy::{NewTaxonomyType, TaxonomyTables};
use tixello_db::repositories::{TaxRepo, TaxonomyRepo};

use crate::error::SeedError;
use crate::fixtures::tax::GeneralTaxes;
use crate::report::SeedReport;

pub const NAME: &str = "general-taxes";

pub async fn seed(conn: &mut PgConnection) -> Result<SeedReport, SeedError> {
    seed_fixture(conn, &GeneralTaxes::load()?).await
}

pub async fn seed_fixture(
    conn: &mut PgConnection,
    fixture: &GeneralTaxes,
) -> Result<SeedReport, SeedError> {
    fixture.validate().map_err(SeedError::invalid(GeneralTaxes::NAME))?;

    let mut report = SeedReport::new(NAME);
    let tables = TaxonomyTables::EVENT;
    let description = Localized::<String>::blank().to_json();

    let ordered = parents_first("event type", &fixture.event_types)?;
    let mut type_ids = TaxonomyRepo::type_ids(conn, tables).await?;
    for node in ordered.nodes {
        if type_ids.contains_key(&node.slug) {
            continue;
        }
        let parent_id = node.parent.as_deref().and_then(|p| type_ids.get(p).copied());
        let outcome = TaxonomyRepo::ensure_type(
            conn,
            tables,
            &NewTaxonomyType {
                slug: &node.slug,
                parent_id,
                name: node.name.to_json(),
                description: description.clone(),
            },
        )
        .await?;
        if outcome.inserted {
            tracing::debug!(slug = %node.slug, "Event type created for taxes");
            report.record(outcome);
        }
        type_ids.insert(node.slug.clone(), outcome.id);
    }

    for tax in &fixture.taxes {
        let event_type_id = match tax.event_type_slug.as_deref() {
            None => None,
            Some(slug) => {
                let id = type_ids.get(slug).copied();
                if id.is_none() {
                    tracing::warn!(tax = %tax.name, event_type = slug, "Unknown event type, tax applies to all events");
                    report.skip();
                }
                id
            }
        };

        let outcome = TaxRepo::upsert(
            conn,
            &NewGeneralTax {
                name: &tax.name,
                event_type_id,
                value: tax.value,
                value_type: tax.value_type.as_str(),
                is_added_to_price: tax.is_added_to_price,
                applied_to_base: tax.applied_to_base.as_deref(),
                has_tiered_rates: tax.has_tiered_rates,
                tiered_rates: tax.tiered_rates.as_ref(),
                legal_basis: tax.legal_basis.as_deref(),
                beneficiary: tax.beneficiary.as_deref(),
                payment_term_type: tax.payment_term_type.as_deref(),
                payment_term_day: tax.payment_term_day,
                payment_term_days_after: tax.payment_term_days_after,
                payment_term: tax.payment_term.as_deref(),
                explanation: tax.explanation.as_deref(),
                after_event_instructions: tax.after_event_instructions.as_deref(),
                valid_from: tax.valid_from,
                priority: tax_priority(&tax.name),
            },
        )
        .await?;
        report.record(outcome);
    }
    Ok(report)
}
