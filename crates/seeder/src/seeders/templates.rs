use serde_json::json;
use sqlx::PgConnection;
use tixello_db::models::template::{NewContractTemplate, NewEmailTemplate};
use tixello_db::repositories::{ContractTemplateRepo, EmailTemplateRepo};

use crate::error::SeedError;
use crate::fixtures::catalog::{ContractTemplates, EmailTemplates};
use crate::report::SeedReport;

pub const EMAIL_NAME: &str = "email-templates";
pub const CONTRACT_NAME: &str = "contract-templates";

pub async fn seed_email(conn: &mut PgConnection) -> Result<SeedReport, SeedError> {
    let fixture = EmailTemplates::load()?;
    fixture.validate().map_err(SeedError::invalid(EmailTemplates::NAME))?;

    let mut report = SeedReport::new(EMAIL_NAME);
    for template in &fixture.templates {
        let outcome = EmailTemplateRepo::upsert(
            conn,
            &NewEmailTemplate {
                slug: &template.slug,
                name: &template.name,
                category: &template.category,
                subject: template.subject.to_json(),
                body_html: template.body_html.to_json(),
                variables: json!(template.variables),
                is_active: template.is_active,
            },
        )
        .await?;
        report.record(outcome);
    }
    Ok(report)
}

pub async fn seed_contract(conn: &mut PgConnection) -> Result<SeedReport, SeedError> {
    let fixture = ContractTemplates::load()?;
    fixture.validate().map_err(SeedError::invalid(ContractTemplates::NAME))?;

    let mut report = SeedReport::new(CONTRACT_NAME);
    for template in &fixture.templates {
        let outcome = ContractTemplateRepo::upsert(
            conn,
            &NewContractTemplate {
                slug: &template.slug,
                name: template.name.to_json(),
                contract_type: &template.contract_type,
                content: template.content.to_json(),
                variables: json!(template.variables),
                version: template.version,
                is_default: template.is_default,
            },
        )
        .await?;
        report.record(outcome);
    }
    Ok(report)
}
