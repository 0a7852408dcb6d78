//! Repositories for the `email_templates` and `contract_templates` tables.

use sqlx::PgConnection;

use super::upsert_sql;
use crate::models::template::{NewContractTemplate, NewEmailTemplate};
use crate::models::UpsertOutcome;

pub struct EmailTemplateRepo;

impl EmailTemplateRepo {
    pub async fn upsert(
        conn: &mut PgConnection,
        input: &NewEmailTemplate<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            "email_templates",
            "(slug, name, category, subject, body_html, variables, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (slug)",
            &["name", "category", "subject", "body_html", "variables", "is_active"],
            "slug = $1",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.slug)
            .bind(input.name)
            .bind(input.category)
            .bind(&input.subject)
            .bind(&input.body_html)
            .bind(&input.variables)
            .bind(input.is_active)
            .fetch_one(&mut *conn)
            .await
    }
}

pub struct ContractTemplateRepo;

impl ContractTemplateRepo {
    pub async fn upsert(
        conn: &mut PgConnection,
        input: &NewContractTemplate<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            "contract_templates",
            "(slug, name, contract_type, content, variables, version, is_default) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (slug)",
            &["name", "contract_type", "content", "variables", "version", "is_default"],
            "slug = $1",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.slug)
            .bind(&input.name)
            .bind(input.contract_type)
            .bind(&input.content)
            .bind(&input.variables)
            .bind(input.version)
            .bind(input.is_default)
            .fetch_one(&mut *conn)
            .await
    }
}
