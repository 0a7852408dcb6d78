//! Repository for the `general_taxes` table.

use sqlx::PgConnection;

use super::upsert_sql;
use crate::models::tax::NewGeneralTax;
use crate::models::UpsertOutcome;

pub struct TaxRepo;

impl TaxRepo {
    /// Upsert a tax keyed by `(name, event_type_id)`.
    ///
    /// The conflict target matches the `COALESCE(event_type_id, 0)` unique
    /// index so taxes without an event type are still deduplicated.
    pub async fn upsert(
        conn: &mut PgConnection,
        input: &NewGeneralTax<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            "general_taxes",
            "(name, event_type_id, value, value_type, is_added_to_price, applied_to_base, \
              has_tiered_rates, tiered_rates, legal_basis, beneficiary, payment_term_type, \
              payment_term_day, payment_term_days_after, payment_term, explanation, \
              after_event_instructions, valid_from, is_active, priority) \
             VALUES ($1, $2, $3::numeric, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, \
                     $16, $17, true, $18) \
             ON CONFLICT (name, COALESCE(event_type_id, 0))",
            &[
                "value",
                "value_type",
                "is_added_to_price",
                "applied_to_base",
                "has_tiered_rates",
                "tiered_rates",
                "legal_basis",
                "beneficiary",
                "payment_term_type",
                "payment_term_day",
                "payment_term_days_after",
                "payment_term",
                "explanation",
                "after_event_instructions",
                "valid_from",
                "is_active",
                "priority",
            ],
            "name = $1 AND COALESCE(event_type_id, 0) = COALESCE($2, 0)",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.name)
            .bind(input.event_type_id)
            .bind(input.value)
            .bind(input.value_type)
            .bind(input.is_added_to_price)
            .bind(input.applied_to_base)
            .bind(input.has_tiered_rates)
            .bind(input.tiered_rates)
            .bind(input.legal_basis)
            .bind(input.beneficiary)
            .bind(input.payment_term_type)
            .bind(input.payment_term_day)
            .bind(input.payment_term_days_after)
            .bind(input.payment_term)
            .bind(input.explanation)
            .bind(input.after_event_instructions)
            .bind(input.valid_from)
            .bind(input.priority)
            .fetch_one(&mut *conn)
            .await
    }
}
