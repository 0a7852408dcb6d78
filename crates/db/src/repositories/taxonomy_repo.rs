//! Repository for the taxonomy tables (types, genres, and their pivot).
//!
//! Every method takes a [`TaxonomyTables`] so the same SQL serves both the
//! event and the artist taxonomy.

use std::collections::HashMap;

use sqlx::PgConnection;
use tixello_core::types::DbId;

use super::{slug_ids, upsert_sql};
use crate::models::taxonomy::{NewTaxonomyGenre, NewTaxonomyType, TaxonomyNode, TaxonomyTables};
use crate::models::UpsertOutcome;

pub struct TaxonomyRepo;

impl TaxonomyRepo {
    /// Insert a type or overwrite the one with the same slug.
    pub async fn upsert_type(
        conn: &mut PgConnection,
        tables: TaxonomyTables,
        input: &NewTaxonomyType<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            tables.types,
            "(slug, parent_id, name, description) VALUES ($1, $2, $3, $4) ON CONFLICT (slug)",
            &["parent_id", "name", "description"],
            "slug = $1",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.slug)
            .bind(input.parent_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(&mut *conn)
            .await
    }

    /// Insert a type only if its slug is not taken yet. Existing rows are
    /// left untouched. Returns the id either way and whether it was created.
    pub async fn ensure_type(
        conn: &mut PgConnection,
        tables: TaxonomyTables,
        input: &NewTaxonomyType<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let insert = format!(
            "INSERT INTO {types} (slug, parent_id, name, description) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (slug) DO NOTHING \
             RETURNING id",
            types = tables.types,
        );
        let created: Option<DbId> = sqlx::query_scalar(&insert)
            .bind(input.slug)
            .bind(input.parent_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(&mut *conn)
            .await?;

        if let Some(id) = created {
            return Ok(UpsertOutcome::inserted(id));
        }

        let select = format!("SELECT id FROM {types} WHERE slug = $1", types = tables.types);
        let id: DbId = sqlx::query_scalar(&select)
            .bind(input.slug)
            .fetch_one(&mut *conn)
            .await?;
        Ok(UpsertOutcome::unchanged(id))
    }

    /// Insert a genre or overwrite the one with the same slug.
    pub async fn upsert_genre(
        conn: &mut PgConnection,
        tables: TaxonomyTables,
        input: &NewTaxonomyGenre<'_>,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let query = upsert_sql(
            tables.genres,
            "(slug, name, description) VALUES ($1, $2, $3) ON CONFLICT (slug)",
            &["name", "description"],
            "slug = $1",
        );
        sqlx::query_as::<_, UpsertOutcome>(&query)
            .bind(input.slug)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(&mut *conn)
            .await
    }

    /// Add a (type, genre) pivot row. Returns `false` if it already existed.
    pub async fn link(
        conn: &mut PgConnection,
        tables: TaxonomyTables,
        type_id: DbId,
        genre_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "INSERT INTO {pivot} ({type_fk}, {genre_fk}) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
            pivot = tables.pivot,
            type_fk = tables.type_fk,
            genre_fk = tables.genre_fk,
        );
        let result = sqlx::query(&query)
            .bind(type_id)
            .bind(genre_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    pub async fn type_ids(
        conn: &mut PgConnection,
        tables: TaxonomyTables,
    ) -> Result<HashMap<String, DbId>, sqlx::Error> {
        slug_ids(conn, tables.types).await
    }

    pub async fn genre_ids(
        conn: &mut PgConnection,
        tables: TaxonomyTables,
    ) -> Result<HashMap<String, DbId>, sqlx::Error> {
        slug_ids(conn, tables.genres).await
    }

    /// Every type row, ordered by id.
    pub async fn list_types(
        conn: &mut PgConnection,
        tables: TaxonomyTables,
    ) -> Result<Vec<TaxonomyNode>, sqlx::Error> {
        let query = format!(
            "SELECT id, slug, parent_id FROM {types} ORDER BY id",
            types = tables.types
        );
        sqlx::query_as::<_, TaxonomyNode>(&query)
            .fetch_all(&mut *conn)
            .await
    }

    /// Genre slugs allowed for the type with `type_slug`, sorted.
    pub async fn allowed_genre_slugs(
        conn: &mut PgConnection,
        tables: TaxonomyTables,
        type_slug: &str,
    ) -> Result<Vec<String>, sqlx::Error> {
        let query = format!(
            "SELECT g.slug FROM {pivot} p \
             JOIN {types} t ON t.id = p.{type_fk} \
             JOIN {genres} g ON g.id = p.{genre_fk} \
             WHERE t.slug = $1 \
             ORDER BY g.slug",
            pivot = tables.pivot,
            types = tables.types,
            genres = tables.genres,
            type_fk = tables.type_fk,
            genre_fk = tables.genre_fk,
        );
        sqlx::query_scalar(&query)
            .bind(type_slug)
            .fetch_all(&mut *conn)
            .await
    }
}
