use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::map_write_err;
use crate::error::ApiResult;
use crate::models::{CreateResidence, Residence, ResidenceFilter};

pub async fn insert(
    pool: &SqlitePool,
    owner: &str,
    payload: &CreateResidence,
) -> ApiResult<Residence> {
    sqlx::query_as::<_, Residence>(
        r#"
        INSERT INTO residences
            (title, description, type, price, location, address, reference, media, amenities, owner)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(payload.kind)
    .bind(payload.price)
    .bind(&payload.location)
    .bind(&payload.address)
    .bind(&payload.reference)
    .bind(sqlx::types::Json(&payload.media))
    .bind(sqlx::types::Json(&payload.amenities))
    .bind(owner)
    .fetch_one(pool)
    .await
    .map_err(map_write_err)
}

pub async fn fetch(pool: &SqlitePool, id: i64) -> ApiResult<Option<Residence>> {
    sqlx::query_as::<_, Residence>("SELECT * FROM residences WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
}

pub async fn list(pool: &SqlitePool, filter: &ResidenceFilter) -> ApiResult<Vec<Residence>> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM residences WHERE 1=1");

    // LIKE is case-insensitive for ASCII under SQLite defaults
    if let Some(city) = &filter.city {
        query.push(" AND location LIKE ").push_bind(format!("%{city}%"));
    }
    if let Some(title) = &filter.title {
        query.push(" AND title LIKE ").push_bind(format!("%{title}%"));
    }
    if let Some(max_price) = filter.max_price {
        query.push(" AND price <= ").push_bind(max_price);
    }
    query.push(" ORDER BY created_at DESC, id DESC");

    query
        .build_query_as::<Residence>()
        .fetch_all(pool)
        .await
        .map_err(Into::into)
}

pub async fn list_by_owner(pool: &SqlitePool, owner: &str) -> ApiResult<Vec<Residence>> {
    sqlx::query_as::<_, Residence>(
        "SELECT * FROM residences WHERE owner = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(owner)
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

/// Advisory pre-check before insert/update; the partial unique index is
/// what actually rejects concurrent duplicates.
pub async fn reference_exists(
    pool: &SqlitePool,
    reference: &str,
    exclude_id: Option<i64>,
) -> ApiResult<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM residences WHERE reference = ? AND id != COALESCE(?, -1))",
    )
    .bind(reference)
    .bind(exclude_id)
    .fetch_one(pool)
    .await
    .map_err(Into::into)
}

/// Persist a merged entity produced by [`Residence::apply_update`]. The
/// owner column is deliberately absent from the SET list.
pub async fn update(pool: &SqlitePool, residence: &Residence) -> ApiResult<Residence> {
    sqlx::query_as::<_, Residence>(
        r#"
        UPDATE residences SET
            title = ?, description = ?, type = ?, price = ?, location = ?,
            address = ?, reference = ?, media = ?, amenities = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&residence.title)
    .bind(&residence.description)
    .bind(residence.kind)
    .bind(residence.price)
    .bind(&residence.location)
    .bind(&residence.address)
    .bind(&residence.reference)
    .bind(&residence.media)
    .bind(&residence.amenities)
    .bind(residence.id)
    .fetch_one(pool)
    .await
    .map_err(map_write_err)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> ApiResult<bool> {
    let result = sqlx::query("DELETE FROM residences WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
