use sqlx::{Sqlite, SqlitePool};

use crate::error::ApiResult;
use crate::models::{OwnerStats, Reservation, ReservationStatus, ReservationView};
use crate::models::residence::ResidenceSummary;

/// Reservation row with the joined residence columns of the
/// populate-style queries below.
#[derive(sqlx::FromRow)]
struct ReservationRow {
    #[sqlx(flatten)]
    reservation: Reservation,
    res_title: Option<String>,
    res_location: Option<String>,
    res_price: Option<i64>,
    res_owner: Option<String>,
}

impl From<ReservationRow> for ReservationView {
    fn from(row: ReservationRow) -> Self {
        let residence = match (row.res_title, row.res_location, row.res_price, row.res_owner) {
            (Some(title), Some(location), Some(price), Some(owner)) => Some(ResidenceSummary {
                id: row.reservation.residence_id,
                title,
                location,
                price,
                owner,
            }),
            _ => None,
        };

        ReservationView {
            reservation: row.reservation,
            residence,
        }
    }
}

const VIEW_COLUMNS: &str = "r.*, \
     s.title AS res_title, s.location AS res_location, \
     s.price AS res_price, s.owner AS res_owner";

pub async fn insert(
    pool: &SqlitePool,
    user_id: &str,
    residence_id: i64,
    total_price: f64,
) -> ApiResult<Reservation> {
    // status always starts at the schema default 'pending'
    sqlx::query_as::<_, Reservation>(
        r#"
        INSERT INTO reservations (residence_id, user_id, total_price)
        VALUES (?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(residence_id)
    .bind(user_id)
    .bind(total_price)
    .fetch_one(pool)
    .await
    .map_err(super::map_write_err)
}

/// Load one reservation with its residence reference resolved. Generic
/// over the executor so transitions can read inside their transaction.
pub async fn fetch_with_residence<'e, E>(
    executor: E,
    id: i64,
) -> ApiResult<Option<ReservationView>>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, ReservationRow>(&format!(
        r#"
        SELECT {VIEW_COLUMNS}
        FROM reservations r
        LEFT JOIN residences s ON s.id = r.residence_id
        WHERE r.id = ?
        "#
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(row.map(Into::into))
}

pub async fn list_for_owner(pool: &SqlitePool, owner: &str) -> ApiResult<Vec<ReservationView>> {
    let rows = sqlx::query_as::<_, ReservationRow>(&format!(
        r#"
        SELECT {VIEW_COLUMNS}
        FROM reservations r
        JOIN residences s ON s.id = r.residence_id
        WHERE s.owner = ?
        ORDER BY r.created_at DESC, r.id DESC
        "#
    ))
    .bind(owner)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn list_for_client(pool: &SqlitePool, user_id: &str) -> ApiResult<Vec<ReservationView>> {
    let rows = sqlx::query_as::<_, ReservationRow>(&format!(
        r#"
        SELECT {VIEW_COLUMNS}
        FROM reservations r
        LEFT JOIN residences s ON s.id = r.residence_id
        WHERE r.user_id = ?
        ORDER BY r.created_at DESC, r.id DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn set_status<'e, E>(executor: E, id: i64, status: ReservationStatus) -> ApiResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE reservations SET status = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> ApiResult<bool> {
    let result = sqlx::query("DELETE FROM reservations WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Aggregate counts and confirmed revenue across every residence the
/// owner controls, computed entirely in SQL — no reservation bodies are
/// loaded. An owner with no residences gets the all-zero row.
pub async fn stats_for_owner(pool: &SqlitePool, owner: &str) -> ApiResult<OwnerStats> {
    sqlx::query_as::<_, OwnerStats>(
        r#"
        SELECT
            COUNT(r.id)                              AS total_reservations,
            COALESCE(SUM(r.status = 'confirmed'), 0) AS confirmed_reservations,
            COALESCE(SUM(r.status = 'pending'), 0)   AS pending_reservations,
            COALESCE(SUM(r.status = 'cancelled'), 0) AS cancelled_reservations,
            CAST(COALESCE(SUM(CASE WHEN r.status = 'confirmed' THEN r.total_price END), 0) AS REAL)
                                                     AS total_revenue
        FROM reservations r
        JOIN residences s ON s.id = r.residence_id
        WHERE s.owner = ?
        "#,
    )
    .bind(owner)
    .fetch_one(pool)
    .await
    .map_err(Into::into)
}
