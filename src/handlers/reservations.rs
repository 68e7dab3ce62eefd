use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;
use validator::Validate;

use crate::auth::Actor;
use crate::error::{ApiError, ApiResult};
use crate::models::{CreateReservation, ReservationStatus, TransitionReservation};
use crate::policy::{can_act, Action};
use crate::store;

pub async fn create_reservation(
    pool: web::Data<SqlitePool>,
    actor: Actor,
    body: web::Json<CreateReservation>,
) -> ApiResult<HttpResponse> {
    if !can_act(&actor, Action::CreateReservation) {
        return Err(ApiError::Forbidden);
    }
    body.validate()?;

    // the residence must be live at creation time
    let residence = store::residences::fetch(pool.get_ref(), body.residence_id)
        .await?
        .ok_or(ApiError::NotFound("residence"))?;

    let reservation =
        store::reservations::insert(pool.get_ref(), &actor.identity, residence.id, body.total_price)
            .await?;

    Ok(HttpResponse::Created().json(reservation))
}

pub async fn get_reservation(
    pool: web::Data<SqlitePool>,
    actor: Actor,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let view = store::reservations::fetch_with_residence(pool.get_ref(), path.into_inner())
        .await?
        .ok_or(ApiError::NotFound("reservation"))?;
    let residence = view
        .residence
        .as_ref()
        .ok_or(ApiError::NotFound("residence"))?;

    let allowed = can_act(
        &actor,
        Action::ViewReservation {
            reservation: &view.reservation,
            residence_owner: Some(&residence.owner),
        },
    );
    if !allowed {
        return Err(ApiError::Forbidden);
    }

    Ok(HttpResponse::Ok().json(view))
}

pub async fn transition_reservation(
    pool: web::Data<SqlitePool>,
    actor: Actor,
    path: web::Path<i64>,
    body: web::Json<TransitionReservation>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let status = ReservationStatus::parse(&body.status)
        .ok_or_else(|| ApiError::InvalidInput(format!("invalid status '{}'", body.status)))?;

    // read-then-write inside one transaction
    let mut tx = pool.begin().await?;

    let view = store::reservations::fetch_with_residence(&mut *tx, id)
        .await?
        .ok_or(ApiError::NotFound("reservation"))?;
    let Some(residence) = view.residence.as_ref() else {
        return Err(ApiError::NotFound("residence"));
    };

    let allowed = can_act(
        &actor,
        Action::TransitionReservation {
            residence_owner: Some(&residence.owner),
        },
    );
    if !allowed {
        return Err(ApiError::Forbidden);
    }

    store::reservations::set_status(&mut *tx, id, status).await?;
    tx.commit().await?;

    // return the reservation with its references re-resolved
    let updated = store::reservations::fetch_with_residence(pool.get_ref(), id)
        .await?
        .ok_or(ApiError::NotFound("reservation"))?;
    Ok(HttpResponse::Ok().json(updated))
}

pub async fn delete_reservation(
    pool: web::Data<SqlitePool>,
    actor: Actor,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let view = store::reservations::fetch_with_residence(pool.get_ref(), id)
        .await?
        .ok_or(ApiError::NotFound("reservation"))?;

    // the booker keeps the delete right even when the residence is gone
    let allowed = can_act(
        &actor,
        Action::DeleteReservation {
            reservation: &view.reservation,
            residence_owner: view.residence.as_ref().map(|r| r.owner.as_str()),
        },
    );
    if !allowed {
        return Err(ApiError::Forbidden);
    }

    store::reservations::delete(pool.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "reservation deleted" })))
}

pub async fn list_for_owner(
    pool: web::Data<SqlitePool>,
    actor: Actor,
) -> ApiResult<HttpResponse> {
    let reservations = store::reservations::list_for_owner(pool.get_ref(), &actor.identity).await?;
    Ok(HttpResponse::Ok().json(reservations))
}

pub async fn list_for_client(
    pool: web::Data<SqlitePool>,
    actor: Actor,
) -> ApiResult<HttpResponse> {
    let reservations = store::reservations::list_for_client(pool.get_ref(), &actor.identity).await?;
    Ok(HttpResponse::Ok().json(reservations))
}

pub async fn owner_stats(pool: web::Data<SqlitePool>, actor: Actor) -> ApiResult<HttpResponse> {
    if !can_act(&actor, Action::ViewOwnerStats) {
        return Err(ApiError::Forbidden);
    }
    let stats = store::reservations::stats_for_owner(pool.get_ref(), &actor.identity).await?;
    Ok(HttpResponse::Ok().json(stats))
}
