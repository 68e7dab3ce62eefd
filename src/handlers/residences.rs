use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;
use validator::Validate;

use crate::auth::Actor;
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::media;
use crate::models::{CreateResidence, ResidenceFilter, UpdateResidence};
use crate::policy::{can_act, Action};
use crate::store;

pub async fn list_residences(
    pool: web::Data<SqlitePool>,
    filter: web::Query<ResidenceFilter>,
) -> ApiResult<HttpResponse> {
    let residences = store::residences::list(pool.get_ref(), &filter).await?;
    Ok(HttpResponse::Ok().json(residences))
}

pub async fn get_residence(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let residence = store::residences::fetch(pool.get_ref(), path.into_inner())
        .await?
        .ok_or(ApiError::NotFound("residence"))?;
    Ok(HttpResponse::Ok().json(residence))
}

pub async fn list_by_owner(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let residences = store::residences::list_by_owner(pool.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(residences))
}

pub async fn create_residence(
    pool: web::Data<SqlitePool>,
    actor: Actor,
    body: web::Json<CreateResidence>,
) -> ApiResult<HttpResponse> {
    if !can_act(&actor, Action::CreateResidence) {
        return Err(ApiError::Forbidden);
    }

    let payload = body.into_inner().normalized();
    payload.validate()?;

    if let Some(reference) = &payload.reference {
        if store::residences::reference_exists(pool.get_ref(), reference, None).await? {
            return Err(ApiError::Conflict("reference already in use".to_owned()));
        }
    }

    let owner = payload.owner.clone().unwrap_or_else(|| actor.identity.clone());
    let residence = store::residences::insert(pool.get_ref(), &owner, &payload).await?;

    Ok(HttpResponse::Created().json(residence))
}

pub async fn update_residence(
    pool: web::Data<SqlitePool>,
    actor: Actor,
    path: web::Path<i64>,
    body: web::Json<UpdateResidence>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let payload = body.into_inner();
    payload.validate()?;

    let residence = store::residences::fetch(pool.get_ref(), id)
        .await?
        .ok_or(ApiError::NotFound("residence"))?;

    if !can_act(&actor, Action::UpdateResidence(&residence)) {
        return Err(ApiError::Forbidden);
    }

    let merged = residence.apply_update(payload);
    if let Some(reference) = &merged.reference {
        if store::residences::reference_exists(pool.get_ref(), reference, Some(id)).await? {
            return Err(ApiError::Conflict("reference already in use".to_owned()));
        }
    }

    let saved = store::residences::update(pool.get_ref(), &merged).await?;
    Ok(HttpResponse::Ok().json(saved))
}

pub async fn delete_residence(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    actor: Actor,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let residence = store::residences::fetch(pool.get_ref(), id)
        .await?
        .ok_or(ApiError::NotFound("residence"))?;

    if !can_act(&actor, Action::DeleteResidence(&residence)) {
        return Err(ApiError::Forbidden);
    }

    store::residences::delete(pool.get_ref(), id).await?;

    // associated reservations are left in place; reads on them resolve
    // the residence as missing
    media::remove_media_files(&config.uploads_dir, &residence.media);

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "residence deleted" })))
}
