use std::collections::HashMap;

use actix_web::{HttpResponse, web};

use crate::auth::AuthedUser;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::citacion;

pub async fn list(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let fecha_desde = query.get("fecha_desde").map(String::as_str);
    let fecha_hasta = query.get("fecha_hasta").map(String::as_str);
    let citaciones = citacion::list(&pool, fecha_desde, fecha_hasta).await?;
    Ok(HttpResponse::Ok().json(citaciones))
}

pub async fn retrieve(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let cit = citacion::find_by_id(&pool, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Citación no encontrada.".to_string()))?;
    Ok(HttpResponse::Ok().json(cit))
}

pub async fn create(
    pool: web::Data<DbPool>,
    who: AuthedUser,
    body: web::Json<citacion::NewCitacion>,
) -> Result<HttpResponse, AppError> {
    let id = citacion::create(&pool, &body, who.0).await?;
    let cit = citacion::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Citación no encontrada.".to_string()))?;
    Ok(HttpResponse::Created().json(cit))
}

pub async fn update(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
    body: web::Json<citacion::NewCitacion>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if !citacion::update(&pool, id, &body).await? {
        return Err(AppError::NotFound("Citación no encontrada.".to_string()));
    }
    let cit = citacion::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Citación no encontrada.".to_string()))?;
    Ok(HttpResponse::Ok().json(cit))
}

pub async fn delete(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    if !citacion::delete(&pool, path.into_inner()).await? {
        return Err(AppError::NotFound("Citación no encontrada.".to_string()));
    }
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/citaciones/disponibles — past citaciones still without an
/// attendance list.
pub async fn disponibles(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
) -> Result<HttpResponse, AppError> {
    let ahora = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
    let citaciones = citacion::disponibles(&pool, &ahora).await?;
    Ok(HttpResponse::Ok().json(citaciones))
}
