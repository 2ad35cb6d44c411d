use actix_web::{HttpResponse, web};

use crate::auth::AuthedUser;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::emergencia;

pub async fn list(pool: web::Data<DbPool>, _who: AuthedUser) -> Result<HttpResponse, AppError> {
    let emergencias = emergencia::list(&pool).await?;
    Ok(HttpResponse::Ok().json(emergencias))
}

pub async fn retrieve(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let emergencia = emergencia::find_by_id(&pool, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Emergencia no encontrada.".to_string()))?;
    Ok(HttpResponse::Ok().json(emergencia))
}

pub async fn create(
    pool: web::Data<DbPool>,
    who: AuthedUser,
    body: web::Json<emergencia::NewEmergencia>,
) -> Result<HttpResponse, AppError> {
    let id = emergencia::create(&pool, &body, who.0).await?;
    let creada = emergencia::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Emergencia no encontrada.".to_string()))?;
    Ok(HttpResponse::Created().json(creada))
}

pub async fn update(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
    body: web::Json<emergencia::NewEmergencia>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if !emergencia::update(&pool, id, &body).await? {
        return Err(AppError::NotFound("Emergencia no encontrada.".to_string()));
    }
    let actualizada = emergencia::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Emergencia no encontrada.".to_string()))?;
    Ok(HttpResponse::Ok().json(actualizada))
}

pub async fn delete(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    if !emergencia::delete(&pool, path.into_inner()).await? {
        return Err(AppError::NotFound("Emergencia no encontrada.".to_string()));
    }
    Ok(HttpResponse::NoContent().finish())
}
