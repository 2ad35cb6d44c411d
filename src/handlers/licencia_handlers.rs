use std::collections::HashMap;

use actix_web::{HttpResponse, web};

use crate::auth::AuthedUser;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::handlers::parse_id;
use crate::models::licencia;

pub async fn list(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let autor_id = parse_id(&query, "autor")?;
    let citacion_id = parse_id(&query, "citacion")?;
    let licencias = licencia::list(&pool, autor_id, citacion_id).await?;
    Ok(HttpResponse::Ok().json(licencias))
}

pub async fn retrieve(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let lic = licencia::find_by_id(&pool, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Licencia no encontrada.".to_string()))?;
    Ok(HttpResponse::Ok().json(lic))
}

/// POST /api/licencias — the caller requests an excuse for a citación.
/// Rejected when the citación is less than 24 hours away.
pub async fn create(
    pool: web::Data<DbPool>,
    who: AuthedUser,
    body: web::Json<licencia::NewLicencia>,
) -> Result<HttpResponse, AppError> {
    let ahora = chrono::Local::now().naive_local();
    let id = licencia::create(&pool, &body, who.0, ahora).await?;
    let creada = licencia::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Licencia no encontrada.".to_string()))?;
    Ok(HttpResponse::Created().json(creada))
}

pub async fn delete(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    if !licencia::delete(&pool, path.into_inner()).await? {
        return Err(AppError::NotFound("Licencia no encontrada.".to_string()));
    }
    Ok(HttpResponse::NoContent().finish())
}
