use std::collections::HashMap;

use actix_web::{HttpResponse, web};

use crate::auth::AuthedUser;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::handlers::{parse_anio, require_anio};
use crate::reportes;

/// GET /api/resumen-asistencia/{id}?anio= — per-citación report.
pub async fn resumen_citacion(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let anio = parse_anio(&query)?;
    let resumen = reportes::resumen_citacion(&pool, path.into_inner(), anio).await?;
    Ok(HttpResponse::Ok().json(resumen))
}

/// GET /api/resumen-emergencia/{id}?anio= — per-emergencia report.
pub async fn resumen_emergencia(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let anio = parse_anio(&query)?;
    let resumen = reportes::resumen_emergencia(&pool, path.into_inner(), anio).await?;
    Ok(HttpResponse::Ok().json(resumen))
}

/// GET /api/resumen-usuario/{id}?anio= — one member across every resolved
/// event of the year. `anio` is required here.
pub async fn resumen_usuario(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let anio = require_anio(&query)?;
    let resumen = reportes::resumen_usuario_anual(&pool, path.into_inner(), anio).await?;
    Ok(HttpResponse::Ok().json(resumen))
}

/// GET /api/resumen-anual?anio= — whole-company yearly report.
pub async fn resumen_anual(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let anio = require_anio(&query)?;
    let resumen = reportes::resumen_anual_global(&pool, anio).await?;
    Ok(HttpResponse::Ok().json(resumen))
}
