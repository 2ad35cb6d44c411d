use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::auth::{AuthedUser, require_group};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::tesoreria;

const GRUPO_TESORERO: &str = "Tesorero";

// ---------------------------------------------------------------------------
// mes_anio grid
// ---------------------------------------------------------------------------

pub async fn meses_list(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
) -> Result<HttpResponse, AppError> {
    let meses = tesoreria::meses_list(&pool).await?;
    Ok(HttpResponse::Ok().json(meses))
}

/// GET /api/meses-anio/mis_meses_pagados — paid slots of the caller.
pub async fn mis_meses_pagados(
    pool: web::Data<DbPool>,
    who: AuthedUser,
) -> Result<HttpResponse, AppError> {
    let meses = tesoreria::meses_pagados_de(&pool, who.0).await?;
    Ok(HttpResponse::Ok().json(meses))
}

pub async fn meses_pagados_por_bombero(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let meses = tesoreria::meses_pagados_de(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(meses))
}

// ---------------------------------------------------------------------------
// member-submitted transfer receipts
// ---------------------------------------------------------------------------

pub async fn create_transferencia(
    pool: web::Data<DbPool>,
    who: AuthedUser,
    body: web::Json<tesoreria::NewComprobanteTransferencia>,
) -> Result<HttpResponse, AppError> {
    let id = tesoreria::create_transferencia(&pool, who.0, &body).await?;
    let detalle = tesoreria::get_transferencia_detalle(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comprobante no encontrado.".to_string()))?;
    Ok(HttpResponse::Created().json(detalle))
}

pub async fn list_transferencias(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
) -> Result<HttpResponse, AppError> {
    let detalles = tesoreria::list_transferencias(&pool, false).await?;
    Ok(HttpResponse::Ok().json(detalles))
}

pub async fn retrieve_transferencia(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let detalle = tesoreria::get_transferencia_detalle(&pool, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Comprobante no encontrado.".to_string()))?;
    Ok(HttpResponse::Ok().json(detalle))
}

/// GET /api/comprobantes/transferencia/pendientes — awaiting review.
/// Treasurer only.
pub async fn pendientes(
    pool: web::Data<DbPool>,
    who: AuthedUser,
) -> Result<HttpResponse, AppError> {
    require_group(&pool, who.0, GRUPO_TESORERO).await?;
    let detalles = tesoreria::list_transferencias(&pool, true).await?;
    Ok(HttpResponse::Ok().json(detalles))
}

/// PATCH /api/comprobantes/transferencia/{id}/aprobar — mirror the
/// transfer as a treasurer receipt and flip its state to approved.
pub async fn aprobar(
    pool: web::Data<DbPool>,
    who: AuthedUser,
    path: web::Path<i64>,
    body: web::Json<tesoreria::AprobarRequest>,
) -> Result<HttpResponse, AppError> {
    let (numero, monto) = match (body.numero_comprobante, body.monto_total) {
        (Some(numero), Some(monto)) => (numero, monto),
        _ => return Err(AppError::InvalidParameter("Faltan datos".to_string())),
    };
    let ahora = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
    tesoreria::aprobar_transferencia(&pool, path.into_inner(), who.0, numero, monto, &ahora)
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "detail": "Comprobante aprobado y registrado correctamente"
    })))
}

pub async fn rechazar(
    pool: web::Data<DbPool>,
    who: AuthedUser,
    path: web::Path<i64>,
    body: web::Json<tesoreria::RechazarRequest>,
) -> Result<HttpResponse, AppError> {
    let ahora = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
    tesoreria::rechazar_transferencia(&pool, path.into_inner(), who.0, &body.observacion, &ahora)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "detail": "Comprobante rechazado" })))
}

// ---------------------------------------------------------------------------
// treasurer-issued receipts
// ---------------------------------------------------------------------------

pub async fn create_tesorero(
    pool: web::Data<DbPool>,
    who: AuthedUser,
    body: web::Json<tesoreria::NewComprobanteTesorero>,
) -> Result<HttpResponse, AppError> {
    require_group(&pool, who.0, GRUPO_TESORERO).await?;
    let hoy = chrono::Local::now().date_naive();
    let id = tesoreria::create_tesorero(&pool, who.0, &body, hoy).await?;
    Ok(HttpResponse::Created().json(json!({ "id": id })))
}

pub async fn list_tesorero(
    pool: web::Data<DbPool>,
    who: AuthedUser,
) -> Result<HttpResponse, AppError> {
    require_group(&pool, who.0, GRUPO_TESORERO).await?;
    let detalles = tesoreria::list_tesorero(&pool).await?;
    Ok(HttpResponse::Ok().json(detalles))
}

// ---------------------------------------------------------------------------
// dues summary
// ---------------------------------------------------------------------------

/// GET /api/resumen-cuotas — per-member dues standing and moroso flag.
pub async fn resumen_cuotas(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
) -> Result<HttpResponse, AppError> {
    let hoy = chrono::Local::now().date_naive();
    let resumen = crate::reportes::resumen_cuotas(&pool, hoy).await?;
    Ok(HttpResponse::Ok().json(resumen))
}
