use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::auth::{self, AuthedUser};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::archivo;

pub async fn list(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let tipo = query.get("tipo").map(String::as_str);
    let search = query.get("search").map(String::as_str);
    let archivos = archivo::list(&pool, tipo, search).await?;
    Ok(HttpResponse::Ok().json(archivos))
}

pub async fn retrieve(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let encontrado = archivo::find_by_id(&pool, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Archivo no encontrado.".to_string()))?;
    Ok(HttpResponse::Ok().json(encontrado))
}

/// POST /api/archivos — upload metadata. The caller needs the
/// can_upload_<tipo> permiso for the chosen document type.
pub async fn create(
    pool: web::Data<DbPool>,
    who: AuthedUser,
    body: web::Json<archivo::NewArchivo>,
) -> Result<HttpResponse, AppError> {
    let permiso = format!("can_upload_{}", body.tipo);
    if !auth::has_perm(&pool, who.0, &permiso).await? {
        return Err(AppError::Validation {
            field: "tipo".to_string(),
            message: format!(
                "No tiene permiso para subir documentos de tipo '{}'.",
                body.tipo
            ),
        });
    }
    let id = archivo::create(&pool, &body, who.0).await?;
    let creado = archivo::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Archivo no encontrado.".to_string()))?;
    Ok(HttpResponse::Created().json(creado))
}

pub async fn delete(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    if !archivo::delete(&pool, path.into_inner()).await? {
        return Err(AppError::NotFound("Archivo no encontrado.".to_string()));
    }
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/archivo/tipos-permitidos — document types the caller may
/// upload, as {value, label} pairs.
pub async fn tipos_permitidos(
    pool: web::Data<DbPool>,
    who: AuthedUser,
) -> Result<HttpResponse, AppError> {
    let mut permitidos = Vec::new();
    for (codename, label) in archivo::TIPOS {
        let permiso = format!("can_upload_{codename}");
        if auth::has_perm(&pool, who.0, &permiso).await? {
            permitidos.push(json!({ "value": codename, "label": label }));
        }
    }
    Ok(HttpResponse::Ok().json(permitidos))
}
