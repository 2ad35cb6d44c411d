use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::auth::AuthedUser;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::lista;

pub async fn list(pool: web::Data<DbPool>, _who: AuthedUser) -> Result<HttpResponse, AppError> {
    let listas = lista::list(&pool).await?;
    Ok(HttpResponse::Ok().json(listas))
}

pub async fn retrieve(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let encontrada = lista::find_by_id(&pool, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Lista de asistencia no encontrada.".to_string()))?;
    let detalle = lista::detalle(&pool, &encontrada).await?;
    Ok(HttpResponse::Ok().json(detalle))
}

/// POST /api/listas-asistencia — attach a list to an event and record the
/// firefighters present.
pub async fn create(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    body: web::Json<lista::NewLista>,
) -> Result<HttpResponse, AppError> {
    let id = lista::create(&pool, &body).await?;
    let creada = lista::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Lista de asistencia no encontrada.".to_string()))?;
    let detalle = lista::detalle(&pool, &creada).await?;
    Ok(HttpResponse::Created().json(detalle))
}

/// POST /api/listas-asistencia/{id}/asistencias — append one record.
pub async fn add_registro(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
    body: web::Json<lista::NewRegistro>,
) -> Result<HttpResponse, AppError> {
    let lista_id = path.into_inner();
    if lista::find_by_id(&pool, lista_id).await?.is_none() {
        return Err(AppError::NotFound(
            "Lista de asistencia no encontrada.".to_string(),
        ));
    }
    let id = lista::add_registro(&pool, lista_id, &body).await?;
    Ok(HttpResponse::Created().json(json!({ "id": id })))
}

/// PATCH /api/asistencias/{id} — correct a single record.
pub async fn update_registro(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
    body: web::Json<lista::RegistroUpdate>,
) -> Result<HttpResponse, AppError> {
    if !lista::update_registro(&pool, path.into_inner(), &body).await? {
        return Err(AppError::NotFound(
            "Registro de asistencia no encontrado.".to_string(),
        ));
    }
    Ok(HttpResponse::Ok().json(json!({ "detail": "Registro actualizado." })))
}

pub async fn delete(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    if !lista::delete(&pool, path.into_inner()).await? {
        return Err(AppError::NotFound(
            "Lista de asistencia no encontrada.".to_string(),
        ));
    }
    Ok(HttpResponse::NoContent().finish())
}
