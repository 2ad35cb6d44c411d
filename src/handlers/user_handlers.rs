use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::auth::{self, AuthedUser};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::user;

/// GET /api/me — identity and permission codenames of the caller.
pub async fn me(pool: web::Data<DbPool>, who: AuthedUser) -> Result<HttpResponse, AppError> {
    let usuario = user::find_by_id(&pool, who.0)
        .await?
        .ok_or_else(|| AppError::NotFound("Usuario no encontrado.".to_string()))?;
    let permisos = auth::permisos_de_usuario(&pool, who.0).await?;
    Ok(HttpResponse::Ok().json(json!({
        "id": usuario.id,
        "username": usuario.username,
        "email": usuario.email,
        "first_name": usuario.first_name,
        "last_name": usuario.last_name,
        "permissions": permisos,
    })))
}

pub async fn list(pool: web::Data<DbPool>, _who: AuthedUser) -> Result<HttpResponse, AppError> {
    let perfiles = user::list_perfiles(&pool).await?;
    Ok(HttpResponse::Ok().json(perfiles))
}

pub async fn retrieve(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let perfil = user::find_perfil(&pool, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Perfil no encontrado.".to_string()))?;
    Ok(HttpResponse::Ok().json(perfil))
}

pub async fn create(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    body: web::Json<user::NewPerfil>,
) -> Result<HttpResponse, AppError> {
    let id = user::create_perfil(&pool, &body).await?;
    let perfil = user::find_perfil(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Perfil no encontrado.".to_string()))?;
    Ok(HttpResponse::Created().json(perfil))
}

pub async fn update(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
    body: web::Json<user::PerfilUpdate>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if !user::update_perfil(&pool, id, &body).await? {
        return Err(AppError::NotFound("Perfil no encontrado.".to_string()));
    }
    let perfil = user::find_perfil(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Perfil no encontrado.".to_string()))?;
    Ok(HttpResponse::Ok().json(perfil))
}

pub async fn delete(
    pool: web::Data<DbPool>,
    _who: AuthedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    if !user::delete_perfil(&pool, path.into_inner()).await? {
        return Err(AppError::NotFound("Perfil no encontrado.".to_string()));
    }
    Ok(HttpResponse::NoContent().finish())
}
