//! Identity seam. Token validation happens upstream (the auth layer in
//! front of this service); the authenticated user id reaches handlers via
//! the `X-Auth-User` header. Group and permiso checks stay in-handler.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload};

use crate::db::DbPool;
use crate::errors::AppError;

pub const HEADER_USER: &str = "X-Auth-User";

/// Extractor for the upstream-authenticated user id.
#[derive(Debug, Clone, Copy)]
pub struct AuthedUser(pub i64);

impl FromRequest for AuthedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user_id = req
            .headers()
            .get(HEADER_USER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<i64>().ok());
        ready(match user_id {
            Some(id) => Ok(AuthedUser(id)),
            None => Err(AppError::Unauthorized(
                "Credenciales de autenticación no proporcionadas.".to_string(),
            )),
        })
    }
}

/// Whether the user belongs to the named group.
pub async fn in_group(pool: &DbPool, user_id: i64, grupo: &str) -> Result<bool, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM user_grupos ug \
         JOIN grupos g ON g.id = ug.grupo_id \
         WHERE ug.user_id = ?1 AND g.nombre = ?2",
    )
    .bind(user_id)
    .bind(grupo)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// Guard used by treasurer-only endpoints.
pub async fn require_group(pool: &DbPool, user_id: i64, grupo: &str) -> Result<(), AppError> {
    if in_group(pool, user_id, grupo).await? {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Se requiere pertenecer al grupo '{grupo}'."
        )))
    }
}

pub async fn has_perm(pool: &DbPool, user_id: i64, codename: &str) -> Result<bool, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM user_permisos WHERE user_id = ?1 AND codename = ?2",
    )
    .bind(user_id)
    .bind(codename)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn permisos_de_usuario(
    pool: &DbPool,
    user_id: i64,
) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT codename FROM user_permisos WHERE user_id = ?1 ORDER BY codename",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|(c,)| c).collect())
}

pub async fn grant_perm(pool: &DbPool, user_id: i64, codename: &str) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO user_permisos (user_id, codename) VALUES (?1, ?2)")
        .bind(user_id)
        .bind(codename)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn add_to_group(pool: &DbPool, user_id: i64, grupo_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO user_grupos (user_id, grupo_id) VALUES (?1, ?2)")
        .bind(user_id)
        .bind(grupo_id)
        .execute(pool)
        .await?;
    Ok(())
}
