use serde::{Deserialize, Serialize};

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::validar_fecha;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Citacion {
    pub id: i64,
    pub nombre: String,
    pub descripcion: String,
    pub fecha: String,
    pub lugar: String,
    pub tenida: String,
    pub autor_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct NewCitacion {
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    pub fecha: String,
    #[serde(default)]
    pub lugar: String,
    #[serde(default)]
    pub tenida: String,
}

const SELECT: &str =
    "SELECT id, nombre, descripcion, fecha, lugar, tenida, autor_id FROM citaciones";

/// List with optional inclusive timestamp bounds, in creation order.
pub async fn list(
    pool: &DbPool,
    fecha_desde: Option<&str>,
    fecha_hasta: Option<&str>,
) -> Result<Vec<Citacion>, sqlx::Error> {
    let sql = format!(
        "{SELECT} WHERE (?1 IS NULL OR fecha >= ?1) AND (?2 IS NULL OR fecha <= ?2) ORDER BY id"
    );
    sqlx::query_as::<_, Citacion>(&sql)
        .bind(fecha_desde)
        .bind(fecha_hasta)
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Citacion>, sqlx::Error> {
    let sql = format!("{SELECT} WHERE id = ?1");
    sqlx::query_as::<_, Citacion>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &DbPool, nueva: &NewCitacion, autor_id: i64) -> Result<i64, AppError> {
    validar_fecha(&nueva.fecha)?;
    let result = sqlx::query(
        "INSERT INTO citaciones (nombre, descripcion, fecha, lugar, tenida, autor_id) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(&nueva.nombre)
    .bind(&nueva.descripcion)
    .bind(&nueva.fecha)
    .bind(&nueva.lugar)
    .bind(&nueva.tenida)
    .bind(autor_id)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update(pool: &DbPool, id: i64, cambios: &NewCitacion) -> Result<bool, AppError> {
    validar_fecha(&cambios.fecha)?;
    let result = sqlx::query(
        "UPDATE citaciones SET nombre = ?2, descripcion = ?3, fecha = ?4, lugar = ?5, tenida = ?6 \
         WHERE id = ?1",
    )
    .bind(id)
    .bind(&cambios.nombre)
    .bind(&cambios.descripcion)
    .bind(&cambios.fecha)
    .bind(&cambios.lugar)
    .bind(&cambios.tenida)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &DbPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM citaciones WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Past citaciones that still have no attendance list attached —
/// candidates for the operator's "crear lista" action.
pub async fn disponibles(pool: &DbPool, ahora: &str) -> Result<Vec<Citacion>, sqlx::Error> {
    let sql = format!(
        "{SELECT} WHERE fecha < ?1 AND NOT EXISTS ( \
             SELECT 1 FROM listas_asistencia l \
             WHERE l.evento_tipo = 'citacion' AND l.evento_id = citaciones.id) \
         ORDER BY fecha"
    );
    sqlx::query_as::<_, Citacion>(&sql)
        .bind(ahora)
        .fetch_all(pool)
        .await
}
