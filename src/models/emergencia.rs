use serde::{Deserialize, Serialize};

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::validar_fecha;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Emergencia {
    pub id: i64,
    pub clave: String,
    pub fecha: String,
    pub unidades: String,
    pub autor_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct NewEmergencia {
    pub clave: String,
    pub fecha: String,
    #[serde(default)]
    pub unidades: String,
}

const SELECT: &str = "SELECT id, clave, fecha, unidades, autor_id FROM emergencias";

pub async fn list(pool: &DbPool) -> Result<Vec<Emergencia>, sqlx::Error> {
    let sql = format!("{SELECT} ORDER BY id");
    sqlx::query_as::<_, Emergencia>(&sql).fetch_all(pool).await
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Emergencia>, sqlx::Error> {
    let sql = format!("{SELECT} WHERE id = ?1");
    sqlx::query_as::<_, Emergencia>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &DbPool,
    nueva: &NewEmergencia,
    autor_id: i64,
) -> Result<i64, AppError> {
    validar_fecha(&nueva.fecha)?;
    let result = sqlx::query(
        "INSERT INTO emergencias (clave, fecha, unidades, autor_id) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(&nueva.clave)
    .bind(&nueva.fecha)
    .bind(&nueva.unidades)
    .bind(autor_id)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update(pool: &DbPool, id: i64, cambios: &NewEmergencia) -> Result<bool, AppError> {
    validar_fecha(&cambios.fecha)?;
    let result = sqlx::query(
        "UPDATE emergencias SET clave = ?2, fecha = ?3, unidades = ?4 WHERE id = ?1",
    )
    .bind(id)
    .bind(&cambios.clave)
    .bind(&cambios.fecha)
    .bind(&cambios.unidades)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &DbPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM emergencias WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
