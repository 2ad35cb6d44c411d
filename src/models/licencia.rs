use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::{citacion, parse_fecha};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Licencia {
    pub id: i64,
    pub citacion_id: i64,
    pub autor_id: i64,
    pub motivo: String,
    pub fecha_licencia: String,
}

#[derive(Debug, Deserialize)]
pub struct NewLicencia {
    pub citacion: i64,
    pub motivo: String,
}

const SELECT: &str = "SELECT id, citacion_id, autor_id, motivo, fecha_licencia FROM licencias";

pub async fn list(
    pool: &DbPool,
    autor_id: Option<i64>,
    citacion_id: Option<i64>,
) -> Result<Vec<Licencia>, sqlx::Error> {
    let sql = format!(
        "{SELECT} WHERE (?1 IS NULL OR autor_id = ?1) AND (?2 IS NULL OR citacion_id = ?2) \
         ORDER BY id"
    );
    sqlx::query_as::<_, Licencia>(&sql)
        .bind(autor_id)
        .bind(citacion_id)
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Licencia>, sqlx::Error> {
    let sql = format!("{SELECT} WHERE id = ?1");
    sqlx::query_as::<_, Licencia>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Create an excuse for a citación. Rejected when the citación starts
/// within the next 24 hours, measured against `ahora`.
pub async fn create(
    pool: &DbPool,
    nueva: &NewLicencia,
    autor_id: i64,
    ahora: NaiveDateTime,
) -> Result<i64, AppError> {
    let cit = citacion::find_by_id(pool, nueva.citacion)
        .await?
        .ok_or_else(|| AppError::Validation {
            field: "citacion".to_string(),
            message: "La citación indicada no existe.".to_string(),
        })?;

    // A fecha the window check cannot read never waives the rule.
    let fecha_citacion = parse_fecha(&cit.fecha).ok_or_else(|| AppError::Validation {
        field: "citacion".to_string(),
        message: "La citación tiene una fecha inválida.".to_string(),
    })?;
    if fecha_citacion <= ahora + Duration::hours(24) {
        return Err(AppError::Validation {
            field: "citacion".to_string(),
            message: "No se puede crear la licencia si la citación es menor a 24 horas."
                .to_string(),
        });
    }

    let result = sqlx::query(
        "INSERT INTO licencias (citacion_id, autor_id, motivo) VALUES (?1, ?2, ?3)",
    )
    .bind(nueva.citacion)
    .bind(autor_id)
    .bind(&nueva.motivo)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn delete(pool: &DbPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM licencias WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
