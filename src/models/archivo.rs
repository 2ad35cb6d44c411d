use serde::{Deserialize, Serialize};

use crate::db::DbPool;
use crate::errors::AppError;

/// Document types the archive accepts. Upload of each type is gated by a
/// per-user `can_upload_<tipo>` permiso.
pub const TIPOS: &[(&str, &str)] = &[
    ("actas", "Actas"),
    ("reglamentos", "Reglamentos"),
    ("circulares", "Circulares"),
    ("otros", "Otros"),
];

pub fn tipo_valido(tipo: &str) -> bool {
    TIPOS.iter().any(|(codename, _)| *codename == tipo)
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Archivo {
    pub id: i64,
    pub nombre: String,
    pub descripcion: String,
    pub tipo: String,
    pub archivo: String,
    pub creado_por: i64,
    pub creado_en: String,
}

#[derive(Debug, Deserialize)]
pub struct NewArchivo {
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    pub tipo: String,
    pub archivo: String,
}

const SELECT: &str =
    "SELECT id, nombre, descripcion, tipo, archivo, creado_por, creado_en FROM archivos";

/// Newest first, optionally narrowed by tipo and a nombre/descripcion search.
pub async fn list(
    pool: &DbPool,
    tipo: Option<&str>,
    search: Option<&str>,
) -> Result<Vec<Archivo>, sqlx::Error> {
    let pattern = search.map(|s| format!("%{s}%"));
    let sql = format!(
        "{SELECT} WHERE (?1 IS NULL OR tipo = ?1) \
         AND (?2 IS NULL OR nombre LIKE ?2 OR descripcion LIKE ?2) \
         ORDER BY creado_en DESC, id DESC"
    );
    sqlx::query_as::<_, Archivo>(&sql)
        .bind(tipo)
        .bind(pattern)
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Archivo>, sqlx::Error> {
    let sql = format!("{SELECT} WHERE id = ?1");
    sqlx::query_as::<_, Archivo>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &DbPool, nuevo: &NewArchivo, creado_por: i64) -> Result<i64, AppError> {
    if !tipo_valido(&nuevo.tipo) {
        return Err(AppError::Validation {
            field: "tipo".to_string(),
            message: format!("Tipo de documento desconocido: '{}'.", nuevo.tipo),
        });
    }
    let result = sqlx::query(
        "INSERT INTO archivos (nombre, descripcion, tipo, archivo, creado_por) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(&nuevo.nombre)
    .bind(&nuevo.descripcion)
    .bind(&nuevo.tipo)
    .bind(&nuevo.archivo)
    .bind(creado_por)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn delete(pool: &DbPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM archivos WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
