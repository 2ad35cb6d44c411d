//! Snapshot loaders for the reporting engine: the event resolver and the
//! licencia lookups. Each report resolves its own snapshot and computes
//! purely from it.

use std::collections::HashSet;

use crate::db::DbPool;

/// Event category the polymorphic attendance list can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Categoria {
    Citacion,
    Emergencia,
}

impl Categoria {
    pub fn as_str(self) -> &'static str {
        match self {
            Categoria::Citacion => "citacion",
            Categoria::Emergencia => "emergencia",
        }
    }

    fn tabla(self) -> &'static str {
        match self {
            Categoria::Citacion => "citaciones",
            Categoria::Emergencia => "emergencias",
        }
    }
}

/// A reportable event: one with an attendance list attached. Events
/// without a list never appear here, and dangling lists (whose event is
/// gone) are excluded by the join.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventoResuelto {
    pub evento_id: i64,
    pub lista_id: i64,
}

/// Resolve events of one category, optionally restricted to a calendar
/// year, each paired with its attendance list. Creation order.
pub async fn resolver_eventos(
    pool: &DbPool,
    categoria: Categoria,
    anio: Option<i64>,
) -> Result<Vec<EventoResuelto>, sqlx::Error> {
    let sql = format!(
        "SELECT e.id AS evento_id, l.id AS lista_id \
         FROM {tabla} e \
         JOIN listas_asistencia l ON l.evento_tipo = ?1 AND l.evento_id = e.id \
         WHERE ?2 IS NULL OR CAST(strftime('%Y', e.fecha) AS INTEGER) = ?2 \
         ORDER BY e.id, l.id",
        tabla = categoria.tabla(),
    );
    sqlx::query_as::<_, EventoResuelto>(&sql)
        .bind(categoria.as_str())
        .bind(anio)
        .fetch_all(pool)
        .await
}

/// One attendance record as the classifier consumes it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Registro {
    pub bombero_id: i64,
    pub asistio: bool,
    pub hora_llegada: Option<String>,
}

pub async fn registros_de_lista(
    pool: &DbPool,
    lista_id: i64,
) -> Result<Vec<Registro>, sqlx::Error> {
    sqlx::query_as::<_, Registro>(
        "SELECT bombero_id, asistio, hora_llegada FROM asistencias \
         WHERE lista_id = ?1 ORDER BY id",
    )
    .bind(lista_id)
    .fetch_all(pool)
    .await
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LicenciaSnapshot {
    pub autor_id: i64,
    pub motivo: String,
    pub fecha_licencia: String,
}

/// Licencias attached to one citación, in submission order.
pub async fn licencias_de_citacion(
    pool: &DbPool,
    citacion_id: i64,
) -> Result<Vec<LicenciaSnapshot>, sqlx::Error> {
    sqlx::query_as::<_, LicenciaSnapshot>(
        "SELECT autor_id, motivo, fecha_licencia FROM licencias \
         WHERE citacion_id = ?1 ORDER BY fecha_licencia, id",
    )
    .bind(citacion_id)
    .fetch_all(pool)
    .await
}

/// Citación ids within a year for which the member holds a licencia.
pub async fn citaciones_con_licencia_de(
    pool: &DbPool,
    autor_id: i64,
    anio: i64,
) -> Result<HashSet<i64>, sqlx::Error> {
    let rows: Vec<(i64,)> = sqlx::query_as(
        "SELECT l.citacion_id FROM licencias l \
         JOIN citaciones c ON c.id = l.citacion_id \
         WHERE l.autor_id = ?1 AND CAST(strftime('%Y', c.fecha) AS INTEGER) = ?2",
    )
    .bind(autor_id)
    .bind(anio)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// All (citacion_id, autor_id) licencia pairs for a year.
pub async fn licencias_por_anio(
    pool: &DbPool,
    anio: i64,
) -> Result<Vec<(i64, i64)>, sqlx::Error> {
    sqlx::query_as(
        "SELECT l.citacion_id, l.autor_id FROM licencias l \
         JOIN citaciones c ON c.id = l.citacion_id \
         WHERE CAST(strftime('%Y', c.fecha) AS INTEGER) = ?1",
    )
    .bind(anio)
    .fetch_all(pool)
    .await
}
