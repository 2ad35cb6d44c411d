use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::{citacion, emergencia, user};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Lista {
    pub id: i64,
    pub evento_tipo: String,
    pub evento_id: i64,
    pub fecha_creacion: String,
}

/// Creation payload: the referenced event plus the firefighters present,
/// each of whom gets an asistio=true record.
#[derive(Debug, Deserialize)]
pub struct NewLista {
    pub evento_tipo: String,
    pub evento_id: i64,
    pub bomberos: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct NewRegistro {
    pub bombero_id: i64,
    pub asistio: bool,
    pub hora_llegada: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegistroUpdate {
    pub asistio: Option<bool>,
    pub hora_llegada: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AsistenciaDetalle {
    pub bombero_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub asistio: bool,
    pub hora_llegada: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LicenciaEnLista {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub motivo: String,
    pub fecha_licencia: String,
}

/// Composite representation returned by the listas-asistencia endpoints.
#[derive(Debug, Serialize)]
pub struct ListaDetalle {
    pub id: i64,
    pub tipo: String,
    pub evento: serde_json::Value,
    pub fecha_creacion: String,
    pub total_licencias: i64,
    pub licencias: Vec<LicenciaEnLista>,
    pub asistencias: Vec<AsistenciaDetalle>,
}

pub async fn list(pool: &DbPool) -> Result<Vec<Lista>, sqlx::Error> {
    sqlx::query_as::<_, Lista>(
        "SELECT id, evento_tipo, evento_id, fecha_creacion FROM listas_asistencia ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Lista>, sqlx::Error> {
    sqlx::query_as::<_, Lista>(
        "SELECT id, evento_tipo, evento_id, fecha_creacion FROM listas_asistencia WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_evento(
    pool: &DbPool,
    evento_tipo: &str,
    evento_id: i64,
) -> Result<Option<Lista>, sqlx::Error> {
    sqlx::query_as::<_, Lista>(
        "SELECT id, evento_tipo, evento_id, fecha_creacion FROM listas_asistencia \
         WHERE evento_tipo = ?1 AND evento_id = ?2 ORDER BY id LIMIT 1",
    )
    .bind(evento_tipo)
    .bind(evento_id)
    .fetch_optional(pool)
    .await
}

pub async fn create(pool: &DbPool, nueva: &NewLista) -> Result<i64, AppError> {
    let existe = match nueva.evento_tipo.as_str() {
        "citacion" => citacion::find_by_id(pool, nueva.evento_id).await?.is_some(),
        "emergencia" => emergencia::find_by_id(pool, nueva.evento_id).await?.is_some(),
        _ => {
            return Err(AppError::Validation {
                field: "evento_tipo".to_string(),
                message: "Tipo de contenido inválido.".to_string(),
            });
        }
    };
    if !existe {
        return Err(AppError::Validation {
            field: "evento_id".to_string(),
            message: "El evento indicado no existe.".to_string(),
        });
    }

    let result = sqlx::query(
        "INSERT INTO listas_asistencia (evento_tipo, evento_id) VALUES (?1, ?2)",
    )
    .bind(&nueva.evento_tipo)
    .bind(nueva.evento_id)
    .execute(pool)
    .await?;
    let lista_id = result.last_insert_rowid();

    for bombero_id in &nueva.bomberos {
        sqlx::query("INSERT INTO asistencias (lista_id, bombero_id, asistio) VALUES (?1, ?2, 1)")
            .bind(lista_id)
            .bind(bombero_id)
            .execute(pool)
            .await?;
    }

    Ok(lista_id)
}

/// Append one attendance record. Duplicates per (lista, bombero) are
/// allowed; the reporting engine folds them.
pub async fn add_registro(
    pool: &DbPool,
    lista_id: i64,
    registro: &NewRegistro,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO asistencias (lista_id, bombero_id, asistio, hora_llegada) \
         VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(lista_id)
    .bind(registro.bombero_id)
    .bind(registro.asistio)
    .bind(&registro.hora_llegada)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Correct one record in place, e.g. a late arrival marked absent.
pub async fn update_registro(
    pool: &DbPool,
    registro_id: i64,
    cambios: &RegistroUpdate,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE asistencias SET \
             asistio = COALESCE(?2, asistio), \
             hora_llegada = COALESCE(?3, hora_llegada) \
         WHERE id = ?1",
    )
    .bind(registro_id)
    .bind(cambios.asistio)
    .bind(&cambios.hora_llegada)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &DbPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM listas_asistencia WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

async fn asistencias_detalle(
    pool: &DbPool,
    lista_id: i64,
) -> Result<Vec<AsistenciaDetalle>, sqlx::Error> {
    sqlx::query_as::<_, AsistenciaDetalle>(
        "SELECT a.bombero_id, u.email, u.first_name, u.last_name, a.asistio, a.hora_llegada \
         FROM asistencias a JOIN users u ON u.id = a.bombero_id \
         WHERE a.lista_id = ?1 ORDER BY a.id",
    )
    .bind(lista_id)
    .fetch_all(pool)
    .await
}

async fn licencias_en_lista(
    pool: &DbPool,
    citacion_id: i64,
) -> Result<Vec<LicenciaEnLista>, sqlx::Error> {
    sqlx::query_as::<_, LicenciaEnLista>(
        "SELECT u.email, u.first_name, u.last_name, l.motivo, l.fecha_licencia \
         FROM licencias l JOIN users u ON u.id = l.autor_id \
         WHERE l.citacion_id = ?1 ORDER BY l.fecha_licencia",
    )
    .bind(citacion_id)
    .fetch_all(pool)
    .await
}

fn autor_json(autor: Option<user::UsuarioRef>) -> serde_json::Value {
    match autor {
        Some(u) => json!({
            "email": u.email,
            "first_name": u.first_name,
            "last_name": u.last_name,
        }),
        None => serde_json::Value::Null,
    }
}

/// Full representation: event payload (shape depends on the event kind),
/// attendance records, and for citaciones the attached licencias.
pub async fn detalle(pool: &DbPool, lista: &Lista) -> Result<ListaDetalle, AppError> {
    let asistencias = asistencias_detalle(pool, lista.id).await?;

    let (evento, licencias) = match lista.evento_tipo.as_str() {
        "citacion" => match citacion::find_by_id(pool, lista.evento_id).await? {
            Some(c) => {
                let autor = user::find_by_id(pool, c.autor_id).await?;
                let licencias = licencias_en_lista(pool, c.id).await?;
                let evento = json!({
                    "id": c.id,
                    "nombre": c.nombre,
                    "descripcion": c.descripcion,
                    "fecha": c.fecha,
                    "lugar": c.lugar,
                    "tenida": c.tenida,
                    "autor": autor_json(autor),
                });
                (evento, licencias)
            }
            None => (json!({}), Vec::new()),
        },
        _ => match emergencia::find_by_id(pool, lista.evento_id).await? {
            Some(e) => {
                let autor = user::find_by_id(pool, e.autor_id).await?;
                let evento = json!({
                    "id": e.id,
                    "clave": e.clave,
                    "fecha": e.fecha,
                    "unidades": e.unidades,
                    "autor": autor_json(autor),
                });
                (evento, Vec::new())
            }
            None => (json!({}), Vec::new()),
        },
    };

    Ok(ListaDetalle {
        id: lista.id,
        tipo: lista.evento_tipo.clone(),
        evento,
        fecha_creacion: lista.fecha_creacion.clone(),
        total_licencias: licencias.len() as i64,
        licencias,
        asistencias,
    })
}
