use super::types::*;
use crate::db::DbPool;

/// Roster snapshot: every member, ordered by id. Reports classify each of
/// these against every resolved event.
pub async fn roster(pool: &DbPool) -> Result<Vec<UsuarioBasico>, sqlx::Error> {
    sqlx::query_as::<_, UsuarioBasico>(
        "SELECT id, email, first_name, last_name FROM users ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<UsuarioRef>, sqlx::Error> {
    sqlx::query_as::<_, UsuarioRef>(
        "SELECT id, username, email, first_name, last_name FROM users WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_user(
    pool: &DbPool,
    username: &str,
    email: &str,
    first_name: &str,
    last_name: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO users (username, email, first_name, last_name) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(username)
    .bind(email)
    .bind(first_name)
    .bind(last_name)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

const SELECT_PERFIL: &str = "\
    SELECT p.id, p.user_id, p.rut, p.fecha_ingreso, p.telefono, p.contacto, p.imagen, \
           u.username, u.email, u.first_name, u.last_name \
    FROM perfiles p \
    JOIN users u ON u.id = p.user_id";

#[derive(sqlx::FromRow)]
struct PerfilJoinRow {
    id: i64,
    user_id: i64,
    rut: String,
    fecha_ingreso: Option<String>,
    telefono: String,
    contacto: String,
    imagen: String,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
}

impl From<PerfilJoinRow> for PerfilDetalle {
    fn from(row: PerfilJoinRow) -> Self {
        PerfilDetalle {
            id: row.id,
            user: UsuarioRef {
                id: row.user_id,
                username: row.username,
                email: row.email,
                first_name: row.first_name,
                last_name: row.last_name,
            },
            rut: row.rut,
            fecha_ingreso: row.fecha_ingreso,
            telefono: row.telefono,
            contacto: row.contacto,
            imagen: row.imagen,
        }
    }
}

pub async fn list_perfiles(pool: &DbPool) -> Result<Vec<PerfilDetalle>, sqlx::Error> {
    let sql = format!("{SELECT_PERFIL} ORDER BY p.id");
    let rows = sqlx::query_as::<_, PerfilJoinRow>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(PerfilDetalle::from).collect())
}

pub async fn find_perfil(pool: &DbPool, id: i64) -> Result<Option<PerfilDetalle>, sqlx::Error> {
    let sql = format!("{SELECT_PERFIL} WHERE p.id = ?1");
    let row = sqlx::query_as::<_, PerfilJoinRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(PerfilDetalle::from))
}

pub async fn create_perfil(pool: &DbPool, nuevo: &NewPerfil) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO perfiles (user_id, rut, fecha_ingreso, telefono, contacto, imagen) \
         VALUES (?1, ?2, ?3, ?4, ?5, COALESCE(?6, 'fotos_perfil/user.jpg'))",
    )
    .bind(nuevo.user_id)
    .bind(&nuevo.rut)
    .bind(&nuevo.fecha_ingreso)
    .bind(&nuevo.telefono)
    .bind(&nuevo.contacto)
    .bind(&nuevo.imagen)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update_perfil(
    pool: &DbPool,
    id: i64,
    cambios: &PerfilUpdate,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE perfiles SET \
             rut = COALESCE(?2, rut), \
             fecha_ingreso = COALESCE(?3, fecha_ingreso), \
             telefono = COALESCE(?4, telefono), \
             contacto = COALESCE(?5, contacto), \
             imagen = COALESCE(?6, imagen) \
         WHERE id = ?1",
    )
    .bind(id)
    .bind(&cambios.rut)
    .bind(&cambios.fecha_ingreso)
    .bind(&cambios.telefono)
    .bind(&cambios.contacto)
    .bind(&cambios.imagen)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_perfil(pool: &DbPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM perfiles WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
