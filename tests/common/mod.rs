//! Shared test infrastructure.
//!
//! `setup_pool()` builds a single-connection in-memory SQLite pool with
//! the full schema applied; the fixture helpers below insert rows through
//! plain SQL so every test controls its own data exactly.

#![allow(dead_code)]

use sqlx::sqlite::SqlitePoolOptions;

use cuartel::db::{self, DbPool};

/// In-memory database, one connection so every query sees the same data.
pub async fn setup_pool() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    sqlx::raw_sql(db::MIGRATIONS)
        .execute(&pool)
        .await
        .expect("failed to run migrations");
    pool
}

pub async fn create_user(pool: &DbPool, username: &str) -> i64 {
    cuartel::models::user::create_user(
        pool,
        username,
        &format!("{username}@cuartel.cl"),
        username,
        "Bombero",
    )
    .await
    .expect("failed to create user")
}

pub async fn create_perfil(pool: &DbPool, user_id: i64, rut: &str) -> i64 {
    let result = sqlx::query(
        "INSERT INTO perfiles (user_id, rut, telefono, contacto, imagen) \
         VALUES (?1, ?2, '', '', 'fotos_perfil/user.jpg')",
    )
    .bind(user_id)
    .bind(rut)
    .execute(pool)
    .await
    .expect("failed to create perfil");
    result.last_insert_rowid()
}

pub async fn create_citacion(pool: &DbPool, autor_id: i64, fecha: &str) -> i64 {
    let result = sqlx::query(
        "INSERT INTO citaciones (nombre, descripcion, fecha, lugar, tenida, autor_id) \
         VALUES ('Reunión ordinaria', '', ?1, 'Cuartel', 'De trabajo', ?2)",
    )
    .bind(fecha)
    .bind(autor_id)
    .execute(pool)
    .await
    .expect("failed to create citacion");
    result.last_insert_rowid()
}

pub async fn create_emergencia(pool: &DbPool, autor_id: i64, fecha: &str) -> i64 {
    let result = sqlx::query(
        "INSERT INTO emergencias (clave, fecha, unidades, autor_id) \
         VALUES ('10-0-1', ?1, 'B-1', ?2)",
    )
    .bind(fecha)
    .bind(autor_id)
    .execute(pool)
    .await
    .expect("failed to create emergencia");
    result.last_insert_rowid()
}

pub async fn create_lista(pool: &DbPool, evento_tipo: &str, evento_id: i64) -> i64 {
    let result = sqlx::query(
        "INSERT INTO listas_asistencia (evento_tipo, evento_id) VALUES (?1, ?2)",
    )
    .bind(evento_tipo)
    .bind(evento_id)
    .execute(pool)
    .await
    .expect("failed to create lista");
    result.last_insert_rowid()
}

pub async fn add_asistencia(pool: &DbPool, lista_id: i64, bombero_id: i64, asistio: bool) {
    sqlx::query("INSERT INTO asistencias (lista_id, bombero_id, asistio) VALUES (?1, ?2, ?3)")
        .bind(lista_id)
        .bind(bombero_id)
        .bind(asistio)
        .execute(pool)
        .await
        .expect("failed to add asistencia");
}

pub async fn create_licencia(pool: &DbPool, citacion_id: i64, autor_id: i64) -> i64 {
    let result = sqlx::query(
        "INSERT INTO licencias (citacion_id, autor_id, motivo) VALUES (?1, ?2, 'Trabajo')",
    )
    .bind(citacion_id)
    .bind(autor_id)
    .execute(pool)
    .await
    .expect("failed to create licencia");
    result.last_insert_rowid()
}

/// Seed one year of the dues grid; returns the 12 slot ids in month order.
pub async fn seed_anio(pool: &DbPool, anio: i64) -> Vec<i64> {
    db::seed_mes_anio(pool, anio, anio)
        .await
        .expect("failed to seed mes_anio");
    let rows: Vec<(i64,)> =
        sqlx::query_as("SELECT id FROM mes_anio WHERE anio = ?1 ORDER BY mes")
            .bind(anio)
            .fetch_all(pool)
            .await
            .expect("failed to read mes_anio");
    rows.into_iter().map(|(id,)| id).collect()
}

pub async fn make_tesorero(pool: &DbPool, user_id: i64) {
    let grupo_id = db::ensure_grupo(pool, "Tesorero")
        .await
        .expect("failed to ensure grupo");
    cuartel::auth::add_to_group(pool, user_id, grupo_id)
        .await
        .expect("failed to add to grupo");
}
