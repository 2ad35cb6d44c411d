use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

pub type DbPool = SqlitePool;

pub const MIGRATIONS: &str = include_str!("schema.sql");

pub async fn init_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);
    SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(MIGRATIONS).execute(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Populate the mes_anio grid for the given inclusive year range.
/// Idempotent: existing (anio, mes) pairs are left untouched.
pub async fn seed_mes_anio(pool: &DbPool, desde: i64, hasta: i64) -> Result<u64, sqlx::Error> {
    let mut created = 0;
    for anio in desde..=hasta {
        for mes in 1..=12 {
            let result = sqlx::query(
                "INSERT OR IGNORE INTO mes_anio (anio, mes) VALUES (?1, ?2)",
            )
            .bind(anio)
            .bind(mes)
            .execute(pool)
            .await?;
            created += result.rows_affected();
        }
    }
    if created > 0 {
        log::info!("Seeded mes_anio grid: {created} new slots ({desde}-{hasta})");
    }
    Ok(created)
}

/// Ensure a named group exists. Returns its id.
pub async fn ensure_grupo(pool: &DbPool, nombre: &str) -> Result<i64, sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO grupos (nombre) VALUES (?1)")
        .bind(nombre)
        .execute(pool)
        .await?;
    let (id,): (i64,) = sqlx::query_as("SELECT id FROM grupos WHERE nombre = ?1")
        .bind(nombre)
        .fetch_one(pool)
        .await?;
    Ok(id)
}
