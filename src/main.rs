use actix_web::{App, HttpServer, middleware, web};

use cuartel::{configure_api, db};

fn env_i64(key: &str, fallback: i64) -> i64 {
    match std::env::var(key) {
        Ok(valor) => match valor.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                log::warn!("{key}={valor} is not a number, using {fallback}");
                fallback
            }
        },
        Err(_) => fallback,
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/cuartel.db".to_string());
    let bind_addr =
        std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    if database_url.starts_with("sqlite://data/") {
        std::fs::create_dir_all("data")?;
    }

    let pool = db::init_pool(&database_url)
        .await
        .map_err(|e| std::io::Error::other(format!("database init failed: {e}")))?;
    db::run_migrations(&pool)
        .await
        .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;

    // Month grid and the treasurer group must exist before the API serves
    // dues traffic.
    let desde = env_i64("MES_GRID_DESDE", 2020);
    let hasta = env_i64("MES_GRID_HASTA", 2030);
    db::seed_mes_anio(&pool, desde, hasta)
        .await
        .map_err(|e| std::io::Error::other(format!("mes_anio seed failed: {e}")))?;
    db::ensure_grupo(&pool, "Tesorero")
        .await
        .map_err(|e| std::io::Error::other(format!("group seed failed: {e}")))?;

    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .service(web::scope("/api").configure(configure_api))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
