use actix_web::web;

pub mod auth;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod reportes;

/// Route table for the JSON API, mounted under /api by the binary and by
/// integration tests.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    use handlers::*;

    cfg
        // Caller identity and member profiles
        .route("/me", web::get().to(user_handlers::me))
        .route("/perfiles", web::get().to(user_handlers::list))
        .route("/perfiles", web::post().to(user_handlers::create))
        .route("/perfiles/{id}", web::get().to(user_handlers::retrieve))
        .route("/perfiles/{id}", web::patch().to(user_handlers::update))
        .route("/perfiles/{id}", web::delete().to(user_handlers::delete))
        // Citaciones
        .route(
            "/citaciones/disponibles",
            web::get().to(citacion_handlers::disponibles),
        )
        .route("/citaciones", web::get().to(citacion_handlers::list))
        .route("/citaciones", web::post().to(citacion_handlers::create))
        .route("/citaciones/{id}", web::get().to(citacion_handlers::retrieve))
        .route("/citaciones/{id}", web::patch().to(citacion_handlers::update))
        .route("/citaciones/{id}", web::delete().to(citacion_handlers::delete))
        // Emergencias
        .route("/emergencias", web::get().to(emergencia_handlers::list))
        .route("/emergencias", web::post().to(emergencia_handlers::create))
        .route(
            "/emergencias/{id}",
            web::get().to(emergencia_handlers::retrieve),
        )
        .route(
            "/emergencias/{id}",
            web::patch().to(emergencia_handlers::update),
        )
        .route(
            "/emergencias/{id}",
            web::delete().to(emergencia_handlers::delete),
        )
        // Licencias
        .route("/licencias", web::get().to(licencia_handlers::list))
        .route("/licencias", web::post().to(licencia_handlers::create))
        .route("/licencias/{id}", web::get().to(licencia_handlers::retrieve))
        .route("/licencias/{id}", web::delete().to(licencia_handlers::delete))
        // Listas de asistencia
        .route("/listas-asistencia", web::get().to(lista_handlers::list))
        .route("/listas-asistencia", web::post().to(lista_handlers::create))
        .route(
            "/listas-asistencia/{id}",
            web::get().to(lista_handlers::retrieve),
        )
        .route(
            "/listas-asistencia/{id}",
            web::delete().to(lista_handlers::delete),
        )
        .route(
            "/listas-asistencia/{id}/asistencias",
            web::post().to(lista_handlers::add_registro),
        )
        .route(
            "/asistencias/{id}",
            web::patch().to(lista_handlers::update_registro),
        )
        // Reports
        .route(
            "/resumen-asistencia/{id}",
            web::get().to(asistencia_handlers::resumen_citacion),
        )
        .route(
            "/resumen-emergencia/{id}",
            web::get().to(asistencia_handlers::resumen_emergencia),
        )
        .route(
            "/resumen-usuario/{id}",
            web::get().to(asistencia_handlers::resumen_usuario),
        )
        .route(
            "/resumen-anual",
            web::get().to(asistencia_handlers::resumen_anual),
        )
        // Document archive
        .route(
            "/archivo/tipos-permitidos",
            web::get().to(archivo_handlers::tipos_permitidos),
        )
        .route("/archivos", web::get().to(archivo_handlers::list))
        .route("/archivos", web::post().to(archivo_handlers::create))
        .route("/archivos/{id}", web::get().to(archivo_handlers::retrieve))
        .route("/archivos/{id}", web::delete().to(archivo_handlers::delete))
        // Dues
        .route("/meses-anio", web::get().to(tesoreria_handlers::meses_list))
        .route(
            "/meses-anio/mis_meses_pagados",
            web::get().to(tesoreria_handlers::mis_meses_pagados),
        )
        .route(
            "/meses-anio/meses_pagados_por_bombero/{id}",
            web::get().to(tesoreria_handlers::meses_pagados_por_bombero),
        )
        .route(
            "/comprobantes/transferencia/pendientes",
            web::get().to(tesoreria_handlers::pendientes),
        )
        .route(
            "/comprobantes/transferencia",
            web::get().to(tesoreria_handlers::list_transferencias),
        )
        .route(
            "/comprobantes/transferencia",
            web::post().to(tesoreria_handlers::create_transferencia),
        )
        .route(
            "/comprobantes/transferencia/{id}",
            web::get().to(tesoreria_handlers::retrieve_transferencia),
        )
        .route(
            "/comprobantes/transferencia/{id}/aprobar",
            web::patch().to(tesoreria_handlers::aprobar),
        )
        .route(
            "/comprobantes/transferencia/{id}/rechazar",
            web::patch().to(tesoreria_handlers::rechazar),
        )
        .route(
            "/comprobantes/tesorero",
            web::get().to(tesoreria_handlers::list_tesorero),
        )
        .route(
            "/comprobantes/tesorero",
            web::post().to(tesoreria_handlers::create_tesorero),
        )
        .route(
            "/resumen-cuotas",
            web::get().to(tesoreria_handlers::resumen_cuotas),
        );
}
