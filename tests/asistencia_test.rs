//! Attendance reporting engine: per-event, per-member-year and global
//! yearly summaries.

mod common;

use cuartel::errors::AppError;
use cuartel::reportes;

#[tokio::test]
async fn resumen_citacion_reparte_el_roster_en_tercios() {
    let pool = common::setup_pool().await;
    let ana = common::create_user(&pool, "ana").await;
    let beto = common::create_user(&pool, "beto").await;
    let carla = common::create_user(&pool, "carla").await;

    let citacion = common::create_citacion(&pool, ana, "2026-03-10T20:00:00").await;
    let lista = common::create_lista(&pool, "citacion", citacion).await;
    common::add_asistencia(&pool, lista, ana, true).await;
    common::create_licencia(&pool, citacion, beto).await;
    // carla has neither a record nor a licencia

    let resumen = reportes::resumen_citacion(&pool, citacion, Some(2026))
        .await
        .unwrap();

    assert_eq!(resumen.totales.asistentes, 1);
    assert_eq!(resumen.totales.licencias, 1);
    assert_eq!(resumen.totales.inasistencias, 1);
    assert_eq!(resumen.totales.registrados, 3);
    assert_eq!(resumen.porcentajes.asistentes, 33.33);
    assert_eq!(resumen.porcentajes.licencias, 33.33);
    assert_eq!(resumen.porcentajes.inasistencias, 33.33);

    assert_eq!(resumen.inasistentes.len(), 1);
    assert_eq!(resumen.inasistentes[0].id, carla);
}

#[tokio::test]
async fn un_asistio_verdadero_gana_sobre_duplicados_y_licencia() {
    let pool = common::setup_pool().await;
    let ana = common::create_user(&pool, "ana").await;

    let citacion = common::create_citacion(&pool, ana, "2026-03-10T20:00:00").await;
    let lista = common::create_lista(&pool, "citacion", citacion).await;
    // duplicate records for the same member, one of them positive
    common::add_asistencia(&pool, lista, ana, false).await;
    common::add_asistencia(&pool, lista, ana, true).await;
    // a licencia on file never demotes an actual attendance
    common::create_licencia(&pool, citacion, ana).await;

    let resumen = reportes::resumen_citacion(&pool, citacion, None).await.unwrap();

    assert_eq!(resumen.totales.asistentes, 1);
    assert_eq!(resumen.totales.licencias, 0);
    assert_eq!(resumen.totales.inasistencias, 0);
    assert!(resumen.licencias.is_empty());
}

#[tokio::test]
async fn licencia_solo_cuenta_para_su_citacion() {
    let pool = common::setup_pool().await;
    let ana = common::create_user(&pool, "ana").await;
    let beto = common::create_user(&pool, "beto").await;

    let con_licencia = common::create_citacion(&pool, ana, "2026-03-10T20:00:00").await;
    let otra = common::create_citacion(&pool, ana, "2026-04-10T20:00:00").await;
    common::create_lista(&pool, "citacion", con_licencia).await;
    common::create_lista(&pool, "citacion", otra).await;
    common::create_licencia(&pool, con_licencia, beto).await;

    let resumen = reportes::resumen_citacion(&pool, otra, None).await.unwrap();
    assert_eq!(resumen.totales.licencias, 0);
    assert_eq!(resumen.totales.inasistencias, 2);
}

#[tokio::test]
async fn citacion_sin_lista_es_not_found() {
    let pool = common::setup_pool().await;
    let ana = common::create_user(&pool, "ana").await;
    let citacion = common::create_citacion(&pool, ana, "2026-03-10T20:00:00").await;

    let err = reportes::resumen_citacion(&pool, citacion, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn citacion_de_otro_anio_es_not_found() {
    let pool = common::setup_pool().await;
    let ana = common::create_user(&pool, "ana").await;
    let citacion = common::create_citacion(&pool, ana, "2025-03-10T20:00:00").await;
    common::create_lista(&pool, "citacion", citacion).await;

    let err = reportes::resumen_citacion(&pool, citacion, Some(2026))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn resumen_emergencia_no_tiene_licencias() {
    let pool = common::setup_pool().await;
    let ana = common::create_user(&pool, "ana").await;
    let beto = common::create_user(&pool, "beto").await;

    let emergencia = common::create_emergencia(&pool, ana, "2026-05-01T03:30:00").await;
    let lista = common::create_lista(&pool, "emergencia", emergencia).await;
    common::add_asistencia(&pool, lista, ana, true).await;

    let resumen = reportes::resumen_emergencia(&pool, emergencia, Some(2026))
        .await
        .unwrap();
    assert_eq!(resumen.totales.asistentes, 1);
    assert_eq!(resumen.totales.licencias, 0);
    assert_eq!(resumen.totales.inasistencias, 1);
    assert_eq!(resumen.porcentajes.licencias, 0.0);
    assert_eq!(resumen.inasistentes[0].id, beto);
}

#[tokio::test]
async fn resumen_usuario_cuenta_ambas_categorias() {
    let pool = common::setup_pool().await;
    let ana = common::create_user(&pool, "ana").await;

    // attended citación
    let c1 = common::create_citacion(&pool, ana, "2026-03-10T20:00:00").await;
    let l1 = common::create_lista(&pool, "citacion", c1).await;
    common::add_asistencia(&pool, l1, ana, true).await;
    // excused citación
    let c2 = common::create_citacion(&pool, ana, "2026-04-10T20:00:00").await;
    common::create_lista(&pool, "citacion", c2).await;
    common::create_licencia(&pool, c2, ana).await;
    // missed emergencia
    let e1 = common::create_emergencia(&pool, ana, "2026-05-01T03:30:00").await;
    common::create_lista(&pool, "emergencia", e1).await;
    // a citación without a list never enters the denominator
    common::create_citacion(&pool, ana, "2026-06-10T20:00:00").await;
    // nor does an event from another year
    let c_viejo = common::create_citacion(&pool, ana, "2025-03-10T20:00:00").await;
    common::create_lista(&pool, "citacion", c_viejo).await;

    let resumen = reportes::resumen_usuario_anual(&pool, ana, 2026).await.unwrap();
    assert_eq!(resumen.total_citaciones, 2);
    assert_eq!(resumen.total_emergencias, 1);
    assert_eq!(resumen.total_listas, 3);
    assert_eq!(resumen.asistencias, 1);
    assert_eq!(resumen.licencias, 1);
    assert_eq!(resumen.inasistencias, 1);
}

#[tokio::test]
async fn resumen_usuario_sin_eventos_es_cuerpo_en_cero() {
    let pool = common::setup_pool().await;
    let ana = common::create_user(&pool, "ana").await;

    let resumen = reportes::resumen_usuario_anual(&pool, ana, 2026).await.unwrap();
    assert_eq!(resumen.total_listas, 0);
    assert_eq!(resumen.asistencias, 0);
    assert_eq!(resumen.licencias, 0);
    assert_eq!(resumen.inasistencias, 0);
}

#[tokio::test]
async fn resumen_usuario_inexistente_es_not_found() {
    let pool = common::setup_pool().await;
    let err = reportes::resumen_usuario_anual(&pool, 999, 2026)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn resumen_anual_usa_el_producto_como_denominador() {
    let pool = common::setup_pool().await;
    let ana = common::create_user(&pool, "ana").await;
    let beto = common::create_user(&pool, "beto").await;
    let carla = common::create_user(&pool, "carla").await;

    let c1 = common::create_citacion(&pool, ana, "2026-03-10T20:00:00").await;
    let l1 = common::create_lista(&pool, "citacion", c1).await;
    common::add_asistencia(&pool, l1, ana, true).await;
    common::add_asistencia(&pool, l1, beto, true).await;

    let e1 = common::create_emergencia(&pool, ana, "2026-05-01T03:30:00").await;
    let l2 = common::create_lista(&pool, "emergencia", e1).await;
    common::add_asistencia(&pool, l2, carla, true).await;

    common::create_licencia(&pool, c1, carla).await;

    let resumen = reportes::resumen_anual_global(&pool, 2026).await.unwrap();
    assert_eq!(resumen.total_listas, 2);
    assert_eq!(resumen.total_bomberos, 3);
    assert_eq!(resumen.total_posibles, 6);
    assert_eq!(resumen.totales.asistentes, 3);
    assert_eq!(resumen.totales.licencias, 1);
    assert_eq!(resumen.totales.inasistencias, 2);

    // the three slices always cover every (lista, bombero) slot
    let suma = resumen.porcentajes.asistentes
        + resumen.porcentajes.licencias
        + resumen.porcentajes.inasistencias;
    assert!((suma - 100.0).abs() <= 0.03, "suma fue {suma}");
}

#[tokio::test]
async fn resumen_anual_ignora_eventos_sin_lista() {
    let pool = common::setup_pool().await;
    let ana = common::create_user(&pool, "ana").await;

    let con_lista = common::create_citacion(&pool, ana, "2026-03-10T20:00:00").await;
    common::create_lista(&pool, "citacion", con_lista).await;
    common::create_citacion(&pool, ana, "2026-04-10T20:00:00").await;

    let resumen = reportes::resumen_anual_global(&pool, 2026).await.unwrap();
    assert_eq!(resumen.total_citaciones, 1);
    assert_eq!(resumen.total_listas, 1);
}

#[tokio::test]
async fn resumen_anual_sin_listas_es_cuerpo_en_cero() {
    let pool = common::setup_pool().await;
    common::create_user(&pool, "ana").await;

    let resumen = reportes::resumen_anual_global(&pool, 2026).await.unwrap();
    assert_eq!(resumen.total_posibles, 0);
    assert_eq!(resumen.porcentajes.asistentes, 0.0);
    assert_eq!(resumen.totales.inasistencias, 0);
}
