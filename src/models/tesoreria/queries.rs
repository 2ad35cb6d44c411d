use chrono::NaiveDate;

use super::types::*;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::user;

pub async fn meses_list(pool: &DbPool) -> Result<Vec<MesAnio>, sqlx::Error> {
    sqlx::query_as::<_, MesAnio>("SELECT id, anio, mes FROM mes_anio ORDER BY anio, mes")
        .fetch_all(pool)
        .await
}

/// Months a member has effectively paid: every treasurer-issued receipt
/// plus transfer receipts that were approved. Pending or rejected
/// transfers never count.
pub async fn meses_pagados_de(pool: &DbPool, bombero_id: i64) -> Result<Vec<MesAnio>, sqlx::Error> {
    sqlx::query_as::<_, MesAnio>(
        "SELECT DISTINCT m.id, m.anio, m.mes FROM mes_anio m \
         WHERE m.id IN ( \
                 SELECT ctm.mes_anio_id FROM comprobante_tesorero_meses ctm \
                 JOIN comprobantes_tesorero ct ON ct.id = ctm.comprobante_id \
                 WHERE ct.bombero_id = ?1) \
            OR m.id IN ( \
                 SELECT cxm.mes_anio_id FROM comprobante_transferencia_meses cxm \
                 JOIN comprobantes_transferencia cx ON cx.id = cxm.comprobante_id \
                 WHERE cx.bombero_id = ?1 AND cx.aprobado = 1) \
         ORDER BY m.anio, m.mes",
    )
    .bind(bombero_id)
    .fetch_all(pool)
    .await
}

async fn meses_de_tesorero(pool: &DbPool, comprobante_id: i64) -> Result<Vec<i64>, sqlx::Error> {
    let rows: Vec<(i64,)> = sqlx::query_as(
        "SELECT mes_anio_id FROM comprobante_tesorero_meses WHERE comprobante_id = ?1",
    )
    .bind(comprobante_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

async fn meses_de_transferencia(
    pool: &DbPool,
    comprobante_id: i64,
) -> Result<Vec<MesAnio>, sqlx::Error> {
    sqlx::query_as::<_, MesAnio>(
        "SELECT m.id, m.anio, m.mes FROM mes_anio m \
         JOIN comprobante_transferencia_meses cxm ON cxm.mes_anio_id = m.id \
         WHERE cxm.comprobante_id = ?1 ORDER BY m.anio, m.mes",
    )
    .bind(comprobante_id)
    .fetch_all(pool)
    .await
}

/// Every referenced month must be a real grid slot; a dangling id is a
/// client error, not a constraint blowup.
async fn validar_meses(pool: &DbPool, meses: &[i64]) -> Result<(), AppError> {
    if meses.is_empty() {
        return Err(AppError::Validation {
            field: "meses_pagados".to_string(),
            message: "Debes seleccionar al menos un mes.".to_string(),
        });
    }
    for mes_id in meses {
        let (existe,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM mes_anio WHERE id = ?1")
            .bind(mes_id)
            .fetch_one(pool)
            .await?;
        if existe == 0 {
            return Err(AppError::Validation {
                field: "meses_pagados".to_string(),
                message: format!("El mes {mes_id} no existe."),
            });
        }
    }
    Ok(())
}

/// Receipt numbers restart every calendar year; reject a duplicate number
/// within the year of fecha_emision.
pub async fn create_tesorero(
    pool: &DbPool,
    tesorero_id: i64,
    nuevo: &NewComprobanteTesorero,
    hoy: NaiveDate,
) -> Result<i64, AppError> {
    validar_meses(pool, &nuevo.meses_pagados).await?;
    let fecha_emision = nuevo
        .fecha_emision
        .clone()
        .unwrap_or_else(|| hoy.format("%Y-%m-%d").to_string());
    let anio = fecha_emision.chars().take(4).collect::<String>();

    let (existe,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM comprobantes_tesorero \
         WHERE numero_comprobante = ?1 AND strftime('%Y', fecha_emision) = ?2",
    )
    .bind(nuevo.numero_comprobante)
    .bind(&anio)
    .fetch_one(pool)
    .await?;
    if existe > 0 {
        return Err(AppError::Validation {
            field: "numero_comprobante".to_string(),
            message: format!("Ya existe un comprobante con ese número en el año {anio}."),
        });
    }

    let result = sqlx::query(
        "INSERT INTO comprobantes_tesorero \
             (numero_comprobante, tesorero_id, bombero_id, monto_total, metodo_pago, fecha_emision) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(nuevo.numero_comprobante)
    .bind(tesorero_id)
    .bind(nuevo.bombero_id)
    .bind(nuevo.monto_total)
    .bind(&nuevo.metodo_pago)
    .bind(&fecha_emision)
    .execute(pool)
    .await?;
    let id = result.last_insert_rowid();

    for mes_id in &nuevo.meses_pagados {
        sqlx::query(
            "INSERT OR IGNORE INTO comprobante_tesorero_meses (comprobante_id, mes_anio_id) \
             VALUES (?1, ?2)",
        )
        .bind(id)
        .bind(mes_id)
        .execute(pool)
        .await?;
    }
    Ok(id)
}

pub async fn list_tesorero(pool: &DbPool) -> Result<Vec<ComprobanteTesoreroDetalle>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ComprobanteTesoreroRow>(
        "SELECT id, numero_comprobante, tesorero_id, bombero_id, monto_total, metodo_pago, \
                fecha_emision \
         FROM comprobantes_tesorero ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    let mut detalles = Vec::with_capacity(rows.len());
    for row in rows {
        let meses_pagados = meses_de_tesorero(pool, row.id).await?;
        detalles.push(ComprobanteTesoreroDetalle {
            comprobante: row,
            meses_pagados,
        });
    }
    Ok(detalles)
}

pub async fn create_transferencia(
    pool: &DbPool,
    bombero_id: i64,
    nuevo: &NewComprobanteTransferencia,
) -> Result<i64, AppError> {
    if nuevo.archivo.trim().is_empty() {
        return Err(AppError::Validation {
            field: "archivo".to_string(),
            message: "Este campo es obligatorio.".to_string(),
        });
    }
    validar_meses(pool, &nuevo.meses_pagados).await?;

    let result = sqlx::query(
        "INSERT INTO comprobantes_transferencia (bombero_id, archivo) VALUES (?1, ?2)",
    )
    .bind(bombero_id)
    .bind(&nuevo.archivo)
    .execute(pool)
    .await?;
    let id = result.last_insert_rowid();

    for mes_id in &nuevo.meses_pagados {
        sqlx::query(
            "INSERT OR IGNORE INTO comprobante_transferencia_meses (comprobante_id, mes_anio_id) \
             VALUES (?1, ?2)",
        )
        .bind(id)
        .bind(mes_id)
        .execute(pool)
        .await?;
    }
    Ok(id)
}

pub async fn find_transferencia(
    pool: &DbPool,
    id: i64,
) -> Result<Option<ComprobanteTransferenciaRow>, sqlx::Error> {
    sqlx::query_as::<_, ComprobanteTransferenciaRow>(
        "SELECT id, bombero_id, archivo, fecha_envio, aprobado, observacion, revisado_por, \
                fecha_revision \
         FROM comprobantes_transferencia WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

async fn transferencia_detalle(
    pool: &DbPool,
    row: ComprobanteTransferenciaRow,
) -> Result<ComprobanteTransferenciaDetalle, sqlx::Error> {
    let meses = meses_de_transferencia(pool, row.id).await?;
    let bombero = match user::find_by_id(pool, row.bombero_id).await? {
        Some(u) => {
            let nombre_completo = format!("{} {}", u.first_name, u.last_name);
            let nombre = if nombre_completo.trim().is_empty() {
                u.username
            } else {
                nombre_completo.trim().to_string()
            };
            BomberoRef {
                id: u.id,
                nombre,
                email: u.email,
            }
        }
        None => BomberoRef {
            id: row.bombero_id,
            nombre: String::new(),
            email: String::new(),
        },
    };
    Ok(ComprobanteTransferenciaDetalle {
        id: row.id,
        archivo: row.archivo,
        fecha_envio: row.fecha_envio,
        meses_pagados_detalle: meses,
        bombero,
        aprobado: row.aprobado,
        observacion: row.observacion,
        fecha_revision: row.fecha_revision,
        revisado_por: row.revisado_por,
    })
}

pub async fn list_transferencias(
    pool: &DbPool,
    solo_pendientes: bool,
) -> Result<Vec<ComprobanteTransferenciaDetalle>, sqlx::Error> {
    let sql = if solo_pendientes {
        "SELECT id, bombero_id, archivo, fecha_envio, aprobado, observacion, revisado_por, \
                fecha_revision \
         FROM comprobantes_transferencia WHERE aprobado IS NULL ORDER BY id"
    } else {
        "SELECT id, bombero_id, archivo, fecha_envio, aprobado, observacion, revisado_por, \
                fecha_revision \
         FROM comprobantes_transferencia ORDER BY id"
    };
    let rows = sqlx::query_as::<_, ComprobanteTransferenciaRow>(sql)
        .fetch_all(pool)
        .await?;

    let mut detalles = Vec::with_capacity(rows.len());
    for row in rows {
        detalles.push(transferencia_detalle(pool, row).await?);
    }
    Ok(detalles)
}

pub async fn get_transferencia_detalle(
    pool: &DbPool,
    id: i64,
) -> Result<Option<ComprobanteTransferenciaDetalle>, sqlx::Error> {
    match find_transferencia(pool, id).await? {
        Some(row) => Ok(Some(transferencia_detalle(pool, row).await?)),
        None => Ok(None),
    }
}

/// Approve a member-submitted receipt: mirror it as a treasurer receipt
/// covering the same months, then flip the tri-state to approved. The
/// whole sequence is one transaction keyed on `aprobado IS NULL`, so an
/// already-reviewed receipt never gains a second mirror.
pub async fn aprobar_transferencia(
    pool: &DbPool,
    id: i64,
    revisor_id: i64,
    numero_comprobante: i64,
    monto_total: i64,
    ahora: &str,
) -> Result<i64, AppError> {
    let transferencia = find_transferencia(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comprobante no encontrado.".to_string()))?;

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO comprobantes_tesorero \
             (numero_comprobante, tesorero_id, bombero_id, monto_total, metodo_pago, fecha_emision) \
         VALUES (?1, ?2, ?3, ?4, 'transferencia', date(?5))",
    )
    .bind(numero_comprobante)
    .bind(revisor_id)
    .bind(transferencia.bombero_id)
    .bind(monto_total)
    .bind(ahora)
    .execute(&mut *tx)
    .await?;
    let comprobante_id = result.last_insert_rowid();

    sqlx::query(
        "INSERT OR IGNORE INTO comprobante_tesorero_meses (comprobante_id, mes_anio_id) \
         SELECT ?1, mes_anio_id FROM comprobante_transferencia_meses WHERE comprobante_id = ?2",
    )
    .bind(comprobante_id)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    let flip = sqlx::query(
        "UPDATE comprobantes_transferencia \
         SET aprobado = 1, revisado_por = ?2, fecha_revision = ?3 \
         WHERE id = ?1 AND aprobado IS NULL",
    )
    .bind(id)
    .bind(revisor_id)
    .bind(ahora)
    .execute(&mut *tx)
    .await?;
    if flip.rows_affected() == 0 {
        // dropped tx rolls back the mirror receipt
        return Err(AppError::InvalidParameter(
            "El comprobante ya fue revisado.".to_string(),
        ));
    }

    tx.commit().await?;
    Ok(comprobante_id)
}

pub async fn rechazar_transferencia(
    pool: &DbPool,
    id: i64,
    revisor_id: i64,
    observacion: &str,
    ahora: &str,
) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE comprobantes_transferencia \
         SET aprobado = 0, revisado_por = ?2, fecha_revision = ?3, observacion = ?4 \
         WHERE id = ?1",
    )
    .bind(id)
    .bind(revisor_id)
    .bind(ahora)
    .bind(observacion)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Comprobante no encontrado.".to_string()));
    }
    Ok(())
}
