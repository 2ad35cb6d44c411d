//! Monthly-dues summary and the moroso (delinquent) rule.
//!
//! Shares the year-windowing technique of the attendance aggregator but
//! runs over payment records: a member's paid set is the union of months
//! on treasurer receipts and months on approved transfer receipts.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::tesoreria::{self, MesAnio};
use crate::models::user::{self, UsuarioRef};

/// A member owing more than this many elapsed months this year is moroso.
const UMBRAL_MOROSO: i64 = 4;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CuotasAnio {
    pub anio: i64,
    pub pagadas: i64,
    pub pendientes: i64,
}

#[derive(Debug, Serialize)]
pub struct BomberoCuotas {
    pub id: i64,
    pub user: UsuarioRef,
    pub rut: String,
    pub fecha_ingreso: Option<String>,
    pub telefono: String,
    pub contacto: String,
    pub imagen: String,
    pub cuotas_por_anio: Vec<CuotasAnio>,
    pub total_pagadas: i64,
    pub total_pendientes: i64,
    #[serde(rename = "isMoroso")]
    pub is_moroso: i64,
}

#[derive(Debug, PartialEq, Eq)]
pub struct CuotasCalculadas {
    pub cuotas_por_anio: Vec<CuotasAnio>,
    pub total_pagadas: i64,
    pub total_pendientes: i64,
    pub is_moroso: i64,
}

/// Fold one member's paid-slot set over the full grid.
///
/// Per-year totals cover every year in the grid and always satisfy
/// pagadas + pendientes == |months(year)|. Delinquency only looks at the
/// current year's elapsed window: months with mes <= the as-of month.
pub fn cuotas_de_bombero(
    grid: &[MesAnio],
    pagados: &HashSet<i64>,
    hoy: NaiveDate,
) -> CuotasCalculadas {
    let mut meses_por_anio: HashMap<i64, Vec<&MesAnio>> = HashMap::new();
    for slot in grid {
        meses_por_anio.entry(slot.anio).or_default().push(slot);
    }
    let mut anios: Vec<i64> = meses_por_anio.keys().copied().collect();
    anios.sort_unstable();

    let mut cuotas_por_anio = Vec::with_capacity(anios.len());
    let mut total_pagadas = 0;
    let mut total_pendientes = 0;
    for anio in anios {
        let slots = &meses_por_anio[&anio];
        let pagadas = slots.iter().filter(|s| pagados.contains(&s.id)).count() as i64;
        let pendientes = slots.len() as i64 - pagadas;
        total_pagadas += pagadas;
        total_pendientes += pendientes;
        cuotas_por_anio.push(CuotasAnio {
            anio,
            pagadas,
            pendientes,
        });
    }

    let anio_actual = hoy.year() as i64;
    let mes_actual = hoy.month() as i64;
    let vigentes: Vec<i64> = grid
        .iter()
        .filter(|s| s.anio == anio_actual && s.mes <= mes_actual)
        .map(|s| s.id)
        .collect();
    let pagadas_vigentes = vigentes.iter().filter(|id| pagados.contains(id)).count() as i64;
    let adeudadas = vigentes.len() as i64 - pagadas_vigentes;
    let is_moroso = i64::from(adeudadas > UMBRAL_MOROSO);

    CuotasCalculadas {
        cuotas_por_anio,
        total_pagadas,
        total_pendientes,
        is_moroso,
    }
}

async fn pagos_por_bombero(pool: &DbPool) -> Result<HashMap<i64, HashSet<i64>>, sqlx::Error> {
    let mut pagos: HashMap<i64, HashSet<i64>> = HashMap::new();

    let tesorero: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT ct.bombero_id, ctm.mes_anio_id FROM comprobante_tesorero_meses ctm \
         JOIN comprobantes_tesorero ct ON ct.id = ctm.comprobante_id",
    )
    .fetch_all(pool)
    .await?;
    for (bombero_id, mes_id) in tesorero {
        pagos.entry(bombero_id).or_default().insert(mes_id);
    }

    let transferencia: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT cx.bombero_id, cxm.mes_anio_id FROM comprobante_transferencia_meses cxm \
         JOIN comprobantes_transferencia cx ON cx.id = cxm.comprobante_id \
         WHERE cx.aprobado = 1",
    )
    .fetch_all(pool)
    .await?;
    for (bombero_id, mes_id) in transferencia {
        pagos.entry(bombero_id).or_default().insert(mes_id);
    }

    Ok(pagos)
}

/// Dues summary: one entry per registered profile, covering every year of
/// the grid plus the current-year delinquency flag.
pub async fn resumen_cuotas(
    pool: &DbPool,
    hoy: NaiveDate,
) -> Result<Vec<BomberoCuotas>, AppError> {
    let grid = tesoreria::meses_list(pool).await?;
    let perfiles = user::list_perfiles(pool).await?;
    let pagos = pagos_por_bombero(pool).await?;
    let vacio = HashSet::new();

    let mut resultados = Vec::with_capacity(perfiles.len());
    for perfil in perfiles {
        let pagados = pagos.get(&perfil.user.id).unwrap_or(&vacio);
        let calculo = cuotas_de_bombero(&grid, pagados, hoy);
        resultados.push(BomberoCuotas {
            id: perfil.id,
            user: perfil.user,
            rut: perfil.rut,
            fecha_ingreso: perfil.fecha_ingreso,
            telefono: perfil.telefono,
            contacto: perfil.contacto,
            imagen: perfil.imagen,
            cuotas_por_anio: calculo.cuotas_por_anio,
            total_pagadas: calculo.total_pagadas,
            total_pendientes: calculo.total_pendientes,
            is_moroso: calculo.is_moroso,
        });
    }
    Ok(resultados)
}
