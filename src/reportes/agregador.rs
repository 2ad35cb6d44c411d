//! Folds the classifier across (event × member) pairs.
//!
//! Two different denominators are in play and must stay distinct: the
//! per-event percentages divide by `registrados` (roster size), while the
//! global yearly percentages divide by `total_posibles` (lists × roster).

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::{citacion, emergencia, user};
use crate::models::user::UsuarioBasico;
use crate::reportes::clasificador::{Estado, clasificar};
use crate::reportes::snapshot::{self, Categoria};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Totales {
    pub asistentes: i64,
    pub licencias: i64,
    pub inasistencias: i64,
    pub registrados: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Porcentajes {
    pub asistentes: f64,
    pub licencias: f64,
    pub inasistencias: f64,
}

/// count/total × 100, rounded to 2 decimals; 0.0 on an empty denominator.
pub fn porcentaje(count: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = count as f64 * 100.0 / total as f64;
    (pct * 100.0).round() / 100.0
}

fn anio_de(fecha: &str) -> Option<i64> {
    fecha.get(0..4)?.parse().ok()
}

#[derive(Debug, Serialize)]
pub struct CitacionInfo {
    pub id: i64,
    pub nombre: String,
    pub descripcion: String,
    pub fecha: String,
    pub lugar: String,
    pub tenida: String,
}

#[derive(Debug, Serialize)]
pub struct EmergenciaInfo {
    pub id: i64,
    pub clave: String,
    pub fecha: String,
    pub unidades: String,
}

#[derive(Debug, Serialize)]
pub struct AsistenteDetalle {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub asistio: bool,
    pub hora_llegada: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LicenciaDetalle {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub motivo: String,
    pub fecha_licencia: String,
}

#[derive(Debug, Serialize)]
pub struct ResumenCitacion {
    pub citacion: CitacionInfo,
    pub asistentes: Vec<AsistenteDetalle>,
    pub licencias: Vec<LicenciaDetalle>,
    pub inasistentes: Vec<UsuarioBasico>,
    pub totales: Totales,
    pub porcentajes: Porcentajes,
}

#[derive(Debug, Serialize)]
pub struct ResumenEmergencia {
    pub emergencia: EmergenciaInfo,
    pub asistentes: Vec<AsistenteDetalle>,
    pub inasistentes: Vec<UsuarioBasico>,
    pub totales: Totales,
    pub porcentajes: Porcentajes,
}

#[derive(Debug, Serialize)]
pub struct ResumenUsuarioAnual {
    pub usuario: UsuarioBasico,
    pub anio: i64,
    pub total_citaciones: i64,
    pub total_emergencias: i64,
    pub total_listas: i64,
    pub asistencias: i64,
    pub licencias: i64,
    pub inasistencias: i64,
}

#[derive(Debug, Serialize)]
pub struct ResumenAnualGlobal {
    pub anio: i64,
    pub total_citaciones: i64,
    pub total_emergencias: i64,
    pub total_listas: i64,
    pub total_bomberos: i64,
    pub total_posibles: i64,
    pub totales: Totales,
    pub porcentajes: Porcentajes,
}

/// Per-member OR-folded asistio flags for one list.
fn flags_por_bombero(registros: &[snapshot::Registro]) -> HashMap<i64, Vec<bool>> {
    let mut flags: HashMap<i64, Vec<bool>> = HashMap::new();
    for registro in registros {
        flags.entry(registro.bombero_id).or_default().push(registro.asistio);
    }
    flags
}

struct Clasificacion {
    estados: HashMap<i64, Estado>,
    asistentes: i64,
    licencias: i64,
    inasistencias: i64,
}

/// Run the classifier for every roster member against one list.
/// Partition property: asistentes + licencias + inasistencias == |roster|.
fn clasificar_lista(
    roster: &[UsuarioBasico],
    registros: &[snapshot::Registro],
    con_licencia: &HashSet<i64>,
) -> Clasificacion {
    let flags = flags_por_bombero(registros);
    let mut estados = HashMap::with_capacity(roster.len());
    let (mut asistentes, mut licencias, mut inasistencias) = (0, 0, 0);
    for miembro in roster {
        let propios = flags.get(&miembro.id).cloned().unwrap_or_default();
        let estado = clasificar(propios, con_licencia.contains(&miembro.id));
        match estado {
            Estado::Asistencia => asistentes += 1,
            Estado::Licencia => licencias += 1,
            Estado::Inasistencia => inasistencias += 1,
        }
        estados.insert(miembro.id, estado);
    }
    Clasificacion {
        estados,
        asistentes,
        licencias,
        inasistencias,
    }
}

/// Per-event report for a citación. A citación without an attached list is
/// `NotFound` here — a data-less single-event report must signal absence,
/// not return zeros.
pub async fn resumen_citacion(
    pool: &DbPool,
    citacion_id: i64,
    anio: Option<i64>,
) -> Result<ResumenCitacion, AppError> {
    let cit = citacion::find_by_id(pool, citacion_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Citación no encontrada.".to_string()))?;

    if let Some(anio) = anio {
        if anio_de(&cit.fecha) != Some(anio) {
            return Err(AppError::NotFound(
                "La citación no corresponde al año solicitado.".to_string(),
            ));
        }
    }

    let lista = crate::models::lista::find_by_evento(pool, "citacion", cit.id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("La citación no tiene una lista de asistencia asociada.".to_string())
        })?;

    let roster = user::roster(pool).await?;
    let user_map: HashMap<i64, &UsuarioBasico> = roster.iter().map(|u| (u.id, u)).collect();
    let registros = snapshot::registros_de_lista(pool, lista.id).await?;
    let licencias_rows = snapshot::licencias_de_citacion(pool, cit.id).await?;
    let con_licencia: HashSet<i64> = licencias_rows.iter().map(|l| l.autor_id).collect();

    let clasificacion = clasificar_lista(&roster, &registros, &con_licencia);

    let asistentes = registros
        .iter()
        .filter_map(|r| {
            user_map.get(&r.bombero_id).map(|u| AsistenteDetalle {
                id: u.id,
                email: u.email.clone(),
                first_name: u.first_name.clone(),
                last_name: u.last_name.clone(),
                asistio: r.asistio,
                hora_llegada: r.hora_llegada.clone(),
            })
        })
        .collect();

    // A member who attended never shows up as excused, even with a
    // licencia on file for this citación.
    let licencias = licencias_rows
        .iter()
        .filter(|l| clasificacion.estados.get(&l.autor_id) != Some(&Estado::Asistencia))
        .filter_map(|l| {
            user_map.get(&l.autor_id).map(|u| LicenciaDetalle {
                id: u.id,
                email: u.email.clone(),
                first_name: u.first_name.clone(),
                last_name: u.last_name.clone(),
                motivo: l.motivo.clone(),
                fecha_licencia: l.fecha_licencia.clone(),
            })
        })
        .collect();

    let inasistentes = roster
        .iter()
        .filter(|u| clasificacion.estados.get(&u.id) == Some(&Estado::Inasistencia))
        .cloned()
        .collect();

    let registrados = roster.len() as i64;
    Ok(ResumenCitacion {
        citacion: CitacionInfo {
            id: cit.id,
            nombre: cit.nombre,
            descripcion: cit.descripcion,
            fecha: cit.fecha,
            lugar: cit.lugar,
            tenida: cit.tenida,
        },
        asistentes,
        licencias,
        inasistentes,
        totales: Totales {
            asistentes: clasificacion.asistentes,
            licencias: clasificacion.licencias,
            inasistencias: clasificacion.inasistencias,
            registrados,
        },
        porcentajes: Porcentajes {
            asistentes: porcentaje(clasificacion.asistentes, registrados),
            licencias: porcentaje(clasificacion.licencias, registrados),
            inasistencias: porcentaje(clasificacion.inasistencias, registrados),
        },
    })
}

/// Per-event report for an emergencia. Emergencias have no licencia
/// concept; the licencia totals are structurally zero.
pub async fn resumen_emergencia(
    pool: &DbPool,
    emergencia_id: i64,
    anio: Option<i64>,
) -> Result<ResumenEmergencia, AppError> {
    let emergencia = emergencia::find_by_id(pool, emergencia_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Emergencia no encontrada.".to_string()))?;

    if let Some(anio) = anio {
        if anio_de(&emergencia.fecha) != Some(anio) {
            return Err(AppError::NotFound(
                "La emergencia no corresponde al año solicitado.".to_string(),
            ));
        }
    }

    let lista = crate::models::lista::find_by_evento(pool, "emergencia", emergencia.id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(
                "La emergencia no tiene una lista de asistencia asociada.".to_string(),
            )
        })?;

    let roster = user::roster(pool).await?;
    let user_map: HashMap<i64, &UsuarioBasico> = roster.iter().map(|u| (u.id, u)).collect();
    let registros = snapshot::registros_de_lista(pool, lista.id).await?;

    let clasificacion = clasificar_lista(&roster, &registros, &HashSet::new());

    let asistentes = registros
        .iter()
        .filter_map(|r| {
            user_map.get(&r.bombero_id).map(|u| AsistenteDetalle {
                id: u.id,
                email: u.email.clone(),
                first_name: u.first_name.clone(),
                last_name: u.last_name.clone(),
                asistio: r.asistio,
                hora_llegada: r.hora_llegada.clone(),
            })
        })
        .collect();

    let inasistentes = roster
        .iter()
        .filter(|u| clasificacion.estados.get(&u.id) == Some(&Estado::Inasistencia))
        .cloned()
        .collect();

    let registrados = roster.len() as i64;
    Ok(ResumenEmergencia {
        emergencia: EmergenciaInfo {
            id: emergencia.id,
            clave: emergencia.clave,
            fecha: emergencia.fecha,
            unidades: emergencia.unidades,
        },
        asistentes,
        inasistentes,
        totales: Totales {
            asistentes: clasificacion.asistentes,
            licencias: 0,
            inasistencias: clasificacion.inasistencias,
            registrados,
        },
        porcentajes: Porcentajes {
            asistentes: porcentaje(clasificacion.asistentes, registrados),
            licencias: 0.0,
            inasistencias: porcentaje(clasificacion.inasistencias, registrados),
        },
    })
}

/// One member against every resolved event (both categories) of a year.
/// A year with no resolved events is an all-zero body, never an error.
pub async fn resumen_usuario_anual(
    pool: &DbPool,
    user_id: i64,
    anio: i64,
) -> Result<ResumenUsuarioAnual, AppError> {
    let usuario = user::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Usuario no encontrado.".to_string()))?;
    let usuario = UsuarioBasico {
        id: usuario.id,
        email: usuario.email,
        first_name: usuario.first_name,
        last_name: usuario.last_name,
    };

    let listas_citacion = snapshot::resolver_eventos(pool, Categoria::Citacion, Some(anio)).await?;
    let listas_emergencia =
        snapshot::resolver_eventos(pool, Categoria::Emergencia, Some(anio)).await?;

    let citaciones_con_lista: HashSet<i64> =
        listas_citacion.iter().map(|e| e.evento_id).collect();
    let emergencias_con_lista: HashSet<i64> =
        listas_emergencia.iter().map(|e| e.evento_id).collect();

    let total_citaciones = citaciones_con_lista.len() as i64;
    let total_emergencias = emergencias_con_lista.len() as i64;
    let total_listas = (listas_citacion.len() + listas_emergencia.len()) as i64;

    if total_listas == 0 {
        return Ok(ResumenUsuarioAnual {
            usuario,
            anio,
            total_citaciones: 0,
            total_emergencias: 0,
            total_listas: 0,
            asistencias: 0,
            licencias: 0,
            inasistencias: 0,
        });
    }

    let con_licencia: HashSet<i64> = snapshot::citaciones_con_licencia_de(pool, usuario.id, anio)
        .await?
        .intersection(&citaciones_con_lista)
        .copied()
        .collect();

    let (mut asistencias, mut licencias, mut inasistencias) = (0, 0, 0);

    for evento in &listas_citacion {
        let registros = snapshot::registros_de_lista(pool, evento.lista_id).await?;
        let propios = registros
            .iter()
            .filter(|r| r.bombero_id == usuario.id)
            .map(|r| r.asistio);
        match clasificar(propios, con_licencia.contains(&evento.evento_id)) {
            Estado::Asistencia => asistencias += 1,
            Estado::Licencia => licencias += 1,
            Estado::Inasistencia => inasistencias += 1,
        }
    }

    for evento in &listas_emergencia {
        let registros = snapshot::registros_de_lista(pool, evento.lista_id).await?;
        let propios = registros
            .iter()
            .filter(|r| r.bombero_id == usuario.id)
            .map(|r| r.asistio);
        match clasificar(propios, false) {
            Estado::Asistencia => asistencias += 1,
            // unreachable without a licencia, but the fold stays total
            Estado::Licencia => licencias += 1,
            Estado::Inasistencia => inasistencias += 1,
        }
    }

    Ok(ResumenUsuarioAnual {
        usuario,
        anio,
        total_citaciones,
        total_emergencias,
        total_listas,
        asistencias,
        licencias,
        inasistencias,
    })
}

/// Cross product of every resolved event of the year × the whole roster.
/// The percentage denominator here is total_posibles, not registrados.
pub async fn resumen_anual_global(
    pool: &DbPool,
    anio: i64,
) -> Result<ResumenAnualGlobal, AppError> {
    let roster = user::roster(pool).await?;
    let total_bomberos = roster.len() as i64;

    let listas_citacion = snapshot::resolver_eventos(pool, Categoria::Citacion, Some(anio)).await?;
    let listas_emergencia =
        snapshot::resolver_eventos(pool, Categoria::Emergencia, Some(anio)).await?;

    let citaciones_con_lista: HashSet<i64> =
        listas_citacion.iter().map(|e| e.evento_id).collect();
    let total_citaciones = citaciones_con_lista.len() as i64;
    let total_emergencias = listas_emergencia
        .iter()
        .map(|e| e.evento_id)
        .collect::<HashSet<_>>()
        .len() as i64;
    let total_listas = (listas_citacion.len() + listas_emergencia.len()) as i64;
    let total_posibles = total_listas * total_bomberos;

    if total_listas == 0 || total_bomberos == 0 {
        return Ok(ResumenAnualGlobal {
            anio,
            total_citaciones,
            total_emergencias,
            total_listas,
            total_bomberos,
            total_posibles,
            totales: Totales {
                asistentes: 0,
                licencias: 0,
                inasistencias: 0,
                registrados: total_bomberos,
            },
            porcentajes: Porcentajes {
                asistentes: 0.0,
                licencias: 0.0,
                inasistencias: 0.0,
            },
        });
    }

    // OR-folded presence per (lista, bombero) pair.
    let mut presencia: HashMap<(i64, i64), bool> = HashMap::new();
    let todas_las_listas: Vec<&snapshot::EventoResuelto> =
        listas_citacion.iter().chain(listas_emergencia.iter()).collect();
    for evento in &todas_las_listas {
        let registros = snapshot::registros_de_lista(pool, evento.lista_id).await?;
        for registro in registros {
            let entry = presencia
                .entry((evento.lista_id, registro.bombero_id))
                .or_insert(false);
            *entry = *entry || registro.asistio;
        }
    }

    // Licencia pairs, expanded to every list of the excused citación.
    let mut listas_por_citacion: HashMap<i64, Vec<i64>> = HashMap::new();
    for evento in &listas_citacion {
        listas_por_citacion
            .entry(evento.evento_id)
            .or_default()
            .push(evento.lista_id);
    }
    let mut con_licencia: HashSet<(i64, i64)> = HashSet::new();
    for (citacion_id, autor_id) in snapshot::licencias_por_anio(pool, anio).await? {
        if let Some(lista_ids) = listas_por_citacion.get(&citacion_id) {
            for &lista_id in lista_ids {
                con_licencia.insert((lista_id, autor_id));
            }
        }
    }

    let (mut asistentes, mut licencias, mut inasistencias) = (0, 0, 0);
    for evento in &todas_las_listas {
        for miembro in &roster {
            let key = (evento.lista_id, miembro.id);
            if presencia.get(&key).copied().unwrap_or(false) {
                asistentes += 1;
            } else if con_licencia.contains(&key) {
                licencias += 1;
            } else {
                inasistencias += 1;
            }
        }
    }

    Ok(ResumenAnualGlobal {
        anio,
        total_citaciones,
        total_emergencias,
        total_listas,
        total_bomberos,
        total_posibles,
        totales: Totales {
            asistentes,
            licencias,
            inasistencias,
            registrados: total_bomberos,
        },
        porcentajes: Porcentajes {
            asistentes: porcentaje(asistentes, total_posibles),
            licencias: porcentaje(licencias, total_posibles),
            inasistencias: porcentaje(inasistencias, total_posibles),
        },
    })
}
