pub mod archivo_handlers;
pub mod asistencia_handlers;
pub mod citacion_handlers;
pub mod emergencia_handlers;
pub mod licencia_handlers;
pub mod lista_handlers;
pub mod tesoreria_handlers;
pub mod user_handlers;

use std::collections::HashMap;

use crate::errors::AppError;

/// Optional `anio` query parameter; malformed input is a client error.
pub(crate) fn parse_anio(query: &HashMap<String, String>) -> Result<Option<i64>, AppError> {
    match query.get("anio") {
        None => Ok(None),
        Some(valor) => valor
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::InvalidParameter("Parámetro 'anio' inválido.".to_string())),
    }
}

pub(crate) fn require_anio(query: &HashMap<String, String>) -> Result<i64, AppError> {
    parse_anio(query)?.ok_or_else(|| {
        AppError::InvalidParameter("Debe proporcionar el parámetro 'anio'.".to_string())
    })
}

pub(crate) fn parse_id(query: &HashMap<String, String>, key: &str) -> Result<Option<i64>, AppError> {
    match query.get(key) {
        None => Ok(None),
        Some(valor) => valor
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::InvalidParameter(format!("Parámetro '{key}' inválido."))),
    }
}
