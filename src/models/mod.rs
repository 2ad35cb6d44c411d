pub mod archivo;
pub mod citacion;
pub mod emergencia;
pub mod licencia;
pub mod lista;
pub mod tesoreria;
pub mod user;

use chrono::NaiveDateTime;

use crate::errors::AppError;

/// Event timestamps are stored as ISO-8601 text; tolerate both the `T`
/// separator and the SQLite `datetime('now')` space form.
pub fn parse_fecha(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

/// Events only accept timestamps `parse_fecha` can read back; anything
/// else would dodge the year filters and the licencia window check.
pub(crate) fn validar_fecha(fecha: &str) -> Result<(), AppError> {
    if parse_fecha(fecha).is_none() {
        return Err(AppError::Validation {
            field: "fecha".to_string(),
            message: "Fecha inválida; se espera el formato YYYY-MM-DDTHH:MM:SS.".to_string(),
        });
    }
    Ok(())
}
