/// Outcome of attendance classification for one (event, member) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Estado {
    Asistencia,
    Licencia,
    Inasistencia,
}

/// Classify one member against one attendance list.
///
/// `asistencias` holds the asistio flags of every record for this
/// (list, member) pair — duplicates are real input and fold with OR, so a
/// single true record wins over any number of false ones. A licencia only
/// counts for the exact event it was requested for, and only when no
/// record marked the member present. No record and no licencia is an
/// absence: silence is never "unknown".
pub fn clasificar<I>(asistencias: I, tiene_licencia: bool) -> Estado
where
    I: IntoIterator<Item = bool>,
{
    if asistencias.into_iter().any(|asistio| asistio) {
        return Estado::Asistencia;
    }
    if tiene_licencia {
        return Estado::Licencia;
    }
    Estado::Inasistencia
}
