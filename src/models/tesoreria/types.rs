use serde::{Deserialize, Serialize};

/// One slot of the fixed (year, month) dues grid.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MesAnio {
    pub id: i64,
    pub anio: i64,
    pub mes: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ComprobanteTesoreroRow {
    pub id: i64,
    pub numero_comprobante: i64,
    pub tesorero_id: i64,
    pub bombero_id: i64,
    pub monto_total: i64,
    pub metodo_pago: String,
    pub fecha_emision: String,
}

#[derive(Debug, Serialize)]
pub struct ComprobanteTesoreroDetalle {
    #[serde(flatten)]
    pub comprobante: ComprobanteTesoreroRow,
    pub meses_pagados: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct NewComprobanteTesorero {
    pub numero_comprobante: i64,
    pub bombero_id: i64,
    pub monto_total: i64,
    pub metodo_pago: String,
    pub fecha_emision: Option<String>,
    pub meses_pagados: Vec<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BomberoRef {
    pub id: i64,
    pub nombre: String,
    pub email: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ComprobanteTransferenciaRow {
    pub id: i64,
    pub bombero_id: i64,
    pub archivo: String,
    pub fecha_envio: String,
    pub aprobado: Option<bool>,
    pub observacion: String,
    pub revisado_por: Option<i64>,
    pub fecha_revision: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ComprobanteTransferenciaDetalle {
    pub id: i64,
    pub archivo: String,
    pub fecha_envio: String,
    pub meses_pagados_detalle: Vec<MesAnio>,
    pub bombero: BomberoRef,
    pub aprobado: Option<bool>,
    pub observacion: String,
    pub fecha_revision: Option<String>,
    pub revisado_por: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct NewComprobanteTransferencia {
    pub archivo: String,
    pub meses_pagados: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AprobarRequest {
    pub numero_comprobante: Option<i64>,
    pub monto_total: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RechazarRequest {
    #[serde(default)]
    pub observacion: String,
}
