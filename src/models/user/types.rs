use serde::{Deserialize, Serialize};

/// Minimal user shape embedded in attendance reports.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UsuarioBasico {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// User shape embedded in the dues report and /me.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UsuarioRef {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PerfilRow {
    pub id: i64,
    pub user_id: i64,
    pub rut: String,
    pub fecha_ingreso: Option<String>,
    pub telefono: String,
    pub contacto: String,
    pub imagen: String,
}

/// Profile with its user joined in, as the API exposes it.
#[derive(Debug, Clone, Serialize)]
pub struct PerfilDetalle {
    pub id: i64,
    pub user: UsuarioRef,
    pub rut: String,
    pub fecha_ingreso: Option<String>,
    pub telefono: String,
    pub contacto: String,
    pub imagen: String,
}

#[derive(Debug, Deserialize)]
pub struct NewPerfil {
    pub user_id: i64,
    #[serde(default)]
    pub rut: String,
    pub fecha_ingreso: Option<String>,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub contacto: String,
    pub imagen: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PerfilUpdate {
    pub rut: Option<String>,
    pub fecha_ingreso: Option<String>,
    pub telefono: Option<String>,
    pub contacto: Option<String>,
    pub imagen: Option<String>,
}
