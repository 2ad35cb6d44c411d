//! Read-only reporting engine: reconciles attendance records, licencias
//! and the member roster into per-event, per-member, per-year and global
//! summaries, plus the monthly-dues summary with the moroso rule.
//!
//! Everything here computes from a per-request snapshot; nothing mutates.

pub mod agregador;
pub mod clasificador;
pub mod cuotas;
pub mod snapshot;

pub use agregador::*;
pub use clasificador::{Estado, clasificar};
pub use cuotas::*;
pub use snapshot::Categoria;
