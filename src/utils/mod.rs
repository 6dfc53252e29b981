//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y normalización de direcciones.

pub mod errors;
pub mod validation;
pub mod address;
