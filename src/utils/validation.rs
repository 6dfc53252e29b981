//! Utilidades de validación
//!
//! Este módulo contiene las expresiones regulares y funciones helper
//! usadas por los DTOs validados.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Color de ruta en formato `#rrggbb`
    pub static ref HEX_COLOR_RE: Regex = Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap();

    /// Identificador de espacio de trabajo mensual (`2025-03`) o libre sin espacios
    pub static ref WORKSPACE_ID_RE: Regex = Regex::new(r"^[0-9A-Za-z][0-9A-Za-z_-]{0,31}$").unwrap();
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}
