//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que se guardan como
//! colecciones JSON en el almacenamiento local.

pub mod customer;
pub mod distance;
pub mod route;
pub mod segment;
pub mod workspace;
