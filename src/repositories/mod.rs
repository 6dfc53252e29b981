//! Repositorios
//!
//! Acceso a las colecciones JSON guardadas en el almacén clave-valor.

pub mod data_repository;

pub use data_repository::{Backup, DataRepository};
