//! Planificador de rutas de mantenimiento
//!
//! Importa listas de clientes, las agrupa por dirección, las asigna a rutas
//! con orden de visita explícito y calcula la distancia de cada ruta
//! separando autopista y vía general. Los datos se guardan en un almacén
//! clave-valor particionado en espacios de trabajo mensuales.

pub mod cache;
pub mod clients;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
