//! Services module
//!
//! Este módulo contiene la lógica de negocio y servicios de la aplicación.
//! Las funciones puras (ingesta, agrupación, orden de visita, tramos) no
//! tocan el almacenamiento; las funciones async cargan y guardan a través
//! del repositorio.

pub mod address_grouper;
pub mod customer_service;
pub mod record_ingestor;
pub mod route_distance_service;
pub mod route_order_service;
pub mod segment_service;

pub use route_distance_service::RouteDistanceService;
