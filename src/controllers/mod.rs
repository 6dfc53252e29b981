//! Controladores
//!
//! Validan los requests, llaman a los servicios y envuelven el resultado
//! en `ApiResponse`.

pub mod customer_controller;
pub mod route_controller;
pub mod workspace_controller;
