//! Servicio de orden de visita
//!
//! Mantiene la lista `order` de cada ruta: ids de clientes en orden de
//! visita. Los ids obsoletos se ignoran al leer y nunca se eliminan de
//! forma anticipada; los miembros sin posición se añaden al final.

use std::collections::HashSet;
use tracing::{debug, info};

use crate::models::customer::CustomerRecord;
use crate::models::route::Route;
use crate::repositories::data_repository::DataRepository;
use crate::utils::errors::{not_found_error, AppResult};

/// Posición solicitada para un cliente dentro de una ruta (base 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderPosition {
    Rank(i64),
    Unset,
}

impl OrderPosition {
    /// Solo `None` significa "sin posición"; valores fuera de rango se acotan al insertar
    pub fn from_input(value: Option<i64>) -> Self {
        match value {
            Some(rank) => OrderPosition::Rank(rank),
            None => OrderPosition::Unset,
        }
    }
}

/// Coloca `customer_id` en la posición pedida. Nunca falla ni deja huecos.
pub fn set_position(route: &mut Route, customer_id: &str, position: OrderPosition) {
    route.order.retain(|id| id != customer_id);

    if let OrderPosition::Rank(rank) = position {
        let index = rank.saturating_sub(1).clamp(0, route.order.len() as i64) as usize;
        route.order.insert(index, customer_id.to_string());
    }
}

/// Reemplaza el orden completo (guardado tras arrastrar y soltar)
pub fn replace_order(route: &mut Route, ids: Vec<String>) {
    let mut seen = HashSet::new();
    route.order = ids.into_iter().filter(|id| seen.insert(id.clone())).collect();
}

/// Orden de visita efectivo de los miembros de una ruta
pub fn resolve_visit_order<'a>(route: &Route, members: &[&'a CustomerRecord]) -> Vec<&'a CustomerRecord> {
    let mut placed = HashSet::new();
    let mut visit = Vec::with_capacity(members.len());

    for id in &route.order {
        if let Some(member) = members.iter().find(|m| &m.id == id) {
            if placed.insert(member.id.as_str()) {
                visit.push(*member);
            }
        }
    }

    for member in members {
        if placed.insert(member.id.as_str()) {
            visit.push(*member);
        }
    }

    visit
}

/// Miembros de una ruta en orden de aparición
pub fn route_members<'a>(customers: &'a [CustomerRecord], route_id: &str) -> Vec<&'a CustomerRecord> {
    customers.iter().filter(|c| c.is_member_of(route_id)).collect()
}

/// Guarda la posición de un cliente en una ruta
pub async fn update_position(
    repository: &DataRepository,
    route_id: &str,
    customer_id: &str,
    position: OrderPosition,
) -> AppResult<Route> {
    let mut routes = repository.routes().await?;
    let route = routes
        .iter_mut()
        .find(|r| r.id == route_id)
        .ok_or_else(|| not_found_error("Route", route_id))?;

    set_position(route, customer_id, position);
    let updated = route.clone();
    repository.save_routes(&routes).await?;

    debug!("🔢 Posición de {} en {}: {:?}", customer_id, route_id, position);
    Ok(updated)
}

/// Guarda el orden completo de una ruta
pub async fn save_order(repository: &DataRepository, route_id: &str, ids: Vec<String>) -> AppResult<Route> {
    let mut routes = repository.routes().await?;
    let route = routes
        .iter_mut()
        .find(|r| r.id == route_id)
        .ok_or_else(|| not_found_error("Route", route_id))?;

    replace_order(route, ids);
    let updated = route.clone();
    repository.save_routes(&routes).await?;

    info!("🔢 Orden de {} guardado ({} paradas)", route_id, updated.order.len());
    Ok(updated)
}

/// Miembros de la ruta en orden de visita
pub async fn visit_order(repository: &DataRepository, route_id: &str) -> AppResult<Vec<CustomerRecord>> {
    let routes = repository.routes().await?;
    let route = routes
        .iter()
        .find(|r| r.id == route_id)
        .ok_or_else(|| not_found_error("Route", route_id))?;

    let customers = repository.customers().await?;
    let members = route_members(&customers, route_id);
    Ok(resolve_visit_order(route, &members).into_iter().cloned().collect())
}
