//! Servicio de tipo de vía por tramo
//!
//! Construye la lista de paradas de una ruta (casa, miembros en orden de
//! visita, casa) y expone las elecciones autopista / vía general guardadas
//! por ruta.

use tracing::info;

use crate::models::customer::CustomerRecord;
use crate::models::segment::{SegmentChoices, SegmentKey, SegmentPlanEntry, Stop, HOME_END_ID, HOME_START_ID};
use crate::repositories::data_repository::DataRepository;
use crate::services::route_order_service::{resolve_visit_order, route_members};
use crate::utils::address::truncate_label;
use crate::utils::errors::{not_found_error, AppResult};

/// Etiqueta de las paradas de casa
pub const HOME_LABEL: &str = "自宅";

/// Longitud máxima de las etiquetas de parada
pub const LABEL_MAX_CHARS: usize = 20;

/// Paradas `home_start -> miembros -> home_end`
pub fn build_stops(home_address: &str, visit: &[&CustomerRecord]) -> Vec<Stop> {
    let home = |id: &str| Stop {
        id: id.to_string(),
        address: home_address.to_string(),
        label: HOME_LABEL.to_string(),
    };

    let mut stops = Vec::with_capacity(visit.len() + 2);
    stops.push(home(HOME_START_ID));
    stops.extend(visit.iter().map(|member| Stop {
        id: member.id.clone(),
        address: member.address.clone(),
        label: truncate_label(member.display_label(), LABEL_MAX_CHARS),
    }));
    stops.push(home(HOME_END_ID));
    stops
}

/// Claves de los tramos consecutivos de una lista de paradas
pub fn segment_keys(stops: &[Stop]) -> Vec<SegmentKey> {
    stops
        .windows(2)
        .map(|pair| SegmentKey::new(pair[0].id.clone(), pair[1].id.clone()))
        .collect()
}

/// Tramos con su tipo guardado (o `general`)
pub fn segment_plan(stops: &[Stop], choices: &SegmentChoices) -> Vec<SegmentPlanEntry> {
    stops
        .windows(2)
        .map(|pair| {
            let key = SegmentKey::new(pair[0].id.clone(), pair[1].id.clone());
            SegmentPlanEntry {
                road_type: choices.get(&key),
                key: key.storage_key(),
                from_label: pair[0].label.clone(),
                to_label: pair[1].label.clone(),
            }
        })
        .collect()
}

/// Elecciones guardadas de una ruta
pub async fn get_choices(repository: &DataRepository, route_id: &str) -> AppResult<SegmentChoices> {
    Ok(repository.route_segments(route_id).await?)
}

/// Reemplaza las elecciones de una ruta
pub async fn set_choices(repository: &DataRepository, route_id: &str, choices: SegmentChoices) -> AppResult<()> {
    let count = choices.len();
    repository.save_route_segments(route_id, choices).await?;
    info!("🛣️ {} tramos guardados para {}", count, route_id);
    Ok(())
}

/// Plan de tramos de una ruta para el diálogo de elección de vía
pub async fn route_segment_plan(repository: &DataRepository, route_id: &str) -> AppResult<Vec<SegmentPlanEntry>> {
    let routes = repository.routes().await?;
    let route = routes
        .iter()
        .find(|r| r.id == route_id)
        .ok_or_else(|| not_found_error("Route", route_id))?;

    let customers = repository.customers().await?;
    let members = route_members(&customers, route_id);
    let visit = resolve_visit_order(route, &members);
    let settings = repository.settings().await?;

    let stops = build_stops(&settings.home_address, &visit);
    let choices = repository.route_segments(route_id).await?;
    Ok(segment_plan(&stops, &choices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::customer::CustomerDraft;
    use crate::models::segment::RoadType;

    fn member(id: &str, company: &str) -> CustomerRecord {
        let mut record = CustomerRecord::from_draft(CustomerDraft {
            company: company.to_string(),
            address: format!("{}の住所", id),
            ..Default::default()
        });
        record.id = id.to_string();
        record
    }

    #[test]
    fn test_build_stops_wraps_members_with_home() {
        let c1 = member("c1", "株式会社サンプル");
        let stops = build_stops("千葉市中央区1-1", &[&c1]);
        let ids: Vec<&str> = stops.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec![HOME_START_ID, "c1", HOME_END_ID]);
        assert_eq!(stops[0].address, "千葉市中央区1-1");
        assert_eq!(stops[1].label, "株式会社サンプル");
    }

    #[test]
    fn test_labels_are_truncated() {
        let long = member("c1", "とても長い会社名とても長い会社名とても長い会社名");
        let stops = build_stops("home", &[&long]);
        assert_eq!(stops[1].label.chars().count(), LABEL_MAX_CHARS);
    }

    #[test]
    fn test_segment_plan_uses_saved_types() {
        let (c1, c2) = (member("c1", "A"), member("c2", "B"));
        let stops = build_stops("home", &[&c1, &c2]);
        let mut choices = SegmentChoices::new();
        choices.set(&SegmentKey::new("c1", "c2"), RoadType::Highway);

        let plan = segment_plan(&stops, &choices);
        let keys: Vec<&str> = plan.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["home_start_c1", "c1_c2", "c2_home_end"]);
        assert_eq!(plan[0].road_type, RoadType::General);
        assert_eq!(plan[1].road_type, RoadType::Highway);
        assert_eq!(plan[1].from_label, "A");
        assert_eq!(segment_keys(&stops).len(), 3);
    }
}
