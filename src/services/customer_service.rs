//! Servicio de clientes
//!
//! Importación (detección de columnas + agrupación por dirección),
//! altas manuales, actualizaciones parciales, bajas y resumen por estado.

use tracing::{info, warn};

use crate::dto::customer_dto::{
    ImportReport, RouteSummary, StatusCounts, SummaryResponse, UpdateCustomerRequest,
};
use crate::models::customer::{CustomerDraft, CustomerRecord};
use crate::models::route::find_route;
use crate::repositories::data_repository::DataRepository;
use crate::services::address_grouper::group_by_address;
use crate::services::record_ingestor::ingest_rows;
use crate::utils::errors::{bad_request_error, not_found_error, AppResult};

/// Importa filas de una hoja y añade los clientes agrupados al espacio actual
pub async fn import_rows(repository: &DataRepository, rows: &[Vec<String>]) -> AppResult<ImportReport> {
    let drafts = ingest_rows(rows)?;
    let source_count = drafts.len();
    let grouped = group_by_address(drafts);
    let grouped_count = grouped.len();

    let imported: Vec<CustomerRecord> = grouped.into_iter().map(CustomerRecord::from_draft).collect();

    let mut customers = repository.customers().await?;
    customers.extend(imported.iter().cloned());
    repository.save_customers(&customers).await?;

    info!(
        "📥 Importados {} clientes (filas de origen: {}, tras agrupar por dirección: {})",
        grouped_count, source_count, grouped_count
    );

    Ok(ImportReport {
        source_count,
        grouped_count,
        customers: imported,
    })
}

/// Añade un cliente
pub async fn add_customer(repository: &DataRepository, draft: CustomerDraft) -> AppResult<CustomerRecord> {
    let record = CustomerRecord::from_draft(draft);

    let mut customers = repository.customers().await?;
    customers.push(record.clone());
    repository.save_customers(&customers).await?;

    info!("➕ Cliente añadido: {} ({})", record.display_label(), record.id);
    Ok(record)
}

fn apply_text(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value.trim().to_string();
    }
}

/// `Some("")` borra, `Some(v)` asigna, `None` no cambia
fn apply_nullable(target: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        let value = value.trim();
        *target = if value.is_empty() { None } else { Some(value.to_string()) };
    }
}

/// Actualización parcial de un cliente
pub async fn update_customer(
    repository: &DataRepository,
    id: &str,
    update: UpdateCustomerRequest,
) -> AppResult<CustomerRecord> {
    if let Some(route_id) = update.route_id.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
        let routes = repository.routes().await?;
        if find_route(&routes, route_id).is_none() {
            return Err(bad_request_error(&format!("Unknown route '{}'", route_id)));
        }
    }

    let mut customers = repository.customers().await?;
    let customer = customers
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| not_found_error("Customer", id))?;

    apply_text(&mut customer.company, update.company);
    apply_text(&mut customer.address, update.address);
    apply_text(&mut customer.phone, update.phone);
    apply_text(&mut customer.contact, update.contact);
    apply_text(&mut customer.note, update.note);
    apply_text(&mut customer.management_no, update.management_no);
    apply_text(&mut customer.branch, update.branch);
    apply_text(&mut customer.equipment_type, update.equipment_type);
    apply_text(&mut customer.filter_type, update.filter_type);
    apply_nullable(&mut customer.route_id, update.route_id);
    apply_nullable(&mut customer.appo_date, update.appo_date);

    if let Some(unit_count) = update.unit_count {
        customer.unit_count = unit_count.max(1);
    }
    if let Some(status) = update.status {
        customer.status = status;
    }
    if update.lat.is_some() && update.lng.is_some() {
        customer.lat = update.lat;
        customer.lng = update.lng;
    }

    if customer.company.is_empty() && customer.address.is_empty() {
        return Err(bad_request_error("Company and address cannot both be empty"));
    }

    let updated = customer.clone();
    repository.save_customers(&customers).await?;
    Ok(updated)
}

/// Elimina un cliente. Su id puede quedar en el orden de alguna ruta.
pub async fn delete_customer(repository: &DataRepository, id: &str) -> AppResult<()> {
    let mut customers = repository.customers().await?;
    let before = customers.len();
    customers.retain(|c| c.id != id);

    if customers.len() == before {
        warn!("🗑️ Cliente {} no encontrado", id);
        return Err(not_found_error("Customer", id));
    }

    repository.save_customers(&customers).await?;
    info!("🗑️ Cliente eliminado: {}", id);
    Ok(())
}

/// Totales globales y de cada ruta con miembros
pub async fn summary(repository: &DataRepository) -> AppResult<SummaryResponse> {
    let customers = repository.customers().await?;
    let routes = repository.routes().await?;

    let route_summaries = routes
        .iter()
        .filter_map(|route| {
            let counts = StatusCounts::count(customers.iter().filter(|c| c.is_member_of(&route.id)));
            (counts.total > 0).then(|| RouteSummary {
                route_id: route.id.clone(),
                name: route.name.clone(),
                color: route.color.clone(),
                counts,
            })
        })
        .collect();

    Ok(SummaryResponse {
        overall: StatusCounts::count(&customers),
        unassigned: customers.iter().filter(|c| c.route_id.is_none()).count(),
        routes: route_summaries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::models::customer::CustomerStatus;
    use crate::utils::errors::{AppError, ImportError};
    use std::sync::Arc;

    async fn repository() -> DataRepository {
        let repo = DataRepository::new(Arc::new(MemoryStore::new()));
        repo.ensure_current_workspace().await.unwrap();
        repo
    }

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter().map(|r| r.iter().map(|c| c.to_string()).collect()).collect()
    }

    fn draft(company: &str, address: &str) -> CustomerDraft {
        CustomerDraft {
            company: company.into(),
            address: address.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_import_groups_and_appends() {
        let repo = repository().await;
        add_customer(&repo, draft("既存", "大阪府")).await.unwrap();

        let report = import_rows(
            &repo,
            &rows(&[
                &["会社名", "住所", "備考"],
                &["A社", "東京都港区１−１", "1F"],
                &["B社", "東京都 港区1-1", "2F"],
                &["C社", "千葉県", ""],
            ]),
        )
        .await
        .unwrap();

        assert_eq!(report.source_count, 3);
        assert_eq!(report.grouped_count, 2);
        assert_eq!(report.customers[0].unit_count, 2);
        assert_eq!(repo.customers().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_import_error_leaves_storage_untouched() {
        let repo = repository().await;
        let err = import_rows(&repo, &rows(&[&["会社名", "住所"]])).await.unwrap_err();
        assert!(matches!(err, AppError::Import(ImportError::NoData)));
        assert!(repo.customers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_route_and_clear() {
        let repo = repository().await;
        let customer = add_customer(&repo, draft("A社", "東京都")).await.unwrap();

        let updated = update_customer(
            &repo,
            &customer.id,
            UpdateCustomerRequest {
                route_id: Some("route_3".into()),
                appo_date: Some("2025-03-14T10:00".into()),
                status: Some(CustomerStatus::Appointed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.route_id.as_deref(), Some("route_3"));
        assert_eq!(updated.status, CustomerStatus::Appointed);

        let cleared = update_customer(
            &repo,
            &customer.id,
            UpdateCustomerRequest {
                route_id: Some(String::new()),
                appo_date: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(cleared.route_id, None);
        assert_eq!(cleared.appo_date, None);
        assert_eq!(cleared.status, CustomerStatus::Appointed);
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_route() {
        let repo = repository().await;
        let customer = add_customer(&repo, draft("A社", "東京都")).await.unwrap();
        let err = update_customer(
            &repo,
            &customer.id,
            UpdateCustomerRequest {
                route_id: Some("route_42".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_customer() {
        let repo = repository().await;
        let customer = add_customer(&repo, draft("A社", "東京都")).await.unwrap();
        delete_customer(&repo, &customer.id).await.unwrap();
        assert!(matches!(
            delete_customer(&repo, &customer.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_summary_counts() {
        let repo = repository().await;
        let a = add_customer(&repo, draft("A社", "1")).await.unwrap();
        add_customer(&repo, draft("B社", "2")).await.unwrap();
        update_customer(
            &repo,
            &a.id,
            UpdateCustomerRequest {
                route_id: Some("route_2".into()),
                status: Some(CustomerStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let summary = summary(&repo).await.unwrap();
        assert_eq!(summary.overall.total, 2);
        assert_eq!(summary.overall.pending, 1);
        assert_eq!(summary.overall.completed, 1);
        assert_eq!(summary.unassigned, 1);
        assert_eq!(summary.routes.len(), 1);
        assert_eq!(summary.routes[0].route_id, "route_2");
        assert_eq!(summary.routes[0].counts.completed, 1);
    }
}
