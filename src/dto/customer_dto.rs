use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::customer::{CustomerDraft, CustomerRecord, CustomerStatus};
use crate::utils::validation::validate_not_empty;

fn default_unit_count() -> u32 {
    1
}

// Request de importación: filas de la hoja ya leídas como texto
#[derive(Debug, Deserialize)]
pub struct ImportRowsRequest {
    pub rows: Vec<Vec<String>>,
}

// Resultado de una importación
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub source_count: usize,
    pub grouped_count: usize,
    pub customers: Vec<CustomerRecord>,
}

// Request para añadir un cliente a mano
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    #[validate(custom = "validate_not_empty")]
    pub company: String,

    #[validate(custom = "validate_not_empty")]
    pub address: String,

    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub management_no: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub equipment_type: String,
    #[serde(default)]
    pub filter_type: String,

    #[serde(default = "default_unit_count")]
    #[validate(range(min = 1))]
    pub unit_count: u32,
}

impl From<CreateCustomerRequest> for CustomerDraft {
    fn from(request: CreateCustomerRequest) -> Self {
        Self {
            company: request.company.trim().to_string(),
            address: request.address.trim().to_string(),
            phone: request.phone.trim().to_string(),
            contact: request.contact.trim().to_string(),
            note: request.note.trim().to_string(),
            management_no: request.management_no,
            branch: request.branch,
            equipment_type: request.equipment_type,
            filter_type: request.filter_type,
            unit_count: request.unit_count,
        }
    }
}

// Actualización parcial; `routeId` o `appoDate` vacíos borran el valor
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    pub company: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub contact: Option<String>,
    pub note: Option<String>,
    pub management_no: Option<String>,
    pub branch: Option<String>,
    pub equipment_type: Option<String>,
    pub filter_type: Option<String>,

    #[validate(range(min = 1))]
    pub unit_count: Option<u32>,

    pub status: Option<CustomerStatus>,
    pub route_id: Option<String>,
    pub appo_date: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

// Totales por estado
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub appointed: usize,
    pub completed: usize,
}

impl StatusCounts {
    pub fn count<'a>(customers: impl IntoIterator<Item = &'a CustomerRecord>) -> Self {
        customers.into_iter().fold(Self::default(), |mut counts, customer| {
            counts.total += 1;
            match customer.status {
                CustomerStatus::Pending => counts.pending += 1,
                CustomerStatus::Appointed => counts.appointed += 1,
                CustomerStatus::Completed => counts.completed += 1,
            }
            counts
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub route_id: String,
    pub name: String,
    pub color: String,
    pub counts: StatusCounts,
}

// Resumen global y por ruta
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub overall: StatusCounts,
    pub unassigned: usize,
    pub routes: Vec<RouteSummary>,
}
