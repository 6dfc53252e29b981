//! Modelo de Customer
//!
//! Un cliente es un sitio físico a visitar. Se serializa en camelCase para
//! mantener compatibilidad con las colecciones JSON ya guardadas.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Estado de visita del cliente. Las transiciones son libres.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    #[default]
    Pending,
    Appointed,
    Completed,
}

/// Registro importado antes de agrupar y asignar id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    pub company: String,
    pub address: String,
    pub phone: String,
    pub contact: String,
    pub note: String,
    pub management_no: String,
    pub branch: String,
    pub equipment_type: String,
    pub filter_type: String,
    pub unit_count: u32,
}

impl Default for CustomerDraft {
    fn default() -> Self {
        Self {
            company: String::new(),
            address: String::new(),
            phone: String::new(),
            contact: String::new(),
            note: String::new(),
            management_no: String::new(),
            branch: String::new(),
            equipment_type: String::new(),
            filter_type: String::new(),
            unit_count: 1,
        }
    }
}

/// Cliente persistido en la colección del espacio de trabajo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub id: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
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
    pub unit_count: u32,
    #[serde(default)]
    pub status: CustomerStatus,
    #[serde(default)]
    pub route_id: Option<String>,
    #[serde(default)]
    pub appo_date: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

fn default_unit_count() -> u32 {
    1
}

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Genera un id opaco `c_<millis>_<5 caracteres base36>`
pub fn generate_customer_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..5)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("c_{}_{}", Utc::now().timestamp_millis(), suffix)
}

impl CustomerRecord {
    /// Crea un cliente nuevo a partir de un borrador: id nuevo, estado
    /// pendiente, sin ruta ni cita.
    pub fn from_draft(draft: CustomerDraft) -> Self {
        Self {
            id: generate_customer_id(),
            company: draft.company,
            address: draft.address,
            phone: draft.phone,
            contact: draft.contact,
            note: draft.note,
            management_no: draft.management_no,
            branch: draft.branch,
            equipment_type: draft.equipment_type,
            filter_type: draft.filter_type,
            unit_count: draft.unit_count.max(1),
            status: CustomerStatus::Pending,
            route_id: None,
            appo_date: None,
            created_at: Utc::now(),
            lat: None,
            lng: None,
        }
    }

    /// Nombre a mostrar en listas y diálogos
    pub fn display_label(&self) -> &str {
        if self.company.is_empty() {
            &self.address
        } else {
            &self.company
        }
    }

    pub fn is_member_of(&self, route_id: &str) -> bool {
        self.route_id.as_deref() == Some(route_id)
    }
}
