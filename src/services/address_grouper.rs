//! Agrupación de registros por dirección
//!
//! Varios equipos en un mismo sitio se funden en un único punto con su
//! número de unidades y las notas combinadas.

use std::collections::HashMap;
use tracing::info;

use crate::models::customer::CustomerDraft;
use crate::utils::address::normalize_address;

/// Agrupa borradores con la misma dirección normalizada.
///
/// El resultado conserva el orden de primera aparición y cumple
/// `Σ unit_count == drafts.len()`.
pub fn group_by_address(drafts: Vec<CustomerDraft>) -> Vec<CustomerDraft> {
    let source_count = drafts.len();
    let mut index_by_address: HashMap<String, usize> = HashMap::new();
    let mut grouped: Vec<CustomerDraft> = Vec::new();

    for draft in drafts {
        let key = normalize_address(&draft.address);

        match index_by_address.get(&key) {
            Some(&index) => merge_into(&mut grouped[index], draft),
            None => {
                index_by_address.insert(key, grouped.len());
                grouped.push(CustomerDraft {
                    unit_count: 1,
                    ..draft
                });
            }
        }
    }

    info!("🏢 {} registros agrupados en {} direcciones", source_count, grouped.len());
    grouped
}

fn merge_into(existing: &mut CustomerDraft, incoming: CustomerDraft) {
    existing.unit_count += 1;

    // La comparación de empresa es exacta: variantes de mayúsculas o espacios no se funden
    let line = if existing.company != incoming.company {
        format!("[{}] {}", incoming.company, incoming.note)
    } else if !incoming.note.is_empty() {
        incoming.note
    } else {
        return;
    };

    if !existing.note.is_empty() {
        existing.note.push('\n');
    }
    existing.note.push_str(&line);
}
