//! Importación de tablas de clientes
//!
//! Convierte filas tabulares (cabecera + datos, columnas en cualquier orden)
//! en borradores de cliente. Las columnas se detectan por palabras clave de
//! la cabecera, con un orden posicional de respaldo.

use tracing::{debug, info};

use crate::models::customer::CustomerDraft;
use crate::utils::errors::ImportError;

/// Filas examinadas al buscar la cabecera
const HEADER_SCAN_ROWS: usize = 10;

/// Tokens que identifican una fila de cabecera
const HEADER_TOKENS: &[&str] = &["会社", "設置先", "住所", "company", "address"];

/// Calificativo que excluye una columna del tipo de equipo ("機種交換" etc.)
const REPLACEMENT_QUALIFIERS: &[&str] = &["交換", "replacement"];

/// Papel de una columna de la tabla
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Company,
    Address,
    Phone,
    Contact,
    Note,
    ManagementNo,
    Prefecture,
    Branch,
    Filter,
    EquipmentType,
}

impl ColumnRole {
    /// Orden de prioridad: una celda toma el primer papel que coincide
    const PRIORITY: [ColumnRole; 10] = [
        ColumnRole::Company,
        ColumnRole::Address,
        ColumnRole::Phone,
        ColumnRole::Contact,
        ColumnRole::Note,
        ColumnRole::ManagementNo,
        ColumnRole::Prefecture,
        ColumnRole::Branch,
        ColumnRole::Filter,
        ColumnRole::EquipmentType,
    ];

    fn keywords(self) -> &'static [&'static str] {
        match self {
            ColumnRole::Company => &["会社", "設置先", "名称", "company"],
            ColumnRole::Address => &["住所", "所在地", "address"],
            ColumnRole::Phone => &["電話", "tel", "phone"],
            ColumnRole::Contact => &["担当", "受付", "contact"],
            ColumnRole::Note => &["備考", "情報", "メモ", "note", "memo"],
            ColumnRole::ManagementNo => &["管理", "番号", "no"],
            ColumnRole::Prefecture => &["都道府県", "prefecture"],
            ColumnRole::Branch => &["支店", "営業所", "拠点", "branch"],
            ColumnRole::Filter => &["フィルター", "フィルタ", "filter"],
            ColumnRole::EquipmentType => &["機種", "型式", "機器", "model", "equipment"],
        }
    }

    fn matches(self, header: &str) -> bool {
        if self == ColumnRole::EquipmentType
            && REPLACEMENT_QUALIFIERS.iter().any(|q| header.contains(q))
        {
            return false;
        }
        self.keywords().iter().any(|keyword| header.contains(keyword))
    }
}

/// Índices de columna detectados para cada papel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub company: Option<usize>,
    pub address: Option<usize>,
    pub phone: Option<usize>,
    pub contact: Option<usize>,
    pub note: Option<usize>,
    pub management_no: Option<usize>,
    pub prefecture: Option<usize>,
    pub branch: Option<usize>,
    pub filter: Option<usize>,
    pub equipment_type: Option<usize>,
}

impl ColumnMap {
    fn slot(&mut self, role: ColumnRole) -> &mut Option<usize> {
        match role {
            ColumnRole::Company => &mut self.company,
            ColumnRole::Address => &mut self.address,
            ColumnRole::Phone => &mut self.phone,
            ColumnRole::Contact => &mut self.contact,
            ColumnRole::Note => &mut self.note,
            ColumnRole::ManagementNo => &mut self.management_no,
            ColumnRole::Prefecture => &mut self.prefecture,
            ColumnRole::Branch => &mut self.branch,
            ColumnRole::Filter => &mut self.filter,
            ColumnRole::EquipmentType => &mut self.equipment_type,
        }
    }

    /// Verdadero si hay columna de empresa o de dirección
    pub fn has_identity(&self) -> bool {
        self.company.is_some() || self.address.is_some()
    }
}

/// Índice de la fila de cabecera: la primera de las diez primeras filas
/// cuyo texto contiene un token de cabecera, o la fila 0.
pub fn detect_header_row<S: AsRef<str>>(rows: &[Vec<S>]) -> usize {
    rows.iter()
        .take(HEADER_SCAN_ROWS)
        .position(|row| {
            let text = row
                .iter()
                .map(|cell| cell.as_ref())
                .collect::<String>()
                .to_lowercase();
            HEADER_TOKENS.iter().any(|token| text.contains(token))
        })
        .unwrap_or(0)
}

/// Detecta el papel de cada columna de la cabecera
pub fn detect_columns<S: AsRef<str>>(header: &[S]) -> ColumnMap {
    let mut map = ColumnMap::default();

    for (index, cell) in header.iter().enumerate() {
        let text = cell.as_ref().trim().to_lowercase();
        if text.is_empty() {
            continue;
        }
        if let Some(role) = ColumnRole::PRIORITY.iter().copied().find(|role| role.matches(&text)) {
            let slot = map.slot(role);
            if slot.is_none() {
                *slot = Some(index);
            }
        }
    }

    // Sin columnas reconocibles se asume: No, empresa, dirección, teléfono, contacto, nota
    if !map.has_identity() && header.len() >= 3 {
        debug!("📐 Cabecera sin palabras clave, usando posiciones por defecto");
        map.management_no = Some(0);
        map.company = Some(1);
        map.address = Some(2);
        if header.len() >= 4 {
            map.phone = Some(3);
        }
        if header.len() >= 5 {
            map.contact = Some(4);
        }
        if header.len() >= 6 {
            map.note = Some(5);
        }
    }

    map
}

fn cell<S: AsRef<str>>(row: &[S], column: Option<usize>) -> String {
    column
        .and_then(|index| row.get(index))
        .map(|value| value.as_ref().trim().to_string())
        .unwrap_or_default()
}

fn populated_cells<S: AsRef<str>>(row: &[S]) -> usize {
    row.iter().filter(|value| !value.as_ref().trim().is_empty()).count()
}

/// Extrae un borrador de una fila de datos, o `None` si la fila no tiene
/// ni empresa ni dirección.
fn extract_draft<S: AsRef<str>>(row: &[S], columns: &ColumnMap) -> Option<CustomerDraft> {
    let company = cell(row, columns.company);
    let mut address = cell(row, columns.address);

    if columns.prefecture.is_some() {
        let prefecture = cell(row, columns.prefecture);
        if !prefecture.is_empty() && !address.starts_with(&prefecture) {
            address = format!("{}{}", prefecture, address);
        }
    }

    if company.is_empty() && address.is_empty() {
        return None;
    }

    Some(CustomerDraft {
        company,
        address,
        phone: cell(row, columns.phone),
        contact: cell(row, columns.contact),
        note: cell(row, columns.note),
        management_no: cell(row, columns.management_no),
        branch: cell(row, columns.branch),
        equipment_type: cell(row, columns.equipment_type),
        filter_type: cell(row, columns.filter),
        unit_count: 1,
    })
}

/// Convierte filas tabulares en borradores de cliente (sin agrupar, sin id)
pub fn ingest_rows<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Vec<CustomerDraft>, ImportError> {
    if rows.len() < 2 {
        return Err(ImportError::NoData);
    }

    let header_index = detect_header_row(rows);
    let columns = detect_columns(&rows[header_index]);
    debug!("📐 Cabecera en fila {}: {:?}", header_index, columns);

    if !columns.has_identity() {
        return Err(ImportError::ColumnDetection);
    }

    let drafts: Vec<CustomerDraft> = rows[header_index + 1..]
        .iter()
        .filter(|row| populated_cells(row) > 1)
        .filter_map(|row| extract_draft(row, &columns))
        .collect();

    if drafts.is_empty() {
        return Err(ImportError::NoData);
    }

    info!("📄 {} filas de datos importadas", drafts.len());
    Ok(drafts)
}
