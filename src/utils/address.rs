//! Normalización de direcciones
//!
//! Dos direcciones son el mismo lugar si y solo si sus formas normalizadas
//! son idénticas byte a byte.

/// Normaliza una dirección libre para comparación por igualdad:
/// quita todo espacio (incluido el espacio de ancho completo), convierte
/// dígitos de ancho completo a ASCII y unifica `ー`, `−` y `‐` en `-`.
pub fn normalize_address(address: &str) -> String {
    address
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
            'ー' | '−' | '‐' => '-',
            other => other,
        })
        .collect()
}

/// Trunca una etiqueta a sus primeros `max_chars` caracteres
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    label.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_full_width() {
        assert_eq!(normalize_address("東京都　港区１−１"), "東京都港区1-1");
        assert_eq!(normalize_address("大阪府 北区 ２ー３‐４"), "大阪府北区2-3-4");
        assert_eq!(normalize_address(" a\tb\nc "), "abc");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_address(""), "");
        assert_eq!(normalize_address("　 "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "東京都　港区１−１",
            "千葉市中央区 ５ー１０ーー",
            "1-2-3 Some Street",
            "",
            "０１２３４５６７８９",
        ];
        for sample in samples {
            let once = normalize_address(sample);
            assert_eq!(normalize_address(&once), once);
        }
    }

    #[test]
    fn test_truncate_label_counts_chars() {
        assert_eq!(truncate_label("東京都港区芝公園四丁目二番八号東京タワー下", 20).chars().count(), 20);
        assert_eq!(truncate_label("short", 20), "short");
    }
}
