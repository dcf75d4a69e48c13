// ============================================================================
// POPUP VIEWMODEL - Contenido del popup de un marcador
// ============================================================================

use crate::models::{CompanyRecord, StatusColor};
use crate::utils::format::{format_date, or_placeholder};

/// Fila etiqueta/valor (la etiqueta es una clave i18n)
#[derive(Clone, Debug, PartialEq)]
pub struct PopupRow {
    pub label_key: &'static str,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PopupContent {
    pub company_id: i64,
    pub title: String,
    pub status: StatusColor,
    pub status_text: String,
    pub rows: Vec<PopupRow>,
    /// El botón "Similares" solo tiene sentido con coordenadas y tipo de licencia
    pub can_search_similar: bool,
}

impl PopupContent {
    pub fn from_record(record: &CompanyRecord) -> Self {
        let mut rows = Vec::with_capacity(10);
        let mut row = |label_key: &'static str, value: String| rows.push(PopupRow { label_key, value });

        // INN y KPP solo si vienen informados
        if let Some(inn) = record.inn.as_deref().filter(|v| !v.trim().is_empty()) {
            row("inn", inn.trim().to_string());
        }
        if let Some(kpp) = record.kpp.as_deref().filter(|v| !v.trim().is_empty()) {
            row("kpp", kpp.trim().to_string());
        }
        row("address", or_placeholder(record.address.as_deref()));
        row("adm_area", or_placeholder(record.adm_area.as_deref()));
        row("district", or_placeholder(record.district.as_deref()));
        row("license_type", license_type_text(record));
        row("license_number", or_placeholder(record.license_number.as_deref()));
        row("license_begin", format_date(record.license_begin.as_deref()));
        row("license_expire", format_date(record.license_expire.as_deref()));

        let title = record
            .object_name
            .as_deref()
            .or(record.subject_name.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| or_placeholder(None));

        Self {
            company_id: record.id,
            title,
            status: record.status_color(),
            status_text: or_placeholder(record.license_status.as_deref()),
            rows,
            can_search_similar: record.coordinates().is_some()
                && record.license_type_code.as_deref().is_some_and(|c| !c.trim().is_empty()),
        }
    }
}

/// "code - name", o lo que haya de los dos
fn license_type_text(record: &CompanyRecord) -> String {
    let code = record.license_type_code.as_deref().map(str::trim).filter(|v| !v.is_empty());
    let name = record.license_type_name.as_deref().map(str::trim).filter(|v| !v.is_empty());
    match (code, name) {
        (Some(code), Some(name)) => format!("{} - {}", code, name),
        (Some(value), None) | (None, Some(value)) => value.to_string(),
        (None, None) => or_placeholder(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::PLACEHOLDER;

    fn value<'a>(content: &'a PopupContent, key: &str) -> Option<&'a str> {
        content.rows.iter().find(|r| r.label_key == key).map(|r| r.value.as_str())
    }

    #[test]
    fn test_absent_fields_use_placeholder() {
        let content = PopupContent::from_record(&CompanyRecord { id: 3, ..Default::default() });
        assert_eq!(content.title, PLACEHOLDER);
        assert_eq!(value(&content, "address"), Some(PLACEHOLDER));
        assert_eq!(value(&content, "license_expire"), Some(PLACEHOLDER));
        assert_eq!(value(&content, "inn"), None);
        assert!(!content.can_search_similar);
    }

    #[test]
    fn test_full_record() {
        let record = CompanyRecord {
            id: 9,
            inn: Some("7701234567".into()),
            latitude: Some(55.75),
            longitude: Some(37.62),
            object_name: Some("ООО Ромашка".into()),
            license_type_code: Some("R".into()),
            license_type_name: Some("Розничная продажа".into()),
            license_expire: Some("Tue, 01 Jan 2030 00:00:00 GMT".into()),
            license_status_color: Some(StatusColor::ExpiringSoon),
            ..Default::default()
        };
        let content = PopupContent::from_record(&record);
        assert_eq!(content.title, "ООО Ромашка");
        assert_eq!(value(&content, "inn"), Some("7701234567"));
        assert_eq!(value(&content, "license_type"), Some("R - Розничная продажа"));
        assert_eq!(value(&content, "license_expire"), Some("01.01.2030"));
        assert_eq!(content.status, StatusColor::ExpiringSoon);
        assert!(content.can_search_similar);
    }
}
