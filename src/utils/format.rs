use chrono::{DateTime, NaiveDate, NaiveDateTime};
use crate::utils::constants::PLACEHOLDER;

/// Valor de texto o el placeholder "—" si falta o está vacío
pub fn or_placeholder(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

/// Fecha del backend como dd.mm.yyyy
///
/// Flask serializa fechas como RFC 2822 ("Tue, 01 Jan 2030 00:00:00 GMT"); también
/// aceptamos ISO ("2030-01-01" o "2030-01-01T00:00:00"). Si no se reconoce, se
/// muestra el valor tal cual.
pub fn format_date(raw: Option<&str>) -> String {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return PLACEHOLDER.to_string();
    };

    let parsed = DateTime::parse_from_rfc2822(value)
        .map(|dt| dt.date_naive())
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"));

    match parsed {
        Ok(date) => date.format("%d.%m.%Y").to_string(),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_variants() {
        assert_eq!(format_date(Some("Tue, 01 Jan 2030 00:00:00 GMT")), "01.01.2030");
        assert_eq!(format_date(Some("2024-03-15")), "15.03.2024");
        assert_eq!(format_date(Some("2024-03-15T10:20:30")), "15.03.2024");
        assert_eq!(format_date(Some("бессрочно")), "бессрочно");
        assert_eq!(format_date(None), PLACEHOLDER);
        assert_eq!(format_date(Some("  ")), PLACEHOLDER);
    }

    #[test]
    fn test_or_placeholder() {
        assert_eq!(or_placeholder(Some("ЦАО")), "ЦАО");
        assert_eq!(or_placeholder(Some("")), PLACEHOLDER);
        assert_eq!(or_placeholder(None), PLACEHOLDER);
    }
}
