// ============================================================================
// COMPANY - Registro de empresa con licencia (tal como lo devuelve el backend)
// ============================================================================

use serde::{Deserialize, Serialize};

/// Estado temporal de la licencia (color del marcador)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    #[default]
    Active,
    ExpiringSoon,
    Expired,
}

impl StatusColor {
    pub const ALL: [StatusColor; 3] = [
        StatusColor::Active,
        StatusColor::ExpiringSoon,
        StatusColor::Expired,
    ];

    /// Código usado en query params y en el <select> de filtros
    pub fn as_code(&self) -> &'static str {
        match self {
            StatusColor::Active => "active",
            StatusColor::ExpiringSoon => "expiring_soon",
            StatusColor::Expired => "expired",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "active" => Some(StatusColor::Active),
            "expiring_soon" => Some(StatusColor::ExpiringSoon),
            "expired" => Some(StatusColor::Expired),
            _ => None,
        }
    }

    /// Clave i18n de la etiqueta visible
    pub fn label_key(&self) -> &'static str {
        match self {
            StatusColor::Active => "status_active",
            StatusColor::ExpiringSoon => "status_expiring_soon",
            StatusColor::Expired => "status_expired",
        }
    }
}

/// Registro de empresa. Inmutable una vez recibido; el dataset se reemplaza entero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: i64,
    #[serde(default)]
    pub inn: Option<String>,
    #[serde(default)]
    pub kpp: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub object_name: Option<String>,
    #[serde(default)]
    pub subject_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub adm_area: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub license_type_code: Option<String>,
    #[serde(default)]
    pub license_type_name: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub license_begin: Option<String>,
    #[serde(default)]
    pub license_expire: Option<String>,
    #[serde(default)]
    pub license_status: Option<String>,
    #[serde(default)]
    pub license_status_color: Option<StatusColor>,
}

impl CompanyRecord {
    /// (lat, lng) solo si ambas coordenadas existen
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }

    /// Sin color informado el marcador se pinta como activo
    pub fn status_color(&self) -> StatusColor {
        self.license_status_color.unwrap_or_default()
    }
}

/// Tipo de licencia para el selector de filtros
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LicenseType {
    pub code: String,
    #[serde(default)]
    pub name: String,
}

impl LicenseType {
    /// Texto de la opción: "code - name"
    pub fn option_label(&self) -> String {
        if self.name.is_empty() {
            self.code.clone()
        } else {
            format!("{} - {}", self.code, self.name)
        }
    }
}

/// Respuesta de GET /api/filters/options
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(default)]
    pub adm_areas: Vec<String>,
    #[serde(default)]
    pub districts: Vec<String>,
    #[serde(default)]
    pub license_types: Vec<LicenseType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_with_missing_fields_deserializes() {
        let json = r#"{"id": 7, "latitude": null, "longitude": 37.6, "license_status_color": "expiring_soon"}"#;
        let record: CompanyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.coordinates(), None);
        assert_eq!(record.status_color(), StatusColor::ExpiringSoon);
        assert!(record.object_name.is_none());
    }

    #[test]
    fn test_status_color_defaults_to_active() {
        let record = CompanyRecord { id: 1, ..Default::default() };
        assert_eq!(record.status_color(), StatusColor::Active);
        assert_eq!(StatusColor::from_code("expired"), Some(StatusColor::Expired));
        assert_eq!(StatusColor::from_code(""), None);
    }

    #[test]
    fn test_license_type_option_label() {
        let lt = LicenseType { code: "РПО".into(), name: "Розничная продажа".into() };
        assert_eq!(lt.option_label(), "РПО - Розничная продажа");
    }
}
