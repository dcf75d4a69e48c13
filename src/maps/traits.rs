use serde::Serialize;
use thiserror::Error;
use crate::models::{CompanyRecord, StatusColor};

/// Capa de marcadores del mapa: la colección mutable de puntos visibles
pub trait MarkerLayer {
    /// Quitar todos los marcadores
    fn clear_markers(&mut self);

    /// Agregar un marcador
    fn add_marker(&mut self, marker: MarkerSpec) -> Result<(), MapError>;
}

/// Variante visual: carga normal o modo "similares"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerVariant {
    Normal,
    Similar,
}

/// Estilo de un circleMarker (nombres de campo de Leaflet)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub radius: f64,
    pub color: String,
    pub fill_color: String,
    pub fill_opacity: f64,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

/// Todo lo necesario para dibujar un registro como marcador
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub record: CompanyRecord,
    pub latitude: f64,
    pub longitude: f64,
    pub style: MarkerStyle,
    pub hover_style: MarkerStyle,
}

/// Colores base por estado
pub fn base_color(status: StatusColor) -> &'static str {
    match status {
        StatusColor::Active => "#10b981",
        StatusColor::ExpiringSoon => "#f59e0b",
        StatusColor::Expired => "#ef4444",
    }
}

/// Relleno más claro al pasar el ratón
pub fn hover_fill_color(status: StatusColor) -> &'static str {
    match status {
        StatusColor::Active => "#34d399",
        StatusColor::ExpiringSoon => "#fbbf24",
        StatusColor::Expired => "#f87171",
    }
}

pub fn marker_class(status: StatusColor) -> &'static str {
    match status {
        StatusColor::Active => "marker-active",
        StatusColor::ExpiringSoon => "marker-expiring",
        StatusColor::Expired => "marker-expired",
    }
}

pub const NORMAL_RADIUS: f64 = 8.0;
pub const HOVER_RADIUS: f64 = 11.0;
pub const SIMILAR_RADIUS: f64 = 10.0;

impl MarkerSpec {
    /// Construir el marcador de un registro; None si le falta alguna coordenada
    pub fn for_record(record: &CompanyRecord, variant: MarkerVariant) -> Option<Self> {
        let (latitude, longitude) = record.coordinates()?;
        let status = record.status_color();
        let color = base_color(status).to_string();

        let (radius, weight, fill_opacity, class_name) = match variant {
            MarkerVariant::Normal => (NORMAL_RADIUS, 2.5, 0.85, marker_class(status).to_string()),
            MarkerVariant::Similar => (
                SIMILAR_RADIUS,
                3.0,
                0.9,
                format!("{} similar-highlighted", marker_class(status)),
            ),
        };

        let style = MarkerStyle {
            radius,
            color: color.clone(),
            fill_color: color.clone(),
            fill_opacity,
            weight,
            class_name: Some(class_name),
        };
        let hover_style = MarkerStyle {
            radius: radius.max(HOVER_RADIUS),
            color,
            fill_color: hover_fill_color(status).to_string(),
            fill_opacity,
            weight: 3.0,
            class_name: None,
        };

        Some(Self {
            record: record.clone(),
            latitude,
            longitude,
            style,
            hover_style,
        })
    }
}

/// Error del mapa
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("Invalid coordinates")]
    InvalidCoordinates,
    #[error("Map library error: {0}")]
    Js(String),
}

/// Capa en memoria (tests)
#[cfg(test)]
#[derive(Default)]
pub struct MemoryMarkerLayer {
    pub markers: Vec<MarkerSpec>,
    pub clear_calls: usize,
}

#[cfg(test)]
impl MemoryMarkerLayer {
    pub fn ids(&self) -> Vec<i64> {
        self.markers.iter().map(|m| m.record.id).collect()
    }
}

#[cfg(test)]
impl MarkerLayer for MemoryMarkerLayer {
    fn clear_markers(&mut self) {
        self.markers.clear();
        self.clear_calls += 1;
    }

    fn add_marker(&mut self, marker: MarkerSpec) -> Result<(), MapError> {
        self.markers.push(marker);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: Option<StatusColor>) -> CompanyRecord {
        CompanyRecord {
            id: 1,
            latitude: Some(55.75),
            longitude: Some(37.62),
            license_status_color: status,
            ..Default::default()
        }
    }

    #[test]
    fn test_style_follows_status_color() {
        let cases = [
            (Some(StatusColor::Active), "#10b981", "marker-active"),
            (Some(StatusColor::ExpiringSoon), "#f59e0b", "marker-expiring"),
            (Some(StatusColor::Expired), "#ef4444", "marker-expired"),
            (None, "#10b981", "marker-active"),
        ];
        for (status, color, class) in cases {
            let spec = MarkerSpec::for_record(&record(status), MarkerVariant::Normal).unwrap();
            assert_eq!(spec.style.color, color);
            assert_eq!(spec.style.fill_color, color);
            assert_eq!(spec.style.class_name.as_deref(), Some(class));
            assert_eq!(spec.style.radius, NORMAL_RADIUS);
            assert_eq!(spec.hover_style.radius, HOVER_RADIUS);
            assert_ne!(spec.hover_style.fill_color, color);
        }
    }

    #[test]
    fn test_similar_variant_is_larger() {
        let spec = MarkerSpec::for_record(&record(None), MarkerVariant::Similar).unwrap();
        assert_eq!(spec.style.radius, SIMILAR_RADIUS);
        assert_eq!(spec.style.weight, 3.0);
        assert!(spec.style.class_name.unwrap().ends_with("similar-highlighted"));
    }

    #[test]
    fn test_missing_coordinate_yields_no_marker() {
        let mut r = record(None);
        r.longitude = None;
        assert!(MarkerSpec::for_record(&r, MarkerVariant::Normal).is_none());
    }

    #[test]
    fn test_style_serializes_with_leaflet_names() {
        let spec = MarkerSpec::for_record(&record(None), MarkerVariant::Normal).unwrap();
        let json = serde_json::to_value(&spec.style).unwrap();
        assert_eq!(json["fillColor"], "#10b981");
        assert_eq!(json["fillOpacity"], 0.85);
        assert_eq!(json["className"], "marker-active");
        let hover = serde_json::to_value(&spec.hover_style).unwrap();
        assert!(hover.get("className").is_none());
    }
}
