// ============================================================================
// QUERY - Filtros + estrategia de volumen para GET /api/companies
// ============================================================================

use serde::{Deserialize, Serialize};
use crate::models::company::StatusColor;

/// Zoom a partir del cual se piden todos los puntos del área visible
pub const LOAD_ALL_MIN_ZOOM: f64 = 16.0;
/// Zoom a partir del cual se piden los primeros 1000
pub const WIDE_MIN_ZOOM: f64 = 12.0;
pub const WIDE_LIMIT: u32 = 1000;
pub const OVERVIEW_LIMIT: u32 = 500;

/// Filtros opcionales del panel
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyFilters {
    pub status_color: Option<StatusColor>,
    pub adm_area: Option<String>,
    pub district: Option<String>,
    pub license_type: Option<String>,
    pub search: Option<String>,
}

impl CompanyFilters {
    /// Normaliza un valor de input/select: recortado, vacío = ausente
    pub fn normalize(value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == CompanyFilters::default()
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status_color {
            pairs.push(("status_color", status.as_code().to_string()));
        }
        let optional = [
            ("adm_area", &self.adm_area),
            ("district", &self.district),
            ("license_type", &self.license_type),
            ("search", &self.search),
        ];
        for (key, value) in optional {
            if let Some(v) = value.as_deref().and_then(Self::normalize) {
                pairs.push((key, v));
            }
        }
        pairs
    }
}

/// Límites del viewport del mapa
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl MapBounds {
    /// Formato esperado por el backend: "south,west,north,east"
    pub fn to_param(&self) -> String {
        format!("{},{},{},{}", self.south, self.west, self.north, self.east)
    }
}

/// Zoom + límites en el momento de disparar la carga
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub zoom: f64,
    pub bounds: MapBounds,
}

/// Estrategia de volumen de puntos según el zoom
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VolumeStrategy {
    /// Todos los puntos dentro de los límites visibles
    AllInBounds { bounds: MapBounds, zoom: f64 },
    /// Los primeros N según el orden del servidor
    Capped(u32),
}

impl VolumeStrategy {
    pub fn for_viewport(viewport: &Viewport) -> Self {
        if viewport.zoom >= LOAD_ALL_MIN_ZOOM {
            VolumeStrategy::AllInBounds {
                bounds: viewport.bounds,
                zoom: viewport.zoom,
            }
        } else if viewport.zoom >= WIDE_MIN_ZOOM {
            VolumeStrategy::Capped(WIDE_LIMIT)
        } else {
            VolumeStrategy::Capped(OVERVIEW_LIMIT)
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            VolumeStrategy::AllInBounds { .. } => StrategyKind::AllInBounds,
            VolumeStrategy::Capped(limit) => StrategyKind::Top(*limit),
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            VolumeStrategy::AllInBounds { bounds, zoom } => vec![
                ("load_all", "true".to_string()),
                ("bounds", bounds.to_param()),
                ("zoom_level", zoom.to_string()),
            ],
            VolumeStrategy::Capped(limit) => vec![("limit", limit.to_string())],
        }
    }
}

/// Resumen de la estrategia para la etiqueta del contador
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyKind {
    AllInBounds,
    Top(u32),
}

/// Petición completa: estrategia + filtros, serializada como un único GET
#[derive(Clone, Debug, PartialEq)]
pub struct CompanyQuery {
    pub strategy: VolumeStrategy,
    pub filters: CompanyFilters,
}

impl CompanyQuery {
    pub fn new(viewport: &Viewport, filters: &CompanyFilters) -> Self {
        Self {
            strategy: VolumeStrategy::for_viewport(viewport),
            filters: filters.clone(),
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.strategy.query_pairs();
        pairs.extend(self.filters.query_pairs());
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(zoom: f64) -> Viewport {
        Viewport {
            zoom,
            bounds: MapBounds { south: 55.7, west: 37.5, north: 55.8, east: 37.7 },
        }
    }

    #[test]
    fn test_strategy_thresholds() {
        assert_eq!(VolumeStrategy::for_viewport(&viewport(11.9)), VolumeStrategy::Capped(500));
        assert_eq!(VolumeStrategy::for_viewport(&viewport(12.0)), VolumeStrategy::Capped(1000));
        assert_eq!(VolumeStrategy::for_viewport(&viewport(15.5)), VolumeStrategy::Capped(1000));
        assert_eq!(
            VolumeStrategy::for_viewport(&viewport(16.0)).kind(),
            StrategyKind::AllInBounds
        );
    }

    #[test]
    fn test_load_all_query_carries_bounds_and_zoom() {
        let query = CompanyQuery::new(&viewport(17.0), &CompanyFilters::default());
        let pairs = query.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("load_all", "true".to_string()),
                ("bounds", "55.7,37.5,55.8,37.7".to_string()),
                ("zoom_level", "17".to_string()),
            ]
        );
    }

    #[test]
    fn test_filters_skip_blank_values_and_trim_search() {
        let filters = CompanyFilters {
            status_color: Some(StatusColor::Expired),
            adm_area: Some("".into()),
            district: None,
            license_type: Some("РАО".into()),
            search: Some("  аптека ".into()),
        };
        let query = CompanyQuery::new(&viewport(10.0), &filters);
        assert_eq!(
            query.query_pairs(),
            vec![
                ("limit", "500".to_string()),
                ("status_color", "expired".to_string()),
                ("license_type", "РАО".to_string()),
                ("search", "аптека".to_string()),
            ]
        );
    }
}
