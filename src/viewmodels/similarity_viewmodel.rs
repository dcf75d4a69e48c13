// ============================================================================
// SIMILARITY VIEWMODEL - Empresas similares cerca de un punto
// ============================================================================
// Filtra el dataset en memoria (sin red): mismo tipo de licencia y distancia
// plana ≤ radio. Aproximación de 111 km por grado en ambos ejes.
// ============================================================================

use crate::config::CONFIG;
use crate::maps::{MarkerLayer, MarkerVariant};
use crate::models::CompanyRecord;
use crate::state::{AppState, IncrementalUpdate, LoaderState, NotificationKind, PointsLabel, PointsTag, UpdateType};
use crate::utils::i18n::t;
use super::loader_viewmodel::render_records;

pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Distancia plana en metros entre dos (lat, lng)
pub fn planar_distance_m(a: (f64, f64), b: (f64, f64)) -> f64 {
    let d_lat = a.0 - b.0;
    let d_lng = a.1 - b.1;
    (d_lat * d_lat + d_lng * d_lng).sqrt() * METERS_PER_DEGREE
}

/// Punto de referencia de una búsqueda de similares
#[derive(Clone, Debug, PartialEq)]
pub struct SimilarityQuery {
    pub exclude_id: i64,
    pub license_type_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: f64,
}

impl SimilarityQuery {
    /// None si el registro no tiene coordenadas o tipo de licencia
    pub fn for_record(record: &CompanyRecord, radius_m: f64) -> Option<Self> {
        let (latitude, longitude) = record.coordinates()?;
        let code = record
            .license_type_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())?;
        Some(Self {
            exclude_id: record.id,
            license_type_code: code.to_string(),
            latitude,
            longitude,
            radius_m,
        })
    }

    pub fn matches(&self, record: &CompanyRecord) -> bool {
        if record.id == self.exclude_id {
            return false;
        }
        if record.license_type_code.as_deref().map(str::trim) != Some(self.license_type_code.as_str()) {
            return false;
        }
        match record.coordinates() {
            Some(point) => planar_distance_m(point, (self.latitude, self.longitude)) <= self.radius_m,
            None => false,
        }
    }
}

pub fn find_similar(dataset: &[CompanyRecord], query: &SimilarityQuery) -> Vec<CompanyRecord> {
    dataset.iter().filter(|r| query.matches(r)).cloned().collect()
}

/// Entrar en modo similares: guarda lo dibujado y deja solo las coincidencias
pub fn enter_similarity(
    loader: &mut LoaderState,
    layer: &mut dyn MarkerLayer,
    query: &SimilarityQuery,
) -> usize {
    let matches = find_similar(&loader.dataset, query);
    loader.enter_similar_mode();
    loader.rendered = render_records(layer, &matches, MarkerVariant::Similar);
    let count = loader.rendered.len();
    loader.label = Some(PointsLabel {
        count,
        tag: PointsTag::Similar,
    });
    count
}

/// Botón "Similares" del popup
pub fn show_similar_action(state: &AppState, record: &CompanyRecord) {
    let lang = state.lang();
    let radius_m = CONFIG.ui_config.similarity_radius_meters;
    let Some(query) = SimilarityQuery::for_record(record, radius_m) else {
        log::warn!("⚠️ [SIMILAR] Registro {} sin coordenadas o tipo de licencia", record.id);
        state.notify(NotificationKind::Error, t("similar_unavailable", &lang));
        return;
    };

    let count = {
        let mut markers = state.markers.borrow_mut();
        let Some(layer) = markers.as_mut() else {
            return;
        };
        enter_similarity(&mut state.loader.borrow_mut(), layer.as_mut(), &query)
    };
    log::info!(
        "🔍 [SIMILAR] {} coincidencias para {} (tipo {}) en {} m",
        count,
        record.id,
        query.license_type_code,
        radius_m
    );

    state.viewport_debounce.cancel();
    state.search_debounce.cancel();
    crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::PointsCount));

    let text = t("similar_found", &lang)
        .replace("{count}", &count.to_string())
        .replace("{radius}", &format!("{}", radius_m));
    state.notify(NotificationKind::Info, text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::MemoryMarkerLayer;
    use crate::models::{CompanyFilters, StrategyKind};
    use crate::viewmodels::loader_viewmodel::{apply_fetched, clear_filters, ClearOutcome, LoadTrigger};

    fn record(id: i64, lat: f64, lng: f64, code: &str) -> CompanyRecord {
        CompanyRecord {
            id,
            latitude: Some(lat),
            longitude: Some(lng),
            license_type_code: Some(code.to_string()),
            ..Default::default()
        }
    }

    fn reference() -> SimilarityQuery {
        SimilarityQuery {
            exclude_id: 1,
            license_type_code: "R".into(),
            latitude: 55.75,
            longitude: 37.62,
            radius_m: 1000.0,
        }
    }

    #[test]
    fn test_planar_distance() {
        // ~1570 m: fuera del radio
        let d = planar_distance_m((55.76, 37.63), (55.75, 37.62));
        assert!((d - 1569.8).abs() < 1.0);
        // ~157 m: dentro
        assert!(planar_distance_m((55.751, 37.621), (55.75, 37.62)) < 200.0);
    }

    #[test]
    fn test_similarity_inclusion_rule() {
        let dataset = vec![
            record(1, 55.75, 37.62, "R"),    // excluido por id
            record(2, 55.76, 37.63, "R"),    // demasiado lejos
            record(3, 55.751, 37.621, "R"),  // coincide
            record(4, 55.751, 37.621, "W"),  // otro tipo
            CompanyRecord {
                id: 5,
                license_type_code: Some("R".into()),
                ..Default::default()
            },
        ];
        let ids: Vec<i64> = find_similar(&dataset, &reference()).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_query_requires_coordinates_and_license_type() {
        let mut r = record(7, 55.0, 37.0, "R");
        assert!(SimilarityQuery::for_record(&r, 1000.0).is_some());
        r.license_type_code = Some("  ".into());
        assert!(SimilarityQuery::for_record(&r, 1000.0).is_none());
        let r = CompanyRecord { id: 8, license_type_code: Some("R".into()), ..Default::default() };
        assert!(SimilarityQuery::for_record(&r, 1000.0).is_none());
    }

    #[test]
    fn test_zero_matches_is_valid() {
        let mut loader = LoaderState::new();
        let mut layer = MemoryMarkerLayer::default();
        apply_fetched(&mut loader, &mut layer, vec![record(1, 55.75, 37.62, "R")], StrategyKind::Top(500), LoadTrigger::Initial);

        let count = enter_similarity(&mut loader, &mut layer, &reference());

        assert_eq!(count, 0);
        assert!(layer.markers.is_empty());
        assert_eq!(loader.label, Some(PointsLabel { count: 0, tag: PointsTag::Similar }));
        assert!(loader.is_similar_mode());
    }

    #[test]
    fn test_clear_after_similarity_restores_exact_previous_set() {
        let mut loader = LoaderState::new();
        let mut layer = MemoryMarkerLayer::default();
        let dataset = vec![
            record(1, 55.75, 37.62, "R"),
            record(2, 55.76, 37.63, "R"),
            record(3, 55.751, 37.621, "R"),
            CompanyRecord { id: 4, ..Default::default() },
        ];
        apply_fetched(&mut loader, &mut layer, dataset, StrategyKind::Top(1000), LoadTrigger::Initial);
        let before_ids = layer.ids();
        let before_label = loader.label;

        enter_similarity(&mut loader, &mut layer, &reference());
        assert_eq!(layer.ids(), vec![3]);
        assert!(layer.markers[0].style.class_name.as_deref().unwrap_or("").contains("similar-highlighted"));

        // Segunda búsqueda dentro del modo: la instantánea original se conserva
        let second = SimilarityQuery { exclude_id: 3, ..reference() };
        enter_similarity(&mut loader, &mut layer, &second);
        assert_eq!(layer.ids(), vec![1]);

        assert_eq!(clear_filters(&mut loader, &mut layer, &mut CompanyFilters::default()), ClearOutcome::Restored);
        assert_eq!(layer.ids(), before_ids);
        assert_eq!(loader.label, before_label);
        assert!(!loader.is_similar_mode());
        assert!(layer.markers.iter().all(|m| m.style.radius == crate::maps::NORMAL_RADIUS));
    }
}
