// ============================================================================
// LOADER VIEWMODEL - Carga de empresas según viewport + filtros
// ============================================================================
// Lógica pura sobre LoaderState + MarkerLayer (testeable sin navegador) y
// la orquestación async que usan las vistas.
// ============================================================================

use std::cell::RefCell;
use wasm_bindgen_futures::spawn_local;
use crate::maps::{MarkerLayer, MarkerSpec, MarkerVariant};
use crate::models::{CompanyFilters, CompanyQuery, CompanyRecord, StrategyKind};
use crate::services::{ApiClient, ApiError, CompaniesApi};
use crate::state::{AppState, DisplayMode, IncrementalUpdate, LoaderState, PointsLabel, PointsTag, UpdateType};

/// Origen de una petición de carga
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadTrigger {
    Initial,
    FilterChange,
    Search,
    Viewport,
    /// Botón "Cargar": siempre carga, incluso en modo similares
    Explicit,
}

impl LoadTrigger {
    /// Disparadores reactivos: se ignoran en modo similares
    pub fn is_reactive(&self) -> bool {
        !matches!(self, LoadTrigger::Explicit)
    }
}

/// ¿Debe este disparador lanzar un fetch con el modo actual?
pub fn should_load(loader: &LoaderState, trigger: LoadTrigger) -> bool {
    !(trigger.is_reactive() && loader.is_similar_mode())
}

/// Vaciar la capa y dibujar un marcador por registro con coordenadas.
/// Devuelve los registros efectivamente dibujados.
pub fn render_records(
    layer: &mut dyn MarkerLayer,
    records: &[CompanyRecord],
    variant: MarkerVariant,
) -> Vec<CompanyRecord> {
    layer.clear_markers();
    let mut rendered = Vec::with_capacity(records.len());
    for record in records {
        let Some(spec) = MarkerSpec::for_record(record, variant) else {
            continue;
        };
        match layer.add_marker(spec) {
            Ok(()) => rendered.push(record.clone()),
            Err(e) => log::warn!("⚠️ [LOADER] Marcador {} descartado: {}", record.id, e),
        }
    }
    rendered
}

/// Aplicar un resultado de /api/companies. Devuelve None si se descarta
/// (respuesta reactiva llegada en modo similares). Una carga explícita sale
/// del modo similares aquí, solo cuando ya hay datos nuevos.
pub fn apply_fetched(
    loader: &mut LoaderState,
    layer: &mut dyn MarkerLayer,
    records: Vec<CompanyRecord>,
    strategy: StrategyKind,
    trigger: LoadTrigger,
) -> Option<usize> {
    if loader.is_similar_mode() {
        if trigger.is_reactive() {
            log::info!("⏸️ [LOADER] Respuesta ignorada: modo similares activo");
            return None;
        }
        log::info!("🔁 [LOADER] Carga explícita: fin del modo similares");
        loader.mode = DisplayMode::Viewport;
    }
    let rendered = render_records(layer, &records, MarkerVariant::Normal);
    let count = rendered.len();
    loader.dataset = records;
    loader.rendered = rendered;
    loader.label = Some(PointsLabel {
        count,
        tag: PointsTag::Strategy(strategy),
    });
    Some(count)
}

/// Resultado de "limpiar filtros"
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearOutcome {
    /// Se restauró el conjunto previo a la búsqueda de similares (sin fetch)
    Restored,
    /// Modo normal: filtros reseteados, hay que recargar
    Reload,
}

/// Salir del modo similares restaurando exactamente los marcadores previos
pub fn restore_previous(loader: &mut LoaderState, layer: &mut dyn MarkerLayer) -> bool {
    let Some((saved, label)) = loader.take_saved() else {
        return false;
    };
    loader.rendered = render_records(layer, &saved, MarkerVariant::Normal);
    loader.label = label;
    true
}

/// "Limpiar": los filtros se resetean siempre; en modo similares además se
/// restaura el conjunto previo
pub fn clear_filters(
    loader: &mut LoaderState,
    layer: &mut dyn MarkerLayer,
    filters: &mut CompanyFilters,
) -> ClearOutcome {
    *filters = CompanyFilters::default();
    if restore_previous(loader, layer) {
        ClearOutcome::Restored
    } else {
        ClearOutcome::Reload
    }
}

/// ViewModel del loader - acceso a API
pub struct LoaderViewModel<A: CompaniesApi = ApiClient> {
    api: A,
}

impl LoaderViewModel<ApiClient> {
    pub fn new() -> Self {
        Self { api: ApiClient::new() }
    }
}

impl<A: CompaniesApi> LoaderViewModel<A> {
    pub fn with_api(api: A) -> Self {
        Self { api }
    }

    pub async fn fetch(&self, query: &CompanyQuery) -> Result<Vec<CompanyRecord>, ApiError> {
        log::info!(
            "🌐 [LOADER] GET /api/companies ({:?}, filtros: {})",
            query.strategy.kind(),
            if query.filters.is_empty() { "no" } else { "sí" }
        );
        self.api.fetch_companies(query).await
    }

    /// Cargar y aplicar sobre el estado; los errores dejan mapa y modo como estaban
    pub async fn load_into(
        &self,
        loader: &RefCell<LoaderState>,
        markers: &RefCell<Option<Box<dyn MarkerLayer>>>,
        query: &CompanyQuery,
        trigger: LoadTrigger,
    ) -> Result<Option<usize>, ApiError> {
        let records = self.fetch(query).await?;
        log::info!("✅ [LOADER] {} registros recibidos", records.len());
        let mut markers = markers.borrow_mut();
        let Some(layer) = markers.as_mut() else {
            log::warn!("⚠️ [LOADER] Capa de marcadores no disponible");
            return Ok(None);
        };
        Ok(apply_fetched(
            &mut loader.borrow_mut(),
            layer.as_mut(),
            records,
            query.strategy.kind(),
            trigger,
        ))
    }
}

// ============================================================================
// ORQUESTACIÓN (navegador)
// ============================================================================

/// Pedir una carga. Los disparadores reactivos no hacen nada en modo similares;
/// el explícito abandona ese modo sin restaurar si la carga tiene éxito.
pub fn request_load(state: &AppState, trigger: LoadTrigger) {
    if !should_load(&state.loader.borrow(), trigger) {
        log::info!("⏸️ [LOADER] {:?} ignorado: modo similares activo", trigger);
        return;
    }

    let viewport = match state.map.borrow().as_ref() {
        Some(map) => map.viewport(),
        None => {
            log::warn!("⚠️ [LOADER] Mapa no inicializado, carga {:?} omitida", trigger);
            return;
        }
    };
    let query = CompanyQuery::new(&viewport, &state.filters.borrow());
    log::info!("🔄 [LOADER] Carga por {:?} (zoom {})", trigger, viewport.zoom);

    let state = state.clone();
    spawn_local(async move {
        let vm = LoaderViewModel::new();
        match vm.load_into(&state.loader, &state.markers, &query, trigger).await {
            Ok(Some(count)) => {
                log::info!("✅ [LOADER] {} marcadores dibujados", count);
                crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::PointsCount));
            }
            Ok(None) => {}
            Err(e) => {
                log::error!("❌ [LOADER] Error cargando empresas: {}", e);
                state.notify_api_error(&e);
            }
        }
    });
}

/// Cargar las opciones de los selects de filtros
pub fn load_filter_options(state: &AppState) {
    let state = state.clone();
    spawn_local(async move {
        let api = ApiClient::new();
        match api.fetch_filter_options().await {
            Ok(options) => {
                log::info!(
                    "✅ [FILTERS] Opciones: {} áreas, {} distritos, {} tipos",
                    options.adm_areas.len(),
                    options.districts.len(),
                    options.license_types.len()
                );
                *state.filter_options.borrow_mut() = options;
                crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::FilterOptions));
            }
            Err(e) => {
                log::error!("❌ [FILTERS] Error cargando opciones: {}", e);
                state.notify_api_error(&e);
            }
        }
    });
}

/// Botón "Limpiar": resetea filtros; restaura si veníamos de similares, si no recarga
pub fn clear_filters_action(state: &AppState) {
    state.search_debounce.cancel();
    let outcome = {
        let mut markers = state.markers.borrow_mut();
        let mut filters = state.filters.borrow_mut();
        match markers.as_mut() {
            Some(layer) => clear_filters(&mut state.loader.borrow_mut(), layer.as_mut(), &mut filters),
            None => {
                *filters = CompanyFilters::default();
                ClearOutcome::Reload
            }
        }
    };
    crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::FilterOptions));

    match outcome {
        ClearOutcome::Restored => {
            log::info!("↩️ [LOADER] Conjunto previo restaurado");
            crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::PointsCount));
        }
        ClearOutcome::Reload => request_load(state, LoadTrigger::FilterChange),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::MemoryMarkerLayer;
    use crate::models::{FilterOptions, MapBounds, StatusColor, Viewport, VolumeStrategy};

    fn record(id: i64, coords: Option<(f64, f64)>, status: StatusColor) -> CompanyRecord {
        CompanyRecord {
            id,
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
            license_status_color: Some(status),
            ..Default::default()
        }
    }

    fn ids(records: &[CompanyRecord]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    struct FakeCompanies {
        result: Result<Vec<CompanyRecord>, ApiError>,
        queries: RefCell<Vec<CompanyQuery>>,
    }

    impl FakeCompanies {
        fn returning(result: Result<Vec<CompanyRecord>, ApiError>) -> Self {
            Self { result, queries: RefCell::new(Vec::new()) }
        }
    }

    impl CompaniesApi for FakeCompanies {
        async fn fetch_companies(&self, query: &CompanyQuery) -> Result<Vec<CompanyRecord>, ApiError> {
            self.queries.borrow_mut().push(query.clone());
            self.result.clone()
        }

        async fn fetch_filter_options(&self) -> Result<FilterOptions, ApiError> {
            Ok(FilterOptions::default())
        }
    }

    fn query(zoom: f64) -> CompanyQuery {
        let viewport = Viewport {
            zoom,
            bounds: MapBounds { south: 55.7, west: 37.5, north: 55.8, east: 37.7 },
        };
        CompanyQuery::new(&viewport, &CompanyFilters::default())
    }

    fn memory_slot() -> RefCell<Option<Box<dyn MarkerLayer>>> {
        RefCell::new(Some(Box::new(MemoryMarkerLayer::default())))
    }

    /// Loader mostrando {1, 2} y luego en modo similares con solo {2}
    fn similar_mode_loader() -> RefCell<LoaderState> {
        let mut loader = LoaderState::new();
        let mut layer = MemoryMarkerLayer::default();
        apply_fetched(
            &mut loader,
            &mut layer,
            vec![record(1, Some((55.75, 37.62)), StatusColor::Active), record(2, Some((55.751, 37.621)), StatusColor::Active)],
            StrategyKind::Top(500),
            LoadTrigger::Initial,
        );
        loader.enter_similar_mode();
        loader.rendered = render_records(&mut layer, &[record(2, Some((55.751, 37.621)), StatusColor::Active)], MarkerVariant::Similar);
        loader.label = Some(PointsLabel { count: 1, tag: PointsTag::Similar });
        RefCell::new(loader)
    }

    #[test]
    fn test_one_marker_per_located_record() {
        let mut layer = MemoryMarkerLayer::default();
        let mut loader = LoaderState::new();
        let records = vec![
            record(1, Some((55.75, 37.62)), StatusColor::Active),
            record(2, None, StatusColor::Active),
            record(3, Some((55.76, 37.60)), StatusColor::Expired),
        ];

        let count = apply_fetched(&mut loader, &mut layer, records, StrategyKind::Top(500), LoadTrigger::Initial);

        assert_eq!(count, Some(2));
        assert_eq!(layer.ids(), vec![1, 3]);
        assert_eq!(layer.markers[1].style.color, "#ef4444");
        assert_eq!(loader.dataset.len(), 3);
        assert_eq!(
            loader.label,
            Some(PointsLabel { count: 2, tag: PointsTag::Strategy(StrategyKind::Top(500)) })
        );
    }

    #[test]
    fn test_fetch_replaces_previous_markers() {
        let mut layer = MemoryMarkerLayer::default();
        let mut loader = LoaderState::new();
        apply_fetched(&mut loader, &mut layer, vec![record(1, Some((55.0, 37.0)), StatusColor::Active)], StrategyKind::Top(500), LoadTrigger::Initial);
        apply_fetched(&mut loader, &mut layer, vec![record(2, Some((55.0, 37.0)), StatusColor::Active)], StrategyKind::AllInBounds, LoadTrigger::Viewport);
        assert_eq!(layer.ids(), vec![2]);
        assert_eq!(layer.clear_calls, 2);
    }

    #[test]
    fn test_reactive_triggers_suspended_in_similar_mode() {
        let mut loader = LoaderState::new();
        assert!(should_load(&loader, LoadTrigger::Viewport));

        loader.enter_similar_mode();
        for trigger in [LoadTrigger::Initial, LoadTrigger::FilterChange, LoadTrigger::Search, LoadTrigger::Viewport] {
            assert!(!should_load(&loader, trigger));
        }
        assert!(should_load(&loader, LoadTrigger::Explicit));
    }

    #[test]
    fn test_reactive_response_dropped_in_similar_mode() {
        let mut layer = MemoryMarkerLayer::default();
        let mut loader = LoaderState::new();
        loader.enter_similar_mode();
        let applied = apply_fetched(&mut loader, &mut layer, vec![record(9, Some((55.0, 37.0)), StatusColor::Active)], StrategyKind::Top(500), LoadTrigger::Viewport);
        assert_eq!(applied, None);
        assert!(layer.markers.is_empty());
        assert!(loader.is_similar_mode());
    }

    #[test]
    fn test_clear_filters_in_viewport_mode_requests_reload() {
        let mut layer = MemoryMarkerLayer::default();
        let mut loader = LoaderState::new();
        let mut filters = CompanyFilters { search: Some("аптека".into()), ..Default::default() };
        assert_eq!(clear_filters(&mut loader, &mut layer, &mut filters), ClearOutcome::Reload);
        assert_eq!(layer.clear_calls, 0);
        assert_eq!(filters, CompanyFilters::default());
    }

    #[test]
    fn test_clear_filters_in_similar_mode_restores_and_resets_filters() {
        let loader = similar_mode_loader();
        let mut layer = MemoryMarkerLayer::default();
        let mut filters = CompanyFilters { search: Some("typed while similar".into()), ..Default::default() };

        let outcome = clear_filters(&mut loader.borrow_mut(), &mut layer, &mut filters);

        assert_eq!(outcome, ClearOutcome::Restored);
        assert_eq!(layer.ids(), vec![1, 2]);
        assert_eq!(filters, CompanyFilters::default());
        assert!(!loader.borrow().is_similar_mode());
    }

    #[test]
    fn test_load_into_uses_strategy_and_keeps_state_on_error() {
        let loader = RefCell::new(LoaderState::new());
        let markers = memory_slot();

        let ok = LoaderViewModel::with_api(FakeCompanies::returning(Ok(vec![record(
            1,
            Some((55.75, 37.62)),
            StatusColor::ExpiringSoon,
        )])));
        let count = pollster::block_on(ok.load_into(&loader, &markers, &query(16.0), LoadTrigger::Initial)).unwrap();
        assert_eq!(count, Some(1));
        assert!(matches!(ok.api.queries.borrow()[0].strategy, VolumeStrategy::AllInBounds { .. }));
        assert_eq!(loader.borrow().label.unwrap().tag, PointsTag::Strategy(StrategyKind::AllInBounds));

        let failing = LoaderViewModel::with_api(FakeCompanies::returning(Err(ApiError::Parse("expected array".into()))));
        let err = pollster::block_on(failing.load_into(&loader, &markers, &query(10.0), LoadTrigger::Viewport));
        assert!(err.is_err());
        assert_eq!(ids(&loader.borrow().rendered), vec![1]);
        assert_eq!(loader.borrow().dataset.len(), 1);
    }

    #[test]
    fn test_failed_explicit_load_keeps_similar_mode() {
        let loader = similar_mode_loader();
        let markers = memory_slot();
        let failing = LoaderViewModel::with_api(FakeCompanies::returning(Err(ApiError::Network("offline".into()))));

        let result = pollster::block_on(failing.load_into(&loader, &markers, &query(13.0), LoadTrigger::Explicit));

        assert!(result.is_err());
        assert!(loader.borrow().is_similar_mode());
        assert_eq!(loader.borrow().label.map(|l| l.tag), Some(PointsTag::Similar));
        let mut layer = MemoryMarkerLayer::default();
        assert!(restore_previous(&mut loader.borrow_mut(), &mut layer));
        assert_eq!(layer.ids(), vec![1, 2]);
    }

    #[test]
    fn test_successful_explicit_load_leaves_similar_mode() {
        let loader = similar_mode_loader();
        let markers = memory_slot();
        let ok = LoaderViewModel::with_api(FakeCompanies::returning(Ok(vec![record(
            7,
            Some((55.7, 37.6)),
            StatusColor::Active,
        )])));

        let count = pollster::block_on(ok.load_into(&loader, &markers, &query(13.0), LoadTrigger::Explicit)).unwrap();

        assert_eq!(count, Some(1));
        assert!(!loader.borrow().is_similar_mode());
        assert_eq!(ids(&loader.borrow().rendered), vec![7]);
        assert_eq!(loader.borrow().label.map(|l| l.tag), Some(PointsTag::Strategy(StrategyKind::Top(1000))));
    }

    #[test]
    fn test_load_into_without_layer_applies_nothing() {
        let loader = RefCell::new(LoaderState::new());
        let markers: RefCell<Option<Box<dyn MarkerLayer>>> = RefCell::new(None);
        let ok = LoaderViewModel::with_api(FakeCompanies::returning(Ok(vec![record(1, Some((55.0, 37.0)), StatusColor::Active)])));

        let applied = pollster::block_on(ok.load_into(&loader, &markers, &query(13.0), LoadTrigger::Initial)).unwrap();

        assert_eq!(applied, None);
        assert!(loader.borrow().dataset.is_empty());
    }
}
