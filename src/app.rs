// ============================================================================
// APP - Aplicación principal
// ============================================================================
// Orden de arranque: sesión guardada -> layout -> mapa Leaflet -> opciones de
// filtros + primera carga.
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{append_child, clear_children, get_element_by_id};
use crate::maps::{MapError, MapView, MarkerLayer, PopupFactory};
use crate::models::CompanyRecord;
use crate::state::{AppState, IncrementalUpdate, NotificationKind};
use crate::viewmodels::loader_viewmodel::{load_filter_options, request_load};
use crate::viewmodels::session_viewmodel::restore_session;
use crate::viewmodels::LoadTrigger;
use crate::views::app::{install_outside_click, update_section, ALL_SECTIONS, MAP_CONTAINER_ID};
use crate::views::{render_app, render_popup};
use crate::utils::i18n::t;

/// Aplicación principal
pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    /// Crear la aplicación y dibujar el layout
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new();
        // Token guardado -> Pending; la validación corre en segundo plano
        restore_session(&state);

        clear_children(&root);
        append_child(&root, &render_app(&state)?)?;
        install_outside_click(&state)?;

        Ok(Self { state, root })
    }

    /// Montar el mapa y lanzar las cargas iniciales
    pub fn start(&self) -> Result<(), JsValue> {
        if let Err(e) = self.mount_map() {
            log::error!("❌ [APP] No se pudo inicializar el mapa: {}", e);
            let lang = self.state.lang();
            self.state.notify(NotificationKind::Error, format!("{}: {}", t("map_error", &lang), e));
            return Ok(());
        }

        load_filter_options(&self.state);
        request_load(&self.state, LoadTrigger::Initial);
        log::info!("✅ [APP] Aplicación iniciada");
        Ok(())
    }

    fn mount_map(&self) -> Result<(), MapError> {
        let mut map = MapView::mount(MAP_CONTAINER_ID, &CONFIG.map_config)?;

        let popup_state = self.state.clone();
        let popup_factory: PopupFactory =
            Rc::new(move |record: &CompanyRecord| render_popup(&popup_state, record));
        let layer = map.create_marker_layer(popup_factory, CONFIG.ui_config.popup_max_width)?;

        let move_state = self.state.clone();
        map.on_move_end(move || {
            let state = move_state.clone();
            move_state
                .viewport_debounce
                .trigger(move || request_load(&state, LoadTrigger::Viewport));
        });

        *self.state.map.borrow_mut() = Some(map);
        *self.state.markers.borrow_mut() = Some(Box::new(layer) as Box<dyn MarkerLayer>);
        log::info!("🗺️ [APP] Mapa montado en #{}", MAP_CONTAINER_ID);
        Ok(())
    }

    /// Re-render completo: todas las secciones salvo el contenedor del mapa
    pub fn render_all(&self) -> Result<(), JsValue> {
        if get_element_by_id(MAP_CONTAINER_ID).is_none() {
            // Layout perdido: reconstruir desde cero (el mapa no sobrevive)
            log::warn!("⚠️ [APP] Layout no encontrado, reconstruyendo");
            clear_children(&self.root);
            append_child(&self.root, &render_app(&self.state)?)?;
            return Ok(());
        }
        for section in ALL_SECTIONS {
            update_section(&self.state, section)?;
        }
        Ok(())
    }

    /// Actualización incremental del DOM (una sección)
    pub fn update_incremental(&self, update_type: IncrementalUpdate) -> Result<(), JsValue> {
        update_section(&self.state, update_type)
    }
}
