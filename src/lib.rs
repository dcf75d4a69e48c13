// ============================================================================
// LICENSE MAP PWA - FRONTEND MVVM (RUST PURO + LEAFLET)
// ============================================================================
// Arquitectura:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Reglas de carga, similares, favoritos y sesión
// - Services: SOLO comunicación API + persistencia de sesión
// - State: State Management con Rc<RefCell>
// - Maps: Bindings de Leaflet detrás del trait MarkerLayer
// - Models: Estructuras compartidas con backend
// ============================================================================

#![allow(async_fn_in_trait)]

mod config;
mod models;
mod services;
mod viewmodels;
mod state;
mod maps;
mod dom;
mod views;
mod utils;
mod app;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use crate::app::App;
use crate::config::CONFIG;
use crate::state::app_state::UpdateType;

// Instancia global de la App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let level = if CONFIG.is_logging_enabled() { log::Level::Info } else { log::Level::Warn };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("🚀 License Map - Rust Puro + MVVM ({})", CONFIG.environment);

    let app = App::new()?;

    // Guardar antes de arrancar: las tareas async de start() re-renderizan vía APP
    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });
    APP.with(|app_cell| match app_cell.borrow().as_ref() {
        Some(app) => app.start(),
        None => Ok(()),
    })
}

/// Re-render completo (todas las secciones salvo el mapa)
pub fn rerender_app() {
    rerender_app_with_type(UpdateType::FullRender);
}

/// Actualizar la app con tipo específico
pub fn rerender_app_with_type(update_type: UpdateType) {
    APP.with(|app_cell| {
        // Solo préstamo compartido: los handlers pueden volver a entrar aquí
        let Ok(app_ref) = app_cell.try_borrow() else {
            log::warn!("⚠️ [UPDATE] App ocupada, actualización {:?} descartada", update_type);
            return;
        };
        let Some(app) = app_ref.as_ref() else {
            log::warn!("⚠️ [UPDATE] App no está inicializada");
            return;
        };

        let result = match update_type {
            UpdateType::Incremental(inc_type) => {
                log::debug!("🔄 [UPDATE] Actualización incremental: {:?}", inc_type);
                app.update_incremental(inc_type)
            }
            UpdateType::FullRender => {
                log::info!("🔄 [RERENDER] Re-render completo");
                app.render_all()
            }
        };
        if let Err(e) = result {
            log::error!("❌ [UPDATE] Error actualizando la vista: {:?}", e);
        }
    });
}
