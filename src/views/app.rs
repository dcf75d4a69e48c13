// ============================================================================
// APP VIEW - Layout principal + secciones actualizables
// ============================================================================
// El contenedor #map se crea una sola vez (Leaflet vive dentro); el resto de
// secciones se reconstruyen por separado.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, get_element_by_id, replace_section, toggle_class, ElementBuilder};
use crate::state::{AppState, IncrementalUpdate};
use crate::views::{
    render_auth_modal, render_favorites_panel, render_filters_panel, render_header,
    render_notifications, render_points_count,
};

pub const MAP_CONTAINER_ID: &str = "map";
const HEADER_ID: &str = "header-section";
const FILTERS_ID: &str = "filters-section";
const POINTS_ID: &str = "points-count-section";
const FAVORITES_ID: &str = "favorites-section";
const MODAL_ID: &str = "modal-section";
const NOTIFICATIONS_ID: &str = "notifications-section";

/// Secciones que se reconstruyen en un re-render completo
pub const ALL_SECTIONS: [IncrementalUpdate; 6] = [
    IncrementalUpdate::Header,
    IncrementalUpdate::FilterOptions,
    IncrementalUpdate::PointsCount,
    IncrementalUpdate::FavoritesPanel,
    IncrementalUpdate::Modal,
    IncrementalUpdate::Notifications,
];

/// Renderizar el esqueleto de la aplicación con todas sus secciones
pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    let app = ElementBuilder::new("div")?.class("app").build();

    let header = ElementBuilder::new("header")?
        .id(HEADER_ID)?
        .class("app-header")
        .child(render_header(state)?)?
        .build();
    append_child(&app, &header)?;

    let main = ElementBuilder::new("div")?.class("app-main").build();

    let filters = ElementBuilder::new("aside")?
        .id(FILTERS_ID)?
        .class("filters-section")
        .child(render_filters_panel(state)?)?
        .build();
    append_child(&main, &filters)?;

    let map = ElementBuilder::new("div")?
        .id(MAP_CONTAINER_ID)?
        .class("map-container")
        .build();
    append_child(&main, &map)?;

    let points = ElementBuilder::new("div")?
        .id(POINTS_ID)?
        .class("points-count-section")
        .child(render_points_count(state)?)?
        .build();
    append_child(&main, &points)?;

    let favorites = ElementBuilder::new("aside")?
        .id(FAVORITES_ID)?
        .class("favorites-section")
        .child(render_favorites_panel(state)?)?
        .build();
    append_child(&main, &favorites)?;

    append_child(&app, &main)?;

    let modal = ElementBuilder::new("div")?
        .id(MODAL_ID)?
        .child(render_auth_modal(state)?)?
        .build();
    append_child(&app, &modal)?;

    let notifications = ElementBuilder::new("div")?
        .id(NOTIFICATIONS_ID)?
        .class("notifications")
        .child(render_notifications(state)?)?
        .build();
    append_child(&app, &notifications)?;

    Ok(app)
}

/// Actualizar solo una sección
pub fn update_section(state: &AppState, update: IncrementalUpdate) -> Result<(), JsValue> {
    match update {
        IncrementalUpdate::Header => replace_section(HEADER_ID, &render_header(state)?),
        IncrementalUpdate::FilterOptions => replace_section(FILTERS_ID, &render_filters_panel(state)?),
        IncrementalUpdate::FiltersPanel => {
            let panel = get_element_by_id(crate::views::filters_panel::FILTERS_PANEL_ID)
                .ok_or_else(|| JsValue::from_str("Filters panel not found"))?;
            toggle_class(&panel, "open", *state.show_filters.borrow())
        }
        IncrementalUpdate::PointsCount => replace_section(POINTS_ID, &render_points_count(state)?),
        IncrementalUpdate::FavoritesPanel => replace_section(FAVORITES_ID, &render_favorites_panel(state)?),
        IncrementalUpdate::Modal => replace_section(MODAL_ID, &render_auth_modal(state)?),
        IncrementalUpdate::Notifications => replace_section(NOTIFICATIONS_ID, &render_notifications(state)?),
    }
}

/// ¿Cierra el panel este click? Un target ya desconectado viene de una sección
/// reconstruida durante el propio click (p.ej. "Limpiar") y no cuenta como fuera.
fn is_outside_click(target_connected: bool, inside_filters: bool) -> bool {
    target_connected && !inside_filters
}

/// Cerrar el panel de filtros con un click fuera de él (listener global, una vez)
pub fn install_outside_click(state: &AppState) -> Result<(), JsValue> {
    let state = state.clone();
    crate::dom::on_document_click(move |e: web_sys::MouseEvent| {
        if !*state.show_filters.borrow() {
            return;
        }
        let Some(node) = e
            .target()
            .and_then(|target| wasm_bindgen::JsCast::dyn_into::<web_sys::Node>(target).ok())
        else {
            return;
        };
        let inside = get_element_by_id(FILTERS_ID)
            .map(|section| section.contains(Some(&node)))
            .unwrap_or(false);
        if is_outside_click(node.is_connected(), inside) {
            state.set_show_filters(false);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_target_does_not_close_filters() {
        assert!(!is_outside_click(false, false));
        assert!(!is_outside_click(true, true));
        assert!(is_outside_click(true, false));
    }
}
