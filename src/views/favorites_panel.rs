// ============================================================================
// FAVORITES PANEL VIEW - Lista de favoritos del usuario
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, on_click, ElementBuilder};
use crate::models::{ExpiryBadge, FavoriteEntry, LOAD_ALL_MIN_ZOOM};
use crate::state::AppState;
use crate::utils::constants::PLACEHOLDER;
use crate::utils::i18n::t;

/// Renderizar panel (vacío si está cerrado)
pub fn render_favorites_panel(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.lang();
    if !*state.show_favorites.borrow() {
        return Ok(ElementBuilder::new("div")?.class("favorites-panel hidden").build());
    }

    let panel = ElementBuilder::new("div")?.class("favorites-panel").build();

    let header = ElementBuilder::new("div")?.class("favorites-header").build();
    let title = ElementBuilder::new("h3")?
        .text(&format!("{} ({})", t("favorites", &lang), state.favorites_count()))
        .build();
    let close_btn = ElementBuilder::new("button")?
        .class("btn-close")
        .attr("aria-label", &t("close", &lang))?
        .text("✕")
        .build();
    {
        let state = state.clone();
        on_click(&close_btn, move |_e| state.set_show_favorites(false))?;
    }
    append_child(&header, &title)?;
    append_child(&header, &close_btn)?;
    append_child(&panel, &header)?;

    let favorites = state.favorites.borrow().clone();
    if favorites.is_empty() {
        let empty = ElementBuilder::new("p")?
            .class("favorites-empty")
            .text(&t("favorites_empty", &lang))
            .build();
        append_child(&panel, &empty)?;
        return Ok(panel);
    }

    let list = ElementBuilder::new("ul")?.class("favorites-list").build();
    for favorite in &favorites {
        append_child(&list, &render_favorite_row(state, favorite, &lang)?)?;
    }
    append_child(&panel, &list)?;
    Ok(panel)
}

fn render_favorite_row(state: &AppState, favorite: &FavoriteEntry, lang: &str) -> Result<Element, JsValue> {
    let row = ElementBuilder::new("li")?.class("favorite-item").build();

    let name = ElementBuilder::new("div")?
        .class("favorite-name")
        .text(favorite.display_name().unwrap_or(PLACEHOLDER))
        .build();
    let address = ElementBuilder::new("div")?
        .class("favorite-address")
        .text(favorite.display_address().unwrap_or(PLACEHOLDER))
        .build();
    append_child(&row, &name)?;
    append_child(&row, &address)?;

    let (class, text) = match favorite.expiry_badge() {
        ExpiryBadge::Overdue(days) => ("badge expired", t("badge_overdue", lang).replace("{days}", &days.to_string())),
        ExpiryBadge::ExpiringSoon(days) => ("badge expiring", t("badge_expiring", lang).replace("{days}", &days.to_string())),
        ExpiryBadge::Valid(days) => ("badge active", t("badge_valid", lang).replace("{days}", &days.to_string())),
        ExpiryBadge::Unknown => ("badge unknown", t("badge_unknown", lang)),
    };
    let badge = ElementBuilder::new("span")?.class(class).text(&text).build();
    append_child(&row, &badge)?;

    // Centrar el mapa en la empresa
    if let Some((lat, lng)) = favorite.coordinates() {
        let state = state.clone();
        on_click(&row, move |_e| {
            if let Some(map) = state.map.borrow().as_ref() {
                log::info!("📍 [FAVORITES] Centrando mapa en {}, {}", lat, lng);
                map.center_on(lat, lng, LOAD_ALL_MIN_ZOOM);
            }
        })?;
    } else {
        crate::dom::toggle_class(&row, "no-location", true)?;
    }

    Ok(row)
}
