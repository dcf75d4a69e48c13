// ============================================================================
// POPUP VIEW - Contenido del popup de un marcador
// ============================================================================
// Se construye al abrir el popup: el estado del botón de favorito se consulta
// en ese momento.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, on_click, set_text_content, toggle_class, ElementBuilder};
use crate::maps::traits::marker_class;
use crate::models::CompanyRecord;
use crate::state::AppState;
use crate::utils::i18n::t;
use crate::viewmodels::favorites_viewmodel::{check_favorite_action, toggle_favorite_action};
use crate::viewmodels::similarity_viewmodel::show_similar_action;
use crate::viewmodels::PopupContent;

fn favorite_label(is_favorite: bool, lang: &str) -> String {
    if is_favorite {
        format!("★ {}", t("in_favorites", lang))
    } else {
        format!("☆ {}", t("add_to_favorites", lang))
    }
}

/// Renderizar popup de una empresa
pub fn render_popup(state: &AppState, record: &CompanyRecord) -> Result<Element, JsValue> {
    let lang = state.lang();
    let content = PopupContent::from_record(record);

    let popup = ElementBuilder::new("div")?.class("company-popup").build();

    let title = ElementBuilder::new("h4")?
        .class("popup-title")
        .text(&content.title)
        .build();
    append_child(&popup, &title)?;

    let status = ElementBuilder::new("span")?
        .class(&format!("popup-status {}", marker_class(content.status)))
        .text(&format!("{} · {}", t(content.status.label_key(), &lang), content.status_text))
        .build();
    append_child(&popup, &status)?;

    let table = ElementBuilder::new("dl")?.class("popup-fields").build();
    for row in &content.rows {
        let dt = ElementBuilder::new("dt")?.text(&t(row.label_key, &lang)).build();
        let dd = ElementBuilder::new("dd")?.text(&row.value).build();
        append_child(&table, &dt)?;
        append_child(&table, &dd)?;
    }
    append_child(&popup, &table)?;

    let actions = ElementBuilder::new("div")?.class("popup-actions").build();

    // Favorito
    let favorite_btn = ElementBuilder::new("button")?
        .class("btn-favorite")
        .text(&favorite_label(false, &lang))
        .build();
    let set_favorite = {
        let btn = favorite_btn.clone();
        let lang = lang.clone();
        move |is_favorite: bool| {
            set_text_content(&btn, &favorite_label(is_favorite, &lang));
            if let Err(e) = toggle_class(&btn, "active", is_favorite) {
                log::warn!("⚠️ [POPUP] {:?}", e);
            }
        }
    };
    check_favorite_action(state, content.company_id, set_favorite.clone());
    {
        let state = state.clone();
        let company_id = content.company_id;
        on_click(&favorite_btn, move |_e| {
            toggle_favorite_action(&state, company_id, set_favorite.clone());
        })?;
    }
    append_child(&actions, &favorite_btn)?;

    // Similares
    if content.can_search_similar {
        let similar_btn = ElementBuilder::new("button")?
            .class("btn-similar")
            .text(&format!("🔍 {}", t("find_similar", &lang)))
            .build();
        let state = state.clone();
        let record = record.clone();
        on_click(&similar_btn, move |_e| show_similar_action(&state, &record))?;
        append_child(&actions, &similar_btn)?;
    }

    append_child(&popup, &actions)?;
    Ok(popup)
}
