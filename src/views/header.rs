// ============================================================================
// HEADER VIEW - Título, idioma, favoritos y sesión
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, on_change, on_click, select_value, ElementBuilder};
use crate::state::{AppState, AuthModal, NotificationKind};
use crate::utils::i18n::{t, SUPPORTED_LANGUAGES};
use crate::viewmodels::session_viewmodel::logout_action;

/// Renderizar cabecera
pub fn render_header(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.lang();
    let header = ElementBuilder::new("div")?.class("header-content").build();

    let title = ElementBuilder::new("h1")?
        .class("app-title")
        .text(&t("app_title", &lang))
        .build();
    append_child(&header, &title)?;

    let actions = ElementBuilder::new("div")?.class("header-actions").build();

    // Selector de idioma
    let lang_select = ElementBuilder::new("select")?.class("lang-select").build();
    for code in SUPPORTED_LANGUAGES {
        let option = ElementBuilder::new("option")?
            .attr("value", code)?
            .text(code)
            .build();
        append_child(&lang_select, &option)?;
    }
    crate::dom::set_select_value(&lang_select, &lang);
    {
        let state = state.clone();
        let select = lang_select.clone();
        on_change(&lang_select, move |_e| {
            let value = select_value(&select);
            log::info!("🌐 [HEADER] Idioma: {}", value);
            state.set_language(value);
        })?;
    }
    append_child(&actions, &lang_select)?;

    // Favoritos + contador
    let favorites_btn = ElementBuilder::new("button")?
        .class("btn-favorites")
        .text(&format!("★ {} ({})", t("favorites", &lang), state.favorites_count()))
        .build();
    {
        let state = state.clone();
        on_click(&favorites_btn, move |_e| {
            if state.auth.get_token().is_none() {
                state.notify(NotificationKind::Info, t("login_required", &state.lang()));
                state.set_auth_modal(AuthModal::Login);
                return;
            }
            let show = !*state.show_favorites.borrow();
            state.set_show_favorites(show);
        })?;
    }
    append_child(&actions, &favorites_btn)?;

    match state.auth.get_user() {
        Some(user) => {
            let user_info = ElementBuilder::new("div")?.class("user-info").build();
            let name = ElementBuilder::new("span")?
                .class("user-name")
                .text(user.display_name())
                .build();
            let logout_btn = ElementBuilder::new("button")?
                .class("btn-logout")
                .text(&t("logout", &lang))
                .build();
            {
                let state = state.clone();
                on_click(&logout_btn, move |_e| {
                    log::info!("👋 [AUTH] Logout iniciado");
                    logout_action(&state);
                })?;
            }
            append_child(&user_info, &name)?;
            append_child(&user_info, &logout_btn)?;
            append_child(&actions, &user_info)?;
        }
        None => {
            let auth_buttons = ElementBuilder::new("div")?.class("auth-buttons").build();
            for (key, modal) in [("login", AuthModal::Login), ("register", AuthModal::Register)] {
                let btn = ElementBuilder::new("button")?
                    .class(&format!("btn-{}", key))
                    .text(&t(key, &lang))
                    .build();
                let state = state.clone();
                on_click(&btn, move |_e| state.set_auth_modal(modal))?;
                append_child(&auth_buttons, &btn)?;
            }
            append_child(&actions, &auth_buttons)?;
        }
    }

    append_child(&header, &actions)?;
    Ok(header)
}
