// ============================================================================
// AUTH MODAL VIEW - Formularios de login y registro
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;
use crate::dom::{
    append_child, input_checked, input_value, on_click, on_input, on_submit, set_text_content, toggle_class,
    ElementBuilder,
};
use crate::models::RegisterRequest;
use crate::state::{AppState, AuthModal};
use crate::utils::i18n::t;
use crate::utils::validation::check_password_strength;
use crate::viewmodels::session_viewmodel::{login_action, register_action};

/// Renderizar modal según el estado (vacío si está cerrado)
pub fn render_auth_modal(state: &AppState) -> Result<Element, JsValue> {
    let modal = *state.auth_modal.borrow();
    let body = match modal {
        AuthModal::Closed => return ElementBuilder::new("div").map(|b| b.class("modal-closed").build()),
        AuthModal::Login => render_login_form(state)?,
        AuthModal::Register => render_register_form(state)?,
    };

    let overlay = ElementBuilder::new("div")?.class("modal-overlay").build();
    // Click en el fondo (no en el diálogo) cierra
    {
        let state = state.clone();
        let overlay_in = overlay.clone();
        on_click(&overlay, move |e| {
            let on_backdrop = e
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .map(|el| el == overlay_in)
                .unwrap_or(false);
            if on_backdrop {
                state.set_auth_modal(AuthModal::Closed);
            }
        })?;
    }

    let dialog = ElementBuilder::new("div")?
        .class("modal-dialog")
        .attr("role", "dialog")?
        .build();
    let close_btn = ElementBuilder::new("button")?.class("btn-close").text("✕").build();
    {
        let state = state.clone();
        on_click(&close_btn, move |_e| state.set_auth_modal(AuthModal::Closed))?;
    }
    append_child(&dialog, &close_btn)?;
    append_child(&dialog, &body)?;
    append_child(&overlay, &dialog)?;
    Ok(overlay)
}

/// Campo etiquetado; devuelve (grupo, input)
fn field(label: &str, input_type: &str, name: &str, required: bool) -> Result<(Element, Element), JsValue> {
    let group = ElementBuilder::new("label")?.class("form-group").build();
    let caption = ElementBuilder::new("span")?.text(label).build();
    let mut input = ElementBuilder::new("input")?
        .attr("type", input_type)?
        .attr("name", name)?;
    if required {
        input = input.attr("required", "")?;
    }
    let input = input.build();
    append_child(&group, &caption)?;
    append_child(&group, &input)?;
    Ok((group, input))
}

fn checkbox(label: &str, name: &str) -> Result<(Element, Element), JsValue> {
    let group = ElementBuilder::new("label")?.class("form-check").build();
    let input = ElementBuilder::new("input")?
        .attr("type", "checkbox")?
        .attr("name", name)?
        .build();
    let caption = ElementBuilder::new("span")?.text(label).build();
    append_child(&group, &input)?;
    append_child(&group, &caption)?;
    Ok((group, input))
}

fn switch_link(state: &AppState, text: &str, target: AuthModal) -> Result<Element, JsValue> {
    let link = ElementBuilder::new("button")?
        .class("btn-link")
        .attr("type", "button")?
        .text(text)
        .build();
    let state = state.clone();
    on_click(&link, move |_e| state.set_auth_modal(target))?;
    Ok(link)
}

fn render_login_form(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.lang();
    let form = ElementBuilder::new("form")?.class("auth-form").build();
    let title = ElementBuilder::new("h2")?.text(&t("login_title", &lang)).build();
    append_child(&form, &title)?;

    let (email_group, email) = field(&t("email", &lang), "email", "email", true)?;
    let (password_group, password) = field(&t("password", &lang), "password", "password", true)?;
    append_child(&form, &email_group)?;
    append_child(&form, &password_group)?;

    let submit = ElementBuilder::new("button")?
        .class("btn-primary")
        .attr("type", "submit")?
        .text(&t("login", &lang))
        .build();
    append_child(&form, &submit)?;
    append_child(&form, &switch_link(state, &t("no_account", &lang), AuthModal::Register)?)?;

    {
        let state = state.clone();
        on_submit(&form, move || {
            login_action(&state, input_value(&email), input_value(&password));
        })?;
    }
    Ok(form)
}

fn render_register_form(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.lang();
    let form = ElementBuilder::new("form")?.class("auth-form").build();
    let title = ElementBuilder::new("h2")?.text(&t("register_title", &lang)).build();
    append_child(&form, &title)?;

    let (email_group, email) = field(&t("email", &lang), "email", "email", true)?;
    let (password_group, password) = field(&t("password", &lang), "password", "password", true)?;
    let strength_hint = ElementBuilder::new("small")?
        .class("form-hint")
        .text(&t("password_requirements", &lang))
        .build();
    append_child(&password_group, &strength_hint)?;
    let (confirm_group, confirm) = field(&t("password_confirm", &lang), "password", "password_confirm", true)?;
    let match_hint = ElementBuilder::new("small")?.class("form-hint").build();
    append_child(&confirm_group, &match_hint)?;
    let (first_group, first_name) = field(&t("first_name", &lang), "text", "first_name", false)?;
    let (last_group, last_name) = field(&t("last_name", &lang), "text", "last_name", false)?;
    let (phone_group, phone) = field(&t("phone", &lang), "tel", "phone", false)?;
    let (privacy_group, privacy) = checkbox(&t("privacy_policy", &lang), "privacy_policy_accepted")?;
    let (consent_group, consent) = checkbox(&t("data_processing", &lang), "data_processing_consent")?;

    for group in [
        &email_group,
        &password_group,
        &confirm_group,
        &first_group,
        &last_group,
        &phone_group,
        &privacy_group,
        &consent_group,
    ] {
        append_child(&form, group)?;
    }

    // Pistas en vivo: fortaleza y coincidencia
    let update_match = {
        let password = password.clone();
        let confirm = confirm.clone();
        let hint = match_hint.clone();
        let lang = lang.clone();
        move || {
            let confirm_value = input_value(&confirm);
            let mismatch = !confirm_value.is_empty() && confirm_value != input_value(&password);
            let text = if mismatch { t("password_mismatch", &lang) } else { String::new() };
            set_text_content(&hint, &text);
            let _ = toggle_class(&hint, "invalid", mismatch);
        }
    };
    {
        let password_in = password.clone();
        let hint = strength_hint.clone();
        let lang = lang.clone();
        let update_match = update_match.clone();
        on_input(&password, move |_e| {
            let value = input_value(&password_in);
            let (text, valid) = match check_password_strength(&value) {
                Ok(()) => (t("password_ok", &lang), true),
                Err(issue) => (t(issue.i18n_key(), &lang), false),
            };
            set_text_content(&hint, &text);
            let _ = toggle_class(&hint, "valid", valid);
            let _ = toggle_class(&hint, "invalid", !valid);
            update_match();
        })?;
    }
    on_input(&confirm, move |_e| update_match())?;

    let submit = ElementBuilder::new("button")?
        .class("btn-primary")
        .attr("type", "submit")?
        .text(&t("register", &lang))
        .build();
    append_child(&form, &submit)?;
    append_child(&form, &switch_link(state, &t("have_account", &lang), AuthModal::Login)?)?;

    {
        let state = state.clone();
        on_submit(&form, move || {
            let request = RegisterRequest {
                email: input_value(&email).trim().to_string(),
                password: input_value(&password),
                password_confirm: input_value(&confirm),
                first_name: input_value(&first_name).trim().to_string(),
                last_name: input_value(&last_name).trim().to_string(),
                phone: input_value(&phone).trim().to_string(),
                privacy_policy_accepted: input_checked(&privacy),
                data_processing_consent: input_checked(&consent),
            };
            register_action(&state, request);
        })?;
    }
    Ok(form)
}
