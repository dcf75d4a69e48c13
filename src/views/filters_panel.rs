// ============================================================================
// FILTERS PANEL VIEW - Estado, área, distrito, tipo de licencia y búsqueda
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{
    append_child, input_value, on_change, on_click, on_input, on_mouse, select_value, set_input_value,
    set_select_value, ElementBuilder,
};
use crate::models::{CompanyFilters, StatusColor};
use crate::state::AppState;
use crate::utils::i18n::t;
use crate::viewmodels::loader_viewmodel::{clear_filters_action, request_load};
use crate::viewmodels::LoadTrigger;

pub const FILTERS_PANEL_ID: &str = "filters-panel";

/// Campo de filtro editable desde un <select>
#[derive(Clone, Copy)]
enum SelectField {
    Status,
    AdmArea,
    District,
    LicenseType,
}

impl SelectField {
    fn apply(&self, filters: &mut CompanyFilters, raw: &str) {
        let value = CompanyFilters::normalize(raw);
        match self {
            SelectField::Status => filters.status_color = value.as_deref().and_then(StatusColor::from_code),
            SelectField::AdmArea => filters.adm_area = value,
            SelectField::District => filters.district = value,
            SelectField::LicenseType => filters.license_type = value,
        }
    }

    fn current(&self, filters: &CompanyFilters) -> String {
        match self {
            SelectField::Status => filters.status_color.map(|s| s.as_code().to_string()),
            SelectField::AdmArea => filters.adm_area.clone(),
            SelectField::District => filters.district.clone(),
            SelectField::LicenseType => filters.license_type.clone(),
        }
        .unwrap_or_default()
    }
}

/// Renderizar panel de filtros (botón disparador + panel desplegable)
pub fn render_filters_panel(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.lang();
    let wrapper = ElementBuilder::new("div")?.class("filters-wrapper").build();

    // Disparador: abre con hover o click
    let trigger = ElementBuilder::new("button")?
        .class("btn-filters")
        .text(&format!("⚙ {}", t("filters", &lang)))
        .build();
    {
        let state = state.clone();
        on_mouse(&trigger, "mouseenter", move |_e| state.set_show_filters(true))?;
    }
    {
        let state = state.clone();
        on_click(&trigger, move |_e| {
            let show = !*state.show_filters.borrow();
            state.set_show_filters(show);
        })?;
    }
    append_child(&wrapper, &trigger)?;

    let panel_class = if *state.show_filters.borrow() { "filters-panel open" } else { "filters-panel" };
    let panel = ElementBuilder::new("div")?
        .id(FILTERS_PANEL_ID)?
        .class(panel_class)
        .build();

    let filters = state.filters.borrow().clone();
    let options = state.filter_options.borrow().clone();

    // Estado de la licencia
    let status_options: Vec<(String, String)> = StatusColor::ALL
        .iter()
        .map(|s| (s.as_code().to_string(), t(s.label_key(), &lang)))
        .collect();
    append_child(&panel, &render_select(state, SelectField::Status, &t("status", &lang), &status_options, &filters)?)?;

    let areas: Vec<(String, String)> = options.adm_areas.iter().map(|a| (a.clone(), a.clone())).collect();
    append_child(&panel, &render_select(state, SelectField::AdmArea, &t("adm_area", &lang), &areas, &filters)?)?;

    let districts: Vec<(String, String)> = options.districts.iter().map(|d| (d.clone(), d.clone())).collect();
    append_child(&panel, &render_select(state, SelectField::District, &t("district", &lang), &districts, &filters)?)?;

    let types: Vec<(String, String)> = options
        .license_types
        .iter()
        .map(|lt| (lt.code.clone(), lt.option_label()))
        .collect();
    append_child(&panel, &render_select(state, SelectField::LicenseType, &t("license_type", &lang), &types, &filters)?)?;

    // Búsqueda con debounce
    let search_group = ElementBuilder::new("label")?.class("filter-group").build();
    let search_label = ElementBuilder::new("span")?.text(&t("search", &lang)).build();
    let search = ElementBuilder::new("input")?
        .class("filter-search")
        .attr("type", "search")?
        .attr("placeholder", &t("search_placeholder", &lang))?
        .build();
    set_input_value(&search, filters.search.as_deref().unwrap_or(""));
    {
        let state = state.clone();
        let input = search.clone();
        on_input(&search, move |_e| {
            state.filters.borrow_mut().search = CompanyFilters::normalize(&input_value(&input));
            let state_in = state.clone();
            state.search_debounce.trigger(move || request_load(&state_in, LoadTrigger::Search));
        })?;
    }
    append_child(&search_group, &search_label)?;
    append_child(&search_group, &search)?;
    append_child(&panel, &search_group)?;

    // Acciones
    let actions = ElementBuilder::new("div")?.class("filter-actions").build();
    let load_btn = ElementBuilder::new("button")?
        .class("btn-load")
        .text(&t("load", &lang))
        .build();
    {
        let state = state.clone();
        on_click(&load_btn, move |_e| {
            state.search_debounce.cancel();
            request_load(&state, LoadTrigger::Explicit);
        })?;
    }
    let clear_btn = ElementBuilder::new("button")?
        .class("btn-clear")
        .text(&t("clear_filters", &lang))
        .build();
    {
        let state = state.clone();
        on_click(&clear_btn, move |_e| clear_filters_action(&state))?;
    }
    append_child(&actions, &load_btn)?;
    append_child(&actions, &clear_btn)?;
    append_child(&panel, &actions)?;

    append_child(&wrapper, &panel)?;
    Ok(wrapper)
}

/// <select> con opción vacía "Todos" + opciones (valor, texto)
fn render_select(
    state: &AppState,
    field: SelectField,
    label: &str,
    options: &[(String, String)],
    filters: &CompanyFilters,
) -> Result<Element, JsValue> {
    let lang = state.lang();
    let group = ElementBuilder::new("label")?.class("filter-group").build();
    let caption = ElementBuilder::new("span")?.text(label).build();
    let select = ElementBuilder::new("select")?.class("filter-select").build();

    let all = ElementBuilder::new("option")?
        .attr("value", "")?
        .text(&t("all", &lang))
        .build();
    append_child(&select, &all)?;
    for (value, text) in options {
        let option = ElementBuilder::new("option")?
            .attr("value", value)?
            .text(text)
            .build();
        append_child(&select, &option)?;
    }
    set_select_value(&select, &field.current(filters));

    {
        let state = state.clone();
        let select_in = select.clone();
        on_change(&select, move |_e| {
            field.apply(&mut state.filters.borrow_mut(), &select_value(&select_in));
            request_load(&state, LoadTrigger::FilterChange);
        })?;
    }

    append_child(&group, &caption)?;
    append_child(&group, &select)?;
    Ok(group)
}
