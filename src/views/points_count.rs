use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;
use crate::models::StrategyKind;
use crate::state::{AppState, PointsTag};
use crate::utils::i18n::t;

/// Etiqueta "Точек: N (…)" con la estrategia activa o el modo similares
pub fn render_points_count(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.lang();
    let label = state.loader.borrow().label;

    let text = match label {
        None => format!("{}: —", t("points", &lang)),
        Some(label) => {
            let tag = match label.tag {
                PointsTag::Strategy(StrategyKind::AllInBounds) => t("strategy_all_in_bounds", &lang),
                PointsTag::Strategy(StrategyKind::Top(limit)) => {
                    t("strategy_top", &lang).replace("{limit}", &limit.to_string())
                }
                PointsTag::Similar => t("similar_tag", &lang),
            };
            format!("{}: {} ({})", t("points", &lang), label.count, tag)
        }
    };

    let class = match label.map(|l| l.tag) {
        Some(PointsTag::Similar) => "points-count similar",
        _ => "points-count",
    };
    Ok(ElementBuilder::new("div")?.class(class).text(&text).build())
}
