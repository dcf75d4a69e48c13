use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, on_click, ElementBuilder};
use crate::state::{AppState, NotificationKind};

/// Pila de notificaciones; cada una se cierra sola o con ✕
pub fn render_notifications(state: &AppState) -> Result<Element, JsValue> {
    let stack = ElementBuilder::new("div")?.class("notification-stack").build();

    for notification in state.notifications.borrow().iter() {
        let class = match notification.kind {
            NotificationKind::Info => "notification info",
            NotificationKind::Success => "notification success",
            NotificationKind::Error => "notification error",
        };
        let item = ElementBuilder::new("div")?
            .class(class)
            .attr("role", "alert")?
            .build();
        let text = ElementBuilder::new("span")?.text(&notification.text).build();
        let close = ElementBuilder::new("button")?.class("btn-close").text("✕").build();
        {
            let state = state.clone();
            let id = notification.id;
            on_click(&close, move |_e| state.dismiss_notification(id))?;
        }
        append_child(&item, &text)?;
        append_child(&item, &close)?;
        append_child(&stack, &item)?;
    }

    Ok(stack)
}
