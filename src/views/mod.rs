pub mod app;
pub mod header;
pub mod filters_panel;
pub mod points_count;
pub mod favorites_panel;
pub mod notification;
pub mod popup;
pub mod auth_modal;

pub use app::render_app;
pub use header::render_header;
pub use filters_panel::render_filters_panel;
pub use points_count::render_points_count;
pub use favorites_panel::render_favorites_panel;
pub use notification::render_notifications;
pub use popup::render_popup;
pub use auth_modal::render_auth_modal;
