// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use gloo_timers::callback::Timeout;
use crate::config::CONFIG;
use crate::maps::{MapView, MarkerLayer};
use crate::models::{CompanyFilters, FavoriteEntry, FilterOptions};
use crate::services::ApiError;
use crate::state::{AuthState, LoaderState};
use crate::utils::constants::LOGIN_AFTER_REGISTER_MS;
use crate::utils::debounce::Debouncer;
use crate::utils::i18n::t;
use crate::utils::storage;

/// Tipo de actualización del DOM
#[derive(Clone, Debug)]
pub enum UpdateType {
    /// Actualización incremental (solo una sección)
    Incremental(IncrementalUpdate),
    /// Re-render de todas las secciones salvo el mapa (p.ej. cambio de idioma)
    FullRender,
}

/// Secciones actualizables por separado
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncrementalUpdate {
    /// Cabecera (login/registro o usuario + logout, contador de favoritos)
    Header,
    /// Etiqueta "N puntos"
    PointsCount,
    /// Selects de filtros (opciones cargadas o filtros limpiados)
    FilterOptions,
    /// Abrir/cerrar el panel de filtros (solo clase CSS)
    FiltersPanel,
    /// Panel de favoritos
    FavoritesPanel,
    /// Modal de login/registro
    Modal,
    /// Notificaciones transitorias
    Notifications,
}

/// Modal de autenticación visible
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthModal {
    Closed,
    Login,
    Register,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u32,
    pub kind: NotificationKind,
    pub text: String,
}

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub loader: Rc<RefCell<LoaderState>>,
    pub auth: AuthState,

    // Filtros
    pub filters: Rc<RefCell<CompanyFilters>>,
    pub filter_options: Rc<RefCell<FilterOptions>>,
    pub show_filters: Rc<RefCell<bool>>,

    // Favoritos
    pub favorites: Rc<RefCell<Vec<FavoriteEntry>>>,
    pub show_favorites: Rc<RefCell<bool>>,

    // Mapa (se crea después del primer render, cuando #map ya está en el DOM)
    pub map: Rc<RefCell<Option<MapView>>>,
    pub markers: Rc<RefCell<Option<Box<dyn MarkerLayer>>>>,

    // Modal de autenticación
    pub auth_modal: Rc<RefCell<AuthModal>>,

    // Notificaciones
    pub notifications: Rc<RefCell<Vec<Notification>>>,
    next_notification_id: Rc<Cell<u32>>,

    pub language: Rc<RefCell<String>>,

    // Un slot de debounce por fuente
    pub search_debounce: Rc<Debouncer>,
    pub viewport_debounce: Rc<Debouncer>,
    // Login tras registro correcto
    pub modal_timer: Rc<Debouncer>,
}

impl AppState {
    /// Crear nuevo estado de aplicación
    pub fn new() -> Self {
        let language = storage::load_language().unwrap_or_else(|| CONFIG.default_language.clone());
        let debounce_ms = CONFIG.ui_config.debounce_ms;

        Self {
            loader: Rc::new(RefCell::new(LoaderState::new())),
            auth: AuthState::new(),

            filters: Rc::new(RefCell::new(CompanyFilters::default())),
            filter_options: Rc::new(RefCell::new(FilterOptions::default())),
            show_filters: Rc::new(RefCell::new(false)),

            favorites: Rc::new(RefCell::new(Vec::new())),
            show_favorites: Rc::new(RefCell::new(false)),

            map: Rc::new(RefCell::new(None)),
            markers: Rc::new(RefCell::new(None)),

            auth_modal: Rc::new(RefCell::new(AuthModal::Closed)),

            notifications: Rc::new(RefCell::new(Vec::new())),
            next_notification_id: Rc::new(Cell::new(1)),

            language: Rc::new(RefCell::new(language)),

            search_debounce: Rc::new(Debouncer::new(debounce_ms)),
            viewport_debounce: Rc::new(Debouncer::new(debounce_ms)),
            modal_timer: Rc::new(Debouncer::new(LOGIN_AFTER_REGISTER_MS)),
        }
    }

    pub fn lang(&self) -> String {
        self.language.borrow().clone()
    }

    /// Establecer language, guardarlo y re-renderizar todos los textos
    pub fn set_language(&self, lang: String) {
        storage::save_language(&lang);
        *self.language.borrow_mut() = lang;
        crate::rerender_app_with_type(UpdateType::FullRender);
    }

    pub fn set_show_filters(&self, show: bool) {
        if *self.show_filters.borrow() == show {
            return;
        }
        *self.show_filters.borrow_mut() = show;
        crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::FiltersPanel));
    }

    pub fn set_show_favorites(&self, show: bool) {
        *self.show_favorites.borrow_mut() = show;
        crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::FavoritesPanel));
    }

    pub fn set_favorites(&self, favorites: Vec<FavoriteEntry>) {
        *self.favorites.borrow_mut() = favorites;
        crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::FavoritesPanel));
        crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Header));
    }

    pub fn favorites_count(&self) -> usize {
        self.favorites.borrow().len()
    }

    /// Abrir/cerrar modal; cualquier cambio cancela el login diferido tras registro
    pub fn set_auth_modal(&self, modal: AuthModal) {
        self.modal_timer.cancel();
        *self.auth_modal.borrow_mut() = modal;
        crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Modal));
    }

    /// Mostrar notificación transitoria (se cierra sola)
    pub fn notify(&self, kind: NotificationKind, text: String) {
        let id = self.next_notification_id.get();
        self.next_notification_id.set(id.wrapping_add(1));
        self.notifications.borrow_mut().push(Notification { id, kind, text });
        crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Notifications));

        let notifications = self.notifications.clone();
        Timeout::new(CONFIG.ui_config.notification_ms, move || {
            notifications.borrow_mut().retain(|n| n.id != id);
            crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Notifications));
        })
        .forget();
    }

    pub fn dismiss_notification(&self, id: u32) {
        self.notifications.borrow_mut().retain(|n| n.id != id);
        crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Notifications));
    }

    /// Notificación de error para un fallo de la capa de servicios
    pub fn notify_api_error(&self, error: &ApiError) {
        let text = match error.backend_message() {
            Some(message) => message.to_string(),
            None => t(error.i18n_key(), &self.lang()),
        };
        self.notify(NotificationKind::Error, text);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
