// ============================================================================
// SESSION VIEWMODEL - LÓGICA DE SESIÓN
// ============================================================================
// Login / registro / validación / logout sobre AuthApi + SessionStore.
// Devuelve el nuevo AuthStatus; las vistas actualizan el estado.
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use crate::models::RegisterRequest;
use crate::services::{ApiClient, ApiError, AuthApi, LocalSessionStore, SessionStore};
use crate::state::{AppState, AuthModal, AuthStatus, IncrementalUpdate, NotificationKind, UpdateType};
use crate::utils::i18n::t;
use crate::utils::validation::{validate_registration, RegistrationError};

/// Error de login/registro para mostrar al usuario
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// Validación local del formulario
    Invalid(RegistrationError),
    MissingCredentials,
    Api(ApiError),
}

impl From<ApiError> for SessionError {
    fn from(e: ApiError) -> Self {
        SessionError::Api(e)
    }
}

impl SessionError {
    /// Texto localizado (mensaje del backend tal cual si lo hay)
    pub fn message(&self, lang: &str) -> String {
        match self {
            SessionError::Invalid(e) => t(e.i18n_key(), lang),
            SessionError::MissingCredentials => t("fill_all_fields", lang),
            SessionError::Api(e) => match e.backend_message() {
                Some(message) => message.to_string(),
                None => t(e.i18n_key(), lang),
            },
        }
    }
}

/// ViewModel de sesión - SOLO lógica de negocio
pub struct SessionViewModel<A: AuthApi = ApiClient, S: SessionStore = LocalSessionStore> {
    api: A,
    store: S,
}

impl SessionViewModel<ApiClient, LocalSessionStore> {
    pub fn new() -> Self {
        Self {
            api: ApiClient::new(),
            store: LocalSessionStore,
        }
    }
}

impl<A: AuthApi, S: SessionStore> SessionViewModel<A, S> {
    pub fn with_parts(api: A, store: S) -> Self {
        Self { api, store }
    }

    /// Estado inicial a partir de localStorage (sin red)
    pub fn restore(&self) -> AuthStatus {
        match self.store.load_token() {
            Some(token) => {
                log::info!("💾 [AUTH] Token encontrado en storage, pendiente de validar");
                AuthStatus::Pending {
                    token,
                    user: self.store.load_user(),
                }
            }
            None => AuthStatus::Anonymous,
        }
    }

    /// Validar el token guardado. Cualquier fallo degrada a Anonymous en silencio.
    /// El storage solo se toca si sigue guardando ese mismo token.
    pub async fn validate_stored(&self, token: &str) -> AuthStatus {
        let result = self.api.validate(token).await;
        // Un login/logout pudo reemplazar la sesión mientras se validaba
        let still_stored = self.store.load_token().as_deref() == Some(token);
        match result {
            Ok(response) if response.valid => match response.user {
                Some(user) => {
                    if still_stored {
                        if let Err(e) = self.store.save_user(&user) {
                            log::warn!("⚠️ [AUTH] {}", e);
                        }
                    }
                    log::info!("✅ [AUTH] Sesión válida para {}", user.email);
                    AuthStatus::Authenticated {
                        token: token.to_string(),
                        user,
                    }
                }
                None => match self.store.load_user().filter(|_| still_stored) {
                    Some(user) => AuthStatus::Authenticated {
                        token: token.to_string(),
                        user,
                    },
                    None => self.demote(still_stored, "respuesta sin usuario"),
                },
            },
            Ok(_) => self.demote(still_stored, "token inválido"),
            Err(e) => self.demote(still_stored, &e.to_string()),
        }
    }

    fn demote(&self, still_stored: bool, reason: &str) -> AuthStatus {
        log::info!("🔓 [AUTH] Sesión descartada: {}", reason);
        if still_stored {
            self.store.clear();
        }
        AuthStatus::Anonymous
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthStatus, SessionError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(SessionError::MissingCredentials);
        }
        log::info!("🔐 [AUTH] Login de {}", email);

        let response = self.api.login(email, password).await?;
        if !response.success {
            let message = response.message.unwrap_or_default();
            return Err(SessionError::Api(ApiError::Rejected(message)));
        }
        let (Some(token), Some(user)) = (response.session_token.filter(|t| !t.is_empty()), response.user) else {
            return Err(SessionError::Api(ApiError::Parse("login response without session".into())));
        };

        if let Err(e) = self.store.save(&token, &user) {
            log::error!("❌ [AUTH] Error guardando sesión: {}", e);
        }
        Ok(AuthStatus::Authenticated { token, user })
    }

    /// Validación local primero; el backend solo recibe formularios válidos
    pub async fn register(&self, form: &RegisterRequest) -> Result<Option<String>, SessionError> {
        validate_registration(form).map_err(SessionError::Invalid)?;
        log::info!("📝 [AUTH] Registro de {}", form.email);

        let response = self.api.register(form).await?;
        if !response.success {
            let message = response.message.unwrap_or_default();
            return Err(SessionError::Api(ApiError::Rejected(message)));
        }
        Ok(response.message)
    }

    /// Logout best-effort: la sesión local se borra aunque falle la red
    pub async fn logout(&self, token: Option<&str>) -> AuthStatus {
        if let Some(token) = token {
            if let Err(e) = self.api.logout(token).await {
                log::warn!("⚠️ [AUTH] Logout en backend falló: {}", e);
            }
        }
        self.store.clear();
        AuthStatus::Anonymous
    }
}

// ============================================================================
// ORQUESTACIÓN (navegador)
// ============================================================================

fn apply_status(state: &AppState, status: AuthStatus) {
    state.auth.set_status(status);
    auth_changed(state);
}

fn auth_changed(state: &AppState) {
    crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Header));
    crate::viewmodels::favorites_viewmodel::refresh_favorites(state);
}

/// Arranque: Pending con token guardado, validación en segundo plano
pub fn restore_session(state: &AppState) {
    let vm = SessionViewModel::new();
    let status = vm.restore();
    let token = status.token().map(str::to_string);
    state.auth.set_status(status);

    let Some(token) = token else {
        return;
    };
    let state = state.clone();
    spawn_local(async move {
        let vm = SessionViewModel::new();
        let status = vm.validate_stored(&token).await;
        if state.auth.settle_pending(&token, status) {
            auth_changed(&state);
        } else {
            log::info!("⏭️ [AUTH] Validación obsoleta descartada: la sesión cambió entretanto");
        }
    });
}

pub fn login_action(state: &AppState, email: String, password: String) {
    let state = state.clone();
    spawn_local(async move {
        let vm = SessionViewModel::new();
        let lang = state.lang();
        match vm.login(&email, &password).await {
            Ok(status) => {
                state.set_auth_modal(AuthModal::Closed);
                apply_status(&state, status);
                state.notify(NotificationKind::Success, t("login_success", &lang));
            }
            Err(e) => {
                log::error!("❌ [AUTH] Login fallido: {:?}", e);
                state.notify(NotificationKind::Error, e.message(&lang));
            }
        }
    });
}

pub fn register_action(state: &AppState, form: RegisterRequest) {
    let state = state.clone();
    spawn_local(async move {
        let vm = SessionViewModel::new();
        let lang = state.lang();
        match vm.register(&form).await {
            Ok(_) => {
                state.set_auth_modal(AuthModal::Closed);
                state.notify(NotificationKind::Success, t("register_success", &lang));
                // Mostrar login pasados 1.5 s
                let state_in = state.clone();
                state.modal_timer.trigger(move || {
                    *state_in.auth_modal.borrow_mut() = AuthModal::Login;
                    crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Modal));
                });
            }
            Err(e) => {
                log::error!("❌ [AUTH] Registro fallido: {:?}", e);
                state.notify(NotificationKind::Error, e.message(&lang));
            }
        }
    });
}

pub fn logout_action(state: &AppState) {
    let token = state.auth.get_token();
    let state = state.clone();
    spawn_local(async move {
        let vm = SessionViewModel::new();
        let status = vm.logout(token.as_deref()).await;
        state.set_show_favorites(false);
        apply_status(&state, status);
        let lang = state.lang();
        state.notify(NotificationKind::Success, t("logout_success", &lang));
    });
}
