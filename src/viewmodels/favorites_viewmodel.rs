// ============================================================================
// FAVORITES VIEWMODEL - Alternar favoritos + lista del usuario
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use crate::models::FavoriteEntry;
use crate::services::{ApiClient, ApiError, FavoritesApi};
use crate::state::{AppState, NotificationKind};
use crate::utils::i18n::t;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

impl ToggleOutcome {
    pub fn is_favorite(&self) -> bool {
        matches!(self, ToggleOutcome::Added)
    }
}

/// ViewModel de favoritos - SOLO lógica de negocio
pub struct FavoritesViewModel<A: FavoritesApi = ApiClient> {
    api: A,
}

impl FavoritesViewModel<ApiClient> {
    pub fn new() -> Self {
        Self { api: ApiClient::new() }
    }
}

impl<A: FavoritesApi> FavoritesViewModel<A> {
    pub fn with_api(api: A) -> Self {
        Self { api }
    }

    fn require_token(token: Option<&str>) -> Result<&str, ApiError> {
        token.filter(|t| !t.is_empty()).ok_or(ApiError::Unauthenticated)
    }

    pub async fn is_favorite(&self, token: Option<&str>, company_id: i64) -> Result<bool, ApiError> {
        let token = Self::require_token(token)?;
        self.api.check_favorite(token, company_id).await
    }

    /// check → add o remove. Sin token no se hace ninguna llamada.
    pub async fn toggle(&self, token: Option<&str>, company_id: i64) -> Result<ToggleOutcome, ApiError> {
        let token = Self::require_token(token)?;
        if self.api.check_favorite(token, company_id).await? {
            self.api.remove_favorite(token, company_id).await?;
            log::info!("💔 [FAVORITES] {} eliminado", company_id);
            Ok(ToggleOutcome::Removed)
        } else {
            self.api.add_favorite(token, company_id).await?;
            log::info!("⭐ [FAVORITES] {} añadido", company_id);
            Ok(ToggleOutcome::Added)
        }
    }

    pub async fn list(&self, token: Option<&str>) -> Result<Vec<FavoriteEntry>, ApiError> {
        let token = Self::require_token(token)?;
        self.api.list_favorites(token).await
    }
}

// ============================================================================
// ORQUESTACIÓN (navegador)
// ============================================================================

/// Recargar la lista (y con ella el contador de la cabecera)
pub fn refresh_favorites(state: &AppState) {
    let Some(token) = state.auth.get_token() else {
        state.set_favorites(Vec::new());
        return;
    };
    let state = state.clone();
    spawn_local(async move {
        let vm = FavoritesViewModel::new();
        match vm.list(Some(&token)).await {
            Ok(favorites) => {
                log::info!("📋 [FAVORITES] {} favoritos", favorites.len());
                state.set_favorites(favorites);
            }
            Err(e) => {
                log::error!("❌ [FAVORITES] Error cargando favoritos: {}", e);
                state.notify_api_error(&e);
            }
        }
    });
}

/// Alternar favorito; `on_done` recibe el nuevo estado del botón.
/// Sin sesión: aviso + modal de login, sin llamadas.
pub fn toggle_favorite_action<F>(state: &AppState, company_id: i64, on_done: F)
where
    F: FnOnce(bool) + 'static,
{
    let token = state.auth.get_token();
    if token.is_none() {
        let lang = state.lang();
        state.notify(NotificationKind::Info, t("login_required", &lang));
        state.set_auth_modal(crate::state::AuthModal::Login);
        return;
    }

    let state = state.clone();
    spawn_local(async move {
        let vm = FavoritesViewModel::new();
        match vm.toggle(token.as_deref(), company_id).await {
            Ok(outcome) => {
                on_done(outcome.is_favorite());
                let lang = state.lang();
                let key = match outcome {
                    ToggleOutcome::Added => "favorite_added",
                    ToggleOutcome::Removed => "favorite_removed",
                };
                state.notify(NotificationKind::Success, t(key, &lang));
                refresh_favorites(&state);
            }
            Err(e) => {
                log::error!("❌ [FAVORITES] Error alternando {}: {}", company_id, e);
                state.notify_api_error(&e);
            }
        }
    });
}

/// Consultar el estado inicial del botón de un popup
pub fn check_favorite_action<F>(state: &AppState, company_id: i64, on_result: F)
where
    F: FnOnce(bool) + 'static,
{
    let Some(token) = state.auth.get_token() else {
        return;
    };
    spawn_local(async move {
        let vm = FavoritesViewModel::new();
        match vm.is_favorite(Some(&token), company_id).await {
            Ok(is_favorite) => on_result(is_favorite),
            Err(e) => log::warn!("⚠️ [FAVORITES] No se pudo consultar {}: {}", company_id, e),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::HashSet;

    #[derive(Default)]
    struct FakeFavorites {
        ids: RefCell<HashSet<i64>>,
        checks: Cell<usize>,
        adds: Cell<usize>,
        removes: Cell<usize>,
        fail_add: bool,
    }

    impl FavoritesApi for FakeFavorites {
        async fn check_favorite(&self, _token: &str, company_id: i64) -> Result<bool, ApiError> {
            self.checks.set(self.checks.get() + 1);
            Ok(self.ids.borrow().contains(&company_id))
        }

        async fn add_favorite(&self, _token: &str, company_id: i64) -> Result<(), ApiError> {
            if self.fail_add {
                return Err(ApiError::Rejected("Компания уже в избранном".into()));
            }
            self.adds.set(self.adds.get() + 1);
            self.ids.borrow_mut().insert(company_id);
            Ok(())
        }

        async fn remove_favorite(&self, _token: &str, company_id: i64) -> Result<(), ApiError> {
            self.removes.set(self.removes.get() + 1);
            self.ids.borrow_mut().remove(&company_id);
            Ok(())
        }

        async fn list_favorites(&self, _token: &str) -> Result<Vec<FavoriteEntry>, ApiError> {
            Ok(self
                .ids
                .borrow()
                .iter()
                .map(|id| FavoriteEntry { company_id: *id, ..Default::default() })
                .collect())
        }
    }

    #[test]
    fn test_toggle_twice_returns_to_not_favorite() {
        let vm = FavoritesViewModel::with_api(FakeFavorites::default());

        let first = pollster::block_on(vm.toggle(Some("token"), 42)).unwrap();
        let second = pollster::block_on(vm.toggle(Some("token"), 42)).unwrap();

        assert_eq!(first, ToggleOutcome::Added);
        assert_eq!(second, ToggleOutcome::Removed);
        assert_eq!(vm.api.adds.get(), 1);
        assert_eq!(vm.api.removes.get(), 1);
        assert!(!pollster::block_on(vm.is_favorite(Some("token"), 42)).unwrap());
    }

    #[test]
    fn test_toggle_without_token_makes_no_call() {
        let vm = FavoritesViewModel::with_api(FakeFavorites::default());
        assert_eq!(pollster::block_on(vm.toggle(None, 42)), Err(ApiError::Unauthenticated));
        assert_eq!(pollster::block_on(vm.toggle(Some(""), 42)), Err(ApiError::Unauthenticated));
        assert_eq!(vm.api.checks.get(), 0);
    }

    #[test]
    fn test_failed_add_leaves_state_unchanged() {
        let vm = FavoritesViewModel::with_api(FakeFavorites { fail_add: true, ..Default::default() });
        let result = pollster::block_on(vm.toggle(Some("token"), 7));
        assert!(matches!(result, Err(ApiError::Rejected(_))));
        assert!(pollster::block_on(vm.list(Some("token"))).unwrap().is_empty());
    }
}
