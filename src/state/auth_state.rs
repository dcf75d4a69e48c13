// ============================================================================
// AUTH STATE - Estado de autenticación
// ============================================================================
// Anonymous → (login ok) → Authenticated → (logout | validación fallida) → Anonymous
// Con token guardado al arrancar: Pending(token) hasta que resuelve la validación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::User;

#[derive(Clone, Debug, PartialEq)]
pub enum AuthStatus {
    Anonymous,
    /// Token restaurado de localStorage, aún sin validar
    Pending { token: String, user: Option<User> },
    Authenticated { token: String, user: User },
}

impl Default for AuthStatus {
    fn default() -> Self {
        AuthStatus::Anonymous
    }
}

impl AuthStatus {
    /// Token bearer disponible (también mientras se valida)
    pub fn token(&self) -> Option<&str> {
        match self {
            AuthStatus::Anonymous => None,
            AuthStatus::Pending { token, .. } | AuthStatus::Authenticated { token, .. } => Some(token),
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            AuthStatus::Anonymous => None,
            AuthStatus::Pending { user, .. } => user.as_ref(),
            AuthStatus::Authenticated { user, .. } => Some(user),
        }
    }
}

/// Slice compartido del estado de autenticación
#[derive(Clone, Default)]
pub struct AuthState {
    pub status: Rc<RefCell<AuthStatus>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&self, status: AuthStatus) {
        *self.status.borrow_mut() = status;
    }

    pub fn get_token(&self) -> Option<String> {
        self.status.borrow().token().map(str::to_string)
    }

    pub fn get_user(&self) -> Option<User> {
        self.status.borrow().user().cloned()
    }

    /// Resolver la validación de `token`: solo aplica si seguimos en Pending con ese token
    pub fn settle_pending(&self, token: &str, resolved: AuthStatus) -> bool {
        let mut status = self.status.borrow_mut();
        let matches = matches!(&*status, AuthStatus::Pending { token: pending, .. } if pending == token);
        if matches {
            *status = resolved;
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_available_while_pending() {
        let state = AuthState::new();
        assert_eq!(state.get_token(), None);

        state.set_status(AuthStatus::Pending { token: "t1".into(), user: None });
        assert_eq!(state.get_token().as_deref(), Some("t1"));
        assert_eq!(state.get_user(), None);

        state.set_status(AuthStatus::Anonymous);
        assert_eq!(state.get_token(), None);
    }

    #[test]
    fn test_stale_validation_does_not_override_newer_login() {
        let user = User {
            id: Some(1),
            email: "anna@example.ru".into(),
            first_name: None,
            last_name: None,
        };
        let state = AuthState::new();
        state.set_status(AuthStatus::Pending { token: "old".into(), user: None });
        state.set_status(AuthStatus::Authenticated { token: "new".into(), user: user.clone() });

        assert!(!state.settle_pending("old", AuthStatus::Anonymous));
        assert_eq!(state.get_token().as_deref(), Some("new"));

        state.set_status(AuthStatus::Pending { token: "old".into(), user: None });
        assert!(state.settle_pending("old", AuthStatus::Authenticated { token: "old".into(), user }));
        assert_eq!(state.get_token().as_deref(), Some("old"));
    }
}
