// ============================================================================
// SESSION STORE - Persistencia del token y del usuario en localStorage
// ============================================================================
// Solo dos claves persistidas: `sessionToken` (string crudo) y `currentUser` (JSON)
// ============================================================================

use gloo_storage::{LocalStorage, Storage};
use crate::models::User;
use crate::utils::constants::{CURRENT_USER_KEY, SESSION_TOKEN_KEY};

pub trait SessionStore {
    fn load_token(&self) -> Option<String>;
    fn load_user(&self) -> Option<User>;
    fn save(&self, token: &str, user: &User) -> Result<(), String>;
    fn save_user(&self, user: &User) -> Result<(), String>;
    fn clear(&self);
}

/// Implementación sobre localStorage del navegador
#[derive(Clone, Copy, Default)]
pub struct LocalSessionStore;

impl SessionStore for LocalSessionStore {
    fn load_token(&self) -> Option<String> {
        // El token se guarda como string crudo, no como JSON
        LocalStorage::raw()
            .get_item(SESSION_TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn load_user(&self) -> Option<User> {
        LocalStorage::get::<User>(CURRENT_USER_KEY).ok()
    }

    fn save(&self, token: &str, user: &User) -> Result<(), String> {
        LocalStorage::raw()
            .set_item(SESSION_TOKEN_KEY, token)
            .map_err(|_| "Error guardando token en localStorage".to_string())?;
        self.save_user(user)
    }

    fn save_user(&self, user: &User) -> Result<(), String> {
        LocalStorage::set(CURRENT_USER_KEY, user)
            .map_err(|e| format!("Error guardando usuario en localStorage: {}", e))
    }

    fn clear(&self) {
        LocalStorage::delete(SESSION_TOKEN_KEY);
        LocalStorage::delete(CURRENT_USER_KEY);
    }
}

/// Store en memoria para tests
#[cfg(test)]
#[derive(Default)]
pub struct MemorySessionStore {
    pub token: std::cell::RefCell<Option<String>>,
    pub user: std::cell::RefCell<Option<User>>,
}

#[cfg(test)]
impl SessionStore for MemorySessionStore {
    fn load_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn load_user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    fn save(&self, token: &str, user: &User) -> Result<(), String> {
        *self.token.borrow_mut() = Some(token.to_string());
        *self.user.borrow_mut() = Some(user.clone());
        Ok(())
    }

    fn save_user(&self, user: &User) -> Result<(), String> {
        *self.user.borrow_mut() = Some(user.clone());
        Ok(())
    }

    fn clear(&self) {
        *self.token.borrow_mut() = None;
        *self.user.borrow_mut() = None;
    }
}
