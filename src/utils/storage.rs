// Preferencias de UI persistidas en localStorage (la sesión vive en services::session_store)

use gloo_storage::{LocalStorage, Storage};
use crate::utils::constants::LANGUAGE_KEY;
use crate::utils::i18n::SUPPORTED_LANGUAGES;

/// Idioma guardado, solo si es uno de los soportados
pub fn load_language() -> Option<String> {
    let stored = LocalStorage::raw().get_item(LANGUAGE_KEY).ok()??;
    normalize_language(&stored)
}

pub fn save_language(lang: &str) {
    if let Err(e) = LocalStorage::raw().set_item(LANGUAGE_KEY, lang) {
        log::warn!("⚠️ [STORAGE] No se pudo guardar el idioma: {:?}", e);
    }
}

fn normalize_language(value: &str) -> Option<String> {
    let upper = value.trim().to_uppercase();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|lang| **lang == upper)
        .map(|lang| lang.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_language() {
        assert_eq!(normalize_language(" en "), Some("EN".to_string()));
        assert_eq!(normalize_language("RU"), Some("RU".to_string()));
        assert_eq!(normalize_language("fr"), None);
    }
}
