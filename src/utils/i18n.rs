// ============================================================================
// MÓDULO DE INTERNACIONALIZACIÓN
// ============================================================================

use std::collections::HashMap;

/// Idiomas disponibles en el selector (el primero es el de por defecto)
pub const SUPPORTED_LANGUAGES: [&str; 2] = ["RU", "EN"];

/// Obtener diccionario de traducciones para un idioma
fn get_translations(lang: &str) -> HashMap<&'static str, &'static str> {
    let mut translations = HashMap::new();
    let lang_upper = lang.to_uppercase();

    match lang_upper.as_str() {
        "EN" => {
            // Header
            translations.insert("app_title", "Licensed companies map");
            translations.insert("favorites", "Favorites");
            translations.insert("login", "Log in");
            translations.insert("logout", "Log out");
            translations.insert("register", "Sign up");

            // Filtros
            translations.insert("filters", "Filters");
            translations.insert("status", "Status");
            translations.insert("all", "All");
            translations.insert("search", "Search");
            translations.insert("search_placeholder", "Name, INN or address");
            translations.insert("load", "Load");
            translations.insert("clear_filters", "Clear filters");

            // Contador de puntos
            translations.insert("points", "Points");
            translations.insert("strategy_all_in_bounds", "all in view");
            translations.insert("strategy_top", "top {limit}");
            translations.insert("similar_tag", "similar");

            // Estados de licencia
            translations.insert("status_active", "Active");
            translations.insert("status_expiring_soon", "Expiring soon");
            translations.insert("status_expired", "Expired");

            // Popup
            translations.insert("inn", "INN");
            translations.insert("kpp", "KPP");
            translations.insert("address", "Address");
            translations.insert("adm_area", "Area");
            translations.insert("district", "District");
            translations.insert("license_type", "License type");
            translations.insert("license_number", "License number");
            translations.insert("license_begin", "Issued");
            translations.insert("license_expire", "Expires");
            translations.insert("in_favorites", "In favorites");
            translations.insert("add_to_favorites", "Add to favorites");
            translations.insert("find_similar", "Find similar");

            // Favoritos
            translations.insert("close", "Close");
            translations.insert("favorites_empty", "No favorites yet");
            translations.insert("badge_overdue", "Expired {days} d ago");
            translations.insert("badge_expiring", "{days} d left");
            translations.insert("badge_valid", "Valid, {days} d left");
            translations.insert("badge_unknown", "No expiry date");
            translations.insert("favorite_added", "Added to favorites");
            translations.insert("favorite_removed", "Removed from favorites");

            // Similares
            translations.insert("similar_found", "Found {count} similar companies within {radius} m");
            translations.insert("similar_unavailable", "Not enough data to search for similar companies");

            // Autenticación
            translations.insert("login_title", "Log in");
            translations.insert("register_title", "Sign up");
            translations.insert("email", "Email");
            translations.insert("password", "Password");
            translations.insert("password_confirm", "Confirm password");
            translations.insert("first_name", "First name");
            translations.insert("last_name", "Last name");
            translations.insert("phone", "Phone");
            translations.insert("privacy_policy", "I accept the privacy policy");
            translations.insert("data_processing", "I consent to personal data processing");
            translations.insert("no_account", "No account? Sign up");
            translations.insert("have_account", "Already registered? Log in");
            translations.insert("login_required", "Log in to use favorites");
            translations.insert("login_success", "Logged in");
            translations.insert("register_success", "Account created, you can log in now");
            translations.insert("logout_success", "Logged out");
            translations.insert("fill_all_fields", "Enter email and password");
            translations.insert("fill_required", "Fill in the required fields");
            translations.insert("password_mismatch", "Passwords do not match");
            translations.insert("privacy_required", "You must accept the privacy policy");
            translations.insert("consent_required", "You must consent to data processing");
            translations.insert("password_requirements", "At least 8 characters, upper and lower case, a digit and a symbol");
            translations.insert("password_ok", "Strong password");
            translations.insert("password_too_short", "Password must be at least 8 characters");
            translations.insert("password_no_upper", "Password needs an upper-case letter");
            translations.insert("password_no_lower", "Password needs a lower-case letter");
            translations.insert("password_no_digit", "Password needs a digit");
            translations.insert("password_no_symbol", "Password needs a special symbol");

            // Errores
            translations.insert("error_network", "Network error, check your connection");
            translations.insert("error_unauthorized", "Session expired, log in again");
            translations.insert("error_http", "Server error");
            translations.insert("error_payload", "Unexpected server response");
            translations.insert("error_rejected", "Request rejected by the server");
            translations.insert("map_error", "The map could not be loaded");
        }
        _ => {
            // RU (por defecto)
            // Header
            translations.insert("app_title", "Карта лицензированных организаций");
            translations.insert("favorites", "Избранное");
            translations.insert("login", "Войти");
            translations.insert("logout", "Выйти");
            translations.insert("register", "Регистрация");

            // Filtros
            translations.insert("filters", "Фильтры");
            translations.insert("status", "Статус");
            translations.insert("all", "Все");
            translations.insert("search", "Поиск");
            translations.insert("search_placeholder", "Название, ИНН или адрес");
            translations.insert("load", "Загрузить");
            translations.insert("clear_filters", "Сбросить фильтры");

            // Contador de puntos
            translations.insert("points", "Точек");
            translations.insert("strategy_all_in_bounds", "все в области");
            translations.insert("strategy_top", "топ {limit}");
            translations.insert("similar_tag", "похожие");

            // Estados de licencia
            translations.insert("status_active", "Действует");
            translations.insert("status_expiring_soon", "Скоро истекает");
            translations.insert("status_expired", "Истекла");

            // Popup
            translations.insert("inn", "ИНН");
            translations.insert("kpp", "КПП");
            translations.insert("address", "Адрес");
            translations.insert("adm_area", "Округ");
            translations.insert("district", "Район");
            translations.insert("license_type", "Вид лицензии");
            translations.insert("license_number", "Номер лицензии");
            translations.insert("license_begin", "Выдана");
            translations.insert("license_expire", "Действует до");
            translations.insert("in_favorites", "В избранном");
            translations.insert("add_to_favorites", "В избранное");
            translations.insert("find_similar", "Найти похожие");

            // Favoritos
            translations.insert("close", "Закрыть");
            translations.insert("favorites_empty", "В избранном пока ничего нет");
            translations.insert("badge_overdue", "Просрочена {days} дн.");
            translations.insert("badge_expiring", "Осталось {days} дн.");
            translations.insert("badge_valid", "Действует, {days} дн.");
            translations.insert("badge_unknown", "Срок не указан");
            translations.insert("favorite_added", "Добавлено в избранное");
            translations.insert("favorite_removed", "Удалено из избранного");

            // Similares
            translations.insert("similar_found", "Найдено похожих организаций: {count} в радиусе {radius} м");
            translations.insert("similar_unavailable", "Недостаточно данных для поиска похожих");

            // Autenticación
            translations.insert("login_title", "Вход");
            translations.insert("register_title", "Регистрация");
            translations.insert("email", "Email");
            translations.insert("password", "Пароль");
            translations.insert("password_confirm", "Повторите пароль");
            translations.insert("first_name", "Имя");
            translations.insert("last_name", "Фамилия");
            translations.insert("phone", "Телефон");
            translations.insert("privacy_policy", "Принимаю политику конфиденциальности");
            translations.insert("data_processing", "Согласен на обработку персональных данных");
            translations.insert("no_account", "Нет аккаунта? Зарегистрируйтесь");
            translations.insert("have_account", "Уже зарегистрированы? Войдите");
            translations.insert("login_required", "Войдите, чтобы пользоваться избранным");
            translations.insert("login_success", "Вы вошли в систему");
            translations.insert("register_success", "Регистрация завершена, теперь можно войти");
            translations.insert("logout_success", "Вы вышли из системы");
            translations.insert("fill_all_fields", "Введите email и пароль");
            translations.insert("fill_required", "Заполните обязательные поля");
            translations.insert("password_mismatch", "Пароли не совпадают");
            translations.insert("privacy_required", "Необходимо принять политику конфиденциальности");
            translations.insert("consent_required", "Необходимо согласие на обработку данных");
            translations.insert("password_requirements", "Минимум 8 символов, заглавные и строчные буквы, цифра и спецсимвол");
            translations.insert("password_ok", "Надёжный пароль");
            translations.insert("password_too_short", "Пароль должен быть не короче 8 символов");
            translations.insert("password_no_upper", "Нужна заглавная буква");
            translations.insert("password_no_lower", "Нужна строчная буква");
            translations.insert("password_no_digit", "Нужна цифра");
            translations.insert("password_no_symbol", "Нужен спецсимвол");

            // Errores
            translations.insert("error_network", "Ошибка сети, проверьте подключение");
            translations.insert("error_unauthorized", "Сессия истекла, войдите снова");
            translations.insert("error_http", "Ошибка сервера");
            translations.insert("error_payload", "Некорректный ответ сервера");
            translations.insert("error_rejected", "Сервер отклонил запрос");
            translations.insert("map_error", "Не удалось загрузить карту");
        }
    }

    translations
}

/// Función de traducción
///
/// # Arguments
/// * `key` - Clave de traducción
/// * `lang` - Idioma ("RU" o "EN")
///
/// # Returns
/// String traducida o la clave si no se encuentra traducción
pub fn t(key: &str, lang: &str) -> String {
    let translations = get_translations(lang);

    if let Some(translation) = translations.get(key) {
        return translation.to_string();
    }

    // Fallback: devolver la clave si no hay traducción
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_languages_share_keys() {
        let ru = get_translations("RU");
        let en = get_translations("EN");
        let mut ru_keys: Vec<_> = ru.keys().collect();
        let mut en_keys: Vec<_> = en.keys().collect();
        ru_keys.sort();
        en_keys.sort();
        assert_eq!(ru_keys, en_keys);
    }

    #[test]
    fn test_unknown_key_and_language() {
        assert_eq!(t("no_such_key", "EN"), "no_such_key");
        assert_eq!(t("logout", "xx"), t("logout", "RU"));
        assert_eq!(t("logout", "en"), "Log out");
    }
}
