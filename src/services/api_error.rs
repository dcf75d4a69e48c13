// ============================================================================
// API ERROR - Taxonomía de fallos de la capa de servicios
// ============================================================================

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Fallo de red / transporte (el request no llegó a completarse)
    #[error("network error: {0}")]
    Network(String),

    /// Respuesta con status fuera de 2xx
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Payload mal formado (p.ej. no es un array donde se espera un array)
    #[error("invalid payload: {0}")]
    Parse(String),

    /// Rechazo de dominio reportado por el backend (`error` / `message`)
    #[error("{0}")]
    Rejected(String),

    /// No hay token de sesión; la llamada ni se intenta
    #[error("authentication required")]
    Unauthenticated,
}

impl ApiError {
    /// Clave i18n para la notificación al usuario
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "error_network",
            ApiError::Http { status: 401, .. } => "error_unauthorized",
            ApiError::Http { .. } => "error_http",
            ApiError::Parse(_) => "error_payload",
            ApiError::Rejected(_) => "error_rejected",
            ApiError::Unauthenticated => "login_required",
        }
    }

    /// Mensaje del backend si lo hay (para mostrarlo tal cual)
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected(msg) if !msg.is_empty() => Some(msg),
            ApiError::Http { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Extrae `error` o `message` de un cuerpo JSON de error
pub fn error_message_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_error_field() {
        let body = r#"{"error": "Предприятие уже в избранном", "message": "other"}"#;
        assert_eq!(error_message_from_body(body).as_deref(), Some("Предприятие уже в избранном"));
        assert_eq!(error_message_from_body(r#"{"message": "nope"}"#).as_deref(), Some("nope"));
        assert_eq!(error_message_from_body("<html>500</html>"), None);
    }

    #[test]
    fn test_unauthorized_maps_to_dedicated_key() {
        let err = ApiError::Http { status: 401, message: String::new() };
        assert_eq!(err.i18n_key(), "error_unauthorized");
        assert_eq!(err.backend_message(), None);
        assert_eq!(ApiError::Unauthenticated.i18n_key(), "login_required");
    }
}
