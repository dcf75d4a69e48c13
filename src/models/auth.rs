use serde::{Deserialize, Serialize};

/// Perfil de usuario que devuelve /api/auth/login y /api/auth/validate
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl User {
    /// Nombre para la cabecera: nombre de pila o, si no hay, el email
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub session_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Formulario de registro (se envía tal cual al backend)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub privacy_policy_accepted: bool,
    pub data_processing_consent: bool,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct RegisterResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Cuerpo de /api/auth/validate y /api/auth/logout
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct SessionTokenRequest {
    pub session_token: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct ValidateResponse {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_first_name() {
        let mut user = User {
            id: Some(1),
            email: "ivan@example.ru".into(),
            first_name: Some("Иван".into()),
            last_name: None,
        };
        assert_eq!(user.display_name(), "Иван");

        user.first_name = Some("  ".into());
        assert_eq!(user.display_name(), "ivan@example.ru");
    }

    #[test]
    fn test_failed_login_response_parses() {
        let json = r#"{"success": false, "message": "Неверный email или пароль"}"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.success);
        assert!(resp.session_token.is_none());
        assert_eq!(resp.message.as_deref(), Some("Неверный email или пароль"));
    }
}
