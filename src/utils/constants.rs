/// Claves de localStorage
pub const SESSION_TOKEN_KEY: &str = "sessionToken";
pub const CURRENT_USER_KEY: &str = "currentUser";
pub const LANGUAGE_KEY: &str = "language";

/// Marcador de campo ausente en popups y listas
pub const PLACEHOLDER: &str = "—";

/// Símbolos aceptados como "carácter especial" en contraseñas
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";
pub const PASSWORD_MIN_LEN: usize = 8;

/// Espera antes de abrir el login tras un registro correcto
pub const LOGIN_AFTER_REGISTER_MS: u32 = 1500;
