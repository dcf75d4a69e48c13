// ============================================================================
// VALIDACIÓN DE REGISTRO (solo orientativa, el backend vuelve a validar)
// ============================================================================

use thiserror::Error;
use crate::models::RegisterRequest;
use crate::utils::constants::{PASSWORD_MIN_LEN, PASSWORD_SYMBOLS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordIssue {
    #[error("password is shorter than 8 characters")]
    TooShort,
    #[error("password has no upper-case letter")]
    MissingUppercase,
    #[error("password has no lower-case letter")]
    MissingLowercase,
    #[error("password has no digit")]
    MissingDigit,
    #[error("password has no special symbol")]
    MissingSymbol,
}

impl PasswordIssue {
    pub fn i18n_key(&self) -> &'static str {
        match self {
            PasswordIssue::TooShort => "password_too_short",
            PasswordIssue::MissingUppercase => "password_no_upper",
            PasswordIssue::MissingLowercase => "password_no_lower",
            PasswordIssue::MissingDigit => "password_no_digit",
            PasswordIssue::MissingSymbol => "password_no_symbol",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("required fields are empty")]
    MissingRequired,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("privacy policy not accepted")]
    PrivacyPolicyNotAccepted,
    #[error("data processing consent not given")]
    DataProcessingNotConsented,
    #[error(transparent)]
    WeakPassword(#[from] PasswordIssue),
}

impl RegistrationError {
    pub fn i18n_key(&self) -> &'static str {
        match self {
            RegistrationError::MissingRequired => "fill_required",
            RegistrationError::PasswordMismatch => "password_mismatch",
            RegistrationError::PrivacyPolicyNotAccepted => "privacy_required",
            RegistrationError::DataProcessingNotConsented => "consent_required",
            RegistrationError::WeakPassword(issue) => issue.i18n_key(),
        }
    }
}

/// Comprobar la fortaleza de la contraseña; devuelve el primer requisito incumplido
pub fn check_password_strength(password: &str) -> Result<(), PasswordIssue> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(PasswordIssue::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordIssue::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PasswordIssue::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordIssue::MissingDigit);
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        return Err(PasswordIssue::MissingSymbol);
    }
    Ok(())
}

/// Validar el formulario completo en el mismo orden en que se informa al usuario
pub fn validate_registration(form: &RegisterRequest) -> Result<(), RegistrationError> {
    if form.email.trim().is_empty() || form.password.is_empty() {
        return Err(RegistrationError::MissingRequired);
    }
    if form.password != form.password_confirm {
        return Err(RegistrationError::PasswordMismatch);
    }
    if !form.privacy_policy_accepted {
        return Err(RegistrationError::PrivacyPolicyNotAccepted);
    }
    if !form.data_processing_consent {
        return Err(RegistrationError::DataProcessingNotConsented);
    }
    check_password_strength(&form.password)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password: &str) -> RegisterRequest {
        RegisterRequest {
            email: "user@example.ru".into(),
            password: password.into(),
            password_confirm: password.into(),
            first_name: "Анна".into(),
            last_name: String::new(),
            phone: String::new(),
            privacy_policy_accepted: true,
            data_processing_consent: true,
        }
    }

    #[test]
    fn test_weak_password_rejected() {
        assert_eq!(
            validate_registration(&form("abc12345")),
            Err(RegistrationError::WeakPassword(PasswordIssue::MissingUppercase))
        );
        assert_eq!(check_password_strength("Abc12345"), Err(PasswordIssue::MissingSymbol));
        assert_eq!(check_password_strength("Ab1!"), Err(PasswordIssue::TooShort));
        assert_eq!(check_password_strength("ABC123!X"), Err(PasswordIssue::MissingLowercase));
        assert_eq!(check_password_strength("Abcdefg!"), Err(PasswordIssue::MissingDigit));
    }

    #[test]
    fn test_strong_password_accepted() {
        assert_eq!(validate_registration(&form("Abc123!x")), Ok(()));
    }

    #[test]
    fn test_symbol_outside_allowed_set_does_not_count() {
        assert_eq!(check_password_strength("Abc123_x"), Err(PasswordIssue::MissingSymbol));
    }

    #[test]
    fn test_confirmation_and_consents() {
        let mut f = form("Abc123!x");
        f.password_confirm = "Abc123!y".into();
        assert_eq!(validate_registration(&f), Err(RegistrationError::PasswordMismatch));

        let mut f = form("Abc123!x");
        f.privacy_policy_accepted = false;
        assert_eq!(validate_registration(&f), Err(RegistrationError::PrivacyPolicyNotAccepted));

        let mut f = form("Abc123!x");
        f.data_processing_consent = false;
        assert_eq!(validate_registration(&f), Err(RegistrationError::DataProcessingNotConsented));

        let mut f = form("Abc123!x");
        f.email = " ".into();
        assert_eq!(validate_registration(&f), Err(RegistrationError::MissingRequired));
    }
}
