//! Password strength and confirmation rules.

/// Special characters a password may (and must) draw from.
pub const PASSWORD_SPECIALS: &str = "@$!%*?&";

pub const PASSWORD_REQUIRED: &str = "La contraseña es obligatoria";
pub const PASSWORD_COMPLEXITY: &str =
    "La contraseña debe contener mayúsculas, minúsculas, números y caracteres especiales";
pub const CONFIRM_REQUIRED: &str = "Debe confirmar la contraseña";
pub const CONFIRM_MISMATCH: &str = "Las contraseñas no coinciden";

/// Validate that a password meets the strength requirements.
///
/// A password needs at least `min_length` characters, at least one
/// lower-case letter, upper-case letter, digit and special character from
/// [`PASSWORD_SPECIALS`], and nothing outside those classes. Returns the
/// first failing rule as a user-facing message.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), String> {
    if password.is_empty() {
        return Err(PASSWORD_REQUIRED.to_string());
    }
    if password.chars().count() < min_length {
        return Err(format!(
            "La contraseña debe tener al menos {min_length} caracteres"
        ));
    }

    let is_special = |c: char| PASSWORD_SPECIALS.contains(c);
    let allowed = password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || is_special(c));
    let complete = password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(is_special);

    if !(allowed && complete) {
        return Err(PASSWORD_COMPLEXITY.to_string());
    }
    Ok(())
}

/// Validate the confirmation field against the password.
pub fn validate_confirmation(password: &str, confirmation: &str) -> Result<(), &'static str> {
    if confirmation.is_empty() {
        return Err(CONFIRM_REQUIRED);
    }
    if confirmation != password {
        return Err(CONFIRM_MISMATCH);
    }
    Ok(())
}
