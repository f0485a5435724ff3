//! User create/edit forms and the payloads they submit.
//!
//! Static per-field rules live on the `validator` derive; rules that need
//! the current date or a [`UserRules`] value run afterwards in
//! [`UserProfile::check`].

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::de::{empty_as_none, null_as_empty, null_as_true, optional_date};
use super::errors::FormErrors;
use super::options::{ContractType, Department, Permission, Role, StaffType, Subject};
use super::password::{validate_confirmation, validate_password_strength, CONFIRM_MISMATCH};
use crate::config::UserRules;
use crate::rut::{self, Rut};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Chilean mobile number, optionally prefixed with `56` or `+56`.
pub const PHONE_PATTERN: &str = r"^(\+?56)?([0-9]{9})$";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

pub const FIRST_NAME_REQUIRED: &str = "Los nombres son obligatorios";
pub const LAST_NAME_REQUIRED: &str = "Los apellidos son obligatorios";
pub const EMAIL_REQUIRED: &str = "El correo electrónico es obligatorio";
pub const RUT_REQUIRED: &str = "El RUT es obligatorio";
pub const RUT_INVALID: &str = "RUT inválido";
pub const PHONE_INVALID: &str = "Número de teléfono inválido";
pub const DATE_IN_FUTURE: &str = "La fecha no puede ser futura";

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// Everything a user record carries besides credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    // Personal
    #[validate(length(min = 2, max = 50))]
    pub first_name: String,
    #[validate(length(min = 2, max = 50))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "validate_rut_field"))]
    pub rut: String,

    // Roles and permissions
    pub role: Role,
    #[serde(rename = "permisos", deserialize_with = "null_as_empty")]
    pub permissions: Vec<Permission>,

    // Professional
    #[serde(deserialize_with = "empty_as_none")]
    pub staff_type: Option<StaffType>,
    #[serde(deserialize_with = "null_as_empty")]
    pub subjects_teaching: Vec<Subject>,
    #[serde(deserialize_with = "empty_as_none")]
    #[validate(length(max = 100))]
    pub position: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub department: Option<Department>,
    #[serde(rename = "especialidad", deserialize_with = "empty_as_none")]
    #[validate(length(max = 100))]
    pub specialty: Option<String>,
    #[serde(rename = "registroSecreduc", deserialize_with = "empty_as_none")]
    #[validate(length(max = 50))]
    pub secreduc_registration: Option<String>,
    #[serde(rename = "mencionesExtra", deserialize_with = "null_as_empty")]
    pub extra_mentions: Vec<String>,

    // Contact
    #[serde(deserialize_with = "empty_as_none")]
    #[validate(regex(path = *PHONE_RE, message = "Número de teléfono inválido"))]
    pub phone_number: Option<String>,
    #[serde(deserialize_with = "optional_date")]
    pub birth_date: Option<NaiveDate>,
    #[serde(deserialize_with = "empty_as_none")]
    #[validate(length(max = 200))]
    pub address: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    #[validate(length(max = 100))]
    pub comuna: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    #[validate(length(max = 100))]
    pub region: Option<String>,
    #[validate(nested)]
    pub emergency_contact: Option<EmergencyContact>,

    // Employment
    #[serde(rename = "tipoContrato", deserialize_with = "empty_as_none")]
    pub contract_type: Option<ContractType>,
    #[serde(rename = "horasContrato")]
    pub contract_hours: Option<f64>,
    #[serde(rename = "fechaIngreso", deserialize_with = "optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "bieniosReconocidos")]
    pub recognized_biennia: Option<f64>,
    #[serde(rename = "evaluacionDocente", deserialize_with = "empty_as_none")]
    #[validate(length(max = 200))]
    pub teacher_evaluation: Option<String>,

    // Status
    #[serde(deserialize_with = "null_as_true")]
    pub is_active: bool,
    #[serde(rename = "configuracionNotificaciones")]
    pub notification_settings: Option<NotificationSettings>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            rut: String::new(),
            role: Role::default(),
            permissions: Vec::new(),
            staff_type: None,
            subjects_teaching: Vec::new(),
            position: None,
            department: None,
            specialty: None,
            secreduc_registration: None,
            extra_mentions: Vec::new(),
            phone_number: None,
            birth_date: None,
            address: None,
            comuna: None,
            region: None,
            emergency_contact: None,
            contract_type: None,
            contract_hours: None,
            start_date: None,
            recognized_biennia: None,
            teacher_evaluation: None,
            is_active: true,
            notification_settings: Some(NotificationSettings::default()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct EmergencyContact {
    #[serde(deserialize_with = "empty_as_none")]
    #[validate(length(max = 100))]
    pub name: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    #[validate(length(max = 50))]
    pub relation: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    #[validate(regex(path = *PHONE_RE, message = "Número de teléfono inválido"))]
    pub phone: Option<String>,
}

/// Notification channels; email on, SMS off unless chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub email: bool,
    pub sms: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            sms: false,
        }
    }
}

fn validate_rut_field(value: &str) -> Result<(), ValidationError> {
    if rut::is_valid(value) {
        return Ok(());
    }
    let mut err = ValidationError::new("rut");
    err.message = Some(Cow::Borrowed(RUT_INVALID));
    Err(err)
}

impl UserProfile {
    /// Run every profile rule, as of `today`.
    pub fn check(&self, rules: &UserRules, today: NaiveDate) -> FormErrors {
        let mut errors = match self.validate() {
            Ok(()) => FormErrors::new(),
            Err(e) => FormErrors::from_validation(&e),
        };

        // A blank required field reports only that it is required.
        for (field, value, message) in [
            ("first_name", &self.first_name, FIRST_NAME_REQUIRED),
            ("last_name", &self.last_name, LAST_NAME_REQUIRED),
            ("email", &self.email, EMAIL_REQUIRED),
            ("rut", &self.rut, RUT_REQUIRED),
        ] {
            if value.trim().is_empty() {
                errors.replace(field, "required", message);
            }
        }

        for (field, date) in [
            ("birth_date", self.birth_date),
            ("start_date", self.start_date),
        ] {
            if date.is_some_and(|d| d > today) {
                errors.push(field, "future_date", DATE_IN_FUTURE);
            }
        }

        if self.recognized_biennia.is_some_and(|b| b < 0.0) {
            errors.push("recognized_biennia", "range", "Debe ser mayor o igual a 0");
        }

        if let Some(hours) = self.contract_hours {
            if hours < 0.0 {
                errors.push("contract_hours", "range", "Debe ser mayor o igual a 0");
            } else if hours > rules.max_contract_hours {
                errors.push(
                    "contract_hours",
                    "range",
                    format!("No puede exceder {} horas", rules.max_contract_hours),
                );
            }
        }

        errors
    }

    /// The verified RUT, if the field holds one.
    pub fn parsed_rut(&self) -> Option<Rut> {
        Rut::parse(&self.rut).ok()
    }

    /// Rewrite the RUT in canonical `12.345.678-5` form when it is valid.
    fn canonicalize(&mut self) {
        if let Some(rut) = self.parsed_rut() {
            self.rut = rut.to_string();
        }
    }
}

fn finish(errors: FormErrors, form: &'static str) -> Result<(), FormErrors> {
    let result = errors.into_result();
    if let Err(errors) = &result {
        // Field names only: values include passwords and RUTs.
        tracing::debug!(form, fields = ?errors.fields(), "User form rejected");
    }
    result
}

fn check_credentials(
    errors: &mut FormErrors,
    password: &str,
    confirmation: &str,
    rules: &UserRules,
) {
    if let Err(message) = validate_password_strength(password, rules.password_min_length) {
        let code = if password.is_empty() { "required" } else { "password" };
        errors.push("password", code, message);
    }
    if let Err(message) = validate_confirmation(password, confirmation) {
        let code = if confirmation.is_empty() { "required" } else { "must_match" };
        errors.push("confirm_password", code, message);
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// The registration form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserForm {
    #[serde(flatten)]
    pub profile: UserProfile,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// What a validated registration submits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateUserPayload {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub password: String,
}

impl CreateUserForm {
    /// Validate against today's date (UTC).
    pub fn validate_with(&self, rules: &UserRules) -> Result<(), FormErrors> {
        self.validate_on(rules, Utc::now().date_naive())
    }

    pub fn validate_on(&self, rules: &UserRules, today: NaiveDate) -> Result<(), FormErrors> {
        let mut errors = self.profile.check(rules, today);
        check_credentials(&mut errors, &self.password, &self.confirm_password, rules);
        finish(errors, "create")
    }

    /// Validate, then build the payload: the confirmation is dropped and the
    /// RUT is sent in canonical form.
    pub fn into_payload(self, rules: &UserRules) -> Result<CreateUserPayload, FormErrors> {
        self.validate_with(rules)?;
        let Self {
            mut profile,
            password,
            ..
        } = self;
        profile.canonicalize();
        Ok(CreateUserPayload { profile, password })
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// The edit form. Credentials are checked only when a new password is given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserForm {
    #[serde(flatten)]
    pub profile: UserProfile,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub confirm_password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateUserPayload {
    #[serde(flatten)]
    pub profile: UserProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UpdateUserForm {
    /// Validate against today's date (UTC).
    pub fn validate_with(&self, rules: &UserRules) -> Result<(), FormErrors> {
        self.validate_on(rules, Utc::now().date_naive())
    }

    pub fn validate_on(&self, rules: &UserRules, today: NaiveDate) -> Result<(), FormErrors> {
        let mut errors = self.profile.check(rules, today);
        match (&self.password, &self.confirm_password) {
            (Some(password), confirmation) => check_credentials(
                &mut errors,
                password,
                confirmation.as_deref().unwrap_or_default(),
                rules,
            ),
            (None, Some(_)) => errors.push("confirm_password", "must_match", CONFIRM_MISMATCH),
            (None, None) => {}
        }
        finish(errors, "update")
    }

    pub fn into_payload(self, rules: &UserRules) -> Result<UpdateUserPayload, FormErrors> {
        self.validate_with(rules)?;
        let Self {
            mut profile,
            password,
            ..
        } = self;
        profile.canonicalize();
        Ok(UpdateUserPayload { profile, password })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn valid_profile() -> UserProfile {
        UserProfile {
            first_name: "María José".to_string(),
            last_name: "González Pérez".to_string(),
            email: "mj.gonzalez@colegio.cl".to_string(),
            rut: "12.345.678-5".to_string(),
            role: Role::User,
            ..UserProfile::default()
        }
    }

    fn valid_create() -> CreateUserForm {
        CreateUserForm {
            profile: valid_profile(),
            password: "Secreta1!".to_string(),
            confirm_password: "Secreta1!".to_string(),
        }
    }

    fn check(profile: &UserProfile) -> FormErrors {
        profile.check(&UserRules::default(), today())
    }

    #[test]
    fn valid_profile_has_no_errors() {
        assert!(check(&valid_profile()).is_empty());
    }

    #[test]
    fn default_profile_mirrors_form_defaults() {
        let profile = UserProfile::default();
        assert_eq!(profile.role, Role::Viewer);
        assert!(profile.is_active);
        assert_eq!(
            profile.notification_settings,
            Some(NotificationSettings {
                email: true,
                sms: false
            })
        );
    }

    #[test]
    fn blank_required_fields_report_only_required() {
        let errors = check(&UserProfile::default());
        assert_eq!(errors.message("first_name"), Some(FIRST_NAME_REQUIRED));
        assert_eq!(errors.message("last_name"), Some(LAST_NAME_REQUIRED));
        assert_eq!(errors.message("email"), Some(EMAIL_REQUIRED));
        assert_eq!(errors.message("rut"), Some(RUT_REQUIRED));
        for field in ["first_name", "last_name", "email", "rut"] {
            assert_eq!(errors.for_field(field).count(), 1, "{field}");
        }
    }

    #[test]
    fn short_and_long_names() {
        let mut profile = valid_profile();
        profile.first_name = "A".to_string();
        profile.last_name = "B".repeat(51);
        let errors = check(&profile);
        assert_eq!(
            errors.message("first_name"),
            Some("Debe tener al menos 2 caracteres")
        );
        assert_eq!(
            errors.message("last_name"),
            Some("No puede exceder 50 caracteres")
        );
    }

    #[test]
    fn invalid_rut_and_email() {
        let mut profile = valid_profile();
        profile.rut = "12.345.678-4".to_string();
        profile.email = "no-es-correo".to_string();
        let errors = check(&profile);
        assert_eq!(errors.message("rut"), Some(RUT_INVALID));
        assert_eq!(errors.message("email"), Some("Correo electrónico inválido"));
    }

    #[test]
    fn phone_numbers() {
        for ok in ["912345678", "56912345678", "+56912345678"] {
            let mut profile = valid_profile();
            profile.phone_number = Some(ok.to_string());
            assert!(check(&profile).is_empty(), "{ok}");
        }
        for bad in ["12345678", "+5691234567a", "+1912345678", "9 1234 5678"] {
            let mut profile = valid_profile();
            profile.phone_number = Some(bad.to_string());
            assert_eq!(check(&profile).message("phone_number"), Some(PHONE_INVALID), "{bad}");
        }
    }

    #[test]
    fn emergency_contact_errors_are_nested() {
        let mut profile = valid_profile();
        profile.emergency_contact = Some(EmergencyContact {
            name: Some("Ana".to_string()),
            relation: Some("x".repeat(51)),
            phone: Some("123".to_string()),
        });
        let errors = check(&profile);
        assert_eq!(
            errors.message("emergency_contact.phone"),
            Some(PHONE_INVALID)
        );
        assert!(errors.contains("emergency_contact.relation"));
        assert!(!errors.contains("emergency_contact.name"));
    }

    #[test]
    fn future_dates_are_rejected() {
        let mut profile = valid_profile();
        profile.birth_date = NaiveDate::from_ymd_opt(2026, 10, 18);
        profile.start_date = Some(today());
        let errors = check(&profile);
        assert_eq!(errors.message("birth_date"), Some(DATE_IN_FUTURE));
        assert!(!errors.contains("start_date"));
    }

    #[test]
    fn contract_hours_follow_configured_cap() {
        let mut profile = valid_profile();
        profile.contract_hours = Some(44.0);
        assert!(check(&profile).is_empty());

        let lowered = UserRules {
            max_contract_hours: 42.0,
            ..UserRules::default()
        };
        let errors = profile.check(&lowered, today());
        assert_eq!(
            errors.message("contract_hours"),
            Some("No puede exceder 42 horas")
        );

        profile.contract_hours = Some(-1.0);
        assert!(check(&profile).contains("contract_hours"));
    }

    #[test]
    fn negative_biennia_are_rejected() {
        let mut profile = valid_profile();
        profile.recognized_biennia = Some(-1.0);
        assert_eq!(
            check(&profile).message("recognized_biennia"),
            Some("Debe ser mayor o igual a 0")
        );
        profile.recognized_biennia = Some(1.5);
        assert!(check(&profile).is_empty());
    }

    #[test]
    fn create_requires_matching_strong_password() {
        let rules = UserRules::default();
        assert!(valid_create().validate_on(&rules, today()).is_ok());

        let mut form = valid_create();
        form.password = String::new();
        form.confirm_password = String::new();
        let errors = form.validate_on(&rules, today()).unwrap_err();
        assert_eq!(errors.for_field("password").next().unwrap().code, "required");
        assert_eq!(
            errors.for_field("confirm_password").next().unwrap().code,
            "required"
        );

        let mut form = valid_create();
        form.confirm_password = "Secreta2!".to_string();
        let errors = form.validate_on(&rules, today()).unwrap_err();
        assert_eq!(errors.fields(), vec!["confirm_password"]);
    }

    #[test]
    fn update_skips_credentials_without_new_password() {
        let rules = UserRules::default();
        let form = UpdateUserForm {
            profile: valid_profile(),
            password: None,
            confirm_password: None,
        };
        assert!(form.validate_on(&rules, today()).is_ok());

        let form = UpdateUserForm {
            password: Some("debil".to_string()),
            ..form
        };
        let errors = form.validate_on(&rules, today()).unwrap_err();
        assert!(errors.contains("password"));
        assert!(errors.contains("confirm_password"));
    }

    #[test]
    fn update_rejects_lone_confirmation() {
        let form = UpdateUserForm {
            profile: valid_profile(),
            password: None,
            confirm_password: Some("Secreta1!".to_string()),
        };
        let errors = form
            .validate_on(&UserRules::default(), today())
            .unwrap_err();
        assert_eq!(errors.message("confirm_password"), Some(CONFIRM_MISMATCH));
    }

    #[test]
    fn errors_are_sorted_by_field() {
        let mut form = valid_create();
        form.profile.rut = String::new();
        form.profile.email = String::new();
        let errors = form
            .validate_on(&UserRules::default(), today())
            .unwrap_err();
        assert_eq!(errors.fields(), vec!["email", "rut"]);
    }

    #[test]
    fn leading_zero_rut_stays_valid_in_payload() {
        let mut form = valid_create();
        form.profile.rut = "0123456-0".to_string();
        let payload = form.into_payload(&UserRules::default()).unwrap();
        assert_eq!(payload.profile.rut, "0.123.456-0");
        assert!(rut::is_valid(&payload.profile.rut));
    }

    #[test]
    fn payload_canonicalizes_rut() {
        let mut form = valid_create();
        form.profile.rut = "123456785".to_string();
        let payload = form.into_payload(&UserRules::default()).unwrap();
        assert_eq!(payload.profile.rut, "12.345.678-5");
        assert_eq!(payload.password, "Secreta1!");
    }
}
