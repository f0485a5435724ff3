//! User create/edit form rules.
//!
//! Forms deserialize from the dashboard's camelCase JSON, validate against
//! a [`UserRules`](crate::config::UserRules), and produce the payload sent
//! to the user API. Rendering and transport live elsewhere.

pub mod de;
pub mod errors;
pub mod form;
pub mod options;
pub mod password;

pub use errors::{FieldViolation, FormErrors};
pub use form::{
    CreateUserForm, CreateUserPayload, EmergencyContact, NotificationSettings, UpdateUserForm,
    UpdateUserPayload, UserProfile,
};
pub use options::{ContractType, Department, Permission, Role, StaffType, Subject};
