use crate::users::FormErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(#[from] FormErrors),

    #[error("Invalid configuration: {var} = {value:?} ({reason})")]
    Config {
        var: &'static str,
        value: String,
        reason: String,
    },
}
