use crate::error::CoreError;

/// Default minimum password length.
pub const DEFAULT_PASSWORD_MIN_LENGTH: usize = 8;

/// Default cap on weekly contract hours.
pub const DEFAULT_MAX_CONTRACT_HOURS: f64 = 44.0;

/// Tunable limits applied by the user form validation.
///
/// Everything else about the forms is fixed; these two values change with
/// deployment policy (the legal weekly-hours cap is being lowered in steps).
#[derive(Debug, Clone, PartialEq)]
pub struct UserRules {
    /// Minimum password length in characters (default: `8`).
    pub password_min_length: usize,
    /// Upper bound for `horasContrato` (default: `44`).
    pub max_contract_hours: f64,
}

impl Default for UserRules {
    fn default() -> Self {
        Self {
            password_min_length: DEFAULT_PASSWORD_MIN_LENGTH,
            max_contract_hours: DEFAULT_MAX_CONTRACT_HOURS,
        }
    }
}

impl UserRules {
    /// Read a `.env` file if one exists, then load from the environment.
    pub fn load() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default |
    /// |----------------------------|---------|
    /// | `USER_PASSWORD_MIN_LENGTH` | `8`     |
    /// | `USER_MAX_CONTRACT_HOURS`  | `44`    |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the rules from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let defaults = Self::default();

        let password_min_length = match lookup("USER_PASSWORD_MIN_LENGTH") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                Ok(_) => {
                    return Err(config_error(
                        "USER_PASSWORD_MIN_LENGTH",
                        raw,
                        "must be at least 1",
                    ))
                }
                Err(e) => return Err(config_error("USER_PASSWORD_MIN_LENGTH", raw, e)),
            },
            None => defaults.password_min_length,
        };

        let max_contract_hours = match lookup("USER_MAX_CONTRACT_HOURS") {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(h) if h.is_finite() && h >= 0.0 => h,
                Ok(_) => {
                    return Err(config_error(
                        "USER_MAX_CONTRACT_HOURS",
                        raw,
                        "must be a non-negative number",
                    ))
                }
                Err(e) => return Err(config_error("USER_MAX_CONTRACT_HOURS", raw, e)),
            },
            None => defaults.max_contract_hours,
        };

        tracing::debug!(password_min_length, max_contract_hours, "User rules loaded");

        Ok(Self {
            password_min_length,
            max_contract_hours,
        })
    }
}

fn config_error(var: &'static str, value: String, reason: impl ToString) -> CoreError {
    CoreError::Config {
        var,
        value,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let rules = UserRules::from_lookup(lookup(&[])).unwrap();
        assert_eq!(rules, UserRules::default());
        assert_eq!(rules.password_min_length, 8);
        assert_eq!(rules.max_contract_hours, 44.0);
    }

    #[test]
    fn overrides_are_parsed() {
        let rules = UserRules::from_lookup(lookup(&[
            ("USER_PASSWORD_MIN_LENGTH", "12"),
            ("USER_MAX_CONTRACT_HOURS", " 42 "),
        ]))
        .unwrap();
        assert_eq!(rules.password_min_length, 12);
        assert_eq!(rules.max_contract_hours, 42.0);
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        let err = UserRules::from_lookup(lookup(&[("USER_PASSWORD_MIN_LENGTH", "eight")]))
            .unwrap_err();
        assert_matches!(
            err,
            CoreError::Config {
                var: "USER_PASSWORD_MIN_LENGTH",
                ..
            }
        );
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(UserRules::from_lookup(lookup(&[("USER_PASSWORD_MIN_LENGTH", "0")])).is_err());
        assert!(UserRules::from_lookup(lookup(&[("USER_MAX_CONTRACT_HOURS", "-1")])).is_err());
        assert!(UserRules::from_lookup(lookup(&[("USER_MAX_CONTRACT_HOURS", "NaN")])).is_err());
    }
}
