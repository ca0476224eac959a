use std::{env, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvError {
    #[error("environment variable `{0}` is not set")]
    Missing(&'static str),
    #[error("environment variable `{variable}` has invalid value `{value}`")]
    Invalid { variable: &'static str, value: String },
}

/// Reads a required variable.
pub fn var(variable: &'static str) -> Result<String, EnvError> {
    env::var(variable).map_err(|_| EnvError::Missing(variable))
}

/// Reads and parses a required variable.
pub fn parse_var<T: FromStr>(variable: &'static str) -> Result<T, EnvError> {
    parse(variable, var(variable)?)
}

/// Reads and parses an optional variable, `default` when unset.
pub fn parse_var_or<T: FromStr>(variable: &'static str, default: T) -> Result<T, EnvError> {
    match env::var(variable) {
        Ok(value) => parse(variable, value),
        Err(_) => Ok(default),
    }
}

fn parse<T: FromStr>(variable: &'static str, value: String) -> Result<T, EnvError> {
    value
        .trim()
        .parse()
        .map_err(|_| EnvError::Invalid { variable, value })
}
