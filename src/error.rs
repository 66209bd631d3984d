use figment::Error as ConfigError;
use thiserror::Error;

#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("Configuration Error: {source:#?}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("Unable to serialize JSON: {source:#?}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Required field '{0}' is empty")]
    EmptyField(&'static str),

    #[error("Field '{0}' has leading or trailing whitespace")]
    PaddedField(&'static str),

    #[error("Field '{field}' is not a valid URL: {source}")]
    InvalidUrl {
        field: &'static str,
        source: url::ParseError,
    },

    #[error("Field '{field}' must be an absolute URL, got '{value}'")]
    RelativeUrl { field: &'static str, value: String },
}
