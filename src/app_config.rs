use std::fmt;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    value::{Uncased, UncasedStr},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::{error::EnvironmentError, utils};

/// Prefix for environment variables that override the built-in values.
pub const ENV_PREFIX: &str = "COFFEE_SHOP_";

/// Serialized key paths, in the exact casing consumers expect.
const KEYS: [&str; 7] = [
    "production",
    "apiServerUrl",
    "auth0",
    "auth0.url",
    "auth0.audience",
    "auth0.clientId",
    "auth0.callbackURL",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    /// Log filter used when `RUST_LOG` is not set
    pub fn default_log_level(self) -> &'static str {
        match self {
            Self::Development => "debug",
            Self::Production => "info",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auth0Config {
    /// The Auth0 domain prefix, e.g. `skittishloki` for `skittishloki.auth0.com`
    #[serde(deserialize_with = "utils::deserialize_text")]
    pub url: String,
    #[serde(deserialize_with = "utils::deserialize_text")]
    pub audience: String,
    #[serde(rename = "clientId", deserialize_with = "utils::deserialize_text")]
    pub client_id: String,
    /// Where Auth0 redirects back to once the login completes
    #[serde(rename = "callbackURL", deserialize_with = "utils::deserialize_text")]
    pub callback_url: String,
}

impl Auth0Config {
    /// The identity provider host for this tenant
    pub fn tenant_domain(&self) -> String {
        format!("{}.auth0.com", self.url)
    }

    pub fn callback(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.callback_url)
    }
}

/// The environment the application was built for. Constructed once per process
/// and never mutated afterwards; see [`crate::common::app_config`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub production: bool,
    #[serde(rename = "apiServerUrl", deserialize_with = "utils::deserialize_text")]
    pub api_server_url: String,
    pub auth0: Auth0Config,
}

impl AppConfig {
    /// The values compiled into the binary
    pub fn builtin() -> Self {
        Self {
            production: false,
            api_server_url: "http://127.0.0.1:5000".into(),
            auth0: Auth0Config {
                url: "skittishloki".into(),
                audience: "https://localhost:5000".into(),
                client_id: "SllYEmjIF4lFyDS7gksAEKNSOLhBFuld".into(),
                callback_url: "http://localhost:8100".into(),
            },
        }
    }

    /// Layer the built-in values, `Environment.toml`, `Environment-dev.toml` and
    /// `COFFEE_SHOP_*` environment variables, then validate the result.
    pub fn build() -> Result<Self, EnvironmentError> {
        let figment = Figment::from(Serialized::defaults(Self::builtin()))
            .merge(Toml::file("Environment.toml"))
            .merge(Toml::file("Environment-dev.toml"))
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .split("__")
                    .map(canonical_key)
                    .lowercase(false),
            );

        Self::from_figment(&figment)
    }

    pub fn from_figment(figment: &Figment) -> Result<Self, EnvironmentError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        debug!("Extracted {} environment", config.mode());
        Ok(config)
    }

    /// Every field must be non-empty, unpadded, and both URLs absolute.
    pub fn validate(&self) -> Result<(), EnvironmentError> {
        let fields = [
            ("apiServerUrl", &self.api_server_url),
            ("auth0.url", &self.auth0.url),
            ("auth0.audience", &self.auth0.audience),
            ("auth0.clientId", &self.auth0.client_id),
            ("auth0.callbackURL", &self.auth0.callback_url),
        ];
        for (field, value) in fields {
            utils::require_non_empty(field, value)?;
            utils::require_trimmed(field, value)?;
        }

        utils::parse_absolute_url("apiServerUrl", &self.api_server_url)?;
        utils::parse_absolute_url("auth0.callbackURL", &self.auth0.callback_url)?;

        Ok(())
    }

    pub fn mode(&self) -> BuildMode {
        if self.production {
            BuildMode::Production
        } else {
            BuildMode::Development
        }
    }

    pub fn is_production(&self) -> bool {
        self.production
    }

    pub fn api_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.api_server_url)
    }

    /// Resolve `path` (e.g. `drinks-detail`) against the API server URL
    pub fn api_endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        utils::join_endpoint(&self.api_base_url()?, path)
    }

    /// The settings object as consumed by the frontend
    pub fn to_json(&self) -> Result<String, EnvironmentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Environment variable names are case-insensitive, the serialized keys are not.
fn canonical_key(key: &UncasedStr) -> Uncased<'_> {
    match KEYS
        .iter()
        .find(|known| key.as_str().eq_ignore_ascii_case(known))
    {
        Some(known) => (*known).into(),
        None => key.as_str().to_ascii_lowercase().into(),
    }
}
