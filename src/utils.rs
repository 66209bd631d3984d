use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use url::Url;

use crate::error::EnvironmentError;

struct TextVisitor;

impl Visitor<'_> for TextVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<String, E> {
        Ok(v.to_string())
    }
}

/// Deserialize a text field that environment providers may have typed as a
/// number or boolean, keeping its textual form.
pub fn deserialize_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    deserializer.deserialize_any(TextVisitor)
}

pub fn require_non_empty(field: &'static str, value: &str) -> Result<(), EnvironmentError> {
    if value.trim().is_empty() {
        Err(EnvironmentError::EmptyField(field))
    } else {
        Ok(())
    }
}

/// Leading or trailing whitespace survives into what consumers read, so refuse it
pub fn require_trimmed(field: &'static str, value: &str) -> Result<(), EnvironmentError> {
    if value.trim() == value {
        Ok(())
    } else {
        Err(EnvironmentError::PaddedField(field))
    }
}

/// Parse `value` as a URL that can act as a base, i.e. has a scheme and a host-like authority
pub fn parse_absolute_url(field: &'static str, value: &str) -> Result<Url, EnvironmentError> {
    let url = Url::parse(value).map_err(|source| EnvironmentError::InvalidUrl { field, source })?;

    if url.cannot_be_a_base() {
        return Err(EnvironmentError::RelativeUrl {
            field,
            value: value.to_string(),
        });
    }

    Ok(url)
}

/// Append `path` to `base` instead of replacing its last segment
pub fn join_endpoint(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let new_path = format!("{}/", base.path());
        base.set_path(&new_path);
    }

    base.join(path.trim_start_matches('/'))
}
