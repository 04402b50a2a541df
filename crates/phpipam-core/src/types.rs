//! Wire-level types shared by every phpIPAM call.
//!
//! Every response is wrapped in an [`Envelope`]. phpIPAM is loose about
//! scalar types (the same identifier arrives as `"42"` from one endpoint and
//! `42` from another), so the [`lenient`] deserializers normalize those values
//! into one canonical representation at the deserialization boundary.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform response wrapper returned by every phpIPAM endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// HTTP-like status code reported by phpIPAM.
    #[serde(default)]
    pub code: u16,
    /// Whether the call succeeded.
    #[serde(default, deserialize_with = "lenient::bool_or_false")]
    pub success: bool,
    /// Human readable status message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Identifier of a newly created object, normalized to a string.
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Resource-specific payload, decoded lazily by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Server-side processing time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
}

impl Envelope {
    /// Convert an unsuccessful envelope into the matching error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthenticationFailed`], [`Error::NotFound`] or
    /// [`Error::Api`] depending on the reported code.
    pub fn into_result(self) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(Error::from_envelope(self.code, self.message.as_deref()))
        }
    }

    /// Returns true when the envelope carries a non-null payload.
    #[must_use]
    pub fn has_payload(&self) -> bool {
        !matches!(self.data, None | Some(Value::Null))
    }

    /// Identifier of a created object, ignoring empty and zero values.
    #[must_use]
    pub fn created_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty() && *id != "0")
    }

    /// Decode the payload into `T`, or `None` if there is no payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseError`] if the payload does not match `T`.
    pub fn decode<T>(&self) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match &self.data {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::deserialize(value).map(Some).map_err(|err| {
                Error::ParseError(format!("Failed to decode response payload: {err}"))
            }),
        }
    }
}

/// Lenient deserializers for phpIPAM's loosely typed scalars.
pub mod lenient {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    /// Deserialize a string, number or bool as `Option<String>`.
    ///
    /// `null` and empty strings become `None`.
    pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(if b { "1" } else { "0" }.to_string()),
            Some(other) => Some(other.to_string()),
        })
    }

    /// Deserialize `null` as `T::default()`.
    pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
    }

    /// Deserialize a number or numeric string as `Option<f64>`.
    pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => Ok(n.as_f64()),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(serde::de::Error::custom),
            Some(other) => Err(serde::de::Error::custom(format!(
                "expected a number, got {other}"
            ))),
        }
    }

    /// Deserialize `true`/`false`, `0`/`1` or their string forms as `bool`,
    /// treating missing values as `false`.
    pub fn bool_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        flag::deserialize(deserializer).map(Option::unwrap_or_default)
    }

    /// phpIPAM `0`/`1` switches as `Option<bool>`, written back as `"0"`/`"1"`.
    pub mod flag {
        use super::{Deserialize, Deserializer, Serializer, Value};

        /// Serialize as `"1"` or `"0"`.
        #[allow(clippy::ref_option)]
        pub fn serialize<S>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(true) => serializer.serialize_str("1"),
                Some(false) => serializer.serialize_str("0"),
                None => serializer.serialize_none(),
            }
        }

        /// Deserialize from bools, integers or strings.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let value = Option::<Value>::deserialize(deserializer)?;
            Ok(match value {
                None | Some(Value::Null) => None,
                Some(Value::Bool(b)) => Some(b),
                Some(Value::Number(n)) => Some(n.as_f64().is_some_and(|n| n != 0.0)),
                Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                    "" => None,
                    "0" | "false" | "no" | "off" => Some(false),
                    _ => Some(true),
                },
                Some(_) => Some(true),
            })
        }
    }
}
