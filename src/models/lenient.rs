//! Field-level fallbacks for upstream payloads.
//!
//! The upstream API occasionally sends `null`, a negative or fractional
//! number, or a string where a count is expected. A bad value only resets
//! the field it sits in; the rest of the record is kept.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

fn convert<T: DeserializeOwned>(value: Value) -> Option<T> {
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value.clone()) {
        Ok(v) => Some(v),
        Err(e) => {
            debug!("Dropping malformed field value {}: {}", value, e);
            None
        }
    }
}

/// Optional field; a value of the wrong shape becomes `None`.
///
/// Pair with `#[serde(default)]` so a missing key is `None` as well.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(convert))
}

/// Required field; a null or malformed value becomes `T::default()`.
pub(crate) fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Deserialize a list item by item, replacing malformed items with
/// `T::default()` instead of failing the whole payload. A value that is not
/// a list at all yields an empty list.
pub(crate) fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let values = match Value::deserialize(deserializer)? {
        Value::Array(values) => values,
        Value::Null => return Ok(Vec::new()),
        other => {
            warn!("Expected a list, got {}; treating as empty", other);
            return Ok(Vec::new());
        }
    };

    Ok(values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            serde_json::from_value(value).unwrap_or_else(|e| {
                warn!("Item {} is malformed, keeping an empty placeholder: {}", i, e);
                T::default()
            })
        })
        .collect())
}
