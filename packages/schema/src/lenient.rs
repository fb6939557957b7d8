//! Field-level fallback for persisted shapes.
//!
//! Stored documents outlive the schema that wrote them. A field that no longer
//! parses falls back to its own default instead of failing the whole value:
//!
//! ```rust
//! use letter_schema::normalize_data;
//! use serde_json::json;
//!
//! let data = normalize_data(json!({
//!     "couple": { "groom": { "name": "민수" } },
//!     "venue": { "name": "더채플", "lat": "37.52" }
//! }));
//!
//! assert_eq!(data.couple.groom.name.as_deref(), Some("민수"));
//! assert_eq!(data.venue.name.as_deref(), Some("더채플"));
//! assert_eq!(data.venue.lat, None);
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::any::type_name;
use tracing::warn;

/// `deserialize_with` target: a malformed field becomes `T::default()`
pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_or_default(value))
}

/// Parse `value` as `T`, logging and returning the default when it does not fit
pub fn value_or_default<T: DeserializeOwned + Default>(value: Value) -> T {
    match serde_json::from_value(value) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(
                expected = type_name::<T>(),
                error = %err,
                "Malformed field, using default"
            );
            T::default()
        }
    }
}
