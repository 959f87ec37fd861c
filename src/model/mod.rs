//! # Record Model
//!
//! Wire and storage types for Sinaxario records. The same serde shape is
//! used for HTTP bodies and for documents in the backing collection.
//!
//! Encoding always writes the lowercase field names. Decoding is lenient:
//! - keys match fields regardless of ASCII case
//! - absent fields and `null` values keep the field's default
//! - unknown keys are skipped
//! - when a key repeats, the last value wins

mod santos;
mod sinaxario;

pub use santos::Santos;
pub use sinaxario::{InsertedId, Sinaxario};

use std::fmt;

use serde::de::{self, DeserializeSeed, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Resolves an object key to its position in `fields`, ignoring ASCII
/// case. Unknown keys resolve to `None`.
///
/// Request bodies spell keys as `Fonte`, `fonte` or `FONTE` and all of
/// them land on the same field.
pub(crate) struct FieldIndex(pub &'static [&'static str]);

impl<'de> DeserializeSeed<'de> for FieldIndex {
    type Value = Option<usize>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_identifier(self)
    }
}

impl<'de> Visitor<'de> for FieldIndex {
    type Value = Option<usize>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a field name")
    }

    fn visit_str<E>(self, key: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        // Exact spelling first, so a key matching a field verbatim always wins.
        Ok(self
            .0
            .iter()
            .position(|field| *field == key)
            .or_else(|| self.0.iter().position(|field| field.eq_ignore_ascii_case(key))))
    }
}

/// Read the next map value into `slot`. A `null` leaves `slot` as it was;
/// a repeated key overwrites the earlier value.
pub(crate) fn merge_value<'de, A, T>(map: &mut A, slot: &mut T) -> Result<(), A::Error>
where
    A: MapAccess<'de>,
    T: Deserialize<'de>,
{
    if let Some(value) = map.next_value::<Option<T>>()? {
        *slot = value;
    }
    Ok(())
}
