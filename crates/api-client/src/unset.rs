//! Tri-state optional for wire payloads.
//!
//! The REST API distinguishes a field that is absent from a payload from a
//! field that is present with an explicit `null`. A plain `Option` collapses
//! the two, so optional model fields use [`MaybeUnset`] instead:
//!
//! * [`MaybeUnset::Unset`] — the field is omitted from the payload entirely.
//!   This is the client-side default.
//! * [`MaybeUnset::Null`] — the field is emitted as an explicit `null`.
//! * [`MaybeUnset::Set`] — the field carries a value.
//!
//! Fields of this type must be declared as
//! `#[serde(default, skip_serializing_if = "MaybeUnset::is_unset")]` so that
//! `Unset` never reaches the serializer.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MaybeUnset<T> {
    /// Field is not part of the payload.
    #[default]
    Unset,
    /// Field is present with an explicit `null`.
    Null,
    /// Field is present with a value.
    Set(T),
}

impl<T> MaybeUnset<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, MaybeUnset::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, MaybeUnset::Null)
    }

    pub fn is_set(&self) -> bool {
        matches!(self, MaybeUnset::Set(_))
    }

    /// Value of the field, if any. `Unset` and `Null` both map to `None`.
    pub fn value(&self) -> Option<&T> {
        match self {
            MaybeUnset::Set(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            MaybeUnset::Set(v) => Some(v),
            _ => None,
        }
    }
}

/// `Some` maps to `Set`, `None` maps to an explicit `Null`. Use
/// [`MaybeUnset::Unset`] directly to drop the field from the payload.
///
/// No blanket `From<T>` impl exists: it would overlap with this one for
/// `Option` arguments.
impl<T> From<Option<T>> for MaybeUnset<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => MaybeUnset::Set(v),
            None => MaybeUnset::Null,
        }
    }
}

impl<T: Serialize> Serialize for MaybeUnset<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            // `skip_serializing_if` keeps this variant away from the
            // serializer; reaching it means the field declaration is wrong.
            MaybeUnset::Unset => Err(serde::ser::Error::custom(
                "`MaybeUnset::Unset` fields must be skipped with \
                 `skip_serializing_if = \"MaybeUnset::is_unset\"`",
            )),
            MaybeUnset::Null => serializer.serialize_none(),
            MaybeUnset::Set(v) => serializer.serialize_some(v),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for MaybeUnset<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // An absent key never reaches this point: `#[serde(default)]`
        // produces `Unset` for it. A present key is either `null` or a value.
        Ok(match Option::<T>::deserialize(deserializer)? {
            None => MaybeUnset::Null,
            Some(v) => MaybeUnset::Set(v),
        })
    }
}

#[cfg(test)]
mod test {
    use super::MaybeUnset;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
    struct Probe {
        #[serde(default, skip_serializing_if = "MaybeUnset::is_unset")]
        field: MaybeUnset<String>,
    }

    #[test]
    fn unset_is_omitted() {
        let v = serde_json::to_value(Probe {
            field: MaybeUnset::Unset,
        })
        .unwrap();
        assert_eq!(v, json!({}));
    }

    #[test]
    fn null_is_emitted() {
        let v = serde_json::to_value(Probe {
            field: MaybeUnset::Null,
        })
        .unwrap();
        assert_eq!(v, json!({ "field": null }));
    }

    #[test]
    fn absent_null_and_value_decode_to_distinct_states() {
        let absent: Probe = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.field, MaybeUnset::Unset);

        let null: Probe = serde_json::from_value(json!({ "field": null })).unwrap();
        assert_eq!(null.field, MaybeUnset::Null);

        let set: Probe = serde_json::from_value(json!({ "field": "x" })).unwrap();
        assert_eq!(set.field, MaybeUnset::Set("x".to_string()));
    }

    #[test]
    fn option_conversion_maps_none_to_null() {
        assert_eq!(MaybeUnset::from(None::<i64>), MaybeUnset::Null);
        assert_eq!(MaybeUnset::from(Some(1i64)), MaybeUnset::Set(1));
    }
}
