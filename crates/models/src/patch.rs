//! Helpers for partial updates.
//!
//! A patch field is `Option<Option<T>>`: absent keeps the stored value,
//! `null` clears it, a value replaces it.

use sea_orm::{ActiveValue, Set, Value};
use serde::{Deserialize, Deserializer};

/// `deserialize_with` target that tells an explicit `null` apart from a missing key.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Write `value` into `slot` only when the field was supplied.
pub fn merge<T>(slot: &mut ActiveValue<T>, value: Option<T>)
where
    T: Into<Value>,
{
    if let Some(v) = value {
        *slot = Set(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue::{NotSet, Unchanged};

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "present")]
        bio: Option<Option<String>>,
    }

    #[test]
    fn missing_null_and_value_are_distinct() {
        let missing: Probe = serde_json::from_str("{}").unwrap();
        let null: Probe = serde_json::from_str(r#"{"bio": null}"#).unwrap();
        let value: Probe = serde_json::from_str(r#"{"bio": "hi"}"#).unwrap();
        assert_eq!(missing.bio, None);
        assert_eq!(null.bio, Some(None));
        assert_eq!(value.bio, Some(Some("hi".to_string())));
    }

    #[test]
    fn merge_only_touches_supplied_fields() {
        let mut kept: ActiveValue<Option<String>> = Unchanged(Some("old".into()));
        merge(&mut kept, None);
        assert_eq!(kept, Unchanged(Some("old".to_string())));

        let mut cleared: ActiveValue<Option<String>> = Unchanged(Some("old".into()));
        merge(&mut cleared, Some(None));
        assert_eq!(cleared, Set(None));

        let mut fresh: ActiveValue<String> = NotSet;
        merge(&mut fresh, Some("new".to_string()));
        assert_eq!(fresh, Set("new".to_string()));
    }
}
