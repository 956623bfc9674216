//! Partial-update field wrapper.
//!
//! A `Patch<T>` distinguishes a field that was omitted from a request body
//! from one that was sent. Combined with `#[serde(default)]` on the field,
//! an absent key deserializes to [`Patch::Absent`] while any present value
//! (including `null` when `T = Option<_>`) becomes [`Patch::Set`].
//!
//! ```ignore
//! #[derive(Deserialize)]
//! struct UpdateTodo {
//!     #[serde(default)]
//!     title: Patch<String>,
//!     #[serde(default)]
//!     description: Patch<Option<String>>, // `null` clears
//! }
//! ```

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was not supplied; leave the stored value unchanged.
    Absent,
    /// The field was supplied with this value.
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// Borrow the supplied value, if any.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(value) => Some(value),
            Patch::Absent => None,
        }
    }

    /// Resolve against the currently stored value.
    pub fn unwrap_or(self, current: T) -> T {
        match self {
            Patch::Set(value) => value,
            Patch::Absent => current,
        }
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Patch::Set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        title: Patch<String>,
        #[serde(default)]
        description: Patch<Option<String>>,
    }

    #[test]
    fn missing_keys_are_absent() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert!(body.title.is_absent());
        assert!(body.description.is_absent());
    }

    #[test]
    fn null_on_optional_field_clears() {
        let body: Body = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(body.description, Patch::Set(None));
    }

    #[test]
    fn empty_string_is_set_not_absent() {
        let body: Body = serde_json::from_str(r#"{"description": ""}"#).unwrap();
        assert_eq!(body.description, Patch::Set(Some(String::new())));
    }

    #[test]
    fn null_on_required_field_is_rejected() {
        let result: Result<Body, _> = serde_json::from_str(r#"{"title": null}"#);
        assert!(result.is_err());
    }

    #[test]
    fn unwrap_or_keeps_current_when_absent() {
        assert_eq!(Patch::<i32>::Absent.unwrap_or(4), 4);
        assert_eq!(Patch::Set(9).unwrap_or(4), 9);
    }
}
