//! Newtype IDs for type-safe entity references.
//!
//! The Neurolab backend issues opaque string identifiers (hex object ids in
//! the `_id` field). Use the `define_id!` macro to create type-safe wrappers
//! that prevent accidentally mixing IDs from different entity types.

use serde::{Deserialize, Serialize};

/// Macro to define a type-safe ID wrapper around an opaque backend string.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// The contents are never interpreted by the client; equality and hashing
/// are the only operations the console performs on an ID.
///
/// # Example
///
/// ```rust
/// # use neurolab_core::define_id;
/// define_id!(RequestId);
/// define_id!(ContactId);
///
/// let request_id = RequestId::new("64fa0c2e9d1b");
/// let contact_id = ContactId::new("64fa0c2e9d1b");
///
/// // These are different types, so this won't compile:
/// // let _: RequestId = contact_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(RequestId);
define_id!(ContactId);
define_id!(WhitelistId);

/// An identifier that can belong to either expandable list on the dashboard.
///
/// The dashboard keeps a single accordion across the combined partner-request
/// and contact lists, so the expanded-item marker must range over both ID
/// types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    /// A partner request row.
    Request(RequestId),
    /// A contact message row.
    Contact(ContactId),
}

impl From<RequestId> for ItemId {
    fn from(id: RequestId) -> Self {
        Self::Request(id)
    }
}

impl From<ContactId> for ItemId {
    fn from(id: ContactId) -> Self {
        Self::Contact(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = RequestId::new("64fa0c2e9d1b4a0012ab34cd");
        assert_eq!(id.as_str(), "64fa0c2e9d1b4a0012ab34cd");
        assert_eq!(id.to_string(), "64fa0c2e9d1b4a0012ab34cd");
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = ContactId::new("abc123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""abc123""#);

        let back: ContactId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_item_id_equality_is_typed() {
        let request: ItemId = RequestId::new("same").into();
        let contact: ItemId = ContactId::new("same").into();
        assert_ne!(request, contact);
    }
}
