//! Signatures - guestbook records and the in-memory store that owns them.
//!
//! A [`SignatureStore`] owns an ordered collection of [`Signature`]s. Queries,
//! updates and removals select records with a [`SignatureMatcher`]: a struct
//! of optional fields where every `Some` field must equal the record's value.
//! Ties always resolve to the first match in insertion order.
//!
//! Every value crossing the store boundary is an owned clone, so mutating a
//! returned record never changes what the store holds.
//!
//! ## Example
//!
//! ```
//! use guestbook::{NewSignature, SignatureMatcher, SignaturePatch, SignatureStore};
//!
//! let store = SignatureStore::new();
//! let ada = store.insert(&NewSignature::new("Ada"));
//!
//! let updated = store
//!     .update_by_id(ada.id, &SignaturePatch::new().message("hello"))
//!     .unwrap();
//! assert_eq!(updated.message.as_deref(), Some("hello"));
//!
//! assert!(store.remove(&SignatureMatcher::new().name("Ada")));
//! assert!(store.is_empty());
//! ```

mod id;
mod matcher;
mod store;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use id::{Clock, IdGenerator, SystemClock};
pub use matcher::SignatureMatcher;
pub use store::SignatureStore;

/// Identifier of a signature: milliseconds since the Unix epoch at insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureId(pub u64);

impl From<u64> for SignatureId {
    fn from(value: u64) -> Self {
        SignatureId(value)
    }
}

impl fmt::Display for SignatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SignatureId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(SignatureId)
    }
}

/// A single guestbook entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub id: SignatureId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Signature {
    pub fn new(id: impl Into<SignatureId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Merge a patch over this record. `None` fields leave the current value.
    pub fn apply(&mut self, patch: &SignaturePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(message) = &patch.message {
            self.message = Some(message.clone());
        }
    }
}

/// Insert payload: a signature before it has been given an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSignature {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NewSignature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Build the stored record for this payload under the given id.
    pub(crate) fn to_signature(&self, id: SignatureId) -> Signature {
        Signature {
            id,
            name: self.name.clone(),
            message: self.message.clone(),
        }
    }
}

/// Fields to merge over an existing signature.
///
/// The id is fixed at insertion and cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignaturePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SignaturePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Error type for signature store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No signature satisfied the matcher.
    NotFound { matcher: SignatureMatcher },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound { matcher } => {
                write!(f, "no signature exists matching {}", matcher)
            }
        }
    }
}

impl std::error::Error for StoreError {}
