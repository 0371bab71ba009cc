//! SignatureMatcher - the partial-record predicate used to select signatures.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Signature, SignatureId};

/// A subset of signature fields that a record must equal to match.
///
/// Fields left as `None` are not checked, so the empty matcher matches every
/// record (and therefore selects the first one in the collection).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureMatcher {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SignatureId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SignatureMatcher {
    /// The empty matcher.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: impl Into<SignatureId>) -> Self {
        Self::new().id(id)
    }

    pub fn id(mut self, id: impl Into<SignatureId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none() && self.message.is_none()
    }

    /// Returns true when every field set on the matcher equals the record's.
    ///
    /// A `message` constraint never matches a record without a message.
    pub fn matches(&self, signature: &Signature) -> bool {
        if let Some(id) = self.id {
            if signature.id != id {
                return false;
            }
        }
        if let Some(name) = &self.name {
            if &signature.name != name {
                return false;
            }
        }
        if let Some(message) = &self.message {
            if signature.message.as_ref() != Some(message) {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for SignatureMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(id) = self.id {
            parts.push(format!("id: {}", id));
        }
        if let Some(name) = &self.name {
            parts.push(format!("name: {:?}", name));
        }
        if let Some(message) = &self.message {
            parts.push(format!("message: {:?}", message));
        }
        write!(f, "{{{}}}", parts.join(", "))
    }
}
