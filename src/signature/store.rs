//! SignatureStore - Vec-backed record store with matcher-based queries.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use super::id::{Clock, IdGenerator};
use super::{NewSignature, Signature, SignatureId, SignatureMatcher, SignaturePatch, StoreError};

struct Inner {
    signatures: Vec<Signature>,
    ids: IdGenerator,
}

impl Inner {
    fn find_index(&self, matcher: &SignatureMatcher) -> Option<usize> {
        self.signatures.iter().position(|s| matcher.matches(s))
    }
}

/// In-memory signature store.
///
/// Records keep insertion order. Every read returns clones and every write
/// copies its input, so no caller ever holds a reference into stored state.
/// Clone-friendly via Arc: clones share the same collection.
///
/// Each operation holds the lock for its whole duration, so the
/// find-then-mutate steps of `update` and `remove` cannot interleave.
#[derive(Clone)]
pub struct SignatureStore {
    inner: Arc<RwLock<Inner>>,
}

impl Default for SignatureStore {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Signature>> for SignatureStore {
    fn from(signatures: Vec<Signature>) -> Self {
        let store = Self::new();
        store.set_all(signatures);
        store
    }
}

impl SignatureStore {
    /// Create an empty store that stamps ids from the system clock.
    pub fn new() -> Self {
        Self::with_id_generator(IdGenerator::default())
    }

    /// Create an empty store that stamps ids from the given clock.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self::with_id_generator(IdGenerator::new(clock))
    }

    fn with_id_generator(ids: IdGenerator) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                signatures: Vec::new(),
                ids,
            })),
        }
    }

    /// All signatures, in insertion order.
    pub fn get_all(&self) -> Vec<Signature> {
        self.inner.read().signatures.clone()
    }

    /// Replace the whole collection. Contents are not validated.
    ///
    /// Later inserts are given ids above every id in `signatures`, up to `u64::MAX`.
    pub fn set_all(&self, signatures: Vec<Signature>) {
        let mut inner = self.inner.write();
        if let Some(max) = signatures.iter().map(|s| s.id).max() {
            inner.ids.observe(max);
        }
        debug!(count = signatures.len(), "replacing signature collection");
        inner.signatures = signatures;
    }

    /// Remove every signature.
    pub fn clear(&self) {
        self.set_all(Vec::new());
    }

    pub fn len(&self) -> usize {
        self.inner.read().signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().signatures.is_empty()
    }

    /// Index of the first signature matching `matcher`.
    pub fn find_index(&self, matcher: &SignatureMatcher) -> Option<usize> {
        self.inner.read().find_index(matcher)
    }

    /// The first signature matching `matcher`.
    pub fn find(&self, matcher: &SignatureMatcher) -> Option<Signature> {
        let inner = self.inner.read();
        inner.find_index(matcher).map(|idx| inner.signatures[idx].clone())
    }

    /// Like [`find`](Self::find), but a missing signature is an error.
    pub fn find_or_fail(&self, matcher: &SignatureMatcher) -> Result<Signature, StoreError> {
        self.find(matcher).ok_or_else(|| StoreError::NotFound {
            matcher: matcher.clone(),
        })
    }

    pub fn find_by_id(&self, id: SignatureId) -> Option<Signature> {
        self.find(&SignatureMatcher::by_id(id))
    }

    pub fn find_by_id_or_fail(&self, id: SignatureId) -> Result<Signature, StoreError> {
        self.find_or_fail(&SignatureMatcher::by_id(id))
    }

    /// Append a new signature with a freshly generated id.
    pub fn insert(&self, signature: &NewSignature) -> Signature {
        let mut inner = self.inner.write();
        let id = inner.ids.next_id();
        let stored = signature.to_signature(id);
        inner.signatures.push(stored.clone());
        debug!(%id, name = %stored.name, "inserted signature");
        stored
    }

    /// Merge `patch` over the first signature matching `matcher`.
    ///
    /// Returns `None`, changing nothing, when no signature matches.
    pub fn update(
        &self,
        matcher: &SignatureMatcher,
        patch: &SignaturePatch,
    ) -> Option<Signature> {
        let mut inner = self.inner.write();
        let idx = inner.find_index(matcher)?;
        let signature = &mut inner.signatures[idx];
        signature.apply(patch);
        debug!(id = %signature.id, "updated signature");
        Some(signature.clone())
    }

    pub fn update_by_id(&self, id: SignatureId, patch: &SignaturePatch) -> Option<Signature> {
        self.update(&SignatureMatcher::by_id(id), patch)
    }

    /// Remove the first signature matching `matcher`. Returns true if one was removed.
    pub fn remove(&self, matcher: &SignatureMatcher) -> bool {
        let mut inner = self.inner.write();
        match inner.find_index(matcher) {
            Some(idx) => {
                let removed = inner.signatures.remove(idx);
                debug!(id = %removed.id, "removed signature");
                true
            }
            None => false,
        }
    }

    pub fn remove_by_id(&self, id: SignatureId) -> bool {
        self.remove(&SignatureMatcher::by_id(id))
    }
}
