//! Id generation for new signatures.

use std::time::{SystemTime, UNIX_EPOCH};

use super::SignatureId;

/// Source of wall-clock time in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Issues signature ids from a clock, strictly increasing.
///
/// Two inserts in the same millisecond get consecutive ids rather than the
/// same one. Ids saturate at `u64::MAX`.
pub struct IdGenerator {
    clock: Box<dyn Clock>,
    last: Option<u64>,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl IdGenerator {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            last: None,
        }
    }

    pub fn next_id(&mut self) -> SignatureId {
        let now = self.clock.now_ms();
        let id = match self.last {
            Some(last) if now <= last => last.saturating_add(1),
            _ => now,
        };
        self.last = Some(id);
        SignatureId(id)
    }

    /// Never issue `id` or anything below it from now on.
    pub fn observe(&mut self, id: SignatureId) {
        if self.last.map_or(true, |last| id.0 > last) {
            self.last = Some(id.0);
        }
    }
}
