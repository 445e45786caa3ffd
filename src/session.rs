//! Shared handle to one analyst's register.
//!
//! Register operations are each atomic on their own; the mutex makes them
//! atomic relative to each other when several callers hold the same handle,
//! so an `add_modality` can never interleave with a `remove_modality`.

use crate::aggregation::{ModalityRanking, RegisterSummary};
use crate::errors::Result;
use crate::register::{RegisterSnapshot, RiskRegister};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SharedRegister {
    inner: Arc<Mutex<RiskRegister>>,
}

impl SharedRegister {
    pub fn new(register: RiskRegister) -> Self {
        Self {
            inner: Arc::new(Mutex::new(register)),
        }
    }

    /// Run a mutation under the lock.
    ///
    /// The closure works on a copy; the copy replaces the register only if
    /// the closure returns `Ok` and the result still satisfies the register
    /// invariants. A sequence of operations inside one closure therefore
    /// commits or fails as a whole.
    pub fn mutate<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut RiskRegister) -> Result<T>,
    {
        // parking_lot::Mutex never poisons
        let mut guard = self.inner.lock();
        let mut working = guard.clone();
        let value = f(&mut working)?;
        working.check_invariants()?;
        *guard = working;
        Ok(value)
    }

    pub fn read<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&RiskRegister) -> T,
    {
        let guard = self.inner.lock();
        f(&guard)
    }

    pub fn snapshot(&self) -> RegisterSnapshot {
        self.read(RiskRegister::snapshot)
    }

    pub fn ranking(&self) -> ModalityRanking {
        self.read(RiskRegister::ranking)
    }

    pub fn summary(&self) -> RegisterSummary {
        self.read(|register| RegisterSummary::from_register(register, &register.ranking()))
    }
}
