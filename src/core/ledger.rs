//! The cash register shared by all chefs.

use parking_lot::Mutex;

#[derive(Debug, Default)]
struct LedgerState {
    total: u64,
    credits: u64,
}

/// Shared revenue accumulator. Every mutation goes through one mutex, held only
/// for the addition itself.
#[derive(Debug, Default)]
pub struct Ledger {
    state: Mutex<LedgerState>,
}

impl Ledger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the register.
    pub fn credit(&self, amount: u64) {
        let mut state = self.state.lock();
        state.total = state.total.saturating_add(amount);
        state.credits += 1;
    }

    /// Snapshot of the running total. Authoritative once all chefs are quiet.
    #[must_use]
    pub fn read(&self) -> u64 {
        self.state.lock().total
    }

    /// Number of credits recorded so far.
    #[must_use]
    pub fn credits(&self) -> u64 {
        self.state.lock().credits
    }
}
