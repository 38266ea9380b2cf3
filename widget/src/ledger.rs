//! Per-session accounting of how many units one wallet has minted.

use crate::error::{Result, WidgetError};

/// Counts live only as long as the session: a fresh connection starts a
/// fresh ledger, and nothing is persisted across page loads.
#[derive(Debug, Clone)]
pub struct MintLedger {
    minted: u64,
    cap: u64,
}

impl MintLedger {
    pub fn new(cap: u64) -> Self {
        Self { minted: 0, cap }
    }

    pub fn minted(&self) -> u64 {
        self.minted
    }

    pub fn cap(&self) -> u64 {
        self.cap
    }

    pub fn remaining(&self) -> u64 {
        self.cap.saturating_sub(self.minted)
    }

    /// Check that `quantity` more units fit under the cap. Must pass
    /// before any submission is attempted.
    pub fn check(&self, quantity: u64) -> Result<()> {
        if self.minted.saturating_add(quantity) > self.cap {
            return Err(WidgetError::WalletCapExceeded {
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    /// Record a fully completed batch. Partial batches never reach here;
    /// their completed units are reported through the error instead.
    pub fn record(&mut self, quantity: u64) {
        self.minted = self.minted.saturating_add(quantity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_check_reports_remaining() {
        let mut ledger = MintLedger::new(10);
        ledger.record(8);
        let err = ledger.check(3).unwrap_err();
        match err {
            WidgetError::WalletCapExceeded { remaining } => assert_eq!(remaining, 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(ledger.check(2).is_ok());
    }

    #[test]
    fn test_record_up_to_cap() {
        let mut ledger = MintLedger::new(10);
        assert!(ledger.check(10).is_ok());
        ledger.record(10);
        assert_eq!(ledger.remaining(), 0);
        let err = ledger.check(1).unwrap_err();
        assert!(matches!(
            err,
            WidgetError::WalletCapExceeded { remaining: 0 }
        ));
    }
}
