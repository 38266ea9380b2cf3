//! Clearly-labeled simulated mint service.
//!
//! Lets the widget run end to end with no chain access: demos, tests, and
//! embeddings that want a no-op mode instead of a dead mint button when
//! the real SDK is not wired up. Every receipt it issues is marked
//! `simulated` so it can never be mistaken for an on-chain mint.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;

use crate::core::clock::Clock;
use crate::core::provider::WalletProvider;
use crate::core::service::{MintService, MintServiceFactory};
use crate::error::BoxedError;
use crate::types::MintReceipt;

#[derive(Debug, Default)]
struct SimState {
    minted_total: u64,
    last_mint_ms: Option<i64>,
    submissions: u64,
    fail_submission: Option<(u64, String)>,
    fail_reads: bool,
}

pub struct SimulatedMintService {
    clock: Arc<dyn Clock>,
    state: Mutex<SimState>,
}

impl SimulatedMintService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            state: Mutex::new(SimState::default()),
        }
    }

    /// Pre-load drop state, as if other wallets had already minted.
    pub fn with_minted(self, count: u64, last_mint_ms: Option<i64>) -> Self {
        {
            let mut state = self.lock();
            state.minted_total = count;
            state.last_mint_ms = last_mint_ms;
        }
        self
    }

    /// Make the n-th submission (1-based, counted across the service's
    /// lifetime) fail with `message`. Exercises partial-batch behavior.
    pub fn fail_on_submission(&self, n: u64, message: impl Into<String>) {
        self.lock().fail_submission = Some((n, message.into()));
    }

    /// Make `minted_count` and `last_mint_timestamp` fail until turned
    /// off. Exercises the local-clock fallback paths.
    pub fn set_read_failures(&self, failing: bool) {
        self.lock().fail_reads = failing;
    }

    /// Record a mint that happened outside this widget, as a remote
    /// viewer's purchase would. Tests use it to drive sync behavior.
    pub fn record_external_mint(&self, at_ms: i64) {
        let mut state = self.lock();
        state.minted_total += 1;
        state.last_mint_ms = Some(at_ms);
    }

    pub fn submissions(&self) -> u64 {
        self.lock().submissions
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl MintService for SimulatedMintService {
    async fn minted_count(&self, _machine: &Pubkey) -> Result<u64, BoxedError> {
        let state = self.lock();
        if state.fail_reads {
            return Err("simulated read failure".into());
        }
        Ok(state.minted_total)
    }

    async fn last_mint_timestamp(&self, _machine: &Pubkey) -> Result<Option<i64>, BoxedError> {
        let state = self.lock();
        if state.fail_reads {
            return Err("simulated read failure".into());
        }
        Ok(state.last_mint_ms)
    }

    async fn submit_mint(
        &self,
        _machine: &Pubkey,
        _buyer: &Pubkey,
    ) -> Result<MintReceipt, BoxedError> {
        let now = self.clock.now_ms();
        let mut state = self.lock();
        state.submissions += 1;
        if let Some((failing_unit, message)) = &state.fail_submission {
            if state.submissions == *failing_unit {
                return Err(message.clone().into());
            }
        }
        state.minted_total += 1;
        state.last_mint_ms = Some(now);
        Ok(MintReceipt {
            item: Pubkey::new_unique(),
            signature: None,
            simulated: true,
        })
    }
}

/// Factory handing out a shared simulated service, so tests and demos can
/// keep their own handle to poke at drop state.
pub struct SimulatedMintFactory {
    service: Arc<SimulatedMintService>,
}

impl SimulatedMintFactory {
    pub fn new(service: Arc<SimulatedMintService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl MintServiceFactory for SimulatedMintFactory {
    async fn bind(
        &self,
        _provider: Arc<dyn WalletProvider>,
        _buyer: Pubkey,
    ) -> Result<Arc<dyn MintService>, BoxedError> {
        Ok(self.service.clone())
    }
}
