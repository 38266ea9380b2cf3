use std::sync::Arc;

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;

use crate::core::provider::WalletProvider;
use crate::error::BoxedError;
use crate::types::MintReceipt;

/// Abstraction over the mint program's client SDK.
///
/// All account-layout and transaction-construction knowledge lives behind
/// this seam; the widget only reads two facts about the drop and submits
/// single-unit purchases.
#[async_trait]
pub trait MintService: Send + Sync {
    /// Total units minted so far across all wallets.
    async fn minted_count(&self, machine: &Pubkey) -> Result<u64, BoxedError>;

    /// Timestamp of the most recent mint in unix milliseconds, if any mint
    /// has happened yet.
    async fn last_mint_timestamp(&self, machine: &Pubkey) -> Result<Option<i64>, BoxedError>;

    /// Submit a single-unit purchase for `buyer`. One call per unit; the
    /// widget sequences batches itself.
    async fn submit_mint(&self, machine: &Pubkey, buyer: &Pubkey)
        -> Result<MintReceipt, BoxedError>;
}

/// Builds a [`MintService`] bound to one connected session's signing
/// capability, the way a page builds its SDK client around the wallet
/// adapter right after connect. A bind failure is the "libraries not
/// ready" case: the widget stays connected but cannot mint.
#[async_trait]
pub trait MintServiceFactory: Send + Sync {
    async fn bind(
        &self,
        provider: Arc<dyn WalletProvider>,
        buyer: Pubkey,
    ) -> Result<Arc<dyn MintService>, BoxedError>;
}
