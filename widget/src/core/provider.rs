use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;

use crate::error::BoxedError;

/// Abstraction over the browser wallet extension.
///
/// This mirrors what wallet adapters expose to a page: a connect prompt,
/// a disconnect call, and transaction signing for the mint service to use.
/// The widget never looks inside; it only drives the prompts and reacts to
/// the results.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the wallet to open its connect prompt; resolves to the wallet
    /// address on approval.
    async fn connect(&self) -> Result<Pubkey, BoxedError>;

    /// Ask the wallet to drop the session on its side.
    async fn disconnect(&self) -> Result<(), BoxedError>;

    /// Sign an opaque transaction payload on behalf of the connected
    /// wallet. Not every adapter supports detached signing; those return
    /// an error and the mint service falls back to its own flow.
    async fn sign(&self, payload: &[u8]) -> Result<Signature, BoxedError>;
}
