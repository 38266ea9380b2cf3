//! Read-path adapter over plain RPC.
//!
//! Mirrors the production widget's split: the drop's minted count and
//! last-mint time come from raw RPC reads at confirmed commitment, while
//! submission belongs to the external drop SDK. `submit_mint` therefore
//! reports itself unavailable; an embedding that only has RPC access gets
//! live prices and counts with the mint button disabled.

use std::sync::Arc;

use async_trait::async_trait;
use borsh::BorshDeserialize;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_client::GetConfirmedSignaturesForAddress2Config;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;

use crate::config::WidgetConfig;
use crate::core::provider::WalletProvider;
use crate::core::service::{MintService, MintServiceFactory};
use crate::error::BoxedError;
use crate::types::MintReceipt;

/// Anchor-style account discriminator preceding the machine state.
const ACCOUNT_DISCRIMINATOR_LEN: usize = 8;

/// Fixed-width fields of the machine account that precede its
/// variable-length config data. Only `items_redeemed` is consumed; the
/// earlier fields anchor the layout.
#[derive(Debug, BorshDeserialize)]
struct MachineHeader {
    _features: u64,
    _authority: [u8; 32],
    _mint_authority: [u8; 32],
    _collection_mint: [u8; 32],
    items_redeemed: u64,
}

pub struct RpcMintService {
    client: RpcClient,
}

impl RpcMintService {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: RpcClient::new_with_commitment(
                endpoint.into(),
                CommitmentConfig::confirmed(),
            ),
        }
    }
}

#[async_trait]
impl MintService for RpcMintService {
    async fn minted_count(&self, machine: &Pubkey) -> Result<u64, BoxedError> {
        let data = self.client.get_account_data(machine).await?;
        if data.len() <= ACCOUNT_DISCRIMINATOR_LEN {
            return Err("machine account data too small".into());
        }
        let mut body = &data[ACCOUNT_DISCRIMINATOR_LEN..];
        let header = MachineHeader::deserialize(&mut body)?;
        Ok(header.items_redeemed)
    }

    async fn last_mint_timestamp(&self, machine: &Pubkey) -> Result<Option<i64>, BoxedError> {
        let config = GetConfirmedSignaturesForAddress2Config {
            limit: Some(1),
            ..GetConfirmedSignaturesForAddress2Config::default()
        };
        let signatures = self
            .client
            .get_signatures_for_address_with_config(machine, config)
            .await?;
        Ok(signatures
            .first()
            .and_then(|status| status.block_time)
            .map(|seconds| seconds.saturating_mul(1_000)))
    }

    async fn submit_mint(
        &self,
        _machine: &Pubkey,
        _buyer: &Pubkey,
    ) -> Result<MintReceipt, BoxedError> {
        Err("mint submission requires an SDK-backed service".into())
    }
}

/// Creates one RPC connection per session, the way the page opens its
/// connection inside the connect handler.
pub struct RpcMintServiceFactory {
    endpoint: String,
}

impl RpcMintServiceFactory {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(config.rpc_endpoint.clone())
    }
}

#[async_trait]
impl MintServiceFactory for RpcMintServiceFactory {
    async fn bind(
        &self,
        _provider: Arc<dyn WalletProvider>,
        _buyer: Pubkey,
    ) -> Result<Arc<dyn MintService>, BoxedError> {
        Ok(Arc::new(RpcMintService::new(self.endpoint.clone())))
    }
}
