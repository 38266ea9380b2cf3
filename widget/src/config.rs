use std::str::FromStr;

use serde::{Deserialize, Serialize};
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::pubkey::Pubkey;

use crate::auction::AuctionSchedule;
use crate::error::{Result, WidgetError};

/// Knobs for one widget instance.
///
/// Defaults mirror the production drop: 3 SOL at the top of the auction,
/// 0.03 SOL shaved off per minute down to a 0.5 SOL floor, ten mints per
/// wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Address of the machine account governing the drop
    pub machine_address: String,

    /// RPC endpoint used by the read-path service adapter
    pub rpc_endpoint: String,

    /// Install call-to-action shown when no wallet provider is present
    pub wallet_install_url: String,

    /// Price at the top of the reverse auction, in lamports
    pub starting_price_lamports: u64,

    /// The price never decays below this, in lamports
    pub floor_price_lamports: u64,

    /// Lamports shaved off per elapsed interval
    pub decay_per_interval_lamports: u64,

    /// Length of one decay interval, in milliseconds
    pub interval_ms: u64,

    /// Maximum units one connected wallet may mint
    pub per_wallet_cap: u64,

    /// Maximum units selectable in a single batch
    pub per_tx_max: u64,

    /// How long a transient notice stays on screen, in milliseconds
    pub notice_ttl_ms: u64,

    /// Price tick cadence, in milliseconds
    pub tick_period_ms: u64,

    /// Remote sync cadence, in milliseconds
    pub sync_period_ms: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            machine_address: "FNGdN51cFFsCLMiiiySrWiggQB6ASkaMEc7Ud7p4YGNc".to_string(),
            rpc_endpoint: "https://api.devnet.solana.com".to_string(),
            wallet_install_url: "https://phantom.app/".to_string(),
            starting_price_lamports: 3 * LAMPORTS_PER_SOL,
            floor_price_lamports: LAMPORTS_PER_SOL / 2,
            decay_per_interval_lamports: 3 * LAMPORTS_PER_SOL / 100,
            interval_ms: 60_000,
            per_wallet_cap: 10,
            per_tx_max: 10,
            notice_ttl_ms: 5_000,
            tick_period_ms: 1_000,
            sync_period_ms: 10_000,
        }
    }
}

impl WidgetConfig {
    /// Parse the configured machine address.
    pub fn machine_pubkey(&self) -> Result<Pubkey> {
        Pubkey::from_str(&self.machine_address)
            .map_err(|err| WidgetError::Config(format!("bad machine address: {err}")))
    }

    /// The auction schedule described by this configuration.
    pub fn schedule(&self) -> AuctionSchedule {
        AuctionSchedule {
            starting_lamports: self.starting_price_lamports,
            floor_lamports: self.floor_price_lamports,
            decay_lamports: self.decay_per_interval_lamports,
            interval_ms: self.interval_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_machine_address_parses() {
        let config = WidgetConfig::default();
        assert!(config.machine_pubkey().is_ok());
    }

    #[test]
    fn test_bad_machine_address_is_config_error() {
        let config = WidgetConfig {
            machine_address: "not-a-pubkey".to_string(),
            ..WidgetConfig::default()
        };
        assert!(matches!(
            config.machine_pubkey(),
            Err(WidgetError::Config(_))
        ));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = WidgetConfig {
            per_wallet_cap: 4,
            interval_ms: 30_000,
            ..WidgetConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: WidgetConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.per_wallet_cap, 4);
        assert_eq!(back.interval_ms, 30_000);
        assert_eq!(back.machine_address, config.machine_address);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let back: WidgetConfig = serde_json::from_str(r#"{"per_wallet_cap": 2}"#).unwrap();
        assert_eq!(back.per_wallet_cap, 2);
        assert_eq!(back.starting_price_lamports, 3 * LAMPORTS_PER_SOL);
    }
}
