use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;

use crate::notice::Notice;

/// One connected wallet session.
///
/// Sessions are never persisted: every widget instance starts
/// disconnected, and a reconnect always produces a fresh session with a
/// fresh allowance.
#[derive(Debug, Clone)]
pub struct WalletSession {
    pub address: Pubkey,
    pub connected_at_ms: i64,
}

/// Receipt for one successfully minted unit.
#[derive(Debug, Clone)]
pub struct MintReceipt {
    /// Address of the minted item
    pub item: Pubkey,

    /// Submission signature, when the service exposes one
    pub signature: Option<Signature>,

    /// Set by the simulated service so no-op receipts are never mistaken
    /// for on-chain ones
    pub simulated: bool,
}

/// Result of a fully successful mint batch.
#[derive(Debug, Clone)]
pub struct MintOutcome {
    pub receipts: Vec<MintReceipt>,

    /// Units this wallet has used after the batch
    pub used: u64,

    /// The per-wallet cap the batch was checked against
    pub cap: u64,
}

/// Price display state, recomputed on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceDisplay {
    pub price_lamports: u64,

    /// Milliseconds until the next scheduled price decrease
    pub next_decrease_in_ms: u64,
}

/// Read-only view of the widget for renderers. Built on demand; holds no
/// state of its own.
#[derive(Debug, Clone)]
pub struct WidgetSnapshot {
    pub connected: bool,

    /// Shortened wallet address (`abcd...wxyz`) when connected
    pub address: Option<String>,

    pub price: PriceDisplay,

    /// Drop-wide minted count as last read from the service
    pub minted_total: u64,

    /// Units this session may still mint under its cap
    pub remaining_allowance: u64,

    /// Upper bound for the quantity stepper: the per-transaction maximum,
    /// shrunk to the remaining allowance as the cap approaches
    pub max_selectable: u64,

    /// Live transient notice, if one has not yet expired
    pub notice: Option<Notice>,
}

/// Shortened address form used in the connected-wallet indicator.
pub fn short_address(address: &Pubkey) -> String {
    let full = address.to_string();
    format!("{}...{}", &full[..4], &full[full.len() - 4..])
}

/// Render a lamport amount as SOL with two decimal places.
pub fn format_sol(lamports: u64) -> String {
    format!("{:.2}", lamports as f64 / LAMPORTS_PER_SOL as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_address() {
        let address = Pubkey::new_unique();
        let full = address.to_string();
        let short = short_address(&address);
        assert!(short.starts_with(&full[..4]));
        assert!(short.ends_with(&full[full.len() - 4..]));
        assert!(short.contains("..."));
    }

    #[test]
    fn test_format_sol_two_decimals() {
        assert_eq!(format_sol(3 * LAMPORTS_PER_SOL), "3.00");
        assert_eq!(format_sol(2_940_000_000), "2.94");
        assert_eq!(format_sol(LAMPORTS_PER_SOL / 2), "0.50");
        assert_eq!(format_sol(8_820_000_000), "8.82");
    }
}
