// Example: driving the widget end to end against the simulated service
//
// Demonstrates the full flow with no chain access:
// 1. Connect a wallet (a local keypair standing in for the extension)
// 2. Run the two independent timers (price tick, remote sync)
// 3. Quote and mint a small batch
// 4. Inspect the snapshot a renderer would draw

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pawnz_mint_widget::{
    format_sol, BoxedError, Clock, MintWidget, SimulatedMintFactory, SimulatedMintService,
    SystemClock, WalletProvider, WidgetConfig,
};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;

/// Local keypair standing in for the browser wallet extension.
struct KeypairWallet {
    keypair: Keypair,
}

#[async_trait]
impl WalletProvider for KeypairWallet {
    async fn connect(&self) -> Result<Pubkey, BoxedError> {
        Ok(self.keypair.pubkey())
    }

    async fn disconnect(&self) -> Result<(), BoxedError> {
        Ok(())
    }

    async fn sign(&self, payload: &[u8]) -> Result<Signature, BoxedError> {
        Ok(self.keypair.sign_message(payload))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // short timer periods so the demo finishes quickly
    let config = WidgetConfig {
        tick_period_ms: 500,
        sync_period_ms: 1_500,
        ..WidgetConfig::default()
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let service = Arc::new(SimulatedMintService::new(clock.clone()));
    let mut widget = MintWidget::builder()
        .with_config(config.clone())
        .with_clock(clock)
        .with_provider(Arc::new(KeypairWallet {
            keypair: Keypair::new(),
        }))
        .with_service_factory(Arc::new(SimulatedMintFactory::new(service)))
        .build()?;

    let address = widget.connect().await?;
    println!("Connected as {address}");

    // the two periodic tasks run on independent timers
    let mut price_tick = tokio::time::interval(Duration::from_millis(config.tick_period_ms));
    let mut remote_sync = tokio::time::interval(Duration::from_millis(config.sync_period_ms));
    let shutdown = tokio::time::sleep(Duration::from_secs(3));
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = price_tick.tick() => {
                let display = widget.tick();
                println!(
                    "Price: {} SOL (next decrease in {}s)",
                    format_sol(display.price_lamports),
                    display.next_decrease_in_ms / 1_000
                );
            }
            _ = remote_sync.tick() => {
                if widget.sync_with_remote().await {
                    println!("Adopted a newer remote mint as a price reset");
                }
            }
            _ = &mut shutdown => break,
        }
    }

    let quantity = 2;
    println!(
        "Quoted total for {quantity}: {} SOL",
        format_sol(widget.quote_total(quantity))
    );
    match widget.mint(quantity).await {
        Ok(outcome) => println!(
            "Minted {} item(s) ({}/{} used)",
            outcome.receipts.len(),
            outcome.used,
            outcome.cap
        ),
        Err(err) => println!("Mint failed: {err}"),
    }

    let snapshot = widget.snapshot();
    println!("Drop-wide minted: {}", snapshot.minted_total);
    println!("This wallet can still mint: {}", snapshot.remaining_allowance);

    widget.disconnect().await?;
    Ok(())
}
