// Example: the read-path RPC adapter against devnet
//
// Reads the drop's minted count and last-mint time without a wallet.
// Needs network access; failures are printed, not fatal.

use pawnz_mint_widget::{MintService, RpcMintService, WidgetConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = WidgetConfig::default();
    let machine = config.machine_pubkey()?;
    let service = RpcMintService::new(config.rpc_endpoint.clone());

    println!("Reading machine {machine} via {}", config.rpc_endpoint);

    match service.minted_count(&machine).await {
        Ok(count) => println!("Minted so far: {count}"),
        Err(err) => println!("Minted-count read failed: {err}"),
    }

    match service.last_mint_timestamp(&machine).await {
        Ok(Some(timestamp_ms)) => println!("Last mint at {timestamp_ms} (unix ms)"),
        Ok(None) => println!("No mints yet"),
        Err(err) => println!("Last-mint read failed: {err}"),
    }

    Ok(())
}
