use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, warn};
use solana_sdk::pubkey::Pubkey;

use crate::auction::Auction;
use crate::config::WidgetConfig;
use crate::core::clock::{Clock, SystemClock};
use crate::core::provider::WalletProvider;
use crate::core::service::{MintService, MintServiceFactory};
use crate::error::{Result, WidgetError};
use crate::ledger::MintLedger;
use crate::notice::{NoticeBoard, NoticeKind};
use crate::types::{short_address, MintOutcome, PriceDisplay, WalletSession, WidgetSnapshot};

/// The mint widget controller.
///
/// Owns the wallet session, the reverse-auction price, and the per-wallet
/// allowance; drives the wallet provider and the mint service. One
/// instance per rendered widget. Every instance starts disconnected;
/// sessions are never carried across page loads.
pub struct MintWidget {
    config: WidgetConfig,
    machine: Pubkey,
    clock: Arc<dyn Clock>,
    provider: Option<Arc<dyn WalletProvider>>,
    factory: Option<Arc<dyn MintServiceFactory>>,
    session: Option<WalletSession>,
    service: Option<Arc<dyn MintService>>,
    auction: Auction,
    ledger: MintLedger,
    minted_total: u64,
    display: PriceDisplay,
    notices: NoticeBoard,
    minting: Arc<AtomicBool>,
}

/// Builder for [`MintWidget`]. The provider and factory are optional by
/// design: a widget built without a provider reports
/// `ProviderUnavailable` on connect, and one built without a factory
/// connects in degraded mode where minting is disabled.
pub struct MintWidgetBuilder {
    config: WidgetConfig,
    clock: Option<Arc<dyn Clock>>,
    provider: Option<Arc<dyn WalletProvider>>,
    factory: Option<Arc<dyn MintServiceFactory>>,
}

impl MintWidgetBuilder {
    pub fn new() -> Self {
        Self {
            config: WidgetConfig::default(),
            clock: None,
            provider: None,
            factory: None,
        }
    }

    pub fn with_config(mut self, config: WidgetConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_provider(mut self, provider: Arc<dyn WalletProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_service_factory(mut self, factory: Arc<dyn MintServiceFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    pub fn build(self) -> Result<MintWidget> {
        let machine = self.config.machine_pubkey()?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let now = clock.now_ms();
        let auction = Auction::new(self.config.schedule(), now);
        let display = auction.display(now);
        let ledger = MintLedger::new(self.config.per_wallet_cap);
        let notices = NoticeBoard::new(self.config.notice_ttl_ms);

        Ok(MintWidget {
            machine,
            clock,
            provider: self.provider,
            factory: self.factory,
            session: None,
            service: None,
            auction,
            ledger,
            minted_total: 0,
            display,
            notices,
            minting: Arc::new(AtomicBool::new(false)),
            config: self.config,
        })
    }
}

impl Default for MintWidgetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Clears the busy flag even when the surrounding mint future is dropped
/// mid-flight.
struct MintGuard(Arc<AtomicBool>);

impl Drop for MintGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl MintWidget {
    pub fn builder() -> MintWidgetBuilder {
        MintWidgetBuilder::new()
    }

    /// Connect the wallet and bind a mint service to the session.
    ///
    /// A missing provider fails `ProviderUnavailable` and surfaces the
    /// install call-to-action. A missing or failing service factory does
    /// not fail the connect: the session is established in degraded mode
    /// and minting reports `ServiceUnavailable` until a reconnect.
    /// Idempotent when already connected.
    pub async fn connect(&mut self) -> Result<Pubkey> {
        if let Some(session) = &self.session {
            return Ok(session.address);
        }

        let Some(provider) = self.provider.clone() else {
            let text = format!(
                "No wallet extension found. Install one at {}",
                self.config.wallet_install_url
            );
            self.post(NoticeKind::Error, text);
            return Err(WidgetError::ProviderUnavailable);
        };

        let address = match provider.connect().await {
            Ok(address) => address,
            Err(raw) => {
                let err = WidgetError::classify_connect(raw);
                self.post(NoticeKind::Error, format!("Connection failed: {err}"));
                return Err(err);
            }
        };

        let now = self.clock.now_ms();
        self.session = Some(WalletSession {
            address,
            connected_at_ms: now,
        });
        self.ledger = MintLedger::new(self.config.per_wallet_cap);

        match self.factory.clone() {
            Some(factory) => match factory.bind(provider, address).await {
                Ok(service) => self.service = Some(service),
                Err(err) => {
                    warn!("mint service bind failed: {err}");
                    self.post(
                        NoticeKind::Error,
                        "Blockchain libraries not ready. Refresh the page and try again.",
                    );
                }
            },
            None => {
                self.post(
                    NoticeKind::Error,
                    "Blockchain libraries not ready. Refresh the page and try again.",
                );
            }
        }

        if let Err(err) = self.refresh_minted_total().await {
            debug!("minted-count read skipped on connect: {err}");
        }
        self.seed_auction().await;

        if self.service.is_some() {
            self.post(NoticeKind::Success, "Wallet connected successfully!");
        }
        Ok(address)
    }

    /// Disconnect the wallet and tear down the session-bound service.
    /// Ledger and auction state are not persisted anywhere.
    pub async fn disconnect(&mut self) -> Result<()> {
        if self.session.is_none() {
            return Ok(());
        }
        if let Some(provider) = self.provider.clone() {
            if let Err(err) = provider.disconnect().await {
                warn!("wallet disconnect failed: {err}");
            }
        }
        self.teardown();
        self.post(NoticeKind::Success, "Wallet disconnected");
        Ok(())
    }

    /// Entry point for the provider's own disconnect notification: the
    /// wallet already dropped the session on its side, so only local state
    /// is cleared.
    pub fn provider_disconnected(&mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        self.session = None;
        self.service = None;
        self.minting.store(false, Ordering::SeqCst);
    }

    /// Current auction price in lamports.
    pub fn current_price(&self) -> u64 {
        self.auction.current_price(self.clock.now_ms())
    }

    /// Quoted total for `quantity` units at the current price. Pure; no
    /// side effects.
    pub fn quote_total(&self, quantity: u64) -> u64 {
        self.current_price().saturating_mul(quantity)
    }

    /// Mint `quantity` units, one sequential submission per unit.
    ///
    /// A failure on unit `k` aborts the remaining units; the completed
    /// `k - 1` are not rolled back (the chain does not take mints back)
    /// and the ledger is advanced by zero. On full success the ledger
    /// advances by `quantity`, the auction resets to now, and the
    /// drop-wide minted count is re-read.
    pub async fn mint(&mut self, quantity: u64) -> Result<MintOutcome> {
        if self.minting.load(Ordering::SeqCst) {
            return Err(WidgetError::MintInFlight);
        }
        let Some(session) = self.session.clone() else {
            self.post(NoticeKind::Error, "Please connect your wallet first");
            return Err(WidgetError::NotConnected);
        };
        if quantity == 0 {
            return Err(WidgetError::InvalidQuantity(quantity));
        }
        if let Err(err) = self.ledger.check(quantity) {
            self.post(NoticeKind::Error, err.to_string());
            return Err(err);
        }
        let Some(service) = self.service.clone() else {
            self.post(
                NoticeKind::Error,
                "Mint service unavailable. Reconnect your wallet and try again.",
            );
            return Err(WidgetError::ServiceUnavailable);
        };

        self.minting.store(true, Ordering::SeqCst);
        let _guard = MintGuard(self.minting.clone());

        let mut receipts = Vec::with_capacity(quantity as usize);
        for unit in 0..quantity {
            self.post(
                NoticeKind::Info,
                format!("Minting item {} of {}...", unit + 1, quantity),
            );
            match service.submit_mint(&self.machine, &session.address).await {
                Ok(receipt) => receipts.push(receipt),
                Err(raw) => {
                    let err = WidgetError::MintIncomplete {
                        completed: unit,
                        requested: quantity,
                        cause: Box::new(WidgetError::classify_submit(raw)),
                    };
                    self.post(NoticeKind::Error, err.to_string());
                    return Err(err);
                }
            }
        }

        self.ledger.record(quantity);
        let now = self.clock.now_ms();
        self.auction.reset(now);
        self.display = self.auction.display(now);

        if let Err(err) = self.refresh_minted_total().await {
            debug!("minted-count refresh failed after mint: {err}");
        }

        let plural = if quantity == 1 { "" } else { "s" };
        self.post(
            NoticeKind::Success,
            format!(
                "Successfully minted {quantity} item{plural}! ({}/{} used)",
                self.ledger.minted(),
                self.ledger.cap()
            ),
        );

        Ok(MintOutcome {
            receipts,
            used: self.ledger.minted(),
            cap: self.ledger.cap(),
        })
    }

    /// Intended for a one-second cadence. Recomputes the
    /// displayed price and the countdown to the next decrease, and lets
    /// expired notices lapse. Purely derived and idempotent; safe to call
    /// at any rate.
    pub fn tick(&mut self) -> PriceDisplay {
        let now = self.clock.now_ms();
        self.display = self.auction.display(now);
        self.notices.prune(now);
        self.display
    }

    /// Intended for a ten-second cadence. Polls the service for
    /// a mint newer than the locally known reset; when one is found the
    /// price returns to the top and the minted count refreshes. Returns
    /// whether a remote reset was adopted.
    ///
    /// Best-effort convergence only: read failures are logged and retried
    /// on the next pass, never surfaced.
    pub async fn sync_with_remote(&mut self) -> bool {
        if self.session.is_none() {
            return false;
        }
        let remote = match self.read_last_mint().await {
            Ok(Some(timestamp)) => timestamp,
            Ok(None) => return false,
            Err(err) => {
                debug!("remote sync read failed: {err}");
                return false;
            }
        };
        if !self.auction.adopt_remote_reset(remote) {
            return false;
        }
        self.display = self.auction.display(self.clock.now_ms());
        if let Err(err) = self.refresh_minted_total().await {
            debug!("minted-count refresh failed during sync: {err}");
        }
        true
    }

    /// Read-only view for renderers. The price shown is the one cached by
    /// the most recent tick (or state change), not a fresh derivation.
    pub fn snapshot(&self) -> WidgetSnapshot {
        let now = self.clock.now_ms();
        WidgetSnapshot {
            connected: self.session.is_some(),
            address: self
                .session
                .as_ref()
                .map(|session| short_address(&session.address)),
            price: self.display,
            minted_total: self.minted_total,
            remaining_allowance: self.ledger.remaining(),
            max_selectable: self.config.per_tx_max.min(self.ledger.remaining()),
            notice: self.notices.current(now).cloned(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_minting(&self) -> bool {
        self.minting.load(Ordering::SeqCst)
    }

    pub fn session(&self) -> Option<&WalletSession> {
        self.session.as_ref()
    }

    pub fn ledger(&self) -> &MintLedger {
        &self.ledger
    }

    pub fn minted_total(&self) -> u64 {
        self.minted_total
    }

    pub fn last_reset_ms(&self) -> i64 {
        self.auction.last_reset_ms()
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    fn post(&mut self, kind: NoticeKind, text: impl Into<String>) {
        let now = self.clock.now_ms();
        self.notices.post(kind, text, now);
    }

    async fn refresh_minted_total(&mut self) -> Result<()> {
        let service = self.service.clone().ok_or(WidgetError::ServiceUnavailable)?;
        self.minted_total = service
            .minted_count(&self.machine)
            .await
            .map_err(|err| WidgetError::RemoteRead(err.to_string()))?;
        Ok(())
    }

    async fn read_last_mint(&self) -> Result<Option<i64>> {
        let service = self.service.clone().ok_or(WidgetError::ServiceUnavailable)?;
        service
            .last_mint_timestamp(&self.machine)
            .await
            .map_err(|err| WidgetError::RemoteRead(err.to_string()))
    }

    /// Seed the decay origin from the chain's last-mint time. When the
    /// read fails or nothing has minted yet, the local clock stands in.
    /// That approximation means freshly loaded viewers may disagree on
    /// the price until the next successful sync.
    async fn seed_auction(&mut self) {
        let now = self.clock.now_ms();
        let origin = match self.read_last_mint().await {
            Ok(Some(timestamp)) => timestamp,
            Ok(None) => now,
            Err(err) => {
                debug!("last-mint read failed, seeding from local clock: {err}");
                now
            }
        };
        self.auction.reset(origin);
        self.display = self.auction.display(now);
    }
}
