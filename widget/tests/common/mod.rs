use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pawnz_mint_widget::{
    BoxedError, Clock, MintReceipt, MintService, MintServiceFactory, MintWidget, SimulatedMintFactory,
    SimulatedMintService, WalletProvider, WidgetConfig,
};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;

/// Fixed test epoch, unix milliseconds.
pub const T0: i64 = 1_700_000_000_000;

/// Hand-driven clock so tests control elapsed time exactly instead of
/// waiting on real timers.
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Arc<Self> {
        Arc::new(Self {
            now_ms: AtomicI64::new(start_ms),
        })
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

/// Wallet provider test double. Approves every prompt unless told to
/// reject with a given message.
pub struct MockWallet {
    address: Pubkey,
    reject_with: Mutex<Option<String>>,
}

impl MockWallet {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            address: Pubkey::new_unique(),
            reject_with: Mutex::new(None),
        })
    }

    pub fn address(&self) -> Pubkey {
        self.address
    }

    pub fn reject_connect(&self, message: &str) {
        *self.reject_with.lock().unwrap() = Some(message.to_string());
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn connect(&self) -> Result<Pubkey, BoxedError> {
        if let Some(message) = self.reject_with.lock().unwrap().clone() {
            return Err(message.into());
        }
        Ok(self.address)
    }

    async fn disconnect(&self) -> Result<(), BoxedError> {
        Ok(())
    }

    async fn sign(&self, _payload: &[u8]) -> Result<Signature, BoxedError> {
        Ok(Signature::default())
    }
}

/// Mint service whose submissions never resolve. Used to exercise what
/// happens when a mint future is abandoned mid-flight.
pub struct HangingService;

#[async_trait]
impl MintService for HangingService {
    async fn minted_count(&self, _machine: &Pubkey) -> Result<u64, BoxedError> {
        Ok(0)
    }

    async fn last_mint_timestamp(&self, _machine: &Pubkey) -> Result<Option<i64>, BoxedError> {
        Ok(None)
    }

    async fn submit_mint(
        &self,
        _machine: &Pubkey,
        _buyer: &Pubkey,
    ) -> Result<MintReceipt, BoxedError> {
        std::future::pending().await
    }
}

pub struct HangingFactory;

#[async_trait]
impl MintServiceFactory for HangingFactory {
    async fn bind(
        &self,
        _provider: Arc<dyn WalletProvider>,
        _buyer: Pubkey,
    ) -> Result<Arc<dyn MintService>, BoxedError> {
        Ok(Arc::new(HangingService))
    }
}

/// Everything a widget test needs, wired to the simulated service. The
/// config carries the production drop numbers: 3 SOL start, 0.03 SOL decay
/// per minute, 0.5 SOL floor, cap of ten.
pub struct TestHarness {
    pub widget: MintWidget,
    pub clock: Arc<ManualClock>,
    pub wallet: Arc<MockWallet>,
    pub service: Arc<SimulatedMintService>,
}

pub fn harness() -> TestHarness {
    let clock = ManualClock::new(T0);
    let wallet = MockWallet::new();
    let service = Arc::new(SimulatedMintService::new(clock.clone()));
    let widget = MintWidget::builder()
        .with_config(WidgetConfig::default())
        .with_clock(clock.clone())
        .with_provider(wallet.clone())
        .with_service_factory(Arc::new(SimulatedMintFactory::new(service.clone())))
        .build()
        .expect("default config builds");
    TestHarness {
        widget,
        clock,
        wallet,
        service,
    }
}

pub async fn connected_harness() -> TestHarness {
    let mut harness = harness();
    harness
        .widget
        .connect()
        .await
        .expect("connect with mock wallet");
    harness
}
