pub mod auction;
pub mod config;
pub mod core;
pub mod error;
pub mod ledger;
pub mod notice;
pub mod rpc;
pub mod sim;
pub mod types;
pub mod widget;

pub use crate::auction::{Auction, AuctionSchedule};
pub use crate::config::WidgetConfig;
pub use crate::core::clock::{Clock, SystemClock};
pub use crate::core::provider::WalletProvider;
pub use crate::core::service::{MintService, MintServiceFactory};
pub use crate::error::{BoxedError, Result, WidgetError};
pub use crate::ledger::MintLedger;
pub use crate::notice::{Notice, NoticeBoard, NoticeKind};
pub use crate::rpc::{RpcMintService, RpcMintServiceFactory};
pub use crate::sim::{SimulatedMintFactory, SimulatedMintService};
pub use crate::types::{
    format_sol, short_address, MintOutcome, MintReceipt, PriceDisplay, WalletSession,
    WidgetSnapshot,
};
pub use crate::widget::{MintWidget, MintWidgetBuilder};
