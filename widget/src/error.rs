use thiserror::Error;

/// Failure type shared by the collaborator traits. Wallet extensions and
/// mint SDKs report failures as opaque errors; the widget classifies them
/// at the operation boundary.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Widget-facing error types for mint widget operations
#[derive(Debug, Error)]
pub enum WidgetError {
    /// No wallet extension is present in the embedding environment
    #[error("no wallet provider detected")]
    ProviderUnavailable,

    /// No mint service client is bound to the current session
    #[error("mint service is not available")]
    ServiceUnavailable,

    /// The requested quantity would push the session past its cap
    #[error("wallet limit reached; {remaining} more can be minted")]
    WalletCapExceeded { remaining: u64 },

    /// The wallet balance cannot cover the purchase
    #[error("insufficient funds in wallet")]
    InsufficientFunds,

    /// The user dismissed the wallet prompt
    #[error("request cancelled by user")]
    UserRejected,

    /// A read from the mint service failed; callers fall back to local state
    #[error("remote read failed: {0}")]
    RemoteRead(String),

    /// Operation requires a connected wallet session
    #[error("wallet is not connected")]
    NotConnected,

    /// A mint batch is already outstanding; concurrent requests are rejected
    #[error("a mint is already in progress")]
    MintInFlight,

    /// Quantity must be at least one
    #[error("invalid mint quantity: {0}")]
    InvalidQuantity(u64),

    /// A batch aborted partway; completed units are not rolled back
    #[error("minted {completed} of {requested} before failing: {cause}")]
    MintIncomplete {
        completed: u64,
        requested: u64,
        #[source]
        cause: Box<WidgetError>,
    },

    /// Wallet connection failed for a reason other than user rejection
    #[error("wallet connection failed: {0}")]
    Connection(String),

    /// Submission failed for a reason the widget cannot classify
    #[error("mint submission failed: {0}")]
    Submit(String),

    /// Invalid widget configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl WidgetError {
    /// Classify a raw submission failure into the buckets the widget
    /// reports. Wallet adapters and mint SDKs only expose failure text,
    /// so this matches on the message the same way the frontend does.
    pub(crate) fn classify_submit(err: BoxedError) -> WidgetError {
        let text = err.to_string();
        let lower = text.to_lowercase();
        if lower.contains("insufficient funds") || lower.contains("insufficient lamports") {
            WidgetError::InsufficientFunds
        } else if lower.contains("rejected") || lower.contains("cancelled") {
            WidgetError::UserRejected
        } else {
            WidgetError::Submit(text)
        }
    }

    /// Classify a raw wallet-connect failure.
    pub(crate) fn classify_connect(err: BoxedError) -> WidgetError {
        let text = err.to_string();
        if text.to_lowercase().contains("rejected") {
            WidgetError::UserRejected
        } else {
            WidgetError::Connection(text)
        }
    }
}

/// Result type alias for widget operations
pub type Result<T> = std::result::Result<T, WidgetError>;
