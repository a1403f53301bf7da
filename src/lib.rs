// ATM Ledger - Core Library
// In-memory accounts with per-account locking, plus the HTTP adapter (feature "server")

pub mod entities;
pub mod error;
pub mod journal;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod config;

// Re-export commonly used types
pub use entities::{Account, AccountId, AccountRegistry, AccountSnapshot};
pub use error::AccountError;
pub use journal::{
    MemorySink, OperationKind, OperationRecord, OperationSink, Outcome, TracingSink,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
