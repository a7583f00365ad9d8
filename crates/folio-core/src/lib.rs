//! Local engagement and messaging state for the portfolio site.
//!
//! - [`counters::CounterStore`]: page views and the like toggle
//! - [`vault::CredentialVault`]: obfuscated email-provider credentials
//! - [`gate::SendGate`]: rate limit and readiness check in front of the transport

pub mod clock;
pub mod counters;
pub mod error;
pub mod gate;
pub mod policy;
pub mod transport;
pub mod vault;

#[cfg(test)]
mod testing;

pub use clock::{Clock, ManualClock, SystemClock};
pub use counters::{CounterStore, LikeOutcome};
pub use error::{SendError, ValidationError, VaultError};
pub use gate::SendGate;
pub use policy::GatePolicy;
pub use transport::Transport;
pub use vault::CredentialVault;

/// Storage keys. These are the names the site has always used in the
/// browser, so data written there can be migrated as-is.
pub mod keys {
    pub const STATS: &str = "portfolio_stats";
    pub const LIKED: &str = "portfolio_liked";
    pub const CREDENTIALS: &str = "emailjs_credentials";
    pub const RATE_LIMIT: &str = "email_rate_limit";
}
