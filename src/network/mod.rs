//! Network layer - market-data requests
//!
//! The Network actor receives fetch commands and sends back one outcome per fetch.

pub mod actor;
pub mod client;
pub mod error;
pub mod fetch;
pub mod parse;

pub use actor::NetworkActor;
pub use client::AlphaVantageClient;
pub use error::FetchError;
pub use fetch::{fetch_quotes, FetchOutcome, FetchSettings, QuoteTransport};
