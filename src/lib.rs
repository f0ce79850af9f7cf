//! # Stock Dashboard
//!
//! A terminal dashboard for equity quotes from the Alpha Vantage API.
//!
//! ## Features
//! - Bulk quote request with per-symbol fallback under rate limiting
//! - Demo data when nothing can be fetched
//! - Quote table with row selection
//! - Summary cards (count, value, top performer, volume)
//! - Simulated 24-hour chart for the selected symbol
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod chart;
pub mod config;
pub mod constants;
pub mod format;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::Config;
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{fallback_quotes, ChartPoint, DataSource, MarketSummary, Quote};
pub use network::{fetch_quotes, AlphaVantageClient, FetchError, NetworkActor};
