//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Market-data provider query endpoint
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Provider function used for every quote request
pub const QUOTE_FUNCTION: &str = "GLOBAL_QUOTE";

/// Symbols shown when no configuration overrides them
pub const DEFAULT_SYMBOLS: [&str; 5] = ["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA"];

/// Delay before each per-symbol request, keeps us under the provider rate limit
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 200;

/// HTTP timeout for a single request
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable holding the provider API key
pub const API_KEY_ENV: &str = "ALPHA_VANTAGE_API_KEY";

/// Environment variable overriding the symbol list (comma separated)
pub const SYMBOLS_ENV: &str = "STOCKDASH_SYMBOLS";

/// Number of hourly points in the synthetic chart
pub const CHART_POINTS: usize = 24;

/// Log file written next to the working directory
pub const LOG_FILE: &str = "stockdash.log";

/// Application name
pub const APP_NAME: &str = "Stock Dashboard";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
