//! Fetch errors - every variant's message is what the dashboard banner shows

use thiserror::Error;

use crate::constants::API_KEY_ENV;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("API key not found. Set {} in your environment.", API_KEY_ENV)]
    MissingApiKey,

    #[error("Failed to fetch stock data: {0}")]
    Status(u16),

    #[error("{0}")]
    Transport(String),

    #[error("Invalid response from provider: {0}")]
    Decode(String),

    #[error("No stock data received")]
    NoData,
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        // The request URL carries the API key
        let e = e.without_url();
        if e.is_timeout() {
            FetchError::Transport("Request timed out".to_string())
        } else if e.is_connect() {
            FetchError::Transport(format!("Connection failed: {}", e))
        } else if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Transport(format!("Request failed: {}", e))
        }
    }
}
