//! Network messages - communication between App and Network layers

use crate::models::{DataSource, Quote};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Run the full quote fetch sequence for these symbols
    FetchQuotes {
        id: u64,
        symbols: Vec<String>,
    },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Fetch produced at least one quote
    Quotes {
        id: u64,
        quotes: Vec<Quote>,
        source: DataSource,
        time_ms: u64,
    },
    /// Fetch failed; `message` is shown to the user
    Failed {
        id: u64,
        message: String,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Quotes { id, .. } => *id,
            NetworkResponse::Failed { id, .. } => *id,
        }
    }
}
