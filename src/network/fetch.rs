//! Quote fetch sequence: one bulk request, then per-symbol requests if the
//! bulk answer is unusable.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use crate::constants::QUOTE_FUNCTION;
use crate::models::{DataSource, Quote};
use crate::network::error::FetchError;
use crate::network::parse::{self, BulkPayload};

/// Query string pairs for one provider call (API key excluded)
pub type QueryParams = Vec<(&'static str, String)>;

/// Something that can perform a provider GET and hand back its JSON body.
///
/// Implementations return `FetchError::Status` for non-2xx responses.
pub trait QuoteTransport {
    fn get_json(
        &self,
        params: QueryParams,
        api_key: &str,
    ) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// Inputs of a single fetch sequence
#[derive(Clone, Debug)]
pub struct FetchSettings {
    pub symbols: Vec<String>,
    pub api_key: Option<String>,
    pub request_delay: Duration,
}

/// Quotes collected by a successful sequence
#[derive(Clone, Debug, PartialEq)]
pub struct FetchOutcome {
    pub quotes: Vec<Quote>,
    pub source: DataSource,
}

pub fn bulk_params(symbols: &[String]) -> QueryParams {
    vec![
        ("function", QUOTE_FUNCTION.to_string()),
        ("symbols", symbols.join(",")),
    ]
}

pub fn single_params(symbol: &str) -> QueryParams {
    vec![
        ("function", QUOTE_FUNCTION.to_string()),
        ("symbol", symbol.to_string()),
    ]
}

/// Run the whole sequence. Requests are strictly sequential.
pub async fn fetch_quotes<T: QuoteTransport>(
    transport: &T,
    settings: &FetchSettings,
) -> Result<FetchOutcome, FetchError> {
    let api_key = settings
        .api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or(FetchError::MissingApiKey)?;

    tracing::info!(symbols = ?settings.symbols, "Requesting bulk quotes");
    let body = transport.get_json(bulk_params(&settings.symbols), api_key).await?;
    log_body_keys(&body);

    let outcome = match parse::parse_bulk(&body) {
        BulkPayload::Quotes(quotes) => FetchOutcome {
            quotes,
            source: DataSource::Bulk,
        },
        payload => {
            match payload {
                BulkPayload::Rejected(message) => {
                    tracing::warn!(%message, "Bulk request rejected, trying individual requests")
                }
                _ => tracing::warn!("Bulk request returned no data, trying individual requests"),
            }
            FetchOutcome {
                quotes: fetch_individually(transport, settings, api_key).await,
                source: DataSource::PerSymbol,
            }
        }
    };

    if outcome.quotes.is_empty() {
        tracing::warn!("No stock data received");
        return Err(FetchError::NoData);
    }

    tracing::info!(count = outcome.quotes.len(), source = ?outcome.source, "Quotes loaded");
    Ok(outcome)
}

async fn fetch_individually<T: QuoteTransport>(
    transport: &T,
    settings: &FetchSettings,
    api_key: &str,
) -> Vec<Quote> {
    let mut quotes = Vec::with_capacity(settings.symbols.len());

    for symbol in &settings.symbols {
        if !settings.request_delay.is_zero() {
            tokio::time::sleep(settings.request_delay).await;
        }

        match transport.get_json(single_params(symbol), api_key).await {
            Ok(body) => match parse::parse_single(&body, symbol) {
                Some(quote) => quotes.push(quote),
                None => {
                    let marker = parse::error_marker(&body);
                    tracing::warn!(%symbol, ?marker, "No quote in individual response");
                }
            },
            Err(e) => tracing::warn!(%symbol, error = %e, "Individual request failed"),
        }
    }

    quotes
}

fn log_body_keys(body: &Value) {
    if let Some(obj) = body.as_object() {
        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        tracing::debug!(?keys, "Bulk response received");
    }
}
