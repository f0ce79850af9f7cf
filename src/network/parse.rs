//! Provider payload parsing
//!
//! `GLOBAL_QUOTE` responses carry numbered string fields (`"05. price"`).
//! The quote object comes either keyed by symbol or as a single flat object.

use serde_json::{Map, Value};

use crate::models::Quote;

const GLOBAL_QUOTE: &str = "Global Quote";
const ERROR_MARKERS: [&str; 3] = ["Error Message", "Note", "Information"];

const FIELD_SYMBOL: &str = "01. symbol";
const FIELD_HIGH: &str = "03. high";
const FIELD_LOW: &str = "04. low";
const FIELD_PRICE: &str = "05. price";
const FIELD_VOLUME: &str = "06. volume";
const FIELD_CHANGE: &str = "09. change";
const FIELD_CHANGE_PERCENT: &str = "10. change percent";

/// What a bulk response turned out to contain
#[derive(Debug, Clone, PartialEq)]
pub enum BulkPayload {
    /// At least one quote, in provider order
    Quotes(Vec<Quote>),
    /// The provider answered with an error marker
    Rejected(String),
    /// No quote data and no marker
    Empty,
}

/// Classify a bulk response body
pub fn parse_bulk(body: &Value) -> BulkPayload {
    let quotes = global_quote(body).map(quotes_from_block).unwrap_or_default();
    if !quotes.is_empty() {
        return BulkPayload::Quotes(quotes);
    }

    match error_marker(body) {
        Some(message) => BulkPayload::Rejected(message),
        None => BulkPayload::Empty,
    }
}

/// Extract the quote for `symbol` from a single-symbol response
pub fn parse_single(body: &Value, symbol: &str) -> Option<Quote> {
    let block = global_quote(body)?;

    if is_flat_quote(block) {
        let reported = block.get(FIELD_SYMBOL).and_then(Value::as_str);
        if reported.is_some_and(|s| !s.eq_ignore_ascii_case(symbol)) {
            return None;
        }
        return Some(quote_from_fields(symbol, block));
    }

    block
        .get(symbol)
        .and_then(Value::as_object)
        .map(|fields| quote_from_fields(symbol, fields))
}

/// First provider error marker present in the body, if any
pub fn error_marker(body: &Value) -> Option<String> {
    ERROR_MARKERS.iter().find_map(|key| {
        body.get(*key).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    })
}

fn global_quote(body: &Value) -> Option<&Map<String, Value>> {
    body.get(GLOBAL_QUOTE)
        .and_then(Value::as_object)
        .filter(|block| !block.is_empty())
}

fn is_flat_quote(block: &Map<String, Value>) -> bool {
    block.contains_key(FIELD_PRICE) || block.contains_key(FIELD_SYMBOL)
}

fn quotes_from_block(block: &Map<String, Value>) -> Vec<Quote> {
    if is_flat_quote(block) {
        return block
            .get(FIELD_SYMBOL)
            .and_then(Value::as_str)
            .map(|symbol| vec![quote_from_fields(symbol, block)])
            .unwrap_or_default();
    }

    block
        .iter()
        .filter_map(|(symbol, fields)| {
            fields
                .as_object()
                .map(|fields| quote_from_fields(symbol, fields))
        })
        .collect()
}

fn quote_from_fields(symbol: &str, fields: &Map<String, Value>) -> Quote {
    Quote {
        symbol: symbol.to_string(),
        price: number_field(fields, FIELD_PRICE),
        change: number_field(fields, FIELD_CHANGE),
        change_percent: number_field(fields, FIELD_CHANGE_PERCENT),
        volume: volume_field(fields),
        high: number_field(fields, FIELD_HIGH),
        low: number_field(fields, FIELD_LOW),
    }
}

/// Missing or unparseable fields read as zero
fn number_field(fields: &Map<String, Value>, key: &str) -> f64 {
    match fields.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s
            .trim()
            .trim_end_matches('%')
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

fn volume_field(fields: &Map<String, Value>) -> u64 {
    match fields.get(FIELD_VOLUME) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|v| *v >= 0.0).map(|v| v as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let digits: String = s.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().unwrap_or(0)
        }
        _ => 0,
    }
}
