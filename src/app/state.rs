//! App state - pure data structure with no I/O logic

use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::messages::RenderState;
use crate::models::{ChartPoint, DataSource, MarketSummary, Quote};

/// Main application state - pure data, no I/O
pub struct AppState {
    // Configured symbols, sent with every fetch
    pub symbols: Vec<String>,

    // Quotes currently on screen, replaced wholesale on every fetch
    pub quotes: Vec<Quote>,
    pub source: DataSource,
    pub last_updated: Option<DateTime<Local>>,
    pub last_fetch_ms: u64,

    // Fetch lifecycle
    pub is_loading: bool,
    pub error: Option<String>,
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,

    // Table
    pub cursor: usize,
    pub selected: Option<String>,

    // Synthetic series for `selected`
    pub chart: Vec<ChartPoint>,
    pub(crate) rng: StdRng,

    // Popups
    pub show_help: bool,
}

impl AppState {
    pub fn new(symbols: Vec<String>) -> Self {
        Self::with_rng(symbols, StdRng::from_os_rng())
    }

    /// Build with a caller-supplied RNG, used to make charts reproducible
    pub fn with_rng(symbols: Vec<String>, rng: StdRng) -> Self {
        AppState {
            symbols,
            quotes: Vec::new(),
            source: DataSource::default(),
            last_updated: None,
            last_fetch_ms: 0,
            is_loading: false,
            error: None,
            next_request_id: 1,
            pending_request_id: None,
            cursor: 0,
            selected: None,
            chart: Vec::new(),
            rng,
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// The selected quote, if it is still in the table
    pub fn selected_quote(&self) -> Option<&Quote> {
        let symbol = self.selected.as_deref()?;
        self.quotes.iter().find(|q| q.symbol == symbol)
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            quotes: self.quotes.clone(),
            summary: MarketSummary::from_quotes(&self.quotes),
            source: self.source,
            last_updated: self
                .last_updated
                .map(|t| t.format("%H:%M:%S").to_string()),
            last_fetch_ms: self.last_fetch_ms,
            is_loading: self.is_loading,
            error: self.error.clone(),
            cursor: self.cursor,
            selected: self.selected.clone(),
            chart: self.chart.clone(),
            show_help: self.show_help,
        }
    }
}
