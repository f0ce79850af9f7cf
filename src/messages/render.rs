//! Render state - data structure sent from App layer to UI for rendering

use crate::models::{ChartPoint, DataSource, MarketSummary, Quote};

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Quotes
    pub quotes: Vec<Quote>,
    pub summary: MarketSummary,
    pub source: DataSource,
    pub last_updated: Option<String>,
    pub last_fetch_ms: u64,

    // Fetch status
    pub is_loading: bool,
    pub error: Option<String>,

    // Table
    pub cursor: usize,
    pub selected: Option<String>,

    // Chart for the selected symbol
    pub chart: Vec<ChartPoint>,

    // Popups
    pub show_help: bool,
}

impl RenderState {
    /// The selected quote, if it is still in the table
    pub fn selected_quote(&self) -> Option<&Quote> {
        let symbol = self.selected.as_deref()?;
        self.quotes.iter().find(|q| q.symbol == symbol)
    }
}
