//! Command handlers - business logic for processing UI events and fetch results

use chrono::Local;

use crate::app::AppState;
use crate::chart::synthesize_series;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{fallback_quotes, DataSource};

impl AppState {
    // ========================
    // Fetching
    // ========================

    /// Start a fetch. Every call issues a new sequence.
    pub fn refresh(&mut self) -> NetworkCommand {
        let id = self.next_id();
        self.is_loading = true;
        self.error = None;
        self.pending_request_id = Some(id);

        NetworkCommand::FetchQuotes {
            id,
            symbols: self.symbols.clone(),
        }
    }

    pub fn handle_response(&mut self, response: NetworkResponse) {
        let id = response.id();

        match response {
            NetworkResponse::Quotes {
                quotes,
                source,
                time_ms,
                ..
            } => {
                tracing::info!(id, count = quotes.len(), ?source, time_ms, "Quotes received");
                self.quotes = quotes;
                self.source = source;
                self.error = None;
                self.last_fetch_ms = time_ms;
            }
            NetworkResponse::Failed {
                message, time_ms, ..
            } => {
                tracing::warn!(id, %message, "Using fallback quotes");
                self.quotes = fallback_quotes();
                self.source = DataSource::Fallback;
                self.error = Some(message);
                self.last_fetch_ms = time_ms;
            }
        }

        self.last_updated = Some(Local::now());
        if self.pending_request_id == Some(id) {
            self.pending_request_id = None;
            self.is_loading = false;
        }

        self.clamp_cursor();
        if self.selected_quote().is_none() {
            self.selected = None;
        }
        self.regenerate_chart();
    }

    // ========================
    // Table navigation
    // ========================

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.quotes.len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_first(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_last(&mut self) {
        self.cursor = self.quotes.len().saturating_sub(1);
    }

    pub fn select_row(&mut self) {
        if let Some(quote) = self.quotes.get(self.cursor) {
            self.selected = Some(quote.symbol.clone());
            self.regenerate_chart();
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.chart.clear();
    }

    fn clamp_cursor(&mut self) {
        if self.cursor >= self.quotes.len() {
            self.cursor = self.quotes.len().saturating_sub(1);
        }
    }

    fn regenerate_chart(&mut self) {
        self.chart = match self.selected_quote().cloned() {
            Some(quote) => synthesize_series(&quote, Local::now(), &mut self.rng),
            None => Vec::new(),
        };
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CHART_POINTS, DEFAULT_SYMBOLS};
    use crate::models::Quote;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state() -> AppState {
        let symbols = DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect();
        AppState::with_rng(symbols, StdRng::seed_from_u64(11))
    }

    fn live_quotes(n: usize) -> Vec<Quote> {
        (0..n)
            .map(|i| Quote::new(format!("SYM{}", i), 10.0 + i as f64, 0.5, 1.0, 1_000, 11.0, 9.0))
            .collect()
    }

    fn success(id: u64, quotes: Vec<Quote>) -> NetworkResponse {
        NetworkResponse::Quotes {
            id,
            quotes,
            source: DataSource::Bulk,
            time_ms: 12,
        }
    }

    #[test]
    fn test_refresh_sets_loading_and_clears_error() {
        let mut app = state();
        app.error = Some("old".into());

        let cmd = app.refresh();
        assert!(app.is_loading);
        assert_eq!(app.error, None);
        match cmd {
            NetworkCommand::FetchQuotes { id, symbols } => {
                assert_eq!(id, 1);
                assert_eq!(symbols.len(), 5);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_success_shows_one_row_per_quote() {
        let mut app = state();
        let NetworkCommand::FetchQuotes { id, .. } = app.refresh() else {
            panic!("expected fetch");
        };
        app.handle_response(success(id, live_quotes(3)));

        let render = app.to_render_state();
        assert!(!render.is_loading);
        assert_eq!(render.quotes.len(), 3);
        assert_eq!(render.summary.total_stocks, 3);
        assert_eq!(render.source, DataSource::Bulk);
        assert!(render.error.is_none());
        assert!(render.last_updated.is_some());
    }

    #[test]
    fn test_failure_substitutes_fallback_set() {
        let mut app = state();
        let NetworkCommand::FetchQuotes { id, .. } = app.refresh() else {
            panic!("expected fetch");
        };
        app.handle_response(NetworkResponse::Failed {
            id,
            message: "No stock data received".into(),
            time_ms: 3,
        });

        let render = app.to_render_state();
        assert_eq!(render.quotes.len(), 5);
        assert_eq!(render.source, DataSource::Fallback);
        assert_eq!(render.error.as_deref(), Some("No stock data received"));
        assert!(!render.is_loading);
    }

    #[test]
    fn test_only_latest_refresh_clears_loading() {
        let mut app = state();
        app.refresh();
        app.refresh();

        app.handle_response(success(1, live_quotes(2)));
        assert!(app.is_loading);
        assert_eq!(app.quotes.len(), 2);

        app.handle_response(success(2, live_quotes(4)));
        assert!(!app.is_loading);
        assert_eq!(app.quotes.len(), 4);
    }

    #[test]
    fn test_select_row_builds_chart() {
        let mut app = state();
        app.handle_response(success(1, live_quotes(3)));

        app.cursor_down();
        app.select_row();
        assert_eq!(app.selected.as_deref(), Some("SYM1"));
        assert_eq!(app.chart.len(), CHART_POINTS);

        app.clear_selection();
        assert!(app.selected.is_none());
        assert!(app.chart.is_empty());
    }

    #[test]
    fn test_selection_survives_refresh_only_if_symbol_remains() {
        let mut app = state();
        app.handle_response(success(1, live_quotes(3)));
        app.cursor_last();
        app.select_row();
        assert_eq!(app.selected.as_deref(), Some("SYM2"));

        app.handle_response(success(2, live_quotes(3)));
        assert_eq!(app.selected.as_deref(), Some("SYM2"));
        assert_eq!(app.chart.len(), CHART_POINTS);

        app.handle_response(success(3, live_quotes(2)));
        assert!(app.selected.is_none());
        assert!(app.chart.is_empty());
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut app = state();
        app.cursor_up();
        app.cursor_down();
        assert_eq!(app.cursor, 0);

        app.handle_response(success(1, live_quotes(2)));
        app.cursor_down();
        app.cursor_down();
        assert_eq!(app.cursor, 1);
        app.cursor_first();
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = state();
        app.toggle_help();
        assert!(app.show_help);
        app.close_help();
        assert!(!app.show_help);
    }
}
