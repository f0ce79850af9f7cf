/// One symbol's price/volume snapshot
#[derive(Clone, Debug, PartialEq)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    pub high: f64,
    pub low: f64,
}

impl Quote {
    pub fn new(
        symbol: impl Into<String>,
        price: f64,
        change: f64,
        change_percent: f64,
        volume: u64,
        high: f64,
        low: f64,
    ) -> Self {
        Quote {
            symbol: symbol.into(),
            price,
            change,
            change_percent,
            volume,
            high,
            low,
        }
    }

    pub fn is_gain(&self) -> bool {
        self.change >= 0.0
    }
}

/// Where the quotes on screen came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DataSource {
    /// One request covering every symbol
    Bulk,
    /// Sequential requests, one per symbol
    PerSymbol,
    /// Static demo data after a failed fetch
    #[default]
    Fallback,
}

impl DataSource {
    pub fn as_str(&self) -> &str {
        match self {
            DataSource::Bulk => "live",
            DataSource::PerSymbol => "live (per symbol)",
            DataSource::Fallback => "demo data",
        }
    }
}

/// A single point of the synthetic intraday series
#[derive(Clone, Debug, PartialEq)]
pub struct ChartPoint {
    pub time: String,
    pub price: f64,
    pub volume: u64,
}

/// Aggregates shown in the summary cards
#[derive(Clone, Debug, PartialEq, Default)]
pub struct MarketSummary {
    pub total_stocks: usize,
    pub total_value: f64,
    pub top_performer: Option<String>,
    pub total_volume: u64,
}

impl MarketSummary {
    pub fn from_quotes(quotes: &[Quote]) -> Self {
        let mut top: Option<&Quote> = None;
        for quote in quotes {
            match top {
                Some(best) if quote.change_percent <= best.change_percent => {}
                _ => top = Some(quote),
            }
        }

        MarketSummary {
            total_stocks: quotes.len(),
            total_value: quotes.iter().map(|q| q.price).sum(),
            top_performer: top.map(|q| q.symbol.clone()),
            total_volume: quotes.iter().map(|q| q.volume).sum(),
        }
    }
}

/// Demo quotes shown whenever live data cannot be loaded
pub fn fallback_quotes() -> Vec<Quote> {
    vec![
        Quote::new("AAPL", 150.25, 2.15, 1.45, 50_000_000, 152.00, 148.50),
        Quote::new("MSFT", 320.75, -1.25, -0.39, 30_000_000, 322.00, 318.00),
        Quote::new("GOOGL", 2750.50, 15.25, 0.56, 15_000_000, 2760.00, 2735.00),
        Quote::new("AMZN", 3200.00, 45.50, 1.44, 25_000_000, 3210.00, 3180.00),
        Quote::new("TSLA", 850.25, -12.75, -1.48, 40_000_000, 860.00, 845.00),
    ]
}
