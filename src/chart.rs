//! Synthetic intraday series for the performance chart
//!
//! There is no historical data source; points are perturbations of the
//! current price scaled by the day's percent change.

use chrono::{DateTime, Duration, Local};
use rand::Rng;

use crate::constants::CHART_POINTS;
use crate::models::{ChartPoint, Quote};

/// Generate hourly points ending at `now`
pub fn synthesize_series<R: Rng>(
    quote: &Quote,
    now: DateTime<Local>,
    rng: &mut R,
) -> Vec<ChartPoint> {
    let volatility = quote.change_percent / 100.0;

    (0..CHART_POINTS)
        .map(|i| {
            let hours_back = (CHART_POINTS - 1 - i) as i64;
            let time = now - Duration::hours(hours_back);

            let random_change = (rng.random::<f64>() - 0.5) * volatility * 2.0;
            let price = round_cents(quote.price * (1.0 + random_change));
            let volume = (quote.volume as f64 * (0.8 + rng.random::<f64>() * 0.4)).floor() as u64;

            ChartPoint {
                time: time.format("%H:%M").to_string(),
                price,
                volume,
            }
        })
        .collect()
}

/// Y-axis bounds padded by one unit on each side
pub fn price_bounds(points: &[ChartPoint]) -> [f64; 2] {
    let min = points.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.price).fold(f64::NEG_INFINITY, f64::max);

    if points.is_empty() {
        [0.0, 1.0]
    } else {
        [min - 1.0, max + 1.0]
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
