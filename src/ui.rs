use ratatui::{prelude::*, widgets::*};

use crate::chart::price_bounds;
use crate::format::{format_currency, format_millions, format_number, format_percent, format_signed, format_volume};
use crate::models::{ChartPoint, MarketSummary, Quote};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Gain/loss color
pub fn change_color(value: f64) -> Color {
    if value >= 0.0 {
        Color::Green
    } else {
        Color::Red
    }
}

/// Spinner glyph for the given animation tick
pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick as usize) % SPINNER_FRAMES.len()]
}

/// Three dots bouncing in turn
pub fn bounce_dots(tick: u64) -> Line<'static> {
    let colors = [Color::Blue, Color::Rgb(99, 102, 241), Color::Magenta];
    let active = ((tick / 3) % 3) as usize;
    let spans: Vec<Span> = colors
        .iter()
        .enumerate()
        .map(|(i, color)| {
            let glyph = if i == active { " ● " } else { " • " };
            Span::styled(glyph, Style::default().fg(*color))
        })
        .collect();
    Line::from(spans).centered()
}

/// Quote table in insertion order. The cursor is applied through `TableState`.
pub fn quote_table(quotes: &[Quote], selected: Option<&str>) -> Table<'static> {
    let header = Row::new(["Symbol", "Price", "Change", "Change %", "Volume", "High", "Low"])
        .style(Style::default().fg(Color::Gray).bold())
        .bottom_margin(1);

    let rows: Vec<Row> = quotes
        .iter()
        .map(|q| {
            let color = change_color(q.change);
            let pct_color = change_color(q.change_percent);
            let is_selected = selected == Some(q.symbol.as_str());

            let row = Row::new(vec![
                Cell::from(q.symbol.clone()).style(Style::default().bold()),
                Cell::from(format!("${}", format_number(q.price, 2))),
                Cell::from(format_signed(q.change)).style(Style::default().fg(color)),
                Cell::from(format_percent(q.change_percent)).style(Style::default().fg(pct_color)),
                Cell::from(format_volume(q.volume)),
                Cell::from(format!("${}", format_number(q.high, 2))),
                Cell::from(format!("${}", format_number(q.low, 2))),
            ]);

            if is_selected {
                row.style(Style::default().bg(Color::Rgb(30, 41, 59)))
            } else {
                row
            }
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(9),
        Constraint::Length(12),
        Constraint::Length(12),
    ];

    Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .row_highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("▶ ")
}

/// (title, value, accent) for each summary card
pub fn summary_cards(summary: &MarketSummary) -> Vec<(&'static str, String, Color)> {
    vec![
        ("Total Stocks", summary.total_stocks.to_string(), Color::Green),
        ("Total Value", format_currency(summary.total_value), Color::Blue),
        (
            "Top Performer",
            summary.top_performer.clone().unwrap_or_else(|| "N/A".to_string()),
            Color::Magenta,
        ),
        ("Total Volume", format_millions(summary.total_volume), Color::Yellow),
    ]
}

/// (title, value, accent) for the cards above the chart
pub fn quote_cards(quote: &Quote) -> Vec<(&'static str, String, Color)> {
    let (label, color) = if quote.is_gain() {
        ("Gain", Color::Green)
    } else {
        ("Loss", Color::Red)
    };

    vec![
        ("Current Price", format!("${:.2}", quote.price), Color::Blue),
        (
            label,
            format!("{} ({})", format_signed(quote.change), format_percent(quote.change_percent)),
            color,
        ),
        ("Volume", format_millions(quote.volume), Color::Magenta),
    ]
}

/// One bordered card
pub fn card(title: &str, value: String, accent: Color) -> Paragraph<'static> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent))
        .title(Span::styled(format!(" {} ", title), Style::default().fg(accent)));

    Paragraph::new(Line::from(Span::styled(value, Style::default().bold())).centered()).block(block)
}

/// `(x, y)` pairs for the chart dataset
pub fn chart_data(points: &[ChartPoint]) -> Vec<(f64, f64)> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.price))
        .collect()
}

/// Line chart of the synthetic series
pub fn price_chart<'a>(symbol: &str, data: &'a [(f64, f64)], points: &[ChartPoint]) -> Chart<'a> {
    let [y_min, y_max] = price_bounds(points);
    let x_max = points.len().saturating_sub(1).max(1) as f64;

    let x_labels: Vec<Span> = match (points.first(), points.get(points.len() / 2), points.last()) {
        (Some(first), Some(mid), Some(last)) => vec![
            Span::raw(first.time.clone()),
            Span::raw(mid.time.clone()),
            Span::raw(last.time.clone()),
        ],
        _ => Vec::new(),
    };
    let y_labels = vec![
        Span::raw(format!("${:.2}", y_min)),
        Span::raw(format!("${:.2}", (y_min + y_max) / 2.0)),
        Span::raw(format!("${:.2}", y_max)),
    ];

    let dataset = Dataset::default()
        .name(symbol.to_string())
        .marker(ratatui::symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(data);

    Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([y_min, y_max])
                .labels(y_labels),
        )
        .hidden_legend_constraints((Constraint::Ratio(1, 4), Constraint::Ratio(1, 4)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fallback_quotes;
    use ratatui::backend::TestBackend;

    fn rendered_text(quotes: &[Quote]) -> String {
        let backend = TestBackend::new(100, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| f.render_widget(quote_table(quotes, None), f.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_table_renders_one_row_per_quote() {
        let quotes = fallback_quotes();
        let text = rendered_text(&quotes);

        assert!(text.contains("Symbol"));
        let rows = text
            .lines()
            .filter(|l| quotes.iter().any(|q| l.starts_with(&format!("{} ", q.symbol))))
            .count();
        assert_eq!(rows, quotes.len());
        assert!(text.contains("$2,750.50"));
        assert!(text.contains("-12.75"));
        assert!(text.contains("+1.45%"));
        assert!(text.contains("50.0M"));
    }

    #[test]
    fn test_summary_cards_values() {
        let summary = MarketSummary::from_quotes(&fallback_quotes());
        let cards = summary_cards(&summary);
        assert_eq!(cards[0].1, "5");
        assert_eq!(cards[1].1, "$7,271.75");
        assert_eq!(cards[2].1, "AAPL");
        assert_eq!(cards[3].1, "160.0M");

        let empty = summary_cards(&MarketSummary::default());
        assert_eq!(empty[2].1, "N/A");
    }

    #[test]
    fn test_quote_cards_gain_and_loss() {
        let quotes = fallback_quotes();
        let gain = quote_cards(&quotes[0]);
        assert_eq!(gain[1].0, "Gain");
        assert_eq!(gain[1].1, "+2.15 (+1.45%)");

        let loss = quote_cards(&quotes[4]);
        assert_eq!(loss[1].0, "Loss");
        assert_eq!(loss[0].1, "$850.25");
    }

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner_frame(0), spinner_frame(10));
        assert_ne!(spinner_frame(0), spinner_frame(1));
    }
}
