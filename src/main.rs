//! Stock Dashboard - Actor-based terminal quote viewer
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async quote fetching

use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use stockdash_tui::app::{AppActor, AppState};
use stockdash_tui::config::Config;
use stockdash_tui::constants::{APP_NAME, APP_VERSION, LOG_FILE};
use stockdash_tui::messages::ui_events::key_to_ui_event;
use stockdash_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use stockdash_tui::models::DataSource;
use stockdash_tui::network::{AlphaVantageClient, NetworkActor};
use stockdash_tui::ui;

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config = Config::load().context("loading configuration")?;
    tracing::info!(
        symbols = ?config.symbols,
        base_url = %config.base_url,
        has_key = config.api_key.is_some(),
        "Starting {} v{}", APP_NAME, APP_VERSION
    );

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let transport = AlphaVantageClient::new(config.base_url.clone(), config.timeout());
    let network_actor = NetworkActor::new(
        transport,
        config.api_key.clone(),
        config.request_delay(),
        net_resp_tx,
    );
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(AppState::new(config.symbols.clone()), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();
    let mut tick: u64 = 0;

    loop {
        terminal.draw(|f| draw_ui(f, &current_state, tick))?;
        tick = tick.wrapping_add(1);

        // Poll for events with timeout
        if event::poll(Duration::from_millis(80))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.show_help) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState, tick: u64) {
    let area = f.area();

    if state.is_loading {
        draw_loading(f, area, tick);
        return;
    }

    let banner_height = if state.error.is_some() { 5 } else { 0 };
    let table_height = state.quotes.len() as u16 + 4;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Length(banner_height), // Error banner
            Constraint::Length(3),             // Summary cards
            Constraint::Length(table_height),  // Market overview
            Constraint::Min(0),                // Chart
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    draw_header(f, state, chunks[0]);
    if let Some(error) = &state.error {
        draw_error_banner(f, error, chunks[1]);
    }
    draw_summary_cards(f, state, chunks[2]);
    draw_quote_table(f, state, chunks[3]);
    draw_chart_panel(f, state, chunks[4]);
    draw_status_bar(f, state, chunks[5]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_loading(f: &mut Frame, area: Rect, tick: u64) {
    let popup_area = centered_rect(50, 30, area);

    let lines = vec![
        Line::from(Span::styled(
            ui::spinner_frame(tick),
            Style::default().fg(Color::Blue).bold(),
        ))
        .centered(),
        Line::from(""),
        Line::from(Span::styled("Loading Market Data", Style::default().bold())).centered(),
        Line::from(Span::styled(
            "Fetching real-time stock information...",
            Style::default().fg(Color::Gray),
        ))
        .centered(),
        Line::from(""),
        ui::bounce_dots(tick),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Blue));

    f.render_widget(Paragraph::new(lines).block(block), popup_area);
}

fn draw_header(f: &mut Frame, state: &RenderState, area: Rect) {
    let updated = match &state.last_updated {
        Some(t) => format!(" Updated {} ({}ms) ", t, state.last_fetch_ms),
        None => String::new(),
    };

    let source_style = match state.source {
        DataSource::Fallback => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::Green),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::Cyan).bold()))
        .title_bottom(Line::from(updated).right_aligned());

    let line = Line::from(vec![
        Span::styled("Real-time market insights & analytics", Style::default().fg(Color::Gray)),
        Span::raw("  "),
        Span::styled(format!("[{}]", state.source.as_str()), source_style),
        Span::raw("  "),
        Span::styled("r: Refresh Data", Style::default().fg(Color::Yellow)),
    ]);

    f.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_error_banner(f: &mut Frame, error: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(" Unable to load stock data ", Style::default().fg(Color::Red).bold()));

    let lines = vec![
        Line::from(Span::styled(error.to_string(), Style::default().fg(Color::LightRed))),
        Line::from(""),
        Line::from(Span::styled(
            "Showing demo data for demonstration purposes.",
            Style::default().fg(Color::Red),
        )),
    ];

    let banner = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(banner, area);
}

fn draw_summary_cards(f: &mut Frame, state: &RenderState, area: Rect) {
    let cards = ui::summary_cards(&state.summary);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
        .split(area);

    for ((title, value, accent), column) in cards.into_iter().zip(columns.iter()) {
        f.render_widget(ui::card(title, value, accent), *column);
    }
}

fn draw_quote_table(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Market Overview (↑/↓ move, Enter select) ");

    let table = ui::quote_table(&state.quotes, state.selected.as_deref()).block(block);

    let mut table_state = TableState::default();
    if !state.quotes.is_empty() {
        table_state.select(Some(state.cursor));
    }

    f.render_stateful_widget(table, area, &mut table_state);
}

fn draw_chart_panel(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(quote) = state.selected_quote() else {
        let hint = Paragraph::new("Select a stock to view its performance chart.")
            .style(Style::default().fg(Color::DarkGray))
            .centered()
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(hint, area);
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} Performance Chart ", quote.symbol),
            Style::default().bold(),
        ))
        .title_bottom(
            Line::from(Span::styled(
                " Simulated 24-hour data for demonstration ",
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
        );
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    let cards = ui::quote_cards(quote);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
        .split(rows[0]);
    for ((title, value, accent), column) in cards.into_iter().zip(columns.iter()) {
        f.render_widget(ui::card(title, value, accent), *column);
    }

    let data = ui::chart_data(&state.chart);
    let chart = ui::price_chart(&quote.symbol, &data, &state.chart);
    f.render_widget(chart, rows[1]);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.selected.is_some() {
        " ↑/↓:move | Enter:select | Esc:clear chart | r:refresh | ?:help | q:quit "
    } else {
        " ↑/↓:move | Enter:show chart | r:refresh | ?:help | q:quit "
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 STOCK DASHBOARD - Keyboard Shortcuts

 TABLE
   ↑ / k              Move up
   ↓ / j              Move down
   Home / g           First row
   End / G            Last row
   Enter / Space      Show performance chart
   Esc                Hide chart

 DATA
   r / F5             Refresh quotes

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
