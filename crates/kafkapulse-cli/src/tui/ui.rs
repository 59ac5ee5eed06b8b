//! TUI rendering.
//!
//! ┌──────────────────────────────────────────────────────────┐
//! │ ⚡ KafkaPulse  UP  Production-Primary (lkc-p8y3q7)  #12  │
//! ├─────────────┬─────────────┬─────────────┬────────────────┤
//! │ Active Conn │ Request Rate│ Bytes In    │ Bytes Out      │
//! ├─────────────┴─────────────┴──────┬──────┴────────────────┤
//! │ Connection History               │ AI Cluster Analysis   │
//! │   ⣀⡠⠔⠊⠉⠑⠢⣀                      ├───────────────────────┤
//! │                                  │ Assistant chat        │
//! ├──────────────────────────────────┴───────────────────────┤
//! │ q quit  a analyze  p pause  n next  s snapshot  i chat   │
//! └──────────────────────────────────────────────────────────┘

use super::app::{App, InputMode};
use kafkapulse_core::{ChatRole, ClusterStatus, MetricRecord, clock_part};
use ratatui::{prelude::*, widgets::*};

pub fn draw(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(4), // cards
            Constraint::Min(12),   // chart + assistant
            Constraint::Length(1), // keys
        ])
        .split(f.area());

    draw_title(f, rows[0], app);
    draw_cards(f, rows[1], app);
    draw_main(f, rows[2], app);
    draw_keys(f, rows[3], app);
}

fn status_color(status: ClusterStatus) -> Color {
    match status {
        ClusterStatus::Up => Color::Green,
        ClusterStatus::Degraded => Color::Yellow,
        ClusterStatus::Down => Color::Red,
    }
}

fn draw_title(f: &mut Frame, area: Rect, app: &App) {
    let cluster = app.cluster();
    let window = app.window();
    let paused = if app.is_paused() { "  ⏸ PAUSED" } else { "" };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(vec![
            Span::styled(" ⚡ KafkaPulse ", Style::default().bold().fg(Color::Cyan)),
            Span::styled(
                format!(" {} ", cluster.status),
                Style::default().bold().fg(status_color(cluster.status)),
            ),
            Span::raw(format!("  {}", cluster.label())),
            Span::styled(
                format!("  {} {}", cluster.provider, cluster.region),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("  tick #{}", window.generation()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(paused, Style::default().bold().fg(Color::Yellow)),
            Span::raw(" "),
        ]));

    f.render_widget(block, area);
}

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

/// Arrow, magnitude text and color for a rounded trend percentage.
/// Zero counts as rising.
pub fn trend_label(percent: f64) -> (String, Color) {
    if percent >= 0.0 {
        (format!("↑ {:.1}% vs previous", percent.abs()), Color::Green)
    } else {
        (format!("↓ {:.1}% vs previous", percent.abs()), Color::Red)
    }
}

/// Throughput with one decimal.
pub fn format_mb(value: f64) -> String {
    format!("{value:.1} MB/s")
}

fn card<'a>(title: &'a str, value: String, footer: Option<Line<'a>>) -> Paragraph<'a> {
    let mut lines = vec![Line::from(Span::styled(
        value,
        Style::default().bold().fg(Color::White),
    ))];
    if let Some(footer) = footer {
        lines.push(footer);
    }
    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                format!(" {title} "),
                Style::default().fg(Color::DarkGray),
            )),
    )
}

fn draw_cards(f: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4])
        .split(area);

    let window = app.window();
    let zero = MetricRecord::zero();
    let latest = window.latest().unwrap_or(&zero);
    let (trend_text, trend_color) = trend_label(window.trend().display_percent());

    f.render_widget(
        card(
            "Active Connections",
            latest.connections.to_string(),
            Some(Line::from(Span::styled(
                trend_text,
                Style::default().fg(trend_color),
            ))),
        ),
        cols[0],
    );
    f.render_widget(
        card("Request Rate", format!("{} req/s", latest.request_rate), None),
        cols[1],
    );
    f.render_widget(card("Bytes In", format_mb(latest.bytes_in), None), cols[2]);
    f.render_widget(card("Bytes Out", format_mb(latest.bytes_out), None), cols[3]);
}

// ---------------------------------------------------------------------------
// Main area
// ---------------------------------------------------------------------------

fn draw_main(f: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(area);

    draw_chart(f, cols[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(cols[1]);

    draw_analysis(f, right[0], app);
    draw_chat(f, right[1], app);
}

/// Y bounds with some headroom, never below zero.
pub fn chart_bounds(series: &[u64]) -> (f64, f64) {
    let min = series.iter().copied().min().unwrap_or(0) as f64;
    let max = series.iter().copied().max().unwrap_or(0) as f64;
    let pad = ((max - min) * 0.2).max(10.0);
    ((min - pad).max(0.0).floor(), (max + pad).ceil())
}

fn draw_chart(f: &mut Frame, area: Rect, app: &App) {
    let window = app.window();
    let series = window.connection_series();

    if series.is_empty() {
        let p = Paragraph::new("No metrics yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Connection History "),
            );
        f.render_widget(p, area);
        return;
    }

    let data: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, &c)| (i as f64, c as f64))
        .collect();
    let (y_min, y_max) = chart_bounds(&series);
    let x_max = (series.len().saturating_sub(1) as f64).max(1.0);

    let first = window.oldest().map(|r| clock_part(&r.timestamp)).unwrap_or("");
    let last = window.latest().map(|r| clock_part(&r.timestamp)).unwrap_or("");

    let datasets = vec![
        Dataset::default()
            .name("connections")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&data),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Connection History "),
        )
        .x_axis(Axis::default().bounds([0.0, x_max]).labels(vec![
            Line::from(first.to_string()),
            Line::from(last.to_string()),
        ]))
        .y_axis(Axis::default().bounds([y_min, y_max]).labels(vec![
            Line::from(format!("{y_min:.0}")),
            Line::from(format!("{y_max:.0}")),
        ]));

    f.render_widget(chart, area);
}

/// Render model Markdown as plain terminal lines: headings in bold, bullets
/// kept, bold markers dropped.
pub fn markdown_lines(text: &str) -> Vec<Line<'static>> {
    text.lines()
        .map(|raw| {
            let line = raw.replace("**", "");
            let trimmed = line.trim_start();
            if trimmed.starts_with('#') {
                let heading = trimmed.trim_start_matches('#').trim().to_string();
                Line::from(Span::styled(heading, Style::default().bold().fg(Color::Cyan)))
            } else if let Some(rest) = trimmed.strip_prefix("* ") {
                Line::from(format!("• {rest}"))
            } else if let Some(rest) = trimmed.strip_prefix("- ") {
                Line::from(format!("• {rest}"))
            } else {
                Line::from(line)
            }
        })
        .collect()
}

fn draw_analysis(f: &mut Frame, area: Rect, app: &App) {
    let title = if app.is_analyzing() {
        " AI Cluster Analysis ⟳ ".to_string()
    } else {
        format!(" AI Cluster Analysis ({}) ", app.model())
    };

    let text = match (app.is_analyzing(), app.summary()) {
        (true, _) => vec![Line::from(Span::styled(
            "Analyzing...",
            Style::default().fg(Color::Yellow),
        ))],
        (false, Some(summary)) => markdown_lines(summary),
        (false, None) => vec![Line::from(Span::styled(
            "Press a to analyze the current window",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let p = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(p, area);
}

fn draw_chat(f: &mut Frame, area: Rect, app: &App) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let transcript = app.transcript();
    let mut lines: Vec<Line> = Vec::new();
    for message in transcript.messages() {
        let (who, color) = match message.role {
            ChatRole::User => ("You", Color::Yellow),
            ChatRole::Assistant => ("AI", Color::Cyan),
        };
        let mut body = message.content.lines();
        lines.push(Line::from(vec![
            Span::styled(format!("{who}: "), Style::default().bold().fg(color)),
            Span::raw(body.next().unwrap_or_default().to_string()),
        ]));
        lines.extend(body.map(|l| Line::from(format!("  {l}"))));
    }
    if transcript.is_pending() {
        lines.push(Line::from(Span::styled(
            "AI is typing...",
            Style::default().fg(Color::DarkGray).italic(),
        )));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Ask about connection spikes, throughput or cluster health.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    // Keep the newest lines in view.
    let visible = parts[0].height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(visible) as u16;
    let history = Paragraph::new(lines).scroll((scroll, 0)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Kafka Intelligence Assistant "),
    );
    f.render_widget(history, parts[0]);

    let editing = app.input_mode() == InputMode::Editing;
    let input_text = if editing {
        Line::from(vec![
            Span::raw(app.input().to_string()),
            Span::styled("▏", Style::default().fg(Color::Yellow)),
        ])
    } else if app.input().is_empty() {
        Line::from(Span::styled(
            "press i to ask a question",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(app.input().to_string())
    };
    let border = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let input = Paragraph::new(input_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Ask "),
    );
    f.render_widget(input, parts[1]);
}

fn draw_keys(f: &mut Frame, area: Rect, app: &App) {
    let mut text = match app.input_mode() {
        InputMode::Normal => {
            " q quit   a analyze   p pause/resume   n next tick   s snapshot   i chat".to_string()
        }
        InputMode::Editing => " enter send   esc/tab back   backspace delete".to_string(),
    };
    if let Some(err) = app.export_error() {
        text.push_str(&format!("   snapshot failed: {err}"));
    } else if let Some(path) = app.last_export() {
        text.push_str(&format!("   saved {}", path.display()));
    }

    let bar = Paragraph::new(text).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(bar, area);
}
