//! Process table rendering for the tracked application.
//!
//! Displays the per-process rows from the latest sample ranked by CPU,
//! with the rolling-window health tiers and their averages alongside.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;

/// Render the Processes view: health summary on top, ranked table below.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(4), Constraint::Min(4)]).split(area);

    render_health(frame, app, chunks[0]);
    render_table(frame, app, chunks[1]);
}

fn render_health(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" App Health (30s rolling) ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let Some(report) = app.health.current() else {
        let text = Paragraph::new(" No tracked-app data in window").block(block);
        frame.render_widget(text, area);
        return;
    };

    let lines = vec![
        Line::from(vec![
            Span::raw(" CPU  "),
            Span::styled(report.cpu.tier.symbol(), app.theme.tier_style(report.cpu.tier)),
            Span::raw(format!("  avg {:.1}%", report.cpu.average)),
        ]),
        Line::from(vec![
            Span::raw(" Mem  "),
            Span::styled(
                report.memory.tier.symbol(),
                app.theme.tier_style(report.memory.tier),
            ),
            Span::raw(format!(
                "  avg {:.1}%  ({} samples)",
                report.memory.average, report.window_samples
            )),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(ref dash) = app.dashboard else {
        return;
    };

    let header = Row::new(vec![
        Cell::from("PID"),
        Cell::from("Type"),
        Cell::from("CPU %"),
        Cell::from("RSS MB"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = dash
        .processes
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.pid.to_string()),
                Cell::from(p.kind.clone()),
                Cell::from(format!("{:.1}", p.cpu)),
                Cell::from(format!("{:.1}", p.rss_mb)),
            ])
        })
        .collect();

    let count = dash.processes.len();
    let group = dash.latest.as_ref().and_then(|s| s.windsurf.as_ref());
    let title = match group {
        Some(g) => format!(
            " Processes ({})  cpu {:.1}%  mem {:.1}%  rss {:.0} MB ",
            g.process_count, g.total_cpu_normalized, g.total_mem, g.total_rss_mb
        ),
        None => " Processes (none in latest sample) ".to_string(),
    };

    let widths = [
        Constraint::Length(8),
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if count > 0 {
        state.select(Some(app.selected_process.min(count - 1)));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
