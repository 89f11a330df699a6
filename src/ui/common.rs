//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use chrono::Duration;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};

/// Render the header bar with current load and rolling health.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref dash) = app.dashboard else {
        let line = Line::from(vec![
            Span::styled(
                " SYSTEM MONITOR ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let mut spans = vec![Span::styled(
        " SYSTEM MONITOR ",
        Style::default().add_modifier(Modifier::BOLD),
    )];

    if let Some(ref latest) = dash.latest {
        spans.push(Span::raw("│ CPU "));
        spans.push(Span::raw(format_pct(latest.cpu_usage)));
        spans.push(Span::raw(" │ GPU "));
        spans.push(Span::raw(format_pct(latest.gpu_usage)));
        spans.push(Span::raw(" │ Mem "));
        spans.push(Span::raw(
            latest
                .memory_used_gb()
                .map(|v| format!("{:.1} GB", v))
                .unwrap_or_else(|| "--".to_string()),
        ));
        if let Some(ref state) = latest.thermal_state {
            spans.push(Span::raw(" │ "));
            spans.push(Span::styled(state.clone(), app.theme.thermal_style(state)));
        }
    }

    if let Some(report) = app.health.current() {
        spans.push(Span::raw(" │ App "));
        spans.push(Span::styled(
            format!("cpu:{}", report.cpu.tier.symbol()),
            app.theme.tier_style(report.cpu.tier),
        ));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("mem:{}", report.memory.tier.symbol()),
            app.theme.tier_style(report.memory.tier),
        ));
    }

    spans.push(Span::raw(format!(" │ {} samples", dash.stats.as_ref().map(|s| s.samples).unwrap_or(0))));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Overview "),
        Line::from(" 2:Charts "),
        Line::from(" 3:Processes "),
    ];

    let selected = match app.current_view {
        View::Overview => 0,
        View::Charts => 1,
        View::Processes => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: data source, refresh state, time since last update, controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if app.dashboard.is_some() {
        let updated = app
            .last_update
            .map(|t| format!("{:.1}s ago", t.elapsed().as_secs_f64()))
            .unwrap_or_else(|| "never".to_string());
        let refresh = if app.scheduler.is_enabled() {
            format!("auto {}ms", app.scheduler.period().as_millis())
        } else {
            "paused".to_string()
        };
        format!(
            " {} | {} | Updated {} | Tab:switch r:reload Space:pause +/-:interval ?:help q:quit",
            app.source_description(),
            refresh,
            updated,
        )
    } else if let Some(ref err) = app.load_error {
        format!(
            " No data: {} | Start the sampler to create today's log | r:retry q:quit",
            err
        )
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  Tab         Next view"),
        Line::from("  1/2/3       Jump to view"),
        Line::from("  ↑/↓ j/k     Select process row"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Refresh",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Reload now"),
        Line::from("  Space     Pause/resume auto-refresh"),
        Line::from("  + / -     Adjust refresh interval"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 22u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

/// Format an optional percentage; missing renders as a placeholder, not 0.
pub fn format_pct(value: Option<f64>) -> String {
    value.map(|v| format!("{:.1}%", v)).unwrap_or_else(|| "--".to_string())
}

/// Format an optional value with a unit suffix.
pub fn format_unit(value: Option<f64>, unit: &str) -> String {
    value.map(|v| format!("{:.1} {}", v, unit)).unwrap_or_else(|| format!("-- {}", unit))
}

/// Format a wall-clock duration as "2h 5m", "3m 12s", or "45s".
pub fn format_duration(d: Duration) -> String {
    let seconds = d.num_seconds();
    let minutes = seconds / 60;
    let hours = minutes / 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pct_placeholder() {
        assert_eq!(format_pct(None), "--");
        assert_eq!(format_pct(Some(42.55)), "42.5%");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::seconds(45)), "45s");
        assert_eq!(format_duration(Duration::seconds(192)), "3m 12s");
        assert_eq!(format_duration(Duration::seconds(7500)), "2h 5m");
    }
}
