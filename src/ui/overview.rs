//! Overview rendering: current values and whole-run statistics.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::common::{format_duration, format_pct, format_unit};
use crate::app::App;
use crate::data::Sample;

/// Render the Overview: a current-values panel next to a statistics
/// panel. Both fall back to placeholder text until the first sample
/// arrives.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).split(area);

    render_current(frame, app, chunks[0]);
    render_statistics(frame, app, chunks[1]);
}

fn render_current(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Current ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let latest = app.dashboard.as_ref().and_then(|d| d.latest.as_ref());
    let Some(latest) = latest else {
        let text = Paragraph::new("\n  No current sample").block(block);
        frame.render_widget(text, area);
        return;
    };

    let lines = vec![
        row("CPU", format!(
            "{}  {}",
            format_pct(latest.cpu_usage),
            format_unit(latest.cpu_power_w(), "W")
        )),
        row("GPU", format!(
            "{}  {}",
            format_pct(latest.gpu_usage),
            format_unit(latest.gpu_power_w(), "W")
        )),
        row("Memory", used_total(latest.memory_used_gb(), latest.memory_total_gb())),
        row("Swap", used_total(latest.swap_used_gb(), latest.swap_total_gb())),
        row("Disk", format!(
            "R {}  W {}",
            format_unit(latest.disk_read_mb_s(), "MB/s"),
            format_unit(latest.disk_write_mb_s(), "MB/s")
        )),
        row("Network", format!(
            "↓ {}  ↑ {}",
            format_unit(latest.net_in_kb_s(), "KB/s"),
            format_unit(latest.net_out_kb_s(), "KB/s")
        )),
        row("Temp", format!(
            "CPU {}  GPU {}",
            format_unit(latest.cpu_temp_c(), "°C"),
            format_unit(latest.gpu_temp_c(), "°C")
        )),
        row("Power", format_unit(latest.system_power_w(), "W")),
        thermal_row(app, latest),
        row("Overhead", format_unit(latest.sampling_overhead_ms, "ms")),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn row(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!(" {:<10}", label)),
        Span::raw(value),
    ])
}

fn thermal_row(app: &App, latest: &Sample) -> Line<'static> {
    match latest.thermal_state {
        Some(ref state) => Line::from(vec![
            Span::raw(format!(" {:<10}", "Thermal")),
            Span::styled(state.clone(), app.theme.thermal_style(state)),
        ]),
        None => row("Thermal", "--".to_string()),
    }
}

fn used_total(used: Option<f64>, total: Option<f64>) -> String {
    match (used, total) {
        (Some(u), Some(t)) => format!("{:.1} / {:.1} GB", u, t),
        _ => "--".to_string(),
    }
}

fn render_statistics(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Session Statistics ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let stats = app.dashboard.as_ref().and_then(|d| d.stats.as_ref());
    let Some(stats) = stats else {
        let text = Paragraph::new("\n  No samples yet").block(block);
        frame.render_widget(text, area);
        return;
    };

    let lines = vec![
        row("Samples", format!("{}", stats.samples)),
        row("Duration", format_duration(stats.duration)),
        row("Avg CPU", format!("{:.1}%", stats.mean_cpu)),
        row("Peak CPU", format!("{:.1}%", stats.peak_cpu)),
        row("Avg Mem", format!("{:.1} GB", stats.mean_memory_gb)),
        row("Peak Mem", format!("{:.1} GB", stats.peak_memory_gb)),
        row("Peak Swap", format!("{:.2} GB", stats.peak_swap_gb)),
        row("Avg Power", format!("{:.1} W", stats.mean_power_w)),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
