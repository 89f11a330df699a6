//! Chart grid rendering over the visible window.
//!
//! Mirrors the dashboard's chart set: cpu, gpu, memory, swap, disk,
//! network, temperature, and power, each drawn from the projected
//! `(timestamp, value)` series.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use crate::app::App;
use crate::data::Metric;

/// Render the Charts view: a 4x2 grid covering every charted metric.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.dashboard.is_none() {
        return;
    }

    let rows = Layout::vertical([
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
    ])
    .split(area);

    let cells: Vec<Rect> = rows
        .iter()
        .flat_map(|row| {
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(*row)
                .to_vec()
        })
        .collect();

    render_chart(frame, app, cells[0], " CPU ", &[(Metric::CpuUsage, Color::Blue)]);
    render_chart(frame, app, cells[1], " GPU ", &[(Metric::GpuUsage, Color::Magenta)]);
    render_chart(frame, app, cells[2], " Memory ", &[(Metric::MemoryUsed, Color::Green)]);
    render_chart(frame, app, cells[3], " Swap ", &[(Metric::SwapUsed, Color::Yellow)]);
    render_chart(
        frame,
        app,
        cells[4],
        " Disk ",
        &[(Metric::DiskRead, Color::Green), (Metric::DiskWrite, Color::Red)],
    );
    render_chart(
        frame,
        app,
        cells[5],
        " Network ",
        &[(Metric::NetIn, Color::Green), (Metric::NetOut, Color::Blue)],
    );
    render_chart(
        frame,
        app,
        cells[6],
        " Temperature ",
        &[(Metric::CpuTemp, Color::Red), (Metric::GpuTemp, Color::Yellow)],
    );
    render_chart(
        frame,
        app,
        cells[7],
        " Power ",
        &[
            (Metric::SystemPower, Color::Green),
            (Metric::CpuPower, Color::Blue),
            (Metric::GpuPower, Color::Magenta),
        ],
    );
}

/// Render one chart cell with one dataset per metric.
fn render_chart(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    metrics: &[(Metric, Color)],
) {
    let Some(ref dash) = app.dashboard else {
        return;
    };

    let datasets: Vec<Dataset> = metrics
        .iter()
        .map(|(metric, color)| {
            Dataset::default()
                .name(metric.label())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(*color))
                .data(dash.series(*metric))
        })
        .collect();

    let (x_bounds, y_max) = bounds(dash, metrics);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .x_axis(Axis::default().bounds(x_bounds))
        .y_axis(
            Axis::default()
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", y_max)),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Shared x bounds over the window plus a headroom-padded y maximum
/// across every dataset in the cell.
fn bounds(dash: &crate::app::Dashboard, metrics: &[(Metric, Color)]) -> ([f64; 2], f64) {
    let mut x_min = f64::MAX;
    let mut x_max = f64::MIN;
    let mut y_max = 0.0f64;

    for (metric, _) in metrics {
        for &(x, y) in dash.series(*metric) {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_max = y_max.max(y);
        }
    }

    if x_min > x_max {
        // Empty series
        return ([0.0, 1.0], 1.0);
    }
    if x_min == x_max {
        x_max = x_min + 1.0;
    }

    ([x_min, x_max], (y_max * 1.1).max(1.0))
}
