//! Application state and refresh-cycle logic.

use std::time::{Duration, Instant};

use crate::data::series::{self, AggregateStats, Metric, ProcessRow};
use crate::data::{HealthThresholds, LogStore, RollingHealthEvaluator, Sample};
use crate::scheduler::RefreshScheduler;
use crate::source::LogSource;
use crate::ui::Theme;

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Current values, thermal state, and whole-run statistics.
    Overview,
    /// Chart grid over the visible window.
    Charts,
    /// Tracked-app process table with rolling health.
    Processes,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Overview => View::Charts,
            View::Charts => View::Processes,
            View::Processes => View::Overview,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Overview => View::Processes,
            View::Charts => View::Overview,
            View::Processes => View::Charts,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Charts => "Charts",
            View::Processes => "Processes",
        }
    }
}

/// Metrics projected into chart series on every dashboard rebuild.
const SERIES_METRICS: [Metric; 16] = [
    Metric::CpuUsage,
    Metric::GpuUsage,
    Metric::MemoryUsed,
    Metric::SwapUsed,
    Metric::DiskRead,
    Metric::DiskWrite,
    Metric::NetIn,
    Metric::NetOut,
    Metric::CpuTemp,
    Metric::GpuTemp,
    Metric::SystemPower,
    Metric::CpuPower,
    Metric::GpuPower,
    Metric::AppCpu,
    Metric::AppMem,
    Metric::AppRss,
];

/// Projections pushed to the view layer.
///
/// Rebuilt only when ingestion reports new samples (or on the first
/// successful load), so idle refresh cycles never cause re-renders of
/// unchanged data.
#[derive(Debug, Default)]
pub struct Dashboard {
    pub latest: Option<Sample>,
    pub stats: Option<AggregateStats>,
    pub processes: Vec<ProcessRow>,
    series: Vec<(Metric, Vec<(f64, f64)>)>,
}

impl Dashboard {
    fn build(samples: &[Sample]) -> Self {
        let window = series::visible_window(samples);
        let latest = series::latest(samples).cloned();
        let processes = latest.as_ref().map(series::ranked_processes).unwrap_or_default();

        Self {
            latest,
            stats: series::aggregate(samples),
            processes,
            series: SERIES_METRICS.iter().map(|&m| (m, series::series(window, m))).collect(),
        }
    }

    /// Chart points for one metric over the visible window.
    pub fn series(&self, metric: Metric) -> &[(f64, f64)] {
        self.series
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, points)| points.as_slice())
            .unwrap_or(&[])
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    source: Box<dyn LogSource>,
    pub store: LogStore,
    pub dashboard: Option<Dashboard>,
    pub health: RollingHealthEvaluator,
    pub scheduler: RefreshScheduler,
    pub load_error: Option<String>,
    /// When projections were last pushed to the view.
    pub last_update: Option<Instant>,
    /// How many times projections have been pushed.
    pub updates: u64,

    /// Set once the first successful cycle has pushed projections.
    first_push_done: bool,
    /// User-supplied file mode: first load replaces the store wholesale.
    user_file: bool,
    initial_load_done: bool,

    pub selected_process: usize,
    pub theme: Theme,
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from the given source.
    ///
    /// `user_file` selects user-supplied-file semantics: the first load
    /// goes through `replace_all` and read failures surface immediately.
    pub fn new(source: Box<dyn LogSource>, thresholds: HealthThresholds, user_file: bool) -> Self {
        Self {
            running: true,
            current_view: View::Overview,
            show_help: false,
            source,
            store: LogStore::new(),
            dashboard: None,
            health: RollingHealthEvaluator::new(thresholds),
            scheduler: RefreshScheduler::new(Duration::from_millis(2000)),
            load_error: None,
            last_update: None,
            updates: 0,
            first_push_done: false,
            user_file,
            initial_load_done: false,
            selected_process: 0,
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> String {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Run one scheduled refresh pass: a cycle happens only when the
    /// scheduler says a tick is due and no cycle is in flight.
    pub fn on_tick(&mut self, now: Instant) {
        if self.scheduler.try_begin_cycle(now) {
            self.run_cycle(false);
            self.scheduler.complete_cycle();
        }
    }

    /// User-triggered reload, independent of the schedule. Always
    /// updates the view.
    pub fn reload(&mut self) {
        self.run_cycle(true);
    }

    /// One ingestion cycle: fetch the full log text and reconcile.
    ///
    /// Projections are pushed when new samples arrived, on the very
    /// first successful cycle, or when `force` is set. Fetch failures
    /// with a non-empty store are swallowed; with an empty store the
    /// error state is surfaced.
    fn run_cycle(&mut self, force: bool) {
        let Some(text) = self.source.fetch() else {
            if self.store.is_empty() || self.user_file {
                self.load_error =
                    Some(self.source.error().unwrap_or("failed to read log").to_string());
            }
            return;
        };

        let appended = if self.user_file && !self.initial_load_done {
            self.store.replace_all(&text)
        } else {
            self.store.ingest(&text)
        };
        self.initial_load_done = true;
        self.load_error = None;

        if appended > 0 || !self.first_push_done || force {
            self.push_projections();
            self.first_push_done = true;
        }
    }

    /// Rebuild the cached dashboard and re-evaluate rolling health.
    fn push_projections(&mut self) {
        let samples = self.store.snapshot();
        self.dashboard = Some(Dashboard::build(samples));
        self.health.evaluate(samples);
        self.last_update = Some(Instant::now());
        self.updates += 1;

        // Clamp process selection to the new table
        if let Some(ref dash) = self.dashboard {
            if self.selected_process >= dash.processes.len() {
                self.selected_process = dash.processes.len().saturating_sub(1);
            }
        }
    }

    /// Start auto-refresh with the given period, replacing any running
    /// schedule.
    pub fn start_auto_refresh(&mut self, period: Duration, now: Instant) {
        self.scheduler.start(period, now);
    }

    /// Stop auto-refresh; the current view stands.
    pub fn stop_auto_refresh(&mut self) {
        self.scheduler.stop();
    }

    /// Toggle auto-refresh, preserving the configured period.
    pub fn toggle_auto_refresh(&mut self, now: Instant) {
        if self.scheduler.is_enabled() {
            self.stop_auto_refresh();
            self.set_status_message("auto-refresh off".into());
        } else {
            let period = self.scheduler.period();
            self.start_auto_refresh(period, now);
            self.set_status_message(format!("auto-refresh every {}ms", period.as_millis()));
        }
    }

    /// Adjust the refresh interval by the given delta. Takes effect
    /// immediately when auto-refresh is running.
    pub fn adjust_refresh_interval(&mut self, delta_ms: i64, now: Instant) {
        let current = self.scheduler.period().as_millis() as i64;
        let next = (current + delta_ms).max(250) as u64;
        let period = Duration::from_millis(next);
        if self.scheduler.is_enabled() {
            self.scheduler.start(period, now);
        } else {
            self.scheduler = RefreshScheduler::new(period);
        }
        self.set_status_message(format!("refresh interval {}ms", next));
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move the process-table selection down.
    pub fn select_next(&mut self) {
        if let Some(ref dash) = self.dashboard {
            let max = dash.processes.len().saturating_sub(1);
            self.selected_process = (self.selected_process + 1).min(max);
        }
    }

    /// Move the process-table selection up.
    pub fn select_prev(&mut self) {
        self.selected_process = self.selected_process.saturating_sub(1);
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::LogSource;

    /// Scripted source: pops the front of a queue of fetch results.
    #[derive(Debug)]
    struct ScriptedSource {
        responses: Vec<Option<String>>,
        error: Option<String>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Option<String>>) -> Self {
            Self { responses, error: None }
        }
    }

    impl LogSource for ScriptedSource {
        fn fetch(&mut self) -> Option<String> {
            let next = if self.responses.is_empty() {
                None
            } else {
                self.responses.remove(0)
            };
            match &next {
                Some(_) => self.error = None,
                None => self.error = Some("no log file".to_string()),
            }
            next
        }

        fn description(&self) -> String {
            "scripted".to_string()
        }

        fn error(&self) -> Option<&str> {
            self.error.as_deref()
        }
    }

    fn app_with(responses: Vec<Option<String>>) -> App {
        App::new(
            Box::new(ScriptedSource::new(responses)),
            HealthThresholds::default(),
            false,
        )
    }

    fn line(secs: u64, cpu: f64) -> String {
        format!(
            r#"{{"timestamp":"2024-01-01T00:00:{:02}Z","cpu_usage":{}}}"#,
            secs, cpu
        )
    }

    #[test]
    fn test_first_cycle_pushes_even_without_prior_data() {
        let mut app = app_with(vec![Some(format!("{}\n", line(0, 42.5)))]);
        app.reload();
        let dash = app.dashboard.as_ref().unwrap();
        assert_eq!(dash.latest.as_ref().unwrap().cpu_usage, Some(42.5));
        assert!(app.load_error.is_none());
    }

    #[test]
    fn test_idle_cycle_does_not_rebuild_dashboard() {
        let text = format!("{}\n", line(0, 10.0));
        let mut app = app_with(vec![Some(text.clone()), Some(text)]);
        app.reload();
        assert_eq!(app.updates, 1);

        // Same content again: ingest reports 0, the push is skipped
        let now = Instant::now();
        app.start_auto_refresh(Duration::from_millis(1), now);
        app.on_tick(now + Duration::from_millis(5));
        assert_eq!(app.updates, 1);
    }

    #[test]
    fn test_fetch_failure_with_data_is_swallowed() {
        let mut app = app_with(vec![Some(format!("{}\n", line(0, 10.0))), None]);
        app.reload();
        assert!(app.load_error.is_none());

        app.reload();
        // Previous view stands; no error surfaced
        assert!(app.load_error.is_none());
        assert!(app.dashboard.is_some());
    }

    #[test]
    fn test_fetch_failure_with_empty_store_surfaces_error() {
        let mut app = app_with(vec![None]);
        app.reload();
        assert!(app.load_error.is_some());
        assert!(app.dashboard.is_none());
    }

    #[test]
    fn test_end_to_end_memory_projection() {
        let text = concat!(
            r#"{"timestamp":"2024-01-01T00:00:00Z","cpu_usage":42.5,"#,
            r#""memory":{"used":8589934592,"total":17179869184}}"#,
            "\n"
        );
        let mut app = app_with(vec![Some(text.to_string())]);
        app.reload();

        let dash = app.dashboard.as_ref().unwrap();
        assert_eq!(dash.latest.as_ref().unwrap().cpu_usage, Some(42.5));
        let mem = dash.series(Metric::MemoryUsed);
        assert_eq!(mem.len(), 1);
        assert_eq!(mem[0].1, 8.0);
    }

    #[test]
    fn test_user_file_first_load_replaces_store() {
        let mut app = App::new(
            Box::new(ScriptedSource::new(vec![Some(format!(
                "{}\n{}\n",
                line(0, 1.0),
                line(1, 2.0)
            ))])),
            HealthThresholds::default(),
            true,
        );
        app.reload();
        assert_eq!(app.store.len(), 2);
    }

    #[test]
    fn test_user_file_failure_surfaces_even_after_data() {
        let mut app = App::new(
            Box::new(ScriptedSource::new(vec![
                Some(format!("{}\n", line(0, 1.0))),
                None,
            ])),
            HealthThresholds::default(),
            true,
        );
        app.reload();
        assert!(app.load_error.is_none());
        app.reload();
        assert!(app.load_error.is_some());
    }

    #[test]
    fn test_view_cycling() {
        let mut app = app_with(vec![]);
        assert_eq!(app.current_view, View::Overview);
        app.next_view();
        assert_eq!(app.current_view, View::Charts);
        app.next_view();
        assert_eq!(app.current_view, View::Processes);
        app.next_view();
        assert_eq!(app.current_view, View::Overview);
        app.prev_view();
        assert_eq!(app.current_view, View::Processes);
    }

    #[test]
    fn test_adjust_interval_floors_at_250ms() {
        let mut app = app_with(vec![]);
        app.adjust_refresh_interval(-10_000, Instant::now());
        assert_eq!(app.scheduler.period(), Duration::from_millis(250));
    }
}
