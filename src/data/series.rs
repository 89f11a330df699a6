//! Chart and summary projections over the log store.
//!
//! Everything here is a pure function of the store snapshot: identical
//! store content always yields identical projections, so chart data and
//! statistics can be tested without mocking time or I/O.

use chrono::Duration;

use super::sample::{bytes_to_gb, Sample};

/// Most recent samples shown in charts. Five minutes at one-second
/// sampling intervals.
pub const MAX_DATA_POINTS: usize = 300;

/// A metric that can be projected into a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// CPU usage, percent.
    CpuUsage,
    /// GPU usage, percent.
    GpuUsage,
    /// Memory used, GB.
    MemoryUsed,
    /// Swap used, GB.
    SwapUsed,
    /// Disk read, MB/s.
    DiskRead,
    /// Disk write, MB/s.
    DiskWrite,
    /// Network in, KB/s.
    NetIn,
    /// Network out, KB/s.
    NetOut,
    /// CPU temperature, °C (SoC fallback applies).
    CpuTemp,
    /// GPU temperature, °C (SoC fallback applies).
    GpuTemp,
    /// System power, W.
    SystemPower,
    /// CPU power, W.
    CpuPower,
    /// GPU power, W.
    GpuPower,
    /// Tracked app normalized CPU, percent.
    AppCpu,
    /// Tracked app memory, percent.
    AppMem,
    /// Tracked app resident set, GB.
    AppRss,
}

impl Metric {
    /// Chart value for one sample. Missing leaves project to 0 here;
    /// scalar readouts use the `Sample` accessors instead so they can
    /// show a placeholder.
    pub fn value(&self, sample: &Sample) -> f64 {
        match self {
            Metric::CpuUsage => sample.cpu_usage.unwrap_or(0.0),
            Metric::GpuUsage => sample.gpu_usage.unwrap_or(0.0),
            Metric::MemoryUsed => sample.memory_used_gb().unwrap_or(0.0),
            Metric::SwapUsed => sample.swap_used_gb().unwrap_or(0.0),
            Metric::DiskRead => sample.disk_read_mb_s().unwrap_or(0.0),
            Metric::DiskWrite => sample.disk_write_mb_s().unwrap_or(0.0),
            Metric::NetIn => sample.net_in_kb_s().unwrap_or(0.0),
            Metric::NetOut => sample.net_out_kb_s().unwrap_or(0.0),
            Metric::CpuTemp => sample.cpu_temp_c().unwrap_or(0.0),
            Metric::GpuTemp => sample.gpu_temp_c().unwrap_or(0.0),
            Metric::SystemPower => sample.system_power_w().unwrap_or(0.0),
            Metric::CpuPower => sample.cpu_power_w().unwrap_or(0.0),
            Metric::GpuPower => sample.gpu_power_w().unwrap_or(0.0),
            Metric::AppCpu => {
                sample.windsurf.as_ref().map(|w| w.total_cpu_normalized).unwrap_or(0.0)
            }
            Metric::AppMem => sample.windsurf.as_ref().map(|w| w.total_mem).unwrap_or(0.0),
            Metric::AppRss => {
                sample.windsurf.as_ref().map(|w| w.total_rss_mb / 1024.0).unwrap_or(0.0)
            }
        }
    }

    /// Display label including unit.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::CpuUsage => "CPU %",
            Metric::GpuUsage => "GPU %",
            Metric::MemoryUsed => "Memory GB",
            Metric::SwapUsed => "Swap GB",
            Metric::DiskRead => "Read MB/s",
            Metric::DiskWrite => "Write MB/s",
            Metric::NetIn => "Down KB/s",
            Metric::NetOut => "Up KB/s",
            Metric::CpuTemp => "CPU °C",
            Metric::GpuTemp => "GPU °C",
            Metric::SystemPower => "System W",
            Metric::CpuPower => "CPU W",
            Metric::GpuPower => "GPU W",
            Metric::AppCpu => "App CPU %",
            Metric::AppMem => "App Mem %",
            Metric::AppRss => "App RSS GB",
        }
    }
}

/// Trailing slice of at most [`MAX_DATA_POINTS`] samples, oldest first.
pub fn visible_window(samples: &[Sample]) -> &[Sample] {
    let start = samples.len().saturating_sub(MAX_DATA_POINTS);
    &samples[start..]
}

/// Project one metric over the window into `(unix seconds, value)`
/// points, ready for chart consumption.
pub fn series(window: &[Sample], metric: Metric) -> Vec<(f64, f64)> {
    window
        .iter()
        .map(|s| (s.timestamp.timestamp() as f64, metric.value(s)))
        .collect()
}

/// The most recent sample, or none for an empty store. "No current
/// sample" is a display state, not an error.
pub fn latest(samples: &[Sample]) -> Option<&Sample> {
    samples.last()
}

/// Whole-run statistics, computed over the entire store rather than the
/// visible window.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateStats {
    pub samples: usize,
    pub duration: Duration,
    pub mean_cpu: f64,
    pub peak_cpu: f64,
    pub mean_memory_gb: f64,
    pub peak_memory_gb: f64,
    pub peak_swap_gb: f64,
    pub mean_power_w: f64,
}

/// Compute aggregate statistics, or none for an empty store.
pub fn aggregate(samples: &[Sample]) -> Option<AggregateStats> {
    let (first, last) = (samples.first()?, samples.last()?);
    let n = samples.len() as f64;

    let mut total_cpu = 0.0;
    let mut peak_cpu = 0.0f64;
    let mut total_mem = 0.0;
    let mut peak_mem = 0.0f64;
    let mut peak_swap = 0.0f64;
    let mut total_power = 0.0;

    for s in samples {
        let cpu = s.cpu_usage.unwrap_or(0.0);
        let mem = s.memory.as_ref().map(|m| bytes_to_gb(m.used)).unwrap_or(0.0);
        let swap = s.memory.as_ref().map(|m| bytes_to_gb(m.swap_used)).unwrap_or(0.0);
        let power = s.system_power_w().unwrap_or(0.0);

        total_cpu += cpu;
        total_mem += mem;
        total_power += power;
        peak_cpu = peak_cpu.max(cpu);
        peak_mem = peak_mem.max(mem);
        peak_swap = peak_swap.max(swap);
    }

    Some(AggregateStats {
        samples: samples.len(),
        duration: last.timestamp - first.timestamp,
        mean_cpu: total_cpu / n,
        peak_cpu,
        mean_memory_gb: total_mem / n,
        peak_memory_gb: peak_mem,
        peak_swap_gb: peak_swap,
        mean_power_w: total_power / n,
    })
}

/// One row of the ranked process table.
#[derive(Debug, Clone)]
pub struct ProcessRow {
    pub pid: u32,
    pub kind: String,
    pub cpu: f64,
    pub rss_mb: f64,
}

/// Process rows from the latest sample's tracked-app summary, ranked by
/// CPU descending. Empty when the latest sample carries no summary.
pub fn ranked_processes(latest: &Sample) -> Vec<ProcessRow> {
    let Some(ref group) = latest.windsurf else {
        return Vec::new();
    };

    let mut rows: Vec<ProcessRow> = group
        .processes
        .iter()
        .map(|p| ProcessRow {
            pid: p.pid,
            kind: p.kind.clone(),
            cpu: p.cpu,
            rss_mb: p.rss_mb,
        })
        .collect();
    rows.sort_by(|a, b| b.cpu.total_cmp(&a.cpu));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample::{MemoryInfo, ProcessEntry, ProcessGroup, SocMetrics};
    use chrono::{TimeZone, Utc};

    fn sample(secs: i64, cpu: Option<f64>) -> Sample {
        Sample {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(secs),
            cpu_usage: cpu,
            gpu_usage: None,
            memory: None,
            net_disk: None,
            cpu_temp: None,
            gpu_temp: None,
            thermal_state: None,
            soc_metrics: None,
            windsurf: None,
            sampling_overhead_ms: None,
        }
    }

    #[test]
    fn test_window_smaller_store_returns_all() {
        let samples: Vec<Sample> = (0..10).map(|i| sample(i, Some(i as f64))).collect();
        assert_eq!(visible_window(&samples).len(), 10);
    }

    #[test]
    fn test_window_caps_at_max_points_oldest_first() {
        let samples: Vec<Sample> = (0..500).map(|i| sample(i, Some(i as f64))).collect();
        let window = visible_window(&samples);
        assert_eq!(window.len(), MAX_DATA_POINTS);
        // Last 300 of 500, still ordered oldest first
        assert_eq!(window[0].cpu_usage, Some(200.0));
        assert_eq!(window[299].cpu_usage, Some(499.0));
    }

    #[test]
    fn test_series_projects_missing_as_zero() {
        let samples = vec![sample(0, Some(50.0)), sample(1, None)];
        let points = series(&samples, Metric::CpuUsage);
        assert_eq!(points[0].1, 50.0);
        assert_eq!(points[1].1, 0.0);
    }

    #[test]
    fn test_memory_series_in_gb() {
        let mut s = sample(0, None);
        s.memory = Some(MemoryInfo {
            used: 8_589_934_592,
            total: 17_179_869_184,
            swap_used: 0,
            swap_total: 0,
        });
        let points = series(std::slice::from_ref(&s), Metric::MemoryUsed);
        assert_eq!(points[0].1, 8.0);
    }

    #[test]
    fn test_latest_none_on_empty() {
        assert!(latest(&[]).is_none());
        let samples = vec![sample(0, Some(1.0)), sample(1, Some(2.0))];
        assert_eq!(latest(&samples).unwrap().cpu_usage, Some(2.0));
    }

    #[test]
    fn test_aggregate_empty_store() {
        assert!(aggregate(&[]).is_none());
    }

    #[test]
    fn test_aggregate_means_and_peaks() {
        let mut a = sample(0, Some(10.0));
        a.memory = Some(MemoryInfo { used: 1 << 30, ..Default::default() });
        a.soc_metrics = Some(SocMetrics { system_power: Some(10.0), ..Default::default() });
        let mut b = sample(60, Some(30.0));
        b.memory = Some(MemoryInfo {
            used: 3 * (1 << 30),
            swap_used: 1 << 29,
            ..Default::default()
        });
        b.soc_metrics = Some(SocMetrics { system_power: Some(20.0), ..Default::default() });

        let stats = aggregate(&[a, b]).unwrap();
        assert_eq!(stats.samples, 2);
        assert_eq!(stats.duration, Duration::seconds(60));
        assert_eq!(stats.mean_cpu, 20.0);
        assert_eq!(stats.peak_cpu, 30.0);
        assert_eq!(stats.mean_memory_gb, 2.0);
        assert_eq!(stats.peak_memory_gb, 3.0);
        assert_eq!(stats.peak_swap_gb, 0.5);
        assert_eq!(stats.mean_power_w, 15.0);
    }

    #[test]
    fn test_ranked_processes_sorted_by_cpu() {
        let mut s = sample(0, None);
        s.windsurf = Some(ProcessGroup {
            process_count: 3,
            processes: vec![
                ProcessEntry { pid: 1, kind: "main".into(), cpu: 2.0, rss_mb: 100.0 },
                ProcessEntry { pid: 2, kind: "renderer".into(), cpu: 9.0, rss_mb: 300.0 },
                ProcessEntry { pid: 3, kind: "helper".into(), cpu: 4.0, rss_mb: 50.0 },
            ],
            ..Default::default()
        });

        let rows = ranked_processes(&s);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].pid, 2);
        assert_eq!(rows[1].pid, 3);
        assert_eq!(rows[2].pid, 1);
    }

    #[test]
    fn test_ranked_processes_without_summary() {
        assert!(ranked_processes(&sample(0, None)).is_empty());
    }

    #[test]
    fn test_app_rss_series_in_gb() {
        let mut s = sample(0, None);
        s.windsurf = Some(ProcessGroup { total_rss_mb: 2048.0, ..Default::default() });
        let points = series(std::slice::from_ref(&s), Metric::AppRss);
        assert_eq!(points[0].1, 2.0);
    }
}
