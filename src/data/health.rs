//! Rolling health classification for the tracked application.
//!
//! Averages the tracked app's CPU and memory usage over a trailing
//! wall-clock window and classifies each into a three-tier scale.

use chrono::Duration;

use super::sample::Sample;

/// Thresholds for health tier computation.
///
/// Lower bounds are closed: an average sitting exactly on a threshold
/// belongs to the higher tier.
#[derive(Debug, Clone)]
pub struct HealthThresholds {
    /// Normalized CPU % at which the tracked app enters WARNING.
    pub cpu_warning: f64,
    /// Normalized CPU % at which the tracked app enters HIGH.
    pub cpu_high: f64,
    /// Memory % at which the tracked app enters WARNING.
    pub mem_warning: f64,
    /// Memory % at which the tracked app enters HIGH.
    pub mem_high: f64,
    /// Width of the trailing window, in wall-clock sample time.
    pub window: Duration,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            cpu_warning: 30.0,
            cpu_high: 50.0,
            mem_warning: 40.0,
            mem_high: 60.0,
            window: Duration::seconds(30),
        }
    }
}

/// Health tier for one rolling-average metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Ok,
    Warning,
    High,
}

impl Tier {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            Tier::Ok => "OK",
            Tier::Warning => "WARN",
            Tier::High => "HIGH",
        }
    }

    fn classify(value: f64, warning: f64, high: f64) -> Self {
        if value >= high {
            Tier::High
        } else if value >= warning {
            Tier::Warning
        } else {
            Tier::Ok
        }
    }
}

/// One classified rolling average, for display as a label plus tooltip
/// value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricHealth {
    pub tier: Tier,
    pub average: f64,
}

/// Health report for one evaluation cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthReport {
    pub cpu: MetricHealth,
    pub memory: MetricHealth,
    /// Samples that contributed to the averages.
    pub window_samples: usize,
}

/// Computes trailing-window health reports, retaining the previous
/// report across cycles where no samples fall in the window so the
/// indicator doesn't flicker during data gaps.
#[derive(Debug, Default)]
pub struct RollingHealthEvaluator {
    thresholds: HealthThresholds,
    last_report: Option<HealthReport>,
}

impl RollingHealthEvaluator {
    pub fn new(thresholds: HealthThresholds) -> Self {
        Self { thresholds, last_report: None }
    }

    /// Re-evaluate against the full store.
    ///
    /// The window is anchored at the latest sample's timestamp, so
    /// user-loaded historic files classify the same way a live tail
    /// does. Samples without a tracked-app summary are excluded from
    /// both numerator and denominator.
    pub fn evaluate(&mut self, samples: &[Sample]) -> Option<&HealthReport> {
        if let Some(report) = self.compute(samples) {
            self.last_report = Some(report);
        }
        self.last_report.as_ref()
    }

    /// The most recent report, if any cycle has produced one.
    pub fn current(&self) -> Option<&HealthReport> {
        self.last_report.as_ref()
    }

    fn compute(&self, samples: &[Sample]) -> Option<HealthReport> {
        let now = samples.last()?.timestamp;
        let cutoff = now - self.thresholds.window;

        let mut cpu_sum = 0.0;
        let mut mem_sum = 0.0;
        let mut count = 0usize;

        // Samples are ordered, so walk backwards and stop at the cutoff
        for sample in samples.iter().rev() {
            if sample.timestamp < cutoff {
                break;
            }
            if let Some(ref group) = sample.windsurf {
                cpu_sum += group.total_cpu_normalized;
                mem_sum += group.total_mem;
                count += 1;
            }
        }

        if count == 0 {
            return None;
        }

        let cpu_avg = cpu_sum / count as f64;
        let mem_avg = mem_sum / count as f64;
        let t = &self.thresholds;

        Some(HealthReport {
            cpu: MetricHealth {
                tier: Tier::classify(cpu_avg, t.cpu_warning, t.cpu_high),
                average: cpu_avg,
            },
            memory: MetricHealth {
                tier: Tier::classify(mem_avg, t.mem_warning, t.mem_high),
                average: mem_avg,
            },
            window_samples: count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample::ProcessGroup;
    use chrono::{TimeZone, Utc};

    fn sample_with_app(secs: i64, cpu: f64, mem: f64) -> Sample {
        let mut s = bare_sample(secs);
        s.windsurf = Some(ProcessGroup {
            total_cpu_normalized: cpu,
            total_mem: mem,
            ..Default::default()
        });
        s
    }

    fn bare_sample(secs: i64) -> Sample {
        Sample {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
                + Duration::seconds(secs),
            cpu_usage: None,
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
    fn test_threshold_boundary_is_closed() {
        let mut eval = RollingHealthEvaluator::default();

        let samples = vec![sample_with_app(0, 30.0, 10.0)];
        let report = eval.evaluate(&samples).unwrap();
        assert_eq!(report.cpu.tier, Tier::Warning);
        assert_eq!(report.cpu.average, 30.0);

        let samples = vec![sample_with_app(0, 29.999, 10.0)];
        let report = eval.evaluate(&samples).unwrap();
        assert_eq!(report.cpu.tier, Tier::Ok);
    }

    #[test]
    fn test_memory_tiers() {
        let mut eval = RollingHealthEvaluator::default();

        let report = eval.evaluate(&[sample_with_app(0, 0.0, 39.9)]).unwrap();
        assert_eq!(report.memory.tier, Tier::Ok);
        let report = eval.evaluate(&[sample_with_app(0, 0.0, 40.0)]).unwrap();
        assert_eq!(report.memory.tier, Tier::Warning);
        let report = eval.evaluate(&[sample_with_app(0, 0.0, 60.0)]).unwrap();
        assert_eq!(report.memory.tier, Tier::High);
    }

    #[test]
    fn test_cpu_high_tier() {
        let mut eval = RollingHealthEvaluator::default();
        let report = eval.evaluate(&[sample_with_app(0, 50.0, 0.0)]).unwrap();
        assert_eq!(report.cpu.tier, Tier::High);
    }

    #[test]
    fn test_average_only_over_window() {
        let mut eval = RollingHealthEvaluator::default();
        // First sample is 60s before the latest: outside the 30s window
        let samples = vec![
            sample_with_app(0, 100.0, 100.0),
            sample_with_app(60, 10.0, 10.0),
            sample_with_app(61, 20.0, 20.0),
        ];
        let report = eval.evaluate(&samples).unwrap();
        assert_eq!(report.window_samples, 2);
        assert_eq!(report.cpu.average, 15.0);
        assert_eq!(report.cpu.tier, Tier::Ok);
    }

    #[test]
    fn test_samples_without_summary_excluded_from_denominator() {
        let mut eval = RollingHealthEvaluator::default();
        let samples = vec![
            sample_with_app(0, 40.0, 50.0),
            bare_sample(1),
            bare_sample(2),
        ];
        // Two bare samples must not dilute the average toward zero
        let report = eval.evaluate(&samples).unwrap();
        assert_eq!(report.window_samples, 1);
        assert_eq!(report.cpu.average, 40.0);
        assert_eq!(report.cpu.tier, Tier::Warning);
    }

    #[test]
    fn test_empty_window_keeps_previous_report() {
        let mut eval = RollingHealthEvaluator::default();

        let report = eval.evaluate(&[sample_with_app(0, 55.0, 10.0)]).unwrap().clone();
        assert_eq!(report.cpu.tier, Tier::High);

        // A cycle where no sample carries the summary: previous report stands
        let stale = eval.evaluate(&[bare_sample(100)]).unwrap();
        assert_eq!(*stale, report);

        // And an empty store behaves the same way
        let stale = eval.evaluate(&[]).unwrap();
        assert_eq!(*stale, report);
    }

    #[test]
    fn test_no_report_before_first_data() {
        let mut eval = RollingHealthEvaluator::default();
        assert!(eval.evaluate(&[]).is_none());
        assert!(eval.current().is_none());
    }
}
