//! Telemetry sample types.
//!
//! These types match the serialization format produced by the external
//! sampler, which appends one JSON object per line to the daily log file.
//! They serve as the common data format between the sampler producer and
//! this viewer consumer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped telemetry snapshot, parsed from one log line.
///
/// Every field other than `timestamp` is optional: the sampler omits
/// metrics it could not collect. A missing value renders as a placeholder
/// in scalar readouts but contributes 0 to chart series and aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    /// When this sample was taken. Samples are append-only and
    /// non-decreasing in timestamp within one log file.
    pub timestamp: DateTime<Utc>,

    /// Overall CPU usage percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_usage: Option<f64>,

    /// Overall GPU usage percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_usage: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_disk: Option<NetDiskInfo>,

    /// CPU temperature in °C, when the sampler reads it directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_temp: Option<f64>,

    /// GPU temperature in °C, when the sampler reads it directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_temp: Option<f64>,

    /// Platform thermal pressure: "Nominal", "Fair"/"Moderate",
    /// "Serious"/"Critical".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thermal_state: Option<String>,

    /// SoC-level power and temperature readings; fallback source for the
    /// top-level temp fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soc_metrics: Option<SocMetrics>,

    /// Aggregated metrics for the tracked application's process tree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windsurf: Option<ProcessGroup>,

    /// Cost of collecting this sample, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_overhead_ms: Option<f64>,
}

/// Memory and swap usage in bytes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryInfo {
    #[serde(default)]
    pub used: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub swap_used: u64,
    #[serde(default)]
    pub swap_total: u64,
}

/// Disk and network transfer rates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetDiskInfo {
    #[serde(default)]
    pub read_kbytes_per_sec: f64,
    #[serde(default)]
    pub write_kbytes_per_sec: f64,
    #[serde(default)]
    pub in_bytes_per_sec: f64,
    #[serde(default)]
    pub out_bytes_per_sec: f64,
}

/// SoC power/thermal readings in watts and °C.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_power: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_power: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_power: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_temp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_temp: Option<f64>,
}

/// Per-sample summary of the tracked application's process tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessGroup {
    #[serde(default)]
    pub process_count: u64,
    /// CPU usage normalized across cores, as a percentage.
    #[serde(default)]
    pub total_cpu_normalized: f64,
    /// Memory usage as a percentage of physical memory.
    #[serde(default)]
    pub total_mem: f64,
    #[serde(default)]
    pub total_rss_mb: f64,
    #[serde(default)]
    pub processes: Vec<ProcessEntry>,
}

/// One process within the tracked group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessEntry {
    pub pid: u32,
    /// Process role, e.g. "renderer" or "extension-host".
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub cpu: f64,
    #[serde(default)]
    pub rss_mb: f64,
}

impl Sample {
    /// CPU temperature with `soc_metrics` fallback.
    pub fn cpu_temp_c(&self) -> Option<f64> {
        self.cpu_temp.or_else(|| self.soc_metrics.as_ref().and_then(|s| s.cpu_temp))
    }

    /// GPU temperature with `soc_metrics` fallback.
    pub fn gpu_temp_c(&self) -> Option<f64> {
        self.gpu_temp.or_else(|| self.soc_metrics.as_ref().and_then(|s| s.gpu_temp))
    }

    pub fn cpu_power_w(&self) -> Option<f64> {
        self.soc_metrics.as_ref().and_then(|s| s.cpu_power)
    }

    pub fn gpu_power_w(&self) -> Option<f64> {
        self.soc_metrics.as_ref().and_then(|s| s.gpu_power)
    }

    pub fn system_power_w(&self) -> Option<f64> {
        self.soc_metrics.as_ref().and_then(|s| s.system_power)
    }

    /// Memory used in GB, or None when the sampler omitted memory info.
    pub fn memory_used_gb(&self) -> Option<f64> {
        self.memory.as_ref().map(|m| bytes_to_gb(m.used))
    }

    pub fn memory_total_gb(&self) -> Option<f64> {
        self.memory.as_ref().map(|m| bytes_to_gb(m.total))
    }

    pub fn swap_used_gb(&self) -> Option<f64> {
        self.memory.as_ref().map(|m| bytes_to_gb(m.swap_used))
    }

    pub fn swap_total_gb(&self) -> Option<f64> {
        self.memory.as_ref().map(|m| bytes_to_gb(m.swap_total))
    }

    pub fn disk_read_mb_s(&self) -> Option<f64> {
        self.net_disk.as_ref().map(|n| n.read_kbytes_per_sec / 1024.0)
    }

    pub fn disk_write_mb_s(&self) -> Option<f64> {
        self.net_disk.as_ref().map(|n| n.write_kbytes_per_sec / 1024.0)
    }

    pub fn net_in_kb_s(&self) -> Option<f64> {
        self.net_disk.as_ref().map(|n| n.in_bytes_per_sec)
    }

    pub fn net_out_kb_s(&self) -> Option<f64> {
        self.net_disk.as_ref().map(|n| n.out_bytes_per_sec)
    }
}

/// Convert a byte count to GB (2^30 bytes).
pub fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / (1 << 30) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_sample() {
        let json = r#"{
            "timestamp": "2024-01-01T00:00:00Z",
            "cpu_usage": 42.5,
            "gpu_usage": 10.0,
            "memory": {"used": 8589934592, "total": 17179869184, "swap_used": 0, "swap_total": 2147483648},
            "net_disk": {"read_kbytes_per_sec": 1024.0, "write_kbytes_per_sec": 512.0, "in_bytes_per_sec": 120.5, "out_bytes_per_sec": 30.2},
            "thermal_state": "Nominal",
            "soc_metrics": {"cpu_power": 4.2, "gpu_power": 1.1, "system_power": 12.3, "cpu_temp": 55.0, "gpu_temp": 48.0},
            "windsurf": {
                "process_count": 2,
                "total_cpu_normalized": 12.5,
                "total_mem": 8.0,
                "total_rss_mb": 1536.0,
                "processes": [
                    {"pid": 100, "type": "main", "cpu": 8.0, "rss_mb": 1024.0},
                    {"pid": 101, "type": "renderer", "cpu": 4.5, "rss_mb": 512.0}
                ]
            },
            "sampling_overhead_ms": 3.4
        }"#;

        let sample: Sample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.cpu_usage, Some(42.5));
        assert_eq!(sample.memory_used_gb(), Some(8.0));
        assert_eq!(sample.swap_total_gb(), Some(2.0));
        assert_eq!(sample.disk_read_mb_s(), Some(1.0));
        assert_eq!(sample.system_power_w(), Some(12.3));

        let group = sample.windsurf.as_ref().unwrap();
        assert_eq!(group.process_count, 2);
        assert_eq!(group.processes[1].kind, "renderer");
    }

    #[test]
    fn test_deserialize_minimal_sample() {
        let sample: Sample =
            serde_json::from_str(r#"{"timestamp": "2024-01-01T00:00:00Z"}"#).unwrap();
        assert!(sample.cpu_usage.is_none());
        assert!(sample.memory_used_gb().is_none());
        assert!(sample.cpu_temp_c().is_none());
        assert!(sample.windsurf.is_none());
    }

    #[test]
    fn test_temp_falls_back_to_soc_metrics() {
        let json = r#"{
            "timestamp": "2024-01-01T00:00:00Z",
            "soc_metrics": {"cpu_temp": 61.5, "gpu_temp": 50.0}
        }"#;
        let sample: Sample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.cpu_temp_c(), Some(61.5));
        assert_eq!(sample.gpu_temp_c(), Some(50.0));

        let json = r#"{
            "timestamp": "2024-01-01T00:00:00Z",
            "cpu_temp": 70.0,
            "soc_metrics": {"cpu_temp": 61.5}
        }"#;
        let sample: Sample = serde_json::from_str(json).unwrap();
        // Direct reading wins over the SoC fallback
        assert_eq!(sample.cpu_temp_c(), Some(70.0));
    }
}
