//! Point-in-time dashboard export.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;

use crate::cluster::ClusterInfo;
use crate::metric::MetricRecord;
use crate::trend::ConnectionTrend;
use crate::window::MetricWindow;

/// Everything the dashboard shows, captured once.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub version: &'static str,
    pub cluster: ClusterInfo,
    pub generation: u64,
    pub trend: ConnectionTrend,
    /// Trend rounded for display.
    pub trend_display: f64,
    pub latest: Option<MetricRecord>,
    pub records: Vec<MetricRecord>,
}

impl DashboardSnapshot {
    pub fn capture(cluster: &ClusterInfo, window: &MetricWindow) -> Self {
        let trend = window.trend();
        Self {
            version: crate::VERSION,
            cluster: cluster.clone(),
            generation: window.generation(),
            trend,
            trend_display: trend.display_percent(),
            latest: window.latest().cloned(),
            records: window.to_vec(),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write `kafkapulse-snapshot-<epoch>.json` into `dir`.
    pub fn write_to_dir(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let epoch = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let path = dir.join(format!("kafkapulse-snapshot-{epoch}.json"));
        let contents = self.to_json_pretty().map_err(std::io::Error::other)?;
        std::fs::write(&path, contents)?;
        log::info!("snapshot written to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jitter::FixedJitter;
    use crate::simulator::MetricSimulator;

    #[test]
    fn capture_reflects_window() {
        let mut sim = MetricSimulator::with_jitter(Box::new(FixedJitter::new(0.4)));
        let window = MetricWindow::initialize(&mut sim, 20).advance(&mut sim);
        let snap = DashboardSnapshot::capture(&ClusterInfo::default(), &window);

        assert_eq!(snap.records.len(), 20);
        assert_eq!(snap.generation, 1);
        assert_eq!(snap.trend_display, 0.0);
        assert_eq!(snap.latest.as_ref().map(|r| r.connections), Some(840));
    }

    #[test]
    fn write_to_dir_produces_json_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sim = MetricSimulator::new();
        let window = MetricWindow::initialize(&mut sim, 5);
        let snap = DashboardSnapshot::capture(&ClusterInfo::default(), &window);

        let path = snap.write_to_dir(tmp.path()).unwrap();
        assert!(path.exists());
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("kafkapulse-snapshot-"));

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["records"].as_array().map(|a| a.len()), Some(5));
        assert_eq!(parsed["cluster"]["status"], "UP");
        assert!(parsed["records"][0]["requestRate"].is_number());
        assert!(parsed["trendDisplay"].is_number());
    }

    #[test]
    fn write_to_missing_dir_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let snap = DashboardSnapshot::capture(&ClusterInfo::default(), &MetricWindow::empty());
        assert!(snap.write_to_dir(&tmp.path().join("nope")).is_err());
    }
}
