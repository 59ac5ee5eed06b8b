//! Static cluster metadata shown in the dashboard header.

use serde::{Deserialize, Serialize};

/// Health status of the monitored cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClusterStatus {
    #[default]
    Up,
    Down,
    Degraded,
}

impl std::fmt::Display for ClusterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "UP"),
            Self::Down => write!(f, "DOWN"),
            Self::Degraded => write!(f, "DEGRADED"),
        }
    }
}

impl std::str::FromStr for ClusterStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "degraded" => Ok(Self::Degraded),
            other => Err(format!("unknown cluster status '{other}' (up, down, degraded)")),
        }
    }
}

/// Fixed display configuration for one cluster. Not derived from metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterInfo {
    pub id: String,
    pub name: String,
    pub region: String,
    pub provider: String,
    pub status: ClusterStatus,
}

impl Default for ClusterInfo {
    fn default() -> Self {
        Self {
            id: "lkc-p8y3q7".to_string(),
            name: "Production-Primary".to_string(),
            region: "us-east-1".to_string(),
            provider: "AWS".to_string(),
            status: ClusterStatus::Up,
        }
    }
}

impl ClusterInfo {
    /// `"<name> (<id>)"`, as shown in the header.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.id)
    }
}
