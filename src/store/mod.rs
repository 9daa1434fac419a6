pub mod fixtures;

use crate::core::report::Violation;
use crate::graph::GraphDataset;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Completed,
    Running,
    Failed,
}

impl ScanStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Running => "running",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RepoStatus {
    Healthy,
    NeedsAttention,
    NotScanned,
}

#[derive(Debug, Clone, Serialize)]
pub struct Repository {
    pub id: u32,
    pub org: String,
    pub name: String,
    pub url: String,
    pub branch: String,
    pub last_scan: Option<String>,
    pub score: Option<u8>,
    pub status: RepoStatus,
}

impl Repository {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.org, self.name)
    }
}

/// Headline numbers of one scan.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScanMetrics {
    pub score: u8,
    pub circular_deps: u32,
    pub layer_violations: u32,
    pub coupling_issues: u32,
}

/// One row of the scan history listing.
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub id: String,
    pub branch: String,
    pub commit: String,
    pub status: ScanStatus,
    pub score: Option<u8>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MentorReport {
    pub summary: String,
    pub steps: Vec<String>,
    pub insight: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanRecord {
    pub id: String,
    pub repo: String,
    pub branch: String,
    pub commit: String,
    pub status: ScanStatus,
    pub created_at: String,
    pub metrics: ScanMetrics,
    pub violations: Vec<Violation>,
    pub mentor: MentorReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsageMonth {
    pub month: String,
    pub used: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsageSummary {
    pub used: u32,
    pub limit: u32,
    pub resets: String,
    pub history: Vec<UsageMonth>,
}

/// Data-access seam between presentation and whatever produces scan results.
/// The CLI only ever talks to this trait; `fixtures::FixtureStore` backs it
/// with the demo dataset today, a real backend can be slotted in without
/// touching the presentation side.
pub trait ScanStore {
    fn list_repositories(&self) -> Vec<Repository>;
    fn list_scans(&self) -> Vec<ScanSummary>;
    fn latest_scan_id(&self) -> Option<String>;
    fn scan(&self, id: &str) -> Option<ScanRecord>;
    /// Metrics of the most recent completed scan strictly older than `id`.
    fn previous_metrics(&self, id: &str) -> Option<ScanMetrics>;
    fn usage(&self) -> UsageSummary;
    fn graph(&self, scan_id: &str) -> Option<GraphDataset>;
}
