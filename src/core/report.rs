use crate::config::{Config, FailOn};
use crate::core::delta::{MetricDelta, Trend, classify};
use crate::core::score::{ScoreRating, Tier, evaluate};
use crate::store::{Repository, ScanRecord, ScanStatus, ScanSummary, UsageSummary};
use colored::Colorize;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ViolationSeverity {
    Critical,
    High,
    Medium,
}

impl ViolationSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
        }
    }

    pub fn meets_fail_on(self, fail_on: FailOn) -> bool {
        match fail_on {
            FailOn::None => false,
            FailOn::Error => matches!(self, Self::Critical),
            FailOn::Warning => matches!(self, Self::Critical | Self::High),
        }
    }

    fn colored(self) -> String {
        match self {
            Self::Critical => self.as_str().red().bold().to_string(),
            Self::High => self.as_str().yellow().bold().to_string(),
            Self::Medium => self.as_str().blue().bold().to_string(),
        }
    }
}

impl fmt::Display for ViolationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One architectural violation from a scan, with the mentor's explanation of
/// why it matters.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub severity: ViolationSeverity,
    pub title: String,
    pub why: String,
}

impl Violation {
    pub fn new(
        severity: ViolationSeverity,
        title: impl Into<String>,
        why: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            title: title.into(),
            why: why.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Counts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub total: usize,
}

impl Counts {
    pub fn from_violations(violations: &[Violation]) -> Self {
        let mut counts = Self::default();
        for violation in violations {
            match violation.severity {
                ViolationSeverity::Critical => counts.critical += 1,
                ViolationSeverity::High => counts.high += 1,
                ViolationSeverity::Medium => counts.medium += 1,
            }
        }
        counts.total = violations.len();
        counts
    }
}

/// Deltas against the previous completed scan of the same repository. Count
/// metrics are inverted: fewer is better.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MetricDeltas {
    pub score: Option<MetricDelta>,
    pub circular_deps: Option<MetricDelta>,
    pub layer_violations: Option<MetricDelta>,
    pub coupling_issues: Option<MetricDelta>,
}

#[derive(Debug, Clone)]
pub struct ExitStatus {
    pub ok: bool,
    pub reasons: Vec<String>,
}

impl ExitStatus {
    pub fn reason_line(&self) -> String {
        self.reasons.join("; ")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub fail_on: FailOn,
    pub min_score: u8,
}

#[derive(Debug, Clone)]
pub struct ScanReport {
    pub scan: ScanRecord,
    pub rating: ScoreRating,
    pub deltas: MetricDeltas,
    pub counts: Counts,
    pub config: ConfigSummary,
    pub exit: ExitStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub scan: ScanRecord,
    pub rating: ScoreRating,
    pub deltas: MetricDeltas,
    pub counts: Counts,
    pub config: ConfigSummary,
}

impl From<&ScanReport> for JsonReport {
    fn from(report: &ScanReport) -> Self {
        Self {
            scan: report.scan.clone(),
            rating: report.rating,
            deltas: report.deltas,
            counts: report.counts.clone(),
            config: report.config.clone(),
        }
    }
}

pub fn evaluate_exit(score: u8, violations: &[Violation], cfg: &Config) -> ExitStatus {
    let mut reasons = Vec::new();

    if score < cfg.general.min_score {
        reasons.push(format!(
            "score {} is below min_score {}",
            score, cfg.general.min_score
        ));
    }

    if cfg.general.fail_on != FailOn::None
        && violations
            .iter()
            .any(|violation| violation.severity.meets_fail_on(cfg.general.fail_on))
    {
        reasons.push(match cfg.general.fail_on {
            FailOn::Warning => "found high-or-critical violations".to_string(),
            FailOn::Error => "found critical violations".to_string(),
            FailOn::None => String::new(),
        });
    }

    ExitStatus {
        ok: reasons.is_empty(),
        reasons,
    }
}

fn tier_colored(tier: Tier, text: &str) -> String {
    match tier {
        Tier::Good => text.green().bold().to_string(),
        Tier::Warning => text.yellow().bold().to_string(),
        Tier::Critical => text.red().bold().to_string(),
    }
}

fn delta_colored(delta: Option<MetricDelta>) -> String {
    let Some(delta) = delta else {
        return "first scan".dimmed().to_string();
    };

    match delta.trend {
        Trend::Unchanged => "no change".dimmed().to_string(),
        Trend::Improved => format!("{} improved", delta.signed()).green().to_string(),
        Trend::Regressed => format!("{} regressed", delta.signed()).red().to_string(),
    }
}

fn status_colored(status: ScanStatus) -> String {
    match status {
        ScanStatus::Completed => status.as_str().green().to_string(),
        ScanStatus::Running => status.as_str().yellow().to_string(),
        ScanStatus::Failed => status.as_str().red().to_string(),
    }
}

pub fn print_human(report: &ScanReport) {
    let scan = &report.scan;
    println!(
        "Architecture Score: {} ({})",
        tier_colored(report.rating.tier, &format!("{}/100", report.rating.score)),
        report.rating.tier.label()
    );
    println!("{} @ {} ({})", scan.repo, scan.branch, scan.commit);
    println!(
        "scan {} [{}] {}",
        scan.id,
        status_colored(scan.status),
        scan.created_at
    );

    println!();
    println!("metrics");
    println!(
        "  score: {} [{}]",
        scan.metrics.score,
        delta_colored(report.deltas.score)
    );
    println!(
        "  circular dependencies: {} [{}]",
        scan.metrics.circular_deps,
        delta_colored(report.deltas.circular_deps)
    );
    println!(
        "  layer violations: {} [{}]",
        scan.metrics.layer_violations,
        delta_colored(report.deltas.layer_violations)
    );
    println!(
        "  coupling issues: {} [{}]",
        scan.metrics.coupling_issues,
        delta_colored(report.deltas.coupling_issues)
    );

    if !scan.violations.is_empty() {
        println!();
        println!("violations ({})", report.counts.total);
        for violation in &scan.violations {
            println!("[{}] {}", violation.severity.colored(), violation.title);
            println!("-> why: {}", violation.why);
        }
    }

    println!();
    println!("mentor report");
    println!("{}", scan.mentor.summary);
    if !scan.mentor.steps.is_empty() {
        println!();
        println!("next steps:");
        for (index, step) in scan.mentor.steps.iter().enumerate() {
            println!("  {}. {}", index + 1, step);
        }
    }
    println!();
    println!("insight: {}", scan.mentor.insight);

    println!();
    if report.exit.ok {
        println!("exit: OK");
    } else {
        println!("exit: FAILED ({})", report.exit.reason_line());
    }
}

pub fn print_scan_list(scans: &[ScanSummary]) {
    if scans.is_empty() {
        println!("no scans recorded yet");
        return;
    }

    for scan in scans {
        let score = match scan.score {
            Some(score) => format!("score {}", score),
            None => "no score".dimmed().to_string(),
        };
        println!(
            "{}  {} @ {}  [{}]  {}  {}",
            scan.id,
            scan.branch,
            scan.commit,
            status_colored(scan.status),
            scan.created_at,
            score
        );
    }
}

pub fn print_repo_list(repos: &[Repository]) {
    for repo in repos {
        match repo.score {
            Some(score) => {
                let rating = evaluate(score as i32);
                let last = repo.last_scan.as_deref().unwrap_or("unknown");
                println!(
                    "{} ({})  {}  {}  last scan {}",
                    repo.full_name(),
                    repo.branch,
                    tier_colored(rating.tier, &format!("{}/100", score)),
                    rating.tier.label(),
                    last
                );
            }
            None => {
                println!(
                    "{} ({})  {}",
                    repo.full_name(),
                    repo.branch,
                    "not scanned yet".dimmed()
                );
            }
        }
    }
}

/// One month of quota history with its delta against the next-older month.
#[derive(Debug, Clone, Serialize)]
pub struct UsageMonthRow {
    pub month: String,
    pub used: u32,
    pub limit: u32,
    pub delta: Option<MetricDelta>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsageReport {
    pub used: u32,
    pub limit: u32,
    pub resets: String,
    pub history: Vec<UsageMonthRow>,
}

impl From<&UsageSummary> for UsageReport {
    fn from(usage: &UsageSummary) -> Self {
        let history = usage
            .history
            .iter()
            .enumerate()
            .map(|(index, month)| {
                let delta = usage
                    .history
                    .get(index + 1)
                    .map(|older| classify(month.used as i64, older.used as i64, false));
                UsageMonthRow {
                    month: month.month.clone(),
                    used: month.used,
                    limit: month.limit,
                    delta,
                }
            })
            .collect();

        Self {
            used: usage.used,
            limit: usage.limit,
            resets: usage.resets.clone(),
            history,
        }
    }
}

pub fn print_usage(usage: &UsageReport) {
    let pct = if usage.limit == 0 {
        0.0
    } else {
        usage.used as f64 / usage.limit as f64 * 100.0
    };
    println!(
        "scans this month: {}/{} ({:.0}%)",
        usage.used, usage.limit, pct
    );
    println!("resets {}", usage.resets);

    if !usage.history.is_empty() {
        println!();
        for month in &usage.history {
            match month.delta {
                Some(delta) => println!(
                    "  {}: {}/{} [{}]",
                    month.month,
                    month.used,
                    month.limit,
                    delta_colored(Some(delta))
                ),
                None => println!("  {}: {}/{}", month.month, month.used, month.limit),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn violations() -> Vec<Violation> {
        vec![
            Violation::new(
                ViolationSeverity::High,
                "Infrastructure references API layer directly",
                "Breaks dependency inversion.",
            ),
            Violation::new(
                ViolationSeverity::Critical,
                "Circular dependencies between services",
                "Makes unit testing nearly impossible.",
            ),
            Violation::new(
                ViolationSeverity::Medium,
                "OrderService depends on a concrete cache",
                "Swapping cache backends forces service edits.",
            ),
        ]
    }

    #[test]
    fn counts_group_by_severity() {
        let counts = Counts::from_violations(&violations());
        assert_eq!(counts.critical, 1);
        assert_eq!(counts.high, 1);
        assert_eq!(counts.medium, 1);
        assert_eq!(counts.total, 3);
    }

    #[test]
    fn exit_fails_below_min_score() {
        let mut cfg = Config::default();
        cfg.general.fail_on = FailOn::None;
        cfg.general.min_score = 80;
        let exit = evaluate_exit(72, &[], &cfg);
        assert!(!exit.ok);
        assert!(exit.reason_line().contains("below min_score"));
    }

    #[test]
    fn fail_on_error_only_triggers_on_critical() {
        let mut cfg = Config::default();
        cfg.general.fail_on = FailOn::Error;
        cfg.general.min_score = 0;

        let high_only = vec![Violation::new(ViolationSeverity::High, "x", "y")];
        assert!(evaluate_exit(90, &high_only, &cfg).ok);
        assert!(!evaluate_exit(90, &violations(), &cfg).ok);
    }

    #[test]
    fn usage_history_rows_carry_month_over_month_deltas() {
        use crate::store::{UsageMonth, UsageSummary};

        let summary = UsageSummary {
            used: 2,
            limit: 4,
            resets: "March 1, 2026".to_string(),
            history: vec![
                UsageMonth {
                    month: "February 2026".to_string(),
                    used: 2,
                    limit: 4,
                },
                UsageMonth {
                    month: "January 2026".to_string(),
                    used: 4,
                    limit: 4,
                },
                UsageMonth {
                    month: "December 2025".to_string(),
                    used: 3,
                    limit: 4,
                },
            ],
        };

        let report = UsageReport::from(&summary);
        assert_eq!(report.history.len(), 3);

        let february = report.history[0].delta.unwrap();
        assert_eq!(february.delta, -2);
        assert_eq!(february.trend, Trend::Regressed);

        let january = report.history[1].delta.unwrap();
        assert_eq!(january.delta, 1);
        assert_eq!(january.trend, Trend::Improved);

        // The oldest month has nothing to compare against.
        assert!(report.history[2].delta.is_none());
    }

    #[test]
    fn fail_on_warning_includes_high() {
        let mut cfg = Config::default();
        cfg.general.fail_on = FailOn::Warning;
        cfg.general.min_score = 0;

        let high_only = vec![Violation::new(ViolationSeverity::High, "x", "y")];
        assert!(!evaluate_exit(90, &high_only, &cfg).ok);

        let medium_only = vec![Violation::new(ViolationSeverity::Medium, "x", "y")];
        assert!(evaluate_exit(90, &medium_only, &cfg).ok);
    }
}
