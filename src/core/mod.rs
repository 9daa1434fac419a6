pub mod delta;
pub mod report;
pub mod score;

use crate::config::Config;
use crate::store::ScanStore;
use anyhow::{Result, anyhow, bail};
use report::{ConfigSummary, Counts, MetricDeltas, ScanReport};

pub fn resolve_scan_id(store: &dyn ScanStore, requested: Option<&str>) -> Result<String> {
    match requested {
        Some(id) => Ok(id.to_string()),
        None => store
            .latest_scan_id()
            .ok_or_else(|| anyhow!("no scans recorded yet")),
    }
}

/// Assembles the scan-results view: rating, per-metric deltas against the
/// previous completed scan, violation counts, and the exit decision.
pub fn build_report(
    store: &dyn ScanStore,
    scan_id: Option<&str>,
    cfg: &Config,
) -> Result<ScanReport> {
    let id = resolve_scan_id(store, scan_id)?;
    let Some(scan) = store.scan(&id) else {
        bail!("unknown scan id: {id}");
    };

    let rating = score::evaluate(scan.metrics.score as i32);

    let deltas = match store.previous_metrics(&id) {
        Some(previous) => MetricDeltas {
            score: Some(delta::classify(
                scan.metrics.score as i64,
                previous.score as i64,
                false,
            )),
            circular_deps: Some(delta::classify(
                scan.metrics.circular_deps as i64,
                previous.circular_deps as i64,
                true,
            )),
            layer_violations: Some(delta::classify(
                scan.metrics.layer_violations as i64,
                previous.layer_violations as i64,
                true,
            )),
            coupling_issues: Some(delta::classify(
                scan.metrics.coupling_issues as i64,
                previous.coupling_issues as i64,
                true,
            )),
        },
        None => MetricDeltas::default(),
    };

    let counts = Counts::from_violations(&scan.violations);
    let exit = report::evaluate_exit(scan.metrics.score, &scan.violations, cfg);

    Ok(ScanReport {
        scan,
        rating,
        deltas,
        counts,
        config: ConfigSummary {
            fail_on: cfg.general.fail_on,
            min_score: cfg.general.min_score,
        },
        exit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FailOn;
    use crate::core::delta::Trend;
    use crate::core::score::Tier;
    use crate::store::fixtures::FixtureStore;

    #[test]
    fn report_defaults_to_the_latest_scan() {
        let store = FixtureStore::new();
        let report = build_report(&store, None, &Config::default()).unwrap();
        assert_eq!(report.scan.id, "scan-1");
        assert_eq!(report.rating.score, 72);
        assert_eq!(report.rating.tier, Tier::Warning);
    }

    #[test]
    fn deltas_compare_against_previous_completed_scan() {
        let store = FixtureStore::new();
        let report = build_report(&store, Some("scan-1"), &Config::default()).unwrap();

        let score = report.deltas.score.unwrap();
        assert_eq!(score.delta, 7);
        assert_eq!(score.trend, Trend::Improved);

        let circular = report.deltas.circular_deps.unwrap();
        assert_eq!(circular.delta, -1);
        assert_eq!(circular.trend, Trend::Improved);

        let layers = report.deltas.layer_violations.unwrap();
        assert_eq!(layers.delta, -2);
        assert_eq!(layers.trend, Trend::Improved);
    }

    #[test]
    fn oldest_record_has_no_deltas() {
        let store = FixtureStore::new();
        let report = build_report(&store, Some("scan-2"), &Config::default()).unwrap();
        assert!(report.deltas.score.is_none());
    }

    #[test]
    fn exit_reflects_fail_on_policy() {
        let store = FixtureStore::new();

        // scan-1 has a critical violation, so the default warning policy fails.
        let strict = build_report(&store, Some("scan-1"), &Config::default()).unwrap();
        assert!(!strict.exit.ok);

        let mut cfg = Config::default();
        cfg.general.fail_on = FailOn::None;
        cfg.general.min_score = 60;
        let relaxed = build_report(&store, Some("scan-1"), &cfg).unwrap();
        assert!(relaxed.exit.ok);
    }

    #[test]
    fn unknown_scan_id_is_an_error() {
        let store = FixtureStore::new();
        let err = build_report(&store, Some("scan-99"), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("unknown scan id"));
    }
}
