//! Demo dataset behind the `ScanStore` seam. Everything here mirrors what the
//! hosted dashboard shows for the `amitesh/payment-gateway` walkthrough.

use crate::core::report::{Violation, ViolationSeverity};
use crate::graph::{Edge, GraphDataset, Layer, LayerBand, Node};
use crate::store::{
    MentorReport, RepoStatus, Repository, ScanMetrics, ScanRecord, ScanStatus, ScanStore,
    ScanSummary, UsageMonth, UsageSummary,
};
use once_cell::sync::Lazy;

/// Scan records ordered newest first.
static RECORDS: Lazy<Vec<ScanRecord>> = Lazy::new(|| {
    vec![
        ScanRecord {
            id: "scan-1".to_string(),
            repo: "amitesh/payment-gateway".to_string(),
            branch: "main".to_string(),
            commit: "a3f8c91".to_string(),
            status: ScanStatus::Completed,
            created_at: "2026-02-16T09:32:00Z".to_string(),
            metrics: ScanMetrics {
                score: 72,
                circular_deps: 3,
                layer_violations: 5,
                coupling_issues: 2,
            },
            violations: vec![
                Violation::new(
                    ViolationSeverity::High,
                    "Infrastructure references API layer directly",
                    "Breaks dependency inversion. Deployments become fragile.",
                ),
                Violation::new(
                    ViolationSeverity::Critical,
                    "Circular dependencies between services",
                    "Makes unit testing nearly impossible and increases cognitive load.",
                ),
                Violation::new(
                    ViolationSeverity::High,
                    "Domain layer references Infrastructure",
                    "Core business logic becomes coupled to implementation details.",
                ),
            ],
            mentor: MentorReport {
                summary: "Your solution follows Clean Architecture patterns but has notable \
                          dependency leaks between Infrastructure and upper layers. The 3 \
                          circular dependencies in your service and domain layer signal tight \
                          coupling that will slow iteration. Addressing these will dramatically \
                          improve testability and deploy independence."
                    .to_string(),
                steps: vec![
                    "Extract interfaces for PaymentRepo and EmailService into Application layer."
                        .to_string(),
                    "Break the OrderService / PaymentService cycle using domain events or a \
                     mediator."
                        .to_string(),
                    "Move the MessageBus abstraction to Domain; keep the implementation in \
                     Infrastructure."
                        .to_string(),
                ],
                insight: "The Dependency Rule states that source code dependencies must point \
                          inward. Your Domain should know nothing about Infrastructure. Think of \
                          layers as concentric circles: inner circles are policies, outer \
                          circles are mechanisms."
                    .to_string(),
            },
        },
        ScanRecord {
            id: "scan-2".to_string(),
            repo: "amitesh/payment-gateway".to_string(),
            branch: "main".to_string(),
            commit: "b7e2d44".to_string(),
            status: ScanStatus::Completed,
            created_at: "2026-02-10T14:20:00Z".to_string(),
            metrics: ScanMetrics {
                score: 65,
                circular_deps: 4,
                layer_violations: 7,
                coupling_issues: 3,
            },
            violations: vec![
                Violation::new(
                    ViolationSeverity::Critical,
                    "Circular dependencies between services",
                    "Makes unit testing nearly impossible and increases cognitive load.",
                ),
                Violation::new(
                    ViolationSeverity::High,
                    "Infrastructure references API layer directly",
                    "Breaks dependency inversion. Deployments become fragile.",
                ),
                Violation::new(
                    ViolationSeverity::High,
                    "Domain layer references Infrastructure",
                    "Core business logic becomes coupled to implementation details.",
                ),
                Violation::new(
                    ViolationSeverity::Medium,
                    "CacheService reaches back into the Application layer",
                    "Infrastructure helpers should be driven by abstractions, not drive them.",
                ),
            ],
            mentor: MentorReport {
                summary: "Layering is recognizable but leaky. Four circular dependencies and \
                          seven layer violations mean most changes ripple across the solution."
                    .to_string(),
                steps: vec![
                    "Start with the OrderService / PaymentService cycle; it blocks everything \
                     else."
                        .to_string(),
                    "Audit Infrastructure for references to controllers and remove them."
                        .to_string(),
                ],
                insight: "Cycles between services are usually a missing domain concept. Name it, \
                          extract it, and both services can depend on the new abstraction."
                    .to_string(),
            },
        },
    ]
});

/// Scan history, newer scans first. Older entries predate the records kept
/// above, so only their headline rows survive.
static HISTORY: Lazy<Vec<ScanSummary>> = Lazy::new(|| {
    let mut scans: Vec<ScanSummary> = RECORDS
        .iter()
        .map(|record| ScanSummary {
            id: record.id.clone(),
            branch: record.branch.clone(),
            commit: record.commit.clone(),
            status: record.status,
            score: Some(record.metrics.score),
            created_at: record.created_at.clone(),
        })
        .collect();

    scans.push(ScanSummary {
        id: "scan-3".to_string(),
        branch: "main".to_string(),
        commit: "9c41f02".to_string(),
        status: ScanStatus::Completed,
        score: Some(61),
        created_at: "2026-02-03T11:05:44Z".to_string(),
    });
    scans.push(ScanSummary {
        id: "scan-4".to_string(),
        branch: "release/1.4".to_string(),
        commit: "4db97ae".to_string(),
        status: ScanStatus::Completed,
        score: Some(58),
        created_at: "2026-01-27T08:51:12Z".to_string(),
    });
    scans.push(ScanSummary {
        id: "scan-5".to_string(),
        branch: "main".to_string(),
        commit: "e120c7d".to_string(),
        status: ScanStatus::Failed,
        score: None,
        created_at: "2026-01-20T17:27:18Z".to_string(),
    });

    scans
});

static REPOSITORIES: Lazy<Vec<Repository>> = Lazy::new(|| {
    vec![
        Repository {
            id: 1,
            org: "amitesh".to_string(),
            name: "payment-gateway".to_string(),
            url: "https://github.com/amitesh/payment-gateway".to_string(),
            branch: "main".to_string(),
            last_scan: Some("2 hours ago".to_string()),
            score: Some(72),
            status: RepoStatus::NeedsAttention,
        },
        Repository {
            id: 2,
            org: "amitesh".to_string(),
            name: "user-service".to_string(),
            url: "https://github.com/amitesh/user-service".to_string(),
            branch: "main".to_string(),
            last_scan: Some("3 days ago".to_string()),
            score: Some(88),
            status: RepoStatus::Healthy,
        },
        Repository {
            id: 3,
            org: "amitesh".to_string(),
            name: "notification-api".to_string(),
            url: "https://github.com/amitesh/notification-api".to_string(),
            branch: "main".to_string(),
            last_scan: None,
            score: None,
            status: RepoStatus::NotScanned,
        },
    ]
});

static USAGE: Lazy<UsageSummary> = Lazy::new(|| UsageSummary {
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
});

/// The payment-gateway dependency graph. Node positions are part of the
/// fixture; the renderer does no layout.
static GRAPH: Lazy<GraphDataset> = Lazy::new(|| GraphDataset {
    nodes: vec![
        Node::new("PaymentController", Layer::Api, 120.0, 60.0),
        Node::new("OrderController", Layer::Api, 320.0, 60.0),
        Node::new("UserController", Layer::Api, 520.0, 60.0),
        Node::new("OrderService", Layer::Application, 100.0, 180.0),
        Node::new("PaymentService", Layer::Application, 300.0, 180.0),
        Node::new("UserService", Layer::Application, 500.0, 180.0),
        Node::new("CacheManager", Layer::Application, 680.0, 180.0),
        Node::new("Order", Layer::Domain, 150.0, 300.0),
        Node::new("Payment", Layer::Domain, 340.0, 300.0),
        Node::new("Invoice", Layer::Domain, 530.0, 300.0),
        Node::new("PaymentRepo", Layer::Infrastructure, 100.0, 420.0),
        Node::new("EmailService", Layer::Infrastructure, 300.0, 420.0),
        Node::new("DbContext", Layer::Infrastructure, 500.0, 420.0),
        Node::new("CacheService", Layer::Infrastructure, 680.0, 420.0),
    ],
    edges: vec![
        Edge::new("PaymentController", "PaymentService", false),
        Edge::new("OrderController", "OrderService", false),
        Edge::new("UserController", "UserService", false),
        Edge::new("OrderService", "Order", false),
        Edge::new("PaymentService", "Payment", false),
        Edge::new("UserService", "DbContext", true),
        Edge::new("OrderService", "PaymentService", true),
        Edge::new("PaymentService", "OrderService", true),
        Edge::new("PaymentRepo", "PaymentController", true),
        Edge::new("Invoice", "Payment", true),
        Edge::new("Payment", "Invoice", true),
        Edge::new("EmailService", "UserService", false),
        Edge::new("CacheService", "CacheManager", true),
        Edge::new("DbContext", "Order", false),
    ],
    bands: vec![
        LayerBand {
            layer: Layer::Api,
            top: 30.0,
            height: 100.0,
        },
        LayerBand {
            layer: Layer::Application,
            top: 150.0,
            height: 100.0,
        },
        LayerBand {
            layer: Layer::Domain,
            top: 270.0,
            height: 100.0,
        },
        LayerBand {
            layer: Layer::Infrastructure,
            top: 390.0,
            height: 100.0,
        },
    ],
});

#[derive(Debug, Default)]
pub struct FixtureStore;

impl FixtureStore {
    pub fn new() -> Self {
        Self
    }
}

impl ScanStore for FixtureStore {
    fn list_repositories(&self) -> Vec<Repository> {
        REPOSITORIES.clone()
    }

    fn list_scans(&self) -> Vec<ScanSummary> {
        HISTORY.clone()
    }

    fn latest_scan_id(&self) -> Option<String> {
        RECORDS.first().map(|record| record.id.clone())
    }

    fn scan(&self, id: &str) -> Option<ScanRecord> {
        RECORDS.iter().find(|record| record.id == id).cloned()
    }

    fn previous_metrics(&self, id: &str) -> Option<ScanMetrics> {
        let position = RECORDS.iter().position(|record| record.id == id)?;
        RECORDS[position + 1..]
            .iter()
            .find(|record| record.status == ScanStatus::Completed)
            .map(|record| record.metrics)
    }

    fn usage(&self) -> UsageSummary {
        USAGE.clone()
    }

    fn graph(&self, scan_id: &str) -> Option<GraphDataset> {
        RECORDS
            .iter()
            .any(|record| record.id == scan_id)
            .then(|| GRAPH.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_fixture_is_referentially_sound() {
        assert_eq!(GRAPH.nodes.len(), 14);
        assert_eq!(GRAPH.edges.len(), 14);
        assert_eq!(GRAPH.validate(), Ok(()));
    }

    #[test]
    fn bands_follow_declared_layer_order() {
        let layers: Vec<Layer> = GRAPH.bands.iter().map(|band| band.layer).collect();
        assert_eq!(layers, Layer::ALL);
        for pair in GRAPH.bands.windows(2) {
            assert!(pair[0].top < pair[1].top);
        }
    }

    #[test]
    fn latest_scan_resolves_to_newest_record() {
        let store = FixtureStore::new();
        assert_eq!(store.latest_scan_id().as_deref(), Some("scan-1"));
        assert!(store.scan("scan-1").is_some());
        assert!(store.scan("scan-99").is_none());
    }

    #[test]
    fn previous_metrics_come_from_the_older_completed_scan() {
        let store = FixtureStore::new();
        let previous = store.previous_metrics("scan-1").unwrap();
        assert_eq!(previous.score, 65);
        assert_eq!(previous.circular_deps, 4);
        assert!(store.previous_metrics("scan-2").is_none());
    }

    #[test]
    fn graph_is_scoped_to_known_scans() {
        let store = FixtureStore::new();
        assert!(store.graph("scan-1").is_some());
        assert!(store.graph("scan-99").is_none());
    }

    #[test]
    fn history_is_newest_first_and_keeps_failed_rows() {
        let store = FixtureStore::new();
        let scans = store.list_scans();
        assert_eq!(scans.len(), 5);
        assert_eq!(scans[0].id, "scan-1");
        let failed = scans.iter().find(|scan| scan.id == "scan-5").unwrap();
        assert_eq!(failed.status, ScanStatus::Failed);
        assert_eq!(failed.score, None);
    }
}
