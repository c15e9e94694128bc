//! Observability hooks the orchestrator reports to after every `plan()`
//! call.
//!
//! The core only calls these sinks; `PlannerMetrics` is the one concrete
//! in-process implementation this crate ships, backed by [`metric::Registry`]
//! the same way `NamespaceCache`/`CacheWithMetrics` are wired up elsewhere in
//! the workspace.

use data_types::SchemaId;
use metric::{Attributes, Metric, Registry, U64Counter};

/// The three counters the orchestrator emits after every `plan()` call:
/// which archive got chosen (by schema and bucket size), how many points
/// were fetched, and how many were returned.
#[derive(Debug)]
pub struct PlannerMetrics {
    archive_choice: Metric<U64Counter>,
    points_fetch: Metric<U64Counter>,
    points_return: Metric<U64Counter>,
}

impl PlannerMetrics {
    pub fn new(registry: &Registry) -> Self {
        Self {
            archive_choice: registry.register_metric(
                "query_planner_archive_choice",
                "number of requests planned against each (schema, archive) pair",
            ),
            points_fetch: registry
                .register_metric("query_planner_points_fetch", "total points fetched per plan() call"),
            points_return: registry.register_metric(
                "query_planner_points_return",
                "total points returned to callers per plan() call",
            ),
        }
    }

    /// Record that `bucket_size` requests for `schema_id` were planned
    /// against `archive`.
    pub fn record_archive_choice(&self, schema_id: SchemaId, archive: usize, bucket_size: u64) {
        let mut attributes = Attributes::new();
        attributes.insert("schema_id", schema_id.to_string());
        attributes.insert("archive", archive.to_string());
        self.archive_choice.recorder(attributes).inc(bucket_size);
    }

    pub fn record_points_fetch(&self, points: u64) {
        self.points_fetch.recorder(Attributes::new()).inc(points);
    }

    pub fn record_points_return(&self, points: u64) {
        self.points_return.recorder(Attributes::new()).inc(points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_accumulate_across_calls() {
        let registry = Registry::new();
        let metrics = PlannerMetrics::new(&registry);

        metrics.record_archive_choice(SchemaId::new(1), 0, 3);
        metrics.record_archive_choice(SchemaId::new(1), 0, 2);
        metrics.record_points_fetch(100);
        metrics.record_points_return(10);

        let mut attributes = Attributes::new();
        attributes.insert("schema_id", "1");
        attributes.insert("archive", "0");
        assert_eq!(metrics.archive_choice.recorder(attributes).fetch(), 5);
        assert_eq!(
            metrics.points_fetch.recorder(Attributes::new()).fetch(),
            100
        );
        assert_eq!(
            metrics.points_return.recorder(Attributes::new()).fetch(),
            10
        );
    }
}
