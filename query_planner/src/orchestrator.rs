//! Top-level orchestration: wires the catalogue lookup, selection,
//! combinatorics, and reduction primitives into the one entry point callers
//! actually use.
//!
//! Phase 1 plans every bucket once; phase 2 coarsens `mdp_no` buckets one
//! step at a time, smallest bucket first by total request count, until the
//! soft limit is met or no further reduction is possible; phase 3 gates on
//! the hard limit; phase 4
//! reports to [`PlannerMetrics`]. `mdp_yes` buckets are never reduced — they
//! were already density-optimised against `plan_mdp` in phase 1.

use crate::catalog::RetentionCatalog;
use crate::error::Error;
use crate::metrics::PlannerMetrics;
use crate::multi::{plan_highest_res_multi, plan_lowest_res_for_mdp_multi};
use crate::reduce::{reduce_res_multi, reduce_res_singles};
use crate::single::{plan_highest_res_singles, plan_lowest_res_for_mdp_singles};
use clap_blocks::query_planner::QueryPlannerConfig;
use data_types::{ReqsPlan, Request};
use metric::Registry;
use observability_deps::tracing::{debug, warn};

/// Totals for a completed `plan()` call, useful for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub points_fetch: u64,
    pub points_return: u64,
}

impl std::fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "points_fetch={} points_return={}",
            self.points_fetch, self.points_return
        )
    }
}

/// Plan every request in `requests` in place.
///
/// `now` is the wall-clock instant the call is made at; `ttl = now - from`
/// (saturating — a `from` in the future makes every retention except an
/// always-valid one look expired, which is the correct outcome). `0` for
/// `soft_limit`/`hard_limit` disables that check.
#[allow(clippy::too_many_arguments)]
pub fn plan(
    catalog: &dyn RetentionCatalog,
    now: u32,
    from: u32,
    to: u32,
    requests: &mut [Request],
    plan_mdp: u32,
    soft_limit: u64,
    hard_limit: u64,
) -> crate::error::Result<PlanSummary> {
    assert!(
        plan_mdp > 0,
        "plan_mdp must be positive, got 0 (caller must reject this before calling plan())"
    );

    let ttl = now.saturating_sub(from);
    let view = ReqsPlan::partition(requests);

    debug!(
        pngroups = view.pngroups().count(),
        singles = view.single().len(),
        "query_planner: phase 1 (initial plan) starting"
    );

    for (pn_group, bucket) in view.pngroups() {
        if !bucket.mdp_yes.is_empty()
            && !plan_lowest_res_for_mdp_multi(catalog, from, to, ttl, plan_mdp, &bucket.mdp_yes, requests)
        {
            debug!(%pn_group, "query_planner: pn-group mdp-yes half unsatisfiable");
            return Err(Error::Unsatisfiable);
        }
        if !bucket.mdp_no.is_empty()
            && !plan_highest_res_multi(catalog, from, ttl, &bucket.mdp_no, requests)
        {
            debug!(%pn_group, "query_planner: pn-group mdp-no half unsatisfiable");
            return Err(Error::Unsatisfiable);
        }
    }

    let singles = view.single();
    for (&schema_id, indices) in singles.mdp_yes.schemas() {
        let rets = catalog.get(schema_id);
        if !plan_lowest_res_for_mdp_singles(from, to, ttl, plan_mdp, rets, requests, indices) {
            debug!(%schema_id, "query_planner: singles mdp-yes bucket unsatisfiable");
            return Err(Error::Unsatisfiable);
        }
    }
    for (&schema_id, indices) in singles.mdp_no.schemas() {
        let rets = catalog.get(schema_id);
        if !plan_highest_res_singles(from, to, ttl, rets, requests, indices) {
            debug!(%schema_id, "query_planner: singles mdp-no bucket unsatisfiable");
            return Err(Error::Unsatisfiable);
        }
    }

    let mut total = view.points_fetch(requests);
    debug!(total, "query_planner: phase 1 complete");

    if soft_limit > 0 && total > soft_limit {
        debug!(total, soft_limit, "query_planner: phase 2 (soft-limit reduction) starting");

        // Smallest bundles (by total request count) first, so a handful of
        // pn-groups don't get coarsened away to pay for one outsized one.
        let mut pngroups_by_size: Vec<_> = view.pngroups().collect();
        pngroups_by_size.sort_by_key(|(_, bucket)| bucket.len());

        loop {
            if total <= soft_limit {
                break;
            }
            let mut made_progress = false;

            for (pn_group, bucket) in &pngroups_by_size {
                if total <= soft_limit {
                    break;
                }
                if !bucket.mdp_no.is_empty()
                    && reduce_res_multi(catalog, from, ttl, &bucket.mdp_no, requests)
                {
                    made_progress = true;
                    total = view.points_fetch(requests);
                    debug!(%pn_group, total, "query_planner: reduced pn-group mdp-no half");
                }
            }

            if total > soft_limit {
                for (&schema_id, indices) in singles.mdp_no.schemas() {
                    if total <= soft_limit {
                        break;
                    }
                    let rets = catalog.get(schema_id);
                    if reduce_res_singles(from, ttl, rets, requests, indices) {
                        made_progress = true;
                        total = view.points_fetch(requests);
                        debug!(%schema_id, total, "query_planner: reduced singles mdp-no bucket");
                    }
                }
            }

            if !made_progress {
                debug!(total, soft_limit, "query_planner: soft limit unreachable, no further reduction possible");
                break;
            }
        }
    }

    if hard_limit > 0 && total > hard_limit {
        warn!(total, hard_limit, "query_planner: plan rejected, over hard limit");
        return Err(Error::TooManyPoints {
            points_fetch: total,
            hard_limit,
        });
    }

    let points_return = view.points_return(requests);
    debug!(total, points_return, "query_planner: plan complete");

    Ok(PlanSummary {
        points_fetch: total,
        points_return,
    })
}

/// A reusable planner that owns its metric instruments and the
/// operator-configured defaults, the way `service_common::Planner` wraps an
/// `IOxSessionContext` rather than exposing bare functions.
#[derive(Debug)]
pub struct QueryPlanner {
    metrics: PlannerMetrics,
    default_plan_mdp: u32,
    default_soft_limit: u64,
    default_hard_limit: u64,
}

impl QueryPlanner {
    pub fn new(config: &QueryPlannerConfig, registry: &Registry) -> Self {
        Self {
            metrics: PlannerMetrics::new(registry),
            default_plan_mdp: config.default_plan_mdp,
            default_soft_limit: config.soft_limit,
            default_hard_limit: config.hard_limit,
        }
    }

    /// Method form of [`plan`]. `None` for any of `plan_mdp`/`soft_limit`/
    /// `hard_limit` falls back to this planner's configured default.
    #[allow(clippy::too_many_arguments)]
    pub fn plan(
        &self,
        catalog: &dyn RetentionCatalog,
        now: u32,
        from: u32,
        to: u32,
        requests: &mut [Request],
        plan_mdp: Option<u32>,
        soft_limit: Option<u64>,
        hard_limit: Option<u64>,
    ) -> crate::error::Result<PlanSummary> {
        let plan_mdp = plan_mdp.unwrap_or(self.default_plan_mdp);
        let soft_limit = soft_limit.unwrap_or(self.default_soft_limit);
        let hard_limit = hard_limit.unwrap_or(self.default_hard_limit);

        let summary = plan(catalog, now, from, to, requests, plan_mdp, soft_limit, hard_limit)?;

        for req in requests.iter() {
            if let Some(archive) = req.archive() {
                self.metrics.record_archive_choice(req.schema_id, archive, 1);
            }
        }
        self.metrics.record_points_fetch(summary.points_fetch);
        self.metrics.record_points_return(summary.points_return);

        Ok(summary)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use data_types::{PnGroupId, Retention, RetentionSchema, SchemaId, SeriesId};
    use proptest::prelude::*;
    use std::num::NonZeroU32;

    fn retention_schema_strategy() -> impl Strategy<Value = RetentionSchema> {
        prop::collection::vec(1u32..=50, 1..=3).prop_map(|mut steps| {
            steps.sort_unstable();
            steps.dedup();
            if steps.is_empty() {
                steps.push(1);
            }
            let mut interval = 9u32;
            let retentions = steps
                .into_iter()
                .map(|step| {
                    interval += step;
                    Retention::new(interval, 10_000, 0)
                })
                .collect();
            RetentionSchema::new(retentions)
        })
    }

    proptest! {
        /// Every request a successful `plan()` produces has an `out_interval`
        /// that's a multiple of its own `arch_interval`, and every request
        /// sharing a PN-group ends up with the same `out_interval`.
        #[test]
        fn planned_requests_satisfy_shared_invariants(
            rets in retention_schema_strategy(),
            count in 1usize..=4,
            mdp_optimisable in any::<bool>(),
        ) {
            let schema_id = SchemaId::new(1);
            let catalog = InMemoryCatalog::new().with_schema(schema_id, rets);
            let pn_group = PnGroupId::new(7);

            let mut requests: Vec<Request> = (0..count)
                .map(|_| {
                    Request::new(
                        schema_id,
                        SeriesId::new(1),
                        0,
                        2 * 86_400,
                        NonZeroU32::new(800).unwrap(),
                        pn_group,
                        mdp_optimisable,
                        None,
                    )
                })
                .collect();

            if plan(&catalog, 2 * 86_400, 0, 2 * 86_400, &mut requests, 800, 0, 0).is_ok() {
                let first_out = requests[0].out_interval().unwrap();
                for req in &requests {
                    let arch_interval = req.arch_interval().unwrap();
                    prop_assert_eq!(req.out_interval().unwrap() % arch_interval, 0);
                    prop_assert_eq!(req.out_interval().unwrap(), first_out);
                }
            }
        }

        /// Re-planning an already-planned bundle with the same inputs is a
        /// no-op: the plan doesn't drift on repeated calls.
        #[test]
        fn replanning_is_idempotent(
            rets in retention_schema_strategy(),
        ) {
            let schema_id = SchemaId::new(1);
            let catalog = InMemoryCatalog::new().with_schema(schema_id, rets);

            let mut requests = vec![Request::new(
                schema_id,
                SeriesId::new(1),
                0,
                2 * 86_400,
                NonZeroU32::new(800).unwrap(),
                PnGroupId::NONE,
                false,
                None,
            )];

            if plan(&catalog, 2 * 86_400, 0, 2 * 86_400, &mut requests, 800, 0, 0).is_ok() {
                let before = (requests[0].archive(), requests[0].out_interval(), requests[0].points_fetch());
                plan(&catalog, 2 * 86_400, 0, 2 * 86_400, &mut requests, 800, 0, 0).unwrap();
                let after = (requests[0].archive(), requests[0].out_interval(), requests[0].points_fetch());
                prop_assert_eq!(before, after);
            }
        }

        /// A single `reduce_res_singles` step, when it succeeds, strictly
        /// decreases the request's `points_fetch` — coarsening one step can
        /// only shed points, never leave the count unchanged or raise it.
        #[test]
        fn reduce_step_strictly_decreases_points_fetch(
            rets in retention_schema_strategy(),
        ) {
            use crate::reduce::reduce_res_singles;
            use crate::single::plan_highest_res_singles;

            let schema_id = SchemaId::new(1);
            let mut requests = vec![Request::new(
                schema_id,
                SeriesId::new(1),
                0,
                2 * 86_400,
                NonZeroU32::new(800).unwrap(),
                PnGroupId::NONE,
                false,
                None,
            )];

            if plan_highest_res_singles(0, 2 * 86_400, 2 * 86_400, &rets, &mut requests, &[0]) {
                let before = requests[0].points_fetch();
                if reduce_res_singles(0, 2 * 86_400, &rets, &mut requests, &[0]) {
                    let after = requests[0].points_fetch();
                    prop_assert!(after < before);
                }
            }
        }

        /// A successful `plan()` never returns a `points_fetch` over
        /// `hard_limit` when the caller sets one: phase 3's gate either
        /// rejects the plan outright or the reduction pass already brought
        /// it under the limit.
        #[test]
        fn successful_plan_never_exceeds_hard_limit(
            rets in retention_schema_strategy(),
            count in 1usize..=4,
            hard_limit in 1u64..=5_000u64,
        ) {
            let schema_id = SchemaId::new(1);
            let catalog = InMemoryCatalog::new().with_schema(schema_id, rets);

            let mut requests: Vec<Request> = (0..count)
                .map(|_| {
                    Request::new(
                        schema_id,
                        SeriesId::new(1),
                        0,
                        2 * 86_400,
                        NonZeroU32::new(800).unwrap(),
                        PnGroupId::NONE,
                        false,
                        None,
                    )
                })
                .collect();

            if let Ok(summary) = plan(&catalog, 2 * 86_400, 0, 2 * 86_400, &mut requests, 800, 0, hard_limit) {
                prop_assert!(summary.points_fetch <= hard_limit);
            }
        }
    }
}
