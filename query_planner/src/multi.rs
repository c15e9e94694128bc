//! Multi-schema (PN-group) planners.
//!
//! These plan a heterogeneous bundle — several schemas in one PN-group, or
//! the analogous singles buckets when more than one schema shares a bucket —
//! so every request ends up sharing one `out_interval`, since requests in
//! the same PN-group are combined downstream and can't be combined at
//! mismatched intervals.

use crate::catalog::RetentionCatalog;
use crate::combinatorics::{all_combinations, lcm_all, lowest_res_lcm, valid_intervals_set, SchemaDemand};
use crate::select::{find_highest_res, find_lowest_valid_for_interval};
use data_types::{MdpBucket, Request, SchemaId};
use observability_deps::tracing::debug;

/// Plan under the MDP-no policy: every schema picks its own highest-resolution
/// archive, then every request is re-planned to share the LCM of the
/// distinct archive intervals actually applied.
///
/// The distinct intervals are collected from the *planned requests*, not
/// from the retention descriptors — a schema's raw archive is nominal, and
/// individual series may carry their own `native_interval`.
pub fn plan_highest_res_multi(
    catalog: &dyn RetentionCatalog,
    from: u32,
    ttl: u32,
    bucket: &MdpBucket,
    requests: &mut [Request],
) -> bool {
    let mut selections = Vec::new();
    for (schema_id, indices) in bucket.schemas() {
        let rets = catalog.get(*schema_id);
        let sel = find_highest_res(rets, from, ttl);
        if !sel.ok {
            debug!(%schema_id, "plan_highest_res_multi: no retention ready");
            return false;
        }
        selections.push((sel.idx, sel.retention.seconds_per_point(), indices));
    }

    for (idx, arch_interval, indices) in &selections {
        for &i in indices.iter() {
            let native = requests[i].effective_arch_interval(*arch_interval);
            requests[i].apply_plan(*idx, native, native);
        }
    }

    let mut distinct: Vec<u32> = Vec::new();
    for i in bucket.all_indices() {
        let v = requests[i].arch_interval().expect("just planned above");
        if !distinct.contains(&v) {
            distinct.push(v);
        }
    }
    let interval = u32::try_from(lcm_all(&distinct))
        .expect("lcm of archive intervals exceeds representable range");

    for i in bucket.all_indices() {
        let archive = requests[i].archive().expect("just planned above");
        let arch_interval = requests[i].arch_interval().expect("just planned above");
        if interval != arch_interval {
            requests[i].apply_plan(archive, arch_interval, interval);
        }
    }

    true
}

/// Plan under the MDP-yes policy: derive the coarsest output interval that
/// still yields `>= plan_mdp / 2` points for the window, shared across every
/// schema in the bucket, then apply it via [`plan_to_multi`].
pub fn plan_lowest_res_for_mdp_multi(
    catalog: &dyn RetentionCatalog,
    from: u32,
    to: u32,
    ttl: u32,
    plan_mdp: u32,
    bucket: &MdpBucket,
    requests: &mut [Request],
) -> bool {
    let max_interval = (2 * (to - from) as u64 / plan_mdp as u64) as u32;

    let schema_ids: Vec<SchemaId> = bucket.schemas().map(|(id, _)| *id).collect();
    let rets: Vec<_> = schema_ids.iter().map(|id| catalog.get(*id)).collect();

    let (set, ok) = valid_intervals_set(&rets, from, ttl);
    if !ok {
        debug!("plan_lowest_res_for_mdp_multi: a schema has no valid interval");
        return false;
    }
    let combos = all_combinations(&set);

    let demands: Vec<SchemaDemand<'_>> = schema_ids
        .iter()
        .zip(rets.iter())
        .map(|(schema_id, schema)| SchemaDemand {
            schema,
            request_count: bucket.requests_for(*schema_id).map_or(0, |s| s.len()),
        })
        .collect();

    let interval = lowest_res_lcm(&combos, &demands, from, ttl, 0, max_interval);

    plan_to_multi(catalog, from, ttl, interval, bucket, requests);
    true
}

/// Apply a chosen shared `interval` to every request in `bucket`: each
/// schema picks its coarsest archive dividing `interval` evenly
/// ([`find_lowest_valid_for_interval`], guaranteed to succeed by
/// construction), and requests whose native interval doesn't already equal
/// `interval` get flagged for runtime normalisation via `out_interval`.
pub fn plan_to_multi(
    catalog: &dyn RetentionCatalog,
    from: u32,
    ttl: u32,
    interval: u32,
    bucket: &MdpBucket,
    requests: &mut [Request],
) {
    for (schema_id, indices) in bucket.schemas() {
        let rets = catalog.get(*schema_id);
        let sel = find_lowest_valid_for_interval(rets, from, ttl, interval);
        assert!(
            sel.ok,
            "inconsistent combinatorics: schema {schema_id} has no archive dividing {interval}"
        );

        for &i in indices {
            let native = requests[i].effective_arch_interval(sel.retention.seconds_per_point());
            let out_interval = if native == interval { native } else { interval };
            requests[i].apply_plan(sel.idx, native, out_interval);
        }
    }
}
