//! The reduction pass: coarsen an already-planned bucket by exactly one
//! step, to bring total fetched points down.

use crate::catalog::RetentionCatalog;
use crate::combinatorics::{all_combinations, highest_res_lcm, valid_intervals_set};
use crate::multi::plan_to_multi;
use data_types::{MdpBucket, Request, RetentionSchema, SchemaId};
use observability_deps::tracing::debug;

/// Coarsen a homogeneous (single-schema) bucket one step: the first
/// retention strictly coarser than the current `out_interval` that is still
/// valid for `(from, ttl)`.
///
/// Returns `false` (no mutation) if no coarser valid retention exists.
pub fn reduce_res_singles(
    from: u32,
    ttl: u32,
    rets: &RetentionSchema,
    requests: &mut [Request],
    indices: &[usize],
) -> bool {
    let cur_out = match indices.first().and_then(|&i| requests[i].out_interval()) {
        Some(v) => v,
        None => return false,
    };

    let next = rets
        .retentions()
        .iter()
        .enumerate()
        .find(|(_, r)| r.valid(from, ttl) && r.seconds_per_point() > cur_out);

    let (idx, ret) = match next {
        Some((idx, ret)) => (idx, *ret),
        None => {
            debug!(cur_out, "reduce_res_singles: no coarser valid retention");
            return false;
        }
    };

    let arch_interval = ret.seconds_per_point();
    for &i in indices {
        let native = requests[i].effective_arch_interval(arch_interval);
        requests[i].apply_plan(idx, native, native);
    }
    true
}

/// Coarsen a PN-group/singles bucket one step: the smallest shared interval
/// strictly coarser than the bucket's current `out_interval`.
///
/// Returns `false` if no such interval exists (every schema is already at
/// its coarsest valid archive, or nothing coarser keeps every schema
/// valid).
pub fn reduce_res_multi(
    catalog: &dyn RetentionCatalog,
    from: u32,
    ttl: u32,
    bucket: &MdpBucket,
    requests: &mut [Request],
) -> bool {
    let cur_out = match bucket.out_interval(requests) {
        Some(v) => v,
        None => return false,
    };

    let schema_ids: Vec<SchemaId> = bucket.schemas().map(|(id, _)| *id).collect();
    let rets: Vec<_> = schema_ids.iter().map(|id| catalog.get(*id)).collect();

    let (set, ok) = valid_intervals_set(&rets, from, ttl);
    if !ok {
        debug!("reduce_res_multi: a schema has no valid interval");
        return false;
    }
    let combos = all_combinations(&set);

    let interval = highest_res_lcm(&combos, cur_out + 1, u32::MAX);
    if interval == 0 {
        debug!(cur_out, "reduce_res_multi: cannot reduce further");
        return false;
    }

    plan_to_multi(catalog, from, ttl, interval, bucket, requests);
    true
}
