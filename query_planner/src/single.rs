//! Single-schema planners: homogeneous request bundles, one schema at a
//! time.

use crate::select::find_highest_res;
use data_types::{Request, RetentionSchema};
use observability_deps::tracing::debug;

fn div_ceil(numerator: u64, denominator: u64) -> u64 {
    (numerator + denominator - 1) / denominator
}

/// Plan a homogeneous bundle under the MDP-no policy: every request gets the
/// finest valid archive.
///
/// `indices` selects which entries of `requests` belong to this bundle.
/// Returns `false` (no mutation performed) if no archive is ready for
/// `from`.
pub fn plan_highest_res_singles(
    from: u32,
    to: u32,
    ttl: u32,
    rets: &RetentionSchema,
    requests: &mut [Request],
    indices: &[usize],
) -> bool {
    let sel = find_highest_res(rets, from, ttl);
    if !sel.ok {
        debug!(from, ttl, "plan_highest_res_singles: no retention ready");
        return false;
    }

    let arch_interval = sel.retention.seconds_per_point();
    for &i in indices {
        let native = requests[i].effective_arch_interval(arch_interval);
        requests[i].apply_plan(sel.idx, native, native);
    }
    let _ = to; // `to` participates only via points_fetch, computed in apply_plan
    true
}

/// Plan a homogeneous bundle under the MDP-yes policy: scan from the
/// coarsest archive down, stop at the first one that would fetch at least
/// `plan_mdp / 2` points for the (representative) first request, or at the
/// finest ready archive if none meets the threshold.
///
/// All requests in the bundle are planned against the one archive chosen
/// this way. Fails only if no archive is ready.
pub fn plan_lowest_res_for_mdp_singles(
    from: u32,
    to: u32,
    ttl: u32,
    plan_mdp: u32,
    rets: &RetentionSchema,
    requests: &mut [Request],
    indices: &[usize],
) -> bool {
    let window = (to - from) as u64;
    let threshold = plan_mdp as u64 / 2;

    let mut chosen: Option<usize> = None;
    let mut finest_ready: Option<usize> = None;

    for (idx, ret) in rets.retentions().iter().enumerate().rev() {
        if ret.ready_timestamp() > from {
            continue;
        }
        finest_ready = Some(idx);

        let points_fetch = div_ceil(window, ret.seconds_per_point() as u64);
        if points_fetch >= threshold {
            chosen = Some(idx);
            break;
        }
    }

    let idx = match chosen.or(finest_ready) {
        Some(idx) => idx,
        None => {
            debug!(from, "plan_lowest_res_for_mdp_singles: no retention ready");
            return false;
        }
    };

    let arch_interval = rets.retentions()[idx].seconds_per_point();
    for &i in indices {
        let native = requests[i].effective_arch_interval(arch_interval);
        requests[i].apply_plan(idx, native, native);
    }
    true
}
