//! Retention selection primitives: pick which archive in a schema's
//! retention ladder answers a given window.

use data_types::{Retention, RetentionSchema};
use observability_deps::tracing::trace;

/// Result of a selection attempt: the chosen archive's index within the
/// schema's retention list, the archive itself, and whether the selection
/// actually succeeded under readiness/TTL constraints.
#[derive(Debug, Clone, Copy)]
pub struct Selected {
    pub idx: usize,
    pub retention: Retention,
    pub ok: bool,
}

/// Pick the highest-resolution retention that satisfies `ttl`, falling back
/// to the coarsest ready archive if none does.
///
/// Iterates in ascending `seconds_per_point` order (finest first). Skips any
/// archive not yet ready for `from`. `ok = false` only when *no* archive is
/// ready.
pub fn find_highest_res(rets: &RetentionSchema, from: u32, ttl: u32) -> Selected {
    let mut coarsest_ready: Option<(usize, Retention)> = None;

    for (idx, ret) in rets.retentions().iter().enumerate() {
        if ret.ready_timestamp() > from {
            continue;
        }
        if ret.max_retention() >= ttl {
            trace!(idx, seconds_per_point = ret.seconds_per_point(), "find_highest_res: ttl satisfied");
            return Selected {
                idx,
                retention: *ret,
                ok: true,
            };
        }
        // Ready but short of ttl: track as a fallback candidate. Because we
        // iterate ascending and retentions grow both coarser and (normally)
        // longer-lived, the last ready one we see has the longest coverage.
        coarsest_ready = Some((idx, *ret));
    }

    match coarsest_ready {
        Some((idx, retention)) => Selected {
            idx,
            retention,
            ok: true,
        },
        None => Selected {
            idx: 0,
            retention: rets.retentions()[0],
            ok: false,
        },
    }
}

/// Pick the coarsest-or-equal valid archive whose native interval evenly
/// divides `interval`, preferring an exact match.
///
/// Iterates in **descending** order so an archive whose `seconds_per_point`
/// exactly equals `interval` wins over a finer one that would need runtime
/// normalisation; only when no exact match exists does the finest divisor
/// win.
pub fn find_lowest_valid_for_interval(
    rets: &RetentionSchema,
    from: u32,
    ttl: u32,
    interval: u32,
) -> Selected {
    for (idx, ret) in rets.retentions().iter().enumerate().rev() {
        if ret.valid(from, ttl) && interval % ret.seconds_per_point() == 0 {
            return Selected {
                idx,
                retention: *ret,
                ok: true,
            };
        }
    }
    Selected {
        idx: 0,
        retention: rets.retentions()[0],
        ok: false,
    }
}

/// Collect the `seconds_per_point` of every archive valid for `(from, ttl)`,
/// in ascending order. `any` is `true` iff the list is non-empty.
pub fn valid_intervals(rets: &RetentionSchema, from: u32, ttl: u32) -> (Vec<u32>, bool) {
    let list: Vec<u32> = rets
        .retentions()
        .iter()
        .filter(|r| r.valid(from, ttl))
        .map(|r| r.seconds_per_point())
        .collect();
    let any = !list.is_empty();
    (list, any)
}
