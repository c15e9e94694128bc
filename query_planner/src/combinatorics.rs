//! Interval-set combinatorics.
//!
//! This is the part of the planner that picks one output interval shared by
//! several heterogeneous schemas. The search space is the cross product of
//! each schema's valid intervals (deduplicated by structural equality
//! first, since two schemas with coinciding retention ladders shouldn't
//! double the combinatorics) — in practice a handful of schemas with a
//! handful of intervals each, so the cross product stays small.

use crate::select::{find_lowest_valid_for_interval, valid_intervals};
use data_types::RetentionSchema;

/// Per-schema retention list and in-bundle request count, used to score a
/// candidate interval in [`lowest_res_lcm`].
#[derive(Debug, Clone, Copy)]
pub struct SchemaDemand<'a> {
    pub schema: &'a RetentionSchema,
    pub request_count: usize,
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn lcm(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 {
        0
    } else {
        a / gcd(a, b) * b
    }
}

/// LCM of every value in `intervals`. Panics on an empty slice — every
/// combination produced by [`all_combinations`] has at least one element per
/// input list, so this would only be empty due to a caller bug.
pub fn lcm_all(intervals: &[u32]) -> u64 {
    intervals
        .iter()
        .map(|&v| v as u64)
        .reduce(lcm)
        .expect("lcm_all requires at least one interval")
}

/// Collect the valid-intervals list for each schema, deduplicating
/// structurally identical lists. Fails (`ok = false`) if any schema has no
/// valid interval at all.
pub fn valid_intervals_set(
    rets_per_schema: &[&RetentionSchema],
    from: u32,
    ttl: u32,
) -> (Vec<Vec<u32>>, bool) {
    let mut set: Vec<Vec<u32>> = Vec::new();
    for rets in rets_per_schema {
        let (list, any) = valid_intervals(rets, from, ttl);
        if !any {
            return (Vec::new(), false);
        }
        if !set.contains(&list) {
            set.push(list);
        }
    }
    (set, true)
}

/// Cartesian product across the per-schema (deduplicated) valid-interval
/// lists, in declared order, so plans are reproducible.
pub fn all_combinations(lists: &[Vec<u32>]) -> Vec<Vec<u32>> {
    lists.iter().fold(vec![Vec::new()], |acc, list| {
        acc.into_iter()
            .flat_map(|prefix| {
                list.iter().map(move |&v| {
                    let mut next = prefix.clone();
                    next.push(v);
                    next
                })
            })
            .collect()
    })
}

/// *Coarsest under cap*: the LCM candidate that lets the most requests read
/// from the coarsest archive, within `[min_interval, max_interval]`.
///
/// Falls back to the globally smallest LCM seen when nothing is in range —
/// the caller still needs *an* interval to proceed with, it just won't have
/// hit the density target.
///
/// Panics if a candidate interval that `all_combinations` guarantees is
/// supported by every schema somehow has no valid archive — that would mean
/// `valid_intervals_set`/`all_combinations` built an inconsistent
/// combination, an internal bug in this module rather than a user-facing
/// failure.
pub fn lowest_res_lcm(
    combos: &[Vec<u32>],
    demands: &[SchemaDemand<'_>],
    from: u32,
    ttl: u32,
    min_interval: u32,
    max_interval: u32,
) -> u32 {
    assert!(
        !combos.is_empty(),
        "lowest_res_lcm requires at least one combination"
    );

    let mut smallest_seen = u64::MAX;
    let mut best: Option<(u64, u64)> = None;

    for combo in combos {
        let interval = lcm_all(combo);
        smallest_seen = smallest_seen.min(interval);

        if interval < min_interval as u64 || interval > max_interval as u64 {
            continue;
        }

        let score: u64 = demands
            .iter()
            .map(|d| {
                let interval_u32 = u32::try_from(interval)
                    .expect("candidate interval exceeds representable archive interval range");
                let sel = find_lowest_valid_for_interval(d.schema, from, ttl, interval_u32);
                assert!(
                    sel.ok,
                    "inconsistent combinatorics: candidate interval {interval} has no valid \
                     archive for a schema that all_combinations claims supports it"
                );
                d.request_count as u64 * sel.retention.seconds_per_point() as u64
            })
            .sum();

        // strictly greater so the first-encountered candidate wins ties,
        // keeping plans reproducible across runs.
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((interval, score));
        }
    }

    match best {
        Some((interval, _)) => interval as u32,
        None => smallest_seen as u32,
    }
}

/// *Finest above floor*: the smallest LCM in `[min_interval, max_interval]`,
/// or `0` if none exists ("cannot reduce further").
pub fn highest_res_lcm(combos: &[Vec<u32>], min_interval: u32, max_interval: u32) -> u32 {
    combos
        .iter()
        .map(|c| lcm_all(c))
        .filter(|&interval| interval >= min_interval as u64 && interval <= max_interval as u64)
        .min()
        .map(|v| v as u32)
        .unwrap_or(0)
}
