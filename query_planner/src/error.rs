//! The two user-visible failure sentinels a caller of `plan()` needs to
//! handle.
//!
//! Precondition failures — a missing schema, `MDP == 0`, or the interval
//! combinatorics turning up inconsistent mid-plan — are programmer errors
//! and panic (via `assert!`/`unreachable!`/[`catalog::RetentionCatalog::get`])
//! rather than being represented here. Only the two outcomes a caller is
//! expected to handle at runtime (map naturally to HTTP 404 / 413) are
//! `Error` variants.

use snafu::Snafu;

#[derive(Debug, Snafu, PartialEq, Eq, Clone, Copy)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("no retention archive covers the requested window"))]
    Unsatisfiable,

    #[snafu(display(
        "plan would fetch {points_fetch} points, over the hard limit of {hard_limit}"
    ))]
    TooManyPoints { points_fetch: u64, hard_limit: u64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
