//! Selects, for a batch of raw point-fetch requests, which rollup archive
//! and output interval to read each one from.
//!
//! The planner never touches storage: it only looks at each schema's
//! retention ladder ([`RetentionCatalog`]) and a batch's shape (size,
//! density target, grouping) to decide *where* a request should read from,
//! leaving the actual fetch to the caller. See [`orchestrator::plan`] for
//! the entry point.

#![deny(rustdoc::broken_intra_doc_links, rust_2018_idioms)]
#![warn(
    missing_debug_implementations,
    clippy::explicit_iter_loop,
    clippy::use_self,
    clippy::clone_on_ref_ptr
)]

mod catalog;
mod combinatorics;
mod error;
mod metrics;
mod multi;
mod orchestrator;
mod reduce;
mod select;
mod single;

pub mod test_util;

pub use catalog::{InMemoryCatalog, RetentionCatalog};
pub use error::{Error, Result};
pub use metrics::PlannerMetrics;
pub use orchestrator::{plan, PlanSummary, QueryPlanner};
