//! Shared data types for the request planner.
#![deny(rustdoc::broken_intra_doc_links, rust_2018_idioms)]
#![warn(
    missing_debug_implementations,
    clippy::explicit_iter_loop,
    clippy::use_self,
    clippy::clone_on_ref_ptr
)]

mod ids;
mod plan;
mod request;
mod retention;

pub use ids::{PnGroupId, SchemaId, SeriesId};
pub use plan::{MdpBucket, PnGroupBucket, ReqsPlan};
pub use request::Request;
pub use retention::{Retention, RetentionSchema};
