//! A crate to ensure consistent usage of tracing versions/features across IOx-shaped binaries.
//!
//! If you want to use the tracing macros, add `observability_deps` as a dependency, and:
//!
//! ```rust
//! use observability_deps::tracing::{info, warn};
//! ```

pub use tracing;
