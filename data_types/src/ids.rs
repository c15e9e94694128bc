//! Small newtype identifiers, following the rest of the workspace's
//! convention of not passing raw integers across API boundaries.

use std::fmt::{Display, Formatter};

/// Identifies a [`crate::Schema`](crate::RetentionSchema) in the retention
/// catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaId(u16);

impl SchemaId {
    pub fn new(id: u16) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u16 {
        self.0
    }
}

impl Display for SchemaId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for SchemaId {
    fn from(id: u16) -> Self {
        Self::new(id)
    }
}

/// Identifies one series being fetched. Opaque to the planner beyond
/// equality/ordering; carried through purely for caller bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesId(u64);

impl SeriesId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for SeriesId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Identifies a pre-normalisation group. `0` means "no group" (the request is
/// planned independently), so the zero value never needs special-casing on
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PnGroupId(u32);

impl PnGroupId {
    pub const NONE: Self = Self(0);

    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// True if this request does not belong to any PN-group.
    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl Display for PnGroupId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PnGroupId {
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}
