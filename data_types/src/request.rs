//! The single-series fetch request and its planned-state mutations.

use crate::{PnGroupId, SchemaId, SeriesId};
use std::num::NonZeroU32;

fn div_ceil(numerator: u64, denominator: u64) -> u64 {
    debug_assert!(denominator > 0);
    (numerator + denominator - 1) / denominator
}

/// A fetch intent for one series over `[from, to)`.
///
/// Planning mutates the four `plan_*`-prefixed fields in place, once (or
/// twice, if a [reduction pass](`crate`) coarsens the plan); everything else
/// is set by the caller and never changed by the planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub schema_id: SchemaId,
    pub series_id: SeriesId,
    pub from: u32,
    pub to: u32,
    /// Per-request display-density hint, used only to derive `points_return`
    /// — NOT the same knob as the call-level `plan_MDP` that drives archive
    /// selection (see `DESIGN.md`, Open Question (MDP plumbing)).
    pub mdp: NonZeroU32,
    pub pn_group: PnGroupId,
    pub mdp_optimisable: bool,
    /// Present only for raw (archive 0) series whose ingest cadence doesn't
    /// match the schema's nominal `seconds_per_point`.
    pub native_interval: Option<u32>,

    archive: Option<usize>,
    arch_interval: Option<u32>,
    out_interval: Option<u32>,
    points_fetch: Option<u64>,
}

impl Request {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        schema_id: SchemaId,
        series_id: SeriesId,
        from: u32,
        to: u32,
        mdp: NonZeroU32,
        pn_group: PnGroupId,
        mdp_optimisable: bool,
        native_interval: Option<u32>,
    ) -> Self {
        Self {
            schema_id,
            series_id,
            from,
            to,
            mdp,
            pn_group,
            mdp_optimisable,
            native_interval,
            archive: None,
            arch_interval: None,
            out_interval: None,
            points_fetch: None,
        }
    }

    pub fn is_planned(&self) -> bool {
        self.archive.is_some()
    }

    pub fn archive(&self) -> Option<usize> {
        self.archive
    }

    pub fn arch_interval(&self) -> Option<u32> {
        self.arch_interval
    }

    pub fn out_interval(&self) -> Option<u32> {
        self.out_interval
    }

    pub fn points_fetch(&self) -> u64 {
        self.points_fetch.unwrap_or(0)
    }

    /// The interval at which this series' native archive is read, falling
    /// back to the schema's declared retention interval unless the request
    /// carries a non-canonical `native_interval` (raw archive only).
    pub fn effective_arch_interval(&self, schema_interval: u32) -> u32 {
        self.native_interval.unwrap_or(schema_interval)
    }

    /// Apply (or re-apply) a plan decision: the chosen archive index, its
    /// native interval, and the promised output interval.
    ///
    /// `out_interval` must be a multiple of `arch_interval`; this is an
    /// internal invariant of the callers in `query_planner`, so it is
    /// asserted rather than returned as an error.
    pub fn apply_plan(&mut self, archive: usize, arch_interval: u32, out_interval: u32) {
        assert!(arch_interval > 0, "arch_interval must be positive");
        assert_eq!(
            out_interval % arch_interval,
            0,
            "out_interval must be an integer multiple of arch_interval"
        );
        self.archive = Some(archive);
        self.arch_interval = Some(arch_interval);
        self.out_interval = Some(out_interval);
        self.points_fetch = Some(div_ceil(
            (self.to - self.from) as u64,
            arch_interval as u64,
        ));
    }

    /// Points the caller will actually render, after the runtime applies its
    /// own `mdp` floor on top of whatever `out_interval` the planner chose.
    pub fn points_return(&self) -> u64 {
        let out_interval = self
            .out_interval
            .expect("points_return called before planning");
        let window = (self.to - self.from) as u64;
        let mdp_runtime_floor = div_ceil(window, self.mdp.get() as u64);
        let effective = (out_interval as u64).max(mdp_runtime_floor);
        div_ceil(window, effective)
    }
}
