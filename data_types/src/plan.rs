//! The partitioned view (`ReqsPlan`) over a request bundle.
//!
//! The view groups requests by PN-group membership, then by
//! MDP-optimisability, then by schema — the three axes every planning phase
//! (`query_planner`) dispatches on. It holds indices into the caller's
//! request vector rather than references to the requests themselves: the
//! planner needs to mutate disjoint index sets (one bucket at a time) while
//! other buckets are still borrowed read-only for limit bookkeeping, which a
//! literal `&mut Request` borrow per bucket cannot express without unsafe
//! code. Indices keep the view a thin, Copy-friendly index of "what goes
//! where" and push all actual mutation through the caller's own
//! `&mut [Request]`.

use crate::{PnGroupId, Request, SchemaId};
use std::collections::BTreeMap;

/// Requests sharing one schema within one [`MdpBucket`], in caller order.
pub type SchemaRequests = Vec<usize>;

/// One half (MDP-yes or MDP-no) of a [`PnGroupBucket`]: schema -> request
/// indices.
#[derive(Debug, Default, Clone)]
pub struct MdpBucket {
    by_schema: BTreeMap<SchemaId, SchemaRequests>,
}

impl MdpBucket {
    fn push(&mut self, schema_id: SchemaId, idx: usize) {
        self.by_schema.entry(schema_id).or_default().push(idx);
    }

    pub fn is_empty(&self) -> bool {
        self.by_schema.is_empty()
    }

    pub fn schemas(&self) -> impl Iterator<Item = (&SchemaId, &SchemaRequests)> {
        self.by_schema.iter()
    }

    pub fn requests_for(&self, schema_id: SchemaId) -> Option<&[usize]> {
        self.by_schema.get(&schema_id).map(Vec::as_slice)
    }

    /// All request indices across every schema in this bucket, in schema
    /// order then caller order — the shape the multi-schema planners need.
    pub fn all_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.by_schema.values().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.by_schema.values().map(Vec::len).sum()
    }

    /// Sum of `points_fetch()` across every request in this bucket.
    pub fn points_fetch(&self, requests: &[Request]) -> u64 {
        self.all_indices().map(|i| requests[i].points_fetch()).sum()
    }

    /// The common `out_interval` of this bucket, well-defined once every
    /// request has been planned (every request in a bucket is planned to
    /// share one output interval). `None` if the bucket is empty or
    /// unplanned.
    pub fn out_interval(&self, requests: &[Request]) -> Option<u32> {
        self.all_indices()
            .next()
            .and_then(|i| requests[i].out_interval())
    }
}

/// One PN-group's (or the singles bucket's) MDP-yes / MDP-no halves.
#[derive(Debug, Default, Clone)]
pub struct PnGroupBucket {
    pub mdp_yes: MdpBucket,
    pub mdp_no: MdpBucket,
}

impl PnGroupBucket {
    pub fn points_fetch(&self, requests: &[Request]) -> u64 {
        self.mdp_yes.points_fetch(requests) + self.mdp_no.points_fetch(requests)
    }

    pub fn len(&self) -> usize {
        self.mdp_yes.len() + self.mdp_no.len()
    }
}

/// The full partitioned view over a request bundle.
#[derive(Debug, Default, Clone)]
pub struct ReqsPlan {
    pngroups: BTreeMap<PnGroupId, PnGroupBucket>,
    single: PnGroupBucket,
}

impl ReqsPlan {
    /// Build the partitioned view over `requests`. O(n) in the number of
    /// requests; allocates only the (small) index vectors, never clones a
    /// `Request`.
    pub fn partition(requests: &[Request]) -> Self {
        let mut plan = Self::default();
        for (idx, req) in requests.iter().enumerate() {
            let bucket = if req.pn_group.is_none() {
                &mut plan.single
            } else {
                plan.pngroups.entry(req.pn_group).or_default()
            };
            let half = if req.mdp_optimisable {
                &mut bucket.mdp_yes
            } else {
                &mut bucket.mdp_no
            };
            half.push(req.schema_id, idx);
        }
        plan
    }

    pub fn pngroups(&self) -> impl Iterator<Item = (&PnGroupId, &PnGroupBucket)> {
        self.pngroups.iter()
    }

    pub fn single(&self) -> &PnGroupBucket {
        &self.single
    }

    /// Total points fetched across the whole bundle.
    pub fn points_fetch(&self, requests: &[Request]) -> u64 {
        let pngroup_total: u64 = self
            .pngroups
            .values()
            .map(|b| b.points_fetch(requests))
            .sum();
        pngroup_total + self.single.points_fetch(requests)
    }

    /// Total points the bundle will return to callers (sum of
    /// `Request::points_return`).
    pub fn points_return(&self, requests: &[Request]) -> u64 {
        self.pngroups
            .values()
            .flat_map(|b| [&b.mdp_yes, &b.mdp_no])
            .chain([&self.single.mdp_yes, &self.single.mdp_no])
            .flat_map(|half| half.all_indices())
            .map(|i| requests[i].points_return())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeriesId;
    use std::num::NonZeroU32;

    fn req(schema: u16, pn_group: u32, mdp_optimisable: bool) -> Request {
        Request::new(
            SchemaId::new(schema),
            SeriesId::new(0),
            0,
            100,
            NonZeroU32::new(100).unwrap(),
            PnGroupId::new(pn_group),
            mdp_optimisable,
            None,
        )
    }

    #[test]
    fn partitions_by_group_then_mdp_then_schema() {
        let requests = vec![
            req(1, 0, false), // single / mdp_no / schema 1
            req(1, 0, true),  // single / mdp_yes / schema 1
            req(2, 5, false), // pngroup 5 / mdp_no / schema 2
            req(2, 5, false), // pngroup 5 / mdp_no / schema 2
        ];
        let view = ReqsPlan::partition(&requests);

        assert_eq!(view.single().mdp_no.len(), 1);
        assert_eq!(view.single().mdp_yes.len(), 1);

        let groups: Vec<_> = view.pngroups().collect();
        assert_eq!(groups.len(), 1);
        let (id, bucket) = groups[0];
        assert_eq!(id.get(), 5);
        assert_eq!(bucket.mdp_no.len(), 2);
        assert_eq!(bucket.mdp_yes.len(), 0);
    }
}
