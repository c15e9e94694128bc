//! Terse builders for constructing catalogues and requests in tests,
//! playing the same role `iox_query::test::TestChunk`/`TestDatabase` play
//! for query-execution tests.

use crate::catalog::{InMemoryCatalog, RetentionCatalog};
use data_types::{PnGroupId, Request, Retention, RetentionSchema, SchemaId, SeriesId};
use std::num::NonZeroU32;

/// Builds an [`InMemoryCatalog`] one schema at a time.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: InMemoryCatalog,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema from `(seconds_per_point, number_of_points,
    /// ready_timestamp)` triples, finest archive first.
    pub fn with_schema(
        mut self,
        schema_id: u16,
        retentions: impl IntoIterator<Item = (u32, u32, u32)>,
    ) -> Self {
        let schema = RetentionSchema::new(
            retentions
                .into_iter()
                .map(|(seconds_per_point, number_of_points, ready_timestamp)| {
                    Retention::new(seconds_per_point, number_of_points, ready_timestamp)
                })
                .collect(),
        );
        self.catalog = self.catalog.with_schema(SchemaId::new(schema_id), schema);
        self
    }

    pub fn build(self) -> InMemoryCatalog {
        self.catalog
    }
}

/// Builds a [`Request`] with sensible test defaults (`mdp = 800`, no
/// PN-group, not MDP-optimisable), overridden field by field.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    schema_id: SchemaId,
    series_id: SeriesId,
    from: u32,
    to: u32,
    mdp: NonZeroU32,
    pn_group: PnGroupId,
    mdp_optimisable: bool,
    native_interval: Option<u32>,
}

impl RequestBuilder {
    pub fn new(schema_id: u16, from: u32, to: u32) -> Self {
        Self {
            schema_id: SchemaId::new(schema_id),
            series_id: SeriesId::new(1),
            from,
            to,
            mdp: NonZeroU32::new(800).unwrap(),
            pn_group: PnGroupId::NONE,
            mdp_optimisable: false,
            native_interval: None,
        }
    }

    pub fn series(mut self, series_id: u64) -> Self {
        self.series_id = SeriesId::new(series_id);
        self
    }

    pub fn mdp(mut self, mdp: u32) -> Self {
        self.mdp = NonZeroU32::new(mdp).expect("mdp must be non-zero");
        self
    }

    pub fn pn_group(mut self, pn_group: u32) -> Self {
        self.pn_group = PnGroupId::new(pn_group);
        self
    }

    pub fn mdp_optimisable(mut self, mdp_optimisable: bool) -> Self {
        self.mdp_optimisable = mdp_optimisable;
        self
    }

    pub fn native_interval(mut self, native_interval: u32) -> Self {
        self.native_interval = Some(native_interval);
        self
    }

    pub fn build(self) -> Request {
        Request::new(
            self.schema_id,
            self.series_id,
            self.from,
            self.to,
            self.mdp,
            self.pn_group,
            self.mdp_optimisable,
            self.native_interval,
        )
    }
}
