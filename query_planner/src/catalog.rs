//! Retention catalogue accessor: maps a schema to its ordered retention
//! (rollup archive) list.

use data_types::{RetentionSchema, SchemaId};

/// Read-only lookup from schema id to its retention list.
///
/// Implementations are expected to be cheap and synchronous — the planner
/// never awaits here. A missing schema is a programmer error (callers only
/// ever pass schema ids sourced from the same catalogue), so `get` panics
/// rather than returning an `Option`/`Result`; this mirrors how
/// `iox_catalog::interface::Catalog` treats a caller passing an id it never
/// handed out.
pub trait RetentionCatalog {
    fn get(&self, schema_id: SchemaId) -> &RetentionSchema;
}

/// A simple in-memory catalogue, suitable for tests and for small
/// deployments that load their schema definitions once at startup.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    schemas: std::collections::BTreeMap<SchemaId, RetentionSchema>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(mut self, schema_id: SchemaId, schema: RetentionSchema) -> Self {
        self.schemas.insert(schema_id, schema);
        self
    }
}

impl RetentionCatalog for InMemoryCatalog {
    fn get(&self, schema_id: SchemaId) -> &RetentionSchema {
        self.schemas.get(&schema_id).unwrap_or_else(|| {
            panic!("retention catalogue has no entry for schema {schema_id} — caller contract violation")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_types::Retention;

    #[test]
    fn looks_up_registered_schema() {
        let schema = RetentionSchema::new(vec![Retention::new(10, 100, 0)]);
        let catalog = InMemoryCatalog::new().with_schema(SchemaId::new(1), schema.clone());
        assert_eq!(catalog.get(SchemaId::new(1)), &schema);
    }

    #[test]
    #[should_panic(expected = "no entry")]
    fn missing_schema_panics() {
        let catalog = InMemoryCatalog::new();
        catalog.get(SchemaId::new(42));
    }
}
