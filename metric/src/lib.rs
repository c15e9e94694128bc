//! A minimal, dependency-light metrics registry.
//!
//! Mirrors the shape of IOx's runtime metric registry closely enough for
//! in-process instruments (counters keyed by a small attribute set) without
//! pulling in an exporter. Crates that need a `U64Counter` or similar simply
//! `register_metric` once at construction time and keep the returned
//! [`Metric`] around, pulling out per-attribute recorders as needed.

use parking_lot::Mutex;
use std::{
    collections::BTreeMap,
    fmt::Debug,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

/// A set of key/value labels identifying one time series within a [`Metric`].
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Attributes(BTreeMap<&'static str, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, value: impl Into<String>) {
        self.0.insert(key, value.into());
    }
}

impl<const N: usize> From<[(&'static str, &'static str); N]> for Attributes {
    fn from(arr: [(&'static str, &'static str); N]) -> Self {
        Self(arr.into_iter().map(|(k, v)| (k, v.to_string())).collect())
    }
}

/// A monotonic counter of unsigned 64-bit values.
#[derive(Debug, Clone, Default)]
pub struct U64Counter(Arc<AtomicU64>);

impl U64Counter {
    pub fn inc(&self, delta: u64) {
        self.0.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn fetch(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// A named, described instrument of type `T`, keyed by [`Attributes`].
///
/// `T` must implement `Default` so that a fresh recorder can be created the
/// first time a given attribute set is observed.
#[derive(Debug)]
pub struct Metric<T> {
    name: &'static str,
    description: &'static str,
    recorders: Mutex<BTreeMap<Attributes, T>>,
}

impl<T> Metric<T>
where
    T: Clone + Default,
{
    /// Get (creating if necessary) the recorder for the given attributes.
    pub fn recorder(&self, attributes: impl Into<Attributes>) -> T {
        let mut recorders = self.recorders.lock();
        recorders
            .entry(attributes.into())
            .or_insert_with(T::default)
            .clone()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }
}

/// A process-wide (or test-local) registry of instruments.
///
/// Analogous to `metric::Registry` as threaded through IOx's cache and
/// catalog layers (e.g. `NamespaceCache::new(.., metric_registry: &Registry,
/// ..)`): constructed once, handed to collaborators by reference, and never
/// torn down during the lifetime of a process.
#[derive(Debug, Default)]
pub struct Registry {
    // Kept for parity with a real exporter-backed registry; unused by the
    // in-process `Metric<T>` instruments themselves, which own their state.
    _private: (),
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or re-register) a named instrument.
    pub fn register_metric<T>(&self, name: &'static str, description: &'static str) -> Metric<T>
    where
        T: Clone + Default,
    {
        Metric {
            name,
            description,
            recorders: Mutex::new(BTreeMap::new()),
        }
    }
}
