//! Metrics for [super::Queue].

use prometheus_client::{
    metrics::{counter::Counter, gauge::Gauge},
    registry::Registry,
};

/// Metrics for [super::Queue].
#[derive(Clone, Debug, Default)]
pub struct Metrics {
    /// Elements currently stored.
    pub items: Gauge,
    /// Slots allocated.
    pub capacity: Gauge,
    /// Slots allocated to make room for an insertion.
    pub grown: Counter,
    /// Insertions written into a retained buffer.
    pub reused: Counter,
}

impl Metrics {
    /// Register metrics with the given registry.
    pub fn register(&self, registry: &mut Registry) {
        registry.register("items", "Elements currently stored", self.items.clone());
        registry.register("capacity", "Slots allocated", self.capacity.clone());
        registry.register(
            "grown",
            "Slots allocated to make room for an insertion",
            self.grown.clone(),
        );
        registry.register(
            "reused",
            "Insertions written into a retained buffer",
            self.reused.clone(),
        );
    }
}
