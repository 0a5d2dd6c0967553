use std::collections::BTreeSet;

use super::TripInstance;

/// the departures of all trips that are equal to a seed trip apart from
/// absolute time. instances are sorted by start time on construction, which
/// every index-based operation on the class relies on.
#[derive(Clone, Debug, Default)]
pub struct EquivalenceClass {
    instances: Vec<TripInstance>,
}

impl EquivalenceClass {
    pub fn new(mut instances: Vec<TripInstance>) -> Self {
        instances.sort_by(|a, b| {
            a.start_time
                .cmp(&b.start_time)
                .then_with(|| a.trip_id.cmp(&b.trip_id))
                .then_with(|| a.source.map(|s| s.index).cmp(&b.source.map(|s| s.index)))
        });
        Self { instances }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[TripInstance] {
        &self.instances
    }

    pub fn start_time(&self, index: usize) -> u32 {
        self.instances[index].start_time
    }

    /// distinct trip records contributing to this class
    pub fn trip_ids(&self) -> BTreeSet<&str> {
        self.instances.iter().map(|i| i.trip_id.as_str()).collect()
    }
}
