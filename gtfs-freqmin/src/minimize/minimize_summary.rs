use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::rewrite_ops::RewriteOutcome;
use crate::model::Feed;

/// counts reported by a [`super::FrequencyMinimizer`] run.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MinimizeSummary {
    pub trips_before: usize,
    pub trips_after: usize,
    pub frequencies_before: usize,
    pub frequencies_after: usize,
    pub stop_times_before: usize,
    pub stop_times_after: usize,
    /// equivalence classes with at least two departures
    pub classes_examined: usize,
    pub classes_rewritten: usize,
    pub trips_removed: usize,
    pub trips_created: usize,
}

impl MinimizeSummary {
    pub fn before(feed: &Feed) -> Self {
        Self {
            trips_before: feed.trip_count(),
            frequencies_before: feed.frequency_count(),
            stop_times_before: feed.stop_time_count(),
            ..Default::default()
        }
    }

    pub fn add_rewrite(&mut self, outcome: &RewriteOutcome) {
        self.classes_rewritten += 1;
        self.trips_removed += outcome.removed.len();
        self.trips_created += outcome.created.len();
    }

    pub fn finish(mut self, feed: &Feed) -> Self {
        self.trips_after = feed.trip_count();
        self.frequencies_after = feed.frequency_count();
        self.stop_times_after = feed.stop_time_count();
        self
    }
}

impl Display for MinimizeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "trips: {} -> {}, frequencies: {} -> {}, stop times: {} -> {}, classes rewritten: {}/{}",
            self.trips_before,
            self.trips_after,
            self.frequencies_before,
            self.frequencies_after,
            self.stop_times_before,
            self.stop_times_after,
            self.classes_rewritten,
            self.classes_examined
        )
    }
}
