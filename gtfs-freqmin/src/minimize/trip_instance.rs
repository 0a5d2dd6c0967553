/// back-reference from an expanded departure to the frequency entry it came
/// from, by position within the owning trip's frequency list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrequencySource {
    pub index: usize,
    pub exact_times: bool,
}

/// one concrete departure contributed by a trip, either its own start time
/// or one instant expanded from one of its frequencies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TripInstance {
    pub trip_id: String,
    pub start_time: u32,
    pub source: Option<FrequencySource>,
}

impl TripInstance {
    pub fn new(trip_id: &str, start_time: u32, source: Option<FrequencySource>) -> Self {
        Self {
            trip_id: trip_id.to_string(),
            start_time,
            source,
        }
    }

    /// true if both departures may be served by one frequency without
    /// changing exact_times semantics. a plain trip only joins exact
    /// (schedule-based) frequencies.
    pub fn exact_times_compatible(&self, other: &TripInstance) -> bool {
        match (&self.source, &other.source) {
            (None, None) => true,
            (None, Some(f)) | (Some(f), None) => f.exact_times,
            (Some(a), Some(b)) => a.exact_times == b.exact_times,
        }
    }
}
