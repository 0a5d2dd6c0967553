use gtfs_structures::{
    Availability, BikesAllowedType, ContinuousPickupDropOff, DirectionType, ExactTimes,
    PickupDropOffType, TimepointType,
};
use itertools::Itertools;

/// a GTFS trip along with its stop times and frequencies.
#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    /// GTFS trip identifier, unique within a [`super::Feed`]
    pub id: String,
    pub route_id: String,
    pub service_id: String,
    pub trip_headsign: Option<String>,
    pub trip_short_name: Option<String>,
    pub direction_id: Option<DirectionType>,
    pub block_id: Option<String>,
    pub shape_id: Option<String>,
    pub wheelchair_accessible: Availability,
    pub bikes_allowed: BikesAllowedType,
    /// stop visits in stop_sequence order
    pub stop_times: Vec<StopTime>,
    pub frequencies: Vec<Frequency>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StopTime {
    pub stop_id: String,
    pub stop_sequence: u32,
    pub arrival_time: Option<u32>,
    pub departure_time: Option<u32>,
    pub stop_headsign: Option<String>,
    pub pickup_type: PickupDropOffType,
    pub drop_off_type: PickupDropOffType,
    pub continuous_pickup: ContinuousPickupDropOff,
    pub continuous_drop_off: ContinuousPickupDropOff,
    pub shape_dist_traveled: Option<f32>,
    pub timepoint: TimepointType,
}

/// a row of frequencies.txt. the trip runs at `start_time`, then every
/// `headway_secs` while strictly before `end_time`.
#[derive(Clone, Debug, PartialEq)]
pub struct Frequency {
    pub start_time: u32,
    pub end_time: u32,
    pub headway_secs: u32,
    /// true for schedule-based service (exact_times=1)
    pub exact_times: bool,
}

impl Frequency {
    pub fn new(start_time: u32, end_time: u32, headway_secs: u32, exact_times: bool) -> Self {
        Self {
            start_time,
            end_time,
            headway_secs,
            exact_times,
        }
    }

    /// the absolute departure instants implied by this frequency. a zero
    /// headway is malformed GTFS and only yields the start time.
    pub fn departures(&self) -> Vec<u32> {
        if self.headway_secs == 0 {
            return if self.start_time < self.end_time {
                vec![self.start_time]
            } else {
                vec![]
            };
        }
        (self.start_time..self.end_time)
            .step_by(self.headway_secs as usize)
            .collect_vec()
    }
}

impl Trip {
    /// time the trip leaves its first stop, taken from the arrival time and
    /// falling back to the departure time.
    pub fn start_time(&self) -> Option<u32> {
        self.stop_times
            .first()
            .and_then(|st| st.arrival_time.or(st.departure_time))
    }

    /// a copy of this trip's structural attributes and stop time template
    /// under a new identifier, without any frequencies.
    pub fn clone_with_id(&self, id: String) -> Trip {
        Trip {
            id,
            frequencies: vec![],
            ..self.clone()
        }
    }

    /// moves every stop time so that the trip starts at `start_time`. dwell
    /// times and inter-stop deltas are unchanged; missing times stay missing.
    pub fn shift_stop_times(&mut self, start_time: u32) {
        let Some(current) = self.start_time() else {
            return;
        };
        let offset = i64::from(start_time) - i64::from(current);
        let shift = |t: u32| (i64::from(t) + offset).max(0) as u32;
        for st in self.stop_times.iter_mut() {
            st.arrival_time = st.arrival_time.map(shift);
            st.departure_time = st.departure_time.map(shift);
        }
    }
}

impl From<&gtfs_structures::StopTime> for StopTime {
    fn from(st: &gtfs_structures::StopTime) -> Self {
        StopTime {
            stop_id: st.stop.id.clone(),
            stop_sequence: st.stop_sequence,
            arrival_time: st.arrival_time,
            departure_time: st.departure_time,
            stop_headsign: st.stop_headsign.clone(),
            pickup_type: st.pickup_type,
            drop_off_type: st.drop_off_type,
            continuous_pickup: st.continuous_pickup,
            continuous_drop_off: st.continuous_drop_off,
            shape_dist_traveled: st.shape_dist_traveled,
            timepoint: st.timepoint,
        }
    }
}

impl From<&gtfs_structures::Frequency> for Frequency {
    fn from(f: &gtfs_structures::Frequency) -> Self {
        Frequency::new(
            f.start_time,
            f.end_time,
            f.headway_secs,
            matches!(f.exact_times, Some(ExactTimes::ScheduleBased)),
        )
    }
}

impl From<&gtfs_structures::Trip> for Trip {
    fn from(trip: &gtfs_structures::Trip) -> Self {
        let stop_times = trip
            .stop_times
            .iter()
            .sorted_by_key(|st| st.stop_sequence)
            .map(StopTime::from)
            .collect_vec();
        Trip {
            id: trip.id.clone(),
            route_id: trip.route_id.clone(),
            service_id: trip.service_id.clone(),
            trip_headsign: trip.trip_headsign.clone(),
            trip_short_name: trip.trip_short_name.clone(),
            direction_id: trip.direction_id,
            block_id: trip.block_id.clone(),
            shape_id: trip.shape_id.clone(),
            wheelchair_accessible: trip.wheelchair_accessible,
            bikes_allowed: trip.bikes_allowed,
            stop_times,
            frequencies: trip.frequencies.iter().map(Frequency::from).collect_vec(),
        }
    }
}
