//! serde rows of the files rewritten by the minimizer, in GTFS column order.
use gtfs_structures::{
    Availability, BikesAllowedType, ContinuousPickupDropOff, DirectionType, PickupDropOffType,
    TimepointType,
};
use serde::Serialize;

use crate::model::time_ops::format_gtfs_time;
use crate::model::{Frequency, ShapePoint, StopTime, Trip};

#[derive(Serialize)]
pub struct TripRow<'a> {
    pub route_id: &'a str,
    pub service_id: &'a str,
    pub trip_id: &'a str,
    pub trip_headsign: Option<&'a str>,
    pub trip_short_name: Option<&'a str>,
    pub direction_id: Option<DirectionType>,
    pub block_id: Option<&'a str>,
    pub shape_id: Option<&'a str>,
    pub wheelchair_accessible: Availability,
    pub bikes_allowed: BikesAllowedType,
}

impl<'a> From<&'a Trip> for TripRow<'a> {
    fn from(trip: &'a Trip) -> Self {
        TripRow {
            route_id: &trip.route_id,
            service_id: &trip.service_id,
            trip_id: &trip.id,
            trip_headsign: trip.trip_headsign.as_deref(),
            trip_short_name: trip.trip_short_name.as_deref(),
            direction_id: trip.direction_id,
            block_id: trip.block_id.as_deref(),
            shape_id: trip.shape_id.as_deref(),
            wheelchair_accessible: trip.wheelchair_accessible,
            bikes_allowed: trip.bikes_allowed,
        }
    }
}

#[derive(Serialize)]
pub struct StopTimeRow<'a> {
    pub trip_id: &'a str,
    pub arrival_time: Option<String>,
    pub departure_time: Option<String>,
    pub stop_id: &'a str,
    pub stop_sequence: u32,
    pub stop_headsign: Option<&'a str>,
    pub pickup_type: PickupDropOffType,
    pub drop_off_type: PickupDropOffType,
    pub continuous_pickup: ContinuousPickupDropOff,
    pub continuous_drop_off: ContinuousPickupDropOff,
    pub shape_dist_traveled: Option<f32>,
    pub timepoint: TimepointType,
}

impl<'a> StopTimeRow<'a> {
    pub fn new(trip_id: &'a str, stop_time: &'a StopTime) -> Self {
        StopTimeRow {
            trip_id,
            arrival_time: stop_time.arrival_time.map(format_gtfs_time),
            departure_time: stop_time.departure_time.map(format_gtfs_time),
            stop_id: &stop_time.stop_id,
            stop_sequence: stop_time.stop_sequence,
            stop_headsign: stop_time.stop_headsign.as_deref(),
            pickup_type: stop_time.pickup_type,
            drop_off_type: stop_time.drop_off_type,
            continuous_pickup: stop_time.continuous_pickup,
            continuous_drop_off: stop_time.continuous_drop_off,
            shape_dist_traveled: stop_time.shape_dist_traveled,
            timepoint: stop_time.timepoint,
        }
    }
}

#[derive(Serialize)]
pub struct FrequencyRow<'a> {
    pub trip_id: &'a str,
    pub start_time: String,
    pub end_time: String,
    pub headway_secs: u32,
    pub exact_times: u8,
}

impl<'a> FrequencyRow<'a> {
    pub fn new(trip_id: &'a str, frequency: &Frequency) -> Self {
        FrequencyRow {
            trip_id,
            start_time: format_gtfs_time(frequency.start_time),
            end_time: format_gtfs_time(frequency.end_time),
            headway_secs: frequency.headway_secs,
            exact_times: u8::from(frequency.exact_times),
        }
    }
}

#[derive(Serialize)]
pub struct ShapeRow<'a> {
    pub shape_id: &'a str,
    pub shape_pt_lat: f64,
    pub shape_pt_lon: f64,
    pub shape_pt_sequence: usize,
    pub shape_dist_traveled: Option<f32>,
}

impl<'a> ShapeRow<'a> {
    pub fn new(shape_id: &'a str, point: &ShapePoint) -> Self {
        ShapeRow {
            shape_id,
            shape_pt_lat: point.latitude,
            shape_pt_lon: point.longitude,
            shape_pt_sequence: point.sequence,
            shape_dist_traveled: point.dist_traveled,
        }
    }
}
