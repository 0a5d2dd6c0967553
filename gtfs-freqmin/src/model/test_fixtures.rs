//! in-memory trip builders shared by unit tests.
use super::{Feed, Frequency, StopTime, Trip};
use gtfs_structures::{
    Availability, BikesAllowedType, ContinuousPickupDropOff, DirectionType, PickupDropOffType,
    TimepointType,
};

pub fn hms(hours: u32, minutes: u32, seconds: u32) -> u32 {
    hours * 3600 + minutes * 60 + seconds
}

/// a stop visit with the given arrival offset and dwell, relative to `start`.
pub fn mock_stop_time(
    stop_id: &str,
    stop_sequence: u32,
    start: u32,
    offset: u32,
    dwell: u32,
) -> StopTime {
    StopTime {
        stop_id: String::from(stop_id),
        stop_sequence,
        arrival_time: Some(start + offset),
        departure_time: Some(start + offset + dwell),
        stop_headsign: None,
        pickup_type: PickupDropOffType::Regular,
        drop_off_type: PickupDropOffType::Regular,
        continuous_pickup: ContinuousPickupDropOff::NotAvailable,
        continuous_drop_off: ContinuousPickupDropOff::NotAvailable,
        shape_dist_traveled: Some(stop_sequence as f32 * 250.0),
        timepoint: TimepointType::Exact,
    }
}

/// a three-stop trip on route "r1" / service "weekday" / shape "s1" leaving
/// its first stop at `start`.
pub fn mock_trip(id: &str, start: u32) -> Trip {
    Trip {
        id: String::from(id),
        route_id: String::from("r1"),
        service_id: String::from("weekday"),
        trip_headsign: Some(String::from("Downtown")),
        trip_short_name: None,
        direction_id: Some(DirectionType::Outbound),
        block_id: None,
        shape_id: Some(String::from("s1")),
        wheelchair_accessible: Availability::InformationNotAvailable,
        bikes_allowed: BikesAllowedType::NoBikeInfo,
        stop_times: vec![
            mock_stop_time("stop_a", 1, start, 0, 0),
            mock_stop_time("stop_b", 2, start, 240, 30),
            mock_stop_time("stop_c", 3, start, 600, 0),
        ],
        frequencies: vec![],
    }
}

/// a [`mock_trip`] that additionally runs on the given frequencies.
pub fn mock_frequency_trip(id: &str, frequencies: Vec<Frequency>) -> Trip {
    let start = frequencies.first().map(|f| f.start_time).unwrap_or_default();
    let mut trip = mock_trip(id, start);
    trip.frequencies = frequencies;
    trip
}

pub fn mock_feed(trips: Vec<Trip>) -> Feed {
    let mut feed = Feed::default();
    for trip in trips {
        feed.insert_trip(trip);
    }
    feed
}

/// every absolute departure instant the feed serves for trips on route "r1",
/// sorted. trips without frequencies contribute their own start time.
pub fn departures(feed: &Feed) -> Vec<u32> {
    let mut result = feed
        .trips
        .values()
        .filter(|t| t.route_id == "r1")
        .flat_map(|t| {
            if t.frequencies.is_empty() {
                t.start_time().into_iter().collect::<Vec<_>>()
            } else {
                t.frequencies.iter().flat_map(|f| f.departures()).collect()
            }
        })
        .collect::<Vec<_>>();
    result.sort_unstable();
    result
}
