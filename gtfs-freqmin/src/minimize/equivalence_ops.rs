use std::collections::HashSet;

use itertools::Itertools;
use rayon::prelude::*;

use super::{EquivalenceClass, FrequencySource, TripInstance};
use crate::model::{StopTime, Trip};

/// shape_dist_traveled values closer than this are considered equal
pub const DISTANCE_TOLERANCE: f32 = 0.01;

/// collects the departures of every trip that is equal to `seed` apart from
/// absolute stop times. trips in `absorbed` are skipped. the seed is always
/// part of its own class, unless it has no start time at all.
///
/// the trip collection is split into one contiguous chunk per worker thread of
/// the current rayon pool. each chunk is scanned independently and the
/// per-chunk results are merged once every worker has finished.
pub fn time_independent_equivalents(
    seed: &Trip,
    trips: &[&Trip],
    absorbed: &HashSet<String>,
) -> EquivalenceClass {
    if seed.start_time().is_none() {
        log::debug!("trip '{}' has no start time, skipping", seed.id);
        return EquivalenceClass::default();
    }
    let chunks = rayon::current_num_threads().max(1);
    let chunk_size = trips.len().div_ceil(chunks).max(1);
    let shards: Vec<Vec<TripInstance>> = trips
        .par_chunks(chunk_size)
        .map(|chunk| {
            chunk
                .iter()
                .filter(|t| !absorbed.contains(&t.id))
                .filter(|t| t.id == seed.id || is_time_independent_equal(t, seed))
                .flat_map(|t| expand_instances(t))
                .collect_vec()
        })
        .collect();
    EquivalenceClass::new(shards.into_iter().flatten().collect_vec())
}

/// the departures a single trip contributes. a trip without frequencies
/// departs once at its start time, otherwise once per frequency instant.
pub fn expand_instances(trip: &Trip) -> Vec<TripInstance> {
    if trip.frequencies.is_empty() {
        return trip
            .start_time()
            .map(|t| TripInstance::new(&trip.id, t, None))
            .into_iter()
            .collect_vec();
    }
    trip.frequencies
        .iter()
        .enumerate()
        .flat_map(|(index, f)| {
            let source = FrequencySource {
                index,
                exact_times: f.exact_times,
            };
            f.departures()
                .into_iter()
                .map(move |t| TripInstance::new(&trip.id, t, Some(source)))
        })
        .collect_vec()
}

/// true if both trips share every structural attribute and have the same
/// stop time pattern, ignoring where that pattern sits in the day.
pub fn is_time_independent_equal(a: &Trip, b: &Trip) -> bool {
    a.route_id == b.route_id
        && a.service_id == b.service_id
        && a.trip_headsign == b.trip_headsign
        && a.trip_short_name == b.trip_short_name
        && a.direction_id == b.direction_id
        && a.block_id == b.block_id
        && a.shape_id == b.shape_id
        && a.wheelchair_accessible == b.wheelchair_accessible
        && a.bikes_allowed == b.bikes_allowed
        && has_same_relative_stop_times(&a.stop_times, &b.stop_times)
}

/// true if both sequences visit the same stops in the same order with the
/// same stop attributes, the same dwell at every stop and the same arrival
/// and departure deltas between consecutive stops. any missing time makes
/// the sequences unequal.
pub fn has_same_relative_stop_times(a: &[StopTime], b: &[StopTime]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let (Some(a_times), Some(b_times)) = (absolute_times(a), absolute_times(b)) else {
        return false;
    };
    let same_attributes = a.iter().zip(b.iter()).all(|(x, y)| {
        x.stop_id == y.stop_id
            && x.stop_headsign == y.stop_headsign
            && x.pickup_type == y.pickup_type
            && x.drop_off_type == y.drop_off_type
            && x.continuous_pickup == y.continuous_pickup
            && x.continuous_drop_off == y.continuous_drop_off
            && x.timepoint == y.timepoint
            && distance_equals(x.shape_dist_traveled, y.shape_dist_traveled)
    });
    if !same_attributes {
        return false;
    }
    let same_dwell = a_times
        .iter()
        .zip(b_times.iter())
        .all(|((a_arr, a_dep), (b_arr, b_dep))| a_dep - a_arr == b_dep - b_arr);
    let same_deltas = a_times
        .iter()
        .tuple_windows()
        .zip(b_times.iter().tuple_windows())
        .all(|(((a0_arr, a0_dep), (a1_arr, a1_dep)), ((b0_arr, b0_dep), (b1_arr, b1_dep)))| {
            a1_arr - a0_arr == b1_arr - b0_arr && a1_dep - a0_dep == b1_dep - b0_dep
        });
    same_dwell && same_deltas
}

/// (arrival, departure) pairs as signed seconds, or None if any is missing
fn absolute_times(stop_times: &[StopTime]) -> Option<Vec<(i64, i64)>> {
    stop_times
        .iter()
        .map(|st| match (st.arrival_time, st.departure_time) {
            (Some(arr), Some(dep)) => Some((i64::from(arr), i64::from(dep))),
            _ => None,
        })
        .collect()
}

fn distance_equals(a: Option<f32>, b: Option<f32>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => (x - y).abs() < DISTANCE_TOLERANCE,
        _ => false,
    }
}
