use std::collections::BTreeMap;

use gtfs_structures::Gtfs;
use itertools::Itertools;

use super::{ModelError, ShapePoint, Trip};

/// the mutable trip and shape registries of a GTFS feed. keys are kept in
/// sorted order so that every pass over the feed is deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Feed {
    pub trips: BTreeMap<String, Trip>,
    /// shape points by shape_id, in shape_pt_sequence order
    pub shapes: BTreeMap<String, Vec<ShapePoint>>,
}

impl Feed {
    /// reads a GTFS directory or zip archive.
    pub fn try_from_path(path: &str) -> Result<Feed, ModelError> {
        let gtfs = Gtfs::new(path)?;
        log::info!(
            "read {} trips and {} shapes from {path}",
            gtfs.trips.len(),
            gtfs.shapes.len()
        );
        Ok(Feed::from(gtfs))
    }

    pub fn insert_trip(&mut self, trip: Trip) -> Option<Trip> {
        self.trips.insert(trip.id.clone(), trip)
    }

    pub fn get_trip(&self, trip_id: &str) -> Option<&Trip> {
        self.trips.get(trip_id)
    }

    pub fn get_trip_mut(&mut self, trip_id: &str) -> Option<&mut Trip> {
        self.trips.get_mut(trip_id)
    }

    pub fn remove_trip(&mut self, trip_id: &str) -> Option<Trip> {
        self.trips.remove(trip_id)
    }

    pub fn contains_trip(&self, trip_id: &str) -> bool {
        self.trips.contains_key(trip_id)
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    pub fn frequency_count(&self) -> usize {
        self.trips.values().map(|t| t.frequencies.len()).sum()
    }

    pub fn stop_time_count(&self) -> usize {
        self.trips.values().map(|t| t.stop_times.len()).sum()
    }

    /// finds an unused trip identifier of the form `{base}{separator}{n}`,
    /// starting at `n = suffix` and counting upward past collisions. returns
    /// the identifier along with the suffix that produced it.
    pub fn fresh_trip_id(&self, base: &str, separator: &str, suffix: usize) -> (String, usize) {
        let mut n = suffix;
        loop {
            let candidate = format!("{base}{separator}{n}");
            if !self.contains_trip(&candidate) {
                return (candidate, n);
            }
            n += 1;
        }
    }
}

impl From<Gtfs> for Feed {
    fn from(gtfs: Gtfs) -> Self {
        let trips = gtfs
            .trips
            .values()
            .map(|t| (t.id.clone(), Trip::from(t)))
            .collect::<BTreeMap<_, _>>();
        let shapes = gtfs
            .shapes
            .iter()
            .map(|(shape_id, points)| {
                let sorted = points
                    .iter()
                    .sorted_by_key(|p| p.sequence)
                    .map(ShapePoint::from)
                    .collect_vec();
                (shape_id.clone(), sorted)
            })
            .collect::<BTreeMap<_, _>>();
        Feed { trips, shapes }
    }
}
