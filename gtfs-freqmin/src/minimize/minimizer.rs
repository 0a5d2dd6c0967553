use std::collections::HashSet;

use itertools::Itertools;
use kdam::tqdm;

use super::cover_ops::{self, CoverMode};
use super::pack_ops::{self, Pack};
use super::{equivalence_ops, rewrite_ops};
use super::{CoverModePolicy, EquivalenceClass, MinimizeError, MinimizeSummary};
use crate::model::Feed;

pub const DEFAULT_ID_SEPARATOR: &str = "_";

/// minimizes the trips, stop times and frequencies of a feed by replacing
/// groups of time-shifted trips with frequency-based trips.
#[derive(Clone, Debug)]
pub struct FrequencyMinimizer {
    cover_mode: CoverModePolicy,
    id_separator: String,
}

impl Default for FrequencyMinimizer {
    fn default() -> Self {
        Self::new(CoverModePolicy::default(), DEFAULT_ID_SEPARATOR)
    }
}

impl FrequencyMinimizer {
    pub fn new(cover_mode: CoverModePolicy, id_separator: &str) -> Self {
        Self {
            cover_mode,
            id_separator: id_separator.to_string(),
        }
    }

    /// visits every trip in id order. trips already absorbed into an earlier
    /// equivalence class are skipped. a class is only rewritten when its
    /// packing needs fewer trips than the class already has, so the trip
    /// count never grows and lone trips are never touched.
    pub fn run(&self, feed: &mut Feed) -> Result<MinimizeSummary, MinimizeError> {
        log::info!(
            "minimizing frequencies / stop times of {} trips",
            feed.trip_count()
        );
        let mut summary = MinimizeSummary::before(feed);
        let mut absorbed: HashSet<String> = HashSet::new();
        let trip_ids = feed.trips.keys().cloned().collect_vec();
        let n_trips = trip_ids.len();

        for trip_id in tqdm!(trip_ids.into_iter(), desc = "minimize frequencies", total = n_trips) {
            if absorbed.contains(&trip_id) {
                continue;
            }
            let class = match feed.get_trip(&trip_id) {
                None => continue,
                Some(seed) => {
                    let trips = feed.trips.values().collect_vec();
                    equivalence_ops::time_independent_equivalents(seed, &trips, &absorbed)
                }
            };
            let class_trips = class.trip_ids().len();
            absorbed.extend(class.trip_ids().into_iter().map(String::from));
            if class_trips < 2 {
                continue;
            }
            summary.classes_examined += 1;

            let packs = self.pack(&class);
            if packs.len() >= class_trips {
                log::debug!(
                    "trip '{trip_id}': {} packs for {class_trips} trips, leaving unchanged",
                    packs.len()
                );
                continue;
            }
            let outcome =
                rewrite_ops::rewrite_class(feed, &trip_id, &packs, &class, &self.id_separator)?;
            log::debug!(
                "trip '{trip_id}': {} departures of {} trips now served by {} trips",
                class.len(),
                class_trips,
                packs.len()
            );
            absorbed.extend(outcome.created.iter().cloned());
            summary.add_rewrite(&outcome);
        }
        eprintln!();

        let summary = summary.finish(feed);
        log::info!("finished minimizing frequencies: {summary}");
        Ok(summary)
    }

    /// packs the class with the configured cover modes. when both are
    /// evaluated the overlapping packing is used only if strictly smaller.
    pub fn pack(&self, class: &EquivalenceClass) -> Vec<Pack> {
        let pack_with = |mode: CoverMode| {
            let cover = cover_ops::get_cover(class, mode);
            pack_ops::pack_covers(&cover, class)
        };
        match self.cover_mode {
            CoverModePolicy::Disjoint => pack_with(CoverMode::Disjoint),
            CoverModePolicy::Overlapping => pack_with(CoverMode::Overlapping),
            CoverModePolicy::Best => {
                let disjoint = pack_with(CoverMode::Disjoint);
                let overlapping = pack_with(CoverMode::Overlapping);
                if disjoint.len() > overlapping.len() {
                    overlapping
                } else {
                    disjoint
                }
            }
        }
    }
}
