use itertools::Itertools;

use super::pack_ops::Pack;
use super::{EquivalenceClass, MinimizeError};
use crate::model::Feed;

/// the trip records touched by a committed rewrite.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// trips of the class removed from the feed
    pub removed: Vec<String>,
    /// trips inserted for the second and later packs
    pub created: Vec<String>,
}

/// replaces the trips of `class` with one trip per pack.
///
/// the first pack reuses the seed trip record, later packs get a copy of the
/// seed stored under `{seed_id}{separator}{n}` with the first free `n`.
/// every other trip of the class is removed before new identifiers are
/// chosen. each trip's frequencies are rebuilt from its pack and its stop
/// times are moved to start at the pack's earliest departure.
pub fn rewrite_class(
    feed: &mut Feed,
    seed_id: &str,
    packs: &[Pack],
    class: &EquivalenceClass,
    separator: &str,
) -> Result<RewriteOutcome, MinimizeError> {
    let template = feed
        .get_trip(seed_id)
        .cloned()
        .ok_or_else(|| MinimizeError::MissingTrip(seed_id.to_string()))?;
    let reference_times = packs
        .iter()
        .map(|p| {
            p.reference_time(class)
                .ok_or_else(|| MinimizeError::EmptyClass(seed_id.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let removed = class
        .trip_ids()
        .into_iter()
        .filter(|id| *id != seed_id)
        .map(String::from)
        .collect_vec();
    for trip_id in removed.iter() {
        feed.remove_trip(trip_id);
    }

    let mut created = vec![];
    let mut suffix = 1;
    for (ordinal, (pack, reference_time)) in packs.iter().zip(reference_times).enumerate() {
        let mut trip = if ordinal == 0 {
            feed.remove_trip(seed_id)
                .ok_or_else(|| MinimizeError::MissingTrip(seed_id.to_string()))?
        } else {
            let (trip_id, used) = feed.fresh_trip_id(seed_id, separator, suffix);
            suffix = used;
            created.push(trip_id.clone());
            template.clone_with_id(trip_id)
        };
        suffix += 1;

        trip.frequencies = pack.frequencies(class);
        trip.shift_stop_times(reference_time);
        log::debug!(
            "trip '{}' now serves {} frequencies starting at {}",
            trip.id,
            trip.frequencies.len(),
            reference_time
        );
        feed.insert_trip(trip);
    }

    Ok(RewriteOutcome { removed, created })
}
