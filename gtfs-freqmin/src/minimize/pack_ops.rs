use super::cover_ops::{FrequencyCandidate, ProgressionCover};
use super::EquivalenceClass;
use crate::model::Frequency;

/// progressions with pairwise disjoint time spans, served by a single trip.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pack {
    pub progressions: Vec<FrequencyCandidate>,
}

impl Pack {
    fn new(candidate: FrequencyCandidate) -> Self {
        Self {
            progressions: vec![candidate],
        }
    }

    /// true if the span of `candidate` intersects the span of any progression
    /// in this pack. spans are closed, so touching endpoints overlap.
    pub fn overlaps(&self, candidate: &FrequencyCandidate, class: &EquivalenceClass) -> bool {
        let (start, end) = candidate.span(class);
        self.progressions.iter().any(|p| {
            let (p_start, p_end) = p.span(class);
            !(p_start > end || p_end < start)
        })
    }

    /// earliest departure over every progression of the pack
    pub fn reference_time(&self, class: &EquivalenceClass) -> Option<u32> {
        self.progressions
            .iter()
            .map(|p| class.start_time(p.first()))
            .min()
    }

    /// one frequency per multi-departure progression. exact_times is taken
    /// from the frequency the first departure was expanded from, and defaults
    /// to exact for plain trips. single departures are served by the trip's
    /// own stop times and produce no frequency.
    pub fn frequencies(&self, class: &EquivalenceClass) -> Vec<Frequency> {
        self.progressions
            .iter()
            .filter(|p| !p.is_singleton())
            .map(|p| {
                let first = &class.instances()[p.first()];
                let exact_times = first.source.map(|s| s.exact_times).unwrap_or(true);
                let end_time = class.start_time(p.last()) + p.headway;
                Frequency::new(first.start_time, end_time, p.headway, exact_times)
            })
            .collect()
    }
}

/// first-fit packing of the cover's progressions into as few packs as the
/// heuristic finds. multi-departure progressions are packed in cover order;
/// every single-departure progression then gets a pack of its own.
pub fn pack_covers(cover: &ProgressionCover, class: &EquivalenceClass) -> Vec<Pack> {
    let mut packs: Vec<Pack> = vec![];
    let mut singletons: Vec<Pack> = vec![];

    for candidate in cover.progressions.iter() {
        if candidate.is_singleton() {
            singletons.push(Pack::new(candidate.clone()));
            continue;
        }
        match packs.iter_mut().find(|p| !p.overlaps(candidate, class)) {
            Some(pack) => pack.progressions.push(candidate.clone()),
            None => packs.push(Pack::new(candidate.clone())),
        }
    }

    packs.extend(singletons);
    packs
}
