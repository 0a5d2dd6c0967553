use std::collections::BTreeSet;

use super::EquivalenceClass;

/// search variant for [`get_cover`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoverMode {
    /// a progression stops growing at the first covered or off-pattern departure
    Disjoint,
    /// a progression steps over covered and off-pattern departures
    Overlapping,
}

/// an arithmetic progression of departures within an equivalence class,
/// stored as class indices in ascending time order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyCandidate {
    pub matches: Vec<usize>,
    /// zero for single-departure candidates
    pub headway: u32,
}

impl FrequencyCandidate {
    fn singleton(index: usize) -> Self {
        Self {
            matches: vec![index],
            headway: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.matches.len() == 1
    }

    pub fn first(&self) -> usize {
        self.matches[0]
    }

    pub fn last(&self) -> usize {
        self.matches[self.matches.len() - 1]
    }

    /// time span (first departure, last departure) of this candidate
    pub fn span(&self, class: &EquivalenceClass) -> (u32, u32) {
        (class.start_time(self.first()), class.start_time(self.last()))
    }
}

/// a set of progressions along with the class indices they cover.
#[derive(Clone, Debug, Default)]
pub struct ProgressionCover {
    pub progressions: Vec<FrequencyCandidate>,
    pub covered: BTreeSet<usize>,
}

/// every distinct positive gap between two departures of the class, in
/// ascending order.
pub fn candidate_headways(class: &EquivalenceClass) -> BTreeSet<u32> {
    let instances = class.instances();
    let mut result = BTreeSet::new();
    for (i, a) in instances.iter().enumerate() {
        for b in instances[i + 1..].iter() {
            let gap = b.start_time - a.start_time;
            if gap != 0 {
                result.insert(gap);
            }
        }
    }
    result
}

/// greedy approximation of a minimum progression cover of the class.
///
/// the first uncovered departure is extended into the longest progression
/// over all candidate headways. that progression is only accepted once it is
/// at least as long as a threshold which falls from the class size down to
/// one, and the threshold pass restarts until every departure is covered.
/// ties between headways go to the smallest headway.
pub fn get_cover(class: &EquivalenceClass, mode: CoverMode) -> ProgressionCover {
    let n = class.len();
    let headways = candidate_headways(class);
    let mut marked = vec![false; n];
    let mut cover = ProgressionCover::default();

    // the best progression from the first unmarked departure only depends on
    // the marks, so it is kept until an acceptance changes them.
    let mut pending: Option<FrequencyCandidate> = None;

    while marked.iter().any(|m| !m) {
        for min_size in (1..=n).rev() {
            let Some(start) = marked.iter().position(|m| !m) else {
                break;
            };
            let candidate = match pending.take() {
                Some(c) => c,
                None => longest_progression(class, &marked, &headways, start, mode),
            };
            if candidate.len() >= min_size {
                for &index in candidate.matches.iter() {
                    marked[index] = true;
                    cover.covered.insert(index);
                }
                cover.progressions.push(candidate);
            } else {
                pending = Some(candidate);
            }
        }
    }
    cover
}

/// longest progression starting at `start` over all `headways`. the first
/// headway reaching a length wins; a single departure is returned when no
/// headway extends it.
fn longest_progression(
    class: &EquivalenceClass,
    marked: &[bool],
    headways: &BTreeSet<u32>,
    start: usize,
    mode: CoverMode,
) -> FrequencyCandidate {
    let mut best = FrequencyCandidate::singleton(start);
    for &headway in headways.iter() {
        let next = grow_progression(class, marked, start, headway, mode);
        if next.len() > best.len() {
            best = next;
        }
    }
    best
}

fn grow_progression(
    class: &EquivalenceClass,
    marked: &[bool],
    start: usize,
    headway: u32,
    mode: CoverMode,
) -> FrequencyCandidate {
    let instances = class.instances();
    let origin = &instances[start];
    let mut result = FrequencyCandidate::singleton(start);
    for (j, instance) in instances.iter().enumerate().skip(start + 1) {
        if marked[j] {
            match mode {
                CoverMode::Overlapping => continue,
                CoverMode::Disjoint => break,
            }
        }
        let expected = u64::from(origin.start_time) + result.len() as u64 * u64::from(headway);
        let time = u64::from(instance.start_time);
        if time == expected && origin.exact_times_compatible(instance) {
            result.matches.push(j);
            result.headway = headway;
        } else if mode == CoverMode::Disjoint || time > expected {
            // departures are sorted, nothing later can match
            break;
        }
    }
    result
}
