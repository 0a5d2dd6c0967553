use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// which cover search variants are evaluated for each equivalence class.
#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CoverModePolicy {
    /// progressions never step over an already covered departure
    Disjoint,
    /// progressions may step over covered departures and unrelated ones
    Overlapping,
    /// run both searches and keep the packing with fewer trips
    #[default]
    Best,
}
