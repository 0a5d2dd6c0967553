//! frequency minimization: finds trips that are identical apart from their
//! absolute departure time and replaces each such group with the fewest
//! trips whose frequencies reproduce every original departure.
//!
//! cover search is a modified version of the approximation algorithm for
//! frequency covers in Bast & Storandt, "Frequency Data Compression for
//! Public Transportation Network Algorithms" (SIGSPATIAL 2014).
pub mod cover_ops;
mod cover_mode_policy;
mod equivalence_class;
pub mod equivalence_ops;
mod minimize_error;
mod minimize_summary;
mod minimizer;
pub mod pack_ops;
pub mod rewrite_ops;
mod trip_instance;

pub use cover_mode_policy::CoverModePolicy;
pub use equivalence_class::EquivalenceClass;
pub use minimize_error::MinimizeError;
pub use minimize_summary::MinimizeSummary;
pub use minimizer::{FrequencyMinimizer, DEFAULT_ID_SEPARATOR};
pub use trip_instance::{FrequencySource, TripInstance};
