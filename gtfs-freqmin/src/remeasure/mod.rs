//! fills in the cumulative `shape_dist_traveled` of every shape point by
//! interpolating between, and extrapolating beyond, the points that already
//! carry a measurement.
mod shape_remeasure_ops;

pub use shape_remeasure_ops::{remeasure_feed, remeasure_shape, segment_length};
