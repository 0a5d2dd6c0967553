mod feed;
mod model_error;
mod shape_point;
pub mod time_ops;
mod trip;

#[cfg(test)]
pub mod test_fixtures;

pub use feed::Feed;
pub use model_error::ModelError;
pub use shape_point::ShapePoint;
pub use trip::{Frequency, StopTime, Trip};
