use gtfs_structures::Shape;

/// a single row of shapes.txt, detached from its shape id which is the key
/// of the owning collection.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapePoint {
    pub latitude: f64,
    pub longitude: f64,
    pub sequence: usize,
    /// cumulative distance along the shape, if measured
    pub dist_traveled: Option<f32>,
}

impl ShapePoint {
    pub fn new(latitude: f64, longitude: f64, sequence: usize, dist_traveled: Option<f32>) -> Self {
        Self {
            latitude,
            longitude,
            sequence,
            dist_traveled,
        }
    }
}

impl From<&Shape> for ShapePoint {
    fn from(shape: &Shape) -> Self {
        ShapePoint::new(
            shape.latitude,
            shape.longitude,
            shape.sequence,
            shape.dist_traveled,
        )
    }
}
