use geo::{line_string, Haversine, Length, LineString, Point};
use itertools::Itertools;
use rayon::prelude::*;

use crate::model::{Feed, ShapePoint};

/// haversine length in meters between two shape points.
pub fn segment_length(src: &ShapePoint, dst: &ShapePoint) -> f64 {
    let src_point = Point::new(src.longitude, src.latitude);
    let dst_point = Point::new(dst.longitude, dst.latitude);
    let line: LineString<f64> = line_string![src_point.0, dst_point.0];
    Haversine.length(&line)
}

/// remeasures every shape of the feed in parallel. returns the number of
/// shapes visited.
pub fn remeasure_feed(feed: &mut Feed) -> usize {
    log::info!("remeasuring {} shapes", feed.shapes.len());
    let cleared = feed
        .shapes
        .par_iter_mut()
        .map(|(shape_id, points)| {
            let measured = remeasure_shape(points);
            if !measured {
                log::debug!("shape '{shape_id}' has fewer than two measured points, cleared");
            }
            measured
        })
        .filter(|measured| !measured)
        .count();
    if cleared > 0 {
        log::info!("cleared the distances of {cleared} unmeasurable shapes");
    }
    feed.shapes.len()
}

/// populates `dist_traveled` of every point in place. returns false if the
/// shape had fewer than two measured points, in which case every distance
/// is cleared.
pub fn remeasure_shape(points: &mut [ShapePoint]) -> bool {
    let measured = points
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.dist_traveled.map(|_| i))
        .collect_vec();
    if measured.len() < 2 {
        points.iter_mut().for_each(|p| p.dist_traveled = None);
        return false;
    }

    // cumulative path length at every point
    let mut offsets = Vec::with_capacity(points.len());
    let mut total = 0.0;
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            total += segment_length(&points[i - 1], point);
        }
        offsets.push(total);
    }

    let known = points
        .iter()
        .map(|p| p.dist_traveled.map(f64::from).unwrap_or_default())
        .collect_vec();
    let rate = |a: usize, b: usize| {
        let length = offsets[b] - offsets[a];
        (length > 0.0).then(|| (known[b] - known[a]) / length)
    };

    for (&a, &b) in measured.iter().tuple_windows() {
        let segment_rate = rate(a, b);
        for i in a + 1..b {
            let along = offsets[i] - offsets[a];
            let dist = known[a] + segment_rate.map(|r| along * r).unwrap_or_default();
            points[i].dist_traveled = Some(dist as f32);
        }
    }

    let first = measured[0];
    let first_rate = rate(first, measured[1]).unwrap_or_default();
    for i in 0..first {
        let back = (offsets[first] - offsets[i]) * first_rate;
        points[i].dist_traveled = Some((known[first] - back).max(0.0) as f32);
    }

    let last = measured[measured.len() - 1];
    let last_rate = rate(measured[measured.len() - 2], last).unwrap_or_default();
    for i in last + 1..points.len() {
        let forward = (offsets[i] - offsets[last]) * last_rate;
        points[i].dist_traveled = Some((known[last] + forward) as f32);
    }

    true
}
