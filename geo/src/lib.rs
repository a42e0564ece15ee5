#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]

mod math;
#[cfg(test)]
mod tests;

pub use math::{
    apply_local_displacement, clamp, east_displacement_from_longitude,
    latitude_from_north_displacement, local_displacement_between,
    longitude_from_east_displacement, north_displacement_from_latitude, Location,
    EARTH_RADIUS_M,
};

/// Track length in meters, summed over the local planar hops between consecutive points.
///
/// Each hop uses [`local_displacement_between`], so it matches the projection used to build the
/// path rather than a true geodesic.
#[must_use]
pub fn planar_path_length_m(path: &[Location]) -> f64 {
    path.windows(2)
        .map(|w| {
            let (e, n) = local_displacement_between(w[0], w[1]);
            e.hypot(n)
        })
        .sum()
}
