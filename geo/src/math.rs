// Keep imports minimal; everything here is plain f64 trigonometry.

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_010.0;

/// A point on the sphere in decimal degrees.
///
/// Longitude is expected in `[-180, 180]` and latitude in `[-90, 90]`; this is not enforced.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

impl Location {
    #[must_use]
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }

    #[must_use]
    pub fn is_in_range(self) -> bool {
        (-180.0..=180.0).contains(&self.longitude) && (-90.0..=90.0).contains(&self.latitude)
    }
}

/// Range clamp that never panics: `min` wins when the bounds are inverted.
#[inline]
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(value.min(max))
}

/// Latitude change (degrees) for a signed northward displacement in meters.
#[inline]
#[must_use]
pub fn latitude_from_north_displacement(north_m: f64) -> f64 {
    north_m.atan2(EARTH_RADIUS_M).to_degrees()
}

/// Longitude change (degrees) for a signed eastward displacement in meters along the parallel at
/// `latitude_deg`.
///
/// The radius of the parallel vanishes at the poles; callers must not pass `±90`.
#[inline]
#[must_use]
pub fn longitude_from_east_displacement(latitude_deg: f64, east_m: f64) -> f64 {
    let radius_of_parallel = EARTH_RADIUS_M * latitude_deg.to_radians().cos();
    (east_m / radius_of_parallel).to_degrees()
}

/// Northward displacement in meters that produces a latitude change of `delta_lat_deg`.
#[inline]
#[must_use]
pub fn north_displacement_from_latitude(delta_lat_deg: f64) -> f64 {
    EARTH_RADIUS_M * delta_lat_deg.to_radians().tan()
}

/// Eastward displacement in meters along the parallel at `latitude_deg` that produces a
/// longitude change of `delta_lon_deg`. Same polar precondition as
/// [`longitude_from_east_displacement`].
#[inline]
#[must_use]
pub fn east_displacement_from_longitude(latitude_deg: f64, delta_lon_deg: f64) -> f64 {
    EARTH_RADIUS_M * latitude_deg.to_radians().cos() * delta_lon_deg.to_radians()
}

/// Move `from` by a local East/North displacement in meters.
///
/// Latitude is resolved first; the longitude change then uses the updated latitude to size the
/// parallel. Reordering these changes the result.
#[must_use]
pub fn apply_local_displacement(from: Location, east_m: f64, north_m: f64) -> Location {
    let latitude = from.latitude + latitude_from_north_displacement(north_m);
    let longitude = from.longitude + longitude_from_east_displacement(latitude, east_m);
    Location { longitude, latitude }
}

/// Local (east, north) displacement in meters that [`apply_local_displacement`] would need to
/// carry `from` onto `to`.
#[must_use]
pub fn local_displacement_between(from: Location, to: Location) -> (f64, f64) {
    let north_m = north_displacement_from_latitude(to.latitude - from.latitude);
    let east_m = east_displacement_from_longitude(to.latitude, to.longitude - from.longitude);
    (east_m, north_m)
}
