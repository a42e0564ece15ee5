//! Scattered-data linear interpolation of East/North rates.
//!
//! Stations are triangulated once (Delaunay) in lon/lat degree space; queries are clamped into
//! the configured region and evaluated barycentrically on the containing triangle.

use std::collections::BTreeSet;

use spade::{DelaunayTriangulation, FloatTriangulation, HasPosition, Point2, Triangulation};

use crate::config::Range;
use crate::error::EngineError;
use crate::observations::VelocitySample;

#[derive(Clone, Copy, Debug)]
struct Station {
    position: Point2<f64>,
    east: f64,
    north: f64,
}

impl HasPosition for Station {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        self.position
    }
}

/// Piecewise-linear interpolant over the non-excluded observations.
pub struct LinearInterpolant {
    triangulation: DelaunayTriangulation<Station>,
    longitude_range: Range,
    latitude_range: Range,
}

impl LinearInterpolant {
    /// Triangulate every sample whose index is not in `excluded`.
    ///
    /// Stations sharing a position collapse to one vertex carrying the later sample's rates.
    pub fn build(
        samples: &[VelocitySample],
        excluded: &BTreeSet<usize>,
        longitude_range: Range,
        latitude_range: Range,
    ) -> Result<Self, EngineError> {
        let mut triangulation = DelaunayTriangulation::<Station>::new();
        for (i, s) in samples.iter().enumerate() {
            if excluded.contains(&i) {
                continue;
            }
            let station = Station {
                position: Point2::new(s.longitude, s.latitude),
                east: s.east_rate,
                north: s.north_rate,
            };
            triangulation.insert(station).map_err(|e| {
                EngineError::Config(format!("cannot triangulate observation {i}: {e:?}"))
            })?;
        }
        tracing::debug!(
            vertices = triangulation.num_vertices(),
            faces = triangulation.num_inner_faces(),
            "built velocity interpolant"
        );
        Ok(Self { triangulation, longitude_range, latitude_range })
    }

    /// Number of distinct stations in the triangulation.
    pub fn station_count(&self) -> usize {
        self.triangulation.num_vertices()
    }

    /// Clamp a query into the sampling region, reporting when either axis was moved.
    pub fn clamp_query(&self, longitude: f64, latitude: f64) -> (f64, f64) {
        let (xr, yr) = (self.longitude_range, self.latitude_range);
        let mut lon = longitude;
        let mut lat = latitude;
        if !xr.contains(lon) {
            lon = track_geo::clamp(lon, xr.min, xr.max);
            tracing::debug!(longitude, clamped = lon, "longitude out of range, clamping");
        }
        if !yr.contains(lat) {
            lat = track_geo::clamp(lat, yr.min, yr.max);
            tracing::debug!(latitude, clamped = lat, "latitude out of range, clamping");
        }
        (lon, lat)
    }

    /// Interpolated rates at the clamped query point; `None` outside the convex hull.
    pub fn sample(&self, longitude: f64, latitude: f64) -> Option<VelocitySample> {
        let (lon, lat) = self.clamp_query(longitude, latitude);
        let p = Point2::new(lon, lat);
        let bary = self.triangulation.barycentric();
        let east = bary.interpolate(|v| v.data().east, p)?;
        let north = bary.interpolate(|v| v.data().north, p)?;
        Some(VelocitySample::new(lon, lat, east, north))
    }
}
