//! Minimal units-of-measure newtypes to make times and rates explicit.
//! Conversions are explicit; mixing units requires an intentional conversion.

use std::ops::{Add, Mul, Neg};

/// Time in years (signed; negative is before present).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Years(pub f64);

/// Time in million years (Myr).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Myr(pub f64);

/// Speed in meters per year (m/yr).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct MetersPerYear(pub f64);

/// Speed in millimeters per year (mm/yr), the usual unit of GPS velocity tables.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct MillimetersPerYear(pub f64);

impl Years {
    /// Extract the raw numeric value in years.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Myr {
    /// Extract the raw numeric value in Myr.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl MetersPerYear {
    /// Extract the raw numeric value in m/yr.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl MillimetersPerYear {
    /// Extract the raw numeric value in mm/yr.
    pub fn value(self) -> f64 {
        self.0
    }
}

// Explicit conversions
impl From<Myr> for Years {
    fn from(t: Myr) -> Self {
        Years(t.0 * 1.0e6)
    }
}

impl From<Years> for Myr {
    fn from(t: Years) -> Self {
        Myr(t.0 / 1.0e6)
    }
}

impl From<MillimetersPerYear> for MetersPerYear {
    fn from(v: MillimetersPerYear) -> Self {
        MetersPerYear(v.0 / 1000.0)
    }
}

/// Shorthand constructor for years.
pub fn years(v: f64) -> Years {
    Years(v)
}
/// Shorthand constructor for Myr.
pub fn myr(v: f64) -> Myr {
    Myr(v)
}
/// Shorthand constructor for mm/yr.
pub fn mm_per_yr(v: f64) -> MillimetersPerYear {
    MillimetersPerYear(v)
}

/// Local horizontal vector split into east and north components.
///
/// Used for rates (m/yr) and for displacements (m); the unit follows from context.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EnVector {
    /// East component (positive east).
    pub east: f64,
    /// North component (positive north).
    pub north: f64,
}

impl EnVector {
    /// The zero vector.
    pub const ZERO: Self = Self { east: 0.0, north: 0.0 };

    /// Construct from components.
    pub fn new(east: f64, north: f64) -> Self {
        Self { east, north }
    }

    /// Vector of magnitude `speed` pointing along azimuth `bearing_deg` (0° = north, clockwise).
    pub fn from_bearing(speed: MetersPerYear, bearing_deg: f64) -> Self {
        let b = bearing_deg.to_radians();
        Self { east: speed.0 * b.sin(), north: speed.0 * b.cos() }
    }

    /// Euclidean length.
    pub fn magnitude(self) -> f64 {
        self.east.hypot(self.north)
    }
}

impl Add for EnVector {
    type Output = Self;
    fn add(self, o: Self) -> Self {
        Self { east: self.east + o.east, north: self.north + o.north }
    }
}

impl Mul<f64> for EnVector {
    type Output = Self;
    fn mul(self, k: f64) -> Self {
        Self { east: self.east * k, north: self.north * k }
    }
}

impl Neg for EnVector {
    type Output = Self;
    fn neg(self) -> Self {
        self * -1.0
    }
}
