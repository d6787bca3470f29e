//! Primitive Values
//!
//! A scalar tagged as relative (summed into accumulated state) or absolute
//! (overriding accumulated state).

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::Serialize;

/// A magnitude with relative/absolute combination semantics
///
/// Combining `a + b` sums the magnitudes when `b` is relative. When `b` is
/// absolute its magnitude replaces `a` entirely. Subtraction mirrors this:
/// a relative `b` is subtracted, an absolute `b` overrides with
/// `+b.magnitude`. The combined value is always tagged relative.
///
/// Equality and ordering only look at the magnitude.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(into = "f64")]
pub struct Primitive {
    magnitude: f64,
    is_relative: bool,
}

impl Primitive {
    pub const ZERO: Primitive = Primitive::relative(0.0);

    /// A value that is added to the state it is combined with
    pub const fn relative(magnitude: f64) -> Self {
        Self {
            magnitude,
            is_relative: true,
        }
    }

    /// A value that replaces the state it is combined with
    pub const fn absolute(magnitude: f64) -> Self {
        Self {
            magnitude,
            is_relative: false,
        }
    }

    pub const fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub const fn is_relative(&self) -> bool {
        self.is_relative
    }

    pub const fn is_absolute(&self) -> bool {
        !self.is_relative
    }

    /// Same magnitude with a different relative/absolute tag
    pub const fn with_relative(self, is_relative: bool) -> Self {
        Self {
            magnitude: self.magnitude,
            is_relative,
        }
    }
}

impl Default for Primitive {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<f64> for Primitive {
    fn from(magnitude: f64) -> Self {
        Self::relative(magnitude)
    }
}

impl From<Primitive> for f64 {
    fn from(primitive: Primitive) -> Self {
        primitive.magnitude
    }
}

impl Add for Primitive {
    type Output = Primitive;

    fn add(self, rhs: Primitive) -> Primitive {
        if rhs.is_relative {
            Primitive::relative(self.magnitude + rhs.magnitude)
        } else {
            Primitive::relative(rhs.magnitude)
        }
    }
}

impl Sub for Primitive {
    type Output = Primitive;

    fn sub(self, rhs: Primitive) -> Primitive {
        if rhs.is_relative {
            Primitive::relative(self.magnitude - rhs.magnitude)
        } else {
            Primitive::relative(rhs.magnitude)
        }
    }
}

impl AddAssign for Primitive {
    fn add_assign(&mut self, rhs: Primitive) {
        *self = *self + rhs;
    }
}

impl SubAssign for Primitive {
    fn sub_assign(&mut self, rhs: Primitive) {
        *self = *self - rhs;
    }
}

/// Bare scalars combine as relative values
impl Add<f64> for Primitive {
    type Output = Primitive;

    fn add(self, rhs: f64) -> Primitive {
        self + Primitive::relative(rhs)
    }
}

impl Sub<f64> for Primitive {
    type Output = Primitive;

    fn sub(self, rhs: f64) -> Primitive {
        self - Primitive::relative(rhs)
    }
}

impl AddAssign<f64> for Primitive {
    fn add_assign(&mut self, rhs: f64) {
        *self = *self + rhs;
    }
}

impl SubAssign<f64> for Primitive {
    fn sub_assign(&mut self, rhs: f64) {
        *self = *self - rhs;
    }
}

impl PartialEq for Primitive {
    fn eq(&self, other: &Self) -> bool {
        self.magnitude == other.magnitude
    }
}

impl PartialEq<f64> for Primitive {
    fn eq(&self, other: &f64) -> bool {
        self.magnitude == *other
    }
}

impl PartialEq<Primitive> for f64 {
    fn eq(&self, other: &Primitive) -> bool {
        *self == other.magnitude
    }
}

impl PartialOrd for Primitive {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.magnitude.partial_cmp(&other.magnitude)
    }
}

impl PartialOrd<f64> for Primitive {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.magnitude.partial_cmp(other)
    }
}

impl PartialOrd<Primitive> for f64 {
    fn partial_cmp(&self, other: &Primitive) -> Option<Ordering> {
        self.partial_cmp(&other.magnitude)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.magnitude, f)
    }
}
