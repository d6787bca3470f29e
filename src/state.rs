//! State Space Vectors
//!
//! One time-slice of machine state: a fixed number of [`Primitive`] values,
//! one per axis. The axis count is chosen by the dialect and stays the same
//! for every vector produced by a single parse.

use std::fmt;
use std::ops::{Add, Index, IndexMut, Sub};

use serde::Serialize;

use crate::primitive::Primitive;

/// An ordered, fixed-length tuple of primitives
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StateVector {
    axes: Vec<Primitive>,
}

impl StateVector {
    /// The additive identity: every axis relative zero
    pub fn zero(len: usize) -> Self {
        Self {
            axes: vec![Primitive::ZERO; len],
        }
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    pub fn get(&self, axis: usize) -> Option<Primitive> {
        self.axes.get(axis).copied()
    }

    /// Overwrite one axis
    ///
    /// Panics when `axis` is out of range.
    pub fn set(&mut self, axis: usize, value: Primitive) {
        self.axes[axis] = value;
    }

    /// Builder-style [`StateVector::set`]
    pub fn with(mut self, axis: usize, value: Primitive) -> Self {
        self.set(axis, value);
        self
    }

    /// True when every axis has magnitude zero
    pub fn is_zero(&self) -> bool {
        self.axes.iter().all(|p| *p == 0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.axes.iter()
    }

    pub fn magnitudes(&self) -> Vec<f64> {
        self.axes.iter().map(|p| p.magnitude()).collect()
    }

    fn combine(&self, rhs: &StateVector, op: impl Fn(Primitive, Primitive) -> Primitive) -> Self {
        assert_eq!(
            self.len(),
            rhs.len(),
            "state vectors of different dimensions can not be combined"
        );
        Self {
            axes: self
                .axes
                .iter()
                .zip(&rhs.axes)
                .map(|(a, b)| op(*a, *b))
                .collect(),
        }
    }
}

impl From<Vec<Primitive>> for StateVector {
    fn from(axes: Vec<Primitive>) -> Self {
        Self { axes }
    }
}

impl Index<usize> for StateVector {
    type Output = Primitive;

    fn index(&self, axis: usize) -> &Primitive {
        &self.axes[axis]
    }
}

impl IndexMut<usize> for StateVector {
    fn index_mut(&mut self, axis: usize) -> &mut Primitive {
        &mut self.axes[axis]
    }
}

impl Add<&StateVector> for &StateVector {
    type Output = StateVector;

    fn add(self, rhs: &StateVector) -> StateVector {
        self.combine(rhs, |a, b| a + b)
    }
}

impl Add for StateVector {
    type Output = StateVector;

    fn add(self, rhs: StateVector) -> StateVector {
        &self + &rhs
    }
}

impl Sub<&StateVector> for &StateVector {
    type Output = StateVector;

    fn sub(self, rhs: &StateVector) -> StateVector {
        self.combine(rhs, |a, b| a - b)
    }
}

impl Sub for StateVector {
    type Output = StateVector;

    fn sub(self, rhs: StateVector) -> StateVector {
        &self - &rhs
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, axis) in self.axes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", axis)?;
        }
        write!(f, "]")
    }
}
