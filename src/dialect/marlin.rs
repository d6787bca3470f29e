//! Marlin Dialect
//!
//! Built-in dialect for Marlin style firmware. The state vector is
//! `t, x, y, z, x_dot, y_dot, z_dot, e, e_dot, T`.
//!
//! Delta functions only see the parameters of their own instruction, so
//! modal state can not be tracked: positioning is taken to be absolute
//! (G90) and mode switching commands fall back to no-ops.

use std::sync::Arc;

use crate::dialect::{CommandMap, DeltaFn, Dialect};
use crate::parser::{find_param, Parameter};
use crate::primitive::Primitive;
use crate::state::StateVector;

pub const T: usize = 0;
pub const X: usize = 1;
pub const Y: usize = 2;
pub const Z: usize = 3;
pub const X_DOT: usize = 4;
pub const Y_DOT: usize = 5;
pub const Z_DOT: usize = 6;
pub const E: usize = 7;
pub const E_DOT: usize = 8;
pub const TEMPERATURE: usize = 9;

pub const AXIS_NAMES: [&str; 10] = [
    "t", "x", "y", "z", "x_dot", "y_dot", "z_dot", "e", "e_dot", "T",
];

pub const AXIS_COUNT: usize = AXIS_NAMES.len();

/// The Marlin dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct Marlin;

impl Dialect for Marlin {
    fn name(&self) -> &str {
        "marlin"
    }

    fn axis_names(&self) -> Vec<&str> {
        AXIS_NAMES.to_vec()
    }

    fn commands(&self) -> CommandMap {
        [
            entry("G0", linear_move),
            entry("G1", linear_move),
            entry("G4", dwell),
            entry("G28", home),
            entry("G92", set_position),
            entry("M104", set_hotend_temperature),
            entry("M109", set_hotend_temperature),
            entry("M140", ignore),
        ]
        .into_iter()
        .collect()
    }
}

fn entry(key: &str, delta: fn(&[Parameter]) -> StateVector) -> (String, DeltaFn) {
    (key.to_string(), Arc::new(delta))
}

fn zero() -> StateVector {
    StateVector::zero(AXIS_COUNT)
}

fn set_absolute(state: &mut StateVector, params: &[Parameter], key: char, axis: usize) {
    if let Some(value) = find_param(params, key) {
        state.set(axis, Primitive::absolute(value.magnitude()));
    }
}

/// G0/G1: move to absolute coordinates, F sets the feed rate in mm/min
fn linear_move(params: &[Parameter]) -> StateVector {
    let mut delta = zero();
    set_absolute(&mut delta, params, 'X', X);
    set_absolute(&mut delta, params, 'Y', Y);
    set_absolute(&mut delta, params, 'Z', Z);
    set_absolute(&mut delta, params, 'E', E);

    if let Some(feed) = find_param(params, 'F') {
        let speed = Primitive::absolute(feed.magnitude() / 60.0);
        delta.set(X_DOT, speed);
        delta.set(Y_DOT, speed);
        delta.set(Z_DOT, speed);
        if find_param(params, 'E').is_some() {
            delta.set(E_DOT, speed);
        }
    }

    delta
}

/// G4: dwell, P in milliseconds or S in seconds
fn dwell(params: &[Parameter]) -> StateVector {
    let seconds = find_param(params, 'P')
        .map(|ms| ms.magnitude() / 1000.0)
        .or_else(|| find_param(params, 'S').map(|s| s.magnitude()))
        .unwrap_or(0.0);
    zero().with(T, Primitive::relative(seconds))
}

/// G28: home the listed axes (`G28 X0 Z0`), all of them when none are listed
fn home(params: &[Parameter]) -> StateVector {
    let mut delta = zero();
    let axes = [('X', X), ('Y', Y), ('Z', Z)];
    let any_listed = axes.iter().any(|(key, _)| find_param(params, *key).is_some());

    for (key, axis) in axes {
        if !any_listed || find_param(params, key).is_some() {
            delta.set(axis, Primitive::absolute(0.0));
        }
    }

    delta
}

/// G92: set the current position without moving
fn set_position(params: &[Parameter]) -> StateVector {
    let mut delta = zero();
    set_absolute(&mut delta, params, 'X', X);
    set_absolute(&mut delta, params, 'Y', Y);
    set_absolute(&mut delta, params, 'Z', Z);
    set_absolute(&mut delta, params, 'E', E);
    delta
}

/// M104/M109: hotend target temperature
fn set_hotend_temperature(params: &[Parameter]) -> StateVector {
    let mut delta = zero();
    set_absolute(&mut delta, params, 'S', TEMPERATURE);
    delta
}

/// Recognized but without effect on the state vector (bed temperature)
fn ignore(_params: &[Parameter]) -> StateVector {
    zero()
}
