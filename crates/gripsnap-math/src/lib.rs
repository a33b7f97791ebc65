#![warn(missing_docs)]

//! Math types for the gripsnap constraint kernel.
//!
//! Thin wrappers around nalgebra providing the vocabulary used by the
//! grip surfaces: points, vectors, directions and rotations, a tolerance
//! constant, and the angle and projection primitives the cylinder
//! constraint is built from.
//!
//! World conventions: +Y is up, +Z is forward, +X is right.

use std::f64::consts::PI;

use nalgebra::{Unit, UnitQuaternion, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// An orientation in 3D space.
pub type Rotation = UnitQuaternion<f64>;

/// World up axis (+Y).
pub fn up() -> Dir3 {
    Vec3::y_axis()
}

/// World forward axis (+Z).
pub fn forward() -> Dir3 {
    Vec3::z_axis()
}

/// World right axis (+X).
pub fn right() -> Dir3 {
    Vec3::x_axis()
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in scene units (meters).
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default tolerances (1e-9 linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        angular: 1e-9,
    };

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

// =============================================================================
// Angles and projections
// =============================================================================

/// Cosine threshold below which two unit vectors are treated as anti-parallel.
const ANTIPARALLEL_DOT: f64 = -1.0 + 1e-12;

/// Wrap an angle in degrees into `[0, 360)`.
///
/// Wraps rather than clamps, so `-10` becomes `350` and `370` becomes `10`.
/// Non-finite input yields `0`.
pub fn repeat_degrees(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    // rem_euclid may round up to exactly 360 for tiny negative inputs
    let wrapped = value.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Signed angle in degrees from `from` to `to`, using `axis` for the sign.
///
/// The magnitude lies in `[0, 180]`. The sign is negative only when
/// `axis · (from × to)` is negative. Zero-length inputs yield `0`.
pub fn signed_angle_degrees(from: &Vec3, to: &Vec3, axis: &Vec3) -> f64 {
    let tol = Tolerance::DEFAULT;
    if tol.is_zero(from.norm()) || tol.is_zero(to.norm()) {
        return 0.0;
    }
    let cross = from.cross(to);
    let unsigned = cross.norm().atan2(from.dot(to)).to_degrees();
    if axis.dot(&cross) < 0.0 {
        -unsigned
    } else {
        unsigned
    }
}

/// Component of `v` along `axis`.
pub fn project_on_axis(v: &Vec3, axis: &Dir3) -> Vec3 {
    axis.as_ref() * v.dot(axis.as_ref())
}

/// `v` with its component along `normal` removed.
pub fn project_on_plane(v: &Vec3, normal: &Dir3) -> Vec3 {
    v - project_on_axis(v, normal)
}

/// Shortest-arc rotation taking the direction of `from` onto the direction of `to`.
///
/// Returns the identity when either vector has zero length. When the two
/// directions are anti-parallel the shortest arc is not unique, and a half
/// turn about `fallback_axis` is returned instead; callers pass an axis
/// perpendicular to both inputs.
pub fn from_to_rotation(from: &Vec3, to: &Vec3, fallback_axis: &Dir3) -> Rotation {
    let tol = Tolerance::DEFAULT;
    if tol.is_zero(from.norm()) || tol.is_zero(to.norm()) {
        return Rotation::identity();
    }
    let a = from.normalize();
    let b = to.normalize();
    if a.dot(&b) <= ANTIPARALLEL_DOT {
        return Rotation::from_axis_angle(fallback_axis, PI);
    }
    Rotation::rotation_between(&a, &b)
        .unwrap_or_else(|| Rotation::from_axis_angle(fallback_axis, PI))
}
