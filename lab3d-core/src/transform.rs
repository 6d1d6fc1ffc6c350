/// Affine model matrices and continuous spin animation
use nalgebra::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};

/// Full turn in degrees; spin angles are kept in `[0, FULL_TURN)`
pub const FULL_TURN: f32 = 360.0;

/// Scale never shrinks below this, so an object cannot invert itself
pub const MIN_SCALE: f32 = 0.05;

/// Interactive edit of an object's local parameters, expressed per second
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjust {
    /// Units per second along each axis
    Translate(Vector3<f32>),
    /// Degrees per second about X, Y and Z
    Rotate(Vector3<f32>),
    /// Uniform scale change per second
    Scale(f32),
}

/// Local placement of one rigid object relative to its parent
///
/// Rotation is a triple of Euler angles in degrees, applied X, then Y, then Z.
/// `pivot` is a fixed local offset applied after scaling, used to recenter
/// geometry whose origin sits at a corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformParams {
    pub translation: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
    pub pivot: Vector3<f32>,
}

impl TransformParams {
    pub fn new() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            pivot: Vector3::zeros(),
        }
    }

    pub fn with_translation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.translation = Vector3::new(x, y, z);
        self
    }

    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vector3::new(x, y, z);
        self
    }

    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vector3::new(x, y, z);
        self
    }

    pub fn with_pivot(mut self, x: f32, y: f32, z: f32) -> Self {
        self.pivot = Vector3::new(x, y, z);
        self
    }

    /// Apply a rate-based edit for `dt` seconds
    pub fn apply(&mut self, adjust: Adjust, dt: f32) {
        match adjust {
            Adjust::Translate(velocity) => self.translation += velocity * dt,
            Adjust::Rotate(degrees_per_sec) => {
                self.rotation = (self.rotation + degrees_per_sec * dt).map(wrap_degrees);
            }
            Adjust::Scale(rate) => {
                self.scale = self.scale.map(|s| (s + rate * dt).max(MIN_SCALE));
            }
        }
    }

    /// Model matrix of this object in the space of `parent`
    pub fn compose(&self, parent: &Matrix4<f32>) -> Matrix4<f32> {
        Transform::compose(
            parent,
            &self.translation,
            &self.rotation,
            &self.scale,
            &self.pivot,
        )
    }
}

impl Default for TransformParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Post-multiplying matrix builders
///
/// Every helper appends its operation in the basis already established by `m`,
/// so the last call is the first one applied to a vertex.
pub struct Transform;

impl Transform {
    pub fn translate(m: &Matrix4<f32>, offset: &Vector3<f32>) -> Matrix4<f32> {
        m * Matrix4::new_translation(offset)
    }

    /// Rotate about a principal axis by `degrees`
    pub fn rotate(m: &Matrix4<f32>, degrees: f32, axis: Axis) -> Matrix4<f32> {
        let rotation = match axis {
            Axis::X => Matrix4::from_axis_angle(&Vector3::x_axis(), degrees.to_radians()),
            Axis::Y => Matrix4::from_axis_angle(&Vector3::y_axis(), degrees.to_radians()),
            Axis::Z => Matrix4::from_axis_angle(&Vector3::z_axis(), degrees.to_radians()),
        };
        m * rotation
    }

    pub fn scale(m: &Matrix4<f32>, factors: &Vector3<f32>) -> Matrix4<f32> {
        m * Matrix4::new_nonuniform_scaling(factors)
    }

    /// Translate, rotate X, Y, Z, scale, then shift by the pivot offset.
    ///
    /// The order is fixed: swapping any two steps changes the result.
    pub fn compose(
        parent: &Matrix4<f32>,
        translation: &Vector3<f32>,
        rotation_degrees: &Vector3<f32>,
        scale: &Vector3<f32>,
        pivot: &Vector3<f32>,
    ) -> Matrix4<f32> {
        let t = Self::translate(parent, translation);
        let rx = Self::rotate(&t, rotation_degrees.x, Axis::X);
        let ry = Self::rotate(&rx, rotation_degrees.y, Axis::Y);
        let rz = Self::rotate(&ry, rotation_degrees.z, Axis::Z);
        let s = Self::scale(&rz, scale);
        Self::translate(&s, pivot)
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}

/// Principal rotation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Continuously accumulating rotation angle, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    angle: f32,
    /// Degrees per second
    pub rate: f32,
}

impl Spin {
    pub fn new(rate: f32) -> Self {
        Self { angle: 0.0, rate }
    }

    pub fn with_angle(rate: f32, angle: f32) -> Self {
        Self {
            angle: wrap_degrees(angle),
            rate,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Advance by `rate * dt` seconds
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.advance_by(self.rate * dt)
    }

    /// Advance by a fixed number of degrees
    pub fn advance_by(&mut self, degrees: f32) -> f32 {
        self.angle = wrap_degrees(self.angle + degrees);
        self.angle
    }
}

/// Fold an angle into `[0, 360)`.
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(FULL_TURN);
    // rem_euclid rounds tiny negatives up to exactly 360
    if wrapped >= FULL_TURN {
        0.0
    } else {
        wrapped
    }
}
