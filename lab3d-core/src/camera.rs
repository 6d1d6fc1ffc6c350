/// First-person camera: position, yaw/pitch orientation and zoom
use log::{debug, trace};
use nalgebra::{Matrix4, Point3, Rotation3, Unit, Vector3};

use crate::options::CameraOptions;
use crate::projection;
use crate::transform::wrap_degrees;

/// Narrowest field of view, in degrees
pub const MIN_ZOOM: f32 = 1.0;
/// Widest field of view, in degrees
pub const MAX_ZOOM: f32 = 45.0;
/// Pitch stays strictly inside +-90 degrees so the view basis never flips
pub const PITCH_LIMIT: f32 = 89.0;

const DEFAULT_YAW: f32 = -90.0;
const DEFAULT_PITCH: f32 = 0.0;

/// Translation commands, relative to the current view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Orientation commands, applied at `rotation_speed` degrees per second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
    RollLeft,
    RollRight,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Point3<f32>,
    direction: Vector3<f32>,
    /// View up: `world_up` turned about `direction` by `roll`
    up: Vector3<f32>,
    world_up: Vector3<f32>,
    yaw: f32,
    pitch: f32,
    roll: f32,
    zoom: f32,
    movement_speed: f32,
    mouse_sensitivity: f32,
    rotation_speed: f32,
}

impl Camera {
    /// Place the camera at `position`, facing `look_at`.
    ///
    /// Yaw and pitch are derived from the initial facing so later orientation
    /// updates continue from it. A facing steeper than the pitch limit is
    /// clamped. If `look_at == position` the camera faces -Z.
    pub fn new(position: Point3<f32>, look_at: Point3<f32>, up: Vector3<f32>) -> Self {
        let (direction, yaw, pitch) = match (look_at - position).try_normalize(f32::EPSILON) {
            Some(dir) => {
                let yaw = dir.z.atan2(dir.x).to_degrees();
                let pitch = dir.y.clamp(-1.0, 1.0).asin().to_degrees();
                let clamped = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
                if clamped == pitch {
                    (dir, yaw, pitch)
                } else {
                    (facing(yaw, clamped), yaw, clamped)
                }
            }
            None => (
                facing(DEFAULT_YAW, DEFAULT_PITCH),
                DEFAULT_YAW,
                DEFAULT_PITCH,
            ),
        };

        let world_up = up.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::y);
        Self {
            position,
            direction,
            up: world_up,
            world_up,
            yaw,
            pitch,
            roll: 0.0,
            zoom: MAX_ZOOM,
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            rotation_speed: 45.0,
        }
    }

    pub fn from_options(options: &CameraOptions) -> Self {
        let mut camera = Self::new(options.position, options.look_at, options.up);
        camera.movement_speed = options.movement_speed;
        camera.mouse_sensitivity = options.mouse_sensitivity;
        camera.rotation_speed = options.rotation_speed;
        camera.zoom = options.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        camera
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Accumulated roll about the view direction, in `[0, 360)`
    pub fn roll(&self) -> f32 {
        self.roll
    }

    /// Field of view in degrees, always within `[MIN_ZOOM, MAX_ZOOM]`
    pub fn fov_degrees(&self) -> f32 {
        self.zoom
    }

    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    pub fn mouse_sensitivity(&self) -> f32 {
        self.mouse_sensitivity
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    /// Translate by `movement_speed * dt` along the requested axis
    pub fn move_by(&mut self, movement: Movement, dt: f32) {
        let velocity = self.movement_speed * dt;
        let offset = match movement {
            Movement::Forward => self.direction * velocity,
            Movement::Backward => -self.direction * velocity,
            Movement::Right => self.right() * velocity,
            Movement::Left => -self.right() * velocity,
            Movement::Up => self.up * velocity,
            Movement::Down => -self.up * velocity,
        };
        self.position += offset;
        trace!("camera {movement:?} dt={dt} -> {:?}", self.position);
    }

    /// Turn by `rotation_speed * dt` degrees
    pub fn rotate(&mut self, rotation: Rotation, dt: f32) {
        let angle = self.rotation_speed * dt;
        match rotation {
            Rotation::YawLeft => self.yaw -= angle,
            Rotation::YawRight => self.yaw += angle,
            Rotation::PitchUp => self.pitch += angle,
            Rotation::PitchDown => self.pitch -= angle,
            Rotation::RollLeft => self.roll = wrap_degrees(self.roll - angle),
            Rotation::RollRight => self.roll = wrap_degrees(self.roll + angle),
        }
        self.update_vectors();
        trace!(
            "camera {rotation:?} yaw={} pitch={} roll={} dir={:?}",
            self.yaw,
            self.pitch,
            self.roll,
            self.direction
        );
    }

    /// Mouse look: offsets are scaled by `mouse_sensitivity`
    pub fn look(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;
        self.update_vectors();
    }

    /// Narrow the field of view by `offset` degrees (negative widens)
    pub fn zoom(&mut self, offset: f32) {
        if offset.is_nan() {
            return;
        }
        self.zoom = (self.zoom - offset).clamp(MIN_ZOOM, MAX_ZOOM);
        trace!("camera zoom={}", self.zoom);
    }

    /// Reposition without reorienting toward any target
    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = Point3::new(x, y, z);
        self.update_vectors();
        debug!("camera moved to {:?}", self.position);
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &(self.position + self.direction), &self.up)
    }

    /// Right-handed perspective projection using the current zoom as FOV
    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
        projection::perspective(self.zoom, aspect, near, far)
    }

    fn right(&self) -> Vector3<f32> {
        // Zero when looking straight along `up`.
        self.direction
            .cross(&self.up)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }

    /// Rebuild the view basis from yaw, pitch and roll.
    ///
    /// Rolling `world_up` about `direction` keeps its angle to `direction`, so
    /// the pitch clamp bounds `direction x up` away from zero for any roll.
    fn update_vectors(&mut self) {
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.direction = facing(self.yaw, self.pitch);
        self.up = if self.roll == 0.0 {
            self.world_up
        } else {
            let axis = Unit::new_normalize(self.direction);
            Rotation3::from_axis_angle(&axis, self.roll.to_radians()) * self.world_up
        };
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_options(&CameraOptions::default())
    }
}

/// Unit facing vector for yaw/pitch in degrees.
fn facing(yaw: f32, pitch: f32) -> Vector3<f32> {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
    Vector3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    )
    .normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn lab_camera() -> Camera {
        Camera::new(Point3::new(3.0, 3.0, 3.0), Point3::origin(), Vector3::y())
    }

    const ALL_MOVES: [Movement; 6] = [
        Movement::Forward,
        Movement::Backward,
        Movement::Left,
        Movement::Right,
        Movement::Up,
        Movement::Down,
    ];

    const ALL_ROTATIONS: [Rotation; 6] = [
        Rotation::YawLeft,
        Rotation::YawRight,
        Rotation::PitchUp,
        Rotation::PitchDown,
        Rotation::RollLeft,
        Rotation::RollRight,
    ];

    #[test]
    fn test_camera_creation() {
        let camera = lab_camera();
        let expected = Vector3::new(-1.0, -1.0, -1.0).normalize();
        assert_eq!(camera.direction(), expected);
        assert_eq!(camera.fov_degrees(), MAX_ZOOM);
        assert_relative_eq!(camera.yaw(), -135.0, epsilon = 1e-4);
        assert_relative_eq!(camera.pitch(), -35.264_39, epsilon = 1e-3);
    }

    #[test]
    fn test_derived_angles_reproduce_direction() {
        let mut camera = lab_camera();
        let before = camera.direction();
        camera.look(0.0, 0.0);
        assert_relative_eq!(camera.direction(), before, epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_look_at_faces_negative_z() {
        let camera = Camera::new(Point3::new(1.0, 2.0, 3.0), Point3::new(1.0, 2.0, 3.0), Vector3::y());
        assert_relative_eq!(camera.direction(), -Vector3::z(), epsilon = 1e-6);
        assert_eq!(camera.yaw(), DEFAULT_YAW);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut camera = lab_camera();
        let start = camera.position();
        for movement in ALL_MOVES {
            camera.move_by(movement, 0.0);
        }
        assert_eq!(camera.position(), start);
    }

    #[test]
    fn test_forward_then_backward_returns() {
        let mut camera = lab_camera();
        camera.move_by(Movement::Forward, 0.4);
        camera.move_by(Movement::Backward, 0.4);
        assert_relative_eq!(camera.position(), Point3::new(3.0, 3.0, 3.0), epsilon = 1e-5);
    }

    #[test]
    fn test_strafe_is_perpendicular_to_view() {
        let mut camera = lab_camera();
        let start = camera.position();
        camera.move_by(Movement::Right, 1.0);
        let offset = camera.position() - start;
        assert_relative_eq!(offset.norm(), 2.5, epsilon = 1e-5);
        assert_relative_eq!(offset.dot(&camera.direction()), 0.0, epsilon = 1e-5);
        assert_relative_eq!(offset.dot(&camera.up()), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_vertical_moves_follow_up() {
        let mut camera = lab_camera();
        camera.move_by(Movement::Up, 2.0);
        assert_relative_eq!(camera.position(), Point3::new(3.0, 8.0, 3.0), epsilon = 1e-5);
        camera.move_by(Movement::Down, 1.0);
        assert_relative_eq!(camera.position(), Point3::new(3.0, 5.5, 3.0), epsilon = 1e-5);
    }

    #[test]
    fn test_zoom_saturates() {
        let mut camera = lab_camera();
        for _ in 0..100 {
            camera.zoom(3.0);
            assert!(camera.fov_degrees() >= MIN_ZOOM);
        }
        assert_eq!(camera.fov_degrees(), MIN_ZOOM);
        camera.zoom(0.5);
        assert_eq!(camera.fov_degrees(), MIN_ZOOM);

        for _ in 0..100 {
            camera.zoom(-3.0);
            assert!(camera.fov_degrees() <= MAX_ZOOM);
        }
        assert_eq!(camera.fov_degrees(), MAX_ZOOM);

        camera.zoom(f32::NAN);
        assert_eq!(camera.fov_degrees(), MAX_ZOOM);
    }

    #[test]
    fn test_direction_unit_after_rotate() {
        let mut camera = lab_camera();
        for (i, rotation) in ALL_ROTATIONS.iter().cycle().take(60).enumerate() {
            camera.rotate(*rotation, i as f32 * 0.37);
            assert_relative_eq!(camera.direction().norm(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = lab_camera();
        camera.rotate(Rotation::PitchUp, 100.0);
        assert_eq!(camera.pitch(), PITCH_LIMIT);
        assert_relative_eq!(camera.direction().norm(), 1.0, epsilon = 1e-5);
        assert!(camera.direction().y < 1.0);

        camera.rotate(Rotation::PitchDown, 1000.0);
        assert_eq!(camera.pitch(), -PITCH_LIMIT);
        assert!(camera.view_matrix().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_yaw_right_turns_toward_positive_x() {
        let mut camera = Camera::new(Point3::origin(), Point3::new(0.0, 0.0, -1.0), Vector3::y());
        camera.rotate(Rotation::YawRight, 2.0);
        assert_relative_eq!(camera.yaw(), 0.0, epsilon = 1e-4);
        assert_relative_eq!(camera.direction(), Vector3::x(), epsilon = 1e-5);
    }

    #[test]
    fn test_roll_tilts_up_and_keeps_direction() {
        let mut camera = Camera::new(Point3::origin(), Point3::new(0.0, 0.0, -1.0), Vector3::y());
        let direction = camera.direction();
        camera.rotate(Rotation::RollRight, 2.0);
        assert_relative_eq!(camera.direction(), direction, epsilon = 1e-6);
        assert_eq!(camera.roll(), 90.0);
        assert_relative_eq!(camera.up(), Vector3::x(), epsilon = 1e-5);
        camera.rotate(Rotation::RollLeft, 2.0);
        assert_relative_eq!(camera.up(), Vector3::y(), epsilon = 1e-5);
    }

    #[test]
    fn test_straight_down_is_clamped() {
        let camera = Camera::new(Point3::new(0.0, 5.0, 0.0), Point3::origin(), Vector3::y());
        assert_eq!(camera.pitch(), -PITCH_LIMIT);
        assert_relative_eq!(camera.direction().y, -PITCH_LIMIT.to_radians().sin(), epsilon = 1e-6);
        assert!(camera.direction().cross(&camera.up()).norm() > 0.01);
        assert!(camera.view_matrix().iter().all(|v| v.is_finite()));

        // The first look continues from the clamped facing instead of snapping.
        let mut turned = camera.clone();
        turned.look(0.0, 0.0);
        assert_relative_eq!(turned.direction(), camera.direction(), epsilon = 1e-6);
    }

    #[test]
    fn test_roll_then_yaw_keeps_basis() {
        let mut camera = Camera::new(Point3::origin(), Point3::new(0.0, 0.0, -1.0), Vector3::y());
        camera.rotate(Rotation::RollRight, 2.0);
        camera.rotate(Rotation::YawRight, 2.0);
        assert_relative_eq!(camera.direction(), Vector3::x(), epsilon = 1e-5);
        assert_relative_eq!(camera.up().dot(&camera.direction()), 0.0, epsilon = 1e-5);

        let start = camera.position();
        camera.move_by(Movement::Right, 1.0);
        assert_relative_eq!((camera.position() - start).norm(), 2.5, epsilon = 1e-5);
    }

    #[test]
    fn test_mixed_rotations_never_degenerate() {
        let mut camera = lab_camera();
        let steps = [0.3, 2.0, 1.7, 0.05, 4.0, 2.2];
        for (i, rotation) in ALL_ROTATIONS.iter().cycle().take(240).enumerate() {
            camera.rotate(*rotation, steps[i % steps.len()]);
            assert!(camera.direction().cross(&camera.up()).norm() > 0.015);
            assert_relative_eq!(camera.up().norm(), 1.0, epsilon = 1e-4);
            assert!((0.0..360.0).contains(&camera.roll()));
        }
        assert!(camera.view_matrix().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_look_scales_by_sensitivity() {
        let mut camera = Camera::new(Point3::origin(), Point3::new(0.0, 0.0, -1.0), Vector3::y());
        camera.look(100.0, 50.0);
        assert_relative_eq!(camera.yaw(), -80.0, epsilon = 1e-4);
        assert_relative_eq!(camera.pitch(), 5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_set_position_keeps_orientation() {
        let mut camera = lab_camera();
        camera.rotate(Rotation::YawLeft, 0.5);
        let direction = camera.direction();
        camera.set_position(-10.0, 0.5, 7.0);
        assert_eq!(camera.position(), Point3::new(-10.0, 0.5, 7.0));
        assert_relative_eq!(camera.direction(), direction, epsilon = 1e-6);
    }

    #[test]
    fn test_view_matrix_is_deterministic() {
        let camera = lab_camera();
        assert_eq!(camera.view_matrix(), camera.view_matrix());
    }

    #[test]
    fn test_view_matrix_centers_target() {
        let camera = lab_camera();
        let view = camera.view_matrix();
        let eye = view.transform_point(&camera.position());
        assert_relative_eq!(eye, Point3::origin(), epsilon = 1e-5);
        // Right-handed: the target lies on -Z in view space.
        let target = view.transform_point(&Point3::origin());
        assert_relative_eq!(target.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(target.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(target.z, -(27.0f32).sqrt(), epsilon = 1e-4);
    }

    #[test]
    fn test_from_options() {
        let options = CameraOptions {
            movement_speed: 5.0,
            zoom: 30.0,
            ..CameraOptions::default()
        };
        let camera = Camera::from_options(&options);
        assert_eq!(camera.movement_speed(), 5.0);
        assert_eq!(camera.fov_degrees(), 30.0);
        assert_eq!(camera.mouse_sensitivity(), 0.1);
        assert_eq!(camera.rotation_speed(), 45.0);
        assert_eq!(Camera::default().position(), Point3::new(3.0, 3.0, 3.0));
    }
}
