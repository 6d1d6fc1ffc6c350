//! Frame-loop scenarios driving the camera and a scene together.

use approx::assert_relative_eq;
use lab3d_core::camera::{MAX_ZOOM, MIN_ZOOM};
use lab3d_core::transform::wrap_degrees;
use lab3d_core::{
    Camera, Movement, Options, Rotation, Scene, SceneGraph, SceneOptions, Transform, TransformParams,
};
use nalgebra::{Matrix4, Point3, Vector3};

#[test]
fn forward_step_from_lab_camera() {
    let mut camera = Camera::new(Point3::new(3.0, 3.0, 3.0), Point3::origin(), Vector3::y());
    assert_eq!(camera.movement_speed(), 2.5);

    camera.move_by(Movement::Forward, 1.0);

    let direction = (Point3::origin() - Point3::new(3.0, 3.0, 3.0)).normalize();
    let expected = Point3::new(3.0, 3.0, 3.0) + direction * 2.5;
    assert_relative_eq!(camera.position(), expected, epsilon = 1e-6);
}

#[test]
fn zero_time_frames_change_nothing() {
    let mut camera = Camera::default();
    let mut scene = Scene::room(&SceneOptions::default()).unwrap();
    let view = camera.view_matrix();
    let models = scene.graph.evaluate();

    for _ in 0..5 {
        camera.move_by(Movement::Forward, 0.0);
        camera.move_by(Movement::Left, 0.0);
        camera.zoom(0.0);
        scene.update(0.0);
    }

    assert_eq!(camera.view_matrix(), view);
    assert_eq!(scene.graph.evaluate(), models);
}

#[test]
fn long_session_keeps_invariants() {
    let mut camera = Camera::default();
    let mut scene = Scene::ceiling_fan(&SceneOptions { fan_speed: 720.0 }).unwrap();
    let rotations = [
        Rotation::PitchUp,
        Rotation::YawRight,
        Rotation::PitchDown,
        Rotation::YawLeft,
    ];

    for frame in 0..2_000 {
        let dt = if frame % 97 == 0 { 3.0 } else { 1.0 / 60.0 };
        camera.rotate(rotations[frame % rotations.len()], dt);
        camera.move_by(Movement::Forward, dt);
        camera.zoom(if frame % 2 == 0 { 7.0 } else { -5.0 });
        scene.update(dt);

        assert_relative_eq!(camera.direction().norm(), 1.0, epsilon = 1e-5);
        assert!((MIN_ZOOM..=MAX_ZOOM).contains(&camera.fov_degrees()));
        assert!(camera.pitch().abs() <= 89.0);
        let angle = scene.fans()[0].angle();
        assert!((0.0..360.0).contains(&angle));
    }
    assert!(camera.view_matrix().iter().all(|v| v.is_finite()));
}

#[test]
fn identity_compose_is_pure_translation() {
    let t = Vector3::new(0.5, -1.0, 2.0);
    let params = TransformParams::new().with_translation(t.x, t.y, t.z);
    assert_eq!(
        params.compose(&Matrix4::identity()),
        Transform::translate(&Matrix4::identity(), &t)
    );
}

#[test]
fn graph_matches_manual_threading() {
    // The hierarchy must agree with passing each parent matrix by hand.
    let fan = TransformParams::new()
        .with_translation(0.0, 2.0, 0.0)
        .with_rotation(0.0, 33.0, 0.0);
    let blade = TransformParams::new()
        .with_rotation(0.0, 120.0, 0.0)
        .with_scale(3.2, 0.06, 0.6)
        .with_pivot(0.0, -0.25, -0.25);

    let manual = blade.compose(&fan.compose(&Matrix4::identity()));

    let mut graph = SceneGraph::new();
    let root = graph.add_root("fan", fan);
    let child = graph.add_child(root, "blade", blade).unwrap();
    assert_eq!(graph.evaluate()[child.index()], manual);
}

#[test]
fn wrapped_spin_matches_unwrapped() {
    let mut angle = 0.0f32;
    let mut unwrapped = 0.0f32;
    for _ in 0..4 {
        angle = wrap_degrees(angle + 100.0);
        unwrapped += 100.0;
    }
    assert_eq!(angle, 40.0);

    let a = TransformParams::new().with_rotation(0.0, angle, 0.0);
    let b = TransformParams::new().with_rotation(0.0, unwrapped, 0.0);
    assert_relative_eq!(
        a.compose(&Matrix4::identity()),
        b.compose(&Matrix4::identity()),
        epsilon = 1e-5
    );
}

#[test]
fn options_drive_camera_and_scene() {
    let options = Options::from_toml_str(
        r"
[camera]
position = [0.0, 1.0, 6.0]
look_at = [0.0, 1.0, 0.0]
zoom = 30.0

[scene]
fan_speed = 45.0
",
    )
    .unwrap();

    let camera = Camera::from_options(&options.camera);
    assert_relative_eq!(camera.direction(), -Vector3::z(), epsilon = 1e-6);
    assert_eq!(camera.fov_degrees(), 30.0);

    let mut scene = Scene::room(&options.scene).unwrap();
    scene.update(2.0);
    assert_relative_eq!(scene.fans()[0].angle(), 90.0, epsilon = 1e-4);

    let projection = camera.projection_matrix(16.0 / 9.0, options.camera.near, options.camera.far);
    let mvp = projection * camera.view_matrix();
    assert!(mvp.iter().all(|v| v.is_finite()));
}
