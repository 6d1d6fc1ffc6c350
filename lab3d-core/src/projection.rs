/// Projection and screen mapping utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Points closer to the eye plane than this are treated as behind the camera
const MIN_CLIP_W: f32 = 1e-6;

/// Right-handed perspective projection (OpenGL clip conventions)
pub fn perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    Matrix4::new_perspective(aspect, fov_degrees.to_radians(), near, far)
}

/// Project a model-space point through `mvp` into pixel coordinates.
///
/// Returns `(x, y, depth)` with the origin at the top-left corner, or `None`
/// when the point is behind the camera or outside the view volume.
pub fn project_to_screen(
    point: &Point3<f32>,
    mvp: &Matrix4<f32>,
    width: u32,
    height: u32,
) -> Option<(f32, f32, f32)> {
    let ndc = to_ndc(point, mvp)?;
    if !ndc.iter().all(|v| (-1.0..=1.0).contains(v)) {
        return None;
    }
    Some(to_pixels(&ndc, width, height))
}

/// Like [`project_to_screen`], but only points behind the camera are rejected.
///
/// Coordinates may fall off screen so a rasterizer can clip a triangle that
/// overflows the viewport instead of dropping it.
pub fn project_to_viewport(
    point: &Point3<f32>,
    mvp: &Matrix4<f32>,
    width: u32,
    height: u32,
) -> Option<(f32, f32, f32)> {
    to_ndc(point, mvp).map(|ndc| to_pixels(&ndc, width, height))
}

fn to_ndc(point: &Point3<f32>, mvp: &Matrix4<f32>) -> Option<Vector3<f32>> {
    let clip = mvp * point.to_homogeneous();
    if clip.w < MIN_CLIP_W {
        return None;
    }
    Some(clip.xyz() / clip.w)
}

fn to_pixels(ndc: &Vector3<f32>, width: u32, height: u32) -> (f32, f32, f32) {
    let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
    let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;
    (screen_x, screen_y, ndc.z)
}
