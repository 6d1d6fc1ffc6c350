/// Lab3D Core Library - Camera and hierarchical transforms
///
/// This library holds the per-frame state of a small 3D scene: a first-person
/// camera producing view/projection matrices and a parent/child transform
/// hierarchy producing one model matrix and fill color per drawable. It never
/// touches a GPU or a window; renderers consume its matrices.

pub mod camera;
pub mod color;
pub mod error;
pub mod geometry;
pub mod hierarchy;
pub mod options;
pub mod projection;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use camera::{Camera, Movement, Rotation};
pub use color::Rgba;
pub use error::Lab3dError;
pub use geometry::{Mesh, Triangle, Vertex};
pub use hierarchy::{DrawItem, NodeId, SceneGraph};
pub use options::{CameraOptions, Options, SceneOptions};
pub use scene::{Fan, Scene};
pub use transform::{Adjust, Axis, Spin, Transform, TransformParams};
