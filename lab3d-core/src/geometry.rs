/// Geometry primitives consumed by renderers
use nalgebra::{Point3, Vector3};

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Face normal from winding order, or `None` for a degenerate triangle
    pub fn normal(&self) -> Option<Vector3<f32>> {
        let [v0, v1, v2] = &self.vertices;
        let edge1 = v1.position - v0.position;
        let edge2 = v2.position - v0.position;
        edge1.cross(&edge2).try_normalize(1e-12)
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

// Corner indices into the unit cube, counter-clockwise seen from outside.
const CUBE_FACES: [([usize; 4], [f32; 3]); 6] = [
    ([4, 5, 7, 6], [0.0, 0.0, 1.0]),
    ([1, 0, 2, 3], [0.0, 0.0, -1.0]),
    ([2, 6, 7, 3], [0.0, 1.0, 0.0]),
    ([0, 1, 5, 4], [0.0, -1.0, 0.0]),
    ([1, 3, 7, 5], [1.0, 0.0, 0.0]),
    ([0, 4, 6, 2], [-1.0, 0.0, 0.0]),
];

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Axis-aligned cube spanning `[0, size]` on every axis.
    ///
    /// The origin sits on a corner; pair it with a pivot of `-size / 2` to
    /// rotate and scale about the geometric center.
    pub fn cube(size: f32) -> Self {
        let corner = |i: usize| {
            Point3::new(
                if i & 1 != 0 { size } else { 0.0 },
                if i & 2 != 0 { size } else { 0.0 },
                if i & 4 != 0 { size } else { 0.0 },
            )
        };

        let mut mesh = Self::with_capacity(CUBE_FACES.len() * 2);
        for (quad, n) in CUBE_FACES {
            let normal = Vector3::new(n[0], n[1], n[2]);
            let v = quad.map(|i| Vertex::new(corner(i), normal));
            mesh.add_triangle(Triangle::new(v[0], v[1], v[2]));
            mesh.add_triangle(Triangle::new(v[0], v[2], v[3]));
        }
        mesh
    }
}
