/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use lab3d_core::{projection, Mesh, Rgba, Triangle};
use nalgebra::{Matrix3, Matrix4, Vector3};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Light that reaches faces turned away from the light
const AMBIENT: f32 = 0.25;

/// Barycentric slack so pixel centers on a shared edge are not lost to rounding
const EDGE_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy)]
struct Cell {
    glyph: char,
    color: Rgba,
    depth: f32,
}

const EMPTY: Cell = Cell {
    glyph: ' ',
    color: Rgba::WHITE,
    depth: f32::INFINITY,
};

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![EMPTY; width * height];
    }

    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    pub fn glyph_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x].glyph)
    }

    /// Draw `mesh` placed by `model`, lit from `light_dir` (pointing toward the light)
    pub fn render_mesh(
        &mut self,
        mesh: &Mesh,
        model: &Matrix4<f32>,
        view_projection: &Matrix4<f32>,
        color: Rgba,
        light_dir: &Vector3<f32>,
    ) {
        let mvp = view_projection * model;
        // Normals follow the inverse transpose so non-uniform scale keeps them perpendicular.
        let normal_matrix = model
            .fixed_view::<3, 3>(0, 0)
            .clone_owned()
            .try_inverse()
            .map(|m| m.transpose())
            .unwrap_or_else(Matrix3::identity);

        for triangle in &mesh.triangles {
            self.render_triangle(triangle, &mvp, &normal_matrix, color, light_dir);
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        mvp: &Matrix4<f32>,
        normal_matrix: &Matrix3<f32>,
        color: Rgba,
        light_dir: &Vector3<f32>,
    ) {
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
            // Off-screen vertices are fine; the bounding box clips them.
            match projection::project_to_viewport(
                &vertex.position,
                mvp,
                self.width as u32,
                self.height as u32,
            ) {
                Some(p) => *slot = p,
                None => return, // Behind the camera
            }
        }

        let Some(normal) = triangle.normal() else {
            return;
        };
        let world_normal = (normal_matrix * normal).try_normalize(1e-9).unwrap_or(normal);
        let diffuse = world_normal.dot(light_dir).max(0.0);
        let brightness = AMBIENT + (1.0 - AMBIENT) * diffuse;

        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
        let glyph = LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)];

        self.rasterize_triangle(&screen_coords, glyph, color.shaded(brightness));
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], glyph: char, color: Rgba) {
        let [v0, v1, v2] = *coords;

        // Bounding box, clipped to screen bounds
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), p)
                else {
                    continue;
                };
                if w0 < -EDGE_EPSILON || w1 < -EDGE_EPSILON || w2 < -EDGE_EPSILON {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let cell = &mut self.cells[y as usize * self.width + x as usize];
                if depth < cell.depth {
                    *cell = Cell { glyph, color, depth };
                }
            }
        }
    }

    /// Write the frame starting at terminal row `top`
    pub fn draw<W: Write>(&self, writer: &mut W, top: u16) -> std::io::Result<()> {
        for (row, line) in self.cells.chunks(self.width.max(1)).enumerate() {
            writer.queue(cursor::MoveTo(0, top + row as u16))?;
            for cell in line {
                let (r, g, b) = cell.color.to_rgb8();
                writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
                writer.queue(Print(cell.glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
