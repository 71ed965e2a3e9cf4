//! Triangle tessellation for spawned shapes

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::{Shape, ShapeFactory, ShapeKind};

/// Default segment count for circles and ellipses
pub const CURVE_SEGMENTS: u32 = 32;

/// Filled triangle list ready for upload
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Raw bytes for a vertex buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// [`ShapeFactory`] that tessellates shapes into filled triangles
#[derive(Debug, Clone)]
pub struct MeshFactory {
    pub segments: u32,
}

impl Default for MeshFactory {
    fn default() -> Self {
        Self {
            segments: CURVE_SEGMENTS,
        }
    }
}

impl ShapeFactory for MeshFactory {
    type Drawable = Mesh;

    fn create(&mut self, shape: &Shape) -> Mesh {
        let color = shape.rgba();
        let vertices = match shape.kind {
            ShapeKind::Circle | ShapeKind::Ellipse => {
                ellipse(shape.position, shape.semi_axes(), color, self.segments)
            }
            ShapeKind::Polygon { .. } => polygon(shape.position, &shape.points, color),
        };
        Mesh { vertices }
    }
}

/// Generate vertices for a filled ellipse with semi-axes `axes`
pub fn ellipse(center: Vec2, axes: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + axes.x * theta1.cos(),
            center.y + axes.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + axes.x * theta2.cos(),
            center.y + axes.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a filled convex polygon (fan around `center`)
pub fn polygon(center: Vec2, points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity(points.len() * 3);
    for (i, p1) in points.iter().enumerate() {
        let p2 = points[(i + 1) % points.len()];
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}
