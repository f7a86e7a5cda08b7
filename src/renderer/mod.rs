//! Rendering module
//!
//! The game only ever clears the surface and fills circles. `VertexBatch`
//! turns those calls into a triangle list ready for a GPU upload.

pub mod shapes;
pub mod vertex;

use glam::Vec2;

pub use vertex::Vertex;

use crate::consts::{BACKGROUND, BUTTON_SEGMENTS};

/// Drawing surface handed to the game each frame
pub trait DrawContext {
    /// Clear the whole surface
    fn clear(&mut self, color: [f32; 4]);
    /// Fill a circle
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]);
}

/// One frame worth of triangles
#[derive(Debug, Clone)]
pub struct VertexBatch {
    clear_color: [f32; 4],
    vertices: Vec<Vertex>,
    segments: u32,
}

impl Default for VertexBatch {
    fn default() -> Self {
        Self::new(BUTTON_SEGMENTS)
    }
}

impl VertexBatch {
    pub fn new(segments: u32) -> Self {
        Self {
            clear_color: BACKGROUND,
            vertices: Vec::new(),
            segments: segments.max(3),
        }
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw bytes for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl DrawContext for VertexBatch {
    fn clear(&mut self, color: [f32; 4]) {
        self.clear_color = color;
        self.vertices.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        shapes::circle(&mut self.vertices, center, radius, color, self.segments);
    }
}
