//! WebGPU rendering module
//!
//! The world draws into a [`DrawSurface`]: a cleared canvas that accepts
//! filled axis-aligned rectangles in pixel coordinates. [`RectBatch`]
//! tessellates those rectangles into triangles for [`RenderState`].

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::{Vertex, colors};

/// A 2D target that can be cleared and filled with rectangles
pub trait DrawSurface {
    /// Erase everything drawn so far
    fn clear(&mut self);
    /// Fill the rectangle with top-left corner `(x, y)` and size `w` x `h`
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
}

/// Collects one frame of rectangles as triangle-list vertices
#[derive(Debug, Clone)]
pub struct RectBatch {
    vertices: Vec<Vertex>,
    color: [f32; 4],
}

impl Default for RectBatch {
    fn default() -> Self {
        Self::new(colors::BODY)
    }
}

impl RectBatch {
    pub fn new(color: [f32; 4]) -> Self {
        Self {
            vertices: Vec::new(),
            color,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn rect_count(&self) -> usize {
        self.vertices.len() / shapes::RECT_VERTICES
    }
}

impl DrawSurface for RectBatch {
    fn clear(&mut self) {
        self.vertices.clear();
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.vertices.extend(shapes::rect(x, y, w, h, self.color));
    }
}

/// Surface that records calls
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub clears: usize,
    pub rects: Vec<[f32; 4]>,
}

#[cfg(test)]
impl DrawSurface for RecordingSurface {
    fn clear(&mut self) {
        self.clears += 1;
        self.rects.clear();
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.rects.push([x, y, w, h]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_collects_rects() {
        let mut batch = RectBatch::default();
        batch.fill_rect(0.0, 0.0, 10.0, 10.0);
        batch.fill_rect(20.0, 20.0, 3.0, 3.0);
        assert_eq!(batch.rect_count(), 2);
        assert_eq!(batch.vertices().len(), 12);
        assert!(batch.vertices().iter().all(|v| v.color == colors::BODY));

        batch.clear();
        assert_eq!(batch.rect_count(), 0);
    }
}
