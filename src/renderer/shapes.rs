//! Shape generation for 2D primitives

use super::vertex::Vertex;

/// Vertices emitted per rectangle (two triangles)
pub const RECT_VERTICES: usize = 6;

/// Generate vertices for a filled axis-aligned rectangle.
///
/// `(x, y)` is the top-left corner in pixel space (y down).
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> [Vertex; RECT_VERTICES] {
    let (left, top, right, bottom) = (x, y, x + w, y + h);
    [
        Vertex::new(left, top, color),
        Vertex::new(left, bottom, color),
        Vertex::new(right, top, color),
        Vertex::new(right, top, color),
        Vertex::new(left, bottom, color),
        Vertex::new(right, bottom, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_corners() {
        let verts = rect(10.0, 20.0, 4.0, 6.0, [1.0; 4]);
        let mut corners: Vec<[f32; 2]> = verts.iter().map(|v| v.position).collect();
        corners.sort_by(|a, b| a.partial_cmp(b).unwrap());
        corners.dedup();
        assert_eq!(
            corners,
            vec![[10.0, 20.0], [10.0, 26.0], [14.0, 20.0], [14.0, 26.0]]
        );
    }

    #[test]
    fn test_rect_triangles_share_diagonal() {
        let verts = rect(0.0, 0.0, 2.0, 2.0, [1.0; 4]);
        // Second triangle reuses the top-right / bottom-left diagonal
        assert_eq!(verts[2], verts[3]);
        assert_eq!(verts[1], verts[4]);
    }
}
