//! Axis-aligned bounding boxes for centered bodies
//!
//! Every body is a rectangle described by its center and its full size.
//! Collision is a plain AABB overlap test; boxes that share an edge overlap.

use glam::DVec2;

use super::body::Body;

/// Edges of a centered box (screen space, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    /// Build bounds from a center point and full width/height
    pub fn from_center(center: DVec2, size: DVec2) -> Self {
        let half = size / 2.0;
        Self {
            left: center.x - half.x,
            right: center.x + half.x,
            top: center.y - half.y,
            bottom: center.y + half.y,
        }
    }

    /// True if there is a strictly positive gap along either axis
    pub fn separated_from(&self, other: &Bounds) -> bool {
        self.right < other.left
            || self.bottom < other.top
            || self.left > other.right
            || self.top > other.bottom
    }
}

/// Test whether two bodies overlap.
///
/// A body never collides with itself: identity is checked by address, so two
/// distinct bodies with identical geometry still collide.
pub fn colliding(a: &Body, b: &Body) -> bool {
    if std::ptr::eq(a, b) {
        return false;
    }
    !a.bounds().separated_from(&b.bounds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::{Bullet, Invader};
    use proptest::prelude::*;

    fn bullet_at(x: f64, y: f64) -> Body {
        Body::Bullet(Bullet::new(DVec2::new(x, y), DVec2::ZERO))
    }

    fn boxed(x: f64, y: f64, w: f64, h: f64) -> Body {
        let mut body = bullet_at(x, y);
        if let Body::Bullet(b) = &mut body {
            b.size = DVec2::new(w, h);
        }
        body
    }

    #[test]
    fn test_bounds_from_center() {
        let b = Bounds::from_center(DVec2::new(50.0, 50.0), DVec2::new(15.0, 15.0));
        assert_eq!(b.left, 42.5);
        assert_eq!(b.right, 57.5);
        assert_eq!(b.top, 42.5);
        assert_eq!(b.bottom, 57.5);
    }

    #[test]
    fn test_body_never_collides_with_itself() {
        let body = bullet_at(10.0, 10.0);
        assert!(!colliding(&body, &body));
    }

    #[test]
    fn test_identical_distinct_bodies_collide() {
        let a = bullet_at(10.0, 10.0);
        let b = bullet_at(10.0, 10.0);
        assert!(colliding(&a, &b));
    }

    #[test]
    fn test_bullet_inside_invader() {
        let bullet = bullet_at(50.0, 50.0);
        let invader = Body::Invader(Invader::new(DVec2::new(50.0, 50.0)));
        assert!(colliding(&bullet, &invader));
        assert!(colliding(&invader, &bullet));
    }

    #[test]
    fn test_touching_edges_collide() {
        // Right edge of a at 10, left edge of b at 10
        let a = boxed(5.0, 0.0, 10.0, 10.0);
        let b = boxed(15.0, 0.0, 10.0, 10.0);
        assert!(colliding(&a, &b));

        // Same along y
        let c = boxed(0.0, 5.0, 10.0, 10.0);
        let d = boxed(0.0, 15.0, 10.0, 10.0);
        assert!(colliding(&c, &d));
    }

    #[test]
    fn test_tiny_gap_separates() {
        let a = boxed(5.0, 0.0, 10.0, 10.0);
        let b = boxed(15.5, 0.0, 10.0, 10.0);
        assert!(!colliding(&a, &b));
    }

    #[test]
    fn test_slight_overlap_collides() {
        let a = boxed(5.0, 0.0, 10.0, 10.0);
        let b = boxed(14.9, 0.0, 10.0, 10.0);
        assert!(colliding(&a, &b));
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(
            ax in -500.0f64..500.0, ay in -500.0f64..500.0,
            aw in 0.5f64..50.0, ah in 0.5f64..50.0,
            bx in -500.0f64..500.0, by in -500.0f64..500.0,
            bw in 0.5f64..50.0, bh in 0.5f64..50.0,
        ) {
            let a = boxed(ax, ay, aw, ah);
            let b = boxed(bx, by, bw, bh);
            prop_assert_eq!(colliding(&a, &b), colliding(&b, &a));
        }

        #[test]
        fn prop_gap_means_no_collision(
            ax in -500.0f64..500.0, ay in -500.0f64..500.0,
            aw in 0.5f64..50.0, ah in 0.5f64..50.0,
            bw in 0.5f64..50.0, bh in 0.5f64..50.0,
            gap in 1.0f64..100.0,
            horizontal in any::<bool>(),
        ) {
            let a = boxed(ax, ay, aw, ah);
            let b = if horizontal {
                boxed(ax + aw / 2.0 + gap + bw / 2.0, ay, bw, bh)
            } else {
                boxed(ax, ay + ah / 2.0 + gap + bh / 2.0, bw, bh)
            };
            prop_assert!(!colliding(&a, &b));
            prop_assert!(!colliding(&b, &a));
        }
    }
}
