//! Collision detection and response for axis-aligned boxes
//!
//! Pure functions, no hidden state. Penetration is measured per axis from the
//! box centers; resolution pushes a body out along the axis of least
//! penetration.

use glam::Vec2;

use super::entity::Body;
use super::geom::Aabb;

/// Which face of the static rectangle a body was pushed out of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Body landed on the rectangle
    Top,
    /// Body struck the rectangle from below
    Bottom,
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

/// Result of a resolved overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub side: Side,
    /// Unit normal pointing from the static rect toward the body
    pub normal: Vec2,
    /// Distance the body was pushed
    pub penetration: f32,
}

/// True iff the boxes share interior area. Touching edges do not count, so
/// a body resting exactly on a surface is not overlapping it.
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.left() < b.right() && b.left() < a.right() && a.top() < b.bottom() && b.top() < a.bottom()
}

/// Per-axis penetration `(dx, dy)`. Both positive iff the boxes overlap.
pub fn overlap_amount(a: &Aabb, b: &Aabb) -> Vec2 {
    let dx = (a.width + b.width) / 2.0 - (a.centerx() - b.centerx()).abs();
    let dy = (a.height + b.height) / 2.0 - (a.centery() - b.centery()).abs();
    Vec2::new(dx, dy)
}

/// Normal on the axis of least penetration, pointing from `b` toward `a`
pub fn collision_normal(a: &Aabb, b: &Aabb) -> Vec2 {
    let overlap = overlap_amount(a, b);
    if overlap.x < overlap.y {
        Vec2::new(if a.centerx() > b.centerx() { 1.0 } else { -1.0 }, 0.0)
    } else {
        Vec2::new(0.0, if a.centery() > b.centery() { 1.0 } else { -1.0 })
    }
}

/// Push `body` out of `solid` along the axis of least penetration.
///
/// Horizontal resolution zeroes `vel.x`; vertical resolution zeroes `vel.y`.
/// Landing on top sets `grounded`. Ties go to the vertical axis. Callers that
/// own enemies react to horizontal contacts (direction reversal).
pub fn resolve_axis(body: &mut Body, solid: &Aabb) -> Option<Contact> {
    let rect = body.rect();
    if !overlaps(&rect, solid) {
        return None;
    }

    let overlap = overlap_amount(&rect, solid);
    let normal = collision_normal(&rect, solid);

    if overlap.x < overlap.y {
        let side = if normal.x > 0.0 {
            body.set_left(solid.right());
            Side::Right
        } else {
            body.set_right(solid.left());
            Side::Left
        };
        body.vel.x = 0.0;
        Some(Contact {
            side,
            normal,
            penetration: overlap.x,
        })
    } else {
        let side = if normal.y > 0.0 {
            body.set_top(solid.bottom());
            Side::Bottom
        } else {
            body.set_bottom(solid.top());
            body.grounded = true;
            Side::Top
        };
        body.vel.y = 0.0;
        Some(Contact {
            side,
            normal,
            penetration: overlap.y,
        })
    }
}

/// Stomp (kill) versus side bump (damage).
///
/// The velocity sign is checked first: a rising player never stomps, no
/// matter where its feet are.
pub fn is_stomp(player: &Aabb, player_vel_y: f32, enemy: &Aabb, tolerance: f32) -> bool {
    if player_vel_y <= 0.0 {
        return false;
    }
    player.bottom() <= enemy.centery() + tolerance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::STOMP_TOLERANCE;
    use proptest::prelude::*;

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let floor = Aabb::new(0.0, 100.0, 100.0, 20.0);
        let resting = Aabb::new(10.0, 60.0, 40.0, 40.0);
        assert!(!overlaps(&resting, &floor));
        let sunk = Aabb::new(10.0, 61.0, 40.0, 40.0);
        assert!(overlaps(&sunk, &floor));
    }

    #[test]
    fn test_overlap_amount() {
        let a = Aabb::new(0.0, 0.0, 40.0, 40.0);
        let b = Aabb::new(30.0, 35.0, 40.0, 40.0);
        let o = overlap_amount(&a, &b);
        assert!((o.x - 10.0).abs() < 1e-6);
        assert!((o.y - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_resolve_landing_sets_grounded() {
        let platform = Aabb::new(0.0, 100.0, 200.0, 20.0);
        let mut body = Body::new(50.0, 65.0, 40.0, 40.0);
        body.vel.y = 5.0;
        let contact = resolve_axis(&mut body, &platform).unwrap();
        assert_eq!(contact.side, Side::Top);
        assert_eq!(contact.normal, Vec2::new(0.0, -1.0));
        assert_eq!(body.rect().bottom(), 100.0);
        assert_eq!(body.vel.y, 0.0);
        assert!(body.grounded);
    }

    #[test]
    fn test_resolve_head_bump() {
        let block = Aabb::new(0.0, 100.0, 40.0, 40.0);
        let mut body = Body::new(0.0, 130.0, 40.0, 40.0);
        body.vel.y = -10.0;
        let contact = resolve_axis(&mut body, &block).unwrap();
        assert_eq!(contact.side, Side::Bottom);
        assert_eq!(body.rect().top(), 140.0);
        assert_eq!(body.vel.y, 0.0);
        assert!(!body.grounded);
    }

    #[test]
    fn test_resolve_side_zeroes_horizontal_velocity() {
        let wall = Aabb::new(100.0, 0.0, 60.0, 200.0);
        let mut body = Body::new(65.0, 50.0, 40.0, 40.0);
        body.vel = Vec2::new(3.0, 1.0);
        let contact = resolve_axis(&mut body, &wall).unwrap();
        assert_eq!(contact.side, Side::Left);
        assert!(contact.side.is_horizontal());
        assert_eq!(body.rect().right(), 100.0);
        assert_eq!(body.vel, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_resolve_without_overlap_is_noop() {
        let wall = Aabb::new(100.0, 0.0, 60.0, 200.0);
        let mut body = Body::new(0.0, 0.0, 40.0, 40.0);
        body.vel = Vec2::new(3.0, 1.0);
        assert!(resolve_axis(&mut body, &wall).is_none());
        assert_eq!(body.vel, Vec2::new(3.0, 1.0));
    }

    #[test]
    fn test_stomp_tie_break_on_velocity_sign() {
        let enemy = Aabb::new(0.0, 500.0, 40.0, 40.0);
        // Feet one pixel above the enemy's center
        let player = Aabb::new(0.0, enemy.centery() - 1.0 - 40.0, 40.0, 40.0);
        assert!(is_stomp(&player, 5.0, &enemy, STOMP_TOLERANCE));
        assert!(!is_stomp(&player, -5.0, &enemy, STOMP_TOLERANCE));
        assert!(!is_stomp(&player, 0.0, &enemy, STOMP_TOLERANCE));
    }

    #[test]
    fn test_stomp_tolerance_boundary() {
        let enemy = Aabb::new(0.0, 500.0, 40.0, 40.0);
        let at_limit = Aabb::new(0.0, enemy.centery() + 5.0 - 40.0, 40.0, 40.0);
        assert!(is_stomp(&at_limit, 1.0, &enemy, 5.0));
        let past = Aabb::new(0.0, enemy.centery() + 6.0 - 40.0, 40.0, 40.0);
        assert!(!is_stomp(&past, 1.0, &enemy, 5.0));
    }

    proptest! {
        #[test]
        fn prop_overlap_amount_positive_iff_overlapping(
            ax in -200.0f32..200.0, ay in -200.0f32..200.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bx in -200.0f32..200.0, by in -200.0f32..200.0,
            bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a = Aabb::new(ax, ay, aw, ah);
            let b = Aabb::new(bx, by, bw, bh);
            let o = overlap_amount(&a, &b);
            // Skip knife-edge cases where float rounding decides
            prop_assume!(o.x.abs() > 1e-3 && o.y.abs() > 1e-3);
            prop_assert_eq!(overlaps(&a, &b), o.x > 0.0 && o.y > 0.0);
        }

        #[test]
        fn prop_resolution_separates(
            bx in 0.0f32..160.0, by in 60.0f32..120.0,
            vx in -5.0f32..5.0, vy in -5.0f32..5.0,
        ) {
            let solid = Aabb::new(40.0, 100.0, 120.0, 40.0);
            let mut body = Body::new(bx, by, 40.0, 40.0);
            body.vel = Vec2::new(vx, vy);
            if let Some(contact) = resolve_axis(&mut body, &solid) {
                let r = body.rect();
                prop_assert!(!overlaps(&r, &solid) || contact.penetration < 1e-3);
                if contact.side.is_horizontal() {
                    prop_assert_eq!(body.vel.x, 0.0);
                } else {
                    prop_assert_eq!(body.vel.y, 0.0);
                }
            }
        }

        #[test]
        fn prop_rising_never_stomps(
            vy in -30.0f32..=0.0,
            feet in 400.0f32..600.0,
        ) {
            let enemy = Aabb::new(0.0, 500.0, 40.0, 40.0);
            let player = Aabb::new(0.0, feet - 40.0, 40.0, 40.0);
            prop_assert!(!is_stomp(&player, vy, &enemy, STOMP_TOLERANCE));
        }
    }
}
