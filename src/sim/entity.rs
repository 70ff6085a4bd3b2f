//! The shared physical body record
//!
//! Every simulated thing (player, enemies, walking items, fireballs) embeds a
//! [`Body`]. The bounding box is always derived from `pos + hitbox_offset` and
//! `size`, so it cannot drift from the authoritative position.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Aabb;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Authoritative position (top-left of the sprite)
    pub pos: Vec2,
    pub vel: Vec2,
    /// Hitbox size
    pub size: Vec2,
    /// Offset from `pos` to the hitbox's top-left corner
    pub hitbox_offset: Vec2,
    pub is_alive: bool,
    /// False means eligible for removal
    pub is_active: bool,
    pub gravity_scale: f32,
    pub friction: f32,
    /// Set by a downward collision this frame
    pub grounded: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size: Vec2::new(width.max(0.0), height.max(0.0)),
            hitbox_offset: Vec2::ZERO,
            is_alive: true,
            is_active: true,
            gravity_scale: 1.0,
            friction: 0.8,
            grounded: false,
        }
    }

    /// Current bounding box
    #[inline]
    pub fn rect(&self) -> Aabb {
        Aabb::from_pos_size(self.pos + self.hitbox_offset, self.size)
    }

    /// `velocity.y += gravity * gravity_scale`, clamped to `terminal`
    pub fn apply_gravity(&mut self, gravity: f32, terminal: f32) {
        self.vel.y = (self.vel.y + gravity * self.gravity_scale).min(terminal);
    }

    pub fn apply_friction(&mut self) {
        self.vel.x *= self.friction;
    }

    /// `position += velocity`
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    pub fn set_left(&mut self, x: f32) {
        self.pos.x = x - self.hitbox_offset.x;
    }

    pub fn set_right(&mut self, x: f32) {
        self.pos.x = x - self.size.x - self.hitbox_offset.x;
    }

    pub fn set_top(&mut self, y: f32) {
        self.pos.y = y - self.hitbox_offset.y;
    }

    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y - self.size.y - self.hitbox_offset.y;
    }

    /// Change hitbox height keeping the feet planted
    pub fn resize_height_bottom_anchored(&mut self, height: f32) {
        let bottom = self.rect().bottom();
        self.size.y = height.max(0.0);
        self.set_bottom(bottom);
    }

    /// Stop all motion
    pub fn halt(&mut self) {
        self.vel = Vec2::ZERO;
    }
}
