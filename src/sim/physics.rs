//! Per-body physics step
//!
//! Gravity, integration and collision response against static terrain.
//! Horizontal motion is integrated and resolved before vertical motion so a
//! body cannot tunnel sideways through a platform's vertical edge.

use glam::Vec2;

use super::collision::overlaps;
use super::entity::Body;
use super::geom::{Aabb, Span};
use crate::config::GameConfig;
use crate::consts::{GROUND_EPSILON, LANDING_TOLERANCE, WORLD_KILL_MARGIN};

/// Static collision surfaces for one level
#[derive(Debug, Clone, Default)]
pub struct Terrain {
    /// Ground surface line
    pub ground_y: f32,
    /// Gaps in the ground
    pub pits: Vec<Span>,
    /// Platforms and pipes
    pub solids: Vec<Aabb>,
}

impl Terrain {
    /// Floor height under a box, or `None` if the box lies entirely over a pit
    pub fn floor_under(&self, rect: &Aabb) -> Option<f32> {
        match self.pit_under(rect) {
            Some(_) => None,
            None => Some(self.ground_y),
        }
    }

    /// The pit a box lies entirely over
    pub fn pit_under(&self, rect: &Aabb) -> Option<Span> {
        self.pits
            .iter()
            .copied()
            .find(|pit| pit.covers(rect.left(), rect.right()))
    }

    /// True once a box's feet are below the ground line, which only happens
    /// inside a pit. The ground never catches a sunk body again.
    pub fn is_sunk(&self, rect: &Aabb) -> bool {
        rect.bottom() > self.ground_y + GROUND_EPSILON
    }

    /// Whether a point is standing on something solid
    pub fn has_support_at(&self, p: Vec2) -> bool {
        if p.y >= self.ground_y && !self.pits.iter().any(|pit| pit.contains(p.x)) {
            return true;
        }
        self.solids.iter().any(|s| s.contains_point(p))
    }
}

/// Gravity parameters for one class of body
#[derive(Debug, Clone, Copy)]
pub struct PhysicsParams {
    pub gravity: f32,
    pub terminal_velocity: f32,
}

impl PhysicsParams {
    pub fn for_bodies(config: &GameConfig) -> Self {
        Self {
            gravity: config.gravity,
            terminal_velocity: config.terminal_velocity,
        }
    }

    pub fn for_items(config: &GameConfig) -> Self {
        Self {
            gravity: config.gravity,
            terminal_velocity: config.item_terminal_velocity,
        }
    }
}

/// What a body touched during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepContacts {
    pub grounded: bool,
    pub hit_wall: bool,
    pub hit_ceiling: bool,
}

/// Advance a body one tick against the terrain.
///
/// 1. gravity (clamped to terminal velocity)
/// 2. horizontal move, pushed out of any solid it ran into
/// 3. vertical move: floor clamp first (never for a body already below the
///    ground line), then platform tops when falling onto them. With `solid_ceilings`, rising into a solid's underside stops the
///    body; otherwise solids are passable from below.
///
/// `grounded` is cleared before the vertical pass and only set by a
/// successful downward resolution.
pub fn step_body(
    body: &mut Body,
    terrain: &Terrain,
    params: PhysicsParams,
    solid_ceilings: bool,
) -> StepContacts {
    let mut contacts = StepContacts::default();

    body.apply_gravity(params.gravity, params.terminal_velocity);

    // Horizontal pass. Inside a pit the pit's sides are walls.
    let dir_x = body.vel.x;
    let pit = if terrain.is_sunk(&body.rect()) {
        terrain.pit_under(&body.rect())
    } else {
        None
    };
    body.pos.x += dir_x;
    if let Some(pit) = pit {
        let rect = body.rect();
        if rect.left() < pit.start {
            body.set_left(pit.start);
            body.vel.x = 0.0;
            contacts.hit_wall = true;
        } else if rect.right() > pit.end {
            body.set_right(pit.end);
            body.vel.x = 0.0;
            contacts.hit_wall = true;
        }
    }
    if dir_x != 0.0 {
        for solid in &terrain.solids {
            if !overlaps(&body.rect(), solid) {
                continue;
            }
            if dir_x > 0.0 {
                body.set_right(solid.left());
            } else {
                body.set_left(solid.right());
            }
            body.vel.x = 0.0;
            contacts.hit_wall = true;
        }
    }

    // Vertical pass
    body.grounded = false;
    let vel_y = body.vel.y;
    let prev_bottom = body.rect().bottom();
    body.pos.y += vel_y;

    let was_sunk = prev_bottom > terrain.ground_y + GROUND_EPSILON;
    if let Some(floor) = terrain.floor_under(&body.rect()) {
        if !was_sunk && body.rect().bottom() >= floor {
            body.set_bottom(floor);
            body.vel.y = 0.0;
            contacts.grounded = true;
        }
    }

    for solid in &terrain.solids {
        if !overlaps(&body.rect(), solid) {
            continue;
        }
        if vel_y > 0.0 && prev_bottom <= solid.top() + LANDING_TOLERANCE {
            body.set_bottom(solid.top());
            body.vel.y = 0.0;
            contacts.grounded = true;
        } else if vel_y < 0.0 && solid_ceilings {
            body.set_top(solid.bottom());
            body.vel.y = 0.0;
            contacts.hit_ceiling = true;
        }
    }

    body.grounded = contacts.grounded;
    contacts
}

/// True once a box has dropped well below the visible world
pub fn below_world(rect: &Aabb, screen_height: f32) -> bool {
    rect.bottom() > screen_height + WORLD_KILL_MARGIN
}
