//! Enemies: one body record plus a behavior variant
//!
//! Per-variant behavior is looked up in a capability table ([`Behavior`]) keyed
//! by [`EnemyKind`] instead of being spread across a type hierarchy.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::resolve_axis;
use super::entity::Body;
use super::geom::Aabb;
use super::physics::{PhysicsParams, Terrain, below_world, step_body};
use crate::config::GameConfig;
use crate::consts::{CHASE_RANGE, ENEMY_DEATH_BOUNCE, ENEMY_DEATH_TICKS};

/// Behavior variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Walks back and forth, happily off ledges
    Goomba,
    /// Turns around instead of walking off a ledge
    EdgeWalker,
    /// Chases the player when close, patrols otherwise
    Stalker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    Patrol,
    Chase,
    Idle,
}

/// Capability table entry for one [`EnemyKind`]
pub struct Behavior {
    pub turn_at_edges: bool,
    /// Chooses `ai_state` and horizontal velocity. Gets the player's center x.
    pub think: fn(&mut Enemy, f32),
}

const GOOMBA: Behavior = Behavior {
    turn_at_edges: false,
    think: think_patrol,
};

const EDGE_WALKER: Behavior = Behavior {
    turn_at_edges: true,
    think: think_patrol,
};

const STALKER: Behavior = Behavior {
    turn_at_edges: false,
    think: think_stalk,
};

impl EnemyKind {
    pub fn behavior(self) -> &'static Behavior {
        match self {
            EnemyKind::Goomba => &GOOMBA,
            EnemyKind::EdgeWalker => &EDGE_WALKER,
            EnemyKind::Stalker => &STALKER,
        }
    }
}

fn think_patrol(enemy: &mut Enemy, player_x: f32) {
    enemy.drive(player_x);
}

fn think_stalk(enemy: &mut Enemy, player_x: f32) {
    if enemy.ai_state != AiState::Idle {
        let distance = (player_x - enemy.body.rect().centerx()).abs();
        enemy.ai_state = if distance <= CHASE_RANGE {
            AiState::Chase
        } else {
            AiState::Patrol
        };
    }
    enemy.drive(player_x);
}

/// What an enemy update produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnemyStep {
    /// Dropped out of the world this tick
    pub fell_out: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub body: Body,
    /// -1.0 left, 1.0 right
    pub direction: f32,
    pub speed: f32,
    pub start_x: f32,
    pub patrol_range: f32,
    pub ai_state: AiState,
    /// Flattened by a stomp (as opposed to burned by a fireball)
    pub is_stomped: bool,
    /// Ticks spent dead
    pub death_timer: u32,
    pub turn_at_edges: bool,
}

impl Enemy {
    pub fn new(
        id: u32,
        kind: EnemyKind,
        x: f32,
        y: f32,
        patrol_range: f32,
        config: &GameConfig,
    ) -> Self {
        Self {
            id,
            kind,
            body: Body::new(x, y, config.enemy_width, config.enemy_height),
            direction: 1.0,
            speed: config.enemy_speed,
            start_x: x,
            patrol_range,
            ai_state: AiState::Patrol,
            is_stomped: false,
            death_timer: 0,
            turn_at_edges: kind.behavior().turn_at_edges,
        }
    }

    /// Stand still until further notice
    pub fn idle(mut self) -> Self {
        self.ai_state = AiState::Idle;
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.body.is_alive
    }

    /// Set horizontal velocity from `ai_state`. Patrol bounds flip the
    /// direction before the velocity is applied.
    fn drive(&mut self, player_x: f32) {
        match self.ai_state {
            AiState::Idle => self.body.vel.x = 0.0,
            AiState::Patrol => {
                let x = self.body.pos.x;
                if x > self.start_x + self.patrol_range {
                    self.direction = -1.0;
                } else if x < self.start_x - self.patrol_range {
                    self.direction = 1.0;
                }
                self.body.vel.x = self.speed * self.direction;
            }
            AiState::Chase => {
                self.direction = if player_x < self.body.rect().centerx() {
                    -1.0
                } else {
                    1.0
                };
                self.body.vel.x = self.speed * self.direction;
            }
        }
    }

    /// One tick: AI hook, then physics against terrain and blocks.
    ///
    /// `player_x` is the player's center x.
    pub fn update(
        &mut self,
        terrain: &Terrain,
        blocks: &[Aabb],
        player_x: f32,
        config: &GameConfig,
    ) -> EnemyStep {
        let mut step = EnemyStep::default();

        if !self.is_alive() {
            self.update_dead(terrain, config);
            return step;
        }

        (self.kind.behavior().think)(self, player_x);

        if self.turn_at_edges && self.body.grounded && self.check_edge(terrain, blocks) {
            self.direction = -self.direction;
            self.body.vel.x = self.speed * self.direction;
        }

        let contacts = step_body(
            &mut self.body,
            terrain,
            PhysicsParams::for_bodies(config),
            true,
        );
        if contacts.hit_wall {
            self.on_wall_collision();
        }

        for block in blocks {
            if let Some(contact) = resolve_axis(&mut self.body, block) {
                if contact.side.is_horizontal() {
                    self.on_wall_collision();
                }
            }
        }

        step.fell_out = self.check_world_bounds(config.screen_height);
        step
    }

    fn update_dead(&mut self, terrain: &Terrain, config: &GameConfig) {
        self.death_timer += 1;
        if self.is_stomped {
            // Flattened: pops up and settles back on whatever is below
            self.body.vel.x = 0.0;
            step_body(
                &mut self.body,
                terrain,
                PhysicsParams::for_bodies(config),
                false,
            );
        } else {
            // Burned: tumbles out of the world, ignoring terrain
            self.body.apply_gravity(config.gravity, config.terminal_velocity);
            self.body.apply_friction();
            self.body.integrate();
        }
        if self.death_timer > ENEMY_DEATH_TICKS
            || below_world(&self.body.rect(), config.screen_height)
        {
            self.body.is_active = false;
        }
    }

    /// Killed from above: flatten and bounce
    pub fn on_stomped(&mut self) {
        if !self.is_alive() {
            return;
        }
        self.body.is_alive = false;
        self.is_stomped = true;
        self.death_timer = 0;
        self.body.resize_height_bottom_anchored(self.body.size.y / 2.0);
        self.body.vel = Vec2::new(0.0, -ENEMY_DEATH_BOUNCE);
    }

    /// Killed by a fireball: knocked up and away
    pub fn kill(&mut self, knock_direction: f32) {
        if !self.is_alive() {
            return;
        }
        self.body.is_alive = false;
        self.is_stomped = false;
        self.death_timer = 0;
        self.body.vel = Vec2::new(3.0 * knock_direction, -ENEMY_DEATH_BOUNCE);
    }

    pub fn on_wall_collision(&mut self) {
        self.direction = -self.direction;
        self.body.vel.x = 0.0;
    }

    /// True if there is nothing to stand on just ahead of the leading foot
    pub fn check_edge(&self, terrain: &Terrain, blocks: &[Aabb]) -> bool {
        let rect = self.body.rect();
        let probe = Vec2::new(
            if self.direction > 0.0 {
                rect.right() + 1.0
            } else {
                rect.left() - 1.0
            },
            rect.bottom() + 5.0,
        );
        !(terrain.has_support_at(probe) || blocks.iter().any(|b| b.contains_point(probe)))
    }

    /// Deactivate once fallen well below the screen
    pub fn check_world_bounds(&mut self, screen_height: f32) -> bool {
        if below_world(&self.body.rect(), screen_height) {
            self.body.is_alive = false;
            self.body.is_active = false;
            return true;
        }
        false
    }
}
