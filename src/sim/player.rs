//! The player character: movement, power tiers and fireballs

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::overlaps;
use super::entity::Body;
use super::physics::{PhysicsParams, StepContacts, Terrain, below_world, step_body};
use super::tick::TickInput;
use crate::config::GameConfig;
use crate::consts::*;

/// Power tiers, ordered weakest to strongest
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum PowerState {
    #[default]
    Small,
    Super,
    Fire,
}

/// Result of [`Player::take_damage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invincibility absorbed the hit
    Ignored,
    /// Collapsed to `Small`; invincibility granted
    Demoted,
    /// Already small: the caller must take a life
    Fatal,
}

impl DamageOutcome {
    #[inline]
    pub fn is_fatal(self) -> bool {
        self == DamageOutcome::Fatal
    }
}

/// A bouncing fireball thrown by a `Fire` player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fireball {
    pub body: Body,
    /// Ticks left before it burns out
    pub lifetime: u32,
    /// -1.0 left, 1.0 right
    pub direction: f32,
}

impl Fireball {
    pub fn new(center: Vec2, direction: f32) -> Self {
        let half = FIREBALL_SIZE / 2.0;
        let mut body = Body::new(center.x - half, center.y - half, FIREBALL_SIZE, FIREBALL_SIZE);
        body.vel = Vec2::new(FIREBALL_SPEED * direction, FIREBALL_LAUNCH_VY);
        Self {
            body,
            lifetime: FIREBALL_LIFETIME,
            direction,
        }
    }

    /// Fly, fall and bounce off the floor and platform tops
    pub fn update(&mut self, terrain: &Terrain, screen_height: f32) {
        self.lifetime = self.lifetime.saturating_sub(1);

        let sunk = terrain.is_sunk(&self.body.rect());
        self.body.pos.x += self.body.vel.x;
        // Below the ground line a fireball fizzles against the pit's side
        if sunk && terrain.pit_under(&self.body.rect()).is_none() {
            self.lifetime = 0;
            return;
        }
        self.body.vel.y += FIREBALL_GRAVITY;
        self.body.pos.y += self.body.vel.y;

        if let Some(floor) = terrain.floor_under(&self.body.rect()) {
            if !sunk && self.body.rect().bottom() >= floor {
                self.body.set_bottom(floor);
                self.body.vel.y = -FIREBALL_BOUNCE;
            }
        }
        for solid in &terrain.solids {
            if self.body.vel.y > 0.0 && overlaps(&self.body.rect(), solid) {
                self.body.set_bottom(solid.top());
                self.body.vel.y = -FIREBALL_BOUNCE;
            }
        }

        if below_world(&self.body.rect(), screen_height) {
            self.lifetime = 0;
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lifetime > 0
    }

    /// Consume the fireball (it hit something)
    pub fn extinguish(&mut self) {
        self.lifetime = 0;
    }
}

/// What happened during one player update
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerStep {
    pub jumped: bool,
    pub shot: bool,
    pub contacts: StepContacts,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub power: PowerState,
    pub facing_right: bool,
    pub invincible_timer: u32,
    pub speed_boost_timer: u32,
    /// Flash after a power change
    pub transform_timer: u32,
    pub shoot_cooldown: u32,
    /// In-flight fireballs, oldest first
    pub fireballs: Vec<Fireball>,
}

impl Player {
    /// A small player standing on the ground at `x`
    pub fn new(x: f32, config: &GameConfig) -> Self {
        let mut body = Body::new(x, 0.0, config.player_width, config.small_height);
        body.set_bottom(config.ground_y());
        Self {
            body,
            power: PowerState::Small,
            facing_right: true,
            invincible_timer: 0,
            speed_boost_timer: 0,
            transform_timer: 0,
            shoot_cooldown: 0,
            fireballs: Vec::new(),
        }
    }

    #[inline]
    pub fn on_ground(&self) -> bool {
        self.body.grounded
    }

    /// Advance one tick from the intent snapshot.
    ///
    /// Horizontal velocity is rebuilt from input every tick (no momentum).
    pub fn update(
        &mut self,
        input: &TickInput,
        terrain: &Terrain,
        config: &GameConfig,
    ) -> PlayerStep {
        let mut step = PlayerStep::default();

        let boosted = self.speed_boost_timer > 0;
        self.speed_boost_timer = self.speed_boost_timer.saturating_sub(1);
        self.invincible_timer = self.invincible_timer.saturating_sub(1);
        self.transform_timer = self.transform_timer.saturating_sub(1);
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);

        let speed = if boosted {
            config.player_speed * config.speed_boost_multiplier
        } else {
            config.player_speed
        };

        self.body.vel.x = 0.0;
        if input.move_left {
            self.body.vel.x = -speed;
            self.facing_right = false;
        }
        if input.move_right {
            self.body.vel.x = speed;
            self.facing_right = true;
        }

        if input.jump_pressed && self.on_ground() {
            self.body.vel.y = -config.jump_power;
            step.jumped = true;
        }
        if input.shoot_pressed {
            step.shot = self.shoot_fireball(config);
        }

        for fireball in &mut self.fireballs {
            fireball.update(terrain, config.screen_height);
        }
        self.fireballs.retain(Fireball::is_alive);

        step.contacts = step_body(
            &mut self.body,
            terrain,
            PhysicsParams::for_bodies(config),
            true,
        );

        // Left edge of the world
        if self.body.rect().left() < 0.0 {
            self.body.set_left(0.0);
            self.body.vel.x = 0.0;
        }

        step
    }

    /// Mushroom: `Small` to `Super` only
    pub fn power_up(&mut self, config: &GameConfig) -> bool {
        if self.power != PowerState::Small {
            return false;
        }
        self.power = PowerState::Super;
        self.body.resize_height_bottom_anchored(config.super_height);
        self.transform_timer = TRANSFORM_TICKS;
        true
    }

    /// Fire flower: promote to `Fire` from any lower tier
    pub fn fire_power_up(&mut self, config: &GameConfig) -> bool {
        if self.power >= PowerState::Fire {
            return false;
        }
        if self.power == PowerState::Small {
            self.body.resize_height_bottom_anchored(config.super_height);
        }
        self.power = PowerState::Fire;
        self.transform_timer = TRANSFORM_TICKS;
        true
    }

    /// Any hit collapses `Super` and `Fire` straight to `Small`
    pub fn take_damage(&mut self, config: &GameConfig) -> DamageOutcome {
        if self.invincible_timer > 0 {
            return DamageOutcome::Ignored;
        }
        if self.power == PowerState::Small {
            return DamageOutcome::Fatal;
        }
        self.power = PowerState::Small;
        self.body.resize_height_bottom_anchored(config.small_height);
        self.invincible_timer = config.invincibility_ticks;
        self.transform_timer = TRANSFORM_TICKS;
        DamageOutcome::Demoted
    }

    /// Throw a fireball. Rejected unless `Fire`, off cooldown and under the cap.
    pub fn shoot_fireball(&mut self, config: &GameConfig) -> bool {
        if self.power != PowerState::Fire
            || self.shoot_cooldown > 0
            || self.fireballs.len() >= config.max_fireballs
        {
            return false;
        }
        let direction = if self.facing_right { 1.0 } else { -1.0 };
        self.fireballs
            .push(Fireball::new(self.body.rect().center(), direction));
        self.shoot_cooldown = config.shoot_cooldown_ticks;
        true
    }

    pub fn activate_speed_boost(&mut self, config: &GameConfig) {
        self.speed_boost_timer = config.speed_boost_ticks;
    }

    /// Put the player back at the level start, standing and still
    pub fn respawn(&mut self, config: &GameConfig) {
        self.body.set_left(config.player_spawn_x);
        self.body.set_bottom(config.ground_y());
        self.body.halt();
        self.body.grounded = false;
        self.fireballs.clear();
    }

    /// Blink phase during invincibility (true = hidden this frame)
    pub fn flash_hidden(&self) -> bool {
        self.invincible_timer > 0 && (self.invincible_timer / 5) % 2 == 0
    }
}
