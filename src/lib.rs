//! Pixel Plumber - simulation core for a 2D side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, session state machine)
//! - `config`: Explicit game configuration passed to session construction
//! - `error`: Load-time error types
//!
//! Rendering, audio and input devices live outside this crate. They feed a
//! [`sim::TickInput`] into [`sim::tick`] once per frame and read back a
//! [`sim::FrameSnapshot`] plus the drained [`sim::GameEvent`]s.

pub mod config;
pub mod error;
pub mod sim;

pub use config::GameConfig;
pub use error::{ConfigError, LevelError};

/// Default tuning constants. [`GameConfig::default`] is built from these.
pub mod consts {
    /// Logical ticks per second (pacing is external)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Height of the ground strip at the bottom of the screen
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.8;
    /// Maximum fall speed for bodies (units/tick)
    pub const TERMINAL_VELOCITY: f32 = 20.0;
    /// Maximum fall speed for walking items (mushrooms)
    pub const ITEM_TERMINAL_VELOCITY: f32 = 10.0;
    /// Previous-frame tolerance for landing on a platform top
    pub const LANDING_TOLERANCE: f32 = 5.0;
    /// Slack when deciding whether a body's feet are still on the ground line
    pub const GROUND_EPSILON: f32 = 0.01;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_JUMP_POWER: f32 = 15.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const SMALL_PLAYER_HEIGHT: f32 = 40.0;
    pub const SUPER_PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_SPAWN_X: f32 = 100.0;

    /// Stomp classification tolerance (pixels below enemy center).
    /// Tunable; not derived from anything physical.
    pub const STOMP_TOLERANCE: f32 = 5.0;
    /// Upward velocity given to the player after a stomp
    pub const STOMP_BOUNCE: f32 = 10.0;
    /// Invincibility window after a demotion (ticks). Tunable.
    pub const INVINCIBILITY_TICKS: u32 = 120;
    /// Transform flash after a power change (ticks)
    pub const TRANSFORM_TICKS: u32 = 20;

    /// Speed boost power-up
    pub const SPEED_BOOST_TICKS: u32 = 300;
    pub const SPEED_BOOST_MULTIPLIER: f32 = 1.5;

    /// Fire power
    pub const MAX_FIREBALLS: usize = 2;
    pub const SHOOT_COOLDOWN_TICKS: u32 = 15;
    pub const FIREBALL_SIZE: f32 = 12.0;
    pub const FIREBALL_SPEED: f32 = 8.0;
    pub const FIREBALL_LAUNCH_VY: f32 = -3.0;
    pub const FIREBALL_GRAVITY: f32 = 0.5;
    pub const FIREBALL_BOUNCE: f32 = 8.0;
    pub const FIREBALL_LIFETIME: u32 = 180;

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 40.0;
    pub const ENEMY_SPEED: f32 = 1.5;
    pub const ENEMY_DEATH_TICKS: u32 = 30;
    pub const ENEMY_DEATH_BOUNCE: f32 = 8.0;
    /// Horizontal distance at which a stalker starts chasing
    pub const CHASE_RANGE: f32 = 200.0;
    /// Bodies this far below the screen are removed
    pub const WORLD_KILL_MARGIN: f32 = 100.0;

    /// Item and block geometry
    pub const BLOCK_SIZE: f32 = 40.0;
    pub const BLOCK_BUMP: f32 = -10.0;
    pub const BLOCK_BUMP_DECAY: f32 = 2.0;
    pub const ITEM_SIZE: f32 = 30.0;
    pub const COIN_SIZE: f32 = 20.0;
    pub const MUSHROOM_SPEED: f32 = 2.0;
    pub const ITEM_EMERGE_TICKS: u32 = 40;
    pub const PIPE_WIDTH: f32 = 60.0;
    pub const PIPE_SEGMENT_HEIGHT: f32 = 40.0;
    pub const FLAG_WIDTH: f32 = 60.0;
    pub const FLAG_HEIGHT: f32 = 200.0;

    /// Session rules
    pub const MAX_LIVES: u32 = 3;
    pub const MAX_LEVEL: u32 = 3;
    /// Seconds on the level clock
    pub const LEVEL_TIME: u32 = 300;
    pub const COMBO_WINDOW_TICKS: u32 = 120;
    pub const COMBO_BASE_BONUS: u64 = 100;
    /// Score per remaining second when the flag is reached
    pub const TIME_BONUS_PER_SECOND: u64 = 10;

    /// Points
    pub const COIN_SCORE: u64 = 100;
    pub const POWER_UP_BLOCK_SCORE: u64 = 1000;
    pub const BRICK_SCORE: u64 = 50;
    pub const FIREBALL_KILL_SCORE: u64 = 100;
    pub const EXTRA_LIFE_SCORE: u64 = 100;
    pub const SPEED_BOOST_SCORE: u64 = 50;

    /// Maximum live particles
    pub const MAX_PARTICLES: usize = 256;
}
