//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (cosmetic effects)
//! - Stable iteration order (insertion order, IDs never reused)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod effects;
pub mod enemy;
pub mod entity;
pub mod geom;
pub mod items;
pub mod layouts;
pub mod level;
pub mod physics;
pub mod player;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Contact, Side, is_stomp, overlaps, resolve_axis};
pub use effects::{Effects, FloatingText, Particle, ParticleKind};
pub use enemy::{AiState, Enemy, EnemyKind};
pub use entity::Body;
pub use geom::{Aabb, Span};
pub use items::{Block, BlockContent, BlockKind, HitOutcome, PowerUpKind};
pub use level::Level;
pub use physics::{Terrain, step_body};
pub use player::{DamageOutcome, Fireball, Player, PowerState};
pub use snapshot::{EntityKind, EntityView, FrameSnapshot, PlayerView};
pub use state::{GameEvent, GameState, GameStatus, ScoreReason};
pub use tick::{Command, TickInput, tick};
