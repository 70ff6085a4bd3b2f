//! Read-only per-frame view for presentation layers
//!
//! A [`FrameSnapshot`] is a plain serializable copy of everything a renderer or
//! HUD needs. Holding one never borrows the session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::ParticleKind;
use super::enemy::EnemyKind;
use super::geom::{Aabb, Span};
use super::items::{BlockKind, PowerUpKind};
use super::player::PowerState;
use super::state::{GameState, GameStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub power: PowerState,
    pub facing_right: bool,
    pub invincible: bool,
    /// Blink phase; skip drawing the player when set
    pub flash_hidden: bool,
    pub transforming: bool,
    pub speed_boosted: bool,
    pub on_ground: bool,
}

/// What a dynamic entity is, for picking a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Enemy(EnemyKind),
    Block(BlockKind),
    /// A block that has already been hit
    SpentBlock,
    Coin,
    Mushroom,
    FireFlower,
    PowerUp(PowerUpKind),
    Fireball,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    /// 0 for entities without an ID (fireballs)
    pub id: u32,
    pub kind: EntityKind,
    pub rect: Aabb,
    pub alive: bool,
    /// Vertical draw offset: the block bump, or how deep an emerging item
    /// still sits inside its block
    pub offset_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub size: f32,
    pub angle: f32,
    /// 1.0 when fresh
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextView {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub status: GameStatus,
    pub level_index: u32,
    pub score: u64,
    pub lives: u32,
    pub time_remaining: u32,
    pub combo: u32,
    pub coins: u32,
    /// Left edge of the view, `max(0, player.centerx - screen_width / 3)`
    pub camera_x: f32,
    pub ticks: u64,
    pub player: PlayerView,
    pub entities: Vec<EntityView>,
    pub platforms: Vec<Aabb>,
    pub pipes: Vec<Aabb>,
    pub pits: Vec<Span>,
    pub flag: Aabb,
    pub particles: Vec<ParticleView>,
    pub texts: Vec<TextView>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        let level = &state.level;

        let mut entities = Vec::new();
        entities.extend(level.blocks.iter().map(|b| EntityView {
            id: b.id,
            kind: if b.hit {
                EntityKind::SpentBlock
            } else {
                EntityKind::Block(b.kind)
            },
            rect: b.rect,
            alive: !b.broken,
            offset_y: b.bump_offset,
        }));
        entities.extend(level.enemies.iter().map(|e| EntityView {
            id: e.id,
            kind: EntityKind::Enemy(e.kind),
            rect: e.body.rect(),
            alive: e.is_alive(),
            offset_y: 0.0,
        }));
        entities.extend(level.coins.iter().map(|c| EntityView {
            id: c.id,
            kind: EntityKind::Coin,
            rect: c.rect,
            alive: !c.collected,
            offset_y: 0.0,
        }));
        entities.extend(level.mushrooms.iter().map(|m| EntityView {
            id: m.id,
            kind: EntityKind::Mushroom,
            rect: m.rect(),
            alive: !m.is_spent(),
            offset_y: m.emerge_offset(),
        }));
        entities.extend(level.flowers.iter().map(|f| EntityView {
            id: f.id,
            kind: EntityKind::FireFlower,
            rect: f.rect,
            alive: !f.collected,
            offset_y: f.emerge_offset(),
        }));
        entities.extend(level.power_ups.iter().map(|p| EntityView {
            id: p.id,
            kind: EntityKind::PowerUp(p.kind),
            rect: p.rect,
            alive: !p.collected,
            offset_y: 0.0,
        }));
        entities.extend(player.fireballs.iter().map(|f| EntityView {
            id: 0,
            kind: EntityKind::Fireball,
            rect: f.body.rect(),
            alive: f.is_alive(),
            offset_y: 0.0,
        }));

        Self {
            status: state.status,
            level_index: state.level_index,
            score: state.score,
            lives: state.lives,
            time_remaining: state.time_remaining,
            combo: state.combo,
            coins: state.coins,
            camera_x: state.camera_x,
            ticks: state.ticks,
            player: PlayerView {
                pos: player.body.pos,
                size: player.body.size,
                power: player.power,
                facing_right: player.facing_right,
                invincible: player.invincible_timer > 0,
                flash_hidden: player.flash_hidden(),
                transforming: player.transform_timer > 0,
                speed_boosted: player.speed_boost_timer > 0,
                on_ground: player.on_ground(),
            },
            entities,
            platforms: level.platforms.iter().map(|p| p.rect).collect(),
            pipes: level.pipes.iter().map(|p| p.rect).collect(),
            pits: level.pits.clone(),
            flag: level.flag.rect,
            particles: state
                .effects
                .particles
                .iter()
                .map(|p| ParticleView {
                    kind: p.kind,
                    pos: p.pos,
                    size: p.size,
                    angle: p.angle,
                    alpha: p.life_fraction(),
                })
                .collect(),
            texts: state
                .effects
                .texts
                .iter()
                .map(|t| TextView {
                    x: t.x,
                    y: t.y,
                    text: t.text.clone(),
                })
                .collect(),
        }
    }

    /// Entities of one kind, in capture order
    pub fn entities_of(&self, kind: EntityKind) -> impl Iterator<Item = &EntityView> {
        self.entities.iter().filter(move |e| e.kind == kind)
    }

    /// True if `rect` is at least partly inside the visible window
    pub fn on_screen(&self, rect: &Aabb, screen_width: f32) -> bool {
        rect.right() > self.camera_x && rect.left() < self.camera_x + screen_width
    }
}

impl GameState {
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_snapshot_mirrors_session() {
        let state = GameState::new(GameConfig::default()).unwrap();
        let snap = state.snapshot();
        assert_eq!(snap.status, GameStatus::Playing);
        assert_eq!(snap.level_index, 1);
        assert_eq!(snap.lives, 3);
        assert_eq!(snap.time_remaining, 300);
        assert_eq!(snap.player.power, PowerState::Small);
        assert_eq!(snap.platforms.len(), state.level.platforms.len());
        assert_eq!(snap.pipes.len(), state.level.pipes.len());
        assert_eq!(
            snap.entities_of(EntityKind::Coin).count(),
            state.level.coins.len()
        );
        assert_eq!(
            snap.entities_of(EntityKind::Enemy(EnemyKind::Goomba)).count(),
            3
        );
        assert_eq!(snap.flag, state.level.flag.rect);
    }

    #[test]
    fn test_spent_blocks_change_kind() {
        let mut state = GameState::new(GameConfig::default()).unwrap();
        state.level.blocks[0].hit = true;
        let snap = state.snapshot();
        assert_eq!(snap.entities[0].kind, EntityKind::SpentBlock);
        assert_eq!(snap.entities[0].id, state.level.blocks[0].id);
    }

    #[test]
    fn test_emerging_items_rise_out_of_block() {
        let mut state = GameState::new(GameConfig::default()).unwrap();
        let block = state.level.blocks[0].rect;
        let mushroom = state.level.spawn_mushroom(&block);
        let flower = state.level.spawn_flower(&block);

        let offset = |snap: &FrameSnapshot, id: u32| {
            snap.entities
                .iter()
                .find(|e| e.id == id)
                .map(|e| e.offset_y)
                .unwrap()
        };
        let snap = state.snapshot();
        assert_eq!(offset(&snap, mushroom), 30.0);
        assert_eq!(offset(&snap, flower), 30.0);

        for _ in 0..20 {
            state.level.mushrooms[0].emerge_timer -= 1;
            state.level.flowers[0].update();
        }
        let snap = state.snapshot();
        assert_eq!(offset(&snap, mushroom), 15.0);
        assert_eq!(offset(&snap, flower), 15.0);

        state.level.mushrooms[0].emerge_timer = 0;
        assert_eq!(offset(&state.snapshot(), mushroom), 0.0);
    }

    #[test]
    fn test_invincibility_flash_is_exposed() {
        let mut state = GameState::new(GameConfig::default()).unwrap();
        state.player.invincible_timer = 5;
        let snap = state.snapshot();
        assert!(snap.player.invincible);
        assert!(!snap.player.flash_hidden);
        state.player.invincible_timer = 10;
        assert!(state.snapshot().player.flash_hidden);
        state.player.invincible_timer = 0;
        assert!(!state.snapshot().player.flash_hidden);
    }

    #[test]
    fn test_camera_and_visibility() {
        let mut state = GameState::new(GameConfig::default()).unwrap();
        state.player.body.set_left(900.0);
        tick(&mut state, &TickInput::default()).unwrap();
        let snap = state.snapshot();
        let expected = state.player.body.rect().centerx() - 800.0 / 3.0;
        assert!((snap.camera_x - expected).abs() < 1e-3);
        assert!(!snap.on_screen(&Aabb::new(0.0, 0.0, 40.0, 40.0), 800.0));
        assert!(snap.on_screen(&state.player.body.rect(), 800.0));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(GameConfig::default()).unwrap();
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.score, 0);
        assert_eq!(back.entities.len(), state.snapshot().entities.len());
    }
}
