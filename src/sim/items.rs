//! Blocks, collectibles and static level pieces

use serde::{Deserialize, Serialize};

use super::collision::resolve_axis;
use super::entity::Body;
use super::geom::Aabb;
use super::physics::{PhysicsParams, Terrain, below_world, step_body};
use super::player::PowerState;
use crate::config::GameConfig;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Question,
    Brick,
    Solid,
}

/// What a question block hands out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockContent {
    Coin,
    /// Mushroom for a small player, fire flower otherwise
    AdaptivePowerUp,
    Empty,
}

/// Result of striking a block from below
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitOutcome {
    Coin,
    Mushroom,
    Flower,
    Break,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    pub rect: Aabb,
    pub kind: BlockKind,
    pub content: BlockContent,
    pub hit: bool,
    pub broken: bool,
    /// Vertical draw offset of the bump animation (negative = up)
    pub bump_offset: f32,
}

impl Block {
    pub fn new(id: u32, x: f32, y: f32, kind: BlockKind, content: BlockContent) -> Self {
        Self {
            id,
            rect: Aabb::new(x, y, BLOCK_SIZE, BLOCK_SIZE),
            kind,
            content,
            hit: false,
            broken: false,
            bump_offset: 0.0,
        }
    }

    /// Strike the block from below.
    ///
    /// A question block pays out once; a brick only breaks for `Super` or
    /// better and otherwise just bumps.
    pub fn hit_block(&mut self, power: PowerState) -> HitOutcome {
        if self.broken || (self.hit && self.kind == BlockKind::Question) {
            return HitOutcome::None;
        }

        match self.kind {
            BlockKind::Brick => {
                if power >= PowerState::Super {
                    self.broken = true;
                    HitOutcome::Break
                } else {
                    self.bump_offset = BLOCK_BUMP;
                    HitOutcome::None
                }
            }
            BlockKind::Question => {
                self.hit = true;
                self.bump_offset = BLOCK_BUMP;
                match self.content {
                    BlockContent::Coin => HitOutcome::Coin,
                    BlockContent::AdaptivePowerUp if power == PowerState::Small => {
                        HitOutcome::Mushroom
                    }
                    BlockContent::AdaptivePowerUp => HitOutcome::Flower,
                    BlockContent::Empty => HitOutcome::None,
                }
            }
            BlockKind::Solid => HitOutcome::None,
        }
    }

    /// Decay the bump animation
    pub fn update(&mut self) {
        if self.bump_offset < 0.0 {
            self.bump_offset = (self.bump_offset + BLOCK_BUMP_DECAY).min(0.0);
        }
    }

    /// Broken bricks no longer collide
    #[inline]
    pub fn is_solid(&self) -> bool {
        !self.broken
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub rect: Aabb,
    pub collected: bool,
}

impl Coin {
    pub fn new(id: u32, x: f32, y: f32) -> Self {
        Self {
            id,
            rect: Aabb::new(x, y, COIN_SIZE, COIN_SIZE),
            collected: false,
        }
    }

    /// Returns false if it was already taken
    pub fn collect(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }
}

/// Rises linearly from fully hidden in the block to resting on top of it
fn emerge_offset(timer: u32) -> f32 {
    ITEM_SIZE * timer as f32 / ITEM_EMERGE_TICKS as f32
}

/// Spawn an item on top of a struck block
fn item_rect_above(block: &Aabb) -> Aabb {
    Aabb::new(
        block.centerx() - ITEM_SIZE / 2.0,
        block.top() - ITEM_SIZE,
        ITEM_SIZE,
        ITEM_SIZE,
    )
}

/// Growth mushroom. Emerges from its block, then walks and falls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mushroom {
    pub id: u32,
    pub body: Body,
    pub direction: f32,
    /// Ticks left rising out of the block; frozen meanwhile
    pub emerge_timer: u32,
    pub collected: bool,
}

impl Mushroom {
    pub fn from_block(id: u32, block: &Aabb) -> Self {
        let rect = item_rect_above(block);
        Self {
            id,
            body: Body::new(rect.x, rect.y, rect.width, rect.height),
            direction: 1.0,
            emerge_timer: ITEM_EMERGE_TICKS,
            collected: false,
        }
    }

    pub fn rect(&self) -> Aabb {
        self.body.rect()
    }

    pub fn update(&mut self, terrain: &Terrain, blocks: &[Aabb], config: &GameConfig) {
        if self.collected {
            return;
        }
        if self.emerge_timer > 0 {
            self.emerge_timer -= 1;
            return;
        }

        self.body.vel.x = MUSHROOM_SPEED * self.direction;
        let contacts = step_body(
            &mut self.body,
            terrain,
            PhysicsParams::for_items(config),
            false,
        );
        let mut reverse = contacts.hit_wall;
        for block in blocks {
            if let Some(contact) = resolve_axis(&mut self.body, block) {
                reverse |= contact.side.is_horizontal();
            }
        }
        if reverse {
            self.direction = -self.direction;
        }

        if below_world(&self.body.rect(), config.screen_height) {
            self.body.is_active = false;
        }
    }

    /// How far the sprite still sits down inside its block
    pub fn emerge_offset(&self) -> f32 {
        emerge_offset(self.emerge_timer)
    }

    /// Gone for good (eaten or fell out of the world)
    pub fn is_spent(&self) -> bool {
        self.collected || !self.body.is_active
    }
}

/// Fire flower. Emerges and then sits still.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireFlower {
    pub id: u32,
    pub rect: Aabb,
    pub emerge_timer: u32,
    pub collected: bool,
}

impl FireFlower {
    pub fn from_block(id: u32, block: &Aabb) -> Self {
        Self {
            id,
            rect: item_rect_above(block),
            emerge_timer: ITEM_EMERGE_TICKS,
            collected: false,
        }
    }

    pub fn update(&mut self) {
        self.emerge_timer = self.emerge_timer.saturating_sub(1);
    }

    pub fn emerge_offset(&self) -> f32 {
        emerge_offset(self.emerge_timer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    ExtraLife,
    SpeedBoost,
}

/// Free-standing pickup placed by the level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub rect: Aabb,
    pub kind: PowerUpKind,
    pub collected: bool,
}

impl PowerUp {
    pub fn new(id: u32, x: f32, y: f32, kind: PowerUpKind) -> Self {
        Self {
            id,
            rect: Aabb::new(x, y, ITEM_SIZE, ITEM_SIZE),
            kind,
            collected: false,
        }
    }

    pub fn collect(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Aabb,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Aabb::new(x, y, width, height),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    pub rect: Aabb,
    pub segments: u32,
}

impl Pipe {
    pub fn new(x: f32, y: f32, segments: u32) -> Self {
        Self {
            rect: Aabb::new(x, y, PIPE_WIDTH, PIPE_SEGMENT_HEIGHT * segments as f32),
            segments,
        }
    }
}

/// The goal pole, standing on the ground
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flag {
    pub rect: Aabb,
}

impl Flag {
    pub fn new(x: f32, ground_y: f32) -> Self {
        Self {
            rect: Aabb::new(x, ground_y - FLAG_HEIGHT, FLAG_WIDTH, FLAG_HEIGHT),
        }
    }
}
