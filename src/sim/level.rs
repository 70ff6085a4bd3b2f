//! One playable level: static geometry plus its live entity collections

use super::enemy::Enemy;
use super::geom::{Aabb, Span};
use super::items::{
    Block, BlockContent, BlockKind, Coin, FireFlower, Flag, Mushroom, Pipe, Platform, PowerUp,
    PowerUpKind,
};
use super::layouts::{LAYOUT_COUNT, LevelLayout, layout};
use super::physics::Terrain;
use crate::config::GameConfig;
use crate::error::LevelError;

/// A level owns every entity placed in it. Removal is tombstone-based: items
/// are flagged during a tick and dropped by [`Level::sweep`] at its end.
#[derive(Debug, Clone)]
pub struct Level {
    /// 1-based level number
    pub index: u32,
    pub platforms: Vec<Platform>,
    pub pipes: Vec<Pipe>,
    pub pits: Vec<Span>,
    pub blocks: Vec<Block>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub mushrooms: Vec<Mushroom>,
    pub flowers: Vec<FireFlower>,
    pub power_ups: Vec<PowerUp>,
    pub flag: Flag,
    /// Collision view of platforms, pipes and pits. Kept in sync by the
    /// `add_*` methods.
    pub terrain: Terrain,
    next_id: u32,
}

impl Level {
    /// Build level `index` from the layout table
    pub fn load(index: u32, config: &GameConfig) -> Result<Self, LevelError> {
        let layout = layout(index).ok_or(LevelError::UnknownLevel {
            index,
            available: LAYOUT_COUNT,
        })?;
        let level = Self::from_layout(index, layout, config);
        log::info!(
            "Loaded level {} ({} enemies, {} blocks, {} coins)",
            index,
            level.enemies.len(),
            level.blocks.len(),
            level.coins.len()
        );
        Ok(level)
    }

    pub fn from_layout(index: u32, layout: &LevelLayout, config: &GameConfig) -> Self {
        let mut level = Self::empty(index, layout.flag_x, config);

        for &(x, y, w, h) in layout.platforms {
            level.add_platform(Platform::new(x, y, w, h));
        }
        for &(x, y, segments) in layout.pipes {
            level.add_pipe(Pipe::new(x, y, segments));
        }
        for &(start, end) in layout.pits {
            level.add_pit(Span::new(start, end));
        }
        for spec in layout.blocks {
            level.add_block(spec.x, spec.y, spec.kind, spec.content);
        }
        for &(x, y) in layout.coins {
            level.add_coin(x, y);
        }
        for spec in layout.enemies {
            let id = level.next_entity_id();
            level.enemies.push(Enemy::new(
                id,
                spec.kind,
                spec.x,
                spec.y,
                spec.patrol_range,
                config,
            ));
        }
        for spec in layout.power_ups {
            level.add_power_up(spec.x, spec.y, spec.kind);
        }
        level
    }

    /// Flat ground and a flag, nothing else
    pub fn empty(index: u32, flag_x: f32, config: &GameConfig) -> Self {
        Self {
            index,
            platforms: Vec::new(),
            pipes: Vec::new(),
            pits: Vec::new(),
            blocks: Vec::new(),
            enemies: Vec::new(),
            coins: Vec::new(),
            mushrooms: Vec::new(),
            flowers: Vec::new(),
            power_ups: Vec::new(),
            flag: Flag::new(flag_x, config.ground_y()),
            terrain: Terrain {
                ground_y: config.ground_y(),
                pits: Vec::new(),
                solids: Vec::new(),
            },
            next_id: 1,
        }
    }

    /// Allocate an entity ID (never reused within a level)
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn add_platform(&mut self, platform: Platform) {
        self.terrain.solids.push(platform.rect);
        self.platforms.push(platform);
    }

    pub fn add_pipe(&mut self, pipe: Pipe) {
        self.terrain.solids.push(pipe.rect);
        self.pipes.push(pipe);
    }

    pub fn add_pit(&mut self, pit: Span) {
        self.terrain.pits.push(pit);
        self.pits.push(pit);
    }

    pub fn add_block(&mut self, x: f32, y: f32, kind: BlockKind, content: BlockContent) -> u32 {
        let id = self.next_entity_id();
        self.blocks.push(Block::new(id, x, y, kind, content));
        id
    }

    pub fn add_coin(&mut self, x: f32, y: f32) -> u32 {
        let id = self.next_entity_id();
        self.coins.push(Coin::new(id, x, y));
        id
    }

    pub fn add_power_up(&mut self, x: f32, y: f32, kind: PowerUpKind) -> u32 {
        let id = self.next_entity_id();
        self.power_ups.push(PowerUp::new(id, x, y, kind));
        id
    }

    /// Place an enemy, assigning it a fresh ID
    pub fn add_enemy(&mut self, mut enemy: Enemy) -> u32 {
        let id = self.next_entity_id();
        enemy.id = id;
        self.enemies.push(enemy);
        id
    }

    pub fn spawn_mushroom(&mut self, block: &Aabb) -> u32 {
        let id = self.next_entity_id();
        self.mushrooms.push(Mushroom::from_block(id, block));
        id
    }

    pub fn spawn_flower(&mut self, block: &Aabb) -> u32 {
        let id = self.next_entity_id();
        self.flowers.push(FireFlower::from_block(id, block));
        id
    }

    /// Rects of the blocks that still collide
    pub fn solid_block_rects(&self) -> Vec<Aabb> {
        self.blocks
            .iter()
            .filter(|b| b.is_solid())
            .map(|b| b.rect)
            .collect()
    }

    /// Drop everything flagged for removal this tick
    pub fn sweep(&mut self) {
        self.enemies.retain(|e| e.body.is_active);
        self.coins.retain(|c| !c.collected);
        self.mushrooms.retain(|m| !m.is_spent());
        self.flowers.retain(|f| !f.collected);
        self.power_ups.retain(|p| !p.collected);
        self.blocks.retain(|b| !b.broken);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::EnemyKind;

    #[test]
    fn test_load_every_layout() {
        let config = GameConfig::default();
        for index in 1..=LAYOUT_COUNT {
            let level = Level::load(index, &config).unwrap();
            assert_eq!(level.index, index);
            assert!(!level.enemies.is_empty());
            assert_eq!(level.flag.rect.bottom(), config.ground_y());
            assert_eq!(
                level.terrain.solids.len(),
                level.platforms.len() + level.pipes.len()
            );
        }
    }

    #[test]
    fn test_unknown_level_is_an_error() {
        let config = GameConfig::default();
        let err = Level::load(LAYOUT_COUNT + 1, &config).unwrap_err();
        assert_eq!(
            err,
            LevelError::UnknownLevel {
                index: LAYOUT_COUNT + 1,
                available: LAYOUT_COUNT
            }
        );
        assert!(Level::load(0, &config).is_err());
    }

    #[test]
    fn test_ids_are_unique() {
        let config = GameConfig::default();
        let level = Level::load(3, &config).unwrap();
        let mut ids: Vec<u32> = level
            .blocks
            .iter()
            .map(|b| b.id)
            .chain(level.enemies.iter().map(|e| e.id))
            .chain(level.coins.iter().map(|c| c.id))
            .chain(level.power_ups.iter().map(|p| p.id))
            .collect();
        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn test_sweep_drops_flagged_entities() {
        let config = GameConfig::default();
        let mut level = Level::empty(1, 1000.0, &config);
        level.add_coin(100.0, 100.0);
        level.add_coin(200.0, 100.0);
        level.add_enemy(Enemy::new(0, EnemyKind::Goomba, 300.0, 510.0, 50.0, &config));
        level.coins[0].collect();
        level.enemies[0].body.is_active = false;
        level.sweep();
        assert_eq!(level.coins.len(), 1);
        assert_eq!(level.coins[0].rect.x, 200.0);
        assert!(level.enemies.is_empty());
    }

    #[test]
    fn test_broken_blocks_stop_colliding() {
        let config = GameConfig::default();
        let mut level = Level::empty(1, 1000.0, &config);
        level.add_block(100.0, 400.0, BlockKind::Brick, BlockContent::Empty);
        level.add_block(140.0, 400.0, BlockKind::Brick, BlockContent::Empty);
        level.blocks[0].broken = true;
        assert_eq!(level.solid_block_rects().len(), 1);
    }
}
