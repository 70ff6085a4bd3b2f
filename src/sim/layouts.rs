//! Static placement tables, one per level
//!
//! Coordinates are top-left corners in world units with the default 800x600
//! screen and a ground line at y = 550. The flag is placed on the ground.

use super::enemy::EnemyKind;
use super::items::{BlockContent, BlockKind, PowerUpKind};

/// Number of levels in [`LAYOUTS`]
pub const LAYOUT_COUNT: u32 = 3;

#[derive(Debug, Clone, Copy)]
pub struct BlockSpec {
    pub x: f32,
    pub y: f32,
    pub kind: BlockKind,
    pub content: BlockContent,
}

#[derive(Debug, Clone, Copy)]
pub struct EnemySpec {
    pub x: f32,
    pub y: f32,
    pub patrol_range: f32,
    pub kind: EnemyKind,
}

#[derive(Debug, Clone, Copy)]
pub struct PowerUpSpec {
    pub x: f32,
    pub y: f32,
    pub kind: PowerUpKind,
}

/// Everything placed in one level
#[derive(Debug)]
pub struct LevelLayout {
    /// (x, y, width, height)
    pub platforms: &'static [(f32, f32, f32, f32)],
    pub blocks: &'static [BlockSpec],
    /// (x, y, segments)
    pub pipes: &'static [(f32, f32, u32)],
    pub coins: &'static [(f32, f32)],
    pub enemies: &'static [EnemySpec],
    pub power_ups: &'static [PowerUpSpec],
    /// Ground gaps as (start x, end x)
    pub pits: &'static [(f32, f32)],
    pub flag_x: f32,
}

const fn question(x: f32, y: f32, content: BlockContent) -> BlockSpec {
    BlockSpec {
        x,
        y,
        kind: BlockKind::Question,
        content,
    }
}

const fn coin_block(x: f32, y: f32) -> BlockSpec {
    question(x, y, BlockContent::Coin)
}

const fn power_block(x: f32, y: f32) -> BlockSpec {
    question(x, y, BlockContent::AdaptivePowerUp)
}

const fn brick(x: f32, y: f32) -> BlockSpec {
    BlockSpec {
        x,
        y,
        kind: BlockKind::Brick,
        content: BlockContent::Empty,
    }
}

const fn enemy(kind: EnemyKind, x: f32, y: f32, patrol_range: f32) -> EnemySpec {
    EnemySpec {
        x,
        y,
        patrol_range,
        kind,
    }
}

const fn goomba(x: f32, y: f32, patrol_range: f32) -> EnemySpec {
    enemy(EnemyKind::Goomba, x, y, patrol_range)
}

const fn extra_life(x: f32, y: f32) -> PowerUpSpec {
    PowerUpSpec {
        x,
        y,
        kind: PowerUpKind::ExtraLife,
    }
}

const fn speed_boost(x: f32, y: f32) -> PowerUpSpec {
    PowerUpSpec {
        x,
        y,
        kind: PowerUpKind::SpeedBoost,
    }
}

pub static LAYOUTS: [LevelLayout; LAYOUT_COUNT as usize] = [
    // 1: gentle introduction
    LevelLayout {
        platforms: &[
            (300.0, 450.0, 150.0, 20.0),
            (500.0, 400.0, 100.0, 20.0),
            (650.0, 350.0, 120.0, 20.0),
            (850.0, 300.0, 150.0, 20.0),
            (1050.0, 400.0, 100.0, 20.0),
            (1200.0, 450.0, 200.0, 20.0),
        ],
        blocks: &[
            coin_block(350.0, 370.0),
            power_block(390.0, 370.0),
            coin_block(430.0, 370.0),
            coin_block(700.0, 270.0),
            power_block(900.0, 220.0),
            brick(540.0, 320.0),
            brick(580.0, 320.0),
            brick(620.0, 320.0),
        ],
        pipes: &[(600.0, 510.0, 2), (1100.0, 470.0, 3)],
        coins: &[
            (530.0, 350.0),
            (1080.0, 350.0),
            (1250.0, 400.0),
            (1300.0, 400.0),
        ],
        enemies: &[
            goomba(550.0, 350.0, 80.0),
            goomba(900.0, 250.0, 100.0),
            goomba(1250.0, 400.0, 120.0),
        ],
        power_ups: &[extra_life(1100.0, 350.0)],
        pits: &[],
        flag_x: 1450.0,
    },
    // 2: more vertical jumps, first pit
    LevelLayout {
        platforms: &[
            (250.0, 450.0, 100.0, 20.0),
            (400.0, 400.0, 80.0, 20.0),
            (550.0, 350.0, 80.0, 20.0),
            (400.0, 280.0, 100.0, 20.0),
            (600.0, 230.0, 120.0, 20.0),
            (800.0, 280.0, 100.0, 20.0),
            (950.0, 350.0, 100.0, 20.0),
            (1100.0, 300.0, 150.0, 20.0),
            (1300.0, 400.0, 100.0, 20.0),
            (1450.0, 450.0, 120.0, 20.0),
        ],
        blocks: &[
            coin_block(280.0, 370.0),
            power_block(430.0, 320.0),
            coin_block(580.0, 270.0),
            power_block(650.0, 150.0),
            coin_block(830.0, 200.0),
            power_block(1150.0, 220.0),
            brick(470.0, 320.0),
            brick(510.0, 320.0),
            brick(870.0, 200.0),
            brick(910.0, 200.0),
        ],
        pipes: &[(500.0, 490.0, 2), (750.0, 470.0, 3), (1350.0, 450.0, 4)],
        coins: &[
            (430.0, 350.0),
            (580.0, 300.0),
            (980.0, 300.0),
            (1330.0, 350.0),
        ],
        enemies: &[
            goomba(280.0, 400.0, 70.0),
            enemy(EnemyKind::EdgeWalker, 600.0, 180.0, 90.0),
            goomba(850.0, 230.0, 80.0),
            goomba(1150.0, 250.0, 100.0),
            goomba(1350.0, 350.0, 70.0),
        ],
        power_ups: &[extra_life(1000.0, 300.0), speed_boost(320.0, 520.0)],
        pits: &[(1000.0, 1080.0)],
        flag_x: 1650.0,
    },
    // 3: precise jumps, smarter enemies
    LevelLayout {
        platforms: &[
            (200.0, 480.0, 80.0, 20.0),
            (350.0, 420.0, 70.0, 20.0),
            (500.0, 360.0, 70.0, 20.0),
            (650.0, 300.0, 80.0, 20.0),
            (500.0, 240.0, 70.0, 20.0),
            (350.0, 180.0, 80.0, 20.0),
            (550.0, 180.0, 80.0, 20.0),
            (750.0, 240.0, 100.0, 20.0),
            (900.0, 300.0, 80.0, 20.0),
            (1050.0, 250.0, 100.0, 20.0),
            (1200.0, 320.0, 80.0, 20.0),
            (1350.0, 380.0, 100.0, 20.0),
            (1500.0, 440.0, 120.0, 20.0),
            (1670.0, 380.0, 100.0, 20.0),
        ],
        blocks: &[
            coin_block(220.0, 400.0),
            power_block(380.0, 340.0),
            coin_block(530.0, 280.0),
            power_block(680.0, 220.0),
            coin_block(530.0, 160.0),
            power_block(380.0, 100.0),
            coin_block(780.0, 160.0),
            power_block(1080.0, 170.0),
            coin_block(1230.0, 240.0),
            power_block(1380.0, 300.0),
            brick(260.0, 400.0),
            brick(420.0, 340.0),
            brick(460.0, 340.0),
            brick(720.0, 220.0),
            brick(820.0, 160.0),
            brick(860.0, 160.0),
        ],
        pipes: &[
            (300.0, 490.0, 2),
            (800.0, 450.0, 4),
            (1150.0, 430.0, 5),
            (1700.0, 470.0, 3),
        ],
        coins: &[
            (380.0, 370.0),
            (530.0, 310.0),
            (930.0, 250.0),
            (1230.0, 270.0),
            (1530.0, 390.0),
        ],
        enemies: &[
            goomba(230.0, 430.0, 50.0),
            enemy(EnemyKind::EdgeWalker, 380.0, 370.0, 60.0),
            enemy(EnemyKind::EdgeWalker, 680.0, 250.0, 70.0),
            goomba(800.0, 190.0, 70.0),
            goomba(1100.0, 200.0, 80.0),
            enemy(EnemyKind::EdgeWalker, 1240.0, 270.0, 60.0),
            enemy(EnemyKind::Stalker, 1530.0, 390.0, 90.0),
            goomba(1710.0, 330.0, 60.0),
        ],
        power_ups: &[extra_life(1350.0, 330.0)],
        pits: &[(1000.0, 1090.0)],
        flag_x: 1850.0,
    },
];

/// Layout for a 1-based level index
pub fn layout(index: u32) -> Option<&'static LevelLayout> {
    index
        .checked_sub(1)
        .and_then(|i| LAYOUTS.get(i as usize))
}
