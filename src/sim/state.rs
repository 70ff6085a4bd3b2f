//! Game session state
//!
//! Owns the current level, the player and all run bookkeeping (score, lives,
//! clock, combo). Entities never reach back into the session; whatever they
//! need to report flows out as [`GameEvent`]s.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::{Effects, FloatingText, ParticleKind};
use super::enemy::EnemyKind;
use super::items::{HitOutcome, PowerUpKind};
use super::level::Level;
use super::player::{DamageOutcome, Player, PowerState};
use crate::config::GameConfig;
use crate::consts::{COIN_SCORE, TIME_BONUS_PER_SECOND};
use crate::error::LevelError;

/// Session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    /// Flag reached; waiting for `AdvanceLevel`
    LevelComplete,
    /// Out of lives; waiting for `Restart`
    GameOver,
    /// Finished the last level; waiting for `Restart`
    Win,
}

/// Why points were awarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreReason {
    Stomp,
    FireballKill,
    CoinBlock,
    PowerUpBlock,
    BrickBreak,
    Coin,
    ExtraLife,
    SpeedBoost,
    TimeBonus,
}

/// Something that happened during a tick, in the order it happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelLoaded {
        index: u32,
    },
    ScoreAwarded {
        points: u64,
        reason: ScoreReason,
    },
    Jumped,
    /// Rose into a platform or pipe from below
    HeadBumped,
    FireballShot,
    BlockHit {
        block_id: u32,
        outcome: HitOutcome,
    },
    EnemyStomped {
        enemy_id: u32,
        kind: EnemyKind,
        combo: u32,
    },
    EnemyBurned {
        enemy_id: u32,
    },
    /// Walked or was knocked off the bottom of the world
    EnemyFellOut {
        enemy_id: u32,
    },
    CoinCollected {
        total: u32,
    },
    MushroomEaten {
        grew: bool,
    },
    FlowerPicked {
        promoted: bool,
    },
    PowerUpCollected {
        kind: PowerUpKind,
    },
    /// Took a hit and dropped to `Small`
    PlayerDemoted {
        from: PowerState,
    },
    LifeLost {
        lives_left: u32,
    },
    LifeGained {
        lives: u32,
    },
    TimeExpired,
    FellOutOfWorld,
    StatusChanged {
        from: GameStatus,
        to: GameStatus,
    },
}

/// The game session
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// 1-based index of the current level
    pub level_index: u32,
    pub level: Level,
    pub player: Player,
    pub score: u64,
    pub lives: u32,
    /// Whole seconds left on the level clock
    pub time_remaining: u32,
    /// Ticks into the current second
    pub time_counter: u32,
    pub combo: u32,
    pub combo_timer: u32,
    /// Coins collected this run
    pub coins: u32,
    pub status: GameStatus,
    pub camera_x: f32,
    /// Ticks simulated since construction
    pub ticks: u64,
    pub effects: Effects,
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a run on level 1
    pub fn new(config: GameConfig) -> Result<Self, LevelError> {
        let level = Level::load(1, &config)?;
        Ok(Self::with_level(config, level))
    }

    /// Start a run on a prebuilt level
    pub fn with_level(config: GameConfig, level: Level) -> Self {
        let player = Player::new(config.player_spawn_x, &config);
        let effects = Effects::new(config.seed, config.max_particles);
        let level_index = level.index;
        Self {
            level_index,
            level,
            player,
            score: 0,
            lives: config.max_lives,
            time_remaining: config.level_time,
            time_counter: 0,
            combo: 0,
            combo_timer: 0,
            coins: 0,
            status: GameStatus::Playing,
            camera_x: 0.0,
            ticks: 0,
            effects,
            events: vec![GameEvent::LevelLoaded { index: level_index }],
            config,
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    pub fn set_status(&mut self, to: GameStatus) {
        let from = self.status;
        if from == to {
            return;
        }
        log::info!("Game status {:?} -> {:?} (score {})", from, to, self.score);
        self.status = to;
        self.events.push(GameEvent::StatusChanged { from, to });
    }

    pub fn award(&mut self, points: u64, reason: ScoreReason) {
        self.score += points;
        log::debug!("+{} ({:?}) -> {}", points, reason, self.score);
        self.events.push(GameEvent::ScoreAwarded { points, reason });
    }

    pub fn collect_coin(&mut self, at: Vec2) {
        self.coins += 1;
        self.events.push(GameEvent::CoinCollected { total: self.coins });
        self.effects.burst(ParticleKind::Glint, at, 8);
        self.effects.float_text(FloatingText::score(at.x, at.y, COIN_SCORE));
    }

    /// Route a hit through the player's power tiers; only a fatal hit costs a
    /// life
    pub fn damage_player(&mut self) -> DamageOutcome {
        let from = self.player.power;
        let outcome = self.player.take_damage(&self.config);
        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Demoted => {
                log::debug!("Player demoted from {:?}", from);
                self.events.push(GameEvent::PlayerDemoted { from });
            }
            DamageOutcome::Fatal => self.player_hit(),
        }
        outcome
    }

    /// Lose a life. Respawns at the level start unless that was the last one;
    /// layout, score and combo carry over.
    pub fn player_hit(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        log::info!("Life lost, {} left", self.lives);
        self.events.push(GameEvent::LifeLost {
            lives_left: self.lives,
        });
        if self.lives == 0 {
            self.set_status(GameStatus::GameOver);
        } else {
            self.player.respawn(&self.config);
            self.camera_x = 0.0;
            self.reset_clock();
        }
    }

    /// Move on from `LevelComplete`. Past the last level the run is won.
    pub fn next_level(&mut self) -> Result<(), LevelError> {
        let next = self.level_index + 1;
        if next > self.config.max_level {
            self.set_status(GameStatus::Win);
            return Ok(());
        }
        self.level = Level::load(next, &self.config)?;
        self.level_index = next;
        self.player.respawn(&self.config);
        self.camera_x = 0.0;
        self.reset_clock();
        self.effects.clear();
        self.events.push(GameEvent::LevelLoaded { index: next });
        self.set_status(GameStatus::Playing);
        Ok(())
    }

    /// Fresh run from level 1
    pub fn restart(&mut self) -> Result<(), LevelError> {
        self.level = Level::load(1, &self.config)?;
        self.level_index = 1;
        self.player = Player::new(self.config.player_spawn_x, &self.config);
        self.score = 0;
        self.lives = self.config.max_lives;
        self.combo = 0;
        self.combo_timer = 0;
        self.coins = 0;
        self.camera_x = 0.0;
        self.reset_clock();
        self.effects.clear();
        self.events.push(GameEvent::LevelLoaded { index: 1 });
        self.set_status(GameStatus::Playing);
        Ok(())
    }

    fn reset_clock(&mut self) {
        self.time_remaining = self.config.level_time;
        self.time_counter = 0;
    }

    /// Advance the level clock by one tick. Each time a second ticks over at
    /// zero, the player takes a hit.
    pub fn tick_clock(&mut self) {
        self.time_counter += 1;
        if self.time_counter < self.config.ticks_per_second {
            return;
        }
        self.time_counter = 0;
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            log::info!("Time expired");
            self.events.push(GameEvent::TimeExpired);
            self.damage_player();
        }
    }

    /// Stomp bookkeeping: bump the combo, refresh its window, pay
    /// `base * combo`
    pub fn register_stomp(&mut self, enemy_id: u32, kind: EnemyKind, at: Vec2) {
        self.combo += 1;
        self.combo_timer = self.config.combo_window_ticks;
        self.events.push(GameEvent::EnemyStomped {
            enemy_id,
            kind,
            combo: self.combo,
        });
        self.award(
            self.config.combo_base_bonus * u64::from(self.combo),
            ScoreReason::Stomp,
        );
        self.effects.burst(ParticleKind::Debris, at, 15);
        if self.combo > 1 {
            self.effects
                .float_text(FloatingText::combo(at.x, at.y, self.combo));
        }
    }

    /// The combo only resets once its window runs out
    pub fn decay_combo(&mut self) {
        if self.combo_timer > 0 {
            self.combo_timer -= 1;
        } else {
            self.combo = 0;
        }
    }

    /// Keep the player a third of the way across the screen
    pub fn update_camera(&mut self) {
        let target = self.player.body.rect().centerx() - self.config.screen_width / 3.0;
        self.camera_x = target.max(0.0);
    }

    /// Hand the accumulated events to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Final score bonus for reaching the flag
    pub fn time_bonus(&self) -> u64 {
        u64::from(self.time_remaining) * TIME_BONUS_PER_SECOND
    }
}
