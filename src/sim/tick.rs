//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically. Within a tick:
//! commands, level clock, entity updates, then cross-entity interactions in a
//! fixed precedence order, then removal of flagged entities.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Side, is_stomp, overlaps, resolve_axis};
use super::effects::ParticleKind;
use super::items::{HitOutcome, PowerUpKind};
use super::player::Fireball;
use super::state::{GameEvent, GameState, GameStatus, ScoreReason};
use crate::consts::*;
use crate::error::LevelError;

/// Discrete commands, honored only in the status that expects them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// From `GameOver` or `Win`
    Restart,
    /// From `LevelComplete`
    AdvanceLevel,
}

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Jump key went down this tick
    pub jump_pressed: bool,
    /// Fire key went down this tick
    pub shoot_pressed: bool,
    pub command: Option<Command>,
}

/// Advance the game by one fixed timestep.
///
/// Only fails if a command needs a level that has no layout.
pub fn tick(state: &mut GameState, input: &TickInput) -> Result<(), LevelError> {
    if let Some(command) = input.command {
        apply_command(state, command)?;
    }

    // Terminal and waiting states don't simulate
    if !state.is_playing() {
        return Ok(());
    }
    state.ticks += 1;

    state.tick_clock();
    if !state.is_playing() {
        return Ok(());
    }

    update_entities(state, input);

    block_hits(state);
    item_pickups(state);
    fireball_hits(state);
    enemy_contacts(state);
    state.decay_combo();
    if state.is_playing() {
        coin_pickups(state);
    }
    if state.is_playing() {
        flag_reached(state);
    }
    if state.is_playing() {
        fall_through(state);
    }

    state.level.sweep();
    state.update_camera();
    Ok(())
}

fn apply_command(state: &mut GameState, command: Command) -> Result<(), LevelError> {
    match (command, state.status) {
        (Command::Restart, GameStatus::GameOver | GameStatus::Win) => state.restart(),
        (Command::AdvanceLevel, GameStatus::LevelComplete) => state.next_level(),
        (command, status) => {
            log::debug!("Ignoring {:?} while {:?}", command, status);
            Ok(())
        }
    }
}

/// Player, then blocks, items, enemies and effects
fn update_entities(state: &mut GameState, input: &TickInput) {
    let step = state
        .player
        .update(input, &state.level.terrain, &state.config);
    if step.jumped {
        let rect = state.player.body.rect();
        state.events.push(GameEvent::Jumped);
        state
            .effects
            .burst(ParticleKind::Dust, Vec2::new(rect.centerx(), rect.bottom()), 6);
    }
    if step.contacts.hit_ceiling {
        state.events.push(GameEvent::HeadBumped);
    }
    if step.shot {
        state.events.push(GameEvent::FireballShot);
    }

    for block in &mut state.level.blocks {
        block.update();
    }

    let block_rects = state.level.solid_block_rects();
    for mushroom in &mut state.level.mushrooms {
        mushroom.update(&state.level.terrain, &block_rects, &state.config);
    }
    for flower in &mut state.level.flowers {
        flower.update();
    }

    let player_x = state.player.body.rect().centerx();
    for enemy in &mut state.level.enemies {
        let step = enemy.update(&state.level.terrain, &block_rects, player_x, &state.config);
        if step.fell_out {
            log::debug!("Enemy {} fell out of the world", enemy.id);
            state.events.push(GameEvent::EnemyFellOut { enemy_id: enemy.id });
        }
    }

    state.effects.update();
}

/// Blocks are solid to the player. Rising into one from below strikes it;
/// the block nearest the player's center is resolved first.
fn block_hits(state: &mut GameState) {
    let center = state.player.body.rect().centerx();
    let mut order: Vec<usize> = (0..state.level.blocks.len()).collect();
    order.sort_by(|&a, &b| {
        let da = (state.level.blocks[a].rect.centerx() - center).abs();
        let db = (state.level.blocks[b].rect.centerx() - center).abs();
        da.total_cmp(&db)
    });

    for i in order {
        if !state.level.blocks[i].is_solid() {
            continue;
        }
        let rect = state.level.blocks[i].rect;
        let rising = state.player.body.vel.y < 0.0;
        let Some(contact) = resolve_axis(&mut state.player.body, &rect) else {
            continue;
        };
        if contact.side != Side::Bottom || !rising {
            continue;
        }

        let power = state.player.power;
        let block = &mut state.level.blocks[i];
        let outcome = block.hit_block(power);
        let block_id = block.id;
        log::debug!("Block {} hit: {:?}", block_id, outcome);
        state.events.push(GameEvent::BlockHit { block_id, outcome });

        match outcome {
            HitOutcome::Coin => {
                state.award(COIN_SCORE, ScoreReason::CoinBlock);
                state.collect_coin(Vec2::new(rect.centerx(), rect.top()));
            }
            HitOutcome::Mushroom => {
                state.level.spawn_mushroom(&rect);
                state.award(POWER_UP_BLOCK_SCORE, ScoreReason::PowerUpBlock);
            }
            HitOutcome::Flower => {
                state.level.spawn_flower(&rect);
                state.award(POWER_UP_BLOCK_SCORE, ScoreReason::PowerUpBlock);
            }
            HitOutcome::Break => {
                state.award(BRICK_SCORE, ScoreReason::BrickBreak);
                state.effects.burst(ParticleKind::Shard, rect.center(), 8);
            }
            HitOutcome::None => {}
        }
    }
}

/// Mushrooms, then fire flowers, then level power-ups
fn item_pickups(state: &mut GameState) {
    for i in 0..state.level.mushrooms.len() {
        let rect = state.level.mushrooms[i].rect();
        if state.level.mushrooms[i].collected || !overlaps(&state.player.body.rect(), &rect) {
            continue;
        }
        state.level.mushrooms[i].collected = true;
        let grew = state.player.power_up(&state.config);
        log::debug!("Mushroom eaten (grew: {})", grew);
        state.events.push(GameEvent::MushroomEaten { grew });
        if grew {
            state.effects.burst(ParticleKind::Star, rect.center(), 15);
        }
    }

    for i in 0..state.level.flowers.len() {
        let rect = state.level.flowers[i].rect;
        if state.level.flowers[i].collected || !overlaps(&state.player.body.rect(), &rect) {
            continue;
        }
        state.level.flowers[i].collected = true;
        let promoted = state.player.fire_power_up(&state.config);
        log::debug!("Fire flower picked (promoted: {})", promoted);
        state.events.push(GameEvent::FlowerPicked { promoted });
        if promoted {
            state.effects.burst(ParticleKind::Spark, rect.center(), 20);
        }
    }

    for i in 0..state.level.power_ups.len() {
        let rect = state.level.power_ups[i].rect;
        if !overlaps(&state.player.body.rect(), &rect) || !state.level.power_ups[i].collect() {
            continue;
        }
        let kind = state.level.power_ups[i].kind;
        state.events.push(GameEvent::PowerUpCollected { kind });
        match kind {
            PowerUpKind::ExtraLife => {
                if state.lives < state.config.max_lives {
                    state.lives += 1;
                    state.events.push(GameEvent::LifeGained { lives: state.lives });
                }
                state.award(EXTRA_LIFE_SCORE, ScoreReason::ExtraLife);
                state.effects.burst(ParticleKind::Star, rect.center(), 15);
            }
            PowerUpKind::SpeedBoost => {
                state.player.activate_speed_boost(&state.config);
                state.award(SPEED_BOOST_SCORE, ScoreReason::SpeedBoost);
                state.effects.burst(ParticleKind::Boost, rect.center(), 20);
            }
        }
    }
}

/// A fireball kills the first live enemy it touches and is consumed
fn fireball_hits(state: &mut GameState) {
    for i in 0..state.level.enemies.len() {
        if !state.level.enemies[i].is_alive() {
            continue;
        }
        let enemy_rect = state.level.enemies[i].body.rect();
        let Some(f) = state
            .player
            .fireballs
            .iter()
            .position(|fb| fb.is_alive() && overlaps(&fb.body.rect(), &enemy_rect))
        else {
            continue;
        };

        let direction = state.player.fireballs[f].direction;
        state.player.fireballs[f].extinguish();
        let enemy = &mut state.level.enemies[i];
        enemy.kill(direction);
        let enemy_id = enemy.id;
        log::debug!("Enemy {} burned", enemy_id);
        state.events.push(GameEvent::EnemyBurned { enemy_id });
        state.award(FIREBALL_KILL_SCORE, ScoreReason::FireballKill);
        state
            .effects
            .burst(ParticleKind::Spark, enemy_rect.center(), 10);
    }
    state.player.fireballs.retain(Fireball::is_alive);
}

/// Stomp or get hurt. The stomp test uses the player's vertical velocity as
/// it was before any stomp bounce this tick, so every enemy landed on in the
/// same tick counts.
fn enemy_contacts(state: &mut GameState) {
    let vel_y = state.player.body.vel.y;
    for i in 0..state.level.enemies.len() {
        if !state.is_playing() {
            break;
        }
        if !state.level.enemies[i].is_alive() {
            continue;
        }
        let enemy_rect = state.level.enemies[i].body.rect();
        let player_rect = state.player.body.rect();
        if !overlaps(&player_rect, &enemy_rect) {
            continue;
        }

        if is_stomp(&player_rect, vel_y, &enemy_rect, state.config.stomp_tolerance) {
            let enemy = &mut state.level.enemies[i];
            enemy.on_stomped();
            let (enemy_id, kind) = (enemy.id, enemy.kind);
            log::debug!("Enemy {} stomped", enemy_id);
            state.player.body.vel.y = -state.config.stomp_bounce;
            state.register_stomp(enemy_id, kind, enemy_rect.center());
        } else {
            state.damage_player();
        }
    }
}

fn coin_pickups(state: &mut GameState) {
    let player_rect = state.player.body.rect();
    for i in 0..state.level.coins.len() {
        let rect = state.level.coins[i].rect;
        if !overlaps(&player_rect, &rect) || !state.level.coins[i].collect() {
            continue;
        }
        state.award(COIN_SCORE, ScoreReason::Coin);
        state.collect_coin(rect.center());
    }
}

fn flag_reached(state: &mut GameState) {
    let flag = state.level.flag.rect;
    if !overlaps(&state.player.body.rect(), &flag) {
        return;
    }
    let bonus = state.time_bonus();
    state.award(bonus, ScoreReason::TimeBonus);
    state.effects.burst(ParticleKind::Star, flag.center(), 50);
    state.set_status(GameStatus::LevelComplete);
}

/// Dropping off the bottom of the screen costs a life. The respawn moves the
/// player back up, so this fires once per fall.
fn fall_through(state: &mut GameState) {
    if state.player.body.rect().top() > state.config.screen_height {
        log::info!("Player fell out of the world");
        state.events.push(GameEvent::FellOutOfWorld);
        state.player_hit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::enemy::{Enemy, EnemyKind};
    use crate::sim::geom::Span;
    use crate::sim::items::{BlockContent, BlockKind, Mushroom, Platform};
    use crate::sim::level::Level;
    use crate::sim::player::PowerState;

    fn session() -> GameState {
        let config = GameConfig::default();
        let level = Level::empty(1, 2000.0, &config);
        let mut state = GameState::with_level(config, level);
        state.drain_events();
        state
    }

    fn idle_enemy(state: &mut GameState, x: f32) -> u32 {
        let enemy = Enemy::new(0, EnemyKind::Goomba, x, 510.0, 0.0, &state.config).idle();
        state.level.add_enemy(enemy)
    }

    fn run(state: &mut GameState, ticks: usize) {
        for _ in 0..ticks {
            tick(state, &TickInput::default()).unwrap();
        }
    }

    fn count(events: &[GameEvent], pred: impl Fn(&GameEvent) -> bool) -> usize {
        events.iter().filter(|e| pred(*e)).count()
    }

    #[test]
    fn test_idle_tick_settles_player() {
        let mut state = session();
        run(&mut state, 1);
        assert!(state.player.on_ground());
        assert_eq!(state.ticks, 1);
        assert_eq!(state.time_counter, 1);
        assert_eq!(state.status, GameStatus::Playing);
    }

    #[test]
    fn test_commands_are_gated_by_status() {
        let mut state = session();
        state.score = 40;
        let restart = TickInput {
            command: Some(Command::Restart),
            ..Default::default()
        };
        tick(&mut state, &restart).unwrap();
        assert_eq!(state.score, 40);

        let advance = TickInput {
            command: Some(Command::AdvanceLevel),
            ..Default::default()
        };
        tick(&mut state, &advance).unwrap();
        assert_eq!(state.level_index, 1);
    }

    #[test]
    fn test_stomp_from_falling() {
        let mut state = session();
        let id = idle_enemy(&mut state, 300.0);
        state.player.body.set_left(300.0);
        state.player.body.set_bottom(480.0);

        let mut stomped = false;
        for _ in 0..12 {
            tick(&mut state, &TickInput::default()).unwrap();
            let events = state.drain_events();
            let hit = events.iter().any(
                |e| matches!(e, GameEvent::EnemyStomped { enemy_id, .. } if *enemy_id == id),
            );
            if hit {
                stomped = true;
                break;
            }
        }
        assert!(stomped);
        assert_eq!(state.combo, 1);
        assert_eq!(state.score, 100);
        assert_eq!(state.lives, 3);
        assert_eq!(state.player.body.vel.y, -state.config.stomp_bounce);
        assert!(!state.level.enemies[0].is_alive());
    }

    #[test]
    fn test_stomp_combo_doubles_bonus() {
        let mut state = session();
        idle_enemy(&mut state, 300.0);
        idle_enemy(&mut state, 600.0);

        // Feet 3 px above the first enemy's center, falling at 6
        let center = state.level.enemies[0].body.rect().centery();
        state.player.body.set_left(300.0);
        state.player.body.set_bottom(center - 3.0);
        state.player.body.vel.y = 6.0;
        enemy_contacts(&mut state);
        assert_eq!((state.combo, state.score), (1, 100));

        state.decay_combo();
        state.player.body.set_left(600.0);
        state.player.body.set_bottom(center - 3.0);
        state.player.body.vel.y = 6.0;
        enemy_contacts(&mut state);
        assert_eq!((state.combo, state.score), (2, 300));
    }

    #[test]
    fn test_side_bump_costs_small_player_a_life() {
        let mut state = session();
        idle_enemy(&mut state, 145.0);
        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        // Touching on tick 1, overlapping on tick 2
        for _ in 0..2 {
            tick(&mut state, &right).unwrap();
        }
        assert_eq!(state.lives, 2);
        assert_eq!(state.player.body.pos.x, state.config.player_spawn_x);
    }

    #[test]
    fn test_side_bump_demotes_super_player() {
        let mut state = session();
        state.player.power_up(&state.config);
        idle_enemy(&mut state, 145.0);
        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        for _ in 0..3 {
            tick(&mut state, &right).unwrap();
        }
        assert_eq!(state.lives, 3);
        assert_eq!(state.player.power, PowerState::Small);
        assert!(state.player.invincible_timer > 0);
    }

    #[test]
    fn test_fireball_kill_prevents_damage_same_tick() {
        let mut state = session();
        run(&mut state, 1);
        state.player.fire_power_up(&state.config);
        idle_enemy(&mut state, 130.0);
        let target = state.level.enemies[0].body.rect().center();
        state.player.fireballs.push(Fireball::new(target, 1.0));

        run(&mut state, 1);
        let events = state.drain_events();
        assert_eq!(count(&events, |e| matches!(e, GameEvent::EnemyBurned { .. })), 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.player.power, PowerState::Fire);
        assert_eq!(state.score, FIREBALL_KILL_SCORE);
        assert!(state.player.fireballs.is_empty());
    }

    #[test]
    fn test_jump_into_coin_block() {
        let mut state = session();
        state
            .level
            .add_block(100.0, 440.0, BlockKind::Question, BlockContent::Coin);
        run(&mut state, 1);
        let jump = TickInput {
            jump_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &jump).unwrap();
        run(&mut state, 5);

        assert_eq!(state.score, COIN_SCORE);
        assert_eq!(state.coins, 1);
        assert!(state.level.blocks[0].hit);
        let events = state.drain_events();
        assert_eq!(
            count(&events, |e| matches!(
                e,
                GameEvent::BlockHit {
                    outcome: HitOutcome::Coin,
                    ..
                }
            )),
            1
        );
    }

    #[test]
    fn test_power_up_block_spawns_mushroom_for_small_player() {
        let mut state = session();
        state
            .level
            .add_block(100.0, 440.0, BlockKind::Question, BlockContent::AdaptivePowerUp);
        run(&mut state, 1);
        let jump = TickInput {
            jump_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &jump).unwrap();
        run(&mut state, 5);

        assert_eq!(state.level.mushrooms.len(), 1);
        assert!(state.level.flowers.is_empty());
        assert_eq!(state.score, POWER_UP_BLOCK_SCORE);
    }

    #[test]
    fn test_eating_mushroom_grows_player() {
        let mut state = session();
        run(&mut state, 1);
        let mut mushroom = Mushroom::from_block(99, &state.player.body.rect());
        mushroom.body.set_bottom(state.config.ground_y());
        state.level.mushrooms.push(mushroom);

        run(&mut state, 1);
        assert_eq!(state.player.power, PowerState::Super);
        assert!(state.level.mushrooms.is_empty());
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::MushroomEaten { grew: true }));
    }

    #[test]
    fn test_extra_life_is_capped() {
        let mut state = session();
        state.level.add_power_up(100.0, 520.0, PowerUpKind::ExtraLife);
        state.level.add_power_up(100.0, 520.0, PowerUpKind::ExtraLife);
        state.lives = 2;
        run(&mut state, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 2 * EXTRA_LIFE_SCORE);
        assert!(state.level.power_ups.is_empty());
    }

    #[test]
    fn test_speed_boost_pickup() {
        let mut state = session();
        state.level.add_power_up(100.0, 520.0, PowerUpKind::SpeedBoost);
        run(&mut state, 1);
        assert_eq!(state.player.speed_boost_timer, state.config.speed_boost_ticks);
        assert_eq!(state.score, SPEED_BOOST_SCORE);
    }

    #[test]
    fn test_coin_pickup() {
        let mut state = session();
        state.level.add_coin(110.0, 520.0);
        run(&mut state, 2);
        assert_eq!(state.coins, 1);
        assert_eq!(state.score, COIN_SCORE);
        assert!(state.level.coins.is_empty());
    }

    #[test]
    fn test_flag_completes_level_with_time_bonus() {
        let mut state = GameState::new(GameConfig::default()).unwrap();
        let flag = state.level.flag.rect;
        state.player.body.set_left(flag.left() + 5.0);
        run(&mut state, 1);
        assert_eq!(state.status, GameStatus::LevelComplete);
        assert_eq!(state.score, 300 * TIME_BONUS_PER_SECOND);

        // Waiting: nothing simulates
        let before = state.ticks;
        run(&mut state, 10);
        assert_eq!(state.ticks, before);

        let advance = TickInput {
            command: Some(Command::AdvanceLevel),
            ..Default::default()
        };
        tick(&mut state, &advance).unwrap();
        assert_eq!(state.level_index, 2);
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.score, 300 * TIME_BONUS_PER_SECOND);
    }

    #[test]
    fn test_fall_through_costs_one_life_per_fall() {
        let mut state = session();
        state.level.add_pit(Span::new(200.0, 400.0));
        state.player.body.set_left(250.0);
        state.player.body.set_top(560.0);

        run(&mut state, 100);
        let events = state.drain_events();
        assert_eq!(state.lives, 2);
        assert_eq!(count(&events, |e| *e == GameEvent::FellOutOfWorld), 1);
        assert_eq!(count(&events, |e| matches!(e, GameEvent::LifeLost { .. })), 1);
        assert!(state.player.on_ground());
    }

    #[test]
    fn test_walking_into_pit_costs_a_life() {
        let mut state = session();
        state.level.add_pit(Span::new(1000.0, 1080.0));
        state.player.body.set_left(900.0);
        let right = TickInput {
            move_right: true,
            ..Default::default()
        };

        let mut deepest = 0.0f32;
        let mut events = Vec::new();
        for _ in 0..60 {
            tick(&mut state, &right).unwrap();
            deepest = deepest.max(state.player.body.rect().bottom());
            events.extend(state.drain_events());
        }
        assert_eq!(count(&events, |e| *e == GameEvent::FellOutOfWorld), 1);
        assert_eq!(count(&events, |e| matches!(e, GameEvent::LifeLost { .. })), 1);
        assert_eq!(state.lives, 2);
        assert!(deepest > state.config.screen_height);
        // Respawned and walking again, nowhere near the pit
        assert!(state.player.body.rect().right() < 1000.0);
    }

    #[test]
    fn test_enemy_dropping_into_pit_is_reported() {
        let mut state = session();
        state.level.add_pit(Span::new(400.0, 700.0));
        let enemy = Enemy::new(0, EnemyKind::Goomba, 500.0, 510.0, 20.0, &state.config);
        let id = state.level.add_enemy(enemy);

        let mut events = Vec::new();
        for _ in 0..60 {
            tick(&mut state, &TickInput::default()).unwrap();
            events.extend(state.drain_events());
        }
        assert_eq!(
            count(&events, |e| *e == GameEvent::EnemyFellOut { enemy_id: id }),
            1
        );
        assert!(state.level.enemies.is_empty());
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_head_bump_under_platform() {
        let mut state = session();
        state.level.add_platform(Platform::new(80.0, 450.0, 100.0, 20.0));
        run(&mut state, 1);
        let jump = TickInput {
            jump_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &jump).unwrap();
        run(&mut state, 5);
        let events = state.drain_events();
        assert_eq!(count(&events, |e| *e == GameEvent::HeadBumped), 1);
        assert!(state.player.body.rect().top() >= 470.0);
    }

    #[test]
    fn test_time_out_kills_small_player() {
        let mut state = session();
        state.time_remaining = 1;
        run(&mut state, 60);
        assert_eq!(state.lives, 2);
        assert_eq!(state.time_remaining, state.config.level_time);
    }

    #[test]
    fn test_game_over_and_restart() {
        let mut state = session();
        state.lives = 1;
        state.time_remaining = 1;
        run(&mut state, 60);
        assert_eq!(state.status, GameStatus::GameOver);

        let restart = TickInput {
            command: Some(Command::Restart),
            ..Default::default()
        };
        tick(&mut state, &restart).unwrap();
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level_index, 1);
    }

    #[test]
    fn test_same_inputs_same_outcome() {
        let script = |t: usize| TickInput {
            move_right: t % 90 < 60,
            move_left: t % 90 >= 75,
            jump_pressed: t % 45 == 0,
            shoot_pressed: t % 20 == 0,
            command: None,
        };
        let mut a = GameState::new(GameConfig::default()).unwrap();
        let mut b = GameState::new(GameConfig::default()).unwrap();
        for t in 0..600 {
            tick(&mut a, &script(t)).unwrap();
            tick(&mut b, &script(t)).unwrap();
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.player.body.pos, b.player.body.pos);
        assert_eq!(a.effects.particles.len(), b.effects.particles.len());
        assert_eq!(a.drain_events(), b.drain_events());
    }
}
