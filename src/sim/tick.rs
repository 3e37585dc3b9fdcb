//! Fixed timestep simulation tick
//!
//! Core game loop that advances the round deterministically. One tick runs,
//! in order: clock and time budget, player movement and firing, integration,
//! off-screen culling, collision resolution, then any timers that came due.

use super::entity::{EntityId, EntityKind, Heading};
use super::state::{GameEvent, GameState, LossCause, RoundPhase};
use crate::config::GameConfig;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Move left (arrow/A/left button)
    pub left: bool,
    /// Move right (arrow/D/right button)
    pub right: bool,
    /// Fire (space/fire button)
    pub fire: bool,
    /// Drag target x; overrides left/right when present
    pub target_x: Option<f32>,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep (`dt` in seconds)
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Nothing moves outside a live round
    if state.phase != RoundPhase::Playing {
        return;
    }

    let input = if input.idle_mode {
        autopilot_input(state)
    } else {
        input.clone()
    };

    state.time_ticks += 1;
    state.clock_ms += dt as f64 * 1000.0;
    state.elapsed_secs = ((state.clock_ms - state.start_ms) / 1000.0).floor() as u32;

    if let Some(budget) = state.config.time_budget_secs {
        if state.elapsed_secs >= budget {
            state.lose(LossCause::OutOfTime);
            return;
        }
    }
    state.update_countdown();

    move_player(state, &input);
    if input.fire {
        state.fire_projectile();
    }

    integrate(state);
    cull_offscreen(state);

    if resolve_collisions(state) {
        return;
    }

    for due in state.timers.take_due(state.clock_ms) {
        if state.phase != RoundPhase::Playing {
            break;
        }
        state.run_timer(due);
    }
}

fn move_player(state: &mut GameState, input: &TickInput) {
    let speed = state.config.player_speed;
    let dx = match input.target_x {
        // Follow the drag point without overshooting it
        Some(target) => (target - state.player.pos.x).clamp(-speed, speed),
        None => {
            let mut dx = 0.0;
            if input.left {
                dx -= speed;
            }
            if input.right {
                dx += speed;
            }
            dx
        }
    };
    if dx != 0.0 {
        state.player.shift(dx, state.config.play_width);
    }
}

/// Per-tick vertical displacement for an entity kind
pub fn vertical_step(kind: &EntityKind, config: &GameConfig) -> f32 {
    match kind.heading() {
        Heading::Up => -speed_of(kind, config),
        Heading::Down => speed_of(kind, config),
        Heading::Still => 0.0,
    }
}

fn speed_of(kind: &EntityKind, config: &GameConfig) -> f32 {
    match kind {
        EntityKind::Projectile => config.projectile_speed,
        EntityKind::EnemyBullet { .. } => config.enemy_bullet_speed,
        EntityKind::Collectible { .. } => config.collectible_speed,
        EntityKind::Enemy { .. } => 0.0,
    }
}

/// Move every entity by its fixed per-tick velocity
fn integrate(state: &mut GameState) {
    let config = &state.config;
    let store = &mut state.entities;
    for collection in [
        &mut store.projectiles,
        &mut store.enemies,
        &mut store.enemy_bullets,
        &mut store.collectibles,
    ] {
        for entity in collection.iter_mut() {
            entity.pos.y += vertical_step(&entity.kind, config);
        }
    }
}

/// Drop entities whose box has fully left the play area in their direction
/// of travel. No scoring side effects.
fn cull_offscreen(state: &mut GameState) {
    let height = state.config.play_height;
    let gone = |kind: &EntityKind, top: f32, bottom: f32| match kind.heading() {
        Heading::Up => bottom <= 0.0,
        Heading::Down => top >= height,
        Heading::Still => false,
    };

    let store = &mut state.entities;
    for collection in [
        &mut store.projectiles,
        &mut store.enemy_bullets,
        &mut store.collectibles,
    ] {
        collection.retain(|e| {
            let b = e.bounds();
            !gone(&e.kind, b.top(), b.bottom())
        });
    }

    // Enemies hold a timer, so they go through destroy_enemy
    let stale: Vec<EntityId> = state
        .entities
        .enemies
        .iter()
        .filter(|e| {
            let b = e.bounds();
            gone(&e.kind, b.top(), b.bottom())
        })
        .map(|e| e.id)
        .collect();
    for id in stale {
        state.destroy_enemy(id);
    }
}

/// Resolve overlaps in priority order. Returns true if the round ended.
fn resolve_collisions(state: &mut GameState) -> bool {
    resolve_projectile_hits(state);

    let player = state.player.bounds();
    if state
        .entities
        .enemy_bullets
        .iter()
        .any(|b| b.bounds().overlaps(&player))
    {
        state.lose(LossCause::Shot);
        return true;
    }

    resolve_pickups(state)
}

/// Each projectile destroys at most one enemy, and each enemy absorbs at
/// most one projectile.
fn resolve_projectile_hits(state: &mut GameState) {
    let mut spent: Vec<EntityId> = Vec::new();
    let mut killed: Vec<EntityId> = Vec::new();

    for projectile in &state.entities.projectiles {
        let bounds = projectile.bounds();
        let hit = state
            .entities
            .enemies
            .iter()
            .find(|e| !killed.contains(&e.id) && bounds.overlaps(&e.bounds()));
        if let Some(enemy) = hit {
            spent.push(projectile.id);
            killed.push(enemy.id);
        }
    }

    for id in spent {
        state.entities.remove(id);
    }
    for id in killed {
        if state.destroy_enemy(id) {
            log::debug!("Enemy {id:?} destroyed");
            state.push_event(GameEvent::EnemyDestroyed(id));
        }
    }
}

/// Returns true if the pickup completed the word
fn resolve_pickups(state: &mut GameState) -> bool {
    let player = state.player.bounds();
    let touched: Vec<(EntityId, char)> = state
        .entities
        .collectibles
        .iter()
        .filter(|c| c.bounds().overlaps(&player))
        .filter_map(|c| match c.kind {
            EntityKind::Collectible { letter } => Some((c.id, letter)),
            _ => None,
        })
        .collect();

    for (id, letter) in touched {
        state.entities.remove(id);
        let new = state.required_letters().contains(&letter) && state.collected.insert(letter);
        state.push_event(GameEvent::LetterCollected { letter, new });
        if new {
            log::debug!("Collected {letter} ({}/{})", state.collected.len(), state.required_letters().len());
            if state.has_all_letters() {
                state.win();
                return true;
            }
        }
    }
    false
}

/// Demo-mode controller
///
/// Dodges bullets about to land, otherwise chases the nearest letter it
/// still needs, otherwise lines up under an enemy. Fires whenever an enemy
/// is roughly overhead.
pub fn autopilot_input(state: &GameState) -> TickInput {
    let player = state.player.pos;
    let half_width = crate::consts::PLAYER_SIZE / 2.0;

    let mut input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    input.fire = state
        .entities
        .enemies
        .iter()
        .any(|e| (e.pos.x - player.x).abs() < 15.0);

    // Closest incoming bullet in our column
    let threat = state
        .entities
        .enemy_bullets
        .iter()
        .filter(|b| b.pos.y < player.y && player.y - b.pos.y < 160.0)
        .filter(|b| (b.pos.x - player.x).abs() < half_width + 12.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(bullet) = threat {
        // Step away toward whichever side has more room
        let away = if bullet.pos.x > player.x {
            -1.0
        } else if bullet.pos.x < player.x {
            1.0
        } else if player.x > state.config.play_width / 2.0 {
            -1.0
        } else {
            1.0
        };
        input.target_x = Some(player.x + away * 80.0);
        return input;
    }

    let wanted = state
        .entities
        .collectibles
        .iter()
        .filter(|c| match c.kind {
            EntityKind::Collectible { letter } => !state.is_collected(letter),
            _ => false,
        })
        .filter(|c| c.pos.y < player.y)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(letter) = wanted {
        input.target_x = Some(letter.pos.x);
    } else if let Some(enemy) = state
        .entities
        .enemies
        .iter()
        .min_by(|a, b| (a.pos.x - player.x).abs().total_cmp(&(b.pos.x - player.x).abs()))
    {
        input.target_x = Some(enemy.pos.x);
    }

    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::Emotion;
    use glam::Vec2;
    use std::collections::BTreeSet;

    /// Playing state with spawners disarmed so tests control every entity
    fn quiet(word: &str) -> GameState {
        let config = GameConfig {
            target_word: word.to_string(),
            time_budget_secs: None,
            ..Default::default()
        };
        let mut state = GameState::new(config, 12345);
        state.reset();
        state.timers.clear();
        state.drain_events();
        state
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_tick_before_start_is_noop() {
        let mut state = GameState::new(GameConfig::default(), 1);
        tick(&mut state, &TickInput { fire: true, ..idle() }, SIM_DT);
        assert_eq!(state.phase, RoundPhase::NotStarted);
        assert_eq!(state.time_ticks, 0);
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_integration_steps_each_variant() {
        let mut state = quiet("SOLDIER");
        let shot = state.entities.spawn(EntityKind::Projectile, Vec2::new(100.0, 300.0));
        let bullet = state
            .entities
            .spawn(EntityKind::EnemyBullet { color: 0 }, Vec2::new(200.0, 100.0));
        let letter = state.spawn_collectible_at('S', Vec2::new(300.0, 100.0));
        let enemy = state.spawn_enemy_at(Emotion::Fear, Vec2::new(700.0, 50.0));
        state.timers.clear();

        for n in 1..=10 {
            tick(&mut state, &idle(), SIM_DT);
            let n = n as f32;
            assert_eq!(state.entities.get(shot).unwrap().pos.y, 300.0 - 8.0 * n);
            assert_eq!(state.entities.get(bullet).unwrap().pos.y, 100.0 + 5.0 * n);
            assert_eq!(state.entities.get(letter).unwrap().pos.y, 100.0 + 2.0 * n);
            assert_eq!(state.entities.get(enemy).unwrap().pos.y, 50.0);
        }
    }

    #[test]
    fn test_removed_on_first_tick_fully_outside() {
        let mut state = quiet("SOLDIER");
        let shot = state.entities.spawn(EntityKind::Projectile, Vec2::new(100.0, 40.0));
        let bullet = state
            .entities
            .spawn(EntityKind::EnemyBullet { color: 0 }, Vec2::new(900.0, 560.0));

        let half_h = PROJECTILE_SIZE.1 / 2.0;
        let mut shot_y = 40.0;
        let mut bullet_y = 560.0;
        for _ in 0..40 {
            tick(&mut state, &idle(), SIM_DT);
            shot_y -= PROJECTILE_SPEED;
            bullet_y += ENEMY_BULLET_SPEED;

            // Bottom edge at or above the top of the play area
            assert_eq!(state.entities.is_alive(shot), shot_y + half_h > 0.0);
            // Top edge at or below the bottom of the play area
            assert_eq!(
                state.entities.is_alive(bullet),
                bullet_y - ENEMY_BULLET_SIZE.1 / 2.0 < PLAY_HEIGHT
            );
        }
        assert!(state.entities.is_empty());
        assert_eq!(state.phase, RoundPhase::Playing);
    }

    #[test]
    fn test_collectible_spawned_above_area_is_kept() {
        let mut state = quiet("SOLDIER");
        let letter = state.spawn_collectible_at('S', Vec2::new(100.0, COLLECTIBLE_SPAWN_Y));
        tick(&mut state, &idle(), SIM_DT);
        assert!(state.entities.is_alive(letter));
    }

    #[test]
    fn test_cat_scenario_ignores_duplicate() {
        let mut state = quiet("CAT");
        let at_player = state.player.pos;

        for (i, letter) in ['C', 'C', 'A', 'T'].into_iter().enumerate() {
            assert_eq!(state.phase, RoundPhase::Playing, "won early at pickup {i}");
            state.spawn_collectible_at(letter, at_player);
            tick(&mut state, &idle(), SIM_DT);
            // Always consumed, duplicate or not
            assert!(state.entities.collectibles.is_empty());
        }

        assert_eq!(state.phase, RoundPhase::Won);
        assert_eq!(state.collected.len(), 3);
        assert_eq!(state.collected, BTreeSet::from(['A', 'C', 'T']));

        let events = state.drain_events();
        let wins = events
            .iter()
            .filter(|e| matches!(e, GameEvent::RoundWon { .. }))
            .count();
        assert_eq!(wins, 1);
        assert!(events.contains(&GameEvent::LetterCollected { letter: 'C', new: false }));

        // Terminal: nothing more happens
        for _ in 0..10 {
            tick(&mut state, &idle(), SIM_DT);
        }
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_no_win_on_strict_subset() {
        let mut state = quiet("SOLDIER");
        let at_player = state.player.pos;
        for letter in "SOLDIE".chars().chain("SOLD".chars()) {
            state.spawn_collectible_at(letter, at_player);
            tick(&mut state, &idle(), SIM_DT);
        }
        assert_eq!(state.phase, RoundPhase::Playing);
        assert_eq!(state.collected.len(), 6);

        state.spawn_collectible_at('R', at_player);
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.phase, RoundPhase::Won);
    }

    #[test]
    fn test_foreign_letter_is_consumed_but_not_collected() {
        let mut state = quiet("CAT");
        state.spawn_collectible_at('Z', state.player.pos);
        tick(&mut state, &idle(), SIM_DT);
        assert!(state.collected.is_empty());
        assert!(state.entities.collectibles.is_empty());
    }

    #[test]
    fn test_bullet_hit_loses_immediately_and_freezes() {
        let mut state = quiet("CAT");
        // Nearly done, plenty of time: loss still wins out
        state.collected.extend(['C', 'A']);
        let above_player = state.player.pos - Vec2::new(0.0, 30.0);
        state
            .entities
            .spawn(EntityKind::EnemyBullet { color: 0xFF3333 }, above_player);
        state.spawn_enemy_at(Emotion::Anger, Vec2::new(200.0, 50.0));

        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.phase, RoundPhase::Lost);
        assert!(state.events().contains(&GameEvent::RoundLost {
            elapsed_secs: 0,
            cause: LossCause::Shot,
        }));
        assert!(state.timers.is_empty());

        let frozen: Vec<(EntityId, Vec2)> = state.entities.iter().map(|e| (e.id, e.pos)).collect();
        let clock = state.clock_ms;
        for _ in 0..200 {
            tick(&mut state, &TickInput { fire: true, left: true, ..idle() }, SIM_DT);
        }
        let after: Vec<(EntityId, Vec2)> = state.entities.iter().map(|e| (e.id, e.pos)).collect();
        assert_eq!(frozen, after);
        assert_eq!(state.clock_ms, clock);
    }

    #[test]
    fn test_killed_enemy_never_fires_its_due_bullet() {
        let mut state = quiet("SOLDIER");
        let enemy = state.spawn_enemy_at(Emotion::Despair, Vec2::new(300.0, 50.0));
        let EntityKind::Enemy { fire_timer, .. } = state.entities.get(enemy).unwrap().kind else {
            panic!("expected enemy");
        };
        // Due during the next tick
        state.timers.set_next_due(fire_timer, state.clock_ms);
        // One step below the enemy so it overlaps after moving up
        state
            .entities
            .spawn(EntityKind::Projectile, Vec2::new(300.0, 60.0 + PROJECTILE_SPEED));

        tick(&mut state, &idle(), SIM_DT);

        assert!(!state.entities.is_alive(enemy));
        assert!(state.entities.projectiles.is_empty());
        assert!(state.entities.enemy_bullets.is_empty());
        assert!(!state.timers.is_scheduled(fire_timer));
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::EnemyDestroyed(enemy)));
        assert!(!events.contains(&GameEvent::EnemyFired(enemy)));
    }

    #[test]
    fn test_live_enemy_fires_on_schedule() {
        let mut state = quiet("SOLDIER");
        let enemy = state.spawn_enemy_at(Emotion::Fear, Vec2::new(300.0, 50.0));
        // 1500 ms = 90 ticks at 60 Hz
        for _ in 0..91 {
            tick(&mut state, &idle(), SIM_DT);
        }
        assert_eq!(state.entities.enemy_bullets.len(), 1);
        assert!(state.drain_events().contains(&GameEvent::EnemyFired(enemy)));
    }

    #[test]
    fn test_projectile_destroys_at_most_one_enemy() {
        let mut state = quiet("SOLDIER");
        let a = state.spawn_enemy_at(Emotion::Fear, Vec2::new(300.0, 50.0));
        let b = state.spawn_enemy_at(Emotion::Guilt, Vec2::new(305.0, 50.0));
        state
            .entities
            .spawn(EntityKind::Projectile, Vec2::new(302.0, 60.0 + PROJECTILE_SPEED));

        tick(&mut state, &idle(), SIM_DT);

        assert_eq!(state.entities.enemies.len(), 1);
        assert!(state.entities.is_alive(a) != state.entities.is_alive(b));
        // The survivor keeps shooting
        assert_eq!(state.timers.len(), 1);
    }

    #[test]
    fn test_held_fire_is_rate_limited() {
        let mut state = quiet("SOLDIER");
        let hold = TickInput { fire: true, ..idle() };
        let mut shot_times: Vec<f64> = Vec::new();

        for _ in 0..600 {
            tick(&mut state, &hold, SIM_DT);
            for event in state.drain_events() {
                if event == GameEvent::ProjectileFired {
                    shot_times.push(state.clock_ms);
                }
            }
        }

        assert!(shot_times.len() >= 30, "only {} shots", shot_times.len());
        assert!(shot_times.len() <= 34, "{} shots", shot_times.len());
        for pair in shot_times.windows(2) {
            assert!(pair[1] - pair[0] >= FIRE_COOLDOWN_MS);
        }
    }

    #[test]
    fn test_keyboard_movement_clamps() {
        let mut state = quiet("SOLDIER");
        let start_x = state.player.pos.x;
        tick(&mut state, &TickInput { left: true, ..idle() }, SIM_DT);
        assert_eq!(state.player.pos.x, start_x - PLAYER_SPEED);
        tick(&mut state, &TickInput { left: true, right: true, ..idle() }, SIM_DT);
        assert_eq!(state.player.pos.x, start_x - PLAYER_SPEED);

        for _ in 0..500 {
            tick(&mut state, &TickInput { right: true, ..idle() }, SIM_DT);
        }
        assert_eq!(state.player.pos.x, PLAY_WIDTH - PLAYER_MARGIN);
    }

    #[test]
    fn test_drag_target_does_not_overshoot() {
        let mut state = quiet("SOLDIER");
        let target = state.player.pos.x + 12.0;
        let drag = TickInput { target_x: Some(target), ..idle() };
        tick(&mut state, &drag, SIM_DT);
        tick(&mut state, &drag, SIM_DT);
        tick(&mut state, &drag, SIM_DT);
        assert_eq!(state.player.pos.x, target);
    }

    #[test]
    fn test_time_budget_runs_out() {
        let mut state = quiet("SOLDIER");
        state.config.time_budget_secs = Some(2);

        for _ in 0..200 {
            tick(&mut state, &idle(), SIM_DT);
        }
        assert_eq!(state.phase, RoundPhase::Lost);
        assert_eq!(state.elapsed_secs, 2);

        let events = state.drain_events();
        let countdown: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Countdown { remaining } => Some(*remaining),
                _ => None,
            })
            .collect();
        assert_eq!(countdown, vec![2, 1]);
        assert_eq!(
            events.last(),
            Some(&GameEvent::RoundLost {
                elapsed_secs: 2,
                cause: LossCause::OutOfTime,
            })
        );
    }

    #[test]
    fn test_spawners_run_on_schedule_and_stop_at_round_end() {
        let mut state = GameState::new(
            GameConfig {
                time_budget_secs: None,
                ..Default::default()
            },
            99,
        );
        state.reset();

        // Collectibles at 2 s and 4 s, first enemy at 4 s
        for _ in 0..240 {
            tick(&mut state, &idle(), SIM_DT);
        }
        assert_eq!(state.entities.collectibles.len(), 2);
        assert_eq!(state.entities.enemies.len(), 1);

        state.lose(LossCause::Shot);
        let count = state.entities.len();
        for _ in 0..1000 {
            tick(&mut state, &idle(), SIM_DT);
        }
        assert_eq!(state.entities.len(), count);
        assert!(state.timers.is_empty());
    }

    #[test]
    fn test_reset_after_round_starts_fresh() {
        let mut state = quiet("CAT");
        state.spawn_collectible_at('C', state.player.pos);
        state.spawn_enemy_at(Emotion::Anger, Vec2::new(100.0, 50.0));
        tick(&mut state, &idle(), SIM_DT);
        state.lose(LossCause::Shot);

        state.reset();
        assert_eq!(state.phase, RoundPhase::Playing);
        assert!(state.entities.is_empty());
        assert!(state.collected.is_empty());
        assert_eq!(state.elapsed_secs, 0);
        assert_eq!(state.timers.len(), 2);
    }

    #[test]
    fn test_autopilot_is_deterministic() {
        let mut a = GameState::new(GameConfig::default(), 2024);
        let mut b = GameState::new(GameConfig::default(), 2024);
        a.reset();
        b.reset();

        let demo = TickInput { idle_mode: true, ..idle() };
        for _ in 0..3600 {
            tick(&mut a, &demo, SIM_DT);
            tick(&mut b, &demo, SIM_DT);
        }

        assert_eq!(a.phase, b.phase);
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.collected, b.collected);
        assert_eq!(a.entities.len(), b.entities.len());
    }

    #[test]
    fn test_autopilot_dodges_incoming_bullet() {
        let mut state = quiet("SOLDIER");
        let player = state.player.pos;
        state
            .entities
            .spawn(EntityKind::EnemyBullet { color: 0 }, player - Vec2::new(-5.0, 100.0));
        let input = autopilot_input(&state);
        assert!(input.target_x.unwrap() < player.x);
    }

    #[test]
    fn test_autopilot_chases_needed_letter() {
        let mut state = quiet("CAT");
        state.collected.insert('C');
        state.spawn_collectible_at('C', Vec2::new(100.0, 400.0));
        state.spawn_collectible_at('A', Vec2::new(800.0, 300.0));
        let input = autopilot_input(&state);
        assert_eq!(input.target_x, Some(800.0));
    }
}
