//! Spawning enemies, letters, and shots

use glam::Vec2;
use rand::Rng;

use super::entity::{Emotion, Entity, EntityId, EntityKind};
use super::state::{GameEvent, GameState};
use super::timers::TimerKind;
use crate::consts::*;

impl GameState {
    /// Spawn an enemy with a random emotion at a random x near the top
    pub fn spawn_enemy(&mut self) -> EntityId {
        let emotion = Emotion::ALL[self.rng.random_range(0..Emotion::ALL.len())];
        let x = self
            .rng
            .random_range(ENEMY_SPAWN_MARGIN..self.config.play_width - ENEMY_SPAWN_MARGIN);
        self.spawn_enemy_at(emotion, Vec2::new(x, ENEMY_SPAWN_Y))
    }

    /// Place an enemy and start its fire timer
    pub fn spawn_enemy_at(&mut self, emotion: Emotion, pos: Vec2) -> EntityId {
        let id = self.entities.reserve_id();
        let fire_timer = self.timers.every(
            self.clock_ms,
            self.config.enemy_fire_interval_ms,
            TimerKind::EnemyFire(id),
        );
        self.entities.insert(Entity {
            id,
            pos,
            kind: EntityKind::Enemy { emotion, fire_timer },
        });
        log::debug!("Spawned {} enemy {:?} at x={:.0}", emotion.label(), id, pos.x);
        id
    }

    /// Spawn a random letter of the target word above the play area
    ///
    /// Letters are drawn with replacement; duplicates only matter at pickup.
    pub fn spawn_collectible(&mut self) -> EntityId {
        let len = self.word().len();
        let idx = self.rng.random_range(0..len);
        let letter = self.word()[idx];
        let x = self.rng.random_range(
            COLLECTIBLE_SPAWN_MARGIN..self.config.play_width - COLLECTIBLE_SPAWN_MARGIN,
        );
        self.spawn_collectible_at(letter, Vec2::new(x, COLLECTIBLE_SPAWN_Y))
    }

    pub fn spawn_collectible_at(&mut self, letter: char, pos: Vec2) -> EntityId {
        let id = self.entities.spawn(EntityKind::Collectible { letter }, pos);
        log::debug!("Spawned letter {letter} at x={:.0}", pos.x);
        id
    }

    /// Fire a bullet from a live enemy; `None` if the enemy is gone
    pub fn fire_enemy_bullet(&mut self, enemy: EntityId) -> Option<EntityId> {
        let (pos, color) = match self.entities.get(enemy) {
            Some(Entity {
                pos,
                kind: EntityKind::Enemy { emotion, .. },
                ..
            }) => (*pos, emotion.color()),
            _ => return None,
        };
        let bullet = self.entities.spawn(
            EntityKind::EnemyBullet { color },
            pos + Vec2::new(0.0, ENEMY_BULLET_SPAWN_OFFSET),
        );
        self.push_event(GameEvent::EnemyFired(enemy));
        Some(bullet)
    }

    /// Fire a projectile from the player if the cooldown allows
    pub fn fire_projectile(&mut self) -> Option<EntityId> {
        if !self
            .player
            .can_fire(self.clock_ms, self.config.fire_cooldown_ms)
        {
            return None;
        }
        self.player.last_fire_ms = Some(self.clock_ms);
        let pos = self.player.pos - Vec2::new(0.0, PROJECTILE_SPAWN_OFFSET);
        let id = self.entities.spawn(EntityKind::Projectile, pos);
        self.push_event(GameEvent::ProjectileFired);
        Some(id)
    }

    /// Remove an enemy and cancel its fire timer
    pub fn destroy_enemy(&mut self, enemy: EntityId) -> bool {
        let fire_timer = match self.entities.get(enemy) {
            Some(Entity {
                kind: EntityKind::Enemy { fire_timer, .. },
                ..
            }) => *fire_timer,
            _ => return false,
        };
        self.entities.remove(enemy);
        self.timers.cancel(fire_timer);
        true
    }

    /// Act on a timer that came due
    pub(crate) fn run_timer(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::SpawnEnemy => {
                self.spawn_enemy();
            }
            TimerKind::SpawnCollectible => {
                self.spawn_collectible();
            }
            TimerKind::EnemyFire(enemy) => {
                if self.fire_enemy_bullet(enemy).is_none() {
                    log::debug!("Fire timer for missing enemy {enemy:?} ignored");
                }
            }
        }
    }
}
