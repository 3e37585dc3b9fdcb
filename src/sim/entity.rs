//! Entities and the entity store
//!
//! Every non-player object is an [`Entity`]: a position plus an
//! [`EntityKind`] carrying only what that variant needs. The store keeps one
//! collection per variant and hands out ids that are never reused, so a stale
//! id simply stops resolving once its entity is gone.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::timers::TimerId;
use crate::consts::*;

/// Handle to a live entity (monotonic, never reused within a game)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Enemy category - each negative emotion has its own color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emotion {
    Fear,
    Anxiety,
    Anger,
    Despair,
    Guilt,
}

impl Emotion {
    pub const ALL: [Emotion; 5] = [
        Emotion::Fear,
        Emotion::Anxiety,
        Emotion::Anger,
        Emotion::Despair,
        Emotion::Guilt,
    ];

    /// Body color (0xRRGGBB); bullets fired by this enemy share it
    pub fn color(&self) -> u32 {
        match self {
            Emotion::Fear => 0x4A6CFF,    // blue
            Emotion::Anxiety => 0xFF6EC7, // pink
            Emotion::Anger => 0xFF3333,   // red
            Emotion::Despair => 0x8A2BE2, // purple
            Emotion::Guilt => 0x00D1A0,   // green
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Fear => "Fear",
            Emotion::Anxiety => "Anxiety",
            Emotion::Anger => "Anger",
            Emotion::Despair => "Despair",
            Emotion::Guilt => "Guilt",
        }
    }
}

/// Direction an entity travels each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
    Still,
}

/// Variant payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Player shot, travels up
    Projectile,
    /// Enemy shot, travels down; colored like its shooter
    EnemyBullet { color: u32 },
    /// Falling letter
    Collectible { letter: char },
    /// Stationary shooter with its own fire timer
    Enemy { emotion: Emotion, fire_timer: TimerId },
}

impl EntityKind {
    /// Bounding box size (width, height)
    pub fn size(&self) -> Vec2 {
        let (w, h) = match self {
            EntityKind::Projectile => PROJECTILE_SIZE,
            EntityKind::EnemyBullet { .. } => ENEMY_BULLET_SIZE,
            EntityKind::Collectible { .. } => COLLECTIBLE_SIZE,
            EntityKind::Enemy { .. } => (ENEMY_GLOW_RADIUS * 2.0, ENEMY_GLOW_RADIUS * 2.0),
        };
        Vec2::new(w, h)
    }

    pub fn heading(&self) -> Heading {
        match self {
            EntityKind::Projectile => Heading::Up,
            EntityKind::EnemyBullet { .. } | EntityKind::Collectible { .. } => Heading::Down,
            EntityKind::Enemy { .. } => Heading::Still,
        }
    }
}

/// A live non-player object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub pos: Vec2,
    pub kind: EntityKind,
}

impl Entity {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.kind.size())
    }
}

/// Live entities, one collection per variant
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStore {
    pub projectiles: Vec<Entity>,
    pub enemies: Vec<Entity>,
    pub enemy_bullets: Vec<Entity>,
    pub collectibles: Vec<Entity>,
    next_id: u32,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Allocate a new entity ID without inserting anything
    ///
    /// Enemies need their id before insertion so the fire timer can be keyed
    /// by it.
    pub fn reserve_id(&mut self) -> EntityId {
        // Default-constructed stores start at 0; keep 0 unused either way
        self.next_id = self.next_id.max(1);
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert under a fresh id
    pub fn spawn(&mut self, kind: EntityKind, pos: Vec2) -> EntityId {
        let id = self.reserve_id();
        self.insert(Entity { id, pos, kind });
        id
    }

    /// Insert into the collection matching the entity's variant
    pub fn insert(&mut self, entity: Entity) {
        self.collection_mut(&entity.kind).push(entity);
    }

    fn collection_mut(&mut self, kind: &EntityKind) -> &mut Vec<Entity> {
        match kind {
            EntityKind::Projectile => &mut self.projectiles,
            EntityKind::EnemyBullet { .. } => &mut self.enemy_bullets,
            EntityKind::Collectible { .. } => &mut self.collectibles,
            EntityKind::Enemy { .. } => &mut self.enemies,
        }
    }

    /// All collections, in a stable order
    fn collections(&self) -> [&Vec<Entity>; 4] {
        [
            &self.projectiles,
            &self.enemies,
            &self.enemy_bullets,
            &self.collectibles,
        ]
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.collections()
            .into_iter()
            .flat_map(|c| c.iter())
            .find(|e| e.id == id)
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Remove and return an entity; `None` if it's already gone
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        for collection in [
            &mut self.projectiles,
            &mut self.enemies,
            &mut self.enemy_bullets,
            &mut self.collectibles,
        ] {
            if let Some(idx) = collection.iter().position(|e| e.id == id) {
                return Some(collection.remove(idx));
            }
        }
        None
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.collections().into_iter().flat_map(|c| c.iter())
    }

    pub fn len(&self) -> usize {
        self.collections().iter().map(|c| c.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entity (ids keep counting up)
    pub fn clear(&mut self) {
        self.projectiles.clear();
        self.enemies.clear();
        self.enemy_bullets.clear();
        self.collectibles.clear();
    }
}
