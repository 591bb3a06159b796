//! Entity allocation and the player roster.
//!
//! Players are identified by opaque [`Entity`] values handed out by a single
//! monotonically increasing counter. Identifiers are never reused, even after
//! a player leaves the lobby and is removed from every index.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

// ============================================================================
// Entity
// ============================================================================

/// Opaque unique identifier. `0` is reserved as "none".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(pub u32);

impl Entity {
    /// The reserved "no entity" value
    pub const NONE: Entity = Entity(0);
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Allocator for [`Entity`] values, starting at 1.
#[derive(Debug, Default)]
pub struct Entities {
    prev: AtomicU32,
}

impl Entities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next identifier.
    pub fn next(&self) -> Entity {
        Entity(self.prev.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

// ============================================================================
// Roster
// ============================================================================

/// Join-ordered players plus their display names.
///
/// The order of [`Roster::players`] is the survey turn order.
#[derive(Debug, Default, Clone)]
pub struct Roster {
    order: Vec<Entity>,
    index: Vec<Entity>,
    names: Vec<String>,
    lookup: HashMap<Entity, usize>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a player at the end of the turn order. Re-adding only renames.
    pub fn add(&mut self, entity: Entity, name: impl Into<String>) {
        let name = name.into();
        if let Some(&i) = self.lookup.get(&entity) {
            self.names[i] = name;
            return;
        }
        self.order.push(entity);
        self.lookup.insert(entity, self.index.len());
        self.index.push(entity);
        self.names.push(name);
    }

    /// Removes a player from the turn order and the name index.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let Some(i) = self.lookup.remove(&entity) else {
            return false;
        };

        // Swap the removed entry with the last one, then shrink.
        let last = self.index.len() - 1;
        self.index.swap(i, last);
        self.names.swap(i, last);
        self.index.truncate(last);
        self.names.truncate(last);
        if i < last {
            self.lookup.insert(self.index[i], i);
        }

        self.order.retain(|&e| e != entity);
        true
    }

    pub fn name(&self, entity: Entity) -> Option<&str> {
        self.lookup.get(&entity).map(|&i| self.names[i].as_str())
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.lookup.contains_key(&entity)
    }

    /// Players in join order
    pub fn players(&self) -> &[Entity] {
        &self.order
    }

    /// The first player to join owns the game and starts it.
    pub fn owner(&self) -> Entity {
        self.order.first().copied().unwrap_or(Entity::NONE)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
