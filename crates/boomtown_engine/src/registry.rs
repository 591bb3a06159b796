//! Concurrent games hosted by one process.

use crate::config::GameConfig;
use crate::error::GameResult;
use crate::game::{GameHandle, GameId};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::info;

/// Thread-safe table of running games keyed by [`GameId`].
///
/// Removing a game drops the registry's handle; the coordinator stops once no
/// other handle to it remains.
#[derive(Debug, Clone, Default)]
pub struct GameRegistry {
    games: Arc<DashMap<GameId, GameHandle>>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a new game and registers it.
    pub fn create(&self, config: GameConfig) -> GameResult<GameHandle> {
        let handle = GameHandle::spawn(config)?;
        self.games.insert(handle.id(), handle.clone());
        info!("🎮 Registered game {} ({} running)", handle.id(), self.games.len());
        Ok(handle)
    }

    pub fn get(&self, id: GameId) -> Option<GameHandle> {
        self.games.get(&id).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, id: GameId) -> Option<GameHandle> {
        self.games.remove(&id).map(|(_, handle)| handle)
    }

    pub fn ids(&self) -> Vec<GameId> {
        self.games.iter().map(|entry| *entry.key()).collect()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
