//! Coordinator-owned game state.
//!
//! Exactly one task, the game coordinator, holds a [`GameState`]. Player tasks
//! never touch it directly; they send their moves over channels and the
//! coordinator applies them here one at a time.

use crate::config::GameConfig;
use crate::deed::DeedTable;
use crate::economy::{self, Settlement};
use crate::entity::{Entities, Entity, Roster};
use crate::error::{GameError, GameResult};
use crate::field::Field;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use tracing::{debug, info};

pub(crate) struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) field: Field,
    pub(crate) week: u32,
    pub(crate) price: i64,
    pub(crate) prices: Vec<i64>,
    pub(crate) entities: Entities,
    pub(crate) roster: Roster,
    pub(crate) deeds: DeedTable,
    /// Index into the roster of the player allowed to survey next
    pub(crate) survey_turn: usize,
    /// Players whose turn machine reached `Done` this week
    pub(crate) finished: HashSet<Entity>,
    rng: ChaCha8Rng,
}

impl GameState {
    pub(crate) fn new(config: GameConfig, field: Field, seed: u64) -> Self {
        // Prices use their own stream so a constructed field does not shift them.
        let rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
        let price = config.price.base_cents;
        Self {
            config,
            field,
            week: 0,
            price,
            prices: Vec::new(),
            entities: Entities::new(),
            roster: Roster::new(),
            deeds: DeedTable::new(),
            survey_turn: 0,
            finished: HashSet::new(),
            rng,
        }
    }

    pub(crate) fn join(&mut self, name: &str) -> GameResult<Entity> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyName);
        }
        let player = self.entities.next();
        self.roster.add(player, name);
        info!("👤 \"{}\" joined as player {}", name, player);
        Ok(player)
    }

    pub(crate) fn leave(&mut self, player: Entity) -> GameResult<()> {
        if !self.roster.remove(player) {
            return Err(GameError::UnknownPlayer(player));
        }
        if self.survey_turn >= self.roster.len() {
            self.survey_turn = 0;
        }
        info!("🚪 Player {} left the lobby", player);
        Ok(())
    }

    /// The player whose survey is accepted next
    pub(crate) fn turn_holder(&self) -> Entity {
        self.roster
            .players()
            .get(self.survey_turn)
            .copied()
            .unwrap_or(Entity::NONE)
    }

    pub(crate) fn advance_turn(&mut self) {
        let players = self.roster.len().max(1);
        self.survey_turn = (self.survey_turn + 1) % players;
    }

    /// Advances the week counter and draws the week's price.
    pub(crate) fn begin_week(&mut self) {
        self.week += 1;
        self.price = economy::draw_price(&mut self.rng, &self.config.price);
        self.prices.push(self.price);
        self.finished.clear();
    }

    /// Settles every producing well at this week's price.
    pub(crate) fn end_week(&mut self) -> Vec<Settlement> {
        let settlements = economy::settle(&self.field, &mut self.deeds, self.week, self.price);
        debug!("Settled {} wells for week {}", settlements.len(), self.week);
        settlements
    }

    pub(crate) fn is_over(&self) -> bool {
        self.week >= self.config.weeks
    }
}
