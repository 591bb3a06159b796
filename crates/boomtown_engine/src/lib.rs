//! # Boomtown Engine
//!
//! A multiplayer, turn-based oil speculation game. Players survey sites on a
//! procedurally generated field, drill for oil, and earn or lose money as
//! their wells pump from shared reservoirs over a fixed number of weeks.
//!
//! ## Architecture Overview
//!
//! * **Field** - four attribute grids (survey odds, drilling cost, oil depth,
//!   tax) grown from random peaks with a seeded ChaCha RNG
//! * **Reservoirs** - connected components of equal oil depth; every well in
//!   a reservoir shares its pressure
//! * **Economy** - weekly price draws, pressure decay, capacity ramp-up and
//!   settlement into each deed's profit and loss
//! * **Turn machines** - one task per player per week walking
//!   Survey → Report → Drill → Sell → Done
//! * **Coordinator** - the single task that owns all game state, routes
//!   player moves and closes each week once every player is done
//!
//! ### Message Flow
//!
//! 1. A client calls [`GameHandle::submit`] with a [`Move`]
//! 2. The coordinator routes the move to that player's turn machine
//! 3. The machine hands it back to the coordinator with its current phase
//! 4. The coordinator applies it to the game state and returns the next phase
//!    and the [`View`] the player sees
//!
//! ## Error Handling
//!
//! Only API misuse (joining a running game, unknown players, a stopped
//! coordinator) produces a [`GameError`]. Protocol violations such as moving
//! out of turn are logged and answered with the same view again.

pub use config::{AttributeSpec, FieldParams, GameConfig, PriceSettings};
pub use deed::{Deed, DeedTable, SaleRejection};
pub use economy::Settlement;
pub use entity::Entity;
pub use error::{GameError, GameResult};
pub use field::Field;
pub use game::{GameHandle, GameId};
pub use play::{Move, Phase};
pub use registry::GameRegistry;
pub use view::View;

/// Deepest drillable level; oil depths and drill bits never exceed it.
pub const MAX_DEPTH: u32 = 9;

pub mod config;
pub mod deed;
pub mod economy;
pub mod entity;
pub mod error;
pub mod facts;
pub mod field;
pub mod game;
pub mod registry;
pub mod view;

mod play;
mod reservoir;
mod state;
