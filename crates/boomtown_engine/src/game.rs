//! Game coordinator and the client handle.
//!
//! Every game runs as one coordinator task that exclusively owns its
//! [`GameState`]. Clients talk to it through a cloneable [`GameHandle`]; each
//! call is a command on an unbounded channel answered over a oneshot.
//!
//! The coordinator moves through three stages:
//!
//! * **Lobby** - players join; the owner's `done` move starts week 1
//! * **Week** - one [`PlayerTurnMachine`] per player; the week closes once
//!   every machine is done, wells are settled and the next week begins
//! * **Terminal** - after the last week every request gets the final score

use crate::config::GameConfig;
use crate::entity::Entity;
use crate::error::{GameError, GameResult};
use crate::field::Field;
use crate::play::{Ledger, Move, Phase, PlayerTurnMachine, Turn};
use crate::state::GameState;
use crate::view::View;
use futures::future::join_all;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Unique identifier for a running game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub Uuid);

impl GameId {
    /// Creates a new random game ID using UUID v4.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Requests sent by handles to the coordinator
enum Command {
    Join {
        name: String,
        reply: oneshot::Sender<GameResult<Entity>>,
    },
    Leave {
        player: Entity,
        reply: oneshot::Sender<GameResult<()>>,
    },
    Move {
        mv: Move,
        reply: oneshot::Sender<GameResult<View>>,
    },
    View {
        player: Entity,
        reply: oneshot::Sender<GameResult<View>>,
    },
    Status {
        reply: oneshot::Sender<View>,
    },
}

// ============================================================================
// Handle
// ============================================================================

/// Client-side access to one running game.
///
/// The coordinator keeps running until every clone of its handle is dropped.
#[derive(Debug, Clone)]
pub struct GameHandle {
    id: GameId,
    commands: mpsc::UnboundedSender<Command>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Join { name, .. } => write!(f, "Join({name})"),
            Command::Leave { player, .. } => write!(f, "Leave({player})"),
            Command::Move { mv, .. } => write!(f, "Move({mv:?})"),
            Command::View { player, .. } => write!(f, "View({player})"),
            Command::Status { .. } => write!(f, "Status"),
        }
    }
}

impl GameHandle {
    /// Generates a field from the config and starts a game in its lobby.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(config: GameConfig) -> GameResult<Self> {
        config.validate()?;
        let seed = match config.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random();
                info!("🎲 No seed configured, drew {}", seed);
                seed
            }
        };
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let field = Field::generate_with(&config.field, config.height, config.width, &mut rng);
        debug!("Survey odds:{}", field.render_ansi());
        Ok(Self::launch(config, field, seed))
    }

    /// Starts a game on a prepared field. The field's dimensions replace the
    /// configured ones.
    pub fn spawn_with_field(mut config: GameConfig, field: Field) -> GameResult<Self> {
        config.height = field.height();
        config.width = field.width();
        config.validate()?;
        let seed = config.seed.unwrap_or_default();
        Ok(Self::launch(config, field, seed))
    }

    fn launch(config: GameConfig, field: Field, seed: u64) -> Self {
        let id = GameId::new();
        let (commands, inbox) = mpsc::unbounded_channel();
        let coordinator = GameCoordinator {
            id,
            state: GameState::new(config, field, seed),
            pending_start: None,
        };
        tokio::spawn(coordinator.run(inbox));
        Self { id, commands }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    /// Adds a player to the lobby.
    pub async fn join(&self, name: impl Into<String>) -> GameResult<Entity> {
        let (reply, rx) = oneshot::channel();
        self.commands.send(Command::Join {
            name: name.into(),
            reply,
        })?;
        rx.await?
    }

    /// Removes a player from the lobby. Their identifier is not reused.
    pub async fn leave(&self, player: Entity) -> GameResult<()> {
        let (reply, rx) = oneshot::channel();
        self.commands.send(Command::Leave { player, reply })?;
        rx.await?
    }

    /// Submits a move and returns the view the player sees next.
    pub async fn submit(&self, mv: Move) -> GameResult<View> {
        let (reply, rx) = oneshot::channel();
        self.commands.send(Command::Move { mv, reply })?;
        rx.await?
    }

    /// The player's current view, without changing anything.
    pub async fn view(&self, player: Entity) -> GameResult<View> {
        let (reply, rx) = oneshot::channel();
        self.commands.send(Command::View { player, reply })?;
        rx.await?
    }

    /// The scoreboard.
    pub async fn status(&self) -> GameResult<View> {
        let (reply, rx) = oneshot::channel();
        self.commands.send(Command::Status { reply })?;
        Ok(rx.await?)
    }
}

// ============================================================================
// Coordinator
// ============================================================================

enum Stage {
    Lobby,
    Week,
    Terminal,
}

type Routes = HashMap<Entity, mpsc::UnboundedSender<Turn>>;

struct GameCoordinator {
    id: GameId,
    state: GameState,
    /// The owner's start move, answered once week 1 is running
    pending_start: Option<oneshot::Sender<GameResult<View>>>,
}

impl GameCoordinator {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        info!(
            "🚀 Game {} open: {}x{} field, {} weeks",
            self.id,
            self.state.field.height(),
            self.state.field.width(),
            self.state.config.weeks
        );

        let mut stage = Some(Stage::Lobby);
        while let Some(current) = stage {
            stage = match current {
                Stage::Lobby => self.lobby(&mut commands).await,
                Stage::Week => self.week(&mut commands).await,
                Stage::Terminal => self.terminal(&mut commands).await,
            };
        }

        info!("🛑 Game {} closed", self.id);
    }

    async fn lobby(&mut self, commands: &mut mpsc::UnboundedReceiver<Command>) -> Option<Stage> {
        while let Some(command) = commands.recv().await {
            match command {
                Command::Join { name, reply } => {
                    let _ = reply.send(self.state.join(&name));
                }
                Command::Leave { player, reply } => {
                    let _ = reply.send(self.state.leave(player));
                }
                Command::Move { mv, reply } => {
                    if !self.state.roster.contains(mv.player) {
                        let _ = reply.send(Err(GameError::UnknownPlayer(mv.player)));
                        continue;
                    }
                    let owner = self.state.roster.owner();
                    if mv.player != owner {
                        warn!("Game {} has not started; only player {} can start it", self.id, owner);
                        let _ = reply.send(Ok(self.state.lobby_view()));
                        continue;
                    }
                    if !mv.done {
                        warn!("Game {} has not started; waiting for the owner's done", self.id);
                        let _ = reply.send(Ok(self.state.lobby_view()));
                        continue;
                    }
                    info!(
                        "🏁 Player {} started game {} with {} players",
                        owner,
                        self.id,
                        self.state.roster.len()
                    );
                    self.pending_start = Some(reply);
                    return Some(Stage::Week);
                }
                Command::View { player, reply } => {
                    let view = if self.state.roster.contains(player) {
                        Ok(self.state.lobby_view())
                    } else {
                        Err(GameError::UnknownPlayer(player))
                    };
                    let _ = reply.send(view);
                }
                Command::Status { reply } => {
                    let _ = reply.send(self.state.lobby_view());
                }
            }
        }
        None
    }

    async fn week(&mut self, commands: &mut mpsc::UnboundedReceiver<Command>) -> Option<Stage> {
        self.state.begin_week();
        let week = self.state.week;
        info!(
            "📅 Week {}/{} of game {} begins at {} cents/bbl",
            week, self.state.config.weeks, self.id, self.state.price
        );

        let (ledger_tx, mut ledger_rx) = mpsc::unbounded_channel();
        let mut routes = Routes::new();
        let mut machines = Vec::with_capacity(self.state.roster.len());
        for &player in self.state.roster.players() {
            let (turns_tx, turns_rx) = mpsc::unbounded_channel();
            routes.insert(player, turns_tx);
            let machine = PlayerTurnMachine::new(player, turns_rx, ledger_tx.clone());
            machines.push(tokio::spawn(machine.run()));
        }
        drop(ledger_tx);

        if let Some(reply) = self.pending_start.take() {
            let owner = self.state.roster.owner();
            let _ = reply.send(Ok(self.state.render(owner, Phase::Survey)));
        }

        let players = routes.len();
        let mut open = true;
        while self.state.finished.len() < players {
            tokio::select! {
                request = ledger_rx.recv() => match request {
                    Some(request) => self.serve(request),
                    None => break,
                },
                command = commands.recv(), if open => match command {
                    Some(command) => self.route(command, &routes),
                    None => {
                        warn!("Every handle to game {} dropped during week {}", self.id, week);
                        open = false;
                        routes.clear();
                    }
                },
            }
        }

        // Barrier: the ledger closes once every machine has exited.
        drop(routes);
        while let Some(request) = ledger_rx.recv().await {
            self.serve(request);
        }
        for result in join_all(machines).await {
            if let Err(e) = result {
                error!("Player task in game {} failed: {}", self.id, e);
            }
        }

        let settlements = self.state.end_week();
        info!(
            "✅ Week {} of game {} complete: {} wells settled",
            week,
            self.id,
            settlements.len()
        );

        if !open {
            return None;
        }
        if self.state.is_over() {
            Some(Stage::Terminal)
        } else {
            Some(Stage::Week)
        }
    }

    async fn terminal(&mut self, commands: &mut mpsc::UnboundedReceiver<Command>) -> Option<Stage> {
        info!("🏆 Game {} over after {} weeks", self.id, self.state.week);
        for standing in self.state.standings() {
            info!("  {} ({}): {} cents", standing.name, standing.player, standing.pnl);
        }

        while let Some(command) = commands.recv().await {
            match command {
                Command::Join { reply, .. } => {
                    let _ = reply.send(Err(GameError::GameOver));
                }
                Command::Leave { reply, .. } => {
                    let _ = reply.send(Err(GameError::GameOver));
                }
                Command::Move {
                    mv: Move { player, .. },
                    reply,
                }
                | Command::View { player, reply } => {
                    let _ = reply.send(self.final_view(player));
                }
                Command::Status { reply } => {
                    let _ = reply.send(self.state.score_view(true));
                }
            }
        }
        None
    }

    fn final_view(&self, player: Entity) -> GameResult<View> {
        if self.state.roster.contains(player) {
            Ok(self.state.score_view(true))
        } else {
            Err(GameError::UnknownPlayer(player))
        }
    }

    /// Routes a client command while a week is running.
    fn route(&mut self, command: Command, routes: &Routes) {
        match command {
            Command::Join { reply, .. } => {
                let _ = reply.send(Err(GameError::AlreadyStarted));
            }
            Command::Leave { reply, .. } => {
                let _ = reply.send(Err(GameError::AlreadyStarted));
            }
            Command::Move { mv, reply } => {
                let Some(route) = routes.get(&mv.player) else {
                    let _ = reply.send(Err(GameError::UnknownPlayer(mv.player)));
                    return;
                };
                // A closed route means the player is already done this week.
                if let Err(err) = route.send(Turn::Move { mv, reply }) {
                    if let Turn::Move { mv, reply } = err.0 {
                        warn!("Player {} is done for week {}; ignoring move", mv.player, self.state.week);
                        let _ = reply.send(Ok(self.state.render(mv.player, Phase::Done)));
                    }
                }
            }
            Command::View { player, reply } => {
                let Some(route) = routes.get(&player) else {
                    let _ = reply.send(Err(GameError::UnknownPlayer(player)));
                    return;
                };
                if let Err(err) = route.send(Turn::Peek { reply }) {
                    if let Turn::Peek { reply } = err.0 {
                        let _ = reply.send(Ok(self.state.render(player, Phase::Done)));
                    }
                }
            }
            Command::Status { reply } => {
                let _ = reply.send(self.state.score_view(false));
            }
        }
    }

    /// Applies a request from a player's machine.
    fn serve(&mut self, request: Ledger) {
        match request {
            Ledger::Step {
                player,
                phase,
                mv,
                reply,
            } => {
                let _ = reply.send(self.state.step(player, phase, &mv));
            }
            Ledger::Render { player, phase, reply } => {
                let _ = reply.send(Ok(self.state.render(player, phase)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> GameConfig {
        GameConfig {
            height: 6,
            width: 10,
            weeks: 2,
            seed: Some(42),
            ..GameConfig::default()
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_lobby_join_and_leave() {
        let game = GameHandle::spawn(small_config()).unwrap();
        let a = game.join("alice").await.unwrap();
        let b = game.join("bruno").await.unwrap();
        assert_eq!(game.join("").await, Err(GameError::EmptyName));

        game.leave(b).await.unwrap();
        assert_eq!(game.leave(b).await, Err(GameError::UnknownPlayer(b)));
        let c = game.join("carla").await.unwrap();
        assert!(c > b);

        let View::Lobby(lobby) = game.status().await.unwrap() else {
            panic!("expected lobby view");
        };
        assert_eq!(lobby.owner, a);
        let names: Vec<&str> = lobby.players.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["alice", "carla"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_only_owner_starts() {
        let game = GameHandle::spawn(small_config()).unwrap();
        let a = game.join("alice").await.unwrap();
        let b = game.join("bruno").await.unwrap();

        let view = game.submit(Move::done(b)).await.unwrap();
        assert_eq!(view.name(), "lobby");
        let view = game.submit(Move::site(a, 3)).await.unwrap();
        assert_eq!(view.name(), "lobby");
        assert_eq!(
            game.submit(Move::done(Entity(99))).await,
            Err(GameError::UnknownPlayer(Entity(99)))
        );

        let View::Survey(survey) = game.submit(Move::done(a)).await.unwrap() else {
            panic!("expected survey view");
        };
        assert_eq!(survey.week, 1);
        assert!(survey.your_turn);
        assert_eq!(game.join("late").await, Err(GameError::AlreadyStarted));
        assert_eq!(game.leave(b).await, Err(GameError::AlreadyStarted));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_view_does_not_advance() {
        let game = GameHandle::spawn(small_config()).unwrap();
        let a = game.join("alice").await.unwrap();
        game.submit(Move::done(a)).await.unwrap();

        let first = game.view(a).await.unwrap();
        let second = game.view(a).await.unwrap();
        assert_eq!(first.name(), "survey");
        assert_eq!(first, second);
        assert_eq!(
            game.view(Entity(7)).await,
            Err(GameError::UnknownPlayer(Entity(7)))
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_solo_game_runs_to_terminal() {
        let game = GameHandle::spawn(small_config()).unwrap();
        let a = game.join("alice").await.unwrap();
        game.submit(Move::done(a)).await.unwrap();

        for week in 1..=2 {
            let View::Survey(survey) = game.view(a).await.unwrap() else {
                panic!("expected survey view in week {week}");
            };
            assert_eq!(survey.week, week);
            assert_eq!(game.submit(Move::done(a)).await.unwrap().name(), "sell");
            game.submit(Move::done(a)).await.unwrap();
        }

        let View::Score(score) = game.status().await.unwrap() else {
            panic!("expected score view");
        };
        assert!(score.is_final);
        assert_eq!(score.week, 2);
        assert_eq!(score.prices.len(), 2);
        assert_eq!(game.join("late").await, Err(GameError::GameOver));
        assert_eq!(game.submit(Move::step(a)).await.unwrap(), game.status().await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_invalid_config_rejected() {
        let config = GameConfig {
            weeks: 0,
            ..small_config()
        };
        assert!(matches!(
            GameHandle::spawn(config),
            Err(GameError::InvalidConfig(_))
        ));
    }
}
