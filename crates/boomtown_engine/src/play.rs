//! Per-player weekly turn sequence.
//!
//! Each week every player walks Survey → Report → Drill → Sell → Done. The
//! transition table lives on [`GameState`] so it only ever runs inside the
//! coordinator; the [`PlayerTurnMachine`] task just holds the player's phase
//! and forwards moves, one at a time, in arrival order.

use crate::entity::Entity;
use crate::error::{GameError, GameResult};
use crate::state::GameState;
use crate::view::View;
use crate::MAX_DEPTH;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Where a player is within the current week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Survey,
    Report { site: usize },
    Drill { site: usize },
    Sell,
    Done,
}

/// A player's turn action.
///
/// The meaning of `site` and `done` depends on the phase: a survey or sale
/// target, a "no thanks" after a report, or the end of drilling or selling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub player: Entity,
    #[serde(default)]
    pub site: Option<usize>,
    #[serde(default)]
    pub done: bool,
}

impl Move {
    /// Survey or sell a site
    pub fn site(player: Entity, site: usize) -> Self {
        Self {
            player,
            site: Some(site),
            done: false,
        }
    }

    /// Keep going: accept a report or drill one level deeper
    pub fn step(player: Entity) -> Self {
        Self {
            player,
            site: None,
            done: false,
        }
    }

    pub fn done(player: Entity) -> Self {
        Self {
            player,
            site: None,
            done: true,
        }
    }
}

/// Result of applying one move
#[derive(Debug, Clone)]
pub(crate) struct Transition {
    pub(crate) next: Phase,
    pub(crate) view: View,
}

// ============================================================================
// Transition table
// ============================================================================

impl GameState {
    /// Applies `mv` to a player in `phase`.
    ///
    /// Invalid moves leave the state untouched and re-prompt the same phase.
    pub(crate) fn step(&mut self, player: Entity, phase: Phase, mv: &Move) -> Transition {
        let next = match phase {
            Phase::Survey => self.survey(player, mv),
            Phase::Report { site } => {
                if mv.done {
                    info!("📋 Player {} passed on site {}", player, site);
                    Phase::Sell
                } else {
                    Phase::Drill { site }
                }
            }
            Phase::Drill { site } => self.drill(player, site, mv),
            Phase::Sell => self.sell(player, mv),
            Phase::Done => {
                warn!("Player {} is done for week {}; ignoring move", player, self.week);
                Phase::Done
            }
        };

        if next == Phase::Done {
            self.finished.insert(player);
        }
        Transition {
            next,
            view: self.render(player, next),
        }
    }

    fn survey(&mut self, player: Entity, mv: &Move) -> Phase {
        let holder = self.turn_holder();
        if player != holder {
            warn!("Player {} tried to survey out of turn; waiting on player {}", player, holder);
            return Phase::Survey;
        }

        if mv.done {
            info!("⏭️ Player {} passed their survey in week {}", player, self.week);
            self.advance_turn();
            return Phase::Sell;
        }

        let Some(site) = mv.site else {
            warn!("Player {} sent a survey without a site", player);
            return Phase::Survey;
        };
        if !self.field.contains(site) {
            warn!("Player {} surveyed site {} outside the field", player, site);
            return Phase::Survey;
        }
        if !self.deeds.survey(site, player, self.week) {
            warn!("Player {} surveyed site {} which is already claimed", player, site);
            return Phase::Survey;
        }

        info!("🗺️ Player {} surveyed site {} in week {}", player, site, self.week);
        self.advance_turn();
        if self.config.report_phase {
            Phase::Report { site }
        } else {
            Phase::Drill { site }
        }
    }

    fn drill(&mut self, player: Entity, site: usize, mv: &Move) -> Phase {
        if mv.done {
            return Phase::Sell;
        }

        let oil = self.field.oil(site);
        let cost = i64::from(self.field.cost(site));
        let deed = self
            .deeds
            .get_mut(site)
            .unwrap_or_else(|| panic!("player {player} drilling site {site} without a deed"));

        if deed.bit >= MAX_DEPTH {
            return Phase::Sell;
        }
        deed.bit += 1;
        deed.pnl -= cost * i64::from(deed.bit);
        debug!("Player {} drilled site {} to depth {}", player, site, deed.bit);

        if deed.struck(oil) {
            info!("🛢️ Player {} struck oil at site {} depth {}", player, site, oil);
            Phase::Sell
        } else if deed.bit == MAX_DEPTH {
            info!("🕳️ Player {} drilled a dry hole at site {}", player, site);
            Phase::Sell
        } else {
            Phase::Drill { site }
        }
    }

    fn sell(&mut self, player: Entity, mv: &Move) -> Phase {
        if mv.done {
            debug!("Player {} finished week {}", player, self.week);
            return Phase::Done;
        }

        let Some(site) = mv.site else {
            warn!("Player {} sent a sale without a site", player);
            return Phase::Sell;
        };
        match self.deeds.sell(site, player, self.week) {
            Ok(()) => info!("💵 Player {} sold site {} in week {}", player, site, self.week),
            Err(reason) => warn!("Player {} cannot sell site {}: {}", player, site, reason),
        }
        Phase::Sell
    }
}

// ============================================================================
// Turn machine task
// ============================================================================

/// Requests routed by the coordinator to a player's machine
pub(crate) enum Turn {
    Move {
        mv: Move,
        reply: oneshot::Sender<GameResult<View>>,
    },
    Peek {
        reply: oneshot::Sender<GameResult<View>>,
    },
}

/// Requests a machine sends back to the coordinator
pub(crate) enum Ledger {
    Step {
        player: Entity,
        phase: Phase,
        mv: Move,
        reply: oneshot::Sender<Transition>,
    },
    Render {
        player: Entity,
        phase: Phase,
        reply: oneshot::Sender<GameResult<View>>,
    },
}

/// One player's week, run as its own task.
pub(crate) struct PlayerTurnMachine {
    player: Entity,
    phase: Phase,
    turns: mpsc::UnboundedReceiver<Turn>,
    ledger: mpsc::UnboundedSender<Ledger>,
}

impl PlayerTurnMachine {
    pub(crate) fn new(
        player: Entity,
        turns: mpsc::UnboundedReceiver<Turn>,
        ledger: mpsc::UnboundedSender<Ledger>,
    ) -> Self {
        Self {
            player,
            phase: Phase::Survey,
            turns,
            ledger,
        }
    }

    /// Runs until the player is done for the week or the coordinator goes
    /// away. Returns the final phase.
    pub(crate) async fn run(mut self) -> Phase {
        while self.phase != Phase::Done {
            let Some(turn) = self.turns.recv().await else {
                debug!("Move channel for player {} closed", self.player);
                break;
            };
            match turn {
                Turn::Peek { reply } => self.render(reply),
                Turn::Move { mv, reply } => match self.apply(mv).await {
                    Ok(view) => {
                        let _ = reply.send(Ok(view));
                    }
                    Err(err) => {
                        let _ = reply.send(Err(err));
                        break;
                    }
                },
            }
        }

        // Anything queued behind the final move still gets an answer.
        self.turns.close();
        while let Ok(turn) = self.turns.try_recv() {
            let (Turn::Move { reply, .. } | Turn::Peek { reply }) = turn;
            self.render(reply);
        }
        self.phase
    }

    async fn apply(&mut self, mv: Move) -> GameResult<View> {
        let (reply, transition) = oneshot::channel();
        self.ledger.send(Ledger::Step {
            player: self.player,
            phase: self.phase,
            mv,
            reply,
        })?;
        let transition = transition.await?;
        if transition.next != self.phase {
            debug!("Player {} {:?} -> {:?}", self.player, self.phase, transition.next);
        }
        self.phase = transition.next;
        Ok(transition.view)
    }

    fn render(&self, reply: oneshot::Sender<GameResult<View>>) {
        let request = Ledger::Render {
            player: self.player,
            phase: self.phase,
            reply,
        };
        if let Err(err) = self.ledger.send(request) {
            if let Ledger::Render { reply, .. } = err.0 {
                let _ = reply.send(Err(GameError::Closed));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::field::Field;

    fn state(report_phase: bool) -> (GameState, Entity, Entity) {
        let field = Field::from_grids(
            3,
            3,
            vec![50; 9],
            vec![10; 9],
            vec![1, 1, 1, 2, 1, 2, 3, 3, 0],
            vec![100; 9],
        )
        .unwrap();
        let config = GameConfig {
            height: 3,
            width: 3,
            report_phase,
            ..GameConfig::default()
        };
        let mut state = GameState::new(config, field, 1);
        let a = state.join("alice").unwrap();
        let b = state.join("bruno").unwrap();
        state.begin_week();
        (state, a, b)
    }

    #[test]
    fn test_survey_in_turn_order() {
        let (mut state, a, b) = state(true);

        let t = state.step(b, Phase::Survey, &Move::site(b, 4));
        assert_eq!(t.next, Phase::Survey);
        assert!(!state.deeds.is_claimed(4));
        assert_eq!(state.turn_holder(), a);

        let t = state.step(a, Phase::Survey, &Move::site(a, 4));
        assert_eq!(t.next, Phase::Report { site: 4 });
        assert_eq!(t.view.name(), "report");
        assert_eq!(state.turn_holder(), b);

        // Occupied and off-field sites are re-prompted without using the turn.
        assert_eq!(state.step(b, Phase::Survey, &Move::site(b, 4)).next, Phase::Survey);
        assert_eq!(state.step(b, Phase::Survey, &Move::site(b, 9)).next, Phase::Survey);
        assert_eq!(state.step(b, Phase::Survey, &Move::step(b)).next, Phase::Survey);
        assert_eq!(state.turn_holder(), b);
        assert_eq!(state.deeds.get(4).unwrap().owner, a);
    }

    #[test]
    fn test_survey_pass_moves_to_sell() {
        let (mut state, a, b) = state(true);
        let t = state.step(a, Phase::Survey, &Move::done(a));
        assert_eq!(t.next, Phase::Sell);
        assert_eq!(state.turn_holder(), b);
        assert!(state.deeds.is_empty());
    }

    #[test]
    fn test_report_answers() {
        let (mut state, a, _) = state(true);
        state.step(a, Phase::Survey, &Move::site(a, 0));
        assert_eq!(
            state.step(a, Phase::Report { site: 0 }, &Move::step(a)).next,
            Phase::Drill { site: 0 }
        );
        assert_eq!(state.step(a, Phase::Report { site: 0 }, &Move::done(a)).next, Phase::Sell);
    }

    #[test]
    fn test_skip_report_phase() {
        let (mut state, a, _) = state(false);
        let t = state.step(a, Phase::Survey, &Move::site(a, 0));
        assert_eq!(t.next, Phase::Drill { site: 0 });
        assert_eq!(t.view.name(), "drill");
    }

    #[test]
    fn test_drill_until_strike() {
        let (mut state, a, _) = state(false);
        state.step(a, Phase::Survey, &Move::site(a, 6));

        let phase = Phase::Drill { site: 6 };
        assert_eq!(state.step(a, phase, &Move::step(a)).next, phase);
        assert_eq!(state.step(a, phase, &Move::step(a)).next, phase);
        let t = state.step(a, phase, &Move::step(a));
        assert_eq!(t.next, Phase::Sell);

        let deed = state.deeds.get(6).unwrap();
        assert_eq!(deed.bit, 3);
        assert_eq!(deed.pnl, -(10 + 20 + 30));
        assert!(deed.struck(3));
    }

    #[test]
    fn test_dry_hole_stops_at_max_depth() {
        let (mut state, a, _) = state(false);
        state.step(a, Phase::Survey, &Move::site(a, 8));

        let phase = Phase::Drill { site: 8 };
        for _ in 1..MAX_DEPTH {
            assert_eq!(state.step(a, phase, &Move::step(a)).next, phase);
        }
        assert_eq!(state.step(a, phase, &Move::step(a)).next, Phase::Sell);

        let deed = state.deeds.get(8).unwrap();
        assert_eq!(deed.bit, MAX_DEPTH);
        assert_eq!(deed.pnl, -10 * 45);
    }

    #[test]
    fn test_drill_done_stops_early() {
        let (mut state, a, _) = state(false);
        state.step(a, Phase::Survey, &Move::site(a, 6));
        state.step(a, Phase::Drill { site: 6 }, &Move::step(a));
        assert_eq!(state.step(a, Phase::Drill { site: 6 }, &Move::done(a)).next, Phase::Sell);
        assert_eq!(state.deeds.get(6).unwrap().bit, 1);
    }

    #[test]
    fn test_sell_rules() {
        let (mut state, a, b) = state(false);
        state.step(a, Phase::Survey, &Move::site(a, 0));

        assert_eq!(state.step(b, Phase::Sell, &Move::site(b, 0)).next, Phase::Sell);
        assert!(!state.deeds.get(0).unwrap().is_sold());

        assert_eq!(state.step(a, Phase::Sell, &Move::site(a, 0)).next, Phase::Sell);
        assert_eq!(state.deeds.get(0).unwrap().stop, 1);

        let t = state.step(a, Phase::Sell, &Move::done(a));
        assert_eq!(t.next, Phase::Done);
        assert_eq!(t.view.name(), "score");
        assert!(state.finished.contains(&a));
        assert!(!state.finished.contains(&b));
    }

    /// Serves ledger requests against a local state, standing in for the
    /// coordinator.
    async fn serve(mut state: GameState, mut ledger: mpsc::UnboundedReceiver<Ledger>) -> GameState {
        while let Some(request) = ledger.recv().await {
            match request {
                Ledger::Step {
                    player,
                    phase,
                    mv,
                    reply,
                } => {
                    let _ = reply.send(state.step(player, phase, &mv));
                }
                Ledger::Render { player, phase, reply } => {
                    let _ = reply.send(Ok(state.render(player, phase)));
                }
            }
        }
        state
    }

    async fn send(turns: &mpsc::UnboundedSender<Turn>, mv: Move) -> View {
        let (reply, rx) = oneshot::channel();
        turns.send(Turn::Move { mv, reply }).unwrap();
        rx.await.unwrap().unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_machine_walks_a_week() {
        let (state, a, _) = state(true);
        let (ledger_tx, ledger_rx) = mpsc::unbounded_channel();
        let (turns_tx, turns_rx) = mpsc::unbounded_channel();

        let machine = tokio::spawn(PlayerTurnMachine::new(a, turns_rx, ledger_tx).run());
        let server = tokio::spawn(serve(state, ledger_rx));

        let (reply, rx) = oneshot::channel();
        turns_tx.send(Turn::Peek { reply }).unwrap();
        assert_eq!(rx.await.unwrap().unwrap().name(), "survey");

        assert_eq!(send(&turns_tx, Move::site(a, 3)).await.name(), "report");
        assert_eq!(send(&turns_tx, Move::step(a)).await.name(), "drill");
        assert_eq!(send(&turns_tx, Move::step(a)).await.name(), "drill");
        assert_eq!(send(&turns_tx, Move::step(a)).await.name(), "sell");
        assert_eq!(send(&turns_tx, Move::done(a)).await.name(), "score");

        assert_eq!(machine.await.unwrap(), Phase::Done);
        drop(turns_tx);
        let state = server.await.unwrap();
        assert!(state.deeds.get(3).unwrap().struck(2));
        assert!(state.finished.contains(&a));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_machine_reports_closed_coordinator() {
        let (ledger_tx, ledger_rx) = mpsc::unbounded_channel();
        let (turns_tx, turns_rx) = mpsc::unbounded_channel();
        drop(ledger_rx);

        let machine = tokio::spawn(PlayerTurnMachine::new(Entity(1), turns_rx, ledger_tx).run());
        let (reply, rx) = oneshot::channel();
        turns_tx
            .send(Turn::Move {
                mv: Move::step(Entity(1)),
                reply,
            })
            .unwrap();
        assert_eq!(rx.await.unwrap(), Err(GameError::Closed));
        assert_eq!(machine.await.unwrap(), Phase::Survey);
    }
}
