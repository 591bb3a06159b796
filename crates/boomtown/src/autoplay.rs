//! Automated wildcatters.
//!
//! Each bot is a task that polls its own view and answers it with a move,
//! exactly like a remote client would. Bots survey promising cheap sites,
//! drill until they strike or give up, and sell wells once their reservoir
//! has been pumped for a while.

use boomtown_engine::view::{SellView, SurveyView};
use boomtown_engine::{Entity, GameHandle, GameResult, Move, View};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::Duration;
use tracing::{debug, info};

/// Survey odds below which a bot walks away from a report
const MIN_ODDS: u32 = 25;

/// Weeks a well pumps before its owner sells it
const HOLD_WEEKS: u32 = 4;

/// Candidate sites a bot chooses between when surveying
const SHORTLIST: usize = 5;

pub struct Bot {
    game: GameHandle,
    player: Entity,
    name: String,
    poll: Duration,
    rng: StdRng,
}

impl Bot {
    pub fn new(game: GameHandle, player: Entity, name: String, poll: Duration, seed: u64) -> Self {
        Self {
            game,
            player,
            name,
            poll,
            rng: StdRng::seed_from_u64(seed ^ u64::from(player.0)),
        }
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    /// Plays until the final scoreboard.
    pub async fn play(mut self) -> GameResult<()> {
        loop {
            let view = self.game.view(self.player).await?;
            let mv = match &view {
                View::Survey(survey) if survey.your_turn => self.survey(survey),
                View::Report(report) if report.prob < MIN_ODDS => {
                    debug!("{} passes on site {} at {}% odds", self.name, report.site, report.prob);
                    Move::done(self.player)
                }
                View::Report(_) | View::Drill(_) => Move::step(self.player),
                View::Sell(sell) => self.sell(sell),
                View::Score(score) if score.is_final => {
                    info!("🏁 {} is done", self.name);
                    return Ok(());
                }
                // Lobby, someone else's survey turn, or waiting on the week.
                View::Lobby(_) | View::Survey(_) | View::Score(_) => {
                    tokio::time::sleep(self.poll).await;
                    continue;
                }
            };
            self.game.submit(mv).await?;
        }
    }

    fn survey(&mut self, survey: &SurveyView) -> Move {
        let claimed: std::collections::HashSet<usize> = survey.claims.iter().map(|c| c.site).collect();
        let mut open: Vec<usize> = (0..survey.prob.len()).filter(|s| !claimed.contains(s)).collect();
        if open.is_empty() {
            return Move::done(self.player);
        }

        // Best odds per unit of drilling cost.
        open.sort_by_key(|&s| std::cmp::Reverse(survey.prob[s] * 100 / survey.cost[s].max(1)));
        open.truncate(SHORTLIST);
        match open.choose(&mut self.rng) {
            Some(&site) => {
                debug!("{} surveys site {}", self.name, site);
                Move::site(self.player, site)
            }
            None => Move::done(self.player),
        }
    }

    fn sell(&self, sell: &SellView) -> Move {
        let due = sell
            .wells
            .iter()
            .find(|w| !w.sold && w.oil.is_some() && w.week + HOLD_WEEKS <= sell.week);
        match due {
            Some(well) => Move::site(self.player, well.site),
            None => Move::done(self.player),
        }
    }
}
