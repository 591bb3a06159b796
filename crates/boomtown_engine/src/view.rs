//! Per-player views.
//!
//! Every answer the game gives a client is a [`View`]: a serializable snapshot
//! of exactly what that player may see in their current phase. The variant
//! name doubles as the wire tag, so a client can dispatch on `"name"` alone.

use crate::entity::Entity;
use crate::facts;
use crate::play::Phase;
use crate::state::GameState;
use crate::MAX_DEPTH;
use serde::{Deserialize, Serialize};

/// Snapshot returned by every game operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum View {
    Lobby(LobbyView),
    Survey(SurveyView),
    Report(ReportView),
    Drill(DrillView),
    Sell(SellView),
    Score(ScoreView),
}

impl View {
    /// Wire tag of this view
    pub fn name(&self) -> &'static str {
        match self {
            View::Lobby(_) => "lobby",
            View::Survey(_) => "survey",
            View::Report(_) => "report",
            View::Drill(_) => "drill",
            View::Sell(_) => "sell",
            View::Score(_) => "score",
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// A player's name and standing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: Entity,
    pub name: String,
    /// Summed profit and loss of every deed the player holds or sold
    pub pnl: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyView {
    pub owner: Entity,
    pub players: Vec<Standing>,
    pub weeks: u32,
    pub height: usize,
    pub width: usize,
}

/// A claimed site as everyone sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub site: usize,
    pub owner: Entity,
    pub sold: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyView {
    pub week: u32,
    pub weeks: u32,
    /// Cents per barrel this week
    pub price: i64,
    /// Player allowed to survey next
    pub turn: Entity,
    pub your_turn: bool,
    pub height: usize,
    pub width: usize,
    pub prob: Vec<u32>,
    pub cost: Vec<u32>,
    pub tax: Vec<u32>,
    /// Oil depths this player has struck, 0 everywhere else
    pub oil: Vec<u32>,
    pub claims: Vec<Claim>,
    pub fact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportView {
    pub site: usize,
    pub prob: u32,
    pub cost: u32,
    pub tax: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillView {
    pub site: usize,
    pub bit: u32,
    pub max_depth: u32,
    /// Depth in feet
    pub depth: u32,
    /// Cost of the next depth unit
    pub next_cost: i64,
    /// Spent on this well so far
    pub spent: i64,
    /// Oil depth once struck
    pub oil: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellView {
    pub site: usize,
    /// Week surveyed
    pub week: u32,
    pub sold: bool,
    pub bit: u32,
    /// Oil depth once struck
    pub oil: Option<u32>,
    pub tax: u32,
    pub output: i64,
    pub pnl: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellView {
    pub player: String,
    pub week: u32,
    pub price: i64,
    pub wells: Vec<WellView>,
    pub pnl: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    pub week: u32,
    pub weeks: u32,
    #[serde(rename = "final")]
    pub is_final: bool,
    pub players: Vec<Standing>,
    /// Players still playing the current week
    pub waiting: Vec<Entity>,
    pub prices: Vec<i64>,
}

// ============================================================================
// Rendering
// ============================================================================

/// Feet per depth unit
const FEET_PER_DEPTH: u32 = 100;

impl GameState {
    /// Renders the view a player in `phase` sees.
    pub(crate) fn render(&self, player: Entity, phase: Phase) -> View {
        match phase {
            Phase::Survey => View::Survey(self.survey_view(player)),
            Phase::Report { site } => View::Report(ReportView {
                site,
                prob: self.field.prob(site),
                cost: self.field.cost(site),
                tax: self.field.tax(site),
            }),
            Phase::Drill { site } => View::Drill(self.drill_view(site)),
            Phase::Sell => View::Sell(self.sell_view(player)),
            Phase::Done => self.score_view(false),
        }
    }

    pub(crate) fn standings(&self) -> Vec<Standing> {
        self.roster
            .players()
            .iter()
            .map(|&player| Standing {
                player,
                name: self.roster.name(player).unwrap_or_default().to_string(),
                pnl: self.deeds.pnl(player),
            })
            .collect()
    }

    pub(crate) fn lobby_view(&self) -> View {
        View::Lobby(LobbyView {
            owner: self.roster.owner(),
            players: self.standings(),
            weeks: self.config.weeks,
            height: self.field.height(),
            width: self.field.width(),
        })
    }

    pub(crate) fn score_view(&self, is_final: bool) -> View {
        let waiting = if is_final || self.week == 0 {
            Vec::new()
        } else {
            self.roster
                .players()
                .iter()
                .copied()
                .filter(|player| !self.finished.contains(player))
                .collect()
        };
        View::Score(ScoreView {
            week: self.week,
            weeks: self.config.weeks,
            is_final,
            players: self.standings(),
            waiting,
            prices: self.prices.clone(),
        })
    }

    fn survey_view(&self, player: Entity) -> SurveyView {
        let mut oil = vec![0; self.field.len()];
        for (site, deed) in self.deeds.owned_by(player) {
            if deed.struck(self.field.oil(site)) {
                oil[site] = self.field.oil(site);
            }
        }
        let claims = self
            .deeds
            .iter()
            .map(|(site, deed)| Claim {
                site,
                owner: deed.owner,
                sold: deed.is_sold(),
            })
            .collect();
        let turn = self.turn_holder();

        SurveyView {
            week: self.week,
            weeks: self.config.weeks,
            price: self.price,
            turn,
            your_turn: turn == player,
            height: self.field.height(),
            width: self.field.width(),
            prob: self.field.prob.clone(),
            cost: self.field.cost.clone(),
            tax: self.field.tax.clone(),
            oil,
            claims,
            fact: facts::pick(self.week, player.0).to_string(),
        }
    }

    fn drill_view(&self, site: usize) -> DrillView {
        let bit = self.deeds.get(site).map_or(0, |deed| deed.bit);
        let cost = i64::from(self.field.cost(site));
        let oil = self.field.oil(site);
        let struck = bit > 0 && bit == oil;
        DrillView {
            site,
            bit,
            max_depth: MAX_DEPTH,
            depth: bit * FEET_PER_DEPTH,
            next_cost: cost * i64::from(bit + 1),
            spent: cost * i64::from(bit * (bit + 1) / 2),
            oil: struck.then_some(oil),
        }
    }

    fn sell_view(&self, player: Entity) -> SellView {
        let wells = self
            .deeds
            .owned_by(player)
            .map(|(site, deed)| {
                let oil = self.field.oil(site);
                WellView {
                    site,
                    week: deed.week,
                    sold: deed.is_sold(),
                    bit: deed.bit,
                    oil: deed.struck(oil).then_some(oil),
                    tax: self.field.tax(site),
                    output: deed.output,
                    pnl: deed.pnl,
                }
            })
            .collect();

        SellView {
            player: self.roster.name(player).unwrap_or_default().to_string(),
            week: self.week,
            price: self.price,
            wells,
            pnl: self.deeds.pnl(player),
        }
    }
}
