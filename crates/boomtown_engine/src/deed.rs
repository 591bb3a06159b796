//! Deeds: the ownership and drilling record of each surveyed site.

use crate::entity::Entity;
use serde::Serialize;
use std::collections::BTreeMap;

/// Ownership record for a surveyed site. Deeds are never deleted, only sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deed {
    /// Owning player
    pub owner: Entity,
    /// Week the site was surveyed
    pub week: u32,
    /// Week the deed was sold, 0 while held
    pub stop: u32,
    /// Depth reached by the drill bit, 0..=9
    pub bit: u32,
    /// Cumulative barrels produced
    pub output: i64,
    /// Cumulative profit and loss in cents
    pub pnl: i64,
}

impl Deed {
    pub fn new(owner: Entity, week: u32) -> Self {
        Self {
            owner,
            week,
            stop: 0,
            bit: 0,
            output: 0,
            pnl: 0,
        }
    }

    pub fn is_sold(&self) -> bool {
        self.stop > 0
    }

    /// Whether the bit sits exactly on the oil at this site.
    pub fn struck(&self, oil: u32) -> bool {
        self.bit > 0 && self.bit == oil
    }
}

/// Why a sale was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleRejection {
    /// No deed exists for the site
    Unsurveyed,
    /// The deed belongs to someone else
    NotOwner(Entity),
    /// The deed was already sold in the given week
    AlreadySold(u32),
}

impl std::fmt::Display for SaleRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaleRejection::Unsurveyed => write!(f, "site has not been surveyed"),
            SaleRejection::NotOwner(owner) => write!(f, "deed belongs to player {owner}"),
            SaleRejection::AlreadySold(week) => write!(f, "already sold in week {week}"),
        }
    }
}

/// All deeds of a game keyed by site.
#[derive(Debug, Default, Clone)]
pub struct DeedTable {
    deeds: BTreeMap<usize, Deed>,
}

impl DeedTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the deed for a site. Returns false if the site already has one.
    pub fn survey(&mut self, site: usize, owner: Entity, week: u32) -> bool {
        if self.deeds.contains_key(&site) {
            return false;
        }
        self.deeds.insert(site, Deed::new(owner, week));
        true
    }

    /// Marks an owned, unsold deed as sold in `week`.
    pub fn sell(&mut self, site: usize, player: Entity, week: u32) -> Result<(), SaleRejection> {
        let deed = self.deeds.get_mut(&site).ok_or(SaleRejection::Unsurveyed)?;
        if deed.owner != player {
            return Err(SaleRejection::NotOwner(deed.owner));
        }
        if deed.is_sold() {
            return Err(SaleRejection::AlreadySold(deed.stop));
        }
        deed.stop = week;
        Ok(())
    }

    pub fn get(&self, site: usize) -> Option<&Deed> {
        self.deeds.get(&site)
    }

    pub fn get_mut(&mut self, site: usize) -> Option<&mut Deed> {
        self.deeds.get_mut(&site)
    }

    pub fn is_claimed(&self, site: usize) -> bool {
        self.deeds.contains_key(&site)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Deed)> {
        self.deeds.iter().map(|(&site, deed)| (site, deed))
    }

    /// Deeds held by one player, in site order
    pub fn owned_by(&self, player: Entity) -> impl Iterator<Item = (usize, &Deed)> {
        self.iter().filter(move |(_, deed)| deed.owner == player)
    }

    /// Summed profit and loss of a player's deeds
    pub fn pnl(&self, player: Entity) -> i64 {
        self.owned_by(player).map(|(_, deed)| deed.pnl).sum()
    }

    pub fn len(&self) -> usize {
        self.deeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deeds.is_empty()
    }
}
