//! Reservoir pressure, well output and weekly settlement.
//!
//! Oil and gas wells usually reach their maximum output shortly after
//! completion and decline from then on as pumping erodes reservoir pressure.
//! Every well in a reservoir shares that pressure, so a neighbour pumping the
//! same pool lowers your output too. Sold wells stop producing but the
//! pressure they drew down stays gone.

use crate::config::PriceSettings;
use crate::deed::DeedTable;
use crate::entity::Entity;
use crate::field::Field;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// Fraction of a site's pressure a well leaves behind per week pumped
pub const PRESSURE_RETENTION: f64 = 0.66;

/// Fraction of the remaining ramp-up still missing each week after drilling
pub const CAPACITY_RAMP: f64 = 0.5;

/// Barrels per reservoir site per week at full pressure and capacity
pub const SITE_CAPACITY: f64 = 100.0;

/// Cumulative pressure a single well has drawn down after `weeks_active`.
pub fn well_decay(weeks_active: u32) -> f64 {
    1.0 - PRESSURE_RETENTION.powi(weeks_active as i32)
}

/// Remaining reservoir pressure in `[0, 1]` at `week`.
///
/// # Panics
///
/// Panics on an empty reservoir; dry sites never reach settlement.
pub fn pressure(field: &Field, deeds: &DeedTable, reservoir: &BTreeSet<usize>, week: u32) -> f64 {
    assert!(!reservoir.is_empty(), "pressure of an empty reservoir");

    let size = reservoir.len() as f64;
    let mut total = size;
    for &site in reservoir {
        let Some(deed) = deeds.get(site) else {
            continue;
        };
        if !deed.struck(field.oil(site)) {
            continue;
        }
        let end = if deed.is_sold() { deed.stop } else { week };
        total -= well_decay(end.saturating_sub(deed.week));
    }

    (total / size).clamp(0.0, 1.0)
}

/// Output capacity per site of a well started in `start`, at `week`.
pub fn capacity(start: u32, week: u32) -> f64 {
    SITE_CAPACITY * (1.0 - CAPACITY_RAMP.powi(week.saturating_sub(start) as i32))
}

/// Barrels produced in one week.
pub fn weekly_output(pressure: f64, capacity: f64, reservoir_size: usize) -> i64 {
    (pressure * capacity * reservoir_size as f64).floor() as i64
}

/// Revenue in cents for `output` barrels at `price` cents.
pub fn gross_revenue(output: i64, price: i64) -> i64 {
    output * price / 100
}

/// Draws a weekly price from a log-normal distribution around the base.
pub fn draw_price<R: Rng + ?Sized>(rng: &mut R, settings: &PriceSettings) -> i64 {
    // Box-Muller transform
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();

    let price = settings.base_cents as f64 * (settings.volatility * z).exp();
    (price.round() as i64).max(1)
}

/// One well's result for one settlement week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settlement {
    pub site: usize,
    pub owner: Entity,
    pub pressure: f64,
    pub output: i64,
    pub gross: i64,
    pub tax: i64,
}

/// Settles every producing well for `week` at `price`.
///
/// Wells sold in `week` are still settled for it; wells sold earlier are not.
pub fn settle(field: &Field, deeds: &mut DeedTable, week: u32, price: i64) -> Vec<Settlement> {
    let table: &DeedTable = deeds;
    let producing: Vec<usize> = table
        .iter()
        .filter(|(site, deed)| {
            deed.struck(field.oil(*site)) && (!deed.is_sold() || deed.stop >= week)
        })
        .map(|(site, _)| site)
        .collect();

    // Pressure depends only on start and stop weeks, so compute it for
    // every well before any deed is updated.
    let settlements: Vec<Settlement> = producing
        .into_iter()
        .filter_map(|site| {
            let deed = table.get(site)?;
            let reservoir = field.reservoir(site);
            let pressure = pressure(field, table, &reservoir, week);
            let output = weekly_output(pressure, capacity(deed.week, week), reservoir.len());
            Some(Settlement {
                site,
                owner: deed.owner,
                pressure,
                output,
                gross: gross_revenue(output, price),
                tax: i64::from(field.tax(site)),
            })
        })
        .collect();

    for s in &settlements {
        if let Some(deed) = deeds.get_mut(s.site) {
            deed.output += s.output;
            deed.pnl += s.gross - s.tax;
        }
        debug!(
            "💰 Week {} site {}: pressure {:.3}, {} bbl, gross {}, tax {}",
            week, s.site, s.pressure, s.output, s.gross, s.tax
        );
    }

    settlements
}
