//! Procedural oil field generation.
//!
//! A [`Field`] is four parallel integer grids indexed by `site = y * width + x`:
//! survey odds, drilling cost, oil depth and weekly tax. Each grid is grown
//! from a handful of random peaks with a logarithmic falloff, so values are
//! steep near a peak and flat far from it. Later peaks are progressively
//! weaker, and a layer of uniform noise keeps everyone guessing.
//!
//! Generation is reproducible: the same seed (or the same peaks and RNG
//! state) always yields the same field.

use crate::config::{AttributeSpec, FieldParams};
use crate::error::{GameError, GameResult};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt::Write as _;
use tracing::debug;

/// Immutable per-game terrain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub(crate) height: usize,
    pub(crate) width: usize,
    pub(crate) prob: Vec<u32>,
    pub(crate) cost: Vec<u32>,
    pub(crate) oil: Vec<u32>,
    pub(crate) tax: Vec<u32>,
}

impl Field {
    /// Generates a field with the default attribute parameters.
    pub fn generate(height: usize, width: usize, seed: u64) -> Field {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::generate_with(&FieldParams::default(), height, width, &mut rng)
    }

    /// Generates a field from explicit parameters and RNG.
    pub fn generate_with<R: Rng + ?Sized>(
        params: &FieldParams,
        height: usize,
        width: usize,
        rng: &mut R,
    ) -> Field {
        let prob = fill(&params.prob, height, width, rng);
        let cost = fill(&params.cost, height, width, rng);
        let mut oil = fill(&params.oil, height, width, rng);
        let tax = fill(&params.tax, height, width, rng);

        // Oil has to be earned by the probability field.
        for (site, depth) in oil.iter_mut().enumerate() {
            let roll = rng.gen_range(0..100u32);
            if roll > prob[site] {
                *depth = 0;
            }
        }

        let wet = oil.iter().filter(|&&d| d > 0).count();
        debug!("🛢️ Generated {}x{} field with {} wet sites", height, width, wet);

        Field {
            height,
            width,
            prob,
            cost,
            oil,
            tax,
        }
    }

    /// Builds a field from explicit grids.
    pub fn from_grids(
        height: usize,
        width: usize,
        prob: Vec<u32>,
        cost: Vec<u32>,
        oil: Vec<u32>,
        tax: Vec<u32>,
    ) -> GameResult<Field> {
        let len = height * width;
        if len == 0 {
            return Err(GameError::InvalidField("field has no sites".to_string()));
        }
        for (name, grid) in [("prob", &prob), ("cost", &cost), ("oil", &oil), ("tax", &tax)] {
            if grid.len() != len {
                return Err(GameError::InvalidField(format!(
                    "{name} grid has {} sites, expected {len}",
                    grid.len()
                )));
            }
        }
        if let Some(depth) = oil.iter().find(|&&d| d > crate::MAX_DEPTH) {
            return Err(GameError::InvalidField(format!(
                "oil depth {depth} exceeds {}",
                crate::MAX_DEPTH
            )));
        }

        Ok(Field {
            height,
            width,
            prob,
            cost,
            oil,
            tax,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of sites
    pub fn len(&self) -> usize {
        self.height * self.width
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, site: usize) -> bool {
        site < self.len()
    }

    pub fn prob(&self, site: usize) -> u32 {
        self.prob[site]
    }

    pub fn cost(&self, site: usize) -> u32 {
        self.cost[site]
    }

    /// True oil depth at a site, 0 for a dry site
    pub fn oil(&self, site: usize) -> u32 {
        self.oil[site]
    }

    pub fn tax(&self, site: usize) -> u32 {
        self.tax[site]
    }

    /// Survey odds as an ANSI coloured block map, for debug logging.
    pub fn render_ansi(&self) -> String {
        let mut buf = String::with_capacity(self.len() * 12);
        for (site, &p) in self.prob.iter().enumerate() {
            if site % self.width == 0 {
                buf.push('\n');
            }
            let colour = match p {
                p if p > 90 => "31",
                p if p > 80 => "32",
                p if p > 60 => "34",
                p if p > 20 => "36",
                _ => "28",
            };
            let _ = write!(buf, "\x1b[1;{colour}m█\x1b[0m");
        }
        buf
    }
}

// ============================================================================
// Grid filling
// ============================================================================

/// Scatters a random number of peaks and grows a grid from them.
pub fn fill<R: Rng + ?Sized>(attr: &AttributeSpec, height: usize, width: usize, rng: &mut R) -> Vec<u32> {
    let n = rng.gen_range(attr.peaks_min..=attr.peaks_max);
    let peaks: Vec<usize> = (0..n).map(|_| rng.gen_range(0..height * width)).collect();
    fill_from_peaks(&peaks, attr, height, width, rng)
}

/// Grows a grid from fixed peak sites. The RNG only drives the fuzz.
pub fn fill_from_peaks<R: Rng + ?Sized>(
    peaks: &[usize],
    attr: &AttributeSpec,
    height: usize,
    width: usize,
    rng: &mut R,
) -> Vec<u32> {
    assert!(!peaks.is_empty(), "a grid needs at least one peak");

    let span = (height + width) as f64;
    let range = f64::from(attr.max - attr.min);

    (0..height * width)
        .map(|site| {
            let (rank, distance) = closest(site, peaks, width);

            let mut v = falloff(distance as f64 / span);

            // Subsequent peaks are progressively lower.
            v *= (1.0 - attr.decay).powi(rank as i32);

            v += (2.0 * rng.gen::<f64>() - 1.0) * attr.fuzz;
            v = v.clamp(0.0, 1.0);

            let value = (f64::from(attr.min) + range * v).floor() as u32;
            if attr.inverse {
                attr.min + attr.max - value
            } else {
                value
            }
        })
        .collect()
}

/// Rank and Manhattan distance of the nearest peak. Ties go to the lower rank.
fn closest(site: usize, peaks: &[usize], width: usize) -> (usize, usize) {
    let (y, x) = (site / width, site % width);
    let mut best = (0, usize::MAX);
    for (rank, &peak) in peaks.iter().enumerate() {
        let d = y.abs_diff(peak / width) + x.abs_diff(peak % width);
        if d < best.1 {
            best = (rank, d);
        }
    }
    best
}

/// Logarithmic falloff over a distance ratio, roughly in [0, 1]. A peak site
/// is unbounded, so it clamps to the maximum whatever its rank or fuzz.
fn falloff(ratio: f64) -> f64 {
    if ratio <= 0.0 {
        return f64::INFINITY;
    }
    1.0 - ((2.0 * ratio).ln() + 4.0) / 4.0
}
