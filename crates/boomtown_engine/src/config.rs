//! Game configuration types and defaults.
//!
//! A [`GameConfig`] fixes everything that is decided once per game: the field
//! dimensions, the number of weekly rounds, the seed, the price model and the
//! shape of each generated attribute grid.

use crate::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};

fn default_height() -> usize {
    24
}

fn default_width() -> usize {
    80
}

/// Default number of weekly rounds
fn default_weeks() -> u32 {
    13
}

fn default_report_phase() -> bool {
    true
}

/// Configuration for a single game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Field height in sites
    #[serde(default = "default_height")]
    pub height: usize,
    /// Field width in sites
    #[serde(default = "default_width")]
    pub width: usize,
    /// Number of weekly rounds before the game ends
    #[serde(default = "default_weeks")]
    pub weeks: u32,
    /// Seed for field generation and price draws (None draws one)
    #[serde(default)]
    pub seed: Option<u64>,
    /// Whether players see a surveyor's report before deciding to drill
    #[serde(default = "default_report_phase")]
    pub report_phase: bool,
    /// Oil price model
    #[serde(default)]
    pub price: PriceSettings,
    /// Attribute grid generation parameters
    #[serde(default)]
    pub field: FieldParams,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height: default_height(),
            width: default_width(),
            weeks: default_weeks(),
            seed: None,
            report_phase: true,
            price: PriceSettings::default(),
            field: FieldParams::default(),
        }
    }
}

impl GameConfig {
    /// Validates the configuration for consistency.
    pub fn validate(&self) -> GameResult<()> {
        if self.height == 0 || self.width == 0 {
            return Err(GameError::InvalidConfig(format!(
                "Field must have at least one site, got {}x{}",
                self.height, self.width
            )));
        }
        if self.weeks == 0 {
            return Err(GameError::InvalidConfig("Game needs at least one week".to_string()));
        }
        self.price.validate()?;
        self.field.validate()
    }
}

/// Weekly oil price model. Prices are in cents per barrel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSettings {
    /// Median price in cents
    pub base_cents: i64,
    /// Standard deviation of the log price
    pub volatility: f64,
}

impl Default for PriceSettings {
    fn default() -> Self {
        Self {
            base_cents: 100,
            volatility: 0.15,
        }
    }
}

impl PriceSettings {
    fn validate(&self) -> GameResult<()> {
        if self.base_cents <= 0 {
            return Err(GameError::InvalidConfig("Base price must be positive".to_string()));
        }
        if !(self.volatility >= 0.0 && self.volatility.is_finite()) {
            return Err(GameError::InvalidConfig(format!(
                "Price volatility must be a non-negative number, got {}",
                self.volatility
            )));
        }
        Ok(())
    }
}

/// Generation parameters for one attribute grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSpec {
    /// Fewest peaks to scatter
    pub peaks_min: usize,
    /// Most peaks to scatter (inclusive)
    pub peaks_max: usize,
    /// Smallest generated value
    pub min: u32,
    /// Largest generated value
    pub max: u32,
    /// Strength lost by each successive peak
    pub decay: f64,
    /// Amplitude of the uniform noise added to every site
    pub fuzz: f64,
    /// Peaks mark low values instead of high ones
    #[serde(default)]
    pub inverse: bool,
}

impl AttributeSpec {
    fn validate(&self, name: &str) -> GameResult<()> {
        if self.peaks_min == 0 || self.peaks_min > self.peaks_max {
            return Err(GameError::InvalidConfig(format!(
                "{name}: peak count range {}..={} is empty",
                self.peaks_min, self.peaks_max
            )));
        }
        if self.min > self.max {
            return Err(GameError::InvalidConfig(format!(
                "{name}: min {} exceeds max {}",
                self.min, self.max
            )));
        }
        if !(0.0..1.0).contains(&self.decay) {
            return Err(GameError::InvalidConfig(format!(
                "{name}: decay must be in [0, 1), got {}",
                self.decay
            )));
        }
        if !(self.fuzz >= 0.0 && self.fuzz.is_finite()) {
            return Err(GameError::InvalidConfig(format!(
                "{name}: fuzz must be a non-negative number, got {}",
                self.fuzz
            )));
        }
        Ok(())
    }
}

/// Parameters for the four attribute grids of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldParams {
    pub prob: AttributeSpec,
    pub cost: AttributeSpec,
    pub oil: AttributeSpec,
    pub tax: AttributeSpec,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            // a few well formed peaks
            prob: AttributeSpec {
                peaks_min: 1,
                peaks_max: 4,
                min: 1,
                max: 100,
                decay: 0.05,
                fuzz: 0.25,
                inverse: false,
            },
            // many chaotic peaks
            cost: AttributeSpec {
                peaks_min: 5,
                peaks_max: 9,
                min: 1,
                max: 25,
                decay: 0.1,
                fuzz: 0.25,
                inverse: true,
            },
            oil: AttributeSpec {
                peaks_min: 1,
                peaks_max: 1,
                min: 1,
                max: crate::MAX_DEPTH,
                decay: 0.1,
                fuzz: 0.5,
                inverse: true,
            },
            // local politics
            tax: AttributeSpec {
                peaks_min: 10,
                peaks_max: 19,
                min: 100,
                max: 550,
                decay: 0.1,
                fuzz: 0.5,
                inverse: false,
            },
        }
    }
}

impl FieldParams {
    fn validate(&self) -> GameResult<()> {
        self.prob.validate("prob")?;
        self.cost.validate("cost")?;
        self.oil.validate("oil")?;
        self.tax.validate("tax")?;
        if self.oil.max > crate::MAX_DEPTH {
            return Err(GameError::InvalidConfig(format!(
                "oil: max depth {} exceeds {}",
                self.oil.max,
                crate::MAX_DEPTH
            )));
        }
        Ok(())
    }
}
