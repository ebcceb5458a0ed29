//! Display colors for newly created projects.

use rand::seq::SliceRandom;
use rand::Rng;

/// The swatches offered by the Clockify project color picker.
pub const PALETTE: &[&str] = &[
    "#F44336", "#E91E63", "#9C27B0", "#673AB7", "#3F51B5", "#2196F3", "#03A9F4", "#00BCD4",
    "#009688", "#4CAF50", "#8BC34A", "#CDDC39", "#FFC107", "#FF9800", "#FF5722", "#795548",
    "#607D8B",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorStrategy {
    /// Each channel sampled uniformly from 0..=255.
    #[default]
    RandomRgb,
    /// One of [`PALETTE`], chosen uniformly.
    Palette,
}

impl ColorStrategy {
    pub fn pick(self) -> String {
        match self {
            ColorStrategy::RandomRgb => random_rgb(),
            ColorStrategy::Palette => from_palette(),
        }
    }
}

/// Uniform random color rendered as `#RRGGBB`.
pub fn random_rgb() -> String {
    let mut rng = rand::thread_rng();
    let (r, g, b): (u8, u8, u8) = (rng.gen(), rng.gen(), rng.gen());
    format!("#{r:02X}{g:02X}{b:02X}")
}

pub fn from_palette() -> String {
    PALETTE
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(PALETTE[0])
        .to_string()
}
