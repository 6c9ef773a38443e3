//! Five-band classification of a correlation coefficient.

use colorgrad::{Color, Gradient};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::config::ANALYSIS;

/// Ordered strongest-positive first, which is also the legend order.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, strum_macros::EnumIter,
)]
pub enum CorrelationBand {
    StrongPositive,
    ModeratePositive,
    Weak,
    ModerateNegative,
    StrongNegative,
}

/// Thresholds are checked with `>=` from the top down, so a value sitting
/// exactly on a boundary lands in the higher band. Anything that passes no
/// threshold (including NaN) is `StrongNegative`.
pub fn classify_correlation(value: f64) -> CorrelationBand {
    let bands = &ANALYSIS.bands;
    if value >= bands.strong_positive {
        CorrelationBand::StrongPositive
    } else if value >= bands.moderate_positive {
        CorrelationBand::ModeratePositive
    } else if value >= bands.weak {
        CorrelationBand::Weak
    } else if value >= bands.moderate_negative {
        CorrelationBand::ModerateNegative
    } else {
        CorrelationBand::StrongNegative
    }
}

impl CorrelationBand {
    pub fn label(&self) -> &'static str {
        match self {
            CorrelationBand::StrongPositive => "Strong Positive",
            CorrelationBand::ModeratePositive => "Moderate Positive",
            CorrelationBand::Weak => "Weak",
            CorrelationBand::ModerateNegative => "Moderate Negative",
            CorrelationBand::StrongNegative => "Strong Negative",
        }
    }

    /// Legend text for the band's range
    pub fn range_label(&self) -> &'static str {
        match self {
            CorrelationBand::StrongPositive => "0.7 to 1.0",
            CorrelationBand::ModeratePositive => "0.3 to 0.7",
            CorrelationBand::Weak => "-0.3 to 0.3",
            CorrelationBand::ModerateNegative => "-0.7 to -0.3",
            CorrelationBand::StrongNegative => "-1.0 to -0.7",
        }
    }

    fn rgb(&self) -> (u8, u8, u8) {
        match self {
            CorrelationBand::StrongPositive => (0x4c, 0xaf, 0x50),   // green
            CorrelationBand::ModeratePositive => (0x8b, 0xc3, 0x4a), // light green
            CorrelationBand::Weak => (0xff, 0xeb, 0x3b),             // yellow
            CorrelationBand::ModerateNegative => (0xff, 0x98, 0x00), // orange
            CorrelationBand::StrongNegative => (0xf4, 0x43, 0x36),   // red
        }
    }

    pub fn color(&self) -> Color {
        let (r, g, b) = self.rgb();
        Color::from_rgba8(r, g, b, 255)
    }

    /// e.g. "#4caf50"
    pub fn hex_color(&self) -> String {
        self.color().to_hex_string()
    }

    /// Every band in legend order
    pub fn legend() -> Vec<CorrelationBand> {
        CorrelationBand::iter().collect()
    }
}

impl std::fmt::Display for CorrelationBand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Smooth colour for a heatmap cell, blending between the band colours
/// (red at -1, yellow at 0, green at +1).
pub fn heat_color(value: f64) -> Color {
    let stops: Vec<String> = CorrelationBand::iter().rev().map(|b| b.hex_color()).collect();
    colorgrad::GradientBuilder::new()
        .html_colors(&stops)
        .domain(&[-1.0, -0.5, 0.0, 0.5, 1.0])
        .build::<colorgrad::LinearGradient>()
        .map(|grad| grad.at(value.clamp(-1.0, 1.0) as f32))
        .unwrap_or_else(|_| classify_correlation(value).color())
}
