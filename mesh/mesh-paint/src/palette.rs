//! Colours used when painting meshes.

use mesh_types::VertexColor;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Colours for an inversion highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FacePalette {
    /// Colour of flagged faces.
    pub alert: VertexColor,
    /// Colour of every other face.
    pub neutral: VertexColor,
}

impl FacePalette {
    /// Light gray used for unflagged faces.
    pub const NEUTRAL_GRAY: VertexColor = VertexColor::new(220, 220, 220);

    /// Create a palette.
    #[must_use]
    pub const fn new(alert: VertexColor, neutral: VertexColor) -> Self {
        Self { alert, neutral }
    }

    /// Set the alert colour.
    #[must_use]
    pub const fn with_alert(mut self, alert: VertexColor) -> Self {
        self.alert = alert;
        self
    }

    /// Set the neutral colour.
    #[must_use]
    pub const fn with_neutral(mut self, neutral: VertexColor) -> Self {
        self.neutral = neutral;
        self
    }

    /// Colour for a face with the given flag.
    #[must_use]
    pub const fn pick(&self, flagged: bool) -> VertexColor {
        if flagged { self.alert } else { self.neutral }
    }
}

impl Default for FacePalette {
    fn default() -> Self {
        Self::new(VertexColor::RED, Self::NEUTRAL_GRAY)
    }
}

/// Ramp endpoints for the area heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeatmapPalette {
    /// Colour of faces at the median log-area.
    pub base: VertexColor,
    /// Colour approached by the smallest faces.
    pub small: VertexColor,
    /// Colour approached by the largest faces.
    pub large: VertexColor,
}

impl Default for HeatmapPalette {
    fn default() -> Self {
        Self {
            base: VertexColor::new(180, 180, 180),
            small: VertexColor::RED,
            large: VertexColor::new(0, 64, 255),
        }
    }
}
