use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::tool::Tool;

pub const MIN_STROKE_WIDTH: f32 = 1.0;
pub const MAX_STROKE_WIDTH: f32 = 100.0;

/// The drawing settings currently selected in the tools panel.
///
/// A stroke samples these once when the pointer goes down; changing the
/// selection mid-stroke does not affect the stroke in progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleSelection {
    pub tool: Tool,
    pub color: Color32,
    pub width: f32,
    pub filled: bool,
}

impl StyleSelection {
    /// Copy of this selection with the stroke width clamped to the supported
    /// range and the color forced opaque.
    ///
    /// The surface stores opaque pixels only; translucent paint would be
    /// silently discarded by the JPEG flatten on export.
    pub fn normalized(&self) -> Self {
        Self {
            color: self.color.to_opaque(),
            width: self.width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH),
            ..*self
        }
    }
}

impl Default for StyleSelection {
    fn default() -> Self {
        Self {
            tool: Tool::Brush,
            color: Color32::BLACK,
            width: 5.0,
            filled: false,
        }
    }
}
