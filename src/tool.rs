use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};

use crate::surface::Surface;

/// Available drawing tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    Brush,
    Eraser,
    Rectangle,
    Ellipse,
    Triangle,
}

impl Tool {
    /// All tools in toolbar order
    pub const ALL: [Tool; 5] = [
        Tool::Brush,
        Tool::Eraser,
        Tool::Rectangle,
        Tool::Ellipse,
        Tool::Triangle,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Brush => "Brush",
            Tool::Eraser => "Eraser",
            Tool::Rectangle => "Rectangle",
            Tool::Ellipse => "Ellipse",
            Tool::Triangle => "Triangle",
        }
    }

    /// Toolbar label with icon
    pub fn label(&self) -> &'static str {
        match self {
            Tool::Brush => "🖌 Brush",
            Tool::Eraser => "⌫ Eraser",
            Tool::Rectangle => "▭ Rectangle",
            Tool::Ellipse => "◯ Ellipse",
            Tool::Triangle => "△ Triangle",
        }
    }

    /// Freehand tools draw incrementally from the previous pointer position;
    /// shape tools redraw from the anchor on every move
    pub fn is_freehand(&self) -> bool {
        matches!(self, Tool::Brush | Tool::Eraser)
    }

    pub fn is_shape(&self) -> bool {
        !self.is_freehand()
    }

    /// Whether the fill toggle applies to this tool
    pub fn supports_fill(&self) -> bool {
        self.is_shape()
    }

    /// Draw this tool's mark from `start` to `current`.
    ///
    /// For freehand tools `start` is the previous pointer position; for shape
    /// tools it is the anchor where the pointer went down.
    pub fn render(
        &self,
        surface: &mut Surface,
        start: Pos2,
        current: Pos2,
        color: Color32,
        width: f32,
        filled: bool,
    ) {
        match self {
            Tool::Brush => surface.stroke_segment(start, current, color, width),
            Tool::Eraser => {
                let background = surface.background_color();
                surface.stroke_segment(start, current, background, width);
            }
            Tool::Rectangle => surface.draw_rectangle(start, current, color, width, filled),
            Tool::Ellipse => surface.draw_ellipse(start, current, color, width, filled),
            Tool::Triangle => surface.draw_triangle(start, current, color, width, filled),
        }
    }
}

impl Default for Tool {
    fn default() -> Self {
        Tool::Brush
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
