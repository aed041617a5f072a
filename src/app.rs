use std::path::{Path, PathBuf};

use egui::TextureHandle;
use serde::{Deserialize, Serialize};

use crate::controller::PaintController;
use crate::export::{self, ImageFormat};
use crate::input::InputTranslator;
use crate::panels;
use crate::style::StyleSelection;
use crate::view::ViewTransform;

pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 600;

const PREFERENCES_KEY: &str = "easel_preferences";

/// Tool and view settings carried across sessions.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct Preferences {
    style: StyleSelection,
    view: ViewTransform,
}

pub struct EaselApp {
    pub(crate) style: StyleSelection,
    pub(crate) view: ViewTransform,
    pub(crate) controller: PaintController,
    pub(crate) input: InputTranslator,
    // GPU-side copy of the canvas, rebuilt whenever the surface revision moves
    pub(crate) canvas_texture: Option<TextureHandle>,
    pub(crate) uploaded_revision: u64,
    pub(crate) last_export: Option<PathBuf>,
}

impl EaselApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let preferences: Preferences = cc
            .storage
            .and_then(|storage| storage.get_string(PREFERENCES_KEY))
            .and_then(|json| match serde_json::from_str(&json) {
                Ok(preferences) => Some(preferences),
                Err(err) => {
                    log::warn!("discarding unreadable preferences: {}", err);
                    None
                }
            })
            .unwrap_or_default();

        let mut controller = PaintController::new();
        if let Err(err) = controller.initialize(CANVAS_WIDTH, CANVAS_HEIGHT) {
            log::error!("failed to allocate canvas: {}", err);
        }

        Self {
            style: preferences.style,
            view: preferences.view,
            controller,
            input: InputTranslator::new(),
            canvas_texture: None,
            uploaded_revision: 0,
            last_export: None,
        }
    }

    /// Write the canvas to a timestamped JPEG in the working directory
    pub(crate) fn save_canvas(&mut self) {
        let Some(surface) = self.controller.surface() else {
            log::warn!("save ignored: canvas not initialized");
            return;
        };
        match export::save_to_disk(surface, Path::new("."), ImageFormat::Jpeg) {
            Ok(path) => self.last_export = Some(path),
            Err(err) => log::error!("failed to save canvas: {}", err),
        }
    }
}

impl eframe::App for EaselApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let preferences = Preferences {
            style: self.style,
            view: self.view,
        };
        match serde_json::to_string(&preferences) {
            Ok(json) => storage.set_string(PREFERENCES_KEY, json),
            Err(err) => log::error!("failed to serialize preferences: {}", err),
        }
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);
    }
}
