use egui::Color32;

use crate::app::EaselApp;
use crate::style::{MAX_STROKE_WIDTH, MIN_STROKE_WIDTH};
use crate::tool::Tool;

/// Quick-pick colors shown under the color picker
const SWATCHES: [Color32; 6] = [
    Color32::BLACK,
    Color32::WHITE,
    Color32::RED,
    Color32::GREEN,
    Color32::BLUE,
    Color32::YELLOW,
];

pub fn tools_panel(app: &mut EaselApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            for tool in Tool::ALL {
                let is_selected = app.style.tool == tool;
                if ui.selectable_label(is_selected, tool.label()).clicked() {
                    log::info!("tool selected: {}", tool);
                    app.style.tool = tool;
                }
            }

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Color:");
                // The surface stores opaque pixels only, so no alpha control
                egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut app.style.color,
                    egui::color_picker::Alpha::Opaque,
                );
            });
            ui.horizontal(|ui| {
                for swatch in SWATCHES {
                    swatch_button(ui, swatch, &mut app.style.color);
                }
            });

            ui.add(
                egui::Slider::new(&mut app.style.width, MIN_STROKE_WIDTH..=MAX_STROKE_WIDTH)
                    .text("Width"),
            );

            ui.add_enabled(
                app.style.tool.supports_fill(),
                egui::Checkbox::new(&mut app.style.filled, "Fill shape"),
            );

            ui.separator();

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(app.controller.can_undo(), egui::Button::new("Undo"))
                    .clicked()
                {
                    app.controller.undo();
                }
                if ui
                    .add_enabled(app.controller.can_redo(), egui::Button::new("Redo"))
                    .clicked()
                {
                    app.controller.redo();
                }
            });
            ui.horizontal(|ui| {
                ui.label(format!("Undo steps: {}", app.controller.undo_depth()));
                ui.label(format!("Redo steps: {}", app.controller.redo_depth()));
            });

            ui.separator();

            if ui.button("Clear canvas").clicked() {
                app.controller.clear_canvas();
            }
            if ui.button("Save image").clicked() {
                app.save_canvas();
            }
            if let Some(path) = &app.last_export {
                ui.label(format!("Saved {}", path.display()));
            }

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Zoom:");
                if ui.button("−").clicked() {
                    app.view.zoom_out();
                }
                ui.label(format!("{:.0}%", app.view.zoom() * 100.0));
                if ui.button("+").clicked() {
                    app.view.zoom_in();
                }
            });
        });
}

/// Small clickable color square; a heavier outline marks the active color
fn swatch_button(ui: &mut egui::Ui, swatch: Color32, current: &mut Color32) {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(18.0, 18.0), egui::Sense::click());
    let is_selected = *current == swatch;
    let outline = if is_selected {
        egui::Stroke::new(2.0, ui.visuals().strong_text_color())
    } else {
        egui::Stroke::new(1.0, ui.visuals().weak_text_color())
    };
    ui.painter().rect_filled(rect, 2.0, swatch);
    ui.painter().rect_stroke(rect, 2.0, outline);
    if response.clicked() {
        *current = swatch;
    }
}
