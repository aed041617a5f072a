use crate::app::EaselApp;

pub fn central_panel(app: &mut EaselApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let Some(surface) = app.controller.surface() else {
            ui.centered_and_justified(|ui| {
                ui.label("Canvas not initialized");
            });
            return;
        };

        // Re-upload the canvas texture only when the buffer actually changed
        if app.uploaded_revision != surface.revision() || app.canvas_texture.is_none() {
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [surface.width() as usize, surface.height() as usize],
                surface.as_raw(),
            );
            match app.canvas_texture.as_mut() {
                Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
                None => {
                    app.canvas_texture =
                        Some(ctx.load_texture("canvas", image, egui::TextureOptions::NEAREST));
                }
            }
            app.uploaded_revision = surface.revision();
        }

        let zoom = app.view.zoom();
        let canvas_size = egui::vec2(surface.width() as f32, surface.height() as f32) * zoom;
        let Some(texture_id) = app.canvas_texture.as_ref().map(|texture| texture.id()) else {
            return;
        };

        egui::ScrollArea::both().show(ui, |ui| {
            let (rect, response) = ui.allocate_exact_size(canvas_size, egui::Sense::drag());
            ui.painter().image(
                texture_id,
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );

            let events = app.input.translate(&response, rect, zoom);
            for event in events {
                app.controller.handle_event(event, &app.style);
            }
        });
    });
}
