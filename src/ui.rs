// src/ui.rs

const HEADLINE_SIZE: f32 = 28.0;
const HINT_SIZE: f32 = 16.0;

/// Status overlay: first line is the mode, the rest are control hints.
pub fn build_ui(ctx: &egui::Context, status: &str) {
    egui::Window::new("Chaos Game")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.vertical(|ui| {
                let mut lines = status.lines();
                if let Some(headline) = lines.next() {
                    ui.label(
                        egui::RichText::new(headline)
                            .size(HEADLINE_SIZE)
                            .strong()
                            .color(egui::Color32::WHITE),
                    );
                }
                ui.separator();
                for hint in lines {
                    ui.label(egui::RichText::new(hint).size(HINT_SIZE));
                }
            });
        });
}
