use crate::QuizApp;
use crate::model::AppState;
use egui::{Color32, Context, Frame, RichText, Spinner, Ui, Visuals};

pub fn top_panel(app: &mut QuizApp, ctx: &Context) {
    egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
        ui.add_space(6.0);
        ui.heading("AI Quiz Generator");
        ui.label(RichText::new("Genera cuestionarios a partir de cualquier artículo").weak());
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            let tabs = [
                (AppState::Generate, "📝 Generar cuestionario"),
                (AppState::History, "📚 Cuestionarios anteriores"),
            ];
            for (state, label) in tabs {
                if ui.selectable_label(app.state == state, label).clicked() {
                    app.cambiar_pestana(state);
                }
            }
        });
        ui.add_space(4.0);
    });
}

pub fn bottom_panel(app: &QuizApp, ctx: &Context) {
    egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("Backend: {}", app.config.base_url)).small().weak());

            // ----------- BOTONES DE TEMA -----------
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("🌙 Modo oscuro").clicked() {
                    ctx.set_visuals(Visuals::dark());
                }
                if ui.button("☀Modo claro").clicked() {
                    ctx.set_visuals(Visuals::light());
                }
            });
        });
    });
}

/// Banner rojo para errores de red o de validación.
pub fn error_banner(ui: &mut Ui, message: &str) {
    Frame::default()
        .fill(Color32::from_rgb(127, 29, 29))
        .inner_margin(egui::Margin::symmetric(12, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.colored_label(Color32::WHITE, message);
        });
}

/// Spinner centrado con un texto debajo.
pub fn loading_block(ui: &mut Ui, text: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(30.0);
        ui.add(Spinner::new().size(32.0));
        ui.add_space(8.0);
        ui.label(RichText::new(text).weak());
        ui.add_space(30.0);
    });
}

/// Etiqueta tipo "chip" para entidades, secciones y dificultad.
pub fn chip(ui: &mut Ui, text: &str, fill: Color32) {
    Frame::default()
        .fill(fill)
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(text).small().color(Color32::WHITE));
        });
}

pub fn chip_row<'a>(ui: &mut Ui, items: impl IntoIterator<Item = &'a str>, fill: Color32) {
    ui.horizontal_wrapped(|ui| {
        for item in items {
            chip(ui, item, fill);
        }
    });
}

/// Dibuja dos botones del mismo tamaño en una fila.
/// Devuelve (clic izquierdo, clic derecho).
pub fn two_button_row(
    ui: &mut Ui,
    left_label: &str,
    left_enabled: bool,
    right_label: &str,
) -> (bool, bool) {
    let mut clicked_left = false;
    let mut clicked_right = false;
    ui.horizontal(|ui| {
        clicked_left = ui
            .add_enabled(left_enabled, egui::Button::new(left_label).min_size([140.0, 28.0].into()))
            .clicked();
        clicked_right = ui
            .add(egui::Button::new(right_label).min_size([80.0, 28.0].into()))
            .clicked();
    });
    (clicked_left, clicked_right)
}
