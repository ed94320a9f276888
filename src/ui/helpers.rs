// src/ui/helpers.rs
use crate::view_models::{OptionRow, OptionTone};
use egui::{Button, Color32, RichText, Ui, Vec2};

/// Botón de opción a ancho completo; devuelve `true` si se pulsó.
pub fn option_button(ui: &mut Ui, row: &OptionRow, width: f32) -> bool {
    let visuals = ui.visuals();
    let (fill, text_color) = match row.tone {
        OptionTone::Selected => (visuals.selection.bg_fill, Some(Color32::WHITE)),
        OptionTone::Idle => (visuals.widgets.inactive.weak_bg_fill, None),
        OptionTone::Correct => (Color32::from_rgb(22, 101, 52), Some(Color32::WHITE)),
        OptionTone::Plain => (visuals.faint_bg_color, None),
    };

    let label = if row.show_check {
        format!("{}   ✔", row.label)
    } else {
        row.label.clone()
    };
    let mut text = RichText::new(label);
    if let Some(color) = text_color {
        text = text.color(color);
    }
    if row.tone == OptionTone::Correct {
        text = text.strong();
    }

    ui.add_enabled(
        row.enabled,
        Button::new(text).fill(fill).min_size(Vec2::new(width, 28.0)),
    )
    .clicked()
}

pub fn difficulty_color(difficulty: &str) -> Color32 {
    match difficulty.to_ascii_lowercase().as_str() {
        "easy" => Color32::from_rgb(21, 128, 61),
        "hard" => Color32::from_rgb(185, 28, 28),
        _ => Color32::from_rgb(161, 98, 7),
    }
}
