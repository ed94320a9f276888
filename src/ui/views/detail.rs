use crate::QuizApp;
use crate::model::Quiz;
use crate::ui::helpers::difficulty_color;
use crate::ui::layout::{chip, chip_row};
use crate::view_models::{entity_groups, format_timestamp, option_letter, wikipedia_link};
use egui::{Color32, Context, Frame, RichText, ScrollArea, Spinner, Ui};

/// Ventana modal con todo el contenido de un cuestionario guardado.
pub fn ui_quiz_detail(app: &mut QuizApp, ctx: &Context) {
    let Some(quiz) = app.history.selected.as_ref() else {
        return;
    };

    let mut open = true;
    let mut close_clicked = false;
    let refreshing = app.history.detail_loading;
    let detail_error = app.history.detail_error.as_str();

    egui::Window::new(RichText::new(&quiz.title).strong())
        .id(egui::Id::new("quiz_detail"))
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_width(680.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("Generado: {}", format_timestamp(&quiz.date_generated)))
                        .small()
                        .weak(),
                );
                if refreshing {
                    ui.add(Spinner::new());
                }
            });
            if !detail_error.is_empty() {
                ui.colored_label(Color32::from_rgb(220, 38, 38), detail_error);
            }
            ui.separator();

            ScrollArea::vertical().max_height(520.0).show(ui, |ui| {
                detail_body(ui, quiz);
            });

            ui.separator();
            ui.vertical_centered(|ui| {
                if ui.button("✕ Cerrar").clicked() {
                    close_clicked = true;
                }
            });
        });

    if !open || close_clicked {
        app.cerrar_detalles();
    }
}

fn detail_body(ui: &mut Ui, quiz: &Quiz) {
    if !quiz.summary.is_empty() {
        ui.label(RichText::new("Resumen").heading());
        ui.label(&quiz.summary);
        ui.add_space(10.0);
    }

    let groups = entity_groups(&quiz.key_entities, None);
    if !groups.is_empty() {
        ui.label(RichText::new("Entidades clave").heading());
        for group in &groups {
            ui.label(RichText::new(group.heading).strong());
            chip_row(ui, group.items.iter().copied(), Color32::from_rgb(55, 65, 81));
        }
        ui.add_space(10.0);
    }

    if !quiz.sections.is_empty() {
        ui.label(RichText::new("Secciones del artículo").heading());
        chip_row(ui, quiz.sections.iter().map(String::as_str), Color32::DARK_GRAY);
        ui.add_space(10.0);
    }

    if !quiz.quiz.is_empty() {
        ui.label(RichText::new("Preguntas").heading());
        for (qi, q) in quiz.quiz.iter().enumerate() {
            ui.group(|ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(RichText::new(format!("{}. {}", qi + 1, q.question)).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                        chip(ui, &q.difficulty, difficulty_color(&q.difficulty));
                    });
                });

                for (oi, option) in q.options.iter().enumerate() {
                    let text = format!("{}. {}", option_letter(oi), option);
                    if q.is_correct(oi) {
                        Frame::default()
                            .fill(Color32::from_rgb(22, 101, 52))
                            .inner_margin(egui::Margin::symmetric(6, 2))
                            .show(ui, |ui| {
                                ui.colored_label(Color32::WHITE, format!("{text}   ✔ Correcta"));
                            });
                    } else {
                        ui.label(text);
                    }
                }

                if !q.explanation.is_empty() {
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(format!("Explicación: {}", q.explanation))
                            .color(Color32::LIGHT_BLUE),
                    );
                }
            });
            ui.add_space(4.0);
        }
        ui.add_space(10.0);
    }

    if !quiz.related_topics.is_empty() {
        ui.label(RichText::new("Temas relacionados").heading());
        ui.horizontal_wrapped(|ui| {
            for topic in &quiz.related_topics {
                ui.hyperlink_to(topic, wikipedia_link(topic));
            }
        });
        ui.add_space(10.0);
    }

    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new("Fuente:").strong());
        if quiz.url.is_empty() {
            ui.label("—");
        } else {
            ui.hyperlink(&quiz.url);
        }
    });
}
