use crate::QuizApp;
use crate::model::Quiz;
use crate::session::TakeSession;
use crate::ui::helpers::{difficulty_color, option_button};
use crate::ui::layout::{chip, chip_row, error_banner, loading_block, two_button_row};
use crate::view_models::{
    entity_groups, format_timestamp, option_row, score_label, wikipedia_link,
};
use egui::{Button, CentralPanel, Color32, Context, Key, RichText, ScrollArea, TextEdit, Ui};

const MAX_ENTITIES: usize = 3;
const MAX_SECTIONS: usize = 8;

/// Lo que el usuario pidió durante este frame; se aplica al terminar de pintar.
enum QuizAction {
    StartTake,
    Select(usize, usize),
    Submit,
    Exit,
    Retry,
    CopyUrl(String),
}

pub fn ui_generate(app: &mut QuizApp, ctx: &Context) {
    CentralPanel::default().show(ctx, |ui| {
        ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                url_form(app, ui, ctx);
                ui.add_space(12.0);

                if !app.generate.error.is_empty() {
                    error_banner(ui, &app.generate.error);
                    ui.add_space(12.0);
                }

                let mut actions = Vec::new();
                if let Some(quiz) = &app.generate.quiz {
                    quiz_body(ui, quiz, &app.generate.session, &mut actions);
                }
                for action in actions {
                    apply(app, ui.ctx(), action);
                }

                if app.generate.loading {
                    loading_block(ui, "Leyendo el artículo y generando el cuestionario...");
                }
            });
    });
}

fn apply(app: &mut QuizApp, ctx: &Context, action: QuizAction) {
    match action {
        QuizAction::StartTake => app.iniciar_examen(),
        QuizAction::Select(q, o) => app.seleccionar_opcion(q, o),
        QuizAction::Submit => app.enviar_respuestas(),
        QuizAction::Exit => app.salir_examen(),
        QuizAction::Retry => app.reintentar_examen(),
        QuizAction::CopyUrl(url) => ctx.copy_text(url),
    }
}

fn url_form(app: &mut QuizApp, ui: &mut Ui, ctx: &Context) {
    let loading = app.generate.loading;
    let mut submit = false;

    ui.label(RichText::new("URL del artículo de Wikipedia").strong());
    ui.horizontal(|ui| {
        let input_width = (ui.available_width() - 190.0).max(200.0);
        let edit = ui.add_enabled(
            !loading,
            TextEdit::singleline(&mut app.generate.url_input)
                .hint_text("https://en.wikipedia.org/wiki/Alan_Turing")
                .desired_width(input_width),
        );
        let enter = edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

        let label = if loading { "Generando..." } else { "Generar cuestionario" };
        let clicked = ui
            .add_enabled(!loading, Button::new(label).min_size([170.0, 24.0].into()))
            .clicked();
        submit = clicked || enter;
    });

    if submit {
        app.generar_quiz(ctx);
    }
}

fn quiz_body(ui: &mut Ui, quiz: &Quiz, session: &TakeSession, actions: &mut Vec<QuizAction>) {
    quiz_header(ui, quiz, actions);
    ui.add_space(12.0);
    questions(ui, quiz, session, actions);

    if !quiz.related_topics.is_empty() {
        ui.add_space(12.0);
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("Temas relacionados").strong());
            ui.horizontal_wrapped(|ui| {
                for topic in &quiz.related_topics {
                    ui.hyperlink_to(format!("{topic} ↗"), wikipedia_link(topic));
                }
            });
        });
    }
}

fn quiz_header(ui: &mut Ui, quiz: &Quiz, actions: &mut Vec<QuizAction>) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.heading(&quiz.title);
                ui.label(RichText::new(format_timestamp(&quiz.date_generated)).small().weak());
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                if ui.button("📋 Copiar URL").clicked() {
                    actions.push(QuizAction::CopyUrl(quiz.url.clone()));
                }
                if ui.button("▶ Hacer el cuestionario").clicked() {
                    actions.push(QuizAction::StartTake);
                }
            });
        });

        if !quiz.summary.is_empty() {
            ui.add_space(6.0);
            ui.label(&quiz.summary);
        }

        let groups = entity_groups(&quiz.key_entities, Some(MAX_ENTITIES));
        if !groups.is_empty() {
            ui.add_space(8.0);
            ui.columns(groups.len(), |cols| {
                for (col, group) in cols.iter_mut().zip(&groups) {
                    col.label(RichText::new(group.heading).strong());
                    chip_row(col, group.items.iter().copied(), entity_color(group.heading));
                }
            });
        }

        if !quiz.sections.is_empty() {
            ui.add_space(8.0);
            ui.label(RichText::new("Secciones del artículo").strong());
            chip_row(
                ui,
                quiz.sections.iter().take(MAX_SECTIONS).map(String::as_str),
                Color32::DARK_GRAY,
            );
        }
    });
}

fn questions(ui: &mut Ui, quiz: &Quiz, session: &TakeSession, actions: &mut Vec<QuizAction>) {
    ui.horizontal(|ui| {
        ui.heading("Preguntas");
        if session.in_take_mode() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                // right_to_left: el primero queda a la derecha
                let (submit, exit) =
                    two_button_row(ui, "✅ Enviar respuestas", session.is_taking(), "Salir");
                if submit {
                    actions.push(QuizAction::Submit);
                }
                if exit {
                    actions.push(QuizAction::Exit);
                }
            });
        }
    });
    ui.add_space(6.0);

    for (qi, q) in quiz.quiz.iter().enumerate() {
        ui.group(|ui| {
            let width = ui.available_width();
            ui.set_width(width);
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("P{}: {}", qi + 1, q.question)).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    chip(ui, &q.difficulty, difficulty_color(&q.difficulty));
                });
            });
            ui.add_space(4.0);

            for oi in 0..q.options.len() {
                let row = option_row(session, q, qi, oi);
                if option_button(ui, &row, width) {
                    actions.push(QuizAction::Select(qi, oi));
                }
            }

            if session.shows_explanations() && !q.explanation.is_empty() {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Explicación: {}", q.explanation))
                        .color(Color32::LIGHT_BLUE),
                );
            }
        });
        ui.add_space(6.0);
    }

    if let Some(score) = session.score() {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new("Tu puntuación").strong());
                    ui.label(score_label(score, quiz.quiz.len()));
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⟲ Reintentar").clicked() {
                        actions.push(QuizAction::Retry);
                    }
                });
            });
        });
    }
}

fn entity_color(heading: &str) -> Color32 {
    match heading {
        "Personas" => Color32::from_rgb(30, 64, 175),
        "Organizaciones" => Color32::from_rgb(107, 33, 168),
        _ => Color32::from_rgb(22, 101, 52),
    }
}
