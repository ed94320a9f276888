use crate::QuizApp;
use crate::model::Quiz;
use crate::ui::layout::{error_banner, loading_block};
use crate::view_models::HistoryRow;
use egui::{Button, CentralPanel, Context, Grid, RichText, ScrollArea};

pub fn ui_history(app: &mut QuizApp, ctx: &Context) {
    app.asegurar_historial(ctx);

    let mut refresh = false;
    let mut open: Option<Quiz> = None;

    CentralPanel::default().show(ctx, |ui| {
        let loading = app.history.loading;

        ui.horizontal(|ui| {
            ui.heading("Historial de cuestionarios");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = if loading { "Cargando..." } else { "🔄 Recargar" };
                refresh = ui.add_enabled(!loading, Button::new(label)).clicked();
            });
        });
        ui.add_space(10.0);

        if !app.history.error.is_empty() {
            error_banner(ui, &app.history.error);
            ui.add_space(10.0);
        }

        if loading && app.history.quizzes.is_empty() {
            loading_block(ui, "Cargando cuestionarios...");
        }

        if app.historial_vacio() {
            ui.vertical_centered(|ui| {
                ui.add_space(30.0);
                ui.label(RichText::new("Aún no hay cuestionarios. ¡Crea uno para empezar!").weak());
            });
        }

        if !app.history.quizzes.is_empty() {
            ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
                Grid::new("history_grid")
                    .striped(true)
                    .num_columns(5)
                    .spacing([24.0, 8.0])
                    .show(ui, |ui| {
                        for header in ["ID", "Título", "Fecha", "Preguntas", "Acción"] {
                            ui.label(RichText::new(header).strong());
                        }
                        ui.end_row();

                        for quiz in &app.history.quizzes {
                            let row = HistoryRow::from_quiz(quiz);
                            ui.label(row.id_label);
                            ui.add(egui::Label::new(row.title).truncate());
                            ui.label(row.date);
                            ui.label(row.questions_label);
                            if ui.link("Ver detalles").clicked() {
                                open = Some(quiz.clone());
                            }
                            ui.end_row();
                        }
                    });
            });
        }
    });

    if refresh {
        app.cargar_historial(ctx);
    }
    if let Some(quiz) = open {
        app.ver_detalles(quiz, ctx);
    }
}
