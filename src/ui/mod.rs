mod helpers;
pub mod layout;
pub mod views;

use crate::app::QuizApp;
use crate::model::AppState;
use eframe::{APP_KEY, App, Frame, set_value};
use egui::Context;
use layout::{bottom_panel, top_panel};
use std::time::Duration;

impl App for QuizApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        // Resultados de red llegados desde el último frame
        self.poll_pending();

        top_panel(self, ctx);
        bottom_panel(self, ctx);

        // Dispatch por pestaña
        match self.state {
            AppState::Generate => views::generate::ui_generate(self, ctx),
            AppState::History => views::history::ui_history(self, ctx),
        }

        // El modal de detalle pertenece a la pestaña de historial
        if self.state == AppState::History && self.history.selected.is_some() {
            views::detail::ui_quiz_detail(self, ctx);
        }

        if self.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        set_value(storage, APP_KEY, self);
    }
}
