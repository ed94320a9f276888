use super::tasks::{Poll, poll, spawn_request};
use super::*;
use crate::api::HISTORY_PAGE_SIZE;
use log::warn;

impl QuizApp {
    /// Pide la primera página del historial. Ignora la llamada si ya hay una en curso.
    pub fn cargar_historial(&mut self, ctx: &egui::Context) {
        if self.history.loading {
            return;
        }
        self.history.error.clear();

        let client = match self.api() {
            Ok(client) => client,
            Err(err) => {
                self.history.error = err.user_message(HISTORY_FALLBACK);
                return;
            }
        };

        self.history.loading = true;
        self.history.pending = Some(spawn_request(ctx, move || {
            client.get_history(HISTORY_PAGE_SIZE, 0)
        }));
    }

    /// Primera visita a la pestaña: carga automática.
    pub fn asegurar_historial(&mut self, ctx: &egui::Context) {
        if !self.history.loaded_once && !self.history.loading {
            self.cargar_historial(ctx);
        }
    }

    pub(crate) fn poll_history(&mut self) {
        let view = &mut self.history;
        match poll(&mut view.pending) {
            Poll::Pending => {}
            Poll::Ready(Ok(quizzes)) => {
                view.loading = false;
                view.loaded_once = true;
                view.quizzes = quizzes;
            }
            Poll::Ready(Err(err)) => {
                warn!("fallo al cargar historial: {err}");
                view.loading = false;
                view.loaded_once = true;
                view.error = err.user_message(HISTORY_FALLBACK);
            }
            Poll::Lost => {
                view.loading = false;
                view.loaded_once = true;
                view.error = HISTORY_FALLBACK.to_string();
            }
        }
    }

    /// La lista vacía no es un error: se muestra el estado vacío.
    pub fn historial_vacio(&self) -> bool {
        let view = &self.history;
        view.loaded_once && !view.loading && view.error.is_empty() && view.quizzes.is_empty()
    }

    /// Abre el modal con la entrada de la lista y la refresca desde `/quiz/{id}`.
    pub fn ver_detalles(&mut self, quiz: Quiz, ctx: &egui::Context) {
        let id = quiz.id;
        self.history.selected = Some(quiz);
        self.history.detail_error.clear();
        self.history.detail_loading = false;
        self.history.detail_pending = None;

        let Some(id) = id else {
            return;
        };
        let client = match self.api() {
            Ok(client) => client,
            Err(err) => {
                self.history.detail_error = err.user_message(HISTORY_FALLBACK);
                return;
            }
        };

        self.history.detail_loading = true;
        self.history.detail_pending =
            Some(spawn_request(ctx, move || (id, client.get_quiz(id))));
    }

    pub fn cerrar_detalles(&mut self) {
        let view = &mut self.history;
        view.selected = None;
        view.detail_loading = false;
        view.detail_error.clear();
        // el hilo en curso verá el canal cerrado y su resultado se perderá
        view.detail_pending = None;
    }

    pub(crate) fn poll_detail(&mut self) {
        let view = &mut self.history;
        match poll(&mut view.detail_pending) {
            Poll::Pending => {}
            Poll::Ready((id, result)) => {
                view.detail_loading = false;
                let still_selected = view.selected.as_ref().and_then(|q| q.id) == Some(id);
                match result {
                    Ok(quiz) if still_selected => view.selected = Some(quiz),
                    Ok(_) => {}
                    Err(err) => {
                        warn!("fallo al cargar el cuestionario {id}: {err}");
                        view.detail_error = err.user_message("No se pudo actualizar el detalle.");
                    }
                }
            }
            Poll::Lost => view.detail_loading = false,
        }
    }
}
