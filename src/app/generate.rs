use super::tasks::{Poll, poll, spawn_request};
use super::*;
use log::{info, warn};

impl QuizApp {
    /// Envía la URL al backend. Limpia quiz, error y examen antes de empezar.
    pub fn generar_quiz(&mut self, ctx: &egui::Context) {
        if self.generate.loading {
            return;
        }

        let view = &mut self.generate;
        view.error.clear();
        view.quiz = None;
        view.session = TakeSession::new();

        let url = view.url_input.trim().to_string();
        if url.is_empty() {
            view.error = EMPTY_URL_MESSAGE.to_string();
            return;
        }

        let client = match self.api() {
            Ok(client) => client,
            Err(err) => {
                self.generate.error = err.user_message(GENERATE_FALLBACK);
                return;
            }
        };

        self.generate.loading = true;
        self.generate.pending = Some(spawn_request(ctx, move || client.generate_quiz(&url)));
    }

    pub(crate) fn poll_generate(&mut self) {
        let view = &mut self.generate;
        match poll(&mut view.pending) {
            Poll::Pending => {}
            Poll::Ready(Ok(quiz)) => {
                view.loading = false;
                view.session = TakeSession::new();
                view.quiz = Some(quiz);
            }
            Poll::Ready(Err(err)) => {
                warn!("fallo al generar: {err}");
                view.loading = false;
                view.error = err.user_message(GENERATE_FALLBACK);
            }
            Poll::Lost => {
                view.loading = false;
                view.error = GENERATE_FALLBACK.to_string();
            }
        }
    }

    pub fn iniciar_examen(&mut self) {
        let view = &mut self.generate;
        if let Some(quiz) = &view.quiz {
            view.session.start_take_mode(quiz.quiz.len());
        }
    }

    pub fn seleccionar_opcion(&mut self, q_index: usize, opt_index: usize) {
        self.generate.session.select_option(q_index, opt_index);
    }

    pub fn enviar_respuestas(&mut self) {
        let view = &mut self.generate;
        if let Some(quiz) = &view.quiz {
            if let Some(score) = view.session.submit(&quiz.quiz) {
                info!("examen enviado: {score}/{}", quiz.quiz.len());
            }
        }
    }

    pub fn reintentar_examen(&mut self) {
        self.generate.session.retry();
    }

    pub fn salir_examen(&mut self) {
        self.generate.session.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::wait_idle;
    use super::*;
    use crate::api::stub_server::{StubResponse, serve_once};
    use crate::session::TakePhase;
    use serde_json::json;

    fn app_for(base_url: &str) -> QuizApp {
        QuizApp::new(ApiConfig::new(base_url))
    }

    fn three_question_payload() -> serde_json::Value {
        json!({
            "title": "Alan Turing",
            "full_quiz_data": {
                "questions": [
                    { "question": "q1", "choices": ["a", "b", "c"], "answer": 1 },
                    { "question": "q2", "choices": ["a", "b", "c"], "answer": 0 },
                    { "question": "q3", "choices": ["a", "b", "c"], "answer": 2 }
                ]
            }
        })
    }

    #[test]
    fn empty_url_is_rejected_without_request() {
        let ctx = egui::Context::default();
        let mut app = QuizApp::default();
        app.generate.url_input = "   ".into();

        app.generar_quiz(&ctx);

        assert_eq!(app.generate.error, EMPTY_URL_MESSAGE);
        assert!(!app.generate.loading);
        assert!(app.generate.pending.is_none());
    }

    #[test]
    fn generated_quiz_can_be_taken_and_scored() {
        let (base, server) = serve_once(StubResponse::json(200, three_question_payload()));
        let ctx = egui::Context::default();
        let mut app = app_for(&base);
        app.generate.url_input = "https://en.wikipedia.org/wiki/Alan_Turing".into();

        app.generar_quiz(&ctx);
        assert!(app.generate.loading);
        wait_idle(&mut app);
        server.join().unwrap();

        assert!(app.generate.error.is_empty());
        assert_eq!(app.generate.session.phase(), TakePhase::Review);

        app.iniciar_examen();
        assert_eq!(app.generate.session.answers().len(), 3);
        app.seleccionar_opcion(0, 1);
        app.seleccionar_opcion(1, 1);
        app.seleccionar_opcion(2, 2);
        app.enviar_respuestas();
        assert_eq!(app.generate.session.score(), Some(2));

        // bloqueado tras enviar
        app.seleccionar_opcion(1, 0);
        assert_eq!(app.generate.session.answer(1), Some(1));

        app.reintentar_examen();
        assert_eq!(app.generate.session.answers(), &[None, None, None]);

        app.salir_examen();
        assert_eq!(app.generate.session.phase(), TakePhase::Review);
    }

    #[test]
    fn malformed_full_quiz_data_shows_error_and_no_quiz() {
        let (base, server) = serve_once(StubResponse::json(
            200,
            json!({ "title": "T", "full_quiz_data": "{broken" }),
        ));
        let ctx = egui::Context::default();
        let mut app = app_for(&base);
        app.generate.url_input = "https://en.wikipedia.org/wiki/X".into();

        app.generar_quiz(&ctx);
        wait_idle(&mut app);
        server.join().unwrap();

        assert!(app.generate.quiz.is_none());
        assert!(app.generate.error.starts_with(GENERATE_FALLBACK));
    }

    #[test]
    fn server_detail_becomes_banner() {
        let (base, server) = serve_once(StubResponse::json(
            500,
            json!({ "detail": "Quiz generation failed: quota" }),
        ));
        let ctx = egui::Context::default();
        let mut app = app_for(&base);
        app.generate.url_input = "https://en.wikipedia.org/wiki/X".into();

        app.generar_quiz(&ctx);
        wait_idle(&mut app);
        server.join().unwrap();

        assert_eq!(app.generate.error, "Quiz generation failed: quota");
        assert!(app.generate.quiz.is_none());
    }

    #[test]
    fn new_generation_discards_previous_session() {
        let ctx = egui::Context::default();
        let mut app = QuizApp::default();
        app.generate.quiz = Some(Quiz::default());
        app.iniciar_examen();
        app.generate.url_input.clear();

        app.generar_quiz(&ctx);

        assert!(app.generate.quiz.is_none());
        assert_eq!(app.generate.session, TakeSession::new());
    }

    #[test]
    fn take_mode_needs_a_quiz() {
        let mut app = QuizApp::default();
        app.iniciar_examen();
        assert_eq!(app.generate.session.phase(), TakePhase::Review);
    }
}
