// src/session.rs

use crate::model::Question;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TakePhase {
    /// Recién generado: se ven las correctas, nada es seleccionable
    #[default]
    Review,
    Taking,
    Submitted { score: usize },
}

/// Estado de "hacer el cuestionario" para el quiz mostrado en la vista.
///
/// Todas las transiciones son totales: una llamada en un estado que no la
/// admite no cambia nada.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TakeSession {
    phase: TakePhase,
    answers: Vec<Option<usize>>,
}

impl TakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TakePhase {
        self.phase
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn answer(&self, q_index: usize) -> Option<usize> {
        self.answers.get(q_index).copied().flatten()
    }

    pub fn is_taking(&self) -> bool {
        matches!(self.phase, TakePhase::Taking)
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.phase, TakePhase::Submitted { .. })
    }

    /// Modo interactivo (Taking o Submitted)
    pub fn in_take_mode(&self) -> bool {
        !matches!(self.phase, TakePhase::Review)
    }

    pub fn score(&self) -> Option<usize> {
        match self.phase {
            TakePhase::Submitted { score } => Some(score),
            _ => None,
        }
    }

    pub fn options_enabled(&self) -> bool {
        self.is_taking()
    }

    pub fn reveals_correct(&self) -> bool {
        !self.is_taking()
    }

    pub fn shows_explanations(&self) -> bool {
        self.is_submitted()
    }

    /// Entra (o vuelve a entrar) en modo examen con todas las respuestas vacías.
    pub fn start_take_mode(&mut self, question_count: usize) {
        self.phase = TakePhase::Taking;
        self.answers = vec![None; question_count];
    }

    /// Una sola opción por pregunta; la última selección gana.
    pub fn select_option(&mut self, q_index: usize, opt_index: usize) {
        if !self.is_taking() {
            return;
        }
        if let Some(slot) = self.answers.get_mut(q_index) {
            *slot = Some(opt_index);
        }
    }

    /// Bloquea las respuestas y calcula la nota. Devuelve la nota si hubo transición.
    pub fn submit(&mut self, questions: &[Question]) -> Option<usize> {
        if !self.is_taking() {
            return None;
        }
        let score = score_answers(questions, &self.answers);
        self.phase = TakePhase::Submitted { score };
        Some(score)
    }

    pub fn retry(&mut self) {
        if !self.is_submitted() {
            return;
        }
        self.phase = TakePhase::Taking;
        self.answers.iter_mut().for_each(|a| *a = None);
    }

    pub fn exit(&mut self) {
        self.phase = TakePhase::Review;
        self.answers.clear();
    }
}

/// Número de preguntas cuya respuesta coincide exactamente con la correcta.
/// Sin responder nunca cuenta como acierto.
pub fn score_answers(questions: &[Question], answers: &[Option<usize>]) -> usize {
    questions
        .iter()
        .enumerate()
        .filter(|(i, q)| match (answers.get(*i).copied().flatten(), q.correct_answer) {
            (Some(chosen), Some(correct)) => chosen == correct,
            _ => false,
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_difficulty;

    fn question(correct: Option<usize>) -> Question {
        Question {
            question: "?".into(),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_answer: correct,
            explanation: String::new(),
            difficulty: default_difficulty(),
        }
    }

    fn three_questions() -> Vec<Question> {
        vec![question(Some(1)), question(Some(0)), question(Some(2))]
    }

    #[test]
    fn start_take_mode_sizes_answers_to_question_count() {
        let mut s = TakeSession::new();
        s.start_take_mode(3);
        assert_eq!(s.answers(), &[None, None, None]);
        assert!(s.is_taking());
        assert!(s.options_enabled());
        assert!(!s.reveals_correct());
    }

    #[test]
    fn scores_only_exact_matches() {
        let quiz = three_questions();
        let mut s = TakeSession::new();
        s.start_take_mode(quiz.len());
        s.select_option(0, 1);
        s.select_option(1, 1);
        s.select_option(2, 2);

        assert_eq!(s.submit(&quiz), Some(2));
        assert_eq!(s.score(), Some(2));
        assert!(s.shows_explanations());
        assert!(s.reveals_correct());
    }

    #[test]
    fn last_selection_wins() {
        let quiz = three_questions();
        let mut s = TakeSession::new();
        s.start_take_mode(quiz.len());
        s.select_option(0, 0);
        s.select_option(0, 1);
        assert_eq!(s.answer(0), Some(1));
    }

    #[test]
    fn unanswered_questions_never_count() {
        let quiz = vec![question(None), question(Some(0))];
        let mut s = TakeSession::new();
        s.start_take_mode(quiz.len());
        assert_eq!(s.submit(&quiz), Some(0));
    }

    #[test]
    fn scoring_is_repeatable() {
        let quiz = three_questions();
        let answers = vec![Some(1), None, Some(0)];
        assert_eq!(score_answers(&quiz, &answers), score_answers(&quiz, &answers));
        assert_eq!(score_answers(&quiz, &answers), 1);
    }

    #[test]
    fn select_is_ignored_outside_taking() {
        let quiz = three_questions();
        let mut s = TakeSession::new();
        s.select_option(0, 1);
        assert_eq!(s, TakeSession::new());

        s.start_take_mode(quiz.len());
        s.select_option(0, 1);
        s.submit(&quiz);
        let before = s.clone();
        s.select_option(1, 0);
        assert_eq!(s, before);
    }

    #[test]
    fn select_out_of_range_question_is_ignored() {
        let mut s = TakeSession::new();
        s.start_take_mode(1);
        s.select_option(5, 0);
        assert_eq!(s.answers(), &[None]);
    }

    #[test]
    fn submit_outside_taking_does_nothing() {
        let quiz = three_questions();
        let mut s = TakeSession::new();
        assert_eq!(s.submit(&quiz), None);
        assert_eq!(s.phase(), TakePhase::Review);

        s.start_take_mode(quiz.len());
        s.submit(&quiz);
        assert_eq!(s.submit(&quiz), None);
    }

    #[test]
    fn retry_clears_answers_and_score() {
        let quiz = three_questions();
        let mut s = TakeSession::new();
        s.start_take_mode(quiz.len());
        s.select_option(0, 1);
        s.submit(&quiz);
        s.retry();

        assert!(s.is_taking());
        assert_eq!(s.score(), None);
        assert_eq!(s.answers(), &[None, None, None]);
    }

    #[test]
    fn exit_returns_to_review_from_any_phase() {
        let quiz = three_questions();
        let mut s = TakeSession::new();
        s.start_take_mode(quiz.len());
        s.select_option(2, 2);
        s.exit();
        assert_eq!(s, TakeSession::new());

        s.start_take_mode(quiz.len());
        s.submit(&quiz);
        s.exit();
        assert_eq!(s.phase(), TakePhase::Review);
        assert!(s.answers().is_empty());
    }

    #[test]
    fn retry_is_ignored_before_submit() {
        let mut s = TakeSession::new();
        s.start_take_mode(2);
        s.select_option(0, 1);
        s.retry();
        assert_eq!(s.answer(0), Some(1));
    }
}
