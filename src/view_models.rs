// src/view_models.rs

use crate::model::{KeyEntities, Question, Quiz};
use crate::session::TakeSession;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

/// Cómo se pinta una opción de respuesta
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionTone {
    Selected, // elegida en modo examen
    Idle,     // no elegida en modo examen
    Correct,  // correcta en modo revisión
    Plain,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OptionRow {
    pub label: String,
    pub tone: OptionTone,
    pub show_check: bool,
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryRow {
    pub id_label: String,
    pub title: String,
    pub date: String,
    pub questions_label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EntityGroup<'a> {
    pub heading: &'static str,
    pub items: Vec<&'a str>,
}

pub fn option_row(
    session: &TakeSession,
    question: &Question,
    q_index: usize,
    opt_index: usize,
) -> OptionRow {
    let text = question
        .options
        .get(opt_index)
        .map(String::as_str)
        .unwrap_or_default();
    let is_correct = question.is_correct(opt_index);

    let tone = if session.in_take_mode() {
        if session.answer(q_index) == Some(opt_index) {
            OptionTone::Selected
        } else {
            OptionTone::Idle
        }
    } else if is_correct {
        OptionTone::Correct
    } else {
        OptionTone::Plain
    };

    OptionRow {
        label: format!("{}. {}", option_letter(opt_index), text),
        tone,
        show_check: session.reveals_correct() && is_correct,
        enabled: session.options_enabled(),
    }
}

/// A, B, C… y números a partir de la Z.
pub fn option_letter(index: usize) -> String {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'A' + i).to_string())
        .unwrap_or_else(|| (index + 1).to_string())
}

pub fn score_label(score: usize, total: usize) -> String {
    format!("{score} / {total} correctas")
}

impl HistoryRow {
    pub fn from_quiz(quiz: &Quiz) -> Self {
        Self {
            id_label: quiz
                .id
                .map(|id| format!("#{id}"))
                .unwrap_or_else(|| "—".to_string()),
            title: if quiz.title.is_empty() {
                "(sin título)".to_string()
            } else {
                quiz.title.clone()
            },
            date: format_date(&quiz.date_generated),
            questions_label: format!("{} preguntas", quiz.quiz.len()),
        }
    }
}

/// Grupos de entidades no vacíos; `limit` recorta cada grupo.
pub fn entity_groups(entities: &KeyEntities, limit: Option<usize>) -> Vec<EntityGroup<'_>> {
    [
        ("Personas", &entities.people),
        ("Organizaciones", &entities.organizations),
        ("Lugares", &entities.locations),
    ]
    .into_iter()
    .filter(|(_, items)| !items.is_empty())
    .map(|(heading, items)| EntityGroup {
        heading,
        items: items
            .iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(String::as_str)
            .collect(),
    })
    .collect()
}

pub fn wikipedia_link(topic: &str) -> String {
    let slug = topic.split_whitespace().collect::<Vec<_>>().join("_");
    format!("https://en.wikipedia.org/wiki/{}", urlencoding::encode(&slug))
}

/// El backend manda `str(datetime)` ("2025-03-01 10:00:00.123456", UTC sin zona)
/// o RFC 3339 cuando la fecha la pone el cliente.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.with_timezone(&Local).format("%d/%m/%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn format_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.with_timezone(&Local).format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_difficulty;
    use chrono::{Datelike, Timelike};

    fn question() -> Question {
        Question {
            question: "Capital?".into(),
            options: vec!["Paris".into(), "Rome".into()],
            correct_answer: Some(1),
            explanation: "Rome".into(),
            difficulty: default_difficulty(),
        }
    }

    #[test]
    fn review_mode_highlights_correct_option() {
        let session = TakeSession::new();
        let q = question();

        let wrong = option_row(&session, &q, 0, 0);
        let right = option_row(&session, &q, 0, 1);

        assert_eq!(wrong.tone, OptionTone::Plain);
        assert_eq!(right.tone, OptionTone::Correct);
        assert!(right.show_check);
        assert!(!right.enabled);
        assert_eq!(right.label, "B. Rome");
    }

    #[test]
    fn taking_mode_hides_correctness() {
        let mut session = TakeSession::new();
        session.start_take_mode(1);
        session.select_option(0, 0);
        let q = question();

        let chosen = option_row(&session, &q, 0, 0);
        let right = option_row(&session, &q, 0, 1);

        assert_eq!(chosen.tone, OptionTone::Selected);
        assert_eq!(right.tone, OptionTone::Idle);
        assert!(!right.show_check);
        assert!(chosen.enabled);
    }

    #[test]
    fn submitted_mode_reveals_check_but_locks_options() {
        let q = question();
        let mut session = TakeSession::new();
        session.start_take_mode(1);
        session.select_option(0, 0);
        session.submit(std::slice::from_ref(&q));

        let right = option_row(&session, &q, 0, 1);
        assert!(right.show_check);
        assert!(!right.enabled);
        assert_eq!(option_row(&session, &q, 0, 0).tone, OptionTone::Selected);
    }

    #[test]
    fn letters_then_numbers() {
        assert_eq!(option_letter(0), "A");
        assert_eq!(option_letter(25), "Z");
        assert_eq!(option_letter(26), "27");
    }

    #[test]
    fn backend_timestamps_parse() {
        let dt = parse_timestamp("2025-03-01 10:20:30.123456").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2025, 3, 1));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (10, 20, 30));

        assert!(parse_timestamp("2025-03-01T10:20:30Z").is_some());
        assert!(parse_timestamp("2025-03-01T10:20:30").is_some());
        assert!(parse_timestamp("2025-03-01").is_some());
    }

    #[test]
    fn unparseable_timestamp_is_shown_raw() {
        assert_eq!(format_timestamp("ayer"), "ayer");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn history_row_labels() {
        let quiz = Quiz {
            id: Some(12),
            title: String::new(),
            quiz: vec![question(), question()],
            ..Quiz::default()
        };
        let row = HistoryRow::from_quiz(&quiz);
        assert_eq!(row.id_label, "#12");
        assert_eq!(row.title, "(sin título)");
        assert_eq!(row.questions_label, "2 preguntas");
    }

    #[test]
    fn entity_groups_skip_empty_and_respect_limit() {
        let entities = KeyEntities {
            people: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            organizations: vec![],
            locations: vec!["London".into()],
        };
        let groups = entity_groups(&entities, Some(3));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].items, vec!["A", "B", "C"]);
        assert_eq!(groups[1].heading, "Lugares");

        assert_eq!(entity_groups(&entities, None)[0].items.len(), 4);
    }

    #[test]
    fn wikipedia_links_use_underscores() {
        assert_eq!(
            wikipedia_link("Turing machine"),
            "https://en.wikipedia.org/wiki/Turing_machine"
        );
        assert_eq!(
            wikipedia_link("Church–Turing thesis"),
            "https://en.wikipedia.org/wiki/Church%E2%80%93Turing_thesis"
        );
    }
}
