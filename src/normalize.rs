// src/normalize.rs
//
// El backend puede devolver dos formas de cuestionario:
//   1) compacta: el objeto ya trae `quiz` con preguntas canónicas
//   2) completa: trae `full_quiz_data` (string JSON u objeto) con `questions`
//      usando `choices` / `answer` / `explain`
// Aquí se detecta la forma explícitamente y se convierte a `Quiz`.

use crate::error::NormalizeError;
use crate::model::{
    KeyEntities, Question, Quiz, default_difficulty, index_from_value, lenient_strings_opt,
    null_as_default,
};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

/// Forma detectada de una respuesta del backend.
#[derive(Debug)]
pub enum RawPayload {
    Compact(Quiz),
    Full(Box<FullEnvelope>),
}

/// Campos de primer nivel que acompañan a `full_quiz_data`.
#[derive(Deserialize, Debug, Default)]
pub struct FullEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date_generated: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub key_entities: Option<KeyEntities>,
    #[serde(default, deserialize_with = "lenient_strings_opt")]
    pub sections: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_strings_opt")]
    pub related_topics: Option<Vec<String>>,
    #[serde(default)]
    pub url: Option<String>,
    pub full_quiz_data: FullQuizField,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum FullQuizField {
    Encoded(String),
    Parsed(FullQuizData),
}

impl Default for FullQuizField {
    fn default() -> Self {
        FullQuizField::Parsed(FullQuizData::default())
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct FullQuizData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub key_entities: Option<KeyEntities>,
    #[serde(default, deserialize_with = "lenient_strings_opt")]
    pub sections: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_strings_opt")]
    pub related_topics: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions: Vec<RawQuestion>,
}

/// Pregunta con la nomenclatura de `full_quiz_data`.
#[derive(Deserialize, Debug, Default)]
pub struct RawQuestion {
    #[serde(default, deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(default, deserialize_with = "lenient_strings_opt")]
    pub choices: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_strings_opt")]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub answer: Option<Value>,
    #[serde(default)]
    pub correct_answer: Option<Value>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub explain: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

impl RawPayload {
    /// Detecta la forma de la respuesta sin convertirla todavía.
    pub fn detect(mut value: Value) -> Result<Self, NormalizeError> {
        let Some(fields) = value.as_object_mut() else {
            return Err(NormalizeError::UnrecognizedPayload);
        };

        if carries_full_quiz_data(fields.get("full_quiz_data")) {
            debug!("respuesta con full_quiz_data");
            // Un valor verdadero que no es texto ni objeto no trae preguntas
            if let Some(data) = fields.get_mut("full_quiz_data") {
                if !data.is_string() && !data.is_object() {
                    warn!("full_quiz_data inesperado ({data}), se lee como vacío");
                    *data = Value::Object(Default::default());
                }
            }
            let envelope: FullEnvelope =
                serde_json::from_value(value).map_err(NormalizeError::InvalidShape)?;
            Ok(RawPayload::Full(Box::new(envelope)))
        } else {
            debug!("respuesta compacta");
            let quiz: Quiz = serde_json::from_value(value).map_err(NormalizeError::InvalidShape)?;
            Ok(RawPayload::Compact(quiz))
        }
    }

    pub fn into_quiz(self) -> Result<Quiz, NormalizeError> {
        match self {
            RawPayload::Compact(quiz) => Ok(quiz),
            RawPayload::Full(envelope) => envelope.into_quiz(),
        }
    }
}

impl FullEnvelope {
    fn into_quiz(self) -> Result<Quiz, NormalizeError> {
        let full = match self.full_quiz_data {
            FullQuizField::Encoded(text) => serde_json::from_str::<FullQuizData>(&text)
                .map_err(NormalizeError::MalformedFullQuizData)?,
            FullQuizField::Parsed(data) => data,
        };

        let date_generated = non_empty(self.date_generated)
            .or_else(|| non_empty(self.date))
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());

        Ok(Quiz {
            id: self.id,
            title: non_empty(self.title)
                .or_else(|| non_empty(full.title))
                .unwrap_or_default(),
            date_generated,
            summary: non_empty(self.summary)
                .or_else(|| non_empty(full.summary))
                .unwrap_or_default(),
            key_entities: self.key_entities.or(full.key_entities).unwrap_or_default(),
            sections: self.sections.or(full.sections).unwrap_or_default(),
            related_topics: self
                .related_topics
                .or(full.related_topics)
                .unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            quiz: full.questions.into_iter().map(RawQuestion::into_question).collect(),
        })
    }
}

impl RawQuestion {
    pub fn into_question(self) -> Question {
        let correct = self.answer.or(self.correct_answer);
        Question {
            question: self.question,
            options: self.choices.or(self.options).unwrap_or_default(),
            correct_answer: correct.as_ref().and_then(index_from_value),
            explanation: non_empty(self.explanation)
                .or(self.explain)
                .unwrap_or_default(),
            difficulty: non_empty(self.difficulty).unwrap_or_else(default_difficulty),
        }
    }
}

/// Punto de entrada: cualquier respuesta del backend -> `Quiz` canónico.
pub fn normalize(value: Value) -> Result<Quiz, NormalizeError> {
    let quiz = RawPayload::detect(value)?.into_quiz()?;
    for (i, q) in quiz.quiz.iter().enumerate() {
        if !q.has_reachable_answer() {
            warn!(
                "pregunta {} de '{}' sin respuesta correcta válida ({:?} de {} opciones)",
                i + 1,
                quiz.title,
                q.correct_answer,
                q.options.len()
            );
        }
    }
    Ok(quiz)
}

/// Misma veracidad que el cliente web: null, "", false y 0 cuentan como ausentes.
fn carries_full_quiz_data(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
