// src/api/mod.rs
//
// Cliente HTTP del backend de cuestionarios. Las llamadas son bloqueantes:
// la app las lanza en un hilo aparte (ver app/tasks.rs).

#[cfg(test)]
pub(crate) mod stub_server;

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::model::Quiz;
use crate::normalize::normalize;
use log::{info, warn};
use reqwest::blocking::{Client, Response};
use reqwest::header::USER_AGENT;
use serde::Serialize;
use serde_json::Value;

pub const HISTORY_PAGE_SIZE: u32 = 50;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    url: &'a str,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// `POST /generate_quiz` con `{ url }`; la respuesta se normaliza.
    pub fn generate_quiz(&self, url: &str) -> Result<Quiz> {
        info!("generando cuestionario para {url}");
        let response = self
            .client
            .post(self.config.endpoint("generate_quiz"))
            .header(USER_AGENT, user_agent())
            .json(&GenerateRequest { url })
            .send()?;

        let quiz = normalize(read_json(response)?)?;
        info!(
            "cuestionario '{}' recibido con {} preguntas",
            quiz.title,
            quiz.quiz.len()
        );
        Ok(quiz)
    }

    /// `GET /history?limit&offset`
    pub fn get_history(&self, limit: u32, offset: u32) -> Result<Vec<Quiz>> {
        let response = self
            .client
            .get(self.config.endpoint("history"))
            .header(USER_AGENT, user_agent())
            .query(&[("limit", limit), ("offset", offset)])
            .send()?;

        let Value::Array(items) = read_json(response)? else {
            return Err(ApiError::UnexpectedBody("el historial no es una lista"));
        };

        // Un cuestionario guardado ilegible no debe vaciar la página entera
        let quizzes: Vec<Quiz> = items
            .into_iter()
            .enumerate()
            .filter_map(|(i, item)| match normalize(item) {
                Ok(quiz) => Some(quiz),
                Err(e) => {
                    warn!("historial: se omite el elemento {i}: {e}");
                    None
                }
            })
            .collect();
        info!("historial: {} cuestionarios", quizzes.len());
        Ok(quizzes)
    }

    /// `GET /quiz/{id}`
    pub fn get_quiz(&self, id: i64) -> Result<Quiz> {
        let response = self
            .client
            .get(self.config.endpoint(&format!("quiz/{id}")))
            .header(USER_AGENT, user_agent())
            .send()?;

        Ok(normalize(read_json(response)?)?)
    }
}

fn user_agent() -> String {
    format!("WikiQuiz/{}", env!("CARGO_PKG_VERSION"))
}

/// Comprueba el estado HTTP y parsea el cuerpo como JSON.
fn read_json(response: Response) -> Result<Value> {
    let status = response.status();
    let url = response.url().to_string();
    let body = response.text()?;

    if !status.is_success() {
        let detail = detail_from_body(&body);
        warn!("{url} devolvió HTTP {status}: {}", detail.as_deref().unwrap_or("sin detalle"));
        return Err(ApiError::Status {
            status: status.as_u16(),
            detail,
        });
    }

    serde_json::from_str(&body).map_err(ApiError::InvalidJson)
}

/// Los errores del backend llegan como `{ "detail": "..." }`.
fn detail_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
