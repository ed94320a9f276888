use crate::api::ApiClient;
use crate::config::ApiConfig;
use crate::error::Result;
use crate::model::{AppState, Quiz};
use crate::session::TakeSession;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Receiver;

// Submódulos
pub mod generate;
pub mod history;
pub mod tasks;

pub const GENERATE_FALLBACK: &str = "No se pudo generar el cuestionario. Inténtalo de nuevo.";
pub const HISTORY_FALLBACK: &str = "No se pudo cargar el historial. Inténtalo de nuevo.";
pub const EMPTY_URL_MESSAGE: &str = "Introduce una URL de Wikipedia válida";

/// Estado de la pestaña "Generar". Sólo la URL sobrevive entre sesiones.
#[derive(Serialize, Deserialize, Default)]
pub struct GenerateView {
    pub url_input: String,
    #[serde(skip)]
    pub loading: bool,
    #[serde(skip)]
    pub error: String,
    #[serde(skip)]
    pub quiz: Option<Quiz>,
    #[serde(skip)]
    pub session: TakeSession,
    #[serde(skip)]
    pub(crate) pending: Option<Receiver<Result<Quiz>>>,
}

/// Estado de la pestaña "Historial" y del modal de detalle.
#[derive(Default)]
pub struct HistoryView {
    pub quizzes: Vec<Quiz>,
    pub loading: bool,
    pub error: String,
    pub loaded_once: bool,
    pub selected: Option<Quiz>,
    pub detail_loading: bool,
    pub detail_error: String,
    pub(crate) pending: Option<Receiver<Result<Vec<Quiz>>>>,
    pub(crate) detail_pending: Option<Receiver<(i64, Result<Quiz>)>>,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QuizApp {
    pub state: AppState,
    pub generate: GenerateView,
    #[serde(skip)]
    pub history: HistoryView,
    #[serde(skip)]
    pub config: ApiConfig,
    #[serde(skip)]
    client: Option<ApiClient>,
}

impl QuizApp {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Recupera pestaña y URL guardadas por eframe; la config siempre viene del entorno.
    pub fn restore(cc: &eframe::CreationContext<'_>, config: ApiConfig) -> Self {
        let mut app: QuizApp = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        app.config = config;
        app
    }

    /// Cliente compartido; se construye la primera vez que hace falta.
    pub(crate) fn api(&mut self) -> Result<ApiClient> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }
        let client = ApiClient::new(self.config.clone())?;
        self.client = Some(client.clone());
        Ok(client)
    }

    pub fn cambiar_pestana(&mut self, state: AppState) {
        self.state = state;
    }

    /// Recoge los resultados de red que hayan llegado desde el último frame.
    pub fn poll_pending(&mut self) {
        self.poll_generate();
        self.poll_history();
        self.poll_detail();
    }

    pub fn is_busy(&self) -> bool {
        self.generate.loading || self.history.loading || self.history.detail_loading
    }
}
