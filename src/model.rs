use serde::{Deserialize, Deserializer, Serialize};

/// Cuestionario canónico, tal y como lo consumen todas las vistas.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Quiz {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_generated: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_entities: KeyEntities,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub sections: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub related_topics: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quiz: Vec<Question>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct KeyEntities {
    #[serde(default, deserialize_with = "lenient_strings")]
    pub people: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub organizations: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub locations: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Question {
    #[serde(default, deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub options: Vec<String>,
    // None = el backend no dio un índice utilizable
    #[serde(default, deserialize_with = "lenient_index")]
    pub correct_answer: Option<usize>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub explanation: String,
    #[serde(default = "default_difficulty", deserialize_with = "difficulty_or_default")]
    pub difficulty: String,
}

impl Question {
    /// `true` si la opción `opt` es la respuesta correcta.
    pub fn is_correct(&self, opt: usize) -> bool {
        self.correct_answer == Some(opt)
    }

    /// Un índice correcto fuera de rango nunca puede acertarse.
    pub fn has_reachable_answer(&self) -> bool {
        self.correct_answer
            .map(|i| i < self.options.len())
            .unwrap_or(false)
    }
}

impl KeyEntities {
    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.organizations.is_empty() && self.locations.is_empty()
    }
}

/// Pestaña activa de la ventana principal
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Generate,
    History,
}

pub const DEFAULT_DIFFICULTY: &str = "medium";

pub fn default_difficulty() -> String {
    DEFAULT_DIFFICULTY.to_string()
}

/// `null` del backend se lee como el valor por defecto del tipo.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn difficulty_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(default_difficulty))
}

/// Acepta cualquier valor JSON: sólo un entero no negativo es un índice.
pub fn lenient_index<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(index_from_value))
}

pub(crate) fn index_from_value(value: &serde_json::Value) -> Option<usize> {
    if let Some(i) = value.as_u64() {
        return usize::try_from(i).ok();
    }
    // 1.0 vale como 1; 1.5 o -1.0 no
    value
        .as_f64()
        .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= usize::MAX as f64)
        .map(|f| f as usize)
}

/// Lista de textos tolerante: números y booleanos se muestran como texto,
/// el resto de elementos se descarta. Algo que no es lista queda vacío.
pub fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_strings_opt(deserializer)?.unwrap_or_default())
}

/// Como [`lenient_strings`], pero distingue "ausente o null" (`None`) de una lista presente.
pub fn lenient_strings_opt<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        serde_json::Value::Array(items) => Some(items.iter().filter_map(text_from_value).collect()),
        _ => None,
    }))
}

pub(crate) fn text_from_value(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
