use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;

/// Languages a proposal must be translated into.
const REQUIRED_LANGUAGES: [&str; 2] = ["en", "fr"];

/// A question proposed by a visitor for inclusion in the question bank.
///
/// The translations object is kept exactly as submitted; only the presence of
/// every required language is checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedQuestion {
    pub category: String,
    pub difficulty: String,
    pub frequency: String,
    pub translations: Value,
}

impl ProposedQuestion {
    /// Validate a raw JSON payload.
    ///
    /// `category`, `difficulty` and `frequency` must be strings, but empty
    /// strings are accepted. `translations.en` and `translations.fr` must be
    /// present and non-empty.
    pub fn from_payload(payload: &Value) -> Result<Self, DomainError> {
        let body = payload
            .as_object()
            .ok_or_else(|| DomainError::invalid("payload is not an object"))?;

        let text_field = |name: &str| -> Result<String, DomainError> {
            body.get(name)
                .and_then(Value::as_str)
                .map(str::to_owned)
                .ok_or_else(|| DomainError::invalid(format!("`{name}` must be a string")))
        };

        let category = text_field("category")?;
        let difficulty = text_field("difficulty")?;
        let frequency = text_field("frequency")?;

        let translations = body
            .get("translations")
            .filter(|t| is_truthy(t))
            .ok_or_else(|| DomainError::invalid("`translations` is missing"))?;

        for lang in REQUIRED_LANGUAGES {
            if !translations.get(lang).is_some_and(is_truthy) {
                return Err(DomainError::invalid(format!(
                    "`translations.{lang}` is missing"
                )));
            }
        }

        Ok(Self {
            category,
            difficulty,
            frequency,
            translations: translations.clone(),
        })
    }
}

/// Loose truthiness: `null`, `false`, `0` and `""` count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
