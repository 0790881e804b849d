//! Data Transfer Objects - request bodies accepted by the API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One language's version of a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationPair {
    pub question: String,
    pub answer: String,
}

/// The two languages every proposal must carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Translations {
    pub en: TranslationPair,
    pub fr: TranslationPair,
}

/// Body of `POST /api/propose-question`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposeQuestionRequest {
    pub category: String,
    pub difficulty: String,
    pub frequency: String,
    pub translations: Translations,
}

/// Body of `POST /api/report-question`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportQuestionRequest {
    /// The question being reported, as displayed to the user.
    pub question: Value,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
