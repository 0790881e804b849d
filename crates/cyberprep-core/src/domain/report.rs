use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;

/// A visitor's report that an existing question is wrong or outdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportedQuestion {
    /// The reported question as the client displayed it.
    pub question: Value,
    pub reason: String,
    pub description: String,
}

impl ReportedQuestion {
    /// Validate a raw JSON payload.
    ///
    /// `question` must be a JSON object or array, `reason` a string that is
    /// not blank. Both `reason` and `description` are stored trimmed, and a
    /// missing or non-string description becomes `""`.
    pub fn from_payload(payload: &Value) -> Result<Self, DomainError> {
        let body = payload
            .as_object()
            .ok_or_else(|| DomainError::invalid("payload is not an object"))?;

        let reason = body
            .get("reason")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| DomainError::invalid("`reason` must be a non-empty string"))?;

        let question = body
            .get("question")
            .filter(|q| q.is_object() || q.is_array())
            .ok_or_else(|| DomainError::invalid("`question` must be an object"))?;

        let description = body
            .get("description")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default();

        Ok(Self {
            question: question.clone(),
            reason: reason.to_owned(),
            description: description.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trims_reason_and_defaults_description() {
        let report = ReportedQuestion::from_payload(&json!({
            "question": { "category": "web" },
            "reason": "  incorrect  "
        }))
        .unwrap();

        assert_eq!(report.reason, "incorrect");
        assert_eq!(report.description, "");
        assert_eq!(report.question, json!({ "category": "web" }));
    }

    #[test]
    fn keeps_trimmed_description() {
        let report = ReportedQuestion::from_payload(&json!({
            "question": { "category": "crypto" },
            "reason": "outdated",
            "description": "\tMD5 is no longer recommended\n"
        }))
        .unwrap();

        assert_eq!(report.description, "MD5 is no longer recommended");
    }

    #[test]
    fn ignores_non_string_description() {
        let report = ReportedQuestion::from_payload(&json!({
            "question": {},
            "reason": "duplicate",
            "description": 42
        }))
        .unwrap();

        assert_eq!(report.description, "");
    }

    #[test]
    fn rejects_blank_reason() {
        for reason in [json!("   "), json!(""), json!(null), json!(7)] {
            let payload = json!({ "question": {}, "reason": reason });
            assert!(ReportedQuestion::from_payload(&payload).is_err());
        }
    }

    #[test]
    fn rejects_scalar_or_null_question() {
        for question in [json!(null), json!("web"), json!(1)] {
            let payload = json!({ "question": question, "reason": "other" });
            assert!(ReportedQuestion::from_payload(&payload).is_err());
        }
    }
}
