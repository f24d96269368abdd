//! Korean phrase analysis: the data model, the lookup trait and decoding.
//!
//! The existing backend returns `{"analysis": "<json string>"}`, i.e. the
//! analysis object serialized a second time inside a string field. Decoding
//! accepts that shape as well as an inline object, so a backend that drops the
//! extra encoding keeps working.

use crate::mt::error::{MtError, MtResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Formality information for a phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formality {
    pub level: String,
    /// Other forms of the phrase at different formality levels, in display order
    pub alternatives: Vec<String>,
}

/// Structured breakdown of a Korean phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseAnalysis {
    pub phrase: String,
    pub pronunciation: String,
    pub origin: String,
    pub example: String,
    pub context: String,
    pub formality: Formality,
}

/// Generic trait for phrase analysis providers
#[async_trait]
pub trait PhraseLookup: Send + Sync {
    /// Analyze `phrase`. One request per call; no fallback on failure.
    async fn lookup_phrase(&self, phrase: &str) -> MtResult<PhraseAnalysis>;

    fn provider_name(&self) -> &str;
}

/// Decode the `analysis` field of a lookup response.
///
/// A string is decoded a second time; an object is decoded directly.
pub fn decode_analysis(value: Value) -> MtResult<PhraseAnalysis> {
    match value {
        Value::String(encoded) => decode_analysis_str(&encoded),
        Value::Object(_) => serde_json::from_value(value)
            .map_err(|e| MtError::DecodeError(format!("Invalid phrase analysis: {}", e))),
        other => Err(MtError::DecodeError(format!(
            "Invalid phrase analysis: expected a string or an object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Decode an analysis serialized as text.
///
/// LLMs like to wrap JSON in a Markdown code fence, so one is stripped first.
pub fn decode_analysis_str(encoded: &str) -> MtResult<PhraseAnalysis> {
    serde_json::from_str(strip_code_fence(encoded))
        .map_err(|e| MtError::DecodeError(format!("Invalid phrase analysis: {}", e)))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.trim_end().trim_end_matches("```").trim()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
pub(crate) fn sample_analysis() -> PhraseAnalysis {
    PhraseAnalysis {
        phrase: "감사합니다".to_string(),
        pronunciation: "gam-sa-ham-ni-da".to_string(),
        origin: "Sino-Korean 감사 (感謝, gratitude) + 합니다".to_string(),
        example: "도와주셔서 감사합니다. (Thank you for helping me.)".to_string(),
        context: "Standard polite thanks used with strangers and elders.".to_string(),
        formality: Formality {
            level: "Formal polite".to_string(),
            alternatives: vec!["고마워요".to_string(), "고마워".to_string()],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_double_encoded_string() {
        let inner = serde_json::to_string(&sample_analysis()).unwrap();
        let analysis = decode_analysis(Value::String(inner)).unwrap();
        assert_eq!(analysis, sample_analysis());
    }

    #[test]
    fn test_decode_inline_object() {
        let value = serde_json::to_value(sample_analysis()).unwrap();
        assert_eq!(decode_analysis(value).unwrap(), sample_analysis());
    }

    #[test]
    fn test_decode_rejects_malformed_inner_json() {
        let result = decode_analysis(Value::String("{\"phrase\": ".to_string()));
        match result {
            Err(MtError::DecodeError(msg)) => assert!(msg.contains("Invalid phrase analysis")),
            other => panic!("Expected DecodeError, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_missing_formality() {
        let value = json!({
            "phrase": "감사합니다",
            "pronunciation": "gam-sa-ham-ni-da",
            "origin": "Sino-Korean",
            "example": "...",
            "context": "..."
        });
        assert!(matches!(
            decode_analysis(value),
            Err(MtError::DecodeError(_))
        ));
    }

    #[test]
    fn test_decode_rejects_other_json_kinds() {
        match decode_analysis(json!(42)) {
            Err(MtError::DecodeError(msg)) => assert!(msg.contains("a number")),
            other => panic!("Expected DecodeError, got {:?}", other),
        }
        assert!(decode_analysis(Value::Null).is_err());
    }

    #[test]
    fn test_decode_str_strips_code_fence() {
        let inner = serde_json::to_string_pretty(&sample_analysis()).unwrap();
        let fenced = format!("```json\n{}\n```", inner);
        assert_eq!(decode_analysis_str(&fenced).unwrap(), sample_analysis());
    }

    #[test]
    fn test_alternatives_keep_order() {
        let analysis = decode_analysis_str(
            r#"{"phrase":"안녕","pronunciation":"an-nyeong","origin":"native","example":"안녕!","context":"friends",
                "formality":{"level":"Informal","alternatives":["안녕하세요","안녕하십니까"]}}"#,
        )
        .unwrap();
        assert_eq!(
            analysis.formality.alternatives,
            vec!["안녕하세요", "안녕하십니까"]
        );
    }
}
