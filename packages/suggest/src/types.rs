//! Wire types for the completion service

use scratchpad_document::Language;
use serde::{Deserialize, Serialize};

/// Request sent to the completion service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    /// Full source of the buffer being edited
    pub code: String,

    /// Buffer language
    pub language: Language,

    /// Character offset of the cursor within `code`
    pub cursor_position: usize,
}

/// Response from the completion service. A missing or empty list is valid
/// and means "nothing to suggest".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// A candidate snippet proposed for insertion at the cursor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case_wire_names() {
        let request = CompletionRequest {
            code: "<div>".to_string(),
            language: Language::Html,
            cursor_position: 5,
        };

        let encoded = serde_json::to_value(&request).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({
                "code": "<div>",
                "language": "html",
                "cursorPosition": 5,
            })
        );
    }

    #[test]
    fn test_response_tolerates_missing_list() {
        let decoded: CompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(decoded.suggestions.is_empty());
    }

    #[test]
    fn test_response_preserves_order() {
        let decoded: CompletionResponse =
            serde_json::from_str(r#"{"suggestions": ["b", "a", "c"]}"#).unwrap();
        assert_eq!(decoded.suggestions, vec!["b", "a", "c"]);
    }
}
