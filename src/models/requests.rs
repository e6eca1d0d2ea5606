//! Request DTOs for the reply cache API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Maximum accepted query length in characters.
const MAX_QUERY_LENGTH: usize = 2000;

/// Request body for the query operation (POST /query)
///
/// # Fields
/// - `text`: Free-form user question
/// - `context`: Optional discriminator (e.g. a detected intent tag) mixed
///   into the cache fingerprint
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    /// The user question
    pub text: String,
    /// Optional context tag scoping the cache key
    #[serde(default)]
    pub context: Option<String>,
}

impl QueryRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.text.trim().is_empty() {
            return Some("Query text cannot be empty".to_string());
        }
        if self.text.len() > MAX_QUERY_LENGTH {
            return Some(format!(
                "Query exceeds maximum length of {} characters",
                MAX_QUERY_LENGTH
            ));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_request_deserialize() {
        let json = r#"{"text": "what time is check-in"}"#;
        let req: QueryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.text, "what time is check-in");
        assert!(req.context.is_none());
    }

    #[test]
    fn test_query_request_with_context() {
        let json = r#"{"text": "how much", "context": "prices"}"#;
        let req: QueryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.context.as_deref(), Some("prices"));
    }

    #[test]
    fn test_validate_empty_text() {
        let req = QueryRequest {
            text: "   ".to_string(),
            context: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_too_long() {
        let req = QueryRequest {
            text: "x".repeat(MAX_QUERY_LENGTH + 1),
            context: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_valid_request() {
        let req = QueryRequest {
            text: "is there parking".to_string(),
            context: Some("facilities".to_string()),
        };
        assert!(req.validate().is_none());
    }
}
