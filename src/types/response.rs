//! Response-side types.

use serde_json::Value;

/// Body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The body parsed as JSON.
    Json(Value),
    /// The body was not valid JSON; raw text is kept as-is.
    Text(String),
}

/// A classified successful response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn is_json(&self) -> bool {
        matches!(self.body, ResponseBody::Json(_))
    }

    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Text(text) => Some(text),
            ResponseBody::Json(_) => None,
        }
    }

    /// Collapse into a JSON value; raw text becomes a JSON string.
    pub fn into_value(self) -> Value {
        match self.body {
            ResponseBody::Json(value) => value,
            ResponseBody::Text(text) => Value::String(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accessors() {
        let json_resp = ApiResponse {
            status: 200,
            body: ResponseBody::Json(json!({"id": 1})),
        };
        assert!(json_resp.is_json());
        assert_eq!(json_resp.json(), Some(&json!({"id": 1})));
        assert_eq!(json_resp.text(), None);

        let text_resp = ApiResponse {
            status: 204,
            body: ResponseBody::Text(String::new()),
        };
        assert!(!text_resp.is_json());
        assert_eq!(text_resp.text(), Some(""));
        assert_eq!(text_resp.into_value(), Value::String(String::new()));
    }
}
