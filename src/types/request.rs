//! Request-side types: verb, body shapes and per-call options.

use super::headers::HeaderSet;
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;

/// Plain `name=value` pairs, used for query strings and form bodies.
pub type FormFields = Vec<(String, String)>;

/// HTTP verbs issued by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            other => Err(format!("unsupported HTTP method: {}", other)),
        }
    }
}

/// A file read into memory for a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub field_name: String,
    pub file_name: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBody {
    pub file: FileAttachment,
    pub fields: FormFields,
}

/// Request payload. The variants are mutually exclusive.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Form(FormFields),
    Multipart(MultipartBody),
}

impl RequestBody {
    /// One-line rendering for debug logs.
    pub fn preview(&self) -> String {
        match self {
            RequestBody::Json(value) => value.to_string(),
            RequestBody::Form(fields) => format_pairs(fields),
            RequestBody::Multipart(body) => format!(
                "{} + {}={} ({} bytes, {})",
                format_pairs(&body.fields),
                body.file.field_name,
                body.file.file_name,
                body.file.content.len(),
                body.file.content_type
            ),
        }
    }
}

fn format_pairs(pairs: &[(String, String)]) -> String {
    let joined = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");
    format!("{{{}}}", joined)
}

/// Transport parameters passed through to the HTTP layer untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOptions {
    /// Total time allowed for this request. `None` leaves the client-wide setting in effect.
    pub timeout: Option<Duration>,
}

/// Per-call request parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub query: FormFields,
    /// Merged on top of the computed default headers.
    pub headers: HeaderSet,
    pub body: Option<RequestBody>,
    pub transport: TransportOptions,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn queries<K, V, I>(mut self, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn headers(mut self, headers: &HeaderSet) -> Self {
        self.headers.merge(headers);
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn form(mut self, fields: FormFields) -> Self {
        self.body = Some(RequestBody::Form(fields));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_parse_is_case_insensitive() {
        assert_eq!("get".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("Patch".parse::<Method>().unwrap(), Method::Patch);
        assert!("TRACE".parse::<Method>().is_err());
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_options_body_is_exclusive() {
        let options = RequestOptions::new()
            .json(json!({"a": 1}))
            .form(vec![("k".into(), "v".into())]);
        assert_eq!(
            options.body,
            Some(RequestBody::Form(vec![("k".into(), "v".into())]))
        );
    }

    #[test]
    fn test_preview_formats() {
        assert_eq!(RequestBody::Json(json!({"a": 1})).preview(), r#"{"a":1}"#);
        assert_eq!(
            RequestBody::Form(vec![("a".into(), "1".into()), ("b".into(), "2".into())]).preview(),
            "{a=1&b=2}"
        );

        let multipart = RequestBody::Multipart(MultipartBody {
            file: FileAttachment {
                field_name: "file".into(),
                file_name: "report.csv".into(),
                content_type: "text/csv".into(),
                content: b"a,b\n".to_vec(),
            },
            fields: vec![("kind".into(), "daily".into())],
        });
        assert_eq!(
            multipart.preview(),
            "{kind=daily} + file=report.csv (4 bytes, text/csv)"
        );
    }

    #[test]
    fn test_queries_extend() {
        let options = RequestOptions::new()
            .query("op", "OPEN")
            .queries([("user.name", "hadoop"), ("offset", "0")]);
        assert_eq!(options.query.len(), 3);
        assert_eq!(options.query[1], ("user.name".to_string(), "hadoop".to_string()));
    }
}
