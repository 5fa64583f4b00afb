//! 类型模块：请求、响应与头部的核心数据类型。
//!
//! # Types Module
//!
//! Strongly-typed building blocks shared by the client and the transport layer.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Method`] | The five HTTP verbs the client issues |
//! | [`HeaderSet`] | Ordered, case-insensitive header collection |
//! | [`RequestOptions`] | Per-call query, headers, body and transport options |
//! | [`RequestBody`] | JSON XOR form fields XOR multipart upload |
//! | [`ApiResponse`] | Decoded JSON or raw text, tagged with the status code |
//!
//! ## Example
//!
//! ```rust
//! use rest_api_tool::types::RequestOptions;
//! use std::time::Duration;
//!
//! let options = RequestOptions::new()
//!     .query("op", "LISTSTATUS")
//!     .header("X-Trace", "abc")
//!     .timeout(Duration::from_secs(5));
//! assert_eq!(options.headers.get("x-trace"), Some("abc"));
//! ```

pub mod headers;
pub mod request;
pub mod response;

pub use headers::HeaderSet;
pub use request::{
    FileAttachment, FormFields, Method, MultipartBody, RequestBody, RequestOptions,
    TransportOptions,
};
pub use response::{ApiResponse, ResponseBody};
