//! # rest-api-tool
//!
//! 通用 REST API 客户端：统一的头部组合、请求执行、响应分类与错误归一化。
//!
//! A blocking REST client façade. It takes a base address, an endpoint and a
//! request intent (verb, payload, headers, bearer token), and returns either
//! parsed response data or a classified error, logging each request and
//! response along the way.
//!
//! ## Overview
//!
//! - **One pipeline**: every call goes through [`RestClient::execute`] and
//!   [`RestClient::classify_response`]; `get`/`post`/`put`/... only pick the
//!   verb and the body shape.
//! - **Predictable headers**: `Accept: application/json` by default,
//!   `Authorization: Bearer <token>` iff a credential is set, caller headers win.
//! - **Classified errors**: [`ApiError`] with an [`ErrorKind`] discriminant
//!   (transport, status, classification, local I/O, configuration).
//! - **Per-client diagnostics**: console at INFO, optional file at DEBUG with
//!   request headers (credentials redacted) and truncated bodies.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rest_api_tool::{RequestOptions, RestClient};
//! use serde_json::json;
//!
//! fn main() -> rest_api_tool::Result<()> {
//!     let mut client = RestClient::builder("https://jsonplaceholder.typicode.com")
//!         .log_file("logs/api.log")
//!         .build()?;
//!
//!     let users = client.get("/users", RequestOptions::new())?;
//!     println!("{:?}", users.json());
//!
//!     client.set_credential("new-token");
//!     let created = client.post(
//!         "/posts",
//!         Some(json!({"title": "hello", "userId": 1})),
//!         RequestOptions::new(),
//!     )?;
//!     println!("{}", created.status);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | `RestClient`, its builder and the request pipeline |
//! | [`config`] | Client, logging and transport configuration |
//! | [`diagnostics`] | Per-client tracing sinks |
//! | [`transport`] | `Transport` trait and the reqwest implementation |
//! | [`types`] | Requests, responses and headers |

pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{RestClient, RestClientBuilder, DEFAULT_FILE_FIELD};
pub use config::{ClientConfig, LogConfig, TransportSettings};
pub use error::{ApiError, ErrorKind};
pub use transport::{HttpTransport, OutboundRequest, RawResponse, Transport, TransportError};
pub use types::{
    ApiResponse, FormFields, HeaderSet, Method, RequestBody, RequestOptions, ResponseBody,
    TransportOptions,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, ApiError>;
