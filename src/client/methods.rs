//! Verb-specific wrappers over `execute` + `classify_response`.
//!
//! Each wrapper fixes the verb and the body shape; everything else in
//! `options` (query, headers, transport options) is forwarded unchanged.

use super::core::RestClient;
use crate::types::{ApiResponse, FormFields, Method, RequestBody, RequestOptions};
use crate::Result;
use serde_json::Value;

impl RestClient {
    /// `GET`; any body set on `options` is dropped.
    pub fn get(&self, endpoint: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.dispatch(Method::Get, endpoint, without_body(options))
    }

    /// `POST` with an optional JSON body.
    pub fn post(&self, endpoint: &str, body: Option<Value>, options: RequestOptions) -> Result<ApiResponse> {
        self.dispatch(Method::Post, endpoint, with_json(options, body))
    }

    /// `POST` with `application/x-www-form-urlencoded` fields.
    pub fn post_form(&self, endpoint: &str, fields: FormFields, options: RequestOptions) -> Result<ApiResponse> {
        let options = RequestOptions {
            body: Some(RequestBody::Form(fields)),
            ..options
        };
        self.dispatch(Method::Post, endpoint, options)
    }

    pub fn put(&self, endpoint: &str, body: Option<Value>, options: RequestOptions) -> Result<ApiResponse> {
        self.dispatch(Method::Put, endpoint, with_json(options, body))
    }

    pub fn patch(&self, endpoint: &str, body: Option<Value>, options: RequestOptions) -> Result<ApiResponse> {
        self.dispatch(Method::Patch, endpoint, with_json(options, body))
    }

    pub fn delete(&self, endpoint: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.dispatch(Method::Delete, endpoint, without_body(options))
    }
}

fn with_json(options: RequestOptions, body: Option<Value>) -> RequestOptions {
    RequestOptions {
        body: body.map(RequestBody::Json),
        ..options
    }
}

fn without_body(options: RequestOptions) -> RequestOptions {
    RequestOptions {
        body: None,
        ..options
    }
}
