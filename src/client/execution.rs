//! 请求执行逻辑：URL 组合、传输调用、响应分类。
//!
//! Request execution pipeline (single attempt, no retries).

use super::core::RestClient;
use super::LOG_BODY_LIMIT;
use crate::config::join_url;
use crate::diagnostics::preview_for_log;
use crate::error::error_chain;
use crate::transport::{OutboundRequest, RawResponse, TransportError};
use crate::types::{ApiResponse, Method, RequestOptions, ResponseBody};
use crate::{ApiError, Result};
use tracing::{debug, error, info};

impl RestClient {
    /// Send one request and return the raw response.
    ///
    /// Any status code counts as success here; use
    /// [`classify_response`](Self::classify_response) to turn non-2xx
    /// responses into errors. Transport failures come back as
    /// [`ErrorKind::Transport`](crate::ErrorKind::Transport), body read
    /// failures as [`ErrorKind::Classification`](crate::ErrorKind::Classification).
    pub fn execute(
        &self,
        method: Method,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<RawResponse> {
        self.diagnostics
            .in_scope(|| self.execute_in_scope(method, endpoint, options))
    }

    fn execute_in_scope(
        &self,
        method: Method,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<RawResponse> {
        let url = join_url(self.config.base_url(), endpoint);
        let headers = self.build_headers(Some(&options.headers));
        let body_preview = options.body.as_ref().map(|body| body.preview());
        let logged_headers = headers.redacted();

        info!("Sending {} request to {}", method, url);
        if !options.query.is_empty() {
            debug!("Query parameters: {:?}", options.query);
        }

        let request = OutboundRequest {
            method,
            url,
            query: options.query,
            headers,
            body: options.body,
            options: options.transport,
        };

        let response = match self.transport.send(request) {
            Ok(response) => response,
            Err(TransportError::Body(message)) => {
                error!("Failed to read response body: {}", message);
                return Err(ApiError::classification(message));
            }
            Err(e) => {
                let message = match &e {
                    TransportError::Http(inner) => error_chain(inner),
                    TransportError::Other(message) => message.clone(),
                    other => other.to_string(),
                };
                error!("Request failed: {}", message);
                return Err(ApiError::transport(message));
            }
        };

        info!("Received response: {}", response.status);
        debug!("Request headers: {}", logged_headers);
        if let Some(preview) = &body_preview {
            debug!("Request body: {}", preview_for_log(preview, LOG_BODY_LIMIT));
        }
        debug!(
            "Response body: {}",
            preview_for_log(&response.body, LOG_BODY_LIMIT)
        );

        Ok(response)
    }

    /// Turn a raw response into data or a status error.
    ///
    /// - 2xx with a JSON body: [`ResponseBody::Json`]
    /// - 2xx with anything else: [`ResponseBody::Text`] (not an error)
    /// - everything else: [`ErrorKind::Status`](crate::ErrorKind::Status) carrying the full body
    pub fn classify_response(&self, response: RawResponse) -> Result<ApiResponse> {
        if response.is_success() {
            let body = match serde_json::from_str(&response.body) {
                Ok(value) => ResponseBody::Json(value),
                Err(_) => ResponseBody::Text(response.body),
            };
            return Ok(ApiResponse {
                status: response.status,
                body,
            });
        }

        let err = ApiError::status(response.status, response.body);
        self.diagnostics.in_scope(|| error!("{}", err));
        Err(err)
    }

    /// `execute` followed by `classify_response`.
    pub(crate) fn dispatch(
        &self,
        method: Method,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        let response = self.execute(method, endpoint, options)?;
        self.classify_response(response)
    }
}
