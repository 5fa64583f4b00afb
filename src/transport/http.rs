use super::{OutboundRequest, RawResponse, Transport, TransportError};
use crate::config::TransportSettings;
use crate::error::error_chain;
use crate::types::{HeaderSet, Method, MultipartBody, RequestBody};
use crate::{ApiError, Result};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Proxy;
use std::time::Duration;

/// Blocking reqwest transport.
///
/// Holds one `reqwest::blocking::Client` for the lifetime of the owning
/// `RestClient`, so connections are pooled and reused across calls.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(settings: &TransportSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(settings.timeout)
            .pool_max_idle_per_host(settings.pool_max_idle_per_host)
            .pool_idle_timeout(Some(Duration::from_secs(settings.pool_idle_timeout_secs)))
            .user_agent(settings.user_agent.clone());

        if let Some(connect_timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        if let Some(proxy_url) = &settings.proxy {
            match Proxy::all(proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => tracing::warn!("Ignoring invalid proxy URL {}: {}", proxy_url, e),
            }
        }

        let client = builder.build().map_err(|e| {
            let err = ApiError::configuration(format!(
                "failed to create HTTP client: {}",
                error_chain(&e)
            ));
            tracing::error!("{}", err);
            err
        })?;

        Ok(Self { client })
    }

    fn request_builder(&self, method: Method, url: &str) -> RequestBuilder {
        match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Patch => self.client.patch(url),
            Method::Delete => self.client.delete(url),
        }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: OutboundRequest) -> std::result::Result<RawResponse, TransportError> {
        let mut req = self
            .request_builder(request.method, &request.url)
            .headers(to_header_map(&request.headers)?);

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }

        if let Some(timeout) = request.options.timeout {
            req = req.timeout(timeout);
        }

        req = match request.body {
            Some(RequestBody::Json(value)) => req.json(&value),
            Some(RequestBody::Form(fields)) => req.form(&fields),
            Some(RequestBody::Multipart(body)) => req.multipart(to_multipart(body)?),
            None => req,
        };

        let response = req.send()?;
        let status = response.status().as_u16();
        let headers = from_header_map(response.headers());
        let body = response
            .text()
            .map_err(|e| TransportError::Body(error_chain(&e)))?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

fn to_header_map(headers: &HeaderSet) -> std::result::Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers.iter() {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| TransportError::InvalidRequest(format!("invalid header name {:?}: {}", name, e)))?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            TransportError::InvalidRequest(format!("invalid header value for {}: {}", name, e))
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

fn from_header_map(headers: &HeaderMap) -> HeaderSet {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

fn to_multipart(body: MultipartBody) -> std::result::Result<Form, TransportError> {
    let file = body.file;
    let part = Part::bytes(file.content)
        .file_name(file.file_name)
        .mime_str(&file.content_type)
        .map_err(|e| TransportError::InvalidRequest(format!("invalid content type: {}", e)))?;

    let mut form = Form::new().part(file.field_name, part);
    for (name, value) in body.fields {
        form = form.text(name, value);
    }
    Ok(form)
}
