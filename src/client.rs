//! REST client façade.
//!
//! Developer-friendly goal: keep the public surface small and predictable.
//! Implementation details are split into submodules under `src/client/`:
//! construction and header composition in `core`, the request pipeline in
//! `execution`, verb-specific wrappers in `methods`, and multipart uploads in
//! `upload`.

pub mod builder;
pub mod core;
mod execution;
mod methods;
mod upload;

pub use builder::RestClientBuilder;
pub use self::core::RestClient;
pub use upload::DEFAULT_FILE_FIELD;

/// Maximum number of characters of a request or response body written to debug logs.
pub const LOG_BODY_LIMIT: usize = 500;
