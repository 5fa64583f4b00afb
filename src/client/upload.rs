use super::core::RestClient;
use crate::types::{
    ApiResponse, FileAttachment, FormFields, HeaderSet, Method, MultipartBody, RequestBody,
    RequestOptions,
};
use crate::{ApiError, Result};
use std::io::Read;
use std::path::Path;
use tracing::{error, info};

/// Default multipart field name for uploaded files.
pub const DEFAULT_FILE_FIELD: &str = "file";

impl RestClient {
    /// Upload a local file as `multipart/form-data` via `POST`.
    ///
    /// The file is read fully before anything is sent; if it cannot be opened
    /// or read the call fails with [`ErrorKind::Io`](crate::ErrorKind::Io) and
    /// no request is made.
    pub fn upload_file(
        &self,
        endpoint: &str,
        file_path: impl AsRef<Path>,
        field_name: &str,
        extra_fields: Option<FormFields>,
        headers: Option<&HeaderSet>,
    ) -> Result<ApiResponse> {
        let path = file_path.as_ref();
        self.diagnostics
            .in_scope(|| info!("Uploading file {}", path.display()));

        let attachment = read_attachment(path, field_name).map_err(|e| {
            let err = ApiError::io(path, &e);
            self.diagnostics.in_scope(|| error!("{}", err));
            err
        })?;

        let mut options = RequestOptions {
            body: Some(RequestBody::Multipart(MultipartBody {
                file: attachment,
                fields: extra_fields.unwrap_or_default(),
            })),
            ..RequestOptions::default()
        };
        if let Some(headers) = headers {
            options.headers.merge(headers);
        }

        let response = self.dispatch(Method::Post, endpoint, options)?;
        self.diagnostics
            .in_scope(|| info!("File {} uploaded successfully", path.display()));
        Ok(response)
    }
}

fn read_attachment(path: &Path, field_name: &str) -> std::io::Result<FileAttachment> {
    let content = {
        let mut file = std::fs::File::open(path)?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;
        buf
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_FILE_FIELD.to_string());
    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(FileAttachment {
        field_name: field_name.to_string(),
        file_name,
        content_type,
        content,
    })
}
