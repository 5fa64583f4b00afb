//! File uploads: multipart assembly and local I/O failures.

mod common;

use common::{client_with, RecordingTransport};
use rest_api_tool::{ErrorKind, HeaderSet, Method, RequestBody, DEFAULT_FILE_FIELD};

#[test]
fn test_upload_missing_file_never_touches_network() {
    let transport = RecordingTransport::new();
    let client = client_with(&transport, "http://api.test");
    let missing = std::env::temp_dir().join("rest-api-tool-definitely-missing.bin");

    let err = client
        .upload_file("/upload", &missing, DEFAULT_FILE_FIELD, None, None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(err.to_string().contains(&missing.display().to_string()));
    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_upload_directory_is_io_error() {
    let transport = RecordingTransport::new();
    let client = client_with(&transport, "http://api.test");
    let dir = tempfile::tempdir().unwrap();

    let err = client
        .upload_file("/upload", dir.path(), DEFAULT_FILE_FIELD, None, None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_upload_builds_multipart_post() {
    let transport = RecordingTransport::new();
    transport.respond(201, r#"{"stored": true}"#);
    let mut client = client_with(&transport, "http://api.test/");
    client.set_credential("up");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");
    std::fs::write(&path, "a,b\n1,2\n").unwrap();

    let extra = vec![("kind".to_string(), "daily".to_string())];
    let headers = HeaderSet::new().with("X-Upload", "1");
    let response = client
        .upload_file("/files", &path, "document", Some(extra.clone()), Some(&headers))
        .unwrap();
    assert_eq!(response.json().unwrap()["stored"], true);

    let request = transport.last_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, "http://api.test/files");
    assert_eq!(request.headers.get("X-Upload"), Some("1"));
    assert_eq!(request.headers.get("Authorization"), Some("Bearer up"));

    match request.body {
        Some(RequestBody::Multipart(body)) => {
            assert_eq!(body.file.field_name, "document");
            assert_eq!(body.file.file_name, "report.csv");
            assert_eq!(body.file.content_type, "text/csv");
            assert_eq!(body.file.content, b"a,b\n1,2\n".to_vec());
            assert_eq!(body.fields, extra);
        }
        other => panic!("expected multipart body, got {:?}", other),
    }
}

#[test]
fn test_upload_without_extra_fields_sends_empty_field_set() {
    let transport = RecordingTransport::new();
    let client = client_with(&transport, "http://api.test");
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), b"\x00\x01").unwrap();

    client
        .upload_file("/files", file.path(), DEFAULT_FILE_FIELD, None, None)
        .unwrap();

    match transport.last_request().body {
        Some(RequestBody::Multipart(body)) => {
            assert!(body.fields.is_empty());
            assert_eq!(body.file.field_name, "file");
        }
        other => panic!("expected multipart body, got {:?}", other),
    }
}

#[test]
fn test_upload_status_error_propagates() {
    let transport = RecordingTransport::new();
    transport.respond(413, "payload too large");
    let client = client_with(&transport, "http://api.test");
    let file = tempfile::NamedTempFile::new().unwrap();

    let err = client
        .upload_file("/files", file.path(), DEFAULT_FILE_FIELD, None, None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Status);
    assert!(err.to_string().contains("413"));
    assert_eq!(transport.calls(), 1);
}
