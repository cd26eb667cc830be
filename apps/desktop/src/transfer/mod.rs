//! Transfer client: the single point of entry for all CVV service calls.
//!
//! One operation exists: upload a resume PDF plus a job description and get the
//! optimized PDF back. No retries, no timeout, no cancellation; a failed call
//! propagates to the caller unchanged.

use bytes::Bytes;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub mod content_disposition;

const CREATE_CVV_PATH: &str = "/cvv/create-cvv";
/// Appended to the input's file stem when the server suggests no name.
const FALLBACK_SUFFIX: &str = "-CVV";

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

impl TransferError {
    /// The message shown in the failure toast.
    pub fn user_message(&self) -> String {
        match self {
            TransferError::Http(e) if e.is_connect() => {
                "Could not reach the server. Check your connection.".to_string()
            }
            TransferError::Http(e) => e.to_string(),
            TransferError::Api { message, .. } => message.clone(),
        }
    }
}

/// The optimized resume returned by the service: raw bytes plus the filename
/// it should be saved under.
#[derive(Debug, Clone)]
pub struct OptimizedResume {
    pub file_name: String,
    pub bytes: Bytes,
}

/// The single HTTP client used for uploads.
#[derive(Clone)]
pub struct TransferClient {
    http: Client,
    base_url: String,
}

impl TransferClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Posts the resume and description as a multipart form and returns the
    /// optimized PDF. The suggested filename comes from the response's
    /// `Content-Disposition` header, or is derived from `file_name` when the
    /// header is absent or unparsable.
    pub async fn create_cvv(
        &self,
        file_name: &str,
        pdf: Vec<u8>,
        description: &str,
    ) -> Result<OptimizedResume, TransferError> {
        let part = Part::bytes(pdf)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")?;
        let form = Form::new()
            .part("pdf_file", part)
            .text("description", description.to_string());

        let url = format!(
            "{}{CREATE_CVV_PATH}",
            self.base_url.trim_end_matches('/')
        );
        debug!("POST {url}");

        let response = self.http.post(&url).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::Api {
                status: status.as_u16(),
                message: api_message(response).await,
            });
        }

        let suggested = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(content_disposition::suggested_filename);
        let file_name = suggested.unwrap_or_else(|| fallback_file_name(file_name));

        let bytes = response.bytes().await?;
        debug!("received {} bytes as '{file_name}'", bytes.len());

        Ok(OptimizedResume { file_name, bytes })
    }
}

/// Pulls a human-readable message out of an error response. The service
/// reports failures as JSON with a `detail` (or `message`) key; anything else
/// falls back to the canonical status reason.
async fn api_message(response: reqwest::Response) -> String {
    let status = response.status();
    let from_body = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("detail")
                .or_else(|| body.get("message"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        });
    from_body.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    })
}

/// `resume.pdf` becomes `resume-CVV.pdf`; an extensionless name keeps its stem.
fn fallback_file_name(input_name: &str) -> String {
    let stem = Path::new(input_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| input_name.to_string());
    format!("{stem}{FALLBACK_SUFFIX}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn fallback_name_strips_extension_and_appends_suffix() {
        assert_eq!(fallback_file_name("resume.pdf"), "resume-CVV.pdf");
        assert_eq!(fallback_file_name("my resume"), "my resume-CVV.pdf");
        assert_eq!(fallback_file_name("archive.tar.gz"), "archive.tar-CVV.pdf");
    }

    /// Serves exactly one request, then replies with the canned response.
    /// Returns the base URL to point the client at.
    fn serve_once(status_line: &'static str, extra_headers: &'static str, body: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));

            // Drain the request: headers, then Content-Length bytes of body.
            let mut raw = Vec::new();
            let mut buf = [0u8; 8192];
            let mut header_end = None;
            while header_end.is_none() {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        raw.extend_from_slice(&buf[..n]);
                        header_end = raw.windows(4).position(|w| w == b"\r\n\r\n");
                    }
                }
            }
            if let Some(end) = header_end {
                let headers = String::from_utf8_lossy(&raw[..end]).into_owned();
                let content_length = headers
                    .lines()
                    .find_map(|l| l.to_ascii_lowercase().strip_prefix("content-length:").map(str::trim).map(str::to_string))
                    .and_then(|v| v.parse::<usize>().ok())
                    .unwrap_or(0);
                let mut have = raw.len() - (end + 4);
                while have < content_length {
                    match stream.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => have += n,
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\n{extra_headers}Connection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.write_all(&body);
            let _ = stream.flush();
        });
        format!("http://127.0.0.1:{port}")
    }

    #[tokio::test]
    async fn uses_filename_from_content_disposition() {
        let base = serve_once(
            "200 OK",
            "Content-Type: application/pdf\r\nContent-Disposition: attachment; filename=\"x.pdf\"\r\n",
            b"%PDF-1.7 optimized".to_vec(),
        );
        let client = TransferClient::new(base);

        let resume = client
            .create_cvv("resume.pdf", b"%PDF-1.7 original".to_vec(), "Rust role")
            .await
            .unwrap();

        assert_eq!(resume.file_name, "x.pdf");
        assert_eq!(resume.bytes.as_ref(), b"%PDF-1.7 optimized");
    }

    #[tokio::test]
    async fn derives_filename_when_header_is_absent() {
        let base = serve_once(
            "200 OK",
            "Content-Type: application/pdf\r\n",
            b"%PDF-1.7 optimized".to_vec(),
        );
        let client = TransferClient::new(base);

        let resume = client
            .create_cvv("resume.pdf", b"%PDF-1.7 original".to_vec(), "Rust role")
            .await
            .unwrap();

        assert_eq!(resume.file_name, "resume-CVV.pdf");
    }

    #[tokio::test]
    async fn propagates_api_errors_with_server_detail() {
        let base = serve_once(
            "400 Bad Request",
            "Content-Type: application/json\r\n",
            br#"{"detail":"O arquivo deve ser um PDF"}"#.to_vec(),
        );
        let client = TransferClient::new(base);

        let err = client
            .create_cvv("resume.pdf", b"%PDF-1.7".to_vec(), "Rust role")
            .await
            .unwrap_err();

        match err {
            TransferError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "O arquivo deve ser um PDF");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn falls_back_to_status_reason_without_json_body() {
        let base = serve_once("500 Internal Server Error", "", Vec::new());
        let client = TransferClient::new(base);

        let err = client
            .create_cvv("resume.pdf", b"%PDF-1.7".to_vec(), "Rust role")
            .await
            .unwrap_err();

        match err {
            TransferError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
