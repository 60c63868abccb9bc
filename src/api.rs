//! Typed client for the portfolio service REST endpoints.
//!
//! The controller talks to `dyn PortfolioApi`, so every interaction can
//! be exercised against a stub; `HttpApi` is the real transport. Each
//! response body is decoded into its endpoint contract at this
//! boundary; a shape mismatch surfaces as `ApiError::Decode`, never as
//! a missing-field panic somewhere downstream.

use std::time::Duration;

use url::Url;

use crate::models::portfolio::{ActionResponse, LikeResponse, Portfolio};
use crate::sanitize::percent_encode;

#[derive(Debug)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    Transport(String),
    /// Non-success status; carries the server's message when the error
    /// body decoded, a generic one otherwise.
    Status { code: u16, message: String },
    /// 401/403: the session is gone.
    AuthExpired,
    /// The response arrived but did not match the endpoint contract.
    Decode(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "request failed: {}", e),
            ApiError::Status { code, message } => write!(f, "server returned {}: {}", code, message),
            ApiError::AuthExpired => write!(f, "Your session has expired. Please log in again."),
            ApiError::Decode(e) => write!(f, "unexpected response: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

/// Fields of the upload form, one part per server-side form key.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub student_name: String,
    pub student_id: String,
    pub email: String,
    pub portfolio_title: String,
    pub description: String,
    pub category: String,
    pub project_url: String,
    /// (filename, contents) pairs for the `files` parts.
    pub files: Vec<(String, Vec<u8>)>,
}

pub trait PortfolioApi {
    /// GET /portfolios?query=<text>. Empty query means unfiltered.
    fn list(&self, query: &str) -> Result<Vec<Portfolio>, ApiError>;

    /// POST /upload, multipart. 401/403 map to `AuthExpired`.
    fn upload(&self, form: &UploadForm) -> Result<ActionResponse, ApiError>;

    /// POST /portfolio/{id}/delete.
    fn delete(&self, id: i64) -> Result<ActionResponse, ApiError>;

    /// POST /portfolio/{id}/like. Toggles; the server decides direction.
    fn toggle_like(&self, id: i64) -> Result<LikeResponse, ApiError>;

    /// GET /download/{id}/{filename}, raw bytes.
    fn download(&self, id: i64, filename: &str) -> Result<Vec<u8>, ApiError>;
}

pub struct HttpApi {
    base_url: Url,
    client: reqwest::blocking::Client,
}

impl HttpApi {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("HTTP client error: {}", e)))?;
        Ok(HttpApi { base_url, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Transport(format!("bad endpoint {}: {}", path, e)))
    }

    /// Turn a non-success response into the error taxonomy, preferring
    /// the server's own `{message}` body when it decodes.
    fn status_error(resp: reqwest::blocking::Response) -> ApiError {
        let code = resp.status().as_u16();
        if code == 401 || code == 403 {
            return ApiError::AuthExpired;
        }
        // Failure bodies are JSON from the API routes but HTML from the
        // framework's own error pages; anything that is not `{message}`
        // falls back to the generic text.
        let message = resp
            .text()
            .ok()
            .and_then(|body| serde_json::from_str::<ActionResponse>(&body).ok())
            .map(|b| b.message)
            .unwrap_or_else(|| "An unknown error occurred.".to_string());
        ApiError::Status { code, message }
    }
}

impl PortfolioApi for HttpApi {
    fn list(&self, query: &str) -> Result<Vec<Portfolio>, ApiError> {
        let mut url = self.endpoint("/portfolios")?;
        url.set_query(Some(&format!("query={}", percent_encode(query))));

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(Self::status_error(resp));
        }
        resp.json::<Vec<Portfolio>>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn upload(&self, form: &UploadForm) -> Result<ActionResponse, ApiError> {
        let mut parts = reqwest::blocking::multipart::Form::new()
            .text("student_name", form.student_name.clone())
            .text("student_id", form.student_id.clone())
            .text("email", form.email.clone())
            .text("portfolio_title", form.portfolio_title.clone())
            .text("description", form.description.clone())
            .text("category", form.category.clone())
            .text("project_url", form.project_url.clone());
        for (name, bytes) in &form.files {
            let part = reqwest::blocking::multipart::Part::bytes(bytes.clone())
                .file_name(name.clone());
            parts = parts.part("files", part);
        }

        let resp = self
            .client
            .post(self.endpoint("/upload")?)
            .header("X-Requested-With", "XMLHttpRequest")
            .multipart(parts)
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(Self::status_error(resp));
        }
        resp.json::<ActionResponse>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn delete(&self, id: i64) -> Result<ActionResponse, ApiError> {
        let resp = self
            .client
            .post(self.endpoint(&format!("/portfolio/{}/delete", id))?)
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(Self::status_error(resp));
        }
        resp.json::<ActionResponse>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn toggle_like(&self, id: i64) -> Result<LikeResponse, ApiError> {
        let resp = self
            .client
            .post(self.endpoint(&format!("/portfolio/{}/like", id))?)
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(Self::status_error(resp));
        }
        resp.json::<LikeResponse>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn download(&self, id: i64, filename: &str) -> Result<Vec<u8>, ApiError> {
        let path = format!("/download/{}/{}", id, percent_encode(filename));
        let resp = self
            .client
            .get(self.endpoint(&path)?)
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(Self::status_error(resp));
        }
        resp.bytes()
            .map(|b| b.to_vec())
            .map_err(|e| ApiError::Transport(e.to_string()))
    }
}
