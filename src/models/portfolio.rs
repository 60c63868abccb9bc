use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One portfolio as served by `GET /portfolios`. Read-only view model,
/// rebuilt from scratch on every list fetch, never cached or merged.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Portfolio {
    pub id: i64,
    pub user_id: i64,
    pub owner_username: String,
    pub portfolio_title: String,
    pub description: Option<String>,
    pub project_description: Option<String>,
    pub skills: Option<String>,
    pub projects: Option<String>,
    pub category: String,
    pub upload_date: String,
    pub project_url: Option<String>,
    #[serde(default)]
    pub files: Vec<String>,
    pub is_liked: bool,
    pub like_count: i64,
}

impl Portfolio {
    /// Display form of `upload_date`. The server sends an ISO-ish
    /// timestamp; anything unparseable is shown verbatim rather than
    /// dropped.
    pub fn display_date(&self) -> String {
        let raw = self.upload_date.trim();
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
                return dt.format("%-m/%-d/%Y").to_string();
            }
        }
        if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return d.format("%-m/%-d/%Y").to_string();
        }
        raw.to_string()
    }
}

/// Success body of `POST /upload` and `POST /portfolio/{id}/delete`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ActionResponse {
    pub message: String,
}

/// Success body of `POST /portfolio/{id}/like`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LikeResponse {
    pub like_count: i64,
    pub liked: bool,
}

/// The authenticated viewer, as embedded in the host page. Absent when
/// nobody is logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub id: i64,
}

impl Viewer {
    /// Owner controls (edit/delete) render only for the owner;
    /// the comparison is numeric, never string-based.
    pub fn owns(&self, portfolio: &Portfolio) -> bool {
        self.id == portfolio.user_id
    }
}
