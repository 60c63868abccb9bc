//! Maps user actions onto the page model and the service API. One
//! handler per interaction; every network failure is absorbed here and
//! turned into a notice, never propagated further.
//!
//! List loads carry a monotonically increasing token. A response is
//! applied only if no newer load has started since it was issued, so a
//! slow early request can never overwrite fresher content.

use std::time::Instant;

use log::{debug, error};

use crate::api::{ApiError, PortfolioApi, UploadForm};
use crate::config::Config;
use crate::models::portfolio::{ActionResponse, Portfolio};
use crate::notify::{NoticeBoard, NoticeKind};
use crate::page::{GridState, Page, Redirect};
use crate::render;

/// A user action, as delivered by the shell. The delete confirmation
/// prompt is the shell's job; an unconfirmed delete is a no-op here.
#[derive(Debug)]
pub enum Event {
    PageLoad,
    SearchSubmitted { query: String },
    UploadSubmitted { form: UploadForm },
    DeleteClicked { id: i64, confirmed: bool },
    LikeClicked { id: i64 },
    FilterClicked { value: String },
    FilesChosen { count: usize },
}

pub struct PageController {
    config: Config,
    api: Box<dyn PortfolioApi>,
    pub page: Page,
    pub notices: NoticeBoard,
    load_token: u64,
}

impl PageController {
    pub fn new(config: Config, api: Box<dyn PortfolioApi>) -> Self {
        let notices = NoticeBoard::new(config.notice_ttl);
        PageController {
            config,
            api,
            page: Page::new(),
            notices,
            load_token: 0,
        }
    }

    pub fn handle(&mut self, event: Event) {
        match event {
            Event::PageLoad => self.load(""),
            Event::SearchSubmitted { query } => self.load(&query),
            Event::UploadSubmitted { form } => self.upload(&form),
            Event::DeleteClicked { id, confirmed } => self.delete(id, confirmed),
            Event::LikeClicked { id } => self.like(id),
            Event::FilterClicked { value } => self.page.active_filter = value,
            Event::FilesChosen { count } => self.file_preview(count),
        }
    }

    // ── List loading ───────────────────────────────────

    /// Start a load: show the placeholder and claim the next token.
    pub fn begin_load(&mut self) -> u64 {
        self.load_token += 1;
        self.page.grid = GridState::Loading;
        self.load_token
    }

    /// Apply a finished load, unless a newer one superseded it.
    pub fn finish_load(&mut self, token: u64, result: Result<Vec<Portfolio>, ApiError>) {
        if token != self.load_token {
            debug!("Discarding stale portfolio list (token {} < {})", token, self.load_token);
            return;
        }
        match result {
            Err(e) => {
                error!("Failed to load portfolios: {}", e);
                self.page.grid = GridState::LoadFailed;
            }
            Ok(portfolios) => {
                let viewer = self.config.viewer;
                let cards = portfolios
                    .iter()
                    .map(|p| render::render_card(p, viewer.as_ref()))
                    .collect();
                self.page
                    .set_cards(cards, Instant::now(), self.config.reveal_step);
            }
        }
    }

    pub fn load(&mut self, query: &str) {
        let token = self.begin_load();
        let result = self.api.list(query);
        self.finish_load(token, result);
    }

    // ── Upload ─────────────────────────────────────────

    /// Claim the submit control. Returns false if an upload is already
    /// in flight, in which case the submission is dropped.
    pub fn begin_upload(&mut self) -> bool {
        if self.page.upload_busy {
            return false;
        }
        self.page.upload_busy = true;
        true
    }

    /// Apply a finished upload and release the submit control.
    pub fn finish_upload(&mut self, result: Result<ActionResponse, ApiError>) {
        match result {
            Ok(resp) => {
                self.notices.push(resp.message, NoticeKind::Success);
                self.page.file_preview.clear();
                self.load("");
            }
            Err(ApiError::AuthExpired) => {
                self.notices
                    .push(ApiError::AuthExpired.to_string(), NoticeKind::Error);
                self.page.pending_redirect = Some(Redirect {
                    to: "/login".to_string(),
                    at: Instant::now() + self.config.redirect_delay,
                });
            }
            Err(e) => {
                error!("Upload failed: {}", e);
                self.notices
                    .push("An unknown error occurred during upload.", NoticeKind::Error);
            }
        }

        // Re-enabled whatever happened above.
        self.page.upload_busy = false;
    }

    fn upload(&mut self, form: &UploadForm) {
        if !self.begin_upload() {
            return;
        }
        let result = self.api.upload(form);
        self.finish_upload(result);
    }

    // ── Delete ─────────────────────────────────────────

    fn delete(&mut self, id: i64, confirmed: bool) {
        if !confirmed {
            return;
        }
        match self.api.delete(id) {
            Ok(resp) => {
                self.notices.push(resp.message, NoticeKind::Success);
                self.page.remove_card(id);
            }
            Err(e) => {
                // Server-provided message when there is one; the DOM is
                // left untouched either way.
                let message = match e {
                    ApiError::Status { message, .. } => message,
                    other => other.to_string(),
                };
                self.notices.push(message, NoticeKind::Error);
            }
        }
    }

    // ── Like ───────────────────────────────────────────

    fn like(&mut self, id: i64) {
        if self.config.viewer.is_none() {
            self.notices
                .push("You must be logged in to like a portfolio.", NoticeKind::Error);
            return;
        }
        match self.api.toggle_like(id) {
            Ok(resp) => self.page.patch_like(id, resp.like_count, resp.liked),
            Err(e) => {
                error!("Like toggle failed for portfolio {}: {}", id, e);
                self.notices
                    .push("Failed to update like status.", NoticeKind::Error);
            }
        }
    }

    // ── Local-only interactions ────────────────────────

    fn file_preview(&mut self, count: usize) {
        self.page.file_preview = if count > 0 {
            format!("{} file(s) selected", count)
        } else {
            String::new()
        };
    }

    // ── Time-driven housekeeping ───────────────────────

    /// Advance timers: reveal due cards, expire old notices, and hand
    /// back a navigation target once its delay has passed.
    pub fn tick(&mut self, now: Instant) -> Option<String> {
        self.page.reveal_due(now);
        self.notices.sweep(now);
        match &self.page.pending_redirect {
            Some(r) if now >= r.at => {
                let to = r.to.clone();
                self.page.pending_redirect = None;
                Some(to)
            }
            _ => None,
        }
    }

    /// Message area + grid, the full dynamic surface of the page.
    pub fn render_page(&self) -> String {
        format!("{}\n{}", self.notices.render(), self.page.render_grid())
    }
}
