use std::time::Duration;

use log::warn;
use url::Url;

use crate::models::portfolio::Viewer;

/// How long a notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Gap between consecutive card reveals in the entrance cascade.
pub const REVEAL_STEP: Duration = Duration::from_millis(100);

/// Pause before navigating to the login page after a session expires.
pub const LOGIN_REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// Per-request HTTP timeout.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub viewer: Option<Viewer>,
    pub notice_ttl: Duration,
    pub reveal_step: Duration,
    pub redirect_delay: Duration,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: Url::parse("http://127.0.0.1:8000").expect("static URL"),
            viewer: None,
            notice_ttl: NOTICE_TTL,
            reveal_step: REVEAL_STEP,
            redirect_delay: LOGIN_REDIRECT_DELAY,
            http_timeout: HTTP_TIMEOUT,
        }
    }
}

impl Config {
    /// Read configuration from the environment, falling back to
    /// defaults with a logged warning when a value is missing or
    /// malformed.
    pub fn from_env() -> Self {
        let mut cfg = Config::default();

        match std::env::var("FOLIOVIEW_BASE_URL") {
            Ok(raw) => match Url::parse(&raw) {
                Ok(u) => cfg.base_url = u,
                Err(e) => warn!(
                    "Invalid FOLIOVIEW_BASE_URL '{}' ({}), using {}",
                    raw, e, cfg.base_url
                ),
            },
            Err(_) => warn!("FOLIOVIEW_BASE_URL not set, using {}", cfg.base_url),
        }

        if let Ok(raw) = std::env::var("FOLIOVIEW_VIEWER_ID") {
            match raw.trim().parse::<i64>() {
                Ok(id) => cfg.viewer = Some(Viewer { id }),
                Err(_) => warn!("Invalid FOLIOVIEW_VIEWER_ID '{}', browsing anonymously", raw),
            }
        }

        cfg
    }

    pub fn with_viewer(mut self, id: i64) -> Self {
        self.viewer = Some(Viewer { id });
        self
    }
}
