use std::time::{Duration, Instant};

use crate::sanitize::html_escape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    posted_at: Instant,
}

#[derive(Debug)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
    ttl: Duration,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        NoticeBoard { notices: Vec::new(), ttl }
    }

    pub fn push(&mut self, message: impl Into<String>, kind: NoticeKind) {
        self.notices.push(Notice {
            message: message.into(),
            kind,
            posted_at: Instant::now(),
        });
    }

    /// Drop notices whose lifetime has expired. The shell calls this on
    /// its own cadence; auto-dismissal is time-based, never count-based.
    pub fn sweep(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.notices
            .retain(|n| now.duration_since(n.posted_at) < ttl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    /// The message area markup, one div per live notice, append order.
    pub fn render(&self) -> String {
        let mut html = String::from(r#"<div id="messageContainer">"#);
        for n in &self.notices {
            html.push_str(&format!(
                r#"<div class="message {}">{}</div>"#,
                n.kind.class(),
                html_escape(&n.message)
            ));
        }
        html.push_str("</div>");
        html
    }
}
