//! Builds the markup for one portfolio card and the grid-level states
//! (loader, empty gallery, load error). Visibility (the entrance
//! `hidden` class, filter show/hide) is page state, so the wrapper
//! shell is composed at page render time while the body is built once
//! per fetch. All server text is escaped before interpolation.

use crate::models::portfolio::{Portfolio, Viewer};
use crate::sanitize::{encode_uri, escape_multiline, html_escape, percent_encode};

/// One rendered card plus the state the page needs for in-place lookup
/// (delete removal, like patches) and client-side filtering.
#[derive(Debug, Clone)]
pub struct Card {
    pub id: i64,
    pub category: String,
    pub liked: bool,
    pub like_count: i64,
    pub body_html: String,
}

impl Card {
    /// Swap the like section for one reflecting the server's latest
    /// `(like_count, liked)`. Touches only this card's markup; the old
    /// fragment is reproduced exactly, so the replacement is scoped.
    pub fn patch_like(&mut self, like_count: i64, liked: bool) {
        let old = like_section_html(self.id, self.liked, self.like_count);
        let new = like_section_html(self.id, liked, like_count);
        self.body_html = self.body_html.replacen(&old, &new, 1);
        self.liked = liked;
        self.like_count = like_count;
    }

    /// Wrap the body in the card shell. `hidden` is the pre-reveal
    /// entrance state; `filtered_out` hides without removing.
    pub fn shell_html(&self, hidden: bool, filtered_out: bool) -> String {
        let hidden_class = if hidden { " hidden" } else { "" };
        let style = if filtered_out {
            r#" style="display:none""#
        } else {
            ""
        };
        format!(
            r#"<div class="portfolio-item card-3d{}" data-id="{}" data-category="{}"{}>{}</div>"#,
            hidden_class,
            self.id,
            html_escape(&self.category),
            style,
            self.body_html
        )
    }
}

/// Build a single portfolio card body.
pub fn render_card(portfolio: &Portfolio, viewer: Option<&Viewer>) -> Card {
    let mut body = String::new();

    if viewer.map(|v| v.owns(portfolio)).unwrap_or(false) {
        body.push_str(&format!(
            r#"<div class="owner-actions"><a href="/portfolio/{id}/edit" class="btn-edit">Edit</a><button class="btn-delete" data-id="{id}">Delete</button></div>"#,
            id = portfolio.id
        ));
    }

    body.push_str(&format!("<h3>{}</h3>", html_escape(&portfolio.portfolio_title)));
    body.push_str(&format!(
        r#"<p class="student-name">By: <a href="/profile/{}" class="student-name-link">{}</a></p>"#,
        html_escape(&portfolio.owner_username),
        html_escape(&portfolio.owner_username)
    ));
    body.push_str(r#"<hr class="card-divider">"#);

    body.push_str(&section("About Me", portfolio.description.as_deref()));
    body.push_str(&section(
        "Project Description",
        portfolio.project_description.as_deref(),
    ));
    body.push_str(&section("Skills", portfolio.skills.as_deref()));
    body.push_str(&section("Featured Projects", portfolio.projects.as_deref()));

    body.push_str(&format!(
        r#"<div class="portfolio-meta"><span class="category">{}</span><span class="upload-date">{}</span></div>"#,
        html_escape(&portfolio.category),
        html_escape(&portfolio.display_date())
    ));

    let project_link = match portfolio.project_url.as_deref() {
        // URI-encoded but deliberately not validated beyond that.
        Some(u) if !u.trim().is_empty() => format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="project-link">View Live Project</a>"#,
            html_escape(&encode_uri(u))
        ),
        _ => String::new(),
    };

    let mut file_links = String::new();
    for file in &portfolio.files {
        file_links.push_str(&format!(
            r#"<a href="/download/{}/{}" class="file-link">{}</a>"#,
            portfolio.id,
            percent_encode(file),
            html_escape(file)
        ));
    }

    body.push_str(&format!(
        r#"<div class="card-actions"><div>{}<div class="file-list">{}</div></div>{}</div>"#,
        project_link,
        file_links,
        like_section_html(portfolio.id, portfolio.is_liked, portfolio.like_count)
    ));

    Card {
        id: portfolio.id,
        category: portfolio.category.clone(),
        liked: portfolio.is_liked,
        like_count: portfolio.like_count,
        body_html: body,
    }
}

/// The like button + counter. Kept as one helper so a like toggle can
/// rewrite exactly this fragment in place.
pub fn like_section_html(id: i64, liked: bool, like_count: i64) -> String {
    let liked_class = if liked { " liked" } else { "" };
    format!(
        r#"<div class="like-section"><button class="like-btn{}" data-id="{}">👍</button><span class="like-count">{}</span></div>"#,
        liked_class, id, like_count
    )
}

/// An optional text section. Blank (after trim) means the section is
/// absent entirely, heading included.
fn section(title: &str, content: Option<&str>) -> String {
    match content {
        Some(text) if !text.trim().is_empty() => format!(
            r#"<div class="portfolio-section"><h4>{}</h4><p>{}</p></div>"#,
            title,
            escape_multiline(text)
        ),
        _ => String::new(),
    }
}

pub fn loader_html() -> String {
    r#"<div class="loader">Loading portfolios...</div>"#.to_string()
}

pub fn empty_gallery_html() -> String {
    r#"<p class="empty-gallery-message">No portfolios found. Try a different search.</p>"#
        .to_string()
}

pub fn load_error_html() -> String {
    r#"<p class="error-message">Could not load portfolios.</p>"#.to_string()
}
