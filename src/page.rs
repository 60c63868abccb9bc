//! In-memory model of the gallery page: the card grid, the category
//! filter, the upload control, the file-input preview, and any pending
//! navigation. Loads replace the grid wholesale; like and delete touch
//! one card at a time.

use std::time::Instant;

use crate::render::{self, Card};

/// What currently occupies the grid container.
#[derive(Debug)]
pub enum GridState {
    Loading,
    LoadFailed,
    Empty,
    Cards(Vec<Slot>),
}

/// A card plus its entrance schedule. Cards appear in response order;
/// the cascade only delays when each becomes visible.
#[derive(Debug)]
pub struct Slot {
    pub card: Card,
    pub revealed: bool,
    reveal_at: Instant,
}

/// A navigation the shell should perform once `at` passes.
#[derive(Debug, Clone)]
pub struct Redirect {
    pub to: String,
    pub at: Instant,
}

/// The special filter value that shows every card.
pub const FILTER_ALL: &str = "all";

#[derive(Debug)]
pub struct Page {
    pub grid: GridState,
    pub active_filter: String,
    pub file_preview: String,
    pub upload_busy: bool,
    pub pending_redirect: Option<Redirect>,
}

impl Page {
    pub fn new() -> Self {
        Page {
            grid: GridState::Empty,
            active_filter: FILTER_ALL.to_string(),
            file_preview: String::new(),
            upload_busy: false,
            pending_redirect: None,
        }
    }

    /// Replace the grid contents with freshly rendered cards, each
    /// scheduled to appear `index × step` after `now`.
    pub fn set_cards(&mut self, cards: Vec<Card>, now: Instant, step: std::time::Duration) {
        if cards.is_empty() {
            self.grid = GridState::Empty;
            return;
        }
        let slots = cards
            .into_iter()
            .enumerate()
            .map(|(i, card)| Slot {
                card,
                revealed: false,
                reveal_at: now + step * (i as u32),
            })
            .collect();
        self.grid = GridState::Cards(slots);
    }

    /// Flip every card whose entrance time has passed. Cosmetic only;
    /// order and content never change here.
    pub fn reveal_due(&mut self, now: Instant) {
        if let GridState::Cards(slots) = &mut self.grid {
            for slot in slots.iter_mut() {
                if !slot.revealed && now >= slot.reveal_at {
                    slot.revealed = true;
                }
            }
        }
    }

    pub fn card_ids(&self) -> Vec<i64> {
        match &self.grid {
            GridState::Cards(slots) => slots.iter().map(|s| s.card.id).collect(),
            _ => Vec::new(),
        }
    }

    pub fn card(&self, id: i64) -> Option<&Card> {
        match &self.grid {
            GridState::Cards(slots) => slots.iter().map(|s| &s.card).find(|c| c.id == id),
            _ => None,
        }
    }

    /// Remove exactly the card with this id, leaving the rest in place.
    /// Unknown ids are a no-op, matching a node that is already gone.
    pub fn remove_card(&mut self, id: i64) {
        if let GridState::Cards(slots) = &mut self.grid {
            slots.retain(|s| s.card.id != id);
            if slots.is_empty() {
                self.grid = GridState::Empty;
            }
        }
    }

    /// In-place like patch for one card; everything else is untouched.
    pub fn patch_like(&mut self, id: i64, like_count: i64, liked: bool) {
        if let GridState::Cards(slots) = &mut self.grid {
            if let Some(slot) = slots.iter_mut().find(|s| s.card.id == id) {
                slot.card.patch_like(like_count, liked);
            }
        }
    }

    /// Ids of cards the active filter leaves visible.
    pub fn visible_card_ids(&self) -> Vec<i64> {
        match &self.grid {
            GridState::Cards(slots) => slots
                .iter()
                .filter(|s| self.filter_matches(&s.card.category))
                .map(|s| s.card.id)
                .collect(),
            _ => Vec::new(),
        }
    }

    fn filter_matches(&self, category: &str) -> bool {
        self.active_filter == FILTER_ALL || self.active_filter == category
    }

    /// Label of the upload submit control, relabeled while a request
    /// is in flight.
    pub fn upload_button_label(&self) -> &'static str {
        if self.upload_busy {
            "Uploading..."
        } else {
            "Upload Portfolio"
        }
    }

    /// The file-input preview node.
    pub fn render_file_preview(&self) -> String {
        format!(
            r#"<span id="fileListPreview">{}</span>"#,
            crate::sanitize::html_escape(&self.file_preview)
        )
    }

    /// The grid container markup for the current state. Filtered-out
    /// cards stay in the tree, hidden, exactly as the page would keep
    /// their nodes around for the next filter click.
    pub fn render_grid(&self) -> String {
        let inner = match &self.grid {
            GridState::Loading => render::loader_html(),
            GridState::LoadFailed => render::load_error_html(),
            GridState::Empty => render::empty_gallery_html(),
            GridState::Cards(slots) => {
                let mut html = String::new();
                for slot in slots {
                    let filtered_out = !self.filter_matches(&slot.card.category);
                    html.push_str(&slot.card.shell_html(!slot.revealed, filtered_out));
                }
                html
            }
        };
        format!(r#"<div id="portfolioGrid">{}</div>"#, inner)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
