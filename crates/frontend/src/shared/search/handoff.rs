//! Handoff from an index-page search result to its category page.
//!
//! The index page stores the chosen course id and the query in session
//! storage before navigating. Once the category page has rendered its cards,
//! [`Handoff::apply`] uses both keys: the query is replayed through the local
//! search and the chosen card is scrolled into view and highlighted.

use gloo_timers::callback::Timeout;
use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use super::local::{CardText, CardView};
use super::searchbar::SharedLocalSearch;
use crate::shared::dom::{add_class, remove_class};
use crate::shared::storage::{session_take, HIGHLIGHT_COURSE_KEY, SEARCH_TERM_KEY};

pub const HIGHLIGHT_CLASS: &str = "highlighted-course";
pub const HIGHLIGHT_MS: u32 = 3_000;

/// Indices of every card that mentions `id`.
pub fn find_highlights(cards: &[CardText], id: &str) -> Vec<usize> {
    cards
        .iter()
        .enumerate()
        .filter(|(_, card)| card.mentions(id))
        .map(|(index, _)| index)
        .collect()
}

/// A pending handoff, already removed from session storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Handoff {
    pub highlight: Option<String>,
    pub term: Option<String>,
}

impl Handoff {
    /// Read both keys and clear them, whatever the page does next.
    pub fn take() -> Self {
        Self {
            highlight: session_take(HIGHLIGHT_COURSE_KEY),
            term: session_take(SEARCH_TERM_KEY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.highlight.is_none() && self.term.is_none()
    }

    /// Log and forget a handoff the page cannot honor.
    pub fn discard(self, reason: &str) {
        if !self.is_empty() {
            log::warn!("search handoff dropped: {}", reason);
        }
    }

    pub fn apply(self, local: Option<&SharedLocalSearch>) {
        let Some(local) = local else {
            self.discard("no local search on this page");
            return;
        };

        if let Some(term) = &self.term {
            log::debug!("replaying search term {:?}", term);
            local.borrow_mut().replay(term);
        }

        let Some(id) = self.highlight else {
            return;
        };
        let targets: Vec<Element> = {
            let mut search = local.borrow_mut();
            let view = search.cards();
            let texts = view.card_texts();
            let cards = view.cards();
            find_highlights(&texts, &id)
                .into_iter()
                .filter_map(|index| cards.get(index).cloned())
                .collect()
        };
        if targets.is_empty() {
            log::warn!("highlighted course {} not found on page", id);
            return;
        }
        for (index, card) in targets.into_iter().enumerate() {
            highlight_card(card, index == 0);
        }
    }
}

fn highlight_card(card: Element, scroll: bool) {
    if scroll {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        card.scroll_into_view_with_scroll_into_view_options(&options);
    }

    add_class(&card, HIGHLIGHT_CLASS);
    Timeout::new(HIGHLIGHT_MS, move || remove_class(&card, HIGHLIGHT_CLASS)).forget();
}
