//! Local-page search: filters the course cards already rendered on a
//! category page, in place.

use std::borrow::Cow;

use super::controller::Surface;
use super::{matches_query, Query, Searchable};

/// Text read from one rendered card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardText {
    /// `None` when the card has no `.course-title` element.
    pub title: Option<String>,
    pub code: String,
    pub badges: Vec<String>,
}

impl CardText {
    /// Handoff highlight test: the id appears in the title or the code.
    pub fn mentions(&self, id: &str) -> bool {
        match &self.title {
            Some(title) => title.contains(id) || self.code.contains(id),
            None => false,
        }
    }
}

impl Searchable for CardText {
    fn search_title(&self) -> Option<Cow<'_, str>> {
        self.title.as_deref().map(Cow::Borrowed)
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields: Vec<Cow<'_, str>> =
            self.badges.iter().map(|b| Cow::Borrowed(b.as_str())).collect();
        fields.push(Cow::Borrowed(self.code.as_str()));
        fields
    }
}

/// Access to the cards that are on the page right now.
pub trait CardView {
    /// Re-read the current cards; indices stay valid until the next call.
    fn card_texts(&mut self) -> Vec<CardText>;
    fn set_card_state(&mut self, index: usize, visible: bool, matched: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalOutcome {
    pub total: usize,
    pub visible: usize,
    pub show_no_results: bool,
}

/// Show matching cards and hide the rest. An empty query shows every card.
pub fn apply_local_filter<V: CardView + ?Sized>(view: &mut V, query: &Query) -> LocalOutcome {
    let cards = view.card_texts();
    let mut visible = 0;
    for (index, card) in cards.iter().enumerate() {
        let shown = query.is_empty() || matches_query(card, query);
        if shown {
            visible += 1;
        }
        view.set_card_state(index, shown, shown && !query.is_empty());
    }
    LocalOutcome {
        total: cards.len(),
        visible,
        show_no_results: visible == 0 && !query.is_empty(),
    }
}

/// Filter the cards, then redraw the message area (clear first, then the
/// no-results message if nothing is left).
pub fn run_local<V, S>(view: &mut V, surface: &mut S, query: &Query) -> LocalOutcome
where
    V: CardView + ?Sized,
    S: Surface + ?Sized,
{
    let outcome = apply_local_filter(view, query);
    surface.clear_transient();
    if outcome.show_no_results {
        surface.show_no_results();
    }
    outcome
}
