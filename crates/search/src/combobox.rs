//! Combobox interaction state.
//!
//! Owns open/closed state and the active option for one search widget, and
//! maps keyboard, pointer and focus events to state changes and commands.
//! Every event is total: an event that makes no sense in the current state is
//! ignored.

use crate::engine::{SearchOutcome, Selection};

/// Keys the listbox reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Home,
    End,
    Enter,
    Escape,
}

/// Side effect requested from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Route to the selection's view
    Navigate(Selection),
    /// Nothing to open; put the caret back in the input
    FocusInput,
}

/// State of one search combobox.
#[derive(Debug, Clone, Default)]
pub struct Combobox {
    query: String,
    debounced_query: String,
    open: bool,
    active: Option<usize>,
    mobile: bool,
    outcome: SearchOutcome,
}

impl Combobox {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The query the current outcome was computed for.
    #[inline]
    pub fn debounced_query(&self) -> &str {
        &self.debounced_query
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Index of the highlighted option, `None` when nothing is highlighted.
    #[inline]
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    #[inline]
    pub fn outcome(&self) -> &SearchOutcome {
        &self.outcome
    }

    #[inline]
    pub fn item_count(&self) -> usize {
        self.outcome.item_count()
    }

    /// The option the user would commit to with Enter.
    pub fn active_selection(&self) -> Option<Selection> {
        self.active.and_then(|idx| self.outcome.selection_at(idx))
    }

    /// Layout hint only; never changes navigation.
    pub fn set_mobile(&mut self, mobile: bool) {
        self.mobile = mobile;
    }

    #[inline]
    pub fn is_mobile(&self) -> bool {
        self.mobile
    }

    /// The input text changed.
    pub fn input(&mut self, text: impl Into<String>) {
        self.query = text.into();
        if self.query.trim().is_empty() {
            self.open = false;
            self.active = None;
        } else {
            self.open = true;
        }
    }

    /// A debounced lookup finished. The highlight is cleared so it never
    /// points into a list the user has not seen.
    pub fn apply(&mut self, debounced_query: impl Into<String>, outcome: SearchOutcome) {
        self.debounced_query = debounced_query.into();
        self.outcome = outcome;
        self.active = None;
    }

    pub fn key(&mut self, key: Key) -> Option<Command> {
        if key == Key::Escape {
            self.dismiss();
            return None;
        }
        if !self.open {
            if key == Key::ArrowDown && !self.query.trim().is_empty() {
                self.open = true;
            }
            return None;
        }

        let count = self.item_count();
        if count == 0 {
            return None;
        }
        let last = count - 1;

        match key {
            Key::ArrowDown => {
                self.active = Some(self.active.map_or(0, |idx| (idx + 1).min(last)));
            }
            Key::ArrowUp => {
                self.active = Some(self.active.map_or(0, |idx| idx.saturating_sub(1)));
            }
            Key::Home => self.active = Some(0),
            Key::End => self.active = Some(last),
            Key::Enter => {
                let selection = self.active_selection()?;
                return Some(self.commit(selection));
            }
            Key::Escape => {}
        }
        None
    }

    /// Pointer moved over option `index`.
    pub fn hover(&mut self, index: usize) {
        if self.open && index < self.item_count() {
            self.active = Some(index);
        }
    }

    /// Option `index` was clicked.
    pub fn click(&mut self, index: usize) -> Option<Command> {
        if !self.open {
            return None;
        }
        let selection = self.outcome.selection_at(index)?;
        Some(self.commit(selection))
    }

    /// The search button: the highlighted option, else the best strict result,
    /// else nothing to open.
    pub fn submit(&mut self) -> Command {
        let selection = self.active_selection().or_else(|| {
            self.outcome.best_result().map(|hit| Selection::Record {
                slug: hit.slug().to_string(),
            })
        });
        match selection {
            Some(selection) => self.commit(selection),
            None => Command::FocusInput,
        }
    }

    /// The input regained focus.
    pub fn focus(&mut self) {
        if !self.query.trim().is_empty() {
            self.open = true;
        }
    }

    /// Escape or a click outside the widget. The text is kept.
    pub fn dismiss(&mut self) {
        self.open = false;
        self.active = None;
    }

    /// `aria-expanded` for the input.
    pub fn aria_expanded(&self) -> bool {
        self.open && self.item_count() > 0
    }

    /// `aria-activedescendant` for the input, given the listbox id prefix.
    pub fn active_descendant(&self, prefix: &str) -> Option<String> {
        if !self.open {
            return None;
        }
        self.active.map(|idx| format!("{prefix}-option-{idx}"))
    }

    fn commit(&mut self, selection: Selection) -> Command {
        tracing::debug!(?selection, query = %self.query, "Selection committed");
        *self = Self {
            mobile: self.mobile,
            ..Self::default()
        };
        Command::Navigate(selection)
    }
}
