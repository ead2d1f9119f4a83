//! A complete search input: debounced lookups feeding a combobox.

use crate::combobox::{Combobox, Command, Key};
use crate::debounce::Debouncer;
use crate::engine::{SearchEngine, SearchOutcome, SearchSettings, Selection};
use std::sync::Arc;
use tokio::sync::watch;

/// One search input with its own state and debounce timer.
///
/// Widgets share an engine but nothing else. Dropping a widget cancels its
/// pending lookup.
#[derive(Debug)]
pub struct SearchWidget {
    engine: Arc<SearchEngine>,
    combobox: Combobox,
    debouncer: Debouncer<String>,
    updates: watch::Receiver<String>,
    current: Option<String>,
    route_namespace: String,
}

impl SearchWidget {
    pub fn new(engine: Arc<SearchEngine>, settings: &SearchSettings) -> Self {
        let debouncer = Debouncer::new(String::new(), settings.debounce);
        let updates = debouncer.subscribe();
        Self {
            engine,
            combobox: Combobox::new(),
            debouncer,
            updates,
            current: None,
            route_namespace: settings.route_namespace.clone(),
        }
    }

    /// Mark the record being viewed so it is not suggested as related.
    pub fn with_current(mut self, slug: impl Into<String>) -> Self {
        self.current = Some(slug.into());
        self
    }

    #[inline]
    pub fn combobox(&self) -> &Combobox {
        &self.combobox
    }

    pub fn combobox_mut(&mut self) -> &mut Combobox {
        &mut self.combobox
    }

    #[inline]
    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// The input text changed. Must run inside a Tokio runtime.
    pub fn type_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.combobox.input(text.clone());
        self.debouncer.set(text);
    }

    /// Wait for the next debounced query, look it up and show the outcome.
    pub async fn next_update(&mut self) -> Option<&SearchOutcome> {
        if self.refresh().await {
            Some(self.combobox.outcome())
        } else {
            None
        }
    }

    /// Like [`SearchWidget::next_update`], reporting only whether an update
    /// was applied.
    pub async fn refresh(&mut self) -> bool {
        if self.updates.changed().await.is_err() {
            return false;
        }
        let query = self.updates.borrow_and_update().clone();
        let outcome = self.engine.lookup(&query, self.current.as_deref());
        tracing::debug!(query = %query, items = outcome.item_count(), "Search outcome updated");
        self.combobox.apply(query, outcome);
        true
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn key(&mut self, key: Key) -> Option<Command> {
        let command = self.combobox.key(key);
        self.after(command.as_ref());
        command
    }

    pub fn click(&mut self, index: usize) -> Option<Command> {
        let command = self.combobox.click(index);
        self.after(command.as_ref());
        command
    }

    pub fn submit(&mut self) -> Command {
        let command = self.combobox.submit();
        self.after(Some(&command));
        command
    }

    pub fn hover(&mut self, index: usize) {
        self.combobox.hover(index);
    }

    pub fn focus(&mut self) {
        self.combobox.focus();
    }

    /// Escape or outside click.
    pub fn dismiss(&mut self) {
        self.combobox.dismiss();
    }

    /// Route for a committed selection.
    pub fn route(&self, selection: &Selection) -> String {
        selection.route(&self.route_namespace)
    }

    /// A commit cleared the text; a keystroke still waiting must not reopen it.
    fn after(&mut self, command: Option<&Command>) {
        if matches!(command, Some(Command::Navigate(_))) {
            self.debouncer.set_now(String::new());
            self.updates.borrow_and_update();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::engine;
    use std::time::Duration;
    use tokio::time::{Instant, timeout};

    fn widget() -> SearchWidget {
        SearchWidget::new(Arc::new(engine()), &SearchSettings::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_burst_runs_one_lookup() {
        let mut widget = widget();
        for text in ["g", "gentle", "gentle max", "gentle max pro"] {
            widget.type_text(text);
        }
        assert!(widget.combobox().is_open());
        assert!(widget.combobox().outcome().is_idle());

        let started = Instant::now();
        let outcome = widget.next_update().await.unwrap();
        assert_eq!(outcome.selection_at(0).unwrap().slug(), Some("gentlemax-pro"));
        assert!(started.elapsed() >= Duration::from_millis(150));
        assert_eq!(widget.combobox().debounced_query(), "gentle max pro");

        assert!(timeout(Duration::from_secs(1), widget.next_update()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_typo_shows_suggestions() {
        let mut widget = widget();
        widget.type_text("gentlemx pro");
        let outcome = widget.next_update().await.unwrap();
        assert!(matches!(outcome, SearchOutcome::Suggestions(s) if s[0].slug == "gentlemax-pro"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_clears_pending_input() {
        let mut widget = widget();
        widget.type_text("candela");
        widget.next_update().await.unwrap();

        widget.type_text("candela g");
        widget.key(Key::ArrowDown);
        let command = widget.key(Key::Enter).unwrap();
        let Command::Navigate(selection) = command else {
            panic!("expected navigation");
        };
        assert_eq!(widget.route(&selection), "/equipment/gentlemax-pro");
        assert_eq!(widget.combobox().query(), "");
        assert!(!widget.is_pending());

        assert!(timeout(Duration::from_secs(1), widget.next_update()).await.is_err());
        assert!(!widget.combobox().is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_current_record_not_related() {
        let mut widget = widget().with_current("gentlemax-pro");
        widget.type_text("Candela GentleMax");
        let outcome = widget.next_update().await.unwrap();
        assert_eq!(outcome.selection_at(0).unwrap().slug(), Some("gentlelase-pro"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_without_results() {
        let mut widget = widget();
        widget.type_text("zzzzzz");
        widget.next_update().await.unwrap();
        assert_eq!(widget.submit(), Command::FocusInput);
        assert_eq!(widget.combobox().query(), "zzzzzz");
    }
}
