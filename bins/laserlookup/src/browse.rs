//! Interactive search in the terminal.
//!
//! Keys are read on a dedicated thread and fed to a single-threaded runtime
//! that also drives the debounce timer.

use anyhow::{Context, Result};
use console::{Key as TermKey, Term};
use laserlookup_cli::render::Renderer;
use laserlookup_search::{Command, Key, SearchEngine, SearchOutcome, SearchSettings, SearchWidget};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Below this many columns the compact layout is used.
const NARROW_COLUMNS: u16 = 60;

enum Action {
    Continue,
    Quit,
    Navigate(String),
}

/// Run the interactive search until the user commits or quits.
///
/// Returns the route of the committed selection, if any.
pub fn run(
    engine: Arc<SearchEngine>,
    settings: &SearchSettings,
    renderer: Renderer,
    current: Option<String>,
) -> Result<Option<String>> {
    let term = Term::stdout();
    if !term.is_term() {
        anyhow::bail!("browse needs an interactive terminal; use `laserlookup search` instead");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start runtime")?;

    let mut widget = SearchWidget::new(engine, settings);
    if let Some(slug) = current {
        widget = widget.with_current(slug);
    }
    let (_, columns) = term.size();
    widget.combobox_mut().set_mobile(columns < NARROW_COLUMNS);

    runtime.block_on(event_loop(widget, Screen::new(term, renderer)))
}

async fn event_loop(mut widget: SearchWidget, mut screen: Screen) -> Result<Option<String>> {
    let mut keys = spawn_key_reader(screen.term.clone());
    screen.draw(&widget)?;

    loop {
        tokio::select! {
            key = keys.recv() => {
                let Some(key) = key else {
                    screen.clear()?;
                    return Ok(None);
                };
                match handle_key(&mut widget, key) {
                    Action::Continue => {}
                    Action::Quit => {
                        screen.clear()?;
                        return Ok(None);
                    }
                    Action::Navigate(route) => {
                        screen.clear()?;
                        return Ok(Some(route));
                    }
                }
            }
            updated = widget.refresh() => {
                if !updated {
                    screen.clear()?;
                    return Ok(None);
                }
            }
        }
        screen.draw(&widget)?;
    }
}

fn spawn_key_reader(term: Term) -> mpsc::UnboundedReceiver<TermKey> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        while let Ok(key) = term.read_key() {
            if tx.send(key).is_err() {
                break;
            }
        }
    });
    rx
}

fn handle_key(widget: &mut SearchWidget, key: TermKey) -> Action {
    let command = match key {
        TermKey::Char('\u{3}' | '\u{4}') => return Action::Quit,
        TermKey::Char(c) if !c.is_control() => {
            let mut text = widget.combobox().query().to_string();
            text.push(c);
            widget.type_text(text);
            None
        }
        TermKey::Backspace => {
            let mut text = widget.combobox().query().to_string();
            text.pop();
            widget.type_text(text);
            None
        }
        TermKey::Escape if !widget.combobox().is_open() => return Action::Quit,
        TermKey::Escape => widget.key(Key::Escape),
        TermKey::ArrowDown => widget.key(Key::ArrowDown),
        TermKey::ArrowUp => widget.key(Key::ArrowUp),
        TermKey::Home => widget.key(Key::Home),
        TermKey::End => widget.key(Key::End),
        TermKey::Enter => widget.key(Key::Enter),
        // Tab stands in for the search button.
        TermKey::Tab => Some(widget.submit()),
        _ => None,
    };

    match command {
        Some(Command::Navigate(selection)) => {
            tracing::debug!(?selection, "Selection committed");
            Action::Navigate(widget.route(&selection))
        }
        Some(Command::FocusInput) => {
            widget.focus();
            Action::Continue
        }
        None => Action::Continue,
    }
}

struct Screen {
    term: Term,
    renderer: Renderer,
    drawn: usize,
}

impl Screen {
    fn new(term: Term, renderer: Renderer) -> Self {
        Self {
            term,
            renderer,
            drawn: 0,
        }
    }

    fn draw(&mut self, widget: &SearchWidget) -> io::Result<()> {
        self.clear()?;
        let combobox = widget.combobox();

        let mut lines = vec![format!("Search equipment: {}", combobox.query())];
        if combobox.is_open() {
            match combobox.outcome() {
                SearchOutcome::Results(results) if results.is_empty() => {
                    lines.push("  No matches".to_string());
                }
                SearchOutcome::Suggestions(_) => {
                    lines.push("  No matches. Did you mean:".to_string());
                }
                _ => {}
            }
            lines.extend(self.renderer.outcome_lines(combobox.outcome(), combobox.active_index()));
        }
        if !combobox.is_mobile() {
            lines.push("↑/↓ move · Enter open · Tab best match · Esc close".to_string());
        }

        for line in &lines {
            self.term.write_line(line)?;
        }
        self.drawn = lines.len();
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        if self.drawn > 0 {
            self.term.clear_last_lines(self.drawn)?;
            self.drawn = 0;
        }
        Ok(())
    }
}
