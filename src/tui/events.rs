//! Terminal input for the form.

use super::app::FormApp;
use super::state::ListState;
use crate::config::TuiPreferences;
use crate::tui::theme::toggle_theme;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Terminal events.
#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

/// Polls crossterm on a background thread and forwards events.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    _tx: mpsc::Sender<Event>,
}

impl EventHandler {
    #[must_use]
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        let event_tx = tx.clone();
        thread::spawn(move || loop {
            let event = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(CrosstermEvent::Key(key)) => Event::Key(key),
                    Ok(CrosstermEvent::Resize(w, h)) => Event::Resize(w, h),
                    _ => continue,
                }
            } else {
                Event::Tick
            };
            if event_tx.send(event).is_err() {
                break;
            }
        });

        Self { rx, _tx: tx }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx.recv().map_err(io::Error::other)
    }
}

/// Handle a key press.
pub fn handle_key_event(app: &mut FormApp, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?' | 'q')) {
            app.show_help = false;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Tab => app.next_panel(),
        KeyCode::BackTab => app.prev_panel(),
        KeyCode::Down | KeyCode::Char('j') => app.navigate(ListState::select_next),
        KeyCode::Up | KeyCode::Char('k') => app.navigate(ListState::select_prev),
        KeyCode::PageDown => app.navigate(ListState::page_down),
        KeyCode::PageUp => app.navigate(ListState::page_up),
        KeyCode::Home | KeyCode::Char('g') => app.navigate(ListState::go_first),
        KeyCode::End | KeyCode::Char('G') => app.navigate(ListState::go_last),
        KeyCode::Right | KeyCode::Char('l') => app.next_panel(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_panel(),
        KeyCode::Char(' ') | KeyCode::Enter => app.activate(),
        KeyCode::Char('s') => app.submit(),
        KeyCode::Char('r') => app.reset(),
        KeyCode::Char('T') => {
            let theme_name = toggle_theme();
            let prefs = TuiPreferences {
                theme: theme_name.to_string(),
            };
            if let Err(e) = prefs.save() {
                tracing::debug!("could not save preferences: {e}");
            }
            app.status.set(format!("Theme: {theme_name}"));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::tests::app;
    use crate::tui::app::FocusPanel;

    fn press(app: &mut FormApp, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_navigation_keys() {
        let mut app = app(&[]);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.groups_list.selected, 1);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, FocusPanel::Ingredients);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.current_ingredient(), Some("honey"));
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, FocusPanel::Groups);
    }

    #[test]
    fn test_toggle_submit_reset() {
        let mut app = app(&[]);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus, FocusPanel::Ingredients);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.selection.is_selected("flavors", "vanilla"));

        press(&mut app, KeyCode::Char('s'));
        assert!(app.last_prediction.is_some());

        press(&mut app, KeyCode::Char('r'));
        assert!(app.selection.is_empty());
        assert!(app.last_prediction.is_none());
    }

    #[test]
    fn test_esc_closes_help_before_quitting() {
        let mut app = app(&[]);
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.groups_list.selected, 0);

        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app(&[]);
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }
}
