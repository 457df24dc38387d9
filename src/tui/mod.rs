//! Interactive terminal form built on ratatui.
//!
//! The form shows one panel per concern: ingredient groups with their
//! `selected/cap` counters, the ingredients of the focused group, the brand
//! selector (only when a brand list was loaded) and the results panel with the
//! current selection and the last predicted rating.
//!
//! All state lives in [`FormApp`]; input is polled on a background thread and
//! applied on the main loop.

mod app;
pub(crate) mod constants;
mod events;
pub mod log_gate;
pub mod state;
pub mod theme;
mod ui;
pub mod viewmodel;

pub use app::{FocusPanel, FormApp, PredictorStatus};
pub use events::{handle_key_event, Event, EventHandler};
pub use log_gate::{gated, pause_terminal_logs, terminal_logs_paused, TerminalLogPause};
pub use state::ListState;
pub use theme::{colors, current_theme_name, set_theme, toggle_theme, ColorScheme, Styles, Theme};
pub use ui::{render, run_form_tui};
pub use viewmodel::{StatusLevel, StatusMessage};
