//! Rendering and the main loop of the form.

use super::app::{FocusPanel, FormApp, PredictorStatus};
use super::constants::{
    BRANDS_PANEL_HEIGHT, GROUPS_PANEL_PERCENT, RESULTS_PANEL_PERCENT, TICK_RATE,
};
use super::events::{handle_key_event, Event, EventHandler};
use super::log_gate::pause_terminal_logs;
use super::theme::{
    band_badge, colors, count_badge, render_footer_hints, set_theme, FooterHints, Styles, Theme,
};
use super::viewmodel::StatusLevel;
use crate::catalog::display_name;
use crate::config::TuiPreferences;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState as WidgetListState, Paragraph, Wrap},
};
use std::io::{self, stdout};

pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 20;

/// Run the form until the user quits.
///
/// `theme` is the configured theme and `theme_override` the one given on the
/// command line. See [`resolve_theme_name`] for the precedence.
pub fn run_form_tui(
    app: &mut FormApp,
    theme: &str,
    theme_override: Option<&str>,
) -> io::Result<()> {
    let theme_name = resolve_theme_name(theme, theme_override, TuiPreferences::saved());
    set_theme(Theme::from_name(&theme_name));

    let _log_pause = pause_terminal_logs();
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(TICK_RATE);

    let result = event_loop(&mut terminal, &events, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Pick the theme for this run.
///
/// A `--theme` flag beats the preference saved with `T`, which beats
/// `tui.theme` from the config file.
#[must_use]
pub fn resolve_theme_name(
    configured: &str,
    cli_override: Option<&str>,
    saved: Option<TuiPreferences>,
) -> String {
    match (cli_override, saved) {
        (Some(name), _) => name.to_string(),
        (None, Some(prefs)) => prefs.theme,
        (None, None) => configured.to_string(),
    }
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    events: &EventHandler,
    app: &mut FormApp,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            Event::Key(key) => handle_key_event(app, key),
            Event::Resize(_, _) => {}
            Event::Tick => app.tick += 1,
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Draw the whole form.
pub fn render(frame: &mut Frame, app: &mut FormApp) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_size_warning(frame, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(8),    // Panels
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, chunks[0], app);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(GROUPS_PANEL_PERCENT),
            Constraint::Min(20),
            Constraint::Percentage(RESULTS_PANEL_PERCENT),
        ])
        .split(chunks[1]);

    render_groups(frame, columns[0], app);

    if app.is_brand_aware() {
        let middle = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(4), Constraint::Length(BRANDS_PANEL_HEIGHT)])
            .split(columns[1]);
        render_ingredients(frame, middle[0], app);
        render_brands(frame, middle[1], app);
    } else {
        render_ingredients(frame, columns[1], app);
    }

    render_results(frame, columns[2], app);
    render_status_bar(frame, chunks[2], app);
    render_footer(frame, chunks[3], app);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn panel_block(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if focused {
            Styles::border_focused()
        } else {
            Styles::border()
        })
}

fn render_header(frame: &mut Frame, area: Rect, app: &FormApp) {
    let model = match &app.predictor {
        PredictorStatus::Ready(p) => {
            Span::styled(format!("model: {}", p.model_name()), Styles::text_muted())
        }
        PredictorStatus::Unavailable(_) => Span::styled("model unavailable", Styles::error()),
    };
    let line = Line::from(vec![
        Span::styled(" Ice Cream Ingredient Selector ", Styles::header_title()),
        Span::styled("│ ", Styles::label()),
        model,
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_groups(frame: &mut Frame, area: Rect, app: &FormApp) {
    let items: Vec<ListItem> = app
        .catalog
        .groups()
        .map(|group| {
            let name = group.name();
            let count = app.selection.count(name);
            let full = app.selection.is_at_capacity(name);
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", group.display_name()), Styles::text()),
                count_badge(count, group.cap(), full),
            ]))
        })
        .collect();

    let focused = app.focus == FocusPanel::Groups;
    let list = List::new(items)
        .block(panel_block(" Groups ".to_string(), focused))
        .highlight_style(Styles::selected())
        .highlight_symbol("▶ ");
    let mut state = WidgetListState::default().with_selected(Some(app.groups_list.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_ingredients(frame: &mut Frame, area: Rect, app: &FormApp) {
    let focused = app.focus == FocusPanel::Ingredients;
    let Some(group) = app.current_group() else {
        frame.render_widget(panel_block(" Ingredients ".to_string(), focused), area);
        return;
    };

    let items: Vec<ListItem> = group
        .ingredients()
        .map(|ingredient| {
            let checked = app.selection.is_selected(group.name(), ingredient);
            let (mark, style) = if checked {
                ("[x] ", Styles::checked())
            } else if app.is_disabled(group.name(), ingredient) {
                ("[ ] ", Styles::disabled())
            } else {
                ("[ ] ", Styles::text())
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, style),
                Span::styled(ingredient.to_string(), style),
            ]))
        })
        .collect();

    let title = format!(
        " {} (max {}) ",
        group.display_name(),
        match group.cap().limit() {
            Some(n) => n.to_string(),
            None => "no limit".to_string(),
        }
    );
    let list = List::new(items)
        .block(panel_block(title, focused))
        .highlight_style(if focused {
            Styles::selected()
        } else {
            Style::default()
        })
        .highlight_symbol("› ");
    let mut state = WidgetListState::default().with_selected(Some(app.ingredients_list.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_brands(frame: &mut Frame, area: Rect, app: &FormApp) {
    let current = app.selection.brand();
    let items: Vec<ListItem> = app
        .brands
        .iter()
        .map(|brand| {
            if current == Some(brand.as_str()) {
                ListItem::new(Line::from(vec![
                    Span::styled("(•) ", Styles::brand()),
                    Span::styled(brand.clone(), Styles::brand()),
                ]))
            } else {
                ListItem::new(Line::from(vec![
                    Span::styled("( ) ", Styles::text_muted()),
                    Span::styled(brand.clone(), Styles::text()),
                ]))
            }
        })
        .collect();

    let focused = app.focus == FocusPanel::Brands;
    let list = List::new(items)
        .block(panel_block(" Brand ".to_string(), focused))
        .highlight_style(if focused {
            Styles::selected()
        } else {
            Style::default()
        });
    let mut state = WidgetListState::default().with_selected(Some(app.brands_list.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_results(frame: &mut Frame, area: Rect, app: &FormApp) {
    let mut lines: Vec<Line> = Vec::new();

    for (group, chosen) in app.selection.groups() {
        if chosen.is_empty() {
            continue;
        }
        lines.push(Line::styled(display_name(group), Styles::header_title()));
        for ingredient in chosen {
            lines.push(Line::styled(format!("  - {ingredient}"), Styles::text()));
        }
    }
    if app.selection.is_empty() {
        lines.push(Line::styled("No ingredients selected yet.", Styles::text_muted()));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Total selected: ", Styles::label()),
        Span::styled(app.selection.total_selected().to_string(), Styles::value()),
    ]));
    if app.is_brand_aware() {
        lines.push(Line::from(vec![
            Span::styled("Brand: ", Styles::label()),
            match app.selection.brand() {
                Some(brand) => Span::styled(brand.to_string(), Styles::brand()),
                None => Span::styled("none", Styles::text_muted()),
            },
        ]));
    }

    lines.push(Line::from(""));
    match &app.last_prediction {
        Some(prediction) => {
            lines.push(Line::from(vec![
                Span::styled("Predicted rating: ", Styles::label()),
                Span::styled(
                    prediction.rating.to_string(),
                    Style::default()
                        .fg(colors().band_color(prediction.band))
                        .bold(),
                ),
                Span::raw(" "),
                band_badge(prediction.band),
            ]));
            if !prediction.unrecognized.is_empty() {
                lines.push(Line::styled(
                    format!(
                        "{} selection(s) not known to the model",
                        prediction.unrecognized.len()
                    ),
                    Styles::text_muted(),
                ));
            }
        }
        None => {
            let readiness = app.readiness();
            let hint = match readiness.reason() {
                _ if !app.predictor_available() => {
                    Line::styled("Prediction unavailable", Styles::error())
                }
                Some(reason) => {
                    Line::styled(format!("Submit disabled: {reason}"), Styles::text_muted())
                }
                None => Line::styled("Press [s] to predict the rating", Styles::shortcut_key()),
            };
            lines.push(hint);
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(panel_block(" Selected Ingredients ".to_string(), false))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &mut FormApp) {
    let level = app.status.level();
    let line = match app.status.message() {
        Some(msg) => {
            let (icon, style) = match level {
                StatusLevel::Info => ("ℹ ", Styles::success()),
                StatusLevel::Warning => ("⚠ ", Styles::warning().bold()),
                StatusLevel::Error => ("✖ ", Styles::error().bold()),
            };
            Line::from(vec![Span::styled(icon, style), Span::styled(msg.to_string(), style)])
        }
        None => Line::from(vec![
            Span::styled(" Groups: ", Styles::label()),
            Span::styled(app.catalog.len().to_string(), Styles::value()),
            Span::styled(" │ Ingredients: ", Styles::label()),
            Span::styled(app.catalog.total_ingredients().to_string(), Styles::value()),
            Span::styled(" │ Selected: ", Styles::label()),
            Span::styled(app.selection.total_selected().to_string(), Styles::value()),
        ]),
    };
    frame.render_widget(Paragraph::new(line).style(Styles::status_bar()), area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &FormApp) {
    let hints = FooterHints::for_panel(app.focus.name());
    let footer = Paragraph::new(Line::from(render_footer_hints(&hints)))
        .alignment(Alignment::Center)
        .style(Styles::text_muted());
    frame.render_widget(footer, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let entries = [
        ("Tab / Shift+Tab", "Move focus between panels"),
        ("↑/↓ or j/k", "Move the cursor"),
        ("PgUp/PgDn", "Move by a page"),
        ("Home/End", "First / last item"),
        ("Enter/Space", "Open group, toggle ingredient, pick brand"),
        ("s", "Submit and predict the rating"),
        ("r", "Reset all selections"),
        ("T", "Cycle theme (dark, light, high contrast)"),
        ("?", "Toggle this help"),
        ("q / Esc", "Quit"),
    ];

    let mut lines = vec![
        Line::styled("━━━ Ingredient Selector Help ━━━", Styles::shortcut_key().bold()),
        Line::from(""),
    ];
    lines.extend(entries.iter().map(|(key, desc)| {
        Line::from(vec![
            Span::styled(format!("  {key:<17}"), Styles::shortcut_key()),
            Span::styled(*desc, Styles::text()),
        ])
    }));
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "Greyed-out ingredients belong to a group that is already full.",
        Styles::text_muted(),
    ));

    let help = Paragraph::new(lines)
        .block(panel_block(" Help ".to_string(), true))
        .wrap(Wrap { trim: false });
    frame.render_widget(help, popup_area);
}

fn render_size_warning(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::styled("Terminal too small", Styles::warning().bold()),
        Line::from(""),
        Line::from(format!("Current: {}x{}", area.width, area.height)),
        Line::from(format!("Required: {MIN_WIDTH}x{MIN_HEIGHT}")),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// A rectangle centered in `r`, sized as a percentage of it.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
