//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, InputMode, Status, ViewFilter};
use crate::config::Settings;
use crate::library::{Track, row_from_fields};
use crate::playback::{PlaybackState, Player};

const CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("gg/G", "top/bottom"),
    ("enter", "play selected"),
    ("p", "play first"),
    ("s", "stop"),
    ("d", "remove"),
    ("K", "details"),
    ("/", "filter title"),
    (":", "command"),
    ("esc", "clear filter"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn row_text(track: &Track, settings: &Settings) -> String {
    let row = if settings.ui.show_details {
        track.details()
    } else {
        row_from_fields(
            track,
            &settings.library.row_fields,
            &settings.library.row_separator,
        )
    };
    match track.duration {
        Some(d) => format!("{row} [{}]", format_mmss(d)),
        None => row,
    }
}

fn status_text<P: Player>(app: &App<P>) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(match app.organizer.playback_state() {
        PlaybackState::Playing => " PLAYBACK: Playing".to_string(),
        PlaybackState::Idle => " PLAYBACK: Idle".to_string(),
    });
    parts.push(format!("TRACKS: {}", app.organizer.number_of_tracks()));

    match &app.filter {
        ViewFilter::None => {}
        ViewFilter::Artist(a) => parts.push(format!("ARTIST: {a}")),
        ViewFilter::Title(t) => parts.push(format!("TITLE: {t}")),
    }

    if let Some(dir) = &app.current_dir {
        parts.push(format!("Dir: {dir}"));
    }

    parts.join(" • ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn left_padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw<P: Player>(frame: &mut Frame, app: &App<P>, display: &[usize], settings: &Settings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(settings.ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" organizer ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status_par = Paragraph::new(status_text(app))
        .block(left_padded(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Main list
    {
        // Only build ListItems for the visible window, centered on the selection.
        let total = display.len();
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let sel_pos = display.iter().position(|&i| i == app.selected).unwrap_or(0);
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = sel_pos.saturating_sub(half);
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let store = app.organizer.store();
        let visible_items: Vec<ListItem> = display[start..end]
            .iter()
            .filter_map(|&i| store.get(i).ok().map(|t| (i, t)))
            .map(|(i, t)| ListItem::new(format!("{i:>4}  {}", row_text(t, settings))))
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    // Overlay popup (details or config), kept inside the list area.
    if let Some(text) = &app.popup {
        let lines = text.lines().count() as u16;
        let popup_area = centered_rect_sized(80, lines.saturating_add(2).max(5), chunks[2]);
        frame.render_widget(Clear, popup_area);
        let popup = Paragraph::new(text.as_str())
            .block(left_padded(" info (K closes) "))
            .wrap(Wrap { trim: false });
        frame.render_widget(popup, popup_area);
    }

    // Input line: prompt while typing, otherwise the last message.
    let input = match app.mode {
        InputMode::Command => Paragraph::new(format!(":{}", app.input)),
        InputMode::Filter => Paragraph::new(format!("/{}", app.input)),
        InputMode::Normal => match &app.status {
            Some(Status::Info(m)) => Paragraph::new(m.as_str()),
            Some(Status::Error(m)) => {
                Paragraph::new(m.as_str()).style(Style::default().fg(Color::Red))
            }
            None => Paragraph::new(""),
        },
    };
    frame.render_widget(input.block(left_padded(" message ")), chunks[3]);

    let footer = Paragraph::new(controls_text())
        .block(left_padded(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}
