//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::config::UiSettings;
use crate::player::{PlaybackState, Player};

/// Render the controls help text.
fn controls_text() -> String {
    [
        ("j/k", "up/down"),
        ("h/l", "prev/next song"),
        ("enter", "play selected song"),
        ("space/p", "play/pause"),
        ("gg/G", "top/bottom"),
        ("R", "refresh catalog"),
        ("q", "quit"),
    ]
    .iter()
    .map(|(k, v)| format!("[{}] {}", k, v))
    .collect::<Vec<String>>()
    .join(" | ")
}

/// Build the status line shown under the header.
fn status_text(player: &Player, error: Option<&str>, fetching: bool) -> String {
    let mut parts: Vec<String> = Vec::new();

    let state_text = match player.state() {
        PlaybackState::Empty => "No tracks",
        PlaybackState::Stopped => "Stopped",
        PlaybackState::Paused => "Paused",
        PlaybackState::Playing => "Playing",
    };
    parts.push(state_text.to_string());

    if let Some(track) = player.current() {
        parts.push(format!("Song: {}", track.name));
    }

    parts.push(format!("Tracks: {}", player.tracks().len()));

    if fetching {
        parts.push("Refreshing catalog...".to_string());
    }

    if let Some(msg) = error {
        parts.push(format!("ERROR: {}", msg));
    }

    parts.join(" • ")
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    player: &Player,
    cursor: usize,
    error: Option<&str>,
    fetching: bool,
    ui_settings: &UiSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" remotune ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status_par = Paragraph::new(status_text(player, error, fetching))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Track list
    {
        let tracks = player.tracks();

        // Center the cursor when possible by rendering a visible window.
        // Only build ListItems for that window (avoid allocating the entire list).
        let total = tracks.len();
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let sel_pos = cursor.min(total.saturating_sub(1));
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = if sel_pos > half { sel_pos - half } else { 0 };
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let visible_items: Vec<ListItem> = tracks[start..end]
            .iter()
            .map(|t| ListItem::new(t.name.as_str()))
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

    // Controls footer
    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}
