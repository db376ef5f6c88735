//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`, plus the
//! hit-testing that turns mouse clicks into player actions.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, Capabilities};
use crate::audio::PlaybackBridge;
use crate::config::Settings;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "cursor");
    map.insert("enter", "play row");
    map.insert("space/p", "play/pause");
    map.insert("h/l", "prev/next");
    map.insert("0-9", "seek 0-90%");
    map.insert("-/+", "volume");
    map.insert("m", "mute");
    map.insert("q", "quit");
    map
});

/// Render the controls help text for the enabled capabilities.
fn controls_text(skip_seconds: u64, capabilities: Capabilities) -> String {
    let order = [
        "j/k", "enter", "space/p", "h/l", "←/→", "0-9", "-/+", "m", "q",
    ];
    order
        .iter()
        .filter_map(|k| match *k {
            "←/→" if capabilities.skip => Some(format!("[←/→] -/+{skip_seconds}s")),
            "←/→" => None,
            "m" if !capabilities.mute => None,
            _ => CONTROLS_MAP.get(k).map(|v| format!("[{k}] {v}")),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Screen regions, shared between drawing and mouse hit-testing.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ViewLayout {
    pub header: Rect,
    pub playlist: Rect,
    pub now_playing: Rect,
    pub progress: Rect,
    pub transport: Rect,
    pub volume: Rect,
    pub footer: Rect,
}

impl ViewLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(4),
            ])
            .split(area);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[1]);
        let player = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(columns[1]);

        Self {
            header: rows[0],
            playlist: columns[0],
            now_playing: player[0],
            progress: player[1],
            transport: player[2],
            volume: player[3],
            footer: rows[2],
        }
    }
}

/// Area inside a one-cell border.
fn inner(r: Rect) -> Rect {
    Rect {
        x: r.x.saturating_add(1),
        y: r.y.saturating_add(1),
        width: r.width.saturating_sub(2),
        height: r.height.saturating_sub(2),
    }
}

fn contains(r: Rect, column: u16, row: u16) -> bool {
    column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
}

/// Visible slice `[start, end)` of a list of `total` rows in `height` lines,
/// keeping `selected` centred when possible.
pub fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

/// Playlist index under a click, if any.
pub fn playlist_row_at(
    layout: &ViewLayout,
    total: usize,
    cursor: usize,
    column: u16,
    row: u16,
) -> Option<usize> {
    let list = inner(layout.playlist);
    if !contains(list, column, row) {
        return None;
    }
    let (start, end) = visible_window(total, list.height as usize, cursor);
    let index = start + (row - list.y) as usize;
    (index < end).then_some(index)
}

/// Seek percent for a click on the progress bar, if the click landed on it.
pub fn progress_percent_at(layout: &ViewLayout, column: u16, row: u16) -> Option<f64> {
    let bar = inner(layout.progress);
    if !contains(bar, column, row) {
        return None;
    }
    let span = bar.width.saturating_sub(1).max(1) as f64;
    Some(((column - bar.x) as f64 / span * 100.0).clamp(0.0, 100.0))
}

/// A clickable transport control.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransportButton {
    Rewind,
    Previous,
    PlayPause,
    Next,
    FastForward,
}

impl TransportButton {
    fn icon(self, playing: bool) -> &'static str {
        match self {
            Self::Rewind => "⏪",
            Self::Previous => "⏮",
            Self::PlayPause if playing => "⏸",
            Self::PlayPause => "▶",
            Self::Next => "⏭",
            Self::FastForward => "⏩",
        }
    }
}

/// Transport buttons left to right, each with its cell inside the
/// transport panel.
pub fn transport_cells(
    layout: &ViewLayout,
    capabilities: Capabilities,
) -> Vec<(TransportButton, Rect)> {
    let mut buttons = Vec::with_capacity(5);
    if capabilities.skip {
        buttons.push(TransportButton::Rewind);
    }
    buttons.extend([
        TransportButton::Previous,
        TransportButton::PlayPause,
        TransportButton::Next,
    ]);
    if capabilities.skip {
        buttons.push(TransportButton::FastForward);
    }

    let count = buttons.len() as u32;
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(buttons.iter().map(|_| Constraint::Ratio(1, count)))
        .split(inner(layout.transport));
    buttons.into_iter().zip(cells.iter().copied()).collect()
}

pub fn transport_button_at(
    layout: &ViewLayout,
    capabilities: Capabilities,
    column: u16,
    row: u16,
) -> Option<TransportButton> {
    transport_cells(layout, capabilities)
        .into_iter()
        .find(|(_, cell)| contains(*cell, column, row))
        .map(|(button, _)| button)
}

const MUTE_BUTTON_WIDTH: u16 = 4;

/// Mute button (when the mute control is enabled) and level bar inside the
/// volume panel.
pub fn volume_regions(layout: &ViewLayout, capabilities: Capabilities) -> (Option<Rect>, Rect) {
    let area = inner(layout.volume);
    if !capabilities.mute {
        return (None, area);
    }
    let width = MUTE_BUTTON_WIDTH.min(area.width);
    let button = Rect { width, ..area };
    let bar = Rect {
        x: area.x + width,
        width: area.width - width,
        ..area
    };
    (Some(button), bar)
}

/// What a click in the volume panel asks for.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum VolumeClick {
    ToggleMute,
    /// Whole-percent level in `[0, 1]`.
    Level(f32),
}

pub fn volume_click_at(
    layout: &ViewLayout,
    capabilities: Capabilities,
    column: u16,
    row: u16,
) -> Option<VolumeClick> {
    let (button, bar) = volume_regions(layout, capabilities);
    if button.is_some_and(|b| contains(b, column, row)) {
        return Some(VolumeClick::ToggleMute);
    }
    if !contains(bar, column, row) {
        return None;
    }
    let span = bar.width.saturating_sub(1).max(1) as f32;
    let level = ((column - bar.x) as f32 / span).clamp(0.0, 1.0);
    Some(VolumeClick::Level((level * 100.0).round() / 100.0))
}

fn padded_block(title: &str) -> Block<'_> {
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

/// Render the entire UI and return the layout it used.
pub fn draw<B: PlaybackBridge>(frame: &mut Frame, app: &App<B>, settings: &Settings) -> ViewLayout {
    let layout = ViewLayout::new(frame.area());
    let state = app.state();
    let capabilities = app.controller.capabilities();
    let track = app.controller.current_track();

    // Header
    let header = Paragraph::new(settings.ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" rondo ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, layout.header);

    // Playlist: only build ListItems for the visible window.
    {
        let tracks = app.playlist().tracks();
        let height = inner(layout.playlist).height as usize;
        let (start, end) = visible_window(tracks.len(), height, app.cursor);

        let items: Vec<ListItem> = tracks[start..end]
            .iter()
            .enumerate()
            .map(|(offset, t)| {
                let item = ListItem::new(t.name.as_str());
                if start + offset == state.current_index {
                    item.style(Style::default().bg(Color::Red).fg(Color::White))
                } else {
                    item
                }
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" playlist "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut list_state = ListState::default();
        list_state.select(Some(app.cursor - start));
        frame.render_stateful_widget(list, layout.playlist, &mut list_state);
    }

    // Now playing
    {
        let mut lines = vec![Line::from(track.name.as_str()).bold().centered()];
        if settings.ui.show_artwork {
            let art = match &track.artwork_source {
                Some(path) => format!("artwork: {}", path.display()),
                None => "artwork: -".to_string(),
            };
            lines.push(Line::from(art).dim().centered());
        }
        if let Some(err) = &state.last_error {
            lines.push(Line::from(""));
            lines.push(Line::from(format!("error: {err}")).fg(Color::Red));
        }
        let now_playing = Paragraph::new(lines)
            .block(padded_block(" now playing "))
            .wrap(Wrap { trim: true });
        frame.render_widget(now_playing, layout.now_playing);
    }

    // Progress
    let progress = Gauge::default()
        .block(Block::bordered().title(" progress "))
        .gauge_style(Style::default().fg(Color::Red))
        .ratio((state.progress_percent / 100.0).clamp(0.0, 1.0))
        .label(format!(
            "{} / {}",
            state.current_time_label, state.duration_label
        ));
    frame.render_widget(progress, layout.progress);

    // Transport
    {
        let status = if state.is_playing { " playing " } else { " paused " };
        frame.render_widget(Block::bordered().title(status), layout.transport);
        for (button, cell) in transport_cells(&layout, capabilities) {
            let mut span = Span::raw(button.icon(state.is_playing));
            if button == TransportButton::PlayPause {
                span = span.style(Style::default().fg(Color::Red).bold());
            }
            frame.render_widget(
                Paragraph::new(Line::from(span)).alignment(Alignment::Center),
                cell,
            );
        }
    }

    // Volume: the bar reads empty while muted, the stored level survives.
    {
        frame.render_widget(Block::bordered().title(" volume "), layout.volume);
        let (button, bar) = volume_regions(&layout, capabilities);
        if let Some(button) = button {
            let icon = if state.is_muted { "🔇" } else { "🔊" };
            frame.render_widget(Paragraph::new(icon).alignment(Alignment::Center), button);
        }
        let (ratio, label) = if state.is_muted {
            (0.0, "muted".to_string())
        } else {
            (
                f64::from(state.volume),
                format!("{:.0}%", state.volume * 100.0),
            )
        };
        let volume = Gauge::default()
            .gauge_style(Style::default().fg(Color::Gray))
            .ratio(ratio.clamp(0.0, 1.0))
            .label(label);
        frame.render_widget(volume, bar);
    }

    let footer = Paragraph::new(controls_text(settings.controls.skip_seconds, capabilities))
        .block(padded_block(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, layout.footer);

    layout
}
