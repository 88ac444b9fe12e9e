use super::rarity_color;
use crate::app::App;
use ember_exchange::lootbox::{RevealAnimation, FINAL_SLOT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of one strip cell, including its separator.
const CELL_WIDTH: u16 = 12;

/// Draws the scrolling lootbox strip with a fixed center marker.
pub fn draw_reveal_scene(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(255, 120, 40)))
        .title(" Lootbox ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Marker
            Constraint::Length(3), // Strip
            Constraint::Length(1), // Marker
            Constraint::Min(0),    // Status
        ])
        .split(inner);

    let marker = Paragraph::new("▼")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(marker, chunks[0]);

    match &app.reveal {
        Some(reveal) => draw_strip(frame, chunks[1], reveal),
        None => {
            let idle = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "[ sealed lootbox ]",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(idle, chunks[1]);
        }
    }

    frame.render_widget(
        Paragraph::new("▲")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow)),
        chunks[2],
    );

    let landed = app.reveal.as_ref().is_some_and(|r| r.is_finished());
    let status_style = if landed {
        let color = app
            .last_opening
            .as_ref()
            .map(|o| rarity_color(o.strip.final_item().rarity))
            .unwrap_or(Color::White);
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let status = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(app.status.clone(), status_style)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(status, chunks[3]);
}

fn draw_strip(frame: &mut Frame, area: Rect, reveal: &RevealAnimation) {
    // Odd cell count keeps the centered slot under the marker
    let mut cells = (area.width / CELL_WIDTH).max(1) as usize;
    if cells % 2 == 0 {
        cells -= 1;
    }

    let window = reveal.visible_window(cells);
    let centered = reveal.centered_slot();
    let items = reveal.strip().items();

    let mut spans = Vec::with_capacity(window.len() * 2);
    for slot in window {
        let category = &items[slot];
        let mut style = Style::default().fg(rarity_color(category.rarity));
        if slot == centered {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            if reveal.is_finished() && slot == FINAL_SLOT {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
        }
        let label = format!("{:^width$}", category.name(), width = CELL_WIDTH as usize - 1);
        spans.push(Span::styled(label, style));
        spans.push(Span::raw("│"));
    }

    let strip = Paragraph::new(vec![Line::from(""), Line::from(spans)]).alignment(Alignment::Center);
    frame.render_widget(strip, area);
}
