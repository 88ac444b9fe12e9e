pub mod reveal_scene;
pub mod stove_panel;

use crate::app::App;
use ember_exchange::lootbox::Rarity;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use reveal_scene::draw_reveal_scene;
use stove_panel::draw_stove_panel;

/// Main UI drawing function
pub fn draw_ui(frame: &mut Frame, app: &App) {
    let size = frame.size();

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Title
            Constraint::Length(10), // Reveal
            Constraint::Min(5),     // Stoves + market
            Constraint::Length(1),  // Footer
        ])
        .split(size);

    let title = Paragraph::new(Line::from(Span::styled(
        format!("EMBER EXCHANGE · player {}", app.config.player_id),
        Style::default()
            .fg(Color::Rgb(255, 120, 40))
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, v_chunks[0]);

    draw_reveal_scene(frame, v_chunks[1], app);
    draw_stove_panel(frame, v_chunks[2], app);
    draw_footer(frame, v_chunks[3]);
}

fn draw_footer(frame: &mut Frame, area: ratatui::layout::Rect) {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let footer = Line::from(vec![
        Span::styled("[Space]", key),
        Span::raw(" Open  "),
        Span::styled("[L]", key),
        Span::raw(" List newest  "),
        Span::styled("[C]", key),
        Span::raw(" Cancel listing  "),
        Span::styled("[Q]", key),
        Span::raw(" Quit"),
    ]);
    frame.render_widget(Paragraph::new(footer).alignment(Alignment::Center), area);
}

pub fn rarity_color(rarity: Rarity) -> Color {
    match rarity {
        Rarity::Common => Color::Gray,
        Rarity::Uncommon => Color::Green,
        Rarity::Rare => Color::Blue,
        Rarity::Epic => Color::Magenta,
        Rarity::Legendary => Color::Rgb(255, 165, 0),
    }
}
