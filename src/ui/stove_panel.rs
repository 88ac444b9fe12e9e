use super::rarity_color;
use crate::app::App;
use ember_exchange::lootbox::Rarity;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draws owned stoves (left) and open listings (right) side by side
pub fn draw_stove_panel(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_owned_stoves(frame, chunks[0], app);
    draw_listings(frame, chunks[1], app);
}

fn draw_owned_stoves(frame: &mut Frame, area: Rect, app: &App) {
    let player = app.config.player_id;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Your Stoves · {} coins ", app.ledger.balance(player)));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let owned = app.ledger.stoves_owned_by(player);
    if owned.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Nothing yet - open a lootbox!",
                Style::default().fg(Color::DarkGray),
            )),
            inner,
        );
        return;
    }

    // Newest first
    let lines: Vec<Line> = owned
        .iter()
        .rev()
        .take(inner.height as usize)
        .map(|stove| {
            let color = stove.rarity().map(rarity_color).unwrap_or(Color::White);
            let listed = app.ledger.listing(stove.id).is_some();
            Line::from(vec![
                Span::styled(
                    format!("{:>5} ", stove.id.to_string()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(stove.name.clone(), Style::default().fg(color)),
                if listed {
                    Span::styled(" (listed)", Style::default().fg(Color::Yellow))
                } else {
                    Span::raw("")
                },
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_listings(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Market ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();

    let counts = app.history.counts();
    let summary: Vec<Span> = counts
        .iter()
        .flat_map(|(rarity, n)| {
            [
                Span::styled(
                    format!("{} {}", &rarity.name()[..1], n),
                    Style::default().fg(rarity_color(*rarity)),
                ),
                Span::raw("  "),
            ]
        })
        .collect();
    lines.push(Line::from(summary));
    lines.push(Line::from(Span::styled(
        format!(
            "{} openings since last Legendary",
            app.history.draws_since_legendary()
        ),
        Style::default().fg(rarity_color(Rarity::Legendary)),
    )));
    lines.push(Line::from(""));

    let listings = app.ledger.active_listings();
    if listings.is_empty() {
        lines.push(Line::from(Span::styled(
            "No stoves for sale",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for listing in listings.iter().take(inner.height.saturating_sub(3) as usize) {
        let Some(stove) = app.ledger.stove(listing.stove_id) else {
            continue;
        };
        let color = stove.rarity().map(rarity_color).unwrap_or(Color::White);
        let mine = listing.seller_id == app.config.player_id;
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>6} ", listing.price),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(stove.name.clone(), Style::default().fg(color)),
            Span::styled(
                if mine { " (yours)" } else { "" },
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
