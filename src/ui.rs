//! Terminal UI rendering with ratatui
//!
//! Pure presentation: everything drawn here comes from the game's read-only
//! views (board rows, piece pair, score, state).

use crate::game::{Game, GameState};
use crate::piece::Piece;
use crate::settings::Settings;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const EMPTY: &str = "  ";

/// Total width needed: board(22) + next/stats(16)
const GAME_WIDTH: u16 = 38;
/// Total height needed: board(20) + 2 for borders
const GAME_HEIGHT: u16 = 22;

/// Render the entire game UI
pub fn render_game(frame: &mut Frame, game: &Game, settings: &Settings) {
    let area = frame.area();
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22), // Board (10*2 + 2 for borders)
            Constraint::Length(16), // Next preview + stats
        ])
        .split(game_area);

    render_board(frame, main_layout[0], game, settings);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Next preview
            Constraint::Min(5),    // Stats
        ])
        .split(main_layout[1]);

    render_next(frame, right_layout[0], game.next.as_ref(), settings);
    render_stats(frame, right_layout[1], game);

    match game.state {
        GameState::Idle => render_overlay(frame, area, "PRESS START", "Enter to begin"),
        GameState::Paused => render_overlay(frame, area, "PAUSED", "Press P to resume"),
        GameState::GameOver => render_overlay(frame, area, "GAME OVER", "Enter to play again"),
        GameState::Running => {}
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the game board with the falling piece overlaid
fn render_board(frame: &mut Frame, area: Rect, game: &Game, settings: &Settings) {
    let block_char = settings.visual.block_chars();

    let block = Block::default()
        .title(" BLOCKFALL ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for (row, cells) in game.board.rows().iter().enumerate() {
        let mut spans = Vec::new();
        for (col, &cell) in cells.iter().enumerate() {
            let falling = game.current.as_ref().and_then(|piece| {
                piece
                    .cells()
                    .any(|(r, c)| r == row as i32 && c == col as i32)
                    .then(|| piece.kind.color())
            });

            let span = match falling.or_else(|| cell.map(|kind| kind.color())) {
                Some(color) => Span::styled(block_char, Style::default().fg(color)),
                None => Span::raw(EMPTY),
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the next piece preview box
fn render_next(frame: &mut Frame, area: Rect, next: Option<&Piece>, settings: &Settings) {
    let block_char = settings.visual.block_chars();

    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(piece) = next else { return };

    let mut lines: Vec<Line> = vec![Line::raw("")];
    for row in &piece.matrix {
        let spans: Vec<Span> = row
            .iter()
            .map(|&occupied| {
                if occupied {
                    Span::styled(block_char, Style::default().fg(piece.kind.color()))
                } else {
                    Span::raw(EMPTY)
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

/// Render score, lines and level
fn render_stats(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .title(" STATS ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(vec![
            Span::styled("Score ", Style::default().fg(Color::Gray)),
            Span::styled(game.score.points.to_string(), Style::default().fg(Color::White).bold()),
        ]),
        Line::from(vec![
            Span::styled("Lines ", Style::default().fg(Color::Gray)),
            Span::styled(game.score.lines.to_string(), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("Level ", Style::default().fg(Color::Gray)),
            Span::styled(game.score.level.to_string(), Style::default().fg(Color::Cyan)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render a centered overlay box with a title and a hint line
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let overlay_area = center_rect(area, 26, 5);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let lines = vec![
        Line::styled(title.to_string(), Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle.to_string(), Style::default().fg(Color::Gray)),
    ];
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
