use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph},
};

use sudoku_engine::puzzle::Difficulty;
use sudoku_engine::{InputMode, Point, Session};

use crate::app::{App, Screen};

// ── Constants ────────────────────────────────────────────────────────────────

/// Each cell is 3 characters wide: 9*3 + 4 thick + 6 thin borders = 37.
const GRID_WIDTH: u16 = 37;

/// 9 cell rows + 4 thick horizontal borders = 13.
const GRID_HEIGHT: u16 = 13;

// ── Public entry point ───────────────────────────────────────────────────────

pub fn draw(f: &mut Frame, app: &App) {
    match app.screen {
        Screen::Menu => draw_menu(f, app),
        Screen::Playing => draw_playing(f, app),
        Screen::Won => draw_won(f, app),
    }

    if app.show_quit_confirm {
        draw_quit_confirm(f);
    }
}

// ── Menu screen ──────────────────────────────────────────────────────────────

fn draw_menu(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(center_rect(48, 22, area));

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "S U D O K U",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "a terminal number-place game",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[1]);

    let diff_color = difficulty_color(app.difficulty);
    let selector = Paragraph::new(vec![
        Line::from(Span::styled(
            "Select Difficulty",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("◄  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("  {}  ", app.difficulty.label()),
                Style::default().fg(diff_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  ►", Style::default().fg(Color::DarkGray)),
        ]),
    ])
    .alignment(Alignment::Center);
    f.render_widget(selector, chunks[3]);

    let controls = Paragraph::new(vec![
        Line::from(Span::styled(
            "Controls",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        key_line("←/→", "Change difficulty"),
        key_line("Enter", "Start game"),
        key_line("l", "Load saved game"),
        key_line("q", "Quit"),
    ])
    .alignment(Alignment::Center);
    f.render_widget(controls, chunks[5]);

    if let Some(ref status) = app.status {
        let msg = Paragraph::new(Span::styled(
            status.as_str(),
            Style::default().fg(Color::Yellow),
        ))
        .alignment(Alignment::Center);
        f.render_widget(msg, chunks[7]);
    }
}

fn key_line(key: &str, action: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(key.to_string(), Style::default().fg(Color::Yellow)),
        Span::styled(format!("  {}", action), Style::default().fg(Color::Gray)),
    ])
}

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Magenta,
        Difficulty::Expert => Color::Red,
    }
}

// ── Playing screen ───────────────────────────────────────────────────────────

fn draw_playing(f: &mut Frame, app: &App) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let area = f.area();

    let outer = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);
    let main_area = outer[0];
    let bottom_area = outer[1];

    let h_chunks = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(GRID_WIDTH + 2),
        Constraint::Length(2),
        Constraint::Length(24),
        Constraint::Min(0),
    ])
    .split(main_area);

    let grid_v = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(GRID_HEIGHT + 2),
        Constraint::Min(0),
    ])
    .split(h_chunks[1]);
    draw_grid(f, session, grid_v[1]);

    let panel_v = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(12),
        Constraint::Min(0),
    ])
    .split(h_chunks[3]);
    draw_info_panel(f, app, session, panel_v[1]);

    draw_key_hints(f, bottom_area);
}

// ── Grid rendering ───────────────────────────────────────────────────────────

fn draw_grid(f: &mut Frame, session: &Session, area: Rect) {
    let mut lines: Vec<Line> = Vec::with_capacity(GRID_HEIGHT as usize);

    for visual_row in 0..GRID_HEIGHT {
        match visual_row {
            0 => lines.push(horizontal_border('╔', '╤', '╦', '╗')),
            4 | 8 => lines.push(horizontal_border('╠', '╪', '╬', '╣')),
            12 => lines.push(horizontal_border('╚', '╧', '╩', '╝')),
            _ => {
                // Rows 1-3 map to grid rows 0-2, 5-7 to 3-5, 9-11 to 6-8.
                let grid_row = (visual_row - 1 - visual_row / 4) as usize;
                lines.push(cell_row(session, grid_row));
            }
        }
    }

    let block = Block::bordered()
        .title(" Sudoku ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::White));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn cell_row(session: &Session, row: usize) -> Line<'static> {
    let cursor = session.cursor();
    let mut spans: Vec<Span> = Vec::with_capacity(19);

    spans.push(thick_sep());
    for col in 0..9 {
        let point = Point::new(row, col);
        let value = session.board().get(point);
        let is_given = session.is_given(point);
        let is_cursor = point == cursor;

        let text = if value == 0 {
            if is_cursor {
                " · ".to_string()
            } else {
                "   ".to_string()
            }
        } else {
            format!(" {} ", value)
        };

        let style = if is_cursor {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if is_given {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(text, style));

        if col % 3 == 2 {
            spans.push(thick_sep());
        } else {
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        }
    }

    Line::from(spans)
}

fn thick_sep() -> Span<'static> {
    Span::styled("║", Style::default().fg(Color::White))
}

/// One horizontal border line: `left`, thin `mid` crossings inside a
/// box, thick `cross` crossings between boxes, `right`.
fn horizontal_border(left: char, mid: char, cross: char, right: char) -> Line<'static> {
    let mut s = String::with_capacity(GRID_WIDTH as usize);
    s.push(left);
    for box_idx in 0..3 {
        for cell_idx in 0..3 {
            s.push_str("═══");
            if cell_idx < 2 {
                s.push(mid);
            }
        }
        if box_idx < 2 {
            s.push(cross);
        }
    }
    s.push(right);
    Line::from(Span::styled(s, Style::default().fg(Color::White)))
}

// ── Info panel ───────────────────────────────────────────────────────────────

fn draw_info_panel(f: &mut Frame, app: &App, session: &Session, area: Rect) {
    let block = Block::bordered()
        .title(" Info ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::White));

    let mode_span = match session.mode() {
        InputMode::Edit => Span::styled(
            " EDIT ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        InputMode::Navigate => Span::styled(" NAV ", Style::default().fg(Color::DarkGray)),
    };

    let cursor = session.cursor();
    let mut lines = vec![
        Line::from(vec![
            Span::styled(" Difficulty: ", Style::default().fg(Color::Gray)),
            Span::styled(
                app.difficulty.label(),
                Style::default()
                    .fg(difficulty_color(app.difficulty))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Mode:       ", Style::default().fg(Color::Gray)),
            mode_span,
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Cursor:     ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("r{}c{}", cursor.row + 1, cursor.col + 1),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Filled:     ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}/81", session.board().filled_count()),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Moves:      ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", session.moves_made()),
                Style::default().fg(Color::White),
            ),
        ]),
    ];

    if let Some(ref status) = app.status {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", status),
            Style::default().fg(Color::Yellow),
        )));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Key hints (bottom status bar) ────────────────────────────────────────────

fn draw_key_hints(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::styled(" ←↑↓→/hjkl", Style::default().fg(Color::Yellow)),
        Span::styled(" Move  ", Style::default().fg(Color::Gray)),
        Span::styled("e", Style::default().fg(Color::Yellow)),
        Span::styled(" Edit  ", Style::default().fg(Color::Gray)),
        Span::styled("1-9", Style::default().fg(Color::Yellow)),
        Span::styled(" Place  ", Style::default().fg(Color::Gray)),
        Span::styled("0/Del", Style::default().fg(Color::Yellow)),
        Span::styled(" Erase  ", Style::default().fg(Color::Gray)),
        Span::styled("u", Style::default().fg(Color::Yellow)),
        Span::styled(" Undo  ", Style::default().fg(Color::Gray)),
        Span::styled("s", Style::default().fg(Color::Yellow)),
        Span::styled(" Save  ", Style::default().fg(Color::Gray)),
        Span::styled("o", Style::default().fg(Color::Yellow)),
        Span::styled(" Load  ", Style::default().fg(Color::Gray)),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::styled(" Quit", Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(
        Paragraph::new(hints).style(Style::default().bg(Color::DarkGray)),
        area,
    );
}

// ── Won screen ───────────────────────────────────────────────────────────────

fn draw_won(f: &mut Frame, app: &App) {
    let area = f.area();

    let bg = Paragraph::new("").style(Style::default().bg(Color::Black));
    f.render_widget(bg, area);

    let popup = center_rect(40, 11, area);
    f.render_widget(Clear, popup);

    let block = Block::bordered()
        .title(" Victory! ")
        .border_type(BorderType::Double)
        .style(Style::default().fg(Color::Green));

    let moves = app
        .session
        .as_ref()
        .map(|s| s.moves_made())
        .unwrap_or_default();

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "CONGRATULATIONS!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "You completed the puzzle!",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Difficulty: ", Style::default().fg(Color::Gray)),
            Span::styled(
                app.difficulty.label(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Moves:      ", Style::default().fg(Color::Gray)),
            Span::styled(format!("{}", moves), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter for new game, Q to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(block)
    .alignment(Alignment::Center);

    f.render_widget(text, popup);
}

// ── Quit confirmation dialog ─────────────────────────────────────────────────

fn draw_quit_confirm(f: &mut Frame) {
    let area = f.area();
    let popup = center_rect(36, 7, area);

    f.render_widget(Clear, popup);

    let block = Block::bordered()
        .title(" Quit? ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::Red));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Are you sure you want to quit?",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "Y",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled("/", Style::default().fg(Color::Gray)),
            Span::styled(
                "Enter",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Yes   ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Any key",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" No", Style::default().fg(Color::Gray)),
        ]),
    ])
    .block(block)
    .alignment(Alignment::Center);

    f.render_widget(text, popup);
}

// ── Layout helpers ───────────────────────────────────────────────────────────

fn center_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vert = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height),
        Constraint::Min(0),
    ])
    .split(area);

    let horiz = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(width),
        Constraint::Min(0),
    ])
    .split(vert[1]);

    horiz[1]
}
