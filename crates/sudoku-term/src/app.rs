use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use sudoku_engine::puzzle::{self, Difficulty};
use sudoku_engine::{InputMode, Session};

use crate::storage;
use crate::ui;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    Won,
}

pub struct App {
    pub screen: Screen,
    pub difficulty: Difficulty,
    pub session: Option<Session>,
    pub status: Option<String>,
    pub show_quit_confirm: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            screen: Screen::Menu,
            difficulty: Difficulty::Easy,
            session: None,
            status: None,
            show_quit_confirm: false,
        }
    }

    fn start_new_game(&mut self) {
        let carved = puzzle::generate_puzzle(self.difficulty, &mut rand::rng());
        self.session = Some(Session::new(carved));
        self.screen = Screen::Playing;
        self.status = None;
        self.show_quit_confirm = false;
    }

    fn load_game(&mut self) {
        match storage::restore() {
            Ok(session) => {
                self.screen = if session.is_complete() {
                    Screen::Won
                } else {
                    Screen::Playing
                };
                self.session = Some(session);
                self.status = Some("Game loaded".to_string());
            }
            Err(e) => self.status = Some(format!("Load failed: {}", e)),
        }
    }

    fn save_game(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        match storage::store(session) {
            Ok(path) => self.status = Some(format!("Saved to {}", path.display())),
            Err(e) => self.status = Some(format!("Save failed: {}", e)),
        }
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Restore the terminal even if we panic mid-draw.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                // Press only; crossterm sends Press+Release on Windows.
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key(app, key) {
                    return Ok(());
                }
            }
        }
    }
}

/// Handle a key event. Returns true if the app should quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match app.screen {
        Screen::Menu => handle_menu_key(app, key),
        Screen::Playing => handle_playing_key(app, key),
        Screen::Won => handle_won_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Up | KeyCode::Left => app.difficulty = app.difficulty.prev(),
        KeyCode::Down | KeyCode::Right => app.difficulty = app.difficulty.next(),
        KeyCode::Enter => app.start_new_game(),
        KeyCode::Char('l') | KeyCode::Char('L') => app.load_game(),
        KeyCode::Char('q') | KeyCode::Esc => return true,
        _ => {}
    }
    false
}

fn handle_playing_key(app: &mut App, key: KeyEvent) -> bool {
    if app.show_quit_confirm {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => return true,
            _ => app.show_quit_confirm = false,
        }
        return false;
    }

    let Some(session) = app.session.as_mut() else {
        return false;
    };

    match key.code {
        KeyCode::Up => session.move_cursor(-1, 0),
        KeyCode::Down => session.move_cursor(1, 0),
        KeyCode::Left => session.move_cursor(0, -1),
        KeyCode::Right => session.move_cursor(0, 1),
        KeyCode::Delete | KeyCode::Backspace => erase(app),
        KeyCode::Esc => {
            if session.mode() == InputMode::Edit {
                session.set_mode(InputMode::Navigate);
            } else {
                app.show_quit_confirm = true;
            }
        }
        KeyCode::Char(c) => return handle_playing_char(app, c, key.modifiers),
        _ => {}
    }
    false
}

fn handle_playing_char(app: &mut App, c: char, modifiers: KeyModifiers) -> bool {
    let Some(session) = app.session.as_mut() else {
        return false;
    };

    match c {
        // Vim-style movement works in either mode; digits do not.
        'h' => session.move_cursor(0, -1),
        'j' => session.move_cursor(1, 0),
        'k' => session.move_cursor(-1, 0),
        'l' => session.move_cursor(0, 1),

        '1'..='9' => {
            if session.mode() == InputMode::Edit {
                place(app, c as u8 - b'0');
            } else {
                app.status = Some("Press e to enter edit mode".to_string());
            }
        }
        '0' => erase(app),

        'e' | 'i' => {
            session.set_mode(InputMode::Edit);
            app.status = None;
        }

        'u' | 'U' => undo(app),
        'z' if modifiers.contains(KeyModifiers::CONTROL) => undo(app),

        's' | 'S' => app.save_game(),
        'o' | 'O' => app.load_game(),

        'q' | 'Q' => app.show_quit_confirm = true,
        _ => {}
    }
    false
}

fn place(app: &mut App, value: u8) {
    let Some(session) = app.session.as_mut() else {
        return;
    };
    match session.set_cursor_value(value) {
        Ok(_) => {
            app.status = None;
            if session.is_complete() {
                app.screen = Screen::Won;
            }
        }
        Err(e) => app.status = Some(e.to_string()),
    }
}

fn erase(app: &mut App) {
    let Some(session) = app.session.as_mut() else {
        return;
    };
    let cursor = session.cursor();
    match session.erase(cursor) {
        Ok(_) => app.status = None,
        Err(e) => app.status = Some(e.to_string()),
    }
}

fn undo(app: &mut App) {
    let Some(session) = app.session.as_mut() else {
        return;
    };
    match session.undo() {
        Ok(mv) => {
            app.status = Some(format!(
                "Undid r{}c{} back to {}",
                mv.point.row + 1,
                mv.point.col + 1,
                if mv.previous == 0 {
                    "empty".to_string()
                } else {
                    mv.previous.to_string()
                }
            ));
        }
        Err(e) => app.status = Some(e.to_string()),
    }
}

fn handle_won_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter | KeyCode::Char('n') => {
            app.screen = Screen::Menu;
            app.session = None;
            app.status = None;
        }
        KeyCode::Char('q') | KeyCode::Esc => return true,
        _ => {}
    }
    false
}
