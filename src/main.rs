use crossterm::{
    QueueableCommand, cursor,
    event::{Event, KeyCode, KeyEvent, poll, read},
    style::{self, StyledContent, Stylize},
    terminal,
};
use std::io::{Result, Write, stdout};
use std::time;

mod game;
mod piece;
mod store;

use crate::game::{COLS, Command, Game, Phase, ROWS};
use crate::store::HighScoreStore;

fn centered_x(s: &str) -> u16 {
    let leftedge: u16 = 25;
    let n: u16 = s.len().try_into().expect("really long string");

    match terminal::size() {
        Ok((cols, _rows)) => {
            if cols < leftedge + n {
                leftedge
            } else {
                (cols - leftedge - n) / 2 + leftedge
            }
        }
        Err(_) => leftedge,
    }
}

fn cell_style(id: u8) -> StyledContent<&'static str> {
    match id {
        0 => "  ".white(),
        1 => "  ".on_cyan(),
        2 => "  ".on_blue(),
        3 => "  ".on_dark_yellow(),
        4 => "  ".on_yellow(),
        5 => "  ".on_green(),
        6 => "  ".on_magenta(),
        _ => "  ".on_red(),
    }
}

fn phase_line(g: &Game) -> &'static str {
    match g.phase {
        Phase::NotStarted => "Press Enter to start",
        Phase::Running => "",
        Phase::Paused => "PAUSED - p resumes",
        Phase::Over => "GAME OVER - Enter restarts",
    }
}

fn render_game_info(g: &Game) -> Result<()> {
    let s1: &str = "Gridfall - falling blocks for the terminal";
    let s2 = "arrows move/rotate, space drops, p pauses, q quits";

    crossterm::queue!(
        stdout(),
        cursor::MoveTo(centered_x(s1), 2),
        style::PrintStyledContent(s1.cyan()),
        cursor::MoveTo(centered_x(s2), 3),
        style::PrintStyledContent(s2.yellow()),
    )?;

    let i = centered_x("High  : 123456"); /* get a pos based on av score digits */
    crossterm::queue!(
        stdout(),
        cursor::MoveTo(i, 5),
        style::PrintStyledContent(format!("Score : {}", g.score).bold().white()),
        cursor::MoveTo(i, 6),
        style::PrintStyledContent(format!("High  : {}", g.high_score).bold().white()),
        cursor::MoveTo(i, 8),
        terminal::Clear(terminal::ClearType::UntilNewLine),
        style::PrintStyledContent(phase_line(g).bold().white()),
    )?;
    Ok(())
}

fn draw_screen(g: &Game) -> Result<()> {
    let mut stdout = stdout();

    for y in 0..ROWS {
        for x in 0..COLS {
            crossterm::queue!(stdout, cursor::MoveTo(x as u16 * 2 + 1, y as u16 + 1))?;
            crossterm::queue!(stdout, style::PrintStyledContent(cell_style(g.board.get(x, y))))?;
        }
    }

    // the falling piece is overlaid; it never lives in the board itself
    if g.phase != Phase::NotStarted {
        let id = g.piece.kind.color_id();
        for (x, y) in g.piece.cells() {
            if x >= 0 && x < COLS && y >= 0 && y < ROWS {
                crossterm::queue!(
                    stdout,
                    cursor::MoveTo(x as u16 * 2 + 1, y as u16 + 1),
                    style::PrintStyledContent(cell_style(id))
                )?;
            }
        }
    }

    render_game_info(g)?;
    stdout.flush()
}

fn runloop(g: &mut Game) -> Result<()> {
    loop {
        g.on_tick();
        if let Ok(true) = poll(time::Duration::from_millis(10)) {
            match read() {
                Ok(Event::Key(KeyEvent {
                    code: KeyCode::Char('q') | KeyCode::Esc,
                    ..
                })) => return Ok(()),
                Ok(Event::Key(KeyEvent {
                    code: KeyCode::Enter,
                    ..
                })) => {
                    if g.phase != Phase::Running && g.phase != Phase::Paused {
                        g.start();
                    }
                }
                Ok(Event::Key(KeyEvent {
                    code: KeyCode::Char('p'),
                    ..
                })) => g.toggle_pause(),
                Ok(Event::Key(KeyEvent {
                    code: KeyCode::Left,
                    ..
                })) => g.on_input(Command::Left),
                Ok(Event::Key(KeyEvent {
                    code: KeyCode::Right,
                    ..
                })) => g.on_input(Command::Right),
                Ok(Event::Key(KeyEvent {
                    code: KeyCode::Down,
                    ..
                })) => g.on_input(Command::SoftDrop),
                Ok(Event::Key(KeyEvent {
                    code: KeyCode::Up, ..
                })) => g.on_input(Command::Rotate),
                Ok(Event::Key(KeyEvent {
                    code: KeyCode::Char(' '),
                    ..
                })) => g.on_input(Command::HardDrop),
                _ => (),
            }
        }
        draw_screen(g)?;
    }
}

fn box_(x: u16, y: u16, width: u16, height: u16) -> Result<()> {
    const TOP_LEFT: &str = "\u{250f}";
    const TOP_RIGHT: &str = "\u{2513}";
    const BOTTOM_LEFT: &str = "\u{2517}";
    const BOTTOM_RIGHT: &str = "\u{251b}";
    const VERTICAL: &str = "\u{2503}";
    const HORIZONTAL: &str = "\u{2501}";
    let mut stdout = stdout();

    stdout
        .queue(terminal::Clear(terminal::ClearType::All))?
        .queue(cursor::MoveTo(x, y))?
        .queue(style::PrintStyledContent(TOP_LEFT.white()))?
        .queue(cursor::MoveTo(x + width, y))?
        .queue(style::PrintStyledContent(TOP_RIGHT.white()))?
        .queue(cursor::MoveTo(x, y + height))?
        .queue(style::PrintStyledContent(BOTTOM_LEFT.white()))?
        .queue(cursor::MoveTo(x + width, y + height))?
        .queue(style::PrintStyledContent(BOTTOM_RIGHT.white()))?;

    for i in 1..width {
        crossterm::queue!(
            stdout,
            cursor::MoveTo(x + i, y),
            style::PrintStyledContent(HORIZONTAL.white()),
            cursor::MoveTo(x + i, y + height),
            style::PrintStyledContent(HORIZONTAL.white())
        )?;
    }
    for i in 1..height {
        crossterm::queue!(
            stdout,
            cursor::MoveTo(x, y + i),
            style::PrintStyledContent(VERTICAL.white()),
            cursor::MoveTo(x + width, y + i),
            style::PrintStyledContent(VERTICAL.white())
        )?;
    }
    crossterm::queue!(
        stdout,
        cursor::Hide,
        cursor::MoveTo(x + width + 2, y + height + 2)
    )?;

    stdout.flush()
}

fn main() -> Result<()> {
    let mut game = Game::new(HighScoreStore::default());

    crossterm::queue!(
        stdout(),
        style::ResetColor,
        terminal::Clear(terminal::ClearType::All),
        terminal::EnterAlternateScreen,
        cursor::Hide,
        cursor::MoveTo(0, 0)
    )?;
    terminal::enable_raw_mode()?;
    box_(0, 0, COLS as u16 * 2 + 1, ROWS as u16 + 1)?;
    runloop(&mut game)?;

    crossterm::queue!(
        stdout(),
        terminal::Clear(terminal::ClearType::All),
        terminal::LeaveAlternateScreen,
        cursor::Show,
        cursor::MoveTo(0, 0)
    )?;
    terminal::disable_raw_mode()?;

    println!("Score: {}; High score: {}", game.score, game.high_score);
    Ok(())
}
