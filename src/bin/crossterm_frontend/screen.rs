//! Presentation of the framebuffer in the terminal.

use chip8::emulator::graphics::{Graphics, SCREEN_HEIGHT, SCREEN_WIDTH};

use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use std::io::{stdout, Write};

/// The terminal rendering surface.
///
/// Pixels are drawn two columns wide so the 64x32 grid keeps roughly
/// square proportions. A cached copy of the last presented frame keeps
/// redraws down to the cells that actually changed.
pub struct Screen {
    cells: [[u8; SCREEN_WIDTH]; SCREEN_HEIGHT],
}

impl Screen {
    /// Switch the terminal to the alternate screen and draw the border.
    pub fn new() -> crossterm::Result<Screen> {
        execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;

        let right = 2 * SCREEN_WIDTH as u16 + 1;
        let bottom = SCREEN_HEIGHT as u16 + 1;
        for y in 0..=bottom {
            for x in 0..=right {
                let c = match (x, y) {
                    (0, 0) => '┏',
                    (x, 0) if x == right => '┓',
                    (0, y) if y == bottom => '┗',
                    (x, y) if x == right && y == bottom => '┛',
                    (_, y) if y == 0 || y == bottom => '━',
                    (x, _) if x == 0 || x == right => '┃',
                    _ => continue,
                };
                execute!(stdout(), cursor::MoveTo(x, y))?;
                write!(stdout(), "{}", c)?;
            }
        }
        stdout().flush()?;

        Ok(Screen {
            cells: [[0; SCREEN_WIDTH]; SCREEN_HEIGHT],
        })
    }

    /// Draw the parts of `graphics` that changed since the last call.
    pub fn present(&mut self, graphics: &Graphics) -> crossterm::Result<()> {
        for y in 0..SCREEN_HEIGHT {
            for x in 0..SCREEN_WIDTH {
                let state = graphics.pixel(x, y);
                if self.cells[y][x] != state {
                    self.cells[y][x] = state;
                    execute!(stdout(), cursor::MoveTo(2 * x as u16 + 1, y as u16 + 1))?;
                    write!(stdout(), "{}", if state == 1 { "██" } else { "  " })?;
                }
            }
        }
        stdout().flush()?;
        Ok(())
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, cursor::Show);
    }
}
