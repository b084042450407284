//! A terminal frontend: drives the emulator at 60 frames per second,
//! paints the framebuffer with crossterm and feeds it keyboard input.

use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use structopt::StructOpt;

use chip8::emulator::timers::Buzzer;
use chip8::emulator::Emulator;

use crossterm::event::{self, Event, KeyCode};

mod keypad;
mod screen;

use keypad::Keypad;
use screen::Screen;

/// The program options.
#[derive(StructOpt)]
struct Opt {
    /// The ROM to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// CPU cycles per rendered frame, between 1 and 20
    #[structopt(short, long, default_value = "10")]
    cycles: u32,

    /// How long a key counts as held after its last event, in milliseconds
    #[structopt(long, default_value = "150")]
    key_release_ms: u64,
}

/// Beeps with the terminal bell.
struct TerminalBuzzer;

impl Buzzer for TerminalBuzzer {
    fn beep(&mut self) {
        print!("\x07");
        let _ = std::io::stdout().flush();
    }
}

fn main() -> crossterm::Result<()> {
    env_logger::init();

    let opt = Opt::from_args();
    let cycles_per_frame = opt.cycles.max(1).min(20);
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    let mut emulator = Emulator::with_buzzer(TerminalBuzzer);
    emulator.load_program(&program);

    let mut screen = Screen::new()?;
    let mut keypad = Keypad::new(Duration::from_millis(opt.key_release_ms));
    let frame_budget = Duration::from_millis(1_000 / 60);

    'frames: loop {
        let frame_start = Instant::now();

        // Forward everything the terminal has queued up
        while event::poll(Duration::from_secs(0))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.code == KeyCode::Esc {
                    break 'frames;
                }
                if let Some(key) = Keypad::map(key_event.code) {
                    keypad.pressed(key);
                    let _ = emulator.key_pressed(key);
                }
            }
        }
        for key in keypad.expired() {
            let _ = emulator.key_released(key);
        }

        for _ in 0..cycles_per_frame {
            if let Err(e) = emulator.execute_cycle() {
                log::error!("Emulation halted: {}", e);
                break 'frames;
            }
        }

        emulator.execute_timers();

        if emulator.draw_flag() {
            screen.present(emulator.graphics())?;
            emulator.clear_draw_flag();
        }

        if let Some(rest) = frame_budget.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    Ok(())
}
