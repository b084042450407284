//! Runs a ROM with no screen, keypad or buzzer attached.
//!
//! Useful for checking that a ROM executes at all; run with
//! `RUST_LOG=trace` to see every instruction go by.

use std::path::PathBuf;
use std::time::Duration;

use structopt::StructOpt;

use chip8::emulator::Emulator;

/// The program options.
#[derive(StructOpt)]
struct Opt {
    /// The ROM to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// CPU cycles per frame
    #[structopt(short, long, default_value = "10")]
    cycles: u32,
}

fn main() -> std::io::Result<()> {
    pretty_env_logger::init();

    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    let mut emulator = Emulator::new();
    emulator.load_program(&program);

    loop {
        for _ in 0..opt.cycles {
            if let Err(e) = emulator.execute_cycle() {
                log::error!("Emulation halted: {}", e);
                return Ok(());
            }
        }
        emulator.execute_timers();
        if emulator.draw_flag() {
            emulator.clear_draw_flag();
        }
        std::thread::sleep(Duration::from_millis(1_000 / 60));
    }
}
