//! The CHIP-8 machine as described at
//! https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

pub mod cpu;
pub mod error;
pub mod graphics;
pub mod input;
pub mod instruction;
pub mod memory;
pub mod timers;

use crate::emulator::cpu::Cpu;
use crate::emulator::error::Error;
use crate::emulator::graphics::Graphics;
use crate::emulator::input::Input;
use crate::emulator::memory::Memory;
use crate::emulator::timers::{Buzzer, NullBuzzer, Timers};

/// The passive components of the machine, everything the CPU reads and
/// writes but does not own.
pub struct Bus {
    pub memory: Memory,
    pub graphics: Graphics,
    pub input: Input,
    pub timers: Timers,
}

impl Bus {
    pub fn new() -> Bus {
        Bus {
            memory: Memory::new(),
            graphics: Graphics::new(),
            input: Input::new(),
            timers: Timers::new(),
        }
    }

    fn reset(&mut self) {
        self.memory.reset();
        self.graphics.clear();
        self.input.reset();
        self.timers.reset();
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete CHIP-8 machine: the CPU, the bus it works on and the buzzer
/// the sound timer fires.
///
/// The emulator keeps no time of its own. A driving loop is expected to
/// call [`execute_cycle`] a fixed number of times per frame, then
/// [`execute_timers`] once per frame, then present
/// [`graphics`]`().snapshot()` whenever [`draw_flag`] reports a change and
/// acknowledge it with [`clear_draw_flag`].
///
/// [`execute_cycle`]: Emulator::execute_cycle
/// [`execute_timers`]: Emulator::execute_timers
/// [`graphics`]: Emulator::graphics
/// [`draw_flag`]: Emulator::draw_flag
/// [`clear_draw_flag`]: Emulator::clear_draw_flag
pub struct Emulator<B: Buzzer> {
    cpu: Cpu,
    bus: Bus,
    buzzer: B,
}

impl Emulator<NullBuzzer> {
    /// Create an emulator with a silent buzzer.
    pub fn new() -> Emulator<NullBuzzer> {
        Emulator::with_buzzer(NullBuzzer)
    }
}

impl Default for Emulator<NullBuzzer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Buzzer> Emulator<B> {
    /// Create an emulator that beeps through `buzzer`.
    pub fn with_buzzer(buzzer: B) -> Emulator<B> {
        Emulator {
            cpu: Cpu::new(),
            bus: Bus::new(),
            buzzer,
        }
    }

    /// Put the whole machine back in its power-on state.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.bus.reset();
    }

    /// Reset the machine, then copy `program` into memory at 0x200.
    pub fn load_program(&mut self, program: &[u8]) {
        self.reset();
        self.bus.memory.load_program(program);
    }

    /// Run one CPU cycle.
    pub fn execute_cycle(&mut self) -> Result<(), Error> {
        self.cpu.execute_cycle(&mut self.bus)
    }

    /// Tick the delay and sound timers once. Call this at the frame
    /// cadence, not the cycle cadence.
    pub fn execute_timers(&mut self) {
        self.bus.timers.tick(&mut self.buzzer);
    }

    /// Forward a key-down event from the host.
    pub fn key_pressed(&mut self, key: u8) -> Result<(), Error> {
        self.bus.input.press(key)
    }

    /// Forward a key-up event from the host.
    pub fn key_released(&mut self, key: u8) -> Result<(), Error> {
        self.bus.input.release(key)
    }

    /// Whether the framebuffer changed since the last acknowledged frame.
    pub fn draw_flag(&self) -> bool {
        self.cpu.draw_flag()
    }

    /// Acknowledge a presented frame.
    pub fn clear_draw_flag(&mut self) {
        self.cpu.clear_draw_flag()
    }

    /// The framebuffer, for presentation.
    pub fn graphics(&self) -> &Graphics {
        &self.bus.graphics
    }
}
