//! The delay and sound timers, and the buzzer they drive.
//!
//! The emulator core never keeps time itself; the driving loop calls
//! [`Timers::tick`] at its own fixed cadence (nominally 60 Hz).

/// A device that can emit a short tone.
///
/// What the tone sounds like is entirely up to the implementation; the
/// core only ever asks for "a beep, now".
pub trait Buzzer {
    fn beep(&mut self);
}

/// A buzzer that stays silent.
pub struct NullBuzzer;

impl Buzzer for NullBuzzer {
    fn beep(&mut self) {}
}

/// The two 8-bit countdown timers of the CHIP-8.
///
/// Both count down to zero and stay there. The sound timer beeps the
/// buzzer exactly once, on the tick that takes it from 1 to 0.
pub struct Timers {
    delay: u8,
    sound: u8,
}

impl Timers {
    pub fn new() -> Timers {
        Timers { delay: 0, sound: 0 }
    }

    pub fn reset(&mut self) {
        self.delay = 0;
        self.sound = 0;
    }

    /// Count both timers down by one step.
    pub fn tick<B: Buzzer>(&mut self, buzzer: &mut B) {
        if self.delay > 0 {
            self.delay -= 1;
        }
        if self.sound > 0 {
            if self.sound == 1 {
                buzzer.beep();
            }
            self.sound -= 1;
        }
    }

    pub fn delay(&self) -> u8 {
        self.delay
    }

    pub fn set_delay(&mut self, value: u8) {
        self.delay = value;
    }

    pub fn set_sound(&mut self, value: u8) {
        self.sound = value;
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}
