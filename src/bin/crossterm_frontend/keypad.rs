//! Mapping from the host keyboard onto the 16-key hex pad.
//!
//! Terminals only report key-down events, so a key counts as held until
//! no repeat has arrived for a while; expiry then synthesizes the
//! key-up the emulator needs.

use crossterm::event::KeyCode;
use std::time::{Duration, Instant};

/// Tracks which pad keys are held down, releasing them after a quiet
/// period.
pub struct Keypad {
    timeout: Duration,
    held: [Option<Instant>; 16],
}

impl Keypad {
    pub fn new(timeout: Duration) -> Keypad {
        Keypad {
            timeout,
            held: [None; 16],
        }
    }

    /// Translate a terminal key into a pad key.
    ///
    /// The 1234/QWER/ASDF/ZXCV block covers the pad the same way the
    /// original COSMAC keypad was laid out.
    pub fn map(code: KeyCode) -> Option<u8> {
        let key = match code {
            KeyCode::Char('1') => 0x1,
            KeyCode::Char('2') => 0x2,
            KeyCode::Char('3') => 0x3,
            KeyCode::Char('4') => 0xC,
            KeyCode::Char('q') => 0x4,
            KeyCode::Char('w') => 0x5,
            KeyCode::Char('e') => 0x6,
            KeyCode::Char('r') => 0xD,
            KeyCode::Char('a') => 0x7,
            KeyCode::Char('s') => 0x8,
            KeyCode::Char('d') => 0x9,
            KeyCode::Char('f') => 0xE,
            KeyCode::Char('z') => 0xA,
            KeyCode::Char('x') => 0x0,
            KeyCode::Char('c') => 0xB,
            KeyCode::Char('v') => 0xF,
            _ => return None,
        };
        Some(key)
    }

    /// Record a key-down (or key-repeat) event for a pad key.
    pub fn pressed(&mut self, key: u8) {
        if let Some(slot) = self.held.get_mut(key as usize) {
            *slot = Some(Instant::now());
        }
    }

    /// Pad keys whose hold period has run out since the last call.
    /// Each returned key has been marked released.
    pub fn expired(&mut self) -> Vec<u8> {
        let timeout = self.timeout;
        let mut released = Vec::new();
        for (key, slot) in self.held.iter_mut().enumerate() {
            if let Some(last_seen) = slot {
                if last_seen.elapsed() >= timeout {
                    *slot = None;
                    released.push(key as u8);
                }
            }
        }
        released
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn the_key_block_covers_the_whole_pad() {
        let mut seen = [false; 16];
        for c in "1234qwerasdfzxcv".chars() {
            let key = Keypad::map(KeyCode::Char(c)).unwrap();
            seen[key as usize] = true;
        }
        assert!(seen.iter().all(|covered| *covered));
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(Keypad::map(KeyCode::Char('p')), None);
        assert_eq!(Keypad::map(KeyCode::Enter), None);
    }

    #[test]
    fn held_keys_expire_after_the_timeout() {
        let mut keypad = Keypad::new(Duration::from_millis(0));
        keypad.pressed(0x5);
        assert_eq!(keypad.expired(), vec![0x5]);
        // Released keys only expire once
        assert_eq!(keypad.expired(), Vec::<u8>::new());
    }

    #[test]
    fn fresh_keys_do_not_expire() {
        let mut keypad = Keypad::new(Duration::from_secs(60));
        keypad.pressed(0x5);
        assert_eq!(keypad.expired(), Vec::<u8>::new());
    }
}
