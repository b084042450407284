//! State of the 16-key hex pad.

use crate::emulator::error::Error;

/// Number of keys on the pad, 0x0 through 0xF.
pub const NUM_KEYS: usize = 16;

/// Pressed/released state for each of the 16 keys.
///
/// State changes reject keys outside the pad; queries are total and simply
/// answer "not pressed" for them.
pub struct Input {
    keys: [bool; NUM_KEYS],
}

impl Input {
    pub fn new() -> Input {
        Input {
            keys: [false; NUM_KEYS],
        }
    }

    /// Release every key.
    pub fn reset(&mut self) {
        self.keys = [false; NUM_KEYS];
    }

    /// Mark `key` as pressed.
    pub fn press(&mut self, key: u8) -> Result<(), Error> {
        match self.keys.get_mut(key as usize) {
            Some(state) => {
                *state = true;
                Ok(())
            }
            None => Err(Error::InvalidKey { key }),
        }
    }

    /// Mark `key` as released.
    pub fn release(&mut self, key: u8) -> Result<(), Error> {
        match self.keys.get_mut(key as usize) {
            Some(state) => {
                *state = false;
                Ok(())
            }
            None => Err(Error::InvalidKey { key }),
        }
    }

    /// Whether `key` is currently pressed. False for keys not on the pad.
    pub fn is_down(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// The lowest-numbered pressed key, if any.
    ///
    /// Scanning in ascending order keeps the result deterministic when
    /// several keys are down at once.
    pub fn first_down(&self) -> Option<u8> {
        self.keys.iter().position(|down| *down).map(|key| key as u8)
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn pressed_keys_are_down_until_released() {
        let mut input = Input::new();
        input.press(0xA).unwrap();
        assert!(input.is_down(0xA));
        input.release(0xA).unwrap();
        assert!(!input.is_down(0xA));
    }

    #[test]
    fn keys_off_the_pad_are_rejected() {
        let mut input = Input::new();
        assert_eq!(input.press(16), Err(Error::InvalidKey { key: 16 }));
        assert_eq!(input.release(0xFF), Err(Error::InvalidKey { key: 0xFF }));
        // Key 0xF is the last one actually on the pad
        assert!(input.press(0xF).is_ok());
    }

    #[test]
    fn is_down_is_false_off_the_pad() {
        let input = Input::new();
        assert!(!input.is_down(16));
        assert!(!input.is_down(0xFF));
    }

    #[test]
    fn first_down_returns_the_lowest_pressed_key() {
        let mut input = Input::new();
        assert_eq!(input.first_down(), None);
        input.press(0xC).unwrap();
        input.press(0x3).unwrap();
        input.press(0x7).unwrap();
        assert_eq!(input.first_down(), Some(0x3));
    }

    #[test]
    fn reset_releases_everything() {
        let mut input = Input::new();
        input.press(0).unwrap();
        input.press(0xF).unwrap();
        input.reset();
        assert_eq!(input.first_down(), None);
    }
}
