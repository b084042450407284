//! The 4K byte store of the CHIP-8, with the built-in font glyphs at the
//! bottom and program images loaded at 0x200.

use crate::emulator::error::Error;

/// Total size of the address space in bytes.
pub const MEMORY_SIZE: usize = 0x1000;

/// Address the program image is loaded at, and the first address the
/// program counter points to.
pub const PROGRAM_START: u16 = 0x200;

/// One glyph per hex digit, five bytes per glyph.
pub const GLYPH_SIZE: u16 = 5;

const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// The memory bank of the emulator.
///
/// Addresses 0..80 hold the font table and are reseeded on every reset;
/// everything from [`PROGRAM_START`] up is program territory.
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Memory {
        let mut memory = Memory {
            bytes: [0; MEMORY_SIZE],
        };
        memory.reset();
        memory
    }

    /// Zero the whole bank, then write the font table back at address 0.
    pub fn reset(&mut self) {
        self.bytes = [0; MEMORY_SIZE];
        self.bytes[..FONT.len()].copy_from_slice(&FONT);
    }

    /// Copy a program image into memory starting at [`PROGRAM_START`].
    ///
    /// The image may be at most `0x1000 - 0x200` bytes; anything beyond
    /// that does not fit in the address space and is dropped.
    pub fn load_program(&mut self, program: &[u8]) {
        let capacity = MEMORY_SIZE - PROGRAM_START as usize;
        if program.len() > capacity {
            log::warn!(
                "Program is {} bytes, but only {} fit; truncating",
                program.len(),
                capacity
            );
        }
        let len = std::cmp::min(program.len(), capacity);
        let start = PROGRAM_START as usize;
        self.bytes[start..start + len].copy_from_slice(&program[..len]);
    }

    /// Read the byte at `addr`.
    ///
    /// An out-of-range address is an error, never a zero byte, so callers
    /// can tell a failed read from a read of an empty cell.
    pub fn read_byte(&self, addr: u16) -> Result<u8, Error> {
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(Error::OutOfRange { addr })
    }

    /// Write a byte at `addr`.
    pub fn write_byte(&mut self, addr: u16, value: u8) -> Result<(), Error> {
        match self.bytes.get_mut(addr as usize) {
            Some(byte) => {
                *byte = value;
                Ok(())
            }
            None => Err(Error::OutOfRange { addr }),
        }
    }

    /// Whether every address in `addr..addr + len` is readable.
    pub fn check_range(&self, addr: u16, len: u16) -> Result<(), Error> {
        let end = addr as usize + len as usize;
        if end > MEMORY_SIZE {
            return Err(Error::OutOfRange {
                addr: (MEMORY_SIZE as u16).max(addr),
            });
        }
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_memory_holds_the_font() {
        let memory = Memory::new();
        for (addr, expected) in FONT.iter().enumerate() {
            assert_eq!(memory.read_byte(addr as u16), Ok(*expected));
        }
    }

    #[test]
    fn reset_reseeds_font_and_zeroes_the_rest() {
        let mut memory = Memory::new();
        memory.write_byte(0, 0xAB).unwrap();
        memory.load_program(&[1, 2, 3]);
        memory.reset();

        for (addr, expected) in FONT.iter().enumerate() {
            assert_eq!(memory.read_byte(addr as u16), Ok(*expected));
        }
        for addr in FONT.len() as u16..MEMORY_SIZE as u16 {
            assert_eq!(memory.read_byte(addr), Ok(0));
        }
    }

    #[test]
    fn programs_are_loaded_at_0x200() {
        let mut memory = Memory::new();
        memory.load_program(&[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(memory.read_byte(0x200), Ok(0xDE));
        assert_eq!(memory.read_byte(0x201), Ok(0xAD));
        assert_eq!(memory.read_byte(0x202), Ok(0xBE));
        assert_eq!(memory.read_byte(0x203), Ok(0xEF));
        assert_eq!(memory.read_byte(0x204), Ok(0x00));
    }

    #[test]
    fn oversized_programs_are_truncated() {
        let mut memory = Memory::new();
        let program = vec![0xFF; MEMORY_SIZE];
        memory.load_program(&program);
        assert_eq!(memory.read_byte(0xFFF), Ok(0xFF));
        // The font at the bottom must survive
        assert_eq!(memory.read_byte(0), Ok(FONT[0]));
    }

    #[test]
    fn out_of_range_addresses_are_errors() {
        let mut memory = Memory::new();
        assert_eq!(
            memory.read_byte(0x1000),
            Err(Error::OutOfRange { addr: 0x1000 })
        );
        assert_eq!(
            memory.write_byte(0xFFFF, 1),
            Err(Error::OutOfRange { addr: 0xFFFF })
        );
    }

    #[test]
    fn check_range_accepts_the_whole_bank_and_rejects_past_it() {
        let memory = Memory::new();
        assert!(memory.check_range(0, MEMORY_SIZE as u16).is_ok());
        assert!(memory.check_range(0xFFD, 3).is_ok());
        assert!(memory.check_range(0xFFD, 4).is_err());
    }

    proptest! {
        #[test]
        fn written_bytes_are_read_back(addr in 0u16..0x1000, value: u8) {
            let mut memory = Memory::new();
            memory.write_byte(addr, value).unwrap();
            prop_assert_eq!(memory.read_byte(addr), Ok(value));
        }
    }
}
