//! Decoding of 16-bit instruction words into the 35-opcode instruction set.

use crate::emulator::error::Error;

/// A raw 16-bit instruction word, big-endian from two memory bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {
    /// Merge two consecutive memory bytes into one word, high byte first.
    pub fn from_bytes(high: u8, low: u8) -> Opcode {
        Opcode((u16::from(high) << 8) | u16::from(low))
    }

    /// The four nibbles of the word, most significant first.
    fn nibbles(self) -> (u8, u8, u8, u8) {
        (
            ((self.0 >> 12) & 0xF) as u8,
            ((self.0 >> 8) & 0xF) as u8,
            ((self.0 >> 4) & 0xF) as u8,
            (self.0 & 0xF) as u8,
        )
    }

    /// The low byte, used as an 8-bit immediate.
    fn imm8(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// The low 12 bits, used as an address.
    fn addr(self) -> u16 {
        self.0 & 0xFFF
    }
}

/// A 12-bit address operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A register operand, one of V0..VF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// An 8-bit immediate operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Imm(pub u8);

/// One instruction from the CHIP-8 instruction set.
///
/// The comment on each variant is the word pattern it decodes from, with
/// `NNN` an address, `NN` an 8-bit immediate, `N` a 4-bit immediate and
/// `X`/`Y` register numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen,              // 00E0
    Return,                   // 00EE
    Jump(Addr),               // 1NNN
    Call(Addr),               // 2NNN
    SkipEqImm(Reg, Imm),      // 3XNN
    SkipNeImm(Reg, Imm),      // 4XNN
    SkipEqReg(Reg, Reg),      // 5XY0
    LoadImm(Reg, Imm),        // 6XNN
    AddImm(Reg, Imm),         // 7XNN
    Move(Reg, Reg),           // 8XY0
    Or(Reg, Reg),             // 8XY1
    And(Reg, Reg),            // 8XY2
    Xor(Reg, Reg),            // 8XY3
    Add(Reg, Reg),            // 8XY4
    Sub(Reg, Reg),            // 8XY5
    ShiftRight(Reg, Reg),     // 8XY6
    SubNeg(Reg, Reg),         // 8XY7
    ShiftLeft(Reg, Reg),      // 8XYE
    SkipNeReg(Reg, Reg),      // 9XY0
    LoadIndex(Addr),          // ANNN
    JumpOffset(Addr),         // BNNN
    Random(Reg, Imm),         // CXNN
    Draw(Reg, Reg, u8),       // DXYN
    SkipKeyDown(Reg),         // EX9E
    SkipKeyUp(Reg),           // EXA1
    ReadDelay(Reg),           // FX07
    WaitKey(Reg),             // FX0A
    SetDelay(Reg),            // FX15
    SetSound(Reg),            // FX18
    AddIndex(Reg),            // FX1E
    LoadGlyph(Reg),           // FX29
    StoreBcd(Reg),            // FX33
    StoreRegisters(Reg),      // FX55
    LoadRegisters(Reg),       // FX65
}

impl Instruction {
    /// Decode a word into an instruction, or report it as unknown.
    ///
    /// Decoding has no side effects, so an unknown word costs nothing but
    /// the error itself.
    pub fn decode(opcode: Opcode) -> Result<Instruction, Error> {
        use Instruction::*;

        let instruction = match opcode.nibbles() {
            (0, 0, 0xE, 0) => ClearScreen,
            (0, 0, 0xE, 0xE) => Return,
            (1, _, _, _) => Jump(Addr(opcode.addr())),
            (2, _, _, _) => Call(Addr(opcode.addr())),
            (3, x, _, _) => SkipEqImm(Reg(x), Imm(opcode.imm8())),
            (4, x, _, _) => SkipNeImm(Reg(x), Imm(opcode.imm8())),
            (5, x, y, 0) => SkipEqReg(Reg(x), Reg(y)),
            (6, x, _, _) => LoadImm(Reg(x), Imm(opcode.imm8())),
            (7, x, _, _) => AddImm(Reg(x), Imm(opcode.imm8())),
            (8, x, y, 0) => Move(Reg(x), Reg(y)),
            (8, x, y, 1) => Or(Reg(x), Reg(y)),
            (8, x, y, 2) => And(Reg(x), Reg(y)),
            (8, x, y, 3) => Xor(Reg(x), Reg(y)),
            (8, x, y, 4) => Add(Reg(x), Reg(y)),
            (8, x, y, 5) => Sub(Reg(x), Reg(y)),
            (8, x, y, 6) => ShiftRight(Reg(x), Reg(y)),
            (8, x, y, 7) => SubNeg(Reg(x), Reg(y)),
            (8, x, y, 0xE) => ShiftLeft(Reg(x), Reg(y)),
            (9, x, y, 0) => SkipNeReg(Reg(x), Reg(y)),
            (0xA, _, _, _) => LoadIndex(Addr(opcode.addr())),
            (0xB, _, _, _) => JumpOffset(Addr(opcode.addr())),
            (0xC, x, _, _) => Random(Reg(x), Imm(opcode.imm8())),
            (0xD, x, y, n) => Draw(Reg(x), Reg(y), n),
            (0xE, x, 9, 0xE) => SkipKeyDown(Reg(x)),
            (0xE, x, 0xA, 1) => SkipKeyUp(Reg(x)),
            (0xF, x, 0, 7) => ReadDelay(Reg(x)),
            (0xF, x, 0, 0xA) => WaitKey(Reg(x)),
            (0xF, x, 1, 5) => SetDelay(Reg(x)),
            (0xF, x, 1, 8) => SetSound(Reg(x)),
            (0xF, x, 1, 0xE) => AddIndex(Reg(x)),
            (0xF, x, 2, 9) => LoadGlyph(Reg(x)),
            (0xF, x, 3, 3) => StoreBcd(Reg(x)),
            (0xF, x, 5, 5) => StoreRegisters(Reg(x)),
            (0xF, x, 6, 5) => LoadRegisters(Reg(x)),
            _ => return Err(Error::UnknownOpcode { opcode: opcode.0 }),
        };

        Ok(instruction)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn decode(word: u16) -> Instruction {
        Instruction::decode(Opcode(word)).unwrap()
    }

    #[test]
    fn bytes_merge_big_endian() {
        assert_eq!(Opcode::from_bytes(0x12, 0x34), Opcode(0x1234));
        assert_eq!(Opcode::from_bytes(0xAB, 0xCD), Opcode(0xABCD));
        assert_eq!(Opcode::from_bytes(0x00, 0xE0), Opcode(0x00E0));
    }

    #[test]
    fn every_opcode_decodes() {
        use Instruction::*;

        assert_eq!(decode(0x00E0), ClearScreen);
        assert_eq!(decode(0x00EE), Return);
        assert_eq!(decode(0x1025), Jump(Addr(0x025)));
        assert_eq!(decode(0x2037), Call(Addr(0x037)));
        assert_eq!(decode(0x3A08), SkipEqImm(Reg(0xA), Imm(0x08)));
        assert_eq!(decode(0x4A08), SkipNeImm(Reg(0xA), Imm(0x08)));
        assert_eq!(decode(0x5AB0), SkipEqReg(Reg(0xA), Reg(0xB)));
        assert_eq!(decode(0x6B23), LoadImm(Reg(0xB), Imm(0x23)));
        assert_eq!(decode(0x7CA1), AddImm(Reg(0xC), Imm(0xA1)));
        assert_eq!(decode(0x8AB0), Move(Reg(0xA), Reg(0xB)));
        assert_eq!(decode(0x8DE1), Or(Reg(0xD), Reg(0xE)));
        assert_eq!(decode(0x8DE2), And(Reg(0xD), Reg(0xE)));
        assert_eq!(decode(0x8DE3), Xor(Reg(0xD), Reg(0xE)));
        assert_eq!(decode(0x8AB4), Add(Reg(0xA), Reg(0xB)));
        assert_eq!(decode(0x8AB5), Sub(Reg(0xA), Reg(0xB)));
        assert_eq!(decode(0x8AB6), ShiftRight(Reg(0xA), Reg(0xB)));
        assert_eq!(decode(0x8AB7), SubNeg(Reg(0xA), Reg(0xB)));
        assert_eq!(decode(0x8ABE), ShiftLeft(Reg(0xA), Reg(0xB)));
        assert_eq!(decode(0x9AB0), SkipNeReg(Reg(0xA), Reg(0xB)));
        assert_eq!(decode(0xA025), LoadIndex(Addr(0x025)));
        assert_eq!(decode(0xB025), JumpOffset(Addr(0x025)));
        assert_eq!(decode(0xCA23), Random(Reg(0xA), Imm(0x23)));
        assert_eq!(decode(0xDABC), Draw(Reg(0xA), Reg(0xB), 0xC));
        assert_eq!(decode(0xEA9E), SkipKeyDown(Reg(0xA)));
        assert_eq!(decode(0xEAA1), SkipKeyUp(Reg(0xA)));
        assert_eq!(decode(0xFA07), ReadDelay(Reg(0xA)));
        assert_eq!(decode(0xFA0A), WaitKey(Reg(0xA)));
        assert_eq!(decode(0xFA15), SetDelay(Reg(0xA)));
        assert_eq!(decode(0xFA18), SetSound(Reg(0xA)));
        assert_eq!(decode(0xFA1E), AddIndex(Reg(0xA)));
        assert_eq!(decode(0xFA29), LoadGlyph(Reg(0xA)));
        assert_eq!(decode(0xFA33), StoreBcd(Reg(0xA)));
        assert_eq!(decode(0xFA55), StoreRegisters(Reg(0xA)));
        assert_eq!(decode(0xFA65), LoadRegisters(Reg(0xA)));
    }

    #[test_case(0x0000 ; "zero word")]
    #[test_case(0x00E1 ; "almost clear screen")]
    #[test_case(0x5AB1 ; "skip with nonzero low nibble")]
    #[test_case(0x8AB8 ; "hole in the alu group")]
    #[test_case(0x9AB5 ; "register skip with nonzero low nibble")]
    #[test_case(0xEA00 ; "unknown key test")]
    #[test_case(0xFA00 ; "unknown f group low byte")]
    #[test_case(0xFFFF ; "all ones")]
    fn unknown_words_are_reported(word: u16) {
        assert_eq!(
            Instruction::decode(Opcode(word)),
            Err(Error::UnknownOpcode { opcode: word })
        );
    }
}
