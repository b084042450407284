//! The fetch-decode-execute engine and its register state.

use crate::emulator::error::Error;
use crate::emulator::instruction::{Addr, Imm, Instruction, Opcode, Reg};
use crate::emulator::memory::{GLYPH_SIZE, PROGRAM_START};
use crate::emulator::Bus;

const NUM_REGISTERS: usize = 16;
const STACK_DEPTH: usize = 16;

/// What the CPU will do on its next cycle.
#[derive(Clone, Copy)]
enum Mode {
    /// Fetch, decode and execute the instruction at the program counter.
    Running,
    /// Poll the keypad until any key is down, then store that key in
    /// `dest` and resume. Entered by the FX0A instruction.
    WaitingForKey { dest: Reg },
}

/// The CHIP-8 CPU.
///
/// Owns the general-purpose registers V0..VF, the index register I, the
/// program counter, the 16-deep call stack and the draw flag. Everything
/// else it works on lives in the [`Bus`] passed into each cycle.
///
/// VF doubles as the carry/borrow/collision flag: arithmetic, shifts and
/// draws overwrite it, and programs that park a value there lose it.
pub struct Cpu {
    v: [u8; NUM_REGISTERS],
    i: u16,
    pc: u16,
    stack: [u16; STACK_DEPTH],
    sp: u8,
    mode: Mode,
    draw_flag: bool,
}

impl Cpu {
    pub fn new() -> Cpu {
        Cpu {
            v: [0; NUM_REGISTERS],
            i: 0,
            pc: PROGRAM_START,
            stack: [0; STACK_DEPTH],
            sp: 0,
            mode: Mode::Running,
            draw_flag: false,
        }
    }

    /// Put every register back in its power-on state.
    pub fn reset(&mut self) {
        *self = Cpu::new();
    }

    /// Whether the framebuffer changed since the flag was last cleared.
    pub fn draw_flag(&self) -> bool {
        self.draw_flag
    }

    /// Clear the draw flag after presenting a frame.
    pub fn clear_draw_flag(&mut self) {
        self.draw_flag = false;
    }

    /// Run one cycle: fetch the word at the program counter, decode it and
    /// execute it against `bus`.
    ///
    /// While waiting for a key this only polls the keypad; the cycle is
    /// otherwise a no-op so the driving loop can keep rendering and
    /// ticking timers.
    ///
    /// On an error nothing has been mutated and the program counter still
    /// points at the offending instruction, so the machine can be
    /// inspected or halted as-is.
    pub fn execute_cycle(&mut self, bus: &mut Bus) -> Result<(), Error> {
        if let Mode::WaitingForKey { dest } = self.mode {
            if let Some(key) = bus.input.first_down() {
                self.v[dest.0 as usize] = key;
                self.mode = Mode::Running;
                self.pc += 2;
            }
            return Ok(());
        }

        let high = bus.memory.read_byte(self.pc)?;
        let low = bus.memory.read_byte(self.pc + 1)?;
        let opcode = Opcode::from_bytes(high, low);
        let instruction = Instruction::decode(opcode)?;
        log::trace!("{:#06X}: {:?}", self.pc, instruction);

        self.execute(instruction, bus)
    }

    /// Advance past the current instruction, skipping the next one if
    /// `condition` holds.
    fn skip_if(&mut self, condition: bool) {
        self.pc += if condition { 4 } else { 2 };
    }

    // Every arm advances the program counter itself: plain instructions
    // step by 2, skips by 2 or 4, and jump/call/return/wait replace or
    // hold it outright.
    fn execute(&mut self, instruction: Instruction, bus: &mut Bus) -> Result<(), Error> {
        match instruction {
            Instruction::ClearScreen => {
                bus.graphics.clear();
                self.draw_flag = true;
                self.pc += 2;
            }

            Instruction::Return => {
                if self.sp == 0 {
                    return Err(Error::StackUnderflow);
                }
                self.sp -= 1;
                self.pc = self.stack[self.sp as usize] + 2;
            }

            Instruction::Jump(Addr(addr)) => {
                self.pc = addr;
            }

            Instruction::Call(Addr(addr)) => {
                if self.sp as usize == STACK_DEPTH {
                    return Err(Error::StackOverflow);
                }
                self.stack[self.sp as usize] = self.pc;
                self.sp += 1;
                self.pc = addr;
            }

            Instruction::SkipEqImm(Reg(x), Imm(n)) => {
                self.skip_if(self.v[x as usize] == n);
            }

            Instruction::SkipNeImm(Reg(x), Imm(n)) => {
                self.skip_if(self.v[x as usize] != n);
            }

            Instruction::SkipEqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.v[x as usize] == self.v[y as usize]);
            }

            Instruction::LoadImm(Reg(x), Imm(n)) => {
                self.v[x as usize] = n;
                self.pc += 2;
            }

            // Wraps without touching VF, unlike 8XY4
            Instruction::AddImm(Reg(x), Imm(n)) => {
                self.v[x as usize] = self.v[x as usize].wrapping_add(n);
                self.pc += 2;
            }

            Instruction::Move(Reg(x), Reg(y)) => {
                self.v[x as usize] = self.v[y as usize];
                self.pc += 2;
            }

            Instruction::Or(Reg(x), Reg(y)) => {
                self.v[x as usize] |= self.v[y as usize];
                self.pc += 2;
            }

            Instruction::And(Reg(x), Reg(y)) => {
                self.v[x as usize] &= self.v[y as usize];
                self.pc += 2;
            }

            Instruction::Xor(Reg(x), Reg(y)) => {
                self.v[x as usize] ^= self.v[y as usize];
                self.pc += 2;
            }

            Instruction::Add(Reg(x), Reg(y)) => {
                let (result, carry) = self.v[x as usize].overflowing_add(self.v[y as usize]);
                self.v[x as usize] = result;
                self.v[0xF] = carry as u8;
                self.pc += 2;
            }

            Instruction::Sub(Reg(x), Reg(y)) => {
                let vx = self.v[x as usize];
                let vy = self.v[y as usize];
                self.v[x as usize] = vx.wrapping_sub(vy);
                self.v[0xF] = (vx > vy) as u8;
                self.pc += 2;
            }

            // The shifts read Vy, not Vx, and VF takes the shifted-out bit
            Instruction::ShiftRight(Reg(x), Reg(y)) => {
                let vy = self.v[y as usize];
                self.v[x as usize] = vy >> 1;
                self.v[0xF] = vy & 1;
                self.pc += 2;
            }

            Instruction::SubNeg(Reg(x), Reg(y)) => {
                let vx = self.v[x as usize];
                let vy = self.v[y as usize];
                self.v[x as usize] = vy.wrapping_sub(vx);
                self.v[0xF] = (vy > vx) as u8;
                self.pc += 2;
            }

            Instruction::ShiftLeft(Reg(x), Reg(y)) => {
                let vy = self.v[y as usize];
                self.v[x as usize] = vy << 1;
                self.v[0xF] = vy >> 7;
                self.pc += 2;
            }

            Instruction::SkipNeReg(Reg(x), Reg(y)) => {
                self.skip_if(self.v[x as usize] != self.v[y as usize]);
            }

            Instruction::LoadIndex(Addr(addr)) => {
                self.i = addr;
                self.pc += 2;
            }

            Instruction::JumpOffset(Addr(addr)) => {
                self.pc = u16::from(self.v[0]) + addr;
            }

            Instruction::Random(Reg(x), Imm(n)) => {
                self.v[x as usize] = rand::random::<u8>() & n;
                self.pc += 2;
            }

            Instruction::Draw(Reg(x), Reg(y), n) => {
                bus.memory.check_range(self.i, u16::from(n))?;
                let left = self.v[x as usize] as usize;
                let top = self.v[y as usize] as usize;

                self.v[0xF] = 0;
                for row in 0..u16::from(n) {
                    let bits = bus.memory.read_byte(self.i + row)?;
                    for col in 0..8 {
                        if bits & (0x80 >> col) != 0
                            && bus.graphics.set_pixel(left + col, top + row as usize)
                        {
                            self.v[0xF] = 1;
                        }
                    }
                }
                self.draw_flag = true;
                self.pc += 2;
            }

            Instruction::SkipKeyDown(Reg(x)) => {
                self.skip_if(bus.input.is_down(self.v[x as usize]));
            }

            Instruction::SkipKeyUp(Reg(x)) => {
                self.skip_if(!bus.input.is_down(self.v[x as usize]));
            }

            Instruction::ReadDelay(Reg(x)) => {
                self.v[x as usize] = bus.timers.delay();
                self.pc += 2;
            }

            // The program counter stays put; it only moves once the wait
            // ends in a later cycle
            Instruction::WaitKey(reg) => {
                self.mode = Mode::WaitingForKey { dest: reg };
            }

            Instruction::SetDelay(Reg(x)) => {
                bus.timers.set_delay(self.v[x as usize]);
                self.pc += 2;
            }

            Instruction::SetSound(Reg(x)) => {
                bus.timers.set_sound(self.v[x as usize]);
                self.pc += 2;
            }

            Instruction::AddIndex(Reg(x)) => {
                self.i = self.i.wrapping_add(u16::from(self.v[x as usize]));
                self.pc += 2;
            }

            Instruction::LoadGlyph(Reg(x)) => {
                self.i = GLYPH_SIZE * u16::from(self.v[x as usize]);
                self.pc += 2;
            }

            Instruction::StoreBcd(Reg(x)) => {
                bus.memory.check_range(self.i, 3)?;
                let value = self.v[x as usize];
                bus.memory.write_byte(self.i, value / 100)?;
                bus.memory.write_byte(self.i + 1, (value / 10) % 10)?;
                bus.memory.write_byte(self.i + 2, value % 10)?;
                self.pc += 2;
            }

            Instruction::StoreRegisters(Reg(x)) => {
                bus.memory.check_range(self.i, u16::from(x) + 1)?;
                for r in 0..=u16::from(x) {
                    bus.memory.write_byte(self.i + r, self.v[r as usize])?;
                }
                self.pc += 2;
            }

            Instruction::LoadRegisters(Reg(x)) => {
                bus.memory.check_range(self.i, u16::from(x) + 1)?;
                for r in 0..=u16::from(x) {
                    self.v[r as usize] = bus.memory.read_byte(self.i + r)?;
                }
                self.pc += 2;
            }
        }

        Ok(())
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
