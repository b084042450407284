/*!

A CHIP-8 interpreter as specified at https://en.wikipedia.org/wiki/CHIP-8.

# Crossterm frontend

If you want to play some programs, there is a ready-to-use terminal
frontend you can run with `cargo run --release --bin crossterm_frontend --
<rom>`. The 1234/QWER/ASDF/ZXCV block maps onto the 16-key hex pad; which
keys do something depends on the CHIP-8 program.

# Library

The emulator itself keeps no time and opens no windows. You give it a
program, then drive it:

```rust
use chip8::emulator::Emulator;

let mut emulator = Emulator::new();

// Load a program at address 0x200. This one clears the screen.
emulator.load_program(&[0x00, 0xE0]);
emulator.execute_cycle().unwrap();
assert!(emulator.draw_flag());
```

A real driver runs a batch of cycles per rendered frame, ticks the timers
once per frame, and presents the framebuffer whenever the draw flag is
set:

```rust
use chip8::emulator::Emulator;

let mut emulator = Emulator::new();
emulator.load_program(&[0x12, 0x00]); // loop forever

for _frame in 0..2 {
    for _ in 0..10 {
        emulator.execute_cycle().unwrap();
    }
    emulator.execute_timers();
    if emulator.draw_flag() {
        let _pixels = emulator.graphics().snapshot();
        // hand _pixels to your renderer here
        emulator.clear_draw_flag();
    }
}
```

Key events from the host go in through [`emulator::Emulator::key_pressed`]
and [`emulator::Emulator::key_released`]; a custom
[`emulator::timers::Buzzer`] implementation gets the sound timer's beeps.

Instruction words can also be decoded on their own, which is handy for
inspecting ROMs:

```rust
use chip8::emulator::instruction::{Addr, Instruction, Opcode};

let instruction = Instruction::decode(Opcode(0x1234)).unwrap();
assert_eq!(instruction, Instruction::Jump(Addr(0x234)));
```

Execution failures (out-of-range memory accesses, unknown opcodes,
off-pad keys) come back as [`emulator::error::Error`] values. They never
mutate the machine, so a stuck program can be inspected exactly where it
stopped.
*/

pub mod emulator;
