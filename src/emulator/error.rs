//! The failure conditions an emulated program can run into.
//!
//! All of these are non-fatal: the component that reports one leaves its
//! state untouched, so the driver can inspect the machine or halt it.

/// An error raised while executing an emulated program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A memory access outside of the 4K address space.
    #[error("memory address {addr:#06X} is out of range")]
    OutOfRange { addr: u16 },

    /// A key index outside of the 16-key pad.
    #[error("key {key:#04X} is not on the 16-key pad")]
    InvalidKey { key: u8 },

    /// An instruction word that matches none of the 35 opcodes.
    #[error("unknown opcode {opcode:#06X}")]
    UnknownOpcode { opcode: u16 },

    /// A subroutine call with all 16 stack slots in use.
    #[error("call stack overflow")]
    StackOverflow,

    /// A return with no call to return from.
    #[error("return with an empty call stack")]
    StackUnderflow,
}
