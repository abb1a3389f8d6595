//! Sharp LR35902 (SM83) execution engine.
//!
//! Every instruction is a small resumable state machine: the dispatcher calls
//! its handler once per machine cycle with `m_cycle` telling it which cycle it
//! is on, and the handler reports whether the instruction has finished. That
//! keeps memory accesses on the exact cycle the hardware performs them and
//! confines interrupt dispatch and HALT to instruction boundaries.

mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod step;
mod table;

pub use bus::Bus;
pub use regs::{Flag, Registers};
pub use table::{instruction, Instruction, StepFn};

use crate::error::GbError;

/// CPU core state.
///
/// The scratch latches (`z`, `w`, `mdr`) carry partial results between the
/// machine cycles of one instruction; they have no architectural meaning.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cpu {
    pub regs: Registers,
    /// Interrupt master enable.
    pub ime: bool,
    pub halted: bool,
    /// Next opcode fetch does not advance PC.
    pub halt_bug: bool,
    /// Instruction boundaries left before a pending `EI` takes effect.
    ime_delay: u8,
    /// Machine cycle of the current instruction; 0 at a boundary.
    m_cycle: u8,
    opcode: u8,
    cb_opcode: u8,
    /// Immediate / popped low byte.
    z: u8,
    /// Immediate / popped high byte.
    w: u8,
    /// Memory data register for read-modify-write instructions.
    mdr: u8,
    dispatch: Option<interrupts::Dispatch>,
    /// Set once an unimplemented opcode is hit; the core stays locked.
    fault: Option<GbError>,
    /// Machine cycles executed since reset.
    cycles: u64,
}

impl Cpu {
    /// `true` between instructions (no handler or interrupt dispatch in
    /// flight).
    #[inline]
    pub fn at_instruction_boundary(&self) -> bool {
        self.m_cycle == 0 && self.dispatch.is_none()
    }

    /// Opcode of the instruction currently executing (or last executed).
    #[inline]
    pub fn current_opcode(&self) -> u8 {
        self.opcode
    }

    #[inline]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    #[inline]
    pub fn fault(&self) -> Option<&GbError> {
        self.fault.as_ref()
    }
}
