//! Opcode handlers, grouped the way the opcode map groups them.
//!
//! Cycle 1 of every handler is the opcode fetch the dispatcher already did;
//! single-cycle instructions do all their work there. Register-only work
//! that hardware overlaps with the next fetch is done on the last cycle.

mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;
