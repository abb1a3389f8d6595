use std::fmt;

/// Errors surfaced by the emulator core.
///
/// Open-bus style conditions (unmapped reads/writes) are not errors; they are
/// logged through the machine's sink and otherwise behave like hardware.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GbError {
    /// The CPU fetched an opcode that has no handler. Execution stops here:
    /// skipping it would desynchronise every later timing-dependent event.
    UnimplementedOpcode { opcode: u8, pc: u16 },
    /// The ROM image is too short to contain a cartridge header.
    RomTooSmall { len: usize },
}

impl fmt::Display for GbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GbError::UnimplementedOpcode { opcode, pc } => {
                write!(f, "unimplemented opcode 0x{opcode:02X} at pc=0x{pc:04X}")
            }
            GbError::RomTooSmall { len } => {
                write!(f, "ROM image of {len} bytes is too small for a cartridge header")
            }
        }
    }
}

impl std::error::Error for GbError {}

pub type Result<T> = std::result::Result<T, GbError>;
