/// Forward a formatted message to a [`log_sink::LogSink`] if the level is
/// enabled. Formatting is skipped entirely for disabled levels.
macro_rules! sink_log {
    ($sink:expr, $level:ident, $target:expr, $($arg:tt)+) => {{
        let level = $crate::log_sink::LogLevel::$level;
        if $sink.enabled(level) {
            $sink.log(level, $target, format_args!($($arg)+));
        }
    }};
}

pub mod cpu;
pub mod error;
pub mod log_sink;
pub mod machine;

pub use error::{GbError, Result};
pub use log_sink::{LogCrateSink, LogLevel, LogRecord, LogSink, MemorySink, NullSink, SharedSink};
pub use machine::{
    Button, CartridgeHeader, GameBoy, Interrupt, MachineConfig, MapperKind, Mode, MCYCLES_PER_FRAME,
};

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;

/// One completed frame: 144 rows of 160 two-bit shades (0 = lightest).
pub type FrameBuffer = [[u8; SCREEN_WIDTH]; SCREEN_HEIGHT];
