use std::fmt;
use std::sync::Arc;

use typed_builder::TypedBuilder;

use crate::log_sink::{LogCrateSink, SharedSink};

/// Construction-time options for [`GameBoy`](super::GameBoy).
///
/// ```
/// use std::sync::Arc;
/// use retroboy_dmg::{GameBoy, MachineConfig, NullSink};
///
/// let config = MachineConfig::builder()
///     .sink(Arc::new(NullSink))
///     .capture_serial(false)
///     .build();
/// let gb = GameBoy::with_config(config);
/// assert!(gb.serial_output().is_empty());
/// ```
#[derive(Clone, TypedBuilder)]
pub struct MachineConfig {
    /// Where diagnostics go. Defaults to the `log` facade.
    #[builder(default = Arc::new(LogCrateSink))]
    pub sink: SharedSink,
    /// Keep every byte the game starts shifting out of the serial port.
    #[builder(default = true)]
    pub capture_serial: bool,
    /// Log each opcode fetch at trace level.
    #[builder(default = false)]
    pub trace_instructions: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for MachineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineConfig")
            .field("capture_serial", &self.capture_serial)
            .field("trace_instructions", &self.trace_instructions)
            .finish_non_exhaustive()
    }
}
