// toolkit-sdk: Foundation layer for the actions toolkit.
// This crate has ZERO dependencies on other toolkit crates and provides the
// injected capabilities (environment table, command sink, delimiter source)
// the protocol layer is built against.

pub mod command_sink;
pub mod delimiter;
pub mod diagnostics;
pub mod env;

// Re-export commonly used items at crate root
pub use command_sink::{BufferSink, CommandSink, StdoutSink, LINE_ENDING};
pub use delimiter::{DelimiterSource, FixedDelimiterSource, UuidDelimiterSource, DELIMITER_PREFIX};
pub use diagnostics::init_diagnostics;
pub use env::{EnvironmentProvider, MemoryEnvironment, ProcessEnvironment};
