// toolkit-core: the job-step side of the Actions runner IPC protocol.
// Commands flow to the runner either as `::command::` stdout lines or as
// append-only file-command blocks; inputs and state flow back through the
// environment. This crate depends on `toolkit-sdk` for its injected
// capabilities.

pub mod action_core;
pub mod annotation;
pub mod command_value;
pub mod context;
pub mod error;
pub mod file_command;
pub mod input;
pub mod wire_command;

// ---------------------------------------------------------------------------
// Re-exports for convenient access
// ---------------------------------------------------------------------------

pub use action_core::ActionCore;
pub use annotation::AnnotationProperties;
pub use command_value::CommandValue;
pub use context::{Context, Issue, Repo};
pub use error::{ExitCode, Result, ToolkitError};
pub use file_command::FileCommandWriter;
pub use input::InputOptions;
pub use wire_command::{escape_data, escape_property, WireCommand, CMD_STRING};
