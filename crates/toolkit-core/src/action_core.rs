// The step-side operation facade.
// Routes each operation to the stdout protocol or to a file command based on
// which designator variables the runner has set, and mirrors environment
// mutations into the current process so later reads observe them.

use std::error::Error as StdError;
use std::fmt::Display;
use std::process;
use std::sync::Arc;

use toolkit_sdk::{
    CommandSink, DelimiterSource, EnvironmentProvider, ProcessEnvironment, StdoutSink,
    UuidDelimiterSource,
};

use crate::annotation::AnnotationProperties;
use crate::command_value::CommandValue;
use crate::error::{ExitCode, Result, ToolkitError};
use crate::file_command::FileCommandWriter;
use crate::wire_command::WireCommand;

/// Separator between entries of the `PATH` list variable.
#[cfg(windows)]
const PATH_LIST_SEPARATOR: char = ';';
#[cfg(not(windows))]
const PATH_LIST_SEPARATOR: char = ':';

/// Entry point for everything a job step tells the runner.
///
/// Construction is explicit about its collaborators so tests can substitute
/// an in-memory environment, a capturing sink, and deterministic delimiters.
pub struct ActionCore {
    env: Arc<dyn EnvironmentProvider>,
    sink: Arc<dyn CommandSink>,
    file_commands: FileCommandWriter,
}

impl Default for ActionCore {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionCore {
    /// A core wired to the process environment and stdout.
    pub fn new() -> Self {
        Self::with_providers(
            Arc::new(ProcessEnvironment),
            Arc::new(StdoutSink),
            Arc::new(UuidDelimiterSource),
        )
    }

    /// A core over explicit collaborators.
    pub fn with_providers(
        env: Arc<dyn EnvironmentProvider>,
        sink: Arc<dyn CommandSink>,
        delimiters: Arc<dyn DelimiterSource>,
    ) -> Self {
        let file_commands = FileCommandWriter::new(Arc::clone(&env), delimiters);
        Self {
            env,
            sink,
            file_commands,
        }
    }

    /// The environment table this core reads and writes.
    pub fn environment(&self) -> &dyn EnvironmentProvider {
        self.env.as_ref()
    }

    // -----------------------------------------------------------------------
    // Command emission helpers
    // -----------------------------------------------------------------------

    fn issue_command(
        &self,
        command: &str,
        properties: Vec<(String, CommandValue)>,
        message: CommandValue,
    ) -> Result<()> {
        let line = WireCommand::new(command)
            .properties(properties)
            .message(message)
            .render();
        self.sink.write_line(&line)?;
        Ok(())
    }

    fn issue(&self, command: &str, message: &str) -> Result<()> {
        self.issue_command(command, Vec::new(), CommandValue::from(message))
    }

    fn issue_annotation(
        &self,
        command: &str,
        message: &str,
        properties: AnnotationProperties,
    ) -> Result<()> {
        self.issue_command(
            command,
            properties.to_command_properties(),
            CommandValue::from(message),
        )
    }

    // -----------------------------------------------------------------------
    // Variables
    // -----------------------------------------------------------------------

    /// Set an environment variable for this step and every later step in the
    /// job. Non-string values are carried in their JSON form.
    ///
    /// The current process's own environment is updated immediately, whether
    /// the runner-facing emission goes to `GITHUB_ENV` or stdout.
    pub fn export_variable(&self, name: &str, value: impl Into<CommandValue>) -> Result<()> {
        let value = value.into();
        let converted = value.to_command_string();
        self.env.set(name, &converted);

        if self.file_commands.is_designated("ENV") {
            self.file_commands.append_key_value("ENV", name, &value)
        } else {
            self.issue_command(
                "set-env",
                vec![("name".to_string(), CommandValue::from(name))],
                CommandValue::Text(converted),
            )
        }
    }

    /// Register a secret so the runner masks it in log output.
    pub fn set_secret(&self, secret: &str) -> Result<()> {
        self.issue_command("add-mask", Vec::new(), CommandValue::from(secret))
    }

    /// Prepend a directory to `PATH` for this step and every later step.
    pub fn add_path(&self, input_path: &str) -> Result<()> {
        if self.file_commands.is_designated("PATH") {
            self.file_commands
                .append_value("PATH", &CommandValue::from(input_path))?;
        } else {
            self.issue("add-path", input_path)?;
        }

        let path = match self.env.get("PATH") {
            Some(existing) if !existing.is_empty() => {
                format!("{input_path}{PATH_LIST_SEPARATOR}{existing}")
            }
            _ => input_path.to_string(),
        };
        self.env.set("PATH", &path);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Outputs and state
    // -----------------------------------------------------------------------

    /// Set a step output, readable by later steps in the job.
    pub fn set_output(&self, name: &str, value: impl Into<CommandValue>) -> Result<()> {
        let value = value.into();
        if self.file_commands.is_designated("OUTPUT") {
            return self.file_commands.append_key_value("OUTPUT", name, &value);
        }
        // Terminate any partial line a prior raw write may have left open.
        self.sink.write_line("")?;
        self.issue_command(
            "set-output",
            vec![("name".to_string(), CommandValue::from(name))],
            value,
        )
    }

    /// Save state readable by this action's post-job execution.
    pub fn save_state(&self, name: &str, value: impl Into<CommandValue>) -> Result<()> {
        self.issue_command(
            "save-state",
            vec![("name".to_string(), CommandValue::from(name))],
            value.into(),
        )
    }

    // -----------------------------------------------------------------------
    // Logging
    // -----------------------------------------------------------------------

    /// Whether step debug logging is on.
    pub fn is_debug(&self) -> bool {
        self.env.get("RUNNER_DEBUG").as_deref() == Some("1")
    }

    /// Write a debug message to the step log.
    pub fn debug(&self, message: &str) -> Result<()> {
        self.issue_command("debug", Vec::new(), CommandValue::from(message))
    }

    /// Write a plain informational line.
    pub fn info(&self, message: &str) -> Result<()> {
        self.sink.write_line(message)?;
        Ok(())
    }

    /// Add an error annotation.
    pub fn error(&self, message: &str, properties: AnnotationProperties) -> Result<()> {
        self.issue_annotation("error", message, properties)
    }

    /// Add an error annotation from a caught error, prefixed `Error: `.
    pub fn error_from(
        &self,
        source: &dyn StdError,
        properties: AnnotationProperties,
    ) -> Result<()> {
        self.issue_annotation("error", &format!("Error: {source}"), properties)
    }

    /// Add a warning annotation.
    pub fn warning(&self, message: &str, properties: AnnotationProperties) -> Result<()> {
        self.issue_annotation("warning", message, properties)
    }

    /// Add a warning annotation from a caught error, prefixed `Error: `.
    pub fn warning_from(
        &self,
        source: &dyn StdError,
        properties: AnnotationProperties,
    ) -> Result<()> {
        self.issue_annotation("warning", &format!("Error: {source}"), properties)
    }

    /// Add a notice annotation.
    pub fn notice(&self, message: &str, properties: AnnotationProperties) -> Result<()> {
        self.issue_annotation("notice", message, properties)
    }

    /// Add a notice annotation from a caught error, prefixed `Error: `.
    pub fn notice_from(
        &self,
        source: &dyn StdError,
        properties: AnnotationProperties,
    ) -> Result<()> {
        self.issue_annotation("notice", &format!("Error: {source}"), properties)
    }

    /// Enable or disable echoing of commands into the step log.
    pub fn set_command_echo(&self, enabled: bool) -> Result<()> {
        self.issue("echo", if enabled { "on" } else { "off" })
    }

    // -----------------------------------------------------------------------
    // Groups
    // -----------------------------------------------------------------------

    /// Begin a foldable output group.
    pub fn start_group(&self, name: &str) -> Result<()> {
        self.issue("group", name)
    }

    /// End the current output group.
    pub fn end_group(&self) -> Result<()> {
        self.issue("endgroup", "")
    }

    /// Run a unit of work inside an output group.
    ///
    /// The end marker is emitted even when the work fails, before that
    /// failure propagates.
    pub fn group<T, E, F>(&self, name: &str, work: F) -> std::result::Result<T, E>
    where
        E: From<ToolkitError>,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        self.start_group(name)?;
        let result = work();
        let ended = self.end_group();
        match result {
            Ok(value) => {
                ended?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }

    /// Run an async unit of work inside an output group.
    pub async fn group_async<T, E, F, Fut>(&self, name: &str, work: F) -> std::result::Result<T, E>
    where
        E: From<ToolkitError>,
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<T, E>>,
    {
        self.start_group(name)?;
        let result = work().await;
        let ended = self.end_group();
        match result {
            Ok(value) => {
                ended?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }

    // -----------------------------------------------------------------------
    // Results
    // -----------------------------------------------------------------------

    /// Report failure and terminate the process with exit code 1.
    pub fn set_failed(&self, message: &str) -> ! {
        let _ = self.error(message, AnnotationProperties::default());
        process::exit(ExitCode::Failure as i32);
    }

    /// Top-of-stack handler for a step's main result: a failure becomes an
    /// `error` annotation plus a failing exit code, a success exits cleanly.
    pub fn finish<E: Display>(&self, result: std::result::Result<(), E>) -> ! {
        match result {
            Ok(()) => process::exit(ExitCode::Success as i32),
            Err(err) => self.set_failed(&format!("Error: {err}")),
        }
    }
}
