// Append-only file commands (GITHUB_ENV, GITHUB_PATH, GITHUB_OUTPUT, ...).
// The runner designates each target file through an environment variable and
// consumes it after the step; the step side only ever appends.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use toolkit_sdk::{DelimiterSource, EnvironmentProvider, LINE_ENDING};

use crate::command_value::CommandValue;
use crate::error::{Result, ToolkitError};

/// Appends protocol blocks to the file a `GITHUB_<designator>` variable
/// points at.
///
/// The target file is owned by the runner: it must already exist, and this
/// writer never truncates or rewrites it.
pub struct FileCommandWriter {
    env: Arc<dyn EnvironmentProvider>,
    delimiters: Arc<dyn DelimiterSource>,
}

impl FileCommandWriter {
    pub fn new(env: Arc<dyn EnvironmentProvider>, delimiters: Arc<dyn DelimiterSource>) -> Self {
        Self { env, delimiters }
    }

    /// Whether a non-empty `GITHUB_<designator>` variable is present.
    pub fn is_designated(&self, designator: &str) -> bool {
        self.env
            .get(&format!("GITHUB_{designator}"))
            .is_some_and(|value| !value.is_empty())
    }

    fn resolve(&self, designator: &str) -> Result<String> {
        let variable = format!("GITHUB_{designator}");
        let path = self
            .env
            .get(&variable)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ToolkitError::Configuration {
                designator: designator.to_string(),
            })?;
        if !Path::new(&path).exists() {
            return Err(ToolkitError::NotFound { path });
        }
        Ok(path)
    }

    fn append(&self, path: &str, block: &str) -> Result<()> {
        let mut file = OpenOptions::new().append(true).open(path)?;
        file.write_all(block.as_bytes())?;
        file.write_all(LINE_ENDING.as_bytes())?;
        Ok(())
    }

    /// Simple mode: append the canonical value as one line.
    pub fn append_value(&self, designator: &str, message: &CommandValue) -> Result<()> {
        let path = self.resolve(designator)?;
        tracing::debug!(designator, path = %path, "appending file command value");
        self.append(&path, &message.to_command_string())
    }

    /// Keyed mode: append a `key<<delimiter` heredoc block carrying a value
    /// that may span lines.
    ///
    /// The delimiter is drawn fresh per call; the key and the canonical
    /// value must not contain it.
    pub fn append_key_value(
        &self,
        designator: &str,
        key: &str,
        message: &CommandValue,
    ) -> Result<()> {
        let path = self.resolve(designator)?;
        let delimiter = self.delimiters.next_delimiter();
        let value = message.to_command_string();

        if key.contains(&delimiter) {
            return Err(ToolkitError::Validation(format!(
                "Unexpected input: name should not contain the delimiter \"{delimiter}\""
            )));
        }
        if value.contains(&delimiter) {
            return Err(ToolkitError::Validation(format!(
                "Unexpected input: value should not contain the delimiter \"{delimiter}\""
            )));
        }

        tracing::debug!(designator, path = %path, key, "appending file command block");
        let block = format!("{key}<<{delimiter}{LINE_ENDING}{value}{LINE_ENDING}{delimiter}");
        self.append(&path, &block)
    }
}
