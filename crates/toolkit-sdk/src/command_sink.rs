// Destination for rendered protocol lines.
// The stdout sink is where the consuming runner reads workflow commands;
// the buffer sink captures lines for assertions.

use std::io::{self, Write};

use parking_lot::Mutex;

/// The platform line terminator used by both the stdout protocol and the
/// file-command protocol.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Where rendered protocol lines go.
///
/// The sink owns newline termination: callers pass a complete line without a
/// trailing terminator.
pub trait CommandSink: Send + Sync {
    /// Write one line, appending the platform line terminator.
    fn write_line(&self, line: &str) -> io::Result<()>;
}

/// Writes lines to the process stdout, flushing after each line so the
/// consuming runner observes commands promptly.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl CommandSink for StdoutSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(line.as_bytes())?;
        out.write_all(LINE_ENDING.as_bytes())?;
        out.flush()
    }
}

/// Collects written lines in memory. Useful for asserting emitted commands.
#[derive(Debug, Default)]
pub struct BufferSink {
    lines: Mutex<Vec<String>>,
}

impl BufferSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines written so far, without terminators.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// The raw captured stream, terminators included.
    pub fn contents(&self) -> String {
        self.lines
            .lock()
            .iter()
            .map(|line| format!("{line}{LINE_ENDING}"))
            .collect()
    }

    /// Discard captured lines.
    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl CommandSink for BufferSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }
}
