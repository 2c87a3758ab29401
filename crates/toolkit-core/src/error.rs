// Error taxonomy for toolkit operations.

/// Errors surfaced by toolkit operations.
///
/// All errors are synchronous and propagate to the immediate caller; nothing
/// here is retried or silently recovered. The one terminal path is
/// `ActionCore::set_failed`, which converts a failure into an `error`
/// annotation plus a failing process exit.
#[derive(Debug, thiserror::Error)]
pub enum ToolkitError {
    /// A required file-command designator variable is unset.
    #[error("Unable to find environment variable for file command {designator}")]
    Configuration { designator: String },

    /// The designated file-command target does not exist. The toolkit never
    /// creates these files; the runner owns them.
    #[error("Missing file at path: {path}")]
    NotFound { path: String },

    /// Input violates a protocol invariant (e.g. a heredoc delimiter
    /// collision).
    #[error("{0}")]
    Validation(String),

    /// A required input is absent or empty.
    #[error("Input required and not supplied: {name}")]
    InputMissing { name: String },

    /// A boolean input does not match the accepted literal set.
    #[error(
        "Input does not meet YAML 1.2 \"Core Schema\" specification: {name}\n\
         Support boolean input list: `true | True | TRUE | false | False | FALSE`"
    )]
    TypeMismatch { name: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the toolkit.
pub type Result<T> = std::result::Result<T, ToolkitError>;

/// The code a step process exits with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// The action completed successfully.
    Success = 0,
    /// The action failed.
    Failure = 1,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_message() {
        let err = ToolkitError::Configuration {
            designator: "ENV".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unable to find environment variable for file command ENV"
        );
    }

    #[test]
    fn not_found_message() {
        let err = ToolkitError::NotFound {
            path: "/tmp/missing".to_string(),
        };
        assert_eq!(err.to_string(), "Missing file at path: /tmp/missing");
    }

    #[test]
    fn input_missing_message() {
        let err = ToolkitError::InputMissing {
            name: "INPUT_MISSING".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Input required and not supplied: INPUT_MISSING"
        );
    }

    #[test]
    fn type_mismatch_message() {
        let err = ToolkitError::TypeMismatch {
            name: "wrong boolean input".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("YAML 1.2 \"Core Schema\""));
        assert!(message.contains("wrong boolean input"));
        assert!(message.contains("`true | True | TRUE | false | False | FALSE`"));
    }

    #[test]
    fn exit_codes() {
        assert_eq!(ExitCode::Success as i32, 0);
        assert_eq!(ExitCode::Failure as i32, 1);
    }
}
