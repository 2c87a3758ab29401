// Input and state accessors.
// The runner materializes step inputs as `INPUT_*` variables and saved state
// as `STATE_*` variables; this module owns the name-mangling and trimming
// rules for reading them back.

use crate::action_core::ActionCore;
use crate::error::{Result, ToolkitError};

/// Accepted literal forms for boolean inputs (YAML 1.2 core-schema subset).
const TRUE_VALUES: &[&str] = &["true", "True", "TRUE"];
const FALSE_VALUES: &[&str] = &["false", "False", "FALSE"];

/// Options for reading an input.
#[derive(Debug, Clone, Copy)]
pub struct InputOptions {
    /// Fail when the input is absent or empty. Defaults to false.
    pub required: bool,
    /// Trim leading/trailing whitespace from the value. Defaults to true.
    pub trim_whitespace: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            required: false,
            trim_whitespace: true,
        }
    }
}

impl InputOptions {
    /// Options marking the input as required.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }
}

/// The environment variable a given input name maps to: spaces become
/// underscores, the name is upper-cased, and `INPUT_` is prefixed.
fn input_variable(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

impl ActionCore {
    /// Read an input value. Absent inputs read as the empty string unless
    /// `required` is set.
    pub fn get_input(&self, name: &str, options: InputOptions) -> Result<String> {
        let variable = input_variable(name);
        let value = self.environment().get(&variable).unwrap_or_default();
        if options.required && value.is_empty() {
            return Err(ToolkitError::InputMissing { name: variable });
        }
        if !options.trim_whitespace {
            return Ok(value);
        }
        Ok(value.trim().to_string())
    }

    /// Read a multiline input: one entry per non-empty line, order preserved.
    pub fn get_multiline_input(&self, name: &str, options: InputOptions) -> Result<Vec<String>> {
        Ok(self
            .get_input(name, options)?
            .split('\n')
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Read a boolean input. Only the YAML 1.2 core-schema literals
    /// `true | True | TRUE | false | False | FALSE` are accepted; anything
    /// else fails naming the offending input.
    pub fn get_boolean_input(&self, name: &str, options: InputOptions) -> Result<bool> {
        let value = self.get_input(name, options)?;
        if TRUE_VALUES.contains(&value.as_str()) {
            return Ok(true);
        }
        if FALSE_VALUES.contains(&value.as_str()) {
            return Ok(false);
        }
        Err(ToolkitError::TypeMismatch {
            name: name.to_string(),
        })
    }

    /// Read state saved by this action's main execution. Absent state reads
    /// as the empty string; this never fails.
    pub fn get_state(&self, name: &str) -> String {
        self.environment()
            .get(&format!("STATE_{name}"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use toolkit_sdk::{
        BufferSink, CommandSink, EnvironmentProvider, MemoryEnvironment, UuidDelimiterSource,
    };

    fn make_core(vars: &[(&str, &str)]) -> ActionCore {
        let env = Arc::new(MemoryEnvironment::with_vars(vars.iter().copied()));
        ActionCore::with_providers(
            env as Arc<dyn EnvironmentProvider>,
            Arc::new(BufferSink::new()) as Arc<dyn CommandSink>,
            Arc::new(UuidDelimiterSource),
        )
    }

    #[test]
    fn get_input_reads_mangled_variable() {
        let core = make_core(&[("INPUT_MY_INPUT", "val")]);
        assert_eq!(core.get_input("my input", InputOptions::default()).unwrap(), "val");
        assert_eq!(core.get_input("My InPuT", InputOptions::default()).unwrap(), "val");
    }

    #[test]
    fn get_input_handles_multiple_spaces() {
        let core = make_core(&[("INPUT_MULTIPLE_SPACES_VARIABLE", "I have multiple spaces")]);
        assert_eq!(
            core.get_input("multiple spaces variable", InputOptions::default())
                .unwrap(),
            "I have multiple spaces"
        );
    }

    #[test]
    fn get_input_required_and_present() {
        let core = make_core(&[("INPUT_MY_INPUT", "val")]);
        assert_eq!(
            core.get_input("my input", InputOptions::required()).unwrap(),
            "val"
        );
    }

    #[test]
    fn get_input_required_and_missing_names_the_variable() {
        let core = make_core(&[]);
        let err = core
            .get_input("missing", InputOptions::required())
            .unwrap_err();
        assert_eq!(err.to_string(), "Input required and not supplied: INPUT_MISSING");
    }

    #[test]
    fn get_input_optional_and_missing_is_empty() {
        let core = make_core(&[]);
        assert_eq!(core.get_input("missing", InputOptions::default()).unwrap(), "");
    }

    #[test]
    fn get_input_trims_by_default() {
        let core = make_core(&[("INPUT_WITH_TRAILING_WHITESPACE", "  some val  ")]);
        assert_eq!(
            core.get_input("with trailing whitespace", InputOptions::default())
                .unwrap(),
            "some val"
        );
        assert_eq!(
            core.get_input(
                "with trailing whitespace",
                InputOptions {
                    trim_whitespace: false,
                    ..Default::default()
                }
            )
            .unwrap(),
            "  some val  "
        );
    }

    #[test]
    fn get_multiline_input_drops_empty_lines() {
        let core = make_core(&[("INPUT_MY_INPUT_LIST", "val1\nval2\n\nval3")]);
        assert_eq!(
            core.get_multiline_input("my input list", InputOptions::default())
                .unwrap(),
            vec!["val1", "val2", "val3"]
        );
    }

    #[test]
    fn get_boolean_input_accepts_the_yaml_core_literals() {
        let core = make_core(&[
            ("INPUT_TRUE1", "true"),
            ("INPUT_TRUE2", "True"),
            ("INPUT_TRUE3", "TRUE"),
            ("INPUT_FALSE1", "false"),
            ("INPUT_FALSE2", "False"),
            ("INPUT_FALSE3", "FALSE"),
        ]);
        for name in ["true1", "true2", "true3"] {
            assert!(core.get_boolean_input(name, InputOptions::default()).unwrap());
        }
        for name in ["false1", "false2", "false3"] {
            assert!(!core.get_boolean_input(name, InputOptions::default()).unwrap());
        }
    }

    #[test]
    fn get_boolean_input_rejects_everything_else() {
        let core = make_core(&[
            ("INPUT_WRONG", "wrong"),
            ("INPUT_ONE", "1"),
            ("INPUT_YES", "yes"),
            ("INPUT_NO", "no"),
        ]);
        for name in ["wrong", "one", "yes", "no"] {
            let err = core
                .get_boolean_input(name, InputOptions::default())
                .unwrap_err();
            assert!(matches!(err, ToolkitError::TypeMismatch { .. }));
        }

        let err = core
            .get_boolean_input("wrong", InputOptions::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Input does not meet YAML 1.2 \"Core Schema\" specification: wrong\n\
             Support boolean input list: `true | True | TRUE | false | False | FALSE`"
        );
    }

    #[test]
    fn get_state_reads_state_variable() {
        let core = make_core(&[("STATE_TEST_1", "state_val")]);
        assert_eq!(core.get_state("TEST_1"), "state_val");
        assert_eq!(core.get_state("ABSENT"), "");
    }
}
