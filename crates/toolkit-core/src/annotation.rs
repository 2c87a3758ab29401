// Source-location metadata attached to error / warning / notice annotations.
// The runner renders these as inline markers in the web UI.

use crate::command_value::CommandValue;

/// Optional metadata for an annotation command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationProperties {
    /// A title for the annotation.
    pub title: Option<String>,
    /// The path of the file for which the annotation should be created.
    pub file: Option<String>,
    /// The start line for the annotation.
    pub start_line: Option<u32>,
    /// The end line for the annotation. The runner defaults it to
    /// `start_line` when only `start_line` is sent.
    pub end_line: Option<u32>,
    /// The start column. Cannot be sent when `start_line` and `end_line`
    /// are different values.
    pub start_column: Option<u32>,
    /// The end column.
    pub end_column: Option<u32>,
}

impl AnnotationProperties {
    /// Shorthand for a title-only annotation.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    fn is_unset(&self) -> bool {
        self.title.is_none()
            && self.file.is_none()
            && self.start_line.is_none()
            && self.end_line.is_none()
            && self.start_column.is_none()
            && self.end_column.is_none()
    }

    /// The ordered wire property pairs: `title, file, line, endLine, col,
    /// endColumn`. A fully unset struct maps to no pairs at all, so the
    /// rendered command carries no property section.
    pub(crate) fn to_command_properties(&self) -> Vec<(String, CommandValue)> {
        if self.is_unset() {
            return Vec::new();
        }
        vec![
            ("title".to_string(), opt_text(&self.title)),
            ("file".to_string(), opt_text(&self.file)),
            ("line".to_string(), opt_number(self.start_line)),
            ("endLine".to_string(), opt_number(self.end_line)),
            ("col".to_string(), opt_number(self.start_column)),
            ("endColumn".to_string(), opt_number(self.end_column)),
        ]
    }
}

fn opt_text(value: &Option<String>) -> CommandValue {
    match value {
        Some(text) => CommandValue::Text(text.clone()),
        None => CommandValue::Absent,
    }
}

fn opt_number(value: Option<u32>) -> CommandValue {
    match value {
        Some(number) => CommandValue::Structured(number.into()),
        None => CommandValue::Absent,
    }
}
