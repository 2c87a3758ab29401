// Single-line stdout protocol commands: `::name key=value,key=value::message`.
// The consuming runner parses these with a fixed grammar, so rendering and
// escaping must be byte-exact.

use crate::command_value::CommandValue;

/// The command delimiter, used both as prefix and as separator.
pub const CMD_STRING: &str = "::";

/// Fallback command name when none is supplied.
const MISSING_COMMAND: &str = "missing.command";

struct EscapeMapping {
    token: &'static str,
    replacement: &'static str,
}

/// Message-position escapes. `%` must be escaped first, else subsequent
/// escape sequences would themselves be re-escaped.
const ESCAPE_DATA_MAPPINGS: &[EscapeMapping] = &[
    EscapeMapping { token: "%",  replacement: "%25" },
    EscapeMapping { token: "\r", replacement: "%0D" },
    EscapeMapping { token: "\n", replacement: "%0A" },
];

/// Property-position escapes additionally cover `:` and `,`, which would
/// break the `key=value,key=value` grammar.
const ESCAPE_PROPERTY_MAPPINGS: &[EscapeMapping] = &[
    EscapeMapping { token: "%",  replacement: "%25" },
    EscapeMapping { token: "\r", replacement: "%0D" },
    EscapeMapping { token: "\n", replacement: "%0A" },
    EscapeMapping { token: ":",  replacement: "%3A" },
    EscapeMapping { token: ",",  replacement: "%2C" },
];

fn apply_mappings(mappings: &[EscapeMapping], value: &str) -> String {
    let mut escaped = value.to_string();
    for mapping in mappings {
        escaped = escaped.replace(mapping.token, mapping.replacement);
    }
    escaped
}

/// Escape a canonicalized message body.
pub fn escape_data(value: &str) -> String {
    apply_mappings(ESCAPE_DATA_MAPPINGS, value)
}

/// Escape a canonicalized property value.
pub fn escape_property(value: &str) -> String {
    apply_mappings(ESCAPE_PROPERTY_MAPPINGS, value)
}

/// A workflow command before rendering.
///
/// Property order is significant: pairs render in insertion order.
#[derive(Debug, Clone)]
pub struct WireCommand {
    /// The command name (e.g. "set-env", "error", "add-mask").
    pub command: String,
    /// Ordered key-value properties attached to the command.
    pub properties: Vec<(String, CommandValue)>,
    /// The command message body.
    pub message: CommandValue,
}

impl WireCommand {
    /// Create a command with no properties and an empty message.
    pub fn new(command: impl Into<String>) -> Self {
        let command = command.into();
        Self {
            command: if command.is_empty() {
                MISSING_COMMAND.to_string()
            } else {
                command
            },
            properties: Vec::new(),
            message: CommandValue::Absent,
        }
    }

    /// Set the message body.
    pub fn message(mut self, message: impl Into<CommandValue>) -> Self {
        self.message = message.into();
        self
    }

    /// Append one property pair. Pairs whose value canonicalizes to the
    /// empty string are kept here and skipped at render time.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<CommandValue>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }

    /// Replace the full ordered property list.
    pub fn properties(mut self, properties: Vec<(String, CommandValue)>) -> Self {
        self.properties = properties;
        self
    }

    /// Render the single-line wire form. The trailing line terminator is the
    /// sink's responsibility.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(CMD_STRING);
        out.push_str(&self.command);

        // A non-empty property list contributes the separating space even
        // when every value is skipped.
        if !self.properties.is_empty() {
            out.push(' ');
            let mut first = true;
            for (key, value) in &self.properties {
                let canonical = value.to_command_string();
                if canonical.is_empty() {
                    continue;
                }
                if first {
                    first = false;
                } else {
                    out.push(',');
                }
                out.push_str(key);
                out.push('=');
                out.push_str(&escape_property(&canonical));
            }
        }

        out.push_str(CMD_STRING);
        out.push_str(&escape_data(&self.message.to_command_string()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The inverse of `escape_data`, as applied by the runner's parser.
    fn unescape_data(escaped: &str) -> String {
        let mut result = escaped.to_string();
        for mapping in ESCAPE_DATA_MAPPINGS.iter().rev() {
            result = result.replace(mapping.replacement, mapping.token);
        }
        result
    }

    /// The inverse of `escape_property`, as applied by the runner's parser.
    fn unescape_property(escaped: &str) -> String {
        let mut result = escaped.to_string();
        for mapping in ESCAPE_PROPERTY_MAPPINGS.iter().rev() {
            result = result.replace(mapping.replacement, mapping.token);
        }
        result
    }

    #[test]
    fn render_message_only() {
        let line = WireCommand::new("debug").message("Debug").render();
        assert_eq!(line, "::debug::Debug");
    }

    #[test]
    fn render_with_properties_in_insertion_order() {
        let line = WireCommand::new("error")
            .property("file", "app.js")
            .property("line", 10)
            .message("something went wrong")
            .render();
        assert_eq!(line, "::error file=app.js,line=10::something went wrong");
    }

    #[test]
    fn empty_name_uses_sentinel() {
        let line = WireCommand::new("").message("data").render();
        assert_eq!(line, "::missing.command::data");
    }

    #[test]
    fn empty_property_values_are_omitted() {
        let line = WireCommand::new("error")
            .property("title", CommandValue::Absent)
            .property("file", "a.rs")
            .property("line", CommandValue::Absent)
            .message("boom")
            .render();
        assert_eq!(line, "::error file=a.rs::boom");
    }

    #[test]
    fn all_skipped_properties_still_emit_the_space() {
        let line = WireCommand::new("set-env")
            .property("name", CommandValue::Absent)
            .message("value")
            .render();
        assert_eq!(line, "::set-env ::value");
    }

    #[test]
    fn message_escaping() {
        let line = WireCommand::new("warning").message("\r\nwarning\n").render();
        assert_eq!(line, "::warning::%0D%0Awarning%0A");
    }

    #[test]
    fn message_does_not_escape_colon_or_comma() {
        let line = WireCommand::new("x").message("a,b:c").render();
        assert_eq!(line, "::x::a,b:c");
    }

    #[test]
    fn property_escapes_colon_and_comma() {
        let line = WireCommand::new("set-env")
            .property("name", "special char var \r\n,:")
            .message("special val")
            .render();
        assert_eq!(
            line,
            "::set-env name=special char var %0D%0A%2C%3A::special val"
        );
    }

    #[test]
    fn percent_is_escaped_first() {
        // A literal `%0A` in the input must survive a round trip instead of
        // collapsing into a newline.
        assert_eq!(escape_data("100%"), "100%25");
        assert_eq!(escape_data("%0A"), "%250A");
        assert_eq!(unescape_data(&escape_data("%0A")), "%0A");
    }

    #[test]
    fn data_round_trip() {
        let original = "line1\r\nline2\n100% done";
        let escaped = escape_data(original);
        assert!(!escaped.contains('\r'));
        assert!(!escaped.contains('\n'));
        assert_eq!(unescape_data(&escaped), original);
    }

    #[test]
    fn property_round_trip() {
        let original = "a,b:c\r\n100%";
        let escaped = escape_property(original);
        assert!(!escaped.contains(','));
        assert!(!escaped.contains(':'));
        assert!(!escaped.contains('\r'));
        assert!(!escaped.contains('\n'));
        assert_eq!(unescape_property(&escaped), original);
    }
}
