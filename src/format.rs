use time::macros::format_description;

use crate::Record;

/// Template used when none is configured for a console handler.
pub const DEFAULT_CONSOLE_FORMAT: &str = "{timestamp} [{level}] {message}";

/// Template used when none is configured for a file handler.
pub const DEFAULT_FILE_FORMAT: &str = "{timestamp} [{level}] {name}: {message}";

/// Renders records through a template with named substitution fields.
///
/// Recognized fields are `{timestamp}`, `{name}`, `{level}`, `{message}` and
/// `{thread}`; anything else in braces is passed through literally, so a
/// malformed template degrades to odd-looking output rather than an error.
#[derive(Debug, Clone)]
pub struct Formatter {
    template: String,
}

impl Formatter {
    /// Create a formatter from a template string.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// The default console template.
    pub fn console_default() -> Self {
        Self::new(DEFAULT_CONSOLE_FORMAT)
    }

    /// The default file template.
    pub fn file_default() -> Self {
        Self::new(DEFAULT_FILE_FORMAT)
    }

    /// Render one record as a line of text (no trailing newline).
    pub fn format(&self, record: &Record) -> String {
        let mut out = String::with_capacity(self.template.len() + record.message.len());
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                // Unterminated brace: emit the tail as-is.
                out.push_str(&rest[open..]);
                return out;
            };
            match &after[..close] {
                "timestamp" => out.push_str(&format_timestamp(record)),
                "name" => out.push_str(&record.name),
                "level" => out.push_str(record.level.as_str()),
                "message" => out.push_str(&record.message),
                "thread" => out.push_str(&record.thread),
                unknown => {
                    out.push('{');
                    out.push_str(unknown);
                    out.push('}');
                }
            }
            rest = &after[close + 1..];
        }
        out.push_str(rest);
        out
    }
}

fn format_timestamp(record: &Record) -> String {
    record
        .timestamp
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
        ))
        .unwrap_or_default()
}
