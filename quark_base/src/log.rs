//! Provides the functions related to logging/printing messages to the console.

use std::fmt::Display;

use derive_new::new;
use formatting::{Attribute, Color};

use crate::source_file::Span;

pub mod formatting;

/// Represents the severity of a log message, ordered from the least to the most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Gets the lowercase name of the severity.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Is a struct implementing [`Display`] that represents a log message to be displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Message<T> {
    /// The severity of the log message.
    pub severity: Severity,

    /// The message to be displayed.
    pub display: T,
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let color = match self.severity {
            Severity::Debug => Color::Magenta,
            Severity::Info => Color::Green,
            Severity::Warning => Color::Yellow,
            Severity::Error => Color::Red,
        };

        let log_header = Attribute::Bold.with(color.with(format!("[{}]:", self.severity)));
        let message_part = Attribute::Bold.with(&self.display);

        write!(f, "{log_header} {message_part}")
    }
}

fn get_digit(mut number: usize) -> usize {
    let mut digit = 1;

    while number >= 10 {
        number /= 10;
        digit += 1;
    }

    digit
}

/// Structure implementing [`Display`] that prints the particular span of the source code.
///
/// The covered characters are underlined in red; the optional help message is printed below
/// the excerpt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, new)]
pub struct SourceCodeDisplay<'a, T> {
    /// The span of the source code to be printed.
    pub span: &'a Span,

    /// The help message to be displayed.
    pub help_display: Option<T>,
}

impl<'a, T: Display> Display for SourceCodeDisplay<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source_file = self.span.source_file();
        let start_location = self.span.start_location();
        let last_location = self.span.last_location();

        let gutter_width = get_digit(last_location.line);
        let pipe = Attribute::Bold.with(Color::Cyan.with("┃"));

        writeln!(
            f,
            "{:gutter_width$} {} {}:{start_location}",
            "",
            Attribute::Bold.with(Color::Cyan.with("-->")),
            source_file.full_path().display(),
        )?;
        writeln!(f, "{:gutter_width$} {pipe}", "")?;

        for line_number in start_location.line..=last_location.line {
            let (Some(line), Some(range)) = (
                source_file.get_line(line_number),
                source_file.get_line_range(line_number),
            ) else {
                break;
            };

            write!(
                f,
                "{} {pipe} ",
                Attribute::Bold.with(Color::Cyan.with(format!("{line_number:>gutter_width$}"))),
            )?;

            for (offset, character) in line.char_indices() {
                let byte_index = range.start + offset;

                match character {
                    '\n' | '\r' => {}
                    '\t' => write!(f, "    ")?,
                    character
                        if byte_index >= self.span.start() && byte_index < self.span.end() =>
                    {
                        write!(
                            f,
                            "{}",
                            Attribute::Underline
                                .with(Attribute::Bold.with(Color::Red.with(character)))
                        )?;
                    }
                    character => write!(f, "{character}")?,
                }
            }

            writeln!(f)?;
        }

        if let Some(help_display) = &self.help_display {
            writeln!(
                f,
                "{:gutter_width$} {} {}: {help_display}",
                "",
                Attribute::Bold.with(Color::Cyan.with("=")),
                Attribute::Bold.with("help"),
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
