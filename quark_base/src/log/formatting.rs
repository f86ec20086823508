//! Contains the ANSI escape code wrappers used to style console output.

use std::fmt::Display;

/// Represents a color that can be applied to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Magenta,
    Cyan,
}

impl Color {
    /// Applies the color to the given displayable object.
    pub fn with<T>(self, display: T) -> Styled<T> { Attribute::Foreground(self).with(display) }
}

/// Represents a single graphic rendition attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Attribute {
    Bold,
    Underline,
    Foreground(Color),
}

impl Attribute {
    /// Applies the attribute to the given displayable object.
    pub fn with<T>(self, display: T) -> Styled<T> {
        Styled {
            attribute: self,
            display,
        }
    }

    fn escape_code(self) -> &'static str {
        match self {
            Self::Bold => "\x1B[1m",
            Self::Underline => "\x1B[4m",
            Self::Foreground(Color::Red) => "\x1B[31m",
            Self::Foreground(Color::Green) => "\x1B[32m",
            Self::Foreground(Color::Yellow) => "\x1B[33m",
            Self::Foreground(Color::Magenta) => "\x1B[35m",
            Self::Foreground(Color::Cyan) => "\x1B[36m",
        }
    }
}

/// Is a struct implementing [`Display`] that wraps a displayable object with an [`Attribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Styled<T> {
    /// The attribute applied to the displayable object.
    pub attribute: Attribute,

    /// The displayable object.
    pub display: T,
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}\x1B[0m",
            self.attribute.escape_code(),
            self.display
        )
    }
}
