//! Error types for magnet link parsing.

use std::fmt;

/// Errors that can occur when parsing a magnet link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

/// Specific parsing error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input is not a syntactically valid URI
    Syntax(SyntaxError),
    /// Scheme is not "magnet"
    InvalidScheme {
        /// The scheme that was found
        found: String,
    },
    /// No `xt`/`xt.N` parameter is present
    MissingExactTopic,
    /// An exact topic's value does not parse as a URI
    InvalidExactTopic {
        /// The offending value, as it appears in the query
        value: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse magnet link '{}': ", self.input)?;
        match &self.kind {
            ParseErrorKind::Syntax(e) => write!(f, "invalid URI syntax: {e}"),
            ParseErrorKind::InvalidScheme { found } => {
                write!(f, "expected scheme 'magnet', found '{found}'")
            }
            ParseErrorKind::MissingExactTopic => {
                write!(f, "missing mandatory exact topic ('xt' parameter)")
            }
            ParseErrorKind::InvalidExactTopic { value } => {
                write!(f, "exact topic value '{value}' is not a valid URI")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors for generic URI syntax parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// Input is empty
    Empty,
    /// No ':' terminating the scheme
    MissingScheme,
    /// Invalid character in the scheme
    InvalidSchemeChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
    /// Invalid character in a URI component
    InvalidChar {
        /// Name of the component
        component: &'static str,
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
    /// '%' not followed by two hex digits
    InvalidPercentEncoding {
        /// Position of the '%' in the input
        position: usize,
    },
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "input is empty"),
            Self::MissingScheme => {
                write!(f, "missing scheme; a URI must start with '<scheme>:'")
            }
            Self::InvalidSchemeChar { char, position } => {
                write!(
                    f,
                    "invalid character '{char}' in scheme at position {position}; allowed: letters, digits, '+', '-', '.'"
                )
            }
            Self::InvalidChar {
                component,
                char,
                position,
            } => {
                write!(f, "invalid character '{char}' in {component} at position {position}")
            }
            Self::InvalidPercentEncoding { position } => {
                write!(f, "'%' at position {position} is not followed by two hex digits")
            }
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Errors for percent-decoding a value into a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// '%' not followed by two hex digits
    InvalidPercentEncoding {
        /// Position of the '%' in the encoded text
        position: usize,
    },
    /// Decoded bytes are not valid UTF-8
    InvalidUtf8,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPercentEncoding { position } => {
                write!(f, "'%' at position {position} is not followed by two hex digits")
            }
            Self::InvalidUtf8 => write!(f, "decoded bytes are not valid UTF-8"),
        }
    }
}

impl std::error::Error for DecodeError {}
