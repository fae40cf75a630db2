//! Error codes for outline diagnostics.

use std::fmt;

/// Error codes for categorizing outline diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Missing root heading.
    ///
    /// The outline contains no heading at all, so there is no root node.
    E100,

    /// Content before the first heading.
    ///
    /// A list item or text line appears before the root heading.
    E101,

    /// Multiple root headings.
    ///
    /// A heading at the root level (or shallower) appears after the root.
    E102,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "missing root heading",
            ErrorCode::E101 => "content before the first heading",
            ErrorCode::E102 => "multiple root headings",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
