//! Diagnostics for outline parsing.
//!
//! A [`Diagnostic`] is a single error with a code, labeled
//! source spans and optional help text. [`ParseError`] wraps every
//! diagnostic produced while reading one outline.
//!
//! # Example
//!
//! ```
//! # use arbor_outline::error::{Diagnostic, ErrorCode};
//! # use arbor_outline::Span;
//! let diag = Diagnostic::error("outline has more than one root heading")
//!     .with_code(ErrorCode::E102)
//!     .with_label(Span::new(20..27), "second root")
//!     .with_secondary_label(Span::new(0..7), "first root here")
//!     .with_help("nest the heading under the first root");
//! assert_eq!(diag.to_string(), "error[E102]: outline has more than one root heading");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
