//! # Arbor Outline
//!
//! Reads and writes the Markdown outline form of a mind-map tree. Every node
//! becomes a heading whose level is its depth plus one; nodes deeper than the
//! sixth heading level continue as nested list items below their level-6
//! ancestor.
//!
//! ## Usage
//!
//! ```
//! # use arbor_core::tree::{Node, Tree};
//! # use arbor_outline::{parse, to_outline};
//! let tree = Tree::new(
//!     Node::new("root", "Topic")
//!         .with_child(Node::new("a", "Idea A"))
//!         .with_child(Node::new("b", "Idea B")),
//! ).unwrap();
//!
//! let text = to_outline(&tree);
//! assert_eq!(text, "# Topic\n\n## Idea A\n\n## Idea B\n\n");
//!
//! let parsed = parse(&text).unwrap();
//! assert_eq!(parsed.len(), 3);
//! assert_eq!(parsed.root().children()[1].name(), "Idea B");
//! ```

pub mod error;
mod parser;
mod span;
mod writer;

pub use error::ParseError;
pub use parser::parse;
pub use span::Span;
pub use writer::{MAX_HEADING_LEVEL, to_outline};
