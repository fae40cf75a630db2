//! Where trees come from.
//!
//! A [`DiagramSource`] turns a topic prompt into a [`Tree`]. The production
//! source is a hosted language model behind an HTTP endpoint; this crate only
//! defines the seam and two offline implementations.
//!
//! Model replies tend to wrap the JSON in a Markdown code fence, so
//! [`extract_json`] looks for a ```` ```json ```` fence first, then any
//! ```` ``` ```` fence, and otherwise takes the whole reply.

use log::debug;

use arbor_core::{settings::DiagramType, tree::Tree};

use crate::ArborError;

/// Produces a tree for a topic.
pub trait DiagramSource {
    /// Generates a tree about `prompt`, shaped for `diagram_type`, with labels
    /// written in `language`.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Input`] when the produced tree is invalid.
    fn generate(
        &self,
        prompt: &str,
        diagram_type: DiagramType,
        language: &str,
    ) -> Result<Tree, ArborError>;
}

/// Always yields the same tree.
#[derive(Debug, Clone)]
pub struct StaticSource {
    tree: Tree,
}

impl StaticSource {
    pub fn new(tree: Tree) -> Self {
        Self { tree }
    }
}

impl DiagramSource for StaticSource {
    fn generate(
        &self,
        _prompt: &str,
        _diagram_type: DiagramType,
        _language: &str,
    ) -> Result<Tree, ArborError> {
        Ok(self.tree.clone())
    }
}

/// Parses a recorded model reply.
///
/// # Examples
///
/// ```
/// # use arbor::source::{DiagramSource, ReplySource};
/// # use arbor_core::settings::DiagramType;
/// let reply = "Here you go:\n```json\n{\"id\": \"root\", \"name\": \"Rust\"}\n```";
/// let tree = ReplySource::new(reply)
///     .generate("Rust", DiagramType::MindMap, "English")
///     .unwrap();
/// assert_eq!(tree.root().name(), "Rust");
/// ```
#[derive(Debug, Clone)]
pub struct ReplySource {
    reply: String,
}

impl ReplySource {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }

    pub fn reply(&self) -> &str {
        &self.reply
    }
}

impl DiagramSource for ReplySource {
    fn generate(
        &self,
        prompt: &str,
        diagram_type: DiagramType,
        language: &str,
    ) -> Result<Tree, ArborError> {
        debug!(
            prompt = prompt,
            diagram_type = diagram_type.name(),
            language = language;
            "Parsing model reply"
        );
        let tree = Tree::from_json(extract_json(&self.reply))?;
        Ok(tree)
    }
}

/// Extracts the JSON payload from a model reply.
pub fn extract_json(reply: &str) -> &str {
    fenced(reply, "```json")
        .or_else(|| fenced(reply, "```"))
        .map(str::trim)
        .filter(|payload| !payload.is_empty())
        .unwrap_or(reply)
        .trim()
}

/// Text between `opening` and the next closing fence.
fn fenced<'a>(text: &'a str, opening: &str) -> Option<&'a str> {
    let start = text.find(opening)? + opening.len();
    let rest = &text[start..];
    let end = rest.find("```")?;
    Some(&rest[..end])
}
