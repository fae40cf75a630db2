//! Outline import.
//!
//! The outline is read line by line. Each line is classified by a small
//! winnow grammar as a heading (`#`..`######` followed by one space or tab), a list
//! item (`- ` or `* ` after an indent), a blank line, or plain text. Headings
//! and list items become nodes; their level decides where they attach:
//!
//! - heading `#`×L has level L
//! - a list item indented by `2k` spaces has level `7 + k`
//!
//! A node attaches to the nearest preceding node with a smaller level, so a
//! level jump (`#` followed by `###`) still nests under the last shallower
//! node. Plain text after the root heading is ignored.
//!
//! Only the single separator after the marker is consumed; the rest of the
//! line is the node name, as written by [`to_outline`](crate::to_outline).

use log::{debug, info};
use winnow::{
    Parser as _,
    combinator::{alt, eof},
    error::{ContextError, ErrMode},
    token::{rest, take_while},
};

use arbor_core::{
    identifier::Id,
    tree::{Node, Tree},
};

use crate::{
    error::{Diagnostic, ErrorCode, ParseError},
    span::Span,
    writer::MAX_HEADING_LEVEL,
};

type IResult<O> = Result<O, ErrMode<ContextError>>;

/// One classified outline line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'src> {
    Entry { level: usize, name: &'src str },
    Blank,
    Text,
}

/// An outline entry waiting to be assembled into the tree.
#[derive(Debug)]
struct Entry<'src> {
    level: usize,
    name: &'src str,
    span: Span,
    children: Vec<usize>,
}

fn heading<'src>(input: &mut &'src str) -> IResult<(usize, &'src str)> {
    (
        take_while(1..=MAX_HEADING_LEVEL, '#'),
        alt((" ", "\t", eof)),
        rest,
    )
        .map(|(hashes, _, name): (&str, &str, &str)| (hashes.len(), name))
        .parse_next(input)
}

fn list_item<'src>(input: &mut &'src str) -> IResult<(usize, &'src str)> {
    (take_while(0.., ' '), alt(("- ", "* ")), rest)
        .map(|(indent, _, name): (&str, &str, &str)| {
            (MAX_HEADING_LEVEL + 1 + indent.len() / 2, name)
        })
        .parse_next(input)
}

fn classify(line: &str) -> Line<'_> {
    if line.trim().is_empty() {
        return Line::Blank;
    }
    let mut input = line;
    if let Ok((level, name)) = heading(&mut input) {
        return Line::Entry { level, name };
    }
    let mut input = line;
    if let Ok((level, name)) = list_item(&mut input) {
        return Line::Entry { level, name };
    }
    Line::Text
}

/// Reads a Markdown outline back into a tree.
///
/// Names are kept as written after the separator. Ids are regenerated from each node's position:
/// `root` for the root, then 1-based child indices joined by `-`
/// (`1`, `1-2`, ...).
///
/// # Errors
///
/// Returns a [`ParseError`] collecting every problem found:
/// - [`ErrorCode::E100`]: the outline has no heading
/// - [`ErrorCode::E101`]: an entry or text line comes before the first heading
/// - [`ErrorCode::E102`]: a heading at the root level follows the root
pub fn parse(source: &str) -> Result<Tree, ParseError> {
    let mut entries: Vec<Entry> = Vec::new();
    let mut stack: Vec<usize> = Vec::new();
    let mut diagnostics = Vec::new();

    let mut offset = 0;
    for (line_number, raw) in source.split_inclusive('\n').enumerate() {
        let line = raw.trim_end_matches(['\n', '\r']);
        let span = Span::new(offset..offset + line.len());
        offset += raw.len();

        let (level, name) = match classify(line) {
            Line::Blank => continue,
            Line::Text if entries.is_empty() => {
                diagnostics.push(content_before_heading(span));
                continue;
            }
            Line::Text => {
                debug!(line = line_number + 1; "Ignoring outline text line");
                continue;
            }
            Line::Entry { level, name } => (level, name),
        };

        let is_heading = level <= MAX_HEADING_LEVEL && line.starts_with('#');
        if entries.is_empty() && !is_heading {
            diagnostics.push(content_before_heading(span));
            continue;
        }

        while stack
            .last()
            .is_some_and(|&open| entries[open].level >= level)
        {
            stack.pop();
        }

        let index = entries.len();
        match stack.last() {
            Some(&parent) => entries[parent].children.push(index),
            None if entries.is_empty() => {}
            None => {
                diagnostics.push(
                    Diagnostic::error("outline has more than one root heading")
                        .with_code(ErrorCode::E102)
                        .with_label(span, "second root")
                        .with_secondary_label(entries[0].span, "first root here")
                        .with_help("nest the heading under the first root"),
                );
                continue;
            }
        }

        entries.push(Entry {
            level,
            name,
            span,
            children: Vec::new(),
        });
        stack.push(index);
    }

    if entries.is_empty() && diagnostics.is_empty() {
        diagnostics.push(
            Diagnostic::error("outline has no heading")
                .with_code(ErrorCode::E100)
                .with_label(Span::new(0..source.len()), "no root heading found")
                .with_help("start the outline with a heading such as `# Topic`"),
        );
    }
    if !diagnostics.is_empty() {
        return Err(ParseError::new(diagnostics));
    }

    let root = build_node(&entries, 0, &mut Vec::new());
    let tree = Tree::new(root).map_err(|err| {
        ParseError::from(
            Diagnostic::error(err.to_string()).with_label(entries[0].span, "in this outline"),
        )
    })?;
    info!(nodes = tree.len(); "Outline parsed");
    Ok(tree)
}

fn content_before_heading(span: Span) -> Diagnostic {
    Diagnostic::error("content before the first heading")
        .with_code(ErrorCode::E101)
        .with_label(span, "expected a heading")
        .with_help("the outline must start with the root heading")
}

fn build_node(entries: &[Entry], index: usize, path: &mut Vec<usize>) -> Node {
    let entry = &entries[index];
    let mut children = Vec::with_capacity(entry.children.len());
    for (position, &child) in entry.children.iter().enumerate() {
        path.push(position);
        children.push(build_node(entries, child, path));
        path.pop();
    }
    Node::new(&Id::from_path(path).to_string(), entry.name).with_children(children)
}
