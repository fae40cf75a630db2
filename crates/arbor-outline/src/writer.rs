//! Outline export.

use log::debug;

use arbor_core::tree::Tree;

/// Deepest level written as a Markdown heading.
pub const MAX_HEADING_LEVEL: usize = 6;

/// Writes `tree` as a Markdown outline.
///
/// Nodes are visited in pre-order. A node at level `L` (its depth plus one)
/// becomes `"#" * L + " " + name` followed by a blank line. Below level 6,
/// nodes become list items indented two spaces per extra level:
///
/// ```
/// # use arbor_core::tree::{Node, Tree};
/// # use arbor_outline::to_outline;
/// let mut node = Node::new("7", "L7");
/// for level in (1..7).rev() {
///     node = Node::new(&level.to_string(), format!("L{level}")).with_child(node);
/// }
/// let text = to_outline(&Tree::new(node).unwrap());
/// assert!(text.ends_with("###### L6\n\n- L7\n"));
/// ```
///
/// Line breaks inside names are written as spaces.
pub fn to_outline(tree: &Tree) -> String {
    let mut out = String::new();
    for visit in tree.iter() {
        let level = visit.depth + 1;
        let name = single_line(visit.node.name());
        if level <= MAX_HEADING_LEVEL {
            out.push_str(&"#".repeat(level));
            out.push(' ');
            out.push_str(&name);
            out.push_str("\n\n");
        } else {
            out.push_str(&"  ".repeat(level - MAX_HEADING_LEVEL - 1));
            out.push_str("- ");
            out.push_str(&name);
            out.push('\n');
        }
    }
    debug!(nodes = tree.len(), bytes = out.len(); "Outline written");
    out
}

fn single_line(name: &str) -> String {
    name.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use arbor_core::tree::Node;

    use super::*;

    fn chain(depth: usize) -> Tree {
        let mut node = Node::new(&format!("n{depth}"), format!("Level {}", depth + 1));
        for d in (0..depth).rev() {
            node = Node::new(&format!("n{d}"), format!("Level {}", d + 1)).with_child(node);
        }
        Tree::new(node).unwrap()
    }

    #[test]
    fn test_single_node() {
        let tree = Tree::new(Node::new("root", "Only")).unwrap();
        assert_eq!(to_outline(&tree), "# Only\n\n");
    }

    #[test]
    fn test_pre_order_headings() {
        let tree = Tree::new(
            Node::new("root", "R")
                .with_child(Node::new("a", "A").with_child(Node::new("a1", "A1")))
                .with_child(Node::new("b", "B")),
        )
        .unwrap();

        assert_eq!(to_outline(&tree), "# R\n\n## A\n\n### A1\n\n## B\n\n");
    }

    #[test]
    fn test_levels_beyond_six_become_list_items() {
        let text = to_outline(&chain(8));
        let lines: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();

        assert_eq!(lines[5], "###### Level 6");
        assert_eq!(lines[6], "- Level 7");
        assert_eq!(lines[7], "  - Level 8");
        assert_eq!(lines[8], "    - Level 9");
    }

    #[test]
    fn test_newlines_in_names_become_spaces() {
        let tree = Tree::new(Node::new("root", "two\nlines\r\nhere")).unwrap();
        assert_eq!(to_outline(&tree), "# two lines here\n\n");
    }
}
