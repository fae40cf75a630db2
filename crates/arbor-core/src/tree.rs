//! The mind-map tree model.
//!
//! A [`Tree`] is a rooted, ordered hierarchy of [`Node`]s whose ids are unique
//! across the whole tree. A `Tree` can only be obtained through a validating
//! constructor, so every consumer downstream (layout, rendering, export) may
//! rely on the invariants without re-checking them:
//!
//! - [`Tree::new`] validates a hand-built [`Node`] hierarchy.
//! - [`Tree::from_json`] parses the `{id, name, children}` interchange format.
//! - [`Tree::from_records`] assembles a tree from flat parent links, rejecting
//!   cycles, dangling parents and forests.
//!
//! # Example
//!
//! ```
//! # use arbor_core::tree::Tree;
//! let tree = Tree::from_json(
//!     r#"{"id": "root", "name": "Topic", "children": [
//!         {"id": 1, "name": "A", "children": [{"id": "1-1", "name": "A1"}]},
//!         {"id": 2, "name": "B"}
//!     ]}"#,
//! ).unwrap();
//!
//! assert_eq!(tree.len(), 4);
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.find("1-1").map(|n| n.name()), Some("A1"));
//! ```

use std::{
    collections::{HashMap, HashSet, hash_map::DefaultHasher},
    hash::{Hash, Hasher},
};

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::identifier::Id;

/// Structural problems detected while building a [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("invalid tree JSON: {0}")]
    Json(String),

    #[error("node at {path} has no `id`")]
    MissingId { path: String },

    #[error("node at {path} has an empty `id`")]
    EmptyId { path: String },

    #[error("node at {path} has no `name`")]
    MissingName { path: String },

    #[error("node at {path} has a `{field}` that is neither a string nor a number")]
    InvalidField { path: String, field: &'static str },

    #[error("id `{id}` is used by more than one node")]
    DuplicateId { id: String },

    #[error("node `{id}` references unknown parent `{parent}`")]
    UnknownParent { id: String, parent: String },

    #[error("parent links form a cycle through `{id}`")]
    Cycle { id: String },

    #[error("no root node: every record has a parent")]
    NoRoot,

    #[error("more than one root node: `{first}` and `{second}`")]
    MultipleRoots { first: String, second: String },
}

/// A labeled node with ordered children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    id: Id,
    name: String,
    children: Vec<Node>,
}

impl Node {
    /// Creates a leaf node.
    pub fn new(id: &str, name: impl Into<String>) -> Self {
        Self {
            id: Id::new(id),
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Appends a child (builder style).
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Appends several children in order (builder style).
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A flat node description with a parent link, as produced by tabular sources.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
}

impl NodeRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, parent: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent: parent.map(str::to_string),
        }
    }
}

/// Value-comparable fingerprint of a tree's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeIdentity(u64);

impl TreeIdentity {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// One step of a depth-first pre-order walk.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub node: &'a Node,
    pub depth: usize,
    pub parent: Option<Id>,
}

/// Depth-first pre-order iterator over a tree; see [`Tree::iter`].
pub struct Walk<'a> {
    stack: Vec<Visit<'a>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let visit = self.stack.pop()?;
        self.stack.extend(visit.node.children.iter().rev().map(|child| Visit {
            node: child,
            depth: visit.depth + 1,
            parent: Some(visit.node.id),
        }));
        Some(visit)
    }
}

/// A validated mind-map tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Tree {
    root: Node,
}

impl Tree {
    /// Validates a node hierarchy and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EmptyId`] or [`TreeError::DuplicateId`] when the
    /// ids are not unique non-empty strings.
    pub fn new(root: Node) -> Result<Self, TreeError> {
        let tree = Self { root };
        let mut seen = HashSet::new();
        for visit in tree.iter() {
            if visit.node.id.is_empty() {
                return Err(TreeError::EmptyId {
                    path: visit.node.name.clone(),
                });
            }
            if !seen.insert(visit.node.id) {
                return Err(TreeError::DuplicateId {
                    id: visit.node.id.to_string(),
                });
            }
        }
        debug!(nodes = seen.len(); "Tree validated");
        Ok(tree)
    }

    /// Parses the `{id, name, children}` JSON interchange format.
    ///
    /// Ids and names may be strings or numbers; `children` defaults to empty.
    /// Nesting depth is not limited, so anything [`Tree::to_json`] writes
    /// can be read back.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Json`] for malformed JSON and the structural
    /// variants for missing, empty or duplicate ids.
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        let json_error = |err: serde_json::Error| TreeError::Json(err.to_string());

        // Every tree level nests an object and a `children` array.
        let mut deserializer = serde_json::Deserializer::from_str(json);
        deserializer.disable_recursion_limit();
        let value = Value::deserialize(&mut deserializer).map_err(json_error)?;
        deserializer.end().map_err(json_error)?;

        Self::from_value(&value)
    }

    /// Builds a tree from an already-parsed JSON value.
    pub fn from_value(value: &Value) -> Result<Self, TreeError> {
        let root = node_from_value(value, "$")?;
        Self::new(root)
    }

    /// Assembles a tree from flat records with parent links.
    ///
    /// Children keep the order in which their records appear.
    ///
    /// # Errors
    ///
    /// - [`TreeError::DuplicateId`] / [`TreeError::EmptyId`] for bad ids
    /// - [`TreeError::UnknownParent`] when a parent id is not defined
    /// - [`TreeError::NoRoot`] / [`TreeError::MultipleRoots`] unless exactly one record lacks a parent
    /// - [`TreeError::Cycle`] when some records cannot reach the root
    pub fn from_records(records: impl IntoIterator<Item = NodeRecord>) -> Result<Self, TreeError> {
        let records: Vec<NodeRecord> = records.into_iter().collect();

        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if record.id.is_empty() {
                return Err(TreeError::EmptyId {
                    path: format!("records[{i}]"),
                });
            }
            if index.insert(record.id.as_str(), i).is_some() {
                return Err(TreeError::DuplicateId {
                    id: record.id.clone(),
                });
            }
        }

        let mut root = None;
        let mut children_of = vec![Vec::new(); records.len()];
        for (i, record) in records.iter().enumerate() {
            match &record.parent {
                None => {
                    if let Some(first) = root {
                        let first: &NodeRecord = &records[first];
                        return Err(TreeError::MultipleRoots {
                            first: first.id.clone(),
                            second: record.id.clone(),
                        });
                    }
                    root = Some(i);
                }
                Some(parent) => {
                    let parent_index =
                        *index
                            .get(parent.as_str())
                            .ok_or_else(|| TreeError::UnknownParent {
                                id: record.id.clone(),
                                parent: parent.clone(),
                            })?;
                    children_of[parent_index].push(i);
                }
            }
        }
        let root = root.ok_or(TreeError::NoRoot)?;

        // Pre-order from the root; anything unreached hangs off a cycle.
        let mut order = Vec::with_capacity(records.len());
        let mut stack = vec![root];
        while let Some(i) = stack.pop() {
            order.push(i);
            stack.extend(children_of[i].iter().rev());
        }
        if order.len() != records.len() {
            let reached: HashSet<usize> = order.iter().copied().collect();
            let stray = (0..records.len())
                .find(|i| !reached.contains(i))
                .unwrap_or(root);
            return Err(TreeError::Cycle {
                id: records[stray].id.clone(),
            });
        }

        // Reverse pre-order visits every child before its parent.
        let mut built: Vec<Option<Node>> = vec![None; records.len()];
        for &i in order.iter().rev() {
            let children = children_of[i]
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            built[i] = Some(Node {
                id: Id::new(&records[i].id),
                name: records[i].name.clone(),
                children,
            });
        }

        let root = built[root].take().ok_or(TreeError::NoRoot)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// A tree always contains at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Depth of the deepest node (the root alone has height 0).
    pub fn height(&self) -> usize {
        self.iter().map(|visit| visit.depth).max().unwrap_or(0)
    }

    /// Depth-first pre-order walk, children in their original order.
    pub fn iter(&self) -> Walk<'_> {
        Walk {
            stack: vec![Visit {
                node: &self.root,
                depth: 0,
                parent: None,
            }],
        }
    }

    /// Finds a node by id.
    pub fn find(&self, id: &str) -> Option<&Node> {
        self.iter()
            .map(|visit| visit.node)
            .find(|node| node.id == id)
    }

    /// Content fingerprint: equal trees yield equal identities.
    pub fn identity(&self) -> TreeIdentity {
        let mut hasher = DefaultHasher::new();
        for visit in self.iter() {
            visit.node.id.to_string().hash(&mut hasher);
            visit.node.name.hash(&mut hasher);
            visit.depth.hash(&mut hasher);
            visit.node.children.len().hash(&mut hasher);
        }
        TreeIdentity(hasher.finish())
    }

    /// Serializes back to the `{id, name, children}` JSON format.
    pub fn to_json(&self) -> Result<String, TreeError> {
        serde_json::to_string_pretty(self).map_err(|err| TreeError::Json(err.to_string()))
    }
}

fn scalar_field(
    object: &serde_json::Map<String, Value>,
    field: &'static str,
    path: &str,
) -> Result<Option<String>, TreeError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(_) => Err(TreeError::InvalidField {
            path: path.to_string(),
            field,
        }),
    }
}

fn node_from_value(value: &Value, path: &str) -> Result<Node, TreeError> {
    let object = value
        .as_object()
        .ok_or_else(|| TreeError::Json(format!("node at {path} is not an object")))?;

    let id = scalar_field(object, "id", path)?.ok_or_else(|| TreeError::MissingId {
        path: path.to_string(),
    })?;
    if id.is_empty() {
        return Err(TreeError::EmptyId {
            path: path.to_string(),
        });
    }
    let name = scalar_field(object, "name", path)?.ok_or_else(|| TreeError::MissingName {
        path: path.to_string(),
    })?;

    let children = match object.get("children") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| node_from_value(item, &format!("{path}.children[{i}]")))
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => {
            return Err(TreeError::Json(format!(
                "`children` at {path} is not an array"
            )));
        }
    };

    Ok(Node {
        id: Id::new(&id),
        name,
        children,
    })
}
