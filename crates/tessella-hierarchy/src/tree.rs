#![forbid(unsafe_code)]

//! Arena-backed weighted hierarchy.
//!
//! All nodes of a built tree live in one flat vector addressed by
//! [`NodeId`]. Ids are assigned in pre-order with siblings in their final
//! sorted order, so a parent's id is always smaller than its children's and
//! annotation passes can run top-down over plain vectors.

use std::fmt;

use smallvec::SmallVec;

use crate::node::Node;

/// Identifier of a node within a built [`Hierarchy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct NodeId(u32);

impl NodeId {
    /// Position in the hierarchy's node vector and in any parallel
    /// annotation vector.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize);
        Self(index as u32)
    }
}

/// One node of a built hierarchy.
#[derive(Debug, Clone)]
pub struct HierarchyNode {
    /// Display name, unique among siblings by convention (collisions are
    /// tolerated, not merged).
    pub name: String,
    /// Value as given in the input, if any.
    pub value: Option<f64>,
    /// Aggregate weight: own value for leaves (0 when absent), sum of the
    /// children's weights for internal nodes.
    pub weight: f64,
    /// Root is depth 0.
    pub depth: u32,
    /// `None` for the root.
    pub parent: Option<NodeId>,
    /// Ordered by weight descending; ties keep input order.
    pub children: SmallVec<[NodeId; 4]>,
}

impl HierarchyNode {
    /// Check if the node has no children.
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Errors detected while building a hierarchy.
///
/// Paths list node names from the root down to the offending node.
#[derive(Debug, Clone, PartialEq)]
pub enum HierarchyError {
    /// A node links back to one of its own ancestors.
    Cycle { path: Vec<String> },
    /// A node carries a negative value.
    NegativeValue { path: Vec<String>, value: f64 },
    /// A node carries a NaN or infinite value.
    NonFiniteValue { path: Vec<String>, value: f64 },
    /// A node was attached to a second parent.
    MultipleParents { name: String },
    /// An id that does not belong to this builder.
    UnknownNode { index: usize },
}

impl fmt::Display for HierarchyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycle { path } => {
                write!(
                    f,
                    "cycle detected: {} links back to an ancestor",
                    path.join(" / ")
                )
            }
            Self::NegativeValue { path, value } => {
                write!(f, "negative value {} at {}", value, path.join(" / "))
            }
            Self::NonFiniteValue { path, value } => {
                write!(f, "non-finite value {} at {}", value, path.join(" / "))
            }
            Self::MultipleParents { name } => {
                write!(f, "node {name} is attached to more than one parent")
            }
            Self::UnknownNode { index } => {
                write!(f, "node id {index} does not belong to this builder")
            }
        }
    }
}

impl std::error::Error for HierarchyError {}

struct Draft {
    name: String,
    value: Option<f64>,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

/// Incremental construction of a [`Hierarchy`].
///
/// Nodes are inserted first, then linked with [`attach`](Self::attach).
/// Unlike an owned [`Node`] tree, explicit links can express malformed
/// shapes; [`build`](Self::build) validates and rejects them.
pub struct HierarchyBuilder {
    nodes: Vec<Draft>,
}

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Insert a node with no links yet.
    pub fn node(&mut self, name: impl Into<String>, value: Option<f64>) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Draft {
            name: name.into(),
            value,
            parent: None,
            children: SmallVec::new(),
        });
        id
    }

    /// Link `child` under `parent`.
    ///
    /// A node accepts exactly one parent; re-attaching is an error.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), HierarchyError> {
        self.check(parent)?;
        self.check(child)?;
        if self.nodes[child.index()].parent.is_some() {
            return Err(HierarchyError::MultipleParents {
                name: self.nodes[child.index()].name.clone(),
            });
        }
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
        Ok(())
    }

    /// Validate links, aggregate weights, sort children, and freeze the
    /// tree rooted at `root`.
    ///
    /// Nodes not reachable from `root` are discarded. Fails fast on
    /// cycles and on negative or non-finite values, reporting the
    /// offending ancestry path.
    pub fn build(self, root: NodeId) -> Result<Hierarchy, HierarchyError> {
        self.check(root)?;

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("hierarchy_build", nodes = self.nodes.len()).entered();

        const UNSEEN: u8 = 0;
        const ON_PATH: u8 = 1;
        const DONE: u8 = 2;

        let n = self.nodes.len();
        let mut state = vec![UNSEEN; n];
        let mut depth = vec![0u32; n];
        let mut weight = vec![0f64; n];
        let mut post: Vec<NodeId> = Vec::with_capacity(n);
        let mut path: Vec<NodeId> = Vec::new();
        let mut stack: Vec<(NodeId, bool)> = vec![(root, false)];

        while let Some((id, exiting)) = stack.pop() {
            if exiting {
                state[id.index()] = DONE;
                path.pop();
                post.push(id);
                continue;
            }

            let draft = &self.nodes[id.index()];
            if let Some(v) = draft.value {
                if !v.is_finite() {
                    return Err(HierarchyError::NonFiniteValue {
                        path: self.path_names(&path, id),
                        value: v,
                    });
                }
                if v < 0.0 {
                    return Err(HierarchyError::NegativeValue {
                        path: self.path_names(&path, id),
                        value: v,
                    });
                }
            }

            state[id.index()] = ON_PATH;
            path.push(id);
            stack.push((id, true));
            for &child in draft.children.iter().rev() {
                if state[child.index()] == ON_PATH {
                    return Err(HierarchyError::Cycle {
                        path: self.path_names(&path, child),
                    });
                }
                depth[child.index()] = depth[id.index()] + 1;
                stack.push((child, false));
            }
        }

        // Aggregate bottom-up; post-order guarantees children go first.
        for &id in &post {
            let draft = &self.nodes[id.index()];
            weight[id.index()] = if draft.children.is_empty() {
                draft.value.unwrap_or(0.0)
            } else {
                draft.children.iter().map(|c| weight[c.index()]).sum()
            };
        }

        // Fix the sibling order once; every layout pass reuses it.
        let mut nodes = self.nodes;
        for draft in &mut nodes {
            draft
                .children
                .sort_by(|a, b| weight[b.index()].total_cmp(&weight[a.index()]));
        }

        // Reindex reachable nodes into pre-order over the sorted tree.
        let mut remap: Vec<Option<NodeId>> = vec![None; n];
        let mut order: Vec<NodeId> = Vec::with_capacity(post.len());
        let mut walk: Vec<NodeId> = vec![root];
        while let Some(id) = walk.pop() {
            remap[id.index()] = Some(NodeId::from_index(order.len()));
            order.push(id);
            for &child in nodes[id.index()].children.iter().rev() {
                walk.push(child);
            }
        }

        let mut out: Vec<HierarchyNode> = Vec::with_capacity(order.len());
        let mut max_depth = 0;
        for &old in &order {
            let d = depth[old.index()];
            max_depth = max_depth.max(d);
            let children = nodes[old.index()]
                .children
                .iter()
                .filter_map(|c| remap[c.index()])
                .collect();
            let parent = nodes[old.index()].parent.and_then(|p| remap[p.index()]);
            out.push(HierarchyNode {
                name: std::mem::take(&mut nodes[old.index()].name),
                value: nodes[old.index()].value,
                weight: weight[old.index()],
                depth: d,
                parent,
                children,
            });
        }

        Ok(Hierarchy {
            nodes: out,
            max_depth,
        })
    }

    fn check(&self, id: NodeId) -> Result<(), HierarchyError> {
        if id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(HierarchyError::UnknownNode { index: id.index() })
        }
    }

    fn path_names(&self, ancestors: &[NodeId], tail: NodeId) -> Vec<String> {
        ancestors
            .iter()
            .chain(std::iter::once(&tail))
            .map(|id| self.nodes[id.index()].name.clone())
            .collect()
    }
}

/// A validated, weighted, depth-annotated tree.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
    max_depth: u32,
}

impl Hierarchy {
    /// Build from an owned input tree.
    pub fn from_node(root: &Node) -> Result<Self, HierarchyError> {
        let mut builder = HierarchyBuilder::new();
        let root_id = builder.node(root.name.clone(), root.value);
        let mut stack: Vec<(&Node, NodeId)> = vec![(root, root_id)];
        while let Some((item, id)) = stack.pop() {
            for child in &item.children {
                let child_id = builder.node(child.name.clone(), child.value);
                builder.attach(id, child_id)?;
                stack.push((child, child_id));
            }
        }
        builder.build(root_id)
    }

    /// The root node's id (always the first slot).
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes; parallel annotation vectors use this length.
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Look up a node.
    #[inline]
    #[must_use]
    pub fn node(&self, id: NodeId) -> &HierarchyNode {
        &self.nodes[id.index()]
    }

    /// All ids in pre-order: every parent before its children, siblings in
    /// weight-sorted order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.nodes.len()).map(NodeId::from_index)
    }

    /// Children of a node, weight-sorted.
    #[inline]
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Depth of the deepest node.
    #[inline]
    #[must_use]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Names from the root down to `id`.
    #[must_use]
    pub fn path(&self, id: NodeId) -> Vec<&str> {
        let mut names = Vec::new();
        let mut cursor = Some(id);
        while let Some(c) = cursor {
            let node = &self.nodes[c.index()];
            names.push(node.name.as_str());
            cursor = node.parent;
        }
        names.reverse();
        names
    }

    /// Ancestry path rendered as `Root / Branch / Leaf`.
    #[must_use]
    pub fn path_string(&self, id: NodeId) -> String {
        self.path(id).join(" / ")
    }
}
