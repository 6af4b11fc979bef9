#![forbid(unsafe_code)]

//! Input records for hierarchical datasets.

/// One node of an input dataset.
///
/// Names must be unique among siblings (not globally). Values are
/// non-negative and typically present only on leaves; aggregation derives
/// every other quantity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub value: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub children: Vec<Node>,
}

impl Node {
    /// A leaf carrying a value.
    #[must_use]
    pub fn leaf(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            children: Vec::new(),
        }
    }

    /// An internal node over the given children.
    #[must_use]
    pub fn branch(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            value: None,
            children,
        }
    }
}

/// Collapse children that re-declare their parent's name.
///
/// Some exporters wrap a layer in a single child named after the layer
/// itself. Each such child is absorbed: the parent takes its value (summed
/// when both carry one) and its children, in place. Applied to the whole
/// tree; hoisted grandchildren are re-examined, so repeated wrapping
/// collapses fully.
pub fn collapse_self_named(node: &mut Node) {
    let mut i = 0;
    while i < node.children.len() {
        if node.children[i].name == node.name {
            let child = node.children.remove(i);
            node.value = match (node.value, child.value) {
                (Some(a), Some(b)) => Some(a + b),
                (v, None) | (None, v) => v,
            };
            let tail = node.children.split_off(i);
            node.children.extend(child.children);
            node.children.extend(tail);
        } else {
            i += 1;
        }
    }
    for child in &mut node.children {
        collapse_self_named(child);
    }
}

#[cfg(test)]
mod tests {
    use super::{Node, collapse_self_named};

    #[test]
    fn leaf_and_branch_constructors() {
        let leaf = Node::leaf("Laptops", 820.0);
        assert_eq!(leaf.value, Some(820.0));
        assert!(leaf.children.is_empty());

        let branch = Node::branch("Asia", vec![leaf]);
        assert_eq!(branch.value, None);
        assert_eq!(branch.children.len(), 1);
    }

    #[test]
    fn collapse_absorbs_self_named_child() {
        let mut node = Node::branch("X", vec![Node::leaf("X", 10.0)]);
        collapse_self_named(&mut node);
        assert_eq!(node.name, "X");
        assert_eq!(node.value, Some(10.0));
        assert!(node.children.is_empty());
    }

    #[test]
    fn collapse_hoists_grandchildren_in_place() {
        let mut node = Node::branch(
            "Europe",
            vec![
                Node::leaf("France", 1.0),
                Node::branch(
                    "Europe",
                    vec![Node::leaf("Germany", 2.0), Node::leaf("Italy", 3.0)],
                ),
                Node::leaf("Spain", 4.0),
            ],
        );
        collapse_self_named(&mut node);
        let names: Vec<&str> = node.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["France", "Germany", "Italy", "Spain"]);
    }

    #[test]
    fn collapse_handles_repeated_wrapping() {
        let mut node = Node::branch(
            "X",
            vec![Node::branch("X", vec![Node::branch("X", vec![Node::leaf("Y", 5.0)])])],
        );
        collapse_self_named(&mut node);
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].name, "Y");
    }

    #[test]
    fn collapse_sums_values_when_both_present() {
        let mut node = Node {
            name: "X".into(),
            value: Some(2.0),
            children: vec![Node::leaf("X", 3.0)],
        };
        collapse_self_named(&mut node);
        assert_eq!(node.value, Some(5.0));
    }

    #[test]
    fn collapse_recurses_into_deeper_layers() {
        let mut node = Node::branch(
            "Root",
            vec![Node::branch("A", vec![Node::leaf("A", 7.0)])],
        );
        collapse_self_named(&mut node);
        assert_eq!(node.children[0].value, Some(7.0));
        assert!(node.children[0].children.is_empty());
    }

    #[test]
    fn collapse_leaves_distinct_names_untouched() {
        let mut node = Node::branch("A", vec![Node::leaf("B", 1.0), Node::leaf("C", 2.0)]);
        let before = node.clone();
        collapse_self_named(&mut node);
        assert_eq!(node, before);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn node_parses_from_json() {
        let json = r#"{
            "name": "Sales",
            "children": [
                { "name": "Asia", "children": [ { "name": "China", "value": 1250 } ] },
                { "name": "Europe", "value": 300 }
            ]
        }"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.name, "Sales");
        assert_eq!(node.value, None);
        assert_eq!(node.children[0].children[0].value, Some(1250.0));
        assert_eq!(node.children[1].value, Some(300.0));
    }
}
