//! Aggregation tree mirroring the nesting of a selection.
//!
//! Groups become [`AggNode::Group`] nodes with one child per member, leaves
//! carry an index into the engine's point or area source list. The tree never
//! references real entities directly.

use smallvec::SmallVec;
use std::fmt::Write;

/// Kind of a mirrored leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    /// Indexes the point source list
    Point,
    /// Indexes the area source list
    Electrode,
    /// Indexes the area source list
    AfmArea,
}

impl LeafKind {
    pub fn is_area(&self) -> bool {
        matches!(self, LeafKind::Electrode | LeafKind::AfmArea)
    }
}

/// Kind tag of any node, groups included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Group,
    Leaf(LeafKind),
}

/// One level of selection nesting.
///
/// Every group node below the root has at least one child; the root may be
/// empty when nothing is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggNode {
    Group(Vec<AggNode>),
    Leaf { index: usize, kind: LeafKind },
}

impl Default for AggNode {
    fn default() -> Self {
        AggNode::Group(Vec::new())
    }
}

impl AggNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            AggNode::Group(_) => NodeKind::Group,
            AggNode::Leaf { kind, .. } => NodeKind::Leaf(*kind),
        }
    }

    /// Source-list index of a leaf; `None` for groups.
    pub fn source_index(&self) -> Option<usize> {
        match self {
            AggNode::Group(_) => None,
            AggNode::Leaf { index, .. } => Some(*index),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, AggNode::Leaf { .. })
    }

    pub fn children(&self) -> &[AggNode] {
        match self {
            AggNode::Group(children) => children,
            AggNode::Leaf { .. } => &[],
        }
    }

    /// Depth-first, in-order iterator over the leaves below this node.
    pub fn leaves(&self) -> Leaves<'_> {
        let mut stack = SmallVec::new();
        stack.push(self);
        Leaves { stack }
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// First leaf reached depth-first.
    pub fn first_leaf(&self) -> Option<(usize, LeafKind)> {
        self.leaves().next()
    }

    /// Compact nesting dump: groups as `[...]`, leaves as `index,`.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        self.describe_into(&mut out);
        out
    }

    fn describe_into(&self, out: &mut String) {
        match self {
            AggNode::Group(children) => {
                out.push('[');
                for child in children {
                    child.describe_into(out);
                }
                out.push(']');
            }
            AggNode::Leaf { index, .. } => {
                let _ = write!(out, "{},", index);
            }
        }
    }
}

/// Iterator returned by [`AggNode::leaves`].
pub struct Leaves<'a> {
    stack: SmallVec<[&'a AggNode; 16]>,
}

impl Iterator for Leaves<'_> {
    type Item = (usize, LeafKind);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                AggNode::Leaf { index, kind } => return Some((*index, *kind)),
                AggNode::Group(children) => self.stack.extend(children.iter().rev()),
            }
        }
        None
    }
}
