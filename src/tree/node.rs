//! A node struct used in the decision tree algorithm.
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::{Classifier, Label};
use super::split_rule::{Splitter, LeftRight};


/// Enumeration of branch and leaf nodes.
/// Each branch exclusively owns its two children.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A node that has two children.
    Branch {
        /// The test sending a row to `left` or `right`.
        splitter: Splitter,
        /// Rows with `x[feature] <= threshold`.
        left: Box<Node>,
        /// Rows with `x[feature] > threshold`.
        right: Box<Node>,
    },
    /// A node that has no child.
    Leaf {
        /// The majority label of the training rows reaching this leaf.
        label: Label,
        /// Number of training rows per label.
        distribution: Vec<usize>,
    },
}


impl Node {
    /// Construct a branch node.
    pub fn branch(splitter: Splitter, left: Box<Node>, right: Box<Node>)
        -> Self
    {
        Self::Branch { splitter, left, right }
    }


    /// Construct a leaf node.
    pub fn leaf(label: Label, distribution: Vec<usize>) -> Self {
        Self::Leaf { label, distribution }
    }


    /// Returns `true` if `self` is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }


    /// Number of nodes of this sub-tree.
    pub fn n_nodes(&self) -> usize {
        match self {
            Self::Branch { left, right, .. } => {
                1 + left.n_nodes() + right.n_nodes()
            },
            Self::Leaf { .. } => 1,
        }
    }


    /// Number of leaves of this sub-tree.
    pub fn n_leaves(&self) -> usize {
        match self {
            Self::Branch { left, right, .. } => {
                left.n_leaves() + right.n_leaves()
            },
            Self::Leaf { .. } => 1,
        }
    }


    /// Depth of this sub-tree. A single leaf has depth `0`.
    pub fn depth(&self) -> usize {
        match self {
            Self::Branch { left, right, .. } => {
                1 + left.depth().max(right.depth())
            },
            Self::Leaf { .. } => 0,
        }
    }


    pub(crate) fn to_dot_info(&self, id: usize, names: &[String])
        -> (Vec<String>, usize)
    {
        match self {
            Node::Branch { splitter, left, right } => {
                let feat = names.get(splitter.feature)
                    .cloned()
                    .unwrap_or_else(|| format!("x[{}]", splitter.feature));
                let splitter = format!(
                    "\tnode_{id} [ label = \"{feat} <= {thr:.1} ?\" ];\n",
                    thr = splitter.threshold,
                );

                let left_id = id + 1;
                let (     left,  right_id) = left.to_dot_info(left_id, names);
                let (mut right, return_id) = right.to_dot_info(right_id, names);

                let mut info = left;
                info.push(splitter);
                info.append(&mut right);

                let left_edge = format!(
                    "\tnode_{id} -- node_{left_id} [ label = \"Yes\" ];\n",
                );
                info.push(left_edge);
                let right_edge = format!(
                    "\tnode_{id} -- node_{right_id} [ label = \"No\" ];\n",
                );
                info.push(right_edge);

                (info, return_id)
            },
            Node::Leaf { label, distribution } => {
                let info = format!(
                    "\tnode_{id} [ label = \"{label} {distribution:?}\", shape = box ];\n",
                );

                (vec![info], id + 1)
            }
        }
    }
}


impl Classifier for Node {
    fn predict(&self, x: &[u64]) -> Label {
        let mut node = self;
        loop {
            match node {
                Self::Branch { splitter, left, right } => {
                    node = match splitter.split(x) {
                        LeftRight::Left  => left.as_ref(),
                        LeftRight::Right => right.as_ref(),
                    };
                },
                Self::Leaf { label, .. } => return *label,
            }
        }
    }
}


impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Branch { splitter, left, right } => {
                f.debug_struct("Branch")
                    .field("feature", &splitter.feature)
                    .field("threshold", &splitter.threshold)
                    .field("left", &left)
                    .field("right", &right)
                    .finish()
            },
            Self::Leaf { label, distribution } => {
                f.debug_struct("Leaf")
                    .field("label", &label)
                    .field("distribution", &distribution)
                    .finish()
            },
        }
    }
}
