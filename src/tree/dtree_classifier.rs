//! Defines the decision tree classifier.
use serde::{Serialize, Deserialize};

use std::path::Path;
use std::fs::File;
use std::io::{BufWriter, Write};

use crate::{Classifier, Label, SpamError};
use crate::error::Result;
use super::node::Node;


/// Decision tree classifier.
/// This struct is a wrapper of the root `Node`.
/// Trees are immutable after training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    root: Node,
    n_feature: usize,
}


impl DecisionTreeClassifier {
    /// Wrap a root node grown on `n_feature` columns.
    pub(crate) fn from_root(root: Node, n_feature: usize) -> Self {
        Self { root, n_feature }
    }


    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }


    /// Number of feature columns the tree was trained on.
    pub fn n_feature(&self) -> usize {
        self.n_feature
    }


    /// Number of nodes.
    pub fn n_nodes(&self) -> usize {
        self.root.n_nodes()
    }


    /// Number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }


    /// Depth of the tree. A single leaf has depth `0`.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }


    /// Write the current decision tree to a Graphviz dot file.
    /// `names` labels the feature columns.
    pub fn to_dot_file<P>(&self, path: P, names: &[String]) -> Result<()>
        where P: AsRef<Path>
    {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| SpamError::io(e, path))?;
        let mut f = BufWriter::new(file);

        let info = self.root.to_dot_info(0, names).0;
        write_dot(&mut f, info).map_err(|e| SpamError::io(e, path))
    }
}


fn write_dot<W: Write>(f: &mut W, info: Vec<String>) -> std::io::Result<()> {
    f.write_all(b"graph DecisionTree {\n")?;
    for row in info {
        f.write_all(row.as_bytes())?;
    }
    f.write_all(b"}\n")?;
    f.flush()
}


impl Classifier for DecisionTreeClassifier {
    fn predict(&self, x: &[u64]) -> Label {
        self.root.predict(x)
    }
}
