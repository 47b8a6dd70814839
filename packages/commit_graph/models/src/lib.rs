#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitNode {
    pub sha: String,
    pub label: String,
}

/// `parent` precedes `child` in the merge history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitEdge {
    pub parent: String,
    pub child: String,
}

/// Commit ancestry around a single merge.
///
/// Nodes are keyed by sha and edges by `(parent, child)`; inserting either a
/// second time is a no-op, so the first label given for a sha wins. Both sets
/// keep insertion order for stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitGraph {
    nodes: Vec<CommitNode>,
    edges: Vec<CommitEdge>,
    #[serde(skip)]
    node_index: HashMap<String, usize>,
    #[serde(skip)]
    edge_index: HashSet<(String, String)>,
}

impl CommitGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if a node with this sha already exists.
    pub fn add_node(&mut self, sha: impl Into<String>, label: impl Into<String>) -> bool {
        let sha = sha.into();
        if self.node_index.contains_key(&sha) {
            return false;
        }
        self.node_index.insert(sha.clone(), self.nodes.len());
        self.nodes.push(CommitNode {
            sha,
            label: label.into(),
        });
        true
    }

    /// Returns `false` if this directed edge already exists.
    pub fn add_edge(&mut self, parent: impl Into<String>, child: impl Into<String>) -> bool {
        let (parent, child) = (parent.into(), child.into());
        if !self.edge_index.insert((parent.clone(), child.clone())) {
            return false;
        }
        self.edges.push(CommitEdge { parent, child });
        true
    }

    #[must_use]
    pub fn contains_node(&self, sha: &str) -> bool {
        self.node_index.contains_key(sha)
    }

    #[must_use]
    pub fn contains_edge(&self, parent: &str, child: &str) -> bool {
        self.edge_index
            .contains(&(parent.to_string(), child.to_string()))
    }

    #[must_use]
    pub fn node(&self, sha: &str) -> Option<&CommitNode> {
        self.node_index.get(sha).map(|&idx| &self.nodes[idx])
    }

    #[must_use]
    pub fn nodes(&self) -> &[CommitNode] {
        &self.nodes
    }

    #[must_use]
    pub fn edges(&self) -> &[CommitEdge] {
        &self.edges
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
