//! Graphviz DOT rendering of a [`CommitGraph`].

use std::fmt;
use std::path::Path;

use repopulse_commit_graph_models::CommitGraph;

use crate::error::GraphBuildError;

const NODE_ATTRS: &str = r#"shape=ellipse, fontsize=10, margin="0.20,0.12""#;
const EDGE_ATTRS: &str = "arrowsize=0.8";

/// Displays a graph as a top-to-bottom `digraph`.
pub struct Dot<'a>(pub &'a CommitGraph);

impl fmt::Display for Dot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph {{")?;
        writeln!(f, "    rankdir=TB;")?;
        writeln!(f, "    node [{NODE_ATTRS}];")?;
        writeln!(f, "    edge [{EDGE_ATTRS}];")?;

        for node in self.0.nodes() {
            writeln!(
                f,
                r#"    "{}" [label="{}", {NODE_ATTRS}];"#,
                escape(&node.sha),
                escape(&node.label)
            )?;
        }

        for edge in self.0.edges() {
            writeln!(
                f,
                r#"    "{}" -> "{}" [{EDGE_ATTRS}];"#,
                escape(&edge.parent),
                escape(&edge.child)
            )?;
        }

        writeln!(f, "}}")
    }
}

/// Quote-safe DOT string contents; newlines become the `\n` line break.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            c => escaped.push(c),
        }
    }
    escaped
}

#[must_use]
pub fn render_dot(graph: &CommitGraph) -> String {
    Dot(graph).to_string()
}

/// Write the rendered graph to `path`, replacing any existing file.
///
/// # Errors
///
/// * If the file cannot be written
pub fn write_dot(graph: &CommitGraph, path: &Path) -> Result<(), GraphBuildError> {
    std::fs::write(path, render_dot(graph)).map_err(|source| GraphBuildError::Write {
        path: path.to_path_buf(),
        source,
    })
}
