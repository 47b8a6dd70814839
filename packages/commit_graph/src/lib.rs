#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Commit graph around the merge of a single branch, rendered as Graphviz DOT.

mod builder;
mod dot;
mod error;
mod label;
mod source;

pub use builder::{build_commit_graph_dot, build_merge_graph};
pub use dot::{Dot, render_dot, write_dot};
pub use error::GraphBuildError;
pub use label::{DEFAULT_TITLE_LEN, commit_title};
pub use repopulse_commit_graph_models as models;
pub use source::CommitSource;
