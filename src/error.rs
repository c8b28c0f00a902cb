//! Error types for the indicator panel layer.
//!
//! None of these ever reach the fleet manager: component operations turn
//! them into outcome values and carry on.

use thiserror::Error;

use crate::nodes::NodeHandle;

/// Failures reported by a node factory
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PanelError {
    #[error("no node with id '{0}' in the view tree")]
    MissingNode(String),

    #[error("node handle {0:?} no longer refers to a node")]
    StaleHandle(NodeHandle),
}

/// Failures while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
