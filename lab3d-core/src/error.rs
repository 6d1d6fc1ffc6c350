/// Errors for the fallible edges of the core: options loading and scene linking
use std::fmt;

use crate::hierarchy::NodeId;

#[derive(Debug)]
pub enum Lab3dError {
    /// A node referenced a parent that is not in the graph
    UnknownNode(NodeId),
    /// Reading an options file failed
    Io(std::io::Error),
    /// TOML options parsing/serialization failure
    OptionsParse(String),
}

impl fmt::Display for Lab3dError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "unknown scene node {}", id.index()),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => write!(f, "options parse error: {msg}"),
        }
    }
}

impl std::error::Error for Lab3dError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Lab3dError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
