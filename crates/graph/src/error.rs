use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Duplicate node id: {0}")]
    DuplicateId(String),

    /// Relation endpoint that names no node
    #[error("Dangling relation {from} -> {to}: unknown node '{missing}'")]
    DanglingReference {
        from: String,
        to: String,
        missing: String,
    },

    #[error("Manifest format error: {0}")]
    ManifestFormat(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl GraphError {
    pub fn manifest_format(msg: impl Into<String>) -> Self {
        Self::ManifestFormat(msg.into())
    }
}
