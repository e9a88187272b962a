use thiserror::Error;

/// Result type for scriptor operations
pub type Result<T> = std::result::Result<T, ScriptorError>;

/// Errors raised by the concept store, fingerprinter and role manager
#[derive(Error, Debug)]
pub enum ScriptorError {
    /// Lookup of a concept key that was never added
    #[error("Concept not found: {0}")]
    ConceptNotFound(String),

    /// Activation of a role that was never defined
    #[error("Role not found: {0}")]
    RoleNotFound(String),

    /// Stimulus applied while no role is active
    #[error("No active role")]
    NoActiveRole,

    /// Stimulus weights must be finite and non-negative
    #[error("Invalid stimulus weight: {0}")]
    InvalidStimulus(f32),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ScriptorError {
    /// Create a concept-not-found error
    pub fn concept_not_found(key: impl Into<String>) -> Self {
        Self::ConceptNotFound(key.into())
    }

    /// Create a role-not-found error
    pub fn role_not_found(name: impl Into<String>) -> Self {
        Self::RoleNotFound(name.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// True for unknown concept or role lookups
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ConceptNotFound(_) | Self::RoleNotFound(_))
    }
}
