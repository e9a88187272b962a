//! Kai agent: a role-map driven wrapper around the concept fingerprinter.
//!
//! - concepts: six built-in alpha/omega concepts, plus meta states imported
//!   from a manifest
//! - roles: every `role_*` node of the role map
//! - intents: `intent_*` / `hotkey_*` nodes linked to roles by `triggers` or
//!   `activates` relations
//!
//! Each message first activates the role its intent keyword points to, then
//! gets summarised under the active role.

mod agent;
mod config;
mod logging;

pub use agent::{IntentTrigger, KaiAgent};
pub use config::{AgentConfig, FocusRule};
pub use logging::init_logging;

pub use kai_graph::{GraphModel, MetaState, Relation};
pub use kai_scriptor::{ConceptStore, Fingerprint, RoleManager};
