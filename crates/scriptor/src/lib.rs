//! # Kai Scriptor
//!
//! Lightweight relevance fingerprints of free text over a named set of
//! concepts, re-weighted through an active role.
//!
//! ## Architecture
//!
//! ```text
//! ConceptStore (key -> description, insertion ordered)
//!     │
//!     ├──> Fingerprinter
//!     │      ├─ RelevanceScorer (pluggable, keyword frequency by default)
//!     │      └─ Normalise by the best raw score -> Fingerprint (0..=1)
//!     │
//!     └──> RoleManager
//!            ├─ Attention filter (optional, sentence level)
//!            ├─ Boost concepts matching the role's focus keywords
//!            └─ Scale everything by the role's stimulus
//! ```
//!
//! ## Example
//!
//! ```rust
//! use kai_scriptor::{ConceptStore, RoleManager};
//!
//! let mut store = ConceptStore::new();
//! store.add_concept("alpha_artist", "Paints with watercolor");
//! store.add_concept("beta_chef", "Cooks dinner");
//!
//! let mut roles = RoleManager::new();
//! roles.define_role("critic", "Looks at technique", ["watercolor"]);
//! roles.set_role("critic").unwrap();
//!
//! let fingerprint = roles.summarise_context("She paints with watercolor", &store);
//! assert_eq!(fingerprint.top(1)[0].key, "alpha_artist");
//! assert_eq!(fingerprint.get("beta_chef"), Some(0.0));
//! ```

mod config;
mod error;
mod fingerprint;
mod roles;
mod scorer;
mod store;

pub mod text;

pub use config::{ScriptorConfig, DEFAULT_BOOST_FACTOR, DEFAULT_STIMULUS};
pub use error::{Result, ScriptorError};
pub use fingerprint::{Fingerprint, FingerprintEntry, Fingerprinter};
pub use roles::{Role, RoleManager};
pub use scorer::{KeywordFrequencyScorer, RelevanceScorer};
pub use store::{Concept, ConceptStore};
