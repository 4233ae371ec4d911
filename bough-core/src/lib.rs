//! # Bough Core Library
//!
//! Provider-independent pieces of branch resolution: the repository identity,
//! canonical branch records, the error vocabulary, the selection state a
//! branch picker owns, and user configuration.

pub mod branch;
pub mod config;
pub mod error;
pub mod identity;
pub mod output;
pub mod prompts;
pub mod provider;
pub mod selection;

// Re-export main types
pub use branch::{BranchRecord, FALLBACK_BRANCH_NAMES, UNKNOWN_SHA, fallback_branches};
pub use config::{BoughConfig, ConfigDirs, ProviderEndpoints, ProxySettings, get_config_dirs};
pub use error::{ErrorKind, MalformedBranchData, ResolveError};
pub use identity::RepositoryIdentity;
pub use provider::ProviderKind;
pub use selection::{ResolutionResult, ResolutionTicket, SelectionState, StateChange};
