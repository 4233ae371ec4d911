//! # Bough Providers
//!
//! Branch-list clients for the supported hosting providers: request
//! construction, fetching with status classification, and normalization of
//! each provider's payload into canonical branch records.

pub mod client;
pub mod consts;
pub mod normalize;
pub mod providers;
pub mod request;
mod resolver;

pub use client::{BranchClient, classify_status};
pub use normalize::normalize_branches;
pub use providers::{ProviderStrategy, strategy_for};
pub use request::{BranchRequest, build_branch_request};
