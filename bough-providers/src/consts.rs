//! Constants for the bough provider clients

/// User-Agent header value sent with every provider request
pub const USER_AGENT: &str = concat!("bough/", env!("CARGO_PKG_VERSION"));

/// Accept header value sent with every provider request
pub const ACCEPT_JSON: &str = "application/json";

/// Default upper bound on a single branch-list request, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
