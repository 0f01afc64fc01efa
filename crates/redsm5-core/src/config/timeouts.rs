//! Default timeout and retry values for endpoint calls
//!
//! All values can be overridden through [`ProviderConfig`](super::ProviderConfig).

/// Default connection timeout for the inference server (30 seconds)
pub const CONNECTION_SECS: u64 = 30;

/// Default request timeout (120 seconds); local models can be slow on long posts
pub const REQUEST_SECS: u64 = 120;

/// Default number of transport-level retries
pub const MAX_RETRIES: u32 = 3;

/// Default base delay for exponential backoff in milliseconds
pub const RETRY_BASE_DELAY_MS: u64 = 1_000;
