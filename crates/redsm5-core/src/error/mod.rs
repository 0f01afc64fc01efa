//! Error types for the ReDSM5 pipeline
//!
//! Every fallible operation in the workspace returns [`Redsm5Result`]. The
//! fallback-capable parts of the pipeline (generation, embedding, judging)
//! never surface these errors to their callers; they classify them with
//! [`Redsm5Error::failure_kind`] and wrap the fallback value in an
//! [`Outcome`](crate::outcome::Outcome) instead.

mod classifiers;
mod constructors;
mod conversions;
mod types;

pub use types::{Redsm5Error, Redsm5Result};
