//! Explanation generation
//!
//! [`ExplanationGenerator`] turns one post into a validated explanation,
//! [`Dispatcher`] drives it over a whole split and hands each result to the
//! [`ResultSink`] as soon as it is available.

mod dispatcher;
mod generator;
mod prompt;
mod sink;
mod types;

pub use dispatcher::{DispatchSummary, Dispatcher};
pub use generator::ExplanationGenerator;
pub use prompt::PromptBuilder;
pub use sink::ResultSink;
pub use types::{GeneratedExplanation, ResultRecord, SENTINEL};
