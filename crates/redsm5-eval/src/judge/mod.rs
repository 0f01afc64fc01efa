//! LLM-judge evaluation
//!
//! A second model rates each prediction against its reference on three
//! axes. The weighted composite rescales every axis from 1-5 to 0-1 before
//! weighting, giving a 0-100 score.

mod evaluator;
mod prompt;
mod scores;

pub use evaluator::{JudgeEvaluator, JudgeReport};
pub use scores::{FALLBACK_JUSTIFICATION, JudgeScores};
