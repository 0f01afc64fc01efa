//! Dataset handling
//!
//! Loading the annotated CSV corpus, the deterministic train/test split,
//! JSON-lines persistence and descriptive corpus statistics.

pub mod csv_loader;
mod example;
pub mod jsonl;
pub mod split;
pub mod stats;
mod symptoms;

pub use csv_loader::{LabeledPost, load_labeled_posts};
pub use example::Example;
pub use jsonl::{JsonlWriter, read_jsonl, write_jsonl};
pub use split::DatasetSplit;
pub use stats::{Annotation, CorpusStatistics, SymptomCount};
pub use symptoms::DsmSymptom;
