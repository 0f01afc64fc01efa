//! Descriptive statistics over the raw corpus files
//!
//! Inputs are the posts file (`post_id,text`) and the annotations file
//! (`post_id,DSM5_symptom,status`). A symptom counts as present for a post
//! only when its status is `1` and the label is one of the nine DSM-5
//! criteria. Every annotation with status `0` or `1` counts as an explanation.

use super::symptoms::DsmSymptom;
use crate::error::{Redsm5Error, Redsm5Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct PostRow {
    post_id: String,
    text: String,
}

/// One row of the annotations file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Annotation {
    pub post_id: String,
    #[serde(rename = "DSM5_symptom")]
    pub symptom: String,
    pub status: String,
}

/// Number of posts showing a symptom
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymptomCount {
    pub symptom: DsmSymptom,
    pub posts: usize,
}

/// Corpus-level statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusStatistics {
    pub posts: usize,
    pub explanations: usize,
    pub avg_explanations_per_post: f64,
    pub avg_symptoms_per_post: f64,
    /// Posts without any present symptom
    pub hard_negatives: usize,
    pub avg_length_words: f64,
    pub median_length_words: f64,
    /// Sample standard deviation; 0 with fewer than two posts
    pub std_dev_length_words: f64,
    pub min_length_words: usize,
    pub max_length_words: usize,
    /// Posts per symptom, most frequent first
    pub symptom_distribution: Vec<SymptomCount>,
}

impl CorpusStatistics {
    /// Load both files and compute the statistics
    pub fn from_files(posts_path: &Path, annotations_path: &Path) -> Redsm5Result<Self> {
        let posts = load_posts(posts_path)?;
        let annotations = load_annotations(annotations_path)?;
        debug!(
            posts = posts.len(),
            annotations = annotations.len(),
            "computing corpus statistics"
        );
        Ok(Self::compute(&posts, &annotations))
    }

    /// Compute statistics from `(post_id, text)` pairs and annotations
    pub fn compute(posts: &[(String, String)], annotations: &[Annotation]) -> Self {
        let mut symptoms_by_post: HashMap<&str, BTreeSet<DsmSymptom>> = HashMap::new();
        let mut explanations_by_post: HashMap<&str, usize> = HashMap::new();

        for annotation in annotations {
            let post_id = annotation.post_id.as_str();
            if annotation.status == "1" {
                if let Ok(symptom) = annotation.symptom.parse::<DsmSymptom>() {
                    symptoms_by_post.entry(post_id).or_default().insert(symptom);
                }
            }
            if annotation.status == "0" || annotation.status == "1" {
                *explanations_by_post.entry(post_id).or_default() += 1;
            }
        }

        let n = posts.len();
        let symptom_total = |id: &str| symptoms_by_post.get(id).map_or(0, BTreeSet::len);

        let explanations: usize = posts
            .iter()
            .map(|(id, _)| explanations_by_post.get(id.as_str()).copied().unwrap_or(0))
            .sum();
        let symptoms: usize = posts.iter().map(|(id, _)| symptom_total(id)).sum();
        let hard_negatives = posts.iter().filter(|(id, _)| symptom_total(id) == 0).count();

        let mut lengths: Vec<usize> = posts
            .iter()
            .map(|(_, text)| text.split_whitespace().count())
            .collect();
        lengths.sort_unstable();

        Self {
            posts: n,
            explanations,
            avg_explanations_per_post: ratio(explanations, n),
            avg_symptoms_per_post: ratio(symptoms, n),
            hard_negatives,
            avg_length_words: ratio(lengths.iter().sum(), n),
            median_length_words: median(&lengths),
            std_dev_length_words: sample_std_dev(&lengths),
            min_length_words: lengths.first().copied().unwrap_or(0),
            max_length_words: lengths.last().copied().unwrap_or(0),
            symptom_distribution: distribution(symptoms_by_post.values()),
        }
    }
}

fn ratio(total: usize, n: usize) -> f64 {
    if n == 0 { 0.0 } else { total as f64 / n as f64 }
}

/// Median of sorted values
fn median(sorted: &[usize]) -> f64 {
    match sorted.len() {
        0 => 0.0,
        len if len % 2 == 1 => sorted[len / 2] as f64,
        len => (sorted[len / 2 - 1] + sorted[len / 2]) as f64 / 2.0,
    }
}

fn sample_std_dev(values: &[usize]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = ratio(values.iter().sum(), values.len());
    let variance = values
        .iter()
        .map(|v| (*v as f64 - mean).powi(2))
        .sum::<f64>()
        / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Posts per symptom over every annotated post; ties ordered by label
fn distribution<'a>(sets: impl Iterator<Item = &'a BTreeSet<DsmSymptom>>) -> Vec<SymptomCount> {
    let mut counts: HashMap<DsmSymptom, usize> = HashMap::new();
    for set in sets {
        for symptom in set {
            *counts.entry(*symptom).or_default() += 1;
        }
    }

    let mut distribution: Vec<SymptomCount> = counts
        .into_iter()
        .map(|(symptom, posts)| SymptomCount { symptom, posts })
        .collect();
    distribution.sort_by(|a, b| {
        b.posts
            .cmp(&a.posts)
            .then_with(|| a.symptom.as_str().cmp(b.symptom.as_str()))
    });
    distribution
}

/// Load `(post_id, text)` pairs; a repeated id keeps its first position and last text
fn load_posts(path: &Path) -> Redsm5Result<Vec<(String, String)>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| Redsm5Error::io_with_path(format!("Failed to open posts file: {}", e), path))?;

    let mut posts: Vec<(String, String)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for result in reader.deserialize::<PostRow>() {
        let row = result?;
        match index.get(&row.post_id) {
            Some(&pos) => posts[pos].1 = row.text,
            None => {
                index.insert(row.post_id.clone(), posts.len());
                posts.push((row.post_id, row.text));
            }
        }
    }
    Ok(posts)
}

fn load_annotations(path: &Path) -> Redsm5Result<Vec<Annotation>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        Redsm5Error::io_with_path(format!("Failed to open annotations file: {}", e), path)
    })?;

    reader
        .deserialize::<Annotation>()
        .map(|row| row.map_err(Redsm5Error::from))
        .collect()
}
