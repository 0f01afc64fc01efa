//! Deterministic train/test split

use super::example::Example;
use crate::config::DatasetConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Train and test partitions of a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSplit<T> {
    pub train: Vec<T>,
    pub test: Vec<T>,
}

impl<T> DatasetSplit<T> {
    /// Shuffle `items` with a seeded RNG and cut off the test partition
    ///
    /// The test partition holds `ceil(len * test_fraction)` items. The same
    /// seed and input always produce the same partitions.
    pub fn new(mut items: Vec<T>, config: &DatasetConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        items.shuffle(&mut rng);

        let test_len = ((items.len() as f64) * config.test_fraction).ceil() as usize;
        let test_len = test_len.min(items.len());
        let train = items.split_off(test_len);

        Self { train, test: items }
    }

    pub fn len(&self) -> usize {
        self.train.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.train.is_empty() && self.test.is_empty()
    }

    /// The first `count` training items, used as few-shot demonstrations
    pub fn few_shot(&self, count: usize) -> &[T] {
        &self.train[..count.min(self.train.len())]
    }

    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> DatasetSplit<U> {
        DatasetSplit {
            train: self.train.into_iter().map(&mut f).collect(),
            test: self.test.into_iter().map(&mut f).collect(),
        }
    }
}

impl DatasetSplit<super::LabeledPost> {
    pub fn into_examples(self) -> DatasetSplit<Example> {
        self.map(|post| Example::new(post.text, post.explanation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64) -> DatasetConfig {
        DatasetConfig {
            test_fraction: 0.2,
            seed,
        }
    }

    #[test]
    fn test_split_is_deterministic_and_partitions() {
        let items: Vec<u32> = (0..50).collect();
        let first = DatasetSplit::new(items.clone(), &config(42));
        let second = DatasetSplit::new(items.clone(), &config(42));
        assert_eq!(first, second);
        assert_eq!(first.test.len(), 10);
        assert_eq!(first.train.len(), 40);

        let mut all: Vec<u32> = first.train.iter().chain(first.test.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, items);
    }

    #[test]
    fn test_different_seed_changes_order() {
        let items: Vec<u32> = (0..50).collect();
        let a = DatasetSplit::new(items.clone(), &config(42));
        let b = DatasetSplit::new(items, &config(7));
        assert_ne!(a.test, b.test);
    }

    #[test]
    fn test_few_shot_is_bounded_prefix() {
        let split = DatasetSplit::new((0..10).collect::<Vec<u32>>(), &config(42));
        assert_eq!(split.few_shot(3), &split.train[..3]);
        assert_eq!(split.few_shot(100).len(), split.train.len());
    }

    #[test]
    fn test_empty_input() {
        let split = DatasetSplit::<u32>::new(Vec::new(), &config(42));
        assert!(split.is_empty());
        assert!(split.few_shot(3).is_empty());
    }
}
