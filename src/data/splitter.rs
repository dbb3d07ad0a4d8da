// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles rows with a seeded RNG and splits them into:
//   - Training set: what the scaler and regressor are fitted on
//   - Test set:     held out for the evaluation metrics
//
// The split must be reproducible: retraining from the same CSV
// with the same seed yields the same artifacts. That is why the
// RNG is StdRng::seed_from_u64 rather than thread_rng().
//
// Sizes: test = ceil(n * test_fraction), train = the rest.
// The test rows are the first `test` entries of the shuffled
// permutation.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `samples` with `seed` and split into (train, test).
///
/// # Example
/// ```
/// use gpa_predictor::data::splitter::split_train_test;
/// let (train, test) = split_train_test((0..10).collect::<Vec<_>>(), 0.2, 42);
/// assert_eq!((train.len(), test.len()), (8, 2));
/// ```
pub fn split_train_test<T>(mut samples: Vec<T>, test_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total = samples.len();
    let n_test = test_size(total, test_fraction);

    // split_off(n) keeps [0..n) in `samples` and returns [n..total)
    let train = samples.split_off(n_test);
    let test = samples;

    tracing::debug!(
        "Dataset split: {} train, {} test (seed {})",
        train.len(),
        test.len(),
        seed
    );

    (train, test)
}

/// Number of rows held out for testing.
pub fn test_size(total: usize, test_fraction: f64) -> usize {
    let fraction = test_fraction.clamp(0.0, 1.0);
    ((total as f64) * fraction).ceil().min(total as f64) as usize
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, test) = split_train_test(items, 0.2, 42);
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 20);
    }

    #[test]
    fn test_test_size_rounds_up() {
        // 2 rows at 20% → 1 test row, matching the two-row training scenario
        assert_eq!(test_size(2, 0.2), 1);
        assert_eq!(test_size(11, 0.2), 3);
        assert_eq!(test_size(0, 0.2), 0);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (mut train, test) = split_train_test(items, 0.3, 7);
        train.extend(test);
        train.sort_unstable();
        assert_eq!(train, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = split_train_test((0..30).collect::<Vec<usize>>(), 0.2, 42);
        let b = split_train_test((0..30).collect::<Vec<usize>>(), 0.2, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_dataset() {
        let (train, test) = split_train_test(Vec::<usize>::new(), 0.2, 42);
        assert!(train.is_empty());
        assert!(test.is_empty());
    }

    #[test]
    fn test_zero_fraction_keeps_everything_for_training() {
        let (train, test) = split_train_test((0..10).collect::<Vec<usize>>(), 0.0, 1);
        assert_eq!(train.len(), 10);
        assert!(test.is_empty());
    }
}
