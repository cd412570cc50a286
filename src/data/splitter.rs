// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Shuffles samples with a seeded RNG and splits them into a
// training set and a validation set. The seed makes a given
// split reproducible across runs, so a tuning sweep compares
// candidates on the same validation data.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffle `samples` and split into (train, validation).
///
/// `train_fraction` is the proportion kept for training,
/// e.g. 0.8 keeps 80%.
pub fn split_train_val<T>(
    mut samples:    Vec<T>,
    train_fraction: f64,
    seed:           u64,
) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total    = samples.len();
    let split_at = ((total as f64) * train_fraction).round() as usize;
    let split_at = split_at.min(total);

    let val = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation (seed {})",
        samples.len(),
        val.len(),
        seed,
    );

    (samples, val)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, val) = split_train_val(items, 0.8, 42);
        assert_eq!(train.len(), 80);
        assert_eq!(val.len(), 20);
    }

    #[test]
    fn test_no_items_lost() {
        let items: Vec<usize> = (0..53).collect();
        let (train, val) = split_train_val(items, 0.7, 42);
        let mut all: Vec<usize> = train.into_iter().chain(val).collect();
        all.sort();
        assert_eq!(all, (0..53).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = split_train_val((0..40).collect::<Vec<_>>(), 0.8, 7);
        let b = split_train_val((0..40).collect::<Vec<_>>(), 0.8, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_usually_differs() {
        let a = split_train_val((0..40).collect::<Vec<_>>(), 0.8, 7);
        let b = split_train_val((0..40).collect::<Vec<_>>(), 0.8, 8);
        assert_ne!(a.0, b.0);
    }

    #[test]
    fn test_empty_input() {
        let (train, val) = split_train_val(Vec::<usize>::new(), 0.8, 42);
        assert!(train.is_empty());
        assert!(val.is_empty());
    }

    #[test]
    fn test_full_training_fraction() {
        let (train, val) = split_train_val((0..10).collect::<Vec<_>>(), 1.0, 42);
        assert_eq!(train.len(), 10);
        assert!(val.is_empty());
    }
}
