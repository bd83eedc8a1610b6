//! Stratified train/validation split

use super::row::Row;
use rand::seq::SliceRandom;
use rand::Rng;

/// Disjoint train and validation rows.
#[derive(Debug, Clone, Default)]
pub struct SplitResult {
    pub train: Vec<Row>,
    pub val: Vec<Row>,
}

/// Validation rows taken from a class of `n` rows.
pub fn val_count(n: usize, ratio: f64) -> usize {
    if n == 0 {
        return 0;
    }
    ((n as f64 * ratio).floor() as usize).clamp(1, n)
}

/// Split labeled rows so each class keeps its share in validation.
///
/// Rows whose label coerces to exactly 0 or 1 take part; a present-but-null
/// label counts as 0. Each non-empty class gives `max(1, floor(n * ratio))`
/// rows to validation. Both outputs are shuffled.
pub fn stratified_split<R: Rng + ?Sized>(rows: &[Row], ratio: f64, rng: &mut R) -> SplitResult {
    let (mut negatives, mut positives): (Vec<Row>, Vec<Row>) = (Vec::new(), Vec::new());
    for row in rows {
        match row.label() {
            Some(y) if y == 0.0 => negatives.push(row.clone()),
            Some(y) if y == 1.0 => positives.push(row.clone()),
            _ => {}
        }
    }

    let mut out = SplitResult::default();
    for mut group in [negatives, positives] {
        group.shuffle(rng);
        let n_val = val_count(group.len(), ratio);
        let rest = group.split_off(n_val);
        out.val.extend(group);
        out.train.extend(rest);
    }
    out.train.shuffle(rng);
    out.val.shuffle(rng);

    tracing::debug!(train = out.train.len(), val = out.val.len(), ratio, "stratified split");
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::data::row::col;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    fn ids(rows: &[Row]) -> BTreeSet<String> {
        rows.iter().map(|r| r.get(col::PASSENGER_ID).to_string()).collect()
    }

    proptest! {
        #[test]
        fn split_is_a_stratified_partition(
            labels in proptest::collection::vec(0u8..2, 0..200),
            ratio in 0.05f64..0.95,
            seed in any::<u64>(),
        ) {
            let rows: Vec<Row> = labels
                .iter()
                .enumerate()
                .map(|(i, &y)| Row::new().with(col::PASSENGER_ID, i as i32).with(col::SURVIVED, i32::from(y)))
                .collect();
            let split = stratified_split(&rows, ratio, &mut StdRng::seed_from_u64(seed));

            for class in [0u8, 1] {
                let n = labels.iter().filter(|&&y| y == class).count();
                let in_val = split.val.iter().filter(|r| r.label() == Some(f64::from(class))).count();
                prop_assert_eq!(in_val, val_count(n, ratio));
            }

            let train = ids(&split.train);
            let val = ids(&split.val);
            prop_assert!(train.is_disjoint(&val));
            prop_assert_eq!(train.len() + val.len(), rows.len());
        }
    }
}
