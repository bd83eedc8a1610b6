//! Summary statistics used when fitting the preprocessor

use crate::data::Value;
use std::collections::HashMap;

/// Median of the values that coerce to a number; nulls are skipped.
pub fn median(values: &[&Value]) -> Option<f64> {
    let mut xs: Vec<f64> = values.iter().filter_map(|v| v.to_number_non_null()).collect();
    if xs.is_empty() {
        return None;
    }
    xs.sort_by(f64::total_cmp);
    let m = xs.len() / 2;
    Some(if xs.len() % 2 == 1 { xs[m] } else { (xs[m - 1] + xs[m]) / 2.0 })
}

/// Most frequent non-empty value; ties go to the value that reached the
/// winning count first.
pub fn mode(values: &[&Value]) -> Option<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut best: Option<String> = None;
    let mut best_count = 0;
    for v in values {
        if v.is_null() || v.as_text() == Some("") {
            continue;
        }
        let key = v.to_string();
        let c = counts.entry(key.clone()).or_insert(0);
        *c += 1;
        if *c > best_count {
            best_count = *c;
            best = Some(key);
        }
    }
    best
}

/// Mean over finite values; 0 for none.
pub fn mean(xs: &[f64]) -> f64 {
    let finite: Vec<f64> = xs.iter().copied().filter(|x| x.is_finite()).collect();
    if finite.is_empty() {
        return 0.0;
    }
    finite.iter().sum::<f64>() / finite.len() as f64
}

/// Sample standard deviation (n - 1) over finite values; 0 below two values.
pub fn sample_std(xs: &[f64]) -> f64 {
    let finite: Vec<f64> = xs.iter().copied().filter(|x| x.is_finite()).collect();
    if finite.len() < 2 {
        return 0.0;
    }
    let m = mean(&finite);
    let ss: f64 = finite.iter().map(|x| (x - m).powi(2)).sum();
    (ss / (finite.len() - 1) as f64).sqrt()
}
