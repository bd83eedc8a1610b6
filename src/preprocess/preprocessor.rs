//! Fitted row → feature-vector mapping
//!
//! Feature layout:
//!
//! | index | feature |
//! | --- | --- |
//! | 0 | age z-score |
//! | 1 | fare z-score |
//! | 2..4 | one-hot sex `[female, male]` |
//! | 4..7 | one-hot class `[1, 2, 3]` |
//! | 7..11 | one-hot port `[C, Q, S, UNKNOWN]` |
//! | 11 | family size (optional) |
//! | 11 or 12 | is alone (optional) |

use super::stats::{mean, median, mode, sample_std};
use crate::data::{col, Row, Value};
use serde::{Deserialize, Serialize};

/// Age used when no training age is available.
pub const DEFAULT_AGE: f64 = 30.0;
/// Port reported when no training port is available.
pub const DEFAULT_PORT: &str = "S";
/// Bucket for rows without a port.
pub const UNKNOWN_PORT: &str = "UNKNOWN";

/// Derived-feature switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureConfig {
    pub family_size: bool,
    pub is_alone: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self { family_size: true, is_alone: true }
    }
}

/// Imputation and scaling statistics learned from the full training set.
///
/// Never refit on validation or test rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preprocessor {
    pub age_median: f64,
    pub port_mode: String,
    pub sex_categories: Vec<String>,
    pub class_categories: Vec<f64>,
    pub port_categories: Vec<String>,
    pub age_mean: f64,
    pub age_std: f64,
    pub fare_mean: f64,
    pub fare_std: f64,
    pub features: FeatureConfig,
    pub feat_len: usize,
}

fn one_hot<T: PartialEq>(value: Option<T>, categories: &[T]) -> impl Iterator<Item = f64> + '_ {
    let hit = value.and_then(|v| categories.iter().position(|c| *c == v));
    (0..categories.len()).map(move |i| if Some(i) == hit { 1.0 } else { 0.0 })
}

fn zscore(x: f64, mean: f64, std: f64) -> f64 {
    if std == 0.0 {
        0.0
    } else {
        (x - mean) / std
    }
}

impl Preprocessor {
    /// Fit statistics on `train`.
    pub fn fit(train: &[Row], features: FeatureConfig) -> Self {
        let ages: Vec<&Value> = train.iter().map(|r| r.get(col::AGE)).collect();
        let ports: Vec<&Value> = train.iter().map(|r| r.get(col::EMBARKED)).collect();

        let age_median = median(&ages).filter(|m| m.is_finite()).unwrap_or(DEFAULT_AGE);
        let port_mode = mode(&ports).unwrap_or_else(|| DEFAULT_PORT.to_string());

        let age_vals: Vec<f64> = ages.iter().map(|v| v.to_number_non_null().unwrap_or(age_median)).collect();
        let fare_vals: Vec<f64> =
            train.iter().map(|r| r.get(col::FARE).to_number_non_null().unwrap_or(0.0)).collect();

        let mut pre = Self {
            age_median,
            port_mode,
            sex_categories: vec!["female".into(), "male".into()],
            class_categories: vec![1.0, 2.0, 3.0],
            port_categories: ["C", "Q", "S", UNKNOWN_PORT].map(String::from).to_vec(),
            age_mean: mean(&age_vals),
            age_std: sample_std(&age_vals),
            fare_mean: mean(&fare_vals),
            fare_std: sample_std(&fare_vals),
            features,
            feat_len: 0,
        };
        pre.feat_len = pre.encode(&Row::new()).len();

        tracing::info!(
            rows = train.len(),
            feat_len = pre.feat_len,
            age_median = pre.age_median,
            port_mode = %pre.port_mode,
            "fitted preprocessor"
        );
        pre
    }

    fn encode(&self, row: &Row) -> Vec<f32> {
        let age = row.get(col::AGE).to_number_non_null().unwrap_or(self.age_median);
        let fare = row.get(col::FARE).to_number_non_null().unwrap_or(0.0);

        let port = match row.get(col::EMBARKED) {
            Value::Null => UNKNOWN_PORT.to_string(),
            Value::Text(s) if s.is_empty() => UNKNOWN_PORT.to_string(),
            other => other.to_string(),
        };
        let sex = row.get(col::SEX).as_text().map(String::from);
        let class = row.get(col::PCLASS).to_number();

        let family = row.get(col::SIBSP).to_number().unwrap_or(0.0)
            + row.get(col::PARCH).to_number().unwrap_or(0.0)
            + 1.0;

        let mut f: Vec<f64> = vec![
            zscore(age, self.age_mean, self.age_std),
            zscore(fare, self.fare_mean, self.fare_std),
        ];
        f.extend(one_hot(sex, &self.sex_categories));
        f.extend(one_hot(class, &self.class_categories));
        f.extend(one_hot(Some(port), &self.port_categories));
        if self.features.family_size {
            f.push(family);
        }
        if self.features.is_alone {
            f.push(if family == 1.0 { 1.0 } else { 0.0 });
        }

        f.into_iter()
            .map(|x| x as f32)
            .map(|x| if x.is_finite() { x } else { 0.0 })
            .collect()
    }

    /// Feature vector of exactly `feat_len` finite entries.
    pub fn map_row(&self, row: &Row) -> Vec<f32> {
        let mut v = self.encode(row);
        v.resize(self.feat_len, 0.0);
        v
    }

    /// Human-readable description of the fitted state.
    pub fn summary(&self) -> Vec<String> {
        vec![
            format!("Features: {}", self.feat_len),
            format!("Impute Age median={} | Embarked mode={}", self.age_median, self.port_mode),
            format!(
                "One-hot: Sex, Pclass, Embarked | Engineered: FamilySize={}, IsAlone={}",
                self.features.family_size, self.features.is_alone
            ),
        ]
    }
}
