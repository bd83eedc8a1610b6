//! Rows → feature matrix and label column

use super::preprocessor::Preprocessor;
use crate::data::{col, Row};
use crate::{Error, Result};
use ndarray::Array2;

/// Feature matrix with an optional, row-aligned label column.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensors {
    /// Shape `rows × feat_len`
    pub x: Array2<f32>,
    /// Shape `rows × 1`, present when the rows carry labels
    pub y: Option<Array2<f32>>,
    pub feat_len: usize,
}

impl Tensors {
    pub fn n_rows(&self) -> usize {
        self.x.nrows()
    }

    /// Labels as a flat vector.
    pub fn labels(&self) -> Option<Vec<f32>> {
        self.y.as_ref().map(|y| y.iter().copied().collect())
    }
}

/// Map rows through `pre`, keeping only entirely finite vectors.
///
/// Labels are collected in the same pass. Fails with [`Error::EmptyInput`]
/// when nothing survives and [`Error::ShapeMismatch`] when only some kept
/// rows carry a label.
pub fn tensorize(rows: &[Row], pre: &Preprocessor) -> Result<Tensors> {
    let mut data = Vec::with_capacity(rows.len() * pre.feat_len);
    let mut labels = Vec::with_capacity(rows.len());
    let mut kept = 0usize;

    for row in rows {
        let f = pre.map_row(row);
        if !f.iter().all(|x| x.is_finite()) {
            continue;
        }
        data.extend_from_slice(&f);
        if row.contains(col::SURVIVED) {
            labels.push(row.get(col::SURVIVED).to_number().map_or(f32::NAN, |y| y as f32));
        }
        kept += 1;
    }

    if kept == 0 {
        return Err(Error::EmptyInput(format!("0 of {} rows produced finite features", rows.len())));
    }
    if !labels.is_empty() && labels.len() != kept {
        return Err(Error::ShapeMismatch { expected: vec![kept, 1], actual: vec![labels.len(), 1] });
    }

    let x = Array2::from_shape_vec((kept, pre.feat_len), data)
        .map_err(|_| Error::ShapeMismatch { expected: vec![kept, pre.feat_len], actual: vec![rows.len()] })?;
    let y = if labels.is_empty() {
        None
    } else {
        Some(
            Array2::from_shape_vec((kept, 1), labels)
                .map_err(|_| Error::ShapeMismatch { expected: vec![kept, 1], actual: vec![kept] })?,
        )
    };

    Ok(Tensors { x, y, feat_len: pre.feat_len })
}
