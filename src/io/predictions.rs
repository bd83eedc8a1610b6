//! Prediction files for the test set
//!
//! - `submission.csv`: `PassengerId,Survived` with 0/1 at the threshold
//! - `probabilities.csv`: `PassengerId,ProbSurvived`

use crate::data::{col, Row};
use crate::{Error, Result};
use csv::{QuoteStyle, WriterBuilder};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const SUBMISSION_FILE: &str = "submission.csv";
pub const PROBABILITIES_FILE: &str = "probabilities.csv";

/// Paths of the files written by [`write_predictions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionFiles {
    pub submission: PathBuf,
    pub probabilities: PathBuf,
    pub rows: usize,
}

fn csv_err(e: csv::Error) -> Error {
    Error::Io(format!("CSV write failed: {e}"))
}

fn write_table<W: Write>(out: W, header: [&str; 2], records: impl Iterator<Item = [String; 2]>) -> Result<()> {
    let mut wtr = WriterBuilder::new().quote_style(QuoteStyle::Necessary).from_writer(out);
    wtr.write_record(header).map_err(csv_err)?;
    for record in records {
        wtr.write_record(&record).map_err(csv_err)?;
    }
    wtr.flush()?;
    Ok(())
}

fn ids(rows: &[Row]) -> impl Iterator<Item = String> + '_ {
    rows.iter().map(|r| r.get(col::PASSENGER_ID).to_string())
}

fn check_lengths(rows: &[Row], probs: &[f32]) -> Result<()> {
    if rows.len() != probs.len() {
        return Err(Error::ShapeMismatch { expected: vec![rows.len()], actual: vec![probs.len()] });
    }
    Ok(())
}

/// `PassengerId,Survived` where survived is `prob >= threshold`.
pub fn write_submission<W: Write>(out: W, rows: &[Row], probs: &[f32], threshold: f32) -> Result<()> {
    check_lengths(rows, probs)?;
    let records = ids(rows).zip(probs).map(|(id, &p)| [id, u8::from(p >= threshold).to_string()]);
    write_table(out, [col::PASSENGER_ID, "Survived"], records)
}

/// `PassengerId,ProbSurvived` with the raw probability.
pub fn write_probabilities<W: Write>(out: W, rows: &[Row], probs: &[f32]) -> Result<()> {
    check_lengths(rows, probs)?;
    let records = ids(rows).zip(probs).map(|(id, p)| [id, p.to_string()]);
    write_table(out, [col::PASSENGER_ID, "ProbSurvived"], records)
}

/// Write both files into `dir`. Returns `None` and writes nothing when there
/// are no test rows.
pub fn write_predictions(
    dir: impl AsRef<Path>,
    rows: &[Row],
    probs: &[f32],
    threshold: f32,
) -> Result<Option<PredictionFiles>> {
    if rows.is_empty() {
        tracing::warn!("no test rows; prediction files not written");
        return Ok(None);
    }
    check_lengths(rows, probs)?;

    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(|e| Error::Io(format!("Failed to create {}: {e}", dir.display())))?;
    let create = |name: &str| {
        let path = dir.join(name);
        std::fs::File::create(&path)
            .map(|f| (path.clone(), f))
            .map_err(|e| Error::Io(format!("Failed to create {}: {e}", path.display())))
    };

    let (submission, f) = create(SUBMISSION_FILE)?;
    write_submission(f, rows, probs, threshold)?;
    let (probabilities, f) = create(PROBABILITIES_FILE)?;
    write_probabilities(f, rows, probs)?;

    tracing::info!(rows = rows.len(), dir = %dir.display(), threshold, "wrote prediction files");
    Ok(Some(PredictionFiles { submission, probabilities, rows: rows.len() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Value;

    fn rows() -> Vec<Row> {
        vec![
            Row::new().with(col::PASSENGER_ID, 892),
            Row::new().with(col::PASSENGER_ID, "a,b"),
            Row::new().with(col::PASSENGER_ID, "say \"hi\""),
            Row::new().with(col::PASSENGER_ID, Value::Null),
        ]
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_submission_escaping_and_threshold() {
        let probs = [0.5, 0.49, 0.9, 0.1];
        let out = render(|b| write_submission(b, &rows(), &probs, 0.5));
        assert_eq!(out, "PassengerId,Survived\n892,1\n\"a,b\",0\n\"say \"\"hi\"\"\",1\n,0\n");
    }

    #[test]
    fn test_probabilities_file() {
        let probs = [0.25, 0.5, 0.75, 1.0];
        let out = render(|b| write_probabilities(b, &rows(), &probs));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "PassengerId,ProbSurvived");
        assert_eq!(lines[1], "892,0.25");
        assert_eq!(lines[4], ",1");
    }

    #[test]
    fn test_length_mismatch() {
        let mut buf = Vec::new();
        let err = write_submission(&mut buf, &rows(), &[0.1], 0.5).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_write_predictions_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let files = write_predictions(&out, &rows(), &[0.9, 0.1, 0.6, 0.4], 0.5).unwrap().unwrap();
        assert_eq!(files.rows, 4);
        let sub = std::fs::read_to_string(&files.submission).unwrap();
        assert!(sub.starts_with("PassengerId,Survived\n892,1\n"));
        assert!(files.probabilities.ends_with(PROBABILITIES_FILE));
    }

    #[test]
    fn test_no_test_rows_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(write_predictions(dir.path(), &[], &[], 0.5).unwrap(), None);
        assert!(!dir.path().join(SUBMISSION_FILE).exists());
    }
}
