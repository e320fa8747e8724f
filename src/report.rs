//! CSV persistence of sweep results.

use std::{io, path::Path};

use thiserror::Error;

use crate::sweep::SweepRow;

/// Errors produced while persisting sweep results.
#[derive(Debug, Error)]
pub enum ReportError {
  /// The sink could not be written.
  #[error("failed to write sweep results: {0}")]
  Io(#[from] io::Error),
  /// A row could not be serialized.
  #[error("failed to serialize sweep row: {0}")]
  Csv(#[from] csv::Error),
}

/// Writes all sweep rows to `path` as a flat table with the header
/// `seed,cxpb,mutpb,earliest_gen_of_max_value,max_value`, one row per
/// finished run. The table is written once, after the whole sweep completed.
pub fn write_csv<P: AsRef<Path>>(
  path: P,
  rows: &[SweepRow],
) -> Result<(), ReportError> {
  let mut writer = csv::Writer::from_path(path)?;
  for row in rows {
    writer.serialize(row)?;
  }
  writer.flush()?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;

  fn row(seed: u64, cxpb: f64, earliest_gen: usize) -> SweepRow {
    SweepRow {
      seed,
      cxpb,
      mutpb: 1.0 - cxpb,
      earliest_gen,
      max_value: 123.456,
    }
  }

  #[test]
  fn test_written_table_matches_the_consumer_contract() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sweep.csv");
    write_csv(&path, &[row(1, 0.0, 17), row(2, 0.5, 3)]).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
      lines.next(),
      Some("seed,cxpb,mutpb,earliest_gen_of_max_value,max_value")
    );
    // probabilities are rendered with one decimal digit
    assert_eq!(lines.next(), Some("1,0.0,1.0,17,123.456"));
    assert_eq!(lines.next(), Some("2,0.5,0.5,3,123.456"));
    assert_eq!(lines.next(), None);
  }

  #[test]
  fn test_rows_survive_a_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sweep.csv");
    let rows = vec![row(1, 0.3, 42)];
    write_csv(&path, &rows).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let read: Vec<SweepRow> =
      reader.deserialize().collect::<Result<_, _>>().unwrap();
    assert_eq!(read, rows);
  }

  #[test]
  fn test_unwritable_paths_report_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("sweep.csv");
    assert!(write_csv(&path, &[row(1, 0.1, 0)]).is_err());
  }
}
