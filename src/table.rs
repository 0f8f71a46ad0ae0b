//! Tabular input/output helpers over polars DataFrames

use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Read a CSV file with a header row
pub fn read_csv(path: &Path) -> PolarsResult<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    log::debug!(
        "Read {}: {} rows, {} columns",
        path.display(),
        df.height(),
        df.width()
    );
    Ok(df)
}

/// Write a DataFrame as CSV with a header row, overwriting `path`
pub fn write_csv(df: &mut DataFrame, path: &Path) -> PolarsResult<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)
}

/// Read a numeric column as nullable f64 values
///
/// Integer and numeric-text columns are cast strictly: a missing column, or any
/// non-null cell that does not parse as a number, is an error. Only nulls
/// become `None`.
pub fn column_f64(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let column = df.column(name)?.strict_cast(&DataType::Float64)?;
    let values = column.as_materialized_series().f64()?.into_iter().collect();
    Ok(values)
}

/// Same as `column_f64` with nulls mapped to NaN
pub fn column_f64_or_nan(df: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
    Ok(column_f64(df, name)?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_f64_casts_integers() {
        let df = df! {
            "a" => [1i32, 2, 3],
            "b" => [Some(1.5), None, Some(2.5)],
        }
        .unwrap();

        assert_eq!(
            column_f64(&df, "a").unwrap(),
            vec![Some(1.0), Some(2.0), Some(3.0)]
        );
        assert_eq!(column_f64(&df, "b").unwrap(), vec![Some(1.5), None, Some(2.5)]);

        let with_nan = column_f64_or_nan(&df, "b").unwrap();
        assert!(with_nan[1].is_nan());
    }

    #[test]
    fn test_column_f64_rejects_text() {
        let df = df! {
            "numeric_text" => [Some("1.5"), None],
            "words" => [Some("abc"), Some("2")],
        }
        .unwrap();

        assert_eq!(column_f64(&df, "numeric_text").unwrap(), vec![Some(1.5), None]);
        assert!(column_f64(&df, "words").is_err());
        assert!(column_f64_or_nan(&df, "words").is_err());
    }

    #[test]
    fn test_column_f64_missing_column() {
        let df = df! { "a" => [1i32] }.unwrap();
        assert!(column_f64(&df, "z").is_err());
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");

        let mut df = df! {
            "id" => [0u32, 1],
            "Temperature" => [21.5, 19.0],
        }
        .unwrap();
        write_csv(&mut df, &path).unwrap();

        let read = read_csv(&path).unwrap();
        assert_eq!(read.height(), 2);
        assert_eq!(
            column_f64(&read, "Temperature").unwrap(),
            vec![Some(21.5), Some(19.0)]
        );
    }
}
