//! Sample parsing with lenient numeric handling
//!
//! Text tokens are read with leading-prefix float semantics (`"12.5mm"` is 12.5)
//! and anything that is not a finite number is dropped without error.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::entities::limits::parse_leading_float;
use crate::input::diagnostics::InputError;

/// Parse a free-text, comma-separated list of samples
pub fn parse_sample_list(text: &str) -> Vec<f64> {
    text.split(',').filter_map(parse_token).collect()
}

/// Read every cell of a CSV source, row by row, keeping numeric cells
///
/// There is no header row and rows may have different widths.
pub fn read_samples_csv<R: Read>(reader: R) -> Result<Vec<f64>, InputError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    for record in rdr.records() {
        let record = record?;
        samples.extend(record.iter().filter_map(parse_token));
    }
    Ok(samples)
}

/// Read samples from a data file, dispatching on its extension
pub fn read_samples_file(path: &Path) -> Result<Vec<f64>, InputError> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" | "txt" => {
            let file = File::open(path).map_err(|source| InputError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let samples = read_samples_csv(file)?;
            tracing::debug!(path = %path.display(), count = samples.len(), "read samples");
            Ok(samples)
        }
        "xlsx" => {
            let samples = read_samples_xlsx(path)?;
            tracing::debug!(path = %path.display(), count = samples.len(), "read samples");
            Ok(samples)
        }
        _ => Err(InputError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Read every cell of the first worksheet, row by row, keeping numeric cells
///
/// Text cells go through the same lenient parsing as typed input. A workbook
/// without worksheets yields no samples.
pub fn read_samples_xlsx(path: &Path) -> Result<Vec<f64>, InputError> {
    let spreadsheet_err = |source| InputError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(spreadsheet_err)?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(spreadsheet_err)?,
        None => return Ok(Vec::new()),
    };

    Ok(range
        .rows()
        .flat_map(|row| row.iter().filter_map(parse_cell))
        .collect())
}

fn parse_cell(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(value) => Some(*value),
        Data::Int(value) => Some(*value as f64),
        Data::String(text) => parse_token(text),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

fn parse_token(token: &str) -> Option<f64> {
    parse_leading_float(token.trim()).filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_sample_list() {
        assert_eq!(parse_sample_list("10, 12 ,14"), vec![10.0, 12.0, 14.0]);
    }

    #[test]
    fn test_parse_sample_list_filters_garbage() {
        assert_eq!(
            parse_sample_list("5, abc, , 7.5mm, -2, Infinity"),
            vec![5.0, 7.5, -2.0]
        );
        assert!(parse_sample_list("").is_empty());
    }

    #[test]
    fn test_read_samples_csv_flattens_rows() {
        let data = "id,value\n1,10.5\n2,11\n3,n/a,12\n";
        let samples = read_samples_csv(data.as_bytes()).unwrap();
        assert_eq!(samples, vec![1.0, 10.5, 2.0, 11.0, 3.0, 12.0]);
    }

    #[test]
    fn test_read_samples_file_csv() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("batch.CSV");
        fs::write(&path, "5\n15\n25\n").unwrap();
        assert_eq!(read_samples_file(&path).unwrap(), vec![5.0, 15.0, 25.0]);
    }

    #[test]
    fn test_read_samples_file_xlsx_first_sheet() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/batch.xlsx");
        assert_eq!(
            read_samples_file(&path).unwrap(),
            vec![1.0, 10.5, 2.0, 11.0, 3.0, 12.0, 4.0, 25.0]
        );
    }

    #[test]
    fn test_read_samples_xlsx_corrupt() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("batch.xlsx");
        fs::write(&path, "not a zip archive").unwrap();
        assert!(matches!(
            read_samples_file(&path),
            Err(InputError::Spreadsheet { .. })
        ));
    }

    #[test]
    fn test_read_samples_file_unsupported() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("batch.pdf");
        fs::write(&path, "binary").unwrap();
        assert!(matches!(
            read_samples_file(&path),
            Err(InputError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_read_samples_file_missing() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            read_samples_file(&tmp.path().join("nope.csv")),
            Err(InputError::Io { .. })
        ));
    }
}
