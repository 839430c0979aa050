use crate::constants::{DONE_SENTINEL, EXPECTED_HEADER};
use crate::error::{AdjacencyError, Result};
use crate::shape::GridShape;

use csv::{ReaderBuilder, StringRecord, Trim};
use num_bigint::BigInt;
use std::io::Read;
use std::path::Path;

/// One data line of a dense table file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// 1-indexed line number in the file
    pub row: usize,
    pub occupied: u64,
    pub adjacency: u64,
    /// signed so negative counts reach the data checks
    pub count: BigInt,
}

/// Dense table as read from disk, before any data-correctness check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub shape: GridShape,
    pub rows: Vec<TableRow>,
}

/// Reads a dense table file
///
/// # Errors
/// Returns error if the file cannot be read, the `.DONE.` sentinel or the
/// `r,c,o,a,count` header is missing, a row is malformed, or rows disagree
/// on `(r,c)`.
pub fn read_dense_table<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let file = std::fs::File::open(path)?;
    read_dense_table_from_reader(file)
}

pub fn read_dense_table_from_reader<R: Read>(mut reader: R) -> Result<RawTable> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    let body = strip_sentinel(&content)?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        // header must match literally
        .trim(Trim::Fields)
        .flexible(true)
        .from_reader(body.as_bytes());

    validate_header(&mut rdr)?;

    let mut shape: Option<GridShape> = None;
    let mut rows = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        // blank lines are skipped by the reader, so count file lines instead
        let row = rec
            .position()
            .map_or(i + 2, |pos| pos.line() as usize);
        if rec.len() != EXPECTED_HEADER.len() {
            return Err(AdjacencyError::CsvRow {
                row,
                got: rec.len(),
            });
        }

        let r = parse_int(&rec, 0, row)?;
        let c = parse_int(&rec, 1, row)?;
        match shape {
            None => shape = Some(GridShape::new(r, c)?),
            Some(s) if s.rows() != r || s.cols() != c => {
                return Err(AdjacencyError::MixedShape { row, rows: r, cols: c });
            }
            Some(_) => {}
        }

        rows.push(TableRow {
            row,
            occupied: parse_int(&rec, 2, row)?,
            adjacency: parse_int(&rec, 3, row)?,
            count: parse_count(&rec, row)?,
        });
    }

    let shape = shape.ok_or(AdjacencyError::EmptyTable)?;
    Ok(RawTable { shape, rows })
}

/// Returns everything before the sentinel line, ignoring trailing blank lines
fn strip_sentinel(content: &str) -> Result<&str> {
    let trimmed = content.trim_end();
    let (body, last) = match trimmed.rfind('\n') {
        Some(idx) => (&trimmed[..idx], &trimmed[idx + 1..]),
        None => ("", trimmed),
    };
    if last.trim() != DONE_SENTINEL {
        return Err(AdjacencyError::MissingSentinel);
    }
    Ok(body)
}

fn validate_header<R: Read>(csv_reader: &mut csv::Reader<R>) -> Result<()> {
    let headers = csv_reader
        .headers()
        .map_err(|e| AdjacencyError::CsvHeader(format!("Failed to read headers: {}", e)))?;

    if headers.len() == 0 {
        return Err(AdjacencyError::CsvHeader("Missing header line".to_string()));
    }

    if !headers.iter().eq(EXPECTED_HEADER) {
        return Err(AdjacencyError::CsvHeader(format!(
            "Expected '{}', found '{}'",
            EXPECTED_HEADER.join(","),
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    Ok(())
}

fn parse_int(rec: &StringRecord, column: usize, row: usize) -> Result<u64> {
    let value = &rec[column];
    value.parse().map_err(|source| AdjacencyError::IntParse {
        row,
        value: value.to_string(),
        source,
    })
}

fn parse_count(rec: &StringRecord, row: usize) -> Result<BigInt> {
    let value = &rec[4];
    value.parse().map_err(|source| AdjacencyError::CountParse {
        row,
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> Result<RawTable> {
        read_dense_table_from_reader(text.as_bytes())
    }

    #[test]
    fn test_reads_rows() {
        let raw = read("r,c,o,a,count\n1,1,0,0,1\n1,1,1,0,1\n.DONE.\n").unwrap();
        assert_eq!(raw.shape, GridShape::new(1, 1).unwrap());
        assert_eq!(raw.rows.len(), 2);
        assert_eq!(raw.rows[1].row, 3);
        assert_eq!(raw.rows[1].occupied, 1);
        assert_eq!(raw.rows[1].count, BigInt::from(1));
    }

    #[test]
    fn test_trailing_blank_lines_allowed() {
        assert!(read("r,c,o,a,count\n1,1,0,0,1\n1,1,1,0,1\n.DONE.\n\n\n").is_ok());
    }

    #[test]
    fn test_missing_sentinel() {
        let err = read("r,c,o,a,count\n1,1,0,0,1\n1,1,1,0,1\n").unwrap_err();
        assert!(matches!(err, AdjacencyError::MissingSentinel));
        assert!(matches!(read(""), Err(AdjacencyError::MissingSentinel)));
    }

    #[test]
    fn test_bad_header() {
        let err = read("r,c,o,adj,count\n1,1,0,0,1\n.DONE.\n").unwrap_err();
        assert!(matches!(err, AdjacencyError::CsvHeader(_)));
        assert!(err.to_string().contains("r,c,o,adj,count"));
    }

    #[test]
    fn test_padded_header_rejected() {
        let err = read(" r , c ,o,a,count\n1,1,0,0,1\n1,1,1,0,1\n.DONE.\n").unwrap_err();
        assert!(matches!(err, AdjacencyError::CsvHeader(_)));
    }

    #[test]
    fn test_data_fields_are_trimmed() {
        let raw = read("r,c,o,a,count\n1, 1,0 ,0,1\n1,1,1,0, 1\n.DONE.\n").unwrap();
        assert_eq!(raw.rows[1].count, BigInt::from(1));
    }

    #[test]
    fn test_row_numbers_count_blank_lines() {
        let err = read("r,c,o,a,count\n1,1,0,0,1\n\n\n1,1,x,0,1\n.DONE.\n").unwrap_err();
        assert!(matches!(err, AdjacencyError::IntParse { row: 5, .. }), "{err:?}");
    }

    #[test]
    fn test_sentinel_only_has_no_header() {
        let err = read(".DONE.\n").unwrap_err();
        assert!(matches!(err, AdjacencyError::CsvHeader(_)));
    }

    #[test]
    fn test_header_without_rows() {
        let err = read("r,c,o,a,count\n.DONE.\n").unwrap_err();
        assert!(matches!(err, AdjacencyError::EmptyTable));
    }

    #[test]
    fn test_mixed_shape() {
        let err = read("r,c,o,a,count\n1,2,0,0,1\n2,1,1,0,2\n.DONE.\n").unwrap_err();
        assert!(matches!(
            err,
            AdjacencyError::MixedShape {
                row: 3,
                rows: 2,
                cols: 1
            }
        ));
    }

    #[test]
    fn test_short_row() {
        let err = read("r,c,o,a,count\n1,2,0,0\n.DONE.\n").unwrap_err();
        assert!(matches!(err, AdjacencyError::CsvRow { row: 2, got: 4 }));
    }

    #[test]
    fn test_non_numeric_field() {
        let err = read("r,c,o,a,count\n1,2,x,0,1\n.DONE.\n").unwrap_err();
        assert!(matches!(err, AdjacencyError::IntParse { row: 2, .. }));
    }

    #[test]
    fn test_negative_count_is_parsed() {
        let raw = read("r,c,o,a,count\n1,1,0,0,-3\n.DONE.\n").unwrap();
        assert_eq!(raw.rows[0].count, BigInt::from(-3));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let err = read("r,c,o,a,count\n0,2,0,0,1\n.DONE.\n").unwrap_err();
        assert!(matches!(err, AdjacencyError::InvalidShape { .. }));
    }

    #[test]
    fn test_huge_count() {
        let raw = read("r,c,o,a,count\n1,1,0,0,340282366920938463463374607431768211457\n.DONE.\n")
            .unwrap();
        assert!(raw.rows[0].count > BigInt::from(u128::MAX));
    }
}
