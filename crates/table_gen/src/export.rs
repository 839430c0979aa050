use crate::error::{Result, TableGenError};
use adjacency::{DenseTable, GridShape, write_dense_table};
use chrono::Local;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// `<r>.<c>.csv` and its `<r>.<c>.DONE` marker inside `dir`
pub fn table_paths(dir: &Path, shape: GridShape) -> (PathBuf, PathBuf) {
    let base = format!("{}.{}", shape.rows(), shape.cols());
    (dir.join(format!("{base}.csv")), dir.join(format!("{base}.DONE")))
}

/// True once a table for `shape` has been completely written to `dir`
pub fn is_done(dir: &Path, shape: GridShape) -> bool {
    table_paths(dir, shape).1.exists()
}

/// Writes `table` to `dir` and then its completion marker
pub fn export_table_with_path(table: &DenseTable, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| TableGenError::CreateDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let (csv_path, done_path) = table_paths(dir, table.shape());

    let file = File::create(&csv_path).map_err(|e| TableGenError::CreateFile {
        path: csv_path.clone(),
        source: e,
    })?;
    write_dense_table(table, BufWriter::new(file))?;

    let timestamp = Local::now().to_rfc3339();
    let mut marker = File::create(&done_path).map_err(|e| TableGenError::CreateFile {
        path: done_path.clone(),
        source: e,
    })?;
    writeln!(marker, "finished_at={timestamp}").map_err(|e| TableGenError::WriteFile {
        path: done_path.clone(),
        source: e,
    })?;

    Ok(csv_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adjacency::{compute_table, verify::verify_csv_file};
    use tempfile::TempDir;

    #[test]
    fn test_table_paths() {
        let shape = GridShape::new(3, 7).unwrap();
        let (csv, done) = table_paths(Path::new("out"), shape);
        assert_eq!(csv, PathBuf::from("out/3.7.csv"));
        assert_eq!(done, PathBuf::from("out/3.7.DONE"));
    }

    #[test]
    fn test_export_writes_table_and_marker() {
        let temp_dir = TempDir::new().unwrap();
        let shape = GridShape::new(2, 3).unwrap();
        assert!(!is_done(temp_dir.path(), shape));

        let table = compute_table(shape).unwrap();
        let path = export_table_with_path(&table, temp_dir.path()).unwrap();

        assert!(is_done(temp_dir.path(), shape));
        assert_eq!(verify_csv_file(&path).unwrap(), table);

        let marker = std::fs::read_to_string(temp_dir.path().join("2.3.DONE")).unwrap();
        assert!(marker.starts_with("finished_at="));
    }

    #[test]
    fn test_export_creates_nested_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let table = compute_table(GridShape::new(1, 2).unwrap()).unwrap();

        let path = export_table_with_path(&table, &nested).unwrap();
        assert!(path.starts_with(&nested));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("r,c,o,a,count\n"));
        assert!(content.ends_with(".DONE.\n"));
    }

    #[test]
    fn test_invalid_output_directory() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let table = compute_table(GridShape::new(1, 1).unwrap()).unwrap();

        let result = export_table_with_path(&table, &blocker.join("sub"));
        assert!(matches!(result, Err(TableGenError::CreateDir { .. })));
    }
}
