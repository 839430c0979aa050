use adjacency::{FileVerifier, GridShape, SubprocessVerifier, compute_table, write_dense_table};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_table(dir: &Path, r: u64, c: u64) -> PathBuf {
    let table = compute_table(GridShape::new(r, c).unwrap()).unwrap();
    let path = dir.join(format!("{r}.{c}.csv"));
    let file = BufWriter::new(File::create(&path).unwrap());
    write_dense_table(&table, file).unwrap();
    path
}

fn verify_bounds(config: &Path) -> SubprocessVerifier {
    let mut verifier = SubprocessVerifier::new(env!("CARGO_BIN_EXE_verify_bounds"));
    verifier.args = vec!["--config".to_string(), config.display().to_string()];
    verifier
}

#[test]
fn verify_bounds_exit_codes() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("missing.toml");

    let good = write_table(dir.path(), 2, 3);
    assert_eq!(verify_bounds(&config).verify(&good).unwrap(), 0);

    // every pair on a 1x3 path recorded as non-adjacent
    let fake = dir.path().join("1.3.csv");
    fs::write(
        &fake,
        "r,c,o,a,count\n\
         1,3,0,0,1\n1,3,0,1,0\n1,3,0,2,0\n\
         1,3,1,0,3\n1,3,1,1,0\n1,3,1,2,0\n\
         1,3,2,0,3\n1,3,2,1,0\n1,3,2,2,0\n\
         1,3,3,0,0\n1,3,3,1,0\n1,3,3,2,1\n.DONE.\n",
    )
    .unwrap();
    assert_eq!(verify_bounds(&config).verify(&fake).unwrap(), 1);

    let truncated = dir.path().join("9.9.csv");
    fs::write(&truncated, "r,c,o,a,count\n9,9,0,0,1\n").unwrap();
    assert_eq!(verify_bounds(&config).verify(&truncated).unwrap(), 2);
}

#[test]
fn verify_bounds_broken_config_is_bad_data() {
    let dir = TempDir::new().unwrap();
    let good = write_table(dir.path(), 2, 2);

    let unparsable = dir.path().join("unparsable.toml");
    fs::write(&unparsable, "[verify\nmax_show = ").unwrap();
    assert_eq!(verify_bounds(&unparsable).verify(&good).unwrap(), 2);

    let invalid = dir.path().join("invalid.toml");
    fs::write(&invalid, "[verify]\nmax_show = 0\n").unwrap();
    assert_eq!(verify_bounds(&invalid).verify(&good).unwrap(), 2);
}

#[test]
fn verify_csv_exit_codes() {
    let dir = TempDir::new().unwrap();
    let verifier = SubprocessVerifier::new(env!("CARGO_BIN_EXE_verify_csv"));

    let good = write_table(dir.path(), 3, 3);
    assert_eq!(verifier.verify(&good).unwrap(), 0);

    let padded = dir.path().join("1.1.csv");
    fs::write(&padded, " r , c ,o,a,count\n1,1,0,0,1\n1,1,1,0,1\n.DONE.\n").unwrap();
    assert_eq!(verifier.verify(&padded).unwrap(), 2);
}
