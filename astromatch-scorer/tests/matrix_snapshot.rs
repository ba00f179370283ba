//! Integration coverage for materialising and reloading the pair matrix.

use astromatch_core::{PairKey, Signature};
use astromatch_scorer::{
    EngineConfig, MatrixError, ScoreSource, ScoringEngine, ScoringTables, read_matrix_file,
    write_matrix_file,
};
use camino::{Utf8Path, Utf8PathBuf};
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("create temporary directory: {err}"),
    }
}

#[fixture]
fn engine() -> ScoringEngine {
    let tables = ScoringTables::builtin()
        .unwrap_or_else(|err| panic!("embedded tables should load: {err}"));
    ScoringEngine::new(tables, EngineConfig::default())
        .unwrap_or_else(|err| panic!("default config should validate: {err}"))
}

fn utf8_path(dir: &TempDir, name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join(name))
        .unwrap_or_else(|path| panic!("temporary path {} is not UTF-8", path.display()))
}

fn read_bytes(path: &Utf8Path) -> Vec<u8> {
    std::fs::read(path).unwrap_or_else(|err| panic!("read {path}: {err}"))
}

#[rstest]
fn matrix_covers_every_unordered_pair(engine: ScoringEngine, temp_dir: TempDir) {
    let path = utf8_path(&temp_dir, "nested/out/matrix.json");
    let snapshot = write_matrix_file(&engine, &path)
        .unwrap_or_else(|err| panic!("matrix should be written: {err}"));

    // 144 identical pairs plus 144 * 143 / 2 distinct ones.
    assert_eq!(snapshot.len(), 10_440);
    assert!(path.is_file());
}

#[rstest]
fn repeated_writes_are_byte_identical(engine: ScoringEngine, temp_dir: TempDir) {
    let first = utf8_path(&temp_dir, "first.json");
    let second = utf8_path(&temp_dir, "second.json");
    write_matrix_file(&engine, &first).unwrap_or_else(|err| panic!("first write: {err}"));
    write_matrix_file(&engine, &second).unwrap_or_else(|err| panic!("second write: {err}"));

    let bytes = read_bytes(&first);
    assert_eq!(bytes, read_bytes(&second));
    assert_eq!(bytes.last(), Some(&b'\n'));
}

#[rstest]
fn snapshot_reads_back_through_pair_keys(engine: ScoringEngine, temp_dir: TempDir) {
    let path = utf8_path(&temp_dir, "matrix.json");
    let written =
        write_matrix_file(&engine, &path).unwrap_or_else(|err| panic!("write matrix: {err}"));
    let loaded = read_matrix_file(&path).unwrap_or_else(|err| panic!("read matrix: {err}"));
    assert_eq!(loaded, written);

    let rabbit: Signature = "taurus_rabbit".parse().unwrap_or_else(|err| panic!("{err}"));
    let goat: Signature = "cancer_sheep".parse().unwrap_or_else(|err| panic!("{err}"));
    let Some(cached) = loaded.lookup(goat, rabbit) else {
        panic!("override pair missing from snapshot")
    };
    assert_eq!(cached.score, 92);
    assert!(matches!(cached.source, ScoreSource::Override { .. }));
    assert_eq!(cached, &engine.score(rabbit, goat));

    let key: PairKey = "taurus_rabbit|cancer_goat"
        .parse()
        .unwrap_or_else(|err| panic!("{err}"));
    assert_eq!(loaded.get(&key), Some(cached));
}

#[rstest]
fn reading_a_missing_snapshot_reports_the_path(temp_dir: TempDir) {
    let path = utf8_path(&temp_dir, "absent.json");
    match read_matrix_file(&path) {
        Err(MatrixError::Read { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected a read error, got {other:?}"),
    }
}

#[rstest]
fn malformed_snapshots_fail_to_parse(temp_dir: TempDir) {
    let path = utf8_path(&temp_dir, "broken.json");
    std::fs::write(&path, "{ \"aries_rat|aries_rat\": 4 }")
        .unwrap_or_else(|err| panic!("write fixture: {err}"));
    assert!(matches!(
        read_matrix_file(&path),
        Err(MatrixError::Parse { .. })
    ));
}
