// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use csvtui_store::demo::TableFaker;
use csvtui_store::{CsvStore, StoreError, backup_path, load, remove_backup, save, write_backup};
use csvtui_testkit::{ragged, scores};
use std::fs;
use std::path::Path;

#[test]
fn load_reads_header_then_rows() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("scores.csv");
    fs::write(&path, scores().to_csv()?)?;

    let data = load(&path)?;
    assert_eq!(data.headers, vec!["id", "name", "score"]);
    assert_eq!(data.rows, scores().rows);
    Ok(())
}

#[test]
fn load_accepts_ragged_rows() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("ragged.csv");
    fs::write(&path, "id,name,city\n1,Ann,Austin\n2,Bob\n3\n4,Dee,Denver,extra\n")?;

    let data = load(&path)?;
    assert_eq!(data.rows.len(), 4);
    assert_eq!(data.rows[1], vec!["2", "Bob"]);
    assert_eq!(data.rows[2], vec!["3"]);
    assert_eq!(data.rows[3].len(), 4);
    Ok(())
}

#[test]
fn load_handles_quoted_fields() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("quoted.csv");
    fs::write(&path, "name,notes\n\"Lopez, Kai\",\"said \"\"hi\"\"\"\n")?;

    let data = load(&path)?;
    assert_eq!(data.rows[0], vec!["Lopez, Kai", "said \"hi\""]);
    Ok(())
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let error = load(&dir.path().join("nope.csv")).expect_err("missing file should fail");
    assert!(matches!(error, StoreError::Io { .. }), "got {error:?}");
    assert!(error.to_string().contains("nope.csv"));
}

#[test]
fn load_empty_file_is_parse_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("empty.csv");
    fs::write(&path, "")?;

    let error = load(&path).expect_err("empty file should fail");
    assert!(matches!(error, StoreError::Parse { .. }), "got {error:?}");
    assert!(error.to_string().contains("no records"));
    Ok(())
}

#[test]
fn load_invalid_utf8_is_parse_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("latin1.csv");
    fs::write(&path, b"name\n\xff\xfe\n")?;

    let error = load(&path).expect_err("invalid utf-8 should fail");
    assert!(matches!(error, StoreError::Parse { .. }), "got {error:?}");
    Ok(())
}

#[test]
fn save_round_trips_generated_table() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("people.csv");
    let table = TableFaker::new(21).employees(25);

    save(&path, &table.headers, &table.rows)?;
    let data = load(&path)?;
    assert_eq!(data.headers, table.headers);
    assert_eq!(data.rows, table.rows);
    Ok(())
}

#[test]
fn save_keeps_ragged_rows() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("ragged.csv");
    let (headers, rows) = ragged().into_parts();

    save(&path, &headers, &rows)?;
    assert_eq!(fs::read_to_string(&path)?, "id,name,city\n1,Ann,Austin\n2,Bob\n3\n");
    Ok(())
}

#[test]
fn save_into_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing").join("out.csv");
    let error = save(&path, &["a".to_owned()], &[]).expect_err("no parent dir");
    assert!(matches!(error, StoreError::Io { .. }), "got {error:?}");
}

#[test]
fn backup_lifecycle() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("scores.csv");
    let (headers, rows) = scores().into_parts();

    let backup = write_backup(&path, &headers, &rows)?;
    assert_eq!(backup, backup_path(&path));
    assert_eq!(load(&backup)?.rows, rows);

    assert!(remove_backup(&path)?);
    assert!(!backup.exists());
    assert!(!remove_backup(&path)?);
    Ok(())
}

#[test]
fn store_save_removes_stale_backup() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("scores.csv");
    fs::write(&path, scores().to_csv()?)?;
    let store = CsvStore::open(&path)?;

    let (headers, mut rows) = store.load()?.into_parts();
    rows[0][1] = "Anne".to_owned();
    store.write_backup(&headers, &rows)?;
    assert!(backup_path(&path).exists());

    store.save(&headers, &rows)?;
    assert!(!backup_path(&path).exists());
    assert_eq!(store.load()?.rows[0][1], "Anne");
    Ok(())
}

#[test]
fn store_save_survives_stuck_backup() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("scores.csv");
    fs::write(&path, scores().to_csv()?)?;
    let store = CsvStore::open(&path)?;
    fs::create_dir(backup_path(&path))?;
    assert!(remove_backup(&path).is_err());

    let (headers, mut rows) = store.load()?.into_parts();
    rows[1][1] = "Bea".to_owned();
    store.save(&headers, &rows)?;
    assert_eq!(store.load()?.rows[1][1], "Bea");
    assert!(backup_path(&path).is_dir());
    Ok(())
}

#[test]
fn sibling_resolves_next_to_source() -> Result<()> {
    let store = CsvStore::open(Path::new("/data/people.csv"))?;
    assert_eq!(store.sibling(Path::new("out.csv")), Path::new("/data/out.csv"));
    assert_eq!(store.sibling(Path::new("/tmp/x.csv")), Path::new("/tmp/x.csv"));

    let bare = CsvStore::open(Path::new("people.csv"))?;
    assert_eq!(bare.sibling(Path::new("out.csv")), Path::new("out.csv"));
    Ok(())
}

#[test]
fn open_rejects_urls() {
    assert!(CsvStore::open(Path::new("https://example.com/data.csv")).is_err());
}
