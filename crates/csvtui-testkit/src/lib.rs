// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

/// A headers + rows pair shaped the way CSV storage hands it to the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFixture {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableFixture {
    pub fn new(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: headers.iter().map(|header| (*header).to_owned()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| (*cell).to_owned()).collect())
                .collect(),
        }
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<String>>) {
        (self.headers, self.rows)
    }

    /// Renders the fixture as CSV text, header record first.
    pub fn to_csv(&self) -> anyhow::Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer.into_inner().map_err(|error| error.into_error())?;
        Ok(String::from_utf8(bytes)?)
    }
}

/// The two-row `id,name,score` table used throughout the filter and search tests.
pub fn scores() -> TableFixture {
    TableFixture::new(
        &["id", "name", "score"],
        &[&["1", "Ann", "9.5"], &["2", "Bob", "7"]],
    )
}

/// One column of each inferred type, plus a column with no values.
pub fn mixed_types() -> TableFixture {
    TableFixture::new(
        &["label", "count", "ratio", "active", "notes"],
        &[
            &["alpha", "1", "0.5", "true", ""],
            &["beta", "2", "1.25", "FALSE", " "],
            &["gamma", "3", "2", "True", ""],
        ],
    )
}

/// Rows shorter than the header, as produced by a flexible CSV reader.
pub fn ragged() -> TableFixture {
    TableFixture::new(
        &["id", "name", "city"],
        &[&["1", "Ann", "Austin"], &["2", "Bob"], &["3"]],
    )
}
