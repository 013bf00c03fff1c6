// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::QueryError;
use crate::query;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataType {
    String,
    Int,
    Float,
    Bool,
    Empty,
}

impl DataType {
    pub const ALL: [Self; 5] = [
        Self::String,
        Self::Int,
        Self::Float,
        Self::Bool,
        Self::Empty,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::String => "str",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Empty => "empty",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Empty => "empty",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    /// Classifies a single cell. Total: every string maps to exactly one type.
    pub fn detect(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
            return Self::Bool;
        }
        if trimmed.parse::<i64>().is_ok() {
            return Self::Int;
        }
        if trimmed.parse::<f64>().is_ok() {
            return Self::Float;
        }
        Self::String
    }
}

/// Picks the most frequent non-empty type per column. Ties resolve in
/// declaration order, so `String` beats `Int` beats `Float` beats `Bool`.
pub fn infer_column_types(column_count: usize, rows: &[Vec<String>]) -> Vec<DataType> {
    (0..column_count)
        .map(|col| {
            let mut counts = [0usize; 4];
            for cell in rows.iter().filter_map(|row| row.get(col)) {
                match DataType::detect(cell) {
                    DataType::String => counts[0] += 1,
                    DataType::Int => counts[1] += 1,
                    DataType::Float => counts[2] += 1,
                    DataType::Bool => counts[3] += 1,
                    DataType::Empty => {}
                }
            }

            let mut best = DataType::String;
            let mut best_count = 0;
            for (kind, count) in DataType::ALL.into_iter().zip(counts) {
                if count > best_count {
                    best = kind;
                    best_count = count;
                }
            }
            best
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_types: Vec<DataType>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let column_types = infer_column_types(headers.len(), &rows);
        Self {
            headers,
            rows,
            column_types,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_types(&self) -> &[DataType] {
        &self.column_types
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.headers.is_empty()
    }

    /// `None` for coordinates outside the table, including the missing tail of
    /// a short row and cells past the header count.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        if col >= self.headers.len() {
            return None;
        }
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    pub fn column_type(&self, col: usize) -> DataType {
        self.column_types
            .get(col)
            .copied()
            .unwrap_or(DataType::String)
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<String>>) {
        (self.headers, self.rows)
    }

    fn set_cell(&mut self, row: usize, col: usize, value: &str) -> bool {
        if col >= self.headers.len() {
            return false;
        }
        match self.rows.get_mut(row).and_then(|cells| cells.get_mut(col)) {
            Some(cell) if cell.as_str() != value => {
                value.clone_into(cell);
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    OutOfBounds,
    Unchanged,
    /// `persisted` is true when the edit also reached the table that gets saved.
    Updated { persisted: bool },
}

/// The active table, the pre-filter baseline and the unsaved-changes flag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridStore {
    active: Table,
    baseline: Option<Table>,
    filter_history: Vec<String>,
    has_changes: bool,
}

impl GridStore {
    pub fn load(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            active: Table::new(headers, rows),
            ..Self::default()
        }
    }

    pub fn active(&self) -> &Table {
        &self.active
    }

    /// The table a save to the source file writes out.
    pub fn master(&self) -> &Table {
        self.baseline.as_ref().unwrap_or(&self.active)
    }

    pub fn is_filtered(&self) -> bool {
        self.baseline.is_some()
    }

    pub fn filter_history(&self) -> &[String] {
        &self.filter_history
    }

    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    pub fn mark_saved(&mut self) {
        self.has_changes = false;
    }

    /// Column types are left as they were; they describe the table at load or
    /// filter time.
    pub fn edit_cell(&mut self, row: usize, col: usize, value: &str) -> EditOutcome {
        if self.active.cell(row, col).is_none() {
            return EditOutcome::OutOfBounds;
        }
        if !self.active.set_cell(row, col, value) {
            return EditOutcome::Unchanged;
        }

        let persisted = !self.is_filtered();
        if persisted {
            self.has_changes = true;
        }
        EditOutcome::Updated { persisted }
    }

    /// Parses and applies `raw` to the active table. Returns the number of rows
    /// kept. On error nothing changes.
    pub fn apply_filter(&mut self, raw: &str) -> Result<usize, QueryError> {
        let filter = query::parse(raw, self.active.headers())?;
        let filtered = filter.apply(&self.active);
        let kept = filtered.row_count();

        let previous = std::mem::replace(&mut self.active, filtered);
        if self.baseline.is_none() {
            self.baseline = Some(previous);
        }
        self.filter_history.push(raw.to_owned());
        Ok(kept)
    }

    /// Restores the pre-filter table. Returns false when nothing was filtered.
    pub fn reset_filters(&mut self) -> bool {
        let Some(baseline) = self.baseline.take() else {
            return false;
        };
        self.active = baseline;
        self.filter_history.clear();
        true
    }
}
