// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    Like,
}

impl Operator {
    pub const ALL: [Self; 7] = [
        Self::Eq,
        Self::Ne,
        Self::Gt,
        Self::Lt,
        Self::Ge,
        Self::Le,
        Self::Like,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Like => "LIKE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(value))
    }

    /// Ordering operators compare numerically when both sides parse as
    /// floats, and fall back to plain string ordering otherwise.
    pub fn matches(self, cell: &str, value: &str) -> bool {
        match self {
            Self::Eq => eq_fold(cell, value),
            Self::Ne => !eq_fold(cell, value),
            Self::Like => cell.to_lowercase().contains(&value.to_lowercase()),
            Self::Gt | Self::Lt | Self::Ge | Self::Le => {
                if let (Ok(left), Ok(right)) = (cell.parse::<f64>(), value.parse::<f64>()) {
                    match self {
                        Self::Gt => left > right,
                        Self::Lt => left < right,
                        Self::Ge => left >= right,
                        _ => left <= right,
                    }
                } else {
                    match self {
                        Self::Gt => cell > value,
                        Self::Lt => cell < value,
                        Self::Ge => cell >= value,
                        _ => cell <= value,
                    }
                }
            }
        }
    }
}

fn eq_fold(left: &str, right: &str) -> bool {
    left.to_lowercase() == right.to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    pub column: String,
    pub operator: Operator,
    pub value: String,
    pub(crate) index: usize,
}

/// A parsed `SELECT ... WHERE ...` query bound to the headers it was
/// resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterQuery {
    pub select_columns: Vec<String>,
    pub conditions: Vec<FilterCondition>,
    pub(crate) select_indices: Vec<usize>,
}

impl FilterQuery {
    pub fn matches(&self, row: &[String]) -> bool {
        self.conditions.iter().all(|condition| {
            row.get(condition.index)
                .is_some_and(|cell| condition.operator.matches(cell, &condition.value))
        })
    }

    /// Keeps the matching rows, projected onto the select list. Cells missing
    /// from short rows project as empty strings.
    pub fn apply(&self, table: &Table) -> Table {
        let rows = table
            .rows()
            .iter()
            .filter(|row| self.matches(row))
            .map(|row| {
                self.select_indices
                    .iter()
                    .map(|index| row.get(*index).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();
        Table::new(self.select_columns.clone(), rows)
    }
}
