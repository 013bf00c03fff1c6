// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::Axis;
use thiserror::Error;

pub const QUERY_USAGE: &str = r#"SELECT col1,col2 WHERE col3 == "value""#;

/// Where an unresolved column name appeared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    Select,
    Where,
}

impl Clause {
    fn suffix(self) -> &'static str {
        match self {
            Self::Select => "",
            Self::Where => " in WHERE clause",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid query at position {position}: {detail}. Use: {usage}", usage = QUERY_USAGE)]
    SyntaxError { position: usize, detail: String },
    #[error("column '{column}' not found{}", .clause.suffix())]
    UnknownColumn { column: String, clause: Clause },
}

impl QueryError {
    pub(crate) fn syntax(position: usize, detail: impl Into<String>) -> Self {
        Self::SyntaxError {
            position,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("Invalid {}: valid range 1-{max}", .axis.label())]
    OutOfRange { axis: Axis, max: usize },
}
