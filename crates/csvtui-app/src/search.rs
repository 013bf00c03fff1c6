// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Axis, Cursor, Table, parse_position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    pub row: usize,
    pub col: usize,
}

impl From<SearchMatch> for Cursor {
    fn from(found: SearchMatch) -> Self {
        Self {
            row: found.row,
            col: found.col,
        }
    }
}

/// Substring matches over the active table, walked cyclically.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchEngine {
    matches: Vec<SearchMatch>,
    index: usize,
    performed: bool,
}

impl SearchEngine {
    /// Scans `table` in row-major order. `row_filter` and `col_filter` are
    /// 1-based positions as typed; anything unparseable or out of range means
    /// no restriction. Returns the first match.
    pub fn search(
        &mut self,
        table: &Table,
        term: &str,
        row_filter: &str,
        col_filter: &str,
    ) -> Option<SearchMatch> {
        self.matches.clear();
        self.index = 0;
        self.performed = true;
        if term.is_empty() {
            return None;
        }

        let needle = term.to_lowercase();
        let only_row = parse_position(row_filter, Axis::Row, table.row_count()).ok();
        let only_col = parse_position(col_filter, Axis::Column, table.column_count()).ok();

        for (row, cells) in table.rows().iter().enumerate() {
            if only_row.is_some_and(|wanted| wanted != row) {
                continue;
            }
            for (col, cell) in cells.iter().enumerate().take(table.column_count()) {
                if only_col.is_some_and(|wanted| wanted != col) {
                    continue;
                }
                if cell.to_lowercase().contains(&needle) {
                    self.matches.push(SearchMatch { row, col });
                }
            }
        }

        self.current()
    }

    /// Steps through the matches, wrapping at both ends.
    pub fn navigate(&mut self, delta: isize) -> Option<SearchMatch> {
        if self.matches.is_empty() {
            return None;
        }
        let len = self.matches.len() as isize;
        self.index = (self.index as isize + delta).rem_euclid(len) as usize;
        self.current()
    }

    pub fn current(&self) -> Option<SearchMatch> {
        self.matches.get(self.index).copied()
    }

    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn performed(&self) -> bool {
        self.performed
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn status(&self) -> Option<String> {
        if !self.performed {
            return None;
        }
        if self.matches.is_empty() {
            return Some("Search: no matches found".to_owned());
        }
        Some(format!(
            "Search: {}/{} matches (n/b to navigate)",
            self.index + 1,
            self.matches.len()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchEngine, SearchMatch};
    use crate::Table;
    use csvtui_testkit::{ragged, scores};

    fn scores_table() -> Table {
        let (headers, rows) = scores().into_parts();
        Table::new(headers, rows)
    }

    #[test]
    fn finds_case_insensitive_substrings() {
        let table = scores_table();
        let mut search = SearchEngine::default();

        let first = search.search(&table, "b", "", "");
        assert_eq!(first, Some(SearchMatch { row: 1, col: 1 }));
        assert_eq!(search.matches(), &[SearchMatch { row: 1, col: 1 }]);
        assert_eq!(
            search.status().as_deref(),
            Some("Search: 1/1 matches (n/b to navigate)")
        );
    }

    #[test]
    fn row_major_order() {
        let table = scores_table();
        let mut search = SearchEngine::default();
        search.search(&table, "n", "", "");
        assert_eq!(
            search.matches(),
            &[SearchMatch { row: 0, col: 1 }],
        );

        search.search(&table, "5", "", "");
        assert_eq!(search.matches(), &[SearchMatch { row: 0, col: 2 }]);

        search.search(&table, "", "", "");
        assert!(search.performed());
        assert!(search.matches().is_empty());
        assert_eq!(search.status().as_deref(), Some("Search: no matches found"));
    }

    #[test]
    fn positional_filters() {
        let table = Table::new(
            vec!["a".to_owned(), "b".to_owned()],
            vec![
                vec!["x1".to_owned(), "x2".to_owned()],
                vec!["x3".to_owned(), "x4".to_owned()],
            ],
        );
        let mut search = SearchEngine::default();

        search.search(&table, "x", "2", "");
        assert_eq!(
            search.matches(),
            &[SearchMatch { row: 1, col: 0 }, SearchMatch { row: 1, col: 1 }],
        );

        search.search(&table, "x", "", "2");
        assert_eq!(
            search.matches(),
            &[SearchMatch { row: 0, col: 1 }, SearchMatch { row: 1, col: 1 }],
        );

        search.search(&table, "x", "9", "zero");
        assert_eq!(search.matches().len(), 4);
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let table = Table::new(
            vec!["a".to_owned()],
            (0..4).map(|i| vec![format!("hit {i}")]).collect(),
        );
        let mut search = SearchEngine::default();
        search.search(&table, "hit", "", "");

        assert_eq!(search.navigate(-1), Some(SearchMatch { row: 3, col: 0 }));
        assert_eq!(search.navigate(1), Some(SearchMatch { row: 0, col: 0 }));
        for _ in 0..4 {
            search.navigate(1);
        }
        assert_eq!(search.index(), 0);
    }

    #[test]
    fn navigate_without_matches_is_noop() {
        let mut search = SearchEngine::default();
        assert_eq!(search.navigate(1), None);
        assert_eq!(search.index(), 0);
        assert_eq!(search.status(), None);
    }

    #[test]
    fn ignores_cells_past_the_header() {
        let (headers, mut rows) = ragged().into_parts();
        rows[0].push("needle".to_owned());
        let table = Table::new(headers, rows);
        let mut search = SearchEngine::default();
        assert_eq!(search.search(&table, "needle", "", ""), None);
    }
}
