// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{GridLayout, NavigationError, Table, TerminalSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

/// Index of the first visible column (`x`) and row (`y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Row => "row",
            Self::Column => "column",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Parses a 1-based position typed by the user into a 0-based index.
pub fn parse_position(raw: &str, axis: Axis, count: usize) -> Result<usize, NavigationError> {
    match raw.trim().parse::<usize>() {
        Ok(position) if (1..=count).contains(&position) => Ok(position - 1),
        _ => Err(NavigationError::OutOfRange { axis, max: count }),
    }
}

/// Cursor and scroll offsets over the active table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigator {
    cursor: Cursor,
    viewport: Viewport,
    size: TerminalSize,
}

impl Navigator {
    pub fn new(size: TerminalSize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn size(&self) -> TerminalSize {
        self.size
    }

    pub fn layout(&self, table: &Table) -> GridLayout {
        GridLayout::new(table, self.size)
    }

    pub fn resize(&mut self, table: &Table, size: TerminalSize) {
        self.size = size;
        self.reconcile(table);
    }

    /// Back to the top-left cell, used whenever the active table is replaced.
    pub fn reset(&mut self) {
        self.cursor = Cursor::default();
        self.viewport = Viewport::default();
    }

    /// Single steps that would leave the table are ignored.
    pub fn move_by(&mut self, table: &Table, rows: isize, cols: isize) {
        self.cursor = Cursor {
            row: step(self.cursor.row, rows, table.row_count()),
            col: step(self.cursor.col, cols, table.column_count()),
        };
        self.reconcile(table);
    }

    /// Vertical pages are one screenful of rows. Horizontal pages are the
    /// number of columns currently on screen.
    pub fn page(&mut self, table: &Table, direction: PageDirection) {
        let layout = self.layout(table);
        let rows = layout.max_visible_rows() as isize;
        let cols = layout.visible_columns(self.viewport.x).len().max(1) as isize;
        match direction {
            PageDirection::Up => self.move_by(table, -rows, 0),
            PageDirection::Down => self.move_by(table, rows, 0),
            PageDirection::Left => self.move_by(table, 0, -cols),
            PageDirection::Right => self.move_by(table, 0, cols),
        }
    }

    pub fn jump_to(&mut self, table: &Table, cursor: Cursor) {
        self.cursor = Cursor {
            row: cursor.row.min(table.row_count().saturating_sub(1)),
            col: cursor.col.min(table.column_count().saturating_sub(1)),
        };
        self.reconcile(table);
    }

    pub fn reconcile(&mut self, table: &Table) {
        self.viewport = self.layout(table).reconcile(self.cursor, self.viewport);
    }
}

fn step(current: usize, delta: isize, count: usize) -> usize {
    let max = count.saturating_sub(1);
    current.saturating_add_signed(delta).min(max)
}

#[cfg(test)]
mod tests {
    use super::{Axis, Cursor, Navigator, PageDirection, Viewport, parse_position};
    use crate::{NavigationError, Table, TerminalSize};
    use csvtui_store::demo::TableFaker;
    use csvtui_testkit::scores;

    fn employees(rows: usize) -> Table {
        let fixture = TableFaker::new(5).employees(rows);
        Table::new(fixture.headers, fixture.rows)
    }

    #[test]
    fn moves_clamp_at_edges() {
        let (headers, rows) = scores().into_parts();
        let table = Table::new(headers, rows);
        let mut nav = Navigator::new(TerminalSize::default());

        nav.move_by(&table, -1, -1);
        assert_eq!(nav.cursor(), Cursor { row: 0, col: 0 });

        nav.move_by(&table, 1, 1);
        nav.move_by(&table, 1, 1);
        nav.move_by(&table, 1, 1);
        assert_eq!(nav.cursor(), Cursor { row: 1, col: 2 });
    }

    #[test]
    fn empty_table_keeps_cursor_at_origin() {
        let table = Table::default();
        let mut nav = Navigator::new(TerminalSize::default());
        nav.move_by(&table, 3, 3);
        nav.page(&table, PageDirection::Right);
        assert_eq!(nav.cursor(), Cursor::default());
        assert_eq!(nav.viewport(), Viewport::default());
    }

    #[test]
    fn page_down_and_up() {
        let table = employees(50);
        let mut nav = Navigator::new(TerminalSize::new(80, 24));

        nav.page(&table, PageDirection::Down);
        assert_eq!(nav.cursor().row, 17);
        assert_eq!(nav.viewport().y, 1);

        nav.page(&table, PageDirection::Down);
        nav.page(&table, PageDirection::Down);
        assert_eq!(nav.cursor().row, 49);

        nav.page(&table, PageDirection::Up);
        assert_eq!(nav.cursor().row, 32);
        assert_eq!(nav.viewport().y, 32);
    }

    #[test]
    fn page_right_steps_by_visible_columns() {
        let table = employees(5);
        let mut nav = Navigator::new(TerminalSize::new(60, 24));
        let visible = nav.layout(&table).visible_columns(0).len();

        nav.page(&table, PageDirection::Right);
        assert_eq!(nav.cursor().col, visible);
        assert!(nav.layout(&table).visible_columns(nav.viewport().x).contains(&visible));

        nav.page(&table, PageDirection::Left);
        assert!(nav.cursor().col < visible);
    }

    #[test]
    fn resize_reconciles_viewport() {
        let table = employees(40);
        let mut nav = Navigator::new(TerminalSize::new(80, 40));
        nav.jump_to(&table, Cursor { row: 30, col: 0 });
        assert_eq!(nav.viewport().y, 0);

        nav.resize(&table, TerminalSize::new(80, 17));
        assert_eq!(nav.viewport().y, 21);
    }

    #[test]
    fn jump_clamps_into_table() {
        let table = employees(3);
        let mut nav = Navigator::default();
        nav.jump_to(&table, Cursor { row: 10, col: 99 });
        assert_eq!(
            nav.cursor(),
            Cursor {
                row: 2,
                col: table.column_count() - 1,
            },
        );
    }

    #[test]
    fn positions_are_one_based() -> anyhow::Result<()> {
        assert_eq!(parse_position("1", Axis::Row, 3)?, 0);
        assert_eq!(parse_position(" 3 ", Axis::Row, 3)?, 2);
        assert_eq!(
            parse_position("4", Axis::Column, 3),
            Err(NavigationError::OutOfRange {
                axis: Axis::Column,
                max: 3,
            }),
        );
        assert!(parse_position("0", Axis::Row, 3).is_err());
        assert!(parse_position("two", Axis::Row, 3).is_err());
        assert!(parse_position("", Axis::Row, 3).is_err());
        Ok(())
    }
}
