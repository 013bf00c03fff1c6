// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Cursor, Table, Viewport};
use std::ops::Range;

pub const MIN_COLUMN_WIDTH: usize = 8;
pub const MAX_COLUMN_WIDTH: usize = 20;
/// Left and right table border.
pub const BORDER_WIDTH: usize = 2;
pub const MARGIN_WIDTH: usize = 4;
/// One space of padding on each side of a cell.
pub const CELL_PADDING: usize = 2;
pub const SEPARATOR_WIDTH: usize = 1;
/// Border, header, header rule, legend, status and prompt lines.
pub const CHROME_LINES: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub width: u16,
    pub height: u16,
}

impl TerminalSize {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl Default for TerminalSize {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

/// Clamped display width of every column of `table`, counted in chars.
pub fn column_widths(table: &Table) -> Vec<usize> {
    (0..table.column_count())
        .map(|col| {
            let header = table.headers()[col].chars().count();
            let widest = table
                .rows()
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0);
            header.max(widest).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
        })
        .collect()
}

/// Column and row windows for one table at one terminal size. Cheap enough to
/// rebuild for every frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    widths: Vec<usize>,
    row_count: usize,
    size: TerminalSize,
}

impl GridLayout {
    pub fn new(table: &Table, size: TerminalSize) -> Self {
        Self {
            widths: column_widths(table),
            row_count: table.row_count(),
            size,
        }
    }

    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    pub fn column_width(&self, col: usize) -> usize {
        self.widths.get(col).copied().unwrap_or(MIN_COLUMN_WIDTH)
    }

    pub fn size(&self) -> TerminalSize {
        self.size
    }

    pub fn available_width(&self) -> usize {
        usize::from(self.size.width).saturating_sub(BORDER_WIDTH + MARGIN_WIDTH)
    }

    /// Greedily packs columns starting at `start`. The first column is always
    /// included even when it alone overflows.
    pub fn visible_columns(&self, start: usize) -> Range<usize> {
        let count = self.widths.len();
        if count == 0 {
            return 0..0;
        }

        let start = start.min(count - 1);
        let available = self.available_width();
        let mut used = 0;
        let mut end = start;
        for col in start..count {
            let mut cost = self.widths[col] + CELL_PADDING;
            if col > start {
                cost += SEPARATOR_WIDTH;
                if used + cost > available {
                    break;
                }
            }
            used += cost;
            end = col + 1;
        }
        start..end
    }

    pub fn max_visible_rows(&self) -> usize {
        usize::from(self.size.height)
            .saturating_sub(CHROME_LINES)
            .max(1)
    }

    pub fn visible_rows(&self, start: usize) -> Range<usize> {
        let start = start.min(self.row_count);
        let end = (start + self.max_visible_rows()).min(self.row_count);
        start..end
    }

    /// Total width the table occupies when showing `columns`, borders included.
    pub fn used_width(&self, columns: Range<usize>) -> usize {
        let count = columns.len();
        let cells: usize = columns
            .map(|col| self.column_width(col) + CELL_PADDING)
            .sum();
        BORDER_WIDTH + cells + count.saturating_sub(1) * SEPARATOR_WIDTH
    }

    /// Moves `viewport` the least amount needed for `cursor` to be on screen.
    /// Applying it twice gives the same answer as applying it once.
    pub fn reconcile(&self, cursor: Cursor, viewport: Viewport) -> Viewport {
        Viewport {
            x: self.reconcile_x(cursor.col, viewport.x),
            y: self.reconcile_y(cursor.row, viewport.y),
        }
    }

    fn reconcile_x(&self, col: usize, x: usize) -> usize {
        let count = self.widths.len();
        if count == 0 {
            return 0;
        }

        let mut x = x.min(count - 1);
        if col < x {
            return col;
        }
        while col >= self.visible_columns(x).end && x < count - 1 {
            x += 1;
        }
        x
    }

    fn reconcile_y(&self, row: usize, y: usize) -> usize {
        let max_visible = self.max_visible_rows();
        if row < y {
            row
        } else if row >= y + max_visible {
            row + 1 - max_visible
        } else {
            y
        }
    }
}
