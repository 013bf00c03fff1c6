// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{
    Action, Axis, Cursor, EditOutcome, GridStore, NavigationError, Navigator, PageDirection,
    QueryError, SearchEngine, TerminalSize, TextEdit, TextInput, parse_position,
};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Normal,
    Editing,
    GoTo,
    Searching,
    Filtering,
    SavePrompt,
    SaveFilteredPrompt,
}

impl ModeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Editing => "editing",
            Self::GoTo => "goto",
            Self::Searching => "searching",
            Self::Filtering => "filtering",
            Self::SavePrompt => "save_prompt",
            Self::SaveFilteredPrompt => "save_filtered_prompt",
        }
    }

    /// Every mode except Normal owns the keyboard for typing.
    pub const fn is_text_entry(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// GoTo collects the row first, then the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GoToStep {
    #[default]
    Row,
    Column {
        row: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GoToPrompt {
    pub step: GoToStep,
    pub row: TextInput,
    pub column: TextInput,
    pub error: Option<NavigationError>,
}

impl GoToPrompt {
    fn focused_mut(&mut self) -> &mut TextInput {
        match self.step {
            GoToStep::Row => &mut self.row,
            GoToStep::Column { .. } => &mut self.column,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Term,
    Row,
    Column,
}

impl SearchField {
    pub const ALL: [Self; 3] = [Self::Term, Self::Row, Self::Column];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Term => "Search",
            Self::Row => "Row filter",
            Self::Column => "Col filter",
        }
    }

    pub fn next(self) -> Self {
        let current = Self::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0);
        Self::ALL[(current + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPrompt {
    pub field: SearchField,
    pub term: TextInput,
    pub row: TextInput,
    pub column: TextInput,
}

impl SearchPrompt {
    pub fn input(&self, field: SearchField) -> &TextInput {
        match field {
            SearchField::Term => &self.term,
            SearchField::Row => &self.row,
            SearchField::Column => &self.column,
        }
    }

    fn focused_mut(&mut self) -> &mut TextInput {
        match self.field {
            SearchField::Term => &mut self.term,
            SearchField::Row => &mut self.row,
            SearchField::Column => &mut self.column,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterPrompt {
    pub input: TextInput,
    pub error: Option<QueryError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Editing(TextInput),
    GoTo(GoToPrompt),
    Searching(SearchPrompt),
    Filtering(FilterPrompt),
    SavePrompt,
    SaveFilteredPrompt(TextInput),
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Self::Normal => ModeKind::Normal,
            Self::Editing(_) => ModeKind::Editing,
            Self::GoTo(_) => ModeKind::GoTo,
            Self::Searching(_) => ModeKind::Searching,
            Self::Filtering(_) => ModeKind::Filtering,
            Self::SavePrompt => ModeKind::SavePrompt,
            Self::SaveFilteredPrompt(_) => ModeKind::SaveFilteredPrompt,
        }
    }
}

/// What a dispatch did. Save and quit effects are carried out by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ModeChanged(ModeKind),
    CursorMoved(Cursor),
    CellEdited {
        row: usize,
        col: usize,
        persisted: bool,
    },
    FilterApplied {
        query: String,
        rows: usize,
    },
    FiltersReset,
    SearchCompleted {
        matches: usize,
    },
    HelpToggled(bool),
    SaveOriginal,
    SaveFiltered(PathBuf),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    grid: GridStore,
    nav: Navigator,
    search: SearchEngine,
    mode: Mode,
    help_visible: bool,
}

impl Session {
    pub fn new(grid: GridStore, size: TerminalSize) -> Self {
        Self {
            grid,
            nav: Navigator::new(size),
            search: SearchEngine::default(),
            mode: Mode::Normal,
            help_visible: false,
        }
    }

    pub fn grid(&self) -> &GridStore {
        &self.grid
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn search(&self) -> &SearchEngine {
        &self.search
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn mark_saved(&mut self) {
        self.grid.mark_saved();
    }

    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        if let Action::Resize(size) = action {
            self.nav.resize(self.grid.active(), size);
            return Vec::new();
        }

        let before = self.mode.kind();
        let cursor = self.nav.cursor();
        let mode = std::mem::take(&mut self.mode);

        let mut effects = match (mode, action) {
            (Mode::Normal, action) => self.handle_normal(action),
            (_, Action::Cancel) => Vec::new(),
            (Mode::Editing(input), action) => self.handle_editing(input, action),
            (Mode::GoTo(prompt), action) => self.handle_goto(prompt, action),
            (Mode::Searching(prompt), action) => self.handle_searching(prompt, action),
            (Mode::Filtering(prompt), action) => self.handle_filtering(prompt, action),
            (Mode::SavePrompt, action) => self.handle_save_prompt(action),
            (Mode::SaveFilteredPrompt(input), action) => {
                self.handle_save_filtered_prompt(input, action)
            }
        };

        let after = self.mode.kind();
        if after != before {
            effects.insert(0, Effect::ModeChanged(after));
        }
        if self.nav.cursor() != cursor {
            effects.push(Effect::CursorMoved(self.nav.cursor()));
        }
        effects
    }

    fn handle_normal(&mut self, action: Action) -> Vec<Effect> {
        let table = self.grid.active();
        match action {
            Action::Up => self.nav.move_by(table, -1, 0),
            Action::Down => self.nav.move_by(table, 1, 0),
            Action::Left => self.nav.move_by(table, 0, -1),
            Action::Right => self.nav.move_by(table, 0, 1),
            Action::PageUp => self.nav.page(table, PageDirection::Up),
            Action::PageDown => self.nav.page(table, PageDirection::Down),
            Action::PageLeft => self.nav.page(table, PageDirection::Left),
            Action::PageRight => self.nav.page(table, PageDirection::Right),
            Action::Edit => {
                let cursor = self.nav.cursor();
                if let Some(value) = table.cell(cursor.row, cursor.col) {
                    self.mode = Mode::Editing(TextInput::with_value(value));
                }
            }
            Action::GoTo => self.mode = Mode::GoTo(GoToPrompt::default()),
            Action::Search => self.mode = Mode::Searching(SearchPrompt::default()),
            Action::Filter => self.mode = Mode::Filtering(FilterPrompt::default()),
            Action::NextMatch => self.step_match(1),
            Action::PrevMatch => self.step_match(-1),
            Action::ResetFilters => {
                if self.grid.reset_filters() {
                    self.nav.reset();
                    self.search.clear();
                    return vec![Effect::FiltersReset];
                }
            }
            Action::Help => {
                self.help_visible = !self.help_visible;
                return vec![Effect::HelpToggled(self.help_visible)];
            }
            Action::Quit => {
                if self.grid.is_filtered() {
                    self.mode = Mode::SaveFilteredPrompt(TextInput::default());
                } else if self.grid.has_changes() {
                    self.mode = Mode::SavePrompt;
                } else {
                    return vec![Effect::Quit];
                }
            }
            Action::Confirm
            | Action::Cancel
            | Action::Tab
            | Action::Text(_)
            | Action::Resize(_) => {}
        }
        Vec::new()
    }

    fn step_match(&mut self, delta: isize) {
        if let Some(found) = self.search.navigate(delta) {
            self.nav.jump_to(self.grid.active(), found.into());
        }
    }

    fn handle_editing(&mut self, mut input: TextInput, action: Action) -> Vec<Effect> {
        match action {
            Action::Confirm => {
                let Cursor { row, col } = self.nav.cursor();
                if let EditOutcome::Updated { persisted } =
                    self.grid.edit_cell(row, col, input.value())
                {
                    return vec![Effect::CellEdited {
                        row,
                        col,
                        persisted,
                    }];
                }
            }
            Action::Text(edit) => {
                input.apply(edit);
                self.mode = Mode::Editing(input);
            }
            _ => self.mode = Mode::Editing(input),
        }
        Vec::new()
    }

    fn handle_goto(&mut self, mut prompt: GoToPrompt, action: Action) -> Vec<Effect> {
        let table = self.grid.active();
        match action {
            Action::Text(edit) => {
                prompt.focused_mut().apply(edit);
                prompt.error = None;
            }
            Action::Confirm => match prompt.step {
                GoToStep::Row => {
                    match parse_position(prompt.row.value(), Axis::Row, table.row_count()) {
                        Ok(row) => {
                            prompt.step = GoToStep::Column { row };
                            prompt.error = None;
                        }
                        Err(error) => prompt.error = Some(error),
                    }
                }
                GoToStep::Column { row } => {
                    match parse_position(prompt.column.value(), Axis::Column, table.column_count())
                    {
                        Ok(col) => {
                            self.nav.jump_to(table, Cursor { row, col });
                            return Vec::new();
                        }
                        Err(error) => prompt.error = Some(error),
                    }
                }
            },
            _ => {}
        }
        self.mode = Mode::GoTo(prompt);
        Vec::new()
    }

    fn handle_searching(&mut self, mut prompt: SearchPrompt, action: Action) -> Vec<Effect> {
        match action {
            Action::Tab => prompt.field = prompt.field.next(),
            Action::Text(edit) => prompt.focused_mut().apply(edit),
            Action::Confirm => {
                let table = self.grid.active();
                if let Some(found) = self.search.search(
                    table,
                    prompt.term.value(),
                    prompt.row.value(),
                    prompt.column.value(),
                ) {
                    self.nav.jump_to(table, found.into());
                }
                return vec![Effect::SearchCompleted {
                    matches: self.search.matches().len(),
                }];
            }
            _ => {}
        }
        self.mode = Mode::Searching(prompt);
        Vec::new()
    }

    fn handle_filtering(&mut self, mut prompt: FilterPrompt, action: Action) -> Vec<Effect> {
        match action {
            Action::Text(edit) => {
                prompt.input.apply(edit);
                prompt.error = None;
            }
            Action::Confirm => {
                if prompt.input.is_blank() {
                    return Vec::new();
                }
                let query = prompt.input.value().to_owned();
                match self.grid.apply_filter(&query) {
                    Ok(rows) => {
                        self.nav.reset();
                        self.search.clear();
                        return vec![Effect::FilterApplied { query, rows }];
                    }
                    Err(error) => prompt.error = Some(error),
                }
            }
            _ => {}
        }
        self.mode = Mode::Filtering(prompt);
        Vec::new()
    }

    fn handle_save_prompt(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Confirm | Action::Text(TextEdit::Insert('y' | 'Y')) => {
                vec![Effect::SaveOriginal, Effect::Quit]
            }
            Action::Text(TextEdit::Insert('n' | 'N')) => vec![Effect::Quit],
            _ => {
                self.mode = Mode::SavePrompt;
                Vec::new()
            }
        }
    }

    fn handle_save_filtered_prompt(&mut self, mut input: TextInput, action: Action) -> Vec<Effect> {
        match action {
            Action::Confirm => {
                let name = input.value().trim();
                if name.is_empty() {
                    return vec![Effect::Quit];
                }
                return vec![Effect::SaveFiltered(PathBuf::from(name)), Effect::Quit];
            }
            Action::Text(edit) => input.apply(edit),
            _ => {}
        }
        self.mode = Mode::SaveFilteredPrompt(input);
        Vec::new()
    }
}

/// Consumes a session and an action, returning the next session and what
/// happened.
pub fn update(mut session: Session, action: Action) -> (Session, Vec<Effect>) {
    let effects = session.dispatch(action);
    (session, effects)
}
