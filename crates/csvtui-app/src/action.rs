// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{TerminalSize, TextEdit};

/// Actions a key can be bound to in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NamedAction {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    PageLeft,
    PageRight,
    Edit,
    GoTo,
    Search,
    NextMatch,
    PrevMatch,
    Filter,
    ResetFilters,
    Save,
    Cancel,
    Tab,
    Help,
    Quit,
}

impl NamedAction {
    pub const ALL: [Self; 20] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::PageUp,
        Self::PageDown,
        Self::PageLeft,
        Self::PageRight,
        Self::Edit,
        Self::GoTo,
        Self::Search,
        Self::NextMatch,
        Self::PrevMatch,
        Self::Filter,
        Self::ResetFilters,
        Self::Save,
        Self::Cancel,
        Self::Tab,
        Self::Help,
        Self::Quit,
    ];

    pub const SHORT_HELP: [Self; 3] = [Self::Help, Self::Edit, Self::Quit];

    pub const FULL_HELP: [&'static [Self]; 6] = [
        &[Self::Up, Self::Down, Self::Left, Self::Right],
        &[
            Self::PageUp,
            Self::PageDown,
            Self::PageLeft,
            Self::PageRight,
        ],
        &[
            Self::Edit,
            Self::GoTo,
            Self::Search,
            Self::Save,
            Self::Cancel,
        ],
        &[Self::NextMatch, Self::PrevMatch],
        &[Self::Filter, Self::ResetFilters],
        &[Self::Help, Self::Quit],
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::PageUp => "page_up",
            Self::PageDown => "page_down",
            Self::PageLeft => "page_left",
            Self::PageRight => "page_right",
            Self::Edit => "edit",
            Self::GoTo => "go_to",
            Self::Search => "search",
            Self::NextMatch => "next_match",
            Self::PrevMatch => "prev_match",
            Self::Filter => "filter",
            Self::ResetFilters => "reset_filters",
            Self::Save => "save",
            Self::Cancel => "cancel",
            Self::Tab => "tab",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.as_str() == value)
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Up => "move up",
            Self::Down => "move down",
            Self::Left => "move left",
            Self::Right => "move right",
            Self::PageUp => "page up",
            Self::PageDown => "page down",
            Self::PageLeft => "page left",
            Self::PageRight => "page right",
            Self::Edit => "edit cell",
            Self::GoTo => "go to position",
            Self::Search => "search",
            Self::NextMatch => "next match",
            Self::PrevMatch => "prev match",
            Self::Filter => "filter data",
            Self::ResetFilters => "reset filters",
            Self::Save => "save edit",
            Self::Cancel => "cancel",
            Self::Tab => "next field",
            Self::Help => "toggle help",
            Self::Quit => "quit",
        }
    }

    /// Bindings that still resolve while a text field has focus.
    pub const fn works_in_text_entry(self) -> bool {
        matches!(self, Self::Save | Self::Cancel | Self::Tab)
    }
}

/// Everything the session reacts to, already resolved from raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    PageLeft,
    PageRight,
    Edit,
    GoTo,
    Search,
    NextMatch,
    PrevMatch,
    Filter,
    ResetFilters,
    Confirm,
    Cancel,
    Tab,
    Help,
    Quit,
    Text(TextEdit),
    Resize(TerminalSize),
}

impl From<NamedAction> for Action {
    fn from(action: NamedAction) -> Self {
        match action {
            NamedAction::Up => Self::Up,
            NamedAction::Down => Self::Down,
            NamedAction::Left => Self::Left,
            NamedAction::Right => Self::Right,
            NamedAction::PageUp => Self::PageUp,
            NamedAction::PageDown => Self::PageDown,
            NamedAction::PageLeft => Self::PageLeft,
            NamedAction::PageRight => Self::PageRight,
            NamedAction::Edit => Self::Edit,
            NamedAction::GoTo => Self::GoTo,
            NamedAction::Search => Self::Search,
            NamedAction::NextMatch => Self::NextMatch,
            NamedAction::PrevMatch => Self::PrevMatch,
            NamedAction::Filter => Self::Filter,
            NamedAction::ResetFilters => Self::ResetFilters,
            NamedAction::Save => Self::Confirm,
            NamedAction::Cancel => Self::Cancel,
            NamedAction::Tab => Self::Tab,
            NamedAction::Help => Self::Help,
            NamedAction::Quit => Self::Quit,
        }
    }
}
