// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use csvtui_app::{Action, ModeKind, NamedAction, TextEdit};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeymapError {
    #[error("empty key binding")]
    Empty,
    #[error("unknown key {0:?}")]
    UnknownKey(String),
    #[error("more than one key in binding {0:?}")]
    MultipleKeys(String),
}

pub fn default_keys(action: NamedAction) -> &'static [&'static str] {
    match action {
        NamedAction::Up => &["up", "k"],
        NamedAction::Down => &["down", "j"],
        NamedAction::Left => &["left", "h"],
        NamedAction::Right => &["right", "l"],
        NamedAction::PageUp => &["pgup", "i"],
        NamedAction::PageDown => &["pgdown", "u"],
        NamedAction::PageLeft => &["y"],
        NamedAction::PageRight => &["o"],
        NamedAction::Edit => &["e"],
        NamedAction::GoTo => &["\\"],
        NamedAction::Search => &["space"],
        NamedAction::NextMatch => &["n"],
        NamedAction::PrevMatch => &["b"],
        NamedAction::Filter => &["~"],
        NamedAction::ResetFilters => &["="],
        NamedAction::Save => &["enter"],
        NamedAction::Cancel => &["esc"],
        NamedAction::Tab => &["tab"],
        NamedAction::Help => &["?"],
        NamedAction::Quit => &["q", "ctrl+c"],
    }
}

/// One key with its modifiers, remembered alongside the text it was parsed
/// from so help can show it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    code: KeyCode,
    modifiers: KeyModifiers,
    label: String,
}

impl KeyBinding {
    /// Accepts a single character or a key name, optionally prefixed with
    /// `ctrl+`, `alt+` or `shift+`.
    pub fn parse(raw: &str) -> Result<Self, KeymapError> {
        if raw.is_empty() {
            return Err(KeymapError::Empty);
        }
        if raw == " " || raw == "+" {
            let code = KeyCode::Char(raw.chars().next().unwrap_or(' '));
            return Ok(Self {
                code,
                modifiers: KeyModifiers::NONE,
                label: raw.to_owned(),
            });
        }

        let mut modifiers = KeyModifiers::NONE;
        let mut code = None;
        for part in raw.split('+') {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" | "option" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => {
                    if code.is_some() {
                        return Err(KeymapError::MultipleKeys(raw.to_owned()));
                    }
                    code = Some(parse_key_code(part)?);
                }
            }
        }

        let code = code.ok_or_else(|| KeymapError::UnknownKey(raw.to_owned()))?;
        Ok(Self {
            code,
            modifiers,
            label: raw.to_owned(),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Shift is ignored for printable characters since terminals report it
    /// inconsistently for symbols such as `?` and `~`.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && significant_modifiers(self.code, self.modifiers)
                == significant_modifiers(key.code, key.modifiers)
    }
}

fn significant_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyModifiers {
    if matches!(code, KeyCode::Char(_)) {
        modifiers & !KeyModifiers::SHIFT
    } else {
        modifiers
    }
}

fn parse_key_code(part: &str) -> Result<KeyCode, KeymapError> {
    let mut chars = part.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(ch));
    }

    let code = match part.to_ascii_lowercase().as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "pgup" | "pageup" => KeyCode::PageUp,
        "pgdown" | "pgdn" | "pagedown" => KeyCode::PageDown,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        name => {
            let function = name
                .strip_prefix('f')
                .and_then(|number| number.parse::<u8>().ok())
                .filter(|number| (1..=12).contains(number));
            match function {
                Some(number) => KeyCode::F(number),
                None => return Err(KeymapError::UnknownKey(part.to_owned())),
            }
        }
    };
    Ok(code)
}

/// Text edits for keys that are not bound to a named action in text fields.
pub fn text_edit(key: &KeyEvent) -> Option<TextEdit> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(ch) => Some(TextEdit::Insert(ch)),
        KeyCode::Backspace => Some(TextEdit::Backspace),
        KeyCode::Delete => Some(TextEdit::Delete),
        KeyCode::Left => Some(TextEdit::Left),
        KeyCode::Right => Some(TextEdit::Right),
        KeyCode::Home => Some(TextEdit::Home),
        KeyCode::End => Some(TextEdit::End),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    bindings: Vec<(NamedAction, Vec<KeyBinding>)>,
}

impl Default for Keymap {
    fn default() -> Self {
        let bindings = NamedAction::ALL
            .into_iter()
            .map(|action| {
                let keys = default_keys(action)
                    .iter()
                    .filter_map(|raw| KeyBinding::parse(raw).ok())
                    .collect();
                (action, keys)
            })
            .collect();
        Self { bindings }
    }
}

impl Keymap {
    /// Defaults, with each non-empty configured list replacing the defaults
    /// for its action.
    pub fn with_overrides(
        overrides: &BTreeMap<NamedAction, Vec<String>>,
    ) -> Result<Self, KeymapError> {
        let mut keymap = Self::default();
        for (action, keys) in &mut keymap.bindings {
            let Some(raw_keys) = overrides.get(action).filter(|raw| !raw.is_empty()) else {
                continue;
            };
            *keys = raw_keys
                .iter()
                .map(|raw| KeyBinding::parse(raw))
                .collect::<Result<_, _>>()?;
        }
        Ok(keymap)
    }

    pub fn bindings(&self, action: NamedAction) -> &[KeyBinding] {
        self.bindings
            .iter()
            .find(|(candidate, _)| *candidate == action)
            .map_or(&[], |(_, keys)| keys.as_slice())
    }

    /// Labels joined the way help text shows them, e.g. `up/k`.
    pub fn labels(&self, action: NamedAction) -> String {
        self.bindings(action)
            .iter()
            .map(KeyBinding::label)
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn named_action(&self, key: &KeyEvent) -> Option<NamedAction> {
        self.bindings
            .iter()
            .find(|(_, keys)| keys.iter().any(|binding| binding.matches(key)))
            .map(|(action, _)| *action)
    }

    /// Resolves a key press for the given mode. In text-entry modes only the
    /// save, cancel and tab bindings act; everything else edits the field.
    pub fn resolve(&self, mode: ModeKind, key: &KeyEvent) -> Option<Action> {
        let named = self.named_action(key);
        if !mode.is_text_entry() {
            return named.map(Action::from);
        }
        match named {
            Some(action) if action.works_in_text_entry() => Some(action.into()),
            _ => text_edit(key).map(Action::Text),
        }
    }
}
