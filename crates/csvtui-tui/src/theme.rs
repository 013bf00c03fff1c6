// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use csvtui_app::DataType;
use ratatui::style::{Color, Modifier, Style};
use std::collections::BTreeMap;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {value:?} for {}", .data_type.as_str())]
pub struct ThemeError {
    pub data_type: DataType,
    pub value: String,
}

/// Foreground color for one data type, in the bright and dimmed variants
/// used on alternating rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeColors {
    pub normal: Color,
    pub dim: Color,
}

impl TypeColors {
    fn rgb(normal: u32, dim: u32) -> Self {
        Self {
            normal: Color::from_u32(normal),
            dim: Color::from_u32(dim),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    types: BTreeMap<DataType, TypeColors>,
    pub header: Style,
    pub selected: Style,
    pub border: Style,
    pub error: Style,
}

pub fn default_type_colors(data_type: DataType) -> TypeColors {
    match data_type {
        DataType::String => TypeColors::rgb(0x87_CE_EB, 0x46_82_B4),
        DataType::Int => TypeColors::rgb(0x90_EE_90, 0x6B_8E_23),
        DataType::Float => TypeColors::rgb(0xFF_B6_C1, 0xCD_5C_5C),
        DataType::Bool => TypeColors::rgb(0xDD_A0_DD, 0x93_70_DB),
        DataType::Empty => TypeColors::rgb(0xD3_D3_D3, 0xA9_A9_A9),
    }
}

/// The bright default as written in config files.
pub fn default_color_hex(data_type: DataType) -> String {
    match default_type_colors(data_type).normal {
        Color::Rgb(r, g, b) => format!("#{r:02X}{g:02X}{b:02X}"),
        other => other.to_string(),
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            types: DataType::ALL
                .into_iter()
                .map(|data_type| (data_type, default_type_colors(data_type)))
                .collect(),
            header: Style::default()
                .fg(Color::Indexed(252))
                .add_modifier(Modifier::BOLD),
            selected: Style::default()
                .fg(Color::from_u32(0x01_BE_85))
                .bg(Color::from_u32(0x00_43_2F)),
            border: Style::default().fg(Color::Indexed(238)),
            error: Style::default()
                .fg(Color::from_u32(0xFF_6B_6B))
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Theme {
    /// A configured color replaces both variants, so that type stops
    /// alternating.
    pub fn with_overrides(overrides: &BTreeMap<DataType, String>) -> Result<Self, ThemeError> {
        let mut theme = Self::default();
        for (data_type, value) in overrides {
            let color = Color::from_str(value.trim()).map_err(|_| ThemeError {
                data_type: *data_type,
                value: value.clone(),
            })?;
            theme.types.insert(
                *data_type,
                TypeColors {
                    normal: color,
                    dim: color,
                },
            );
        }
        Ok(theme)
    }

    pub fn type_colors(&self, data_type: DataType) -> TypeColors {
        self.types
            .get(&data_type)
            .copied()
            .unwrap_or_else(|| default_type_colors(data_type))
    }

    /// Even rows use the dimmed variant.
    pub fn cell_style(&self, data_type: DataType, row: usize) -> Style {
        let colors = self.type_colors(data_type);
        let fg = if row % 2 == 0 {
            colors.dim
        } else {
            colors.normal
        };
        Style::default().fg(fg)
    }
}

#[cfg(test)]
mod tests {
    use super::{Theme, default_color_hex, default_type_colors};
    use csvtui_app::DataType;
    use ratatui::style::Color;
    use std::collections::BTreeMap;

    #[test]
    fn rows_alternate_between_dim_and_normal() {
        let theme = Theme::default();
        assert_eq!(
            theme.cell_style(DataType::Int, 0).fg,
            Some(Color::Rgb(0x6B, 0x8E, 0x23))
        );
        assert_eq!(
            theme.cell_style(DataType::Int, 1).fg,
            Some(Color::Rgb(0x90, 0xEE, 0x90))
        );
    }

    #[test]
    fn override_sets_both_variants() -> anyhow::Result<()> {
        let mut overrides = BTreeMap::new();
        overrides.insert(DataType::String, "#112233".to_owned());
        overrides.insert(DataType::Bool, "yellow".to_owned());
        let theme = Theme::with_overrides(&overrides)?;

        let string = theme.type_colors(DataType::String);
        assert_eq!(string.normal, Color::Rgb(0x11, 0x22, 0x33));
        assert_eq!(string.dim, string.normal);
        assert_eq!(theme.type_colors(DataType::Bool).dim, Color::Yellow);
        assert_eq!(
            theme.type_colors(DataType::Float),
            default_type_colors(DataType::Float)
        );
        Ok(())
    }

    #[test]
    fn default_hex_matches_palette() {
        assert_eq!(default_color_hex(DataType::String), "#87CEEB");
        assert_eq!(default_color_hex(DataType::Empty), "#D3D3D3");
    }

    #[test]
    fn rejects_unknown_colors() {
        let mut overrides = BTreeMap::new();
        overrides.insert(DataType::Empty, "not-a-color".to_owned());
        let error = Theme::with_overrides(&overrides).expect_err("bad color");
        assert_eq!(error.to_string(), "invalid color \"not-a-color\" for empty");
    }
}
