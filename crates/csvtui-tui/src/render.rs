// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::keymap::Keymap;
use crate::theme::Theme;
use csvtui_app::{
    CELL_PADDING, DataType, GoToStep, Mode, NamedAction, SearchField, Session, TextInput,
};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

const HELP_SEPARATOR: &str = " • ";
const INPUT_CARET: char = '▏';
const FOCUS_MARK: &str = "► ";

pub fn render(
    frame: &mut Frame<'_>,
    session: &Session,
    keymap: &Keymap,
    theme: &Theme,
    source_label: &str,
) {
    let prompt = prompt_lines(session, keymap, source_label);
    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(to_u16(prompt.len())),
        ])
        .split(frame.area());

    render_table(frame, areas[0], session, theme);
    frame.render_widget(Paragraph::new(legend_line(theme)), areas[1]);

    let status = match prompt_error(session) {
        Some(error) => Line::styled(error, theme.error),
        None => Line::from(status_text(session)),
    };
    frame.render_widget(Paragraph::new(status), areas[2]);

    let prompt: Vec<Line<'_>> = prompt.into_iter().map(Line::from).collect();
    frame.render_widget(Paragraph::new(prompt), areas[3]);
}

fn render_table(frame: &mut Frame<'_>, area: Rect, session: &Session, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border);
    let table = session.grid().active();
    if table.is_empty() {
        frame.render_widget(Paragraph::new("No data to display").block(block), area);
        return;
    }

    let nav = session.navigator();
    let layout = nav.layout(table);
    let viewport = nav.viewport();
    let cursor = nav.cursor();
    let columns = layout.visible_columns(viewport.x);

    let widths: Vec<Constraint> = columns
        .clone()
        .map(|col| Constraint::Length(to_u16(layout.column_width(col) + CELL_PADDING)))
        .collect();

    let header = Row::new(columns.clone().map(|col| {
        let label = table.headers().get(col).map_or("", String::as_str);
        Cell::from(padded(label, layout.column_width(col)))
    }))
    .style(theme.header)
    .bottom_margin(1);

    let rows = layout.visible_rows(viewport.y).map(|row| {
        Row::new(columns.clone().map(|col| {
            let value = table.cell(row, col).unwrap_or_default();
            let style = if cursor.row == row && cursor.col == col {
                theme.selected
            } else {
                theme.cell_style(table.column_type(col), row)
            };
            Cell::from(padded(value, layout.column_width(col))).style(style)
        }))
    });

    let widget = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(block);
    frame.render_widget(widget, area);
}

fn legend_line(theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::raw("Legend:")];
    for data_type in DataType::ALL {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("■{}", data_type.label()),
            Style::default().fg(theme.type_colors(data_type).normal),
        ));
    }
    Line::from(spans)
}

pub fn legend_text() -> String {
    let labels: Vec<String> = DataType::ALL
        .iter()
        .map(|data_type| format!("■{}", data_type.label()))
        .collect();
    format!("Legend: {}", labels.join(" "))
}

pub fn status_text(session: &Session) -> String {
    let grid = session.grid();
    let table = grid.active();
    let nav = session.navigator();
    let layout = nav.layout(table);
    let cursor = nav.cursor();
    let columns = layout.visible_columns(nav.viewport().x);

    let position = |index: usize, count: usize| if count == 0 { 0 } else { index + 1 };
    let first_column = if columns.is_empty() { 0 } else { columns.start + 1 };

    let mut status = format!(
        "Row: {}/{}, Col: {}/{} | Showing cols {}-{} | Width: {}/{}",
        position(cursor.row, table.row_count()),
        table.row_count(),
        position(cursor.col, table.column_count()),
        table.column_count(),
        first_column,
        columns.end,
        layout.used_width(columns.clone()),
        nav.size().width,
    );
    if grid.has_changes() {
        status.push_str(" [MODIFIED]");
    }
    if grid.is_filtered() {
        status.push_str(&format!(
            " [FILTERED: {} filters]",
            grid.filter_history().len()
        ));
    }
    if matches!(session.mode(), Mode::Normal)
        && let Some(search) = session.search().status()
    {
        status.push_str(" | ");
        status.push_str(&search);
    }
    status
}

/// Error shown in place of the status line while a prompt rejects its input.
pub fn prompt_error(session: &Session) -> Option<String> {
    match session.mode() {
        Mode::GoTo(prompt) => prompt.error.as_ref().map(ToString::to_string),
        Mode::Filtering(prompt) => prompt.error.as_ref().map(ToString::to_string),
        _ => None,
    }
}

pub fn prompt_lines(session: &Session, keymap: &Keymap, source_label: &str) -> Vec<String> {
    match session.mode() {
        Mode::Normal if session.help_visible() => full_help(keymap),
        Mode::Normal => vec![help_line(keymap, &NamedAction::SHORT_HELP)],
        Mode::Editing(input) => {
            let cursor = session.navigator().cursor();
            vec![
                format!(
                    "Editing cell [{},{}]: {}",
                    cursor.row + 1,
                    cursor.col + 1,
                    with_caret(input)
                ),
                "EDIT MODE - Enter to save, Esc to cancel".to_owned(),
            ]
        }
        Mode::GoTo(prompt) => match prompt.step {
            GoToStep::Row => vec![
                format!("Go to row: {}", with_caret(&prompt.row)),
                "GOTO MODE - Enter row number, then press Enter".to_owned(),
            ],
            GoToStep::Column { row } => vec![
                format!("Go to row {}, column: {}", row + 1, with_caret(&prompt.column)),
                "GOTO MODE - Enter column number, then press Enter (Esc to cancel)".to_owned(),
            ],
        },
        Mode::Searching(prompt) => {
            let mut lines: Vec<String> = SearchField::ALL
                .into_iter()
                .map(|field| {
                    let focused = field == prompt.field;
                    let mark = if focused { FOCUS_MARK } else { "  " };
                    let input = prompt.input(field);
                    let value = if focused {
                        with_caret(input)
                    } else {
                        input.value().to_owned()
                    };
                    format!("{mark}{}: {value}", field.label())
                })
                .collect();
            lines.push("SEARCH MODE - Tab to switch fields, Enter to search, Esc to cancel".to_owned());
            lines
        }
        Mode::Filtering(prompt) => vec![
            format!("Filter: {}", with_caret(&prompt.input)),
            "FILTER MODE - Enter SQL-like query (SELECT col1,col2 WHERE col3 == \"value\"), Enter to apply, Esc to cancel".to_owned(),
        ],
        Mode::SavePrompt => vec![
            format!("Save changes to {source_label}?"),
            "You have unsaved changes. Save to original file? (y/n, Esc to cancel)".to_owned(),
        ],
        Mode::SaveFilteredPrompt(input) => vec![
            format!("Save filtered CSV as: {}", with_caret(input)),
            "Enter filename to save filtered data, leave blank to quit without saving, Esc to cancel".to_owned(),
        ],
    }
}

fn help_line(keymap: &Keymap, actions: &[NamedAction]) -> String {
    actions
        .iter()
        .map(|action| format!("{} {}", keymap.labels(*action), action.description()))
        .collect::<Vec<_>>()
        .join(HELP_SEPARATOR)
}

fn full_help(keymap: &Keymap) -> Vec<String> {
    NamedAction::FULL_HELP
        .iter()
        .map(|group| help_line(keymap, group))
        .collect()
}

fn with_caret(input: &TextInput) -> String {
    let mut text: String = input.value().chars().take(input.cursor()).collect();
    text.push(INPUT_CARET);
    text.extend(input.value().chars().skip(input.cursor()));
    text
}

/// One space either side, with overlong values cut to `width` ending in `…`.
fn padded(value: &str, width: usize) -> String {
    format!(" {} ", fit(value, width))
}

fn fit(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_owned();
    }
    let mut truncated: String = value.chars().take(width.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::{fit, legend_text, prompt_error, prompt_lines, render, status_text};
    use crate::keymap::Keymap;
    use crate::theme::Theme;
    use csvtui_app::{Action, GridStore, Session, TerminalSize, TextEdit};
    use csvtui_store::demo::TableFaker;
    use csvtui_testkit::scores;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn session_from(parts: (Vec<String>, Vec<Vec<String>>), size: TerminalSize) -> Session {
        let (headers, rows) = parts;
        Session::new(GridStore::load(headers, rows), size)
    }

    fn scores_session() -> Session {
        session_from(scores().into_parts(), TerminalSize::new(80, 24))
    }

    fn type_text(session: &mut Session, text: &str) {
        for ch in text.chars() {
            session.dispatch(Action::Text(TextEdit::Insert(ch)));
        }
    }

    fn draw(session: &Session, width: u16, height: u16) -> anyhow::Result<Vec<String>> {
        let mut terminal = Terminal::new(TestBackend::new(width, height))?;
        let keymap = Keymap::default();
        let theme = Theme::default();
        terminal.draw(|frame| render(frame, session, &keymap, &theme, "scores.csv"))?;
        let buffer = terminal.backend().buffer();
        Ok(buffer
            .content()
            .chunks(usize::from(width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect())
    }

    #[test]
    fn fit_truncates_with_ellipsis() {
        assert_eq!(fit("short", 8), "short");
        assert_eq!(fit("exactly8", 8), "exactly8");
        assert_eq!(fit("much too long", 8), "much to…");
    }

    #[test]
    fn legend_lists_every_type() {
        assert_eq!(legend_text(), "Legend: ■str ■int ■float ■bool ■empty");
    }

    #[test]
    fn status_reports_position_and_flags() {
        let mut session = scores_session();
        session.dispatch(Action::Down);
        assert_eq!(
            status_text(&session),
            "Row: 2/2, Col: 1/3 | Showing cols 1-3 | Width: 34/80"
        );

        session.dispatch(Action::Edit);
        type_text(&mut session, "0");
        session.dispatch(Action::Confirm);
        session.dispatch(Action::Filter);
        type_text(&mut session, r#"SELECT * WHERE id == "20""#);
        session.dispatch(Action::Confirm);
        assert_eq!(
            status_text(&session),
            "Row: 1/1, Col: 1/3 | Showing cols 1-3 | Width: 34/80 [MODIFIED] [FILTERED: 1 filters]"
        );
    }

    #[test]
    fn status_shows_search_progress_in_normal_mode() {
        let mut session = scores_session();
        session.dispatch(Action::Search);
        type_text(&mut session, "zzz");
        session.dispatch(Action::Confirm);
        assert!(status_text(&session).ends_with(" | Search: no matches found"));

        session.dispatch(Action::Search);
        type_text(&mut session, "b");
        assert!(!status_text(&session).contains("Search:"));
        session.dispatch(Action::Confirm);
        assert!(status_text(&session).ends_with(" | Search: 1/1 matches (n/b to navigate)"));
    }

    #[test]
    fn normal_mode_shows_short_or_full_help() {
        let mut session = scores_session();
        let keymap = Keymap::default();
        assert_eq!(
            prompt_lines(&session, &keymap, "scores.csv"),
            vec!["? toggle help • e edit cell • q/ctrl+c quit".to_owned()]
        );

        session.dispatch(Action::Help);
        let lines = prompt_lines(&session, &keymap, "scores.csv");
        assert_eq!(lines.len(), 6);
        assert_eq!(
            lines[0],
            "up/k move up • down/j move down • left/h move left • right/l move right"
        );
    }

    #[test]
    fn prompts_follow_the_mode() {
        let keymap = Keymap::default();
        let mut session = scores_session();

        session.dispatch(Action::GoTo);
        type_text(&mut session, "9");
        session.dispatch(Action::Confirm);
        assert_eq!(
            prompt_error(&session).as_deref(),
            Some("Invalid row: valid range 1-2")
        );
        session.dispatch(Action::Text(TextEdit::Backspace));
        type_text(&mut session, "2");
        session.dispatch(Action::Confirm);
        assert_eq!(
            prompt_lines(&session, &keymap, "scores.csv")[0],
            "Go to row 2, column: ▏"
        );
        session.dispatch(Action::Cancel);

        session.dispatch(Action::Search);
        type_text(&mut session, "ann");
        session.dispatch(Action::Tab);
        let lines = prompt_lines(&session, &keymap, "scores.csv");
        assert_eq!(lines[0], "  Search: ann");
        assert_eq!(lines[1], "► Row filter: ▏");
        assert_eq!(lines[2], "  Col filter: ");
        session.dispatch(Action::Cancel);

        session.dispatch(Action::Filter);
        type_text(&mut session, "SELECT nope");
        session.dispatch(Action::Confirm);
        assert_eq!(
            prompt_error(&session).as_deref(),
            Some("column 'nope' not found")
        );
        assert_eq!(
            prompt_lines(&session, &keymap, "scores.csv")[0],
            "Filter: SELECT nope▏"
        );
    }

    #[test]
    fn save_prompt_names_the_source() {
        let keymap = Keymap::default();
        let mut session = scores_session();
        session.dispatch(Action::Edit);
        session.dispatch(Action::Text(TextEdit::Insert('!')));
        session.dispatch(Action::Confirm);
        session.dispatch(Action::Quit);
        assert_eq!(
            prompt_lines(&session, &keymap, "scores.csv")[0],
            "Save changes to scores.csv?"
        );
    }

    #[test]
    fn renders_table_legend_and_status() -> anyhow::Result<()> {
        let session = scores_session();
        let screen = draw(&session, 80, 12)?;

        assert!(screen[1].contains(" id "));
        assert!(screen[1].contains(" name "));
        assert!(screen[3].contains(" Ann "));
        assert!(screen[4].contains(" Bob "));
        assert!(screen[9].starts_with("Legend: ■str ■int ■float ■bool ■empty"));
        assert!(screen[10].starts_with("Row: 1/2, Col: 1/3"));
        assert!(screen[11].starts_with("? toggle help"));
        Ok(())
    }

    #[test]
    fn wide_tables_show_only_fitting_columns() -> anyhow::Result<()> {
        let session = session_from(
            TableFaker::new(3).employees(4).into_parts(),
            TerminalSize::new(40, 12),
        );
        let screen = draw(&session, 40, 12)?;
        assert!(screen[1].contains(" id "));
        assert!(!screen[1].contains("manager notes"));
        Ok(())
    }

    #[test]
    fn empty_result_says_so() -> anyhow::Result<()> {
        let mut session = scores_session();
        session.dispatch(Action::Filter);
        type_text(&mut session, r#"SELECT * WHERE id == "99""#);
        session.dispatch(Action::Confirm);
        let screen = draw(&session, 60, 10)?;
        assert!(screen[1].contains("No data to display"));
        Ok(())
    }
}
