// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Tokenizer and recursive-descent parser for the filter language:
//!
//! ```text
//! query      := "SELECT" selectList ("WHERE" whereExpr)?
//! selectList := "*" | column ("," column)*
//! whereExpr  := condition ("AND" condition)*
//! condition  := column operator '"' literal '"'
//! ```
//!
//! Keywords and column names are case-insensitive. A column is one or more
//! bare words joined by single spaces.

use crate::{Clause, FilterCondition, FilterQuery, Operator, QueryError};

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Word(String),
    Star,
    Comma,
    Op(Operator),
    Literal(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    kind: TokenKind,
    start: usize,
}

impl Token {
    fn is_keyword(&self, keyword: &str) -> bool {
        matches!(&self.kind, TokenKind::Word(word) if word.eq_ignore_ascii_case(keyword))
    }

    fn describe(&self) -> String {
        match &self.kind {
            TokenKind::Word(word) => format!("'{word}'"),
            TokenKind::Star => "'*'".to_owned(),
            TokenKind::Comma => "','".to_owned(),
            TokenKind::Op(op) => format!("'{}'", op.as_str()),
            TokenKind::Literal(value) => format!("\"{value}\""),
        }
    }
}

fn is_word_char(ch: char) -> bool {
    !ch.is_whitespace() && !matches!(ch, ',' | '"' | '=' | '!' | '<' | '>')
}

fn tokenize(raw: &str) -> Result<Vec<Token>, QueryError> {
    let mut tokens = Vec::new();
    let mut chars = raw.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        let kind = match ch {
            ch if ch.is_whitespace() => continue,
            ',' => TokenKind::Comma,
            '"' => {
                let mut value = String::new();
                let mut closed = false;
                for (_, next) in chars.by_ref() {
                    if next == '"' {
                        closed = true;
                        break;
                    }
                    value.push(next);
                }
                if !closed {
                    return Err(QueryError::syntax(start, "unterminated string literal"));
                }
                TokenKind::Literal(value)
            }
            '=' | '!' => {
                if chars.next_if(|(_, next)| *next == '=').is_none() {
                    return Err(QueryError::syntax(
                        start,
                        format!("expected '{ch}=' operator"),
                    ));
                }
                TokenKind::Op(if ch == '=' { Operator::Eq } else { Operator::Ne })
            }
            '<' | '>' => {
                let inclusive = chars.next_if(|(_, next)| *next == '=').is_some();
                TokenKind::Op(match (ch, inclusive) {
                    ('<', false) => Operator::Lt,
                    ('<', true) => Operator::Le,
                    (_, false) => Operator::Gt,
                    (_, true) => Operator::Ge,
                })
            }
            _ => {
                let mut word = String::from(ch);
                while let Some((_, next)) = chars.next_if(|(_, next)| is_word_char(*next)) {
                    word.push(next);
                }
                if word == "*" {
                    TokenKind::Star
                } else {
                    TokenKind::Word(word)
                }
            }
        };
        tokens.push(Token { kind, start });
    }

    Ok(tokens)
}

/// Compares header names ignoring case and runs of whitespace.
fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    end: usize,
    headers: &'a [String],
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_second(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1)
    }

    fn position(&self) -> usize {
        self.peek().map_or(self.end, |token| token.start)
    }

    fn error_here(&self, expected: &str) -> QueryError {
        match self.peek() {
            Some(token) => QueryError::syntax(
                token.start,
                format!("expected {expected}, found {}", token.describe()),
            ),
            None => QueryError::syntax(self.end, format!("expected {expected}, found end of query")),
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek().is_some_and(|token| token.is_keyword(keyword)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().is_some_and(|token| &token.kind == kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn query(mut self) -> Result<FilterQuery, QueryError> {
        if !self.eat_keyword("select") {
            return Err(self.error_here("SELECT"));
        }

        let (select_columns, select_indices) = self.select_list()?;

        let mut conditions = Vec::new();
        if self.eat_keyword("where") {
            loop {
                conditions.push(self.condition()?);
                if !self.eat_keyword("and") {
                    break;
                }
            }
        }

        if self.peek().is_some() {
            let expected = if conditions.is_empty() {
                "',' or WHERE"
            } else {
                "AND"
            };
            return Err(self.error_here(expected));
        }

        Ok(FilterQuery {
            select_columns,
            conditions,
            select_indices,
        })
    }

    fn select_list(&mut self) -> Result<(Vec<String>, Vec<usize>), QueryError> {
        if self.eat(&TokenKind::Star) {
            return Ok((self.headers.to_vec(), (0..self.headers.len()).collect()));
        }

        let mut names = Vec::new();
        let mut indices = Vec::new();
        loop {
            let name = self.column_name(Self::where_ends_select)?;
            let (canonical, index) = self.resolve(&name, Clause::Select)?;
            names.push(canonical);
            indices.push(index);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok((names, indices))
    }

    fn condition(&mut self) -> Result<FilterCondition, QueryError> {
        let name = self.column_name(Self::like_ends_column)?;

        let operator = match self.peek().map(|token| &token.kind) {
            Some(TokenKind::Op(op)) => *op,
            Some(TokenKind::Word(word)) if word.eq_ignore_ascii_case("like") => Operator::Like,
            _ => return Err(self.error_here("comparison operator")),
        };
        self.pos += 1;

        let value = match self.peek().map(|token| &token.kind) {
            Some(TokenKind::Literal(value)) => value.clone(),
            _ => return Err(self.error_here("quoted value")),
        };
        self.pos += 1;

        let (column, index) = self.resolve(&name, Clause::Where)?;
        Ok(FilterCondition {
            column,
            operator,
            value,
            index,
        })
    }

    /// Collects consecutive bare words until `ends_name` reports that the word
    /// at the cursor is acting as a keyword. The flag says whether any words
    /// were collected already.
    fn column_name(&mut self, ends_name: fn(&Self, bool) -> bool) -> Result<String, QueryError> {
        let mut words = Vec::new();
        while let Some(TokenKind::Word(word)) = self.peek().map(|token| &token.kind) {
            if ends_name(self, !words.is_empty()) {
                break;
            }
            words.push(word.clone());
            self.pos += 1;
        }

        if words.is_empty() {
            return Err(self.error_here("column name"));
        }
        Ok(words.join(" "))
    }

    /// `where` opens the WHERE clause unless it starts a select item and the
    /// token after it cannot begin a condition.
    fn where_ends_select(&self, collected: bool) -> bool {
        if !self.peek().is_some_and(|token| token.is_keyword("where")) {
            return false;
        }
        if collected {
            return true;
        }
        match self.peek_second() {
            None => false,
            Some(next) if next.kind == TokenKind::Comma => false,
            Some(next) => !next.is_keyword("where"),
        }
    }

    /// `like` is the operator once a name has started, unless a comparison
    /// operator follows it.
    fn like_ends_column(&self, collected: bool) -> bool {
        collected
            && self.peek().is_some_and(|token| token.is_keyword("like"))
            && !matches!(
                self.peek_second().map(|token| &token.kind),
                Some(TokenKind::Op(_))
            )
    }

    fn resolve(&self, name: &str, clause: Clause) -> Result<(String, usize), QueryError> {
        let wanted = normalize(name);
        self.headers
            .iter()
            .position(|header| normalize(header) == wanted)
            .map(|index| (self.headers[index].clone(), index))
            .ok_or_else(|| QueryError::UnknownColumn {
                column: name.to_owned(),
                clause,
            })
    }
}

/// Parses `raw` and resolves every column against `headers`.
pub fn parse(raw: &str, headers: &[String]) -> Result<FilterQuery, QueryError> {
    if raw.trim().is_empty() {
        return Err(QueryError::syntax(0, "empty query"));
    }

    let parser = Parser {
        tokens: tokenize(raw)?,
        pos: 0,
        end: raw.trim_end().len(),
        headers,
    };
    parser.query()
}
