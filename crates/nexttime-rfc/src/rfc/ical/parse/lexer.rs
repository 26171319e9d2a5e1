//! Line unfolding and content-line tokenizing (RFC 5545 §3.1).

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{ContentLine, Parameter};

/// Unfolds `input` into logical lines tagged with their 1-based starting line.
///
/// CRLF and bare LF both end a line. A line starting with SP or HTAB continues
/// the previous one, minus that single whitespace character. Blank lines are
/// dropped.
#[must_use]
pub fn split_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.is_empty() {
            continue;
        }

        match (line.strip_prefix([' ', '\t']), lines.last_mut()) {
            (Some(folded), Some((_, prev))) => prev.push_str(folded),
            (Some(folded), None) => lines.push((idx + 1, folded.to_string())),
            (None, _) => lines.push((idx + 1, line.to_string())),
        }
    }

    lines
}

/// Byte cursor over one logical line.
struct Cursor<'a> {
    line: &'a str,
    pos: usize,
    line_num: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<char> {
        self.line[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes an `iana-token` / `x-name` (`[A-Za-z0-9-]*`).
    fn token(&mut self) -> &'a str {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            self.pos += 1;
        }
        &self.line[start..self.pos]
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.line_num, self.pos + 1)
    }

    fn missing_colon(&self) -> ParseError {
        ParseError::new(ParseErrorKind::MissingColon, self.line_num, self.line.len())
    }
}

/// Splits one logical line into name, parameters and raw value.
///
/// Format: `name *(";" param) ":" value`. Names are uppercased; the value is
/// everything after the first colon outside a quoted parameter value.
///
/// ## Errors
/// Returns an error for an empty or invalid name, a malformed parameter, an
/// unclosed quote, or a missing colon.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let mut cur = Cursor {
        line,
        pos: 0,
        line_num,
    };

    let name = cur.token();
    match cur.peek() {
        None => return Err(cur.missing_colon()),
        Some(';' | ':') if name.is_empty() => {
            return Err(cur.error(ParseErrorKind::MissingPropertyName));
        }
        Some(';' | ':') => {}
        Some(_) => return Err(cur.error(ParseErrorKind::InvalidPropertyName)),
    }

    let mut params = Vec::new();
    while cur.bump() == Some(';') {
        params.push(parse_parameter(&mut cur)?);
    }

    Ok(ContentLine {
        name: name.to_ascii_uppercase(),
        params,
        raw_value: line[cur.pos..].to_string(),
    })
}

/// Reads `name=value *("," value)`, leaving the cursor on the `;` or `:` after it.
fn parse_parameter(cur: &mut Cursor<'_>) -> ParseResult<Parameter> {
    let name = cur.token();
    if name.is_empty() || cur.peek() != Some('=') {
        return Err(cur.error(ParseErrorKind::InvalidParameter));
    }
    cur.bump();

    let mut values = vec![parse_param_value(cur)?];
    loop {
        match cur.peek() {
            Some(',') => {
                cur.bump();
                values.push(parse_param_value(cur)?);
            }
            Some(';' | ':') => return Ok(Parameter::with_values(name, values)),
            Some(c) => {
                return Err(cur
                    .error(ParseErrorKind::InvalidParameter)
                    .with_context(format!("unexpected character '{c}'")));
            }
            None => return Err(cur.missing_colon()),
        }
    }
}

/// Reads one parameter value. Quoted values may contain `,;:` and use the
/// RFC 6868 caret escapes `^^`, `^n` and `^'`.
fn parse_param_value(cur: &mut Cursor<'_>) -> ParseResult<String> {
    let start = cur.pos;

    if cur.peek() != Some('"') {
        while cur.peek().is_some_and(|c| !matches!(c, ',' | ';' | ':')) {
            cur.bump();
        }
        return Ok(cur.line[start..cur.pos].to_string());
    }

    cur.bump();
    let mut value = String::new();
    while let Some(c) = cur.bump() {
        match c {
            '"' => return Ok(value),
            '^' => {
                let decoded = match cur.peek() {
                    Some('^') => Some('^'),
                    Some('n' | 'N') => Some('\n'),
                    Some('\'') => Some('"'),
                    _ => None,
                };
                if let Some(decoded) = decoded {
                    cur.bump();
                    value.push(decoded);
                } else {
                    value.push('^');
                }
            }
            _ => value.push(c),
        }
    }

    Err(ParseError::new(
        ParseErrorKind::UnclosedQuote,
        cur.line_num,
        start + 1,
    ))
}
