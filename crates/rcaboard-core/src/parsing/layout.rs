//! Line shapes for the two column orders the 315 report is printed in.
//!
//! A shape is an ordered list of typed slots matched against the
//! space-separated tokens of a whitespace-collapsed line. Only the name slot
//! spans a variable number of tokens; the shortest name that lets the rest of
//! the shape match wins.

use crate::model::{Layout, Record};
use crate::parsing::values::normalize;
use std::num::ParseIntError;

const NAME_MIN_CHARS: usize = 3;
const NAME_MAX_CHARS: usize = 80;
const CODE_MAX_DIGITS: usize = 6;

/// A typed position in a line shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Salesperson code: 1 to 6 digits.
    Code,
    /// Uppercase name, one or more tokens, 3 to 80 characters in total.
    Name,
    /// Unsigned integer.
    Count,
    /// Amount made of digits, `.` and `,`.
    Amount,
}

#[derive(Debug, Clone, Copy)]
pub struct LineShape {
    pub layout: Layout,
    pub slots: &'static [Slot],
}

pub const CODE_FIRST: LineShape = LineShape {
    layout: Layout::CodeFirst,
    slots: &[
        Slot::Code,
        Slot::Name,
        Slot::Count,
        Slot::Count,
        Slot::Count,
        Slot::Amount,
        Slot::Count,
        Slot::Count,
        Slot::Amount,
        Slot::Amount,
    ],
};

pub const NAME_FIRST: LineShape = LineShape {
    layout: Layout::NameFirst,
    slots: &[
        Slot::Name,
        Slot::Count,
        Slot::Count,
        Slot::Count,
        Slot::Count,
        Slot::Code,
        Slot::Amount,
    ],
};

/// Shapes in the order they are tried.
pub const SHAPES: [LineShape; 2] = [CODE_FIRST, NAME_FIRST];

/// Extract a record from the first shape that matches `line`.
///
/// Once a shape matches, later shapes are not tried, even if the matching
/// shape then rejects the row.
pub fn extract(line: &str) -> Option<(Layout, Record)> {
    let (shape, fields) = SHAPES
        .iter()
        .find_map(|shape| shape.capture(line).map(|fields| (shape, fields)))?;
    shape.build(&fields).map(|record| (shape.layout, record))
}

impl LineShape {
    /// Match the shape against `line`, returning the text captured by each
    /// slot. Tokens after the last slot are ignored, and the last slot only
    /// needs a matching prefix.
    pub fn capture<'a>(&self, line: &'a str) -> Option<Vec<&'a str>> {
        let tokens = tokenize(line);
        let mut captures = Vec::with_capacity(self.slots.len());
        match_slots(line, &tokens, self.slots, &mut captures).then_some(captures)
    }

    /// Turn captured fields into a record.
    ///
    /// Code-first rows with a zero or empty code are dropped; name-first rows
    /// are always kept.
    fn build(&self, fields: &[&str]) -> Option<Record> {
        match self.layout {
            Layout::CodeFirst => {
                let [code, name, _, cli_posit, _, _, _, mix, _, sales] = fields else {
                    return None;
                };
                let rca = code_to_rca(code);
                if rca.is_empty() {
                    return None;
                }
                Some(Record {
                    rca,
                    name: name.trim().to_string(),
                    cli_posit: parse_count(cli_posit).unwrap_or(0),
                    mix: parse_count(mix).unwrap_or(0),
                    sales: normalize(Some(*sales)),
                })
            }
            Layout::NameFirst => {
                let [name, _, cli_posit, mix, _, code, sales] = fields else {
                    return None;
                };
                Some(Record {
                    rca: code_to_rca(code),
                    name: name.trim().to_string(),
                    cli_posit: parse_count(cli_posit).unwrap_or(0),
                    mix: parse_count(mix).unwrap_or(0),
                    sales: normalize(Some(*sales)),
                })
            }
        }
    }
}

fn parse_count(s: &str) -> Result<u64, ParseIntError> {
    s.parse()
}

/// Render a code as its integer value ("0042" -> "42"). Zero and unparseable
/// codes render as an empty string.
fn code_to_rca(code: &str) -> String {
    match parse_count(code) {
        Ok(0) | Err(_) => String::new(),
        Ok(n) => n.to_string(),
    }
}

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    start: usize,
}

impl Token<'_> {
    fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

fn tokenize(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    for part in line.split(' ') {
        if !part.is_empty() {
            tokens.push(Token {
                text: part,
                start: offset,
            });
        }
        offset += part.len() + 1;
    }
    tokens
}

/// Backtracking matcher. Leaves `captures` untouched when it fails.
fn match_slots<'a>(
    line: &'a str,
    tokens: &[Token<'a>],
    slots: &[Slot],
    captures: &mut Vec<&'a str>,
) -> bool {
    let Some((&slot, rest)) = slots.split_first() else {
        return true;
    };

    if slot == Slot::Name {
        let Some(first) = tokens.first() else {
            return false;
        };
        for (i, token) in tokens.iter().enumerate() {
            if !token.text.chars().all(is_name_char) {
                return false;
            }
            let name = &line[first.start..token.end()];
            let len = name.chars().count();
            if len > NAME_MAX_CHARS {
                return false;
            }
            if len < NAME_MIN_CHARS {
                continue;
            }
            captures.push(name);
            if match_slots(line, &tokens[i + 1..], rest, captures) {
                return true;
            }
            captures.pop();
        }
        return false;
    }

    let Some((token, remaining)) = tokens.split_first() else {
        return false;
    };
    let Some(text) = accept(slot, token.text, rest.is_empty()) else {
        return false;
    };
    captures.push(text);
    if match_slots(line, remaining, rest, captures) {
        return true;
    }
    captures.pop();
    false
}

/// Check a single-token slot. A trailing amount only needs a leading run of
/// amount characters.
fn accept(slot: Slot, token: &str, is_last: bool) -> Option<&str> {
    match slot {
        Slot::Code => {
            let ok = (1..=CODE_MAX_DIGITS).contains(&token.len())
                && token.bytes().all(|b| b.is_ascii_digit());
            ok.then_some(token)
        }
        Slot::Count => {
            let ok = !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit());
            ok.then_some(token)
        }
        Slot::Amount if is_last => {
            let end = token
                .find(|c: char| !is_amount_char(c))
                .unwrap_or(token.len());
            (end > 0).then(|| &token[..end])
        }
        Slot::Amount => {
            let ok = !token.is_empty() && token.chars().all(is_amount_char);
            ok.then_some(token)
        }
        Slot::Name => None,
    }
}

fn is_name_char(c: char) -> bool {
    matches!(c, 'A'..='Z' | 'À'..='Ü' | '0'..='9' | '.' | '-')
}

fn is_amount_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == ','
}
