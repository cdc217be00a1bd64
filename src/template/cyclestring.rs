// ABOUTME: Stock cycle-time expression built from @-directives and an optional offset
// ABOUTME: Formats a UTC cycle instant, e.g. "@Y@m@d@H" shifted by "-06:00:00"

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{Result, TemplateError};
use super::expression::CycleTimeExpression;

const SECONDS_PER_DAY: i64 = 86_400;

/// A cycle string such as `@Y@m@d@H`, optionally shifted by a fixed offset.
///
/// Supported directives are `@Y @y @m @d @H @M @S @j @s @b @B @a @A`; `@@`
/// produces a literal `@`. The format is validated at construction so a
/// built cycle string always renders, barring offset overflow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCycleString", into = "RawCycleString")]
pub struct CycleString {
    format: String,
    offset: Duration,
    pieces: Vec<Piece>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Piece {
    Text(String),
    Directive(&'static str),
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCycleString {
    cyclestr: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    offset: Option<String>,
}

impl CycleString {
    /// Create a cycle string with no offset
    pub fn new(format: impl Into<String>) -> Result<Self> {
        let format = format.into();
        let pieces = tokenize(&format)?;
        Ok(Self {
            format,
            offset: Duration::zero(),
            pieces,
        })
    }

    /// Create a cycle string shifted by an offset such as `-06:00:00`
    pub fn with_offset(format: impl Into<String>, offset: &str) -> Result<Self> {
        let mut cycle = Self::new(format)?;
        cycle.offset = parse_offset(offset)?;
        Ok(cycle)
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Offset applied to the instant before formatting
    pub fn offset(&self) -> Duration {
        self.offset
    }
}

impl CycleTimeExpression for CycleString {
    type Error = TemplateError;

    fn render(&self, at: &DateTime<Utc>) -> Result<String> {
        let shifted = at
            .checked_add_signed(self.offset)
            .ok_or_else(|| TemplateError::TimeOutOfRange {
                instant: at.to_rfc3339(),
                offset: format_offset(self.offset),
            })?;

        let mut rendered = String::with_capacity(self.format.len() + 8);
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => rendered.push_str(text),
                Piece::Directive(spec) => rendered.push_str(&shifted.format(spec).to_string()),
            }
        }
        Ok(rendered)
    }
}

impl fmt::Display for CycleString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.offset == Duration::zero() {
            write!(f, "<cyclestr>{}</cyclestr>", self.format)
        } else {
            write!(
                f,
                "<cyclestr offset=\"{}\">{}</cyclestr>",
                format_offset(self.offset),
                self.format
            )
        }
    }
}

impl TryFrom<RawCycleString> for CycleString {
    type Error = TemplateError;

    fn try_from(raw: RawCycleString) -> Result<Self> {
        match raw.offset {
            Some(offset) => Self::with_offset(raw.cyclestr, &offset),
            None => Self::new(raw.cyclestr),
        }
    }
}

impl From<CycleString> for RawCycleString {
    fn from(cycle: CycleString) -> Self {
        let offset = (cycle.offset != Duration::zero()).then(|| format_offset(cycle.offset));
        Self {
            cyclestr: cycle.format,
            offset,
        }
    }
}

/// Map a directive character to its chrono strftime equivalent
fn strftime_spec(directive: char) -> Option<&'static str> {
    let spec = match directive {
        'Y' => "%Y",
        'y' => "%y",
        'm' => "%m",
        'd' => "%d",
        'H' => "%H",
        'M' => "%M",
        'S' => "%S",
        'j' => "%j",
        's' => "%s",
        'b' => "%b",
        'B' => "%B",
        'a' => "%a",
        'A' => "%A",
        _ => return None,
    };
    Some(spec)
}

fn tokenize(format: &str) -> Result<Vec<Piece>> {
    let unsupported = |directive: String| TemplateError::UnsupportedDirective {
        directive,
        format: format.to_string(),
    };

    let mut pieces = Vec::new();
    let mut text = String::new();
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        if c != '@' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('@') => text.push('@'),
            Some(directive) => {
                let spec =
                    strftime_spec(directive).ok_or_else(|| unsupported(format!("@{}", directive)))?;
                if !text.is_empty() {
                    pieces.push(Piece::Text(std::mem::take(&mut text)));
                }
                pieces.push(Piece::Directive(spec));
            }
            None => return Err(unsupported("@".to_string())),
        }
    }

    if !text.is_empty() {
        pieces.push(Piece::Text(text));
    }
    Ok(pieces)
}

/// Parse `[-|+][[[dd:]hh:]mm:]ss` into a signed duration
fn parse_offset(offset: &str) -> Result<Duration> {
    let invalid = || TemplateError::InvalidOffset(offset.to_string());

    let trimmed = offset.trim();
    let (sign, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let fields: Vec<&str> = body.split(':').collect();
    if fields.len() > 4 {
        return Err(invalid());
    }

    let units = [1, 60, 3_600, SECONDS_PER_DAY];
    let mut total: i64 = 0;
    for (field, unit) in fields.iter().rev().zip(units) {
        if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let value: i64 = field.parse().map_err(|_| invalid())?;
        total = value
            .checked_mul(unit)
            .and_then(|seconds| total.checked_add(seconds))
            .ok_or_else(invalid)?;
    }

    Duration::try_seconds(sign * total).ok_or_else(invalid)
}

fn format_offset(offset: Duration) -> String {
    let seconds = offset.num_seconds();
    let sign = if seconds < 0 { "-" } else { "" };
    let magnitude = seconds.unsigned_abs();
    let days = magnitude / SECONDS_PER_DAY as u64;
    let rest = magnitude % SECONDS_PER_DAY as u64;
    let (hours, minutes, secs) = (rest / 3_600, rest % 3_600 / 60, rest % 60);

    if days > 0 {
        format!("{}{}:{:02}:{:02}:{:02}", sign, days, hours, minutes, secs)
    } else {
        format!("{}{:02}:{:02}:{:02}", sign, hours, minutes, secs)
    }
}
