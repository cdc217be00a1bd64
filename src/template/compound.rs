// ABOUTME: Compound time-template value type
// ABOUTME: Renders interleaved literal and cycle-time segments against a UTC-normalized instant

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

use super::cyclestring::CycleString;
use super::expression::CycleTimeExpression;
use super::segment::Segment;

/// An immutable sequence of literal and dynamic segments.
///
/// Equality and hashing are structural over the segment sequence and never
/// depend on what the template renders to, so templates can be used as map
/// and set keys. A literal `"2024"` and an `@Y` segment are different
/// templates even for instants where both render `"2024"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompoundTemplate<E = CycleString> {
    segments: Vec<Segment<E>>,
}

impl<E> CompoundTemplate<E> {
    /// Create a template that owns the given segments
    pub fn new(segments: Vec<Segment<E>>) -> Self {
        Self { segments }
    }

    /// Read-only view of the segments in concatenation order
    pub fn segments(&self) -> &[Segment<E>] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True if no segment depends on the instant
    pub fn is_static(&self) -> bool {
        !self.segments.iter().any(Segment::is_dynamic)
    }
}

impl<E: CycleTimeExpression> CompoundTemplate<E> {
    /// Render the template for `instant`.
    ///
    /// The instant is converted to UTC before any dynamic segment sees it.
    /// Segment outputs are concatenated in order and only the final string
    /// has blanks stripped from its ends. The first failing segment aborts
    /// the render and its error is returned as-is.
    pub fn render<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> Result<String, E::Error> {
        let utc = instant.with_timezone(&Utc);
        trace!("Rendering {} segments at {}", self.segments.len(), utc);

        let mut rendered = String::new();
        for segment in &self.segments {
            let piece = segment.render(&utc)?;
            if segment.is_dynamic() {
                trace!("Dynamic segment rendered as {:?}", piece);
            }
            rendered.push_str(&piece);
        }

        Ok(strip_blank_ends(&rendered).to_string())
    }
}

/// ASCII blanks: space, `\t`, `\n`, `\x0b`, `\x0c` and `\r`
fn is_blank(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

/// Strip ASCII blanks from both ends, plus NUL from the end only.
/// Non-ASCII spaces such as NBSP are content and are kept.
fn strip_blank_ends(text: &str) -> &str {
    text.trim_start_matches(is_blank)
        .trim_end_matches(|c: char| is_blank(c) || c == '\0')
}

impl<E> From<Vec<Segment<E>>> for CompoundTemplate<E> {
    fn from(segments: Vec<Segment<E>>) -> Self {
        Self::new(segments)
    }
}

impl<E> FromIterator<Segment<E>> for CompoundTemplate<E> {
    fn from_iter<I: IntoIterator<Item = Segment<E>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<E: fmt::Display> fmt::Display for CompoundTemplate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            fmt::Display::fmt(segment, f)?;
        }
        Ok(())
    }
}
