// ABOUTME: Segment type for compound templates
// ABOUTME: A segment is either literal text or a delegated cycle-time expression

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use super::expression::CycleTimeExpression;

/// One piece of a compound template.
///
/// In YAML a plain string deserializes as a literal and a mapping as a
/// dynamic expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment<E> {
    Literal(String),
    Dynamic(E),
}

impl<E> Segment<E> {
    /// Create a literal segment
    pub fn literal(text: impl Into<String>) -> Self {
        Segment::Literal(text.into())
    }

    /// Create a dynamic segment
    pub fn dynamic(expression: E) -> Self {
        Segment::Dynamic(expression)
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Segment::Dynamic(_))
    }

    /// Literal text, if this is a literal segment
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Segment::Literal(text) => Some(text),
            Segment::Dynamic(_) => None,
        }
    }

    /// The wrapped expression, if this is a dynamic segment
    pub fn as_dynamic(&self) -> Option<&E> {
        match self {
            Segment::Literal(_) => None,
            Segment::Dynamic(expression) => Some(expression),
        }
    }
}

impl<E: CycleTimeExpression> Segment<E> {
    /// Render this segment. Literals are borrowed as-is; dynamic segments
    /// delegate to their expression.
    pub fn render(&self, at: &DateTime<Utc>) -> Result<Cow<'_, str>, E::Error> {
        match self {
            Segment::Literal(text) => Ok(Cow::Borrowed(text)),
            Segment::Dynamic(expression) => expression.render(at).map(Cow::Owned),
        }
    }
}

impl<E> From<&str> for Segment<E> {
    fn from(text: &str) -> Self {
        Segment::Literal(text.to_string())
    }
}

impl<E> From<String> for Segment<E> {
    fn from(text: String) -> Self {
        Segment::Literal(text)
    }
}

impl<E: fmt::Display> fmt::Display for Segment<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Dynamic(expression) => fmt::Display::fmt(expression, f),
        }
    }
}
