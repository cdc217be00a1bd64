// ABOUTME: Contract for time-dependent segments of a compound template
// ABOUTME: Defines the trait a cycle-time expression implements to render against a UTC instant

use chrono::{DateTime, Utc};
use std::hash::Hash;
use std::sync::Arc;

/// A time-dependent expression that renders itself for a given UTC instant.
///
/// `Eq` and `Hash` are part of the contract: compound templates compare and
/// hash their dynamic segments through them, never through rendered output.
/// Rendering must be a deterministic function of `at` and must not touch
/// shared mutable state.
pub trait CycleTimeExpression: Eq + Hash {
    /// Failure reported by [`render`](Self::render). Compound templates
    /// propagate it to their caller unchanged.
    type Error;

    /// Render the expression for the given instant.
    fn render(&self, at: &DateTime<Utc>) -> Result<String, Self::Error>;
}

impl<T: CycleTimeExpression> CycleTimeExpression for Arc<T> {
    type Error = T::Error;

    fn render(&self, at: &DateTime<Utc>) -> Result<String, Self::Error> {
        (**self).render(at)
    }
}

impl<T: CycleTimeExpression> CycleTimeExpression for Box<T> {
    type Error = T::Error;

    fn render(&self, at: &DateTime<Utc>) -> Result<String, Self::Error> {
        (**self).render(at)
    }
}
