// ABOUTME: Time-template module for cycle-dependent strings
// ABOUTME: Provides compound templates, their segments, and the stock cycle string expression

pub mod compound;
pub mod cyclestring;
pub mod error;
pub mod expression;
pub mod segment;

pub use compound::CompoundTemplate;
pub use cyclestring::CycleString;
pub use error::{Result, TemplateError};
pub use expression::CycleTimeExpression;
pub use segment::Segment;
